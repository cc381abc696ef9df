use uuid::Uuid;

use super::{Cents, Entry, EntryError, EntryId, EntryRequest};

/// The ordered collection of expense entries for one session.
/// Iteration order is insertion order; entries leave only through [`Ledger::remove`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a request and append the resulting entry.
    /// A rejected request leaves the ledger untouched.
    pub fn add(&mut self, request: EntryRequest) -> Result<Entry, EntryError> {
        if request.description.trim().is_empty() {
            return Err(EntryError::MissingDescription);
        }
        let amount_cents = request.amount_cents.ok_or(EntryError::MissingAmount)?;
        if amount_cents < 0 {
            return Err(EntryError::NegativeAmount(amount_cents));
        }
        let period = request.period.ok_or(EntryError::MissingPeriod)?;

        let entry = Entry {
            id: self.next_id(),
            description: request.description,
            period,
            amount_cents,
            deadline: request.deadline,
            status: request.status,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Remove the entry with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Sum of all entry amounts; zero for an empty ledger.
    pub fn total(&self) -> Cents {
        compute_total(&self.entries)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_id(&self) -> EntryId {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sum the amounts of a list of entries.
/// Saturates instead of wrapping on overflow.
pub fn compute_total(entries: &[Entry]) -> Cents {
    entries
        .iter()
        .fold(0, |total: Cents, entry| total.saturating_add(entry.amount_cents))
}
