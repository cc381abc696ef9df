use std::io::Read;

use tracing::warn;

use crate::application::{AppError, Session};
use crate::domain::{EntryError, EntryRequest};

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// A row that could not be imported
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Recognized column headers, matched case-insensitively.
const DESCRIPTION_HEADERS: [&str; 2] = ["item", "description"];
const PERIOD_HEADERS: [&str; 2] = ["month", "period"];
const AMOUNT_HEADERS: [&str; 1] = ["amount"];
const DEADLINE_HEADERS: [&str; 2] = ["deadline", "payment deadline"];
const STATUS_HEADERS: [&str; 1] = ["status"];

/// Loads entries into a session from external sources.
pub struct Importer<'a> {
    session: &'a mut Session,
}

impl<'a> Importer<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Import entries from a headered CSV (`item,month,amount,deadline,status`).
    /// Bad rows are collected in the result and skipped.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<ImportResult, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let columns = [
            column(&DESCRIPTION_HEADERS),
            column(&PERIOD_HEADERS),
            column(&AMOUNT_HEADERS),
            column(&DEADLINE_HEADERS),
            column(&STATUS_HEADERS),
        ];

        let mut result = ImportResult::default();

        for (line_num, record) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.push_error(line, None, format!("CSV parse error: {}", e));
                    continue;
                }
            };

            let [description, period, amount, deadline, status] =
                columns.map(|idx| idx.and_then(|i| record.get(i)).unwrap_or(""));

            let parsed = EntryRequest::from_fields(description, period, amount, deadline, status);
            let request = match parsed {
                Ok(request) => request,
                Err(e) => {
                    result.push_error(line, field_name(&e), e.to_string());
                    continue;
                }
            };

            match self.session.add_entry(request) {
                Ok(_) => result.imported += 1,
                Err(AppError::InvalidEntry(e)) => {
                    result.push_error(line, field_name(&e), e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(result)
    }
}

impl ImportResult {
    fn push_error(&mut self, line: usize, field: Option<&str>, error: String) {
        warn!(line, field, error = %error, "import row skipped");
        self.errors.push(ImportError {
            line,
            field: field.map(str::to_string),
            error,
        });
    }
}

/// Parse a pipe-separated entry: `description|month|amount|deadline|status`.
/// Trailing fields may be omitted.
pub fn parse_item_spec(item: &str) -> Result<EntryRequest, EntryError> {
    let mut fields = item.splitn(5, '|').map(str::trim);
    let mut next = || fields.next().unwrap_or("");
    let (description, period, amount, deadline, status) = (next(), next(), next(), next(), next());
    EntryRequest::from_fields(description, period, amount, deadline, status)
}

fn field_name(error: &EntryError) -> Option<&'static str> {
    match error {
        EntryError::MissingDescription => Some("item"),
        EntryError::MissingAmount
        | EntryError::InvalidAmount { .. }
        | EntryError::NegativeAmount(_) => Some("amount"),
        EntryError::MissingPeriod | EntryError::InvalidPeriod(_) => Some("month"),
        EntryError::InvalidDeadline(_) => Some("deadline"),
        EntryError::InvalidStatus(_) => Some("status"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentStatus, Period};

    #[test]
    fn test_parse_item_spec_full() {
        let request = parse_item_spec("Lift AMC | Jun-25 | 12000 | 2025-06-30 | overdue").unwrap();

        assert_eq!(request.description, "Lift AMC");
        assert_eq!(request.period, Period::new(2025, 6));
        assert_eq!(request.amount_cents, Some(1200000));
        assert_eq!(request.status, PaymentStatus::Overdue);
    }

    #[test]
    fn test_parse_item_spec_partial() {
        let request = parse_item_spec("Diesel|Jul-25|3400.5").unwrap();

        assert_eq!(request.amount_cents, Some(340050));
        assert_eq!(request.deadline, None);
        assert_eq!(request.status, PaymentStatus::Pending);

        let bare = parse_item_spec("Diesel").unwrap();
        assert_eq!(bare.amount_cents, None);
    }

    #[test]
    fn test_item_without_month_is_rejected() {
        let request = parse_item_spec("Lift AMC||1200").unwrap();
        assert_eq!(request.period, None);

        let mut session = Session::new();
        let result = session.add_entry(request);

        assert!(matches!(
            result,
            Err(AppError::InvalidEntry(EntryError::MissingPeriod))
        ));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_import_csv_collects_row_errors() {
        let csv = "\
item,month,amount,deadline,status
Plumbing,Jul-25,100,,Paid
,Jul-25,50,,
Painting,Jul-25,,,
Security,Jul-25,abc,,
Housekeeping,Jun-25,250,2025-07-10,Pending
";
        let mut session = Session::new();
        let result = Importer::new(&mut session).import_csv(csv.as_bytes()).unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.errors[0].line, 3);
        assert_eq!(result.errors[0].field.as_deref(), Some("item"));
        assert_eq!(result.errors[1].field.as_deref(), Some("amount"));
        assert_eq!(result.errors[2].line, 5);
        assert_eq!(session.total(), 35000);
    }

    #[test]
    fn test_import_csv_row_without_month() {
        let csv = "\
item,month,amount
Generator service,,800
Generator service,Jul-25,800
";
        let mut session = Session::new();
        let result = Importer::new(&mut session).import_csv(csv.as_bytes()).unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].line, 2);
        assert_eq!(result.errors[0].field.as_deref(), Some("month"));
        assert_eq!(result.errors[0].error, "Bill month is required");
        assert_eq!(session.total(), 80000);
    }

    #[test]
    fn test_import_csv_without_month_column() {
        let csv = "item,amount\nBulbs,10\n";
        let mut session = Session::new();
        let result = Importer::new(&mut session).import_csv(csv.as_bytes()).unwrap();

        assert_eq!(result.imported, 0);
        assert_eq!(result.errors[0].field.as_deref(), Some("month"));
    }

    #[test]
    fn test_import_csv_header_aliases_and_order() {
        let csv = "Status,Amount,Description,Period\nPaid,10,Bulbs,aug-25\n";
        let mut session = Session::new();
        let result = Importer::new(&mut session).import_csv(csv.as_bytes()).unwrap();

        assert_eq!(result.imported, 1);
        let entry = &session.ledger().entries()[0];
        assert_eq!(entry.description, "Bulbs");
        assert_eq!(entry.status, PaymentStatus::Paid);
        assert_eq!(entry.period, Period::new(2025, 8).unwrap());
    }
}
