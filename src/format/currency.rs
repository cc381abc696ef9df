use super::{DigitGrouping, FormatConfig};
use crate::domain::Cents;

/// Largest supported number of fraction digits; amounts are stored in hundredths.
pub const MAX_FRACTION_DIGITS: u32 = 2;

/// Render an amount as a currency string, e.g. 150075 -> "₹1,501".
///
/// Rounds half away from zero to `config.fraction_digits`. Only the returned
/// string is rounded; the stored amount is untouched.
pub fn format_currency(cents: Cents, config: &FormatConfig) -> String {
    let digits = config.fraction_digits.min(MAX_FRACTION_DIGITS);
    let step = 10u64.pow(MAX_FRACTION_DIGITS - digits);
    let rounded = cents.unsigned_abs().saturating_add(step / 2) / step;

    let scale = 10u64.pow(digits);
    let units = rounded / scale;
    let fraction = rounded % scale;

    let mut out = String::new();
    if cents < 0 && rounded != 0 {
        out.push('-');
    }
    out.push_str(&config.currency_symbol);
    out.push_str(&group_digits(units, config.grouping, config.group_separator));
    if digits > 0 {
        out.push(config.decimal_separator);
        out.push_str(&format!("{:0width$}", fraction, width = digits as usize));
    }
    out
}

/// Insert group separators into the decimal representation of `value`.
pub fn group_digits(value: u64, grouping: DigitGrouping, separator: char) -> String {
    let digits = value.to_string();
    match grouping {
        DigitGrouping::None => digits,
        DigitGrouping::Western => join_groups(&digits, 3, 3, separator),
        DigitGrouping::Indian => join_groups(&digits, 3, 2, separator),
    }
}

/// Split `digits` from the right: first a group of `first` digits,
/// then groups of `rest` digits.
fn join_groups(digits: &str, first: usize, rest: usize, separator: char) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(rest);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.join(&separator.to_string())
}
