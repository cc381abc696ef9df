use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::application::AppError;
use crate::domain::{Cents, Entry};
use crate::format::{FormatConfig, format_currency, format_date};

pub const DEFAULT_WORKSHEET_NAME: &str = "Maintenance Report";
pub const DEFAULT_FILE_NAME: &str = "Maintenance_Report.xls";
pub const REPORT_CONTENT_TYPE: &str = "application/vnd.ms-excel";

/// Column labels, in order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Sr.No",
    "Item",
    "Month",
    "Amount",
    "Payment deadline",
    "Status",
];

const COLUMN_WIDTHS: [u32; 6] = [60, 300, 100, 120, 150, 100];

/// UTF-8 byte order mark; spreadsheet apps use it to pick the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const STYLESHEET: &str = "\
body { font-family: Arial, sans-serif; }
table { border-collapse: collapse; width: 100%; }
th { background-color: #E5E7EB; color: #000; border: 1px solid #000; padding: 10px; text-align: center; font-weight: bold; }
td { border: 1px solid #000; padding: 8px; text-align: center; vertical-align: middle; }
.text-left { text-align: left; }
.total-row { background-color: #E5E7EB; font-weight: bold; font-size: 1.1em; }
.title-row { font-size: 18px; font-weight: bold; text-align: center; border: none; padding: 20px; }
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Worksheet name embedded in the workbook hint
    pub worksheet_name: String,
    /// Suggested file name for the download
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            worksheet_name: DEFAULT_WORKSHEET_NAME.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// A rendered report, ready to hand to whatever delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub rows: usize,
    markup: String,
}

impl Report {
    pub fn content_type(&self) -> &'static str {
        REPORT_CONTENT_TYPE
    }

    /// The HTML table document, without the byte order mark.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The complete file contents: byte order mark followed by the markup.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + self.markup.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(self.markup.as_bytes());
        bytes
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), AppError> {
        writer.write_all(UTF8_BOM)?;
        writer.write_all(self.markup.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write the report into `dir` under its file name.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, AppError> {
        let path = dir.as_ref().join(&self.file_name);
        self.save(&path)?;
        Ok(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)?;
        info!(path = %path.as_ref().display(), rows = self.rows, "report saved");
        Ok(())
    }
}

/// Renders ledger entries as an HTML table that spreadsheet applications
/// open as a worksheet.
pub struct Exporter<'a> {
    format: &'a FormatConfig,
    options: &'a ExportOptions,
}

impl<'a> Exporter<'a> {
    pub fn new(format: &'a FormatConfig, options: &'a ExportOptions) -> Self {
        Self { format, options }
    }

    pub fn render(&self, title: &str, entries: &[Entry], total: Cents) -> Report {
        let mut out = String::new();

        out.push_str(concat!(
            r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" "#,
            r#"xmlns:x="urn:schemas-microsoft-com:office:excel" "#,
            r#"xmlns="http://www.w3.org/TR/REC-html40">"#,
            "\n<head>\n",
            "<meta charset=\"UTF-8\">\n",
        ));
        out.push_str(&format!(
            "<!--[if gte mso 9]><xml><x:ExcelWorkbook><x:ExcelWorksheets><x:ExcelWorksheet>\
             <x:Name>{}</x:Name><x:WorksheetOptions><x:DisplayGridlines/></x:WorksheetOptions>\
             </x:ExcelWorksheet></x:ExcelWorksheets></x:ExcelWorkbook></xml><![endif]-->\n",
            escape_html(&self.options.worksheet_name)
        ));
        out.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n<table>\n", STYLESHEET));

        // Title
        out.push_str(&format!(
            "<tr>\n<td colspan=\"{}\" class=\"title-row\" style=\"border: none;\">{}</td>\n</tr>\n",
            REPORT_COLUMNS.len(),
            escape_html(&title.to_uppercase())
        ));

        // Header
        out.push_str("<tr>\n");
        for (label, width) in REPORT_COLUMNS.iter().zip(COLUMN_WIDTHS) {
            out.push_str(&format!("<th style=\"width: {}px;\">{}</th>\n", width, label));
        }
        out.push_str("</tr>\n");

        for (index, entry) in entries.iter().enumerate() {
            self.push_entry_row(&mut out, index + 1, entry);
        }

        // Totals
        out.push_str(&format!(
            "<tr class=\"total-row\">\n\
             <td colspan=\"3\" style=\"text-align: center;\">TOTAL</td>\n\
             <td>{}</td>\n\
             <td colspan=\"2\"></td>\n\
             </tr>\n",
            escape_html(&format_currency(total, self.format))
        ));

        out.push_str("</table>\n</body>\n</html>\n");

        info!(rows = entries.len(), total_cents = total, "report rendered");

        Report {
            file_name: self.options.file_name.clone(),
            rows: entries.len(),
            markup: out,
        }
    }

    fn push_entry_row(&self, out: &mut String, serial: usize, entry: &Entry) {
        out.push_str(&format!(
            "<tr>\n\
             <td>{}</td>\n\
             <td class=\"text-left\">{}</td>\n\
             <td>{}</td>\n\
             <td>{}</td>\n\
             <td>{}</td>\n\
             <td>{}</td>\n\
             </tr>\n",
            serial,
            escape_html(&entry.description),
            escape_html(&entry.period.label()),
            escape_html(&format_currency(entry.amount_cents, self.format)),
            escape_html(&format_date(entry.deadline, self.format)),
            entry.status
        ));
    }
}

/// Escape text for use inside HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{EntryRequest, Ledger, PaymentStatus, Period};

    fn render(title: &str, ledger: &Ledger) -> Report {
        let format = FormatConfig::default();
        let options = ExportOptions::default();
        Exporter::new(&format, &options).render(title, ledger.entries(), ledger.total())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry's <b>"), "Tom &amp; Jerry&#39;s &lt;b&gt;");
        assert_eq!(escape_html("₹ plain"), "₹ plain");
    }

    #[test]
    fn test_bytes_start_with_bom() {
        let report = render("x", &Ledger::new());
        let bytes = report.to_bytes();
        assert_eq!(&bytes[..3], UTF8_BOM);
        assert_eq!(&bytes[3..], report.markup().as_bytes());
    }

    #[test]
    fn test_document_declares_encoding_and_worksheet() {
        let report = render("x", &Ledger::new());
        let markup = report.markup();

        assert!(markup.contains(r#"<meta charset="UTF-8">"#));
        assert!(markup.contains("urn:schemas-microsoft-com:office:excel"));
        assert!(markup.contains("<x:Name>Maintenance Report</x:Name>"));
        assert_eq!(report.file_name, DEFAULT_FILE_NAME);
        assert_eq!(report.content_type(), "application/vnd.ms-excel");
    }

    #[test]
    fn test_title_is_upper_cased_and_escaped() {
        let report = render("Spend <july> & more", &Ledger::new());
        assert!(report.markup().contains(">SPEND &lt;JULY&gt; &amp; MORE</td>"));
    }

    #[test]
    fn test_entry_row_cells() {
        let mut ledger = Ledger::new();
        ledger
            .add(
                EntryRequest::new("HVAC Filter Change", Period::new(2025, 7).unwrap(), 150075)
                    .with_deadline(NaiveDate::from_ymd_opt(2025, 7, 4).unwrap())
                    .with_status(PaymentStatus::Paid),
            )
            .unwrap();

        let report = render("July", &ledger);
        let markup = report.markup();

        assert_eq!(report.rows, 1);
        assert!(markup.contains("<td>1</td>"));
        assert!(markup.contains("<td class=\"text-left\">HVAC Filter Change</td>"));
        assert!(markup.contains("<td>Jul-25</td>"));
        assert!(markup.contains("<td>₹1,501</td>"));
        assert!(markup.contains("<td>04 July 2025</td>"));
        assert!(markup.contains("<td>Paid</td>"));
    }

    #[test]
    fn test_missing_optional_fields_render_empty() {
        let mut ledger = Ledger::new();
        let june = Period::new(2025, 6).unwrap();
        ledger.add(EntryRequest::new("Pest control", june, 90000)).unwrap();

        let markup = render("x", &ledger).markup().to_string();
        assert!(markup.contains("<td>Jun-25</td>"));
        assert!(markup.contains("<td>Pending</td>"));
        assert_eq!(markup.matches("<td></td>").count(), 1);
    }

    #[test]
    fn test_header_labels_in_order() {
        let markup = render("x", &Ledger::new()).markup().to_string();
        let mut last = 0;
        for label in REPORT_COLUMNS {
            let pos = markup.find(&format!(">{}</th>", label)).unwrap();
            assert!(pos > last);
            last = pos;
        }
    }
}
