mod shell;

use std::fs::File;
use std::io::{IsTerminal, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::application::Session;
use crate::config::ReportConfig;
use crate::domain::month_option_labels;
use crate::format::format_currency;
use crate::io::{Exporter, Importer, parse_item_spec, render_preview};

pub use shell::{ShellOptions, run_session};

/// Maintenance Maker - monthly maintenance expense reports
#[derive(Parser)]
#[command(name = "maintenance-maker")]
#[command(about = "Compose monthly maintenance expense reports and export them as spreadsheets")]
#[command(version)]
pub struct Cli {
    /// Report configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the selectable billing months
    Months {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Build a report and save it as a spreadsheet
    Export {
        #[command(flatten)]
        entries: EntryInput,

        /// Output file (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the report as a text table
    Preview {
        #[command(flatten)]
        entries: EntryInput,
    },

    /// Compose a report interactively
    Session,
}

#[derive(Args)]
pub struct EntryInput {
    /// Report title
    #[arg(short, long)]
    pub title: Option<String>,

    /// CSV file with item,month,amount,deadline,status columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Entry as "item|month|amount|deadline|status" (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,
}

impl Cli {
    fn load_config(&self) -> Result<ReportConfig> {
        match &self.config {
            Some(path) => ReportConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display())),
            None => Ok(ReportConfig::default()),
        }
    }

    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Commands::Months { today } => {
                let today = match today {
                    Some(date_str) => parse_date(&date_str).with_context(|| {
                        format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                    })?,
                    None => Local::now().date_naive(),
                };
                for label in month_option_labels(today) {
                    println!("{}", label);
                }
            }

            Commands::Export { entries, output } => {
                let session = build_session(&config, entries)?;
                let options = config.export_options();
                let report = session.export_report(&Exporter::new(&config.format, &options));

                let path = output.unwrap_or_else(|| PathBuf::from(&config.file_name));
                report
                    .save(&path)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;

                println!(
                    "Report written: {} ({} entries, total {})",
                    path.display(),
                    report.rows,
                    format_currency(session.total(), &config.format)
                );
            }

            Commands::Preview { entries } => {
                let session = build_session(&config, entries)?;
                print!("{}", render_preview(&session, &config.format));
            }

            Commands::Session => {
                let mut session = Session::from_config(&config);
                let options = ShellOptions {
                    prompt: stdin().is_terminal(),
                    today: Local::now().date_naive(),
                };
                run_session(&mut session, &config, stdin().lock(), stdout(), &options)?;
            }
        }

        Ok(())
    }
}

/// Build a session from the command-line inputs. Rejected rows are reported
/// on stderr and skipped.
fn build_session(config: &ReportConfig, input: EntryInput) -> Result<Session> {
    let mut session = Session::from_config(config);
    if let Some(title) = input.title {
        session.set_title(title);
    }

    if let Some(path) = &input.input {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        let result = Importer::new(&mut session)
            .import_csv(file)
            .with_context(|| format!("Failed to read CSV: {}", path.display()))?;

        for error in &result.errors {
            eprintln!(
                "Skipping line {}{}: {}",
                error.line,
                error
                    .field
                    .as_ref()
                    .map(|f| format!(" ({})", f))
                    .unwrap_or_default(),
                error.error
            );
        }
    }

    for item in &input.items {
        let added = parse_item_spec(item)
            .map_err(anyhow::Error::from)
            .and_then(|request| session.add_entry(request).map_err(anyhow::Error::from));
        if let Err(e) = added {
            eprintln!("Skipping item '{}': {}", item, e);
        }
    }

    Ok(session)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_arguments() {
        let cli = Cli::try_parse_from([
            "maintenance-maker",
            "export",
            "--title",
            "July upkeep",
            "--item",
            "Plumbing|Jul-25|100",
            "--item",
            "Painting|Jul-25|250",
            "-o",
            "out.xls",
        ])
        .unwrap();

        match cli.command {
            Commands::Export { entries, output } => {
                assert_eq!(entries.title.as_deref(), Some("July upkeep"));
                assert_eq!(entries.items.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out.xls")));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_build_session_skips_bad_items() {
        let input = EntryInput {
            title: Some("Tower B".into()),
            input: None,
            items: vec![
                "Plumbing|Jul-25|100".into(),
                "|Jul-25|50".into(),
                "Generator service||800".into(),
                "Painting|Jul-25|250|2025-07-20|Paid".into(),
            ],
        };

        let session = build_session(&ReportConfig::default(), input).unwrap();

        assert_eq!(session.title().as_str(), "Tower B");
        assert_eq!(session.ledger().len(), 2);
        assert_eq!(session.total(), 35000);
    }

    #[test]
    fn test_build_session_missing_csv() {
        let input = EntryInput {
            title: None,
            input: Some(PathBuf::from("/nonexistent/items.csv")),
            items: vec![],
        };
        assert!(build_session(&ReportConfig::default(), input).is_err());
    }
}
