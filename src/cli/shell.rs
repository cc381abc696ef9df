use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shell_words::split;
use uuid::Uuid;

use crate::application::Session;
use crate::config::ReportConfig;
use crate::domain::{EntryRequest, month_option_labels};
use crate::format::format_currency;
use crate::io::{Exporter, render_preview};

pub struct ShellOptions {
    /// Print a prompt before each line (interactive terminals only)
    pub prompt: bool,
    /// Reference date for the month list
    pub today: NaiveDate,
}

#[derive(Debug, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Add an expense entry
    Add {
        /// Item description
        description: String,

        /// Amount (e.g. "1500" or "1500.75")
        amount: String,

        /// Billing month (e.g. "Jul-25")
        #[arg(short, long)]
        month: Option<String>,

        /// Payment deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,

        /// Pending, Paid or Overdue
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Remove an entry by row number or id
    Remove { target: String },

    /// Show the report title, or replace it
    Title { text: Vec<String> },

    /// Show the report
    List,

    /// Show the grand total
    Total,

    /// List the selectable billing months
    Months,

    /// Save the report as a spreadsheet
    Export { path: Option<PathBuf> },

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Read commands line by line until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    config: &ReportConfig,
    reader: R,
    mut out: W,
    options: &ShellOptions,
) -> Result<()> {
    let mut lines = reader.lines();
    loop {
        if options.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if handle_line(session, config, &line, &mut out, options)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

fn handle_line<W: Write>(
    session: &mut Session,
    config: &ReportConfig,
    line: &str,
    out: &mut W,
    options: &ShellOptions,
) -> Result<LoopControl> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            writeln!(out, "warning: {}", err)?;
            return Ok(LoopControl::Continue);
        }
    };
    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let command = match ShellLine::try_parse_from(&tokens) {
        Ok(parsed) => parsed.command,
        Err(err) => {
            write!(out, "{}", err.render())?;
            return Ok(LoopControl::Continue);
        }
    };

    match command {
        ShellCommand::Add {
            description,
            amount,
            month,
            deadline,
            status,
        } => {
            let request = EntryRequest::from_fields(
                &description,
                month.as_deref().unwrap_or(""),
                &amount,
                deadline.as_deref().unwrap_or(""),
                status.as_deref().unwrap_or(""),
            );
            match request.map_err(anyhow::Error::from).and_then(|request| {
                session.add_entry(request).map_err(anyhow::Error::from)
            }) {
                Ok(entry) => writeln!(
                    out,
                    "Added #{}: {} ({})",
                    session.ledger().len(),
                    entry.description,
                    format_currency(entry.amount_cents, &config.format)
                )?,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }

        ShellCommand::Remove { target } => {
            let removed = if let Ok(row) = target.parse::<usize>() {
                session.remove_row(row)
            } else if let Ok(id) = Uuid::parse_str(&target) {
                session.remove_entry(id)
            } else {
                writeln!(out, "error: '{}' is not a row number or entry id", target)?;
                return Ok(LoopControl::Continue);
            };
            match removed {
                Some(entry) => writeln!(out, "Removed: {}", entry.description)?,
                None => writeln!(out, "No entry {}; nothing removed", target)?,
            }
        }

        ShellCommand::Title { text } => {
            if !text.is_empty() {
                session.set_title(text.join(" "));
            }
            writeln!(out, "Title: {}", session.title())?;
        }

        ShellCommand::List => {
            write!(out, "{}", render_preview(session, &config.format))?;
        }

        ShellCommand::Total => {
            writeln!(out, "Total: {}", format_currency(session.total(), &config.format))?;
        }

        ShellCommand::Months => {
            writeln!(out, "{}", month_option_labels(options.today).join("  "))?;
        }

        ShellCommand::Export { path } => {
            let export_options = config.export_options();
            let report = session.export_report(&Exporter::new(&config.format, &export_options));
            let path = path.unwrap_or_else(|| PathBuf::from(&config.file_name));
            match report.save(&path) {
                Ok(()) => writeln!(
                    out,
                    "Exported {} entries to {}",
                    report.rows,
                    path.display()
                )?,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }

        ShellCommand::Quit => return Ok(LoopControl::Exit),
    }

    Ok(LoopControl::Continue)
}
