use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use donelog_core::archive;
use donelog_core::buffer::{DocumentBuffer, Position, TextBuffer};
use donelog_core::config::{find_config_root, load_config, DonelogConfig};
use donelog_core::task_ops::{archive_task, ArchiveMode, ArchiveOptions};

#[derive(Parser)]
#[command(
    name = "donelog",
    version,
    about = "Archive checklist tasks into a dated History section"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mark the task at --line as done and move it into the day's history
    Complete(OpArgs),
    /// Mirror the task at --line into the day's history as in-progress
    Progress(OpArgs),
    /// List dated history subsections in a document
    Dates {
        /// Document to inspect
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print version information
    Version,
}

#[derive(Args)]
struct OpArgs {
    /// Document to edit
    file: PathBuf,
    /// 1-based line of the task
    #[arg(long)]
    line: usize,
    /// Column of the cursor within the line
    #[arg(long, default_value_t = 0)]
    ch: usize,
    /// Archive under this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Emit the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Complete(args) => run_archive(ArchiveMode::Complete, &args),
        Command::Progress(args) => run_archive(ArchiveMode::Progress, &args),
        Command::Dates { file, json } => run_dates(&file, json),
        Command::Version => {
            println!("donelog {}", donelog_core::version());
            Ok(())
        }
    }
}

fn run_archive(mode: ArchiveMode, args: &OpArgs) -> Result<()> {
    if args.line == 0 {
        bail!("--line is 1-based");
    }
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let mut buffer = DocumentBuffer::from_text(&text);
    buffer.set_cursor(Position::new(args.line - 1, args.ch));

    let options = options_for(&args.file, args.date);
    let outcome = archive_task(&mut buffer, mode, &options)?;

    let updated = buffer.to_text();
    if updated != text {
        fs::write(&args.file, updated)
            .with_context(|| format!("writing {}", args.file.display()))?;
    }

    if args.json {
        let payload = serde_json::json!({ "ok": true, "outcome": outcome });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if let Some(task) = outcome.task.as_deref() {
        let verb = if outcome.replaced {
            "updated"
        } else {
            "archived"
        };
        println!("{} {}", verb, task.trim());
    } else {
        println!("no task at line {}", args.line);
    }
    Ok(())
}

fn run_dates(file: &Path, json: bool) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let buffer = DocumentBuffer::from_text(&text);
    let options = options_for(file, None);
    let dates = archive::history_dates(&buffer, &options.heading);

    if json {
        let payload = serde_json::json!({ "ok": true, "dates": dates });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if dates.is_empty() {
        println!("no history section");
    } else {
        for section in dates {
            println!("{}  {} entries", section.date, section.entries);
        }
    }
    Ok(())
}

fn options_for(file: &Path, date: Option<NaiveDate>) -> ArchiveOptions {
    let dir = file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = find_config_root(&dir)
        .and_then(|root| load_config(&root))
        .unwrap_or_else(DonelogConfig::default);
    let options = match date {
        Some(date) => ArchiveOptions::new(date),
        None => ArchiveOptions::for_today(),
    };
    options.with_config(&config)
}
