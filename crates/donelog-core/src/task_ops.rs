use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::ancestors::resolve_ancestors;
use crate::archive::{self, MergeOutcome};
use crate::buffer::{EditError, TextBuffer};
use crate::config::DonelogConfig;
use crate::edit::EditBatch;
use crate::line;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMode {
    /// Mark checked, archive, remove the source line.
    Complete,
    /// Mark in-progress on the archived copy, leave the source in place.
    Progress,
}

#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    pub date: NaiveDate,
    pub heading: String,
    pub indent: String,
}

impl ArchiveOptions {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            heading: archive::DEFAULT_HEADING.to_string(),
            indent: line::DEFAULT_INDENT.to_string(),
        }
    }

    /// Options for the local calendar date at the moment of archiving.
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_config(mut self, config: &DonelogConfig) -> Self {
        if let Some(heading) = config.history_heading.as_deref() {
            self.heading = heading.trim().to_string();
        }
        if let Some(indent) = config.indent.as_deref() {
            self.indent = indent.to_string();
        }
        self
    }
}

/// What one archive invocation did, for reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveOutcome {
    /// False when the cursor was not on a task line (the operation was a
    /// silent no-op).
    pub archived: bool,
    /// An existing archive entry was overwritten in place.
    pub replaced: bool,
    pub created_heading: bool,
    pub created_date: bool,
    /// The archived task line text.
    pub task: Option<String>,
}

pub fn complete_task<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    options: &ArchiveOptions,
) -> Result<ArchiveOutcome, EditError> {
    archive_task(buffer, ArchiveMode::Complete, options)
}

pub fn progress_task<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    options: &ArchiveOptions,
) -> Result<ArchiveOutcome, EditError> {
    archive_task(buffer, ArchiveMode::Progress, options)
}

/// Archive the task under the cursor into the dated history subsection.
///
/// All derived edits commit as one transaction; the cursor is restored
/// afterwards. Not a task under the cursor means no transaction at all.
pub fn archive_task<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    mode: ArchiveMode,
    options: &ArchiveOptions,
) -> Result<ArchiveOutcome, EditError> {
    let origin = buffer.cursor();
    if !line::is_task_at(buffer, origin.line) {
        return Ok(ArchiveOutcome::default());
    }
    let text = buffer.line(origin.line).unwrap_or_default().to_string();

    let depth = line::indent_depth(&text, &options.indent);
    let parents = resolve_ancestors(buffer, origin.line, depth, &options.indent);
    let mut task = Task::new(parents, text, Vec::new());
    match mode {
        ArchiveMode::Complete => task.mark_completed(),
        ArchiveMode::Progress => task.mark_in_progress(),
    }

    let mut outcome = ArchiveOutcome {
        archived: true,
        task: Some(task.line.clone()),
        ..Default::default()
    };
    let mut batch = EditBatch::new();
    let date_line = archive::date_heading(options.date);

    match archive::find_heading(buffer, &options.heading) {
        None => {
            // No history yet: heading, date and the fully rendered task
            // land in one appended block.
            let block = format!("{}\n{}\n{}", options.heading, date_line, task.render(0));
            batch.append_after_line(buffer, buffer.last_line(), &block);
            outcome.created_heading = true;
            outcome.created_date = true;
        }
        Some(section_start) => {
            match archive::find_date_heading(buffer, section_start, &date_line) {
                None => {
                    let end = archive::section_end(buffer, section_start);
                    let block = format!("{}\n{}", date_line, task.render(0));
                    batch.append_after_line(buffer, end.saturating_sub(1), &block);
                    outcome.created_date = true;
                }
                Some(date_index) => {
                    match archive::plan_merge(buffer, date_index + 1, &task, &options.indent) {
                        MergeOutcome::Replace { line, text } => {
                            batch.replace_line(buffer, line, &text);
                            outcome.replaced = true;
                        }
                        MergeOutcome::InsertBefore { line, text } => {
                            batch.append_after_line(buffer, line.saturating_sub(1), &text);
                        }
                    }
                }
            }
        }
    }

    if mode == ArchiveMode::Complete {
        batch.delete_line(buffer, origin.line);
    }
    batch.commit(buffer)?;
    buffer.set_cursor(origin);
    Ok(outcome)
}
