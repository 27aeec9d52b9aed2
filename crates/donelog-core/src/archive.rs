use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::buffer::TextBuffer;
use crate::line;
use crate::task::Task;

/// Heading line that opens the archive section.
pub const DEFAULT_HEADING: &str = "# History";

/// Dated subsection heading for `date`, zero-padded.
pub fn date_heading(date: NaiveDate) -> String {
    format!("## {}", date.format("%Y-%m-%d"))
}

pub fn is_date_heading(text: &str) -> bool {
    let re = Regex::new(r"^## \d{4}-\d{2}-\d{2}$").expect("regex");
    re.is_match(text.trim())
}

fn is_top_level_heading(text: &str) -> bool {
    text.trim().starts_with("# ")
}

/// Line index of the archive heading, by trimmed exact match.
pub fn find_heading<B: TextBuffer + ?Sized>(buffer: &B, heading: &str) -> Option<usize> {
    (0..buffer.line_count()).find(|&index| {
        buffer
            .line(index)
            .map(|text| text.trim() == heading)
            .unwrap_or(false)
    })
}

/// Line index of `date_line` within the section opened at `section_start`.
/// The section ends at the next top-level heading or the end of the
/// document.
pub fn find_date_heading<B: TextBuffer + ?Sized>(
    buffer: &B,
    section_start: usize,
    date_line: &str,
) -> Option<usize> {
    let mut index = section_start + 1;
    while let Some(text) = buffer.line(index) {
        if is_top_level_heading(text) {
            return None;
        }
        if text.trim() == date_line {
            return Some(index);
        }
        index += 1;
    }
    None
}

/// First line index past the section opened at `section_start`: the next
/// top-level heading, or the line count when the section runs to the end.
/// New dated subsections are appended here, after all existing ones.
pub fn section_end<B: TextBuffer + ?Sized>(buffer: &B, section_start: usize) -> usize {
    let mut index = section_start + 1;
    while let Some(text) = buffer.line(index) {
        if is_top_level_heading(text) {
            return index;
        }
        index += 1;
    }
    index
}

/// Where the merge walk landed: overwrite an existing occurrence of the
/// task, or insert rendered lines before a sibling boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Replace { line: usize, text: String },
    InsertBefore { line: usize, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeState {
    MatchingAncestor(usize),
    ScanningToInsertionPoint,
    Done,
}

/// Walk the nested list under a dated subsection and decide where the task
/// lands.
///
/// Ancestors are matched depth by depth against normalized text; entries
/// indented deeper than the current depth belong to non-matching siblings
/// and are skipped. Once the chain is matched (fully or partially), the
/// walk continues to the end of the sibling run at the reached depth,
/// stopping early only on an existing occurrence of the task itself, which
/// is overwritten in place. Insertion therefore always appends after
/// existing siblings and their descendants, never sorts.
pub fn plan_merge<B: TextBuffer + ?Sized>(
    buffer: &B,
    first_content_line: usize,
    task: &Task,
    indent: &str,
) -> MergeOutcome {
    let mut cursor = first_content_line;
    let mut current_depth = 0usize;
    let mut state = if task.parents.is_empty() {
        MergeState::ScanningToInsertionPoint
    } else {
        MergeState::MatchingAncestor(0)
    };

    loop {
        match state {
            MergeState::MatchingAncestor(depth) => {
                let expected = line::normalized(&task.parents[depth]);
                while let Some(text) = buffer.line(cursor) {
                    if !line::is_archivable(text) {
                        break;
                    }
                    let level = line::indent_depth(text, indent);
                    if level > current_depth
                        || (level == current_depth && line::normalized(text) != expected)
                    {
                        cursor += 1;
                        continue;
                    }
                    break;
                }
                let matched = buffer
                    .line(cursor)
                    .map(|text| {
                        line::is_archivable(text)
                            && line::indent_depth(text, indent) == current_depth
                            && line::normalized(text) == expected
                    })
                    .unwrap_or(false);
                if matched {
                    cursor += 1;
                    current_depth = depth + 1;
                    state = if depth + 1 < task.parents.len() {
                        MergeState::MatchingAncestor(depth + 1)
                    } else {
                        MergeState::ScanningToInsertionPoint
                    };
                } else {
                    // The ancestor does not exist in the archive; insertion
                    // will create the rest of the chain.
                    state = MergeState::ScanningToInsertionPoint;
                }
            }
            MergeState::ScanningToInsertionPoint => {
                let wanted = line::normalized(&task.line);
                while let Some(text) = buffer.line(cursor) {
                    if !line::is_archivable(text) {
                        break;
                    }
                    let level = line::indent_depth(text, indent);
                    if level < current_depth {
                        break;
                    }
                    if level == current_depth && line::normalized(text) == wanted {
                        break;
                    }
                    cursor += 1;
                }
                state = MergeState::Done;
            }
            MergeState::Done => break,
        }
    }

    let existing = buffer.line(cursor).map(|text| {
        line::is_archivable(text)
            && line::indent_depth(text, indent) == current_depth
            && line::normalized(text) == line::normalized(&task.line)
    });
    if existing.unwrap_or(false) {
        MergeOutcome::Replace {
            line: cursor,
            text: task.line.clone(),
        }
    } else {
        MergeOutcome::InsertBefore {
            line: cursor,
            text: task.render(current_depth),
        }
    }
}

/// A dated subsection of the archive, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSection {
    pub date: String,
    pub line: usize,
    pub entries: usize,
}

/// Enumerate dated subsections under `heading` in document order, counting
/// the archivable lines recorded under each.
pub fn history_dates<B: TextBuffer + ?Sized>(buffer: &B, heading: &str) -> Vec<DateSection> {
    let Some(section_start) = find_heading(buffer, heading) else {
        return Vec::new();
    };
    let end = section_end(buffer, section_start);
    let mut sections: Vec<DateSection> = Vec::new();
    for index in section_start + 1..end {
        let Some(text) = buffer.line(index) else {
            break;
        };
        if is_date_heading(text) {
            let date = text.trim().trim_start_matches("## ").to_string();
            sections.push(DateSection {
                date,
                line: index,
                entries: 0,
            });
        } else if line::is_archivable(text) {
            if let Some(current) = sections.last_mut() {
                current.entries += 1;
            }
        }
    }
    sections
}
