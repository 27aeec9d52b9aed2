use crate::buffer::TextBuffer;

pub const BULLET_MARKER: &str = "- ";
pub const UNCHECKED_MARKER: &str = "- [ ] ";
pub const CHECKED_MARKER: &str = "- [x] ";
pub const IN_PROGRESS_MARKER: &str = "- [/] ";

/// One outline level of leading whitespace.
pub const DEFAULT_INDENT: &str = "\t";

pub fn is_bullet(text: &str) -> bool {
    text.contains(BULLET_MARKER)
}

pub fn is_task(text: &str) -> bool {
    text.contains(UNCHECKED_MARKER) || text.contains(CHECKED_MARKER)
}

/// Plain bullets and tasks are structural siblings while walking the
/// archive's nested list.
pub fn is_archivable(text: &str) -> bool {
    is_bullet(text) || is_task(text)
}

/// `is_task` for a buffer line; an index beyond the last line is not a
/// task.
pub fn is_task_at<B: TextBuffer + ?Sized>(buffer: &B, index: usize) -> bool {
    buffer.line(index).map(is_task).unwrap_or(false)
}

/// Count of leading indentation units at the start of the line.
pub fn indent_depth(text: &str, unit: &str) -> usize {
    if unit.is_empty() {
        return 0;
    }
    let mut depth = 0;
    let mut rest = text;
    while let Some(next) = rest.strip_prefix(unit) {
        depth += 1;
        rest = next;
    }
    depth
}

/// Strip surrounding whitespace and one leading bullet/checkbox marker, so
/// an archived (possibly checked or in-progress) line still compares equal
/// to its live form.
pub fn normalized(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(BULLET_MARKER) else {
        return trimmed;
    };
    let rest = rest.trim_start();
    for checkbox in ["[ ] ", "[x] ", "[/] "] {
        if let Some(after) = rest.strip_prefix(checkbox) {
            return after.trim();
        }
    }
    rest.trim()
}

/// Rewrite a leading marker while preserving the indentation run before it.
/// Returns `None` when the line does not start with `from` after its
/// indentation.
pub fn swap_marker(text: &str, from: &str, to: &str) -> Option<String> {
    let indent_len = text.len() - text.trim_start().len();
    let (indent, rest) = text.split_at(indent_len);
    let remainder = rest.strip_prefix(from)?;
    Some(format!("{}{}{}", indent, to, remainder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DocumentBuffer;

    #[test]
    fn classifies_bullets_and_tasks() {
        assert!(is_bullet("- plain bullet"));
        assert!(is_bullet("\t- [ ] nested task"));
        assert!(!is_bullet("no marker here"));
        assert!(!is_bullet("-dash without space"));

        assert!(is_task("- [ ] open"));
        assert!(is_task("\t\t- [x] closed"));
        assert!(!is_task("- bullet only"));
        assert!(!is_task("## 2026-08-06"));

        assert!(is_archivable("- bullet"));
        assert!(is_archivable("- [x] task"));
        assert!(!is_archivable(""));
    }

    #[test]
    fn is_task_at_treats_out_of_bounds_as_not_a_task() {
        let buffer = DocumentBuffer::from_text("- [ ] task");
        assert!(is_task_at(&buffer, 0));
        assert!(!is_task_at(&buffer, 5));
    }

    #[test]
    fn indent_depth_counts_leading_units() {
        assert_eq!(indent_depth("- top", "\t"), 0);
        assert_eq!(indent_depth("\t- one", "\t"), 1);
        assert_eq!(indent_depth("\t\t\t- three", "\t"), 3);
        assert_eq!(indent_depth("    - two", "  "), 2);
        // Unit only counts at the start of the line.
        assert_eq!(indent_depth("- a\tb", "\t"), 0);
    }

    #[test]
    fn normalized_strips_whitespace_and_one_marker() {
        assert_eq!(normalized("- [ ] Buy milk"), "Buy milk");
        assert_eq!(normalized("  - [x] Buy milk"), "Buy milk");
        assert_eq!(normalized("\t- [/] Buy milk"), "Buy milk");
        assert_eq!(normalized("\t- Buy milk"), "Buy milk");
        assert_eq!(normalized("Buy milk"), "Buy milk");
        assert_ne!(normalized("- [ ] Buy milk"), normalized("- [ ] Buy bread"));
    }

    #[test]
    fn swap_marker_preserves_indentation() {
        assert_eq!(
            swap_marker("\t- [ ] task", UNCHECKED_MARKER, CHECKED_MARKER),
            Some("\t- [x] task".to_string())
        );
        assert_eq!(
            swap_marker("- [ ] task", UNCHECKED_MARKER, IN_PROGRESS_MARKER),
            Some("- [/] task".to_string())
        );
        assert_eq!(swap_marker("- [x] task", UNCHECKED_MARKER, CHECKED_MARKER), None);
        assert_eq!(swap_marker("plain text", UNCHECKED_MARKER, CHECKED_MARKER), None);
    }
}
