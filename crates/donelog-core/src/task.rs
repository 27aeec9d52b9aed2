use crate::line::{self, BULLET_MARKER, CHECKED_MARKER, IN_PROGRESS_MARKER, UNCHECKED_MARKER};

/// A task captured together with the ancestor context needed to place it in
/// the archive. Constructed transiently for one archive operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Ancestor line texts, outermost first. Checklist markers are demoted
    /// to plain bullets at construction: archived ancestors are structural
    /// context, not tasks to check off.
    pub parents: Vec<String>,
    /// Raw text of the task line, checklist marker included.
    pub line: String,
    /// Nested subtasks directly under this task. Not populated by current
    /// behavior; reserved for forward compatibility.
    pub children: Vec<String>,
}

impl Task {
    pub fn new(parents: Vec<String>, line: String, children: Vec<String>) -> Self {
        Self {
            parents: parents.into_iter().map(demote_to_bullet).collect(),
            line,
            children,
        }
    }

    /// Rewrite the unchecked marker to a checked one. Leaves the line
    /// unchanged when the marker is not the expected unchecked form.
    pub fn mark_completed(&mut self) {
        if let Some(updated) = line::swap_marker(&self.line, UNCHECKED_MARKER, CHECKED_MARKER) {
            self.line = updated;
        }
    }

    /// Rewrite the unchecked marker to the in-progress one, same rule.
    pub fn mark_in_progress(&mut self) {
        if let Some(updated) = line::swap_marker(&self.line, UNCHECKED_MARKER, IN_PROGRESS_MARKER) {
            self.line = updated;
        }
    }

    /// Render the ancestor chain starting at `from` (0 = all ancestors),
    /// one line each, followed by the task line.
    pub fn render(&self, from: usize) -> String {
        let mut lines: Vec<&str> = self
            .parents
            .iter()
            .skip(from)
            .map(String::as_str)
            .collect();
        lines.push(&self.line);
        lines.join("\n")
    }
}

fn demote_to_bullet(text: String) -> String {
    for marker in [UNCHECKED_MARKER, CHECKED_MARKER, IN_PROGRESS_MARKER] {
        if let Some(updated) = line::swap_marker(&text, marker, BULLET_MARKER) {
            return updated;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_demotes_task_ancestors_to_plain_bullets() {
        let task = Task::new(
            vec![
                "- [ ] outer".to_string(),
                "\t- [x] middle".to_string(),
                "\t\t- already a bullet".to_string(),
            ],
            "\t\t\t- [ ] leaf".to_string(),
            Vec::new(),
        );
        assert_eq!(
            task.parents,
            vec!["- outer", "\t- middle", "\t\t- already a bullet"]
        );
        assert_eq!(task.line, "\t\t\t- [ ] leaf");
        assert!(task.children.is_empty());
    }

    #[test]
    fn mark_completed_checks_the_box_and_keeps_indentation() {
        let mut task = Task::new(Vec::new(), "\t- [ ] write report".to_string(), Vec::new());
        task.mark_completed();
        assert_eq!(task.line, "\t- [x] write report");
    }

    #[test]
    fn mark_completed_leaves_unexpected_markers_alone() {
        let mut task = Task::new(Vec::new(), "- [x] already done".to_string(), Vec::new());
        task.mark_completed();
        assert_eq!(task.line, "- [x] already done");
    }

    #[test]
    fn mark_in_progress_uses_the_slash_marker() {
        let mut task = Task::new(Vec::new(), "- [ ] long haul".to_string(), Vec::new());
        task.mark_in_progress();
        assert_eq!(task.line, "- [/] long haul");
    }

    #[test]
    fn render_emits_ancestors_from_the_given_index() {
        let task = Task::new(
            vec!["- [ ] a".to_string(), "\t- [ ] b".to_string()],
            "\t\t- [ ] c".to_string(),
            Vec::new(),
        );
        assert_eq!(task.render(0), "- a\n\t- b\n\t\t- [ ] c");
        assert_eq!(task.render(1), "\t- b\n\t\t- [ ] c");
        assert_eq!(task.render(2), "\t\t- [ ] c");
    }
}
