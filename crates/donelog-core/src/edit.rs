use crate::buffer::{Edit, EditError, Position, TextBuffer};

/// Accumulates line-level edits and commits them as one atomic transaction.
///
/// Deletions are queued separately and appended last: every other edit is
/// computed against line numbers that removing the source line would shift.
#[derive(Debug, Default)]
pub struct EditBatch {
    edits: Vec<Edit>,
    deletes: Vec<Edit>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty() && self.deletes.is_empty()
    }

    /// Insert `text` on new lines directly after `line` (clamped to the
    /// last line, so appending past the end appends to the document).
    pub fn append_after_line<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        line: usize,
        text: &str,
    ) {
        let anchor = line.min(buffer.last_line());
        let ch = buffer.line(anchor).map(str::len).unwrap_or(0);
        self.edits.push(Edit::insert(
            Position::new(anchor, ch),
            format!("\n{}", text),
        ));
    }

    /// Replace the full text of `line`.
    pub fn replace_line<B: TextBuffer + ?Sized>(&mut self, buffer: &B, line: usize, text: &str) {
        let len = buffer.line(line).map(str::len).unwrap_or(0);
        self.edits.push(Edit::replace(
            Position::new(line, 0),
            Position::new(line, len),
            text.to_string(),
        ));
    }

    /// Queue `line` for removal. Deletions always apply last.
    pub fn delete_line<B: TextBuffer + ?Sized>(&mut self, buffer: &B, line: usize) {
        self.delete_lines(buffer, line, line);
    }

    /// Queue the inclusive line range `first..=last` for removal.
    /// Deletions always apply last.
    pub fn delete_lines<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        first: usize,
        last: usize,
    ) {
        let edit = if last >= buffer.last_line() {
            let end = buffer.last_line();
            let len = buffer.line(end).map(str::len).unwrap_or(0);
            if first == 0 {
                // Whole document: clear the text, one empty line stays.
                Edit::replace(Position::new(0, 0), Position::new(end, len), String::new())
            } else {
                // Range runs to the end: take the preceding newline with it.
                let prev_len = buffer.line(first - 1).map(str::len).unwrap_or(0);
                Edit::replace(
                    Position::new(first - 1, prev_len),
                    Position::new(end, len),
                    String::new(),
                )
            }
        } else {
            Edit::replace(
                Position::new(first, 0),
                Position::new(last + 1, 0),
                String::new(),
            )
        };
        self.deletes.push(edit);
    }

    /// Commit everything as a single transaction. An empty batch leaves the
    /// buffer untouched and counts as no transaction at all.
    pub fn commit<B: TextBuffer + ?Sized>(mut self, buffer: &mut B) -> Result<(), EditError> {
        self.edits.append(&mut self.deletes);
        if self.edits.is_empty() {
            return Ok(());
        }
        buffer.apply_transaction(&self.edits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DocumentBuffer;

    #[test]
    fn append_after_line_inserts_new_lines() {
        let mut buffer = DocumentBuffer::from_text("a\nb");
        let mut batch = EditBatch::new();
        batch.append_after_line(&buffer, 0, "x\ny");
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a\nx\ny\nb");
    }

    #[test]
    fn append_past_the_end_appends_to_the_document() {
        let mut buffer = DocumentBuffer::from_text("a");
        let mut batch = EditBatch::new();
        batch.append_after_line(&buffer, 9, "x");
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a\nx");
    }

    #[test]
    fn replace_line_swaps_the_whole_line() {
        let mut buffer = DocumentBuffer::from_text("a\nb\nc");
        let mut batch = EditBatch::new();
        batch.replace_line(&buffer, 1, "B");
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a\nB\nc");
    }

    #[test]
    fn delete_line_removes_middle_last_and_sole_lines() {
        let mut buffer = DocumentBuffer::from_text("a\nb\nc");
        let mut batch = EditBatch::new();
        batch.delete_line(&buffer, 1);
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a\nc");

        let mut batch = EditBatch::new();
        batch.delete_line(&buffer, 1);
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a");

        let mut batch = EditBatch::new();
        batch.delete_line(&buffer, 0);
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "");
    }

    #[test]
    fn delete_lines_removes_an_inclusive_range() {
        let mut buffer = DocumentBuffer::from_text("a\nb\nc\nd");
        let mut batch = EditBatch::new();
        batch.delete_lines(&buffer, 1, 2);
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a\nd");

        let mut buffer = DocumentBuffer::from_text("a\nb\nc\nd");
        let mut batch = EditBatch::new();
        batch.delete_lines(&buffer, 2, 3);
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "a\nb");
    }

    #[test]
    fn deletes_apply_after_other_edits_in_the_same_batch() {
        // The append anchors at the end of the line being deleted; queueing
        // the delete last keeps the anchor valid.
        let mut buffer = DocumentBuffer::from_text("- [ ] a\n\t- [ ] b");
        let mut batch = EditBatch::new();
        batch.append_after_line(&buffer, 1, "# History");
        batch.delete_line(&buffer, 1);
        batch.commit(&mut buffer).expect("commit");
        assert_eq!(buffer.to_text(), "- [ ] a\n# History");
    }

    #[test]
    fn empty_batch_is_not_a_transaction() {
        let mut buffer = DocumentBuffer::from_text("a");
        EditBatch::new().commit(&mut buffer).expect("commit");
        assert_eq!(buffer.transactions(), 0);
        assert_eq!(buffer.to_text(), "a");
    }
}
