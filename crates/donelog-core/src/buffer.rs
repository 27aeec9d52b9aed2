use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Edit position out of bounds at line {0}")]
    OutOfBounds(usize),
}

/// A point in the document: zero-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// One range replacement. `to` omitted means insertion at `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub from: Position,
    pub to: Option<Position>,
    pub text: String,
}

impl Edit {
    pub fn insert(at: Position, text: String) -> Self {
        Self {
            from: at,
            to: None,
            text,
        }
    }

    pub fn replace(from: Position, to: Position, text: String) -> Self {
        Self {
            from,
            to: Some(to),
            text,
        }
    }
}

/// The host editing surface: a line-addressable text buffer with a cursor
/// and a batched multi-edit transaction primitive.
///
/// All edit ranges in one `apply_transaction` call refer to pre-transaction
/// coordinates, and the whole batch applies as a single mutation (one undo
/// step in a real host).
pub trait TextBuffer {
    /// Text of the line at `index`, or `None` beyond the last line.
    fn line(&self, index: usize) -> Option<&str>;

    fn line_count(&self) -> usize;

    fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, position: Position);

    fn apply_transaction(&mut self, edits: &[Edit]) -> Result<(), EditError>;
}

/// In-memory buffer backing the CLI and tests.
///
/// An empty document is one empty line; a trailing newline in the source
/// text shows up as a final empty line, so `to_text` round-trips exactly.
#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    lines: Vec<String>,
    cursor: Position,
    transactions: usize,
}

impl DocumentBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|line| line.to_string()).collect(),
            cursor: Position::new(0, 0),
            transactions: 0,
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of transactions applied so far.
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    fn offset_of(&self, position: Position) -> Result<usize, EditError> {
        if position.line >= self.lines.len() {
            return Err(EditError::OutOfBounds(position.line));
        }
        if position.ch > self.lines[position.line].len() {
            return Err(EditError::OutOfBounds(position.line));
        }
        let preceding: usize = self.lines[..position.line]
            .iter()
            .map(|line| line.len() + 1)
            .sum();
        Ok(preceding + position.ch)
    }
}

impl TextBuffer for DocumentBuffer {
    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = position;
    }

    fn apply_transaction(&mut self, edits: &[Edit]) -> Result<(), EditError> {
        let mut spans = Vec::with_capacity(edits.len());
        for (queued, edit) in edits.iter().enumerate() {
            let start = self.offset_of(edit.from)?;
            let end = match edit.to {
                Some(to) => self.offset_of(to)?,
                None => start,
            };
            spans.push((start, end, queued));
        }
        // Later spans first so earlier spans keep their pre-transaction
        // offsets; equal starts apply in reverse queue order, leaving the
        // earlier-queued text in front.
        spans.sort_by(|a, b| (b.0, b.2).cmp(&(a.0, a.2)));

        let mut text = self.to_text();
        for (start, end, queued) in spans {
            text.replace_range(start..end, &edits[queued].text);
        }
        self.lines = text.split('\n').map(|line| line.to_string()).collect();
        self.transactions += 1;
        Ok(())
    }
}
