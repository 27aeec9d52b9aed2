use crate::buffer::TextBuffer;
use crate::line;

/// Reconstruct the ancestor chain above a task from indentation alone.
///
/// One ancestor is expected per depth `d-1 .. 0`, scanning upward from the
/// task line. Lines indented at or below the current level are siblings or
/// their descendants and are skipped. Resolution stops early when the scan
/// exhausts the document, the candidate is not a task, or its indentation
/// does not exactly equal the target depth; the truncated chain is still
/// usable for archive matching.
pub fn resolve_ancestors<B: TextBuffer + ?Sized>(
    buffer: &B,
    task_line: usize,
    depth: usize,
    indent: &str,
) -> Vec<String> {
    let mut parents: Vec<String> = Vec::new();
    let mut current_level = depth;
    let mut scan = task_line;

    for target in (0..depth).rev() {
        let found = loop {
            if scan == 0 {
                break None;
            }
            scan -= 1;
            let Some(text) = buffer.line(scan) else {
                break None;
            };
            if line::indent_depth(text, indent) < current_level {
                break Some(text.to_string());
            }
        };
        let Some(text) = found else {
            return parents;
        };
        if !line::is_task(&text) || line::indent_depth(&text, indent) != target {
            return parents;
        }
        current_level = target;
        parents.insert(0, text);
    }
    parents
}
