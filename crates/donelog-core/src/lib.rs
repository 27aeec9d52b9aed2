//! Checklist archiving for plain-text outlines: locate the task under the
//! cursor, mark it completed or in-progress, and merge it into a dated
//! `# History` section with the ancestor context needed to find it again.

pub mod ancestors;
pub mod archive;
pub mod buffer;
pub mod config;
pub mod edit;
pub mod line;
pub mod task;
pub mod task_ops;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
