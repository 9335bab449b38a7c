//! coursesync library
//!
//! Headless frontend for the lesson view engine in `coursesync-app`.

pub mod headless;

// Re-export main entry point
pub use headless::runner::run_headless;
pub use headless::{HeadlessEvent, HeadlessNotifier};
