//! # coursesync-core - Core Domain Types
//!
//! Foundation crate for coursesync. Provides the lesson tree domain types,
//! the typed payload boundary, the location-item projection, error handling
//! and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing, percent-encoding).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Lesson`] - A lesson with its files, deadlines and derived location items
//! - [`FileAttachment`], [`Deadline`] - Children of a lesson
//! - [`CourseId`], [`LessonId`], [`FileId`], [`DeadlineId`] - Typed identifiers
//!
//! ### Payloads (`payload`)
//! - [`RemotePayload`] - Validated response body ({lesson list, lesson, file, deadline, empty})
//! - [`PayloadKind`] - Shape a response is expected to have
//! - [`LessonForm`], [`DeadlineForm`], [`FileUpload`] - Request bodies
//!
//! ### Location Items (`location`)
//! - [`LocationItem`] - Display-ready projection of a file attachment
//! - [`project_locations()`] - Project a whole file list
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use coursesync_core::prelude::*;
//! ```

pub mod error;
pub mod location;
pub mod logging;
pub mod payload;
pub mod types;

/// Prelude for common imports used throughout all coursesync crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use location::{project_locations, LocationItem, LocationKind};
pub use payload::{
    DeadlineForm, FileUpload, LessonForm, LessonPayload, PayloadKind, RemotePayload,
};
pub use types::{CourseId, Deadline, DeadlineId, FileAttachment, FileId, Lesson, LessonId};
