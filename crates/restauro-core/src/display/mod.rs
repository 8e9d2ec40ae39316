//! Markdown formatting for terminal output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! The wrappers here add context a bare model does not carry: the whole
//! checklist, the dashboard header, or the outcome of a command.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │  (Step, Task)   │───▶│ (Dashboard ...) │───▶│   (termimad)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use restauro_core::{display::Dashboard, template::initial_workflow};
//!
//! let steps = initial_workflow();
//! let output = Dashboard::new(&steps).to_string();
//! assert!(output.contains("0%"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Checklist, Dashboard};
pub use datetime::LocalDateTime;
pub use results::{ArtifactWritten, TaskUpdate};
pub use status::OperationStatus;
