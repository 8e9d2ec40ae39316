//! Data models for the restoration workflow.
//!
//! A workflow is an ordered list of [`Step`]s, each holding an ordered list of
//! [`Task`]s. The shape always comes from [`crate::template`]; the only field
//! that changes at runtime is [`Task::done`]. [`Progress`] is derived from a
//! list of steps and never stored.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] and render markdown.
//!
//! # Examples
//!
//! ```rust
//! use restauro_core::models::{Progress, Step, Task, Visualization};
//!
//! let step = Step {
//!     id: "capture".to_string(),
//!     title: "Capture".to_string(),
//!     description: "Get the footage onto disk".to_string(),
//!     icon: "cpu".to_string(),
//!     color: "bg-blue-600".to_string(),
//!     text_color: "text-blue-300".to_string(),
//!     badge: None,
//!     visual: Visualization::None,
//!     tasks: vec![Task::new("plug", "Plug the deck", "Desk", "Use the FireWire port")],
//! };
//!
//! let progress = Progress::compute(std::slice::from_ref(&step));
//! assert_eq!(progress.total, 1);
//! assert_eq!(progress.completed, 0);
//! ```

pub mod progress;
pub mod status;
pub mod step;
pub mod task;

#[cfg(test)]
mod tests;

pub use progress::Progress;
pub use status::{check_mark, ActionKind, Visualization};
pub use step::Step;
pub use task::{Task, TaskAction};
