//! Core library for the restauro video-restoration checklist.
//!
//! The crate owns the guided workflow (three steps of tasks), keeps the
//! user's completion flags in a small SQLite key/value store, and hosts a
//! help-desk chat that answers either from an offline keyword table or from a
//! hosted model.
//!
//! - [`template`]: the canonical workflow shipped with this version
//! - [`snapshot`]: validation of stored progress and reconciliation onto the
//!   template
//! - [`tracker`]: the live state with write-through persistence
//! - [`chat`]: the chat session state machine and its response sources
//! - [`artifacts`], [`tools`], [`guide`]: the downloadable files, calculators
//!   and reference text
//! - [`display`]: markdown rendering for the terminal
//!
//! # Quick Start
//!
//! ```rust
//! use restauro_core::TrackerBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tracker = TrackerBuilder::new()
//!     .with_database_path(Some("restauro.db"))
//!     .build()
//!     .await?;
//!
//! tracker.toggle_task("step1", "dl_script").await?;
//! println!("{}% complete", tracker.progress().percent);
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod chat;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod guide;
pub mod models;
pub mod snapshot;
pub mod template;
pub mod tools;
pub mod tracker;

// Re-export commonly used types
pub use artifacts::Artifact;
pub use chat::{ChatMessage, ChatRole, ChatSession, ChatState, ResponseSource};
pub use config::Config;
pub use db::Database;
pub use display::{Checklist, Dashboard, LocalDateTime, OperationStatus};
pub use error::{RestauroError, Result};
pub use models::{Progress, Step, Task};
pub use tracker::{ProgressStore, Tracker, TrackerBuilder, WorkflowState};
