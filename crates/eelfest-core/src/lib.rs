#![forbid(unsafe_code)]

//! Core: page interaction state for the Elektrik Eel festival site.
//!
//! The host (the `eelfest-web` shell, or a test) pushes [`PageEvent`]s into a
//! [`PageController`] and applies the [`Command`]s it returns. Nothing in this
//! crate touches the DOM, a clock, or a thread, so every behavior is
//! deterministic and testable natively.

pub mod alert;
pub mod animation;
pub mod command;
pub mod config;
pub mod controller;
pub mod dropdown;
pub mod error;
pub mod event;
pub mod forms;
pub mod geometry;
pub mod logging;
pub mod nav;
pub mod reveal;
pub mod scroll_top;
pub mod search;
pub mod trace;

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory_page;

pub use animation::{Animator, Channel};
pub use command::{Class, Command, Reaction, Target, Transition};
pub use config::PageConfig;
pub use controller::{PageController, PageInventory};
pub use error::{ConfigError, TraceError};
pub use event::PageEvent;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
