//! # Recipebook Core
//!
//! The notebook state machine and everything that feeds it.
//!
//! ## Architecture Overview
//!
//! ```text
//!   key / pointer / blur            flip settled
//!          │                              │
//!          ▼                              │
//!   ┌─────────────┐   Intent   ┌──────────┴──────────┐  turn_to_page  ┌─────────────┐
//!   │   Keymap    │──────────▶│      Notebook       │──────────────▶│ FlipAdapter │
//!   │ FocusedText │            │  Phase + page index │◀──────────────│ (renderer)  │
//!   └─────────────┘            └──────────┬──────────┘  current_page  └─────────────┘
//!                                         │
//!                         ┌───────────────┼────────────────┐
//!                         ▼               ▼                ▼
//!                  RecipeCollection   draft Recipe     EventBus
//! ```
//!
//! The notebook is the only writer of recipes. Everything else reads a
//! [`NotebookSnapshot`] or listens on the event bus.
//!
//! ## Error Policy
//!
//! Intents that don't apply in the current state are rejected with a
//! [`CoreError`] and leave the notebook untouched. The UI is free to ignore
//! these; they are logged at `debug` level.

pub mod adapter;
pub mod config;
pub mod event;
pub mod intent;
pub mod keymap;
pub mod notebook;
pub mod snapshot;
pub mod text_field;

pub use adapter::{FlipAdapter, HeadlessFlipbook};
pub use config::Config;
pub use event::{EventBus, EventHandler, NotebookEvent};
pub use intent::Intent;
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use notebook::Notebook;
pub use snapshot::{Lifecycle, Mode, NotebookSnapshot};
pub use text_field::FocusedText;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Reasons an intent was dropped
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Intent '{intent}' is not valid while {state}")]
    InvalidTransition {
        intent: &'static str,
        state: &'static str,
    },

    #[error("Index {index} is out of range (have {len})")]
    OutOfRangeIndex { index: usize, len: usize },

    #[error("Pointer is outside the spread")]
    PlacementRejected,

    #[error("No sticker is armed")]
    NotArmed,

    #[error("Model error: {0}")]
    Model(#[from] recipebook_model::ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            intent: "save",
            state: "closed",
        };
        assert_eq!(err.to_string(), "Intent 'save' is not valid while closed");

        let err = CoreError::OutOfRangeIndex { index: 9, len: 4 };
        assert_eq!(err.to_string(), "Index 9 is out of range (have 4)");
    }
}
