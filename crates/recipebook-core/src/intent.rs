//! User intents.
//!
//! ## Learning: Commands as Values
//!
//! Each thing a user can ask the notebook to do is an enum variant. Values
//! can come from key bindings, pointer handlers, or a script file, and all
//! end up in [`Notebook::dispatch`](crate::Notebook::dispatch).

use recipebook_geometry::Pointer;
use recipebook_model::{IconRef, StickerId};
use serde::{Deserialize, Serialize};

/// Something the user asked the notebook to do.
///
/// Serialized with an `intent` tag, e.g. `{ intent = "start_edit", recipe = 1 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    // Lifecycle
    Open,
    Close,
    /// Opens when closed, starts a new recipe when open
    StartOrOpen,

    // Authoring
    StartNew,
    StartEdit {
        recipe: usize,
    },
    Save {
        #[serde(default)]
        title: Option<String>,
    },
    Cancel,
    Finish,

    // Stickers and text
    SelectIcon {
        icon: IconRef,
    },
    PlaceSticker {
        pointer: Pointer,
    },
    RemoveSticker {
        page: usize,
        sticker: StickerId,
    },
    CommitPageText {
        page: usize,
        text: String,
    },

    // Navigation
    NavigateTo {
        page: usize,
    },
    FlipNext,
    FlipPrev,
    FlipSettled {
        page: usize,
    },

    // Recipe list
    ViewRecipe {
        recipe: usize,
    },
    DeleteRecipe {
        recipe: usize,
    },
}

impl Intent {
    /// Returns the intent's name, as used in config files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Open => "open",
            Intent::Close => "close",
            Intent::StartOrOpen => "start_or_open",
            Intent::StartNew => "start_new",
            Intent::StartEdit { .. } => "start_edit",
            Intent::Save { .. } => "save",
            Intent::Cancel => "cancel",
            Intent::Finish => "finish",
            Intent::SelectIcon { .. } => "select_icon",
            Intent::PlaceSticker { .. } => "place_sticker",
            Intent::RemoveSticker { .. } => "remove_sticker",
            Intent::CommitPageText { .. } => "commit_page_text",
            Intent::NavigateTo { .. } => "navigate_to",
            Intent::FlipNext => "flip_next",
            Intent::FlipPrev => "flip_prev",
            Intent::FlipSettled { .. } => "flip_settled",
            Intent::ViewRecipe { .. } => "view_recipe",
            Intent::DeleteRecipe { .. } => "delete_recipe",
        }
    }

    /// Parses an intent that takes no arguments, for key bindings.
    pub fn from_name(name: &str) -> Option<Self> {
        let intent = match name.trim().to_lowercase().as_str() {
            "open" => Intent::Open,
            "close" => Intent::Close,
            "start_or_open" => Intent::StartOrOpen,
            "start_new" => Intent::StartNew,
            "save" => Intent::Save { title: None },
            "cancel" => Intent::Cancel,
            "finish" => Intent::Finish,
            "flip_next" => Intent::FlipNext,
            "flip_prev" => Intent::FlipPrev,
            _ => return None,
        };
        Some(intent)
    }
}
