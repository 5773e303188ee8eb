//! What the presentation layer reads on every render.

use recipebook_model::{IconRef, PageSequence};
use serde::{Deserialize, Serialize};

/// Whether the cover is showing or the pages are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Closed,
    Open,
}

/// What the open notebook is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Viewing,
    Creating,
    Editing,
}

impl Mode {
    /// Returns true if pages accept text and sticker changes.
    pub fn is_authoring(self) -> bool {
        matches!(self, Mode::Creating | Mode::Editing)
    }
}

/// A borrowed view of the notebook state.
#[derive(Debug, Clone, Serialize)]
pub struct NotebookSnapshot<'a> {
    pub lifecycle: Lifecycle,
    pub mode: Mode,
    pub active_page_index: usize,
    pub armed_sticker: Option<&'a IconRef>,
    /// Recipe index being edited, in editing mode
    pub editing_recipe: Option<usize>,
    /// Pages the renderer should show: the draft's pages while creating,
    /// the collection's otherwise
    pub page_sequence: PageSequence<'a>,
}
