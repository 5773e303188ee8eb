//! Pages and stickers.
//!
//! ## Learning: Newtypes for Identifiers
//!
//! `StickerId` and `IconRef` both wrap something printable, but they are not
//! interchangeable. Wrapping them means the compiler rejects
//! `remove_sticker(icon)` where a sticker id was meant.

use recipebook_geometry::{Side, clamp_percent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipe::RecipeId;

/// Reference to a sticker asset (for example `"egg.png"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    /// Creates an icon reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the asset name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IconRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for IconRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for IconRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StickerId(Uuid);

impl StickerId {
    /// Creates a new unique sticker ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StickerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StickerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An icon dropped onto a page.
///
/// The position is a percentage of the page's placeable box. Both
/// coordinates are clamped into `0..=100` when the sticker is created and
/// the fields are private, so no sticker can hold an out-of-range position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    id: StickerId,
    icon: IconRef,
    x_percent: f64,
    y_percent: f64,
}

impl Sticker {
    /// Creates a sticker with a fresh id, clamping the position.
    pub fn new(icon: IconRef, x_percent: f64, y_percent: f64) -> Self {
        Self {
            id: StickerId::new(),
            icon,
            x_percent: clamp_percent(x_percent),
            y_percent: clamp_percent(y_percent),
        }
    }

    pub fn id(&self) -> StickerId {
        self.id
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    pub fn x_percent(&self) -> f64 {
        self.x_percent
    }

    pub fn y_percent(&self) -> f64 {
        self.y_percent
    }
}

/// Identifies one page: the owning recipe and which side of its spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId {
    pub recipe: RecipeId,
    pub side: Side,
}

impl PageId {
    pub fn new(recipe: RecipeId, side: Side) -> Self {
        Self { recipe, side }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = match self.side {
            Side::Left => "left",
            Side::Right => "right",
        };
        write!(f, "{}/{}", self.recipe, side)
    }
}

/// A single page: free-form text plus stickers.
///
/// Stickers are kept in insertion order, which is also their z-order:
/// the last sticker added is drawn on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    id: PageId,
    text: String,
    stickers: Vec<Sticker>,
}

impl Page {
    /// Creates an empty page.
    pub fn new(id: PageId) -> Self {
        Self::with_text(id, String::new())
    }

    /// Creates a page with initial text.
    pub fn with_text(id: PageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            stickers: Vec::new(),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stickers in render order (front-most last).
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    /// Returns true if the page has no text and no stickers.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.stickers.is_empty()
    }

    /// Replaces the page text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Adds a sticker on top of the existing ones and returns it.
    pub fn add_sticker(&mut self, icon: IconRef, x_percent: f64, y_percent: f64) -> Sticker {
        let sticker = Sticker::new(icon, x_percent, y_percent);
        self.stickers.push(sticker.clone());
        sticker
    }

    /// Removes a sticker by id.
    ///
    /// Returns whether a sticker was removed. Removing an absent id is a
    /// no-op.
    pub fn remove_sticker(&mut self, id: StickerId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != id);
        before != self.stickers.len()
    }

    /// Moves the page under a different recipe, keeping its side.
    pub(crate) fn rekey(&mut self, recipe: RecipeId) {
        self.id.recipe = recipe;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn page() -> Page {
        Page::new(PageId::new(RecipeId::new(), Side::Left))
    }

    #[test]
    fn test_new_page_is_blank() {
        let page = page();
        assert!(page.is_blank());
        assert_eq!(page.text(), "");
    }

    #[test]
    fn test_stickers_keep_insertion_order() {
        let mut page = page();
        let a = page.add_sticker(IconRef::from("egg.png"), 10.0, 10.0);
        let b = page.add_sticker(IconRef::from("milk.png"), 20.0, 20.0);

        let ids: Vec<_> = page.stickers().iter().map(Sticker::id).collect();
        assert_eq!(ids, vec![a.id(), b.id()]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_add_sticker_clamps() {
        let mut page = page();
        let sticker = page.add_sticker(IconRef::from("egg.png"), -12.0, 180.0);
        assert_eq!(sticker.x_percent(), 0.0);
        assert_eq!(sticker.y_percent(), 100.0);
    }

    #[test]
    fn test_remove_sticker_is_idempotent() {
        let mut page = page();
        let keep = page.add_sticker(IconRef::from("egg.png"), 1.0, 1.0);
        let gone = page.add_sticker(IconRef::from("salt.png"), 2.0, 2.0);

        assert!(page.remove_sticker(gone.id()));
        let after_first = page.clone();

        assert!(!page.remove_sticker(gone.id()));
        assert_eq!(page, after_first);
        assert_eq!(page.stickers().len(), 1);
        assert_eq!(page.stickers()[0].id(), keep.id());
    }

    #[test]
    fn test_set_text_keeps_stickers() {
        let mut page = page();
        page.add_sticker(IconRef::from("egg.png"), 50.0, 50.0);
        page.set_text("3 eggs");
        assert_eq!(page.text(), "3 eggs");
        assert_eq!(page.stickers().len(), 1);
    }

    #[test]
    fn test_icon_ref_serializes_as_string() {
        let json = serde_json::to_string(&IconRef::from("egg.png")).unwrap();
        assert_eq!(json, "\"egg.png\"");
    }

    proptest! {
        #[test]
        fn prop_sticker_positions_stay_in_range(
            positions in proptest::collection::vec((any::<f64>(), any::<f64>()), 0..32)
        ) {
            let mut page = page();
            for (x, y) in positions {
                page.add_sticker(IconRef::from("egg.png"), x, y);
            }
            for sticker in page.stickers() {
                prop_assert!((0.0..=100.0).contains(&sticker.x_percent()));
                prop_assert!((0.0..=100.0).contains(&sticker.y_percent()));
            }
        }
    }
}
