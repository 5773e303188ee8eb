//! # Recipebook Model
//!
//! Recipes, their two pages, and the stickers placed on those pages.
//!
//! ## Ownership
//!
//! ```text
//! RecipeCollection ──owns──▶ Recipe ──owns──▶ Page (left, right) ──owns──▶ Sticker
//!        │
//!        └──derives──▶ PageSequence<'a> (borrowed, read-only)
//! ```
//!
//! The page sequence borrows pages from the collection, so it can never
//! outlive or disagree with the recipes it was built from. Rebuilding it is
//! a single pass over the recipes.

mod collection;
mod page;
mod recipe;

pub use collection::{PageSequence, RecipeCollection, derive_page_sequence, locate_page};
pub use page::{IconRef, Page, PageId, Sticker, StickerId};
pub use recipe::{Recipe, RecipeId};

pub use recipebook_geometry::Side;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur when addressing recipes and pages
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Recipe index {index} is out of range (collection has {len})")]
    RecipeIndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_flow() {
        let mut draft = Recipe::new();
        draft.left_mut().set_text("Ingredients");
        draft.right_mut().add_sticker(IconRef::from("egg.png"), 20.0, 30.0);

        let mut recipes = RecipeCollection::new();
        let saved = draft.into_saved("Omelette".to_string());
        let id = recipes.push(saved);

        assert_eq!(recipes.len(), 1);
        let recipe = recipes.find(id).unwrap();
        assert_eq!(recipe.title(), Some("Omelette"));
        assert_eq!(recipe.left().text(), "Ingredients");
        assert_eq!(recipe.right().stickers().len(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = ModelError::RecipeIndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Recipe index 4 is out of range (collection has 2)"
        );
    }
}
