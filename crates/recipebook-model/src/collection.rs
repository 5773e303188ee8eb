//! The recipe collection and the page sequence derived from it.
//!
//! ## Page Index Arithmetic
//!
//! Flattening recipes into pages puts each recipe's left page at an even
//! index and its right page at the following odd index:
//!
//! ```text
//! page index:   0      1      2      3      4      5
//! recipe:       0      0      1      1      2      2
//! side:       left  right   left  right   left  right
//! ```
//!
//! [`locate_page`] is the single place that arithmetic lives.

use recipebook_geometry::Side;
use serde::Serialize;

use crate::page::{IconRef, Page, PageId, Sticker, StickerId};
use crate::recipe::{Recipe, RecipeId};
use crate::{ModelError, ModelResult};

/// Maps a flattened page index to `(recipe_index, side)`.
pub fn locate_page(page_index: usize) -> (usize, Side) {
    (page_index / 2, Side::of_page(page_index))
}

/// Read-only, flattened view of recipe pages in collection order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PageSequence<'a> {
    pages: Vec<&'a Page>,
}

impl<'a> PageSequence<'a> {
    /// Number of pages (always even).
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns the page at a flattened index.
    pub fn get(&self, page_index: usize) -> Option<&'a Page> {
        self.pages.get(page_index).copied()
    }

    /// Iterates pages in display order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Page> + '_ {
        self.pages.iter().copied()
    }
}

/// Builds the page sequence for a slice of recipes.
pub fn derive_page_sequence(recipes: &[Recipe]) -> PageSequence<'_> {
    let pages = recipes
        .iter()
        .flat_map(|recipe| [recipe.left(), recipe.right()])
        .collect();
    PageSequence { pages }
}

/// An ordered list of saved recipes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
}

impl RecipeCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
        }
    }

    /// Creates a collection holding the sample recipe.
    pub fn with_example() -> Self {
        Self {
            recipes: vec![Recipe::example()],
        }
    }

    /// Appends a recipe and returns its id.
    pub fn push(&mut self, recipe: Recipe) -> RecipeId {
        let id = recipe.id();
        self.recipes.push(recipe);
        id
    }

    /// Removes the recipe at `index`.
    pub fn remove(&mut self, index: usize) -> ModelResult<Recipe> {
        if index >= self.recipes.len() {
            return Err(ModelError::RecipeIndexOutOfRange {
                index,
                len: self.recipes.len(),
            });
        }
        Ok(self.recipes.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    /// Finds a recipe by id.
    pub fn find(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id() == id)
    }

    /// Returns the position of a recipe by id.
    pub fn position(&self, id: RecipeId) -> Option<usize> {
        self.recipes.iter().position(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of pages in the derived sequence.
    pub fn page_count(&self) -> usize {
        self.recipes.len() * 2
    }

    /// Derives the flattened page sequence.
    pub fn page_sequence(&self) -> PageSequence<'_> {
        derive_page_sequence(&self.recipes)
    }

    /// Returns the id of the page at a flattened index.
    pub fn page_id_at(&self, page_index: usize) -> Option<PageId> {
        let (recipe_index, side) = locate_page(page_index);
        self.recipes
            .get(recipe_index)
            .map(|recipe| recipe.page(side).id())
    }

    /// Looks up a page by id.
    pub fn page(&self, id: PageId) -> ModelResult<&Page> {
        self.find(id.recipe)
            .map(|recipe| recipe.page(id.side))
            .ok_or(ModelError::PageNotFound(id))
    }

    /// Looks up a page by id, mutably.
    pub fn page_mut(&mut self, id: PageId) -> ModelResult<&mut Page> {
        self.recipes
            .iter_mut()
            .find(|r| r.id() == id.recipe)
            .map(|recipe| recipe.page_mut(id.side))
            .ok_or(ModelError::PageNotFound(id))
    }

    /// Replaces a page's text.
    pub fn set_text(&mut self, id: PageId, text: impl Into<String>) -> ModelResult<()> {
        self.page_mut(id)?.set_text(text);
        Ok(())
    }

    /// Adds a sticker to a page. Percentages are clamped into `0..=100`.
    pub fn add_sticker(
        &mut self,
        id: PageId,
        icon: IconRef,
        x_percent: f64,
        y_percent: f64,
    ) -> ModelResult<Sticker> {
        Ok(self.page_mut(id)?.add_sticker(icon, x_percent, y_percent))
    }

    /// Removes a sticker from a page.
    ///
    /// An unknown sticker id is not an error; only an unknown page is.
    pub fn remove_sticker(&mut self, id: PageId, sticker: StickerId) -> ModelResult<()> {
        if !self.page_mut(id)?.remove_sticker(sticker) {
            tracing::debug!("Sticker {} not on page {}, nothing removed", sticker, id);
        }
        Ok(())
    }
}
