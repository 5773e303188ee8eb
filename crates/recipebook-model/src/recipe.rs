//! Recipes.

use recipebook_geometry::Side;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::page::{Page, PageId};

/// Unique identifier for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Creates a new unique recipe ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recipe: an optional title and a left/right page pair.
///
/// The id is fixed at construction. A draft gets a throwaway id and is
/// turned into a saved recipe with [`Recipe::into_saved`], which assigns the
/// permanent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    title: Option<String>,
    left: Page,
    right: Page,
}

impl Recipe {
    /// Creates an untitled recipe with two blank pages.
    pub fn new() -> Self {
        Self::with_pages(None, String::new(), String::new())
    }

    /// Creates a recipe with the given title and page texts.
    pub fn with_pages(
        title: Option<String>,
        left_text: impl Into<String>,
        right_text: impl Into<String>,
    ) -> Self {
        let id = RecipeId::new();
        Self {
            id,
            title,
            left: Page::with_text(PageId::new(id, Side::Left), left_text),
            right: Page::with_text(PageId::new(id, Side::Right), right_text),
        }
    }

    /// The sample recipe a fresh notebook starts with.
    pub fn example() -> Self {
        Self::with_pages(
            Some("Chocolate Cake".to_string()),
            "Ingredients:\n\
             • 3 eggs\n\
             • 1.5 cups sugar\n\
             • 1.5 cups milk\n\
             • 1 cup vegetable oil\n\
             • 2.5 cups flour\n\
             • 3 tbsp cocoa\n\
             • 1 packet baking powder\n\
             • 1 packet vanilla",
            "Preparation:\n\
             1. Preheat the oven to 180°C\n\
             2. Whisk the eggs and sugar\n\
             3. Add the milk and oil and mix\n\
             4. Sift in the dry ingredients\n\
             5. Pour into a greased cake tin\n\
             6. Bake for 35-40 minutes",
        )
    }

    /// Consumes a draft and returns it as a saved recipe with a fresh id
    /// and the given title. Pages keep their text and stickers.
    pub fn into_saved(mut self, title: String) -> Self {
        let id = RecipeId::new();
        self.id = id;
        self.title = Some(title);
        self.left.rekey(id);
        self.right.rekey(id);
        self
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Label for a recipe list: the title, or `"{fallback} #{position}"`.
    pub fn label(&self, position: usize, fallback: &str) -> String {
        match self.title() {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => format!("{fallback} #{position}"),
        }
    }

    pub fn left(&self) -> &Page {
        &self.left
    }

    pub fn right(&self) -> &Page {
        &self.right
    }

    pub fn left_mut(&mut self) -> &mut Page {
        &mut self.left
    }

    pub fn right_mut(&mut self) -> &mut Page {
        &mut self.right
    }

    /// Returns the page on the given side.
    pub fn page(&self, side: Side) -> &Page {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns the page on the given side, mutably.
    pub fn page_mut(&mut self, side: Side) -> &mut Page {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::new()
    }
}
