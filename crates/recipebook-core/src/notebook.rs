//! The notebook state machine.
//!
//! ## States
//!
//! ```text
//!            open                 start_new               save / cancel
//!  Closed ─────────▶ Viewing ─────────────────▶ Creating ───────────────▶ Viewing
//!    ▲                  │    start_edit(i)                finish / cancel
//!    │                  └─────────────────────▶ Editing(i) ─────────────▶ Viewing
//!    │      close
//!    └──────────────── any open state
//! ```
//!
//! The armed sticker lives inside the `Creating` and `Editing` states, so
//! it can't exist anywhere else. Every transition replaces the state, which
//! drops the armed sticker with it.
//!
//! ## Requested vs. Settled Pages
//!
//! Navigation updates `active_page` right away and asks the renderer to
//! flip. The renderer's report in [`Notebook::on_flip_settled`] always wins.
//! A second request while a flip is running supersedes the first: the
//! renderer is told about the newest target only (coalesce-to-latest).
//!
//! Sticker placement reads the page the renderer is *showing*, not
//! `active_page`, so a click during a flip lands on the visible page.

use recipebook_geometry::{Pointer, SpreadGeometry, placement_from_pointer};
use recipebook_model::{
    IconRef, Page, PageSequence, Recipe, RecipeCollection, StickerId, derive_page_sequence,
    locate_page,
};

use crate::adapter::{FlipAdapter, HeadlessFlipbook};
use crate::config::{Config, NotebookConfig};
use crate::event::{EventBus, NotebookEvent};
use crate::intent::Intent;
use crate::snapshot::{Lifecycle, Mode, NotebookSnapshot};
use crate::{CoreError, CoreResult};

/// Lifecycle and mode as one value.
#[derive(Debug, Clone)]
enum Phase {
    Closed,
    Viewing,
    Creating {
        draft: Recipe,
        armed: Option<IconRef>,
    },
    Editing {
        recipe: usize,
        armed: Option<IconRef>,
    },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Closed => "closed",
            Phase::Viewing => "viewing",
            Phase::Creating { .. } => "creating",
            Phase::Editing { .. } => "editing",
        }
    }

    fn mode(&self) -> Mode {
        match self {
            Phase::Closed | Phase::Viewing => Mode::Viewing,
            Phase::Creating { .. } => Mode::Creating,
            Phase::Editing { .. } => Mode::Editing,
        }
    }

    fn armed(&self) -> Option<&IconRef> {
        match self {
            Phase::Creating { armed, .. } | Phase::Editing { armed, .. } => armed.as_ref(),
            Phase::Closed | Phase::Viewing => None,
        }
    }
}

fn invalid(intent: &'static str, state: &'static str) -> CoreError {
    tracing::debug!("Dropping '{}' while {}", intent, state);
    CoreError::InvalidTransition { intent, state }
}

fn out_of_range(index: usize, len: usize) -> CoreError {
    tracing::debug!("Dropping out-of-range index {} (have {})", index, len);
    CoreError::OutOfRangeIndex { index, len }
}

/// The recipe notebook.
///
/// Owns the recipe collection, the draft while creating, and the page
/// index. It is the only thing that mutates recipes.
///
/// ## Thread Safety
///
/// Designed to live on the UI thread. All handlers run to completion
/// synchronously; the only asynchronous boundary is the renderer's flip,
/// which reports back through [`on_flip_settled`](Self::on_flip_settled).
pub struct Notebook<A: FlipAdapter = HeadlessFlipbook> {
    phase: Phase,
    recipes: RecipeCollection,
    active_page: usize,
    in_flight: Option<usize>,
    spread: SpreadGeometry,
    settings: NotebookConfig,
    adapter: A,
    event_bus: EventBus,
}

impl<A: FlipAdapter> Notebook<A> {
    /// Creates a closed notebook with default configuration.
    pub fn new(adapter: A) -> Self {
        Self::with_config(&Config::default(), adapter)
    }

    /// Creates a closed notebook, seeding the sample recipe if configured.
    pub fn with_config(config: &Config, adapter: A) -> Self {
        let recipes = if config.notebook.seed_example {
            RecipeCollection::with_example()
        } else {
            RecipeCollection::new()
        };
        Self::with_recipes(config, recipes, adapter)
    }

    /// Creates a closed notebook over an existing collection.
    pub fn with_recipes(config: &Config, recipes: RecipeCollection, adapter: A) -> Self {
        Self {
            phase: Phase::Closed,
            recipes,
            active_page: 0,
            in_flight: None,
            spread: config.layout.spread(),
            settings: config.notebook.clone(),
            adapter,
            event_bus: EventBus::new(),
        }
    }

    // ==================== State ====================

    pub fn lifecycle(&self) -> Lifecycle {
        match self.phase {
            Phase::Closed => Lifecycle::Closed,
            _ => Lifecycle::Open,
        }
    }

    pub fn mode(&self) -> Mode {
        self.phase.mode()
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle() == Lifecycle::Open
    }

    pub fn active_page_index(&self) -> usize {
        self.active_page
    }

    /// The page a flip was last requested to, until the renderer settles.
    pub fn in_flight_page(&self) -> Option<usize> {
        self.in_flight
    }

    pub fn armed_sticker(&self) -> Option<&IconRef> {
        self.phase.armed()
    }

    /// Index of the recipe being edited, in editing mode.
    pub fn editing_recipe(&self) -> Option<usize> {
        match self.phase {
            Phase::Editing { recipe, .. } => Some(recipe),
            _ => None,
        }
    }

    /// The unsaved recipe, in creating mode.
    pub fn draft(&self) -> Option<&Recipe> {
        match &self.phase {
            Phase::Creating { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn recipes(&self) -> &RecipeCollection {
        &self.recipes
    }

    /// Pages the renderer should show: the draft's while creating, the
    /// collection's otherwise.
    pub fn page_sequence(&self) -> PageSequence<'_> {
        match &self.phase {
            Phase::Creating { draft, .. } => derive_page_sequence(std::slice::from_ref(draft)),
            _ => self.recipes.page_sequence(),
        }
    }

    pub fn page_count(&self) -> usize {
        match self.phase {
            Phase::Creating { .. } => 2,
            _ => self.recipes.page_count(),
        }
    }

    /// Labels for the recipe list, in collection order.
    pub fn recipe_labels(&self) -> Vec<String> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(i, recipe)| recipe.label(i + 1, &self.settings.untitled_label))
            .collect()
    }

    pub fn snapshot(&self) -> NotebookSnapshot<'_> {
        NotebookSnapshot {
            lifecycle: self.lifecycle(),
            mode: self.mode(),
            active_page_index: self.active_page,
            armed_sticker: self.armed_sticker(),
            editing_recipe: self.editing_recipe(),
            page_sequence: self.page_sequence(),
        }
    }

    pub fn spread(&self) -> SpreadGeometry {
        self.spread
    }

    /// Updates the spread size, e.g. after the window is resized.
    pub fn set_spread(&mut self, spread: SpreadGeometry) {
        self.spread = spread;
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Subscribes to notebook events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<NotebookEvent> {
        self.event_bus.subscribe()
    }

    // ==================== Lifecycle ====================

    /// Opens the cover and shows the first spread.
    pub fn open(&mut self) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Closed) {
            return Err(invalid("open", self.phase.name()));
        }
        self.enter(Phase::Viewing);
        self.emit(NotebookEvent::Opened);
        self.request_page(0);
        Ok(())
    }

    /// Closes the notebook from any open state, discarding a draft.
    pub fn close(&mut self) -> CoreResult<()> {
        if matches!(self.phase, Phase::Closed) {
            return Err(invalid("close", self.phase.name()));
        }
        self.shut();
        Ok(())
    }

    /// Opens when closed, otherwise starts a new recipe.
    pub fn start_or_open(&mut self) -> CoreResult<()> {
        match self.phase {
            Phase::Closed => self.open(),
            _ => self.start_new(),
        }
    }

    // ==================== Authoring ====================

    /// Starts a new draft recipe with two blank pages.
    pub fn start_new(&mut self) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Viewing) {
            return Err(invalid("start_new", self.phase.name()));
        }
        self.enter(Phase::Creating {
            draft: Recipe::new(),
            armed: None,
        });
        self.request_page(0);
        Ok(())
    }

    /// Starts editing the recipe at `recipe` and turns to its left page.
    pub fn start_edit(&mut self, recipe: usize) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Viewing) {
            return Err(invalid("start_edit", self.phase.name()));
        }
        if recipe >= self.recipes.len() {
            return Err(out_of_range(recipe, self.recipes.len()));
        }
        self.enter(Phase::Editing {
            recipe,
            armed: None,
        });
        self.request_page(recipe * 2);
        Ok(())
    }

    /// Saves the draft as a new recipe. While editing, same as [`finish`](Self::finish).
    ///
    /// A missing or blank title falls back to `"{prefix} {n}"`.
    pub fn save(&mut self, title: Option<String>) -> CoreResult<()> {
        match self.phase {
            Phase::Creating { .. } => {}
            Phase::Editing { .. } => return self.finish(),
            _ => return Err(invalid("save", self.phase.name())),
        }

        let title = self.resolve_title(title);
        if let Phase::Creating { draft, .. } = self.enter(Phase::Viewing) {
            let id = self.recipes.push(draft.into_saved(title.clone()));
            tracing::info!("Saved recipe '{}' ({})", title, id);
            self.emit(NotebookEvent::RecipeSaved(id));
        }
        Ok(())
    }

    /// Leaves editing mode. Edits were applied as they were made.
    pub fn finish(&mut self) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Editing { .. }) {
            return Err(invalid("finish", self.phase.name()));
        }
        self.enter(Phase::Viewing);
        Ok(())
    }

    /// Abandons creating or editing.
    ///
    /// A draft is discarded. Edits already made to an existing recipe are
    /// kept; there is no rollback.
    pub fn cancel(&mut self) -> CoreResult<()> {
        match self.phase {
            Phase::Creating { .. } => {
                self.enter(Phase::Viewing);
                self.emit(NotebookEvent::DraftDiscarded);
            }
            Phase::Editing { .. } => {
                self.enter(Phase::Viewing);
            }
            _ => return Err(invalid("cancel", self.phase.name())),
        }
        Ok(())
    }

    // ==================== Stickers & Text ====================

    /// Arms an icon for placement. Selecting the armed icon again disarms it.
    pub fn select_icon(&mut self, icon: IconRef) -> CoreResult<()> {
        let state = self.phase.name();
        let event = match &mut self.phase {
            Phase::Creating { armed, .. } | Phase::Editing { armed, .. } => {
                if armed.as_ref() == Some(&icon) {
                    *armed = None;
                    NotebookEvent::StickerDisarmed
                } else {
                    *armed = Some(icon.clone());
                    NotebookEvent::StickerArmed(icon)
                }
            }
            _ => return Err(invalid("select_icon", state)),
        };
        self.emit(event);
        Ok(())
    }

    /// Drops the armed icon where the pointer is.
    ///
    /// On any rejection the icon stays armed so the user can try again.
    pub fn place_sticker(&mut self, pointer: Pointer) -> CoreResult<StickerId> {
        let icon = match &self.phase {
            Phase::Creating { armed, .. } | Phase::Editing { armed, .. } => {
                armed.clone().ok_or_else(|| {
                    tracing::debug!("Dropping 'place_sticker' with nothing armed");
                    CoreError::NotArmed
                })?
            }
            _ => return Err(invalid("place_sticker", self.phase.name())),
        };

        let placement = placement_from_pointer(pointer, self.spread).ok_or_else(|| {
            tracing::debug!("Pointer ({}, {}) is off the spread", pointer.x, pointer.y);
            CoreError::PlacementRejected
        })?;

        let shown = self.adapter.current_page();
        let page_index = (shown / 2) * 2 + placement.side.offset();
        let sticker = self
            .authoring_page_mut("place_sticker", page_index)?
            .add_sticker(icon, placement.x_percent, placement.y_percent);

        tracing::debug!(
            "Placed {} on page {} at ({:.2}%, {:.2}%)",
            sticker.icon(),
            page_index,
            sticker.x_percent(),
            sticker.y_percent()
        );
        self.disarm();
        self.emit(NotebookEvent::StickerPlaced {
            page_index,
            sticker: sticker.id(),
        });
        Ok(sticker.id())
    }

    /// Removes a sticker. Removing one that isn't there is a no-op.
    pub fn remove_sticker(&mut self, page_index: usize, sticker: StickerId) -> CoreResult<()> {
        let removed = self
            .authoring_page_mut("remove_sticker", page_index)?
            .remove_sticker(sticker);
        if removed {
            self.emit(NotebookEvent::StickerRemoved {
                page_index,
                sticker,
            });
        }
        Ok(())
    }

    /// Commits a page's text, typically when its field loses focus.
    pub fn commit_page_text(&mut self, page_index: usize, text: String) -> CoreResult<()> {
        self.authoring_page_mut("commit_page_text", page_index)?
            .set_text(text);
        self.emit(NotebookEvent::PageTextCommitted(page_index));
        Ok(())
    }

    // ==================== Navigation ====================

    /// Asks for a page. A no-op if it is already the active page.
    pub fn navigate_to(&mut self, page_index: usize) -> CoreResult<()> {
        let len = self.page_count();
        if page_index >= len {
            return Err(out_of_range(page_index, len));
        }
        if page_index == self.active_page {
            return Ok(());
        }
        self.request_page(page_index);
        Ok(())
    }

    /// Turns to the next spread.
    pub fn flip_next(&mut self) -> CoreResult<()> {
        self.require_browsable("flip_next")?;
        let next = (self.current_spread() + 1) * 2;
        self.navigate_to(next)
    }

    /// Turns to the previous spread, or closes the notebook from the first.
    pub fn flip_prev(&mut self) -> CoreResult<()> {
        self.require_browsable("flip_prev")?;
        match self.current_spread() {
            0 => self.close(),
            spread => self.navigate_to((spread - 1) * 2),
        }
    }

    /// The renderer finished a flip and is showing `page_index`.
    ///
    /// Never rejected: the renderer's report is the truth.
    pub fn on_flip_settled(&mut self, page_index: usize) {
        if page_index >= self.page_count() {
            tracing::debug!(
                "Renderer settled on page {} beyond {} pages",
                page_index,
                self.page_count()
            );
        }
        self.active_page = page_index;
        self.in_flight = None;
        self.disarm();
        self.emit(NotebookEvent::PageSettled(page_index));
    }

    // ==================== Recipe List ====================

    /// Shows a recipe from the list, opening the notebook if needed.
    pub fn view_recipe(&mut self, recipe: usize) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Closed | Phase::Viewing) {
            return Err(invalid("view_recipe", self.phase.name()));
        }
        if recipe >= self.recipes.len() {
            return Err(out_of_range(recipe, self.recipes.len()));
        }
        if matches!(self.phase, Phase::Closed) {
            self.enter(Phase::Viewing);
            self.emit(NotebookEvent::Opened);
        }
        self.request_page(recipe * 2);
        Ok(())
    }

    /// Deletes a recipe. Deleting the last one closes the notebook.
    pub fn delete_recipe(&mut self, recipe: usize) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Viewing) {
            return Err(invalid("delete_recipe", self.phase.name()));
        }
        if recipe >= self.recipes.len() {
            return Err(out_of_range(recipe, self.recipes.len()));
        }

        let viewed = self.active_page / 2;
        let removed = self.recipes.remove(recipe)?;
        tracing::info!("Deleted recipe {} ({})", recipe, removed.id());
        self.emit(NotebookEvent::RecipeDeleted(removed.id()));

        if self.recipes.is_empty() {
            self.shut();
        } else if recipe == viewed {
            self.request_page(0);
        } else if recipe < viewed {
            self.request_page(self.active_page - 2);
        }
        Ok(())
    }

    // ==================== Dispatch ====================

    /// Routes an intent to its handler.
    pub fn dispatch(&mut self, intent: Intent) -> CoreResult<()> {
        tracing::trace!("Dispatching '{}' while {}", intent.name(), self.phase.name());
        match intent {
            Intent::Open => self.open(),
            Intent::Close => self.close(),
            Intent::StartOrOpen => self.start_or_open(),
            Intent::StartNew => self.start_new(),
            Intent::StartEdit { recipe } => self.start_edit(recipe),
            Intent::Save { title } => self.save(title),
            Intent::Cancel => self.cancel(),
            Intent::Finish => self.finish(),
            Intent::SelectIcon { icon } => self.select_icon(icon),
            Intent::PlaceSticker { pointer } => self.place_sticker(pointer).map(|_| ()),
            Intent::RemoveSticker { page, sticker } => self.remove_sticker(page, sticker),
            Intent::CommitPageText { page, text } => self.commit_page_text(page, text),
            Intent::NavigateTo { page } => self.navigate_to(page),
            Intent::FlipNext => self.flip_next(),
            Intent::FlipPrev => self.flip_prev(),
            Intent::FlipSettled { page } => {
                self.on_flip_settled(page);
                Ok(())
            }
            Intent::ViewRecipe { recipe } => self.view_recipe(recipe),
            Intent::DeleteRecipe { recipe } => self.delete_recipe(recipe),
        }
    }

    // ==================== Internals ====================

    /// Replaces the phase, returning the old one.
    fn enter(&mut self, phase: Phase) -> Phase {
        let was_armed = self.phase.armed().is_some();
        let previous = std::mem::replace(&mut self.phase, phase);

        if was_armed {
            self.emit(NotebookEvent::StickerDisarmed);
        }
        let both_open = !matches!(previous, Phase::Closed) && self.is_open();
        if both_open && previous.mode() != self.phase.mode() {
            self.emit(NotebookEvent::ModeChanged(self.phase.mode()));
        }
        tracing::debug!("Notebook {} -> {}", previous.name(), self.phase.name());
        previous
    }

    fn shut(&mut self) {
        let discarded = matches!(self.phase, Phase::Creating { .. });
        self.enter(Phase::Closed);
        self.in_flight = None;
        if discarded {
            self.emit(NotebookEvent::DraftDiscarded);
        }
        self.emit(NotebookEvent::Closed);
    }

    fn disarm(&mut self) {
        if let Phase::Creating { armed, .. } | Phase::Editing { armed, .. } = &mut self.phase {
            if armed.take().is_some() {
                self.emit(NotebookEvent::StickerDisarmed);
            }
        }
    }

    /// Moves the active page and tells the renderer, unless it is already
    /// there with nothing in flight.
    fn request_page(&mut self, page_index: usize) {
        self.active_page = page_index;
        self.disarm();

        if !self.is_open() {
            return;
        }
        if self.in_flight.is_none() && self.adapter.current_page() == page_index {
            return;
        }
        if let Some(previous) = self.in_flight {
            tracing::debug!("Flip to {} superseded by {}", previous, page_index);
        }
        self.adapter.turn_to_page(page_index);
        self.in_flight = Some(page_index);
        self.emit(NotebookEvent::PageRequested(page_index));
    }

    /// Spread holding the active page, capped one past the last spread.
    ///
    /// The renderer may settle anywhere, so `active_page` can lie beyond the
    /// sequence.
    fn current_spread(&self) -> usize {
        (self.active_page / 2).min(self.page_count() / 2)
    }

    fn require_browsable(&self, intent: &'static str) -> CoreResult<()> {
        if !matches!(self.phase, Phase::Viewing) {
            return Err(invalid(intent, self.phase.name()));
        }
        if self.recipes.is_empty() {
            return Err(out_of_range(0, 0));
        }
        Ok(())
    }

    /// The page at `page_index` in the sequence being authored.
    fn authoring_page_mut(&mut self, intent: &'static str, page_index: usize) -> CoreResult<&mut Page> {
        let state = self.phase.name();
        let (recipe_index, side) = locate_page(page_index);
        match &mut self.phase {
            Phase::Creating { draft, .. } => {
                if recipe_index == 0 {
                    Ok(draft.page_mut(side))
                } else {
                    Err(out_of_range(page_index, 2))
                }
            }
            Phase::Editing { .. } => {
                let len = self.recipes.page_count();
                let id = self
                    .recipes
                    .page_id_at(page_index)
                    .ok_or_else(|| out_of_range(page_index, len))?;
                Ok(self.recipes.page_mut(id)?)
            }
            Phase::Closed | Phase::Viewing => Err(invalid(intent, state)),
        }
    }

    fn resolve_title(&self, title: Option<String>) -> String {
        match title {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => format!(
                "{} {}",
                self.settings.default_title_prefix,
                self.recipes.len() + 1
            ),
        }
    }

    fn emit(&self, event: NotebookEvent) {
        self.event_bus.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook() -> Notebook {
        Notebook::new(HeadlessFlipbook::new())
    }

    fn settle(nb: &mut Notebook) {
        while let Some(page) = nb.adapter_mut().settle() {
            nb.on_flip_settled(page);
        }
    }

    #[test]
    fn test_starts_closed_with_example() {
        let nb = notebook();
        assert_eq!(nb.lifecycle(), Lifecycle::Closed);
        assert_eq!(nb.mode(), Mode::Viewing);
        assert_eq!(nb.recipes().len(), 1);
        assert_eq!(nb.recipe_labels(), vec!["Chocolate Cake".to_string()]);
    }

    #[test]
    fn test_closed_rejects_authoring() {
        let mut nb = notebook();
        assert_eq!(
            nb.save(None),
            Err(CoreError::InvalidTransition {
                intent: "save",
                state: "closed"
            })
        );
        assert!(nb.start_new().is_err());
        assert!(nb.start_edit(0).is_err());
        assert!(nb.cancel().is_err());
        assert!(nb.close().is_err());
        assert_eq!(nb.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn test_open_twice_is_rejected() {
        let mut nb = notebook();
        nb.open().unwrap();
        assert!(nb.open().is_err());
        assert!(nb.is_open());
    }

    #[test]
    fn test_select_icon_toggles() {
        let mut nb = notebook();
        nb.open().unwrap();
        assert!(nb.select_icon(IconRef::from("egg.png")).is_err());

        nb.start_new().unwrap();
        nb.select_icon(IconRef::from("egg.png")).unwrap();
        assert_eq!(nb.armed_sticker().map(IconRef::as_str), Some("egg.png"));

        nb.select_icon(IconRef::from("milk.png")).unwrap();
        assert_eq!(nb.armed_sticker().map(IconRef::as_str), Some("milk.png"));

        nb.select_icon(IconRef::from("milk.png")).unwrap();
        assert!(nb.armed_sticker().is_none());
    }

    #[test]
    fn test_mode_change_clears_armed_icon() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_edit(0).unwrap();
        nb.select_icon(IconRef::from("egg.png")).unwrap();
        nb.finish().unwrap();
        assert!(nb.armed_sticker().is_none());

        nb.start_new().unwrap();
        nb.select_icon(IconRef::from("egg.png")).unwrap();
        nb.close().unwrap();
        assert!(nb.armed_sticker().is_none());
        assert!(nb.draft().is_none());
    }

    #[test]
    fn test_place_without_armed_icon() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_new().unwrap();
        assert_eq!(
            nb.place_sticker(Pointer::new(100.0, 100.0)),
            Err(CoreError::NotArmed)
        );
    }

    #[test]
    fn test_off_spread_click_keeps_icon_armed() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_new().unwrap();
        nb.select_icon(IconRef::from("egg.png")).unwrap();

        assert_eq!(
            nb.place_sticker(Pointer::new(-10.0, 100.0)),
            Err(CoreError::PlacementRejected)
        );
        assert!(nb.armed_sticker().is_some());
        assert!(nb.draft().unwrap().left().stickers().is_empty());
    }

    #[test]
    fn test_right_page_placement() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_new().unwrap();
        nb.select_icon(IconRef::from("salt.png")).unwrap();
        nb.place_sticker(Pointer::new(1050.0, 400.0)).unwrap();

        let draft = nb.draft().unwrap();
        assert!(draft.left().stickers().is_empty());
        let sticker = &draft.right().stickers()[0];
        assert!((sticker.x_percent() - 50.0).abs() < 1e-9);
        assert!((sticker.y_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_is_read_only_while_viewing() {
        let mut nb = notebook();
        nb.open().unwrap();
        assert!(nb.commit_page_text(0, "scribble".to_string()).is_err());
        assert!(nb.recipes().get(0).unwrap().left().text().starts_with("Ingredients"));
    }

    #[test]
    fn test_save_title_fallback() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_new().unwrap();
        nb.save(Some("   ".to_string())).unwrap();
        assert_eq!(nb.recipes().get(1).unwrap().title(), Some("New Recipe 2"));

        nb.start_new().unwrap();
        nb.save(Some(" Soup ".to_string())).unwrap();
        assert_eq!(nb.recipes().get(2).unwrap().title(), Some("Soup"));
    }

    #[test]
    fn test_save_while_editing_finishes() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_edit(0).unwrap();
        nb.save(Some("ignored".to_string())).unwrap();
        assert_eq!(nb.mode(), Mode::Viewing);
        assert_eq!(nb.recipes().len(), 1);
        assert_eq!(nb.recipes().get(0).unwrap().title(), Some("Chocolate Cake"));
    }

    #[test]
    fn test_navigate_same_page_is_noop() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.navigate_to(0).unwrap();
        assert!(nb.adapter().requested().is_empty());
        assert!(nb.in_flight_page().is_none());
    }

    #[test]
    fn test_navigate_same_page_keeps_armed_icon() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_edit(0).unwrap();
        nb.select_icon(IconRef::from("egg.png")).unwrap();
        let requested = nb.adapter().requested().len();

        nb.navigate_to(nb.active_page_index()).unwrap();
        assert_eq!(nb.armed_sticker().map(IconRef::as_str), Some("egg.png"));
        assert_eq!(nb.adapter().requested().len(), requested);
        assert!(nb.in_flight_page().is_none());
    }

    #[test]
    fn test_flip_after_settling_past_the_end() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_new().unwrap();
        nb.save(None).unwrap();

        nb.on_flip_settled(usize::MAX);
        assert_eq!(
            nb.flip_next(),
            Err(CoreError::OutOfRangeIndex { index: 6, len: 4 })
        );
        assert_eq!(nb.active_page_index(), usize::MAX);

        nb.flip_prev().unwrap();
        assert_eq!(nb.active_page_index(), 2);
        settle(&mut nb);
        assert_eq!(nb.active_page_index(), 2);
    }

    #[test]
    fn test_flip_prev_from_beyond_single_spread() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.on_flip_settled(7);

        nb.flip_prev().unwrap();
        assert_eq!(nb.active_page_index(), 0);
        assert!(nb.is_open());
        settle(&mut nb);
        assert_eq!(nb.active_page_index(), 0);
    }

    #[test]
    fn test_navigate_out_of_range() {
        let mut nb = notebook();
        nb.open().unwrap();
        assert_eq!(
            nb.navigate_to(2),
            Err(CoreError::OutOfRangeIndex { index: 2, len: 2 })
        );
        assert_eq!(nb.active_page_index(), 0);
    }

    #[test]
    fn test_flip_prev_on_first_spread_closes() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.flip_prev().unwrap();
        assert_eq!(nb.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn test_flip_next_and_back() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_new().unwrap();
        nb.save(None).unwrap();

        nb.flip_next().unwrap();
        settle(&mut nb);
        assert_eq!(nb.active_page_index(), 2);
        assert!(nb.flip_next().is_err());

        nb.flip_prev().unwrap();
        settle(&mut nb);
        assert_eq!(nb.active_page_index(), 0);
        assert!(nb.is_open());
    }

    #[test]
    fn test_flip_is_disabled_while_authoring() {
        let mut nb = notebook();
        nb.open().unwrap();
        nb.start_edit(0).unwrap();
        assert!(nb.flip_next().is_err());
        assert!(nb.flip_prev().is_err());
        assert!(nb.is_open());
    }

    #[test]
    fn test_start_or_open() {
        let mut nb = notebook();
        nb.start_or_open().unwrap();
        assert_eq!(nb.mode(), Mode::Viewing);
        nb.start_or_open().unwrap();
        assert_eq!(nb.mode(), Mode::Creating);
    }

    #[test]
    fn test_dispatch_routes_intents() {
        let mut nb = notebook();
        nb.dispatch(Intent::Open).unwrap();
        nb.dispatch(Intent::StartNew).unwrap();
        nb.dispatch(Intent::CommitPageText {
            page: 1,
            text: "Stir".to_string(),
        })
        .unwrap();
        nb.dispatch(Intent::Save {
            title: Some("Stew".to_string()),
        })
        .unwrap();

        let saved = nb.recipes().get(1).unwrap();
        assert_eq!(saved.title(), Some("Stew"));
        assert_eq!(saved.right().text(), "Stir");
    }

    #[test]
    fn test_events_for_save() {
        let mut nb = notebook();
        let mut rx = nb.subscribe();
        nb.open().unwrap();
        nb.start_new().unwrap();
        nb.save(None).unwrap();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.first(), Some(&NotebookEvent::Opened));
        assert!(events.contains(&NotebookEvent::ModeChanged(Mode::Creating)));
        assert!(matches!(events.last(), Some(NotebookEvent::RecipeSaved(_))));
    }
}
