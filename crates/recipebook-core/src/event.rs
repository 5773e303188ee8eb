//! Notebook notifications.
//!
//! ## Learning: Broadcast Channels
//!
//! `tokio::sync::broadcast` lets any number of listeners (renderer, logger,
//! autosave) see every event without the notebook knowing who they are.
//! Sending never blocks, and sending with nobody listening is fine.

use recipebook_model::{IconRef, RecipeId, StickerId};
use tokio::sync::broadcast;

use crate::snapshot::Mode;

/// Something that happened to the notebook.
#[derive(Debug, Clone, PartialEq)]
pub enum NotebookEvent {
    // Lifecycle
    /// The cover was opened
    Opened,
    /// The notebook was closed
    Closed,
    /// The open notebook switched mode
    ModeChanged(Mode),

    // Navigation
    /// A flip to this page was requested from the renderer
    PageRequested(usize),
    /// The renderer finished flipping and is showing this page
    PageSettled(usize),

    // Stickers
    /// An icon was armed for placement
    StickerArmed(IconRef),
    /// The armed icon was cleared
    StickerDisarmed,
    /// A sticker was dropped onto a page
    StickerPlaced { page_index: usize, sticker: StickerId },
    /// A sticker was removed from a page
    StickerRemoved { page_index: usize, sticker: StickerId },

    // Content
    /// A page's text was committed
    PageTextCommitted(usize),
    /// The draft was saved as a new recipe
    RecipeSaved(RecipeId),
    /// A recipe was deleted
    RecipeDeleted(RecipeId),
    /// The draft was thrown away
    DraftDiscarded,
}

/// Event bus for broadcasting notebook events.
pub struct EventBus {
    sender: broadcast::Sender<NotebookEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: NotebookEvent) {
        // No receivers is not a problem
        let _ = self.sender.send(event);
    }

    /// Subscribes to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<NotebookEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Async helper that skips over lagged events.
///
/// ## Example
///
/// ```ignore
/// let mut handler = EventHandler::new(notebook.subscribe());
///
/// tokio::spawn(async move {
///     while let Some(event) = handler.next().await {
///         if let NotebookEvent::RecipeSaved(id) = event {
///             // persist it
///         }
///     }
/// });
/// ```
pub struct EventHandler {
    receiver: broadcast::Receiver<NotebookEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<NotebookEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event. Returns `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<NotebookEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Drains events that are already queued, without waiting.
    pub fn drain(&mut self) -> Vec<NotebookEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                }
                Err(_) => break,
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(NotebookEvent::Opened);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, NotebookEvent::Opened);
    }

    #[tokio::test]
    async fn test_handler_ends_when_bus_dropped() {
        let bus = EventBus::new();
        let mut handler = EventHandler::new(bus.subscribe());

        bus.emit(NotebookEvent::PageSettled(2));
        drop(bus);

        assert_eq!(handler.next().await, Some(NotebookEvent::PageSettled(2)));
        assert_eq!(handler.next().await, None);
    }

    #[test]
    fn test_drain_without_runtime() {
        let bus = EventBus::new();
        let mut handler = EventHandler::new(bus.subscribe());

        bus.emit(NotebookEvent::Opened);
        bus.emit(NotebookEvent::ModeChanged(Mode::Creating));

        assert_eq!(
            handler.drain(),
            vec![
                NotebookEvent::Opened,
                NotebookEvent::ModeChanged(Mode::Creating)
            ]
        );
        assert!(handler.drain().is_empty());
    }
}
