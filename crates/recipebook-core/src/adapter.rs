//! The contract with the page-flip renderer.
//!
//! ## Learning: Traits at the Boundary
//!
//! The notebook doesn't know how pages are drawn or animated. It only needs
//! to ask for a page and to know which page is actually showing. A two-method
//! trait is all the coupling there is, and tests can swap in any
//! implementation they like.
//!
//! Flip completion goes the other way: the renderer (or whoever owns it)
//! calls [`Notebook::on_flip_settled`](crate::Notebook::on_flip_settled).

/// A two-page spread renderer.
pub trait FlipAdapter {
    /// Asks the renderer to turn to a page. Returns immediately; the flip
    /// completes later.
    fn turn_to_page(&mut self, page_index: usize);

    /// The page the renderer is currently showing. During a flip this is
    /// still the page being flipped away from.
    fn current_page(&self) -> usize;
}

impl<A: FlipAdapter + ?Sized> FlipAdapter for Box<A> {
    fn turn_to_page(&mut self, page_index: usize) {
        (**self).turn_to_page(page_index);
    }

    fn current_page(&self) -> usize {
        (**self).current_page()
    }
}

/// A renderer with no display, for tests and the headless driver.
///
/// Turn requests are queued; [`settle`](Self::settle) finishes the oldest
/// one and reports the page it landed on.
#[derive(Debug, Clone, Default)]
pub struct HeadlessFlipbook {
    current: usize,
    pending: std::collections::VecDeque<usize>,
    requested: Vec<usize>,
}

impl HeadlessFlipbook {
    /// Creates a flipbook showing page 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes the oldest in-flight flip and returns where it landed.
    pub fn settle(&mut self) -> Option<usize> {
        let page = self.pending.pop_front()?;
        self.current = page;
        Some(page)
    }

    /// Completes all in-flight flips and returns the final page, if any
    /// flips were pending.
    pub fn settle_all(&mut self) -> Option<usize> {
        let mut last = None;
        while let Some(page) = self.settle() {
            last = Some(page);
        }
        last
    }

    /// Returns true if a flip is still animating.
    pub fn is_flipping(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Every page ever requested, in order.
    pub fn requested(&self) -> &[usize] {
        &self.requested
    }
}

impl FlipAdapter for HeadlessFlipbook {
    fn turn_to_page(&mut self, page_index: usize) {
        self.requested.push(page_index);
        self.pending.push_back(page_index);
    }

    fn current_page(&self) -> usize {
        self.current
    }
}
