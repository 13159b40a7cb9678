//! Filter engine: state plus the single render callback.
//!
//! There is no subscription list. The engine holds exactly one callback and
//! invokes it synchronously after every state change, so the rendered view
//! always reflects the most recent completed toggle.

use crate::domain::entities::Post;
use crate::domain::filter::{FilterKind, FilterState};

pub type RenderCallback<'a> = Box<dyn FnMut(&FilterState, Vec<&'a Post>) + 'a>;

pub struct FilterEngine<'a> {
    posts: &'a [Post],
    state: FilterState,
    render: RenderCallback<'a>,
}

impl<'a> FilterEngine<'a> {
    /// Wire the engine to its render callback and emit the initial
    /// unfiltered render.
    pub fn new(posts: &'a [Post], render: RenderCallback<'a>) -> Self {
        let mut engine = Self {
            posts,
            state: FilterState::new(),
            render,
        };
        engine.notify();
        engine
    }

    /// Flip a filter and re-render with the new subset.
    pub fn toggle(&mut self, kind: FilterKind, value: &str) {
        self.state.toggle(kind, value);
        self.notify();
    }

    /// Clear all filters (the home-link behavior) and re-render.
    pub fn reset(&mut self) {
        self.state.clear();
        self.notify();
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    fn notify(&mut self) {
        let filtered = self.state.apply(self.posts);
        (self.render)(&self.state, filtered);
    }
}
