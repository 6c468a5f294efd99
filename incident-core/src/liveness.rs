use std::cell::Cell;
use std::rc::Rc;

/// Shared flag marking whether a component may still mutate its state.
///
/// Clones observe the same flag. Async completions check `is_alive` before
/// applying a response; teardown calls `end`.
#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Rc<Cell<bool>>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn end(&self) {
        self.alive.set(false);
    }

    /// Runs `apply` only while alive. Returns `None` for a late completion.
    pub fn guard<R>(&self, what: &str, apply: impl FnOnce() -> R) -> Option<R> {
        if self.is_alive() {
            Some(apply())
        } else {
            tracing::debug!(operation = what, "dropping response for torn down component");
            None
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
