// src/utils/random.rs

use rand::Rng;

/// Source of uniform random choices.
///
/// Handlers receive one through application state so tests can replace it
/// with a deterministic implementation.
pub trait Chooser: Send + Sync {
    /// Returns an index in `0..len`. Only called with `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Default chooser backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngChooser;

impl Chooser for ThreadRngChooser {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks one element of `items`, or `None` when it is empty.
///
/// An out-of-range index from the chooser is clamped to the last element.
pub fn choose<'a, T>(chooser: &dyn Chooser, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = chooser.pick(items.len()).min(items.len() - 1);
    items.get(index)
}
