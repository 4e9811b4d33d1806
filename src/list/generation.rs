//! Load Generations
//!
//! One-shot loads that are not paginated lists (the category tree) still
//! overlap when reloads come in quick succession. Each load takes a number
//! and only the newest may apply its result.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    latest: u64,
}

impl Generation {
    /// Start a load; every earlier one becomes stale
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}
