//! Single-assignment settlement cell
//!
//! Models a race between several asynchronous outcomes where only the first
//! writer wins. Used by the load sequencer to make the ready/fail/timeout
//! race explicit instead of hiding it behind boolean flags.

/// A write-once cell: the first [`settle`](Settlement::settle) wins, every
/// later write is a no-op.
#[derive(Debug, Default)]
pub struct Settlement<T> {
    value: Option<T>,
}

impl<T> Settlement<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Attempt to settle. Returns `true` if this call won the race.
    pub fn settle(&mut self, value: T) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn is_settled(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
