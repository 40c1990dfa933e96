use std::time::Duration;

/// How long a status message stays up before its deferred clear fires.
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// The single transient status message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
    pub generation: u64,
}

/// Holds the current status and mints a fresh generation for every `set`.
///
/// Deferred clears carry the generation they were scheduled for and only
/// take effect while that generation is still current.
#[derive(Debug, Default)]
pub struct StatusNotifier {
    current: Status,
    next_generation: u64,
}

impl StatusNotifier {
    /// Replace the status unconditionally; returns the new generation.
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) -> u64 {
        self.next_generation += 1;
        self.current = Status {
            text: text.into(),
            is_error,
            generation: self.next_generation,
        };
        self.next_generation
    }

    /// Clear the status if `generation` is still the live one.
    ///
    /// Returns whether anything was cleared.
    pub fn clear_if(&mut self, generation: u64) -> bool {
        if self.current.generation != generation || self.current.text.is_empty() {
            return false;
        }
        self.current.text.clear();
        self.current.is_error = false;
        true
    }

    pub fn current(&self) -> &Status {
        &self.current
    }

    /// The visible message, if any.
    pub fn message(&self) -> Option<&str> {
        (!self.current.text.is_empty()).then_some(self.current.text.as_str())
    }
}
