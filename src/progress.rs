//! Fire-and-forget progress reporting.
//!
//! The analysis calls `update` at fixed checkpoints. Implementations must
//! return promptly and have no way to signal failure back to the caller.

use std::cell::Cell;

pub trait Progress {
    fn update(&self, message: &str);
}

impl<F: Fn(&str)> Progress for F {
    fn update(&self, message: &str) {
        self(message)
    }
}

/// Discards every message.
pub struct Silent;

impl Progress for Silent {
    fn update(&self, _message: &str) {}
}

/// Forwards messages to the `tracing` subscriber at info level.
pub struct LogProgress;

impl Progress for LogProgress {
    fn update(&self, message: &str) {
        tracing::info!(target: "busfactor::progress", "{message}");
    }
}

/// Emits "<label>...N%" only when the rounded-up percentage changes.
pub struct PercentTicker<'a> {
    progress: &'a dyn Progress,
    label: &'a str,
    total: usize,
    last: Cell<Option<usize>>,
}

impl<'a> PercentTicker<'a> {
    pub fn new(progress: &'a dyn Progress, label: &'a str, total: usize) -> Self {
        Self {
            progress,
            label,
            total,
            last: Cell::new(None),
        }
    }

    /// Report that `done` of `total` items have been processed.
    pub fn tick(&self, done: usize) {
        if self.total == 0 {
            return;
        }
        let pct = (done * 100).div_ceil(self.total).min(100);
        if self.last.get() != Some(pct) {
            self.last.set(Some(pct));
            self.progress.update(&format!("{}...{pct}%", self.label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closure_receives_messages() {
        let seen = RefCell::new(Vec::new());
        let sink = |m: &str| seen.borrow_mut().push(m.to_string());
        sink.update("hello");
        assert_eq!(seen.borrow().as_slice(), ["hello"]);
    }

    #[test]
    fn ticker_emits_each_percent_once() {
        let seen = RefCell::new(Vec::new());
        let sink = |m: &str| seen.borrow_mut().push(m.to_string());
        let ticker = PercentTicker::new(&sink, "Counting", 3);
        for i in 1..=3 {
            ticker.tick(i);
        }
        ticker.tick(3);
        assert_eq!(
            seen.borrow().as_slice(),
            ["Counting...34%", "Counting...67%", "Counting...100%"]
        );
    }

    #[test]
    fn ticker_with_zero_total_is_silent() {
        let seen = RefCell::new(Vec::<String>::new());
        let sink = |m: &str| seen.borrow_mut().push(m.to_string());
        PercentTicker::new(&sink, "Counting", 0).tick(0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn silent_does_nothing() {
        Silent.update("ignored");
        LogProgress.update("logged");
    }
}
