//! Tooltip debounce bookkeeping
//!
//! The timer itself lives in [`crate::VisualState`]; this type only decides
//! whether a fired timer is still the current one. Every schedule bumps the
//! generation, so a timer that fires after being superseded or cancelled is
//! ignored.

/// Single-slot debounce keyed by a generation counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TooltipDebounce {
    generation: u64,
    pending: Option<u64>,
}

impl TooltipDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new wait, replacing any pending one. Returns the token the
    /// timer must present when it fires.
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.generation
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Timer callback. True only for the most recent, uncancelled schedule.
    pub fn fire(&mut self, token: u64) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_after_schedule() {
        let mut debounce = TooltipDebounce::new();
        let token = debounce.schedule();

        assert!(debounce.is_pending());
        assert!(debounce.fire(token));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_reschedule_supersedes_previous() {
        let mut debounce = TooltipDebounce::new();
        let first = debounce.schedule();
        let second = debounce.schedule();

        assert!(!debounce.fire(first));
        assert!(debounce.fire(second));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debounce = TooltipDebounce::new();
        let token = debounce.schedule();
        debounce.cancel();

        assert!(!debounce.fire(token));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut debounce = TooltipDebounce::new();
        let token = debounce.schedule();

        assert!(debounce.fire(token));
        assert!(!debounce.fire(token));
    }

    #[test]
    fn test_rapid_moves_show_once() {
        let mut debounce = TooltipDebounce::new();
        let tokens: Vec<u64> = (0..10).map(|_| debounce.schedule()).collect();

        let shown = tokens.iter().filter(|t| debounce.fire(**t)).count();
        assert_eq!(shown, 1);
    }
}
