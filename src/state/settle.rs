// Settle detection for layout measurement.
// Schedules follow-up samples after a layout change so late reflow is picked up.

use std::time::{Duration, Instant};

/// Delay before the timed follow-up sample.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// When a pending sample fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// Once the clock reaches the deadline.
    At(Instant),
    /// On the next rendered frame.
    NextFrame,
}

/// Cancellable list of pending measurement samples.
///
/// Each activation replaces any samples still pending from the previous one,
/// so a stale sample never fires for a superseded layout.
#[derive(Debug, Clone, Default)]
pub struct SettleSchedule {
    pending: Vec<Trigger>,
}

impl SettleSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the delayed and frame samples following an immediate one.
    pub fn activate(&mut self, now: Instant) {
        self.cancel();
        self.pending.push(Trigger::At(now + SETTLE_DELAY));
        self.pending.push(Trigger::NextFrame);
    }

    /// Drop all pending samples.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    /// Fire timed samples whose deadline has passed. Returns how many fired.
    pub fn poll_timers(&mut self, now: Instant) -> usize {
        self.drain(|trigger| matches!(trigger, Trigger::At(deadline) if *deadline <= now))
    }

    /// Fire frame samples. Returns how many fired.
    pub fn poll_frame(&mut self) -> usize {
        self.drain(|trigger| matches!(trigger, Trigger::NextFrame))
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    fn drain(&mut self, due: impl Fn(&Trigger) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|trigger| !due(trigger));
        before - self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_schedules_two_samples() {
        let now = Instant::now();
        let mut schedule = SettleSchedule::new();
        assert!(schedule.is_idle());

        schedule.activate(now);
        assert_eq!(schedule.pending(), 2);
    }

    #[test]
    fn test_timer_fires_after_delay() {
        let now = Instant::now();
        let mut schedule = SettleSchedule::new();
        schedule.activate(now);

        assert_eq!(schedule.poll_timers(now + Duration::from_millis(10)), 0);
        assert_eq!(schedule.poll_timers(now + SETTLE_DELAY), 1);
        assert_eq!(schedule.poll_timers(now + SETTLE_DELAY * 2), 0);
        assert_eq!(schedule.pending(), 1);
    }

    #[test]
    fn test_either_order() {
        let now = Instant::now();

        let mut frame_first = SettleSchedule::new();
        frame_first.activate(now);
        assert_eq!(frame_first.poll_frame(), 1);
        assert_eq!(frame_first.poll_timers(now + SETTLE_DELAY), 1);
        assert!(frame_first.is_idle());

        let mut timer_first = SettleSchedule::new();
        timer_first.activate(now);
        assert_eq!(timer_first.poll_timers(now + SETTLE_DELAY), 1);
        assert_eq!(timer_first.poll_frame(), 1);
        assert!(timer_first.is_idle());
    }

    #[test]
    fn test_reactivation_supersedes() {
        let now = Instant::now();
        let mut schedule = SettleSchedule::new();
        schedule.activate(now);

        let later = now + Duration::from_millis(30);
        schedule.activate(later);
        assert_eq!(schedule.pending(), 2);

        // The first activation's deadline no longer fires.
        assert_eq!(schedule.poll_timers(now + SETTLE_DELAY), 0);
        assert_eq!(schedule.poll_timers(later + SETTLE_DELAY), 1);
    }

    #[test]
    fn test_cancel() {
        let now = Instant::now();
        let mut schedule = SettleSchedule::new();
        schedule.activate(now);
        schedule.cancel();

        assert_eq!(schedule.poll_frame(), 0);
        assert_eq!(schedule.poll_timers(now + SETTLE_DELAY), 0);
    }
}
