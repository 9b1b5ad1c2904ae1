// Interpolation primitives.
// Ease-out and spring curves, and a retargetable tween over interpolable values.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

/// Duration of highlight and underline movement.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(300);

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Damped spring described by a nominal duration and a bounce factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub duration: Duration,
    /// 0.0 settles without overshoot, values toward 1.0 oscillate longer.
    pub bounce: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(400),
            bounce: 0.2,
        }
    }
}

impl Spring {
    /// Normalized displacement toward the target after `elapsed`.
    /// May briefly exceed 1.0 while bouncing; exactly 1.0 once `duration` has passed.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }

        let t = elapsed.as_secs_f32();
        let omega = 2.0 * PI / self.duration.as_secs_f32();
        let zeta = (1.0 - self.bounce).clamp(0.05, 1.0);

        if zeta >= 1.0 {
            1.0 - (-omega * t).exp() * (1.0 + omega * t)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            1.0 - envelope * ((damped * t).cos() + (zeta * omega / damped) * (damped * t).sin())
        }
    }
}

/// Ease-out curve close to CSS `cubic-bezier(0, 0, 0.2, 1)`.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Timing curve of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    EaseOut(Duration),
    Spring(Spring),
}

impl Curve {
    pub fn duration(&self) -> Duration {
        match self {
            Curve::EaseOut(duration) => *duration,
            Curve::Spring(spring) => spring.duration,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f32 {
        match self {
            Curve::EaseOut(duration) => {
                if duration.is_zero() {
                    1.0
                } else {
                    ease_out(elapsed.as_secs_f32() / duration.as_secs_f32())
                }
            }
            Curve::Spring(spring) => spring.progress(elapsed),
        }
    }
}

/// A value that moves continuously toward its latest target.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    started: Option<Instant>,
    curve: Curve,
}

impl<T: Lerp + PartialEq> Tween<T> {
    /// Create a tween resting at `value`.
    pub fn new(value: T, curve: Curve) -> Self {
        Self {
            from: value,
            to: value,
            started: None,
            curve,
        }
    }

    /// Start moving toward `target` from wherever the value is at `now`.
    pub fn retarget(&mut self, target: T, now: Instant) {
        if target == self.to {
            return;
        }
        self.from = self.value(now);
        self.to = target;
        self.started = Some(now);
    }

    /// Jump to `value` without animating.
    pub fn snap(&mut self, value: T) {
        self.from = value;
        self.to = value;
        self.started = None;
    }

    /// Interpolated value at `now`.
    pub fn value(&self, now: Instant) -> T {
        match self.started {
            Some(started) => {
                let progress = self.curve.progress(now.saturating_duration_since(started));
                self.from.lerp(self.to, progress)
            }
            None => self.to,
        }
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        match self.started {
            Some(started) => now.saturating_duration_since(started) >= self.curve.duration(),
            None => true,
        }
    }
}
