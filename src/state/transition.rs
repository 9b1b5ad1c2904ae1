// Content transition state machine.
// Drives the slide/fade/blur exchange between outgoing and incoming tab content.

use std::time::Instant;

use super::motion::{Lerp, Spring};

/// Horizontal travel of entering and exiting content, in layout units.
pub const SLIDE_DISTANCE: f32 = 300.0;

/// Blur radius of content while off stage.
pub const BLUR_RADIUS: f32 = 4.0;

/// Which way the most recent selection moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    /// Direction of travel from index `from` to index `to`.
    pub fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::None,
        }
    }

    pub fn sign(&self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }

    fn factor(&self) -> f32 {
        f32::from(self.sign())
    }
}

/// Visual properties of one content layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentVisual {
    /// Horizontal offset in layout units.
    pub x: f32,
    pub opacity: f32,
    pub blur: f32,
}

impl ContentVisual {
    /// Fully on stage.
    pub const ACTIVE: ContentVisual = ContentVisual {
        x: 0.0,
        opacity: 1.0,
        blur: 0.0,
    };

    /// Where incoming content starts.
    pub fn initial(direction: Direction) -> Self {
        Self {
            x: SLIDE_DISTANCE * direction.factor(),
            opacity: 0.0,
            blur: BLUR_RADIUS,
        }
    }

    /// Where outgoing content ends.
    pub fn exit(direction: Direction) -> Self {
        Self {
            x: -SLIDE_DISTANCE * direction.factor(),
            opacity: 0.0,
            blur: BLUR_RADIUS,
        }
    }
}

impl Lerp for ContentVisual {
    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            x: self.x.lerp(to.x, t),
            opacity: self.opacity.lerp(to.opacity, t).clamp(0.0, 1.0),
            blur: self.blur.lerp(to.blur, t).max(0.0),
        }
    }
}

/// Transition phase. Selections are only accepted while `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Incoming content is animating in with nothing leaving.
    Entering,
    /// Outgoing content is animating out while incoming content enters.
    Exiting,
}

/// A layer whose animation can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    key: usize,
    direction: Direction,
    started: Instant,
    done: bool,
}

impl Animation {
    fn new(key: usize, direction: Direction, started: Instant) -> Self {
        Self {
            key,
            direction,
            started,
            done: false,
        }
    }
}

/// Exchange of content between two keys, advanced by `start` and `complete` events.
#[derive(Debug, Clone)]
pub struct ContentTransition {
    spring: Spring,
    phase: Phase,
    incoming: Option<Animation>,
    outgoing: Option<Animation>,
}

impl Default for ContentTransition {
    fn default() -> Self {
        Self::new(Spring::default())
    }
}

impl ContentTransition {
    pub fn new(spring: Spring) -> Self {
        Self {
            spring,
            phase: Phase::Idle,
            incoming: None,
            outgoing: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Begin exchanging `outgoing` for `incoming`. Either side may be absent.
    pub fn start(
        &mut self,
        incoming: Option<usize>,
        outgoing: Option<usize>,
        direction: Direction,
        now: Instant,
    ) {
        self.incoming = incoming.map(|key| Animation::new(key, direction, now));
        self.outgoing = outgoing.map(|key| Animation::new(key, direction, now));
        self.phase = match (&self.incoming, &self.outgoing) {
            (_, Some(_)) => Phase::Exiting,
            (Some(_), None) => Phase::Entering,
            (None, None) => Phase::Idle,
        };
    }

    /// Mark a layer's animation as finished.
    ///
    /// Only the exit completion ends an exchange; an entry completion ends
    /// the transition only when nothing is leaving.
    pub fn complete(&mut self, layer: Layer) {
        match layer {
            Layer::Exit => {
                self.outgoing = None;
                if self.phase == Phase::Exiting {
                    self.phase = Phase::Idle;
                }
            }
            Layer::Enter => {
                if let Some(incoming) = self.incoming.as_mut() {
                    incoming.done = true;
                }
                if self.phase == Phase::Entering {
                    self.phase = Phase::Idle;
                }
            }
        }
    }

    /// Complete every layer whose spring has run its course by `now`.
    pub fn advance(&mut self, now: Instant) {
        let duration = self.spring.duration;
        let finished =
            move |anim: &Animation| now.saturating_duration_since(anim.started) >= duration;

        if self.incoming.is_some_and(|a| !a.done && finished(&a)) {
            self.complete(Layer::Enter);
        }
        if self.outgoing.is_some_and(|a| finished(&a)) {
            self.complete(Layer::Exit);
        }
    }

    /// Drop all layers and return to idle.
    pub fn clear(&mut self) {
        self.incoming = None;
        self.outgoing = None;
        self.phase = Phase::Idle;
    }

    /// Key and visual of the entering layer at `now`.
    pub fn incoming(&self, now: Instant) -> Option<(usize, ContentVisual)> {
        self.incoming.map(|anim| {
            if anim.done {
                return (anim.key, ContentVisual::ACTIVE);
            }
            let progress = self.spring.progress(now.saturating_duration_since(anim.started));
            let visual = ContentVisual::initial(anim.direction).lerp(ContentVisual::ACTIVE, progress);
            (anim.key, visual)
        })
    }

    /// Key and visual of the exiting layer at `now`.
    pub fn outgoing(&self, now: Instant) -> Option<(usize, ContentVisual)> {
        self.outgoing.map(|anim| {
            let progress = self.spring.progress(now.saturating_duration_since(anim.started));
            let visual = ContentVisual::ACTIVE.lerp(ContentVisual::exit(anim.direction), progress);
            (anim.key, visual)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SETTLED: Duration = Duration::from_millis(400);

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(0, 2), Direction::Forward);
        assert_eq!(Direction::between(2, 0), Direction::Backward);
        assert_eq!(Direction::between(1, 1), Direction::None);
        assert_eq!(Direction::Forward.sign(), 1);
        assert_eq!(Direction::Backward.sign(), -1);
    }

    #[test]
    fn test_offsets_follow_direction() {
        assert_eq!(ContentVisual::initial(Direction::Forward).x, 300.0);
        assert_eq!(ContentVisual::exit(Direction::Forward).x, -300.0);
        assert_eq!(ContentVisual::initial(Direction::Backward).x, -300.0);
        assert_eq!(ContentVisual::exit(Direction::Backward).x, 300.0);
        assert_eq!(ContentVisual::initial(Direction::None).x, 0.0);
    }

    #[test]
    fn test_exchange_lifecycle() {
        let now = Instant::now();
        let mut transition = ContentTransition::default();
        assert_eq!(transition.phase(), Phase::Idle);

        transition.start(Some(2), Some(0), Direction::Forward, now);
        assert_eq!(transition.phase(), Phase::Exiting);
        assert!(transition.is_animating());

        let (key, visual) = transition.incoming(now).unwrap();
        assert_eq!(key, 2);
        assert_eq!(visual.x, 300.0);
        assert_eq!(visual.opacity, 0.0);

        let (key, visual) = transition.outgoing(now).unwrap();
        assert_eq!(key, 0);
        assert_eq!(visual, ContentVisual::ACTIVE);

        transition.advance(now + Duration::from_millis(100));
        assert!(transition.is_animating());

        transition.advance(now + SETTLED);
        assert_eq!(transition.phase(), Phase::Idle);
        assert!(transition.outgoing(now + SETTLED).is_none());
        assert_eq!(
            transition.incoming(now + SETTLED),
            Some((2, ContentVisual::ACTIVE))
        );
    }

    #[test]
    fn test_entry_completion_does_not_end_exchange() {
        let now = Instant::now();
        let mut transition = ContentTransition::default();
        transition.start(Some(1), Some(0), Direction::Forward, now);

        transition.complete(Layer::Enter);
        assert_eq!(transition.phase(), Phase::Exiting);

        transition.complete(Layer::Exit);
        assert_eq!(transition.phase(), Phase::Idle);
    }

    #[test]
    fn test_entry_only() {
        let now = Instant::now();
        let mut transition = ContentTransition::default();
        transition.start(Some(0), None, Direction::None, now);
        assert_eq!(transition.phase(), Phase::Entering);

        let (_, visual) = transition.incoming(now).unwrap();
        assert_eq!(visual.x, 0.0);
        assert_eq!(visual.blur, BLUR_RADIUS);

        transition.complete(Layer::Enter);
        assert_eq!(transition.phase(), Phase::Idle);
    }

    #[test]
    fn test_nothing_to_animate() {
        let mut transition = ContentTransition::default();
        transition.start(None, None, Direction::Forward, Instant::now());
        assert_eq!(transition.phase(), Phase::Idle);
    }

    #[test]
    fn test_outgoing_fades_out() {
        let now = Instant::now();
        let mut transition = ContentTransition::default();
        transition.start(Some(0), Some(1), Direction::Backward, now);

        let (_, early) = transition.outgoing(now + Duration::from_millis(50)).unwrap();
        let (_, late) = transition.outgoing(now + Duration::from_millis(300)).unwrap();
        assert!(late.opacity < early.opacity);
        assert!(late.x > early.x);
        assert!(late.x > 0.0);
    }

    #[test]
    fn test_clear() {
        let now = Instant::now();
        let mut transition = ContentTransition::default();
        transition.start(Some(1), Some(0), Direction::Forward, now);
        transition.clear();
        assert!(!transition.is_animating());
        assert!(transition.incoming(now).is_none());
    }
}
