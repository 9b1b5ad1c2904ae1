// Widget state module.
// Handles tab bar selection, layout measurement, and animation state.

pub mod geometry;
pub mod motion;
pub mod settle;
pub mod tab_bar;
pub mod transition;

pub use geometry::{ElementHandle, Geometry, LayoutProbe, RowLayout};
pub use motion::{Curve, Lerp, Spring, Tween};
pub use settle::{SETTLE_DELAY, SettleSchedule};
pub use tab_bar::{ContentLayer, ContentRegion, Tab, TabBar};
pub use transition::{ContentTransition, ContentVisual, Direction, Layer, Phase};
