// Layout geometry and measurement.
// Horizontal placement of tab elements and the probe used to read it.

use super::motion::Lerp;

/// Horizontal placement of an element relative to the tab row's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub left: f32,
    pub width: f32,
}

impl Geometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Whether `x` falls inside this element's span.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.left && x < self.right()
    }
}

impl Lerp for Geometry {
    fn lerp(self, to: Self, t: f32) -> Self {
        Geometry {
            left: self.left.lerp(to.left, t),
            width: self.width.lerp(to.width, t),
        }
    }
}

/// Identifies the rendered element bound to one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(usize);

impl ElementHandle {
    /// Handle of the element rendered for the tab at `index`.
    pub fn for_tab(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Reads laid-out geometry of rendered tab elements.
pub trait LayoutProbe {
    /// Geometry of `element`, or `None` if it is not currently mounted.
    fn measure(&self, element: ElementHandle) -> Option<Geometry>;
}

impl<P: LayoutProbe + ?Sized> LayoutProbe for &P {
    fn measure(&self, element: ElementHandle) -> Option<Geometry> {
        (**self).measure(element)
    }
}

/// A single row of elements laid out left to right with a fixed gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowLayout {
    slots: Vec<Geometry>,
}

impl RowLayout {
    /// Lay out elements of the given widths, separated by `gap`.
    pub fn from_widths(widths: impl IntoIterator<Item = f32>, gap: f32) -> Self {
        let mut left = 0.0;
        let slots = widths
            .into_iter()
            .map(|width| {
                let slot = Geometry::new(left, width);
                left += width + gap;
                slot
            })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Right edge of the last element.
    pub fn total_width(&self) -> f32 {
        self.slots.last().map(Geometry::right).unwrap_or(0.0)
    }

    /// Index of the element under `x`, if any. Gaps hit nothing.
    pub fn hit_test(&self, x: f32) -> Option<usize> {
        self.slots.iter().position(|slot| slot.contains(x))
    }
}

impl LayoutProbe for RowLayout {
    fn measure(&self, element: ElementHandle) -> Option<Geometry> {
        self.slots.get(element.index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout_offsets() {
        let layout = RowLayout::from_widths([10.0, 6.0, 8.0], 1.0);

        assert_eq!(layout.len(), 3);
        assert_eq!(
            layout.measure(ElementHandle::for_tab(0)),
            Some(Geometry::new(0.0, 10.0))
        );
        assert_eq!(
            layout.measure(ElementHandle::for_tab(1)),
            Some(Geometry::new(11.0, 6.0))
        );
        assert_eq!(
            layout.measure(ElementHandle::for_tab(2)),
            Some(Geometry::new(18.0, 8.0))
        );
        assert_eq!(layout.total_width(), 26.0);
    }

    #[test]
    fn test_unmounted_element() {
        let layout = RowLayout::from_widths([4.0], 0.0);
        assert!(layout.measure(ElementHandle::for_tab(1)).is_none());
        assert!(RowLayout::default().measure(ElementHandle::for_tab(0)).is_none());
    }

    #[test]
    fn test_hit_test() {
        let layout = RowLayout::from_widths([4.0, 4.0], 2.0);
        assert_eq!(layout.hit_test(0.0), Some(0));
        assert_eq!(layout.hit_test(3.9), Some(0));
        assert_eq!(layout.hit_test(4.5), None);
        assert_eq!(layout.hit_test(6.0), Some(1));
        assert_eq!(layout.hit_test(10.0), None);
    }

    #[test]
    fn test_geometry_lerp() {
        let a = Geometry::new(0.0, 10.0);
        let b = Geometry::new(20.0, 4.0);
        assert_eq!(a.lerp(b, 0.5), Geometry::new(10.0, 7.0));
    }
}
