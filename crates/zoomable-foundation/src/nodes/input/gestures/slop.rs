//! Touch slop accumulation shared by the drag and transform recognizers.

use zoomable_geometry::Point;

use crate::nodes::input::types::PointerInputChange;

/// Axis constraint for slop detection and drag output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn main_axis(self, offset: Point) -> f32 {
        match self {
            Orientation::Horizontal => offset.x,
            Orientation::Vertical => offset.y,
        }
    }

    fn cross_axis(self, offset: Point) -> f32 {
        match self {
            Orientation::Horizontal => offset.y,
            Orientation::Vertical => offset.x,
        }
    }

    fn compose(self, main: f32, cross: f32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }

    /// Drops the cross-axis component of `offset`.
    pub fn project(self, offset: Point) -> Point {
        self.compose(self.main_axis(offset), 0.0)
    }
}

/// Accumulates per-pointer motion until it crosses the slop threshold.
///
/// Without an orientation the Euclidean length of the accumulated vector is
/// compared against the threshold; with one, only the main-axis component.
#[derive(Debug, Clone, Default)]
pub struct TouchSlopDetector {
    orientation: Option<Orientation>,
    total_position_change: Point,
}

impl TouchSlopDetector {
    pub fn new(orientation: Option<Orientation>) -> Self {
        Self {
            orientation,
            total_position_change: Point::ZERO,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn total_position_change(&self) -> Point {
        self.total_position_change
    }

    /// Adds the movement of `change` and returns the post-slop offset once the
    /// accumulated motion reaches `touch_slop`.
    pub fn add_pointer_input_change(
        &mut self,
        change: &PointerInputChange,
        touch_slop: f32,
    ) -> Option<Point> {
        self.add_position_change(change.position - change.previous_position, touch_slop)
    }

    pub fn add_position_change(&mut self, position_change: Point, touch_slop: f32) -> Option<Point> {
        self.total_position_change += position_change;

        let in_direction = match self.orientation {
            None => self.total_position_change.get_distance(),
            Some(orientation) => orientation.main_axis(self.total_position_change).abs(),
        };

        if in_direction >= touch_slop {
            Some(self.post_slop_offset(touch_slop, in_direction))
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.total_position_change = Point::ZERO;
    }

    /// The accumulated motion minus a slop-length vector in the direction of
    /// motion.
    fn post_slop_offset(&self, touch_slop: f32, in_direction: f32) -> Point {
        let total = self.total_position_change;
        match self.orientation {
            None => {
                if in_direction <= 0.0 {
                    return Point::ZERO;
                }
                total - total / in_direction * touch_slop
            }
            Some(orientation) => {
                let main = orientation.main_axis(total);
                let final_main = main - main.signum() * touch_slop;
                orientation.compose(final_main, orientation.cross_axis(total))
            }
        }
    }
}
