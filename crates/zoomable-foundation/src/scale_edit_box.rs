//! Handle-based resize box.
//!
//! Four corner handles resize the box while the opposite corner stays fixed
//! at its pointer-down position; a touch inside the box moves it. The box owns
//! its state outright, so there is no mutation arbiter here: only one touch
//! region is active at a time and every write happens on the event thread.

use zoomable_geometry::{GraphicsLayer, Point, Rect};

use crate::config::{HandleBoxConfig, ViewConfiguration};
use crate::nodes::input::gestures::{DragEvent, DragGestureRecognizer};
use crate::nodes::input::types::PointerEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchRegion {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Inside,
    None,
}

/// Current rectangle plus the snapshot taken at pointer-down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleRect {
    pub rect: Rect,
    pub temp: Rect,
}

#[derive(Debug)]
pub struct ScaleEditBox {
    config: HandleBoxConfig,
    /// Element bounds at scale 1; scale is measured against this.
    original: Rect,
    handles: HandleRect,
    touch_region: TouchRegion,
    down_position: Point,
    /// Sum of drag deltas since the down; survives pointer hand-off.
    drag_offset: Point,
    layer: GraphicsLayer,
    drag: DragGestureRecognizer,
}

impl ScaleEditBox {
    pub fn new(bounds: Rect, config: HandleBoxConfig) -> Self {
        Self {
            config,
            original: bounds,
            handles: HandleRect {
                rect: bounds,
                temp: bounds,
            },
            touch_region: TouchRegion::None,
            down_position: Point::ZERO,
            drag_offset: Point::ZERO,
            layer: GraphicsLayer::default(),
            drag: DragGestureRecognizer::new(ViewConfiguration::default().with_density(config.density))
                .await_touch_slop(false),
        }
    }

    pub fn rect(&self) -> Rect {
        self.handles.rect
    }

    pub fn handles(&self) -> HandleRect {
        self.handles
    }

    pub fn touch_region(&self) -> TouchRegion {
        self.touch_region
    }

    pub fn layer(&self) -> GraphicsLayer {
        self.layer
    }

    /// Classify a touch against the corner handles, then the interior.
    pub fn hit_test(&self, position: Point) -> TouchRegion {
        let rect = self.handles.rect;
        let threshold = self.config.touch_threshold_px();
        let threshold_squared = threshold * threshold;

        let corners = [
            (rect.top_left(), TouchRegion::TopLeft),
            (rect.top_right(), TouchRegion::TopRight),
            (rect.bottom_left(), TouchRegion::BottomLeft),
            (rect.bottom_right(), TouchRegion::BottomRight),
        ];
        for (corner, region) in corners {
            if position.distance_squared_to(corner) < threshold_squared {
                return region;
            }
        }

        if rect.contains(position.x, position.y) {
            TouchRegion::Inside
        } else {
            TouchRegion::None
        }
    }

    /// Feed one pointer batch. Returns the new layer when the box changed.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<GraphicsLayer> {
        let mut changed = None;
        for drag_event in self.drag.on_event(event) {
            match drag_event {
                DragEvent::Start { position, .. } => self.on_down(position),
                DragEvent::Move { delta, .. } => {
                    if self.drag_by(delta) {
                        changed = Some(self.layer);
                    }
                }
                DragEvent::End { .. } | DragEvent::Cancel => self.on_up(),
            }
        }
        changed
    }

    pub fn on_down(&mut self, position: Point) {
        self.handles.temp = self.handles.rect;
        self.down_position = position;
        self.drag_offset = Point::ZERO;
        self.touch_region = self.hit_test(position);
        log::debug!("scale box: down at {position:?} -> {:?}", self.touch_region);
    }

    /// Move the active handle to `position`, measured against the down.
    /// Returns whether the rectangle changed.
    pub fn on_move(&mut self, position: Point) -> bool {
        self.drag_offset = position - self.down_position;
        self.apply_drag()
    }

    /// Move the active handle by a delta since the previous move.
    pub fn drag_by(&mut self, delta: Point) -> bool {
        self.drag_offset += delta;
        self.apply_drag()
    }

    fn apply_drag(&mut self) -> bool {
        let temp = self.handles.temp;
        let min = self.config.min_dimension_px();
        let drag = self.drag_offset;

        let rect = match self.touch_region {
            TouchRegion::None => return false,
            TouchRegion::TopLeft => Rect::from_ltrb(
                (temp.left() + drag.x).min(temp.right() - min),
                (temp.top() + drag.y).min(temp.bottom() - min),
                temp.right(),
                temp.bottom(),
            ),
            TouchRegion::TopRight => Rect::from_ltrb(
                temp.left(),
                (temp.top() + drag.y).min(temp.bottom() - min),
                (temp.right() + drag.x).max(temp.left() + min),
                temp.bottom(),
            ),
            TouchRegion::BottomLeft => Rect::from_ltrb(
                (temp.left() + drag.x).min(temp.right() - min),
                temp.top(),
                temp.right(),
                (temp.bottom() + drag.y).max(temp.top() + min),
            ),
            TouchRegion::BottomRight => Rect::from_ltrb(
                temp.left(),
                temp.top(),
                (temp.right() + drag.x).max(temp.left() + min),
                (temp.bottom() + drag.y).max(temp.top() + min),
            ),
            TouchRegion::Inside => {
                // Interior drags arrive in the scaled layer's local space.
                let (scale_x, scale_y) = self.scale_of(temp);
                temp.translate(drag.x * scale_x, drag.y * scale_y)
            }
        };

        if rect == self.handles.rect {
            return false;
        }
        self.handles.rect = rect;
        self.update_layer();
        true
    }

    pub fn on_up(&mut self) {
        self.handles.temp = self.handles.rect;
        self.drag_offset = Point::ZERO;
        self.touch_region = TouchRegion::None;
    }

    fn scale_of(&self, rect: Rect) -> (f32, f32) {
        let scale_x = if self.original.width > 0.0 {
            rect.width / self.original.width
        } else {
            1.0
        };
        let scale_y = if self.original.height > 0.0 {
            rect.height / self.original.height
        } else {
            1.0
        };
        (scale_x, scale_y)
    }

    /// Scale is the size ratio; translation is the corner shift plus half the
    /// size change, since the layer scales around its center.
    fn update_layer(&mut self) {
        let rect = self.handles.rect;
        let (scale_x, scale_y) = self.scale_of(rect);
        self.layer = GraphicsLayer {
            scale_x,
            scale_y,
            translation_x: rect.left() - self.original.left()
                + (rect.width - self.original.width) / 2.0,
            translation_y: rect.top() - self.original.top()
                + (rect.height - self.original.height) / 2.0,
            rotation_z: 0.0,
        };
        log::trace!("scale box: {rect:?} -> {:?}", self.layer);
    }
}
