//! Angle and layout math for the arc control.
//!
//! Angles are in degrees, measured clockwise from the positive x axis in
//! screen coordinates (y grows downwards). This is the same convention cairo
//! uses for `arc`, so values can be handed to the renderer after a
//! `to_radians()`.

/// Slack for float noise when testing whether an angle sits on an arc endpoint.
pub const ANGLE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_center(center: Point, half_width: f64) -> Self {
        Self {
            x: center.x - half_width,
            y: center.y - half_width,
            width: half_width * 2.0,
            height: half_width * 2.0,
        }
    }
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of `p` as seen from `center`. The center itself maps to 0.
pub fn angle_from_point(center: Point, p: Point) -> f64 {
    let (dx, dy) = (p.x - center.x, p.y - center.y);
    normalize_degrees(dy.atan2(dx).to_degrees())
}

pub fn point_from_angle(center: Point, angle: f64, radius: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// The angular extent of the arc: where it starts and how far it sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    start: f64,
    sweep: f64,
}

impl ArcSpan {
    /// `start` is wrapped into `[0, 360)`; `sweep` must already be in `(0, 360]`.
    pub fn new(start: f64, sweep: f64) -> Self {
        Self {
            start: normalize_degrees(start),
            sweep,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn stop(&self) -> f64 {
        normalize_degrees(self.start + self.sweep)
    }

    /// Distance travelled from the start to reach `angle`, or `None` if the
    /// angle lies in the gap the arc does not cover.
    pub fn offset_of(&self, angle: f64) -> Option<f64> {
        let delta = normalize_degrees(angle - self.start);
        if delta <= self.sweep + ANGLE_EPSILON {
            Some(delta.min(self.sweep))
        } else if 360.0 - delta <= ANGLE_EPSILON {
            // just short of the start
            Some(0.0)
        } else {
            None
        }
    }

    pub fn angle_at(&self, offset: f64) -> f64 {
        normalize_degrees(self.start + offset)
    }
}

/// Everything that depends on the control's on-screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLayout {
    pub center: Point,
    pub radius: f64,
    pub bounds: Rect,
    pub thumb_radius: f64,
}

impl ArcLayout {
    /// Smallest radius a layout will report, so a tiny widget still has a drawable arc.
    pub const MIN_RADIUS: f64 = 1.0;

    /// The arc is inset by `offset` plus the thumb radius so the thumb never
    /// leaves the widget bounds.
    pub fn compute(width: f64, height: f64, offset: f64, thumb_radius: f64) -> Self {
        let half = width.min(height).max(0.0) / 2.0;
        let radius = (half - (offset + thumb_radius)).max(Self::MIN_RADIUS);
        let center = Point::new(half, half);

        Self {
            center,
            radius,
            bounds: Rect::from_center(center, radius),
            thumb_radius,
        }
    }

    pub fn band_contains(&self, p: Point) -> bool {
        let dist = self.center.distance_to(p);
        dist >= self.radius - self.thumb_radius && dist <= self.radius + self.thumb_radius
    }

    pub fn point_at(&self, angle: f64) -> Point {
        point_from_angle(self.center, angle, self.radius)
    }
}
