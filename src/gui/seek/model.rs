use crate::config::ArcConfig;
use crate::events::PointerEvent;
use crate::geometry::{self, ArcLayout, ArcSpan, Point};
use strum::Display as StrumDisplay;

pub type ProgressListener = Box<dyn FnMut(f32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchAction {
    pub accepted: bool,
    pub should_redraw: bool,
}

impl TouchAction {
    pub fn new(accepted: bool, should_redraw: bool) -> Self {
        Self {
            accepted,
            should_redraw,
        }
    }

    fn ignored() -> Self {
        Self::new(false, false)
    }
}

/// State of one arc control: its fixed configuration, the layout derived from
/// the current size, and the progress driven by pointer input.
pub struct ArcSeek {
    config: ArcConfig,
    span: ArcSpan,
    thumb_radius: f64,
    size: Option<(i32, i32)>,
    layout: Option<ArcLayout>,
    progress: u32,
    max: u32,
    thumb_progress: f64,
    /// Degrees from the start of the last accepted touch, or of the set progress.
    drag_offset: f64,
    phase: Phase,
    listeners: Vec<ProgressListener>,
}

impl ArcSeek {
    pub fn new(config: ArcConfig, thumb_radius: f64) -> Self {
        let span = config.span();
        let max = config.max;
        let progress = config.progress.min(max);
        let drag_offset = Self::ratio(progress as f64, max) * span.sweep();

        Self {
            config,
            span,
            thumb_radius,
            size: None,
            layout: None,
            progress,
            max,
            thumb_progress: progress as f64,
            drag_offset,
            phase: Phase::Idle,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &ArcConfig {
        &self.config
    }

    pub fn span(&self) -> ArcSpan {
        self.span
    }

    pub fn layout(&self) -> Option<&ArcLayout> {
        self.layout.as_ref()
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn thumb_progress(&self) -> f64 {
        self.thumb_progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn add_listener(&mut self, listener: impl FnMut(f32) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Recomputes the layout if the size differs from the last one seen.
    /// Returns whether anything changed.
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        if self.size == Some((width, height)) {
            return false;
        }

        let layout = ArcLayout::compute(
            width as f64,
            height as f64,
            self.config.offset,
            self.thumb_radius,
        );
        log::debug!(
            "Layout for {}x{}: center ({:.1}, {:.1}), radius {:.1}",
            width,
            height,
            layout.center.x,
            layout.center.y,
            layout.radius
        );

        self.size = Some((width, height));
        self.layout = Some(layout);
        true
    }

    pub fn set_progress(&mut self, progress: u32) {
        self.progress = progress.min(self.max);
        self.thumb_progress = self.progress as f64;
        self.drag_offset = self.progress_angle();
    }

    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.progress = self.progress.min(max);
        self.thumb_progress = self.thumb_progress.min(max as f64);
        self.drag_offset = self.progress_angle();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> TouchAction {
        match event {
            PointerEvent::Down(p) | PointerEvent::Move(p) => self.update_on_touch(p),
            PointerEvent::Up | PointerEvent::Cancel => {
                self.phase = Phase::Idle;
                TouchAction::ignored()
            }
        }
    }

    fn update_on_touch(&mut self, p: Point) -> TouchAction {
        let Some(layout) = self.layout else {
            log::trace!("Touch before first layout ignored");
            return TouchAction::ignored();
        };

        if !layout.band_contains(p) {
            log::trace!("Touch at ({:.1}, {:.1}) outside the arc band", p.x, p.y);
            return TouchAction::ignored();
        }

        let angle = geometry::angle_from_point(layout.center, p);
        let Some(offset) = self.span.offset_of(angle) else {
            log::trace!("Touch angle {:.1} outside the arc span", angle);
            return TouchAction::ignored();
        };

        if self.is_dragging() && self.is_edge_clamped(offset) {
            log::trace!(
                "Touch offset {:.1} ignored while {} at progress {}",
                offset,
                self.phase,
                self.progress
            );
            return TouchAction::ignored();
        }

        let raw = offset / self.span.sweep() * self.max as f64;
        self.progress = (raw.round() as u32).min(self.max);
        self.thumb_progress = if self.config.smooth_thumb {
            raw.clamp(0.0, self.max as f64)
        } else {
            self.progress as f64
        };
        self.drag_offset = offset;
        self.phase = Phase::Dragging;

        log::debug!("Progress {} (angle {:.1})", self.progress, angle);
        self.notify();

        TouchAction::new(true, true)
    }

    /// A drag resting within `edge_tolerance` of either end may not jump to
    /// the far half of the arc. Stops the thumb from crossing the gap (or
    /// wrapping around a full circle) when the pointer overshoots an end.
    fn is_edge_clamped(&self, offset: f64) -> bool {
        let tolerance = self.config.edge_tolerance;
        let half = self.span.sweep() / 2.0;
        let at_min = self.drag_offset <= tolerance && offset > half;
        let at_max = self.drag_offset >= self.span.sweep() - tolerance && offset < half;
        at_min || at_max
    }

    fn notify(&mut self) {
        let progress = self.progress as f32;
        for listener in &mut self.listeners {
            listener(progress);
        }
    }

    fn ratio(value: f64, max: u32) -> f64 {
        if max == 0 { 0.0 } else { value / max as f64 }
    }

    /// Degrees covered by the reported (integer) progress.
    pub fn progress_angle(&self) -> f64 {
        Self::ratio(self.progress as f64, self.max) * self.span.sweep()
    }

    pub fn fill_sweep(&self) -> f64 {
        self.progress_angle()
    }

    pub fn thumb_angle(&self) -> f64 {
        let offset = Self::ratio(self.thumb_progress, self.max) * self.span.sweep();
        self.span.angle_at(offset)
    }

    pub fn thumb_position(&self) -> Option<Point> {
        self.layout.map(|layout| layout.point_at(self.thumb_angle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const THUMB_RADIUS: f64 = 24.0;

    fn seek_with(config: ArcConfig) -> ArcSeek {
        let mut seek = ArcSeek::new(config, THUMB_RADIUS);
        seek.resize(200, 200);
        seek
    }

    fn seek() -> ArcSeek {
        seek_with(ArcConfig::default())
    }

    fn on_arc(seek: &ArcSeek, angle: f64) -> Point {
        seek.layout().unwrap().point_at(angle)
    }

    fn at_distance(seek: &ArcSeek, angle: f64, distance: f64) -> Point {
        geometry::point_from_angle(seek.layout().unwrap().center, angle, distance)
    }

    fn record(seek: &mut ArcSeek) -> Rc<RefCell<Vec<f32>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        seek.add_listener(move |p| sink.borrow_mut().push(p));
        seen
    }

    #[test]
    fn test_scenario_start_middle_stop() {
        let mut seek = seek();

        let cases = vec![(180.0, 0), (270.0, 50), (360.0, 100), (0.0, 100)];
        for (angle, expected) in cases {
            let p = on_arc(&seek, angle);
            seek.handle_pointer(PointerEvent::Up);
            let action = seek.handle_pointer(PointerEvent::Down(p));
            assert!(action.accepted, "touch at {angle}");
            assert!(action.should_redraw);
            assert_eq!(seek.progress(), expected, "touch at {angle}");
        }
    }

    #[test]
    fn test_touch_inside_band_is_ignored() {
        let mut seek = seek();
        seek.set_progress(30);
        let layout = *seek.layout().unwrap();
        let inner = layout.radius - layout.thumb_radius;

        let action = seek.handle_pointer(PointerEvent::Down(at_distance(&seek, 270.0, inner - 0.5)));
        assert_eq!(action, TouchAction::default());
        assert_eq!(seek.progress(), 30);
        assert!(!seek.is_dragging());

        let action = seek.handle_pointer(PointerEvent::Down(layout.center));
        assert!(!action.accepted);
        assert_eq!(seek.progress(), 30);
    }

    #[test]
    fn test_touch_outside_band_is_ignored() {
        let mut seek = seek();
        seek.set_progress(30);
        let layout = *seek.layout().unwrap();
        let outer = layout.radius + layout.thumb_radius;

        let action = seek.handle_pointer(PointerEvent::Down(at_distance(&seek, 270.0, outer + 0.5)));
        assert!(!action.accepted);
        assert_eq!(seek.progress(), 30);

        // band edges themselves are accepted
        let action = seek.handle_pointer(PointerEvent::Down(at_distance(&seek, 270.0, outer - 1e-9)));
        assert!(action.accepted);
        assert_eq!(seek.progress(), 50);
    }

    #[test]
    fn test_touch_outside_span_is_ignored() {
        let mut seek = seek();
        seek.set_progress(30);
        let seen = record(&mut seek);

        for angle in [10.0, 90.0, 170.0] {
            let action = seek.handle_pointer(PointerEvent::Down(on_arc(&seek, angle)));
            assert!(!action.accepted, "touch at {angle}");
        }
        assert_eq!(seek.progress(), 30);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_span_wrapping_past_zero() {
        let config = ArcConfig {
            start_angle: 300,
            sweep_angle: 120,
            ..ArcConfig::default()
        };
        let mut seek = seek_with(config);

        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 0.0)));
        assert_eq!(seek.progress(), 50);
        seek.handle_pointer(PointerEvent::Up);
        assert!(!seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 180.0))).accepted);
        assert_eq!(seek.progress(), 50);
    }

    #[test]
    fn test_touch_before_layout_is_ignored() {
        let mut seek = ArcSeek::new(ArcConfig::default(), THUMB_RADIUS);
        let action = seek.handle_pointer(PointerEvent::Down(Point::new(34.0, 100.0)));
        assert!(!action.accepted);
        assert_eq!(seek.thumb_position(), None);
    }

    #[test]
    fn test_edge_clamp_at_min_on_full_circle() {
        let config = ArcConfig {
            sweep_angle: 360,
            ..ArcConfig::default()
        };
        let mut seek = seek_with(config);

        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 181.0)));
        assert_eq!(seek.progress(), 0);
        assert!(seek.is_dragging());

        // wrapping back past the start would read as ~97
        let action = seek.handle_pointer(PointerEvent::Move(on_arc(&seek, 170.0)));
        assert!(!action.accepted);
        assert_eq!(seek.progress(), 0);

        let action = seek.handle_pointer(PointerEvent::Move(on_arc(&seek, 184.0)));
        assert!(action.accepted);
        assert_eq!(seek.progress(), 1);
    }

    #[test]
    fn test_edge_clamp_at_max() {
        let mut seek = seek();

        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 0.0)));
        assert_eq!(seek.progress(), 100);

        let action = seek.handle_pointer(PointerEvent::Move(on_arc(&seek, 240.0)));
        assert!(!action.accepted);
        assert_eq!(seek.progress(), 100);

        let action = seek.handle_pointer(PointerEvent::Move(on_arc(&seek, 358.2)));
        assert!(action.accepted);
        assert_eq!(seek.progress(), 99);
    }

    #[test]
    fn test_coarse_steps_can_leave_either_end() {
        let config = ArcConfig {
            max: 10,
            ..ArcConfig::default()
        };
        let mut seek = seek_with(config);

        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 183.0)));
        assert_eq!(seek.progress(), 0);

        let mut last = 0;
        for (angle, expected) in [(186.0, 0), (190.0, 1), (270.0, 5)] {
            let action = seek.handle_pointer(PointerEvent::Move(on_arc(&seek, angle)));
            assert!(action.accepted, "move to {angle}");
            assert_eq!(seek.progress(), expected, "move to {angle}");
            assert!(seek.progress() >= last);
            last = seek.progress();
        }

        seek.handle_pointer(PointerEvent::Up);
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 357.0)));
        assert_eq!(seek.progress(), 10);
        for (angle, expected) in [(354.0, 10), (350.0, 9), (270.0, 5)] {
            let action = seek.handle_pointer(PointerEvent::Move(on_arc(&seek, angle)));
            assert!(action.accepted, "move to {angle}");
            assert_eq!(seek.progress(), expected, "move to {angle}");
        }
    }

    #[test]
    fn test_edge_clamp_only_while_dragging() {
        let mut seek = seek();
        assert_eq!(seek.progress(), 0);

        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 270.0)));
        assert_eq!(seek.progress(), 50);

        seek.handle_pointer(PointerEvent::Cancel);
        assert_eq!(seek.phase(), Phase::Idle);
        seek.set_progress(0);
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 315.0)));
        assert_eq!(seek.progress(), 75);
    }

    #[test]
    fn test_release_keeps_progress() {
        let mut seek = seek();
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 225.0)));
        assert_eq!(seek.progress(), 25);

        let action = seek.handle_pointer(PointerEvent::Up);
        assert!(!action.accepted);
        assert_eq!(seek.progress(), 25);
        assert!(!seek.is_dragging());
    }

    #[test]
    fn test_cancel_after_release_is_silent() {
        let mut seek = seek();
        let seen = record(&mut seek);

        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 270.0)));
        let release = seek.handle_pointer(PointerEvent::Up);
        let cancel = seek.handle_pointer(PointerEvent::Cancel);

        assert_eq!(release, TouchAction::default());
        assert_eq!(cancel, TouchAction::default());
        assert_eq!(seek.phase(), Phase::Idle);
        assert_eq!(seek.progress(), 50);
        assert_eq!(*seen.borrow(), vec![50.0]);
    }

    #[test]
    fn test_listener_fires_on_every_accepted_event() {
        let mut seek = seek();
        let seen = record(&mut seek);
        let p = on_arc(&seek, 270.0);

        seek.handle_pointer(PointerEvent::Down(p));
        seek.handle_pointer(PointerEvent::Move(p));
        seek.handle_pointer(PointerEvent::Move(on_arc(&seek, 100.0)));
        seek.handle_pointer(PointerEvent::Up);

        assert_eq!(*seen.borrow(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_programmatic_progress_does_not_notify() {
        let mut seek = seek();
        let seen = record(&mut seek);
        seek.set_progress(40);
        seek.set_progress(400);
        assert_eq!(seek.progress(), 100);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_smooth_thumb_keeps_fraction() {
        let mut seek = seek();
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 240.0)));

        assert_eq!(seek.progress(), 33);
        assert!((seek.thumb_progress() - 100.0 / 3.0).abs() < 1e-6);
        assert!((seek.thumb_angle() - 240.0).abs() < 1e-6);
        assert!((seek.fill_sweep() - 33.0 / 100.0 * 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_discrete_thumb_snaps() {
        let config = ArcConfig {
            smooth_thumb: false,
            ..ArcConfig::default()
        };
        let mut seek = seek_with(config);
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 240.0)));

        assert_eq!(seek.progress(), 33);
        assert_eq!(seek.thumb_progress(), 33.0);
        assert!((seek.thumb_angle() - (180.0 + 0.33 * 180.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fill_sweep_tracks_progress() {
        let mut seek = seek();
        for p in 0..=100 {
            seek.set_progress(p);
            let expected = p as f64 / 100.0 * 180.0;
            assert!((seek.fill_sweep() - expected).abs() < 1e-9, "progress {p}");
        }
    }

    #[test]
    fn test_zero_max() {
        let mut seek = seek();
        seek.set_progress(60);
        seek.set_max(0);
        assert_eq!(seek.progress(), 0);
        assert_eq!(seek.fill_sweep(), 0.0);
        assert_eq!(seek.thumb_angle(), 180.0);
    }

    #[test]
    fn test_set_max_rescales_touch_mapping() {
        let mut seek = seek();
        seek.set_max(10);
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 270.0)));
        assert_eq!(seek.progress(), 5);
    }

    #[test]
    fn test_resize_keeps_thumb_on_arc() {
        let mut seek = seek();
        seek.handle_pointer(PointerEvent::Down(on_arc(&seek, 243.0)));
        let angle_before = seek.thumb_angle();
        assert_eq!(seek.layout().unwrap().radius, 66.0);

        assert!(!seek.resize(200, 200));
        assert!(seek.resize(400, 400));

        let layout = *seek.layout().unwrap();
        assert_eq!(layout.radius, 166.0);
        assert_eq!(layout.center, Point::new(200.0, 200.0));

        let thumb = seek.thumb_position().unwrap();
        assert!((layout.center.distance_to(thumb) - layout.radius).abs() < 1e-9);
        assert_eq!(seek.thumb_angle(), angle_before);
        assert_eq!(seek.progress(), 35);
    }
}
