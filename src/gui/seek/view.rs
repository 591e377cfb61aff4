use super::model::ArcSeek;
use super::{CENTER_MARKER_RADIUS, GRADIENT_STEP_DEG, THUMB_FACE_COLOR, THUMB_INK_COLOR};
use crate::config::ArcConfig;
use crate::geometry::{ArcLayout, Point};
use crate::gui::theme::SeekColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::{LinSrgba, Mix, Srgba};
use std::f64::consts::PI;

/// The draggable marker. Either a user image or a smiley drawn in place.
pub struct Thumb {
    pixbuf: Option<Pixbuf>,
    radius: f64,
}

impl Thumb {
    pub fn builtin(size: f64) -> Self {
        Self {
            pixbuf: None,
            radius: size / 2.0,
        }
    }

    pub fn load(config: &ArcConfig) -> Self {
        let size = config.thumb_size;
        config
            .thumb_image
            .as_ref()
            .and_then(|path| {
                Pixbuf::from_file_at_scale(path, size as i32, size as i32, true)
                    .inspect_err(|e| {
                        log::warn!("Failed to load thumb image {}: {}", path.display(), e)
                    })
                    .ok()
            })
            .map(|pixbuf| Self {
                radius: pixbuf.width() as f64 / 2.0,
                pixbuf: Some(pixbuf),
            })
            .unwrap_or_else(|| Self::builtin(size))
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn draw(&self, cr: &Context, at: Point) -> Result<(), cairo::Error> {
        match &self.pixbuf {
            Some(pixbuf) => self.draw_image(cr, pixbuf, at),
            None => self.draw_smiley(cr, at),
        }
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf, at: Point) -> Result<(), cairo::Error> {
        let (w, h) = (pixbuf.width() as f64, pixbuf.height() as f64);
        cr.save()?;
        cr.set_source_pixbuf(pixbuf, at.x - w / 2.0, at.y - h / 2.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_smiley(&self, cr: &Context, at: Point) -> Result<(), cairo::Error> {
        let r = self.radius;
        let (fr, fg, fb) = THUMB_FACE_COLOR;
        let (ir, ig, ib) = THUMB_INK_COLOR;

        cr.save()?;
        cr.new_path();
        cr.arc(at.x, at.y, r, 0.0, 2.0 * PI);
        cr.set_source_rgb(fr, fg, fb);
        cr.fill_preserve()?;
        cr.set_source_rgb(ir, ig, ib);
        cr.set_line_width((r * 0.08).max(1.0));
        cr.stroke()?;

        for dx in [-0.35, 0.35] {
            cr.arc(at.x + dx * r, at.y - 0.25 * r, r * 0.1, 0.0, 2.0 * PI);
            cr.fill()?;
        }

        cr.arc(at.x, at.y, r * 0.55, 0.15 * PI, 0.85 * PI);
        cr.stroke()?;
        cr.restore()
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Color of the sweep gradient at `offset` degrees into an arc of `sweep` degrees.
pub fn gradient_color(colors: &SeekColors, offset: f64, sweep: f64) -> Srgba<f64> {
    let t = if sweep > 0.0 {
        (offset / sweep).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let start: LinSrgba<f64> = colors.fill_start.into_linear();
    let end: LinSrgba<f64> = colors.fill_end.into_linear();
    Srgba::from_linear(start.mix(end, t))
}

fn arc_path(cr: &Context, layout: &ArcLayout, from: f64, to: f64) {
    cr.new_path();
    cr.arc(
        layout.center.x,
        layout.center.y,
        layout.radius,
        from.to_radians(),
        to.to_radians(),
    );
}

fn draw_track(
    cr: &Context,
    seek: &ArcSeek,
    layout: &ArcLayout,
    colors: &SeekColors,
) -> Result<(), cairo::Error> {
    let span = seek.span();
    set_color(cr, colors.base);
    cr.set_line_width(seek.config().track_width);
    arc_path(cr, layout, span.start(), span.start() + span.sweep());
    cr.stroke()
}

/// Strokes the filled part slice by slice, each slice taking the gradient
/// color of its midpoint. Slices overlap slightly so no seams show.
fn draw_fill(
    cr: &Context,
    seek: &ArcSeek,
    layout: &ArcLayout,
    colors: &SeekColors,
) -> Result<(), cairo::Error> {
    let span = seek.span();
    let fill = seek.fill_sweep();
    cr.set_line_width(seek.config().fill_width);

    let mut offset = 0.0;
    while offset < fill {
        let end = (offset + GRADIENT_STEP_DEG).min(fill);
        let overlap = (end + GRADIENT_STEP_DEG / 4.0).min(fill);
        set_color(
            cr,
            gradient_color(colors, (offset + end) / 2.0, span.sweep()),
        );
        arc_path(cr, layout, span.start() + offset, span.start() + overlap);
        cr.stroke()?;
        offset = end;
    }
    Ok(())
}

fn draw_center_marker(
    cr: &Context,
    layout: &ArcLayout,
    colors: &SeekColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.base);
    cr.new_path();
    cr.arc(
        layout.center.x,
        layout.center.y,
        CENTER_MARKER_RADIUS,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

fn draw_label(
    cr: &Context,
    seek: &ArcSeek,
    layout: &ArcLayout,
    colors: &SeekColors,
) -> Result<(), cairo::Error> {
    let text = seek.progress().to_string();
    set_color(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(seek.config().text_size);

    let ext = cr.text_extents(&text)?;
    cr.move_to(
        layout.center.x - (ext.width() / 2.0 + ext.x_bearing()),
        layout.center.y - (ext.height() / 2.0 + ext.y_bearing()),
    );
    cr.show_text(&text)
}

/// Paints the whole control. Does nothing until the first layout.
pub fn draw(
    cr: &Context,
    seek: &ArcSeek,
    thumb: &Thumb,
    colors: &SeekColors,
) -> Result<(), cairo::Error> {
    let Some(layout) = seek.layout() else {
        return Ok(());
    };

    draw_track(cr, seek, layout, colors)?;
    draw_fill(cr, seek, layout, colors)?;
    draw_center_marker(cr, layout, colors)?;
    draw_label(cr, seek, layout, colors)?;

    if let Some(at) = seek.thumb_position() {
        thumb.draw(cr, at)?;
    }
    Ok(())
}
