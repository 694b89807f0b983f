use thiserror::Error;
use tiny_skia::{Color, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::geometry::{BadgeGeometry, foreground_arc};
use super::glyphs::{self, GLYPH_HEIGHT};

pub const DEFAULT_SIZE: u32 = 64;
pub const MIN_SIZE: u32 = 16;

const RING_COLOR: [u8; 3] = [0x70, 0x70, 0x70];
const ARC_COLOR: [u8; 3] = [0xff, 0xff, 0xff];
const LABEL_COLOR: [u8; 3] = [0xff, 0xff, 0xff];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BadgeError {
    #[error("badge size {0} is outside the drawable range")]
    InvalidSize(u32),
}

/// Rasterized tray badge.
#[derive(Clone, Debug)]
pub struct Badge {
    pixmap: Pixmap,
}

impl Badge {
    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// ARGB32 in network byte order, as StatusNotifierItem pixmaps expect.
    pub fn argb32(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.alpha(), c.red(), c.green(), c.blue()]
            })
            .collect()
    }

    /// Straight RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }
}

fn paint(rgb: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(rgb[0], rgb[1], rgb[2], 0xff));
    paint.anti_alias = true;
    paint
}

fn polyline(points: &[(f32, f32)]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.finish()
}

/// Draws the CPU ring: grey track, white clockwise load arc from 12 o'clock,
/// and the integer percentage in the middle.
pub fn render_badge(cpu_percent: f32, size: u32) -> Result<Badge, BadgeError> {
    if size < MIN_SIZE {
        return Err(BadgeError::InvalidSize(size));
    }
    let mut pixmap = Pixmap::new(size, size).ok_or(BadgeError::InvalidSize(size))?;
    let geometry = BadgeGeometry::for_size(size);
    let stroke = Stroke {
        width: geometry.thickness,
        line_cap: LineCap::Round,
        ..Stroke::default()
    };

    let ring = PathBuilder::from_circle(geometry.center, geometry.center, geometry.radius)
        .ok_or(BadgeError::InvalidSize(size))?;
    pixmap.stroke_path(&ring, &paint(RING_COLOR), &stroke, Transform::identity(), None);

    if let Some(arc) = foreground_arc(cpu_percent) {
        let path = if arc.is_full_circle() {
            Some(ring)
        } else {
            polyline(&geometry.arc_points(&arc))
        };
        if let Some(path) = path {
            pixmap.stroke_path(&path, &paint(ARC_COLOR), &stroke, Transform::identity(), None);
        }
    }

    draw_label(&mut pixmap, &glyphs::label(cpu_percent));
    Ok(Badge { pixmap })
}

fn draw_label(pixmap: &mut Pixmap, text: &str) {
    let size = pixmap.width();
    let cell = (size / MIN_SIZE).max(1) as f32;
    let width = glyphs::text_width(text) as f32 * cell;
    let height = GLYPH_HEIGHT as f32 * cell;
    let x0 = ((size as f32 - width) / 2.0).round();
    let y0 = ((size as f32 - height) / 2.0).round();

    let mut label = paint(LABEL_COLOR);
    label.anti_alias = false;
    for (col, row) in glyphs::lit_cells(text) {
        let Some(rect) = Rect::from_xywh(x0 + col as f32 * cell, y0 + row as f32 * cell, cell, cell)
        else {
            continue;
        };
        pixmap.fill_rect(rect, &label, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample points in the middle of the ring stroke at 3 and 9 o'clock.
    const EAST: (u32, u32) = (60, 32);
    const WEST: (u32, u32) = (3, 32);
    const SOUTH: (u32, u32) = (32, 60);

    fn is_white(px: [u8; 4]) -> bool {
        px[0] > 0xf0 && px[1] > 0xf0 && px[2] > 0xf0 && px[3] == 0xff
    }

    fn is_track(px: [u8; 4]) -> bool {
        (px[0] as i32 - 0x70).abs() <= 2 && px[3] == 0xff
    }

    fn at(badge: &Badge, (x, y): (u32, u32)) -> [u8; 4] {
        badge.pixel(x, y).unwrap()
    }

    #[test]
    fn zero_load_draws_only_the_track() {
        let badge = render_badge(0.0, DEFAULT_SIZE).unwrap();
        assert!(is_track(at(&badge, EAST)));
        assert!(is_track(at(&badge, WEST)));
        assert!(is_track(at(&badge, SOUTH)));
    }

    #[test]
    fn full_load_covers_the_ring() {
        let badge = render_badge(100.0, DEFAULT_SIZE).unwrap();
        assert!(is_white(at(&badge, EAST)));
        assert!(is_white(at(&badge, WEST)));
        assert!(is_white(at(&badge, SOUTH)));
    }

    #[test]
    fn half_load_covers_the_right_half() {
        let badge = render_badge(50.0, DEFAULT_SIZE).unwrap();
        assert!(is_white(at(&badge, EAST)));
        assert!(is_track(at(&badge, WEST)));
    }

    #[test]
    fn three_quarter_load_stops_before_eleven() {
        let badge = render_badge(75.0, DEFAULT_SIZE).unwrap();
        assert!(is_white(at(&badge, SOUTH)));
        assert!(is_white(at(&badge, WEST)));
        // 10:30 position stays grey.
        assert!(is_track(at(&badge, (12, 12))));
    }

    #[test]
    fn corners_stay_transparent() {
        let badge = render_badge(55.0, DEFAULT_SIZE).unwrap();
        assert_eq!(at(&badge, (0, 0))[3], 0);
        assert_eq!(at(&badge, (63, 63))[3], 0);
    }

    #[test]
    fn argb_puts_alpha_first() {
        let badge = render_badge(100.0, DEFAULT_SIZE).unwrap();
        let argb = badge.argb32();
        let idx = ((EAST.1 * 64 + EAST.0) * 4) as usize;
        assert_eq!(argb[idx], 0xff);
        assert!(argb[idx + 1] > 0xf0);
    }

    #[test]
    fn label_is_drawn_in_the_centre() {
        // 4px cells, glyph box x 26..38, y 22..42 at 64px.
        let eight = render_badge(8.0, DEFAULT_SIZE).unwrap();
        assert!(is_white(at(&eight, (27, 23))));
        assert!(is_white(at(&eight, (36, 23))));
        assert!(is_white(at(&eight, (31, 31))));
        // "0" has a hollow middle row.
        let zero = render_badge(0.0, DEFAULT_SIZE).unwrap();
        assert!(is_white(at(&zero, (27, 23))));
        assert_eq!(at(&zero, (31, 31))[3], 0);
    }

    #[test]
    fn rejects_tiny_sizes() {
        assert_eq!(render_badge(10.0, 4).unwrap_err(), BadgeError::InvalidSize(4));
    }
}
