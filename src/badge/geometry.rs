/// Reference size the ring proportions are tuned for.
pub const REFERENCE_SIZE: f32 = 64.0;
const REFERENCE_RADIUS: f32 = 26.0;
const REFERENCE_THICKNESS: f32 = 8.0;

/// Degrees of sweep per CPU percent point.
pub const DEGREES_PER_PERCENT: f32 = 3.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeGeometry {
    pub size: f32,
    pub center: f32,
    pub radius: f32,
    pub thickness: f32,
}

impl BadgeGeometry {
    pub fn for_size(size: u32) -> Self {
        let size = size as f32;
        let scale = size / REFERENCE_SIZE;
        Self {
            size,
            center: (size / 2.0).floor(),
            radius: REFERENCE_RADIUS * scale,
            thickness: REFERENCE_THICKNESS * scale,
        }
    }

    /// Pixel position on the ring, `degrees` measured clockwise from 12 o'clock.
    pub fn point_at(&self, degrees: f32) -> (f32, f32) {
        let rad = degrees.to_radians();
        (
            self.center + self.radius * rad.sin(),
            self.center - self.radius * rad.cos(),
        )
    }

    /// Polyline approximating `arc`, one vertex per degree or finer.
    pub fn arc_points(&self, arc: &Arc) -> Vec<(f32, f32)> {
        let steps = arc.sweep_degrees.ceil().max(1.0) as usize;
        (0..=steps)
            .map(|i| {
                let t = i as f32 / steps as f32;
                self.point_at(arc.start_degrees + arc.sweep_degrees * t)
            })
            .collect()
    }
}

/// Clockwise arc; angles are degrees clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub start_degrees: f32,
    pub sweep_degrees: f32,
}

impl Arc {
    pub fn is_full_circle(&self) -> bool {
        self.sweep_degrees >= 360.0
    }
}

pub fn sweep_degrees(cpu_percent: f32) -> f32 {
    cpu_percent.clamp(0.0, 100.0) * DEGREES_PER_PERCENT
}

/// The load arc for `cpu_percent`, or `None` when there is nothing to draw.
pub fn foreground_arc(cpu_percent: f32) -> Option<Arc> {
    if cpu_percent.is_nan() || cpu_percent <= 0.0 {
        return None;
    }
    Some(Arc {
        start_degrees: 0.0,
        sweep_degrees: sweep_degrees(cpu_percent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn reference_size_matches_tuned_ring() {
        let g = BadgeGeometry::for_size(64);
        assert_eq!(g.center, 32.0);
        assert_eq!(g.radius, 26.0);
        assert_eq!(g.thickness, 8.0);
    }

    #[test]
    fn scales_linearly() {
        let g = BadgeGeometry::for_size(32);
        assert_eq!(g.radius, 13.0);
        assert_eq!(g.thickness, 4.0);
    }

    #[test]
    fn angles_run_clockwise_from_twelve() {
        let g = BadgeGeometry::for_size(64);
        assert!(close(g.point_at(0.0), (32.0, 6.0)));
        assert!(close(g.point_at(90.0), (58.0, 32.0)));
        assert!(close(g.point_at(180.0), (32.0, 58.0)));
        assert!(close(g.point_at(270.0), (6.0, 32.0)));
    }

    #[test]
    fn no_arc_at_zero() {
        assert_eq!(foreground_arc(0.0), None);
        assert_eq!(foreground_arc(-3.0), None);
        assert_eq!(foreground_arc(f32::NAN), None);
    }

    #[test]
    fn full_circle_at_hundred() {
        let arc = foreground_arc(100.0).unwrap();
        assert_eq!(arc.start_degrees, 0.0);
        assert!(arc.is_full_circle());
        assert!(foreground_arc(140.0).unwrap().is_full_circle());
    }

    #[test]
    fn quarter_load_ends_at_three_oclock() {
        let g = BadgeGeometry::for_size(64);
        let arc = foreground_arc(25.0).unwrap();
        assert_eq!(arc.sweep_degrees, 90.0);
        let points = g.arc_points(&arc);
        assert!(close(points[0], (32.0, 6.0)));
        assert!(close(*points.last().unwrap(), (58.0, 32.0)));
    }
}
