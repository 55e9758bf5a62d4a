//! Top-down geometry of annotated boxes.

/// A point in the ego frame, meters.
pub type Point2 = (f64, f64);

/// Footprint corners of a box, in outline order.
///
/// Starts from the axis-aligned rectangle
/// `[(l/2, w/2), (l/2, -w/2), (-l/2, -w/2), (-l/2, w/2)]`, rotates it counter-clockwise by
/// `heading` and moves it to the center. Drawing the corners in order and closing back
/// to the first yields the outline.
pub fn box_corners(
    center_x: f64,
    center_y: f64,
    length: f64,
    width: f64,
    heading: f64,
) -> [Point2; 4] {
    let hx = length / 2.0;
    let hy = width / 2.0;
    let local = [(hx, hy), (hx, -hy), (-hx, -hy), (-hx, hy)];

    let (s, c) = heading.sin_cos();
    local.map(|(x, y)| (c * x - s * y + center_x, s * x + c * y + center_y))
}

/// Axis-aligned clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, (x, y): Point2) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Liang-Barsky clipping of the segment `a -> b`.
    ///
    /// Returns `None` when nothing of the segment lies inside, or when an endpoint is not
    /// finite.
    pub fn clip_segment(&self, a: Point2, b: Point2) -> Option<(Point2, Point2)> {
        if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        for (p, q) in [
            (-dx, a.0 - self.min_x),
            (dx, self.max_x - a.0),
            (-dy, a.1 - self.min_y),
            (dy, self.max_y - a.1),
        ] {
            if p == 0.0 {
                // parallel to this edge
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return None;
                }
                t1 = t1.min(t);
            }
        }

        Some((
            (a.0 + t0 * dx, a.1 + t0 * dy),
            (a.0 + t1 * dx, a.1 + t1 * dy),
        ))
    }
}
