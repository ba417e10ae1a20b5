use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

/// Boundary of one foreground component, with its enclosed area
#[derive(Debug, Clone)]
pub struct RegionContour {
    pub points: Vec<Point<i32>>,
    pub area: f64,
}

/// Find the outer boundaries of all top-level foreground components.
///
/// Hole borders and components nested inside holes are skipped. Contours
/// enclosing less than `min_area` are dropped; the rest keep discovery order.
pub fn find_external_contours(binary: &GrayImage, min_area: f64) -> Vec<RegionContour> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            let area = polygon_area(&c.points);
            RegionContour {
                points: c.points,
                area,
            }
        })
        .filter(|c| c.area >= min_area)
        .collect()
}

/// Twice the signed area contribution of edge `a -> b`
fn cross(a: &Point<i32>, b: &Point<i32>) -> f64 {
    a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
}

fn closed_edges(points: &[Point<i32>]) -> impl Iterator<Item = (&Point<i32>, &Point<i32>)> {
    points.iter().zip(points.iter().cycle().skip(1))
}

/// Unsigned polygon area by the shoelace formula
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = closed_edges(points).map(|(a, b)| cross(a, b)).sum();
    twice.abs() / 2.0
}

/// Spatial moments m00, m10, m01 of the polygon (Green's theorem)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        if points.len() < 3 {
            return Self {
                m00: 0.0,
                m10: 0.0,
                m01: 0.0,
            };
        }

        let mut a = 0.0;
        let mut x = 0.0;
        let mut y = 0.0;
        for (p, q) in closed_edges(points) {
            let c = cross(p, q);
            a += c;
            x += (p.x + q.x) as f64 * c;
            y += (p.y + q.y) as f64 * c;
        }

        // Orientation independent: flip signs for clockwise traversal
        let sign = if a < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * a / 2.0,
            m10: sign * x / 6.0,
            m01: sign * y / 6.0,
        }
    }

    /// Area-weighted center, or `None` for a degenerate polygon
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}
