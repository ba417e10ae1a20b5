use imageproc::point::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::models::EnclosingCircle;

/// Fixed seed so the point shuffle, and therefore floating-point rounding,
/// is identical between runs
const SHUFFLE_SEED: u64 = 0x5eed_c1c1e;

/// Smallest circle containing every point (Welzl's incremental algorithm).
///
/// Returns a zero-radius circle at the origin for an empty point set.
pub fn min_enclosing_circle(points: &[Point<i32>]) -> EnclosingCircle {
    let mut pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
    pts.dedup();

    let Some(&first) = pts.first() else {
        return EnclosingCircle {
            center_x: 0.0,
            center_y: 0.0,
            radius: 0.0,
        };
    };

    // Shuffling gives expected linear time on ordered boundary points
    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    pts.shuffle(&mut rng);

    let mut circle = point_circle(first);
    for i in 0..pts.len() {
        let p = pts[i];
        if circle.contains(p.0, p.1) {
            continue;
        }
        circle = point_circle(p);
        for j in 0..i {
            let q = pts[j];
            if circle.contains(q.0, q.1) {
                continue;
            }
            circle = diameter_circle(p, q);
            for &r in &pts[..j] {
                if !circle.contains(r.0, r.1) {
                    circle = circumcircle(p, q, r);
                }
            }
        }
    }

    circle
}

fn point_circle(p: (f64, f64)) -> EnclosingCircle {
    EnclosingCircle {
        center_x: p.0,
        center_y: p.1,
        radius: 0.0,
    }
}

fn diameter_circle(a: (f64, f64), b: (f64, f64)) -> EnclosingCircle {
    let center_x = (a.0 + b.0) / 2.0;
    let center_y = (a.1 + b.1) / 2.0;
    EnclosingCircle {
        center_x,
        center_y,
        radius: (a.0 - center_x).hypot(a.1 - center_y),
    }
}

/// Circle through three points; for (near-)collinear points, the circle on
/// the two farthest-apart points
fn circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> EnclosingCircle {
    let bx = b.0 - a.0;
    let by = b.1 - a.1;
    let cx = c.0 - a.0;
    let cy = c.1 - a.1;
    let d = 2.0 * (bx * cy - by * cx);

    if d.abs() < 1e-12 {
        return [diameter_circle(a, b), diameter_circle(a, c), diameter_circle(b, c)]
            .into_iter()
            .fold(diameter_circle(a, b), |best, c| {
                if c.radius > best.radius { c } else { best }
            });
    }

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;

    EnclosingCircle {
        center_x: a.0 + ux,
        center_y: a.1 + uy,
        radius: ux.hypot(uy),
    }
}
