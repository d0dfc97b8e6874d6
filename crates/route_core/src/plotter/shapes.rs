//! Route colors and the small polygons drawn on top of routes.

use crate::config::HexColor;

/// 10-color categorical palette, cycled per route.
pub const ROUTE_PALETTE: [HexColor; 10] = [
    HexColor(0x1f, 0x77, 0xb4),
    HexColor(0xff, 0x7f, 0x0e),
    HexColor(0x2c, 0xa0, 0x2c),
    HexColor(0xd6, 0x27, 0x28),
    HexColor(0x94, 0x67, 0xbd),
    HexColor(0x8c, 0x56, 0x4b),
    HexColor(0xe3, 0x77, 0xc2),
    HexColor(0x7f, 0x7f, 0x7f),
    HexColor(0xbc, 0xbd, 0x22),
    HexColor(0x17, 0xbe, 0xcf),
];

pub fn route_color(index: usize) -> HexColor {
    ROUTE_PALETTE[index % ROUTE_PALETTE.len()]
}

/// Triangle with its tip on the route's last point, pointing along the
/// final segment. `None` when there is no final segment or it has zero
/// length.
pub fn arrow_head(points: &[(f64, f64)], length: f64, half_width: f64) -> Option<[(f64, f64); 3]> {
    let [.., (x0, y0), (x1, y1)] = points else {
        return None;
    };

    let (dx, dy) = (x1 - x0, y1 - y0);
    let norm = (dx * dx + dy * dy).sqrt();
    if norm <= f64::EPSILON {
        return None;
    }

    let (ux, uy) = (dx / norm, dy / norm);
    let (bx, by) = (x1 - ux * length, y1 - uy * length);
    // perpendicular
    let (px, py) = (-uy * half_width, ux * half_width);

    Some([(*x1, *y1), (bx + px, by + py), (bx - px, by - py)])
}

/// Five-pointed star centered on `center`, outer vertex first (pointing up).
pub fn star(center: (f64, f64), outer: f64) -> Vec<(f64, f64)> {
    let inner = outer * 0.4;
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
            (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(route_color(0), route_color(10));
        assert_ne!(route_color(0), route_color(1));
    }

    #[test]
    fn test_arrow_head_points_forward() {
        let head = arrow_head(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)], 1.5, 1.0).unwrap();
        assert_eq!(head[0], (20.0, 0.0));
        assert!((head[1].0 - 18.5).abs() < 1e-9);
        assert!(((head[1].1 - head[2].1).abs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_head_needs_movement() {
        assert!(arrow_head(&[(5.0, 5.0)], 1.5, 1.0).is_none());
        assert!(arrow_head(&[(5.0, 5.0), (5.0, 5.0)], 1.5, 1.0).is_none());
        assert!(arrow_head(&[], 1.5, 1.0).is_none());
    }

    #[test]
    fn test_star_geometry() {
        let points = star((50.0, 20.0), 2.0);
        assert_eq!(points.len(), 10);
        assert!((points[0].0 - 50.0).abs() < 1e-9);
        assert!((points[0].1 - 22.0).abs() < 1e-9);
    }
}
