//! Point-in-polygon tests for polygon regions.
//!
//! Ray casting to the right of the query point; the crossing count decides
//! even-odd containment.

use crate::model::Point;

/// Number of outline edges crossed by the ray from `p` going right.
pub fn crossing_number(p: Point, polygon: &[Point]) -> i32 {
    if polygon.len() < 3 {
        return 0;
    }

    let mut crossings = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];

        let y_crosses = (a.y <= p.y && b.y > p.y) || (b.y <= p.y && a.y > p.y);
        if y_crosses {
            let t = (p.y - a.y) / (b.y - a.y);
            if p.x < a.x + t * (b.x - a.x) {
                crossings += 1;
            }
        }
    }

    crossings
}

#[inline]
pub fn point_in_polygon_evenodd(p: Point, polygon: &[Point]) -> bool {
    crossing_number(p, polygon) % 2 == 1
}

/// Whether `p` lies within `tol` of any outline edge.
pub fn point_on_polygon_edge(p: Point, polygon: &[Point], tol: f64) -> bool {
    let n = polygon.len();
    (0..n).any(|i| seg_distance_sq(p, polygon[i], polygon[(i + 1) % n]) <= tol * tol)
}

fn seg_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    (p.x - cx).powi(2) + (p.y - cy).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    fn square() -> Vec<Point> {
        vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)]
    }

    #[test]
    fn crossing_number_square() {
        let square = square();
        assert_eq!(crossing_number(pt(5.0, 5.0), &square), 1);
        assert_eq!(crossing_number(pt(-5.0, 5.0), &square), 2);
        assert_eq!(crossing_number(pt(15.0, 5.0), &square), 0);
        assert!(point_in_polygon_evenodd(pt(5.0, 5.0), &square));
        assert!(!point_in_polygon_evenodd(pt(-5.0, 5.0), &square));
    }

    #[test]
    fn concave_polygon() {
        let l_shape = vec![
            pt(0.0, 0.0),
            pt(10.0, 0.0),
            pt(10.0, 5.0),
            pt(5.0, 5.0),
            pt(5.0, 10.0),
            pt(0.0, 10.0),
        ];
        assert!(point_in_polygon_evenodd(pt(2.0, 7.0), &l_shape));
        assert!(!point_in_polygon_evenodd(pt(7.0, 7.0), &l_shape));
    }

    #[test]
    fn point_on_edge() {
        let square = square();
        assert!(point_on_polygon_edge(pt(5.0, 0.0), &square, 0.001));
        assert!(point_on_polygon_edge(pt(10.0, 10.0), &square, 0.001));
        assert!(!point_on_polygon_edge(pt(5.0, 5.0), &square, 0.001));
    }

    #[test]
    fn degenerate_outlines() {
        assert_eq!(crossing_number(pt(0.0, 0.0), &[]), 0);
        assert_eq!(crossing_number(pt(0.0, 0.0), &[pt(0.0, 0.0), pt(1.0, 1.0)]), 0);
        assert!(!point_on_polygon_edge(pt(0.0, 0.0), &[], 1.0));
    }
}
