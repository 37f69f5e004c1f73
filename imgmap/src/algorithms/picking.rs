use crate::algorithms::winding::{point_in_polygon_evenodd, point_on_polygon_edge};
use crate::geometry::tolerance::EPS_POS;
use crate::model::{DisplayRegion, Point, Shape};

/// Whether display-space `at` falls inside a shape given by scaled coords.
/// Outlines count as inside, as for an HTML `<area>`.
pub fn contains(shape: &Shape, coords: &[f64], at: Point) -> bool {
    match (shape, coords) {
        (Shape::Rect, [l, t, r, b, ..]) => {
            at.x >= l.min(*r) && at.x <= l.max(*r) && at.y >= t.min(*b) && at.y <= t.max(*b)
        }
        (Shape::Circle, [cx, cy, r, ..]) => {
            let (dx, dy) = (at.x - cx, at.y - cy);
            dx * dx + dy * dy <= r * r
        }
        (Shape::Poly, _) => {
            let points: Vec<Point> = coords.chunks_exact(2).map(|p| Point::new(p[0], p[1])).collect();
            point_in_polygon_evenodd(at, &points) || point_on_polygon_edge(at, &points, EPS_POS)
        }
        _ => false,
    }
}

/// First region in paint order containing `at`.
pub fn pick<'a>(areas: impl IntoIterator<Item = &'a DisplayRegion>, at: Point) -> Option<usize> {
    areas
        .into_iter()
        .find(|a| contains(&a.region.shape, &a.scaled_coords, at))
        .map(|a| a.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_bounds_are_inclusive() {
        let c = [10.0, 10.0, 20.0, 30.0];
        assert!(contains(&Shape::Rect, &c, Point::new(10.0, 10.0)));
        assert!(contains(&Shape::Rect, &c, Point::new(15.0, 29.0)));
        assert!(!contains(&Shape::Rect, &c, Point::new(21.0, 15.0)));
    }

    #[test]
    fn inverted_rect_still_hits() {
        let c = [20.0, 30.0, 10.0, 10.0];
        assert!(contains(&Shape::Rect, &c, Point::new(15.0, 20.0)));
    }

    #[test]
    fn circle_and_poly() {
        assert!(contains(&Shape::Circle, &[0.0, 0.0, 5.0], Point::new(3.0, 4.0)));
        assert!(!contains(&Shape::Circle, &[0.0, 0.0, 5.0], Point::new(4.0, 4.0)));
        let tri = [0.0, 0.0, 10.0, 0.0, 0.0, 10.0];
        assert!(contains(&Shape::Poly, &tri, Point::new(2.0, 2.0)));
        assert!(contains(&Shape::Poly, &tri, Point::new(5.0, 0.0)));
        assert!(!contains(&Shape::Poly, &tri, Point::new(8.0, 8.0)));
    }

    #[test]
    fn unknown_or_short_never_hits() {
        assert!(!contains(&Shape::Unknown("default".into()), &[0.0; 4], Point::new(0.0, 0.0)));
        assert!(!contains(&Shape::Rect, &[0.0, 0.0, 1.0], Point::new(0.0, 0.0)));
    }
}
