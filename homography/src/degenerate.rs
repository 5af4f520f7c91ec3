use nalgebra::Point2;

/// Whether any three of `points` lie on a line.
///
/// Meant for the minimal samples of four points, it checks every triple.
pub fn has_collinear_triple(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        (i + 1..n).any(|j| (j + 1..n).any(|k| collinear(&points[i], &points[j], &points[k])))
    })
}

fn collinear(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> bool {
    let ab = b - a;
    let ac = c - a;
    (ab.x * ac.y - ab.y * ac.x).abs() <= f32::EPSILON as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_collinear_triples() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(!has_collinear_triple(&square));
        let line = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(5.0, -2.0),
            Point2::new(2.0, 2.0),
        ];
        assert!(has_collinear_triple(&line));
        let repeated = [square[0], square[1], square[2], square[0]];
        assert!(has_collinear_triple(&repeated));
    }
}
