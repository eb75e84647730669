//! Batch distance calculations with optional parallelism.
//!
//! Results are always index-aligned with the input slice, so callers can
//! zip them back onto their own records.

use crate::{haversine_distance, Coordinate};

/// Calculate the distance in kilometers from `origin` to every point.
///
/// # Example
/// ```
/// use dronemap_geo::{distances_from, Coordinate};
///
/// let points = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.003)];
/// let d = distances_from(&Coordinate::new(0.0, 0.0), &points);
/// assert_eq!(d[0], 0.0);
/// assert!(d[1] > 0.3 && d[1] < 0.4);
/// ```
pub fn distances_from(origin: &Coordinate, points: &[Coordinate]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|point| haversine_distance(origin, point))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|point| haversine_distance(origin, point))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 10.0),
            Coordinate::new(0.0, 0.003),
            Coordinate::new(f64::NAN, 0.0),
        ]
    }

    #[test]
    fn test_distances_are_index_aligned() {
        let origin = Coordinate::new(0.0, 0.0);
        let d = distances_from(&origin, &points());
        assert_eq!(d.len(), 4);
        assert_eq!(d[0], 0.0);
        assert!(d[1] > 1000.0);
        assert!(d[2] < 1.0);
        assert!(d[3].is_nan());
    }

    #[test]
    fn test_empty_input() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!(distances_from(&origin, &[]).is_empty());
    }
}
