//! Nearest-point lookup for the crosshair tooltip

use crate::chartkit::TimeScale;
use linevis_core::{DataPoint, Timestamp};

/// A data point together with its position inside the plot area
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedPoint {
    pub point: DataPoint,
    pub x: f64,
    pub y: f64,
}

/// Result of a pointer lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    /// Timestamp under the pointer (inverted from the pixel position)
    pub timestamp: Timestamp,
    /// Pointer x inside the plot area, where the cursor line is drawn
    pub x: f64,
    /// Every point at the minimal distance from `timestamp`
    pub points: Vec<PlottedPoint>,
}

impl Hover {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// All points whose timestamp is closest to `target`.
///
/// Linear scan; ties at the minimal distance are all returned, in input
/// order.
pub fn nearest_points<'a>(points: &'a [PlottedPoint], target: Timestamp) -> Vec<&'a PlottedPoint> {
    let Some(best) = points
        .iter()
        .map(|p| p.point.timestamp.abs_diff(target))
        .min()
    else {
        return Vec::new();
    };

    points
        .iter()
        .filter(|p| p.point.timestamp.abs_diff(target) == best)
        .collect()
}

/// Invert the pointer position and look up the nearest points
pub fn hover_at(points: &[PlottedPoint], x_scale: &TimeScale, pixel_x: f64) -> Hover {
    let timestamp = x_scale.invert(pixel_x);
    let nearest = nearest_points(points, timestamp);

    tracing::trace!(timestamp, pixel_x, hits = nearest.len(), "Hover lookup");

    Hover {
        timestamp,
        x: pixel_x,
        points: nearest.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plotted(timestamp: Timestamp, series: &str) -> PlottedPoint {
        PlottedPoint {
            point: DataPoint::new(timestamp, timestamp as f64, series.into(), "#000".into()),
            x: timestamp as f64,
            y: 0.0,
        }
    }

    fn timestamps(points: &[&PlottedPoint]) -> Vec<Timestamp> {
        points.iter().map(|p| p.point.timestamp).collect()
    }

    #[test]
    fn test_single_nearest() {
        let points = vec![plotted(10, "A"), plotted(20, "A"), plotted(30, "A")];
        assert_eq!(timestamps(&nearest_points(&points, 24)), vec![20]);
        assert_eq!(timestamps(&nearest_points(&points, 26)), vec![30]);
    }

    #[test]
    fn test_equidistant_returns_both() {
        let points = vec![plotted(10, "A"), plotted(30, "A")];
        assert_eq!(timestamps(&nearest_points(&points, 20)), vec![10, 30]);

        let points = vec![plotted(10, "A"), plotted(20, "A"), plotted(30, "A")];
        assert_eq!(timestamps(&nearest_points(&points, 25)), vec![20, 30]);
    }

    #[test]
    fn test_ties_across_series() {
        let points = vec![plotted(10, "A"), plotted(10, "B"), plotted(40, "C")];
        let hits = nearest_points(&points, 12);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].point.series_name.as_str(), "A");
        assert_eq!(hits[1].point.series_name.as_str(), "B");
    }

    #[test]
    fn test_empty_points() {
        assert!(nearest_points(&[], 100).is_empty());
    }

    #[test]
    fn test_hover_inverts_pixel() {
        let points = vec![plotted(1_000, "A"), plotted(2_000, "A")];
        let scale = TimeScale::new().domain(1_000, 2_000).range(0.0, 100.0);

        let hover = hover_at(&points, &scale, 80.0);
        assert_eq!(hover.timestamp, 1_800);
        assert_eq!(hover.x, 80.0);
        assert_eq!(hover.points.len(), 1);
        assert_eq!(hover.points[0].point.timestamp, 2_000);
    }
}
