//! # chartkit
//!
//! Core chart primitives: scales, path builders, axis tick generation.
//! Implements Strategy pattern for flexible scale and rendering behaviors.

use linevis_core::Timestamp;
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Zero-width (or unrepresentably wide) domain: every value maps to the
    /// middle of the range
    pub fn is_degenerate(&self) -> bool {
        let span = self.domain.1 - self.domain.0;
        span == 0.0 || !span.is_finite()
    }

    /// Generate "nice" tick values (rounded to clean numbers)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let range = max - min;

        if range == 0.0 || !range.is_finite() || count == 0 {
            return vec![min];
        }

        let rough_step = range / count as f64;
        let magnitude = 10.0_f64.powf(rough_step.log10().floor());
        let residual = rough_step / magnitude;

        let nice_step = if residual <= 1.0 {
            magnitude
        } else if residual <= 2.0 {
            2.0 * magnitude
        } else if residual <= 5.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        // Subnormal spans underflow to a zero step
        if !nice_step.is_finite() || nice_step <= 0.0 {
            return vec![min];
        }

        let first = (min / nice_step).ceil() as i64;
        let last = (max / nice_step).floor() as i64;
        if last.saturating_sub(first) > 2 * count as i64 + 2 {
            return vec![min];
        }

        (first..=last).map(|i| i as f64 * nice_step).collect()
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if self.is_degenerate() {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }
}

// ============================================================================
// TIME SCALE
// ============================================================================

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const YEAR: i64 = 365 * DAY;

/// Candidate tick intervals, smallest first
const TIME_INTERVALS: &[i64] = &[
    SECOND,
    5 * SECOND,
    15 * SECOND,
    30 * SECOND,
    MINUTE,
    5 * MINUTE,
    15 * MINUTE,
    30 * MINUTE,
    HOUR,
    3 * HOUR,
    6 * HOUR,
    12 * HOUR,
    DAY,
    2 * DAY,
    7 * DAY,
    14 * DAY,
    30 * DAY,
    90 * DAY,
    YEAR,
];

/// Time scale (maps timestamps to pixel positions)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (Timestamp, Timestamp), // Unix timestamps in milliseconds
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: Timestamp, max: Timestamp) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn domain_bounds(&self) -> (Timestamp, Timestamp) {
        self.domain
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Scale timestamp to pixel position
    pub fn scale(&self, timestamp: Timestamp) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if d_max == d_min {
            return (r_min + r_max) / 2.0;
        }

        // f64 arithmetic: the domain may span more than i64 can subtract
        let span = d_max as f64 - d_min as f64;
        let normalized = (timestamp as f64 - d_min as f64) / span;
        r_min + normalized * (r_max - r_min)
    }

    /// Inverse scale (pixel to timestamp)
    pub fn invert(&self, value: f64) -> Timestamp {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if r_max == r_min {
            return ((d_min as i128 + d_max as i128) / 2) as Timestamp;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max as f64 - d_min as f64)).round() as Timestamp
    }

    /// Tick interval (ms) giving at most `count` ticks across the domain
    pub fn tick_interval(&self, count: usize) -> i64 {
        let span = self.domain.1.abs_diff(self.domain.0);
        let count = count.max(1) as u64;

        TIME_INTERVALS
            .iter()
            .copied()
            .find(|interval| span / *interval as u64 <= count)
            .unwrap_or_else(|| {
                let years = (span / YEAR as u64).div_ceil(count).max(1);
                i64::try_from(years.saturating_mul(YEAR as u64)).unwrap_or(i64::MAX)
            })
    }

    /// Ticks aligned to multiples of the chosen interval (UTC)
    pub fn ticks(&self, count: usize) -> Vec<Timestamp> {
        let (min, max) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };

        if min == max || count == 0 {
            return vec![min];
        }

        let interval = self.tick_interval(count);
        let aligned = min
            .div_euclid(interval)
            .checked_mul(interval)
            .filter(|tick| *tick >= min)
            .or_else(|| min.div_euclid(interval).checked_add(1)?.checked_mul(interval));

        let mut ticks = Vec::new();
        let mut next = aligned;
        while let Some(tick) = next.filter(|tick| *tick <= max) {
            ticks.push(tick);
            next = tick.checked_add(interval);
        }
        ticks
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Line path generator
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        rest.iter()
            .fold(PathBuilder::new().move_to(x, y), |path, &(x, y)| path.line_to(x, y))
            .build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn vertical_to(mut self, y: f64) -> Self {
        let _ = write!(self.commands, "V{:.2}", y);
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

/// D3 `axisRight` domain path: outer ticks at both ends of a vertical axis
pub fn axis_domain_path(height: f64, outer_tick: f64) -> String {
    PathBuilder::new()
        .move_to(outer_tick, 0.0)
        .horizontal_to(0.0)
        .vertical_to(height)
        .horizontal_to(outer_tick)
        .build()
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Format timestamp for chart axes, coarser labels for wider intervals
pub fn format_time(timestamp_ms: Timestamp, interval_ms: i64) -> String {
    use chrono::{TimeZone, Utc};

    let Some(dt) = Utc.timestamp_millis_opt(timestamp_ms).single() else {
        return String::new();
    };

    if interval_ms >= 365 * DAY {
        dt.format("%Y").to_string()
    } else if interval_ms >= DAY {
        dt.format("%b %d").to_string()
    } else if interval_ms >= MINUTE {
        dt.format("%H:%M").to_string()
    } else {
        dt.format("%H:%M:%S").to_string()
    }
}

/// Full date label for tooltips
pub fn format_date(timestamp_ms: Timestamp) -> String {
    use chrono::{TimeZone, Utc};

    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new()
            .domain(0.0, 10.0)
            .range(200.0, 0.0);

        assert_eq!(scale.scale(0.0), 200.0);
        assert_eq!(scale.scale(10.0), 0.0);
        assert_eq!(scale.invert(100.0), 5.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new()
            .domain(5.0, 5.0)
            .range(300.0, 0.0);

        assert!(scale.is_degenerate());
        assert_eq!(scale.scale(5.0), 150.0);
        assert_eq!(scale.scale(-1000.0), 150.0);
        assert_eq!(scale.nice_ticks(5), vec![5.0]);
    }

    #[test]
    fn test_tiny_distinct_domain_is_not_degenerate() {
        let scale = LinearScale::new()
            .domain(1e-17, 9e-17)
            .range(350.0, 0.0);

        assert!(!scale.is_degenerate());
        assert_eq!(scale.scale(1e-17), 350.0);
        assert_eq!(scale.scale(9e-17), 0.0);
    }

    #[test]
    fn test_nice_ticks_subnormal_and_huge_domains() {
        let scale = LinearScale::new().domain(0.0, 5e-324);
        assert_eq!(scale.nice_ticks(5), vec![0.0]);

        let scale = LinearScale::new().domain(-f64::MAX, f64::MAX);
        assert_eq!(scale.nice_ticks(5), vec![-f64::MAX]);
    }

    #[test]
    fn test_nice_ticks() {
        let scale = LinearScale::new().domain(0.0, 100.0);
        assert_eq!(scale.nice_ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let scale = LinearScale::new().domain(3.0, 47.0);
        let ticks = scale.nice_ticks(5);
        assert_eq!(ticks.first(), Some(&10.0));
        assert!(ticks.iter().all(|t| *t >= 3.0 && *t <= 47.0));
    }

    #[test]
    fn test_time_scale_round_trip() {
        let scale = TimeScale::new().domain(1_000, 2_000).range(0.0, 100.0);

        assert_eq!(scale.scale(1_500), 50.0);
        assert_eq!(scale.invert(50.0), 1_500);
        assert_eq!(scale.invert(0.0), 1_000);
    }

    #[test]
    fn test_time_scale_single_instant() {
        let scale = TimeScale::new().domain(5_000, 5_000).range(0.0, 100.0);
        assert_eq!(scale.scale(5_000), 50.0);
        assert_eq!(scale.ticks(5), vec![5_000]);
    }

    #[test]
    fn test_time_scale_extreme_domain_does_not_overflow() {
        let scale = TimeScale::new().domain(i64::MIN, i64::MAX).range(0.0, 100.0);

        assert_eq!(scale.scale(i64::MIN), 0.0);
        assert_eq!(scale.scale(i64::MAX), 100.0);
        assert_eq!(scale.invert(0.0), i64::MIN);
        assert!(scale.ticks(5).len() <= 6);

        let scale = TimeScale::new().domain(0, i64::MAX).range(0.0, 100.0);
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first(), Some(&0));
        assert!(ticks.len() <= 11);
    }

    #[test]
    fn test_time_ticks_daily() {
        let start = 19_723 * DAY; // 2024-01-01
        let scale = TimeScale::new().domain(start, start + 10 * DAY).range(0.0, 500.0);

        let ticks = scale.ticks(10);
        assert_eq!(scale.tick_interval(10), DAY);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], start);
        assert_eq!(format_time(ticks[0], DAY), "Jan 01");
    }

    #[test]
    fn test_line_path_generator() {
        let path = LinePath.generate(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);

        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains("L50.00,50.00"));
        assert!(LinePath.generate(&[]).is_empty());
    }

    #[test]
    fn test_axis_domain_path() {
        assert_eq!(axis_domain_path(100.0, 6.0), "M6.00,0.00H0.00V100.00H6.00");
    }
}
