//! Item extents, grid sizes and items-per-line for a list layout.
//!
//! Metrics are recomputed once per layout-affecting change (client size,
//! item size, spacing, direction). Malformed input never errors: sizes that
//! are not strictly positive degrade to a 1px extent.

use serde::Serialize;
use tracing::warn;

use crate::config::ItemSize;
use crate::geometry::{ClientSize, Direction};

/// Smallest extent an item or grid cell can degrade to
pub const MIN_EXTENT: f64 = 1.0;

/// Sizes along one axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AxisMetrics {
    pub client_size: f64,
    pub item_size: f64,
    /// `item_size + spacing`
    pub grid_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub direction: Direction,
    pub primary: AxisMetrics,
    pub secondary: AxisMetrics,
    /// Items per line across the primary axis, always >= 1
    pub dimension_to_extent: usize,
    pub spacing: f64,
}

impl Metrics {
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.direction.is_vertical()
    }

    /// Number of lines needed to hold `data_size` items
    pub fn line_count(&self, data_size: usize) -> usize {
        data_size.div_ceil(self.dimension_to_extent)
    }

    /// Content extent along the primary axis
    pub fn content_size(&self, data_size: usize) -> f64 {
        (self.line_count(data_size) as f64 * self.primary.grid_size - self.spacing).max(0.0)
    }
}

/// Hysteresis band around the current window
///
/// The window only moves when the primary scroll position leaves
/// `(min, max]`. `min` is negative infinity while the window sits on the
/// first line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
    pub base: f64,
}

impl Threshold {
    pub fn new(primary_grid_size: f64) -> Self {
        let base = 2.0 * primary_grid_size;
        Self {
            min: f64::NEG_INFINITY,
            max: base,
            base,
        }
    }
}

pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compute metrics for the given layout inputs
    pub fn calculate(
        client: ClientSize,
        item_size: ItemSize,
        spacing: f64,
        direction: Direction,
    ) -> Metrics {
        let spacing = sanitize_spacing(spacing);
        let primary_client = sanitize_client(client.primary(direction));
        let secondary_client = sanitize_client(client.secondary(direction));

        let (dimension_to_extent, primary_item, secondary_item) = match item_size {
            ItemSize::Fixed(size) => (1, sanitize_extent(size, "item_size"), secondary_client),
            ItemSize::Grid {
                min_width,
                min_height,
            } => {
                let min_width = sanitize_extent(min_width, "min_width");
                let min_height = sanitize_extent(min_height, "min_height");
                let (primary_min, secondary_min) = if direction.is_vertical() {
                    (min_height, min_width)
                } else {
                    (min_width, min_height)
                };

                let extent = ((secondary_client + spacing) / (secondary_min + spacing)).floor();
                let dimension_to_extent = if extent.is_finite() && extent >= 1.0 {
                    extent as usize
                } else {
                    1
                };
                let secondary_item = ((secondary_client
                    - spacing * (dimension_to_extent as f64 - 1.0))
                    / dimension_to_extent as f64)
                    .round()
                    .max(MIN_EXTENT);
                let primary_item = (secondary_item * primary_min / secondary_min)
                    .round()
                    .max(MIN_EXTENT);

                (dimension_to_extent, primary_item, secondary_item)
            }
        };

        Metrics {
            direction,
            primary: AxisMetrics {
                client_size: primary_client,
                item_size: primary_item,
                grid_size: primary_item + spacing,
            },
            secondary: AxisMetrics {
                client_size: secondary_client,
                item_size: secondary_item,
                grid_size: secondary_item + spacing,
            },
            dimension_to_extent,
            spacing,
        }
    }
}

fn sanitize_extent(value: f64, name: &str) -> f64 {
    if value.is_finite() && value >= MIN_EXTENT {
        value
    } else {
        warn!(value, name, "Malformed item size, degrading to minimum extent");
        MIN_EXTENT
    }
}

fn sanitize_spacing(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(value, "Malformed spacing, using 0");
        0.0
    }
}

fn sanitize_client(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_item_size() {
        let m = MetricsCalculator::calculate(
            ClientSize::new(800.0, 500.0),
            ItemSize::Fixed(50.0),
            0.0,
            Direction::Vertical,
        );
        assert_eq!(m.dimension_to_extent, 1);
        assert_eq!(m.primary.item_size, 50.0);
        assert_eq!(m.primary.grid_size, 50.0);
        assert_eq!(m.primary.client_size, 500.0);
        assert_eq!(m.secondary.item_size, 800.0);
    }

    #[test]
    fn test_grid_vertical() {
        // floor((960 + 20) / (300 + 20)) = 3 columns
        let m = MetricsCalculator::calculate(
            ClientSize::new(960.0, 540.0),
            ItemSize::Grid {
                min_width: 300.0,
                min_height: 200.0,
            },
            20.0,
            Direction::Vertical,
        );
        assert_eq!(m.dimension_to_extent, 3);
        // round((960 - 40) / 3) = 307
        assert_eq!(m.secondary.item_size, 307.0);
        assert_eq!(m.secondary.grid_size, 327.0);
        // aspect ratio preserved: round(307 * 200 / 300) = 205
        assert_eq!(m.primary.item_size, 205.0);
        assert_eq!(m.primary.grid_size, 225.0);
    }

    #[test]
    fn test_grid_horizontal_uses_height_for_rows() {
        let m = MetricsCalculator::calculate(
            ClientSize::new(1920.0, 400.0),
            ItemSize::Grid {
                min_width: 100.0,
                min_height: 180.0,
            },
            10.0,
            Direction::Horizontal,
        );
        // floor(410 / 190) = 2 rows
        assert_eq!(m.dimension_to_extent, 2);
        assert_eq!(m.secondary.item_size, 195.0);
        assert_eq!(m.primary.item_size, 108.0);
    }

    #[test]
    fn test_grid_narrower_than_min_keeps_one_column() {
        let m = MetricsCalculator::calculate(
            ClientSize::new(100.0, 500.0),
            ItemSize::Grid {
                min_width: 300.0,
                min_height: 300.0,
            },
            0.0,
            Direction::Vertical,
        );
        assert_eq!(m.dimension_to_extent, 1);
        assert_eq!(m.secondary.item_size, 100.0);
        assert_eq!(m.primary.item_size, 100.0);
    }

    #[test]
    fn test_malformed_sizes_degrade() {
        let m = MetricsCalculator::calculate(
            ClientSize::new(800.0, 500.0),
            ItemSize::Fixed(-10.0),
            -4.0,
            Direction::Vertical,
        );
        assert_eq!(m.primary.item_size, MIN_EXTENT);
        assert_eq!(m.spacing, 0.0);

        let m = MetricsCalculator::calculate(
            ClientSize::new(800.0, 500.0),
            ItemSize::Grid {
                min_width: 0.0,
                min_height: f64::NAN,
            },
            0.0,
            Direction::Vertical,
        );
        assert!(m.dimension_to_extent >= 1);
        assert!(m.primary.item_size >= MIN_EXTENT);
    }

    #[test]
    fn test_content_size_subtracts_trailing_spacing() {
        let m = MetricsCalculator::calculate(
            ClientSize::new(800.0, 500.0),
            ItemSize::Fixed(50.0),
            10.0,
            Direction::Vertical,
        );
        assert_eq!(m.content_size(10), 590.0);
        assert_eq!(m.content_size(0), 0.0);
    }

    #[test]
    fn test_threshold_initial() {
        let t = Threshold::new(50.0);
        assert_eq!(t.base, 100.0);
        assert_eq!(t.max, 100.0);
        assert_eq!(t.min, f64::NEG_INFINITY);
    }
}
