#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Dimensions of the region covered by a lattice, all in the same length unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub spacing: i32,
}

/// Number of spacing steps taken across the surface width by [GridConfig::from_surface].
pub const SURFACE_DIVISIONS: i32 = 10;

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig::from_surface(1920, 1080)
    }
}

impl GridConfig {
    pub fn new(width: i32, height: i32, spacing: i32) -> GridConfig {
        GridConfig {
            width,
            height,
            spacing,
        }
    }

    /// Covers a drawing surface, spacing waypoints a tenth of its width apart.
    pub fn from_surface(width: i32, height: i32) -> GridConfig {
        GridConfig::new(width, height, width / SURFACE_DIVISIONS)
    }

    pub fn validate(&self) -> Result<()> {
        if self.spacing <= 0 {
            return Err(GraphError::NonPositiveSpacing(self.spacing));
        }
        Ok(())
    }

    /// Offsets generated along one axis: start at 0, step by `spacing`, stop strictly before
    /// `extent - spacing`. Each offset `o` yields a waypoint coordinate `o + spacing`.
    pub(crate) fn axis_offsets(extent: i32, spacing: i32) -> impl Iterator<Item = i32> {
        debug_assert!(spacing > 0);
        (0..extent.saturating_sub(spacing)).step_by(spacing.max(1) as usize)
    }

    /// Waypoint x coordinates, one per lattice column.
    pub fn column_positions(&self) -> impl Iterator<Item = i32> {
        let spacing = self.spacing;
        GridConfig::axis_offsets(self.width, spacing).map(move |x| x + spacing)
    }

    /// Waypoint y coordinates, one per lattice row.
    pub fn row_positions(&self) -> impl Iterator<Item = i32> {
        let spacing = self.spacing;
        GridConfig::axis_offsets(self.height, spacing).map(move |y| y + spacing)
    }

    pub fn columns(&self) -> usize {
        axis_count(self.width, self.spacing)
    }

    pub fn rows(&self) -> usize {
        axis_count(self.height, self.spacing)
    }

    pub fn waypoint_count(&self) -> usize {
        self.columns() * self.rows()
    }
}

fn axis_count(extent: i32, spacing: i32) -> usize {
    if spacing <= 0 {
        return 0;
    }
    let end = extent as i64 - spacing as i64;
    if end <= 0 {
        0
    } else {
        // ceil(end / spacing)
        ((end + spacing as i64 - 1) / spacing as i64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_when_extent_is_twice_spacing() {
        let config = GridConfig::new(100, 100, 50);
        assert_eq!(config.column_positions().collect::<Vec<_>>(), vec![50]);
        assert_eq!(config.waypoint_count(), 1);
    }

    #[test]
    fn partial_step_still_counts() {
        // Offsets 0, 50, 100 lie strictly below 120.
        let config = GridConfig::new(170, 60, 50);
        assert_eq!(config.column_positions().collect::<Vec<_>>(), vec![50, 100, 150]);
        assert_eq!(config.columns(), 3);
        assert_eq!(config.rows(), 1);
    }

    #[test]
    fn region_too_small_is_empty() {
        for (w, h) in [(50, 500), (500, 50), (10, 10), (-20, 300)] {
            let config = GridConfig::new(w, h, 50);
            assert_eq!(config.waypoint_count(), 0);
        }
    }

    #[test]
    fn rejects_non_positive_spacing() {
        assert_eq!(
            GridConfig::new(100, 100, 0).validate(),
            Err(GraphError::NonPositiveSpacing(0))
        );
        assert_eq!(
            GridConfig::new(100, 100, -5).validate(),
            Err(GraphError::NonPositiveSpacing(-5))
        );
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn surface_spacing_is_a_tenth_of_width() {
        let config = GridConfig::from_surface(1000, 600);
        assert_eq!(config.spacing, 100);
        assert_eq!(config.columns(), 9);
        assert_eq!(config.rows(), 5);
    }
}
