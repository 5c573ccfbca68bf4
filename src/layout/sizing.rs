use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, SizeClass, SizingPolicy};

/// Grid dimensions in cells plus the pixel size of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridSize {
    /// Square grid: `cells_per_axis` on both axes, cells floored to whole pixels.
    pub fn square(width: f64, height: f64, cells_per_axis: u32) -> Self {
        let cells = cells_per_axis.max(1);
        GridSize {
            cols: cells,
            rows: cells,
            cell_width: floor_px(width / cells as f64),
            cell_height: floor_px(height / cells as f64),
        }
    }

    /// The longer axis keeps `cells_per_axis`, the shorter gets as many square
    /// cells as fit.
    pub fn aspect_aware(width: f64, height: f64, cells_per_axis: u32) -> Self {
        let cells = cells_per_axis.max(1);
        let (width, height) = (sanitize(width), sanitize(height));
        let major = width.max(height);
        let minor = width.min(height);

        let side = floor_px(major / cells as f64);
        let minor_cells = ((minor / side as f64).floor() as u32).max(1);

        let (cols, rows) = if width > height {
            (cells, minor_cells)
        } else {
            (minor_cells, cells)
        };

        GridSize {
            cols,
            rows,
            cell_width: side,
            cell_height: side,
        }
    }

    pub fn for_container(width: f64, height: f64, size_class: SizeClass, config: &LayoutConfig) -> Self {
        let cells = config.cells_for(size_class);
        let size = match config.sizing {
            SizingPolicy::Square => Self::square(width, height, cells),
            SizingPolicy::AspectAware => Self::aspect_aware(width, height, cells),
        };
        tracing::debug!(
            width,
            height,
            cols = size.cols,
            rows = size.rows,
            cell_width = size.cell_width,
            cell_height = size.cell_height,
            "sized grid"
        );
        size
    }

    /// Pixel extent of the snapped grid.
    pub fn extent(&self) -> (u32, u32) {
        (self.cols * self.cell_width, self.rows * self.cell_height)
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn floor_px(value: f64) -> u32 {
    let value = sanitize(value).floor();
    if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        (value as u32).max(1)
    }
}
