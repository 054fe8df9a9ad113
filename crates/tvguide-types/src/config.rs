//! Grid geometry and paging configuration (`guide.toml`).

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

/// Layout constants for the program grid.
///
/// All pixel values are grid-local. Every field has a default so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Channel rows shown per page.
    #[serde(default = "default_channels_per_page")]
    pub channels_per_page: usize,
    /// Width of the channel label column; the time axis starts here.
    #[serde(default = "default_channel_column_width")]
    pub channel_column_width: i32,
    /// Pixels per half hour.
    #[serde(default = "default_half_hour_width")]
    pub half_hour_width: i32,
    /// Right edge of the cell area. Cells are clipped to it.
    #[serde(default = "default_grid_right")]
    pub grid_right: i32,
    /// Full grid width, used as the entry edge when panning left.
    #[serde(default = "default_grid_width")]
    pub grid_width: i32,
    /// Full grid height, used as the entry edge when paging up.
    #[serde(default = "default_grid_height")]
    pub grid_height: i32,
    /// Height of the time header above the first row.
    #[serde(default = "default_row_header_height")]
    pub row_header_height: i32,
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    /// Spacing subtracted from each cell's width and height.
    #[serde(default = "default_cell_gap")]
    pub cell_gap: u32,
    /// Cells narrower than this are drawn without a label.
    #[serde(default = "default_min_label_width")]
    pub min_label_width: i32,
    /// Half-hour columns in the time header.
    #[serde(default = "default_header_columns")]
    pub header_columns: u32,
    /// How far the window moves when navigation runs off either side.
    #[serde(default = "default_pan_minutes")]
    pub pan_minutes: i64,
    /// Push the large program image to the host as a background.
    #[serde(default)]
    pub program_background: bool,
}

fn default_channels_per_page() -> usize {
    9
}
fn default_channel_column_width() -> i32 {
    180
}
fn default_half_hour_width() -> i32 {
    275
}
fn default_grid_right() -> i32 {
    1260
}
fn default_grid_width() -> i32 {
    1280
}
fn default_grid_height() -> i32 {
    720
}
fn default_row_header_height() -> i32 {
    60
}
fn default_row_height() -> u32 {
    50
}
fn default_cell_gap() -> u32 {
    2
}
fn default_min_label_width() -> i32 {
    25
}
fn default_header_columns() -> u32 {
    4
}
fn default_pan_minutes() -> i64 {
    120
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            channels_per_page: default_channels_per_page(),
            channel_column_width: default_channel_column_width(),
            half_hour_width: default_half_hour_width(),
            grid_right: default_grid_right(),
            grid_width: default_grid_width(),
            grid_height: default_grid_height(),
            row_header_height: default_row_header_height(),
            row_height: default_row_height(),
            cell_gap: default_cell_gap(),
            min_label_width: default_min_label_width(),
            header_columns: default_header_columns(),
            pan_minutes: default_pan_minutes(),
            program_background: false,
        }
    }
}

impl GuideConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        log::debug!("Loaded guide config from {}", path.display());
        Ok(cfg)
    }

    /// Reject values the layout math cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.channels_per_page == 0 {
            return Err(GuideError::Config(
                "channels_per_page must be positive".into(),
            ));
        }
        if self.half_hour_width <= 0 {
            return Err(GuideError::Config(
                "half_hour_width must be positive".into(),
            ));
        }
        if self.grid_right <= self.channel_column_width {
            return Err(GuideError::Config(format!(
                "grid_right ({}) must lie right of the channel column ({})",
                self.grid_right, self.channel_column_width
            )));
        }
        if self.row_height == 0 {
            return Err(GuideError::Config("row_height must be positive".into()));
        }
        if self.cell_gap >= self.row_height {
            return Err(GuideError::Config(format!(
                "cell_gap ({}) must be smaller than row_height ({})",
                self.cell_gap, self.row_height
            )));
        }
        if self.pan_minutes <= 0 {
            return Err(GuideError::Config("pan_minutes must be positive".into()));
        }
        Ok(())
    }

    /// Time pan step as a duration.
    pub fn pan(&self) -> Duration {
        Duration::minutes(self.pan_minutes)
    }

    /// Span of the header's half-hour columns.
    pub fn window_span(&self) -> Duration {
        Duration::minutes(30 * i64::from(self.header_columns))
    }
}
