//! Time window and channel page to positioned cells.
//!
//! The horizontal axis maps time to pixels: the channel column occupies
//! `[0, C)`, and each half hour after the window start is `W` pixels wide.
//! Rows stack below the time header, one per channel on the page.

use std::rc::Rc;

use chrono::{Duration, NaiveDateTime};

use crate::config::GuideConfig;
use crate::error::{GuideError, Result};
use crate::geometry::Rect;
use crate::highlight::{self, CellVariant};
use crate::host::{CellDescriptor, ChannelRow, GuideHeader};
use crate::model::{Channel, Program};
use crate::notification::NotificationStore;
use crate::pagination::GridWindow;

const SECONDS_PER_HALF_HOUR: i64 = 1800;

/// One program cell computed by a layout pass, not yet handed to the host.
#[derive(Debug, Clone)]
pub struct CellSpec {
    pub program: Rc<Program>,
    /// Row on the page (0-based).
    pub row: usize,
    pub rect: Rect,
    pub label: String,
    pub variant: CellVariant,
}

impl CellSpec {
    pub fn descriptor(&self) -> CellDescriptor {
        CellDescriptor {
            rect: self.rect,
            label: self.label.clone(),
            variant: self.variant,
        }
    }
}

/// The complete result of one layout pass.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub window: GridWindow,
    pub cells: Vec<CellSpec>,
    /// Exactly `channels_per_page` rows; unused rows are [`ChannelRow::Empty`].
    pub rows: Vec<ChannelRow>,
}

/// Horizontal extent of a program before the cell gap is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: i32,
    pub width: i32,
}

/// Computes cell geometry for a page of channels and a time window.
#[derive(Debug, Clone)]
pub struct GridLayoutEngine {
    config: GuideConfig,
}

impl GridLayoutEngine {
    pub fn new(config: GuideConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    /// Pixel position of `t`. Times before the window start map to the
    /// channel column edge.
    pub fn x_for(&self, window_start: NaiveDateTime, t: NaiveDateTime) -> i32 {
        let secs = (t - window_start).num_seconds().max(0);
        let x = i64::from(self.config.channel_column_width)
            + secs * i64::from(self.config.half_hour_width) / SECONDS_PER_HALF_HOUR;
        x.min(i64::from(i32::MAX)) as i32
    }

    /// Top edge of a page row.
    pub fn row_top(&self, row: usize) -> i32 {
        self.config.row_header_height + row as i32 * self.config.row_height as i32
    }

    /// Horizontal extent of `program`, or `None` when it is scrolled out or
    /// too thin to show.
    pub fn span_for(&self, window_start: NaiveDateTime, program: &Program) -> Option<Span> {
        if program.ended_by(window_start) {
            return None;
        }
        let x = if program.start < window_start {
            self.config.channel_column_width
        } else {
            self.x_for(window_start, program.start)
        };
        let end_x = self.x_for(window_start, program.end);
        let mut width = end_x - x;
        if x + width > self.config.grid_right {
            width = self.config.grid_right - x;
        }
        if width <= 1 {
            return None;
        }
        Some(Span { x, width })
    }

    /// Lay out one page. Fetches every channel's programs before returning;
    /// any fetch failure fails the whole pass with [`GuideError::Load`].
    pub fn layout<F, N>(
        &self,
        channels: &[Rc<Channel>],
        mut programs: F,
        window: GridWindow,
        has_channel_icons: bool,
        notifications: &N,
    ) -> Result<GridLayout>
    where
        F: FnMut(&Channel) -> Result<Vec<Program>>,
        N: NotificationStore + ?Sized,
    {
        let per_page = self.config.channels_per_page;
        let first = (window.page * per_page).min(channels.len());
        let last = (first + per_page).min(channels.len());
        let page_channels = &channels[first..last];

        let mut cells = Vec::new();
        for (row, channel) in page_channels.iter().enumerate() {
            let listing = programs(channel.as_ref()).map_err(|e| match e {
                GuideError::Load(_) => e,
                other => GuideError::Load(format!("programs for {}: {other}", channel.id)),
            })?;
            let top = self.row_top(row);
            for program in listing {
                let Some(span) = self.span_for(window.start, &program) else {
                    continue;
                };
                let label = if span.width < self.config.min_label_width {
                    String::new()
                } else {
                    program.title.clone()
                };
                let variant = highlight::classify(notifications, &program);
                cells.push(CellSpec {
                    rect: Rect::new(
                        span.x,
                        top,
                        (span.width as u32).saturating_sub(self.config.cell_gap),
                        self.config.row_height.saturating_sub(self.config.cell_gap),
                    ),
                    row,
                    label,
                    variant,
                    program: Rc::new(program),
                });
            }
        }

        let rows = (0..per_page)
            .map(|row| match page_channels.get(row) {
                None => ChannelRow::Empty,
                Some(channel) => match (&channel.logo, has_channel_icons) {
                    (Some(logo), true) => ChannelRow::Logo(logo.clone()),
                    _ => ChannelRow::Title(channel.title.clone()),
                },
            })
            .collect();

        log::debug!(
            "Laid out page {} from {}: {} channels, {} cells",
            window.page,
            window.start,
            page_channels.len(),
            cells.len()
        );

        Ok(GridLayout {
            window,
            cells,
            rows,
        })
    }

    /// Date and half-hour labels for the window, plus the "now" marker.
    pub fn header(&self, window_start: NaiveDateTime, now: NaiveDateTime) -> GuideHeader {
        let time_labels = (0..self.config.header_columns)
            .map(|col| {
                let t = window_start + Duration::minutes(30 * i64::from(col));
                t.format("%H:%M").to_string()
            })
            .collect();
        let window_end = window_start + self.config.window_span();
        let time_bar_x = (window_start <= now && now < window_end)
            .then(|| self.x_for(window_start, now));
        GuideHeader {
            date_label: window_start.format("%a, %d. %b").to_string(),
            time_labels,
            time_bar_x,
        }
    }
}
