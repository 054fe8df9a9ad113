//! Channel paging and time window state.

use chrono::{Duration, NaiveDateTime, Timelike};

/// The two pagination axes, handed to the layout engine as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    pub page: usize,
    pub start: NaiveDateTime,
}

/// Round `t` down to the previous half-hour boundary.
pub fn snap_to_half_hour(t: NaiveDateTime) -> NaiveDateTime {
    let offset = Duration::minutes(i64::from(t.minute() % 30))
        + Duration::seconds(i64::from(t.second()))
        + Duration::nanoseconds(i64::from(t.nanosecond()));
    t - offset
}

/// Index of the last channel page. An empty channel list still has page 0.
pub fn last_page_index(channel_count: usize, channels_per_page: usize) -> usize {
    if channel_count == 0 || channels_per_page == 0 {
        return 0;
    }
    let full = channel_count / channels_per_page;
    if channel_count % channels_per_page == 0 {
        full - 1
    } else {
        full
    }
}

/// Owns the current page and window start. `Copy` so a caller can stage a
/// shift on a copy and commit it only once the new layout succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationController {
    page: usize,
    window_start: NaiveDateTime,
    channels_per_page: usize,
    span: Duration,
}

impl PaginationController {
    /// Start on page 0 with the window snapped from `now`.
    pub fn new(now: NaiveDateTime, channels_per_page: usize, span: Duration) -> Self {
        Self {
            page: 0,
            window_start: snap_to_half_hour(now),
            channels_per_page,
            span,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn window_start(&self) -> NaiveDateTime {
        self.window_start
    }

    /// Exclusive end of the visible time window.
    pub fn window_end(&self) -> NaiveDateTime {
        self.window_start + self.span
    }

    pub fn window(&self) -> GridWindow {
        GridWindow {
            page: self.page,
            start: self.window_start,
        }
    }

    pub fn channels_per_page(&self) -> usize {
        self.channels_per_page
    }

    pub fn last_page_index(&self, channel_count: usize) -> usize {
        last_page_index(channel_count, self.channels_per_page)
    }

    /// Wrap an out-of-range page: below zero goes to the last page, past the
    /// last page goes to zero.
    pub fn normalize_page(&self, page: isize, channel_count: usize) -> usize {
        let last = self.last_page_index(channel_count);
        if page < 0 {
            last
        } else if page as usize > last {
            0
        } else {
            page as usize
        }
    }

    /// Move the window start by `delta`.
    pub fn shift_time(&mut self, delta: Duration) {
        self.window_start += delta;
    }

    /// Move `delta` pages with wraparound. Returns the new page.
    pub fn shift_page(&mut self, delta: isize, channel_count: usize) -> usize {
        self.page = self.normalize_page(self.page as isize + delta, channel_count);
        self.page
    }

    /// Re-validate the current page against a possibly changed channel count.
    pub fn clamp_to(&mut self, channel_count: usize) -> usize {
        self.shift_page(0, channel_count)
    }
}
