//! Directional focus navigation over the rendered cells.
//!
//! Horizontal moves pick the nearest cell center in the same row. Vertical
//! moves pick the nearest row whose cell covers the column anchor, an x
//! position that only horizontal moves update. Keeping the anchor fixed while
//! moving up and down stops focus drifting sideways across rows whose cells
//! have different widths.

use chrono::Duration;

use crate::config::GuideConfig;
use crate::geometry::{Point, Rect};
use crate::input::Direction;
use crate::model::CellId;

/// A live cell and its current geometry as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell {
    pub id: CellId,
    pub rect: Rect,
}

/// A pagination step requested when navigation runs off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// Move the time window by this much.
    Time(Duration),
    /// Move this many channel pages, with wraparound.
    Page(isize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationResult {
    /// Move focus to this cell.
    Focus(CellId),
    /// Nothing in that direction on screen: shift, re-layout, then
    /// [`FocusNavigator::resume`].
    Paginate(Shift),
    /// No cells at all; nothing happens.
    Stay,
}

/// Nearest cell strictly right of `x` in the row centered on `y`.
pub fn find_right(cells: &[PlacedCell], x: i32, y: i32) -> Option<&PlacedCell> {
    nearest_in_row(cells, y, |cx| (cx > x).then(|| cx - x))
}

/// Nearest cell strictly left of `x` in the row centered on `y`.
pub fn find_left(cells: &[PlacedCell], x: i32, y: i32) -> Option<&PlacedCell> {
    nearest_in_row(cells, y, |cx| (cx < x).then(|| x - cx))
}

fn nearest_in_row<F>(cells: &[PlacedCell], y: i32, distance: F) -> Option<&PlacedCell>
where
    F: Fn(i32) -> Option<i32>,
{
    let mut nearest: Option<(&PlacedCell, i32)> = None;
    for cell in cells {
        let center = cell.rect.center();
        if center.y != y {
            continue;
        }
        let Some(d) = distance(center.x) else {
            continue;
        };
        if nearest.is_none_or(|(_, best)| d < best) {
            nearest = Some((cell, d));
        }
    }
    nearest.map(|(cell, _)| cell)
}

/// Topmost cell below `y` whose span covers `anchor`. Ties go to the first found.
pub fn find_below(cells: &[PlacedCell], y: i32, anchor: i32) -> Option<&PlacedCell> {
    let mut nearest: Option<&PlacedCell> = None;
    for cell in cells {
        if y < cell.rect.center().y
            && cell.rect.contains_x(anchor)
            && nearest.is_none_or(|n| n.rect.y > cell.rect.y)
        {
            nearest = Some(cell);
        }
    }
    nearest
}

/// Bottommost cell above `y` whose span covers `anchor`. Ties go to the first found.
pub fn find_above(cells: &[PlacedCell], y: i32, anchor: i32) -> Option<&PlacedCell> {
    let mut nearest: Option<&PlacedCell> = None;
    for cell in cells {
        if y > cell.rect.center().y
            && cell.rect.contains_x(anchor)
            && nearest.is_none_or(|n| n.rect.y < cell.rect.y)
        {
            nearest = Some(cell);
        }
    }
    nearest
}

/// Resolves directional input and owns the column anchor.
#[derive(Debug, Clone)]
pub struct FocusNavigator {
    column_anchor: i32,
    pan: Duration,
    grid_width: i32,
    grid_height: i32,
}

impl FocusNavigator {
    pub fn new(config: &GuideConfig) -> Self {
        Self {
            column_anchor: 0,
            pan: config.pan(),
            grid_width: config.grid_width,
            grid_height: config.grid_height,
        }
    }

    pub fn column_anchor(&self) -> i32 {
        self.column_anchor
    }

    /// Align the anchor with a cell that received focus by other means than
    /// navigation. Leaves it alone when it already lies within the cell.
    pub fn sync_to(&mut self, rect: Rect) {
        if rect.x > self.column_anchor || rect.right() < self.column_anchor {
            self.column_anchor = rect.x;
        }
    }

    /// Resolve one step from the focused cell's geometry.
    pub fn navigate(
        &mut self,
        direction: Direction,
        current: Option<Rect>,
        cells: &[PlacedCell],
    ) -> NavigationResult {
        let Some(first) = cells.first() else {
            return NavigationResult::Stay;
        };
        let Some(current) = current else {
            self.sync_to(first.rect);
            return NavigationResult::Focus(first.id);
        };
        match self.pick(direction, current.center(), cells) {
            Some(id) => NavigationResult::Focus(id),
            None => {
                let shift = self.overflow(direction);
                log::debug!("No cell {direction:?} of {current:?}, paginating by {shift:?}");
                NavigationResult::Paginate(shift)
            },
        }
    }

    /// After a re-layout, search again from the grid edge that `direction`
    /// entered through, keeping `from`'s row or column.
    pub fn resume(
        &mut self,
        direction: Direction,
        from: Point,
        cells: &[PlacedCell],
    ) -> Option<CellId> {
        let entry = self.entry_point(direction, from);
        self.pick(direction, entry, cells)
    }

    /// The pagination step for running off the grid in `direction`.
    pub fn overflow(&self, direction: Direction) -> Shift {
        match direction {
            Direction::Right => Shift::Time(self.pan),
            Direction::Left => Shift::Time(-self.pan),
            Direction::Down => Shift::Page(1),
            Direction::Up => Shift::Page(-1),
        }
    }

    /// Point on the opposite grid edge to search from after paginating.
    pub fn entry_point(&self, direction: Direction, from: Point) -> Point {
        match direction {
            Direction::Right => Point::new(0, from.y),
            Direction::Left => Point::new(self.grid_width, from.y),
            Direction::Down => Point::new(from.x, 0),
            Direction::Up => Point::new(from.x, self.grid_height),
        }
    }

    fn pick(&mut self, direction: Direction, from: Point, cells: &[PlacedCell]) -> Option<CellId> {
        let found = match direction {
            Direction::Right => find_right(cells, from.x, from.y),
            Direction::Left => find_left(cells, from.x, from.y),
            Direction::Down => find_below(cells, from.y, self.column_anchor),
            Direction::Up => find_above(cells, from.y, self.column_anchor),
        }?;
        if direction.is_horizontal() {
            self.column_anchor = found.rect.x;
        }
        Some(found.id)
    }
}
