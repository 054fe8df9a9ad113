//! Rendering host seam: the engine describes cells, the host owns them.

use crate::error::Result;
use crate::geometry::Rect;
use crate::highlight::CellVariant;
use crate::model::CellId;

/// Everything a host needs to draw one program cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellDescriptor {
    pub rect: Rect,
    /// Empty when the cell is too narrow for legible text.
    pub label: String,
    pub variant: CellVariant,
}

/// Contents of one channel label row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRow {
    /// No channel on this row of the page; the host blanks it.
    Empty,
    Logo(String),
    Title(String),
}

/// Date and time labels above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideHeader {
    pub date_label: String,
    /// One label per half-hour column.
    pub time_labels: Vec<String>,
    /// Position of the "now" marker, `None` when now is off screen.
    pub time_bar_x: Option<i32>,
}

/// Details of the focused program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub title: String,
    pub time_range: String,
    pub description: String,
    pub image: Option<String>,
    pub background: Option<String>,
}

/// The element host the guide renders into.
///
/// Identities returned by [`RenderHost::create_cell`] are opaque to the
/// engine and only valid until the cell is destroyed.
pub trait RenderHost {
    /// Create a visible cell element.
    fn create_cell(&mut self, cell: &CellDescriptor) -> Result<CellId>;

    /// Destroy a cell element. Destroying the focused cell drops focus.
    fn destroy_cell(&mut self, id: CellId) -> Result<()>;

    /// Current geometry of a live cell.
    fn geometry(&self, id: CellId) -> Option<Rect>;

    /// Move input focus to a cell.
    fn set_focus(&mut self, id: CellId) -> Result<()>;

    /// The cell holding input focus, if any.
    fn focused(&self) -> Option<CellId>;

    /// Replace the channel label column.
    fn show_channels(&mut self, rows: &[ChannelRow]) -> Result<()>;

    /// Replace the date/time header.
    fn show_header(&mut self, header: &GuideHeader) -> Result<()>;

    /// Toggle the loading indicator.
    fn set_loading(&mut self, _visible: bool) {}

    /// Show details for the newly focused program.
    fn show_program_info(&mut self, _info: &ProgramInfo) -> Result<()> {
        Ok(())
    }
}
