//! Text-mode rendering host.
//!
//! Cells live in a map keyed by the identities this host mints. [`TextHost::draw`]
//! rasterizes the pixel grid into character columns.

use std::collections::BTreeMap;

use tvguide_core::config::GuideConfig;
use tvguide_core::error::{GuideError, Result};
use tvguide_core::geometry::Rect;
use tvguide_core::highlight::CellVariant;
use tvguide_core::model::CellId;
use tvguide_core::{CellDescriptor, ChannelRow, GuideHeader, ProgramInfo, RenderHost};

/// Horizontal pixels per character column.
const PX_PER_COLUMN: i32 = 12;

pub struct TextHost {
    next_id: u32,
    cells: BTreeMap<CellId, CellDescriptor>,
    focus: Option<CellId>,
    rows: Vec<ChannelRow>,
    header: Option<GuideHeader>,
    info: Option<ProgramInfo>,
    loading: bool,
    channel_column_width: i32,
    half_hour_width: i32,
    grid_right: i32,
    row_header_height: i32,
    row_height: i32,
}

impl TextHost {
    pub fn new(config: &GuideConfig) -> Self {
        Self {
            next_id: 0,
            cells: BTreeMap::new(),
            focus: None,
            rows: Vec::new(),
            header: None,
            info: None,
            loading: false,
            channel_column_width: config.channel_column_width,
            half_hour_width: config.half_hour_width,
            grid_right: config.grid_right,
            row_header_height: config.row_header_height,
            row_height: config.row_height as i32,
        }
    }

    fn column(&self, x: i32) -> usize {
        (x.max(0) / PX_PER_COLUMN) as usize
    }

    /// Render the whole guide as text.
    pub fn draw(&self) -> String {
        let width = self.column(self.grid_right) + 1;
        let label_width = self.column(self.channel_column_width).saturating_sub(1);
        let mut out = Vec::new();

        if let Some(header) = &self.header {
            let mut line = blank(width);
            put(&mut line, 0, label_width, &header.date_label);
            for (i, label) in header.time_labels.iter().enumerate() {
                let x = self.channel_column_width + i as i32 * self.half_hour_width;
                let col = self.column(x);
                put(&mut line, col, col + label.len(), label);
            }
            out.push(line.into_iter().collect::<String>());
            if let Some(x) = header.time_bar_x {
                let mut bar = blank(width);
                let col = self.column(x);
                put(&mut bar, col, col + 1, "v");
                out.push(bar.into_iter().collect::<String>());
            }
        }

        for (row, channel) in self.rows.iter().enumerate() {
            let mut line = blank(width);
            let name = match channel {
                ChannelRow::Empty => String::new(),
                ChannelRow::Logo(path) => format!("<{path}>"),
                ChannelRow::Title(title) => title.clone(),
            };
            put(&mut line, 0, label_width, &name);

            let top = self.row_header_height + row as i32 * self.row_height;
            let mut in_row: Vec<_> = self.cells.iter().filter(|(_, c)| c.rect.y == top).collect();
            in_row.sort_by_key(|(_, c)| c.rect.x);
            for (id, cell) in in_row {
                let (start, end) = self.span(cell.rect);
                put(&mut line, start, end, &self.cell_text(*id, cell));
            }
            out.push(line.into_iter().collect::<String>().trim_end().to_string());
        }

        if self.loading {
            out.push("loading...".to_string());
        }
        if let Some(info) = &self.info {
            out.push(String::new());
            out.push(format!("{}  {}", info.title, info.time_range));
            if !info.description.is_empty() {
                out.push(info.description.clone());
            }
        }
        out.join("\n")
    }

    fn span(&self, rect: Rect) -> (usize, usize) {
        let start = self.column(rect.x);
        let end = self.column(rect.right()).max(start + 1);
        (start, end)
    }

    fn cell_text(&self, id: CellId, cell: &CellDescriptor) -> String {
        let mark = match cell.variant {
            CellVariant::ReminderPending => "*",
            CellVariant::Normal => "",
        };
        if self.focus == Some(id) {
            format!("[{mark}{}]", cell.label)
        } else {
            format!("|{mark}{}", cell.label)
        }
    }
}

fn blank(width: usize) -> Vec<char> {
    vec![' '; width]
}

/// Write `text` into `line[start..end]`, truncating to fit.
fn put(line: &mut [char], start: usize, end: usize, text: &str) {
    let end = end.min(line.len());
    for (slot, ch) in line.iter_mut().take(end).skip(start).zip(text.chars()) {
        *slot = ch;
    }
}

impl RenderHost for TextHost {
    fn create_cell(&mut self, cell: &CellDescriptor) -> Result<CellId> {
        self.next_id += 1;
        let id = CellId(self.next_id);
        self.cells.insert(id, cell.clone());
        Ok(id)
    }

    fn destroy_cell(&mut self, id: CellId) -> Result<()> {
        self.cells
            .remove(&id)
            .ok_or_else(|| GuideError::Host(format!("no cell {id} to destroy")))?;
        if self.focus == Some(id) {
            self.focus = None;
        }
        Ok(())
    }

    fn geometry(&self, id: CellId) -> Option<Rect> {
        self.cells.get(&id).map(|c| c.rect)
    }

    fn set_focus(&mut self, id: CellId) -> Result<()> {
        if !self.cells.contains_key(&id) {
            return Err(GuideError::NotFound(id));
        }
        self.focus = Some(id);
        Ok(())
    }

    fn focused(&self) -> Option<CellId> {
        self.focus
    }

    fn show_channels(&mut self, rows: &[ChannelRow]) -> Result<()> {
        self.rows = rows.to_vec();
        Ok(())
    }

    fn show_header(&mut self, header: &GuideHeader) -> Result<()> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn show_program_info(&mut self, info: &ProgramInfo) -> Result<()> {
        log::debug!("Focused {} ({})", info.title, info.time_range);
        self.info = Some(info.clone());
        Ok(())
    }
}
