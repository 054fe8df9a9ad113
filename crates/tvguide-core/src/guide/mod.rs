//! The guide session: wires layout, pagination and navigation to the
//! collaborator seams and reacts to user input.
//!
//! Every re-layout is staged. Channels and programs are fetched and the new
//! layout is computed before a single host element is touched, so a failed
//! fetch leaves the previous grid on screen.

use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::config::GuideConfig;
use crate::error::{GuideError, Result};
use crate::geometry::Point;
use crate::host::{ProgramInfo, RenderHost};
use crate::index::ProgramCellIndex;
use crate::input::{Button, Direction, InputEvent};
use crate::layout::{GridLayout, GridLayoutEngine};
use crate::model::{CellId, Program};
use crate::navigator::{self, FocusNavigator, NavigationResult, PlacedCell, Shift};
use crate::notification::NotificationStore;
use crate::pagination::PaginationController;
use crate::source::DataSource;


/// What the host should present for a program that was not played directly.
#[derive(Debug, Clone)]
pub struct MenuRequest {
    pub cell: CellId,
    pub program: Rc<Program>,
    /// `true` offers "set reminder", `false` offers "clear reminder".
    pub offer_reminder: bool,
    pub has_channel_icons: bool,
    /// Enables the menu's Play entry.
    pub playable: bool,
    /// User-chosen stream; offers "remove stream" instead of "choose stream".
    pub custom_stream: Option<String>,
}

/// Outcome of activating a cell.
#[derive(Debug, Clone)]
pub enum Activation {
    /// Playback of this channel id was started.
    Played(String),
    Menu(MenuRequest),
}

/// What the caller should do after an input event.
#[derive(Debug, Clone)]
pub enum GuideResponse {
    /// The event was consumed.
    Handled,
    /// Dismiss the guide.
    Close,
    Activated(Activation),
    Menu(MenuRequest),
}

/// Snapshot of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    pub column_anchor: i32,
    pub page: usize,
    pub window_start: NaiveDateTime,
}

/// One open program guide.
pub struct GuideSession<S, N, H> {
    source: S,
    notifications: N,
    host: H,
    engine: GridLayoutEngine,
    pagination: PaginationController,
    navigator: FocusNavigator,
    index: ProgramCellIndex,
    now: NaiveDateTime,
    closed: bool,
}

impl<S, N, H> GuideSession<S, N, H>
where
    S: DataSource,
    N: NotificationStore,
    H: RenderHost,
{
    /// Open a session. Nothing is drawn until [`Self::on_initial_layout`].
    pub fn new(
        source: S,
        notifications: N,
        host: H,
        config: GuideConfig,
        now: NaiveDateTime,
    ) -> Result<Self> {
        config.validate()?;
        let pagination =
            PaginationController::new(now, config.channels_per_page, config.window_span());
        let navigator = FocusNavigator::new(&config);
        Ok(Self {
            source,
            notifications,
            host,
            engine: GridLayoutEngine::new(config),
            pagination,
            navigator,
            index: ProgramCellIndex::new(),
            now,
            closed: false,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn notifications(&self) -> &N {
        &self.notifications
    }

    pub fn config(&self) -> &GuideConfig {
        self.engine.config()
    }

    pub fn index(&self) -> &ProgramCellIndex {
        &self.index
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn focus_state(&self) -> FocusState {
        FocusState {
            column_anchor: self.navigator.column_anchor(),
            page: self.pagination.page(),
            window_start: self.pagination.window_start(),
        }
    }

    /// Update the clock driving the header's "now" marker. Takes effect on
    /// the next re-layout.
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    /// Draw the first page and focus its first cell.
    pub fn on_initial_layout(&mut self) -> Result<()> {
        self.ensure_open()?;
        log::info!(
            "Opening guide at {} ({} channels per page)",
            self.pagination.window_start(),
            self.pagination.channels_per_page()
        );
        self.redraw(self.pagination, 0, true)?;
        if let Some(rect) = self.host.focused().and_then(|id| self.host.geometry(id)) {
            self.navigator.sync_to(rect);
        }
        Ok(())
    }

    /// Move focus one step, paginating when the grid runs out.
    ///
    /// Returns the newly focused cell, or `None` when nothing changed.
    pub fn on_directional_input(&mut self, direction: Direction) -> Result<Option<CellId>> {
        self.ensure_open()?;
        let current = self.host.focused().and_then(|id| self.host.geometry(id));
        let cells = self.placed_cells();
        let shift = match self.navigator.navigate(direction, current, &cells) {
            NavigationResult::Stay => return Ok(None),
            NavigationResult::Focus(id) => {
                self.focus(id)?;
                return Ok(Some(id));
            },
            NavigationResult::Paginate(shift) => shift,
        };

        let mut staged = self.pagination;
        let page_delta = match shift {
            Shift::Time(delta) => {
                staged.shift_time(delta);
                log::info!("Panning guide to {}", staged.window_start());
                0
            },
            Shift::Page(delta) => delta,
        };
        self.redraw(staged, page_delta, true)?;

        let from = current.map(|r| r.center()).unwrap_or_default();
        let cells = self.placed_cells();
        match self.navigator.resume(direction, from, &cells) {
            Some(id) => {
                self.focus(id)?;
                Ok(Some(id))
            },
            None => {
                log::warn!("No cell {direction:?} of the grid edge after paginating");
                Ok(self.host.focused())
            },
        }
    }

    /// Jump a whole page of channels and select the nearest cell to the
    /// edge entered through.
    pub fn on_page(&mut self, delta: isize) -> Result<Option<CellId>> {
        self.ensure_open()?;
        if delta == 0 {
            return Ok(None);
        }
        self.redraw(self.pagination, delta, true)?;
        let direction = if delta > 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        let cells = self.placed_cells();
        let Some(id) = self.navigator.resume(direction, Point::default(), &cells) else {
            return Ok(self.host.focused());
        };
        self.focus(id)?;
        Ok(Some(id))
    }

    /// Play the cell's channel when possible, otherwise request the menu.
    pub fn on_activate(&mut self, id: CellId) -> Result<Activation> {
        self.ensure_open()?;
        let program = Rc::clone(self.index.program_for(id)?);
        if self.source.is_playable(&program.channel) {
            self.source.play(&program.channel)?;
            return Ok(Activation::Played(program.channel.id.clone()));
        }
        Ok(Activation::Menu(self.menu_request(id, program)))
    }

    /// The menu's Play entry. Returns whether playback started.
    pub fn on_play(&mut self, id: CellId) -> Result<bool> {
        self.ensure_open()?;
        let program = Rc::clone(self.index.program_for(id)?);
        if !self.source.is_playable(&program.channel) {
            log::info!("{} has no stream to play", program.channel.title);
            return Ok(false);
        }
        self.source.play(&program.channel)?;
        Ok(true)
    }

    /// Attach a user-chosen stream to the cell's channel. Returns whether
    /// the channel is playable afterwards.
    pub fn on_choose_stream(&mut self, id: CellId, url: &str) -> Result<bool> {
        self.ensure_open()?;
        let program = Rc::clone(self.index.program_for(id)?);
        self.source.set_custom_stream_url(&program.channel, url)?;
        Ok(self.source.is_playable(&program.channel))
    }

    /// Drop the user-chosen stream of the cell's channel. Returns whether
    /// the channel is still playable from its listed stream.
    pub fn on_remove_custom_stream(&mut self, id: CellId) -> Result<bool> {
        self.ensure_open()?;
        let program = Rc::clone(self.index.program_for(id)?);
        self.source.delete_custom_stream_url(&program.channel)?;
        Ok(self.source.is_playable(&program.channel))
    }

    /// Menu for the focused cell.
    pub fn on_context_menu(&self) -> Result<Option<MenuRequest>> {
        self.ensure_open()?;
        let Some(id) = self.host.focused() else {
            return Ok(None);
        };
        let program = Rc::clone(self.index.program_for(id)?);
        Ok(Some(self.menu_request(id, program)))
    }

    /// Flip the reminder of a cell's program, redraw the same window and
    /// focus whatever now occupies the cell's position.
    pub fn on_reminder_toggle(&mut self, id: CellId) -> Result<Option<CellId>> {
        self.ensure_open()?;
        let program = Rc::clone(self.index.program_for(id)?);
        let rect = self
            .host
            .geometry(id)
            .ok_or_else(|| GuideError::Host(format!("no geometry for cell {id}")))?;
        if self.notifications.is_reminder_set(&program) {
            self.notifications.clear_reminder(&program)?;
        } else {
            self.notifications.set_reminder(&program)?;
        }

        self.redraw(self.pagination, 0, false)?;
        let cells = self.placed_cells();
        // One pixel left of the old edge so a zero-width cell is still found.
        let target = navigator::find_right(&cells, rect.x - 1, rect.center().y).map(|c| c.id);
        match target {
            Some(id) => self.focus(id)?,
            None => log::warn!("Toggled cell at {rect:?} vanished after redraw"),
        }
        Ok(target)
    }

    /// The host moved focus on its own (pointer hover, touch).
    pub fn on_focus(&mut self, id: CellId) -> Result<()> {
        self.ensure_open()?;
        self.focus(id)?;
        if let Some(rect) = self.host.geometry(id) {
            self.navigator.sync_to(rect);
        }
        Ok(())
    }

    /// Route one input event.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<GuideResponse> {
        let button = match event {
            InputEvent::Quit => return Ok(GuideResponse::Close),
            InputEvent::Click(id) => return Ok(GuideResponse::Activated(self.on_activate(id)?)),
            InputEvent::ButtonPress(button) => button,
        };
        if button.closes_guide() {
            return Ok(GuideResponse::Close);
        }
        if let Some(direction) = button.direction() {
            self.on_directional_input(direction)?;
            return Ok(GuideResponse::Handled);
        }
        match button {
            Button::PageDown => {
                self.on_page(1)?;
            },
            Button::PageUp => {
                self.on_page(-1)?;
            },
            Button::Select => {
                if let Some(id) = self.host.focused() {
                    return Ok(GuideResponse::Activated(self.on_activate(id)?));
                }
            },
            Button::ContextMenu => {
                if let Some(request) = self.on_context_menu()? {
                    return Ok(GuideResponse::Menu(request));
                }
            },
            _ => {},
        }
        Ok(GuideResponse::Handled)
    }

    // -- internals ----------------------------------------------------------

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(GuideError::SessionClosed);
        }
        Ok(())
    }

    fn placed_cells(&self) -> Vec<PlacedCell> {
        self.index
            .ids()
            .filter_map(|id| self.host.geometry(id).map(|rect| PlacedCell { id, rect }))
            .collect()
    }

    fn menu_request(&self, cell: CellId, program: Rc<Program>) -> MenuRequest {
        MenuRequest {
            cell,
            offer_reminder: !self.notifications.is_reminder_set(&program),
            has_channel_icons: self.source.has_channel_icons(),
            playable: self.source.is_playable(&program.channel),
            custom_stream: self.source.custom_stream_url(&program.channel),
            program,
        }
    }

    /// Focus a cell and publish its program details.
    fn focus(&mut self, id: CellId) -> Result<()> {
        let program = self.index.program_for(id)?;
        self.host.set_focus(id)?;
        let info = ProgramInfo {
            title: program.title.clone(),
            time_range: program.time_range_label(),
            description: program.description.clone(),
            image: program.image_small.clone(),
            background: if self.engine.config().program_background {
                program.image_large.clone()
            } else {
                None
            },
        };
        self.host.show_program_info(&info)
    }

    /// Lay out `staged` shifted by `page_delta` pages and swap it in.
    fn redraw(
        &mut self,
        mut staged: PaginationController,
        page_delta: isize,
        auto_focus: bool,
    ) -> Result<()> {
        self.host.set_loading(true);
        let layout = self.build_layout(&mut staged, page_delta);
        self.host.set_loading(false);
        let layout = match layout {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("Guide load failed, closing: {e}");
                self.closed = true;
                return Err(e);
            },
        };
        self.commit(staged, layout, auto_focus)
    }

    fn build_layout(
        &self,
        staged: &mut PaginationController,
        page_delta: isize,
    ) -> Result<GridLayout> {
        let channels = self.source.channels().map_err(|e| match e {
            GuideError::Load(_) => e,
            other => GuideError::Load(format!("channel list: {other}")),
        })?;
        if page_delta != 0 {
            let page = staged.shift_page(page_delta, channels.len());
            log::info!("Paging guide to page {page}");
        } else {
            staged.clamp_to(channels.len());
        }
        self.engine.layout(
            &channels,
            |channel| self.source.programs(channel),
            staged.window(),
            self.source.has_channel_icons(),
            &self.notifications,
        )
    }

    /// Swap the new cells in. New cells are created before the old ones are
    /// destroyed; a failed create removes what it added and keeps the old grid.
    fn commit(
        &mut self,
        staged: PaginationController,
        layout: GridLayout,
        auto_focus: bool,
    ) -> Result<()> {
        let mut entries = Vec::with_capacity(layout.cells.len());
        for cell in &layout.cells {
            match self.host.create_cell(&cell.descriptor()) {
                Ok(id) => entries.push((id, Rc::clone(&cell.program))),
                Err(e) => {
                    log::error!("Host refused cell {} of {}: {e}", entries.len(), layout.cells.len());
                    for (id, _) in entries {
                        if let Err(undo) = self.host.destroy_cell(id) {
                            log::warn!("Could not remove half-built cell {id}: {undo}");
                        }
                    }
                    return Err(e);
                },
            }
        }
        for id in self.index.drain_ids() {
            if let Err(e) = self.host.destroy_cell(id) {
                log::warn!("Could not remove stale cell {id}: {e}");
            }
        }
        self.index.rebuild(entries);
        self.pagination = staged;

        self.host
            .show_header(&self.engine.header(layout.window.start, self.now))?;
        self.host.show_channels(&layout.rows)?;

        if auto_focus
            && self.host.focused().is_none()
            && let Some(first) = self.index.first()
        {
            self.focus(first)?;
        }
        Ok(())
    }
}
