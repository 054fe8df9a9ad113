//! Shared test utilities for guide engine tests.
//!
//! Provides a [`MockHost`] that records every host call for assertion and a
//! [`FixtureSource`] with programmable failures.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{GuideError, Result};
use crate::geometry::Rect;
use crate::host::{CellDescriptor, ChannelRow, GuideHeader, ProgramInfo, RenderHost};
use crate::model::{CellId, Channel, Program};
use crate::source::DataSource;

/// `hour:minute` on the fixture day (a Friday).
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

/// A program on a throwaway channel with the given id.
pub fn program(channel_id: &str, title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Program {
    let channel = Rc::new(Channel::new(channel_id, channel_id.to_uppercase()));
    Program::new(channel, title, start, end).unwrap()
}

/// A program on a copy of `channel`.
pub fn program_on(
    channel: &Channel,
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Program {
    Program::new(Rc::new(channel.clone()), title, start, end).unwrap()
}

/// `n` channels with ids `ch0..` and titles `Channel 0..`.
pub fn channels(n: usize) -> Vec<Rc<Channel>> {
    (0..n)
        .map(|i| Rc::new(Channel::new(format!("ch{i}"), format!("Channel {i}"))))
        .collect()
}

// ---------------------------------------------------------------------------
// MockHost
// ---------------------------------------------------------------------------

/// A host that keeps live cells in a map and records everything else.
#[derive(Debug, Default)]
pub struct MockHost {
    next_id: u32,
    pub cells: BTreeMap<CellId, CellDescriptor>,
    pub focus: Option<CellId>,
    pub rows: Vec<ChannelRow>,
    pub headers: Vec<GuideHeader>,
    pub infos: Vec<ProgramInfo>,
    pub created: usize,
    pub destroyed: usize,
    pub loading: Vec<bool>,
    /// When set, creates fail once this many more cells have been made.
    pub create_budget: Option<usize>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live cell with `label`, if any.
    pub fn cell_labelled(&self, label: &str) -> Option<CellId> {
        self.cells
            .iter()
            .find(|(_, c)| c.label == label)
            .map(|(id, _)| *id)
    }

    /// Label of the focused cell.
    pub fn focused_label(&self) -> Option<&str> {
        self.focus
            .and_then(|id| self.cells.get(&id))
            .map(|c| c.label.as_str())
    }
}

impl RenderHost for MockHost {
    fn create_cell(&mut self, cell: &CellDescriptor) -> Result<CellId> {
        if let Some(budget) = self.create_budget.as_mut() {
            if *budget == 0 {
                return Err(GuideError::Host("full".into()));
            }
            *budget -= 1;
        }
        self.next_id += 1;
        let id = CellId(self.next_id);
        self.cells.insert(id, cell.clone());
        self.created += 1;
        Ok(id)
    }

    fn destroy_cell(&mut self, id: CellId) -> Result<()> {
        if self.cells.remove(&id).is_none() {
            return Err(GuideError::Host(format!("destroying unknown cell {id}")));
        }
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.destroyed += 1;
        Ok(())
    }

    fn geometry(&self, id: CellId) -> Option<Rect> {
        self.cells.get(&id).map(|c| c.rect)
    }

    fn set_focus(&mut self, id: CellId) -> Result<()> {
        if !self.cells.contains_key(&id) {
            return Err(GuideError::Host(format!("focusing unknown cell {id}")));
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
        self.headers.push(header.clone());
        Ok(())
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading.push(visible);
    }

    fn show_program_info(&mut self, info: &ProgramInfo) -> Result<()> {
        self.infos.push(info.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FixtureSource
// ---------------------------------------------------------------------------

/// In-memory data source whose fetches can be made to fail.
#[derive(Debug, Default)]
pub struct FixtureSource {
    channels: Vec<Rc<Channel>>,
    programs: HashMap<String, Vec<(String, NaiveDateTime, NaiveDateTime)>>,
    playable: HashSet<String>,
    custom_streams: HashMap<String, String>,
    pub icons: bool,
    /// When set, every fetch fails with a load error.
    pub failing: bool,
    /// Program fetches for this channel id fail with a load error.
    pub failing_programs_for: Option<String>,
    pub played: Vec<String>,
}

impl FixtureSource {
    pub fn new(channels: Vec<Rc<Channel>>) -> Self {
        Self {
            channels,
            ..Self::default()
        }
    }

    /// Give every channel the same schedule.
    pub fn with_schedule(mut self, schedule: &[(&str, NaiveDateTime, NaiveDateTime)]) -> Self {
        for channel in &self.channels {
            self.programs.insert(
                channel.id.clone(),
                schedule
                    .iter()
                    .map(|(t, s, e)| (t.to_string(), *s, *e))
                    .collect(),
            );
        }
        self
    }

    /// Replace one channel's schedule.
    pub fn with_programs(
        mut self,
        channel_id: &str,
        schedule: &[(&str, NaiveDateTime, NaiveDateTime)],
    ) -> Self {
        self.programs.insert(
            channel_id.to_string(),
            schedule
                .iter()
                .map(|(t, s, e)| (t.to_string(), *s, *e))
                .collect(),
        );
        self
    }

    pub fn with_playable(mut self, channel_id: &str) -> Self {
        self.playable.insert(channel_id.to_string());
        self
    }
}

impl DataSource for FixtureSource {
    fn channels(&self) -> Result<Vec<Rc<Channel>>> {
        if self.failing {
            return Err(GuideError::Load("channel list unavailable".into()));
        }
        Ok(self.channels.clone())
    }

    fn programs(&self, channel: &Channel) -> Result<Vec<Program>> {
        if self.failing || self.failing_programs_for.as_deref() == Some(channel.id.as_str()) {
            return Err(GuideError::Load(format!("no programs for {}", channel.id)));
        }
        let Some(owner) = self.channels.iter().find(|c| c.id == channel.id) else {
            return Err(GuideError::Load(format!("unknown channel {}", channel.id)));
        };
        self.programs
            .get(&channel.id)
            .into_iter()
            .flatten()
            .map(|(title, start, end)| Program::new(Rc::clone(owner), title.as_str(), *start, *end))
            .collect()
    }

    fn has_channel_icons(&self) -> bool {
        self.icons
    }

    fn is_playable(&self, channel: &Channel) -> bool {
        self.playable.contains(&channel.id) || self.custom_streams.contains_key(&channel.id)
    }

    fn play(&mut self, channel: &Channel) -> Result<()> {
        self.played.push(channel.id.clone());
        Ok(())
    }

    fn custom_stream_url(&self, channel: &Channel) -> Option<String> {
        self.custom_streams.get(&channel.id).cloned()
    }

    fn set_custom_stream_url(&mut self, channel: &Channel, url: &str) -> Result<()> {
        self.custom_streams.insert(channel.id.clone(), url.to_string());
        Ok(())
    }

    fn delete_custom_stream_url(&mut self, channel: &Channel) -> Result<()> {
        self.custom_streams.remove(&channel.id);
        Ok(())
    }
}
