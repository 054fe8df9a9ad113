//! Channels, programs and the opaque identity of rendered cells.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

/// Identity of a visible cell element, minted by the rendering host.
///
/// The engine never synthesizes these; it only hands back what the host
/// returned from `create_cell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A broadcast channel. Immutable once fetched for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub title: String,
    /// Logo image reference, if the source provides one.
    #[serde(default)]
    pub logo: Option<String>,
}

impl Channel {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

/// A single scheduled program on a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Back-reference to the owning channel.
    pub channel: Rc<Channel>,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub image_small: Option<String>,
    pub image_large: Option<String>,
}

impl Program {
    /// Create a program, rejecting empty or inverted time spans.
    pub fn new(
        channel: Rc<Channel>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let title = title.into();
        if start >= end {
            return Err(GuideError::Listing(format!(
                "program '{title}' on {} ends ({end}) before it starts ({start})",
                channel.id
            )));
        }
        Ok(Self {
            channel,
            title,
            description: String::new(),
            start,
            end,
            image_small: None,
            image_large: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_images(mut self, small: Option<String>, large: Option<String>) -> Self {
        self.image_small = small;
        self.image_large = large;
        self
    }

    /// Airing time as `"HH:MM - HH:MM"`.
    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }

    /// Whether the program has fully ended at or before `t`.
    pub fn ended_by(&self, t: NaiveDateTime) -> bool {
        self.end <= t
    }
}
