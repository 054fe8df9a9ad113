//! Program data seam and a listing-file backed implementation.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};
use crate::model::{Channel, Program};

/// Abstraction over the provider of channel and program data.
///
/// Calls are synchronous; a failure must be reported as an error rather
/// than an empty list, since an empty list is a valid (blank) row.
pub trait DataSource {
    /// All channels, in display order.
    fn channels(&self) -> Result<Vec<Rc<Channel>>>;

    /// Programs of one channel, ordered by start time.
    fn programs(&self, channel: &Channel) -> Result<Vec<Program>>;

    /// Whether channel rows should show logos instead of titles.
    fn has_channel_icons(&self) -> bool;

    /// Whether the channel has a listed or a user-chosen stream.
    fn is_playable(&self, channel: &Channel) -> bool;

    /// Start playback of a channel.
    fn play(&mut self, channel: &Channel) -> Result<()>;

    /// User-chosen stream overriding the listed one.
    fn custom_stream_url(&self, channel: &Channel) -> Option<String>;

    fn set_custom_stream_url(&mut self, channel: &Channel, url: &str) -> Result<()>;

    fn delete_custom_stream_url(&mut self, channel: &Channel) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Listing file format
// ---------------------------------------------------------------------------

/// A serialized program guide (`listing.toml` or `listing.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    /// Channel rows show logos when set.
    #[serde(default)]
    pub channel_icons: bool,
    #[serde(default)]
    pub channels: Vec<ListingChannel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingChannel {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub logo: Option<String>,
    /// Playback URL. Channels without one are not playable.
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub programs: Vec<ListingProgram>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingProgram {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub image_small: Option<String>,
    #[serde(default)]
    pub image_large: Option<String>,
}

impl Listing {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a listing, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            other => Err(GuideError::Listing(format!(
                "unsupported listing format {other:?} for {}",
                path.display()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Serves a fully loaded [`Listing`] from memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    channels: Vec<Rc<Channel>>,
    programs: HashMap<String, Vec<Program>>,
    streams: HashMap<String, String>,
    custom_streams: HashMap<String, String>,
    channel_icons: bool,
    last_played: Option<String>,
}

impl MemorySource {
    /// Build a source from a listing, validating every program span.
    pub fn from_listing(listing: Listing) -> Result<Self> {
        let mut source = Self {
            channel_icons: listing.channel_icons,
            ..Self::default()
        };
        for entry in listing.channels {
            if source.programs.contains_key(&entry.id) {
                return Err(GuideError::Listing(format!(
                    "duplicate channel id '{}'",
                    entry.id
                )));
            }
            let channel = Rc::new(Channel {
                id: entry.id.clone(),
                title: entry.title,
                logo: entry.logo,
            });
            let mut programs = entry
                .programs
                .into_iter()
                .map(|p| {
                    Ok(Program::new(Rc::clone(&channel), p.title, p.start, p.end)?
                        .with_description(p.description)
                        .with_images(p.image_small, p.image_large))
                })
                .collect::<Result<Vec<_>>>()?;
            programs.sort_by_key(|p| p.start);
            if let Some(url) = entry.stream {
                source.streams.insert(entry.id.clone(), url);
            }
            source.programs.insert(entry.id, programs);
            source.channels.push(channel);
        }
        log::info!(
            "Loaded listing: {} channels, {} programs",
            source.channels.len(),
            source.programs.values().map(Vec::len).sum::<usize>()
        );
        Ok(source)
    }

    /// Id of the channel most recently passed to [`DataSource::play`].
    pub fn last_played(&self) -> Option<&str> {
        self.last_played.as_deref()
    }

    /// Stream URL for a channel. A custom stream wins over the listed one.
    pub fn stream_url(&self, channel: &Channel) -> Option<&str> {
        self.custom_streams
            .get(&channel.id)
            .or_else(|| self.streams.get(&channel.id))
            .map(String::as_str)
    }

    fn require_channel(&self, channel: &Channel) -> Result<()> {
        if self.programs.contains_key(&channel.id) {
            Ok(())
        } else {
            Err(GuideError::Listing(format!("unknown channel '{}'", channel.id)))
        }
    }
}

impl DataSource for MemorySource {
    fn channels(&self) -> Result<Vec<Rc<Channel>>> {
        Ok(self.channels.clone())
    }

    fn programs(&self, channel: &Channel) -> Result<Vec<Program>> {
        self.programs
            .get(&channel.id)
            .cloned()
            .ok_or_else(|| GuideError::Load(format!("unknown channel '{}'", channel.id)))
    }

    fn has_channel_icons(&self) -> bool {
        self.channel_icons
    }

    fn is_playable(&self, channel: &Channel) -> bool {
        self.stream_url(channel).is_some()
    }

    fn play(&mut self, channel: &Channel) -> Result<()> {
        let Some(url) = self.stream_url(channel) else {
            return Err(GuideError::Listing(format!(
                "channel '{}' has no stream",
                channel.id
            )));
        };
        log::info!("Playing {} from {url}", channel.title);
        self.last_played = Some(channel.id.clone());
        Ok(())
    }

    fn custom_stream_url(&self, channel: &Channel) -> Option<String> {
        self.custom_streams.get(&channel.id).cloned()
    }

    fn set_custom_stream_url(&mut self, channel: &Channel, url: &str) -> Result<()> {
        self.require_channel(channel)?;
        if url.trim().is_empty() {
            return Err(GuideError::Listing(format!(
                "empty stream url for '{}'",
                channel.id
            )));
        }
        log::info!("Custom stream for {}: {url}", channel.title);
        self.custom_streams.insert(channel.id.clone(), url.to_string());
        Ok(())
    }

    fn delete_custom_stream_url(&mut self, channel: &Channel) -> Result<()> {
        self.require_channel(channel)?;
        if self.custom_streams.remove(&channel.id).is_some() {
            log::info!("Removed custom stream for {}", channel.title);
        }
        Ok(())
    }
}
