//! tvguide core engine.
//!
//! Turns a channel page and a time window into positioned program cells,
//! keeps paging state for both axes, and resolves directional focus moves
//! against whatever cells the rendering host currently shows. Data access,
//! reminder storage and drawing are collaborators behind traits.

// Re-exports from tvguide-types (foundation types).
pub use tvguide_types::config;
pub use tvguide_types::error;
pub use tvguide_types::geometry;
pub use tvguide_types::input;
pub use tvguide_types::model;

pub mod guide;
pub mod highlight;
pub mod host;
pub mod index;
pub mod layout;
pub mod navigator;
pub mod notification;
pub mod pagination;
pub mod source;

#[cfg(test)]
pub(crate) mod test_utils;

pub use guide::{Activation, FocusState, GuideResponse, GuideSession, MenuRequest};
pub use host::{CellDescriptor, ChannelRow, GuideHeader, ProgramInfo, RenderHost};
pub use index::ProgramCellIndex;
pub use layout::{CellSpec, GridLayout, GridLayoutEngine};
pub use navigator::{FocusNavigator, NavigationResult, PlacedCell, Shift};
pub use notification::{MemoryNotificationStore, NotificationStore};
pub use pagination::{GridWindow, PaginationController};
pub use source::{DataSource, Listing, MemorySource};
