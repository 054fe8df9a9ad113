//! Foundation types for tvguide.
//!
//! This crate contains the types shared by every tvguide crate: channels and
//! programs, grid geometry, input events, configuration and error types.
//! It has no knowledge of layout or navigation.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod model;
