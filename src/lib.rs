//! This is a plugin for Bevy game engine to track walking paths from the player to quest markers and keep them fresh as the player moves
//!

pub mod plugin;
pub mod questpaths;

pub mod prelude;
