//! Useful structures and spatial helpers used by the quest path tracker
//!

use bevy::prelude::*;

/// When the player has moved further than this (squared) distance from where a path was calculated from the path is treated as stale and recalculated
pub const RECALCULATE_DISTANCE_SQUARED: f32 = 100.0 * 100.0;
/// The quest marker is only redirected when the current waypoint has moved further than this (squared) distance from the last redirect point
pub const REDIRECT_DISTANCE_SQUARED: f32 = 300.0 * 300.0;

/// Identifies a quest within the host's quest log. Stable for the life of the quest
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct QuestID(u32);

impl QuestID {
	/// Create a new instance of [QuestID]
	pub fn new(id: u32) -> Self {
		QuestID(id)
	}
	/// Get the raw identifier
	pub fn get(&self) -> u32 {
		self.0
	}
}

impl std::fmt::Display for QuestID {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Square of the euclidean distance between two world positions, avoids a square root when only comparing distances
pub fn square_distance(a: Vec2, b: Vec2) -> f32 {
	a.distance_squared(b)
}

/// Host markers use non-finite coordinates to mean "no marker", convert that into an [Option]
pub fn marker_position(marker: Vec2) -> Option<Vec2> {
	if marker.is_finite() {
		Some(marker)
	} else {
		None
	}
}

/// Find the waypoint the player is heading towards.
///
/// Defaults to the last waypoint and then walks forward from index `1`,
/// picking the first waypoint which is strictly closer to `from` than the
/// final waypoint is. This is a cheap forward heuristic rather than a true
/// nearest point search, a path which loops back near its start can make it
/// pick an early waypoint.
///
/// Returns [None] for an empty path
pub fn find_current_waypoint(waypoints: &[Vec2], from: Vec2) -> Option<usize> {
	let last = waypoints.last()?;
	let from_end_waypoint = square_distance(from, *last);
	let mut current = waypoints.len() - 1;
	for (i, waypoint) in waypoints.iter().enumerate().skip(1) {
		if square_distance(from, *waypoint) < from_end_waypoint {
			current = i;
			break;
		}
	}
	Some(current)
}

/// A colour in the host's packed `0xAARRGGBB` format
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub struct PathColor(u32);

impl Default for PathColor {
	fn default() -> Self {
		PathColor(0xFFFF_FFFF)
	}
}

impl PathColor {
	/// Create a new instance of [PathColor] from a packed `0xAARRGGBB` value
	pub fn new(argb: u32) -> Self {
		PathColor(argb)
	}
	/// Get the packed `0xAARRGGBB` value
	pub fn get(&self) -> u32 {
		self.0
	}
}
