//! Quest paths are walking routes from the local player to the marker of a
//! quest, calculated by an external pathfinding service and cached per quest.
//!
//! A cached path goes stale when the player wanders too far from where it was
//! calculated, or when the quest marker moves. Stale paths are recalculated,
//! fresh ones are followed as the player walks, optionally dragging the quest
//! marker along to the next useful waypoint.
//!
//! Definitions:
//!
//! * Quest marker - the host game's destination hint for a quest
//! * Waypoint - one point of a path, paths run from the player's side towards the marker
//! * Gateway - the external pathfinding service, see [host::PathGateway]
//! * Entry - the cached state of one quest's path, see [quest_path::QuestPath]
//!
//! ```text
//!  player                                   marker
//!    o-----x-----x-----x-----x-----x-----x-----+
//!          ^
//!          current waypoint
//! ```
//!

pub mod error;
pub mod host;
pub mod marker_bridge;
pub mod path_cache;
pub mod quest_path;
pub mod settings;
pub mod tracker;
pub mod utilities;
