//! The boundary between the tracker and the host game. Everything the
//! tracker needs from the host (quest log, pathfinding, marker broadcasts and
//! line rendering) is reached through the traits defined here
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Fields of a quest record which the host requires when a marker change is rebroadcast. The tracker never interprets them, they are copied verbatim
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub struct QuestBroadcastFields {
	/// Host specific flags
	pub flags: u32,
	/// The map the quest leads to
	pub map_to: u32,
	/// State of the quest within the log
	pub log_state: u32,
}

/// A quest as seen in the host's quest log
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Quest {
	/// Identifier of the quest
	quest_id: QuestID,
	/// Marker position, non-finite coordinates mean the quest has no marker
	marker: Vec2,
	/// Pass-through fields for rebroadcasting
	fields: QuestBroadcastFields,
}

impl Quest {
	/// Create a new instance of [Quest]
	pub fn new(quest_id: QuestID, marker: Vec2, fields: QuestBroadcastFields) -> Self {
		Quest {
			quest_id,
			marker,
			fields,
		}
	}
	/// Get the quest identifier
	pub fn get_quest_id(&self) -> QuestID {
		self.quest_id
	}
	/// Get the raw marker as the host stores it
	pub fn get_marker(&self) -> Vec2 {
		self.marker
	}
	/// Get the marker, [None] when the quest has no marker
	pub fn get_marker_position(&self) -> Option<Vec2> {
		marker_position(self.marker)
	}
	/// Update the marker
	pub fn set_marker(&mut self, marker: Vec2) {
		self.marker = marker;
	}
	/// Get the pass-through fields
	pub fn get_fields(&self) -> QuestBroadcastFields {
		self.fields
	}
}

/// Read and write access to the host's quest log
pub trait QuestLog {
	/// Find a quest, [None] if it isn't in the log
	fn get_quest(&self, quest_id: QuestID) -> Option<&Quest>;
	/// The quest the player is actively tracking
	fn get_active_quest(&self) -> Option<&Quest>;
	/// Overwrite the marker of a quest. Returns `false` if the quest doesn't exist
	fn set_quest_marker(&mut self, quest_id: QuestID, marker: Vec2) -> bool;
	/// Whether `quest_id` is the actively tracked quest
	fn is_active(&self, quest_id: QuestID) -> bool {
		self.get_active_quest()
			.is_some_and(|quest| quest.get_quest_id() == quest_id)
	}
}

/// Handed to the [PathGateway] with every request and returned alongside the waypoints so the completion can be matched back to the entry that asked for it
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Reflect)]
pub struct PathTicket {
	/// Quest the path leads to
	quest_id: QuestID,
	/// Identity of the requesting entry within the cache
	generation: u64,
	/// Counts requests made by the entry
	request: u32,
}

impl PathTicket {
	/// Create a new instance of [PathTicket]
	pub fn new(quest_id: QuestID, generation: u64, request: u32) -> Self {
		PathTicket {
			quest_id,
			generation,
			request,
		}
	}
	/// Get the quest
	pub fn get_quest_id(&self) -> QuestID {
		self.quest_id
	}
	/// Get the generation of the requesting entry
	pub fn get_generation(&self) -> u64 {
		self.generation
	}
	/// Get the request number
	pub fn get_request(&self) -> u32 {
		self.request
	}
}

/// External pathfinding service. The completion is delivered later through [crate::prelude::QuestPathTracker::on_path_calculated] carrying the same ticket, possibly after the requesting entry has been evicted
pub trait PathGateway {
	/// Ask for a path between two points. Returns whether the request was accepted
	fn request_path(&mut self, from: Vec2, to: Vec2, ticket: PathTicket) -> bool;
}

/// Who produced a marker change notification
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum MarkerOrigin {
	/// The host game changed the marker
	Host,
	/// The tracker rewrote the marker to point at a waypoint
	Redirect,
}

/// Why the host announced a marker change. All reasons are handled alike
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum QuestMarkerReason {
	/// Details such as the marker of a quest changed
	DetailsChanged,
	/// A quest was added to the log
	QuestAdded,
	/// The player switched the quest they are tracking
	ActiveQuestChanged,
}

/// Notification that the marker of a quest has changed
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct QuestMarkerChanged {
	/// Affected quest
	pub quest_id: QuestID,
	/// New marker position
	pub marker: Vec2,
	/// Pass-through fields of the quest record
	pub fields: QuestBroadcastFields,
	/// Why it changed
	pub reason: QuestMarkerReason,
	/// Who changed it
	pub origin: MarkerOrigin,
}

impl QuestMarkerChanged {
	/// Build a host originated notification from a quest record
	pub fn from_host(quest: &Quest, reason: QuestMarkerReason) -> Self {
		QuestMarkerChanged {
			quest_id: quest.get_quest_id(),
			marker: quest.get_marker(),
			fields: quest.get_fields(),
			reason,
			origin: MarkerOrigin::Host,
		}
	}
}

/// Channel used to tell the host (and any other listener) that a marker changed
pub trait MarkerBroadcast {
	/// Publish a marker change
	fn broadcast_quest_marker_changed(&mut self, change: QuestMarkerChanged);
}

impl MarkerBroadcast for Vec<QuestMarkerChanged> {
	fn broadcast_quest_marker_changed(&mut self, change: QuestMarkerChanged) {
		self.push(change);
	}
}

/// Handle to a line owned by a [PathRenderer]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Reflect)]
pub struct LineHandle(u64);

impl LineHandle {
	/// Create a new instance of [LineHandle]
	pub fn new(id: u64) -> Self {
		LineHandle(id)
	}
	/// Get the raw id
	pub fn get(&self) -> u64 {
		self.0
	}
}

/// How a path segment should be drawn
#[derive(Clone, Copy, PartialEq, Debug, Reflect)]
pub struct LineStyle {
	/// Colour of the segment
	pub color: PathColor,
	/// Draw onto the 3d terrain
	pub draw_on_terrain: bool,
	/// Draw onto the minimap
	pub draw_on_minimap: bool,
}

/// Allocates and frees path segments in the host's renderer
pub trait PathRenderer {
	/// Add a line segment, the returned handle must later be passed to [PathRenderer::remove_line]
	fn add_line(&mut self, from: Vec2, to: Vec2, label: String, style: LineStyle) -> LineHandle;
	/// Free a line segment
	fn remove_line(&mut self, handle: LineHandle);
}

/// Everything an operation on the tracker may need from the host for a single call
pub struct HostContext<'a> {
	/// Quest log
	pub quest_log: &'a mut dyn QuestLog,
	/// Pathfinding service
	pub gateway: &'a mut dyn PathGateway,
	/// Line renderer
	pub renderer: &'a mut dyn PathRenderer,
	/// Marker broadcast channel
	pub broadcast: &'a mut dyn MarkerBroadcast,
	/// User options
	pub settings: &'a QuestPathSettings,
	/// Time elapsed since the app started
	pub elapsed: Duration,
}

impl HostContext<'_> {
	/// The style configured for drawing path segments
	pub fn line_style(&self) -> LineStyle {
		LineStyle {
			color: self.settings.get_color(),
			draw_on_terrain: self.settings.draw_on_terrain(),
			draw_on_minimap: self.settings.draw_on_minimap(),
		}
	}
}
