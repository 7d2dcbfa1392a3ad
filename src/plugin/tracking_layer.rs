//! Logic relating to calculating quest paths and following the player along
//! them
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A request for the host's pathfinder to find a path between two points. The answer must come back as an [EventQuestPathCalculated] carrying the same ticket
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct EventQuestPathRequest {
	/// Where the path starts
	from: Vec2,
	/// Where the path should end
	to: Vec2,
	/// Identifies the request
	ticket: PathTicket,
}

impl EventQuestPathRequest {
	/// Create a new instance of [EventQuestPathRequest]
	pub fn new(from: Vec2, to: Vec2, ticket: PathTicket) -> Self {
		EventQuestPathRequest { from, to, ticket }
	}
	pub fn get_from(&self) -> Vec2 {
		self.from
	}
	pub fn get_to(&self) -> Vec2 {
		self.to
	}
	pub fn get_ticket(&self) -> PathTicket {
		self.ticket
	}
}

/// The host's pathfinder answering an [EventQuestPathRequest]
#[derive(Event, Clone, Debug)]
pub struct EventQuestPathCalculated {
	/// The ticket of the request being answered
	ticket: PathTicket,
	/// The path found, empty if there is none
	waypoints: Vec<Vec2>,
}

impl EventQuestPathCalculated {
	/// Create a new instance of [EventQuestPathCalculated]
	pub fn new(ticket: PathTicket, waypoints: Vec<Vec2>) -> Self {
		EventQuestPathCalculated { ticket, waypoints }
	}
	pub fn get_ticket(&self) -> PathTicket {
		self.ticket
	}
	pub fn get_waypoints(&self) -> &[Vec2] {
		&self.waypoints
	}
}

/// Throw away every cached quest path, e.g. when the plugin is being shut down
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct EventClearQuestPaths;

/// Hand calculated paths over to the [QuestPathTracker]
#[cfg(not(tarpaulin_include))]
pub fn process_calculated_paths(
	mut events: EventReader<EventQuestPathCalculated>,
	mut tracker: ResMut<QuestPathTracker>,
	mut host: QuestHost,
) {
	for event in events.read() {
		let mut ctx = host.context();
		if let Err(e) =
			tracker.on_path_calculated(event.get_ticket(), event.get_waypoints().to_vec(), &mut ctx)
		{
			error!("{}", e);
		}
	}
}

/// Drive every cached quest path with the player's current position
#[cfg(not(tarpaulin_include))]
pub fn update_quest_paths(mut tracker: ResMut<QuestPathTracker>, mut host: QuestHost) {
	let player = host.player();
	let mut ctx = host.context();
	tracker.update(player, &mut ctx);
}

/// Read [EventClearQuestPaths] and empty the [QuestPathTracker]
#[cfg(not(tarpaulin_include))]
pub fn clear_quest_paths(
	mut events: EventReader<EventClearQuestPaths>,
	mut tracker: ResMut<QuestPathTracker>,
	mut lines: ResMut<QuestPathLines>,
) {
	// several clears in one tick are the same as one
	if events.read().count() > 0 {
		tracker.terminate(&mut *lines);
	}
}

/// Empty the [QuestPathTracker] when the app is exiting
#[cfg(not(tarpaulin_include))]
pub fn clear_quest_paths_on_exit(
	mut exits: EventReader<AppExit>,
	mut tracker: ResMut<QuestPathTracker>,
	mut lines: ResMut<QuestPathLines>,
) {
	if exits.read().count() > 0 {
		tracker.terminate(&mut *lines);
	}
}

/// Publish the path requests accepted by the [PathRequestQueue]
#[cfg(not(tarpaulin_include))]
pub fn publish_path_requests(
	mut queue: ResMut<PathRequestQueue>,
	mut writer: EventWriter<EventQuestPathRequest>,
) {
	for request in queue.drain() {
		writer.write(request);
	}
}
