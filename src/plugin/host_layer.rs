//! Bevy resources standing in for the host game. The host mirrors its quest
//! log and player position into them, serves the queued path requests and
//! renders the queued path lines
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Mirror of the host's quest log
#[derive(Resource, Default, Debug, Clone)]
pub struct HostQuestLog {
	/// Every quest in the log
	quests: BTreeMap<QuestID, Quest>,
	/// The quest the player is tracking
	active: Option<QuestID>,
}

impl HostQuestLog {
	/// Get the map of quests
	pub fn get(&self) -> &BTreeMap<QuestID, Quest> {
		&self.quests
	}
	/// Add or replace a quest
	pub fn insert_quest(&mut self, quest: Quest) {
		self.quests.insert(quest.get_quest_id(), quest);
	}
	/// Remove a quest, if it was the active quest then no quest is active anymore
	pub fn remove_quest(&mut self, quest_id: QuestID) -> Option<Quest> {
		if self.active == Some(quest_id) {
			self.active = None;
		}
		self.quests.remove(&quest_id)
	}
	pub fn get_active_quest_id(&self) -> Option<QuestID> {
		self.active
	}
	/// Switch the tracked quest
	pub fn set_active_quest(&mut self, quest_id: Option<QuestID>) {
		self.active = quest_id;
	}
	pub fn get_quest_mut(&mut self, quest_id: QuestID) -> Option<&mut Quest> {
		self.quests.get_mut(&quest_id)
	}
}

impl QuestLog for HostQuestLog {
	fn get_quest(&self, quest_id: QuestID) -> Option<&Quest> {
		self.quests.get(&quest_id)
	}
	fn get_active_quest(&self) -> Option<&Quest> {
		self.active.and_then(|id| self.quests.get(&id))
	}
	fn set_quest_marker(&mut self, quest_id: QuestID, marker: Vec2) -> bool {
		match self.quests.get_mut(&quest_id) {
			Some(quest) => {
				quest.set_marker(marker);
				true
			}
			None => false,
		}
	}
}

/// Position of the character the player controls, [None] while not in the world (e.g during a loading screen)
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct LocalPlayerPosition(Option<Vec2>);

impl LocalPlayerPosition {
	/// Create a new instance of [LocalPlayerPosition]
	pub fn new(position: Option<Vec2>) -> Self {
		LocalPlayerPosition(position)
	}
	pub fn get(&self) -> Option<Vec2> {
		self.0
	}
	pub fn set(&mut self, position: Option<Vec2>) {
		self.0 = position;
	}
}

/// Path requests waiting to be published as [EventQuestPathRequest]s. Requests are refused until the host says it is ready for pathing
#[derive(Resource, Debug)]
pub struct PathRequestQueue {
	/// Whether the host's pathfinder can take requests
	ready: bool,
	/// Accepted requests not yet published
	pending: Vec<EventQuestPathRequest>,
}

impl Default for PathRequestQueue {
	fn default() -> Self {
		PathRequestQueue {
			ready: true,
			pending: Vec::new(),
		}
	}
}

impl PathRequestQueue {
	pub fn is_ready(&self) -> bool {
		self.ready
	}
	/// Mark whether the host's pathfinder can take requests, e.g. it isn't while a map is loading
	pub fn set_ready(&mut self, ready: bool) {
		self.ready = ready;
	}
	/// Get the requests waiting to be published
	pub fn get_queue(&self) -> &[EventQuestPathRequest] {
		&self.pending
	}
	/// Take every waiting request
	pub fn drain(&mut self) -> Vec<EventQuestPathRequest> {
		std::mem::take(&mut self.pending)
	}
}

impl PathGateway for PathRequestQueue {
	fn request_path(&mut self, from: Vec2, to: Vec2, ticket: PathTicket) -> bool {
		if !self.ready {
			return false;
		}
		self.pending.push(EventQuestPathRequest::new(from, to, ticket));
		true
	}
}

/// A segment of a quest path for the host to draw
#[derive(Debug, Clone, PartialEq)]
pub struct QuestPathLine {
	/// Start of the segment
	pub from: Vec2,
	/// End of the segment
	pub to: Vec2,
	/// Name of the segment, `"{quest} - {index}"`
	pub label: String,
	/// How to draw it
	pub style: LineStyle,
}

/// Every quest path segment currently allocated
#[derive(Resource, Default, Debug)]
pub struct QuestPathLines {
	/// Live segments
	lines: BTreeMap<LineHandle, QuestPathLine>,
	/// Id of the next allocated handle
	next_handle: u64,
}

impl QuestPathLines {
	/// Get the map of segments
	pub fn get(&self) -> &BTreeMap<LineHandle, QuestPathLine> {
		&self.lines
	}
	pub fn len(&self) -> usize {
		self.lines.len()
	}
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

impl PathRenderer for QuestPathLines {
	fn add_line(&mut self, from: Vec2, to: Vec2, label: String, style: LineStyle) -> LineHandle {
		self.next_handle += 1;
		let handle = LineHandle::new(self.next_handle);
		self.lines.insert(
			handle,
			QuestPathLine {
				from,
				to,
				label,
				style,
			},
		);
		handle
	}
	fn remove_line(&mut self, handle: LineHandle) {
		if self.lines.remove(&handle).is_none() {
			warn!("Removing quest path line {:?} that doesn't exist", handle);
		}
	}
}

/// Marker changes made by the tracker waiting to be published as [EventQuestMarkerChanged]
#[derive(Resource, Default, Debug)]
pub struct MarkerBroadcastQueue(Vec<QuestMarkerChanged>);

impl MarkerBroadcastQueue {
	/// Get the waiting changes
	pub fn get(&self) -> &[QuestMarkerChanged] {
		&self.0
	}
	/// Take every waiting change
	pub fn drain(&mut self) -> Vec<QuestMarkerChanged> {
		std::mem::take(&mut self.0)
	}
}

impl MarkerBroadcast for MarkerBroadcastQueue {
	fn broadcast_quest_marker_changed(&mut self, change: QuestMarkerChanged) {
		self.0.push(change);
	}
}

/// The host resources a tracker system needs, bundled so they can be handed over as a [HostContext]
#[derive(SystemParam)]
pub struct QuestHost<'w> {
	/// Quest log mirror
	quest_log: ResMut<'w, HostQuestLog>,
	/// Outgoing path requests
	gateway: ResMut<'w, PathRequestQueue>,
	/// Allocated path segments
	lines: ResMut<'w, QuestPathLines>,
	/// Outgoing marker changes
	broadcasts: ResMut<'w, MarkerBroadcastQueue>,
	/// User options
	settings: Res<'w, QuestPathSettings>,
	/// Player position
	player: Res<'w, LocalPlayerPosition>,
	/// App clock
	time: Res<'w, Time>,
}

impl QuestHost<'_> {
	/// Where the player is
	pub fn player(&self) -> Option<Vec2> {
		self.player.get()
	}
	/// Borrow the resources as a [HostContext]
	pub fn context(&mut self) -> HostContext<'_> {
		HostContext {
			quest_log: &mut *self.quest_log,
			gateway: &mut *self.gateway,
			renderer: &mut *self.lines,
			broadcast: &mut *self.broadcasts,
			settings: &*self.settings,
			elapsed: self.time.elapsed(),
		}
	}
}
