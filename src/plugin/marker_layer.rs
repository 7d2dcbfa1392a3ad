//! Logic relating to quest marker notifications flowing between the host and
//! the [QuestPathTracker]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// The marker of a quest changed. Sent by the host when it changes a marker and by the tracker when it redirects one, the `origin` of the change tells them apart
#[derive(Event, Clone, Debug)]
pub struct EventQuestMarkerChanged(QuestMarkerChanged);

impl EventQuestMarkerChanged {
	/// Create a new instance of [EventQuestMarkerChanged]
	pub fn new(change: QuestMarkerChanged) -> Self {
		EventQuestMarkerChanged(change)
	}
	/// Announce a host side change of `quest`
	pub fn from_host(quest: &Quest, reason: QuestMarkerReason) -> Self {
		EventQuestMarkerChanged(QuestMarkerChanged::from_host(quest, reason))
	}
	pub fn get(&self) -> &QuestMarkerChanged {
		&self.0
	}
}

/// Read [EventQuestMarkerChanged] and recalculate the paths of the affected quests
#[cfg(not(tarpaulin_include))]
pub fn process_quest_marker_changes(
	mut events: EventReader<EventQuestMarkerChanged>,
	mut tracker: ResMut<QuestPathTracker>,
	mut host: QuestHost,
) {
	let player = host.player();
	for event in events.read() {
		let change = event.get();
		let mut ctx = host.context();
		if let Some(recalculation) = tracker.on_marker_changed(change, player, &mut ctx) {
			trace!(
				"Quest {} marker changed ({:?}): {:?}",
				change.quest_id,
				change.reason,
				recalculation
			);
		}
	}
}

/// Publish the marker redirects made by the tracker so the host picks them up
#[cfg(not(tarpaulin_include))]
pub fn publish_marker_broadcasts(
	mut queue: ResMut<MarkerBroadcastQueue>,
	mut writer: EventWriter<EventQuestMarkerChanged>,
) {
	for change in queue.drain() {
		writer.write(EventQuestMarkerChanged(change));
	}
}
