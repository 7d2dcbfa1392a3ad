//! Defines the Bevy [Plugin] for quest path tracking
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod host_layer;
pub mod marker_layer;
pub mod tracking_layer;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum QuestPathSet {
	/// Take in marker changes, calculated paths and clear requests
	Listen,
	/// Follow the player along the cached paths
	Track,
	/// Hand path requests and marker redirects to the host
	Publish,
}

pub struct QuestPathPlugin;

impl Plugin for QuestPathPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<QuestID>()
			.register_type::<PathColor>()
			.register_type::<QuestPathSettings>()
			.register_type::<PathTicket>()
			.register_type::<LineHandle>()
			.init_resource::<QuestPathTracker>()
			.init_resource::<QuestPathSettings>()
			.init_resource::<HostQuestLog>()
			.init_resource::<LocalPlayerPosition>()
			.init_resource::<PathRequestQueue>()
			.init_resource::<QuestPathLines>()
			.init_resource::<MarkerBroadcastQueue>()
			.add_event::<marker_layer::EventQuestMarkerChanged>()
			.add_event::<tracking_layer::EventQuestPathRequest>()
			.add_event::<tracking_layer::EventQuestPathCalculated>()
			.add_event::<tracking_layer::EventClearQuestPaths>()
			.configure_sets(
				Update,
				(QuestPathSet::Listen, QuestPathSet::Track, QuestPathSet::Publish).chain(),
			)
			.add_systems(
				Update,
				(
					(
						tracking_layer::clear_quest_paths,
						marker_layer::process_quest_marker_changes,
						tracking_layer::process_calculated_paths,
					)
						.chain()
						.in_set(QuestPathSet::Listen),
					tracking_layer::update_quest_paths.in_set(QuestPathSet::Track),
					(
						tracking_layer::publish_path_requests,
						marker_layer::publish_marker_broadcasts,
					)
						.in_set(QuestPathSet::Publish),
				),
			)
			.add_systems(Last, tracking_layer::clear_quest_paths_on_exit);
	}
}
