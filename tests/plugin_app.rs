//! Run the plugin inside a Bevy app with a pathfinder that answers with
//! straight lines
//!

use bevy::prelude::*;
use bevy_quest_path_plugin::prelude::*;

const QUEST: u32 = 21;
const MARKER: Vec2 = Vec2::new(1000.0, 0.0);

/// Answers every request with a straight line split at its midpoint
fn straight_line_pathfinder(
	mut requests: EventReader<EventQuestPathRequest>,
	mut answers: EventWriter<EventQuestPathCalculated>,
) {
	for request in requests.read() {
		let from = request.get_from();
		let to = request.get_to();
		answers.write(EventQuestPathCalculated::new(
			request.get_ticket(),
			vec![from, from.lerp(to, 0.5), to],
		));
	}
}

fn app() -> App {
	let mut app = App::new();
	app.add_plugins(MinimalPlugins);
	app.add_plugins(QuestPathPlugin);
	app.add_systems(
		Update,
		straight_line_pathfinder.after(QuestPathSet::Publish),
	);
	let quest = Quest::new(QuestID::new(QUEST), MARKER, QuestBroadcastFields::default());
	{
		let mut log = app.world_mut().resource_mut::<HostQuestLog>();
		log.insert_quest(quest.clone());
		log.set_active_quest(Some(QuestID::new(QUEST)));
	}
	app.world_mut()
		.resource_mut::<LocalPlayerPosition>()
		.set(Some(Vec2::ZERO));
	app
}

#[test]
fn path_calculated_and_drawn() {
	let mut app = app();
	let quest = app.world().resource::<HostQuestLog>().get()[&QuestID::new(QUEST)].clone();
	app.world_mut()
		.send_event(EventQuestMarkerChanged::from_host(&quest, QuestMarkerReason::QuestAdded));
	// request published and answered
	app.update();
	// answer installed
	app.update();
	let tracker = app.world().resource::<QuestPathTracker>();
	let path = tracker.get_path(QuestID::new(QUEST)).unwrap();
	assert!(!path.is_calculating());
	assert_eq!(3, path.get_waypoints().len());
	assert_eq!(Some(Vec2::new(500.0, 0.0)), path.current_waypoint_position());
	let lines = app.world().resource::<QuestPathLines>();
	assert_eq!(2, lines.len());
	// redirect is off by default
	let log = app.world().resource::<HostQuestLog>();
	assert_eq!(MARKER, log.get()[&QuestID::new(QUEST)].get_marker());
}

#[test]
fn redirect_reaches_host_without_feedback() {
	let mut app = app();
	app.world_mut()
		.resource_mut::<QuestPathSettings>()
		.set_redirect_quest_marker(true);
	let quest = app.world().resource::<HostQuestLog>().get()[&QuestID::new(QUEST)].clone();
	app.world_mut()
		.send_event(EventQuestMarkerChanged::from_host(&quest, QuestMarkerReason::ActiveQuestChanged));
	app.update();
	app.update();
	let log = app.world().resource::<HostQuestLog>();
	assert_eq!(Vec2::new(500.0, 0.0), log.get()[&QuestID::new(QUEST)].get_marker());
	// the redirect echo is read this frame and must not start another calculation
	app.update();
	app.update();
	let tracker = app.world().resource::<QuestPathTracker>();
	let path = tracker.get_path(QuestID::new(QUEST)).unwrap();
	assert!(!path.is_calculating());
	assert_eq!(Some(MARKER), path.get_original_quest_marker());
	assert!(app.world().resource::<PathRequestQueue>().get_queue().is_empty());
}

#[test]
fn clear_event_empties_tracker() {
	let mut app = app();
	let quest = app.world().resource::<HostQuestLog>().get()[&QuestID::new(QUEST)].clone();
	app.world_mut()
		.send_event(EventQuestMarkerChanged::from_host(&quest, QuestMarkerReason::QuestAdded));
	app.update();
	app.update();
	assert!(!app.world().resource::<QuestPathLines>().is_empty());
	app.world_mut().send_event(EventClearQuestPaths);
	app.update();
	assert!(app.world().resource::<QuestPathTracker>().get_cache().is_empty());
	assert!(app.world().resource::<QuestPathLines>().is_empty());
}

#[test]
fn removed_quest_is_forgotten() {
	let mut app = app();
	let quest = app.world().resource::<HostQuestLog>().get()[&QuestID::new(QUEST)].clone();
	app.world_mut()
		.send_event(EventQuestMarkerChanged::from_host(&quest, QuestMarkerReason::QuestAdded));
	app.update();
	app.update();
	app.world_mut()
		.resource_mut::<HostQuestLog>()
		.remove_quest(QuestID::new(QUEST));
	app.update();
	assert!(app.world().resource::<QuestPathTracker>().get_cache().is_empty());
	assert!(app.world().resource::<QuestPathLines>().is_empty());
}

#[test]
fn app_exit_empties_tracker() {
	let mut app = app();
	let quest = app.world().resource::<HostQuestLog>().get()[&QuestID::new(QUEST)].clone();
	app.world_mut()
		.send_event(EventQuestMarkerChanged::from_host(&quest, QuestMarkerReason::QuestAdded));
	app.update();
	app.update();
	assert!(!app.world().resource::<QuestPathLines>().is_empty());
	app.world_mut().send_event(AppExit::Success);
	app.update();
	assert!(app.world().resource::<QuestPathTracker>().get_cache().is_empty());
	assert!(app.world().resource::<QuestPathLines>().is_empty());
}
