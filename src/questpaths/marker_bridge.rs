//! Links the host's quest markers with the cached paths.
//!
//! Incoming marker changes start a recalculation of the affected path and
//! outgoing redirects rewrite the host's marker. Every broadcast made here is
//! tagged [MarkerOrigin::Redirect] so that when it echoes back through the
//! host's notification channel it is recognised and ignored
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Handle a marker change announced by the host. Records the live marker on the quest's path (creating the path if needed) and asks for it to be recalculated from the player's position
pub fn on_marker_changed(
	cache: &mut QuestPathCache,
	change: &QuestMarkerChanged,
	player: Option<Vec2>,
	ctx: &mut HostContext,
) -> Option<Recalculation> {
	if change.origin == MarkerOrigin::Redirect {
		// our own broadcast coming back around
		return None;
	}
	let quest_id = change.quest_id;
	let marker = ctx.quest_log.get_quest(quest_id)?.get_marker_position();
	let path = cache.get_or_create(quest_id);
	path.set_original_quest_marker(marker);
	let from = player?;
	let (recalculation, update) = path.recalculate(from, ctx);
	apply_path_update(quest_id, update, ctx);
	Some(recalculation)
}

/// Carry out a redirect asked for by a path, other updates need no action here
pub fn apply_path_update(quest_id: QuestID, update: PathUpdate, ctx: &mut HostContext) {
	if let PathUpdate::Redirect(marker) = update {
		redirect_quest_marker(quest_id, marker, ctx);
	}
}

/// Replace the marker of a quest and broadcast the change to the host. Returns `false` when nothing was broadcast, either because the quest doesn't exist or because the marker is already there
pub fn redirect_quest_marker(quest_id: QuestID, new_marker: Vec2, ctx: &mut HostContext) -> bool {
	let Some(quest) = ctx.quest_log.get_quest(quest_id) else {
		return false;
	};
	let old_marker = quest.get_marker();
	if old_marker == new_marker {
		return false;
	}
	let fields = quest.get_fields();
	debug!(
		"Overriding quest marker from {:.2}, {:.2} to {:.2}, {:.2}",
		old_marker.x, old_marker.y, new_marker.x, new_marker.y
	);
	if !ctx.quest_log.set_quest_marker(quest_id, new_marker) {
		return false;
	}
	ctx.broadcast.broadcast_quest_marker_changed(QuestMarkerChanged {
		quest_id,
		marker: new_marker,
		fields,
		reason: QuestMarkerReason::ActiveQuestChanged,
		origin: MarkerOrigin::Redirect,
	});
	true
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeMap;
	use std::time::Duration;

	#[derive(Default)]
	struct Log(BTreeMap<QuestID, Quest>);
	impl QuestLog for Log {
		fn get_quest(&self, quest_id: QuestID) -> Option<&Quest> {
			self.0.get(&quest_id)
		}
		fn get_active_quest(&self) -> Option<&Quest> {
			self.0.values().next()
		}
		fn set_quest_marker(&mut self, quest_id: QuestID, marker: Vec2) -> bool {
			self.0.get_mut(&quest_id).map(|q| q.set_marker(marker)).is_some()
		}
	}
	#[derive(Default)]
	struct Gateway(Vec<PathTicket>);
	impl PathGateway for Gateway {
		fn request_path(&mut self, _from: Vec2, _to: Vec2, ticket: PathTicket) -> bool {
			self.0.push(ticket);
			true
		}
	}
	struct NoLines;
	impl PathRenderer for NoLines {
		fn add_line(&mut self, _from: Vec2, _to: Vec2, _label: String, _style: LineStyle) -> LineHandle {
			LineHandle::new(0)
		}
		fn remove_line(&mut self, _handle: LineHandle) {}
	}

	/// Host state for a single quest with id `4`
	struct Host {
		log: Log,
		gateway: Gateway,
		broadcasts: Vec<QuestMarkerChanged>,
		settings: QuestPathSettings,
	}
	impl Host {
		fn new(marker: Vec2) -> Self {
			let mut log = Log::default();
			let fields = QuestBroadcastFields { flags: 9, map_to: 12, log_state: 3 };
			log.0.insert(QuestID::new(4), Quest::new(QuestID::new(4), marker, fields));
			Host {
				log,
				gateway: Gateway::default(),
				broadcasts: Vec::new(),
				settings: QuestPathSettings::default(),
			}
		}
		fn run<R>(&mut self, f: impl FnOnce(&mut HostContext) -> R) -> R {
			let mut renderer = NoLines;
			let mut ctx = HostContext {
				quest_log: &mut self.log,
				gateway: &mut self.gateway,
				renderer: &mut renderer,
				broadcast: &mut self.broadcasts,
				settings: &self.settings,
				elapsed: Duration::ZERO,
			};
			f(&mut ctx)
		}
	}

	#[test]
	fn redirect_is_idempotent() {
		let mut host = Host::new(Vec2::new(100.0, 100.0));
		let target = Vec2::new(20.0, 30.0);
		assert!(host.run(|ctx| redirect_quest_marker(QuestID::new(4), target, ctx)));
		assert!(!host.run(|ctx| redirect_quest_marker(QuestID::new(4), target, ctx)));
		assert_eq!(1, host.broadcasts.len());
		assert_eq!(target, host.log.0[&QuestID::new(4)].get_marker());
	}
	#[test]
	fn redirect_copies_fields_verbatim() {
		let mut host = Host::new(Vec2::new(100.0, 100.0));
		host.run(|ctx| redirect_quest_marker(QuestID::new(4), Vec2::ZERO, ctx));
		let sent = &host.broadcasts[0];
		assert_eq!(QuestBroadcastFields { flags: 9, map_to: 12, log_state: 3 }, sent.fields);
		assert_eq!(MarkerOrigin::Redirect, sent.origin);
	}
	#[test]
	fn redirect_unknown_quest_does_nothing() {
		let mut host = Host::new(Vec2::new(100.0, 100.0));
		assert!(!host.run(|ctx| redirect_quest_marker(QuestID::new(5), Vec2::ZERO, ctx)));
		assert!(host.broadcasts.is_empty());
	}
	#[test]
	fn own_broadcast_is_ignored() {
		let mut host = Host::new(Vec2::new(100.0, 100.0));
		let mut cache = QuestPathCache::default();
		host.run(|ctx| redirect_quest_marker(QuestID::new(4), Vec2::ZERO, ctx));
		let echo = host.broadcasts[0].clone();
		let result = host.run(|ctx| on_marker_changed(&mut cache, &echo, Some(Vec2::ZERO), ctx));
		assert_eq!(None, result);
		assert!(cache.is_empty());
		assert!(host.gateway.0.is_empty());
	}
	#[test]
	fn host_change_requests_path() {
		let marker = Vec2::new(100.0, 100.0);
		let mut host = Host::new(marker);
		let mut cache = QuestPathCache::default();
		let quest = host.log.0[&QuestID::new(4)].clone();
		let change = QuestMarkerChanged::from_host(&quest, QuestMarkerReason::QuestAdded);
		let result = host.run(|ctx| on_marker_changed(&mut cache, &change, Some(Vec2::ZERO), ctx));
		assert!(matches!(result, Some(Recalculation::Requested(_))));
		let path = cache.lookup(QuestID::new(4)).unwrap();
		assert_eq!(Some(marker), path.get_original_quest_marker());
		assert!(path.is_calculating());
	}
	#[test]
	fn change_without_player_records_marker_only() {
		let marker = Vec2::new(100.0, 100.0);
		let mut host = Host::new(marker);
		let mut cache = QuestPathCache::default();
		let quest = host.log.0[&QuestID::new(4)].clone();
		let change = QuestMarkerChanged::from_host(&quest, QuestMarkerReason::DetailsChanged);
		let result = host.run(|ctx| on_marker_changed(&mut cache, &change, None, ctx));
		assert_eq!(None, result);
		assert_eq!(Some(marker), cache.lookup(QuestID::new(4)).unwrap().get_original_quest_marker());
		assert!(host.gateway.0.is_empty());
	}
}
