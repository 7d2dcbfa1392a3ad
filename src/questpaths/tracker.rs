//! The root of the quest path tracker. Owns the [QuestPathCache] for the
//! lifetime of the plugin and is the single place host notifications, gateway
//! completions and the per-frame update enter the tracker
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Tracks a walking path for each quest the host has told us about
#[derive(Resource, Default, Debug)]
pub struct QuestPathTracker {
	/// Cached paths
	cache: QuestPathCache,
}

impl QuestPathTracker {
	/// Create a new instance of [QuestPathTracker] with an empty cache
	pub fn new() -> Self {
		QuestPathTracker::default()
	}
	/// Get a reference to the cache
	pub fn get_cache(&self) -> &QuestPathCache {
		&self.cache
	}
	/// Get a mutable reference to the cache
	pub fn get_cache_mut(&mut self) -> &mut QuestPathCache {
		&mut self.cache
	}
	/// Find the path of a quest
	pub fn get_path(&self, quest_id: QuestID) -> Option<&QuestPath> {
		self.cache.lookup(quest_id)
	}
	/// The host changed the marker of a quest
	pub fn on_marker_changed(
		&mut self,
		change: &QuestMarkerChanged,
		player: Option<Vec2>,
		ctx: &mut HostContext,
	) -> Option<Recalculation> {
		marker_bridge::on_marker_changed(&mut self.cache, change, player, ctx)
	}
	/// The gateway finished calculating a path. Completions for entries that have since been evicted are dropped
	pub fn on_path_calculated(
		&mut self,
		ticket: PathTicket,
		waypoints: Vec<Vec2>,
		ctx: &mut HostContext,
	) -> Result<(), QuestPathError> {
		match self.cache.claim(ticket) {
			Delivery::Live(path) => {
				let update = path.complete(ticket, waypoints, ctx)?;
				marker_bridge::apply_path_update(ticket.get_quest_id(), update, ctx);
			}
			Delivery::Orphaned(mut path) => {
				debug!(
					"Dropping stale path of quest {}",
					ticket.get_quest_id()
				);
				path.clear_lines(ctx.renderer);
			}
			Delivery::Unknown => {
				debug!(
					"Dropping path of quest {} nobody is waiting on",
					ticket.get_quest_id()
				);
			}
		}
		Ok(())
	}
	/// Feed the player's position to every cached path. Stops early after an eviction, the remaining paths are visited on the next call
	pub fn update(&mut self, player: Option<Vec2>, ctx: &mut HostContext) {
		let Some(from) = player else {
			return;
		};
		for quest_id in self.cache.quest_ids() {
			let Some(path) = self.cache.lookup_mut(quest_id) else {
				continue;
			};
			match path.update(from, ctx) {
				PathUpdate::Evict => {
					debug!("Quest {} left the quest log", quest_id);
					self.cache.evict(quest_id, ctx.renderer);
					break;
				}
				update => marker_bridge::apply_path_update(quest_id, update, ctx),
			}
		}
	}
	/// Destroy every cached path, used when the plugin shuts down. Completions still in flight will find nothing waiting on them
	pub fn terminate(&mut self, renderer: &mut dyn PathRenderer) {
		debug!("Clearing {} quest paths", self.cache.len());
		self.cache.clear(renderer);
	}
}
