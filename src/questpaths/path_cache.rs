//! Registry of [QuestPath]s keyed by [QuestID].
//!
//! Each entry is stamped with a generation when it is created. Gateway
//! completions carry the generation of the entry that requested them so a
//! completion arriving after its entry was evicted (or replaced by a new entry
//! for the same quest) can be recognised and dropped
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Where a gateway completion should go
#[derive(Debug)]
pub enum Delivery<'a> {
	/// The requesting entry is still live in the cache
	Live(&'a mut QuestPath),
	/// The requesting entry was evicted while calculating, it has been handed back so it can release its lines and be dropped
	Orphaned(QuestPath),
	/// Nothing is waiting on the completion
	Unknown,
}

/// Owns every [QuestPath]. At most one live entry exists per quest
#[derive(Default, Debug)]
pub struct QuestPathCache {
	/// Live entries
	paths: BTreeMap<QuestID, QuestPath>,
	/// Entries evicted while a request was in flight, keyed by generation
	orphans: BTreeMap<u64, QuestPath>,
	/// Generation given to the next entry created
	next_generation: u64,
}

impl QuestPathCache {
	/// Get the map of live entries
	pub fn get(&self) -> &BTreeMap<QuestID, QuestPath> {
		&self.paths
	}
	/// Find the entry of a quest or create an empty one
	pub fn get_or_create(&mut self, quest_id: QuestID) -> &mut QuestPath {
		let next_generation = &mut self.next_generation;
		self.paths.entry(quest_id).or_insert_with(|| {
			*next_generation += 1;
			trace!("Tracking a path for quest {}", quest_id);
			QuestPath::new(quest_id, *next_generation)
		})
	}
	/// Find the entry of a quest. Returns [None] if it doesn't exist
	pub fn lookup(&self, quest_id: QuestID) -> Option<&QuestPath> {
		self.paths.get(&quest_id)
	}
	/// Find the entry of a quest for mutation. Returns [None] if it doesn't exist
	pub fn lookup_mut(&mut self, quest_id: QuestID) -> Option<&mut QuestPath> {
		self.paths.get_mut(&quest_id)
	}
	/// Remove the entry of a quest. An idle entry is destroyed straight away, one waiting on the gateway is kept aside until its completion arrives. Returns `false` if there was no entry
	pub fn evict(&mut self, quest_id: QuestID, renderer: &mut dyn PathRenderer) -> bool {
		let Some(mut path) = self.paths.remove(&quest_id) else {
			return false;
		};
		if path.is_calculating() {
			debug!("Quest {} evicted while calculating", quest_id);
			self.orphans.insert(path.get_generation(), path);
		} else {
			path.clear_lines(renderer);
		}
		true
	}
	/// Destroy every entry, including those waiting on the gateway
	pub fn clear(&mut self, renderer: &mut dyn PathRenderer) {
		for (_, mut path) in std::mem::take(&mut self.paths) {
			path.clear_lines(renderer);
		}
		for (_, mut path) in std::mem::take(&mut self.orphans) {
			path.clear_lines(renderer);
		}
	}
	/// Find who a gateway completion belongs to
	pub fn claim(&mut self, ticket: PathTicket) -> Delivery<'_> {
		let generation = ticket.get_generation();
		if let Some(orphan) = self.orphans.remove(&generation) {
			return Delivery::Orphaned(orphan);
		}
		match self.paths.get_mut(&ticket.get_quest_id()) {
			Some(path) if path.get_generation() == generation => Delivery::Live(path),
			_ => Delivery::Unknown,
		}
	}
	/// Identifiers of every live entry in key order
	pub fn quest_ids(&self) -> Vec<QuestID> {
		self.paths.keys().copied().collect()
	}
	/// Iterate over the live entries
	pub fn iter(&self) -> impl Iterator<Item = &QuestPath> {
		self.paths.values()
	}
	/// Number of live entries
	pub fn len(&self) -> usize {
		self.paths.len()
	}
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}
	/// Number of evicted entries still waiting on the gateway
	pub fn orphan_count(&self) -> usize {
		self.orphans.len()
	}
}
