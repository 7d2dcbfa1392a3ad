//! The per-quest path state machine. A [QuestPath] owns the waypoints
//! leading to a quest marker, knows whether a calculation is in flight and
//! tracks which waypoint the player is heading towards
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Outcome of asking a [QuestPath] to recalculate
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Recalculation {
	/// A request is already outstanding, nothing was issued
	InFlight,
	/// Neither endpoint moved so the existing waypoints were reinstalled in place
	Refreshed,
	/// The quest has no marker to path to
	NoMarker,
	/// The gateway accepted the request
	Requested(PathTicket),
	/// The gateway refused the request, the next update will try again
	Rejected,
}

/// What the owner of a [QuestPath] should do after it has been updated
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathUpdate {
	/// The quest no longer exists, evict the entry
	Evict,
	/// Nothing to act upon
	Idle,
	/// Move the host's quest marker to this position
	Redirect(Vec2),
}

/// A path from the player towards the marker of a quest
#[derive(Debug)]
pub struct QuestPath {
	/// Quest the path leads to
	quest_id: QuestID,
	/// Identity of this entry within the cache
	generation: u64,
	/// Path from the player side towards the marker
	waypoints: Vec<Vec2>,
	/// Segments currently drawn for this path
	lines: Vec<LineHandle>,
	/// Index of the waypoint the player is heading towards
	current_waypoint: usize,
	/// Waypoint used for the last marker decision
	previous_closest_waypoint: Option<Vec2>,
	/// Marker of the quest the path is calculated towards
	original_quest_marker: Option<Vec2>,
	/// Start of the last or in-flight calculation
	calculated_from: Vec2,
	/// End of the last or in-flight calculation
	calculated_to: Option<Vec2>,
	/// When the last calculation completed
	calculated_at: Option<Duration>,
	/// The outstanding gateway request
	in_flight: Option<PathTicket>,
	/// Number of requests made, stamped into each ticket
	requests: u32,
}

impl QuestPath {
	/// Create a new empty instance of [QuestPath]
	pub fn new(quest_id: QuestID, generation: u64) -> Self {
		QuestPath {
			quest_id,
			generation,
			waypoints: Vec::new(),
			lines: Vec::new(),
			current_waypoint: 0,
			previous_closest_waypoint: None,
			original_quest_marker: None,
			calculated_from: Vec2::ZERO,
			calculated_to: None,
			calculated_at: None,
			in_flight: None,
			requests: 0,
		}
	}
	pub fn get_quest_id(&self) -> QuestID {
		self.quest_id
	}
	pub fn get_generation(&self) -> u64 {
		self.generation
	}
	pub fn get_waypoints(&self) -> &[Vec2] {
		&self.waypoints
	}
	pub fn get_lines(&self) -> &[LineHandle] {
		&self.lines
	}
	pub fn get_current_waypoint(&self) -> usize {
		self.current_waypoint
	}
	/// Position of the waypoint the player is heading towards, [None] before a path exists
	pub fn current_waypoint_position(&self) -> Option<Vec2> {
		self.waypoints.get(self.current_waypoint).copied()
	}
	/// Position of the waypoint after the current one
	pub fn next_waypoint(&self) -> Option<Vec2> {
		self.waypoints.get(self.current_waypoint + 1).copied()
	}
	pub fn get_original_quest_marker(&self) -> Option<Vec2> {
		self.original_quest_marker
	}
	/// Record the marker the path should lead to
	pub fn set_original_quest_marker(&mut self, marker: Option<Vec2>) {
		self.original_quest_marker = marker;
	}
	pub fn get_calculated_from(&self) -> Vec2 {
		self.calculated_from
	}
	pub fn get_calculated_to(&self) -> Option<Vec2> {
		self.calculated_to
	}
	pub fn get_calculated_at(&self) -> Option<Duration> {
		self.calculated_at
	}
	pub fn get_in_flight(&self) -> Option<PathTicket> {
		self.in_flight
	}
	pub fn is_calculating(&self) -> bool {
		self.in_flight.is_some()
	}
	/// Ask for the path to be recalculated from `from` towards the recorded quest marker
	pub fn recalculate(&mut self, from: Vec2, ctx: &mut HostContext) -> (Recalculation, PathUpdate) {
		if self.is_calculating() {
			return (Recalculation::InFlight, PathUpdate::Idle);
		}
		if self.calculated_to.is_some()
			&& from == self.calculated_from
			&& self.calculated_to == self.original_quest_marker
		{
			// endpoints unchanged, reuse the waypoints we already hold
			let waypoints = self.waypoints.clone();
			let update = self.install_waypoints(waypoints, ctx);
			return (Recalculation::Refreshed, update);
		}
		self.calculated_from = from;
		self.calculated_to = self.original_quest_marker;
		let Some(to) = self.calculated_to else {
			trace!("Quest {} has no marker to path to", self.quest_id);
			return (Recalculation::NoMarker, PathUpdate::Idle);
		};
		self.requests = self.requests.wrapping_add(1);
		let ticket = PathTicket::new(self.quest_id, self.generation, self.requests);
		if ctx.gateway.request_path(from, to, ticket) {
			self.in_flight = Some(ticket);
			(Recalculation::Requested(ticket), PathUpdate::Idle)
		} else {
			debug!("Path request for quest {} was rejected", self.quest_id);
			// nothing was calculated towards the marker, don't let a refresh pretend otherwise
			self.calculated_to = None;
			(Recalculation::Rejected, PathUpdate::Idle)
		}
	}
	/// Accept the waypoints of the outstanding request
	pub fn complete(
		&mut self,
		ticket: PathTicket,
		waypoints: Vec<Vec2>,
		ctx: &mut HostContext,
	) -> Result<PathUpdate, QuestPathError> {
		if self.in_flight != Some(ticket) {
			return Err(QuestPathError::UnexpectedCompletion {
				quest_id: self.quest_id,
				ticket,
			});
		}
		Ok(self.install_waypoints(waypoints, ctx))
	}
	/// Store a fresh set of waypoints, oriented so they run from `calculated_from` towards the marker
	fn install_waypoints(&mut self, mut waypoints: Vec<Vec2>, ctx: &mut HostContext) -> PathUpdate {
		self.clear_lines(ctx.renderer);
		if let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) {
			if square_distance(*last, self.calculated_from)
				< square_distance(*first, self.calculated_from)
			{
				// gateway handed the path back from the marker towards the player
				waypoints.reverse();
			}
		}
		self.waypoints = waypoints;
		self.current_waypoint = find_current_waypoint(&self.waypoints, self.calculated_from)
			.unwrap_or_default();
		self.in_flight = None;
		self.calculated_at = Some(ctx.elapsed);
		if self.waypoints.is_empty() {
			PathUpdate::Idle
		} else {
			self.refresh_presentation(ctx)
		}
	}
	/// Per-frame tracking of the player's progress along the path
	pub fn update(&mut self, from: Vec2, ctx: &mut HostContext) -> PathUpdate {
		if ctx.quest_log.get_quest(self.quest_id).is_none() {
			return PathUpdate::Evict;
		}
		if self.is_calculating() {
			return PathUpdate::Idle;
		}
		if self.calculated_at.is_none()
			|| self.calculated_to != self.original_quest_marker
			|| square_distance(from, self.calculated_from) > RECALCULATE_DISTANCE_SQUARED
		{
			let (_, update) = self.recalculate(from, ctx);
			return update;
		}
		let original_waypoint = self.current_waypoint;
		let Some(current) = find_current_waypoint(&self.waypoints, from) else {
			return PathUpdate::Idle;
		};
		self.current_waypoint = current;
		if original_waypoint != current {
			self.calculated_from = from;
			self.refresh_presentation(ctx)
		} else {
			PathUpdate::Idle
		}
	}
	/// Redraw the path and decide whether the quest marker should follow the current waypoint
	fn refresh_presentation(&mut self, ctx: &mut HostContext) -> PathUpdate {
		let Some(current) = self.current_waypoint_position() else {
			return PathUpdate::Idle;
		};
		self.draw_lines(ctx);
		let moved_far_enough = self
			.previous_closest_waypoint
			.is_none_or(|previous| square_distance(current, previous) > REDIRECT_DISTANCE_SQUARED);
		if moved_far_enough && ctx.quest_log.is_active(self.quest_id) {
			self.previous_closest_waypoint = Some(current);
			if ctx.settings.redirect_quest_marker() {
				return PathUpdate::Redirect(current);
			}
		}
		PathUpdate::Idle
	}
	/// Replace the drawn segments with ones running from just behind the current waypoint to the end of the path
	fn draw_lines(&mut self, ctx: &mut HostContext) {
		self.clear_lines(ctx.renderer);
		if !ctx.settings.is_drawing() {
			return;
		}
		let style = ctx.line_style();
		let start = self.current_waypoint.saturating_sub(1);
		for i in start..self.waypoints.len().saturating_sub(1) {
			let label = format!("{} - {}", self.quest_id, i);
			let line = ctx
				.renderer
				.add_line(self.waypoints[i], self.waypoints[i + 1], label, style);
			self.lines.push(line);
		}
	}
	/// Free every segment drawn for this path
	pub fn clear_lines(&mut self, renderer: &mut dyn PathRenderer) {
		for line in self.lines.drain(..) {
			renderer.remove_line(line);
		}
	}
}
