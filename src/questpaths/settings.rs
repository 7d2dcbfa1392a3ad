//! User options controlling how quest paths are drawn and whether the quest
//! marker gets redirected
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Persisted options of the tracker
#[cfg_attr(
	feature = "serde",
	derive(serde::Deserialize, serde::Serialize),
	serde(default)
)]
#[derive(Resource, Clone, Copy, PartialEq, Debug, Reflect)]
pub struct QuestPathSettings {
	/// Draw the path onto the 3d terrain
	draw_quest_path_on_terrain: bool,
	/// Draw the path onto the minimap
	draw_quest_path_on_minimap: bool,
	/// Colour of the drawn path
	draw_quest_path_color: PathColor,
	/// Move the active quest marker to the next waypoint along the path
	redirect_quest_marker: bool,
}

impl Default for QuestPathSettings {
	fn default() -> Self {
		QuestPathSettings {
			draw_quest_path_on_terrain: true,
			draw_quest_path_on_minimap: true,
			draw_quest_path_color: PathColor::default(),
			redirect_quest_marker: false,
		}
	}
}

impl QuestPathSettings {
	/// Create a new instance of [QuestPathSettings]
	pub fn new(
		draw_on_terrain: bool,
		draw_on_minimap: bool,
		color: PathColor,
		redirect_quest_marker: bool,
	) -> Self {
		QuestPathSettings {
			draw_quest_path_on_terrain: draw_on_terrain,
			draw_quest_path_on_minimap: draw_on_minimap,
			draw_quest_path_color: color,
			redirect_quest_marker,
		}
	}
	pub fn draw_on_terrain(&self) -> bool {
		self.draw_quest_path_on_terrain
	}
	pub fn draw_on_minimap(&self) -> bool {
		self.draw_quest_path_on_minimap
	}
	/// Whether any line drawing is enabled
	pub fn is_drawing(&self) -> bool {
		self.draw_quest_path_on_terrain || self.draw_quest_path_on_minimap
	}
	pub fn get_color(&self) -> PathColor {
		self.draw_quest_path_color
	}
	pub fn redirect_quest_marker(&self) -> bool {
		self.redirect_quest_marker
	}
	pub fn set_draw_on_terrain(&mut self, enabled: bool) {
		self.draw_quest_path_on_terrain = enabled;
	}
	pub fn set_draw_on_minimap(&mut self, enabled: bool) {
		self.draw_quest_path_on_minimap = enabled;
	}
	pub fn set_color(&mut self, color: PathColor) {
		self.draw_quest_path_color = color;
	}
	pub fn set_redirect_quest_marker(&mut self, enabled: bool) {
		self.redirect_quest_marker = enabled;
	}
	/// From a `ron` file load the [QuestPathSettings], any option missing from the file keeps its default
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, QuestPathError> {
		let file = std::fs::File::open(path)?;
		let settings = ron::de::from_reader(file)?;
		Ok(settings)
	}
	/// Write the [QuestPathSettings] to a `ron` file
	#[cfg(feature = "ron")]
	pub fn save_ron(&self, path: &str) -> Result<(), QuestPathError> {
		let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
		std::fs::write(path, contents)?;
		Ok(())
	}
}
