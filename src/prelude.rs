//! `use bevy_quest_path_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::questpaths::{
	error::*, host::*, marker_bridge, path_cache::*, quest_path::*, settings::*, tracker::*,
	utilities::*,
};

#[doc(hidden)]
pub use crate::plugin::{host_layer::*, marker_layer::*, tracking_layer::*, *};
