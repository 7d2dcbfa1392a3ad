//! Errors raised by the tracker
//!

use crate::prelude::*;

/// Errors which can occur while tracking quest paths or handling their settings
#[derive(Debug, thiserror::Error)]
pub enum QuestPathError {
	/// A completion arrived for an entry which wasn't waiting on that request, indicates the gateway completed a request twice
	#[error("Path completion for quest {quest_id} does not match its in-flight request {ticket:?}")]
	UnexpectedCompletion {
		/// The quest the completion claimed to belong to
		quest_id: QuestID,
		/// The ticket that was delivered
		ticket: PathTicket,
	},
	/// Reading or writing a settings file failed
	#[cfg(feature = "ron")]
	#[error("Settings file could not be accessed: {0}")]
	SettingsIo(#[from] std::io::Error),
	/// A settings file did not contain valid `ron`
	#[cfg(feature = "ron")]
	#[error("Failed deserializing QuestPathSettings: {0}")]
	SettingsDeserialize(#[from] ron::error::SpannedError),
	/// Settings could not be written as `ron`
	#[cfg(feature = "ron")]
	#[error("Failed serializing QuestPathSettings: {0}")]
	SettingsSerialize(#[from] ron::Error),
}
