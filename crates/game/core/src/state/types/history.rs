use super::common::{CharacterId, ObjectId, SceneId};
use crate::action::Outcome;

/// One line of dialogue, kept for narrative context.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversationEntry {
    pub speaker: String,
    pub text: String,
    pub turn: u64,
}

impl ConversationEntry {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>, turn: u64) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            turn,
        }
    }
}

/// Summary of one resolved intent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    /// Turn counter value when the intent was resolved.
    pub turn: u64,
    pub actor_id: CharacterId,
    pub kind: String,
    pub scene_id: SceneId,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub target_id: Option<ObjectId>,
    pub outcome: Outcome,
    pub narrative: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub timestamp: Option<u64>,
}
