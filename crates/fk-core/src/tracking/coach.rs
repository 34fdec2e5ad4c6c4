use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A stored coach conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub user_id: String,
    pub message_id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Keyword bucket used to pick a canned coach reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoachTopic {
    Nutrition,
    Training,
    Weight,
    Motivation,
    General,
}

impl CoachTopic {
    /// Case-insensitive keyword match. Earlier topics win.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["eat", "meal", "food"]) {
            CoachTopic::Nutrition
        } else if has(&["workout", "exercise", "train"]) {
            CoachTopic::Training
        } else if has(&["weight", "lose", "gain"]) {
            CoachTopic::Weight
        } else if has(&["motivat", "tired", "give up"]) {
            CoachTopic::Motivation
        } else {
            CoachTopic::General
        }
    }
}
