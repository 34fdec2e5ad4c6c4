use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, Instrument};

use fk_core::ports::{ClockPort, KvStorePort, SuggestionProviderPort};
use fk_core::tracking::{keys, CoachTopic, LogKind, Sender};
use fk_core::{AuthUser, ChatMessage};

use super::load_records;

/// Coach reply plus the two stored messages.
#[derive(Debug, Clone, Serialize)]
pub struct CoachReply {
    pub response: String,
    pub messages: [ChatMessage; 2],
}

pub struct CoachChat {
    kv: Arc<dyn KvStorePort>,
    suggestions: Arc<dyn SuggestionProviderPort>,
    clock: Arc<dyn ClockPort>,
}

impl CoachChat {
    pub fn new(
        kv: Arc<dyn KvStorePort>,
        suggestions: Arc<dyn SuggestionProviderPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            kv,
            suggestions,
            clock,
        }
    }

    /// Reply to `message` and store both sides. The reply id is the user
    /// message id plus one.
    pub async fn send(&self, user: &AuthUser, message: &str) -> anyhow::Result<CoachReply> {
        let span = info_span!("usecase.coach.send", user_id = %user.id);
        async {
            let topic = CoachTopic::classify(message);
            let response = self.suggestions.respond(topic, message);

            let now_ms = self.clock.now_ms();
            let timestamp = self.clock.now_utc();
            let user_message = ChatMessage {
                user_id: user.id.clone(),
                message_id: now_ms.to_string(),
                content: message.to_string(),
                sender: Sender::User,
                timestamp,
            };
            let ai_message = ChatMessage {
                user_id: user.id.clone(),
                message_id: (now_ms + 1).to_string(),
                content: response.clone(),
                sender: Sender::Ai,
                timestamp,
            };

            for stored in [&user_message, &ai_message] {
                let key = keys::log(&user.id, LogKind::Chat, &stored.message_id);
                self.kv.set(&key, &serde_json::to_value(stored)?).await?;
            }

            info!(?topic, "coach replied");
            Ok(CoachReply {
                response,
                messages: [user_message, ai_message],
            })
        }
        .instrument(span)
        .await
    }

    /// Oldest first. Messages sharing a timestamp keep id order.
    pub async fn history(&self, user: &AuthUser) -> anyhow::Result<Vec<ChatMessage>> {
        let prefix = keys::log_prefix(&user.id, LogKind::Chat);
        let mut messages: Vec<ChatMessage> = load_records(self.kv.as_ref(), &prefix).await?;
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(messages)
    }
}
