//! KV key schema.
//!
//! Every record lives under `user:{id}:`. Log records append the kind and a
//! log id (epoch milliseconds), so a prefix scan returns one kind for one user.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Workout,
    Food,
    Weight,
    Chat,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Workout => "workout",
            LogKind::Food => "food",
            LogKind::Weight => "weight",
            LogKind::Chat => "chat",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn profile(user_id: &str) -> String {
    format!("user:{user_id}:profile")
}

pub fn log_prefix(user_id: &str, kind: LogKind) -> String {
    format!("user:{user_id}:{kind}:")
}

pub fn log(user_id: &str, kind: LogKind, log_id: &str) -> String {
    format!("{}{log_id}", log_prefix(user_id, kind))
}
