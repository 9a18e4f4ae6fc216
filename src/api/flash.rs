//! One-shot messages carried in the session: pushed by a handler, drained
//! into the next rendered page, then gone.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

pub const SUCCESS: &str = "success";
pub const DANGER: &str = "danger";

const KEY: &str = "_flashes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
    pub category: String,
}

pub async fn push(session: &Session, message: impl Into<String>, category: &str) {
    let mut pending: Vec<Flash> = session.get(KEY).await.ok().flatten().unwrap_or_default();
    pending.push(Flash {
        message: message.into(),
        category: category.to_string(),
    });
    if let Err(e) = session.insert(KEY, pending).await {
        tracing::warn!("failed to store flash message: {}", e);
    }
}

pub async fn success(session: &Session, message: impl Into<String>) {
    push(session, message, SUCCESS).await;
}

pub async fn danger(session: &Session, message: impl Into<String>) {
    push(session, message, DANGER).await;
}

/// Removes and returns all pending messages.
pub async fn take(session: &Session) -> Vec<Flash> {
    session
        .remove::<Vec<Flash>>(KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
