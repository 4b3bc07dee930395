use ohs_audit_core::{AppError, AppResult};
use tower_sessions::Session;

const FLASH_MESSAGES_KEY: &str = "flash_messages";

/// Queues a message for the next page the browser renders.
pub async fn push_flash(session: &Session, message: &str) -> AppResult<()> {
    let mut messages = session
        .get::<Vec<String>>(FLASH_MESSAGES_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read flash messages: {error}")))?
        .unwrap_or_default();
    messages.push(message.to_owned());

    session
        .insert(FLASH_MESSAGES_KEY, messages)
        .await
        .map_err(|error| AppError::Internal(format!("failed to store flash message: {error}")))
}

/// Returns and clears every queued message.
pub async fn take_flash(session: &Session) -> AppResult<Vec<String>> {
    session
        .remove::<Vec<String>>(FLASH_MESSAGES_KEY)
        .await
        .map(Option::unwrap_or_default)
        .map_err(|error| AppError::Internal(format!("failed to read flash messages: {error}")))
}
