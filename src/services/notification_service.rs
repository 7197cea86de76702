use async_trait::async_trait;

use crate::engine::StatusChange;
use crate::error::Result;
use crate::models::message::DocumentMessage;

/// Outbound side effects of document events. Called after the write commits;
/// callers log failures instead of failing the request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn status_changed(&self, change: &StatusChange) -> Result<()>;
    async fn message_posted(&self, message: &DocumentMessage) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn status_changed(&self, change: &StatusChange) -> Result<()> {
        tracing::info!(
            doc_kind = %change.doc.kind,
            doc_id = %change.doc.id,
            actor = %change.actor,
            from = %change.from,
            to = %change.to,
            "document status changed"
        );
        Ok(())
    }

    async fn message_posted(&self, message: &DocumentMessage) -> Result<()> {
        tracing::info!(
            doc_kind = %message.doc_kind,
            doc_id = %message.doc_id,
            sender = %message.sender_id,
            "message posted"
        );
        Ok(())
    }
}

pub(crate) async fn notify_status_changed(notifier: &dyn Notifier, change: &StatusChange) {
    if let Err(err) = notifier.status_changed(change).await {
        tracing::warn!(error = %err, doc = %change.doc, "status notification failed");
    }
}

pub(crate) async fn notify_message_posted(notifier: &dyn Notifier, message: &DocumentMessage) {
    if let Err(err) = notifier.message_posted(message).await {
        tracing::warn!(error = %err, doc_id = %message.doc_id, "message notification failed");
    }
}
