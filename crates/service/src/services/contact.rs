use std::sync::Arc;

use models::{ContactMessage, DocumentShape};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::storage::DocumentStore;

/// What happened to an accepted submission. Not shown to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactReceipt {
    Persisted,
    /// The store write failed; the submission was accepted anyway.
    Dropped,
}

/// Contact form intake: validate, then a single best-effort write.
pub struct ContactService {
    store: Arc<dyn DocumentStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Only validation errors are returned; store failures are logged and
    /// reported as `ContactReceipt::Dropped`.
    #[instrument(skip_all)]
    pub async fn submit(&self, message: ContactMessage) -> Result<ContactReceipt, ServiceError> {
        message
            .validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        match self.store.create(ContactMessage::COLLECTION, message.to_document()).await {
            Ok(()) => {
                info!(event = "contact_saved", "contact message stored");
                Ok(ContactReceipt::Persisted)
            }
            Err(e) => {
                warn!(
                    event = "contact_dropped",
                    collection = ContactMessage::COLLECTION,
                    error = %e,
                    "contact message not stored"
                );
                Ok(ContactReceipt::Dropped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Document;
    use crate::test_support::{temp_store, FailingStore};

    fn message(body: &str) -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Sizing".into(),
            message: body.into(),
        }
    }

    #[tokio::test]
    async fn valid_message_is_stored() -> anyhow::Result<()> {
        let (store, path) = temp_store().await?;
        let svc = ContactService::new(store.clone());
        assert_eq!(svc.submit(message("Which size should I order?")).await?, ContactReceipt::Persisted);

        let saved = store.fetch("contactmessage", &Document::new(), None).await?;
        assert_eq!(saved.len(), 1);
        assert_eq!(ContactMessage::from_document(&saved[0])?, message("Which size should I order?"));

        let _ = tokio::fs::remove_file(path).await;
        Ok(())
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() -> anyhow::Result<()> {
        let store = Arc::new(FailingStore::unavailable());
        let svc = ContactService::new(store.clone());
        assert_eq!(svc.submit(message("Which size should I order?")).await?, ContactReceipt::Dropped);
        assert_eq!(store.writes(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_write_is_dropped_not_raised() -> anyhow::Result<()> {
        let store = Arc::new(FailingStore::empty_rejecting_writes());
        let svc = ContactService::new(store.clone());
        assert_eq!(svc.submit(message("Which size should I order?")).await?, ContactReceipt::Dropped);
        assert_eq!(store.writes(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_never_reach_store() {
        let store = Arc::new(FailingStore::unavailable());
        let svc = ContactService::new(store.clone());
        let blank = ContactMessage {
            name: String::new(),
            email: "ada@example.com".into(),
            subject: "   ".into(),
            message: "          ".into(),
        };
        assert!(matches!(svc.submit(blank).await, Err(ServiceError::Validation(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn invalid_message_never_reaches_store() {
        let store = Arc::new(FailingStore::unavailable());
        let svc = ContactService::new(store.clone());
        let err = svc.submit(message("short")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(store.writes(), 0);
    }
}
