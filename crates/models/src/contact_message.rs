use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::shape::{self, Document, DocumentShape};

pub const MIN_MESSAGE_CHARS: usize = 10;

/// A contact form submission. Written to the store, never read back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Request-level validation, applied before the message is stored.
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text("name", &self.name)?;
        validate_email(&self.email)?;
        require_text("subject", &self.subject)?;
        // surrounding whitespace does not count towards the minimum
        let len = self.message.trim().chars().count();
        if len < MIN_MESSAGE_CHARS {
            return Err(ModelError::validation(format!(
                "message must be at least {MIN_MESSAGE_CHARS} characters, got {len}"
            )));
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Accepts `local@domain.tld` shaped addresses: a single `@`, no whitespace,
/// a dotted domain without empty labels.
pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::validation(format!("invalid email address: {email:?}"));
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || local.len() > 64 {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid());
    }
    let label_ok = |l: &&str| {
        !l.is_empty()
            && !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    if !labels.iter().all(label_ok) {
        return Err(invalid());
    }
    Ok(())
}

impl DocumentShape for ContactMessage {
    const COLLECTION: &'static str = "contactmessage";

    fn from_document(doc: &Document) -> Result<Self, ModelError> {
        Ok(ContactMessage {
            name: shape::required_str(doc, "name")?,
            email: shape::required_str(doc, "email")?,
            subject: shape::required_str(doc, "subject")?,
            message: shape::required_str(doc, "message")?,
        })
    }
}
