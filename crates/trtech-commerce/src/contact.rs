//! Contact form.

use crate::ids::MessageId;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Name and message must be present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing: Vec<&'static str> = [("name", &self.name), ("message", &self.message)]
            .into_iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| k)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingFields(missing))
        }
    }

    /// Text for the messaging hand-off.
    pub fn message_text(&self) -> String {
        format!(
            "Hi! Contact Form Submission:\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Subject: {}\n\n\
             Message:\n{}",
            self.name,
            self.email,
            self.phone,
            self.subject,
            self.message.trim()
        )
    }
}

/// A stored contact message, as listed for staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: MessageId,
    #[serde(flatten)]
    pub form: ContactForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_text() {
        let form = ContactForm {
            name: "Sipho".into(),
            email: "sipho@x.com".into(),
            phone: String::new(),
            subject: "Quote".into(),
            message: "Do you fix consoles?\n".into(),
        };
        assert_eq!(
            form.message_text(),
            "Hi! Contact Form Submission:\n\nName: Sipho\nEmail: sipho@x.com\nPhone: \nSubject: Quote\n\nMessage:\nDo you fix consoles?"
        );
    }

    #[test]
    fn test_contact_requires_name_and_message() {
        let form = ContactForm::default();
        assert_eq!(
            form.validate(),
            Err(CommerceError::MissingFields(vec!["name", "message"]))
        );
    }

    #[test]
    fn test_stored_message() {
        let json = r#"{"_id":"abc","name":"Sipho","message":"Hello","createdAt":"2025-01-02T03:04:05Z"}"#;
        let stored: ContactMessage = serde_json::from_str(json).unwrap();
        assert_eq!(stored.form.name, "Sipho");
        assert!(stored.created_at.is_some());
    }
}
