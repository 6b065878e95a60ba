use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Payload of the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    // Anti-bot honeypot field; humans never fill it
    pub company: Option<String>,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(email, length(min = 5))]
    pub email: String,

    pub phone: Option<String>,
    pub subject: Option<String>,

    #[validate(length(min = 1))]
    pub message: String,
}

impl ContactForm {
    /// A filled honeypot field marks the submission as automated.
    pub fn is_bot(&self) -> bool {
        self.company.as_ref().is_some_and(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl From<ContactForm> for NewMessage {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            subject: form.subject,
            message: form.message,
        }
    }
}

/// Row in `messages_archive`. Carries its own archive-local `id`;
/// `original_id` is the provenance key used for restore.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArchivedMessage {
    pub id: i64,
    pub original_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArchivedMessage {
    pub original_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Convert an active message into its archive copy. All
    /// user-visible fields are carried over verbatim; the active id
    /// becomes `original_id`.
    pub fn into_archived(self) -> NewArchivedMessage {
        NewArchivedMessage {
            original_id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

impl ArchivedMessage {
    /// Convert an archive copy back into an insertable active message.
    pub fn into_restored(self) -> NewMessage {
        NewMessage {
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveAction {
    Archive,
    Restore,
}

impl std::str::FromStr for ArchiveAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archive" => Ok(Self::Archive),
            "restore" => Ok(Self::Restore),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedMessages {
    pub data: Vec<Message>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedArchivedMessages {
    pub data: Vec<ArchivedMessage>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            company: None,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: Some("123-456-7890".to_string()),
            subject: Some("Question".to_string()),
            message: "I have a question about your services".to_string(),
        }
    }

    #[test]
    fn test_honeypot_detection() {
        let mut bot = form();
        bot.company = Some("spam".to_string());
        assert!(bot.is_bot());

        assert!(!form().is_bot());

        let mut empty_company = form();
        empty_company.company = Some(String::new());
        assert!(!empty_company.is_bot());
    }

    #[test]
    fn test_contact_form_validation() {
        assert!(form().validate().is_ok());

        let mut bad_email = form();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut empty_message = form();
        empty_message.message = String::new();
        assert!(empty_message.validate().is_err());
    }

    #[test]
    fn test_archive_round_trip_preserves_fields() {
        let message = Message {
            id: 123,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            phone: None,
            subject: Some("Inquiry".to_string()),
            message: "Interested in your product".to_string(),
            created_at: Utc::now(),
        };

        let archived_copy = message.clone().into_archived();
        assert_eq!(archived_copy.original_id, message.id);
        assert_eq!(archived_copy.created_at, message.created_at);

        let archived = ArchivedMessage {
            id: 999,
            original_id: archived_copy.original_id,
            name: archived_copy.name,
            email: archived_copy.email,
            phone: archived_copy.phone,
            subject: archived_copy.subject,
            message: archived_copy.message,
            created_at: archived_copy.created_at,
            archived_at: Utc::now(),
        };

        let restored = archived.into_restored();
        assert_eq!(restored.name, message.name);
        assert_eq!(restored.email, message.email);
        assert_eq!(restored.phone, message.phone);
        assert_eq!(restored.subject, message.subject);
        assert_eq!(restored.message, message.message);
    }

    #[test]
    fn test_archive_action_parsing() {
        assert_eq!("archive".parse(), Ok(ArchiveAction::Archive));
        assert_eq!("restore".parse(), Ok(ArchiveAction::Restore));
        assert!("delete".parse::<ArchiveAction>().is_err());
        assert!("Archive".parse::<ArchiveAction>().is_err());
    }
}
