//! Contact form message.

use serde::Deserialize;

use crate::quiz::document::NOT_GIVEN;

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A contact message with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub message: &'a str,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ContactMessage {
    /// `None` when name, email or message is missing or empty.
    pub fn validate(&self) -> Option<ValidContact<'_>> {
        Some(ValidContact {
            name: present(&self.name)?,
            email: present(&self.email)?,
            phone: present(&self.phone),
            message: present(&self.message)?,
        })
    }
}

impl ValidContact<'_> {
    pub fn subject(&self) -> String {
        format!("Nytt kontaktmeddelande från {}", self.name)
    }

    pub fn render(&self) -> String {
        format!(
            "\n# Nytt kontaktmeddelande\n\n\
             **Från:** {}\n\
             **E-post:** {}\n\
             **Telefon:** {}\n\n\
             ---\n\n\
             ## Meddelande\n\n\
             {}\n",
            self.name,
            self.email,
            self.phone.unwrap_or(NOT_GIVEN),
            self.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, email: &str, phone: Option<&str>, message: &str) -> ContactMessage {
        ContactMessage {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: phone.map(Into::into),
            message: Some(message.into()),
        }
    }

    #[test]
    fn missing_or_empty_required_fields() {
        assert!(ContactMessage::default().validate().is_none());
        assert!(message("", "a@b.se", None, "Hej").validate().is_none());
        assert!(message("Jane", "a@b.se", None, "").validate().is_none());
        assert!(message("Jane", "a@b.se", None, "Hej").validate().is_some());
    }

    #[test]
    fn renders_template() {
        let msg = message("Jane Doe", "jane@acme.se", Some("0701234567"), "Ring mig");
        let valid = msg.validate().unwrap();
        assert_eq!(valid.subject(), "Nytt kontaktmeddelande från Jane Doe");

        let body = valid.render();
        assert!(body.starts_with("\n# Nytt kontaktmeddelande\n\n**Från:** Jane Doe\n"));
        assert!(body.contains("**Telefon:** 0701234567\n\n---\n\n## Meddelande\n\nRing mig\n"));
    }

    #[test]
    fn missing_phone_is_placeholder() {
        let msg = message("Jane", "jane@acme.se", Some(""), "Hej");
        assert!(msg.validate().unwrap().render().contains("**Telefon:** Ej angivet"));
    }

    #[test]
    fn deserializes_partial_body() {
        let msg: ContactMessage = serde_json::from_str(r#"{"name":"Jane","extra":1}"#).unwrap();
        assert_eq!(msg.name.as_deref(), Some("Jane"));
        assert!(msg.email.is_none());
    }
}
