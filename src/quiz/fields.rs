//! Field Store, the authoritative record of committed quiz answers.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Every key a quiz submission can carry.
///
/// Serialized names match the JSON body posted to `/api/quiz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "scope")]
    Scope,
    #[serde(rename = "seo")]
    Seo,
    #[serde(rename = "gbp", alias = "gmb")]
    BusinessProfile,
    #[serde(rename = "blog")]
    Blog,
    #[serde(rename = "domain_type")]
    DomainType,
    #[serde(rename = "domain_name")]
    DomainName,
    #[serde(rename = "domainUnknown")]
    DomainUnknown,
    #[serde(rename = "reach")]
    Reach,
    #[serde(rename = "ecommerce", alias = "ecom")]
    Ecommerce,
    #[serde(rename = "ecommerce_priority")]
    EcommercePriority,
    #[serde(rename = "product_count")]
    ProductCount,
    #[serde(rename = "product_type")]
    ProductType,
    #[serde(rename = "updates")]
    Updates,
    #[serde(rename = "mail")]
    Mail,
    #[serde(rename = "mail_count")]
    MailCount,
    #[serde(rename = "email_names")]
    EmailNames,
    #[serde(rename = "services")]
    Services,
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
}

impl FieldKey {
    pub const ALL: &'static [FieldKey] = &[
        Self::Scope,
        Self::Seo,
        Self::BusinessProfile,
        Self::Blog,
        Self::DomainType,
        Self::DomainName,
        Self::DomainUnknown,
        Self::Reach,
        Self::Ecommerce,
        Self::EcommercePriority,
        Self::ProductCount,
        Self::ProductType,
        Self::Updates,
        Self::Mail,
        Self::MailCount,
        Self::EmailNames,
        Self::Services,
        Self::Company,
        Self::Name,
        Self::Email,
        Self::Phone,
    ];

    /// JSON name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scope => "scope",
            Self::Seo => "seo",
            Self::BusinessProfile => "gbp",
            Self::Blog => "blog",
            Self::DomainType => "domain_type",
            Self::DomainName => "domain_name",
            Self::DomainUnknown => "domainUnknown",
            Self::Reach => "reach",
            Self::Ecommerce => "ecommerce",
            Self::EcommercePriority => "ecommerce_priority",
            Self::ProductCount => "product_count",
            Self::ProductType => "product_type",
            Self::Updates => "updates",
            Self::Mail => "mail",
            Self::MailCount => "mail_count",
            Self::EmailNames => "email_names",
            Self::Services => "services",
            Self::Company => "company",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Resolve a JSON name, accepting the older quiz's aliases.
    pub fn from_wire(name: &str) -> Option<FieldKey> {
        match name {
            "gmb" => Some(Self::BusinessProfile),
            "ecom" => Some(Self::Ecommerce),
            _ => Self::ALL.iter().copied().find(|k| k.as_str() == name),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single committed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
    Number(u32),
}

impl FieldValue {
    /// Map a JSON value onto a field value. `null` and shapes the store
    /// cannot hold come back as `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<FieldValue> {
        use serde_json::Value;
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Flag(*b)),
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Self::Number),
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Whether the value counts as an answer: non-empty text, any list or
    /// number, and a set flag.
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::List(_) | Self::Number(_) => true,
            Self::Flag(b) => *b,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Mapping from field key to committed value. Unset keys are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, key: FieldKey, value: impl Into<FieldValue>) {
        self.values.insert(key, value.into());
    }

    /// Current value, or `None` when absent.
    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    /// Remove a key. Clearing an absent key is a no-op.
    pub fn clear(&mut self, key: FieldKey) {
        self.values.remove(&key);
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Whether `key` holds an answer (see [`FieldValue::is_answered`]).
    pub fn is_answered(&self, key: FieldKey) -> bool {
        self.get(key).is_some_and(FieldValue::is_answered)
    }

    /// Non-empty text value.
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        match self.get(key) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn list(&self, key: FieldKey) -> Option<&[String]> {
        match self.get(key) {
            Some(FieldValue::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Flag value; absent counts as `false`.
    pub fn flag(&self, key: FieldKey) -> bool {
        matches!(self.get(key), Some(FieldValue::Flag(true)))
    }

    pub fn number(&self, key: FieldKey) -> Option<u32> {
        match self.get(key) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Scalar value rendered as text, for the submission document.
    pub fn display(&self, key: FieldKey) -> Option<String> {
        match self.get(key) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s.clone()),
            Some(FieldValue::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for FieldStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.values.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<'de> Deserialize<'de> for FieldStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut store = FieldStore::new();
        for (name, value) in &raw {
            let Some(key) = FieldKey::from_wire(name) else {
                tracing::debug!(field = %name, "Ignoring unknown quiz field");
                continue;
            };
            match FieldValue::from_json(value) {
                Some(v) => store.set(key, v),
                None if value.is_null() => {}
                None => {
                    tracing::debug!(field = %name, "Ignoring quiz field with unsupported shape")
                }
            }
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear() {
        let mut store = FieldStore::new();
        assert!(store.get(FieldKey::Seo).is_none());

        store.set(FieldKey::Seo, "primary");
        assert_eq!(store.text(FieldKey::Seo), Some("primary"));

        store.set(FieldKey::Seo, "none");
        assert_eq!(store.text(FieldKey::Seo), Some("none"));

        store.clear(FieldKey::Seo);
        assert!(!store.contains(FieldKey::Seo));
        // clearing again is total
        store.clear(FieldKey::Seo);
        assert!(store.is_empty());
    }

    #[test]
    fn empty_text_is_not_an_answer() {
        let mut store = FieldStore::new();
        store.set(FieldKey::Phone, "");
        assert!(store.contains(FieldKey::Phone));
        assert!(!store.is_answered(FieldKey::Phone));
        assert_eq!(store.text(FieldKey::Phone), None);
    }

    #[test]
    fn flag_defaults_to_false() {
        let mut store = FieldStore::new();
        assert!(!store.flag(FieldKey::DomainUnknown));
        store.set(FieldKey::DomainUnknown, true);
        assert!(store.flag(FieldKey::DomainUnknown));
    }

    #[test]
    fn wire_names_roundtrip_through_from_wire() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_wire(key.as_str()), Some(*key));
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert_eq!(FieldKey::from_wire("gmb"), Some(FieldKey::BusinessProfile));
        assert_eq!(FieldKey::from_wire("ecom"), Some(FieldKey::Ecommerce));
        assert_eq!(FieldKey::from_wire("nope"), None);
    }

    #[test]
    fn deserialize_quiz_body() {
        let body = serde_json::json!({
            "scope": "medium",
            "gmb": "yes",
            "domainUnknown": false,
            "mail_count": 2,
            "email_names": ["info", "faktura"],
            "services": [],
            "phone": null,
            "utm_source": "newsletter",
            "product_count": {"nested": true}
        });
        let store: FieldStore = serde_json::from_value(body).unwrap();

        assert_eq!(store.text(FieldKey::Scope), Some("medium"));
        assert_eq!(store.text(FieldKey::BusinessProfile), Some("yes"));
        assert_eq!(store.get(FieldKey::DomainUnknown), Some(&FieldValue::Flag(false)));
        assert_eq!(store.number(FieldKey::MailCount), Some(2));
        assert_eq!(store.list(FieldKey::EmailNames).unwrap(), ["info", "faktura"]);
        assert_eq!(store.list(FieldKey::Services).unwrap().len(), 0);
        assert!(!store.contains(FieldKey::Phone));
        assert!(!store.contains(FieldKey::ProductCount));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn serialize_uses_wire_names() {
        let mut store = FieldStore::new();
        store.set(FieldKey::BusinessProfile, "no");
        store.set(FieldKey::Services, vec!["meta_ads".to_string()]);
        store.set(FieldKey::MailCount, 3u32);

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"gbp": "no", "services": ["meta_ads"], "mail_count": 3})
        );
    }

    #[test]
    fn display_renders_numbers_and_text() {
        let mut store = FieldStore::new();
        store.set(FieldKey::ProductCount, 40u32);
        store.set(FieldKey::ProductType, "Kläder");
        assert_eq!(store.display(FieldKey::ProductCount).as_deref(), Some("40"));
        assert_eq!(store.display(FieldKey::ProductType).as_deref(), Some("Kläder"));
        assert_eq!(store.display(FieldKey::Services), None);
    }
}
