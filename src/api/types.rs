//! Wire types for the message API.
//!
//! The backend has gone through several revisions and its records carry
//! whichever field names were current when they were written. Records are
//! therefore kept as raw JSON objects and read through alias-aware accessors
//! instead of a fixed struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

// ============================================================================
// Records
// ============================================================================

/// One message as returned by the backend. Display-only on this side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct MessageRecord(pub Map<String, Value>);

impl MessageRecord {
    /// `messageId`, falling back to `id`. Numeric ids are stringified.
    pub fn message_id(&self) -> Option<String> {
        ["messageId", "id"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(scalar_to_string))
    }

    /// Message payload: `data`, then `message`, then `text`.
    pub fn text(&self) -> &str {
        first_str(&self.0, &["data", "message", "text"]).unwrap_or("")
    }

    /// `attributes.source` (or `attributes.Source`), then top-level `source`.
    pub fn source(&self) -> &str {
        self.0
            .get("attributes")
            .and_then(Value::as_object)
            .and_then(|attrs| first_str(attrs, &["source", "Source"]))
            .or_else(|| first_str(&self.0, &["source"]))
            .unwrap_or("")
    }

    /// Raw timestamp: `publishTime`, then `created_at`.
    pub fn publish_time(&self) -> &str {
        first_str(&self.0, &["publishTime", "created_at"]).unwrap_or("")
    }

    /// Server-computed duplicate flag.
    ///
    /// Only boolean `true`, the string `"true"` under `is_duplicate`, or
    /// boolean `true` under `isDuplicate` count. Everything else is unique.
    pub fn is_duplicate(&self) -> bool {
        match self.0.get("is_duplicate") {
            Some(Value::Bool(true)) => true,
            Some(Value::String(s)) if s == "true" => true,
            _ => matches!(self.0.get("isDuplicate"), Some(Value::Bool(true))),
        }
    }

    /// Content-moderation flag from the alternate backend.
    pub fn flagged(&self) -> bool {
        self.0.get("flagged").is_some_and(truthy)
    }

    /// Builds a record for a just-published message without waiting for a reload.
    pub fn local_echo(
        receipt: &PublishReceipt,
        submitted_text: &str,
        source: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let mut map = Map::new();
        if let Some(id) = &receipt.message_id {
            map.insert("messageId".into(), Value::String(id.clone()));
        }
        let text = receipt.text.as_deref().unwrap_or(submitted_text);
        map.insert("data".into(), Value::String(text.to_string()));
        map.insert("attributes".into(), json!({ "source": source }));
        map.insert(
            "publishTime".into(),
            Value::String(now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
        );
        map.insert("flagged".into(), Value::Bool(receipt.flagged));
        Self(map)
    }
}

fn first_str<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Boolean, or a string spelling of `true`.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

// ============================================================================
// List responses
// ============================================================================

/// The three collection shapes the list endpoint has been seen to return.
///
/// Variant order is decode precedence: `items`, then `data`, then a bare array.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ListResponse {
    Items {
        items: Vec<MessageRecord>,
        #[serde(default)]
        total: Option<u64>,
    },
    Data {
        data: Vec<MessageRecord>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<MessageRecord>),
}

/// Canonical collection: one page of records plus the server's total count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessagePage {
    pub items: Vec<MessageRecord>,
    pub total: u64,
}

impl ListResponse {
    pub fn normalize(self) -> MessagePage {
        let (items, total) = match self {
            ListResponse::Items { items, total } | ListResponse::Data { data: items, total } => {
                (items, total)
            }
            ListResponse::Bare(items) => (items, None),
        };
        let total = total.unwrap_or(items.len() as u64);
        MessagePage { items, total }
    }
}

// ============================================================================
// Publishing
// ============================================================================

/// How the publish body is shaped on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadStyle {
    /// `{ message, attributes: { source, messageId? } }`
    #[default]
    Envelope,
    /// `{ data }`
    Data,
}

/// A message the user asked to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub text: String,
    pub source: String,
    pub message_id: Option<String>,
}

impl PublishRequest {
    pub fn body(&self, style: PayloadStyle) -> Value {
        match style {
            PayloadStyle::Envelope => {
                let mut attributes = Map::new();
                attributes.insert("source".into(), Value::String(self.source.clone()));
                if let Some(id) = &self.message_id {
                    attributes.insert("messageId".into(), Value::String(id.clone()));
                }
                json!({ "message": self.text, "attributes": attributes })
            }
            PayloadStyle::Data => json!({ "data": self.text }),
        }
    }
}

/// What the backend said about a successful publish. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishReceipt {
    pub message_id: Option<String>,
    /// Payload as stored, possibly profanity-masked.
    pub text: Option<String>,
    pub flagged: bool,
    pub profanity_masked: bool,
}

impl PublishReceipt {
    /// Lenient parse: a body that isn't a JSON object reads as `{}`.
    pub fn from_body(body: &str) -> Self {
        let value: Value = serde_json::from_str(body).unwrap_or_else(|_| json!({}));
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            message_id: ["messageId", "id"]
                .iter()
                .find_map(|key| map.get(*key).and_then(scalar_to_string)),
            text: first_str(map, &["data", "text"]).map(str::to_string),
            flagged: map.get("flagged").is_some_and(truthy),
            profanity_masked: map.get("profanity_masked").is_some_and(truthy),
        }
    }
}

// ============================================================================
// Display helpers
// ============================================================================

/// `2024-01-15T09:05:00Z` → `2024-01-15 09:05`. Other shapes pass through.
pub fn format_publish_time(value: &str) -> String {
    match value.split_once('T') {
        Some((date, time)) if !time.is_empty() => {
            let time = time.replace('Z', "");
            let hhmm: String = time.chars().take(5).collect();
            format!("{date} {hhmm}")
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> MessageRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_duplicate_encodings() {
        assert!(record(json!({"is_duplicate": true})).is_duplicate());
        assert!(record(json!({"is_duplicate": "true"})).is_duplicate());
        assert!(record(json!({"isDuplicate": true})).is_duplicate());

        assert!(!record(json!({"is_duplicate": false})).is_duplicate());
        assert!(!record(json!({"is_duplicate": "false"})).is_duplicate());
        assert!(!record(json!({"isDuplicate": "true"})).is_duplicate());
        assert!(!record(json!({})).is_duplicate());
    }

    #[test]
    fn test_field_aliases_in_precedence_order() {
        let r = record(json!({
            "id": 42,
            "message": "from message",
            "text": "from text",
            "created_at": "2024-01-15T09:05:00Z",
            "source": "top"
        }));
        assert_eq!(r.message_id().as_deref(), Some("42"));
        assert_eq!(r.text(), "from message");
        assert_eq!(r.publish_time(), "2024-01-15T09:05:00Z");
        assert_eq!(r.source(), "top");

        let r = record(json!({
            "messageId": "m-1",
            "id": 7,
            "data": "from data",
            "message": "ignored",
            "attributes": {"Source": "nested"},
            "source": "top"
        }));
        assert_eq!(r.message_id().as_deref(), Some("m-1"));
        assert_eq!(r.text(), "from data");
        assert_eq!(r.source(), "nested");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let r = record(json!({}));
        assert_eq!(r.message_id(), None);
        assert_eq!(r.text(), "");
        assert_eq!(r.source(), "");
        assert_eq!(r.publish_time(), "");
    }

    #[test]
    fn test_three_shapes_normalize_identically() {
        let a = json!({"messageId": "a", "data": "one"});
        let b = json!({"messageId": "b", "data": "two"});

        let shapes = [
            json!({"items": [a, b], "total": 2}),
            json!({"data": [a, b], "total": 2}),
            json!([a, b]),
            json!({"items": [a, b]}),
        ];
        let pages: Vec<MessagePage> = shapes
            .into_iter()
            .map(|v| serde_json::from_value::<ListResponse>(v).unwrap().normalize())
            .collect();

        for page in &pages {
            assert_eq!(page.total, 2);
            assert_eq!(page.items.len(), 2);
            assert_eq!(page.items[0].message_id().as_deref(), Some("a"));
        }
        assert!(pages.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_server_total_wins_over_length() {
        let page = serde_json::from_value::<ListResponse>(json!({"data": [{}], "total": 25}))
            .unwrap()
            .normalize();
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_unrecognized_shape_is_rejected() {
        assert!(serde_json::from_value::<ListResponse>(json!({"rows": []})).is_err());
        assert!(serde_json::from_value::<ListResponse>(json!("nope")).is_err());
    }

    #[test]
    fn test_format_publish_time() {
        assert_eq!(format_publish_time("2024-01-15T09:05:00Z"), "2024-01-15 09:05");
        assert_eq!(
            format_publish_time("2024-01-15T09:05:00.123+00:00"),
            "2024-01-15 09:05"
        );
        assert_eq!(format_publish_time("2024-01-15 09:05:00+00:00"), "2024-01-15 09:05:00+00:00");
        assert_eq!(format_publish_time("2024-01-15T"), "2024-01-15T");
        assert_eq!(format_publish_time(""), "");
    }

    #[test]
    fn test_envelope_body_omits_empty_message_id() {
        let req = PublishRequest {
            text: "hello".into(),
            source: "ui".into(),
            message_id: None,
        };
        assert_eq!(
            req.body(PayloadStyle::Envelope),
            json!({"message": "hello", "attributes": {"source": "ui"}})
        );
        assert_eq!(req.body(PayloadStyle::Data), json!({"data": "hello"}));

        let req = PublishRequest {
            message_id: Some("Msg-001".into()),
            ..req
        };
        assert_eq!(
            req.body(PayloadStyle::Envelope)["attributes"]["messageId"],
            "Msg-001"
        );
    }

    #[test]
    fn test_receipt_tolerates_garbage() {
        assert_eq!(PublishReceipt::from_body("not json"), PublishReceipt::default());
        assert_eq!(PublishReceipt::from_body("[1,2]"), PublishReceipt::default());

        let receipt = PublishReceipt::from_body(
            r#"{"status":"published","messageId":"123","profanity_masked":true}"#,
        );
        assert_eq!(receipt.message_id.as_deref(), Some("123"));
        assert!(receipt.profanity_masked);
        assert!(!receipt.flagged);

        let receipt = PublishReceipt::from_body(r#"{"data":"h***o","flagged":"true"}"#);
        assert_eq!(receipt.text.as_deref(), Some("h***o"));
        assert!(receipt.flagged);
    }

    #[test]
    fn test_local_echo_prefers_server_text() {
        let receipt = PublishReceipt {
            message_id: Some("9".into()),
            text: Some("d**n".into()),
            flagged: true,
            profanity_masked: false,
        };
        let now = chrono::DateTime::parse_from_rfc3339("2024-01-15T09:05:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let r = MessageRecord::local_echo(&receipt, "damn", "ui", now);
        assert_eq!(r.text(), "d**n");
        assert_eq!(r.message_id().as_deref(), Some("9"));
        assert_eq!(r.source(), "ui");
        assert!(r.flagged());
        assert_eq!(format_publish_time(r.publish_time()), "2024-01-15 09:05");
    }
}
