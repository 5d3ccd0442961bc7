#![deny(missing_docs)]

//! # Collection Models
//!
//! Typed view of a collection document. Every field is optional on the wire and
//! resolves to a documented default through the accessor methods.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// The collection document root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    /// Document metadata.
    #[serde(default, deserialize_with = "lenient")]
    pub info: CollectionInfo,
    /// Top-level nodes. The root itself never contributes a tag.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub item: Vec<CollectionNode>,
    /// Collection variables (e.g. `baseUrl`).
    #[serde(default, deserialize_with = "lenient_seq")]
    pub variable: Vec<KeyValue>,
}

impl Collection {
    /// Looks up a collection variable and renders it as text.
    pub fn variable(&self, key: &str) -> Option<String> {
        self.variable
            .iter()
            .find(|v| v.key.as_deref() == Some(key))
            .and_then(KeyValue::value_text)
    }
}

/// Metadata block of a collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionInfo {
    /// Collection name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Free-text description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Description>,
    /// Either a plain string or a `{ major, minor, patch }` object.
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<Value>,
}

impl CollectionInfo {
    /// Renders the version field, if any, as `major.minor.patch` or the raw string.
    pub fn version_text(&self) -> Option<String> {
        match self.version.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(parts) => {
                let part = |key: &str| parts.get(key).map(scalar_text).unwrap_or_default();
                let major = part("major");
                if major.is_empty() {
                    return None;
                }
                Some(format!("{}.{}.{}", major, or_zero(part("minor")), or_zero(part("patch"))))
            }
            _ => None,
        }
    }
}

fn or_zero(s: String) -> String {
    if s.is_empty() {
        "0".to_string()
    } else {
        s
    }
}

/// One node of the collection tree.
#[derive(Debug, Clone)]
pub enum CollectionNode {
    /// A folder grouping child nodes.
    Group(Group),
    /// A single request definition.
    Item(Item),
    /// Neither shape; contributes nothing to the output.
    Malformed,
}

impl CollectionNode {
    /// Classifies a raw JSON value.
    ///
    /// An object with an `item` array is a group, an object whose `request` is
    /// a string or an object is an item. Anything else is `Malformed`. Optional
    /// fields with an unexpected shape decode to their defaults.
    pub fn from_value(raw: Value) -> Self {
        if raw.get("item").is_some_and(Value::is_array) {
            return match serde_json::from_value::<Group>(raw) {
                Ok(group) => Self::Group(group),
                Err(e) => {
                    debug!(error = %e, "group failed to decode");
                    Self::Malformed
                }
            };
        }
        if raw
            .get("request")
            .is_some_and(|r| r.is_string() || r.is_object())
        {
            return match serde_json::from_value::<Item>(raw) {
                Ok(item) => Self::Item(item),
                Err(e) => {
                    debug!(error = %e, "item failed to decode");
                    Self::Malformed
                }
            };
        }
        Self::Malformed
    }
}

impl<'de> Deserialize<'de> for CollectionNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_value(raw))
    }
}

/// A folder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Group {
    /// Folder name; becomes a tag segment when non-empty.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Children in document order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub item: Vec<CollectionNode>,
}

/// A request definition plus its saved examples and scripts.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    /// Display name, optionally ending in `[operationId]`.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// The request descriptor.
    pub request: Request,
    /// Saved sample responses.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub response: Vec<SampleResponse>,
    /// Attached scripts (pre-request, test).
    #[serde(default, deserialize_with = "lenient_seq")]
    pub event: Vec<Event>,
}

/// A request given either as a bare URL or a full object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Request {
    /// Shorthand: a bare URL string, implying `GET`.
    Url(String),
    /// The full request object.
    Object(RequestObject),
}

impl Request {
    /// Lower-cased HTTP method, `get` when absent or for bare URLs.
    pub fn method(&self) -> String {
        match self {
            Request::Url(_) => "get".to_string(),
            Request::Object(obj) => obj
                .method
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .map(|m| m.trim().to_lowercase())
                .unwrap_or_else(|| "get".to_string()),
        }
    }

    /// Raw URL text; empty when no URL is given.
    pub fn raw_url(&self) -> &str {
        match self {
            Request::Url(url) => url,
            Request::Object(obj) => match &obj.url {
                Some(UrlSpec::Raw(raw)) => raw,
                Some(UrlSpec::Object(url)) => url.raw.as_deref().unwrap_or_default(),
                None => "",
            },
        }
    }

    /// Description text; empty for bare URLs or when none is given.
    pub fn description(&self) -> &str {
        match self {
            Request::Url(_) => "",
            Request::Object(obj) => obj.description.as_ref().map_or("", Description::text),
        }
    }

    /// The object form, if present.
    pub fn as_object(&self) -> Option<&RequestObject> {
        match self {
            Request::Url(_) => None,
            Request::Object(obj) => Some(obj),
        }
    }

    /// Authentication declaration, if present.
    pub fn auth(&self) -> Option<&Auth> {
        self.as_object().and_then(|obj| obj.auth.as_ref())
    }

    /// Request body, if present.
    pub fn body(&self) -> Option<&Body> {
        self.as_object().and_then(|obj| obj.body.as_ref())
    }
}

/// Full request object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestObject {
    /// HTTP method in any case.
    #[serde(default, deserialize_with = "lenient")]
    pub method: Option<String>,
    /// URL as raw text or a structured object.
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<UrlSpec>,
    /// Plain or structured description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Description>,
    /// Authentication declaration.
    #[serde(default, deserialize_with = "lenient")]
    pub auth: Option<Auth>,
    /// Request body.
    #[serde(default, deserialize_with = "lenient")]
    pub body: Option<Body>,
    /// Declared headers.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub header: Vec<KeyValue>,
}

/// A URL as raw text or a structured object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UrlSpec {
    /// Raw URL string.
    Raw(String),
    /// Structured URL.
    Object(UrlObject),
}

impl UrlSpec {
    /// The structured form, if present.
    pub fn as_object(&self) -> Option<&UrlObject> {
        match self {
            UrlSpec::Raw(_) => None,
            UrlSpec::Object(url) => Some(url),
        }
    }
}

/// Structured URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlObject {
    /// Full URL text, e.g. `{{baseUrl}}/users/:id?limit=10`.
    #[serde(default, deserialize_with = "lenient")]
    pub raw: Option<String>,
    /// Query parameters.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub query: Vec<KeyValue>,
    /// Path variables.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub variable: Vec<KeyValue>,
}

/// A description given as text or as `{ content, type }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// Plain text.
    Text(String),
    /// Structured description.
    Structured {
        /// Description body.
        #[serde(default, deserialize_with = "lenient")]
        content: Option<String>,
    },
}

impl Description {
    /// The description body, empty when absent.
    pub fn text(&self) -> &str {
        match self {
            Description::Text(text) => text,
            Description::Structured { content } => content.as_deref().unwrap_or_default(),
        }
    }
}

/// A key/value entry as used by headers, query strings, variables and form bodies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyValue {
    /// Entry key.
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    /// Entry value; usually a string but numbers and booleans occur.
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<Value>,
    /// Entry description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Description>,
    /// Disabled entries are ignored.
    #[serde(default, deserialize_with = "lenient")]
    pub disabled: bool,
    /// Form-data field kind (`text` or `file`).
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
}

impl KeyValue {
    /// Non-empty key, if any.
    pub fn name(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }

    /// Value rendered as text; `None` for null or empty values.
    pub fn value_text(&self) -> Option<String> {
        self.value
            .as_ref()
            .map(scalar_text)
            .filter(|text| !text.is_empty())
    }

    /// Non-empty description text.
    pub fn description_text(&self) -> Option<String> {
        self.description
            .as_ref()
            .map(Description::text)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// Authentication declaration: `{ type, <type>: [{ key, value }] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    /// Mechanism name, e.g. `bearer`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-mechanism attribute blocks keyed by mechanism name.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Auth {
    /// Reads an attribute of the declared mechanism.
    ///
    /// Accepts both the list form (`[{ key, value }]`) and the older object form.
    pub fn attribute(&self, key: &str) -> Option<String> {
        let block = self.attributes.get(&self.kind)?;
        let value = match block {
            Value::Array(entries) => entries
                .iter()
                .find(|e| e.get("key").and_then(Value::as_str) == Some(key))
                .and_then(|e| e.get("value")),
            Value::Object(map) => map.get(key),
            _ => None,
        }?;
        Some(scalar_text(value)).filter(|text| !text.is_empty())
    }
}

/// Request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    /// `raw`, `urlencoded`, `formdata`, `file` or `graphql`.
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<String>,
    /// Raw body text.
    #[serde(default, deserialize_with = "lenient")]
    pub raw: Option<String>,
    /// URL-encoded form entries.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub urlencoded: Vec<KeyValue>,
    /// Multipart form entries.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub formdata: Vec<KeyValue>,
    /// GraphQL payload `{ query, variables }`.
    #[serde(default, deserialize_with = "lenient")]
    pub graphql: Option<Value>,
    /// Mode options, e.g. `{ raw: { language: "json" } }`.
    #[serde(default, deserialize_with = "lenient")]
    pub options: Option<Value>,
}

impl Body {
    /// Declared language of a raw body, if any.
    pub fn raw_language(&self) -> Option<&str> {
        self.options
            .as_ref()?
            .get("raw")?
            .get("language")?
            .as_str()
    }
}

/// A saved example response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleResponse {
    /// Status code.
    #[serde(default, deserialize_with = "lenient_status_code")]
    pub code: Option<u16>,
    /// Status label, e.g. `Not Found`.
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    /// Response body text.
    #[serde(default, deserialize_with = "lenient")]
    pub body: Option<String>,
}

/// A script attached to an item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    /// `test` or `prerequest`.
    #[serde(default, deserialize_with = "lenient")]
    pub listen: Option<String>,
    /// Script body.
    #[serde(default, deserialize_with = "lenient")]
    pub script: Option<Script>,
}

/// Script body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Source lines.
    #[serde(default, deserialize_with = "lenient")]
    pub exec: Option<ScriptSource>,
}

/// Script source as one string or a list of lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScriptSource {
    /// Whole script.
    Text(String),
    /// One entry per line.
    Lines(Vec<String>),
}

impl ScriptSource {
    /// Joins the source into one string.
    pub fn joined(&self) -> String {
        match self {
            ScriptSource::Text(text) => text.clone(),
            ScriptSource::Lines(lines) => lines.join("\n"),
        }
    }
}

/// Decodes an optional field, falling back to its default when the value has
/// an unexpected shape. One odd sub-field must not cost the whole item.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_else(|e| {
        debug!(error = %e, "ignoring field with unexpected shape");
        T::default()
    }))
}

/// Decodes a list field entry by entry. Entries that fail to decode are
/// dropped; a non-list value yields an empty list.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            debug!(found = %other, "expected a list, ignoring field");
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Status codes appear both as numbers and as numeric strings.
fn lenient_status_code<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(code)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(raw: Value) -> CollectionNode {
        CollectionNode::from_value(raw)
    }

    fn item(raw: Value) -> Item {
        match node(raw) {
            CollectionNode::Item(item) => item,
            other => panic!("expected item, got {:?}", other),
        }
    }

    #[test]
    fn test_group_classification() {
        let n = node(json!({ "name": "Users", "item": [ { "request": "/a" } ] }));
        match n {
            CollectionNode::Group(g) => {
                assert_eq!(g.name.as_deref(), Some("Users"));
                assert_eq!(g.item.len(), 1);
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_item_with_item_field_not_array_is_not_group() {
        let n = node(json!({ "item": "nope", "request": "/a" }));
        assert!(matches!(n, CollectionNode::Item(_)));
    }

    #[test]
    fn test_undecodable_item_is_malformed() {
        assert!(matches!(node(json!({ "request": 12 })), CollectionNode::Malformed));
        assert!(matches!(node(json!("text")), CollectionNode::Malformed));
    }

    #[test]
    fn test_method_defaults() {
        assert_eq!(item(json!({ "request": "/a" })).request.method(), "get");
        assert_eq!(item(json!({ "request": {} })).request.method(), "get");
        assert_eq!(
            item(json!({ "request": { "method": "POST" } })).request.method(),
            "post"
        );
    }

    #[test]
    fn test_raw_url_variants() {
        assert_eq!(item(json!({ "request": "/bare" })).request.raw_url(), "/bare");
        assert_eq!(
            item(json!({ "request": { "url": "/text" } })).request.raw_url(),
            "/text"
        );
        assert_eq!(
            item(json!({ "request": { "url": { "raw": "/obj" } } }))
                .request
                .raw_url(),
            "/obj"
        );
        assert_eq!(item(json!({ "request": {} })).request.raw_url(), "");
    }

    #[test]
    fn test_description_variants() {
        assert_eq!(
            item(json!({ "request": { "description": "plain" } }))
                .request
                .description(),
            "plain"
        );
        assert_eq!(
            item(json!({ "request": { "description": { "content": "rich", "type": "text/markdown" } } }))
                .request
                .description(),
            "rich"
        );
        assert_eq!(item(json!({ "request": "/a" })).request.description(), "");
    }

    #[test]
    fn test_auth_attribute_forms() {
        let listed: Auth = serde_json::from_value(json!({
            "type": "apikey",
            "apikey": [ { "key": "key", "value": "X-Token" }, { "key": "in", "value": "query" } ]
        }))
        .unwrap();
        assert_eq!(listed.attribute("key").as_deref(), Some("X-Token"));
        assert_eq!(listed.attribute("in").as_deref(), Some("query"));
        assert_eq!(listed.attribute("missing"), None);

        let object: Auth =
            serde_json::from_value(json!({ "type": "bearer", "bearer": { "token": "abc" } }))
                .unwrap();
        assert_eq!(object.attribute("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_version_text() {
        let info: CollectionInfo =
            serde_json::from_value(json!({ "version": { "major": 2, "minor": 1 } })).unwrap();
        assert_eq!(info.version_text().as_deref(), Some("2.1.0"));
        let info: CollectionInfo = serde_json::from_value(json!({ "version": "v3" })).unwrap();
        assert_eq!(info.version_text().as_deref(), Some("v3"));
        assert_eq!(CollectionInfo::default().version_text(), None);
    }

    #[test]
    fn test_string_header_is_ignored() {
        let it = item(json!({
            "request": { "url": "/a", "header": "Accept: application/json" }
        }));
        assert_eq!(it.request.raw_url(), "/a");
        assert!(it.request.as_object().unwrap().header.is_empty());
    }

    #[test]
    fn test_null_disabled_means_enabled() {
        let it = item(json!({
            "request": {
                "url": { "raw": "/b", "query": [ { "key": "q", "value": "1", "disabled": null } ] }
            }
        }));
        let url = it.request.as_object().unwrap().url.as_ref().unwrap();
        let query = &url.as_object().unwrap().query;
        assert_eq!(query.len(), 1);
        assert!(!query[0].disabled);
    }

    #[test]
    fn test_sample_code_as_string() {
        let it = item(json!({
            "request": "/c",
            "response": [ { "code": "404", "status": "Not Found" }, { "code": "n/a" } ]
        }));
        assert_eq!(it.response[0].code, Some(404));
        assert_eq!(it.response[1].code, None);
    }

    #[test]
    fn test_odd_fields_fall_back_to_defaults() {
        let it = item(json!({
            "name": 7,
            "request": {
                "method": ["GET"],
                "url": "/d",
                "auth": "bearer",
                "body": { "mode": "raw", "urlencoded": { "k": "v" } }
            },
            "event": [ "not an event", { "listen": "test" } ],
            "response": { "code": 200 }
        }));
        assert_eq!(it.name, None);
        assert_eq!(it.request.method(), "get");
        assert!(it.request.auth().is_none());
        assert!(it.request.body().unwrap().urlencoded.is_empty());
        assert_eq!(it.event.len(), 1);
        assert!(it.response.is_empty());
    }

    #[test]
    fn test_non_object_request_is_still_malformed() {
        assert!(matches!(
            node(json!({ "request": [ "/a" ] })),
            CollectionNode::Malformed
        ));
        assert!(matches!(node(json!({ "request": null })), CollectionNode::Malformed));
    }

    #[test]
    fn test_script_source_joined() {
        let lines = ScriptSource::Lines(vec!["a".into(), "b".into()]);
        assert_eq!(lines.joined(), "a\nb");
    }
}
