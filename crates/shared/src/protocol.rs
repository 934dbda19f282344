use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{GroupId, PersonId};

/// Decodes a group list body. Only a non-array body is an error; groups and
/// members that fail to decode are dropped with a warning.
pub fn decode_group_list(raw: &str) -> Result<Vec<GroupResponse>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    Ok(decode_entries(entries, "group"))
}

fn decode_entries<T: DeserializeOwned>(entries: Vec<Value>, kind: &'static str) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(kind, index, error = %err, "skipping malformed entry");
                None
            }
        })
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .map(T::from)
        .ok_or_else(|| <D::Error as de::Error>::custom(format!("invalid id {value}")))
}

fn lenient_members<'de, D>(deserializer: D) -> Result<Vec<GroupPersonResponse>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(decode_entries(entries, "group member")),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!(value = %other, "member list is not an array");
            Ok(Vec::new())
        }
    }
}

fn lenient_properties<'de, D>(deserializer: D) -> Result<ExtraProperties, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(ExtraProperties(map)),
        _ => Ok(ExtraProperties::default()),
    }
}

/// One entry of `GET /groups/ministries/{id}?hierarchy=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    #[serde(deserialize_with = "lenient_id")]
    pub id: GroupId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_members")]
    pub group_person_response_list: Vec<GroupPersonResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPersonResponse {
    pub person: PersonResponse,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    #[serde(deserialize_with = "lenient_id")]
    pub id: PersonId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub civil_status: String,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub extra_properties: ExtraProperties,
}

/// Free-form property bag attached to a person. Keys follow the backend's
/// conventions (`numberOfChildren`, `child1Dob`, ...); values arrive as strings,
/// numbers, booleans or null depending on how the form was filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraProperties(pub Map<String, Value>);

impl ExtraProperties {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value rendered as text. Null and missing keys read as `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        scalar_text(self.0.get(key)?)
    }

    /// Value read as a number, accepting numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        let parsed = match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse::<f64>().ok()
                }
            }
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }?;
        parsed.is_finite().then_some(parsed)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
