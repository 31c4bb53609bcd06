use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One searchable page of the site.
///
/// Missing or `null` fields deserialize to the empty string, so a sloppy
/// index entry still scores and renders instead of failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Document {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Convert a decoded JSON payload into the document list.
///
/// The payload must be an array; anything else is a malformed index.
pub fn from_value(value: Value) -> Result<Vec<Document>> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(Error::Format(format!(
            "expected an array of documents, found {}",
            json_kind(&other)
        ))),
    }
}

/// Parse a raw JSON index body.
pub fn from_slice(bytes: &[u8]) -> Result<Vec<Document>> {
    from_value(serde_json::from_slice(bytes)?)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_array() {
        let docs = from_slice(
            br#"[{"url":"pages/F/Fire_Sword.html","title":"Fire Sword","content":"deals fire damage"}]"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].url, "pages/F/Fire_Sword.html");
        assert_eq!(docs[0].title, "Fire Sword");
        assert_eq!(docs[0].content, "deals fire damage");
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let docs =
            from_slice(br#"[{"url":"/a"},{"url":"/b","title":null}]"#).unwrap();

        assert_eq!(docs[0].title, "");
        assert_eq!(docs[0].content, "");
        assert_eq!(docs[1].title, "");
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = from_slice(br#"{"url":"/a"}"#).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = from_slice(b"[{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
