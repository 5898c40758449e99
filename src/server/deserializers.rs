use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};

// the web client sends ids taken from object keys, so they arrive as "1"
// as often as 1
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Accepts an integer, a string holding an integer, `null`, or nothing.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(value)) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&value), &"an integer")),
    }
}
