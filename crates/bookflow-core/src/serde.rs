use serde::{Deserialize, Deserializer};

/// Deserializes an optional string into an optional i64.
///
/// Query parameters arrive as strings; an empty string is treated as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Deserializes a string with surrounding whitespace removed.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Deserializes an optional string with surrounding whitespace removed.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        nickname: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        page: Option<i64>,
    }

    #[test]
    fn test_trims_strings() {
        let sample: Sample =
            serde_json::from_str(r#"{"name": "  alice ", "nickname": " al "}"#).unwrap();
        assert_eq!(sample.name, "alice");
        assert_eq!(sample.nickname.as_deref(), Some("al"));
        assert_eq!(sample.page, None);
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let err = serde_json::from_str::<Sample>(r#"{"nickname": "al"}"#)
            .err()
            .unwrap();
        assert!(err.to_string().contains("missing field `name`"));
    }

    #[test]
    fn test_optional_i64() {
        let sample: Sample = serde_json::from_str(r#"{"name": "a", "page": " 3 "}"#).unwrap();
        assert_eq!(sample.page, Some(3));

        let sample: Sample = serde_json::from_str(r#"{"name": "a", "page": ""}"#).unwrap();
        assert_eq!(sample.page, None);
    }
}
