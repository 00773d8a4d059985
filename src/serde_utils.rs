/// Serde utility functions for common patterns
use serde::Deserializer;
use std::fmt;

/// Deserialize a numeric id that may arrive either as a JSON integer or as a
/// decimal string (`42` or `"42"`).
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(deserialize_with = "crate::serde_utils::lenient_id")]
///     board_id: u64,
/// }
/// ```
pub fn lenient_id<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientIdVisitor;

    impl serde::de::Visitor<'_> for LenientIdVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or a string containing one")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u64::try_from(value).map_err(|_| E::custom(format!("id must not be negative: {value}")))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id: '{value}'")))
        }
    }

    de.deserialize_any(LenientIdVisitor)
}

/// Deserialize an optional string that may also arrive as a bare number.
///
/// - Missing field or `null` → `None`
/// - `"x"` → `Some("x")`
/// - `42` → `Some("42")`
pub fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientStringVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientStringVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }
    }

    de.deserialize_option(LenientStringVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "lenient_id")]
        id: u64,
        #[serde(default, deserialize_with = "lenient_string")]
        label: Option<String>,
    }

    #[test]
    fn test_lenient_id_accepts_number_and_string() {
        let from_number: Ids = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let from_string: Ids = serde_json::from_str(r#"{"id": " 42 "}"#).unwrap();
        assert_eq!(from_number.id, 42);
        assert_eq!(from_string.id, 42);
    }

    #[test]
    fn test_lenient_id_rejects_garbage() {
        assert!(serde_json::from_str::<Ids>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Ids>(r#"{"id": -1}"#).is_err());
        assert!(serde_json::from_str::<Ids>(r#"{"id": true}"#).is_err());
    }

    #[test]
    fn test_lenient_string_variants() {
        let missing: Ids = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let null: Ids = serde_json::from_str(r#"{"id": 1, "label": null}"#).unwrap();
        let text: Ids = serde_json::from_str(r#"{"id": 1, "label": "7"}"#).unwrap();
        let number: Ids = serde_json::from_str(r#"{"id": 1, "label": 7}"#).unwrap();
        assert_eq!(missing.label, None);
        assert_eq!(null.label, None);
        assert_eq!(text.label.as_deref(), Some("7"));
        assert_eq!(number.label.as_deref(), Some("7"));
    }
}
