//! `yyyy-MM-ddTHH:mm:ssZ` serde format for optional UTC timestamps.
//!
//! Use with `#[serde(with = "quill_shared::timestamp")]`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format(at: &DateTime<Utc>) -> String {
    at.format(FORMAT).to_string()
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(at) => serializer.serialize_str(&format(at)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| {
            NaiveDateTime::parse_from_str(&s, FORMAT)
                .map(|naive| naive.and_utc())
                .map_err(serde::de::Error::custom)
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_truncates_to_seconds() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 58).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(format(&at), "2023-12-31T23:59:58Z");
    }

    #[test]
    fn test_parse_back() {
        let mut de = serde_json::Deserializer::from_str(r#""2023-01-02T03:04:05Z""#);
        let parsed = deserialize(&mut de).unwrap();
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap()));
    }
}
