use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};

/// JIRAが返す日時文字列を`DateTime<Utc>`にパース
///
/// 受け付ける形式は2つだけ:
/// - `Z`で終わるISO8601（例: `2020-01-01T09:00:00.000Z`）
/// - 4桁の数値オフセットで終わるISO8601（例: `2020-01-01T10:00:00.000+0100`）
///
/// 後者はコロン付き（`+01:00`）に書き換えてからパースする。
pub fn parse_jira_datetime(s: &str) -> Result<DateTime<Utc>> {
    let normalized = if s.ends_with('Z') {
        s.to_string()
    } else if let Some((head, offset)) = split_compact_offset(s) {
        format!("{}{}:{}", head, &offset[..3], &offset[3..])
    } else {
        return Err(Error::Decode(format!("Unsupported timestamp format: {}", s)));
    };

    DateTime::parse_from_rfc3339(&normalized)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Decode(format!("Invalid timestamp {}: {}", s, e)))
}

/// 末尾の`+HHMM` / `-HHMM`を切り出す
fn split_compact_offset(s: &str) -> Option<(&str, &str)> {
    if s.len() < 5 || !s.is_char_boundary(s.len() - 5) {
        return None;
    }
    let (head, offset) = s.split_at(s.len() - 5);
    let bytes = offset.as_bytes();
    let signed = bytes[0] == b'+' || bytes[0] == b'-';
    if signed && bytes[1..].iter().all(u8::is_ascii_digit) {
        Some((head, offset))
    } else {
        None
    }
}

/// Worklog登録用の`started`文字列を生成（`Z`ではなく`+0000`）
pub fn format_worklog_started(dt: &DateTime<Utc>) -> String {
    let iso = dt.to_rfc3339_opts(SecondsFormat::Millis, true);
    match iso.strip_suffix('Z') {
        Some(head) => format!("{}+0000", head),
        None => iso,
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_jira_datetime(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_worklog_started(dt))
}

pub(crate) mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_jira_datetime(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }

    pub(crate) fn serialize<S>(
        dt: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_utc_timestamp() {
        let dt = parse_jira_datetime("2020-01-01T09:00:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_compact_offset_matches_utc_instant() {
        // Given: 同じ瞬間を表す2つの形式
        let with_offset = "2020-01-01T10:00:00.000+0100";
        let with_zulu = "2020-01-01T09:00:00.000Z";

        // When: 両方をパース
        let a = parse_jira_datetime(with_offset).unwrap();
        let b = parse_jira_datetime(with_zulu).unwrap();

        // Then: 同じ時刻になる
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_negative_offset() {
        let dt = parse_jira_datetime("2024-03-10T20:30:00.000-0500").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 11, 1, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(parse_jira_datetime("2020-01-01T10:00:00.000+01:00").is_err());
        assert!(parse_jira_datetime("2020-01-01 10:00").is_err());
        assert!(parse_jira_datetime("").is_err());
        assert!(matches!(
            parse_jira_datetime("yesterday"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_format_worklog_started_uses_numeric_offset() {
        let dt = Utc.with_ymd_and_hms(2021, 6, 15, 8, 30, 0).unwrap();
        assert_eq!(format_worklog_started(&dt), "2021-06-15T08:30:00.000+0000");
    }
}
