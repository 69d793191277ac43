use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Document, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worklog {
    id: String,
    #[serde(rename = "issueId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_id: Option<String>,
    #[serde(rename = "self")]
    #[serde(skip_serializing_if = "Option::is_none")]
    self_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<User>,
    #[serde(with = "crate::datetime")]
    started: DateTime<Utc>,
    #[serde(default, with = "crate::datetime::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::datetime::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<DateTime<Utc>>,
    #[serde(rename = "timeSpent")]
    #[serde(skip_serializing_if = "Option::is_none")]
    time_spent: Option<String>,
    #[serde(rename = "timeSpentSeconds")]
    time_spent_seconds: u64,
    // ADFはノードの種類が多いので生のまま持つ
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<Value>,
}

impl Worklog {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn issue_id(&self) -> Option<&str> {
        self.issue_id.as_deref()
    }

    pub fn self_url(&self) -> Option<&str> {
        self.self_url.as_deref()
    }

    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn time_spent(&self) -> Option<&str> {
        self.time_spent.as_deref()
    }

    pub fn time_spent_seconds(&self) -> u64 {
        self.time_spent_seconds
    }

    pub fn comment(&self) -> Option<&Value> {
        self.comment.as_ref()
    }

    /// コメントのテキスト（対応していないノードを含む場合はNone）
    pub fn comment_text(&self) -> Option<String> {
        let document = Document::deserialize(self.comment.as_ref()?).ok()?;
        Some(document.to_plain_text())
    }
}

/// Worklog登録リクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorklogRequest {
    #[serde(with = "crate::datetime")]
    started: DateTime<Utc>,
    #[serde(rename = "timeSpentSeconds")]
    time_spent_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<Document>,
}

impl WorklogRequest {
    pub fn new(started: DateTime<Utc>, time_spent_seconds: u64) -> Self {
        Self {
            started,
            time_spent_seconds,
            comment: None,
        }
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(Document::plain(text));
        self
    }

    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    pub fn time_spent_seconds(&self) -> u64 {
        self.time_spent_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_worklog_deserialization() {
        let json_data = json!({
            "self": "https://example.atlassian.net/rest/api/3/issue/10010/worklog/10000",
            "author": {
                "accountId": "5b10a2844c20165700ede21g",
                "displayName": "Mia Krystof",
                "active": false
            },
            "comment": {
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "I did some work here."}]
                }]
            },
            "created": "2021-01-17T12:34:00.000+0000",
            "updated": "2021-01-18T23:45:00.000+0000",
            "started": "2021-01-17T12:34:00.000+0100",
            "timeSpent": "3h 20m",
            "timeSpentSeconds": 12000,
            "id": "100028",
            "issueId": "10002"
        });

        let worklog: Worklog = serde_json::from_value(json_data).unwrap();

        assert_eq!(worklog.id(), "100028");
        assert_eq!(worklog.issue_id(), Some("10002"));
        assert_eq!(worklog.time_spent(), Some("3h 20m"));
        assert_eq!(worklog.time_spent_seconds(), 12000);
        assert_eq!(
            worklog.started(),
            Utc.with_ymd_and_hms(2021, 1, 17, 11, 34, 0).unwrap()
        );
        assert_eq!(
            worklog.created(),
            Some(Utc.with_ymd_and_hms(2021, 1, 17, 12, 34, 0).unwrap())
        );
        assert_eq!(worklog.author().unwrap().display_name(), Some("Mia Krystof"));
        assert!(worklog.comment().is_some());
        assert_eq!(worklog.comment_text().as_deref(), Some("I did some work here."));
    }

    #[test]
    fn test_comment_text_with_unsupported_nodes() {
        // Given: 対応していないノード（mention）を含むコメント
        let json_data = json!({
            "id": "1",
            "started": "2020-01-01T09:00:00.000Z",
            "timeSpentSeconds": 60,
            "comment": {
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "mention", "attrs": {"id": "abc"}}]
                }]
            }
        });

        let worklog: Worklog = serde_json::from_value(json_data).unwrap();

        // Then: 生のコメントは残り、テキストはNone
        assert!(worklog.comment().is_some());
        assert_eq!(worklog.comment_text(), None);
    }

    #[test]
    fn test_comment_text_without_comment() {
        let json_data = json!({
            "id": "1",
            "started": "2020-01-01T09:00:00.000Z",
            "timeSpentSeconds": 60
        });

        let worklog: Worklog = serde_json::from_value(json_data).unwrap();

        assert_eq!(worklog.comment_text(), None);
    }

    #[test]
    fn test_worklog_with_zulu_timestamp() {
        let json_data = json!({
            "id": "1",
            "started": "2020-01-01T09:00:00.000Z",
            "timeSpentSeconds": 60
        });

        let worklog: Worklog = serde_json::from_value(json_data).unwrap();

        assert_eq!(
            worklog.started(),
            Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(worklog.created(), None);
    }

    #[test]
    fn test_worklog_rejects_unknown_timestamp_shape() {
        let json_data = json!({
            "id": "1",
            "started": "2020-01-01 09:00",
            "timeSpentSeconds": 60
        });

        assert!(serde_json::from_value::<Worklog>(json_data).is_err());
    }

    #[test]
    fn test_worklog_request_serialization() {
        // Given: コメント付きの登録リクエスト
        let started = Utc.with_ymd_and_hms(2021, 6, 15, 8, 30, 0).unwrap();
        let request = WorklogRequest::new(started, 5400).comment("Pairing session");

        // When: JSONにシリアライズ
        let body = serde_json::to_value(&request).unwrap();

        // Then: startedは+0000形式、コメントはADF
        assert_eq!(
            body,
            json!({
                "started": "2021-06-15T08:30:00.000+0000",
                "timeSpentSeconds": 5400,
                "comment": {
                    "type": "doc",
                    "version": 1,
                    "content": [{
                        "type": "paragraph",
                        "content": [{"type": "text", "text": "Pairing session"}]
                    }]
                }
            })
        );
    }

    #[test]
    fn test_worklog_request_without_comment() {
        let started = Utc.with_ymd_and_hms(2021, 6, 15, 8, 30, 0).unwrap();
        let body = serde_json::to_value(WorklogRequest::new(started, 60)).unwrap();

        assert!(body.get("comment").is_none());
    }
}
