use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    id: String,
    key: String,
    #[serde(rename = "self")]
    #[serde(skip_serializing_if = "Option::is_none")]
    self_url: Option<String>,
    // 要求したフィールドによって形が変わる
    #[serde(default)]
    fields: Value,
}

/// `summary`だけを取り出すためのフィールド定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFields {
    pub summary: String,
}

impl Issue {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn self_url(&self) -> Option<&str> {
        self.self_url.as_deref()
    }

    pub fn fields(&self) -> &Value {
        &self.fields
    }

    /// `fields`を利用側の型にデコード
    pub fn decode_fields<F>(&self) -> Result<F>
    where
        F: DeserializeOwned,
    {
        Ok(F::deserialize(&self.fields)?)
    }

    pub fn summary(&self) -> Result<String> {
        self.decode_fields::<SummaryFields>().map(|f| f.summary)
    }
}
