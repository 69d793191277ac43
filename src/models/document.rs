use serde::{Deserialize, Serialize};

/// Atlassian Document Format（リッチテキスト）のノード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Document {
    #[serde(rename = "doc")]
    Doc { version: u8, content: Vec<Document> },
    #[serde(rename = "paragraph")]
    Paragraph { content: Vec<Document> },
    #[serde(rename = "text")]
    Text { text: String },
}

impl Document {
    /// 1段落だけのプレーンテキスト文書
    pub fn plain(text: impl Into<String>) -> Self {
        Document::Doc {
            version: 1,
            content: vec![Document::Paragraph {
                content: vec![Document::Text { text: text.into() }],
            }],
        }
    }

    /// 含まれるテキストを連結（段落は改行区切り）
    pub fn to_plain_text(&self) -> String {
        match self {
            Document::Text { text } => text.clone(),
            Document::Paragraph { content } => content.iter().map(Document::to_plain_text).collect(),
            Document::Doc { content, .. } => content
                .iter()
                .map(Document::to_plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
