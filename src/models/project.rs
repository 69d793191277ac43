use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: String,
    key: String,
    name: String,
    #[serde(rename = "self")]
    self_url: String,
    #[serde(rename = "projectTypeKey")]
    #[serde(skip_serializing_if = "Option::is_none")]
    project_type_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    simplified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(rename = "isPrivate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    is_private: Option<bool>,
}

impl Project {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    pub fn project_type_key(&self) -> Option<&str> {
        self.project_type_key.as_deref()
    }

    pub fn simplified(&self) -> Option<bool> {
        self.simplified
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn is_private(&self) -> Option<bool> {
        self.is_private
    }
}
