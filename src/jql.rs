use std::fmt;

use crate::models::Project;

/// JQLのクエリ式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jql(String);

impl Jql {
    /// 組み立て済みのJQLをそのまま使う
    pub fn raw(expression: impl Into<String>) -> Self {
        Jql(expression.into())
    }

    /// `field = "value"`（値はエスケープされる）
    pub fn equals_string(field: &str, value: &str) -> Self {
        Jql(format!("{} = {}", field, escape_literal(value)))
    }

    /// `field = expression`（エスケープしない）
    pub fn equals_expression(field: &str, expression: &str) -> Self {
        Jql(format!("{} = {}", field, expression))
    }

    pub fn for_project(project: &Project) -> Self {
        Self::equals_expression("project", project.id())
    }

    pub fn and(self, other: Jql) -> Self {
        Jql(format!("{} AND {}", self.0, other.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 文字列リテラルとしてダブルクォートで囲む（`"`のみ`\"`にエスケープ）
pub fn escape_literal(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}
