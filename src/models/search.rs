/// 全フィールドを表すスコープ指定
pub const ALL_FIELDS: &str = "*all";

/// 検索で取得するフィールドの指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldScope {
    fields: Vec<String>,
}

impl FieldScope {
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all() -> Self {
        Self::only([ALL_FIELDS])
    }

    /// 全フィールドから指定したものを除外（`-field`）
    pub fn all_except<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scope = Self::all();
        scope
            .fields
            .extend(excluded.into_iter().map(|f| format!("-{}", f.as_ref())));
        scope
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// `fields`クエリパラメータの値（カンマ区切り）
    pub fn to_query_value(&self) -> String {
        self.fields.join(",")
    }
}

impl Default for FieldScope {
    fn default() -> Self {
        Self::only(["summary"])
    }
}
