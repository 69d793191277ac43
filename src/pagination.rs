use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// 1ページあたりの件数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    items_per_page: u32,
}

impl PaginationConfig {
    pub fn new(items_per_page: u32) -> Self {
        Self { items_per_page }
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// 指定ページ（1始まり）のリクエストを作成
    pub fn request(&self, page_number: u32) -> PageRequest {
        PageRequest::new(*self, page_number)
    }
}

/// 特定のページを要求するためのパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    items_per_page: u32,
    page_number: u32,
}

impl PageRequest {
    pub fn new(config: PaginationConfig, page_number: u32) -> Self {
        Self {
            items_per_page: config.items_per_page,
            page_number,
        }
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// 0始まりのオフセット
    ///
    /// `u32`のページ番号とページサイズの積は`u64`に収まる。
    pub fn start_at(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.items_per_page)
    }

    /// URLクエリパラメータ（`startAt` / `maxResults`）
    pub fn query(&self) -> PageQuery {
        PageQuery {
            start_at: self.start_at(),
            max_results: self.items_per_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    #[serde(rename = "startAt")]
    pub start_at: u64,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
}

/// ページ単位で取得したコレクション
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    max_results: u32,
    start_at: u32,
    total: u32,
    is_last: bool,
    items: Vec<T>,
}

/// サーバーが返すページのエンベロープ
///
/// アイテム配列は`values`（/project/search など）か`issues`（/search）のどちらか。
#[derive(Deserialize)]
struct PageEnvelope<T> {
    #[serde(rename = "maxResults")]
    max_results: u32,
    #[serde(rename = "startAt")]
    start_at: u32,
    total: u32,
    #[serde(rename = "isLast")]
    is_last: Option<bool>,
    values: Option<Vec<T>>,
    issues: Option<Vec<T>>,
}

impl<T> PageEnvelope<T> {
    fn into_page(self) -> Result<Page<T>> {
        let items = self
            .values
            .or(self.issues)
            .ok_or_else(|| Error::Decode("page has neither `values` nor `issues`".to_string()))?;

        Page::new(self.max_results, self.start_at, self.total, self.is_last, items)
    }
}

impl<T> Page<T> {
    pub(crate) fn new(
        max_results: u32,
        start_at: u32,
        total: u32,
        is_last: Option<bool>,
        items: Vec<T>,
    ) -> Result<Self> {
        if items.len() > max_results as usize {
            return Err(Error::Decode(format!(
                "page holds {} items but maxResults is {}",
                items.len(),
                max_results
            )));
        }

        // isLastが無いAPIもあるので件数から判定する
        let is_last = is_last
            .unwrap_or_else(|| u64::from(start_at) + items.len() as u64 >= u64::from(total));

        // page_number()とnext_page()が u32 に収まること
        if max_results > 0 {
            let index = start_at.div_ceil(max_results);
            let next_overflows = !is_last && index >= u32::MAX - 1;
            if index == u32::MAX || next_overflows {
                return Err(Error::Decode(format!(
                    "page number overflows for startAt {} with maxResults {}",
                    start_at, max_results
                )));
            }
        }

        Ok(Self {
            max_results,
            start_at,
            total,
            is_last,
            items,
        })
    }

    /// 要素ごとのデコーダーを指定してJSONからページを作成
    pub fn decode_with<F>(payload: Value, decode_item: F) -> Result<Self>
    where
        F: Fn(Value) -> Result<T>,
    {
        let envelope: PageEnvelope<Value> = serde_json::from_value(payload)?;
        let raw = envelope.into_page()?;
        let items = raw
            .items
            .into_iter()
            .map(decode_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            max_results: raw.max_results,
            start_at: raw.start_at,
            total: raw.total,
            is_last: raw.is_last,
            items,
        })
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn start_at(&self) -> u32 {
        self.start_at
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1始まりのページ番号
    pub fn page_number(&self) -> u32 {
        if self.max_results == 0 {
            return 1;
        }
        self.start_at.div_ceil(self.max_results) + 1
    }

    pub fn total_pages(&self) -> u32 {
        if self.max_results == 0 {
            return 0;
        }
        self.total.div_ceil(self.max_results)
    }

    /// 次のページのリクエスト（最終ページならNone）
    pub fn next_page(&self) -> Option<PageRequest> {
        if self.is_last {
            return None;
        }
        Some(PaginationConfig::new(self.max_results).request(self.page_number() + 1))
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            max_results: self.max_results,
            start_at: self.start_at,
            total: self.total,
            is_last: self.is_last,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        PageEnvelope::<T>::deserialize(deserializer)?
            .into_page()
            .map_err(serde::de::Error::custom)
    }
}
