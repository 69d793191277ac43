//! 全ページ取得
//!
//! 1ページ目を大きめのページサイズで取得して総ページ数を調べ、
//! 残りのページを並行に取得してページ順に連結する。

use std::future::Future;

use futures::future::try_join_all;
use tracing::debug;

use crate::credential::Credential;
use crate::error::Result;
use crate::pagination::{Page, PageRequest, PaginationConfig};

/// 1ページ目のリクエストに使うページサイズ
pub const INITIAL_PAGE_SIZE: u32 = 500;

/// 1ページ分を取得する処理
///
/// `Fn(Credential, PageRequest) -> impl Future<Output = Result<Page<T>>>`
/// のクロージャはそのまま`PageFetcher`として使える。
pub trait PageFetcher<T> {
    fn fetch_page(
        &self,
        credential: &Credential,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<T>>> + Send;
}

impl<T, F, Fut> PageFetcher<T> for F
where
    F: Fn(Credential, PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>> + Send,
{
    fn fetch_page(
        &self,
        credential: &Credential,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<T>>> + Send {
        self(credential.clone(), request)
    }
}

/// すべてのページを取得して要素を連結する
///
/// どれか1ページでも失敗したら全体が失敗し、途中までの結果は返さない。
pub async fn fetch_all<T, P>(fetcher: &P, credential: &Credential) -> Result<Vec<T>>
where
    P: PageFetcher<T> + ?Sized,
{
    let first_request = PaginationConfig::new(INITIAL_PAGE_SIZE).request(1);
    let first = fetcher.fetch_page(credential, first_request).await?;

    let total_pages = first.total_pages();
    let returned = first.len() as u32;
    debug!(
        total = first.total(),
        total_pages, returned, "fetched first page"
    );

    // サーバー側の上限で要求より少なく返ることがあるので、
    // 以降のオフセットは実際に返った件数で計算する
    if total_pages <= 1 || returned == 0 {
        return Ok(first.into_items());
    }
    let config = PaginationConfig::new(returned);

    let remaining = try_join_all(
        (2..=total_pages).map(|page_number| fetcher.fetch_page(credential, config.request(page_number))),
    )
    .await?;

    let mut items = first.into_items();
    for page in remaining {
        items.extend(page.into_items());
    }

    debug!(count = items.len(), "fetched all pages");
    Ok(items)
}
