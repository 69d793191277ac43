use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::fetch_all::fetch_all;
use crate::jql::Jql;
use crate::models::{FieldScope, Issue, Project, Worklog, WorklogRequest};
use crate::pagination::{Page, PageRequest};

/// 検索時に常に要求するプロパティ
const SEARCH_PROPERTIES: &str = "id,key,summary";

/// Worklog登録先のIssue（キーまたはID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef(String);

impl IssueRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Issue> for IssueRef {
    fn from(issue: &Issue) -> Self {
        IssueRef(issue.key().to_string())
    }
}

impl From<&str> for IssueRef {
    fn from(key_or_id: &str) -> Self {
        IssueRef(key_or_id.to_string())
    }
}

impl From<String> for IssueRef {
    fn from(key_or_id: String) -> Self {
        IssueRef(key_or_id)
    }
}

#[derive(Debug, Clone)]
pub struct JiraClient {
    pub(crate) client: Client,
}

impl JiraClient {
    pub fn new() -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        // タイムアウトは設定しない
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client })
    }

    /// 既存のreqwestクライアントを使う
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub(crate) async fn get<T, Q>(&self, credential: &Credential, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = credential.resource_url(path);
        debug!(%url, "GET");

        let request = credential.authorize(self.client.get(&url).query(query));
        self.send(request).await
    }

    pub(crate) async fn post<T, B>(&self, credential: &Credential, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = credential.resource_url(path);
        debug!(%url, "POST");

        let request = credential.authorize(self.client.post(&url).json(body));
        self.send(request).await
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("credentials rejected by server");
            return Err(Error::InvalidCredentials(
                "The server rejected the supplied credentials, please log in again".to_string(),
            ));
        }

        if !status.is_success() {
            let status = status.as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status, "request failed");
            return Err(Error::ApiError { status, message });
        }

        let body = response.text().await?;
        let data = serde_json::from_str(&body)?;
        Ok(data)
    }

    /// プロジェクト一覧の1ページを取得
    #[instrument(skip(self, credential))]
    pub async fn get_projects(
        &self,
        credential: &Credential,
        request: PageRequest,
    ) -> Result<Page<Project>> {
        self.get(credential, "/project/search", &request.query()).await
    }

    /// JQLで検索したIssueの1ページを取得
    #[instrument(skip(self, credential, jql, fields), fields(jql = %jql))]
    pub async fn get_issues(
        &self,
        credential: &Credential,
        request: PageRequest,
        jql: &Jql,
        fields: &FieldScope,
    ) -> Result<Page<Issue>> {
        let query = request.query();
        let fields = fields.to_query_value();
        let start_at = query.start_at.to_string();
        let max_results = query.max_results.to_string();

        let params = [
            ("jql", jql.as_str()),
            ("fields", fields.as_str()),
            ("properties", SEARCH_PROPERTIES),
            ("startAt", start_at.as_str()),
            ("maxResults", max_results.as_str()),
        ];

        let page: Page<Issue> = self.get(credential, "/search", &params).await?;
        debug!(returned = page.len(), total = page.total(), "searched issues");
        Ok(page)
    }

    /// 全フィールド付きでIssueを検索
    pub async fn get_full_issues(
        &self,
        credential: &Credential,
        request: PageRequest,
        jql: &Jql,
    ) -> Result<Page<Issue>> {
        self.get_issues(credential, request, jql, &FieldScope::all())
            .await
    }

    /// Issueを1件取得
    #[instrument(skip(self, credential, issue, fields))]
    pub async fn get_issue(
        &self,
        credential: &Credential,
        issue: impl Into<IssueRef>,
        fields: &FieldScope,
    ) -> Result<Issue> {
        let issue = issue.into();
        let path = format!("/issue/{}", urlencoding::encode(issue.as_str()));
        let fields = fields.to_query_value();

        self.get(credential, &path, &[("fields", fields.as_str())])
            .await
    }

    /// Issueに作業時間を記録
    #[instrument(skip(self, credential, issue, worklog))]
    pub async fn add_worklog(
        &self,
        credential: &Credential,
        issue: impl Into<IssueRef>,
        worklog: &WorklogRequest,
    ) -> Result<Worklog> {
        let issue = issue.into();
        let path = format!("/issue/{}/worklog", urlencoding::encode(issue.as_str()));

        let created: Worklog = self.post(credential, &path, worklog).await?;
        debug!(issue = issue.as_str(), worklog_id = created.id(), "added worklog");
        Ok(created)
    }

    /// 全プロジェクトを取得
    pub async fn get_all_projects(&self, credential: &Credential) -> Result<Vec<Project>> {
        let fetcher = |credential: Credential, request: PageRequest| async move {
            self.get_projects(&credential, request).await
        };
        fetch_all(&fetcher, credential).await
    }

    /// JQLに一致するIssueをすべて取得
    pub async fn get_all_issues(
        &self,
        credential: &Credential,
        jql: &Jql,
        fields: &FieldScope,
    ) -> Result<Vec<Issue>> {
        let fetcher = |credential: Credential, request: PageRequest| async move {
            self.get_issues(&credential, request, jql, fields).await
        };
        fetch_all(&fetcher, credential).await
    }
}
