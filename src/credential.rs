use std::fmt;

use base64::Engine;
use reqwest::{RequestBuilder, header};
use url::Url;

use crate::error::{Error, Result};

/// APIのバージョンパス
pub const API_PATH: &str = "rest/api/3";

/// ベースURLの検証方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlValidation {
    /// http/httpsの絶対URLでホスト名を持つことを要求する
    #[default]
    Strict,
    /// 文字列をそのまま受け入れる
    Lenient,
}

/// JIRAへの接続に使う認証情報（ベースURLと紐づく）
///
/// `anonymous*` / `basic_auth*` / `from_env` でのみ作成できる。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    base_url: String,
    auth: Auth,
}

#[derive(Clone, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Basic { username: String, password: String },
}

impl Credential {
    pub fn anonymous(url: &str) -> Result<Self> {
        Self::anonymous_with(url, UrlValidation::Strict)
    }

    pub fn anonymous_with(url: &str, validation: UrlValidation) -> Result<Self> {
        let base_url = normalize_base_url(url, validation)?;
        Ok(Credential {
            base_url,
            auth: Auth::Anonymous,
        })
    }

    pub fn basic_auth(url: &str, username: &str, password: &str) -> Result<Self> {
        Self::basic_auth_with(url, username, password, UrlValidation::Strict)
    }

    pub fn basic_auth_with(
        url: &str,
        username: &str,
        password: &str,
        validation: UrlValidation,
    ) -> Result<Self> {
        let base_url = normalize_base_url(url, validation)?;

        let message = match (username.is_empty(), password.is_empty()) {
            (true, true) => Some("Username and password must not be empty"),
            (true, false) => Some("Username must not be empty"),
            (false, true) => Some("Password must not be empty"),
            (false, false) => None,
        };
        if let Some(message) = message {
            return Err(Error::InvalidConfiguration(message.to_string()));
        }

        Ok(Credential {
            base_url,
            auth: Auth::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
        })
    }

    /// 環境変数（および`.env`）から認証情報を作成
    ///
    /// `JIRA_USER`と`JIRA_API_TOKEN`が両方とも未設定なら匿名アクセスになる。
    pub fn from_env() -> Result<Self> {
        use std::env;

        dotenv::dotenv().ok();

        let base_url = env::var("JIRA_URL").map_err(|_| {
            Error::ConfigurationMissing("JIRA_URL not found in environment".to_string())
        })?;

        match (env::var("JIRA_USER"), env::var("JIRA_API_TOKEN")) {
            (Err(_), Err(_)) => Self::anonymous(&base_url),
            (Ok(username), Ok(api_token)) => Self::basic_auth(&base_url, &username, &api_token),
            (Ok(_), Err(_)) => Err(Error::ConfigurationMissing(
                "JIRA_API_TOKEN not found in environment".to_string(),
            )),
            (Err(_), Ok(_)) => Err(Error::ConfigurationMissing(
                "JIRA_USER not found in environment".to_string(),
            )),
        }
    }

    /// `rest/api/3`まで含んだAPIルート
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> Option<&str> {
        match &self.auth {
            Auth::Anonymous => None,
            Auth::Basic { username, .. } => Some(username.as_str()),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self.auth, Auth::Anonymous)
    }

    /// リソースパス（`/project/search`など）の完全なURL
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// `Authorization`ヘッダーの値（匿名の場合はなし）
    pub fn authorization_header(&self) -> Option<String> {
        match &self.auth {
            Auth::Anonymous => None,
            Auth::Basic { username, password } => {
                let auth_value = format!("{}:{}", username, password);
                let encoded =
                    base64::engine::general_purpose::STANDARD.encode(auth_value.as_bytes());
                Some(format!("Basic {}", encoded))
            }
        }
    }

    /// リクエストに認証情報を付与
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.authorization_header() {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.auth {
            Auth::Anonymous => f
                .debug_struct("Anonymous")
                .field("base_url", &self.base_url)
                .finish(),
            Auth::Basic { username, .. } => f
                .debug_struct("BasicAuth")
                .field("base_url", &self.base_url)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

fn normalize_base_url(url: &str, validation: UrlValidation) -> Result<String> {
    if validation == UrlValidation::Strict && !is_valid_host_url(url) {
        return Err(Error::InvalidConfiguration("Invalid URL".to_string()));
    }

    Ok(format!("{}/{}", url.trim_end_matches('/'), API_PATH))
}

fn is_valid_host_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
