pub mod client;
pub mod credential;
pub mod datetime;
pub mod error;
pub mod fetch_all;
pub mod jql;
pub mod models;
pub mod pagination;

pub use client::{IssueRef, JiraClient};
pub use credential::{Credential, UrlValidation};
pub use error::{Error, Result};
pub use models::*;

// Pagination re-exports
pub use fetch_all::{INITIAL_PAGE_SIZE, PageFetcher, fetch_all};
pub use pagination::{Page, PageQuery, PageRequest, PaginationConfig};

// Query and timestamp re-exports
pub use datetime::{format_worklog_started, parse_jira_datetime};
pub use jql::{Jql, escape_literal};
