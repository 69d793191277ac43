pub mod document;
pub mod issue;
pub mod project;
pub mod search;
pub mod user;
pub mod worklog;

pub use document::*;
pub use issue::*;
pub use project::*;
pub use search::*;
pub use user::*;
pub use worklog::*;
