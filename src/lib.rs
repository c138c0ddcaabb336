pub mod cache;
pub mod cli;
pub mod error;
pub mod ext;
pub mod jira;
pub mod jql;
pub mod metrics;
pub mod model;
pub mod render;
pub mod schema;
pub mod tool;
pub mod util;
