pub mod mapper;
pub mod schema;
pub mod sqlx_repo;

pub use schema::create_tables;
pub use sqlx_repo::{RepoConfig, SqlxReportsRepository};
