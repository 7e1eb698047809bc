pub mod queries;
pub mod repo;
pub mod schema;
pub mod tables;
