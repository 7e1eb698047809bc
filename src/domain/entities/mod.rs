pub mod audit;
pub mod campaign;
pub mod contact;
pub mod project;
pub mod query;
pub mod record;
pub mod task;
pub mod user;
