pub mod audit_service;
pub mod import_service;
pub mod user_service;
pub mod view_controller;
