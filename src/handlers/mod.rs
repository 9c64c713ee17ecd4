pub mod application;
pub mod auth;
pub mod job;
pub mod profile;
