pub mod application;
pub mod company;
pub mod freelancer;
pub mod job;
pub mod user;
