pub mod builder;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod geo;
pub mod projection;
pub mod theater;
pub mod viewport;
