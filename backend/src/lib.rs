pub mod classifier;
pub mod config;
pub mod error;
pub mod intake;
pub mod routes;
