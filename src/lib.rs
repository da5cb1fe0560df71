pub mod assets;
pub mod config;
pub mod handlers;
pub mod query;
pub mod server;
pub mod startup;
pub mod state;
