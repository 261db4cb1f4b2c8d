pub mod book;
pub mod cli_args;
pub mod db;
pub mod error;
mod extractor;
mod middleware;
mod openapi;
mod route;
pub mod server;
pub mod state;
pub mod store;
