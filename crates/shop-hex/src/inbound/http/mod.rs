mod auth;
mod carts;
pub mod extractors;
mod orders;
mod products;
mod server;

pub use server::{AppState, HttpServer, HttpServerConfig};
