pub mod canvas;
pub mod cli;
pub mod db;
pub mod models;
pub mod server;
pub mod service;

pub use db::Database;
