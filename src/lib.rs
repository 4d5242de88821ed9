//! Library crate for nmap-web-rs exposing reusable modules.
pub mod command;
pub mod errors;
pub mod nmap;
pub mod parser;
pub mod server;
pub mod target;
pub mod types;
