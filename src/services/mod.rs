pub mod utils;
pub mod config;
pub mod languages;
pub mod parser;
pub mod piston;
pub mod formatter;
pub mod session;
pub mod runner;
pub mod discord;
