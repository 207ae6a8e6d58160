pub mod chat;
pub mod config;
pub mod export;
pub mod extract;
pub mod generate;
pub mod review;
pub mod segment;
pub mod suggest_mode;
pub mod versions;
