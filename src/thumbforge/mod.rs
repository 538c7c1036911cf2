// src/thumbforge/mod.rs

pub mod backend;
pub mod clients;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod gateway;
pub mod image_data;
pub mod prompts;
pub mod thumbnail_flow;
pub mod title_flow;
pub mod types;

// also reachable as thumbforge::thumbforge::StudioController
pub use controller::{Step, StudioController};
pub use gateway::AiGateway;
