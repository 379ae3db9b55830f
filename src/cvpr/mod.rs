// src/cvpr/mod.rs
pub mod client;
pub mod config;

pub use client::CvprClient;
pub use config::ClientConfig;
