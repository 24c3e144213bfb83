pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod html;
pub mod organisms;
pub mod output;
pub mod pathways;
pub mod progress;
