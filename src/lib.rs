pub mod clients;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod services;

pub use clients::{CompletionProvider, CompletionRequest};
pub use config::StoryConfig;
pub use error::{AppError, Result};
