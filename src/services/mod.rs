pub mod prompt;
pub mod story;
