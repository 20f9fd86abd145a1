//! Terminal frontend for operator prompts

pub mod frontend;
pub mod prompt_view;
