//! Prompt HTML handling.
//!
//! Prompt content is authored by test code and displayed by frontends that
//! may render it as real markup, so it passes through an allow-list sanitizer
//! first. Plain-text messages are escaped instead.

pub mod sanitize;

pub use sanitize::{
    ALLOWED_PROMPT_CLASSES, ALLOWED_PROMPT_STYLES, ALLOWED_PROMPT_TAGS, escape_html,
    filter_classes, filter_inline_styles, is_safe_style_value, plain_text_to_html,
    sanitize_prompt_html,
};
