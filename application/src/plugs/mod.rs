//! Plugs: reusable capabilities injected into phases.

pub mod user_input;
