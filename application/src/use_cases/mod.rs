//! Use cases (application services)

pub mod execute_test;
pub mod operator_prompt;
