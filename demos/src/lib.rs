//! Shared helpers for the runnable demos: connector selection and plain-text rendering.

pub mod common;
pub mod render;
