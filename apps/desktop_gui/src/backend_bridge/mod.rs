//! Bridge between the UI thread and the backend worker: command vocabulary and worker runtime.

pub mod commands;
pub mod runtime;
