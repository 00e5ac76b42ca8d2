//! Core configuration and error types for BlogStack.
//!
//! This crate provides the building blocks shared by the edge function, the
//! origin, and the HTTP layer: the environment-driven [`EdgeConfig`] and the
//! [`BlogStackError`] type.

mod config;
mod error;

pub use config::EdgeConfig;
pub use error::{BlogStackError, BlogStackResult};
