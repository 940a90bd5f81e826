//! Board use-case services.
//!
//! # Responsibility
//! - Pair in-memory board operations with durable snapshot storage.
//! - Keep UI layers decoupled from storage details.

pub mod board_service;
