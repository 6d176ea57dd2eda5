//! Shared utilities for the Ticket Panel backend.
//!
//! This crate provides functionality used across the other crates:
//! - Password hashing with Argon2id
//! - Session token signing and validation
//! - Bot API key generation

pub mod crypto;
pub mod password;
pub mod token;
