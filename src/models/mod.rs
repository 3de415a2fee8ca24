//! Data models for the Zogakzip application.
//!
//! Response shapes match the frontend contract exactly: camelCase field
//! names, and secrets never serialized.

mod comment;
mod group;
mod memory;

pub use comment::*;
pub use group::*;
pub use memory::*;

use serde::{Deserialize, Serialize};

/// Acknowledgment body for mutations that do not return the entity.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
