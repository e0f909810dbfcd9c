//! Common types module for the ordering assistant.
//!
//! This module defines the core data types shared across the dialogue
//! engine, storage, and HTTP layers. It provides a centralized location
//! for shared types to ensure consistency across all components.

/// Request and response types for the chat endpoint.
pub mod chat;
/// Menu catalog item types.
pub mod menu;
/// Monetary formatting helpers.
pub mod money;
/// Finalized order types eligible for persistence.
pub mod order;
/// Per-user conversation session types.
pub mod session;

// Re-export all types for convenient access
pub use chat::*;
pub use menu::*;
pub use money::format_usd;
pub use order::*;
pub use session::*;
