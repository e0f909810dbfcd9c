//! Request and response types for the chat endpoint.
//!
//! One turn is one `ChatRequest` in and one `ChatResponse` out. The user
//! identifier travels out-of-band in the `user-id` header and falls back to
//! a fixed sentinel when absent.

use crate::session::DialogueState;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the request header carrying the user identifier.
pub const USER_ID_HEADER: &str = "user-id";

/// Sentinel user identifier used when the header is missing.
pub const DEFAULT_USER_ID: &str = "default-user";

/// A single item reference inside a structured order confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRequest {
	/// Menu item name; must exist in the catalog.
	pub name: String,
	/// Requested quantity.
	pub quantity: u32,
}

/// Structured order payload submitted by the client at confirmation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
	/// Items being confirmed.
	pub items: Vec<OrderItemRequest>,
}

/// One conversational turn from the client.
///
/// A turn carries either a free-text `message`, a structured `order`
/// confirmation, or (malformed) neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
	/// Free-text user utterance.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Structured order confirmation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub order: Option<OrderPayload>,
}

impl ChatRequest {
	/// Builds a free-text turn.
	pub fn message(text: impl Into<String>) -> Self {
		Self {
			message: Some(text.into()),
			order: None,
		}
	}

	/// Builds a structured order confirmation turn.
	pub fn order(items: Vec<OrderItemRequest>) -> Self {
		Self {
			message: None,
			order: Some(OrderPayload { items }),
		}
	}
}

/// The engine's reply for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
	/// Human-readable reply text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Full menu, name to unit price, when the menu was requested.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub menu: Option<BTreeMap<String, Decimal>>,
	/// Dialogue state after this turn.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<DialogueState>,
}
