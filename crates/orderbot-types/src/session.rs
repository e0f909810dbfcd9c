//! Per-user conversation session types.
//!
//! A session holds everything the dialogue engine remembers about one user:
//! the current dialogue state and the in-progress order. Sessions live for
//! the process lifetime only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of dialogue states a session can be in.
///
/// Exactly one state is active per session at any time. Using a closed
/// enumeration lets the transition table be checked exhaustively at
/// compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
	/// Initial state; also the state after a fallback or a completed order.
	#[default]
	Default,
	/// The user has greeted the assistant.
	Greeting,
	/// The menu was just shown.
	ShowMenu,
	/// The user is adding items to the order.
	TakingOrder,
	/// An order summary was presented; the next message is the address.
	WaitingForAddress,
	/// The order was persisted this turn.
	Done,
}

impl fmt::Display for DialogueState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DialogueState::Default => write!(f, "default"),
			DialogueState::Greeting => write!(f, "greeting"),
			DialogueState::ShowMenu => write!(f, "show_menu"),
			DialogueState::TakingOrder => write!(f, "taking_order"),
			DialogueState::WaitingForAddress => write!(f, "waiting_for_address"),
			DialogueState::Done => write!(f, "done"),
		}
	}
}

/// One user's conversational state and in-progress order.
///
/// `items` maps item name to accumulated quantity. A `BTreeMap` keeps
/// summaries and finalized line items deterministically name-ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
	/// Current dialogue state.
	pub state: DialogueState,
	/// In-progress order, item name to quantity.
	pub items: BTreeMap<String, u32>,
}

impl Session {
	/// Creates a fresh session in the initial state with no items.
	pub fn new() -> Self {
		Self::default()
	}

	/// Resets the session to its initial value after an order is finalized.
	pub fn reset(&mut self) {
		self.state = DialogueState::Default;
		self.items.clear();
	}
}
