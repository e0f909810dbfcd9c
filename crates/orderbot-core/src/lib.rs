//! Dialogue engine for the ordering assistant.
//!
//! This module owns the conversation state machine: it classifies each
//! incoming turn, applies the matching transition to the user's session,
//! mutates the in-progress order, triggers persistence at checkout, and
//! produces the outbound response. Every error is recovered at the turn
//! boundary; a bad turn never crashes the process or touches another
//! user's session.

use orderbot_storage::{OrderLog, PersistError};
use orderbot_types::{
	format_usd, ChatRequest, ChatResponse, DialogueState, FinalizedOrder, OrderLine, OrderPayload,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod catalog;
pub mod intent;
pub mod session;

pub use catalog::MenuCatalog;
pub use intent::{classify, extract_items, Intent};
pub use session::SessionStore;

/// Errors that can occur while resolving an order against the catalog.
#[derive(Debug, Error)]
pub enum EngineError {
	/// An order referenced an item name absent from the catalog.
	#[error("Unknown menu item: {0}")]
	UnknownItem(String),
}

/// The conversation state machine.
///
/// One engine instance serves all users; per-user state lives in the
/// session store and each turn runs under that user's session lock.
pub struct DialogueEngine {
	/// Read-only menu catalog.
	catalog: MenuCatalog,
	/// Tax applied at confirmation, as a fraction of the subtotal.
	tax_rate: Decimal,
	/// Per-user conversational state.
	sessions: SessionStore,
	/// Durable log finalized orders are appended to.
	log: OrderLog,
}

impl DialogueEngine {
	/// Creates an engine over a catalog, tax rate, and order log.
	pub fn new(catalog: MenuCatalog, tax_rate: Decimal, log: OrderLog) -> Self {
		Self {
			catalog,
			tax_rate,
			sessions: SessionStore::new(),
			log,
		}
	}

	/// Returns the session store, mainly for inspection in tests.
	pub fn sessions(&self) -> &SessionStore {
		&self.sessions
	}

	/// Returns the order log.
	pub fn order_log(&self) -> &OrderLog {
		&self.log
	}

	/// Processes one conversational turn for a user.
	///
	/// Holds the user's session lock for the whole turn, so at most one
	/// turn per user is ever in flight.
	pub async fn handle_turn(&self, user_id: &str, request: &ChatRequest) -> ChatResponse {
		let normalized = request
			.message
			.as_deref()
			.map(|text| text.trim().to_lowercase());

		if normalized.is_none() && request.order.is_none() {
			tracing::warn!(user_id = %user_id, "Malformed turn: neither message nor order");
		}

		let handle = self.sessions.session(user_id).await;
		let mut session = handle.lock().await;

		let intent = classify(
			normalized.as_deref(),
			request.order.as_ref(),
			session.state,
			&self.catalog,
		);
		tracing::debug!(
			user_id = %user_id,
			state = %session.state,
			intent = ?intent,
			"Classified turn"
		);

		match intent {
			Intent::Greeting => {
				session.state = DialogueState::Greeting;
				let example = self
					.catalog
					.items()
					.first()
					.map(|item| item.name.as_str())
					.unwrap_or("something");
				reply(
					format!(
						"Hello! Welcome to the ordering assistant. You can ask for the menu, \
						 place an order, or say 'checkout'. For example, try saying 'menu' or \
						 'I want to order {}'.",
						example
					),
					session.state,
				)
			}
			Intent::MenuRequest => {
				session.state = DialogueState::ShowMenu;
				ChatResponse {
					message: None,
					menu: Some(self.catalog.price_table()),
					state: Some(session.state),
				}
			}
			Intent::OrderRequest => {
				session.state = DialogueState::TakingOrder;
				let examples: Vec<&str> = self
					.catalog
					.items()
					.iter()
					.take(2)
					.map(|item| item.name.as_str())
					.collect();
				reply(
					format!(
						"What would you like to order? Please mention item names. For example, \
						 you can say '{}'.",
						examples.join(" and ")
					),
					session.state,
				)
			}
			Intent::CheckoutRequest => {
				session.state = DialogueState::WaitingForAddress;
				reply(
					format!(
						"Your order summary: {}. Now, please provide your address. For example, \
						 say '123 Main St'.",
						summarize(&session.items)
					),
					session.state,
				)
			}
			Intent::OrderConfirmation(payload) => match self.resolve_payload(&payload) {
				Ok((quantities, lines)) => {
					let (subtotal, tax, grand_total) = self.totals(&lines);
					session.items = quantities;
					session.state = DialogueState::WaitingForAddress;
					reply(
						format!(
							"Order confirmed: {}.\nSubtotal: {}\nTax ({}%): {}\nGrand Total: {}\n\
							 Thank you! Now, please provide your delivery address.",
							summarize(&session.items),
							format_usd(subtotal),
							(self.tax_rate * Decimal::ONE_HUNDRED).normalize(),
							format_usd(tax),
							format_usd(grand_total)
						),
						session.state,
					)
				}
				Err(EngineError::UnknownItem(name)) => {
					tracing::warn!(user_id = %user_id, item = %name, "Confirmation referenced unknown item");
					reply(
						format!(
							"Sorry, '{}' is not on the menu. Please confirm your order with menu \
							 items only; ask for the menu to see what is available.",
							name
						),
						session.state,
					)
				}
			},
			Intent::AddressCapture => {
				// The address keeps its original casing; only matching is
				// done on the normalized text.
				let address = request
					.message
					.as_deref()
					.unwrap_or_default()
					.trim()
					.to_string();

				match self.resolve_lines(&session.items) {
					Ok(lines) => {
						let order = FinalizedOrder {
							items: lines,
							address: address.clone(),
						};
						match self.log.append(order).await {
							Ok(()) => {
								tracing::info!(user_id = %user_id, address = %address, "Order finalized");
							}
							Err(PersistError::Rejected(reason)) => {
								tracing::warn!(user_id = %user_id, %reason, "Skipping persistence of invalid order");
							}
							Err(PersistError::Storage(e)) => {
								tracing::error!(user_id = %user_id, error = %e, "Failed to persist order");
							}
						}
						session.reset();
						reply(
							format!("Thanks! Your order will be delivered to: {}.", address),
							session.state,
						)
					}
					Err(EngineError::UnknownItem(name)) => {
						tracing::warn!(user_id = %user_id, item = %name, "Session held unknown item at checkout");
						reply(
							format!(
								"Sorry, '{}' is not on the menu and cannot be ordered. Ask for \
								 the menu to see what is available.",
								name
							),
							session.state,
						)
					}
				}
			}
			Intent::ItemExtraction(found) => {
				for (name, quantity) in found {
					let entry = session.items.entry(name).or_insert(0);
					*entry = entry.saturating_add(quantity);
				}
				session.state = DialogueState::TakingOrder;
				reply(
					format!(
						"You've ordered: {}. What else would you like to add, or would you like \
						 to proceed to checkout?",
						summarize(&session.items)
					),
					session.state,
				)
			}
			Intent::Fallback => {
				session.state = DialogueState::Default;
				reply(
					"I didn't quite understand. You can ask for the menu, tell me your order, \
					 or say 'checkout'.",
					session.state,
				)
			}
		}
	}

	/// Resolves a confirmation payload into accumulated quantities and
	/// priced line items.
	///
	/// Duplicate names in the payload accumulate. Fails on the first name
	/// absent from the catalog without mutating anything.
	fn resolve_payload(
		&self,
		payload: &OrderPayload,
	) -> Result<(BTreeMap<String, u32>, Vec<OrderLine>), EngineError> {
		let mut quantities: BTreeMap<String, u32> = BTreeMap::new();
		for item in &payload.items {
			if self.catalog.price(&item.name).is_none() {
				return Err(EngineError::UnknownItem(item.name.clone()));
			}
			let entry = quantities.entry(item.name.clone()).or_insert(0);
			*entry = entry.saturating_add(item.quantity);
		}
		let lines = self.resolve_lines(&quantities)?;
		Ok((quantities, lines))
	}

	/// Resolves accumulated quantities into priced line items.
	fn resolve_lines(
		&self,
		items: &BTreeMap<String, u32>,
	) -> Result<Vec<OrderLine>, EngineError> {
		items
			.iter()
			.map(|(name, &quantity)| {
				let price = self
					.catalog
					.price(name)
					.ok_or_else(|| EngineError::UnknownItem(name.clone()))?;
				Ok(OrderLine {
					name: name.clone(),
					price,
					quantity,
				})
			})
			.collect()
	}

	/// Computes `(subtotal, tax, grand_total)` for a set of line items.
	fn totals(&self, lines: &[OrderLine]) -> (Decimal, Decimal, Decimal) {
		let subtotal: Decimal = lines
			.iter()
			.map(|line| line.price * Decimal::from(line.quantity))
			.sum();
		let tax = subtotal * self.tax_rate;
		(subtotal, tax, subtotal + tax)
	}
}

/// Builds a text-only response carrying the resulting state.
fn reply(message: impl Into<String>, state: DialogueState) -> ChatResponse {
	ChatResponse {
		message: Some(message.into()),
		menu: None,
		state: Some(state),
	}
}

/// Renders an in-progress order as `name x quantity` pairs.
fn summarize(items: &BTreeMap<String, u32>) -> String {
	if items.is_empty() {
		return "nothing yet".to_string();
	}
	items
		.iter()
		.map(|(name, quantity)| format!("{} x{}", name, quantity))
		.collect::<Vec<_>>()
		.join(", ")
}
