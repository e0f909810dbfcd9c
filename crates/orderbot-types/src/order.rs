//! Finalized order types eligible for persistence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a finalized order with its resolved unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
	/// Menu item name.
	pub name: String,
	/// Unit price resolved from the catalog at finalization time.
	pub price: Decimal,
	/// Ordered quantity.
	pub quantity: u32,
}

/// An order with resolved prices and a delivery address.
///
/// This is the record appended to the durable order log. Every name is
/// guaranteed by construction to come from the menu catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedOrder {
	/// Ordered line items, name-ordered.
	pub items: Vec<OrderLine>,
	/// Delivery address captured from the user.
	pub address: String,
}

impl FinalizedOrder {
	/// Sum of `price * quantity` over all line items.
	pub fn subtotal(&self) -> Decimal {
		self.items
			.iter()
			.map(|line| line.price * Decimal::from(line.quantity))
			.sum()
	}
}
