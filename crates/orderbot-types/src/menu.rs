//! Menu catalog item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single orderable item on the menu.
///
/// Items are loaded once at startup and immutable at runtime. The name is
/// the unique key users reference in free text and in confirmation payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
	/// Unique item name, matched verbatim against user text.
	pub name: String,
	/// Unit price. Never negative.
	pub price: Decimal,
}

impl MenuItem {
	/// Creates a menu item from a name and price.
	pub fn new(name: impl Into<String>, price: Decimal) -> Self {
		Self {
			name: name.into(),
			price,
		}
	}
}
