//! Read-only menu catalog.

use orderbot_types::MenuItem;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// The fixed set of orderable items and their prices.
///
/// Built once from configuration and read-only afterwards. Lookup is by
/// exact item name.
pub struct MenuCatalog {
	/// Items in configured display order.
	items: Vec<MenuItem>,
	/// Name to unit price index.
	prices: HashMap<String, Decimal>,
}

impl MenuCatalog {
	/// Builds a catalog from a list of menu items.
	pub fn new(items: Vec<MenuItem>) -> Self {
		let prices = items
			.iter()
			.map(|item| (item.name.clone(), item.price))
			.collect();
		Self { items, prices }
	}

	/// Looks up the unit price for an item name.
	pub fn price(&self, name: &str) -> Option<Decimal> {
		self.prices.get(name).copied()
	}

	/// Returns all items in configured order.
	pub fn items(&self) -> &[MenuItem] {
		&self.items
	}

	/// Returns the full menu as a name to price table for responses.
	pub fn price_table(&self) -> BTreeMap<String, Decimal> {
		self.items
			.iter()
			.map(|item| (item.name.clone(), item.price))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_and_table() {
		let catalog = MenuCatalog::new(vec![
			MenuItem::new("fries", Decimal::new(299, 2)),
			MenuItem::new("cola", Decimal::new(149, 2)),
		]);

		assert_eq!(catalog.price("cola"), Some(Decimal::new(149, 2)));
		assert_eq!(catalog.price("sushi"), None);
		assert_eq!(catalog.items().len(), 2);
		assert_eq!(catalog.price_table().len(), 2);
	}
}
