//! Intent classification for one conversational turn.
//!
//! The classifier maps a turn (normalized text, optional structured order
//! payload) plus the session's current state to a single intent. Rules are
//! evaluated in a strict priority order and the first match wins; the
//! ordering is observable behavior ("menu" anywhere in a sentence always
//! beats item scanning) and must not be rearranged.

use crate::catalog::MenuCatalog;
use orderbot_types::{DialogueState, OrderPayload};
use std::collections::BTreeMap;

/// The recognized intent of one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
	/// The whole message is a greeting word.
	Greeting,
	/// The message mentions the menu.
	MenuRequest,
	/// The message mentions ordering.
	OrderRequest,
	/// The message mentions checkout.
	CheckoutRequest,
	/// The turn carries a structured order payload instead of free text.
	OrderConfirmation(OrderPayload),
	/// The session is waiting for an address; the message is the address.
	AddressCapture,
	/// Menu items were recognized in the text, name to quantity.
	ItemExtraction(BTreeMap<String, u32>),
	/// Nothing matched.
	Fallback,
}

/// Classifies one turn against the current session state.
///
/// `message` must already be trimmed and lower-cased.
pub fn classify(
	message: Option<&str>,
	order: Option<&OrderPayload>,
	state: DialogueState,
	catalog: &MenuCatalog,
) -> Intent {
	if let Some(text) = message {
		if matches!(text, "hello" | "hi" | "hey") {
			return Intent::Greeting;
		}
		if text.contains("menu") {
			return Intent::MenuRequest;
		}
		if text.contains("order") {
			return Intent::OrderRequest;
		}
		if text.contains("checkout") {
			return Intent::CheckoutRequest;
		}
	}

	if let Some(payload) = order {
		return Intent::OrderConfirmation(payload.clone());
	}

	if state == DialogueState::WaitingForAddress && message.is_some() {
		return Intent::AddressCapture;
	}

	if let Some(text) = message {
		let found = extract_items(text, catalog);
		if !found.is_empty() {
			return Intent::ItemExtraction(found);
		}
	}

	Intent::Fallback
}

/// Scans free text for `(optional quantity)(item name)` occurrences.
///
/// The scanner walks the text left to right. At each position it tries to
/// match an optional integer, optional whitespace, then the longest catalog
/// item name; an item with no leading integer gets quantity 1, and repeated
/// occurrences of the same item accumulate. When a position does not start
/// a match the scanner advances one character, so a quantity separated from
/// its item by other words ("2 x fries") still yields the bare item at
/// quantity 1.
pub fn extract_items(text: &str, catalog: &MenuCatalog) -> BTreeMap<String, u32> {
	// Longest name first so overlapping names resolve deterministically
	let mut names: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
	names.sort_by_key(|name| std::cmp::Reverse(name.len()));

	let mut found: BTreeMap<String, u32> = BTreeMap::new();
	let mut i = 0;

	while i < text.len() {
		let rest = &text[i..];

		// Optional leading quantity
		let digit_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
		let (quantity, after_digits) = if digit_len > 0 {
			match rest[..digit_len].parse::<u32>() {
				Ok(n) => (Some(n), &rest[digit_len..]),
				Err(_) => {
					// Digit run too large to be a quantity; skip it whole
					i += digit_len;
					continue;
				}
			}
		} else {
			(None, rest)
		};

		let ws_len = after_digits
			.bytes()
			.take_while(|b| b.is_ascii_whitespace())
			.count();
		let candidate = &after_digits[ws_len..];

		if let Some(name) = names.iter().find(|name| candidate.starts_with(*name)) {
			let quantity = quantity.unwrap_or(1);
			let entry = found.entry(name.to_string()).or_insert(0);
			*entry = entry.saturating_add(quantity);
			i += digit_len + ws_len + name.len();
		} else {
			i += rest.chars().next().map(char::len_utf8).unwrap_or(1);
		}
	}

	found
}

#[cfg(test)]
mod tests {
	use super::*;
	use orderbot_types::{MenuItem, OrderItemRequest};
	use rust_decimal::Decimal;

	fn catalog() -> MenuCatalog {
		MenuCatalog::new(vec![
			MenuItem::new("chicken bucket", Decimal::new(1099, 2)),
			MenuItem::new("fries", Decimal::new(299, 2)),
			MenuItem::new("cola", Decimal::new(149, 2)),
		])
	}

	fn classify_text(text: &str, state: DialogueState) -> Intent {
		classify(Some(text), None, state, &catalog())
	}

	#[test]
	fn greeting_requires_exact_match() {
		assert_eq!(
			classify_text("hello", DialogueState::Default),
			Intent::Greeting
		);
		assert_eq!(classify_text("hi", DialogueState::Default), Intent::Greeting);
		// "hello there" is not an exact greeting
		assert_eq!(
			classify_text("hello there", DialogueState::Default),
			Intent::Fallback
		);
	}

	#[test]
	fn menu_substring_beats_item_scan() {
		assert_eq!(
			classify_text("show me the menu with fries", DialogueState::Default),
			Intent::MenuRequest
		);
	}

	#[test]
	fn order_substring_beats_item_scan() {
		assert_eq!(
			classify_text("i want to order fries", DialogueState::Default),
			Intent::OrderRequest
		);
	}

	#[test]
	fn checkout_fires_from_any_state() {
		assert_eq!(
			classify_text("checkout please", DialogueState::TakingOrder),
			Intent::CheckoutRequest
		);
	}

	#[test]
	fn payload_beats_address_capture() {
		let payload = OrderPayload {
			items: vec![OrderItemRequest {
				name: "cola".to_string(),
				quantity: 1,
			}],
		};
		let intent = classify(
			None,
			Some(&payload),
			DialogueState::WaitingForAddress,
			&catalog(),
		);
		assert_eq!(intent, Intent::OrderConfirmation(payload));
	}

	#[test]
	fn address_capture_only_when_waiting() {
		assert_eq!(
			classify_text("221b baker street", DialogueState::WaitingForAddress),
			Intent::AddressCapture
		);
		assert_eq!(
			classify_text("221b baker street", DialogueState::Default),
			Intent::Fallback
		);
	}

	#[test]
	fn missing_message_and_order_is_fallback() {
		assert_eq!(
			classify(None, None, DialogueState::Default, &catalog()),
			Intent::Fallback
		);
	}

	#[test]
	fn extracts_default_quantity_one() {
		let found = extract_items("fries please", &catalog());
		assert_eq!(found.get("fries"), Some(&1));
	}

	#[test]
	fn extracts_explicit_quantities() {
		let found = extract_items("2 fries and 3cola", &catalog());
		assert_eq!(found.get("fries"), Some(&2));
		assert_eq!(found.get("cola"), Some(&3));
	}

	#[test]
	fn repeated_item_accumulates_within_turn() {
		let found = extract_items("cola and 2 cola", &catalog());
		assert_eq!(found.get("cola"), Some(&3));
	}

	#[test]
	fn detached_quantity_falls_back_to_one() {
		// "2 x fries": the quantity fails to attach through the "x", the
		// bare item name still matches later
		let found = extract_items("2 x fries", &catalog());
		assert_eq!(found.get("fries"), Some(&1));
	}

	#[test]
	fn multi_word_name_matches() {
		let found = extract_items("1 chicken bucket and fries", &catalog());
		assert_eq!(found.get("chicken bucket"), Some(&1));
		assert_eq!(found.get("fries"), Some(&1));
	}

	#[test]
	fn unknown_text_yields_nothing() {
		assert!(extract_items("a large pizza", &catalog()).is_empty());
	}
}
