//! Validated append-only log of finalized orders.
//!
//! The log is stored as one JSON collection under a fixed key and rewritten
//! in full on every append. Appends from concurrent turns are serialized
//! through an internal mutex so no record is lost to a read-modify-write
//! race.

use crate::{StorageError, StorageService};
use orderbot_types::FinalizedOrder;
use thiserror::Error;
use tokio::sync::Mutex;

/// Storage namespace holding the order log.
const ORDERS_NAMESPACE: &str = "orders";
/// Id of the single log record within the namespace.
const LOG_ID: &str = "log";

/// Errors that can occur when persisting a finalized order.
#[derive(Debug, Error)]
pub enum PersistError {
	/// The order failed validation and was not persisted.
	#[error("Order rejected: {0}")]
	Rejected(String),
	/// The storage backend failed while writing the log.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Durable append-only collection of finalized orders.
pub struct OrderLog {
	/// Typed storage the log is written through.
	storage: StorageService,
	/// Serializes the load-append-rewrite cycle across concurrent appends.
	write_lock: Mutex<()>,
}

impl OrderLog {
	/// Creates an order log on top of the given storage service.
	pub fn new(storage: StorageService) -> Self {
		Self {
			storage,
			write_lock: Mutex::new(()),
		}
	}

	/// Loads the current log contents.
	///
	/// An absent or empty store is an empty log. An unreadable or
	/// unparsable store also degrades to an empty log, with a warning for
	/// operators: the next append will overwrite whatever history the
	/// corrupt store held.
	pub async fn load(&self) -> Vec<FinalizedOrder> {
		let bytes = match self
			.storage
			.retrieve_bytes(ORDERS_NAMESPACE, LOG_ID)
			.await
		{
			Ok(bytes) => bytes,
			Err(StorageError::NotFound) => return Vec::new(),
			Err(e) => {
				tracing::warn!("Order log unreadable, treating as empty: {}", e);
				return Vec::new();
			}
		};

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Vec::new();
		}

		match serde_json::from_slice(&bytes) {
			Ok(orders) => orders,
			Err(e) => {
				tracing::warn!(
					"Order log corrupt, treating as empty (prior history will be lost on next append): {}",
					e
				);
				Vec::new()
			}
		}
	}

	/// Validates and appends a finalized order to the log.
	///
	/// Orders with no items or an empty address are rejected and the stored
	/// log is left untouched.
	pub async fn append(&self, order: FinalizedOrder) -> Result<(), PersistError> {
		if order.items.is_empty() {
			return Err(PersistError::Rejected("order has no items".into()));
		}
		if order.address.trim().is_empty() {
			return Err(PersistError::Rejected("order has no address".into()));
		}

		let _guard = self.write_lock.lock().await;

		let mut orders = self.load().await;
		orders.push(order);
		self.storage
			.store(ORDERS_NAMESPACE, LOG_ID, &orders)
			.await?;

		tracing::info!(total = orders.len(), "Order persisted");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::memory::MemoryStorage;
	use orderbot_types::OrderLine;
	use rust_decimal::Decimal;

	fn memory_log() -> OrderLog {
		OrderLog::new(StorageService::new(Box::new(MemoryStorage::new())))
	}

	fn cola_order(address: &str) -> FinalizedOrder {
		FinalizedOrder {
			items: vec![OrderLine {
				name: "cola".to_string(),
				price: Decimal::new(149, 2),
				quantity: 2,
			}],
			address: address.to_string(),
		}
	}

	#[tokio::test]
	async fn test_append_and_load() {
		let log = memory_log();
		assert!(log.load().await.is_empty());

		log.append(cola_order("221B Baker Street")).await.unwrap();
		log.append(cola_order("742 Evergreen Terrace")).await.unwrap();

		let orders = log.load().await;
		assert_eq!(orders.len(), 2);
		assert_eq!(orders[0].address, "221B Baker Street");
		assert_eq!(orders[0].subtotal(), Decimal::new(298, 2));
		assert_eq!(orders[1].address, "742 Evergreen Terrace");
	}

	#[tokio::test]
	async fn test_rejects_empty_items() {
		let log = memory_log();
		log.append(cola_order("somewhere")).await.unwrap();

		let result = log
			.append(FinalizedOrder {
				items: vec![],
				address: "somewhere".to_string(),
			})
			.await;

		assert!(matches!(result, Err(PersistError::Rejected(_))));
		// Log length unchanged after a rejected persist
		assert_eq!(log.load().await.len(), 1);
	}

	#[tokio::test]
	async fn test_rejects_blank_address() {
		let log = memory_log();

		let result = log.append(cola_order("   ")).await;
		assert!(matches!(result, Err(PersistError::Rejected(_))));
		assert!(log.load().await.is_empty());
	}

	#[tokio::test]
	async fn test_corrupt_log_degrades_to_empty() {
		let storage = StorageService::new(Box::new(MemoryStorage::new()));
		storage
			.store(ORDERS_NAMESPACE, LOG_ID, &"not an order list")
			.await
			.unwrap();

		let log = OrderLog::new(storage);
		assert!(log.load().await.is_empty());

		// Appending still works after the degrade
		log.append(cola_order("221B Baker Street")).await.unwrap();
		assert_eq!(log.load().await.len(), 1);
	}

	#[tokio::test]
	async fn test_empty_store_is_empty_log() {
		let backend = MemoryStorage::new();
		use crate::StorageInterface;
		backend.set_bytes("orders:log", b"  \n".to_vec()).await.unwrap();

		let log = OrderLog::new(StorageService::new(Box::new(backend)));
		assert!(log.load().await.is_empty());
	}

	#[tokio::test]
	async fn test_survives_reopen_on_file_backend() {
		use crate::implementations::file::FileStorage;

		let dir = tempfile::tempdir().unwrap();

		let log = OrderLog::new(StorageService::new(Box::new(FileStorage::new(
			dir.path().to_path_buf(),
		))));
		log.append(cola_order("221B Baker Street")).await.unwrap();
		drop(log);

		let reopened = OrderLog::new(StorageService::new(Box::new(FileStorage::new(
			dir.path().to_path_buf(),
		))));
		let orders = reopened.load().await;
		assert_eq!(orders.len(), 1);
		assert_eq!(orders[0].items[0].name, "cola");
	}
}
