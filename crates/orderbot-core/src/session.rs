//! Session store keyed by user identifier.
//!
//! Sessions are created lazily on first contact and live for the process
//! lifetime. Each session sits behind its own mutex: a turn locks its
//! user's session for the whole request, giving at-most-one-turn-in-flight
//! per user while turns for distinct users proceed independently.

use orderbot_types::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Owns every user's conversational state.
#[derive(Default)]
pub struct SessionStore {
	/// User identifier to session handle.
	sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
	/// Creates an empty session store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the session handle for a user, creating it on first contact.
	pub async fn session(&self, user_id: &str) -> Arc<Mutex<Session>> {
		if let Some(session) = self.sessions.read().await.get(user_id) {
			return Arc::clone(session);
		}

		let mut sessions = self.sessions.write().await;
		let session = sessions
			.entry(user_id.to_string())
			.or_insert_with(|| Arc::new(Mutex::new(Session::new())));
		Arc::clone(session)
	}

	/// Returns a copy of a user's current session, if one exists.
	pub async fn snapshot(&self, user_id: &str) -> Option<Session> {
		let handle = {
			let sessions = self.sessions.read().await;
			sessions.get(user_id).cloned()
		};
		match handle {
			Some(session) => Some(session.lock().await.clone()),
			None => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use orderbot_types::DialogueState;

	#[tokio::test]
	async fn creates_sessions_lazily() {
		let store = SessionStore::new();
		assert!(store.snapshot("alice").await.is_none());

		let handle = store.session("alice").await;
		handle.lock().await.state = DialogueState::TakingOrder;

		let snapshot = store.snapshot("alice").await.unwrap();
		assert_eq!(snapshot.state, DialogueState::TakingOrder);
	}

	#[tokio::test]
	async fn users_do_not_share_sessions() {
		let store = SessionStore::new();

		store
			.session("alice")
			.await
			.lock()
			.await
			.items
			.insert("fries".to_string(), 2);

		let bob = store.session("bob").await;
		assert!(bob.lock().await.items.is_empty());
	}

	#[tokio::test]
	async fn same_user_gets_same_session() {
		let store = SessionStore::new();

		store
			.session("alice")
			.await
			.lock()
			.await
			.items
			.insert("cola".to_string(), 1);

		let again = store.session("alice").await;
		assert_eq!(again.lock().await.items.get("cola"), Some(&1));
	}
}
