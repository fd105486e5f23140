use crate::{api::Request, config::Config};
use std::{cell::RefCell, collections::HashMap};

/// Raw string key/value persistence behind the session.
pub trait Storage {
	fn get(&self, key: &str) -> Option<String>;
	fn set(&self, key: &str, value: &str);
	fn delete(&self, key: &str);
}

impl<S: Storage> Storage for std::rc::Rc<S> {
	fn get(&self, key: &str) -> Option<String> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) {
		(**self).set(key, value)
	}

	fn delete(&self, key: &str) {
		(**self).delete(key)
	}
}

/// Browser `localStorage`. Values are stored unencoded so other scripts on the page can read them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;
impl Storage for LocalStore {
	fn get(&self, key: &str) -> Option<String> {
		use gloo_storage::Storage as _;
		gloo_storage::LocalStorage::raw().get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		use gloo_storage::Storage as _;
		if gloo_storage::LocalStorage::raw().set_item(key, value).is_err() {
			log::error!(target: "session", "failed to persist {key:?}");
		}
	}

	fn delete(&self, key: &str) {
		use gloo_storage::Storage as _;
		gloo_storage::LocalStorage::delete(key);
	}
}

#[derive(Debug, Default)]
pub struct MemoryStore(RefCell<HashMap<String, String>>);
impl Storage for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.0.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
	}

	fn delete(&self, key: &str) {
		self.0.borrow_mut().remove(key);
	}
}

/// The signed-in identity, read through to storage on every access so that
/// changes made by other tabs are always observed.
#[derive(Debug)]
pub struct Session<S> {
	storage: S,
	token_key: &'static str,
	username_key: &'static str,
}

impl<S: Storage> Session<S> {
	pub fn new(storage: S, config: &Config) -> Self {
		Self {
			storage,
			token_key: config.token_key,
			username_key: config.username_key,
		}
	}

	pub fn token(&self) -> Option<String> {
		self.storage.get(self.token_key).filter(|token| !token.is_empty())
	}

	/// Only reported while a token is held.
	pub fn username(&self) -> Option<String> {
		self.token()?;
		self.storage.get(self.username_key)
	}

	pub fn is_authenticated(&self) -> bool {
		self.token().is_some()
	}

	pub fn set(&self, token: &str, username: &str) {
		self.storage.set(self.token_key, token);
		self.storage.set(self.username_key, username);
	}

	pub fn clear(&self) {
		self.storage.delete(self.token_key);
		self.storage.delete(self.username_key);
	}

	/// Adds the bearer header when a token is held; anonymous requests are still sent.
	pub fn authorize(&self, request: &mut Request) {
		if let Some(token) = self.token() {
			request.bearer = Some(token);
		}
	}

	pub fn storage(&self) -> &S {
		&self.storage
	}
}
