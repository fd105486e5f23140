use crate::{
	api::{http::HttpTransport, Api, Transport},
	auth::{SessionManager, Transition},
	config::Config,
	list::ListSync,
	session::{LocalStore, Session, Storage},
	view::View,
};
use std::rc::Rc;

pub type BrowserClient = Client<LocalStore, HttpTransport>;

/// Session manager and list synchronizer sharing one session and one api.
pub struct Client<S, T> {
	pub auth: SessionManager<S, T>,
	pub list: ListSync<S, T>,
}

impl BrowserClient {
	pub fn browser(config: &Config) -> Self {
		Self::new(LocalStore, HttpTransport::new(config.api_base.clone()), config)
	}
}

impl<S: Storage, T: Transport> Client<S, T> {
	pub fn new(storage: S, transport: T, config: &Config) -> Self {
		let session = Rc::new(Session::new(storage, config));
		let api = Rc::new(Api::new(transport));
		Self {
			auth: SessionManager::new(session.clone(), api.clone()),
			list: ListSync::new(session, api),
		}
	}

	/// Initial page state: trust whatever storage says, then load the list if signed in.
	pub async fn start<V: View>(&self, view: &V) {
		self.auth.reconcile(view);
		if self.auth.is_authenticated() {
			self.load(view).await;
		} else {
			view.update(|model| model.clear_list());
		}
	}

	/// Periodic/storage-event check. Picks up sign-ins made in other tabs.
	pub async fn reconcile<V: View>(&self, view: &V) -> Transition {
		let transition = self.auth.reconcile(view);
		match transition {
			Transition::SignedIn => self.load(view).await,
			Transition::SignedOut => self.list.cancel(),
			Transition::Unchanged => {}
		}
		transition
	}

	pub async fn sign_in<V: View>(&self, view: &V, username: &str, password: &str) -> bool {
		if self.auth.sign_in(view, username, password).await.is_err() {
			return false;
		}
		self.load(view).await;
		true
	}

	pub fn sign_out<V: View>(&self, view: &V) {
		self.list.cancel();
		self.auth.sign_out(view);
	}

	async fn load<V: View>(&self, view: &V) {
		if let Err(err) = self.list.fetch_list(view).await {
			log::debug!(target: "app", "list load failed: {err}");
			return;
		}
		if let Err(err) = self.auth.fetch_profile(view).await {
			// The profile is decoration; the username from sign-in is enough to go on.
			log::warn!(target: "app", "profile unavailable: {err}");
		}
	}
}
