use crate::{
	api::{self, Api, Request, Transport},
	auth::{report, unauthorized},
	data::{ListItem, NewItem},
	error::Error,
	session::{Session, Storage},
	validate,
	view::{Level, View},
};
use futures::future::{AbortHandle, Abortable};
use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
	/// No session; the rendered list was cleared instead.
	Skipped,
	/// A newer fetch took over before this one got its answer.
	Superseded,
	Rendered(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
	Deleted,
	/// The server had no such item, which is what we wanted anyway.
	AlreadyAbsent,
}

/// Keeps the rendered list in step with the server copy.
pub struct ListSync<S, T> {
	session: Rc<Session<S>>,
	api: Rc<Api<T>>,
	generation: Cell<u64>,
	in_flight: RefCell<Option<(u64, AbortHandle)>>,
}

impl<S: Storage, T: Transport> ListSync<S, T> {
	pub fn new(session: Rc<Session<S>>, api: Rc<Api<T>>) -> Self {
		Self {
			session,
			api,
			generation: Cell::new(0),
			in_flight: RefCell::new(None),
		}
	}

	/// Drops the answer of any fetch still waiting on the server.
	pub fn cancel(&self) {
		if let Some((_, handle)) = self.in_flight.borrow_mut().take() {
			handle.abort();
		}
	}

	pub async fn fetch_list<V: View>(&self, view: &V) -> Result<FetchOutcome, Error> {
		if !self.session.is_authenticated() {
			view.update(|model| model.clear_list());
			return Ok(FetchOutcome::Skipped);
		}

		let generation = self.generation.get().wrapping_add(1);
		self.generation.set(generation);
		let (handle, registration) = AbortHandle::new_pair();
		if let Some((_, previous)) = self.in_flight.replace(Some((generation, handle))) {
			previous.abort();
		}

		let mut request = Request::get(api::LIST);
		self.session.authorize(&mut request);
		let sent = request.bearer.clone();
		let result = Abortable::new(self.api.send(request), registration).await;

		{
			let mut in_flight = self.in_flight.borrow_mut();
			if matches!(*in_flight, Some((current, _)) if current == generation) {
				*in_flight = None;
			}
		}

		let Ok(result) = result else {
			log::debug!(target: "list", "fetch {generation} superseded");
			return Ok(FetchOutcome::Superseded);
		};
		let reply = match result {
			Ok(reply) => reply,
			Err(err) => {
				report(view, Level::Danger, &err);
				return Err(err);
			}
		};
		match reply.status {
			200 => {
				let items = match reply.json::<Vec<serde_json::Value>>() {
					Ok(rows) => ListItem::from_rows(rows),
					Err(err) => {
						log::error!(target: "list", "{err}");
						notify(view, Level::Danger, "Error loading your shopping list");
						return Err(err.into());
					}
				};
				// Signed out (or in as someone else) while the request was out.
				if self.session.token() != sent {
					if !self.session.is_authenticated() {
						view.update(|model| model.clear_list());
					}
					return Ok(FetchOutcome::Skipped);
				}
				let count = items.len();
				log::debug!(target: "list", "rendering {count} items");
				view.update(move |model| model.show_list(items));
				Ok(FetchOutcome::Rendered(count))
			}
			401 => Err(unauthorized(&self.session, view, sent.as_deref())),
			status => {
				notify(view, Level::Danger, "Error loading your shopping list");
				Err(Error::Server {
					status,
					message: reply.detail().unwrap_or_default(),
				})
			}
		}
	}

	pub async fn add_item<V: View>(
		&self,
		view: &V,
		name: &str,
		kind: &str,
		quantity: &str,
		price: &str,
	) -> Result<NewItem, Error> {
		let item = match validate::new_item(name, kind, quantity, price) {
			Ok(item) => item,
			Err(err) => {
				let err = Error::from(err);
				report(view, Level::Danger, &err);
				return Err(err);
			}
		};
		self.require_session(view, "Please sign in to add items to your list")?;

		let mut request = Request::post(api::LIST).with_json(&item);
		self.session.authorize(&mut request);
		let sent = request.bearer.clone();
		let reply = match self.api.send(request).await {
			Ok(reply) => reply,
			Err(err) => {
				report(view, Level::Danger, &err);
				return Err(err);
			}
		};
		match reply.status {
			401 => Err(unauthorized(&self.session, view, sent.as_deref())),
			_ if reply.is_success() => {
				log::info!(target: "list", "added {:?}", item.name);
				view.update(|model| {
					model.reset_item_form();
					model.notify(Level::Success, "Item added to your personal list!");
				});
				self.refresh(view).await;
				Ok(item)
			}
			status => {
				let message = reply.detail().unwrap_or_default();
				notify(view, Level::Danger, error_message("Error adding item", &message));
				Err(Error::Server { status, message })
			}
		}
	}

	pub async fn delete_item<V: View>(&self, view: &V, name: &str) -> Result<DeleteOutcome, Error> {
		self.require_session(view, "Please sign in to manage your list")?;

		let mut request = Request::delete(api::list_item(name));
		self.session.authorize(&mut request);
		let sent = request.bearer.clone();
		let reply = match self.api.send(request).await {
			Ok(reply) => reply,
			Err(err) => {
				report(view, Level::Danger, &err);
				return Err(err);
			}
		};
		match reply.status {
			401 => Err(unauthorized(&self.session, view, sent.as_deref())),
			404 => {
				log::debug!(target: "list", "{name:?} was already gone");
				notify(view, Level::Warning, "This item wasn't found in your personal list.");
				self.refresh(view).await;
				Ok(DeleteOutcome::AlreadyAbsent)
			}
			_ if reply.is_success() => {
				log::info!(target: "list", "deleted {name:?}");
				notify(view, Level::Success, "Item deleted from your personal list!");
				self.refresh(view).await;
				Ok(DeleteOutcome::Deleted)
			}
			status => {
				let message = reply.detail().unwrap_or_default();
				notify(view, Level::Danger, error_message("Error deleting item", &message));
				Err(Error::Server { status, message })
			}
		}
	}

	/// Follow-up fetch after a write. Its failures were already shown to the user.
	async fn refresh<V: View>(&self, view: &V) {
		if let Err(err) = self.fetch_list(view).await {
			log::debug!(target: "list", "refresh failed: {err}");
		}
	}

	fn require_session<V: View>(&self, view: &V, message: &'static str) -> Result<(), Error> {
		if self.session.is_authenticated() {
			return Ok(());
		}
		view.update(|model| {
			model.anonymize();
			model.notify(Level::Warning, message);
		});
		Err(Error::NotSignedIn)
	}
}

fn notify<V: View>(view: &V, level: Level, message: impl Into<String>) {
	let message = message.into();
	view.update(move |model| {
		model.notify(level, message);
	});
}

fn error_message(summary: &str, detail: &str) -> String {
	if detail.is_empty() {
		summary.to_owned()
	} else {
		format!("{summary}: {detail}")
	}
}
