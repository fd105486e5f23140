use crate::data::{format_price, sort_by_kind, total_price, ListItem, Profile};
use std::cell::RefCell;
use yewdux::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
	#[default]
	Anonymous,
	Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthForm {
	#[default]
	SignIn,
	SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
	Success,
	Info,
	Warning,
	Danger,
}
impl Level {
	pub fn alert_class(&self) -> &'static str {
		match self {
			Self::Success => "alert-success",
			Self::Info => "alert-info",
			Self::Warning => "alert-warning",
			Self::Danger => "alert-danger",
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
	pub id: u64,
	pub level: Level,
	pub message: String,
}

/// Everything the page renders. Derived from the session and server replies, never the other way around.
#[derive(Debug, Clone, PartialEq, Default, Store)]
pub struct ViewModel {
	pub auth: AuthState,
	pub username: Option<String>,
	pub profile: Option<Profile>,
	/// `None` when nothing is rendered, `Some(vec![])` renders the empty-list placeholder.
	pub items: Option<Vec<ListItem>>,
	pub notices: Vec<Notice>,
	pub form: AuthForm,
	pub sign_in_username: String,
	/// Bumped to remount the add-item form with blank inputs.
	pub item_form_epoch: u32,
	next_notice: u64,
}

impl ViewModel {
	pub fn is_authenticated(&self) -> bool {
		self.auth == AuthState::Authenticated
	}

	pub fn authenticate(&mut self, username: Option<String>) {
		if self.auth == AuthState::Anonymous {
			self.profile = None;
		}
		self.auth = AuthState::Authenticated;
		self.username = username;
	}

	pub fn anonymize(&mut self) {
		self.auth = AuthState::Anonymous;
		self.username = None;
		self.profile = None;
		self.clear_list();
	}

	pub fn show_list(&mut self, items: Vec<ListItem>) {
		self.items = Some(sort_by_kind(items));
	}

	pub fn clear_list(&mut self) {
		self.items = None;
	}

	pub fn total(&self) -> String {
		format_price(self.items.as_deref().map(total_price).unwrap_or_default())
	}

	pub fn notify(&mut self, level: Level, message: impl Into<String>) -> u64 {
		let id = self.next_notice;
		self.next_notice += 1;
		self.notices.push(Notice {
			id,
			level,
			message: message.into(),
		});
		id
	}

	pub fn dismiss(&mut self, id: u64) {
		self.notices.retain(|notice| notice.id != id);
	}

	pub fn show_sign_in(&mut self, username: &str) {
		self.form = AuthForm::SignIn;
		self.sign_in_username = username.to_owned();
	}

	pub fn reset_item_form(&mut self) {
		self.item_form_epoch = self.item_form_epoch.wrapping_add(1);
	}
}

/// Where operations publish their results.
pub trait View {
	fn update<F>(&self, apply: F)
	where
		F: FnOnce(&mut ViewModel);
}

impl View for Dispatch<ViewModel> {
	fn update<F>(&self, apply: F)
	where
		F: FnOnce(&mut ViewModel),
	{
		self.reduce_mut(apply);
	}
}

impl View for RefCell<ViewModel> {
	fn update<F>(&self, apply: F)
	where
		F: FnOnce(&mut ViewModel),
	{
		apply(&mut self.borrow_mut());
	}
}
