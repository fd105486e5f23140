use crate::{
	api::{self, Api, Request, Transport},
	data::Profile,
	error::Error,
	session::{Session, Storage},
	validate,
	view::{Level, View},
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignInResponse {
	#[serde(default)]
	pub access_token: String,
	#[serde(default)]
	pub token_type: Option<String>,
}

#[derive(Serialize)]
struct Registration<'a> {
	username: &'a str,
	email: &'a str,
	password: &'a str,
}

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
	Unchanged,
	SignedIn,
	SignedOut,
}

pub struct SessionManager<S, T> {
	session: Rc<Session<S>>,
	api: Rc<Api<T>>,
}

impl<S: Storage, T: Transport> SessionManager<S, T> {
	pub fn new(session: Rc<Session<S>>, api: Rc<Api<T>>) -> Self {
		Self { session, api }
	}

	pub fn is_authenticated(&self) -> bool {
		self.session.is_authenticated()
	}

	pub fn attach_authorization(&self, request: &mut Request) {
		self.session.authorize(request);
	}

	pub async fn sign_in<V: View>(&self, view: &V, username: &str, password: &str) -> Result<SignInResponse, Error> {
		let result = self.try_sign_in(username, password).await;
		match &result {
			Ok(_) => {
				log::info!(target: "session", "signed in as {username:?}");
				let username = username.to_owned();
				view.update(move |model| {
					model.notify(Level::Success, format!("Welcome back, {username}!"));
					model.authenticate(Some(username));
				});
			}
			Err(err) => {
				log::debug!(target: "session", "sign in rejected: {err}");
				report(view, Level::Danger, err);
			}
		}
		result
	}

	async fn try_sign_in(&self, username: &str, password: &str) -> Result<SignInResponse, Error> {
		validate::credentials(username, password)?;
		let request = Request::post(api::SIGN_IN).with_form(vec![
			("username", username.to_owned()),
			("password", password.to_owned()),
		]);
		let reply = self.api.send(request).await?;
		if reply.status != 200 {
			return Err(Error::Auth(reply.detail().unwrap_or_else(|| "Sign-in failed".into())));
		}
		let response = reply
			.json::<SignInResponse>()
			.map_err(|_| Error::Auth("Error processing server response".into()))?;
		if response.access_token.is_empty() {
			return Err(Error::Auth("Invalid response: no access token".into()));
		}
		self.session.set(&response.access_token, username);
		Ok(response)
	}

	/// Registers an account. The user still has to sign in afterwards.
	pub async fn sign_up<V: View>(
		&self,
		view: &V,
		username: &str,
		email: &str,
		password: &str,
		confirm_password: &str,
	) -> Result<(), Error> {
		let result = self.try_sign_up(username, email, password, confirm_password).await;
		match &result {
			Ok(()) => {
				log::info!(target: "session", "registered {username:?}");
				let username = username.trim().to_owned();
				view.update(move |model| {
					model.notify(
						Level::Success,
						"Sign-up successful! Your account has been created. Please sign in.",
					);
					model.show_sign_in(&username);
				});
			}
			Err(err) => report(view, Level::Danger, err),
		}
		result
	}

	async fn try_sign_up(&self, username: &str, email: &str, password: &str, confirm_password: &str) -> Result<(), Error> {
		validate::registration(username, email, password, confirm_password)?;
		let request = Request::post(api::SIGN_UP).with_json(&Registration {
			username: username.trim(),
			email: email.trim(),
			password,
		});
		let reply = self.api.send(request).await?;
		if !reply.is_success() {
			return Err(Error::Registration(reply.detail().unwrap_or_else(|| "Sign-up failed".into())));
		}
		Ok(())
	}

	/// Always succeeds, whether or not a session existed.
	pub fn sign_out<V: View>(&self, view: &V) {
		let had_session = self.session.is_authenticated();
		self.session.clear();
		view.update(|model| {
			model.anonymize();
			if had_session {
				model.notify(Level::Info, "You have been signed out successfully");
			}
		});
		if had_session {
			log::info!(target: "session", "signed out");
		}
	}

	/// Brings the view back in line with whatever storage currently holds.
	pub fn reconcile<V: View>(&self, view: &V) -> Transition {
		let username = self.session.username();
		let authenticated = self.session.is_authenticated();
		let mut transition = Transition::Unchanged;
		view.update(|model| {
			transition = match (model.is_authenticated(), authenticated) {
				(false, true) => Transition::SignedIn,
				(true, false) => Transition::SignedOut,
				_ => Transition::Unchanged,
			};
			if authenticated {
				model.authenticate(username);
			} else {
				model.anonymize();
			}
		});
		if transition != Transition::Unchanged {
			log::debug!(target: "session", "reconciled: {transition:?}");
		}
		transition
	}

	pub async fn fetch_profile<V: View>(&self, view: &V) -> Result<Profile, Error> {
		if !self.session.is_authenticated() {
			return Err(Error::NotSignedIn);
		}
		let mut request = Request::get(api::PROFILE);
		self.attach_authorization(&mut request);
		let sent = request.bearer.clone();
		let reply = self.api.send(request).await?;
		match reply.status {
			200 => {
				let profile = reply.json::<Profile>()?;
				let stored = profile.clone();
				view.update(move |model| model.profile = Some(stored));
				Ok(profile)
			}
			401 => Err(unauthorized(&self.session, view, sent.as_deref())),
			404 => Err(Error::NotFound(reply.detail().unwrap_or_else(|| "User not found".into()))),
			status => Err(Error::Server {
				status,
				message: reply.detail().unwrap_or_default(),
			}),
		}
	}
}

/// A 401 only ends the session the request was sent with. When another tab signed in
/// meanwhile, the fresh token is kept and the caller is told to retry.
pub(crate) fn unauthorized<S: Storage, V: View>(session: &Session<S>, view: &V, sent: Option<&str>) -> Error {
	if session.token().as_deref() == sent {
		return expire(session, view);
	}
	log::info!(target: "session", "401 for a replaced session, keeping the current one");
	let error = Error::Auth("Your session changed while the request was in flight. Please try again.".into());
	report(view, Level::Warning, &error);
	error
}

/// The server no longer accepts our token: forget it and fall back to the anonymous view.
pub(crate) fn expire<S: Storage, V: View>(session: &Session<S>, view: &V) -> Error {
	log::info!(target: "session", "session expired");
	session.clear();
	let error = Error::SessionExpired;
	let message = error.to_string();
	view.update(move |model| {
		model.anonymize();
		model.notify(Level::Warning, message);
	});
	error
}

pub(crate) fn report<V: View>(view: &V, level: Level, error: &Error) {
	let message = match error {
		Error::Validation(err) => err.to_string(),
		Error::Network(_) => "Network error. Please check your connection and try again.".to_owned(),
		other => other.to_string(),
	};
	view.update(move |model| {
		model.notify(level, message);
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		api::{testing::ScriptedTransport, Body, Reply},
		config::Config,
		error::ValidationError,
		session::MemoryStore,
		view::{AuthForm, AuthState, ViewModel},
	};
	use futures::executor::block_on;
	use std::cell::RefCell;

	struct Fixture {
		transport: Rc<ScriptedTransport>,
		session: Rc<Session<MemoryStore>>,
		manager: SessionManager<MemoryStore, Rc<ScriptedTransport>>,
		view: RefCell<ViewModel>,
	}

	fn fixture() -> Fixture {
		let transport = Rc::new(ScriptedTransport::default());
		let session = Rc::new(Session::new(MemoryStore::default(), &Config::default()));
		let api = Rc::new(Api::new(transport.clone()));
		Fixture {
			manager: SessionManager::new(session.clone(), api),
			transport,
			session,
			view: RefCell::new(ViewModel::default()),
		}
	}

	#[test]
	fn sign_in_stores_token() {
		let fx = fixture();
		fx.transport.reply(200, r#"{"access_token":"tok","token_type":"bearer"}"#);
		let response = block_on(fx.manager.sign_in(&fx.view, "ada", "hunter22")).unwrap();
		assert_eq!(response.access_token, "tok");
		assert!(fx.manager.is_authenticated());
		assert_eq!(fx.session.username().as_deref(), Some("ada"));

		let view = fx.view.borrow();
		assert_eq!(view.auth, AuthState::Authenticated);
		assert_eq!(view.username.as_deref(), Some("ada"));
		assert_eq!(view.notices[0].level, Level::Success);

		let requests = fx.transport.requests();
		assert_eq!(requests[0].path, "users/sign-in");
		assert_eq!(
			requests[0].body,
			Body::Form(vec![("username", "ada".into()), ("password", "hunter22".into())])
		);
		assert_eq!(requests[0].bearer, None);
	}

	#[test]
	fn failed_sign_in_keeps_previous_token() {
		let fx = fixture();
		fx.session.set("old", "ada");
		fx.transport.reply(401, r#"{"access_token":"","detail":"Invalid username or password"}"#);
		let err = block_on(fx.manager.sign_in(&fx.view, "ada", "wrong")).unwrap_err();
		assert!(matches!(&err, Error::Auth(message) if message == "Invalid username or password"));
		assert_eq!(fx.session.token().as_deref(), Some("old"));
		assert_eq!(fx.view.borrow().notices[0].level, Level::Danger);
	}

	#[test]
	fn sign_in_without_token_in_body() {
		let fx = fixture();
		fx.transport.reply(200, r#"{"token_type":"bearer"}"#);
		let err = block_on(fx.manager.sign_in(&fx.view, "ada", "pw")).unwrap_err();
		assert!(matches!(err, Error::Auth(_)));
		assert!(!fx.manager.is_authenticated());
	}

	#[test]
	fn sign_in_network_failure() {
		let fx = fixture();
		fx.transport.fail("connection refused");
		let err = block_on(fx.manager.sign_in(&fx.view, "ada", "pw")).unwrap_err();
		assert!(matches!(err, Error::Network(_)));
		assert!(!fx.manager.is_authenticated());
	}

	#[test]
	fn sign_in_requires_credentials() {
		let fx = fixture();
		let err = block_on(fx.manager.sign_in(&fx.view, "ada", "")).unwrap_err();
		assert!(matches!(err, Error::Validation(ValidationError::MissingCredentials)));
		assert!(fx.transport.requests().is_empty());
	}

	#[test]
	fn short_password_never_reaches_server() {
		let fx = fixture();
		let err = block_on(fx.manager.sign_up(&fx.view, "ada", "ada@example.com", "short", "short")).unwrap_err();
		assert!(matches!(err, Error::Validation(ValidationError::PasswordTooShort)));
		assert!(fx.transport.requests().is_empty());
		assert_eq!(fx.view.borrow().notices[0].message, "Password must be at least 8 characters long");
	}

	#[test]
	fn sign_up_switches_to_sign_in() {
		let fx = fixture();
		fx.view.borrow_mut().form = AuthForm::SignUp;
		fx.transport.reply(201, r#"{"message":"User created successfully"}"#);
		block_on(fx.manager.sign_up(&fx.view, "ada", "ada@example.com", "longenough", "longenough")).unwrap();
		assert!(!fx.manager.is_authenticated());
		let view = fx.view.borrow();
		assert_eq!(view.form, AuthForm::SignIn);
		assert_eq!(view.sign_in_username, "ada");
		assert_eq!(
			fx.transport.requests()[0].body,
			Body::Json(serde_json::json!({"username": "ada", "email": "ada@example.com", "password": "longenough"}))
		);
	}

	#[test]
	fn sign_up_rejected_by_server() {
		let fx = fixture();
		fx.transport.reply(400, r#"{"detail":"User already exists"}"#);
		let err = block_on(fx.manager.sign_up(&fx.view, "ada", "ada@example.com", "longenough", "longenough")).unwrap_err();
		assert!(matches!(&err, Error::Registration(message) if message == "User already exists"));
	}

	#[test]
	fn sign_out_is_idempotent() {
		let fx = fixture();
		fx.session.set("tok", "ada");
		fx.manager.reconcile(&fx.view);
		fx.manager.sign_out(&fx.view);
		let once = fx.view.borrow().clone();
		fx.manager.sign_out(&fx.view);
		let twice = fx.view.borrow().clone();
		assert_eq!(once, twice);
		assert!(!fx.manager.is_authenticated());
		assert_eq!(twice.items, None);
		assert_eq!(twice.total(), "0.00");
		assert_eq!(twice.notices.len(), 1);
	}

	#[test]
	fn reconcile_follows_storage() {
		let fx = fixture();
		assert_eq!(fx.manager.reconcile(&fx.view), Transition::Unchanged);
		fx.session.set("tok", "ada");
		assert_eq!(fx.manager.reconcile(&fx.view), Transition::SignedIn);
		assert_eq!(fx.view.borrow().username.as_deref(), Some("ada"));
		assert_eq!(fx.manager.reconcile(&fx.view), Transition::Unchanged);
		fx.session.storage().delete("access_token");
		assert_eq!(fx.manager.reconcile(&fx.view), Transition::SignedOut);
		assert_eq!(fx.view.borrow().auth, AuthState::Anonymous);
	}

	#[test]
	fn profile_is_authorized() {
		let fx = fixture();
		fx.session.set("tok", "ada");
		fx.transport.reply(
			200,
			r#"{"username":"ada","email":"ada@example.com","role":"user","created_at":"2024-01-01T00:00:00"}"#,
		);
		let profile = block_on(fx.manager.fetch_profile(&fx.view)).unwrap();
		assert_eq!(profile.email, "ada@example.com");
		assert_eq!(fx.transport.requests()[0].bearer.as_deref(), Some("tok"));
		assert_eq!(fx.view.borrow().profile, Some(profile));
	}

	#[test]
	fn profile_unauthorized_expires_session() {
		let fx = fixture();
		fx.session.set("tok", "ada");
		fx.manager.reconcile(&fx.view);
		fx.transport.reply(401, r#"{"detail":"Not authenticated"}"#);
		let err = block_on(fx.manager.fetch_profile(&fx.view)).unwrap_err();
		assert!(matches!(err, Error::SessionExpired));
		assert!(!fx.manager.is_authenticated());
		assert_eq!(fx.view.borrow().auth, AuthState::Anonymous);
	}

	#[test]
	fn profile_unauthorized_for_replaced_token_keeps_session() {
		let fx = fixture();
		fx.session.set("tok", "ada");
		fx.manager.reconcile(&fx.view);
		let answer = fx.transport.deferred();
		let fetch = async {
			fx.manager.fetch_profile(&fx.view).await
		};
		let session = &fx.session;
		let other_tab = async move {
			session.set("fresh", "bob");
			let _ = answer.send(Reply::new(401, ""));
		};
		let (outcome, ()) = block_on(async { futures::join!(fetch, other_tab) });
		assert!(matches!(outcome.unwrap_err(), Error::Auth(_)));
		assert_eq!(fx.session.token().as_deref(), Some("fresh"));
		assert_eq!(fx.view.borrow().auth, AuthState::Authenticated);
	}
}
