use crate::error::Error;
use reqwest::Method;
use serde::Serialize;
use std::rc::Rc;

pub use crate::response::{InvalidJson, Reply};

pub mod http;

pub static SIGN_IN: &str = "users/sign-in";
pub static SIGN_UP: &str = "users/signup";
pub static PROFILE: &str = "users/me";
pub static LIST: &str = "list";

pub fn list_item(name: &str) -> String {
	format!("{LIST}/{}", urlencoding::encode(name))
}

#[derive(Clone, PartialEq, Debug)]
pub enum Body {
	Empty,
	Form(Vec<(&'static str, String)>),
	Json(serde_json::Value),
}

/// An outgoing call, relative to the configured api base.
#[derive(Clone, PartialEq, Debug)]
pub struct Request {
	pub method: Method,
	pub path: String,
	pub bearer: Option<String>,
	pub body: Body,
}
impl Request {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			bearer: None,
			body: Body::Empty,
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	pub fn with_form(mut self, fields: Vec<(&'static str, String)>) -> Self {
		self.body = Body::Form(fields);
		self
	}

	pub fn with_json<Q>(mut self, json: &Q) -> Self
	where
		Q: Serialize + ?Sized,
	{
		self.body = match serde_json::to_value(json) {
			Ok(value) => Body::Json(value),
			Err(err) => {
				log::error!(target: "api", "failed to encode body for {}: {err:?}", self.path);
				Body::Empty
			}
		};
		self
	}
}

/// Sends a request and hands back whatever the server answered.
/// Only failures to get an answer at all are errors.
#[allow(async_fn_in_trait)]
pub trait Transport {
	async fn send(&self, request: Request) -> Result<Reply, Error>;
}

impl<T: Transport> Transport for Rc<T> {
	async fn send(&self, request: Request) -> Result<Reply, Error> {
		(**self).send(request).await
	}
}

#[derive(Debug)]
pub struct Api<T> {
	transport: T,
}
impl<T: Transport> Api<T> {
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	pub async fn send(&self, request: Request) -> Result<Reply, Error> {
		let method = request.method.clone();
		let path = request.path.clone();
		log::debug!(target: "api", "{method} {path}");
		match self.transport.send(request).await {
			Ok(reply) => {
				log::debug!(target: "api", "{method} {path} -> {}", reply.status);
				Ok(reply)
			}
			Err(err) => {
				log::warn!(target: "api", "{method} {path} failed: {err}");
				Err(err)
			}
		}
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}
}
