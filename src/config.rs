use anyhow::Context;
use std::time::Duration;
use url::Url;

/// Compile-time override for the API location, e.g. `https://shop.example.com/`.
static API_URL_OVERRIDE: Option<&str> = option_env!("SHOPPING_LIST_API_URL");
static FALLBACK_API_URL: &str = "http://localhost:8000/";

pub static TOKEN_KEY: &str = "access_token";
pub static USERNAME_KEY: &str = "username";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// Base that every endpoint path is joined onto. Always ends with `/`.
	pub api_base: Url,
	pub reconcile_interval: Duration,
	pub notice_duration: Duration,
	pub token_key: &'static str,
	pub username_key: &'static str,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api_base: Url::parse(FALLBACK_API_URL).expect("fallback api url is valid"),
			reconcile_interval: Duration::from_secs(5),
			notice_duration: Duration::from_secs(2),
			token_key: TOKEN_KEY,
			username_key: USERNAME_KEY,
		}
	}
}

impl Config {
	pub fn with_api_base(mut self, base: &str) -> anyhow::Result<Self> {
		self.api_base = normalize_base(base)?;
		Ok(self)
	}

	/// Resolves the API base from the build override or, failing that, the page's own base URI
	/// (the backend serves the page, so relative endpoints land on the same origin).
	pub fn from_document() -> anyhow::Result<Self> {
		if let Some(base) = API_URL_OVERRIDE {
			return Self::default().with_api_base(base);
		}
		let base = gloo_utils::document()
			.base_uri()
			.ok()
			.flatten()
			.context("document has no base uri")?;
		let mut url = normalize_base(&base)?;
		// The page may live at a nested path; endpoints hang off the origin root.
		url.set_path("/");
		url.set_query(None);
		url.set_fragment(None);
		Ok(Self {
			api_base: url,
			..Self::default()
		})
	}
}

fn normalize_base(base: &str) -> anyhow::Result<Url> {
	let mut url = Url::parse(base).with_context(|| format!("invalid api base {base:?}"))?;
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());
		url.set_path(&path);
	}
	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_base_gains_trailing_slash() {
		let config = Config::default().with_api_base("https://shop.example.com/api").unwrap();
		assert_eq!(config.api_base.as_str(), "https://shop.example.com/api/");
		assert_eq!(config.api_base.join("list").unwrap().as_str(), "https://shop.example.com/api/list");
	}

	#[test]
	fn rejects_relative_base() {
		assert!(Config::default().with_api_base("/api").is_err());
	}

	#[test]
	fn reference_intervals() {
		let config = Config::default();
		assert_eq!(config.reconcile_interval, Duration::from_secs(5));
		assert_eq!(config.notice_duration, Duration::from_secs(2));
		assert_eq!(config.token_key, "access_token");
	}
}
