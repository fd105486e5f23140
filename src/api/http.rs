use super::{Body, Reply, Request, Transport};
use crate::error::Error;
use url::Url;

/// `reqwest`-backed transport; in the browser this rides on `fetch`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	base: Url,
}
impl HttpTransport {
	pub fn new(base: Url) -> Self {
		Self {
			client: reqwest::Client::new(),
			base,
		}
	}

	fn url(&self, path: &str) -> Result<Url, Error> {
		self.base
			.join(path)
			.map_err(|err| Error::Network(format!("invalid endpoint {path:?}: {err}")))
	}
}

impl Transport for HttpTransport {
	async fn send(&self, request: Request) -> Result<Reply, Error> {
		let url = self.url(&request.path)?;
		let mut builder = self.client.request(request.method, url);
		builder = builder.header("Accept", "application/json");
		if let Some(token) = &request.bearer {
			builder = builder.bearer_auth(token);
		}
		builder = match &request.body {
			Body::Empty => builder,
			Body::Form(fields) => builder.form(fields),
			Body::Json(value) => builder.json(value),
		};
		let response = builder.send().await.map_err(|err| Error::Network(err.to_string()))?;
		let status = response.status().as_u16();
		let text = response.text().await.map_err(|err| Error::Network(err.to_string()))?;
		Ok(Reply { status, text })
	}
}
