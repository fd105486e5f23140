use serde::{de::DeserializeOwned, Deserialize};

/// Status and body of a completed HTTP exchange.
#[derive(Clone, PartialEq, Debug)]
pub struct Reply {
	pub status: u16,
	pub text: String,
}
impl Reply {
	pub fn new(status: u16, text: impl Into<String>) -> Self {
		Self {
			status,
			text: text.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	pub fn json<T>(&self) -> Result<T, InvalidJson>
	where
		T: DeserializeOwned,
	{
		serde_json::from_str(&self.text).map_err(|err| InvalidJson(self.text.clone(), err.to_string()))
	}

	/// The `detail` message the backend attaches to rejections, if any.
	pub fn detail(&self) -> Option<String> {
		#[derive(Deserialize)]
		struct Detail {
			detail: Option<serde_json::Value>,
		}
		let detail = serde_json::from_str::<Detail>(&self.text).ok()?.detail?;
		match detail {
			serde_json::Value::String(message) if !message.is_empty() => Some(message),
			serde_json::Value::String(_) | serde_json::Value::Null => None,
			// Request validation failures arrive as a list of objects.
			other => Some(other.to_string()),
		}
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub struct InvalidJson(pub String, pub String);
impl std::fmt::Display for InvalidJson {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Invalid json: {:?}\nError: {}", self.0, self.1)
	}
}
