use serde::Deserialize;

/// Account details served by `GET users/me`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Profile {
	pub username: String,
	pub email: String,
	#[serde(default)]
	pub role: Option<String>,
	#[serde(default)]
	pub created_at: Option<String>,
}
