use crate::api::InvalidJson;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("{0}")]
	Auth(String),
	#[error("{0}")]
	Registration(String),
	#[error("Your session has expired. Please sign in again.")]
	SessionExpired,
	#[error("Please sign in to manage your list")]
	NotSignedIn,
	#[error("Unable to reach the server: {0}")]
	Network(String),
	#[error("{0}")]
	NotFound(String),
	#[error("Unexpected response {status}: {message}")]
	Server { status: u16, message: String },
	#[error(transparent)]
	InvalidJson(#[from] InvalidJson),
}

/// Input rejected before anything is sent.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Username and password are required")]
	MissingCredentials,
	#[error("Username is required")]
	MissingUsername,
	#[error("Password must be at least {} characters long", crate::validate::MIN_PASSWORD_LEN)]
	PasswordTooShort,
	#[error("Passwords do not match")]
	PasswordMismatch,
	#[error("Please enter a valid email address")]
	InvalidEmail,
	#[error("All fields are required")]
	MissingField,
	#[error("Quantity must be a positive number")]
	InvalidQuantity,
	#[error("Price must be a positive number")]
	InvalidPrice,
}
