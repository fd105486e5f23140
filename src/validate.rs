use crate::{data::NewItem, error::ValidationError};
use lazy_static::lazy_static;
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Value of the category select before the user picks one.
pub static CATEGORY_PLACEHOLDER: &str = "Choose...";

lazy_static! {
	static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn credentials(username: &str, password: &str) -> Result<(), ValidationError> {
	if username.is_empty() || password.is_empty() {
		return Err(ValidationError::MissingCredentials);
	}
	Ok(())
}

pub fn registration(username: &str, email: &str, password: &str, confirm_password: &str) -> Result<(), ValidationError> {
	if username.trim().is_empty() {
		return Err(ValidationError::MissingUsername);
	}
	if password.chars().count() < MIN_PASSWORD_LEN {
		return Err(ValidationError::PasswordTooShort);
	}
	if password != confirm_password {
		return Err(ValidationError::PasswordMismatch);
	}
	if !is_email(email) {
		return Err(ValidationError::InvalidEmail);
	}
	Ok(())
}

pub fn is_email(email: &str) -> bool {
	EMAIL.is_match(email)
}

/// Turns raw form text into an item ready to post.
pub fn new_item(name: &str, kind: &str, quantity: &str, price: &str) -> Result<NewItem, ValidationError> {
	let name = name.trim();
	let kind = kind.trim();
	let quantity = quantity.trim();
	let price = price.trim();
	if name.is_empty() || kind.is_empty() || kind == CATEGORY_PLACEHOLDER || quantity.is_empty() || price.is_empty() {
		return Err(ValidationError::MissingField);
	}
	let quantity = match quantity.parse::<u32>() {
		Ok(value) if value > 0 => value,
		_ => return Err(ValidationError::InvalidQuantity),
	};
	let price = match price.parse::<f64>() {
		Ok(value) if value.is_finite() && value > 0.0 => value,
		_ => return Err(ValidationError::InvalidPrice),
	};
	Ok(NewItem {
		name: name.to_owned(),
		kind: kind.to_owned(),
		quantity,
		price,
	})
}
