use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry on the user's shopping list, as the server stores it.
///
/// Other clients can write rows this one would never send (negative or fractional quantities,
/// missing prices), so every field decodes leniently and falls back to an empty value.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ListItem {
	/// Unique per user; deletes are keyed by it.
	#[serde(default, deserialize_with = "lenient_string")]
	pub name: String,
	/// The category/aisle the item is shelved under.
	#[serde(rename = "type", default, deserialize_with = "lenient_string")]
	pub kind: String,
	#[serde(default, deserialize_with = "lenient_number")]
	pub quantity: f64,
	#[serde(default, deserialize_with = "lenient_number")]
	pub price: f64,
}

impl ListItem {
	/// Decodes each row on its own; rows that are not objects are dropped.
	pub fn from_rows(rows: Vec<Value>) -> Vec<Self> {
		rows.into_iter()
			.filter_map(|row| match serde_json::from_value::<Self>(row) {
				Ok(item) => Some(item),
				Err(err) => {
					log::warn!(target: "list", "skipping unreadable row: {err}");
					None
				}
			})
			.collect()
	}
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::String(text)) => text,
		_ => String::new(),
	})
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value
		.as_ref()
		.and_then(Value::as_f64)
		.filter(|number| number.is_finite())
		.unwrap_or_default())
}

/// Payload for `POST list`, already validated.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct NewItem {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub quantity: u32,
	pub price: f64,
}

/// Orders items by category, keeping the server order within a category.
pub fn sort_by_kind(items: Vec<ListItem>) -> Vec<ListItem> {
	items.into_iter().sorted_by(|a, b| a.kind.cmp(&b.kind)).collect()
}

pub fn total_price(items: &[ListItem]) -> f64 {
	items.iter().map(|item| item.price).sum()
}

pub fn format_price(value: f64) -> String {
	format!("{value:.2}")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(name: &str, kind: &str, price: f64) -> ListItem {
		ListItem {
			name: name.to_owned(),
			kind: kind.to_owned(),
			quantity: 1.0,
			price,
		}
	}

	#[test]
	fn sort_is_stable_within_kind() {
		let items = vec![item("first", "b", 1.0), item("second", "a", 1.0), item("third", "a", 1.0)];
		let names = sort_by_kind(items).into_iter().map(|item| item.name).collect::<Vec<_>>();
		assert_eq!(names, vec!["second", "third", "first"]);
	}

	#[test]
	fn sort_is_case_sensitive() {
		let items = vec![item("x", "dairy", 1.0), item("y", "Produce", 1.0)];
		let kinds = sort_by_kind(items).into_iter().map(|item| item.kind).collect::<Vec<_>>();
		assert_eq!(kinds, vec!["Produce", "dairy"]);
	}

	#[test]
	fn total_rounds_to_cents() {
		let items = vec![item("a", "x", 0.1), item("b", "x", 0.2), item("c", "x", 3.5)];
		assert_eq!(format_price(total_price(&items)), "3.80");
		assert_eq!(format_price(total_price(&[])), "0.00");
	}

	#[test]
	fn decodes_server_shape() {
		let json = r#"[{"_id":"65f0","name":"Milk","type":"Dairy","quantity":2,"price":3.5}]"#;
		let items: Vec<ListItem> = serde_json::from_str(json).unwrap();
		assert_eq!(items, vec![ListItem {
			name: "Milk".into(),
			kind: "Dairy".into(),
			quantity: 2.0,
			price: 3.5
		}]);
	}

	#[test]
	fn odd_rows_decode_with_fallbacks() {
		let rows = serde_json::from_str::<Vec<Value>>(
			r#"[
				{"name":"Milk","type":"Dairy","quantity":2,"price":3.5},
				{"name":"Eggs","type":"Dairy","quantity":-1,"price":"cheap"},
				{"name":"Flour","type":null,"quantity":1.5},
				null,
				"junk"
			]"#,
		)
		.unwrap();
		let items = ListItem::from_rows(rows);
		assert_eq!(items.len(), 3);
		assert_eq!(items[1].quantity, -1.0);
		assert_eq!(format_price(items[1].price), "0.00");
		assert_eq!(items[2].kind, "");
		assert_eq!(items[2].quantity, 1.5);
		assert_eq!(format_price(total_price(&items)), "3.50");
	}

	#[test]
	fn new_item_serializes_type_field() {
		let item = NewItem {
			name: "Milk".into(),
			kind: "Dairy".into(),
			quantity: 2,
			price: 3.5,
		};
		let value = serde_json::to_value(&item).unwrap();
		assert_eq!(value, serde_json::json!({"name": "Milk", "type": "Dairy", "quantity": 2, "price": 3.5}));
	}
}
