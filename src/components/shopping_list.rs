use super::auth_forms::bind;
use crate::{app::AppContext, data::format_price, hooks::use_action, validate::CATEGORY_PLACEHOLDER, view::ViewModel};
use yew::prelude::*;
use yewdux::prelude::*;

static CATEGORIES: &[&str] = &[
	"Bakery",
	"Beverages",
	"Dairy",
	"Frozen",
	"Household",
	"Meat",
	"Pantry",
	"Produce",
	"Snacks",
	"Other",
];

#[function_component]
pub fn ShoppingList() -> Html {
	let context = use_context::<AppContext>().unwrap();
	let (model, dispatch) = use_store::<ViewModel>();
	let delete = use_action("list", move |name: String| {
		let client = context.client.clone();
		let dispatch = dispatch.clone();
		async move { client.list.delete_item(&dispatch, &name).await.map(|_| ()) }
	});

	let rows = match &model.items {
		None => html! {},
		Some(items) if items.is_empty() => html! {
			<tr><td colspan="5" class="text-center">{"No items in your personal shopping list"}</td></tr>
		},
		Some(items) => items
			.iter()
			.enumerate()
			.map(|(index, item)| {
				let onclick = {
					let delete = delete.clone();
					let name = item.name.clone();
					Callback::from(move |_: MouseEvent| delete.run(name.clone()))
				};
				html! {
					<tr key={format!("{index}:{}", item.name)}>
						<td>{&item.name}</td>
						<td>{&item.kind}</td>
						<td>{item.quantity.to_string()}</td>
						<td>{format_price(item.price)}</td>
						<td>
							<button type="button" class="btn btn-danger btn-sm" {onclick} disabled={delete.is_pending()}>
								{"Delete"}
							</button>
						</td>
					</tr>
				}
			})
			.collect::<Html>(),
	};

	html! {
		<div class="auth-required">
			<table class="table table-striped auth-required">
				<thead>
					<tr>
						<th>{"Name"}</th>
						<th>{"Type"}</th>
						<th>{"Quantity"}</th>
						<th>{"Price"}</th>
						<th />
					</tr>
				</thead>
				<tbody id="list-rows">{rows}</tbody>
			</table>
			<p class="text-end fs-5">
				{"Total: $"}<span id="update-price">{model.total()}</span>
			</p>
			<AddItemForm key={model.item_form_epoch.to_string()} />
		</div>
	}
}

/// Inputs live here so a rejected add keeps what the user typed; a successful add remounts it blank.
#[function_component]
pub fn AddItemForm() -> Html {
	let context = use_context::<AppContext>().unwrap();
	let (_, dispatch) = use_store::<ViewModel>();
	let name = use_state(String::new);
	let kind = use_state(|| CATEGORY_PLACEHOLDER.to_owned());
	let quantity = use_state(String::new);
	let price = use_state(String::new);
	let add = use_action("list", move |fields: [String; 4]| {
		let client = context.client.clone();
		let dispatch = dispatch.clone();
		async move {
			let [name, kind, quantity, price] = fields;
			client.list.add_item(&dispatch, &name, &kind, &quantity, &price).await.map(|_| ())
		}
	});
	let onsubmit = {
		let add = add.clone();
		let fields = [name.clone(), kind.clone(), quantity.clone(), price.clone()];
		Callback::from(move |e: SubmitEvent| {
			e.prevent_default();
			add.run(fields.clone().map(|field| (*field).clone()));
		})
	};
	let onchange_kind = {
		let kind = kind.clone();
		Callback::from(move |e: Event| kind.set(crate::util::event_value(&e)))
	};
	html! {
		<form class="box auth-required row g-2 align-items-end" {onsubmit}>
			<div class="col-md-4">
				<label class="form-label" for="new-name">{"Item"}</label>
				<input id="new-name" class="form-control" type="text" value={(*name).clone()} oninput={bind(&name)} />
			</div>
			<div class="col-md-3">
				<label class="form-label" for="new-type">{"Type"}</label>
				<select id="new-type" class="form-select" onchange={onchange_kind}>
					<option value={CATEGORY_PLACEHOLDER} selected={*kind == CATEGORY_PLACEHOLDER}>{CATEGORY_PLACEHOLDER}</option>
					{for CATEGORIES.iter().map(|category| html! {
						<option value={*category} selected={*kind == *category}>{*category}</option>
					})}
				</select>
			</div>
			<div class="col-md-2">
				<label class="form-label" for="new-quantity">{"Quantity"}</label>
				<input id="new-quantity" class="form-control" type="number" min="1" step="1" value={(*quantity).clone()} oninput={bind(&quantity)} />
			</div>
			<div class="col-md-2">
				<label class="form-label" for="new-price">{"Price"}</label>
				<input id="new-price" class="form-control" type="number" min="0.01" step="0.01" value={(*price).clone()} oninput={bind(&price)} />
			</div>
			<div class="col-md-1">
				<button id="add-item" class="btn btn-success w-100" type="submit" disabled={add.is_pending()}>{"Add"}</button>
			</div>
		</form>
	}
}
