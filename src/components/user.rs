use crate::{app::AppContext, view::ViewModel};
use yew::prelude::*;
use yewdux::prelude::*;

#[function_component]
pub fn Identification() -> Html {
	let model = use_store_value::<ViewModel>();
	let name = model
		.username
		.clone()
		.or_else(|| model.profile.as_ref().map(|profile| profile.username.clone()))
		.unwrap_or_default();
	let email = model.profile.as_ref().map(|profile| profile.email.clone());
	html! {
		<span class="d-flex flex-column text-end">
			<span id="username-display" class="fw-bold">{name}</span>
			if let Some(email) = email {
				<small class="text-muted">{email}</small>
			}
		</span>
	}
}

#[function_component]
pub fn SignOutButton() -> Html {
	let context = use_context::<AppContext>().unwrap();
	let (_, dispatch) = use_store::<ViewModel>();
	let onclick = Callback::from(move |_: MouseEvent| {
		context.client.sign_out(&dispatch);
	});
	html! {
		<button id="sign-out-btn" class="btn btn-outline-danger btn-sm" {onclick}>
			{"Sign Out"}
		</button>
	}
}

#[function_component]
pub fn SignedInUser() -> Html {
	html! {
		<div id="signed-in-user" class="d-flex align-items-center gap-3">
			<Identification />
			<SignOutButton />
		</div>
	}
}
