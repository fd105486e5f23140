use crate::{
	client::BrowserClient,
	components::{user::SignedInUser, AuthForms, AuthSwitch, Notices, ShoppingList},
	config::Config,
	view::ViewModel,
};
use derivative::Derivative;
use std::rc::Rc;
use yew::prelude::*;
use yew_hooks::{use_event_with_window, use_interval, use_mount};
use yewdux::prelude::*;

/// Shared with every component that talks to the backend.
#[derive(Clone, Derivative)]
#[derivative(PartialEq)]
pub struct AppContext {
	#[derivative(PartialEq(compare_with = "Rc::ptr_eq"))]
	pub client: Rc<BrowserClient>,
	pub config: Rc<Config>,
}

#[derive(Clone, PartialEq, Properties)]
pub struct AppProps {
	pub config: Config,
}

#[function_component]
pub fn App(props: &AppProps) -> Html {
	let context = use_memo(props.config.clone(), |config| AppContext {
		client: Rc::new(BrowserClient::browser(config)),
		config: Rc::new(config.clone()),
	});
	let (_, dispatch) = use_store::<ViewModel>();

	use_mount({
		let client = context.client.clone();
		let config = context.config.clone();
		let dispatch = dispatch.clone();
		move || {
			log::debug!(target: "app", "starting against {}", config.api_base);
			wasm_bindgen_futures::spawn_local(async move {
				client.start(&dispatch).await;
			});
		}
	});

	// Storage can change underneath us (other tabs, devtools); re-derive the view from it.
	let reconcile = {
		let client = context.client.clone();
		let dispatch = dispatch.clone();
		move || {
			let client = client.clone();
			let dispatch = dispatch.clone();
			wasm_bindgen_futures::spawn_local(async move {
				client.reconcile(&dispatch).await;
			});
		}
	};
	let interval = context.config.reconcile_interval.as_millis().min(u32::MAX as u128) as u32;
	use_interval(reconcile.clone(), interval);
	use_event_with_window("storage", move |_: Event| reconcile());

	html! {
		<ContextProvider<AppContext> context={(*context).clone()}>
			<Notices />
			<div class="container py-4">
				<header class="d-flex align-items-center justify-content-between mb-4">
					<h1 class="h3 mb-0">{"Shopping List"}</h1>
					<AuthSwitch identified={html! { <SignedInUser /> }} />
				</header>
				<AuthSwitch
					identified={html! { <ShoppingList /> }}
					anonymous={html! { <AuthForms /> }}
				/>
			</div>
		</ContextProvider<AppContext>>
	}
}
