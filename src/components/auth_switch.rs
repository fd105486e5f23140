use crate::view::{AuthState, ViewModel};
use yew::prelude::*;
use yewdux::prelude::*;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct AuthSwitchProps {
	#[prop_or_default]
	pub identified: Option<Html>,
	#[prop_or_default]
	pub anonymous: Option<Html>,
}

/// The single place auth state turns into visibility: exactly one branch is ever mounted.
#[function_component]
pub fn AuthSwitch(props: &AuthSwitchProps) -> Html {
	let model = use_store_value::<ViewModel>();
	let empty = || html! {};
	match model.auth {
		AuthState::Authenticated => props.identified.clone().unwrap_or_else(empty),
		AuthState::Anonymous => props.anonymous.clone().unwrap_or_else(empty),
	}
}
