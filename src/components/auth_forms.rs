use crate::{
	app::AppContext,
	hooks::use_action,
	util::event_value,
	view::{AuthForm, ViewModel},
};
use yew::prelude::*;
use yewdux::prelude::*;

#[function_component]
pub fn AuthForms() -> Html {
	let (model, dispatch) = use_store::<ViewModel>();
	let tab = |form: AuthForm, id: &'static str, label: &'static str| {
		let onclick = {
			let dispatch = dispatch.clone();
			Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|model| model.form = form))
		};
		let class = classes!("nav-link", (model.form == form).then_some("active"));
		html! {
			<li class="nav-item">
				<button {id} {class} type="button" {onclick}>{label}</button>
			</li>
		}
	};
	html! {
		<div id="auth-container" class="card mx-auto" style="max-width: 28rem;">
			<div class="card-header">
				<ul class="nav nav-tabs card-header-tabs">
					{tab(AuthForm::SignIn, "signin-tab", "Sign In")}
					{tab(AuthForm::SignUp, "signup-tab", "Sign Up")}
				</ul>
			</div>
			<div class="card-body">
				{match model.form {
					// Keyed so a fresh prefill after sign-up remounts the inputs.
					AuthForm::SignIn => html! {
						<SignInForm key={model.sign_in_username.clone()} username={model.sign_in_username.clone()} />
					},
					AuthForm::SignUp => html! { <SignUpForm /> },
				}}
			</div>
		</div>
	}
}

#[derive(Clone, PartialEq, Properties)]
pub struct SignInFormProps {
	#[prop_or_default]
	pub username: String,
}

#[function_component]
pub fn SignInForm(props: &SignInFormProps) -> Html {
	let context = use_context::<AppContext>().unwrap();
	let (_, dispatch) = use_store::<ViewModel>();
	let username = use_state({
		let username = props.username.clone();
		move || username
	});
	let password = use_state(String::new);
	let sign_in = use_action("session", move |(username, password): (String, String)| {
		let client = context.client.clone();
		let dispatch = dispatch.clone();
		async move {
			client.sign_in(&dispatch, &username, &password).await;
			Ok(())
		}
	});
	let onsubmit = {
		let sign_in = sign_in.clone();
		let username = username.clone();
		let password = password.clone();
		Callback::from(move |e: SubmitEvent| {
			e.prevent_default();
			sign_in.run(((*username).clone(), (*password).clone()));
		})
	};
	html! {
		<form id="sign-in-form" {onsubmit}>
			<div class="mb-3">
				<label class="form-label" for="signin-username">{"Username"}</label>
				<input id="signin-username" class="form-control" type="text" autocomplete="username"
					value={(*username).clone()}
					oninput={bind(&username)}
				/>
			</div>
			<div class="mb-3">
				<label class="form-label" for="signin-password">{"Password"}</label>
				<input id="signin-password" class="form-control" type="password" autocomplete="current-password"
					value={(*password).clone()}
					oninput={bind(&password)}
				/>
			</div>
			<button class="btn btn-primary w-100" type="submit" disabled={sign_in.is_pending()}>
				{if sign_in.is_pending() { "Signing in..." } else { "Sign In" }}
			</button>
		</form>
	}
}

#[function_component]
pub fn SignUpForm() -> Html {
	let context = use_context::<AppContext>().unwrap();
	let (_, dispatch) = use_store::<ViewModel>();
	let username = use_state(String::new);
	let email = use_state(String::new);
	let password = use_state(String::new);
	let confirm = use_state(String::new);
	let sign_up = use_action("session", move |fields: [String; 4]| {
		let client = context.client.clone();
		let dispatch = dispatch.clone();
		async move {
			let [username, email, password, confirm] = fields;
			client.auth.sign_up(&dispatch, &username, &email, &password, &confirm).await
		}
	});
	let onsubmit = {
		let sign_up = sign_up.clone();
		let fields = [username.clone(), email.clone(), password.clone(), confirm.clone()];
		Callback::from(move |e: SubmitEvent| {
			e.prevent_default();
			sign_up.run(fields.clone().map(|field| (*field).clone()));
		})
	};
	html! {
		<form id="sign-up-form" {onsubmit}>
			<div class="mb-3">
				<label class="form-label" for="signup-username">{"Username"}</label>
				<input id="signup-username" class="form-control" type="text" value={(*username).clone()} oninput={bind(&username)} />
			</div>
			<div class="mb-3">
				<label class="form-label" for="signup-email">{"Email"}</label>
				<input id="signup-email" class="form-control" type="email" value={(*email).clone()} oninput={bind(&email)} />
			</div>
			<div class="mb-3">
				<label class="form-label" for="signup-password">{"Password"}</label>
				<input id="signup-password" class="form-control" type="password" value={(*password).clone()} oninput={bind(&password)} />
				<div class="form-text">{"At least 8 characters."}</div>
			</div>
			<div class="mb-3">
				<label class="form-label" for="signup-confirm-password">{"Confirm Password"}</label>
				<input id="signup-confirm-password" class="form-control" type="password" value={(*confirm).clone()} oninput={bind(&confirm)} />
			</div>
			<button class="btn btn-success w-100" type="submit" disabled={sign_up.is_pending()}>
				{if sign_up.is_pending() { "Signing up..." } else { "Sign Up" }}
			</button>
		</form>
	}
}

pub(crate) fn bind(state: &UseStateHandle<String>) -> Callback<InputEvent> {
	let state = state.clone();
	Callback::from(move |e: InputEvent| state.set(event_value(&e)))
}
