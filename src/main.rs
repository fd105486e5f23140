#[cfg(target_family = "wasm")]
fn main() {
	use shopping_list_rs::{
		app::{App, AppProps},
		config::Config,
	};

	console_error_panic_hook::set_once();
	wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

	let config = match Config::from_document() {
		Ok(config) => config,
		Err(err) => {
			log::error!(target: "app", "{err:?}; using defaults");
			Config::default()
		}
	};
	yew::Renderer::<App>::with_props(AppProps { config }).render();
}

#[cfg(not(target_family = "wasm"))]
fn main() {
	eprintln!("shopping-list runs in the browser; build it for wasm32-unknown-unknown");
}
