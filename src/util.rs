use std::future::Future;

/// Runs a browser task, logging its error under `target` instead of dropping it.
pub fn spawn_local<F, E>(target: &'static str, future: F)
where
	F: Future<Output = Result<(), E>> + 'static,
	E: std::fmt::Display + 'static,
{
	wasm_bindgen_futures::spawn_local(async move {
		if let Err(err) = future.await {
			log::debug!(target: target, "{err}");
		}
	});
}

/// Current value of the input or select an event fired on.
pub fn event_value(event: &yew::Event) -> String {
	use wasm_bindgen::JsCast;
	let Some(target) = event.target() else {
		return String::new();
	};
	if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
		return input.value();
	}
	if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
		return select.value();
	}
	String::new()
}
