use crate::{
	app::AppContext,
	view::{Notice, ViewModel},
};
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::*;

#[function_component]
pub fn Notices() -> Html {
	let model = use_store_value::<ViewModel>();
	html! {
		<div id="alert-container" class="position-fixed top-0 end-0 p-3" style="z-index: 1080;">
			{for model.notices.iter().map(|notice| html! {
				<NoticeAlert key={notice.id.to_string()} notice={notice.clone()} />
			})}
		</div>
	}
}

#[derive(Clone, PartialEq, Properties)]
pub struct NoticeAlertProps {
	pub notice: Notice,
}

/// Dismisses itself after the configured duration; unmounting first cancels the timer.
#[function_component]
pub fn NoticeAlert(props: &NoticeAlertProps) -> Html {
	let context = use_context::<AppContext>().unwrap();
	let (_, dispatch) = use_store::<ViewModel>();
	let millis = context.config.notice_duration.as_millis().min(u32::MAX as u128) as u32;
	use_effect_with(props.notice.id, {
		let dispatch = dispatch.clone();
		move |id| {
			let id = *id;
			let timeout = Timeout::new(millis, move || dispatch.reduce_mut(|model| model.dismiss(id)));
			move || drop(timeout)
		}
	});
	let onclick = {
		let id = props.notice.id;
		Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|model| model.dismiss(id)))
	};
	html! {
		<div class={classes!("alert", props.notice.level.alert_class(), "alert-dismissible", "fade", "show")} role="alert">
			{&props.notice.message}
			<button type="button" class="btn-close" aria-label="Close" {onclick} />
		</div>
	}
}
