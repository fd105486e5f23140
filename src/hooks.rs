use std::{future::Future, rc::Rc};
use yew::prelude::*;

/// A user action that runs in the background; `pending` stays set until it settles
/// so the triggering button can be disabled.
pub struct ActionHandle<A> {
	pending: UseStateHandle<bool>,
	run: Rc<dyn Fn(A)>,
}
impl<A> ActionHandle<A> {
	pub fn run(&self, arg: A) {
		(*self.run)(arg);
	}

	pub fn is_pending(&self) -> bool {
		*self.pending
	}
}
impl<A> Clone for ActionHandle<A> {
	fn clone(&self) -> Self {
		Self {
			pending: self.pending.clone(),
			run: self.run.clone(),
		}
	}
}

#[hook]
pub fn use_action<A, F, Fut>(target: &'static str, make_future: F) -> ActionHandle<A>
where
	A: 'static,
	F: Fn(A) -> Fut + 'static,
	Fut: Future<Output = Result<(), crate::error::Error>> + 'static,
{
	let pending = use_state_eq(|| false);
	let make_future = Rc::new(make_future);
	let run = {
		let pending = pending.clone();
		Rc::new(move |arg: A| {
			if *pending {
				return;
			}
			pending.set(true);
			let pending = pending.clone();
			let future = make_future(arg);
			crate::util::spawn_local(target, async move {
				let result = future.await;
				pending.set(false);
				result
			});
		})
	};
	ActionHandle { pending, run }
}
