//! The click interceptor.
//!
//! [`ClickInterceptor`] listens for `click` events on a scope in two phases:
//!
//! 1. **Capture**: on every click, the bubble listener is removed from the
//!    scope and added again. Capture runs before any page listener can stop
//!    the event in the bubble phase, so the interceptor's bubble listener is
//!    always registered for the click in flight, and never more than once.
//! 2. **Bubble**: the click is classified, its anchor resolved, and, unless
//!    the host vetoes, native navigation is suppressed and the host's
//!    [`NavigationHandler::on_navigate`] is called.
//!
//! ```text
//! click ──▶ capture: remove(bubble) + add(bubble)
//!       ──▶ bubble:  significant? ─▶ anchor in path? ─▶ not an iframe target?
//!                    ─▶ handler.should_suppress_native_navigation?
//!                    ─▶ preventDefault / stopPropagation / stopImmediatePropagation
//!                    ─▶ handler.on_navigate
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::classify::{
	ClickOutcome, SkipReason, check_iframe_target, check_significant_click,
	find_anchor_from_path, location_for_anchor,
};
use crate::dom::{ClickEvent, DocumentScope, EventScope, Phase};
use crate::error::InterceptorError;
use crate::handler::{NavigationHandler, NavigationRequest};
use crate::{debug_log, info_log, warn_log};

struct Inner<S: EventScope, H> {
	scope: S,
	handler: H,
	active: Cell<bool>,
	capture_listener: S::Listener,
	bubble_listener: S::Listener,
}

/// Turns link clicks inside a scope into host navigation callbacks.
///
/// # Example
///
/// ```
/// use reinhardt_link_observer::headless::{HeadlessDocument, HeadlessEvent};
/// use reinhardt_link_observer::{ClickInterceptor, FnHandler, NavigationRequest};
///
/// let document = HeadlessDocument::new();
/// let link = document.create_element("a");
/// link.set_attribute("href", "/users/42/");
/// document.body().append_child(&link);
///
/// let interceptor = ClickInterceptor::new(
///     document.clone(),
///     FnHandler::new(|request: &NavigationRequest<'_, HeadlessEvent>| {
///         println!("navigate to {}", request.location)
///     }),
/// );
/// interceptor.start().unwrap();
///
/// let event = document.click(&link);
/// assert!(!event.navigates_natively());
/// ```
pub struct ClickInterceptor<S, H>
where
	S: EventScope,
	H: NavigationHandler<S::Event> + 'static,
{
	inner: Rc<Inner<S, H>>,
}

impl<S, H> ClickInterceptor<S, H>
where
	S: EventScope,
	H: NavigationHandler<S::Event> + 'static,
{
	/// Creates an inactive interceptor for `scope`.
	pub fn new(scope: S, handler: H) -> Self {
		let inner = Rc::new_cyclic(|weak: &Weak<Inner<S, H>>| {
			let capture_listener = scope.create_listener({
				let weak = weak.clone();
				move |_event: &S::Event| {
					if let Some(inner) = weak.upgrade() {
						inner.click_captured();
					}
				}
			});
			let bubble_listener = scope.create_listener({
				let weak = weak.clone();
				move |event: &S::Event| {
					if let Some(inner) = weak.upgrade() {
						inner.click_bubbled(event);
					}
				}
			});
			Inner {
				scope,
				handler,
				active: Cell::new(false),
				capture_listener,
				bubble_listener,
			}
		});
		Self { inner }
	}

	/// Starts listening for clicks. Calling it again while active does nothing.
	pub fn start(&self) -> Result<(), InterceptorError> {
		if self.inner.active.get() {
			return Ok(());
		}
		self.inner
			.scope
			.add_click_listener(&self.inner.capture_listener, Phase::Capture)?;
		self.inner.active.set(true);
		info_log!("link click interceptor started");
		Ok(())
	}

	/// Stops listening for clicks. Calling it while inactive does nothing.
	///
	/// Removes the capture listener and the bubble listener installed by the
	/// last click, if any. Once the capture listener is gone the interceptor
	/// is inactive, even if removing the bubble listener fails, so a later
	/// [`start`](Self::start) can attach it again.
	pub fn stop(&self) -> Result<(), InterceptorError> {
		if !self.inner.active.get() {
			return Ok(());
		}
		self.inner
			.scope
			.remove_click_listener(&self.inner.capture_listener, Phase::Capture)?;
		self.inner.active.set(false);
		self.inner
			.scope
			.remove_click_listener(&self.inner.bubble_listener, Phase::Bubble)?;
		info_log!("link click interceptor stopped");
		Ok(())
	}

	/// Whether the listeners are attached.
	pub fn is_active(&self) -> bool {
		self.inner.active.get()
	}

	/// The observed scope.
	pub fn scope(&self) -> &S {
		&self.inner.scope
	}

	/// The host navigation handler.
	pub fn handler(&self) -> &H {
		&self.inner.handler
	}

	/// Runs the bubble-phase logic on `event` directly, bypassing listeners.
	///
	/// Used by hosts that dispatch clicks themselves.
	pub fn process_click(&self, event: &S::Event) -> ClickOutcome {
		self.inner.process_click(event)
	}
}

impl<S, H> ClickInterceptor<S, H>
where
	S: DocumentScope,
	H: NavigationHandler<S::Event> + 'static,
{
	/// Creates an inactive interceptor observing the current document.
	pub fn for_document(handler: H) -> Result<Self, InterceptorError> {
		Ok(Self::new(S::current_document()?, handler))
	}
}

impl<S, H> Drop for ClickInterceptor<S, H>
where
	S: EventScope,
	H: NavigationHandler<S::Event> + 'static,
{
	fn drop(&mut self) {
		if let Err(err) = self.stop() {
			warn_log!("failed to detach link click interceptor: {}", err);
		}
	}
}

impl<S, H> fmt::Debug for ClickInterceptor<S, H>
where
	S: EventScope + fmt::Debug,
	H: NavigationHandler<S::Event> + fmt::Debug + 'static,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClickInterceptor")
			.field("scope", &self.inner.scope)
			.field("handler", &self.inner.handler)
			.field("active", &self.inner.active.get())
			.finish()
	}
}

impl<S, H> Inner<S, H>
where
	S: EventScope,
	H: NavigationHandler<S::Event>,
{
	fn click_captured(&self) {
		let reinstalled = self
			.scope
			.remove_click_listener(&self.bubble_listener, Phase::Bubble)
			.and_then(|()| {
				self.scope
					.add_click_listener(&self.bubble_listener, Phase::Bubble)
			});
		if let Err(err) = reinstalled {
			warn_log!("link click interceptor: {}", err);
		}
	}

	fn click_bubbled(&self, event: &S::Event) {
		// A bubble listener left behind by a failed stop() must stay inert
		if !self.active.get() {
			return;
		}
		match self.process_click(event) {
			ClickOutcome::Intercepted => debug_log!("link click intercepted"),
			ClickOutcome::Ignored(reason) => debug_log!("link click ignored: {}", reason),
		}
	}

	fn process_click(&self, event: &S::Event) -> ClickOutcome {
		match self.intercept(event) {
			Ok(()) => ClickOutcome::Intercepted,
			Err(reason) => ClickOutcome::Ignored(reason),
		}
	}

	fn intercept(&self, event: &S::Event) -> Result<(), SkipReason> {
		check_significant_click(event)?;

		let path = event.composed_path();
		let anchor = find_anchor_from_path(&path).ok_or(SkipReason::NoAnchor)?;
		check_iframe_target(&self.scope, &anchor)?;

		let request = NavigationRequest {
			location: location_for_anchor(&anchor),
			event,
			anchor_element: &anchor,
		};
		if !self.handler.should_suppress_native_navigation(&request) {
			return Err(SkipReason::Vetoed);
		}

		event.prevent_default();
		event.stop_propagation();
		event.stop_immediate_propagation();

		self.handler.on_navigate(&request);
		Ok(())
	}
}
