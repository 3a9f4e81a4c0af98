//! Host navigation policy.
//!
//! The host application decides, per click, whether native navigation is
//! suppressed ([`NavigationHandler::should_suppress_native_navigation`]) and
//! performs the actual navigation ([`NavigationHandler::on_navigate`]),
//! usually by pushing onto its client-side router.
//!
//! # Example
//!
//! ```ignore
//! use reinhardt_link_observer::{ClickInterceptor, FnHandler};
//!
//! let handler = FnHandler::new(|request| {
//!     router.push(&request.location);
//! })
//! .suppress_when(|request| request.location.starts_with('/'));
//!
//! let interceptor = ClickInterceptor::for_document(handler)?;
//! interceptor.start()?;
//! ```

use std::fmt;
use std::rc::Rc;

use crate::dom::ClickEvent;

/// A qualifying click, handed to the host.
///
/// Only lives for the duration of the handler calls.
pub struct NavigationRequest<'a, E: ClickEvent> {
	/// Raw `href` attribute of the anchor, not resolved against the base URL.
	pub location: String,
	/// The click event that triggered the navigation.
	pub event: &'a E,
	/// The anchor the click resolved to.
	pub anchor_element: &'a E::Element,
}

impl<E> fmt::Debug for NavigationRequest<'_, E>
where
	E: ClickEvent,
	E::Element: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationRequest")
			.field("location", &self.location)
			.field("anchor_element", &self.anchor_element)
			.finish_non_exhaustive()
	}
}

/// Navigation policy supplied by the host application.
pub trait NavigationHandler<E: ClickEvent> {
	/// Decides whether native navigation is suppressed for this click.
	///
	/// Returning `false` leaves the click entirely to the browser:
	/// nothing is prevented and [`on_navigate`](Self::on_navigate) is not
	/// called. Defaults to always suppressing.
	fn should_suppress_native_navigation(&self, _request: &NavigationRequest<'_, E>) -> bool {
		true
	}

	/// Performs the navigation after native navigation was suppressed.
	fn on_navigate(&self, request: &NavigationRequest<'_, E>);
}

impl<E, H> NavigationHandler<E> for Rc<H>
where
	E: ClickEvent,
	H: NavigationHandler<E> + ?Sized,
{
	fn should_suppress_native_navigation(&self, request: &NavigationRequest<'_, E>) -> bool {
		(**self).should_suppress_native_navigation(request)
	}

	fn on_navigate(&self, request: &NavigationRequest<'_, E>) {
		(**self).on_navigate(request)
	}
}

/// Suppresses every qualifying click and does nothing with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

impl<E: ClickEvent> NavigationHandler<E> for DefaultHandler {
	fn on_navigate(&self, _request: &NavigationRequest<'_, E>) {}
}

type NavigateFn<E> = Rc<dyn Fn(&NavigationRequest<'_, E>)>;
type SuppressFn<E> = Rc<dyn Fn(&NavigationRequest<'_, E>) -> bool>;

/// Closure-backed [`NavigationHandler`].
pub struct FnHandler<E: ClickEvent> {
	navigate: NavigateFn<E>,
	suppress: Option<SuppressFn<E>>,
}

impl<E: ClickEvent> FnHandler<E> {
	/// Creates a handler that suppresses every qualifying click and calls
	/// `navigate` with it.
	pub fn new<F>(navigate: F) -> Self
	where
		F: Fn(&NavigationRequest<'_, E>) + 'static,
	{
		Self {
			navigate: Rc::new(navigate),
			suppress: None,
		}
	}

	/// Sets the suppression predicate.
	pub fn suppress_when<P>(mut self, predicate: P) -> Self
	where
		P: Fn(&NavigationRequest<'_, E>) -> bool + 'static,
	{
		self.suppress = Some(Rc::new(predicate));
		self
	}
}

impl<E: ClickEvent> Clone for FnHandler<E> {
	fn clone(&self) -> Self {
		Self {
			navigate: Rc::clone(&self.navigate),
			suppress: self.suppress.clone(),
		}
	}
}

impl<E: ClickEvent> fmt::Debug for FnHandler<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnHandler")
			.field("navigate", &"<fn>")
			.field("suppress", &self.suppress.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

impl<E: ClickEvent> NavigationHandler<E> for FnHandler<E> {
	fn should_suppress_native_navigation(&self, request: &NavigationRequest<'_, E>) -> bool {
		match &self.suppress {
			Some(predicate) => predicate(request),
			None => true,
		}
	}

	fn on_navigate(&self, request: &NavigationRequest<'_, E>) {
		(self.navigate)(request)
	}
}
