//! Reinhardt Link Observer - client-side link click interception
//!
//! Turns clicks on `<a href>` elements into navigation callbacks so that a
//! single-page application can route them itself, while leaving every click
//! the browser treats specially to native navigation.
//!
//! ## What is intercepted
//!
//! A click is handed to the host when all of the following hold:
//!
//! - it is a primary-button mouse click with no Alt/Ctrl/Meta/Shift held;
//! - no other listener already called `preventDefault`;
//! - the target is not content-editable;
//! - the composed path (shadow roots included) contains an `<a href>` whose
//!   `target` is not `_blank`, `_top` or `_parent` and that has no
//!   `download` attribute;
//! - the anchor's `target` does not name an iframe;
//! - the host's [`NavigationHandler::should_suppress_native_navigation`]
//!   returns `true`.
//!
//! ## Architecture
//!
//! - [`dom`]: DOM abstraction traits the interceptor is written against
//! - [`classify`]: click classification and anchor resolution
//! - [`handler`]: host navigation policy
//! - [`interceptor`]: the two-phase [`ClickInterceptor`]
//! - [`headless`]: in-memory DOM backend for native targets and tests
//! - `web`: `web-sys` backend (wasm32 only)
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_link_observer::FnHandler;
//! use reinhardt_link_observer::web::WebClickInterceptor;
//!
//! let interceptor = WebClickInterceptor::for_document(
//!     FnHandler::new(|request| router.push(&request.location))
//!         .suppress_when(|request| request.location.starts_with('/')),
//! )?;
//! interceptor.start()?;
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod dom;
pub mod error;
pub mod handler;
pub mod headless;
pub mod interceptor;
pub mod logging;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use classify::{
	ClickOutcome, DISALLOWED_ANCHOR_TARGETS, SkipReason, find_anchor_from_path,
	is_interceptable_anchor,
};
pub use dom::{
	ClickEvent, DocumentScope, DomElement, EventPathNode, EventScope, Modifiers, Phase,
};
pub use error::InterceptorError;
pub use handler::{DefaultHandler, FnHandler, NavigationHandler, NavigationRequest};
pub use interceptor::ClickInterceptor;

#[cfg(target_arch = "wasm32")]
pub use web::{WebClickInterceptor, WebScope};

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
