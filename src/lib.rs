//! # Reinhardt Links
//!
//! Client-side link handling for Reinhardt single-page applications.
//!
//! Clicks on ordinary `<a href>` elements are handed to the application's
//! router instead of triggering a full page load. Clicks the browser treats
//! specially (modifier keys, middle button, `target="_blank"`, `download`,
//! iframe targets, content-editable regions) keep their native behavior.
//!
//! ## Feature Flags
//!
//! - `observer` (default) - Anchor click interception via [`observer`]
//! - `debug-hooks` - Per-click debug logging of interception decisions
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use reinhardt_links::prelude::*;
//!
//! let interceptor = WebClickInterceptor::for_document(
//!     FnHandler::new(|request: &NavigationRequest<'_, web_sys::Event>| {
//!         router.push(&request.location);
//!     }),
//! )?;
//! interceptor.start()?;
//! ```

#[cfg(feature = "observer")]
pub mod observer;

/// Commonly used items.
#[cfg(feature = "observer")]
pub mod prelude {
	pub use crate::observer::{
		ClickInterceptor, ClickOutcome, DefaultHandler, FnHandler, InterceptorError,
		NavigationHandler, NavigationRequest, SkipReason,
	};

	#[cfg(target_arch = "wasm32")]
	pub use crate::observer::{WebClickInterceptor, WebScope};
}
