//! Click classification and anchor resolution.
//!
//! These are pure functions over the [`crate::dom`] traits. The interceptor
//! runs them in order: [`check_significant_click`], then
//! [`find_anchor_from_path`], then [`check_iframe_target`].

use std::fmt;

use crate::dom::{ClickEvent, DomElement, EventPathNode, EventScope};

/// Anchor `target` values that request navigation outside the current
/// browsing context. Anchors using them are never intercepted.
pub const DISALLOWED_ANCHOR_TARGETS: [&str; 3] = ["_blank", "_top", "_parent"];

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// The event is not a `MouseEvent`.
	NotMouseEvent,
	/// The click landed on content-editable content.
	ContentEditable,
	/// Another listener already called `preventDefault`.
	DefaultPrevented,
	/// Middle, right or any other non-primary button.
	NonPrimaryButton,
	/// Alt, Ctrl, Meta or Shift was held.
	ModifierHeld,
	/// No interceptable anchor in the event path.
	NoAnchor,
	/// The anchor targets a named iframe.
	TargetsIframe,
	/// The host handler declined to suppress native navigation.
	Vetoed,
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let reason = match self {
			Self::NotMouseEvent => "not a mouse event",
			Self::ContentEditable => "target is content-editable",
			Self::DefaultPrevented => "default already prevented",
			Self::NonPrimaryButton => "non-primary button",
			Self::ModifierHeld => "modifier key held",
			Self::NoAnchor => "no interceptable anchor in path",
			Self::TargetsIframe => "anchor targets an iframe",
			Self::Vetoed => "vetoed by handler",
		};
		f.write_str(reason)
	}
}

/// Result of processing one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
	/// Native navigation was suppressed and the handler navigated.
	Intercepted,
	/// The click was left to the browser.
	Ignored(SkipReason),
}

impl ClickOutcome {
	/// Returns true if the click was intercepted.
	pub fn is_intercepted(self) -> bool {
		matches!(self, Self::Intercepted)
	}
}

/// Checks that a click is one the interceptor may take over.
///
/// A significant click is a primary-button, unmodified, not yet
/// default-prevented mouse click on a non-editable target.
pub fn check_significant_click<E: ClickEvent>(event: &E) -> Result<(), SkipReason> {
	if !event.is_mouse_event() {
		return Err(SkipReason::NotMouseEvent);
	}
	let editable = event
		.target()
		.and_then(|target| target.as_element())
		.is_some_and(|element| element.is_content_editable());
	if editable {
		return Err(SkipReason::ContentEditable);
	}
	if event.default_prevented() {
		return Err(SkipReason::DefaultPrevented);
	}
	if event.button() > 0 {
		return Err(SkipReason::NonPrimaryButton);
	}
	if event.modifiers().any() {
		return Err(SkipReason::ModifierHeld);
	}
	Ok(())
}

/// Returns true if `element` is an anchor the interceptor may handle.
///
/// Equivalent to the selector `a[href]:not([download])` with a `target`
/// outside [`DISALLOWED_ANCHOR_TARGETS`].
pub fn is_interceptable_anchor<T: DomElement>(element: &T) -> bool {
	if !element.is_anchor() || !element.has_attribute("href") {
		return false;
	}
	let target = element.get_attribute("target").unwrap_or_default();
	!DISALLOWED_ANCHOR_TARGETS.contains(&target.as_str()) && !element.has_attribute("download")
}

/// Finds the anchor a click should navigate to.
///
/// Scans `path` in order (innermost target first) and returns the first
/// element accepted by [`is_interceptable_anchor`]. Non-element nodes such as
/// shadow roots or the document are skipped.
pub fn find_anchor_from_path<N: EventPathNode>(path: &[N]) -> Option<N::Element> {
	path.iter()
		.filter_map(EventPathNode::as_element)
		.find(is_interceptable_anchor)
}

/// Rejects anchors whose `target` names an iframe of the scope's document.
///
/// Cross-frame navigation is left to the browser.
pub fn check_iframe_target<S, T>(scope: &S, anchor: &T) -> Result<(), SkipReason>
where
	S: EventScope,
	T: DomElement,
{
	match anchor.get_attribute("target") {
		Some(name) if !name.is_empty() && scope.has_iframe_named(&name) => {
			Err(SkipReason::TargetsIframe)
		}
		_ => Ok(()),
	}
}

/// Returns the navigation location of an anchor: its raw `href`, or an
/// empty string.
pub fn location_for_anchor<T: DomElement>(anchor: &T) -> String {
	anchor.get_attribute("href").unwrap_or_default()
}
