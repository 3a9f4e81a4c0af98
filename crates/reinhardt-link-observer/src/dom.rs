//! DOM abstraction layer
//!
//! The interceptor never talks to `web-sys` directly. It is written against
//! the traits in this module, which are implemented by the browser backend
//! ([`crate::web`], wasm32 only) and by the in-memory [`crate::headless`]
//! backend used on native targets.
//!
//! The surface is deliberately small: it covers exactly what click
//! interception needs from the platform.

use std::fmt;

use crate::error::InterceptorError;

/// Event listener phase.
///
/// Mirrors the `capture` flag of `addEventListener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
	/// `capture: true`, runs while the event travels from the root to the target
	Capture,
	/// `capture: false`, runs while the event travels back to the root
	Bubble,
}

impl Phase {
	/// Returns the `capture` flag passed to `addEventListener`.
	pub fn is_capture(self) -> bool {
		matches!(self, Self::Capture)
	}
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Capture => f.write_str("capture"),
			Self::Bubble => f.write_str("bubble"),
		}
	}
}

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Alt / Option
	pub alt: bool,
	/// Control
	pub ctrl: bool,
	/// Meta / Command / Windows
	pub meta: bool,
	/// Shift
	pub shift: bool,
}

impl Modifiers {
	/// No modifier held.
	pub const NONE: Self = Self {
		alt: false,
		ctrl: false,
		meta: false,
		shift: false,
	};

	/// Returns true if at least one modifier key is held.
	pub fn any(self) -> bool {
		self.alt || self.ctrl || self.meta || self.shift
	}
}

/// An element as seen by the anchor resolver.
pub trait DomElement: Clone {
	/// Returns true for HTML anchor (`<a>`) elements.
	fn is_anchor(&self) -> bool;

	/// Returns the raw value of an attribute.
	fn get_attribute(&self, name: &str) -> Option<String>;

	/// Returns true if the attribute is present, whatever its value.
	fn has_attribute(&self, name: &str) -> bool {
		self.get_attribute(name).is_some()
	}

	/// Returns the computed `isContentEditable` state.
	fn is_content_editable(&self) -> bool;
}

/// One entry of an event's composed path.
///
/// Paths contain non-element targets too (shadow roots, the document, the
/// window), which is why the conversion is fallible.
pub trait EventPathNode {
	/// Element type this node may be.
	type Element: DomElement;

	/// Returns the node as an element, if it is one.
	fn as_element(&self) -> Option<Self::Element>;
}

/// A `click` event delivered to a listener.
pub trait ClickEvent {
	/// Element type found in the event path.
	type Element: DomElement;
	/// Node type of the composed path.
	type Target: EventPathNode<Element = Self::Element>;

	/// Returns true if the event is a `MouseEvent` (pointer click), as opposed
	/// to a plain synthetic `Event`.
	fn is_mouse_event(&self) -> bool;

	/// The element the event was dispatched to.
	fn target(&self) -> Option<Self::Target>;

	/// Whether some listener already called `preventDefault`.
	fn default_prevented(&self) -> bool;

	/// The `MouseEvent.button` value, `0` being the primary button.
	fn button(&self) -> i16;

	/// Modifier keys held during the click.
	fn modifiers(&self) -> Modifiers;

	/// The composed path, innermost target first, crossing shadow roots.
	fn composed_path(&self) -> Vec<Self::Target>;

	/// Cancels the native action (following the link).
	fn prevent_default(&self);

	/// Stops propagation to further nodes.
	fn stop_propagation(&self);

	/// Stops propagation and skips the remaining listeners of the current node.
	fn stop_immediate_propagation(&self);
}

/// An event target that click listeners can be attached to.
///
/// Scopes are cheap handles (`Clone` shares the underlying target).
/// Listener identity follows DOM rules: adding the same listener twice for
/// the same phase is a no-op, and removing an unknown listener does nothing.
pub trait EventScope: Clone + 'static {
	/// Events delivered to listeners on this scope.
	type Event: ClickEvent;
	/// Platform handle of a registered callback.
	type Listener: 'static;

	/// Wraps a callback into a listener handle that can be added and removed.
	fn create_listener<F>(&self, callback: F) -> Self::Listener
	where
		F: Fn(&Self::Event) + 'static;

	/// Registers `listener` for `click` events in `phase`.
	fn add_click_listener(
		&self,
		listener: &Self::Listener,
		phase: Phase,
	) -> Result<(), InterceptorError>;

	/// Unregisters `listener` for `click` events in `phase`.
	fn remove_click_listener(
		&self,
		listener: &Self::Listener,
		phase: Phase,
	) -> Result<(), InterceptorError>;

	/// Returns true if the owning document has an `<iframe>` whose `name`
	/// attribute equals `name`.
	fn has_iframe_named(&self, name: &str) -> bool;
}

/// A scope that can be obtained without a handle: the current document.
pub trait DocumentScope: EventScope {
	/// Returns the scope for the current document.
	fn current_document() -> Result<Self, InterceptorError>;
}
