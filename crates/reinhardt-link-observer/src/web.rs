//! Browser backend (wasm32 only)
//!
//! Implements the [`crate::dom`] traits on top of `web-sys`:
//!
//! - [`WebScope`] wraps the observed `EventTarget` and its owning `Document`;
//! - `web_sys::Event` is the click event;
//! - `web_sys::EventTarget` / `web_sys::Element` are the composed-path nodes.
//!
//! # Example
//!
//! ```ignore
//! use reinhardt_link_observer::web::WebClickInterceptor;
//! use reinhardt_link_observer::FnHandler;
//!
//! let interceptor = WebClickInterceptor::for_document(FnHandler::new(|request| {
//!     router.push(&request.location);
//! }))?;
//! interceptor.start()?;
//! // Keep `interceptor` alive for as long as links should be intercepted:
//! // dropping it detaches the listeners.
//! ```

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlElement, HtmlIFrameElement,
	MouseEvent,
};

use crate::dom::{
	ClickEvent, DocumentScope, DomElement, EventPathNode, EventScope, Modifiers, Phase,
};
use crate::error::InterceptorError;
use crate::interceptor::ClickInterceptor;

/// A [`ClickInterceptor`] running in the browser.
pub type WebClickInterceptor<H> = ClickInterceptor<WebScope, H>;

/// An `EventTarget` observed for clicks, with the document used for iframe
/// name lookups.
#[derive(Debug, Clone)]
pub struct WebScope {
	target: EventTarget,
	document: Document,
}

impl WebScope {
	/// Observes `target`, resolving names against the current document.
	pub fn new(target: EventTarget) -> Result<Self, InterceptorError> {
		Ok(Self::with_document(target, current_document()?))
	}

	/// Observes `target`, resolving names against `document`.
	pub fn with_document(target: EventTarget, document: Document) -> Self {
		Self { target, document }
	}

	/// The observed target.
	pub fn target(&self) -> &EventTarget {
		&self.target
	}

	/// The document used for iframe name lookups.
	pub fn document(&self) -> &Document {
		&self.document
	}
}

fn current_document() -> Result<Document, InterceptorError> {
	web_sys::window()
		.ok_or(InterceptorError::NoWindow)?
		.document()
		.ok_or(InterceptorError::NoDocument)
}

fn describe_js_error(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl EventScope for WebScope {
	type Event = Event;
	type Listener = Closure<dyn Fn(Event)>;

	fn create_listener<F>(&self, callback: F) -> Self::Listener
	where
		F: Fn(&Event) + 'static,
	{
		Closure::wrap(Box::new(move |event: Event| callback(&event)) as Box<dyn Fn(Event)>)
	}

	fn add_click_listener(
		&self,
		listener: &Self::Listener,
		phase: Phase,
	) -> Result<(), InterceptorError> {
		self.target
			.add_event_listener_with_callback_and_bool(
				"click",
				listener.as_ref().unchecked_ref(),
				phase.is_capture(),
			)
			.map_err(|err| InterceptorError::AttachListener {
				phase,
				reason: describe_js_error(&err),
			})
	}

	fn remove_click_listener(
		&self,
		listener: &Self::Listener,
		phase: Phase,
	) -> Result<(), InterceptorError> {
		self.target
			.remove_event_listener_with_callback_and_bool(
				"click",
				listener.as_ref().unchecked_ref(),
				phase.is_capture(),
			)
			.map_err(|err| InterceptorError::DetachListener {
				phase,
				reason: describe_js_error(&err),
			})
	}

	fn has_iframe_named(&self, name: &str) -> bool {
		let nodes = self.document.get_elements_by_name(name);
		(0..nodes.length())
			.filter_map(|index| nodes.item(index))
			.any(|node| node.is_instance_of::<HtmlIFrameElement>())
	}
}

impl DocumentScope for WebScope {
	fn current_document() -> Result<Self, InterceptorError> {
		let document = current_document()?;
		let target: EventTarget = document.clone().into();
		Ok(Self::with_document(target, document))
	}
}

impl ClickEvent for Event {
	type Element = Element;
	type Target = EventTarget;

	fn is_mouse_event(&self) -> bool {
		self.is_instance_of::<MouseEvent>()
	}

	fn target(&self) -> Option<EventTarget> {
		Event::target(self)
	}

	fn default_prevented(&self) -> bool {
		Event::default_prevented(self)
	}

	fn button(&self) -> i16 {
		self.dyn_ref::<MouseEvent>().map_or(0, MouseEvent::button)
	}

	fn modifiers(&self) -> Modifiers {
		match self.dyn_ref::<MouseEvent>() {
			Some(mouse) => Modifiers {
				alt: mouse.alt_key(),
				ctrl: mouse.ctrl_key(),
				meta: mouse.meta_key(),
				shift: mouse.shift_key(),
			},
			None => Modifiers::NONE,
		}
	}

	fn composed_path(&self) -> Vec<EventTarget> {
		let path: Array = Event::composed_path(self);
		path.iter()
			.filter_map(|node| node.dyn_into::<EventTarget>().ok())
			.collect()
	}

	fn prevent_default(&self) {
		Event::prevent_default(self)
	}

	fn stop_propagation(&self) {
		Event::stop_propagation(self)
	}

	fn stop_immediate_propagation(&self) {
		Event::stop_immediate_propagation(self)
	}
}

impl EventPathNode for EventTarget {
	type Element = Element;

	fn as_element(&self) -> Option<Element> {
		self.dyn_ref::<Element>().cloned()
	}
}

impl DomElement for Element {
	fn is_anchor(&self) -> bool {
		self.is_instance_of::<HtmlAnchorElement>()
	}

	fn get_attribute(&self, name: &str) -> Option<String> {
		Element::get_attribute(self, name)
	}

	fn has_attribute(&self, name: &str) -> bool {
		Element::has_attribute(self, name)
	}

	fn is_content_editable(&self) -> bool {
		self.dyn_ref::<HtmlElement>()
			.is_some_and(HtmlElement::is_content_editable)
	}
}
