//! Headless DOM backend
//!
//! An in-memory implementation of the [`crate::dom`] traits for native
//! targets. It models just enough of the DOM to run the interceptor outside
//! a browser:
//!
//! - element trees with attributes, light-DOM children and shadow-root
//!   children (composed paths cross shadow roots);
//! - `contenteditable` state inherited from light-DOM ancestors only (a
//!   shadow tree does not inherit editability from its host);
//! - `getElementsByName`-style lookup over the document body;
//! - a listener table on the document with DOM dispatch rules: duplicate
//!   `(listener, phase)` registrations are ignored, listeners removed during
//!   dispatch do not run, `stop_propagation` during capture skips the bubble
//!   phase and `stop_immediate_propagation` skips the remaining listeners.
//!
//! Clicks are dispatched with [`HeadlessDocument::click`] or
//! [`HeadlessDocument::dispatch_click`], which return the event so callers
//! can inspect how it was handled.
//!
//! # Example
//!
//! ```
//! use reinhardt_link_observer::headless::HeadlessDocument;
//!
//! let document = HeadlessDocument::new();
//! let link = document.create_element("a");
//! link.set_attribute("href", "/users/");
//! document.body().append_child(&link);
//!
//! let event = document.click(&link);
//! assert_eq!(event.prevent_default_calls(), 0);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::dom::{ClickEvent, DomElement, EventPathNode, EventScope, Modifiers, Phase};
use crate::error::InterceptorError;

struct ElementData {
	tag: String,
	attributes: RefCell<Vec<(String, String)>>,
	parent: RefCell<Weak<ElementData>>,
	shadow_host: RefCell<Weak<ElementData>>,
	children: RefCell<Vec<HeadlessElement>>,
	shadow_children: RefCell<Vec<HeadlessElement>>,
	// Set on the body of a document; paths reaching it continue to the
	// document and the window.
	document_root: bool,
}

/// An element of a headless document.
///
/// Cloning shares the element, equality is identity.
#[derive(Clone)]
pub struct HeadlessElement {
	data: Rc<ElementData>,
}

impl HeadlessElement {
	/// Creates a detached element. Tag names are case-insensitive.
	pub fn new(tag: impl Into<String>) -> Self {
		Self::with_root_flag(tag.into(), false)
	}

	fn with_root_flag(tag: String, document_root: bool) -> Self {
		Self {
			data: Rc::new(ElementData {
				tag: tag.to_ascii_lowercase(),
				attributes: RefCell::new(Vec::new()),
				parent: RefCell::new(Weak::new()),
				shadow_host: RefCell::new(Weak::new()),
				children: RefCell::new(Vec::new()),
				shadow_children: RefCell::new(Vec::new()),
				document_root,
			}),
		}
	}

	fn from_data(data: Rc<ElementData>) -> Self {
		Self { data }
	}

	/// Returns the lowercase tag name.
	pub fn tag_name(&self) -> &str {
		&self.data.tag
	}

	/// Sets an attribute, replacing any previous value.
	pub fn set_attribute(&self, name: &str, value: &str) {
		let name = name.to_ascii_lowercase();
		let mut attributes = self.data.attributes.borrow_mut();
		match attributes.iter_mut().find(|(n, _)| *n == name) {
			Some((_, existing)) => *existing = value.to_string(),
			None => attributes.push((name, value.to_string())),
		}
	}

	/// Removes an attribute if present.
	pub fn remove_attribute(&self, name: &str) {
		let name = name.to_ascii_lowercase();
		self.data
			.attributes
			.borrow_mut()
			.retain(|(n, _)| *n != name);
	}

	/// Appends a light-DOM child, detaching it from its previous position.
	pub fn append_child(&self, child: &HeadlessElement) {
		child.detach();
		*child.data.parent.borrow_mut() = Rc::downgrade(&self.data);
		self.data.children.borrow_mut().push(child.clone());
	}

	/// Appends a child to this element's shadow root.
	///
	/// Shadow children are reachable through composed paths but not through
	/// document-level name lookups.
	pub fn append_shadow_child(&self, child: &HeadlessElement) {
		child.detach();
		*child.data.shadow_host.borrow_mut() = Rc::downgrade(&self.data);
		self.data.shadow_children.borrow_mut().push(child.clone());
	}

	/// Returns the light-DOM parent.
	pub fn parent_element(&self) -> Option<HeadlessElement> {
		self.data.parent.borrow().upgrade().map(Self::from_data)
	}

	/// Returns the host element if this element is a top-level shadow child.
	pub fn shadow_host(&self) -> Option<HeadlessElement> {
		self.data.shadow_host.borrow().upgrade().map(Self::from_data)
	}

	/// Returns the light-DOM children.
	pub fn children(&self) -> Vec<HeadlessElement> {
		self.data.children.borrow().clone()
	}

	fn detach(&self) {
		if let Some(parent) = self.parent_element() {
			parent
				.data
				.children
				.borrow_mut()
				.retain(|c| !Rc::ptr_eq(&c.data, &self.data));
		}
		if let Some(host) = self.shadow_host() {
			host.data
				.shadow_children
				.borrow_mut()
				.retain(|c| !Rc::ptr_eq(&c.data, &self.data));
		}
		*self.data.parent.borrow_mut() = Weak::new();
		*self.data.shadow_host.borrow_mut() = Weak::new();
	}

	/// Walks the light-DOM subtree rooted at this element, self included.
	fn for_each_descendant(&self, visit: &mut dyn FnMut(&HeadlessElement) -> bool) -> bool {
		if visit(self) {
			return true;
		}
		self.children()
			.iter()
			.any(|child| child.for_each_descendant(visit))
	}
}

impl PartialEq for HeadlessElement {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.data, &other.data)
	}
}

impl Eq for HeadlessElement {}

impl fmt::Debug for HeadlessElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut tag = f.debug_tuple("HeadlessElement");
		tag.field(&self.data.tag);
		for (name, value) in self.data.attributes.borrow().iter() {
			tag.field(&format_args!("{}={:?}", name, value));
		}
		tag.finish()
	}
}

impl DomElement for HeadlessElement {
	fn is_anchor(&self) -> bool {
		self.data.tag == "a"
	}

	fn get_attribute(&self, name: &str) -> Option<String> {
		let name = name.to_ascii_lowercase();
		self.data
			.attributes
			.borrow()
			.iter()
			.find(|(n, _)| *n == name)
			.map(|(_, v)| v.clone())
	}

	/// Walks light-DOM ancestors; the walk ends at a shadow root, so an
	/// editable host does not make its shadow children editable.
	fn is_content_editable(&self) -> bool {
		let mut current = Some(self.clone());
		while let Some(element) = current {
			if let Some(value) = element.get_attribute("contenteditable") {
				match value.to_ascii_lowercase().as_str() {
					"" | "true" | "plaintext-only" => return true,
					"false" => return false,
					// Invalid values inherit from the parent
					_ => {}
				}
			}
			current = element.parent_element();
		}
		false
	}
}

/// A node of a headless composed path.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessNode {
	/// An element.
	Element(HeadlessElement),
	/// The shadow root attached to the given host.
	ShadowRoot(HeadlessElement),
	/// The document.
	Document,
	/// The window.
	Window,
}

impl EventPathNode for HeadlessNode {
	type Element = HeadlessElement;

	fn as_element(&self) -> Option<HeadlessElement> {
		match self {
			Self::Element(element) => Some(element.clone()),
			_ => None,
		}
	}
}

/// Initialization values of a dispatched click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickInit {
	/// Whether the event is a `MouseEvent` (false for `new Event("click")`).
	pub mouse: bool,
	/// `MouseEvent.button`.
	pub button: i16,
	/// Held modifier keys.
	pub modifiers: Modifiers,
}

impl ClickInit {
	/// A plain left click.
	pub fn primary() -> Self {
		Self {
			mouse: true,
			button: 0,
			modifiers: Modifiers::NONE,
		}
	}

	/// A non-mouse `click` event, as created by `new Event("click")`.
	pub fn synthetic() -> Self {
		Self {
			mouse: false,
			..Self::primary()
		}
	}

	/// Sets the button.
	pub fn button(mut self, button: i16) -> Self {
		self.button = button;
		self
	}

	/// Sets all modifier keys at once.
	pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
		self.modifiers = modifiers;
		self
	}

	/// Holds Alt.
	pub fn alt(mut self) -> Self {
		self.modifiers.alt = true;
		self
	}

	/// Holds Ctrl.
	pub fn ctrl(mut self) -> Self {
		self.modifiers.ctrl = true;
		self
	}

	/// Holds Meta.
	pub fn meta(mut self) -> Self {
		self.modifiers.meta = true;
		self
	}

	/// Holds Shift.
	pub fn shift(mut self) -> Self {
		self.modifiers.shift = true;
		self
	}
}

impl Default for ClickInit {
	fn default() -> Self {
		Self::primary()
	}
}

/// A click event dispatched in a headless document.
///
/// Counts the calls made to each suppression method.
#[derive(Debug)]
pub struct HeadlessEvent {
	target: HeadlessElement,
	init: ClickInit,
	default_prevented: Cell<bool>,
	propagation_stopped: Cell<bool>,
	immediate_propagation_stopped: Cell<bool>,
	prevent_default_calls: Cell<usize>,
	stop_propagation_calls: Cell<usize>,
	stop_immediate_propagation_calls: Cell<usize>,
}

impl HeadlessEvent {
	/// Creates an undispatched event targeting `target`.
	pub fn new(target: &HeadlessElement, init: ClickInit) -> Self {
		Self {
			target: target.clone(),
			init,
			default_prevented: Cell::new(false),
			propagation_stopped: Cell::new(false),
			immediate_propagation_stopped: Cell::new(false),
			prevent_default_calls: Cell::new(0),
			stop_propagation_calls: Cell::new(0),
			stop_immediate_propagation_calls: Cell::new(0),
		}
	}

	/// The element the event targets.
	pub fn target_element(&self) -> &HeadlessElement {
		&self.target
	}

	/// Whether propagation was stopped.
	pub fn propagation_stopped(&self) -> bool {
		self.propagation_stopped.get()
	}

	/// Whether immediate propagation was stopped.
	pub fn immediate_propagation_stopped(&self) -> bool {
		self.immediate_propagation_stopped.get()
	}

	/// Number of `prevent_default` calls.
	pub fn prevent_default_calls(&self) -> usize {
		self.prevent_default_calls.get()
	}

	/// Number of `stop_propagation` calls.
	pub fn stop_propagation_calls(&self) -> usize {
		self.stop_propagation_calls.get()
	}

	/// Number of `stop_immediate_propagation` calls.
	pub fn stop_immediate_propagation_calls(&self) -> usize {
		self.stop_immediate_propagation_calls.get()
	}

	/// Whether native navigation would happen after dispatch.
	pub fn navigates_natively(&self) -> bool {
		!self.default_prevented.get()
	}
}

impl ClickEvent for HeadlessEvent {
	type Element = HeadlessElement;
	type Target = HeadlessNode;

	fn is_mouse_event(&self) -> bool {
		self.init.mouse
	}

	fn target(&self) -> Option<HeadlessNode> {
		Some(HeadlessNode::Element(self.target.clone()))
	}

	fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	fn button(&self) -> i16 {
		self.init.button
	}

	fn modifiers(&self) -> Modifiers {
		self.init.modifiers
	}

	fn composed_path(&self) -> Vec<HeadlessNode> {
		let mut path = Vec::new();
		let mut current = Some(self.target.clone());
		let mut connected = false;
		while let Some(element) = current {
			path.push(HeadlessNode::Element(element.clone()));
			connected = element.data.document_root;
			current = match element.parent_element() {
				Some(parent) => Some(parent),
				None => element.shadow_host().inspect(|host| {
					path.push(HeadlessNode::ShadowRoot(host.clone()));
				}),
			};
		}
		if connected {
			path.push(HeadlessNode::Document);
			path.push(HeadlessNode::Window);
		}
		path
	}

	fn prevent_default(&self) {
		self.prevent_default_calls
			.set(self.prevent_default_calls.get() + 1);
		self.default_prevented.set(true);
	}

	fn stop_propagation(&self) {
		self.stop_propagation_calls
			.set(self.stop_propagation_calls.get() + 1);
		self.propagation_stopped.set(true);
	}

	fn stop_immediate_propagation(&self) {
		self.stop_immediate_propagation_calls
			.set(self.stop_immediate_propagation_calls.get() + 1);
		self.propagation_stopped.set(true);
		self.immediate_propagation_stopped.set(true);
	}
}

/// A click listener registered on a [`HeadlessDocument`].
///
/// Clones share identity, like a JavaScript function reference.
#[derive(Clone)]
pub struct HeadlessListener {
	id: u64,
	callback: Rc<dyn Fn(&HeadlessEvent)>,
}

impl PartialEq for HeadlessListener {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl fmt::Debug for HeadlessListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HeadlessListener")
			.field("id", &self.id)
			.finish_non_exhaustive()
	}
}

struct Registration {
	listener: HeadlessListener,
	phase: Phase,
	removed: Rc<Cell<bool>>,
}

struct DocumentState {
	body: HeadlessElement,
	listeners: RefCell<Vec<Registration>>,
	next_listener_id: Cell<u64>,
}

/// An in-memory document acting as an [`EventScope`].
///
/// Cloning shares the document.
#[derive(Clone)]
pub struct HeadlessDocument {
	state: Rc<DocumentState>,
}

impl HeadlessDocument {
	/// Creates an empty document with a `<body>`.
	pub fn new() -> Self {
		Self {
			state: Rc::new(DocumentState {
				body: HeadlessElement::with_root_flag("body".to_string(), true),
				listeners: RefCell::new(Vec::new()),
				next_listener_id: Cell::new(0),
			}),
		}
	}

	/// Returns the `<body>` element.
	pub fn body(&self) -> HeadlessElement {
		self.state.body.clone()
	}

	/// Creates a detached element.
	pub fn create_element(&self, tag: &str) -> HeadlessElement {
		HeadlessElement::new(tag)
	}

	/// Returns the connected light-DOM elements whose `name` attribute equals `name`.
	pub fn get_elements_by_name(&self, name: &str) -> Vec<HeadlessElement> {
		let mut found = Vec::new();
		self.state.body.for_each_descendant(&mut |element| {
			if element.get_attribute("name").as_deref() == Some(name) {
				found.push(element.clone());
			}
			false
		});
		found
	}

	/// Dispatches a plain left click on `target`.
	pub fn click(&self, target: &HeadlessElement) -> HeadlessEvent {
		self.dispatch_click(target, ClickInit::primary())
	}

	/// Dispatches a click on `target` through the document listeners.
	///
	/// Capture listeners run first, then bubble listeners unless propagation
	/// was stopped. Each phase iterates over a snapshot of the listeners
	/// registered when the phase starts.
	pub fn dispatch_click(&self, target: &HeadlessElement, init: ClickInit) -> HeadlessEvent {
		let event = HeadlessEvent::new(target, init);
		self.invoke_listeners(Phase::Capture, &event);
		if !event.propagation_stopped() {
			self.invoke_listeners(Phase::Bubble, &event);
		}
		event
	}

	/// Returns the number of click listeners registered for `phase`.
	pub fn listener_count(&self, phase: Phase) -> usize {
		self.state
			.listeners
			.borrow()
			.iter()
			.filter(|r| r.phase == phase)
			.count()
	}

	fn invoke_listeners(&self, phase: Phase, event: &HeadlessEvent) {
		let snapshot: Vec<(HeadlessListener, Rc<Cell<bool>>)> = self
			.state
			.listeners
			.borrow()
			.iter()
			.filter(|r| r.phase == phase)
			.map(|r| (r.listener.clone(), Rc::clone(&r.removed)))
			.collect();

		for (listener, removed) in snapshot {
			if removed.get() {
				continue;
			}
			(listener.callback)(event);
			if event.immediate_propagation_stopped() {
				break;
			}
		}
	}
}

impl Default for HeadlessDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for HeadlessDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HeadlessDocument")
			.field("capture_listeners", &self.listener_count(Phase::Capture))
			.field("bubble_listeners", &self.listener_count(Phase::Bubble))
			.finish()
	}
}

impl EventScope for HeadlessDocument {
	type Event = HeadlessEvent;
	type Listener = HeadlessListener;

	fn create_listener<F>(&self, callback: F) -> HeadlessListener
	where
		F: Fn(&HeadlessEvent) + 'static,
	{
		let id = self.state.next_listener_id.get();
		self.state.next_listener_id.set(id + 1);
		HeadlessListener {
			id,
			callback: Rc::new(callback),
		}
	}

	fn add_click_listener(
		&self,
		listener: &HeadlessListener,
		phase: Phase,
	) -> Result<(), InterceptorError> {
		let mut listeners = self.state.listeners.borrow_mut();
		let registered = listeners
			.iter()
			.any(|r| r.phase == phase && r.listener == *listener);
		if !registered {
			listeners.push(Registration {
				listener: listener.clone(),
				phase,
				removed: Rc::new(Cell::new(false)),
			});
		}
		Ok(())
	}

	fn remove_click_listener(
		&self,
		listener: &HeadlessListener,
		phase: Phase,
	) -> Result<(), InterceptorError> {
		let mut listeners = self.state.listeners.borrow_mut();
		if let Some(index) = listeners
			.iter()
			.position(|r| r.phase == phase && r.listener == *listener)
		{
			let registration = listeners.remove(index);
			registration.removed.set(true);
		}
		Ok(())
	}

	fn has_iframe_named(&self, name: &str) -> bool {
		self.get_elements_by_name(name)
			.iter()
			.any(|element| element.tag_name() == "iframe")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn document() -> HeadlessDocument {
		HeadlessDocument::new()
	}

	fn counter(document: &HeadlessDocument) -> (HeadlessListener, Rc<Cell<usize>>) {
		let calls = Rc::new(Cell::new(0));
		let listener = document.create_listener({
			let calls = Rc::clone(&calls);
			move |_| calls.set(calls.get() + 1)
		});
		(listener, calls)
	}

	#[rstest]
	fn test_attributes_are_case_insensitive(document: HeadlessDocument) {
		let link = document.create_element("A");
		link.set_attribute("HREF", "/foo");
		assert!(link.is_anchor());
		assert_eq!(link.get_attribute("href").as_deref(), Some("/foo"));

		link.set_attribute("href", "/bar");
		assert_eq!(link.get_attribute("Href").as_deref(), Some("/bar"));

		link.remove_attribute("href");
		assert!(!link.has_attribute("href"));
	}

	#[rstest]
	fn test_append_child_moves_element(document: HeadlessDocument) {
		let first = document.create_element("div");
		let second = document.create_element("div");
		let child = document.create_element("span");

		first.append_child(&child);
		second.append_child(&child);

		assert!(first.children().is_empty());
		assert_eq!(second.children(), vec![child.clone()]);
		assert_eq!(child.parent_element(), Some(second));
	}

	#[rstest]
	#[case(Some("true"), true)]
	#[case(Some(""), true)]
	#[case(Some("plaintext-only"), true)]
	#[case(Some("false"), false)]
	#[case(Some("bogus"), false)]
	#[case(None, false)]
	fn test_content_editable_values(
		document: HeadlessDocument,
		#[case] value: Option<&str>,
		#[case] expected: bool,
	) {
		let element = document.create_element("div");
		if let Some(value) = value {
			element.set_attribute("contenteditable", value);
		}
		assert_eq!(element.is_content_editable(), expected);
	}

	#[rstest]
	fn test_content_editable_is_inherited(document: HeadlessDocument) {
		let editor = document.create_element("div");
		editor.set_attribute("contenteditable", "");
		let island = document.create_element("p");
		island.set_attribute("contenteditable", "false");
		let inside = document.create_element("span");
		let outside = document.create_element("span");
		editor.append_child(&island);
		editor.append_child(&inside);
		island.append_child(&outside);

		assert!(inside.is_content_editable());
		assert!(!outside.is_content_editable());
	}

	#[rstest]
	fn test_content_editable_stops_at_shadow_root(document: HeadlessDocument) {
		let host = document.create_element("div");
		host.set_attribute("contenteditable", "true");
		let shadow_child = document.create_element("span");
		host.append_shadow_child(&shadow_child);
		let editable_shadow_child = document.create_element("span");
		editable_shadow_child.set_attribute("contenteditable", "");
		host.append_shadow_child(&editable_shadow_child);

		assert!(host.is_content_editable());
		assert!(!shadow_child.is_content_editable());
		assert!(editable_shadow_child.is_content_editable());
	}

	#[rstest]
	fn test_composed_path_order(document: HeadlessDocument) {
		let nav = document.create_element("nav");
		let link = document.create_element("a");
		document.body().append_child(&nav);
		nav.append_child(&link);

		let path = HeadlessEvent::new(&link, ClickInit::primary()).composed_path();
		assert_eq!(
			path,
			vec![
				HeadlessNode::Element(link),
				HeadlessNode::Element(nav),
				HeadlessNode::Element(document.body()),
				HeadlessNode::Document,
				HeadlessNode::Window,
			]
		);
	}

	#[rstest]
	fn test_composed_path_crosses_shadow_root(document: HeadlessDocument) {
		let host = document.create_element("x-card");
		let inner = document.create_element("span");
		document.body().append_child(&host);
		host.append_shadow_child(&inner);

		let path = HeadlessEvent::new(&inner, ClickInit::primary()).composed_path();
		assert_eq!(path[0], HeadlessNode::Element(inner));
		assert_eq!(path[1], HeadlessNode::ShadowRoot(host.clone()));
		assert_eq!(path[2], HeadlessNode::Element(host));
		assert_eq!(path.last(), Some(&HeadlessNode::Window));
	}

	#[rstest]
	fn test_detached_path_stops_at_root(document: HeadlessDocument) {
		let orphan = document.create_element("a");
		let path = HeadlessEvent::new(&orphan, ClickInit::primary()).composed_path();
		assert_eq!(path, vec![HeadlessNode::Element(orphan)]);
	}

	#[rstest]
	fn test_elements_by_name_ignores_shadow_and_detached(document: HeadlessDocument) {
		let connected = document.create_element("iframe");
		connected.set_attribute("name", "frame");
		document.body().append_child(&connected);

		let host = document.create_element("div");
		document.body().append_child(&host);
		let shadowed = document.create_element("iframe");
		shadowed.set_attribute("name", "hidden");
		host.append_shadow_child(&shadowed);

		let detached = document.create_element("iframe");
		detached.set_attribute("name", "loose");

		assert_eq!(document.get_elements_by_name("frame"), vec![connected]);
		assert!(document.has_iframe_named("frame"));
		assert!(!document.has_iframe_named("hidden"));
		assert!(!document.has_iframe_named("loose"));
	}

	#[rstest]
	fn test_duplicate_listener_is_ignored(document: HeadlessDocument) {
		let (listener, calls) = counter(&document);
		document.add_click_listener(&listener, Phase::Bubble).unwrap();
		document.add_click_listener(&listener, Phase::Bubble).unwrap();
		document.add_click_listener(&listener, Phase::Capture).unwrap();

		assert_eq!(document.listener_count(Phase::Bubble), 1);
		assert_eq!(document.listener_count(Phase::Capture), 1);

		document.click(&document.body());
		assert_eq!(calls.get(), 2);
	}

	#[rstest]
	fn test_remove_unknown_listener_is_noop(document: HeadlessDocument) {
		let (listener, _) = counter(&document);
		document
			.remove_click_listener(&listener, Phase::Capture)
			.unwrap();
		assert_eq!(document.listener_count(Phase::Capture), 0);
	}

	#[rstest]
	fn test_capture_runs_before_bubble(document: HeadlessDocument) {
		let order = Rc::new(RefCell::new(Vec::new()));
		let bubble = document.create_listener({
			let order = Rc::clone(&order);
			move |_| order.borrow_mut().push("bubble")
		});
		let capture = document.create_listener({
			let order = Rc::clone(&order);
			move |_| order.borrow_mut().push("capture")
		});
		document.add_click_listener(&bubble, Phase::Bubble).unwrap();
		document.add_click_listener(&capture, Phase::Capture).unwrap();

		document.click(&document.body());
		assert_eq!(*order.borrow(), vec!["capture", "bubble"]);
	}

	#[rstest]
	fn test_stop_propagation_in_capture_skips_bubble(document: HeadlessDocument) {
		let stopper = document.create_listener(|event: &HeadlessEvent| event.stop_propagation());
		let (bubble, calls) = counter(&document);
		document.add_click_listener(&stopper, Phase::Capture).unwrap();
		document.add_click_listener(&bubble, Phase::Bubble).unwrap();

		let event = document.click(&document.body());
		assert!(event.propagation_stopped());
		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_stop_immediate_propagation_skips_remaining(document: HeadlessDocument) {
		let stopper =
			document.create_listener(|event: &HeadlessEvent| event.stop_immediate_propagation());
		let (after, calls) = counter(&document);
		document.add_click_listener(&stopper, Phase::Bubble).unwrap();
		document.add_click_listener(&after, Phase::Bubble).unwrap();

		document.click(&document.body());
		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_listener_removed_during_dispatch_does_not_run(document: HeadlessDocument) {
		let (victim, calls) = counter(&document);
		let remover = document.create_listener({
			let document = document.clone();
			let victim = victim.clone();
			move |_| {
				document
					.remove_click_listener(&victim, Phase::Bubble)
					.unwrap()
			}
		});
		document.add_click_listener(&remover, Phase::Bubble).unwrap();
		document.add_click_listener(&victim, Phase::Bubble).unwrap();

		document.click(&document.body());
		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_bubble_listener_added_during_capture_runs(document: HeadlessDocument) {
		let (bubble, calls) = counter(&document);
		let installer = document.create_listener({
			let document = document.clone();
			move |_| document.add_click_listener(&bubble, Phase::Bubble).unwrap()
		});
		document.add_click_listener(&installer, Phase::Capture).unwrap();

		document.click(&document.body());
		assert_eq!(calls.get(), 1);
	}

	#[test]
	fn test_event_counters() {
		let target = HeadlessElement::new("a");
		let event = HeadlessEvent::new(&target, ClickInit::primary());
		assert!(event.navigates_natively());

		event.prevent_default();
		event.stop_propagation();
		event.stop_immediate_propagation();

		assert!(!event.navigates_natively());
		assert_eq!(event.prevent_default_calls(), 1);
		assert_eq!(event.stop_propagation_calls(), 1);
		assert_eq!(event.stop_immediate_propagation_calls(), 1);
		assert_eq!(event.target_element(), &target);
	}

	#[test]
	fn test_click_init_builders() {
		let init = ClickInit::primary().button(1).alt().shift();
		assert!(init.mouse);
		assert_eq!(init.button, 1);
		assert!(init.modifiers.alt && init.modifiers.shift);
		assert!(!init.modifiers.ctrl && !init.modifiers.meta);
		assert!(!ClickInit::synthetic().mouse);
		assert_eq!(ClickInit::default(), ClickInit::primary());
	}
}
