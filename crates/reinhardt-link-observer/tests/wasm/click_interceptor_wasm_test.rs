//! Browser tests for the `web-sys` backend.
//!
//! Run with:
//!   wasm-pack test --chrome --headless crates/reinhardt-link-observer
//!
//! Links that are expected to navigate natively point at fragments so that
//! the test page never leaves the document.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use reinhardt_link_observer::web::{WebClickInterceptor, WebScope};
use reinhardt_link_observer::{
	ClickEvent, EventPathNode, FnHandler, NavigationRequest, find_anchor_from_path,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, EventTarget, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

/// A fresh container appended to `<body>`, used as the interception scope.
fn container() -> Element {
	let document = document();
	let container = document.create_element("div").unwrap();
	document
		.body()
		.unwrap()
		.append_child(&container)
		.unwrap();
	container
}

fn anchor(parent: &Element, attrs: &[(&str, &str)]) -> Element {
	let link = document().create_element("a").unwrap();
	for (name, value) in attrs {
		link.set_attribute(name, value).unwrap();
	}
	parent.append_child(&link).unwrap();
	link
}

fn mouse_click(target: &Element, ctrl: bool) -> bool {
	let init = MouseEventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	init.set_composed(true);
	init.set_button(0);
	init.set_ctrl_key(ctrl);
	let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
	target.dispatch_event(&event).unwrap()
}

fn recording_interceptor(
	scope: &Element,
) -> (
	WebClickInterceptor<FnHandler<Event>>,
	Rc<RefCell<Vec<String>>>,
) {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let handler = FnHandler::new({
		let seen = Rc::clone(&seen);
		move |request: &NavigationRequest<'_, Event>| {
			seen.borrow_mut().push(request.location.clone())
		}
	});
	let target: EventTarget = scope.clone().into();
	let interceptor = WebClickInterceptor::new(WebScope::new(target).unwrap(), handler);
	(interceptor, seen)
}

#[wasm_bindgen_test]
fn test_plain_anchor_is_intercepted() {
	let scope = container();
	let link = anchor(&scope, &[("href", "/wasm/foo")]);
	let (interceptor, seen) = recording_interceptor(&scope);
	interceptor.start().unwrap();

	let not_canceled = mouse_click(&link, false);

	assert!(!not_canceled);
	assert_eq!(*seen.borrow(), vec!["/wasm/foo".to_string()]);
}

#[wasm_bindgen_test]
fn test_ctrl_click_is_left_alone() {
	let scope = container();
	let link = anchor(&scope, &[("href", "#ctrl")]);
	let (interceptor, seen) = recording_interceptor(&scope);
	interceptor.start().unwrap();

	let not_canceled = mouse_click(&link, true);

	assert!(not_canceled);
	assert!(seen.borrow().is_empty());
}

#[wasm_bindgen_test]
fn test_plain_event_is_left_alone() {
	let scope = container();
	let link = anchor(&scope, &[("href", "#synthetic")]);
	let (interceptor, seen) = recording_interceptor(&scope);
	interceptor.start().unwrap();

	let init = EventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = Event::new_with_event_init_dict("click", &init).unwrap();
	let not_canceled = link.dispatch_event(&event).unwrap();

	assert!(not_canceled);
	assert!(seen.borrow().is_empty());
}

#[wasm_bindgen_test]
fn test_iframe_target_is_left_alone() {
	let scope = container();
	let frame = document().create_element("iframe").unwrap();
	frame.set_attribute("name", "wasm-test-frame").unwrap();
	scope.append_child(&frame).unwrap();
	let link = anchor(
		&scope,
		&[("href", "about:blank"), ("target", "wasm-test-frame")],
	);
	let (interceptor, seen) = recording_interceptor(&scope);
	interceptor.start().unwrap();

	let not_canceled = mouse_click(&link, false);

	assert!(not_canceled);
	assert!(seen.borrow().is_empty());
}

#[wasm_bindgen_test]
fn test_repeated_clicks_and_idempotent_start() {
	let scope = container();
	let link = anchor(&scope, &[("href", "/wasm/again")]);
	let (interceptor, seen) = recording_interceptor(&scope);
	interceptor.start().unwrap();
	interceptor.start().unwrap();

	for _ in 0..5 {
		mouse_click(&link, false);
	}

	assert_eq!(seen.borrow().len(), 5);
}

#[wasm_bindgen_test]
fn test_stop_detaches() {
	let scope = container();
	let link = anchor(&scope, &[("href", "#stopped")]);
	let (interceptor, seen) = recording_interceptor(&scope);
	interceptor.start().unwrap();
	interceptor.stop().unwrap();
	interceptor.stop().unwrap();

	let not_canceled = mouse_click(&link, false);

	assert!(not_canceled);
	assert!(seen.borrow().is_empty());
	assert!(!interceptor.is_active());
}

#[wasm_bindgen_test]
fn test_find_anchor_from_path_with_real_elements() {
	let scope = container();
	let outer = anchor(&scope, &[("href", "/outer")]);
	let inner = anchor(&outer, &[("href", "/inner"), ("target", "_blank")]);
	let span = document().create_element("span").unwrap();
	inner.append_child(&span).unwrap();

	let path: Vec<EventTarget> = vec![
		span.unchecked_into(),
		inner.unchecked_into(),
		outer.clone().unchecked_into(),
		document().unchecked_into(),
	];

	assert_eq!(find_anchor_from_path(&path), Some(outer));
}

#[wasm_bindgen_test]
fn test_composed_path_is_innermost_first() {
	let scope = container();
	let link = anchor(&scope, &[("href", "#path")]);
	let span = document().create_element("span").unwrap();
	link.append_child(&span).unwrap();

	let seen = Rc::new(RefCell::new(Vec::<Element>::new()));
	let listener = wasm_bindgen::closure::Closure::wrap(Box::new({
		let seen = Rc::clone(&seen);
		move |event: Event| {
			let elements = ClickEvent::composed_path(&event)
				.iter()
				.filter_map(EventPathNode::as_element)
				.collect::<Vec<_>>();
			*seen.borrow_mut() = elements;
		}
	}) as Box<dyn Fn(Event)>);
	scope
		.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
		.unwrap();

	mouse_click(&span, false);

	let seen = seen.borrow();
	assert_eq!(seen.first(), Some(&span));
	assert_eq!(seen.get(1), Some(&link));
	assert_eq!(seen.get(2), Some(&scope));
}
