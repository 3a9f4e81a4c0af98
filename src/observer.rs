//! Anchor click interception.
//!
//! This module re-exports `reinhardt-link-observer`, which registers a
//! capture-phase and a bubble-phase `click` listener on a scope and turns
//! significant anchor clicks into navigation requests.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_links::observer::headless::{ClickInit, HeadlessDocument};
//! use reinhardt_links::observer::{ClickInterceptor, DefaultHandler};
//!
//! let document = HeadlessDocument::new();
//! let interceptor = ClickInterceptor::new(document.clone(), DefaultHandler);
//! interceptor.start().unwrap();
//! assert!(interceptor.is_active());
//! ```

pub use reinhardt_link_observer::*;
