//! Error types for the link observer.

use crate::dom::Phase;

/// Errors raised while wiring an interceptor into its event scope.
///
/// Click handling itself never fails: clicks that do not qualify are left to
/// the browser, and panics raised by the host handler propagate untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterceptorError {
	/// There is no global `window` (e.g. running inside a worker)
	#[error("no global `window` object is available")]
	NoWindow,

	/// The window has no document attached
	#[error("the window has no document")]
	NoDocument,

	/// The platform refused to register a click listener
	#[error("failed to attach {phase} click listener: {reason}")]
	AttachListener {
		/// Phase the listener was registered for
		phase: Phase,
		/// Platform-provided failure description
		reason: String,
	},

	/// The platform refused to remove a click listener
	#[error("failed to detach {phase} click listener: {reason}")]
	DetachListener {
		/// Phase the listener was registered for
		phase: Phase,
		/// Platform-provided failure description
		reason: String,
	},
}
