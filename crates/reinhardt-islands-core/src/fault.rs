//! Faults captured from component code and rendering collaborators.
//!
//! A [`Fault`] is the server-side record of "something threw": it keeps the
//! concrete kind of the failure so callers can branch on it, a human-readable
//! message, and a stack trace. Faults never carry the original error value,
//! which keeps them `Clone` and `Send` regardless of where they came from.
//!
//! ## Panics
//!
//! [`Fault::catch`] runs a closure and turns a panic into a fault whose stack
//! starts at the panic site. The first call installs a process-wide panic
//! hook. While a `catch` is active on a thread, panics on that thread are
//! recorded instead of being passed to the previously installed hook, so
//! nothing is printed to stderr; callers are expected to log the fault. A
//! hook installed after the first `catch` replaces this one, in which case
//! panics are printed by that hook and the stack falls back to the catch site.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Kind reported for panics captured at a render boundary.
pub const PANIC_KIND: &str = "Panic";

thread_local! {
	static CATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
	static PANIC_SITE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// A captured failure with its concrete kind, message, and stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
	kind: String,
	message: String,
	stack: String,
}

impl Fault {
	/// Creates a fault of an explicit kind, e.g. `"TypeError"`.
	pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
		Self::with_trace(kind.into(), message.into(), None)
	}

	/// Creates a fault from an error value, using the error's type name as kind.
	///
	/// Types named plain `Error` keep their owning module, so an
	/// `std::io::Error` reports `io::Error`.
	///
	/// ```
	/// use reinhardt_islands_core::Fault;
	///
	/// let err = "x".parse::<i32>().unwrap_err();
	/// let fault = Fault::from_error(&err);
	/// assert_eq!(fault.kind(), "ParseIntError");
	/// ```
	pub fn from_error<E>(error: &E) -> Self
	where
		E: std::error::Error + ?Sized + 'static,
	{
		Self::new(short_type_name::<E>(), error.to_string())
	}

	/// Creates a fault from a panic payload returned by `catch_unwind`.
	///
	/// The stack is captured here, not at the panic site. Prefer
	/// [`Fault::catch`] when the closure is under your control.
	pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
		Self::with_trace(PANIC_KIND.to_string(), panic_message(&*payload), None)
	}

	/// Runs `f`, converting a panic into a [`PANIC_KIND`] fault.
	///
	/// ```
	/// use reinhardt_islands_core::Fault;
	///
	/// let fault = Fault::catch(|| -> u8 { panic!("boom") }).unwrap_err();
	/// assert!(fault.is_panic());
	/// assert_eq!(fault.message(), "boom");
	/// assert_eq!(Fault::catch(|| 7).unwrap(), 7);
	/// ```
	pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, Self> {
		install_panic_hook();
		CATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
		let outcome = panic::catch_unwind(AssertUnwindSafe(f));
		CATCH_DEPTH.with(|depth| depth.set(depth.get() - 1));
		let site = PANIC_SITE.with(|site| site.borrow_mut().take());

		outcome.map_err(|payload| {
			Self::with_trace(PANIC_KIND.to_string(), panic_message(&*payload), site)
		})
	}

	fn with_trace(kind: String, message: String, trace: Option<String>) -> Self {
		let mut stack = format!("{}: {}", kind, message);
		if let Some(trace) = trace.or_else(capture_trace) {
			stack.push('\n');
			stack.push_str(&trace);
		}
		Self {
			kind,
			message,
			stack,
		}
	}

	/// The concrete kind of the failure.
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// The failure message.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// The stack trace. Never empty.
	pub fn stack(&self) -> &str {
		&self.stack
	}

	/// Returns `true` if this fault was captured from a panic.
	pub fn is_panic(&self) -> bool {
		self.kind == PANIC_KIND
	}
}

impl fmt::Display for Fault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.kind, self.message)
	}
}

impl std::error::Error for Fault {}

fn capture_trace() -> Option<String> {
	let backtrace = Backtrace::force_capture();
	(backtrace.status() == BacktraceStatus::Captured).then(|| backtrace.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"component panicked with a non-string payload".to_string()
	}
}

fn install_panic_hook() {
	PANIC_HOOK.call_once(|| {
		let previous = panic::take_hook();
		panic::set_hook(Box::new(move |info| {
			if CATCH_DEPTH.with(Cell::get) == 0 {
				previous(info);
				return;
			}
			let mut site = String::new();
			if let Some(location) = info.location() {
				site = format!("at {}:{}:{}", location.file(), location.line(), location.column());
			}
			if let Some(trace) = capture_trace() {
				if !site.is_empty() {
					site.push('\n');
				}
				site.push_str(&trace);
			}
			PANIC_SITE.with(|slot| *slot.borrow_mut() = (!site.is_empty()).then_some(site));
		}));
	});
}

/// Returns the last path segment of a type name, without generic arguments.
///
/// A bare `Error` is qualified with the nearest module that is not itself
/// named `error`.
fn short_type_name<T: ?Sized>() -> String {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	let base = base.trim_start_matches("dyn ");
	let mut segments = base.rsplit("::");
	let last = segments.next().unwrap_or(base);
	if last != "Error" {
		return last.to_string();
	}
	match segments.find(|segment| *segment != "error") {
		Some(owner) => format!("{}::{}", owner, last),
		None => last.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, thiserror::Error)]
	#[error("bad input")]
	struct TypeError;

	#[rstest]
	fn test_from_error_uses_short_type_name() {
		let fault = Fault::from_error(&TypeError);
		assert_eq!(fault.kind(), "TypeError");
		assert_eq!(fault.message(), "bad input");
	}

	#[rstest]
	fn test_stack_is_never_empty() {
		let fault = Fault::new("RangeError", "out of range");
		assert!(fault.stack().starts_with("RangeError: out of range"));
	}

	#[rstest]
	fn test_stack_has_frames_without_backtrace_env() {
		let fault = Fault::new("RangeError", "out of range");
		assert!(fault.stack().lines().count() > 1, "stack: {}", fault.stack());
	}

	#[rstest]
	fn test_catch_records_panic_site() {
		let fault = Fault::catch(|| -> u8 { panic!("boom at {}", 3) }).unwrap_err();

		assert!(fault.is_panic());
		assert_eq!(fault.message(), "boom at 3");
		assert!(fault.stack().starts_with("Panic: boom at 3\nat "));
		assert!(fault.stack().contains(file!()), "stack: {}", fault.stack());
	}

	#[rstest]
	fn test_catch_passes_values_through() {
		assert_eq!(Fault::catch(|| "ok").unwrap(), "ok");
	}

	#[rstest]
	fn test_nested_catch_reports_inner_panic() {
		let outer = Fault::catch(|| {
			let inner = Fault::catch(|| -> u8 { panic!("inner") }).unwrap_err();
			inner.message().to_string()
		});
		assert_eq!(outer.unwrap(), "inner");
	}

	#[rstest]
	#[case(Box::new("static message") as Box<dyn Any + Send>, "static message")]
	#[case(Box::new(String::from("owned message")) as Box<dyn Any + Send>, "owned message")]
	#[case(Box::new(42_u8) as Box<dyn Any + Send>, "component panicked with a non-string payload")]
	fn test_from_panic(#[case] payload: Box<dyn Any + Send>, #[case] expected: &str) {
		let fault = Fault::from_panic(payload);
		assert!(fault.is_panic());
		assert_eq!(fault.message(), expected);
	}

	mod codec {
		pub mod error {
			#[derive(Debug, thiserror::Error)]
			#[error("truncated frame")]
			pub struct Error;
		}
	}

	#[rstest]
	fn test_short_type_name_strips_generics() {
		assert_eq!(short_type_name::<Vec<String>>(), "Vec");
	}

	#[rstest]
	#[case(short_type_name::<std::io::Error>(), "io::Error")]
	#[case(short_type_name::<std::fmt::Error>(), "fmt::Error")]
	#[case(short_type_name::<codec::error::Error>(), "codec::Error")]
	fn test_bare_error_types_keep_their_module(#[case] name: String, #[case] expected: &str) {
		assert_eq!(name, expected);
	}

	#[rstest]
	fn test_from_error_never_reports_bare_error() {
		let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
		let fault = Fault::from_error(&err);
		assert_eq!(fault.kind(), "io::Error");

		let fault = Fault::from_error(&codec::error::Error);
		assert_eq!(fault.kind(), "codec::Error");
		assert_eq!(fault.message(), "truncated frame");
	}

	#[rstest]
	fn test_display() {
		let fault = Fault::new("TypeError", "x is undefined");
		assert_eq!(fault.to_string(), "TypeError: x is undefined");
	}
}
