//! Domain primitives, the relay use case, and its ports.
//!
//! Public surface:
//! - [`Handle`] / [`is_valid_handle`]: the handle syntax rule.
//! - [`AccountId`]: the identifier returned to callers.
//! - [`HandleResolver`]: the relay use case.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation.

pub mod account;
pub mod error;
pub mod handle;
pub mod handle_resolver;
pub mod ports;
pub mod trace_id;

pub use self::account::AccountId;
pub use self::error::{Error, ErrorCode};
pub use self::handle::{HANDLE_MAX, HANDLE_MIN, Handle, HandleValidationError, is_valid_handle};
pub use self::handle_resolver::HandleResolver;
pub use self::trace_id::TraceId;
