//! Core attribute primitives shared by the telemeter crates.
//!
//! Telemetry is described by *attributes*: [`Key`]s paired with typed
//! [`Value`]s. This crate defines those primitives once so that every
//! telemeter crate speaks the same vocabulary.
//!
//! ```
//! use telemeter::{Key, KeyValue, Value};
//!
//! let kv = KeyValue::new("service.name", "checkout");
//! assert_eq!(kv.key, Key::new("service.name"));
//! assert_eq!(kv.value, Value::from("checkout"));
//!
//! // Keys can also stamp out typed pairs directly.
//! let pid = Key::new("process.pid").i64(42);
//! assert_eq!(pid.value, Value::I64(42));
//! ```
//!
//! The crate also hosts the internal logging macros ([`tele_debug!`] and
//! friends) used for self-diagnostics across the telemeter crates. They
//! emit [`tracing`] events when the `internal-logs` feature is enabled and
//! compile to nothing otherwise.
//!
//! [`tracing`]: https://crates.io/crates/tracing
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![cfg_attr(test, deny(warnings))]

mod common;
mod internal_logging;

pub use common::{Key, KeyValue, StringValue, Value};

#[doc(hidden)]
#[cfg(feature = "internal-logs")]
pub mod _private {
    pub use tracing::{debug, error, info, warn};
}
