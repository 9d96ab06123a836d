//! Detecting and describing the entity that produces telemetry.
//!
//! A [`Resource`] is an immutable set of attributes, such as
//! `service.name` or `host.name`, identifying the service, host and
//! process a piece of telemetry originates from. It is assembled once,
//! usually at startup, and then shared with everything that records
//! telemetry.
//!
//! # Resource detectors
//!
//! Attributes come from [`ResourceDetector`]s, independent probes of one
//! information source each. This crate ships:
//!
//! - [`SdkProvidedResourceDetector`], guarantees `service.name`
//! - [`TelemetryResourceDetector`], the identity of this SDK
//! - [`HostResourceDetector`], the name of the host
//! - [`EnvResourceDetector`], attributes from `TELEMETER_RESOURCE_ATTRIBUTES`
//! - [`OsResourceDetector`], the operating system type
//! - [`ProcessResourceDetector`], process id and runtime
//!
//! One-off detectors for a single string-valued attribute can be built
//! with [`StringDetector`] instead of a new type.
//!
//! # Aggregation
//!
//! Detection is best effort: a broken probe costs its attributes, never
//! the whole resource. [`Resource::builder`] runs the detectors, merges
//! their output with later detectors overriding earlier ones, and hands
//! back the assembled resource together with the errors of the detectors
//! that failed.
//!
//! ```
//! use telemeter::KeyValue;
//! use telemeter_resource::Resource;
//!
//! let (resource, errors) = Resource::builder()
//!     .with_service_name("inventory")
//!     .with_attribute(KeyValue::new("deployment.environment", "staging"))
//!     .build();
//!
//! for error in &errors {
//!     eprintln!("detector failed: {error}");
//! }
//! assert_eq!(resource.get(&"service.name".into()), Some("inventory".into()));
//! ```
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

pub mod attributes;

mod builder;
mod detector;
mod env;
mod host;
mod os;
mod process;
mod resource;
mod telemetry;

pub use builder::{ResourceBuilder, DEFAULT_DETECT_TIMEOUT};
pub use detector::{DetectionError, ResourceDetector, StringDetector};
pub use env::{EnvResourceDetector, SdkProvidedResourceDetector};
pub use host::HostResourceDetector;
pub use os::OsResourceDetector;
pub use process::ProcessResourceDetector;
pub use resource::{Iter, Resource};
pub use telemetry::TelemetryResourceDetector;
