//! Attribute names produced by the detectors in this crate.
//!
//! The names follow the widely shared dot-separated semantic conventions so
//! that resources detected here line up with what backends expect.

/// Logical name of the service producing telemetry.
///
/// [`SdkProvidedResourceDetector`](crate::SdkProvidedResourceDetector)
/// guarantees this attribute, falling back to `unknown_service`.
pub const SERVICE_NAME: &str = "service.name";

/// Name of the SDK emitting telemetry.
pub const TELEMETRY_SDK_NAME: &str = "telemetry.sdk.name";

/// Language of the SDK emitting telemetry.
pub const TELEMETRY_SDK_LANGUAGE: &str = "telemetry.sdk.language";

/// Version of the SDK emitting telemetry.
pub const TELEMETRY_SDK_VERSION: &str = "telemetry.sdk.version";

/// Name of the host the process runs on.
pub const HOST_NAME: &str = "host.name";

/// Operating system type, e.g. `linux` or `windows`.
pub const OS_TYPE: &str = "os.type";

/// Identifier of the running process.
pub const PROCESS_PID: &str = "process.pid";

/// File name of the process executable.
pub const PROCESS_EXECUTABLE_NAME: &str = "process.executable.name";

/// Name of the compiler that produced the process executable.
pub const PROCESS_RUNTIME_NAME: &str = "process.runtime.name";

/// Version of the compiler that produced the process executable.
pub const PROCESS_RUNTIME_VERSION: &str = "process.runtime.version";
