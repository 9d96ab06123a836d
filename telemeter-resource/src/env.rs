//! Environment variables resource detectors.
//!
//! Implementations of `ResourceDetector` that extract a `Resource` from
//! environment variables.

use std::env;
use std::time::Duration;

use telemeter::{Key, KeyValue, Value};

use crate::attributes::SERVICE_NAME;
use crate::detector::{DetectionError, ResourceDetector};
use crate::Resource;

const TELEMETER_RESOURCE_ATTRIBUTES: &str = "TELEMETER_RESOURCE_ATTRIBUTES";
const TELEMETER_SERVICE_NAME: &str = "TELEMETER_SERVICE_NAME";

/// Extracts a resource from the `TELEMETER_RESOURCE_ATTRIBUTES` environment
/// variable.
///
/// The variable holds comma-separated `key=value` entries, for example
/// `service.name=checkout,deployment.environment=staging`. Keys and values
/// are trimmed of surrounding whitespace and entries without a `=` are
/// skipped. All values are recorded as strings.
///
/// An unset or empty variable is a successful, contribution-free detection,
/// not an error.
#[derive(Debug)]
pub struct EnvResourceDetector {
    _private: (),
}

impl ResourceDetector for EnvResourceDetector {
    fn detect(&self, _timeout: Duration) -> Result<Resource, DetectionError> {
        match env::var(TELEMETER_RESOURCE_ATTRIBUTES) {
            Ok(s) if !s.is_empty() => Ok(construct_env_resource(s)),
            Ok(_) | Err(_) => Ok(Resource::empty()), // return empty resource
        }
    }
}

impl EnvResourceDetector {
    /// Create `EnvResourceDetector` instance.
    pub fn new() -> Self {
        EnvResourceDetector { _private: () }
    }
}

impl Default for EnvResourceDetector {
    fn default() -> Self {
        EnvResourceDetector::new()
    }
}

/// Extract key value pairs and construct a resource from resources string like
/// key1=value1,key2=value2,...
fn construct_env_resource(s: String) -> Resource {
    Resource::new(s.split_terminator(',').filter_map(|entry| {
        let (key, value) = entry.split_once('=')?;

        Some(KeyValue::new(
            key.trim().to_owned(),
            value.trim().to_owned(),
        ))
    }))
}

/// Guarantees the attributes the SDK promises to always provide, currently
/// just `service.name`.
///
/// This detector will first try the `TELEMETER_SERVICE_NAME` env variable.
/// If it's not available, it will check `TELEMETER_RESOURCE_ATTRIBUTES` for
/// a `service.name` entry. If that is also not available, it will use
/// `unknown_service`.
///
/// If users want to set an empty service name, they can provide a resource
/// with an empty value and `service.name` key.
#[derive(Debug)]
pub struct SdkProvidedResourceDetector;

impl ResourceDetector for SdkProvidedResourceDetector {
    fn detect(&self, timeout: Duration) -> Result<Resource, DetectionError> {
        let service_name = env::var(TELEMETER_SERVICE_NAME)
            .ok()
            .filter(|s| !s.is_empty())
            .map(Value::from)
            .or_else(|| {
                EnvResourceDetector::new()
                    .detect(timeout)
                    .ok()
                    .and_then(|resource| resource.get(&Key::from_static_str(SERVICE_NAME)))
            })
            .unwrap_or_else(|| "unknown_service".into());

        Ok(Resource::new([KeyValue::new(SERVICE_NAME, service_name)]))
    }
}
