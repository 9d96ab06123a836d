//! Fluent assembly of a [`Resource`] from detectors and explicit attributes.

use std::fmt;
use std::time::Duration;

use telemeter::{KeyValue, Value};

use crate::attributes::SERVICE_NAME;
use crate::detector::{DetectionError, ResourceDetector};
use crate::env::{EnvResourceDetector, SdkProvidedResourceDetector};
use crate::host::HostResourceDetector;
use crate::telemetry::TelemetryResourceDetector;
use crate::Resource;

/// Detection budget used when [`ResourceBuilder::with_timeout`] is not
/// called.
pub const DEFAULT_DETECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder to allow easy composition of a [`Resource`].
///
/// [`Resource::builder`] seeds the builder with the builtin detectors,
/// which run in this order:
///
/// 1. [`SdkProvidedResourceDetector`], guarantees `service.name`
/// 2. [`TelemetryResourceDetector`], the SDK identity
/// 3. [`HostResourceDetector`], the `host.name`
/// 4. [`EnvResourceDetector`], attributes from `TELEMETER_RESOURCE_ATTRIBUTES`
///
/// Later contributions override earlier ones on key conflicts, so custom
/// detectors added with [`with_detector`](ResourceBuilder::with_detector)
/// win against the builtins, and explicit attributes added with
/// [`with_attributes`](ResourceBuilder::with_attributes) win against every
/// detector. [`Resource::builder_empty`] starts without any detectors
/// instead.
///
/// # Examples
///
/// ```
/// use telemeter::KeyValue;
/// use telemeter_resource::Resource;
///
/// let (resource, _errors) = Resource::builder()
///     .with_service_name("checkout")
///     .with_attribute(KeyValue::new("deployment.environment", "staging"))
///     .build();
///
/// assert_eq!(resource.get(&"service.name".into()), Some("checkout".into()));
/// ```
pub struct ResourceBuilder {
    builtins: bool,
    telemetry_sdk: bool,
    host: bool,
    detectors: Vec<Box<dyn ResourceDetector>>,
    attributes: Vec<KeyValue>,
    timeout: Duration,
}

impl ResourceBuilder {
    pub(crate) fn with_builtins() -> Self {
        ResourceBuilder {
            builtins: true,
            telemetry_sdk: true,
            host: true,
            detectors: Vec::new(),
            attributes: Vec::new(),
            timeout: DEFAULT_DETECT_TIMEOUT,
        }
    }

    pub(crate) fn empty() -> Self {
        ResourceBuilder {
            builtins: false,
            ..ResourceBuilder::with_builtins()
        }
    }

    /// Removes the SDK identity detector from the builtin line-up.
    pub fn without_telemetry_sdk(mut self) -> Self {
        self.telemetry_sdk = false;
        self
    }

    /// Removes the host detector from the builtin line-up.
    pub fn without_host(mut self) -> Self {
        self.host = false;
        self
    }

    /// Adds a detector to the pipeline, after the builtin ones.
    ///
    /// Attributes it detects override those of the detectors before it.
    pub fn with_detector(mut self, detector: Box<dyn ResourceDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Adds detectors to the pipeline, after the builtin ones.
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn ResourceDetector>>) -> Self {
        self.detectors.extend(detectors);
        self
    }

    /// Adds a single attribute, merged in after all detectors have run.
    pub fn with_attribute(mut self, kv: KeyValue) -> Self {
        self.attributes.push(kv);
        self
    }

    /// Adds multiple attributes, merged in after all detectors have run.
    ///
    /// Explicit attributes win against every detector on key conflicts.
    pub fn with_attributes<T: IntoIterator<Item = KeyValue>>(mut self, attributes: T) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Shorthand for recording `service.name` as an explicit attribute.
    pub fn with_service_name(self, name: impl Into<Value>) -> Self {
        self.with_attribute(KeyValue::new(SERVICE_NAME, name.into()))
    }

    /// Overrides the detection budget used by
    /// [`build`](ResourceBuilder::build). The default is
    /// [`DEFAULT_DETECT_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the detectors and assembles the final [`Resource`].
    ///
    /// Detector failures do not abort the build, they are returned next to
    /// the resource assembled from whatever succeeded.
    pub fn build(self) -> (Resource, Vec<DetectionError>) {
        let mut detectors: Vec<Box<dyn ResourceDetector>> = Vec::new();
        if self.builtins {
            detectors.push(Box::new(SdkProvidedResourceDetector));
            if self.telemetry_sdk {
                detectors.push(Box::new(TelemetryResourceDetector));
            }
            if self.host {
                detectors.push(Box::new(HostResourceDetector::new()));
            }
            detectors.push(Box::new(EnvResourceDetector::new()));
        }
        detectors.extend(self.detectors);

        let (mut resource, errors) = Resource::from_detectors(self.timeout, &detectors);
        if !self.attributes.is_empty() {
            resource = resource.merge(&Resource::new(self.attributes));
        }
        (resource, errors)
    }
}

impl Default for ResourceBuilder {
    /// Equivalent to [`Resource::builder`].
    fn default() -> Self {
        ResourceBuilder::with_builtins()
    }
}

impl fmt::Debug for ResourceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBuilder")
            .field("builtins", &self.builtins)
            .field("telemetry_sdk", &self.telemetry_sdk)
            .field("host", &self.host)
            .field("detectors", &self.detectors.len())
            .field("attributes", &self.attributes)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use telemeter::KeyValue;

    use crate::attributes::{HOST_NAME, SERVICE_NAME, TELEMETRY_SDK_NAME};
    use crate::detector::{DetectionError, ResourceDetector};
    use crate::env::EnvResourceDetector;
    use crate::host::HostResourceDetector;
    use crate::Resource;

    #[test]
    fn test_detect_resource() {
        temp_env::with_vars(
            [
                (
                    "TELEMETER_RESOURCE_ATTRIBUTES",
                    Some("key=value, k = v , a= x, a=z"),
                ),
                ("IRRELEVANT", Some("20200810")),
            ],
            || {
                let (resource, errors) = Resource::builder_empty()
                    .with_detector(Box::new(EnvResourceDetector::new()))
                    .with_service_name("testing_service")
                    .with_attribute(KeyValue::new("test1", "test_value"))
                    .with_attributes([
                        KeyValue::new("test1", "test_value1"),
                        KeyValue::new("test2", "test_value2"),
                    ])
                    .build();

                assert!(errors.is_empty());
                assert_eq!(
                    resource,
                    Resource::new([
                        KeyValue::new("key", "value"),
                        KeyValue::new("k", "v"),
                        KeyValue::new("a", "x"),
                        KeyValue::new("a", "z"),
                        KeyValue::new(SERVICE_NAME, "testing_service"),
                        KeyValue::new("test1", "test_value1"),
                        KeyValue::new("test2", "test_value2"),
                    ])
                );
            },
        )
    }

    #[test]
    fn default_builder_runs_builtin_detectors() {
        temp_env::with_vars(
            [
                ("TELEMETER_SERVICE_NAME", None::<&str>),
                ("TELEMETER_RESOURCE_ATTRIBUTES", None::<&str>),
            ],
            || {
                let (resource, _errors) = Resource::builder().build();

                assert_eq!(
                    resource.get(&SERVICE_NAME.into()),
                    Some("unknown_service".into())
                );
                assert_eq!(
                    resource.get(&TELEMETRY_SDK_NAME.into()),
                    Some("telemeter".into())
                );
            },
        )
    }

    #[test]
    fn empty_builder_produces_empty_resource() {
        let (resource, errors) = Resource::builder_empty().build();

        assert!(resource.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn without_flags_drop_builtin_detectors() {
        temp_env::with_vars(
            [
                ("TELEMETER_SERVICE_NAME", None::<&str>),
                ("TELEMETER_RESOURCE_ATTRIBUTES", None::<&str>),
            ],
            || {
                let (resource, errors) = Resource::builder()
                    .without_telemetry_sdk()
                    .without_host()
                    .build();

                assert!(errors.is_empty());
                assert_eq!(resource.get(&TELEMETRY_SDK_NAME.into()), None);
                assert_eq!(resource.get(&HOST_NAME.into()), None);
                // The service name guarantee is unaffected.
                assert_eq!(
                    resource.get(&SERVICE_NAME.into()),
                    Some("unknown_service".into())
                );
            },
        )
    }

    #[test]
    fn custom_detector_overrides_builtins() {
        struct FixedSdkName;

        impl ResourceDetector for FixedSdkName {
            fn detect(&self, _timeout: Duration) -> Result<Resource, DetectionError> {
                Ok(Resource::new([KeyValue::new(
                    TELEMETRY_SDK_NAME,
                    "custom-sdk",
                )]))
            }
        }

        let (resource, _errors) = Resource::builder()
            .with_detector(Box::new(FixedSdkName))
            .build();

        assert_eq!(
            resource.get(&TELEMETRY_SDK_NAME.into()),
            Some("custom-sdk".into())
        );
    }

    #[test]
    fn explicit_attributes_override_detected_values() {
        temp_env::with_var("TELEMETER_SERVICE_NAME", Some("from-env"), || {
            let (resource, _errors) = Resource::builder().with_service_name("from-code").build();

            assert_eq!(
                resource.get(&SERVICE_NAME.into()),
                Some("from-code".into())
            );
        })
    }

    #[test]
    fn zero_timeout_cancels_blocking_detectors() {
        let (resource, errors) = Resource::builder_empty()
            .with_detector(Box::new(HostResourceDetector::new()))
            .with_timeout(Duration::ZERO)
            .build();

        assert!(resource.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], DetectionError::Cancelled { .. }));
    }
}
