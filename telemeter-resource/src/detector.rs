//! Resource detection.

use std::borrow::Cow;
use std::time::Duration;

use telemeter::Key;
use thiserror::Error;

use crate::Resource;

/// Describes a failed attempt by a single detector.
///
/// Detection failures are not fatal to an aggregation pass:
/// [`Resource::from_detectors`] collects them and keeps running the
/// remaining detectors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DetectionError {
    /// The detector could not produce its attributes.
    #[error("{detector}: {source}")]
    Failed {
        /// Name of the failing detector, or of the attribute key it was
        /// resolving.
        detector: Cow<'static, str>,

        /// The underlying cause reported by the detector.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The detector observed its detection budget run out before it could
    /// finish.
    #[error("{detector}: detection budget of {budget:?} exhausted")]
    Cancelled {
        /// Name of the detector, or of the attribute key it was resolving.
        detector: Cow<'static, str>,

        /// The budget the detector was granted.
        budget: Duration,
    },
}

impl DetectionError {
    /// A detection failure wrapping the underlying `source`.
    pub fn failed(
        detector: impl Into<Cow<'static, str>>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        DetectionError::Failed {
            detector: detector.into(),
            source: source.into(),
        }
    }

    /// A failure caused by an exhausted detection budget.
    pub fn cancelled(detector: impl Into<Cow<'static, str>>, budget: Duration) -> Self {
        DetectionError::Cancelled {
            detector: detector.into(),
            budget,
        }
    }

    /// Name of the detector (or attribute key) this error originated from.
    pub fn detector(&self) -> &str {
        match self {
            DetectionError::Failed { detector, .. } => detector,
            DetectionError::Cancelled { detector, .. } => detector,
        }
    }
}

/// Discovers attributes describing the entity that produces telemetry.
///
/// Detectors are run by [`Resource::from_detectors`] or a
/// [`ResourceBuilder`](crate::ResourceBuilder), which grant each one
/// whatever remains of the caller's detection budget. A detector that
/// performs blocking work must give up once that budget is exhausted and
/// report [`DetectionError::Cancelled`]; detectors that compute their
/// attributes without I/O may ignore the budget entirely.
///
/// A failing detector never aborts the pass it is part of: the caller
/// records the error and continues with the remaining detectors.
pub trait ResourceDetector {
    /// Detects resource attributes within the remaining `timeout` budget.
    fn detect(&self, timeout: Duration) -> Result<Resource, DetectionError>;
}

/// Adapts a fallible string lookup into a [`ResourceDetector`] for one key.
///
/// Most environment probes boil down to asking the platform for a single
/// string, so this adapter covers the common case: run the lookup, pair the
/// returned string with the configured key, and report failures under that
/// key's name.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use telemeter::Key;
/// use telemeter_resource::{ResourceDetector, StringDetector};
///
/// let detector = StringDetector::new(Key::new("ci.runner"), || Ok("runner-7".to_owned()));
/// let resource = detector.detect(Duration::from_secs(1)).unwrap();
/// assert_eq!(resource.get(&"ci.runner".into()), Some("runner-7".into()));
/// ```
#[derive(Debug)]
pub struct StringDetector<F> {
    key: Key,
    f: F,
}

impl<F> StringDetector<F>
where
    F: Fn() -> Result<String, Box<dyn std::error::Error + Send + Sync>>,
{
    /// Creates a detector producing a single `key` attribute from `f`.
    pub fn new(key: Key, f: F) -> Self {
        StringDetector { key, f }
    }
}

impl<F> ResourceDetector for StringDetector<F>
where
    F: Fn() -> Result<String, Box<dyn std::error::Error + Send + Sync>>,
{
    fn detect(&self, timeout: Duration) -> Result<Resource, DetectionError> {
        if timeout.is_zero() {
            return Err(DetectionError::cancelled(self.key.to_string(), timeout));
        }
        match (self.f)() {
            Ok(value) => Ok(Resource::new([self.key.string(value)])),
            Err(source) => Err(DetectionError::failed(self.key.to_string(), source)),
        }
    }
}
