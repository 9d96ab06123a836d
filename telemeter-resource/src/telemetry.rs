use std::time::Duration;

use telemeter::KeyValue;

use crate::attributes::{TELEMETRY_SDK_LANGUAGE, TELEMETRY_SDK_NAME, TELEMETRY_SDK_VERSION};
use crate::detector::{DetectionError, ResourceDetector};
use crate::Resource;

/// Reports the identity of the SDK capturing the telemetry.
///
/// It provides:
/// - `telemetry.sdk.name`, always `telemeter`
/// - `telemetry.sdk.language`, always `rust`
/// - `telemetry.sdk.version`, the version of this crate
///
/// The attributes are baked in at compile time, so detection cannot fail
/// and succeeds even when the detection budget is already exhausted.
#[derive(Debug)]
pub struct TelemetryResourceDetector;

impl ResourceDetector for TelemetryResourceDetector {
    fn detect(&self, _timeout: Duration) -> Result<Resource, DetectionError> {
        Ok(Resource::new([
            KeyValue::new(TELEMETRY_SDK_NAME, "telemeter"),
            KeyValue::new(TELEMETRY_SDK_LANGUAGE, "rust"),
            KeyValue::new(TELEMETRY_SDK_VERSION, env!("CARGO_PKG_VERSION")),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::attributes::{TELEMETRY_SDK_LANGUAGE, TELEMETRY_SDK_NAME, TELEMETRY_SDK_VERSION};
    use crate::detector::ResourceDetector;

    use super::TelemetryResourceDetector;

    #[test]
    fn detect_sdk_identity_with_exhausted_budget() {
        let resource = TelemetryResourceDetector.detect(Duration::ZERO).unwrap();

        assert_eq!(resource.len(), 3);
        assert_eq!(
            resource.get(&TELEMETRY_SDK_NAME.into()),
            Some("telemeter".into())
        );
        assert_eq!(
            resource.get(&TELEMETRY_SDK_LANGUAGE.into()),
            Some("rust".into())
        );
        assert_eq!(
            resource.get(&TELEMETRY_SDK_VERSION.into()),
            Some(env!("CARGO_PKG_VERSION").into())
        );
    }
}
