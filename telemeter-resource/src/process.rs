//! Process resource detector.
//!
//! Detect information about the process emitting telemetry.

use std::env;
use std::process;
use std::time::Duration;

use telemeter::KeyValue;

use crate::attributes::{
    PROCESS_EXECUTABLE_NAME, PROCESS_PID, PROCESS_RUNTIME_NAME, PROCESS_RUNTIME_VERSION,
};
use crate::detector::{DetectionError, ResourceDetector};
use crate::Resource;

/// Detect process information.
///
/// This detector returns the following information:
///
/// - process id (`process.pid`)
/// - file name of the executable (`process.executable.name`), omitted when
///   the executable path cannot be resolved
/// - name of the compiler that produced the executable
///   (`process.runtime.name`), always `rustc`
/// - version of the compiler (`process.runtime.version`), captured when the
///   crate was built and omitted if the capture failed
#[derive(Debug)]
pub struct ProcessResourceDetector;

impl ResourceDetector for ProcessResourceDetector {
    fn detect(&self, _timeout: Duration) -> Result<Resource, DetectionError> {
        let exe_name = env::current_exe()
            .ok()
            .as_ref()
            .and_then(|exe| exe.file_name())
            .map(|name| name.to_string_lossy().into_owned());

        Ok(Resource::new(
            [
                Some(KeyValue::new(PROCESS_PID, process::id() as i64)),
                exe_name.map(|name| KeyValue::new(PROCESS_EXECUTABLE_NAME, name)),
                Some(KeyValue::new(PROCESS_RUNTIME_NAME, "rustc")),
                option_env!("RUSTC_VERSION")
                    .map(|rustc_version| KeyValue::new(PROCESS_RUNTIME_VERSION, rustc_version)),
            ]
            .into_iter()
            .flatten(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use telemeter::Value;

    use crate::attributes::{PROCESS_EXECUTABLE_NAME, PROCESS_PID, PROCESS_RUNTIME_NAME};
    use crate::detector::ResourceDetector;

    use super::ProcessResourceDetector;

    #[test]
    fn test_processor_resource_detector() {
        let resource = ProcessResourceDetector.detect(Duration::ZERO).unwrap();

        match resource.get(&PROCESS_PID.into()) {
            Some(Value::I64(pid)) => assert!(pid > 0),
            other => panic!("process.pid missing or mistyped: {other:?}"),
        }
        assert_eq!(
            resource.get(&PROCESS_RUNTIME_NAME.into()),
            Some("rustc".into())
        );
        // Tests run from a binary built by cargo, so the executable name
        // resolves.
        assert!(resource.get(&PROCESS_EXECUTABLE_NAME.into()).is_some());
    }
}
