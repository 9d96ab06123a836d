//! OS resource detector
//!
//! Detect the runtime operating system type.

use std::env::consts::OS;
use std::time::Duration;

use telemeter::KeyValue;

use crate::attributes::OS_TYPE;
use crate::detector::{DetectionError, ResourceDetector};
use crate::Resource;

/// Detect runtime operating system information.
///
/// This detector uses Rust's [`OS constant`] to report the operating system
/// type the process was compiled for. The value is known at compile time,
/// so detection cannot fail and ignores the detection budget.
///
/// [`OS constant`]: https://doc.rust-lang.org/std/env/consts/constant.OS.html
#[derive(Debug)]
pub struct OsResourceDetector;

impl ResourceDetector for OsResourceDetector {
    fn detect(&self, _timeout: Duration) -> Result<Resource, DetectionError> {
        Ok(Resource::new([KeyValue::new(OS_TYPE, OS)]))
    }
}

#[cfg(test)]
#[cfg(target_os = "linux")]
mod tests {
    use std::time::Duration;

    use telemeter::Key;

    use crate::detector::ResourceDetector;

    use super::OsResourceDetector;

    #[test]
    fn test_os_resource_detector() {
        let resource = OsResourceDetector.detect(Duration::ZERO).unwrap();

        assert_eq!(resource.len(), 1);
        assert_eq!(
            resource.get(&Key::from_static_str("os.type")),
            Some("linux".into())
        );
    }
}
