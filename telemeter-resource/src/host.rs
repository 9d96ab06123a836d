//! Host resource detector.

use std::env;
use std::time::Duration;

use telemeter::Key;

use crate::attributes::HOST_NAME;
use crate::detector::{DetectionError, ResourceDetector, StringDetector};
use crate::Resource;

const HOSTNAME: &str = "HOSTNAME";

/// Detects the `host.name` of the machine the process runs on.
///
/// A non-empty `HOSTNAME` environment variable takes precedence, since
/// container runtimes and CI systems use it to inject the name they want
/// reported. Otherwise the hostname is requested from the operating system.
///
/// The lookup is delegated to a [`StringDetector`], so failures are
/// reported under the `host.name` key.
#[derive(Debug)]
pub struct HostResourceDetector {
    _private: (),
}

impl HostResourceDetector {
    /// Create `HostResourceDetector` instance.
    pub fn new() -> Self {
        HostResourceDetector { _private: () }
    }
}

impl Default for HostResourceDetector {
    fn default() -> Self {
        HostResourceDetector::new()
    }
}

impl ResourceDetector for HostResourceDetector {
    fn detect(&self, timeout: Duration) -> Result<Resource, DetectionError> {
        StringDetector::new(Key::from_static_str(HOST_NAME), hostname).detect(timeout)
    }
}

fn hostname() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    match env::var(HOSTNAME) {
        Ok(name) if !name.is_empty() => Ok(name),
        _ => os_hostname(),
    }
}

#[cfg(unix)]
fn os_hostname() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let hostname = nix::unistd::gethostname()?;
    hostname
        .into_string()
        .map_err(|_| "hostname is not valid UTF-8".into())
}

#[cfg(not(unix))]
fn os_hostname() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    env::var("COMPUTERNAME").map_err(|_| "no hostname source available".into())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::attributes::HOST_NAME;
    use crate::detector::{DetectionError, ResourceDetector};

    use super::HostResourceDetector;

    #[test]
    fn hostname_env_var_takes_precedence() {
        temp_env::with_var("HOSTNAME", Some("test-hostname"), || {
            let resource = HostResourceDetector::new()
                .detect(Duration::from_secs(1))
                .unwrap();

            assert_eq!(
                resource.get(&HOST_NAME.into()),
                Some("test-hostname".into())
            );
        })
    }

    #[cfg(unix)]
    #[test]
    fn falls_back_to_os_hostname() {
        temp_env::with_var("HOSTNAME", None::<&str>, || {
            let resource = HostResourceDetector::new()
                .detect(Duration::from_secs(1))
                .unwrap();

            let hostname = resource.get(&HOST_NAME.into()).unwrap();
            assert!(!hostname.as_str().is_empty());
        })
    }

    #[cfg(unix)]
    #[test]
    fn empty_env_var_is_ignored() {
        temp_env::with_var("HOSTNAME", Some(""), || {
            let resource = HostResourceDetector::new()
                .detect(Duration::from_secs(1))
                .unwrap();

            let hostname = resource.get(&HOST_NAME.into()).unwrap();
            assert!(!hostname.as_str().is_empty());
        })
    }

    #[test]
    fn cancelled_without_budget() {
        let err = HostResourceDetector::new()
            .detect(Duration::ZERO)
            .unwrap_err();

        assert!(matches!(err, DetectionError::Cancelled { .. }));
        assert_eq!(err.detector(), "host.name");
    }
}
