//! Immutable representation of the entity producing telemetry, assembled
//! from one or more [`ResourceDetector`]s.

use std::collections::{btree_map, BTreeMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use telemeter::{tele_debug, tele_warn, Key, KeyValue, Value};

use crate::builder::ResourceBuilder;
use crate::detector::{DetectionError, ResourceDetector};

/// Inner structure of `Resource` holding the actual data.
/// This structure is designed to be shared among `Resource` instances via `Arc`.
#[derive(Debug, Clone, PartialEq)]
struct ResourceInner {
    attrs: BTreeMap<Key, Value>,
}

/// An immutable representation of the entity producing telemetry as attributes.
///
/// Utilizes `Arc` for efficient sharing and cloning: a resource is built
/// once, then attached to everything the entity emits.
///
/// Resources are combined with [`merge`](Resource::merge), which is
/// right-biased and treats the empty resource as its identity:
///
/// ```
/// use telemeter::KeyValue;
/// use telemeter_resource::Resource;
///
/// let base = Resource::new([KeyValue::new("service.name", "checkout")]);
/// let overrides = Resource::new([KeyValue::new("service.name", "checkout-eu")]);
///
/// let merged = base.merge(&overrides);
/// assert_eq!(merged.get(&"service.name".into()), Some("checkout-eu".into()));
/// assert_eq!(base.merge(&Resource::empty()), base);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    inner: Arc<ResourceInner>,
}

impl Resource {
    /// Creates a resource with no attributes.
    pub fn empty() -> Self {
        Resource {
            inner: Arc::new(ResourceInner {
                attrs: BTreeMap::new(),
            }),
        }
    }

    /// Creates a resource from the given key-value pairs.
    ///
    /// Pairs are de-duplicated by key, the last value provided for a key
    /// wins.
    pub fn new<T: IntoIterator<Item = KeyValue>>(kvs: T) -> Self {
        let mut attrs = BTreeMap::new();
        for kv in kvs {
            attrs.insert(kv.key, kv.value);
        }
        Resource {
            inner: Arc::new(ResourceInner { attrs }),
        }
    }

    /// Runs `detectors` in order and merges everything they produce.
    ///
    /// `timeout` bounds the pass as a whole: each detector is granted
    /// whatever is left of it, so a slow detector eats into the budget of
    /// those that follow. Every detector is invoked even once the budget is
    /// exhausted, since detectors that work without I/O still succeed at
    /// that point.
    ///
    /// Detected attributes are merged left to right, later detectors
    /// override earlier ones on key conflicts. A failing detector does not
    /// abort the pass; its error is collected and the remaining detectors
    /// still run. With every detector failing the result is simply the
    /// empty resource along with one error per detector, and the caller
    /// decides whether that is acceptable.
    pub fn from_detectors(
        timeout: Duration,
        detectors: &[Box<dyn ResourceDetector>],
    ) -> (Resource, Vec<DetectionError>) {
        let started = Instant::now();
        let mut resource = Resource::empty();
        let mut errors = Vec::new();

        for detector in detectors {
            let remaining = timeout.saturating_sub(started.elapsed());
            match detector.detect(remaining) {
                Ok(detected) => resource = resource.merge(&detected),
                Err(err) => {
                    tele_debug!(
                        name: "resource_detector_failed",
                        detector = err.detector().to_owned(),
                        error = err.to_string()
                    );
                    errors.push(err);
                }
            }
        }

        (resource, errors)
    }

    /// Creates a new `Resource` by combining two resources.
    ///
    /// Keys from `other` have priority over keys from this resource, even
    /// if the updated value is empty. Neither operand is modified, so both
    /// can keep being shared.
    pub fn merge(&self, other: &Resource) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let mut combined_attrs = self.inner.attrs.clone();
        for (k, v) in other.inner.attrs.iter() {
            combined_attrs.insert(k.clone(), v.clone());
        }

        Resource {
            inner: Arc::new(ResourceInner {
                attrs: combined_attrs,
            }),
        }
    }

    /// Retrieves the value for the given key, if it is recorded.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.inner.attrs.get(key).cloned()
    }

    /// Returns the number of attributes for this resource.
    pub fn len(&self) -> usize {
        self.inner.attrs.len()
    }

    /// Returns `true` if the resource contains no attributes.
    pub fn is_empty(&self) -> bool {
        self.inner.attrs.is_empty()
    }

    /// Returns an iterator over the attributes, sorted by key.
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Creates a [`ResourceBuilder`] preloaded with the builtin detectors.
    ///
    /// See [`ResourceBuilder`] for the detector line-up and override order.
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::with_builtins()
    }

    /// Creates a [`ResourceBuilder`] with no detectors registered.
    pub fn builder_empty() -> ResourceBuilder {
        ResourceBuilder::empty()
    }
}

impl Default for Resource {
    /// Builds the resource produced by the default builder, discarding
    /// detection errors after logging them.
    fn default() -> Self {
        let (resource, errors) = Resource::builder().build();
        for error in &errors {
            tele_warn!(
                name: "default_resource_detection_error",
                detector = error.detector().to_owned(),
                error = error.to_string()
            );
        }
        resource
    }
}

/// An iterator over the entries of a `Resource`.
#[derive(Debug)]
pub struct Iter<'a>(btree_map::Iter<'a, Key, Value>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<'a> IntoIterator for &'a Resource {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.inner.attrs.iter())
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
