use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use telemeter::KeyValue;
use telemeter_resource::{Resource, ResourceDetector, TelemetryResourceDetector};

// Run this benchmark with:
// cargo bench --bench resource

fn criterion_benchmark(c: &mut Criterion) {
    resource_construction(c);
    resource_merge(c);
    resource_detection(c);
}

fn attributes(prefix: &str) -> Vec<KeyValue> {
    (0..8)
        .map(|i| KeyValue::new(format!("{prefix}.attribute{i}"), "value"))
        .collect()
}

fn resource_construction(c: &mut Criterion) {
    c.bench_function("Resource_new", |b| {
        b.iter(|| {
            let _resource = Resource::new(attributes("bench"));
        });
    });

    c.bench_function("Resource_clone", |b| {
        let resource = Resource::new(attributes("bench"));
        b.iter(|| {
            let _clone = resource.clone();
        });
    });
}

fn resource_merge(c: &mut Criterion) {
    c.bench_function("Resource_merge_disjoint", |b| {
        let left = Resource::new(attributes("left"));
        let right = Resource::new(attributes("right"));
        b.iter(|| {
            let _merged = left.merge(&right);
        });
    });

    c.bench_function("Resource_merge_overlapping", |b| {
        let left = Resource::new(attributes("shared"));
        let right = Resource::new(attributes("shared"));
        b.iter(|| {
            let _merged = left.merge(&right);
        });
    });

    c.bench_function("Resource_merge_empty", |b| {
        let left = Resource::new(attributes("left"));
        let right = Resource::empty();
        b.iter(|| {
            let _merged = left.merge(&right);
        });
    });
}

fn resource_detection(c: &mut Criterion) {
    struct FixedDetector(Vec<KeyValue>);

    impl ResourceDetector for FixedDetector {
        fn detect(
            &self,
            _timeout: Duration,
        ) -> Result<Resource, telemeter_resource::DetectionError> {
            Ok(Resource::new(self.0.clone()))
        }
    }

    c.bench_function("Resource_from_detectors", |b| {
        let detectors: Vec<Box<dyn ResourceDetector>> = vec![
            Box::new(TelemetryResourceDetector),
            Box::new(FixedDetector(attributes("fixed"))),
        ];
        b.iter(|| {
            let _detected = Resource::from_detectors(Duration::from_millis(100), &detectors);
        });
    });
}

criterion_group!(benches, criterion_benchmark);

criterion_main!(benches);
