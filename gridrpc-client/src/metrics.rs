//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`RpcClient`](crate::RpcClient)
//! when observability is enabled through the builder:
//!
//! - **requests_total**: calls sent, by method and status (counter)
//! - **request_duration**: call latency in seconds (histogram)
//! - **errors_total**: failed calls, by error kind (counter)
//! - **bundles_total**: bundle fetches, by bundle name (counter)
//! - **bundle_duration**: bundle latency in seconds (histogram)
//! - **bundle_failed_keys**: failed keys per bundle fetch (histogram)
//!
//! Instruments come from the global meter provider, so nothing is exported
//! unless one is installed (see `gridrpc_core::init_observability`).

use gridrpc_core::ErrorKind;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    pub requests_total: Counter<u64>,
    pub request_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,
    pub bundles_total: Counter<u64>,
    pub bundle_duration: Histogram<f64>,
    pub bundle_failed_keys: Histogram<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter named after the service
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into())
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("gridrpc.client.requests.total")
                .with_description("Total number of RPC calls sent")
                .build(),
            request_duration: meter
                .f64_histogram("gridrpc.client.request.duration")
                .with_description("RPC call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("gridrpc.client.errors.total")
                .with_description("Total number of failed RPC calls by error kind")
                .build(),
            bundles_total: meter
                .u64_counter("gridrpc.client.bundles.total")
                .with_description("Total number of bundle fetches")
                .build(),
            bundle_duration: meter
                .f64_histogram("gridrpc.client.bundle.duration")
                .with_description("Bundle fetch duration in seconds")
                .build(),
            bundle_failed_keys: meter
                .u64_histogram("gridrpc.client.bundle.failed_keys")
                .with_description("Number of failed keys per bundle fetch")
                .build(),
        }
    }

    /// Record one finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    pub fn record_error(&self, kind: ErrorKind) {
        self.errors_total
            .add(1, &[KeyValue::new("kind", kind.as_str())]);
    }

    /// Record one finished bundle fetch
    pub fn record_bundle(&self, bundle: &str, failed_keys: usize, duration_secs: f64) {
        let attributes = &[KeyValue::new("bundle", bundle.to_string())];
        self.bundles_total.add(1, attributes);
        self.bundle_duration.record(duration_secs, attributes);
        self.bundle_failed_keys.record(failed_keys as u64, attributes);
    }
}
