use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::QueueMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for queue metrics snapshots.
///
/// Writes the Prometheus text exposition format so it can be scraped or
/// forwarded to an OpenTelemetry collector. Write errors are ignored.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<QueueMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &QueueMetricsSnapshot) {
        let counters = [
            ("add_calls_total", snapshot.add_calls),
            ("add_new_total", snapshot.add_new),
            ("add_duplicates_total", snapshot.add_duplicates),
            ("add_rolled_back_total", snapshot.add_rolled_back),
            ("remove_calls_total", snapshot.remove_calls),
            ("remove_found_total", snapshot.remove_found),
            ("remove_stale_total", snapshot.remove_stale),
            ("move_calls_total", snapshot.move_calls),
            ("move_found_total", snapshot.move_found),
            ("poll_calls_total", snapshot.poll_calls),
            ("poll_found_total", snapshot.poll_found),
            ("clear_calls_total", snapshot.clear_calls),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", &self.metric_name(suffix), value);
        }
        self.write_metric("gauge", &self.metric_name("len"), snapshot.len as u64);
        self.write_metric(
            "gauge",
            &self.metric_name("index_len"),
            snapshot.index_len as u64,
        );
    }
}
