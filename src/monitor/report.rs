//! Diagnostics report assembly
//!
//! One report cycle runs the selected sections strictly in order:
//! 1. health check against the health_check extension
//! 2. metrics scrape, exporter analysis and status assessment
//!
//! A failed fetch only affects its own section. The shutdown signal is checked
//! before each fetch so an interrupted cycle produces no report at all.

use chrono::Local;
use serde::Serialize;
use tracing::{debug, warn};

use super::shutdown::ShutdownSignal;
use crate::client::{CollectorSource, CollectorSourceExt};
use crate::config::{CollectorEndpoints, DiagnosticsConfig, ZPAGES};
use crate::metrics::{Assessment, ExportAnalysis};

pub const HEALTH_TROUBLESHOOTING: &[&str] = &[
    "Ensure collector container is running",
    "Verify port 13133 is exposed",
    "Check docker-compose logs for errors",
];

pub const METRICS_TROUBLESHOOTING: &[&str] = &[
    "Ensure collector container is running",
    "Verify port 8888 is exposed",
    "Check internal telemetry configuration",
];

/// Result of the health check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HealthSection {
    Healthy {
        status: String,
        endpoint: String,
    },
    Unhealthy {
        message: String,
        troubleshooting: &'static [&'static str],
    },
}

impl HealthSection {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthSection::Healthy { .. })
    }
}

/// Result of the exporter statistics branch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportSection {
    Available {
        analysis: ExportAnalysis,
        assessment: Assessment,
    },
    Unavailable {
        message: String,
        troubleshooting: &'static [&'static str],
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZPage {
    pub name: &'static str,
    pub url: String,
}

/// Where an operator can look next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoringEndpoints {
    pub health: String,
    pub metrics: String,
    pub zpages: String,
    pub pages: Vec<ZPage>,
}

impl MonitoringEndpoints {
    pub fn from_endpoints(endpoints: &CollectorEndpoints) -> Self {
        Self {
            health: endpoints.health_url.clone(),
            metrics: endpoints.metrics_url.clone(),
            zpages: endpoints.zpages_url.clone(),
            pages: ZPAGES
                .iter()
                .map(|&(path, name)| ZPage {
                    name,
                    url: endpoints.zpage_url(path),
                })
                .collect(),
        }
    }
}

/// One complete report cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    pub timestamp: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<MonitoringEndpoints>,
}

impl DiagnosticsReport {
    /// Run one report cycle
    ///
    /// Returns `None` if `shutdown` is triggered before any of the fetches.
    pub fn collect<S>(
        source: &S,
        config: &DiagnosticsConfig,
        shutdown: &ShutdownSignal,
    ) -> Option<Self>
    where
        S: CollectorSource + ?Sized,
    {
        let endpoints = &config.endpoints;
        let sections = config.sections;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let health = if sections.health {
            if shutdown.is_triggered() {
                return None;
            }
            Some(check_health(source, endpoints))
        } else {
            None
        };

        let export = if sections.export_stats {
            if shutdown.is_triggered() {
                return None;
            }
            Some(export_statistics(source, endpoints))
        } else {
            None
        };

        Some(Self {
            timestamp,
            host: endpoints.host.clone(),
            health,
            export,
            endpoints: sections
                .endpoints
                .then(|| MonitoringEndpoints::from_endpoints(endpoints)),
        })
    }
}

/// Health check branch
pub fn check_health<S>(source: &S, endpoints: &CollectorEndpoints) -> HealthSection
where
    S: CollectorSource + ?Sized,
{
    match source.check_health(endpoints) {
        Ok(status) => {
            debug!(host = %endpoints.host, %status, "health check passed");
            HealthSection::Healthy {
                status,
                endpoint: endpoints.health_url.clone(),
            }
        }
        Err(e) => {
            warn!(url = %endpoints.health_url, error = %e, "health check failed");
            HealthSection::Unhealthy {
                message: format!("Health check failed: {}", e),
                troubleshooting: HEALTH_TROUBLESHOOTING,
            }
        }
    }
}

/// Exporter statistics branch
pub fn export_statistics<S>(source: &S, endpoints: &CollectorEndpoints) -> ExportSection
where
    S: CollectorSource + ?Sized,
{
    let metrics_text = match source.scrape_metrics(endpoints) {
        Ok(text) => text,
        Err(e) => {
            warn!(url = %endpoints.metrics_url, error = %e, "metrics scrape failed");
            return ExportSection::Unavailable {
                message: format!("Metrics fetch failed: {}", e),
                troubleshooting: METRICS_TROUBLESHOOTING,
            };
        }
    };

    let analysis = ExportAnalysis::analyze(&metrics_text);
    let assessment = Assessment::classify(&analysis);
    debug!(
        success_rate = analysis.success_rate,
        queue_utilization = analysis.queue_utilization,
        export_health = assessment.export_health.as_str(),
        queue_status = assessment.queue_status.as_str(),
        "exporter statistics analyzed"
    );

    ExportSection::Available {
        analysis,
        assessment,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ReportSections;
    use crate::metrics::{ExportHealth, QueueStatus};
    use crate::utils::FetchError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted source: canned responses per URL, records every request
    pub(crate) struct ScriptedSource {
        pub responses: HashMap<String, Result<String, u16>>,
        pub requested: RefCell<Vec<String>>,
        /// Trigger this signal when the n-th request (1-based) arrives
        pub trigger_on: Option<(usize, ShutdownSignal)>,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self {
                responses: HashMap::new(),
                requested: RefCell::new(Vec::new()),
                trigger_on: None,
            }
        }

        pub fn respond(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub fn fail(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.to_string(), Err(status));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requested.borrow().clone()
        }
    }

    impl CollectorSource for ScriptedSource {
        fn get(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            if let Some((n, signal)) = &self.trigger_on {
                if self.requested.borrow().len() == *n {
                    signal.trigger();
                }
            }
            match self.responses.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    pub(crate) const HEALTHY_METRICS: &str = r#"otelcol_exporter_sent_metric_points__datapoints__total{exporter="otlphttp"} 9500
otelcol_exporter_send_failed_metric_points__datapoints__total{exporter="otlphttp"} 500
otelcol_exporter_queue_size__batches_{exporter="otlphttp"} 75
otelcol_exporter_queue_capacity__batches_{exporter="otlphttp"} 100
otelcol_receiver_accepted_metric_points__datapoints__total{receiver="otlp"} 10000
"#;

    fn config_with(sections: ReportSections) -> DiagnosticsConfig {
        let mut config = DiagnosticsConfig::for_host("localhost");
        config.sections = sections;
        config
    }

    #[test]
    fn test_full_report() {
        let config = config_with(ReportSections::all());
        let source = ScriptedSource::new()
            .respond(&config.endpoints.health_url, "{\"status\":\"Server available\"}\n")
            .respond(&config.endpoints.metrics_url, HEALTHY_METRICS);

        let report = DiagnosticsReport::collect(&source, &config, &ShutdownSignal::new()).unwrap();

        assert_eq!(report.host, "localhost");
        assert_eq!(
            report.health,
            Some(HealthSection::Healthy {
                status: "{\"status\":\"Server available\"}".to_string(),
                endpoint: config.endpoints.health_url.clone(),
            })
        );

        match report.export {
            Some(ExportSection::Available {
                analysis,
                assessment,
            }) => {
                assert_eq!(analysis.success_rate, 95.0);
                assert_eq!(analysis.queue_utilization, 75.0);
                assert_eq!(analysis.total_received, 10000.0);
                assert_eq!(assessment.export_health, ExportHealth::Excellent);
                assert_eq!(assessment.queue_status, QueueStatus::Moderate);
                assert_eq!(assessment.recommendations.len(), 2);
            }
            other => panic!("unexpected export section: {:?}", other),
        }

        let endpoints = report.endpoints.unwrap();
        assert_eq!(endpoints.pages.len(), 3);
        assert_eq!(endpoints.pages[0].url, "http://localhost:55679/debug/servicez");

        // health strictly before metrics
        assert_eq!(
            source.requests(),
            vec![config.endpoints.health_url.clone(), config.endpoints.metrics_url.clone()]
        );
    }

    #[test]
    fn test_health_failure_does_not_block_metrics() {
        let config = config_with(ReportSections::all());
        let source = ScriptedSource::new()
            .fail(&config.endpoints.health_url, 503)
            .respond(&config.endpoints.metrics_url, HEALTHY_METRICS);

        let report = DiagnosticsReport::collect(&source, &config, &ShutdownSignal::new()).unwrap();

        match report.health {
            Some(HealthSection::Unhealthy {
                message,
                troubleshooting,
            }) => {
                assert!(message.starts_with("Health check failed: HTTP 503"));
                assert_eq!(troubleshooting, HEALTH_TROUBLESHOOTING);
            }
            other => panic!("unexpected health section: {:?}", other),
        }
        assert!(matches!(report.export, Some(ExportSection::Available { .. })));
    }

    #[test]
    fn test_unreachable_collector_reports_cause() {
        use crate::client::HttpCollectorClient;
        use std::net::TcpListener;
        use std::time::Duration;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut endpoints = CollectorEndpoints::for_host("127.0.0.1");
        endpoints.health_url = format!("http://127.0.0.1:{}/health", port);
        let client = HttpCollectorClient::new(Duration::from_secs(2)).unwrap();

        match check_health(&client, &endpoints) {
            HealthSection::Unhealthy { message, .. } => {
                assert!(message.starts_with("Health check failed: "), "{}", message);
                assert!(message.to_lowercase().contains("refused"), "{}", message);
            }
            other => panic!("unexpected health section: {:?}", other),
        }
    }

    #[test]
    fn test_metrics_failure_short_circuits() {
        let config = config_with(ReportSections::from_flags(false, false, true));
        let source = ScriptedSource::new().fail(&config.endpoints.metrics_url, 500);

        let report = DiagnosticsReport::collect(&source, &config, &ShutdownSignal::new()).unwrap();

        assert!(report.health.is_none());
        assert!(report.endpoints.is_none());
        assert_eq!(
            report.export,
            Some(ExportSection::Unavailable {
                message: format!("Metrics fetch failed: HTTP 500 from {}", config.endpoints.metrics_url),
                troubleshooting: METRICS_TROUBLESHOOTING,
            })
        );
        assert_eq!(source.requests(), vec![config.endpoints.metrics_url.clone()]);
    }

    #[test]
    fn test_health_only_skips_scrape() {
        let config = config_with(ReportSections::from_flags(true, false, false));
        let source = ScriptedSource::new().respond(&config.endpoints.health_url, "ok");

        let report = DiagnosticsReport::collect(&source, &config, &ShutdownSignal::new()).unwrap();

        assert!(report.health.unwrap().is_healthy());
        assert!(report.export.is_none());
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn test_triggered_signal_yields_no_report() {
        let config = config_with(ReportSections::all());
        let source = ScriptedSource::new();
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        assert!(DiagnosticsReport::collect(&source, &config, &shutdown).is_none());
        assert!(source.requests().is_empty());
    }

    #[test]
    fn test_interrupt_between_fetches_discards_cycle() {
        let config = config_with(ReportSections::all());
        let shutdown = ShutdownSignal::new();
        let mut source = ScriptedSource::new()
            .respond(&config.endpoints.health_url, "ok")
            .respond(&config.endpoints.metrics_url, HEALTHY_METRICS);
        source.trigger_on = Some((1, shutdown.clone()));

        assert!(DiagnosticsReport::collect(&source, &config, &shutdown).is_none());
        assert_eq!(source.requests(), vec![config.endpoints.health_url.clone()]);
    }

    #[test]
    fn test_report_serializes() {
        let config = config_with(ReportSections::from_flags(false, true, false));
        let source = ScriptedSource::new().respond(&config.endpoints.metrics_url, HEALTHY_METRICS);

        let report = DiagnosticsReport::collect(&source, &config, &ShutdownSignal::new()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("health").is_none());
        assert_eq!(json["export"]["state"], "available");
        assert_eq!(json["export"]["assessment"]["export_health"], "EXCELLENT");
        assert_eq!(json["export"]["assessment"]["queue_status"], "MODERATE");
        assert_eq!(json["export"]["analysis"]["sent_metrics"], 9500.0);
    }
}
