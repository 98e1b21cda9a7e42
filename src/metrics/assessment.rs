//! Status assessment for exporter statistics
//!
//! Maps the derived ratios of an [`ExportAnalysis`] onto tiered verdicts and
//! collects the remediation advice that applies.

use serde::Serialize;

use super::export_analysis::ExportAnalysis;

/// Lower bounds (inclusive) of the export health bands, in percent
pub const EXCELLENT_SUCCESS_RATE: f64 = 95.0;
pub const GOOD_SUCCESS_RATE: f64 = 80.0;
pub const DEGRADED_SUCCESS_RATE: f64 = 50.0;

/// Upper bounds (exclusive) of the queue status bands, in percent
pub const HEALTHY_QUEUE_UTILIZATION: f64 = 50.0;
pub const MODERATE_QUEUE_UTILIZATION: f64 = 80.0;

/// Queue advice is given above this utilization
pub const QUEUE_ADVICE_UTILIZATION: f64 = 70.0;

/// Export health tier, derived from the success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportHealth {
    Excellent,
    Good,
    Degraded,
    Critical,
}

impl ExportHealth {
    pub fn from_success_rate(success_rate: f64) -> Self {
        if success_rate >= EXCELLENT_SUCCESS_RATE {
            ExportHealth::Excellent
        } else if success_rate >= GOOD_SUCCESS_RATE {
            ExportHealth::Good
        } else if success_rate >= DEGRADED_SUCCESS_RATE {
            ExportHealth::Degraded
        } else {
            ExportHealth::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportHealth::Excellent => "EXCELLENT",
            ExportHealth::Good => "GOOD",
            ExportHealth::Degraded => "DEGRADED",
            ExportHealth::Critical => "CRITICAL",
        }
    }

    /// Operator hint shown next to the tier
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ExportHealth::Excellent => None,
            ExportHealth::Good => Some("monitor for improvements"),
            ExportHealth::Degraded => Some("investigate failures"),
            ExportHealth::Critical => Some("immediate attention required"),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ExportHealth::Excellent => Severity::Ok,
            ExportHealth::Good => Severity::Warning,
            ExportHealth::Degraded => Severity::Degraded,
            ExportHealth::Critical => Severity::Critical,
        }
    }
}

/// Queue status tier, derived from queue utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    Healthy,
    Moderate,
    High,
}

impl QueueStatus {
    pub fn from_utilization(queue_utilization: f64) -> Self {
        if queue_utilization < HEALTHY_QUEUE_UTILIZATION {
            QueueStatus::Healthy
        } else if queue_utilization < MODERATE_QUEUE_UTILIZATION {
            QueueStatus::Moderate
        } else {
            QueueStatus::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Healthy => "HEALTHY",
            QueueStatus::Moderate => "MODERATE",
            QueueStatus::High => "HIGH",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            QueueStatus::Healthy => None,
            QueueStatus::Moderate => Some("monitor load"),
            QueueStatus::High => Some("risk of data loss"),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            QueueStatus::Healthy => Severity::Ok,
            QueueStatus::Moderate => Severity::Warning,
            QueueStatus::High => Severity::Critical,
        }
    }
}

/// Console marker for a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Degraded,
    Critical,
}

impl Severity {
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Ok => "[OK]",
            Severity::Warning => "[WARN]",
            Severity::Degraded => "[DEGR]",
            Severity::Critical => "[CRIT]",
        }
    }
}

/// Which condition triggered a block of advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ExportFailures,
    QueuePressure,
}

/// An ordered block of remediation steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationBlock {
    pub kind: RecommendationKind,
    pub heading: &'static str,
    pub steps: &'static [&'static str],
}

const EXPORT_FAILURE_STEPS: &[&str] = &[
    "Check exporter API token permissions",
    "Verify exporter endpoint configuration",
    "Review network connectivity to the export backend",
    "Check collector logs: docker-compose logs collector",
];

const QUEUE_PRESSURE_STEPS: &[&str] = &[
    "Consider increasing queue_size in configuration",
    "Add more num_consumers for parallel processing",
    "Review batch processor settings",
];

impl RecommendationBlock {
    pub fn export_failures() -> Self {
        Self {
            kind: RecommendationKind::ExportFailures,
            heading: "RECOMMENDATIONS",
            steps: EXPORT_FAILURE_STEPS,
        }
    }

    pub fn queue_pressure() -> Self {
        Self {
            kind: RecommendationKind::QueuePressure,
            heading: "QUEUE RECOMMENDATIONS",
            steps: QUEUE_PRESSURE_STEPS,
        }
    }
}

/// Classified verdicts plus applicable advice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub export_health: ExportHealth,
    pub queue_status: QueueStatus,
    /// Failure advice first, queue advice second
    pub recommendations: Vec<RecommendationBlock>,
}

impl Assessment {
    pub fn classify(analysis: &ExportAnalysis) -> Self {
        let mut recommendations = Vec::with_capacity(2);

        if analysis.failed_metrics > 0.0 {
            recommendations.push(RecommendationBlock::export_failures());
        }
        if analysis.queue_utilization > QUEUE_ADVICE_UTILIZATION {
            recommendations.push(RecommendationBlock::queue_pressure());
        }

        Self {
            export_health: ExportHealth::from_success_rate(analysis.success_rate),
            queue_status: QueueStatus::from_utilization(analysis.queue_utilization),
            recommendations,
        }
    }

    /// All advice as one ordered list
    pub fn recommendations(&self) -> Vec<&'static str> {
        self.recommendations
            .iter()
            .flat_map(|block| block.steps.iter().copied())
            .collect()
    }

    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }
}
