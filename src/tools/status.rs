//! Status line, transient toast and last report of the UV tools.

use bevy::prelude::*;
use uv_transfer::{BatchReport, SnapReport, ToolError};

/// Seconds a toast stays fully visible before fading.
const TOAST_HOLD: f32 = 2.0;
/// Seconds the fade-out takes.
const TOAST_FADE: f32 = 1.0;
/// Failure lines appended to a toast; the full list stays in the panel.
const TOAST_MAX_FAILURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A message shown over the viewport that fades out on its own.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub level: StatusLevel,
    pub age: f32,
}

impl Toast {
    /// Opacity in `0.0..=1.0` for the current age.
    pub fn alpha(&self) -> f32 {
        if self.age <= TOAST_HOLD {
            1.0
        } else {
            (1.0 - (self.age - TOAST_HOLD) / TOAST_FADE).clamp(0.0, 1.0)
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= TOAST_HOLD + TOAST_FADE
    }
}

/// One skipped target of the last batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureLine {
    pub label: String,
    pub reason: String,
}

/// What the panel shows about the last paste.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub title: String,
    pub total: usize,
    pub succeeded: usize,
    pub points_applied: usize,
    pub points_failed: usize,
    pub failures: Vec<FailureLine>,
}

impl ReportSummary {
    pub fn from_batch(title: impl Into<String>, report: &BatchReport) -> Self {
        Self {
            title: title.into(),
            total: report.total,
            succeeded: report.succeeded,
            points_applied: report.points_applied(),
            points_failed: report.points_failed(),
            failures: report
                .failed()
                .map(|r| FailureLine {
                    label: r.label.clone(),
                    reason: r.failure().map(ToString::to_string).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Feedback of the UV tools, rendered by the panel and the toast overlay.
#[derive(Resource, Default, Debug)]
pub struct UvToolStatus {
    pub line: String,
    pub level: StatusLevel,
    pub toast: Option<Toast>,
    pub last_report: Option<ReportSummary>,
}

impl UvToolStatus {
    /// Set the status line and pop a toast with the same text.
    pub fn post(&mut self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        self.toast = Some(Toast {
            text: text.clone(),
            level,
            age: 0.0,
        });
        self.line = text;
        self.level = level;
    }

    pub fn error(&mut self, action: &str, err: &ToolError) {
        let level = match err {
            ToolError::Selection(_) | ToolError::ClipboardEmpty => StatusLevel::Warning,
            ToolError::Capture(_) | ToolError::Snap(_) => StatusLevel::Error,
        };
        warn!("{action}: {err}");
        self.post(level, format!("{action}: {err}"));
    }

    /// Report a finished batch; the toast lists the first few skipped targets.
    pub fn batch(&mut self, title: &str, noun: &str, report: &BatchReport) {
        let summary = ReportSummary::from_batch(title, report);
        let level = if report.succeeded == 0 {
            StatusLevel::Error
        } else if report.failed_count() > 0 || report.points_failed() > 0 {
            StatusLevel::Warning
        } else {
            StatusLevel::Success
        };

        self.post(level, report.summary(noun));
        if let Some(toast) = &mut self.toast {
            for failure in summary.failures.iter().take(TOAST_MAX_FAILURES) {
                toast
                    .text
                    .push_str(&format!("\n{}: {}", failure.label, failure.reason));
            }
            let hidden = summary.failures.len().saturating_sub(TOAST_MAX_FAILURES);
            if hidden > 0 {
                toast.text.push_str(&format!("\n...and {hidden} more"));
            }
        }
        self.last_report = Some(summary);
    }

    pub fn snap(&mut self, report: &SnapReport) {
        let level = if report.snapped() == 0 {
            StatusLevel::Warning
        } else {
            StatusLevel::Success
        };
        self.post(level, report.summary());
    }
}

/// Age the toast and drop it once it has faded.
pub fn tick_toast(time: Res<Time>, mut status: ResMut<UvToolStatus>) {
    let Some(toast) = &mut status.toast else {
        return;
    };
    toast.age += time.delta_secs();
    if toast.expired() {
        status.toast = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uv_transfer::{FailureReason, Metric, Mismatch, MeshId, TransferResult};

    fn skipped(n: u64) -> TransferResult {
        TransferResult::skipped(
            MeshId(n),
            format!("Crate {n}"),
            FailureReason::Topology(Mismatch {
                metric: Metric::UvCount,
                source_value: 24,
                target_value: 30,
            }),
        )
    }

    #[test]
    fn toast_fades_after_hold() {
        let mut toast = Toast {
            text: "x".into(),
            level: StatusLevel::Info,
            age: 0.0,
        };
        assert_eq!(toast.alpha(), 1.0);
        toast.age = TOAST_HOLD + TOAST_FADE / 2.0;
        assert!((toast.alpha() - 0.5).abs() < 1e-5);
        toast.age = TOAST_HOLD + TOAST_FADE;
        assert!(toast.expired());
    }

    #[test]
    fn batch_toast_lists_first_failures_only() {
        let report = BatchReport {
            total: 5,
            succeeded: 0,
            results: (1..=5).map(skipped).collect(),
        };
        let mut status = UvToolStatus::default();
        status.batch("Paste UVs", "meshes", &report);

        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(status.line, "Pasted onto 0/5 meshes (5 skipped)");
        let toast = status.toast.as_ref().unwrap();
        assert!(toast.text.contains("Crate 3: UV count mismatch: source 24, target 30"));
        assert!(!toast.text.contains("Crate 4"));
        assert!(toast.text.ends_with("...and 2 more"));
        assert_eq!(status.last_report.as_ref().map(|r| r.failures.len()), Some(5));
    }
}
