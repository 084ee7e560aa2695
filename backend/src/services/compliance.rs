//! Compliance issue categories and the upcoming task calendar.

use chrono::{Days, NaiveDate};

use crate::aggregation::{filter, sort_by_measure, Direction, TerminalFilter};
use crate::algorithms::Severity;
use crate::routes::compliance::*;

use super::ReasoningEngine;

/// On-time performance below this counts as a violation.
const OTP_VIOLATION_PCT: f64 = 80.0;

struct TaskTemplate {
    id: u32,
    title: &'static str,
    category: &'static str,
    offset_days: u64,
    priority: TaskPriority,
    status: TaskStatus,
    assigned_to: &'static str,
}

const TASK_CATALOGUE: &[TaskTemplate] = &[
    TaskTemplate {
        id: 1,
        title: "DGCA Safety Audit Preparation",
        category: "Regulatory",
        offset_days: 5,
        priority: TaskPriority::High,
        status: TaskStatus::InProgress,
        assigned_to: "Safety & Compliance Team",
    },
    TaskTemplate {
        id: 2,
        title: "Quarterly Queue Performance Report: AERA Submission",
        category: "Regulatory",
        offset_days: 7,
        priority: TaskPriority::High,
        status: TaskStatus::Pending,
        assigned_to: "Operations Analytics",
    },
    TaskTemplate {
        id: 3,
        title: "Fire Safety Drill: Terminal 2",
        category: "Internal SOPs",
        offset_days: 3,
        priority: TaskPriority::High,
        status: TaskStatus::Scheduled,
        assigned_to: "Fire & Emergency",
    },
    TaskTemplate {
        id: 4,
        title: "Security Equipment Calibration: All Lanes",
        category: "Operational",
        offset_days: 10,
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        assigned_to: "Security Operations",
    },
    TaskTemplate {
        id: 5,
        title: "Baggage Handling SLA Review with Airlines",
        category: "Operational",
        offset_days: 14,
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        assigned_to: "Ground Handling",
    },
    TaskTemplate {
        id: 6,
        title: "Environmental Compliance: Noise Monitoring Report",
        category: "Legal",
        offset_days: 21,
        priority: TaskPriority::Low,
        status: TaskStatus::Pending,
        assigned_to: "Environment & Sustainability",
    },
    TaskTemplate {
        id: 7,
        title: "Slot Coordination Meeting: Summer Schedule",
        category: "Regulatory",
        offset_days: 2,
        priority: TaskPriority::High,
        status: TaskStatus::Confirmed,
        assigned_to: "Slot Coordination",
    },
    TaskTemplate {
        id: 8,
        title: "Annual Accessibility Compliance Audit",
        category: "Legal",
        offset_days: 30,
        priority: TaskPriority::Low,
        status: TaskStatus::Pending,
        assigned_to: "Facilities Management",
    },
];

/// Task calendar relative to `date`, soonest deadline first.
pub fn upcoming_tasks(date: NaiveDate) -> Vec<UpcomingTask> {
    let mut tasks: Vec<UpcomingTask> = TASK_CATALOGUE
        .iter()
        .map(|t| UpcomingTask {
            id: t.id,
            title: t.title.to_string(),
            category: t.category.to_string(),
            deadline: date.checked_add_days(Days::new(t.offset_days)).unwrap_or(date),
            days_remaining: t.offset_days,
            priority: t.priority,
            status: t.status,
            assigned_to: t.assigned_to.to_string(),
        })
        .collect();
    sort_by_measure(&mut tasks, |t| t.days_remaining as f64, Direction::Ascending);
    tasks
}

fn category(
    category: &str,
    icon: &str,
    issues: usize,
    description: String,
    severity: Severity,
) -> ComplianceCategory {
    ComplianceCategory {
        category: category.to_string(),
        icon: icon.to_string(),
        issues,
        description,
        severity,
    }
}

impl ReasoningEngine {
    /// Issue counts per compliance category.
    ///
    /// Operational counts queue breaches plus one when any terminal missed the
    /// OTP floor; Regulatory counts safety events plus one when more than five
    /// slots ran late; Internal SOPs counts queue breaches beyond three plus
    /// one when a safety event is unresolved.
    pub fn compliance_summary(&self, date: NaiveDate, terminals: &TerminalFilter) -> ComplianceSummary {
        let predicate = self.day(date, terminals);
        let target = self.policy.compliance_target;

        let queue_violations = filter(self.store.zone_compliance(), &predicate)
            .filter(|r| r.actual_compliance_pct < target)
            .count();
        let safety: Vec<_> = filter(self.store.safety(), &predicate).collect();
        let safety_issues = safety.len();
        let unresolved_safety = safety.iter().filter(|r| !r.resolved).count();
        let otp_violations = filter(self.store.otp(), &predicate)
            .filter(|r| r.otp_pct < OTP_VIOLATION_PCT)
            .count();
        let slot_violations: i64 = filter(self.store.slot_adherence(), &predicate)
            .map(|r| r.late_slots)
            .sum();

        let categories = vec![
            category(
                "Operational",
                "Settings",
                queue_violations + usize::from(otp_violations > 0),
                format!(
                    "{} queue compliance breaches, {} OTP violations",
                    queue_violations, otp_violations
                ),
                match queue_violations {
                    n if n > 5 => Severity::High,
                    n if n > 2 => Severity::Medium,
                    _ => Severity::Low,
                },
            ),
            category(
                "Regulatory",
                "Scale",
                safety_issues + usize::from(slot_violations > 5),
                format!(
                    "{} safety events, {} slot adherence deviations",
                    safety_issues, slot_violations
                ),
                if unresolved_safety > 2 {
                    Severity::High
                } else if safety_issues > 3 {
                    Severity::Medium
                } else {
                    Severity::Low
                },
            ),
            category(
                "Legal",
                "Gavel",
                0,
                "No active legal compliance events".to_string(),
                Severity::Low,
            ),
            category(
                "Internal SOPs",
                "BookOpen",
                queue_violations.saturating_sub(3) + usize::from(unresolved_safety > 0),
                "SOP deviations in queue management and safety protocols".to_string(),
                if queue_violations > 3 {
                    Severity::Medium
                } else {
                    Severity::Low
                },
            ),
        ];

        ComplianceSummary {
            total_issues: categories.iter().map(|c| c.issues).sum(),
            categories,
            queue_violations,
            safety_issues,
            unresolved_safety,
            otp_violations,
            slot_violations,
        }
    }
}

#[cfg(test)]
#[path = "compliance_tests.rs"]
mod compliance_tests;
