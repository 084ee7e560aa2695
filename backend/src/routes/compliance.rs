use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::Severity;

// =========================================================
// Compliance types
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCategory {
    pub category: String,
    pub icon: String,
    pub issues: usize,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_issues: usize,
    pub categories: Vec<ComplianceCategory>,
    pub queue_violations: usize,
    pub safety_issues: usize,
    pub unresolved_safety: usize,
    pub otp_violations: usize,
    pub slot_violations: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    Pending,
    Scheduled,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingTask {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub deadline: NaiveDate,
    pub days_remaining: u64,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_to: String,
}
