//! Read-side aggregation: report KPIs and archive filtering.
//!
//! Everything here is pure over a task snapshot; nothing mutates the
//! repository, so these are safe to run concurrently with any number of
//! other reads.

use chrono::{DateTime, Datelike, Days, Utc};
use serde::Serialize;

use crate::task::{Task, TaskStatus};
use crate::timeclock;
use crate::error::{Error, Result};

/// Creation-date window for report filtering, applied to `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    /// Same calendar date as now.
    Today,
    /// Last seven days, inclusive of today.
    LastWeek,
    /// The current calendar month.
    ThisMonth,
}

impl DateRange {
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "today" | "daily" => Ok(DateRange::Today),
            "week" | "weekly" => Ok(DateRange::LastWeek),
            "month" | "monthly" => Ok(DateRange::ThisMonth),
            other => Err(Error::InvalidInput(format!(
                "unknown date range '{other}' (expected all, today, week, month)"
            ))),
        }
    }

    fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        let created = created_at.date_naive();
        match self {
            DateRange::All => true,
            DateRange::Today => created == today,
            DateRange::LastWeek => {
                let start = today.checked_sub_days(Days::new(7)).unwrap_or(today);
                created >= start
            }
            DateRange::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                created >= first
            }
        }
    }
}

/// Narrowing criteria for reports: assignee (exact email match) and a
/// creation-date window.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub assignee: Option<String>,
    pub range: DateRange,
}

impl ReportFilter {
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        if let Some(assignee) = &self.assignee {
            if &task.assigned_to != assignee {
                return false;
            }
        }
        self.range.contains(task.created_at, now)
    }
}

/// Aggregated KPIs over a filtered task set. Completion figures only count
/// completed tasks, where elapsed time is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Mean elapsed seconds over completed tasks; 0 when none completed.
    pub avg_completion_time: u64,
    /// Share of completed tasks finished within estimate, rounded to a
    /// whole percent; 0 when none completed.
    pub on_time_percentage: u32,
}

impl ReportSummary {
    pub fn avg_completion_display(&self) -> String {
        timeclock::format_duration(self.avg_completion_time)
    }

    pub fn on_time_display(&self) -> String {
        format!("{}%", self.on_time_percentage)
    }
}

/// Compute report KPIs over a snapshot.
pub fn aggregate(tasks: &[Task], filter: &ReportFilter, now: DateTime<Utc>) -> ReportSummary {
    let filtered: Vec<&Task> = tasks
        .iter()
        .filter(|task| filter.matches(task, now))
        .collect();
    let completed: Vec<&Task> = filtered
        .iter()
        .copied()
        .filter(|task| task.is_completed())
        .collect();

    let avg_completion_time = if completed.is_empty() {
        0
    } else {
        let total: u64 = completed.iter().map(|task| task.elapsed_time).sum();
        total / completed.len() as u64
    };

    let on_time_percentage = if completed.is_empty() {
        0
    } else {
        let on_time = completed
            .iter()
            .filter(|task| timeclock::is_on_time(task))
            .count();
        ((on_time as f64 / completed.len() as f64) * 100.0).round() as u32
    };

    ReportSummary {
        total_tasks: filtered.len(),
        completed_tasks: completed.len(),
        avg_completion_time,
        on_time_percentage,
    }
}

/// Archive view: completed tasks, optionally narrowed to one assignee.
pub fn archive(tasks: &[Task], assignee: Option<&str>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.is_completed())
        .filter(|task| assignee.map(|email| task.assigned_to == email).unwrap_or(true))
        .cloned()
        .collect()
}

/// Tasks in a given board column, preserving snapshot order.
pub fn with_status<'a>(tasks: &'a [Task], status: TaskStatus) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.status == status).collect()
}
