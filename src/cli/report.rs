//! timeboard report and archive command implementations.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::report::{DateRange, ReportFilter};
use crate::timeclock;

use super::task::CliContext;

pub fn run_report(assignee: Option<String>, range: String, ctx: CliContext) -> Result<()> {
    let board = ctx.open_board()?;
    let filter = ReportFilter {
        assignee,
        range: DateRange::parse(&range)?,
    };
    let summary = board.report(&filter);

    let mut human = HumanOutput::new("Report");
    if let Some(assignee) = &filter.assignee {
        human.push_summary("Assignee", assignee.clone());
    }
    human.push_summary("Total tasks", summary.total_tasks.to_string());
    human.push_summary("Avg completion time", summary.avg_completion_display());
    human.push_summary("On-time percentage", summary.on_time_display());

    emit_success(ctx.output_options(), "report", &summary, Some(&human))
}

pub fn run_archive(assignee: Option<String>, ctx: CliContext) -> Result<()> {
    let board = ctx.open_board()?;
    let tasks = board.archive(assignee.as_deref());

    let mut human = HumanOutput::new("Archive");
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        let completed = task
            .completed_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        human.push_detail(format!(
            "{} {} (completed {completed} by {}, {})",
            task.id,
            task.name,
            task.assigned_to,
            timeclock::format_duration(task.elapsed_time)
        ));
    }

    emit_success(ctx.output_options(), "archive", &tasks, Some(&human))
}
