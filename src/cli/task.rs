//! timeboard task command implementations.

use std::path::PathBuf;

use crate::actor;
use crate::audit::TaskEdit;
use crate::board::Board;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventDestination;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::report;
use crate::storage::BoardStorage;
use crate::task::{Task, TaskDraft, TaskStatus};
use crate::timeclock;
use crate::user;

use super::TaskCommands;

/// Global flags shared by every subcommand.
pub struct CliContext {
    pub data: Option<PathBuf>,
    pub user: Option<String>,
    pub events: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

impl CliContext {
    /// Events on stdout preempt regular output, as both are line-oriented.
    pub fn events_to_stdout(&self) -> bool {
        self.events.as_deref().map(str::trim) == Some("-")
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            json: self.json && !self.events_to_stdout(),
            quiet: self.quiet || self.events_to_stdout(),
        }
    }

    /// Configuration from `timeboard.toml` in the working directory.
    pub fn load_config(&self) -> Result<Config> {
        let cwd = std::env::current_dir()?;
        Ok(Config::load_from_dir(&cwd))
    }

    /// Resolve config, actor, and storage, then open the board.
    pub fn open_board(&self) -> Result<Board> {
        let config = self.load_config()?;
        let actor = actor::resolve_actor(&config, self.user.as_deref());

        let data_dir = self
            .data
            .clone()
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(BoardStorage::default_dir);
        let storage = BoardStorage::for_dir(data_dir);

        let mut board = Board::open(storage, actor)?;
        if let Some(destination) = EventDestination::parse(self.events.as_deref()) {
            board = board.with_events(destination.open()?);
        }
        Ok(board)
    }
}

pub fn run(command: TaskCommands, ctx: CliContext) -> Result<()> {
    match command {
        TaskCommands::New {
            name,
            description,
            assign,
            estimate,
            url,
        } => run_new(name, description, assign, estimate, url, ctx),
        TaskCommands::List { assignee, status } => run_list(assignee, status, ctx),
        TaskCommands::Show { id } => run_show(id, ctx),
        TaskCommands::Edit {
            id,
            name,
            description,
            url,
        } => run_edit(id, name, description, url, ctx),
        TaskCommands::Note { id, text } => run_note(id, text, ctx),
        TaskCommands::Advance { id } => run_advance(id, ctx),
        TaskCommands::Status { id, status } => run_status(id, status, ctx),
        TaskCommands::Time { id, elapsed } => run_time(id, elapsed, ctx),
        TaskCommands::Rm { ids } => run_rm(ids, ctx),
    }
}

fn run_new(
    name: String,
    description: String,
    assign: String,
    estimate: String,
    url: Option<String>,
    ctx: CliContext,
) -> Result<()> {
    let config = ctx.load_config()?;
    let mut board = ctx.open_board()?;
    let task = board.create(TaskDraft {
        name,
        description,
        assigned_to: assign,
        estimated_time: timeclock::decode_hms(&estimate),
        url_link: url,
    })?;

    let mut human = HumanOutput::new("Task created");
    if let Some(warning) = board.take_event_warning() {
        human.push_warning(warning);
    }
    if user::find_by_email(&config.users, &task.assigned_to).is_none() {
        human.push_warning(format!(
            "assignee {} is not in the configured user roster",
            task.assigned_to
        ));
    }
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Assigned to", task.assigned_to.clone());
    human.push_summary("Estimate", timeclock::encode_hms(task.estimated_time));

    emit_success(ctx.output_options(), "task new", &task, Some(&human))
}

fn run_list(assignee: Option<String>, status: Option<String>, ctx: CliContext) -> Result<()> {
    let board = ctx.open_board()?;
    let status = status.as_deref().map(TaskStatus::parse).transpose()?;

    let mut tasks: Vec<Task> = match status {
        Some(wanted) => report::with_status(board.list(), wanted)
            .into_iter()
            .cloned()
            .collect(),
        None => board.list().to_vec(),
    };
    if let Some(email) = assignee.as_deref() {
        tasks.retain(|task| task.assigned_to == email);
    }

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(format!(
            "[{}] {} {} ({}, {})",
            task.status,
            task.id,
            task.name,
            task.assigned_to,
            timeclock::encode_hms(task.elapsed_time)
        ));
    }

    emit_success(ctx.output_options(), "task list", &tasks, Some(&human))
}

fn run_show(id: String, ctx: CliContext) -> Result<()> {
    let board = ctx.open_board()?;
    let task = board.get(&id)?.clone();

    let mut human = HumanOutput::new(task.name.clone());
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Assigned to", task.assigned_to.clone());
    human.push_summary("Estimate", timeclock::encode_hms(task.estimated_time));
    human.push_summary("Elapsed", timeclock::encode_hms(task.elapsed_time));
    if let Some(url) = &task.url_link {
        human.push_summary("URL", url.clone());
    }
    if task.is_completed() {
        let on_time = if timeclock::is_on_time(&task) {
            "on time"
        } else {
            "overran"
        };
        human.push_summary("Outcome", on_time);
    }
    for note in &task.notes {
        human.push_detail(format!("note [{}]: {}", note.user, note.text));
    }
    for log in &task.logs {
        human.push_detail(format!("log [{}]: {}", log.user, log.change));
    }

    emit_success(ctx.output_options(), "task show", &task, Some(&human))
}

fn run_edit(
    id: String,
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    ctx: CliContext,
) -> Result<()> {
    let mut board = ctx.open_board()?;

    let current = board.get(&id)?;
    let mut edit = TaskEdit::from_task(current);
    if let Some(name) = name {
        edit.name = name;
    }
    if let Some(description) = description {
        edit.description = description;
    }
    if let Some(url) = url {
        edit.url_link = Some(url);
    }

    let task = board.edit(&id, edit)?;

    let mut human = HumanOutput::new("Task updated");
    if let Some(warning) = board.take_event_warning() {
        human.push_warning(warning);
    }
    human.push_summary("ID", task.id.clone());
    human.push_summary("Name", task.name.clone());

    emit_success(ctx.output_options(), "task edit", &task, Some(&human))
}

fn run_note(id: String, text: String, ctx: CliContext) -> Result<()> {
    let mut board = ctx.open_board()?;
    let task = board.add_note(&id, &text)?;

    let mut human = HumanOutput::new("Note added");
    if let Some(warning) = board.take_event_warning() {
        human.push_warning(warning);
    }
    human.push_summary("ID", task.id.clone());
    human.push_summary("Notes", task.notes.len().to_string());

    emit_success(ctx.output_options(), "task note", &task, Some(&human))
}

fn run_advance(id: String, ctx: CliContext) -> Result<()> {
    let mut board = ctx.open_board()?;
    let task = board.advance(&id)?;
    emit_status_change("task advance", task, board, ctx)
}

fn run_status(id: String, status: String, ctx: CliContext) -> Result<()> {
    let mut board = ctx.open_board()?;
    let to = TaskStatus::parse(&status)?;
    let task = board.set_status(&id, to)?;
    emit_status_change("task status", task, board, ctx)
}

fn emit_status_change(
    command: &str,
    task: Task,
    mut board: Board,
    ctx: CliContext,
) -> Result<()> {
    let mut human = HumanOutput::new("Status changed");
    if let Some(warning) = board.take_event_warning() {
        human.push_warning(warning);
    }
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.to_string());
    if let Some(completed_at) = task.completed_at {
        human.push_summary("Completed at", completed_at.to_rfc3339());
    }

    emit_success(ctx.output_options(), command, &task, Some(&human))
}

fn run_time(id: String, elapsed: String, ctx: CliContext) -> Result<()> {
    let mut board = ctx.open_board()?;
    let seconds = timeclock::decode_hms(&elapsed);
    let task = board.record_time(&id, seconds)?;

    let mut human = HumanOutput::new("Time recorded");
    if let Some(warning) = board.take_event_warning() {
        human.push_warning(warning);
    }
    human.push_summary("ID", task.id.clone());
    human.push_summary("Elapsed", timeclock::encode_hms(task.elapsed_time));

    emit_success(ctx.output_options(), "task time", &task, Some(&human))
}

#[derive(serde::Serialize)]
struct TaskRmOutput {
    removed: usize,
}

fn run_rm(ids: Vec<String>, ctx: CliContext) -> Result<()> {
    let mut board = ctx.open_board()?;
    let removed = board.remove(&ids)?;
    let output = TaskRmOutput { removed };

    let mut human = HumanOutput::new(format!("{removed} task(s) deleted"));
    if let Some(warning) = board.take_event_warning() {
        human.push_warning(warning);
    }

    emit_success(ctx.output_options(), "task rm", &output, Some(&human))
}
