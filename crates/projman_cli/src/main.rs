//! projman CLI entry point.
//!
//! # Responsibility
//! - Resolve configuration, start optional logging, and load the store.
//! - Map subcommands to tracker service calls and render results.
//!
//! # Invariants
//! - Any validation, not-found or save error exits with status 1.
//! - Load problems are warnings on stderr; the command still runs.

mod args;
mod render;

use anyhow::{anyhow, Result};
use args::{Cli, Commands, ProjectAction, TaskAction, UserAction};
use clap::Parser;
use log::{info, warn};
use projman_core::{
    init_logging, JsonFileRepository, NewTaskRequest, StoreRepository, TrackerConfig,
    TrackerService,
};
use render::{projects_table, render_or_empty, tasks_table, users_table};
use std::io::{self, Write};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()
        .map_err(|err| anyhow!("failed to resolve working directory: {err}"))?;
    let config = TrackerConfig::resolve(cli.data_file, cli.log_level, cli.log_dir, &cwd);

    if let Some(level) = config.log_level.as_deref() {
        if let Err(err) = init_logging(level, &config.log_dir) {
            eprintln!("Warning: file logging disabled: {err}");
        }
    }

    let mut service = TrackerService::open(JsonFileRepository::new(&config.data_file));
    if let Some(warning) = service.load_warning() {
        warn!("event=cli_load module=cli status=degraded");
        eprintln!("Warning: {warning}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Commands::User { action } => cmd_user(&mut service, action, &mut out),
        Commands::Project { action } => cmd_project(&mut service, action, &mut out),
        Commands::Task { action } => cmd_task(&mut service, action, &mut out),
    };

    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok"),
        Err(_) => warn!("event=cli_command module=cli status=error"),
    }
    result
}

fn cmd_user<R: StoreRepository>(
    service: &mut TrackerService<R>,
    action: UserAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        UserAction::Add { name, email } => {
            let user = service.add_user(&name, &email)?;
            writeln!(out, "✓ Added user: {} ({})", user.name, user.email)?;
            writeln!(out, "ID: {}", user.id())?;
        }
        UserAction::Remove { user_id } => {
            let user = service.remove_user(&user_id)?;
            writeln!(out, "✓ Removed user with ID: {}", user.id())?;
        }
        UserAction::List => {
            let table = users_table("Users", service.users());
            render_or_empty(out, &table, "No users found.")?;
        }
        UserAction::Show { user_id } => {
            let overview = service.user_overview(&user_id)?;
            writeln!(out, "User: {} ({})", overview.user.name, overview.user.email)?;
            writeln!(out, "ID: {}", overview.user.id())?;
            writeln!(out)?;
            let tasks = tasks_table("Assigned Tasks", overview.tasks);
            render_or_empty(out, &tasks, "No tasks assigned.")?;
            writeln!(out)?;
            let projects = projects_table("Projects", overview.projects);
            render_or_empty(out, &projects, "No projects.")?;
        }
    }
    Ok(())
}

fn cmd_project<R: StoreRepository>(
    service: &mut TrackerService<R>,
    action: ProjectAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ProjectAction::Add {
            title,
            description,
            due_date,
        } => {
            let project = service.add_project(&title, &description, &due_date)?;
            writeln!(out, "✓ Added project: {}", project.title)?;
            writeln!(out, "ID: {}", project.id())?;
        }
        ProjectAction::Remove { project_id } => {
            let project = service.remove_project(&project_id)?;
            writeln!(out, "✓ Removed project with ID: {}", project.id())?;
        }
        ProjectAction::List => {
            let table = projects_table("Projects", service.projects());
            render_or_empty(out, &table, "No projects found.")?;
        }
        ProjectAction::Show { project_id } => {
            let overview = service.project_overview(&project_id)?;
            let project = overview.project;
            writeln!(out, "Project: {}", project.title)?;
            writeln!(out, "ID: {}", project.id())?;
            writeln!(out, "Due: {}", project.due_date)?;
            if !project.description.is_empty() {
                writeln!(out, "Description: {}", project.description)?;
            }
            writeln!(out)?;
            let users = users_table("Users", overview.users);
            render_or_empty(out, &users, "No users.")?;
            writeln!(out)?;
            let tasks = tasks_table("Tasks", overview.tasks);
            render_or_empty(out, &tasks, "No tasks.")?;
        }
    }
    Ok(())
}

fn cmd_task<R: StoreRepository>(
    service: &mut TrackerService<R>,
    action: TaskAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        TaskAction::Add {
            title,
            status,
            assigned_to,
            project,
        } => {
            let request = NewTaskRequest {
                title,
                status: Some(status),
                assigned_to,
                project_id: project,
            };
            let task = service.add_task(&request)?;
            writeln!(out, "✓ Added task: {}", task.title)?;
            writeln!(out, "Status: {}", task.status)?;
            writeln!(out, "ID: {}", task.id())?;
        }
        TaskAction::Remove { task_id } => {
            let task = service.remove_task(&task_id)?;
            writeln!(out, "✓ Removed task with ID: {}", task.id())?;
        }
        TaskAction::List { status } => {
            let tasks = service.tasks_with_status(status.as_deref())?;
            let table = tasks_table("Tasks", tasks);
            render_or_empty(out, &table, "No tasks found.")?;
        }
        TaskAction::UpdateStatus { task_id, status } => {
            let task = service.update_task_status(&task_id, &status)?;
            writeln!(out, "✓ Updated task {} to status: {}", task.id(), task.status)?;
        }
        TaskAction::Assign { task_id, user_id } => {
            let task = service.assign_task(&task_id, &user_id)?;
            let assignee = task.assigned_to().map(|id| id.to_string()).unwrap_or_default();
            writeln!(out, "✓ Assigned task {} to user: {assignee}", task.id())?;
        }
    }
    Ok(())
}
