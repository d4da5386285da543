use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "projman")]
#[command(about = "Project management CLI tool for users, projects and tasks")]
#[command(version)]
pub struct Cli {
    /// JSON file holding all users, projects and tasks
    #[arg(long, global = true, env = "PROJMAN_DATA_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Enable file logging at this level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "PROJMAN_LOG", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "PROJMAN_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User management
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Project management
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Task management
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Add a new user
    Add {
        /// User name
        name: String,
        /// User email
        email: String,
    },

    /// Remove a user
    Remove {
        /// User ID to remove
        user_id: String,
    },

    /// List all users
    List,

    /// Show a user with assigned tasks and projects
    Show {
        /// User ID to show
        user_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    /// Add a new project
    Add {
        /// Project title
        title: String,
        /// Project description
        description: String,
        /// Due date (YYYY-MM-DD)
        due_date: String,
    },

    /// Remove a project
    Remove {
        /// Project ID to remove
        project_id: String,
    },

    /// List all projects
    List,

    /// Show a project with its users and tasks
    Show {
        /// Project ID to show
        project_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Task status (todo|in-progress|done)
        #[arg(long, default_value = "todo")]
        status: String,

        /// User ID to assign the task to
        #[arg(long, value_name = "USER_ID")]
        assigned_to: Option<String>,

        /// Project ID for the task
        #[arg(long, value_name = "PROJECT_ID")]
        project: Option<String>,
    },

    /// Remove a task (only tasks marked done)
    Remove {
        /// Task ID to remove
        task_id: String,
    },

    /// List all tasks
    List {
        /// Only show tasks with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Change a task's status
    UpdateStatus {
        /// Task ID to update
        task_id: String,
        /// New status (todo|in-progress|done)
        status: String,
    },

    /// Assign a task to a user
    Assign {
        /// Task ID to assign
        task_id: String,
        /// User ID to assign the task to
        user_id: String,
    },
}
