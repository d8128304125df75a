use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slate", about = concat!("[#] slate v", env!("CARGO_PKG_VERSION"), " - workflow statuses, four lanes, no surprises"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new slate board in the current directory
    Init(InitArgs),
    /// List statuses grouped by category
    Statuses,
    /// List the built-in templates
    Templates,
    /// Add a status to a category
    Add(AddArgs),
    /// Rename a status
    Rename(RenameArgs),
    /// Change a status's color
    Color(ColorArgs),
    /// Set a status's category, or cycle it when no category is given
    Category(CategoryArgs),
    /// Move a status up or down within its category
    Mv(MvArgs),
    /// Delete a status, remapping its tasks if it has any
    Rm(RmArgs),
    /// Validate the status collection
    Check,
    /// List tasks
    Tasks,
    /// Task management
    Task(TaskCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Board name (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Built-in template to seed statuses from
    #[arg(long, default_value = "basic")]
    pub template: String,
    /// Seed statuses from a JSON template file instead
    #[arg(long, conflicts_with = "template")]
    pub from: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Category: todo, active, done or cancelled
    pub category: String,
    /// Name for the new status (defaults to "New status")
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Status id or name
    pub status: String,
    pub new_name: String,
}

#[derive(Args)]
pub struct ColorArgs {
    /// Status id or name
    pub status: String,
    /// Swatch color name (gray, blue, green, red, amber, purple, teal, pink, yellow)
    pub color: String,
}

#[derive(Args)]
pub struct CategoryArgs {
    /// Status id or name
    pub status: String,
    /// Destination category; omit to cycle todo → active → done → cancelled
    pub category: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Status id or name
    pub status: String,
    /// Direction: up or down
    pub direction: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Status id or name
    pub status: String,
    /// Status to remap this status's tasks to
    #[arg(long)]
    pub into: Option<String>,
}

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add(TaskAddArgs),
    /// Point a task at a different status
    Set(TaskSetArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    pub title: String,
    /// Status id or name (defaults to the first todo status)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TaskSetArgs {
    pub task_id: String,
    /// Status id or name
    pub status: String,
}
