mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::board::Board;
use crate::model::status::{Category, Swatch};
use crate::model::template::builtin_templates;
use crate::ops::session::{EditSession, RemovalOutcome};
use crate::ops::status_ops::Direction;
use crate::ops::validate;
use crate::store::json::JsonStore;
use crate::store::{StatusStore, StoreError, board_io, commit_session};

/// Global override for board directory (set by -C flag)
static BOARD_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_board_cwd()
    if let Some(ref dir) = cli.board_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        BOARD_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => {
            eprintln!("no subcommand (try `slate --help`)");
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before board discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::Statuses => cmd_statuses(json),
            Commands::Templates => cmd_templates(json),
            Commands::Check => cmd_check(json),
            Commands::Tasks => cmd_tasks(json),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Rename(args) => cmd_rename(args),
            Commands::Color(args) => cmd_color(args),
            Commands::Category(args) => cmd_category(args),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Rm(args) => cmd_rm(args),
            Commands::Task(cmd) => match cmd.command {
                TaskCommands::Add(args) => cmd_task_add(args),
                TaskCommands::Set(args) => cmd_task_set(args),
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_board_cwd() -> Result<(Board, JsonStore), StoreError> {
    let start = match BOARD_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(StoreError::IoError)?,
    };
    let root = board_io::discover_board(&start)?;
    board_io::load_board(&root)
}

/// Resolve a status argument (id or name) to its id
fn resolve_status(session: &EditSession, arg: &str) -> Result<String, String> {
    session
        .collection()
        .resolve(arg)
        .map(|s| s.id.clone())
        .ok_or_else(|| format!("no status matching '{}'", arg))
}

/// Commit the session, refusing while invariants are violated
fn commit_guarded(
    store: &mut JsonStore,
    session: &EditSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let violations = session.violations();
    if !violations.is_empty() {
        let messages: Vec<String> = violations.iter().map(|v| v.message()).collect();
        return Err(format!("cannot save: {}", messages.join(" ")).into());
    }
    commit_session(store, session)?;
    Ok(())
}

fn category_symbol(category: Category) -> &'static str {
    match category {
        Category::Todo => "[ ]",
        Category::Active => "[>]",
        Category::Done => "[x]",
        Category::Cancelled => "[~]",
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_statuses(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (board, store) = load_board_cwd()?;
    let collection = store.collection();

    if json {
        let statuses = collection
            .display_order()
            .into_iter()
            .map(StatusJson::from_record)
            .collect();
        let out = StatusListJson {
            board: board.config.board.name.clone(),
            statuses,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for category in Category::ALL {
            let lane = collection.in_category(category);
            if lane.is_empty() {
                continue;
            }
            println!("{}", category.label());
            for record in lane {
                let tasks = store.count_tasks_referencing(&record.id)?;
                let suffix = match tasks {
                    0 => String::new(),
                    1 => "  (1 task)".to_string(),
                    n => format!("  ({} tasks)", n),
                };
                println!(
                    "  {} `{}` {}  {}{}",
                    category_symbol(record.category),
                    record.id,
                    record.name,
                    record.color.name(),
                    suffix
                );
            }
        }
    }
    Ok(())
}

fn cmd_templates(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let templates = builtin_templates();
    if json {
        let out: Vec<TemplateJson> = templates
            .iter()
            .map(|t| TemplateJson {
                id: t.id.clone(),
                name: t.name.clone(),
                statuses: t.statuses.len(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for template in templates {
            let names: Vec<&str> = template.statuses.iter().map(|s| s.name.as_str()).collect();
            println!("{:<10} {}", template.id, names.join(" / "));
        }
    }
    Ok(())
}

fn cmd_check(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, store) = load_board_cwd()?;
    let violations = validate::check_collection(&store.collection());

    if json {
        let out = CheckJson {
            valid: violations.is_empty(),
            violations: violations
                .iter()
                .map(|v| ViolationJson {
                    violation: v.clone(),
                    message: v.message(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if violations.is_empty() {
        println!("ok");
    } else {
        for violation in &violations {
            println!("{}", violation.message());
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn cmd_tasks(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, store) = load_board_cwd()?;
    let collection = store.collection();

    if json {
        let out: Vec<TaskJson> = store
            .tasks()
            .iter()
            .map(|t| {
                let name = collection
                    .get(&t.status_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or(t.status_id.as_str());
                TaskJson::from_record(t, name)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for task in store.tasks() {
            let status = collection
                .get(&task.status_id)
                .map(|s| s.name.as_str())
                .unwrap_or("?");
            println!("`{}` {}  [{}]", task.id, task.title, status);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let mut session = EditSession::new(store.collection());

    let category = Category::from_str(&args.category)?;
    if !validate::can_add_to(category, session.collection()) {
        return Err(format!(
            "{} already has a status; it allows only one",
            category.label()
        )
        .into());
    }
    let id = match session.add(category) {
        Some(id) => id,
        None => return Err("status was not added".into()),
    };
    if let Some(name) = &args.name {
        session.rename(&id, name);
    }
    commit_guarded(&mut store, &session)?;
    println!("added `{}`", id);
    Ok(())
}

fn cmd_rename(args: RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let mut session = EditSession::new(store.collection());
    let id = resolve_status(&session, &args.status)?;
    session.rename(&id, &args.new_name);
    if !session.is_dirty() {
        return Err("name unchanged (empty names are not allowed)".into());
    }
    commit_guarded(&mut store, &session)
}

fn cmd_color(args: ColorArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let mut session = EditSession::new(store.collection());
    let id = resolve_status(&session, &args.status)?;
    let color = Swatch::from_str(&args.color)?;
    session.recolor(&id, color);
    commit_guarded(&mut store, &session)
}

fn cmd_category(args: CategoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let mut session = EditSession::new(store.collection());
    let id = resolve_status(&session, &args.status)?;

    match &args.category {
        Some(category) => {
            let category = Category::from_str(category)?;
            if !session.recategorize(&id, category) {
                return Err(format!(
                    "cannot move `{}` to {}: the lane already has a status",
                    id,
                    category.label()
                )
                .into());
            }
        }
        None => session.cycle_category(&id),
    }
    commit_guarded(&mut store, &session)?;
    let category = session
        .collection()
        .get(&id)
        .map(|s| s.category.label())
        .unwrap_or("?");
    println!("`{}` is now {}", id, category);
    Ok(())
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let mut session = EditSession::new(store.collection());
    let id = resolve_status(&session, &args.status)?;
    let direction = match args.direction.to_lowercase().as_str() {
        "up" => Direction::Up,
        "down" => Direction::Down,
        other => return Err(format!("invalid direction: {} (expected up or down)", other).into()),
    };
    session.reorder(&id, direction);
    commit_guarded(&mut store, &session)
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let mut session = EditSession::new(store.collection());
    let id = resolve_status(&session, &args.status)?;

    let live_tasks = store.count_tasks_referencing(&id)?;
    match session.remove(&id, live_tasks)? {
        RemovalOutcome::Removed => {
            commit_guarded(&mut store, &session)?;
            println!("removed `{}`", id);
            Ok(())
        }
        RemovalOutcome::NeedsRemap {
            task_count,
            candidates,
        } => match &args.into {
            Some(target) => {
                let target_id = resolve_status(&session, target)?;
                session.confirm_remap(&target_id)?;
                commit_guarded(&mut store, &session)?;
                println!(
                    "removed `{}`, remapped {} task{} to `{}`",
                    id,
                    task_count,
                    if task_count == 1 { "" } else { "s" },
                    target_id
                );
                Ok(())
            }
            None => {
                let names: Vec<String> = candidates
                    .iter()
                    .filter_map(|cid| session.collection().get(cid))
                    .map(|s| format!("`{}` {}", s.id, s.name))
                    .collect();
                Err(format!(
                    "{} task{} reference this status; pick a target with --into: {}",
                    task_count,
                    if task_count == 1 { "" } else { "s" },
                    names.join(", ")
                )
                .into())
            }
        },
    }
}

fn cmd_task_add(args: TaskAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let collection = store.collection();
    let status_id = match &args.status {
        Some(arg) => collection
            .resolve(arg)
            .map(|s| s.id.clone())
            .ok_or_else(|| format!("no status matching '{}'", arg))?,
        None => collection
            .in_category(Category::Todo)
            .first()
            .map(|s| s.id.clone())
            .ok_or("board has no todo status")?,
    };
    let id = store.add_task(&args.title, &status_id)?;
    println!("added `{}`", id);
    Ok(())
}

fn cmd_task_set(args: TaskSetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_board, mut store) = load_board_cwd()?;
    let collection = store.collection();
    let status_id = collection
        .resolve(&args.status)
        .map(|s| s.id.clone())
        .ok_or_else(|| format!("no status matching '{}'", args.status))?;
    store.set_task_status(&args.task_id, &status_id)?;
    Ok(())
}
