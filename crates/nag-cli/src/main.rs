//! nag CLI - a to-do list with a background reminder loop.

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use nag_core::{nag_home, Error, NagConfig, ReminderSettings, Status, Task, TaskStore, CONFIG_FILE};
use nag_daemon::{Notifier, Reminder, ReminderConfig};
use nag_storage::JsonSnapshotStore;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "nag")]
#[command(about = "nag - To-do list with background reminders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the nag home directory with a default config
    Init,

    /// Add one or more tasks
    Add {
        /// Task descriptions, one task per argument
        #[arg(required = true)]
        descriptions: Vec<String>,
    },

    /// List all tasks
    List,

    /// Replace the description of a task
    Edit {
        /// Task id as shown by `list`
        id: u32,

        /// New description
        description: String,
    },

    /// Delete a task
    Delete {
        /// Task id as shown by `list`
        id: u32,
    },

    /// Cycle a task's status (Incomplete -> In-Progress -> Complete)
    Toggle {
        /// Task id as shown by `list`
        id: u32,
    },

    /// Delete all tasks
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Run the reminder watcher in the foreground
    Remind,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("nag CLI starting");

    let home = resolve_home()?;
    let config = NagConfig::load_or_default(&home)?;

    match cli.command {
        Some(Commands::Init) => {
            let config_path = home.join(CONFIG_FILE);
            if config_path.exists() {
                println!(
                    "{}",
                    format!("nag is already initialized at {}", home.display()).yellow()
                );
                return Ok(());
            }

            NagConfig::write_default(&home)?;

            println!("{}", "✓ Initialized nag".green().bold());
            println!("  Config: {}", config_path.display());
            println!("  Tasks:  {}", config.data_file(&home).display());
            Ok(())
        }

        Some(Commands::Add { descriptions }) => {
            let mut store = open_task_store(&config, &home).await?;

            match store.add(&descriptions.join("\n")).await {
                Ok(added) => {
                    println!(
                        "{}",
                        format!("✓ Added {} task(s)", added.len()).green().bold()
                    );
                    for task in &added {
                        println!("  {} {}", format!("#{}:", task.id).bright_cyan(), task.description);
                    }
                    Ok(())
                }
                Err(e) if e.is_user_error() => {
                    warn_user(&e);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }

        Some(Commands::List) => {
            let store = open_task_store(&config, &home).await?;
            print_tasks(store.tasks());
            Ok(())
        }

        Some(Commands::Edit { id, description }) => {
            let mut store = open_task_store(&config, &home).await?;

            match position_of(&store, id) {
                Some(index) => match store.edit(index, &description).await {
                    Ok(task) => {
                        println!("{} {}", "✓ Updated".green().bold(), render_task(&task));
                        Ok(())
                    }
                    Err(e) if e.is_user_error() => {
                        warn_user(&e);
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                },
                None => {
                    warn_missing_id(id);
                    Ok(())
                }
            }
        }

        Some(Commands::Delete { id }) => {
            let mut store = open_task_store(&config, &home).await?;

            match position_of(&store, id) {
                Some(index) => {
                    let removed = store.delete(index).await?;
                    println!(
                        "{} task #{}: {}",
                        "✓ Deleted".green().bold(),
                        removed.id,
                        removed.description
                    );
                    Ok(())
                }
                None => {
                    warn_missing_id(id);
                    Ok(())
                }
            }
        }

        Some(Commands::Toggle { id }) => {
            let mut store = open_task_store(&config, &home).await?;

            match position_of(&store, id) {
                Some(index) => {
                    let task = store.cycle_status(index).await?;
                    println!("{} {}", "✓".green().bold(), render_task(&task));
                    Ok(())
                }
                None => {
                    warn_missing_id(id);
                    Ok(())
                }
            }
        }

        Some(Commands::Clear { force }) => {
            let mut store = open_task_store(&config, &home).await?;

            if store.is_empty() {
                println!("{}", "No tasks to delete".yellow());
                return Ok(());
            }

            if !force && !confirm_delete_all()? {
                return Ok(());
            }

            let removed = store.clear().await?;
            println!(
                "{}",
                format!("✓ Deleted {} task(s)", removed).green().bold()
            );
            Ok(())
        }

        Some(Commands::Remind) => run_remind(config, &home).await,

        Some(Commands::Version) => {
            println!("nag {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        None => run_session(config, &home).await,
    }
}

/// The per-user nag directory, or a friendly error when the environment
/// defines no home.
fn resolve_home() -> Result<PathBuf> {
    nag_home().ok_or_else(|| anyhow::anyhow!("Could not determine a home directory for nag"))
}

async fn open_task_store(config: &NagConfig, home: &Path) -> Result<TaskStore> {
    let snapshots = JsonSnapshotStore::new(config.data_file(home));
    let store = TaskStore::open(Box::new(snapshots)).await?;
    Ok(store)
}

async fn open_shared_store(config: &NagConfig, home: &Path) -> Result<Arc<RwLock<TaskStore>>> {
    Ok(Arc::new(RwLock::new(open_task_store(config, home).await?)))
}

fn reminder_config_from(settings: &ReminderSettings) -> ReminderConfig {
    ReminderConfig {
        // A configured interval of zero would spin the loop; hold it to
        // at least one second
        interval: Duration::from_secs(settings.interval_secs.max(1)),
        notify_timeout_secs: settings.notify_timeout_secs,
    }
}

/// Map a user-facing task id to its display position.
fn position_of(store: &TaskStore, id: u32) -> Option<usize> {
    store.tasks().iter().position(|task| task.id == id)
}

fn status_colored(status: Status) -> ColoredString {
    let text = status.to_string();
    match status {
        Status::Incomplete => text.yellow(),
        Status::InProgress => text.blue(),
        Status::Complete => text.green(),
    }
}

fn render_task(task: &Task) -> String {
    format!(
        "{} {} ({})",
        format!("#{}:", task.id).bright_cyan(),
        task.description,
        status_colored(task.status)
    )
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks yet".yellow());
        return;
    }
    for task in tasks {
        println!("{}", render_task(task));
    }
}

/// Print a recoverable task error as a warning: a heading for the error
/// class, then the message. The surface keeps running.
fn warn_user(err: &Error) {
    let heading = match err {
        Error::Selection { .. } => "Selection error",
        Error::EmptyDescription | Error::EmptyInput => "Input error",
        _ => "Error",
    };
    eprintln!("{}", format!("⚠ {}: {}", heading, err).yellow());
}

fn warn_missing_id(id: u32) {
    eprintln!(
        "{}",
        format!("⚠ Selection error: no task #{}", id).yellow()
    );
}

fn confirm_delete_all() -> Result<bool> {
    print!("Are you sure you want to delete all tasks? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("{}", "Deletion cancelled".yellow());
        Ok(false)
    }
}

/// Terminal-backed notifier: rings the bell and prints the reminder so it
/// is visible inside the session.
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, title: &str, message: &str, _timeout_secs: u32) -> nag_core::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\x07")?; // terminal bell
        writeln!(
            stdout,
            "{} {}",
            format!("[{}]", title).cyan().bold(),
            message
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Run the reminder loop alone in the foreground until Ctrl+C.
async fn run_remind(config: NagConfig, home: &Path) -> Result<()> {
    let store = open_shared_store(&config, home).await?;
    let reminder_config = reminder_config_from(&config.reminder);
    let interval_secs = reminder_config.interval.as_secs();

    let (reminder, handle) = Reminder::new(store, Arc::new(ConsoleNotifier), reminder_config);
    let join = reminder.run();

    println!("{}", "Reminder watcher running".green());
    println!("  Interval: {}s", interval_secs);
    println!("  Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    println!("\n{}", "Shutting down...".yellow());
    handle.stop().await;
    let _ = join.await;

    println!("{}", "✓ Reminder watcher stopped".green());
    Ok(())
}

/// One parsed line of session input.
#[derive(Debug, PartialEq)]
enum SessionCommand {
    Add(String),
    Edit(u32, String),
    Delete(u32),
    Toggle(u32),
    Clear,
    List,
    Help,
    Quit,
}

/// Parse one line of session input. `Ok(None)` means a blank line.
fn parse_session_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "add" => {
            if rest.is_empty() {
                return Err("usage: add <description>".to_string());
            }
            SessionCommand::Add(rest.to_string())
        }
        "edit" => {
            let (id, description) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: edit <id> <new description>".to_string())?;
            SessionCommand::Edit(parse_id(id)?, description.trim().to_string())
        }
        "delete" | "del" => SessionCommand::Delete(parse_id(rest)?),
        "toggle" => SessionCommand::Toggle(parse_id(rest)?),
        "clear" => SessionCommand::Clear,
        "list" | "ls" => SessionCommand::List,
        "help" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(Some(command))
}

fn parse_id(text: &str) -> std::result::Result<u32, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("expected a task id".to_string());
    }
    text.parse::<u32>()
        .map_err(|_| format!("'{}' is not a task id", text))
}

fn print_session_help() {
    println!("Commands:");
    println!("  add <description>        add a task");
    println!("  edit <id> <description>  replace a task's description");
    println!("  delete <id>              delete a task");
    println!("  toggle <id>              cycle a task's status");
    println!("  list                     show all tasks");
    println!("  clear                    delete all tasks");
    println!("  quit                     leave the session");
}

/// The interactive session: the main path blocks on user input while the
/// reminder loop (when enabled) runs in the background for exactly the
/// lifetime of the session.
async fn run_session(config: NagConfig, home: &Path) -> Result<()> {
    let store = open_shared_store(&config, home).await?;

    let reminder_parts = if config.reminder.enabled {
        let (reminder, handle) = Reminder::new(
            store.clone(),
            Arc::new(ConsoleNotifier),
            reminder_config_from(&config.reminder),
        );
        let join = reminder.run();
        Some((handle, join))
    } else {
        None
    };

    println!("{}", "My To-Do List".bold());
    {
        let store = store.read().await;
        print_tasks(store.tasks());
    }
    println!("Type 'help' for commands, 'quit' to leave.");

    loop {
        print!("nag> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF behaves like quit
            println!();
            break;
        }

        let command = match parse_session_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{}", usage.yellow());
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,

            SessionCommand::Help => print_session_help(),

            SessionCommand::List => {
                let store = store.read().await;
                print_tasks(store.tasks());
            }

            SessionCommand::Add(input) => {
                let mut store = store.write().await;
                match store.add(&input).await {
                    Ok(added) => {
                        println!(
                            "{}",
                            format!("✓ Added {} task(s)", added.len()).green().bold()
                        );
                        print_tasks(store.tasks());
                    }
                    Err(e) if e.is_user_error() => warn_user(&e),
                    Err(e) => return Err(e.into()),
                }
            }

            SessionCommand::Edit(id, description) => {
                let mut store = store.write().await;
                match position_of(&store, id) {
                    Some(index) => match store.edit(index, &description).await {
                        Ok(task) => {
                            println!("{} {}", "✓ Updated".green().bold(), render_task(&task));
                        }
                        Err(e) if e.is_user_error() => warn_user(&e),
                        Err(e) => return Err(e.into()),
                    },
                    None => warn_missing_id(id),
                }
            }

            SessionCommand::Delete(id) => {
                let mut store = store.write().await;
                match position_of(&store, id) {
                    Some(index) => {
                        let removed = store.delete(index).await?;
                        println!(
                            "{} task #{}: {}",
                            "✓ Deleted".green().bold(),
                            removed.id,
                            removed.description
                        );
                        print_tasks(store.tasks());
                    }
                    None => warn_missing_id(id),
                }
            }

            SessionCommand::Toggle(id) => {
                let mut store = store.write().await;
                match position_of(&store, id) {
                    Some(index) => {
                        let task = store.cycle_status(index).await?;
                        println!("{} {}", "✓".green().bold(), render_task(&task));
                    }
                    None => warn_missing_id(id),
                }
            }

            SessionCommand::Clear => {
                if !confirm_delete_all()? {
                    continue;
                }
                let mut store = store.write().await;
                let removed = store.clear().await?;
                println!(
                    "{}",
                    format!("✓ Deleted {} task(s)", removed).green().bold()
                );
            }
        }
    }

    // The loop is bound to the session: signal it and wait for the exit
    if let Some((handle, join)) = reminder_parts {
        handle.stop().await;
        let _ = join.await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line_is_none() {
        assert_eq!(parse_session_command("   \n").unwrap(), None);
    }

    #[test]
    fn test_parse_add_keeps_full_description() {
        assert_eq!(
            parse_session_command("add Buy milk and eggs").unwrap(),
            Some(SessionCommand::Add("Buy milk and eggs".to_string()))
        );
    }

    #[test]
    fn test_parse_add_without_description_is_usage_error() {
        let err = parse_session_command("add").unwrap_err();
        assert!(err.starts_with("usage: add"));
    }

    #[test]
    fn test_parse_edit_splits_id_and_description() {
        assert_eq!(
            parse_session_command("edit 2 Call Alice tomorrow").unwrap(),
            Some(SessionCommand::Edit(2, "Call Alice tomorrow".to_string()))
        );
    }

    #[test]
    fn test_parse_edit_without_description_is_usage_error() {
        let err = parse_session_command("edit 2").unwrap_err();
        assert!(err.starts_with("usage: edit"));
    }

    #[test]
    fn test_parse_delete_and_alias() {
        assert_eq!(
            parse_session_command("delete 3").unwrap(),
            Some(SessionCommand::Delete(3))
        );
        assert_eq!(
            parse_session_command("del 3").unwrap(),
            Some(SessionCommand::Delete(3))
        );
    }

    #[test]
    fn test_parse_non_numeric_id_is_rejected() {
        let err = parse_session_command("delete two").unwrap_err();
        assert!(err.contains("not a task id"));
    }

    #[test]
    fn test_parse_missing_id_is_rejected() {
        let err = parse_session_command("toggle").unwrap_err();
        assert_eq!(err, "expected a task id");
    }

    #[test]
    fn test_parse_bare_words() {
        assert_eq!(
            parse_session_command("toggle 1").unwrap(),
            Some(SessionCommand::Toggle(1))
        );
        assert_eq!(
            parse_session_command("list").unwrap(),
            Some(SessionCommand::List)
        );
        assert_eq!(
            parse_session_command("clear").unwrap(),
            Some(SessionCommand::Clear)
        );
        assert_eq!(
            parse_session_command("help").unwrap(),
            Some(SessionCommand::Help)
        );
    }

    #[test]
    fn test_parse_quit_aliases() {
        assert_eq!(
            parse_session_command("quit").unwrap(),
            Some(SessionCommand::Quit)
        );
        assert_eq!(
            parse_session_command("exit").unwrap(),
            Some(SessionCommand::Quit)
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse_session_command("frobnicate").unwrap_err();
        assert!(err.contains("unknown command"));
    }

    #[test]
    fn test_zero_configured_interval_is_held_to_one_second() {
        let settings = ReminderSettings {
            enabled: true,
            interval_secs: 0,
            notify_timeout_secs: 10,
        };

        let config = reminder_config_from(&settings);

        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.notify_timeout_secs, 10);
    }
}
