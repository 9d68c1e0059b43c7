//! # lifeorg
//!
//! A personal life organizer for the terminal. Tasks, habits, goals, money,
//! shopping, notes, a wellness journal and school work live side by side, with
//! a fast CLI for quick entry and a TUI for working through the day's tasks.
//!
//! ## Usage
//!
//! Run without arguments to open the task board:
//!
//! ```bash
//! lifeorg
//! # or explicitly
//! lifeorg ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `a`: Add new task
//! *   `Space`: Toggle completion of the selected task
//! *   `d`: Delete selected task
//! *   `c`: Cycle the filter (all, active, completed)
//! *   `n` / `t` / `m`: Edit title / date / time
//! *   `p` / `r`: Cycle priority / repeat
//!
//! ### Command Line Interface
//!
//! ```bash
//! # A task due today at noon
//! lifeorg task add "Water the plants"
//!
//! # A daily task; completing it schedules tomorrow's
//! lifeorg task add "Morning run" --date 2025-03-01 --time 06:30 --repeat daily
//!
//! lifeorg task list --filter active
//! lifeorg task done <ID>
//!
//! # Dashboard and calendar
//! lifeorg today
//! lifeorg calendar 2025-03
//! ```
//!
//! ## Data Storage
//!
//! Each collection is a JSON file in the data directory:
//! *   Linux: `~/.local/share/lifeorg/`
//! *   macOS: `~/Library/Application Support/lifeorg/`
//! *   Windows: `%LOCALAPPDATA%\lifeorg\`
//!
//! Override it with `--data-dir` or the `LIFEORG_DIR` environment variable.
//! Set `LIFEORG_LOG` (e.g. `debug`) to see what is read and written.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use lifeorg::clock::SystemClock;
use lifeorg::commands::*;
use lifeorg::models::{
    Currency, FontSize, Frequency, HabitFrequency, ItemDraft, ItemFrequency, ItemPatch, Mood,
    Priority, TaskPatch, Theme, TransactionKind,
};
use lifeorg::settings::{ColorKey, SettingsPatch};
use lifeorg::storage::{data_dir, FileStorage};
use lifeorg::tasks::TaskFilter;
use lifeorg::tui::run_tui;
use lifeorg::{AppError, Organizer};

#[derive(Parser)]
#[command(name = "lifeorg")]
#[command(about = "Personal life organizer", long_about = None)]
struct Cli {
    /// Directory holding the data files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Today's tasks, habits and balance at a glance
    Today,
    /// Show a month, Sunday first
    Calendar {
        /// Month as YYYY-MM (default: this month)
        month: Option<String>,
    },
    /// Everything scheduled on one day
    Agenda {
        /// Day as YYYY-MM-DD (default: today)
        date: Option<String>,
    },
    /// Track habits
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
    /// Track goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Income and expenses
    Finance {
        #[command(subcommand)]
        command: FinanceCommands,
    },
    /// Shopping list and budget
    Shop {
        #[command(subcommand)]
        command: ShopCommands,
    },
    /// General notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Wellness journal
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },
    /// Get a suggestion for how you feel
    Mood {
        #[arg(value_enum)]
        mood: Mood,
    },
    /// Classes, assignments and exams
    Student {
        #[command(subcommand)]
        command: StudentCommands,
    },
    /// Appearance preferences
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Delete all data
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Day in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Time in HH:MM (default: 12:00)
        #[arg(short, long)]
        time: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(short, long, value_enum, default_value_t = Frequency::Once)]
        repeat: Frequency,
    },
    /// List tasks by due time
    List {
        #[arg(short, long, value_enum, default_value_t = TaskFilter::All)]
        filter: TaskFilter,
    },
    /// Toggle completion of a task
    Done { id: u64 },
    /// Edit a task
    Edit {
        id: u64,
        #[arg(short = 'n', long)]
        title: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        time: Option<String>,
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
        #[arg(short, long, value_enum)]
        repeat: Option<Frequency>,
    },
    /// Remove a task
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum HabitCommands {
    Add {
        title: String,
        #[arg(short, long, value_enum, default_value_t = HabitFrequency::Daily)]
        frequency: HabitFrequency,
    },
    List,
    /// Check or uncheck a habit for today
    Toggle { id: u64 },
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum GoalCommands {
    Add {
        title: String,
        /// What done looks like
        #[arg(short, long)]
        target: Option<String>,
    },
    List,
    /// Set progress in percent
    Progress { id: u64, percent: u8 },
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum FinanceCommands {
    Add {
        amount: f64,
        description: String,
        #[arg(short, long, value_enum, default_value_t = TransactionKind::Expense)]
        kind: TransactionKind,
    },
    List,
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum ShopCommands {
    Add {
        name: String,
        #[arg(short, long, default_value_t = 0.0)]
        cost: f64,
        #[arg(long, value_enum, default_value_t = Currency::Naira)]
        currency: Currency,
        #[arg(short, long, default_value = "")]
        note: String,
        #[arg(short, long, value_enum, default_value_t = ItemFrequency::OneTime)]
        frequency: ItemFrequency,
    },
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        cost: Option<f64>,
        #[arg(long, value_enum)]
        currency: Option<Currency>,
        #[arg(short, long)]
        note: Option<String>,
        #[arg(short, long, value_enum)]
        frequency: Option<ItemFrequency>,
    },
    List,
    /// Mark an item as bought
    Buy { id: u64 },
    Remove { id: u64 },
    /// Put a recommendation back on the list
    Restore { id: u64 },
    /// Drop a recommendation
    Forget { id: u64 },
    /// Set the budget (0 for none)
    Budget {
        amount: f64,
        #[arg(long, value_enum)]
        currency: Option<Currency>,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    List {
        /// Only notes whose title or content contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum JournalCommands {
    Add { text: String },
    List,
}

#[derive(Subcommand)]
enum StudentCommands {
    Class {
        #[command(subcommand)]
        command: ClassCommands,
    },
    Assignment {
        #[command(subcommand)]
        command: AssignmentCommands,
    },
    Exam {
        #[command(subcommand)]
        command: ExamCommands,
    },
}

#[derive(Subcommand)]
enum ClassCommands {
    Add {
        subject: String,
        #[arg(short, long, default_value = "")]
        location: String,
        /// e.g. "Mon, Wed"
        #[arg(short, long, default_value = "")]
        days: String,
        #[arg(short, long, default_value = "")]
        time: String,
    },
    List,
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum AssignmentCommands {
    Add {
        subject: String,
        title: String,
        /// Due as YYYY-MM-DDTHH:MM
        due: String,
    },
    List,
    /// Toggle between pending and done
    Toggle { id: u64 },
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum ExamCommands {
    Add {
        subject: String,
        /// Exam date as YYYY-MM-DDTHH:MM
        date: String,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    List,
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum SettingsCommands {
    Show,
    Set {
        #[arg(long, value_enum)]
        theme: Option<Theme>,
        #[arg(long, value_enum)]
        font_size: Option<FontSize>,
        #[arg(long)]
        animations: Option<bool>,
        /// Color to override, used with --value
        #[arg(long, value_enum, requires = "value")]
        color: Option<ColorKey>,
        /// Hex color as #rrggbb
        #[arg(long, requires = "color")]
        value: Option<String>,
    },
    /// Drop all custom colors
    ResetColors,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LIFEORG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "lifeorg", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Mood { mood }) => {
            cmd_mood(mood);
            return Ok(());
        }
        other => other,
    };

    let dir = data_dir(cli.data_dir);
    tracing::debug!(dir = %dir.display(), "using data directory");
    let mut org = Organizer::load(Box::new(FileStorage::new(dir)), Box::new(SystemClock))?;
    let org = &mut org;

    match command {
        Some(Commands::Task { command }) => match command {
            TaskCommands::Add { title, date, time, priority, repeat } => {
                cmd_task_add(org, title, date, time, priority, repeat)
            }
            TaskCommands::List { filter } => {
                cmd_task_list(org, filter);
                Ok(())
            }
            TaskCommands::Done { id } => cmd_task_toggle(org, id),
            TaskCommands::Edit { id, title, date, time, priority, repeat } => {
                let patch = TaskPatch { title, date, time, priority, frequency: repeat };
                cmd_task_edit(org, id, patch)
            }
            TaskCommands::Remove { id } => cmd_task_remove(org, id),
        },
        Some(Commands::Today) => {
            cmd_today(org);
            Ok(())
        }
        Some(Commands::Calendar { month }) => cmd_calendar(org, month),
        Some(Commands::Agenda { date }) => cmd_agenda(org, date),
        Some(Commands::Habit { command }) => match command {
            HabitCommands::Add { title, frequency } => cmd_habit_add(org, title, frequency),
            HabitCommands::List => {
                cmd_habit_list(org);
                Ok(())
            }
            HabitCommands::Toggle { id } => cmd_habit_toggle(org, id),
            HabitCommands::Remove { id } => cmd_habit_remove(org, id),
        },
        Some(Commands::Goal { command }) => match command {
            GoalCommands::Add { title, target } => cmd_goal_add(org, title, target),
            GoalCommands::List => {
                cmd_goal_list(org);
                Ok(())
            }
            GoalCommands::Progress { id, percent } => cmd_goal_progress(org, id, percent),
            GoalCommands::Remove { id } => cmd_goal_remove(org, id),
        },
        Some(Commands::Finance { command }) => match command {
            FinanceCommands::Add { amount, description, kind } => {
                cmd_finance_add(org, amount, description, kind)
            }
            FinanceCommands::List => {
                cmd_finance_list(org);
                Ok(())
            }
            FinanceCommands::Remove { id } => cmd_finance_remove(org, id),
        },
        Some(Commands::Shop { command }) => match command {
            ShopCommands::Add { name, cost, currency, note, frequency } => {
                cmd_shop_add(org, ItemDraft { name, cost, currency, note, frequency })
            }
            ShopCommands::Edit { id, name, cost, currency, note, frequency } => {
                cmd_shop_edit(org, id, ItemPatch { name, cost, currency, note, frequency })
            }
            ShopCommands::List => {
                cmd_shop_list(org);
                Ok(())
            }
            ShopCommands::Buy { id } => cmd_shop_buy(org, id),
            ShopCommands::Remove { id } => cmd_shop_remove(org, id),
            ShopCommands::Restore { id } => cmd_shop_restore(org, id),
            ShopCommands::Forget { id } => cmd_shop_forget(org, id),
            ShopCommands::Budget { amount, currency } => cmd_shop_budget(org, amount, currency),
        },
        Some(Commands::Note { command }) => match command {
            NoteCommands::Add { title, content } => cmd_note_add(org, title, content),
            NoteCommands::List { search } => {
                cmd_note_list(org, search);
                Ok(())
            }
            NoteCommands::Remove { id } => cmd_note_remove(org, id),
        },
        Some(Commands::Journal { command }) => match command {
            JournalCommands::Add { text } => cmd_journal_add(org, text),
            JournalCommands::List => {
                cmd_journal_list(org);
                Ok(())
            }
        },
        Some(Commands::Student { command }) => match command {
            StudentCommands::Class { command } => match command {
                ClassCommands::Add { subject, location, days, time } => {
                    cmd_class_add(org, subject, location, days, time)
                }
                ClassCommands::List => {
                    cmd_class_list(org);
                    Ok(())
                }
                ClassCommands::Remove { id } => cmd_class_remove(org, id),
            },
            StudentCommands::Assignment { command } => match command {
                AssignmentCommands::Add { subject, title, due } => {
                    cmd_assignment_add(org, subject, title, due)
                }
                AssignmentCommands::List => {
                    cmd_assignment_list(org);
                    Ok(())
                }
                AssignmentCommands::Toggle { id } => cmd_assignment_toggle(org, id),
                AssignmentCommands::Remove { id } => cmd_assignment_remove(org, id),
            },
            StudentCommands::Exam { command } => match command {
                ExamCommands::Add { subject, date, notes } => cmd_exam_add(org, subject, date, notes),
                ExamCommands::List => {
                    cmd_exam_list(org);
                    Ok(())
                }
                ExamCommands::Remove { id } => cmd_exam_remove(org, id),
            },
        },
        Some(Commands::Settings { command }) => match command {
            SettingsCommands::Show => {
                cmd_settings_show(org);
                Ok(())
            }
            SettingsCommands::Set { theme, font_size, animations, color, value } => {
                let patch = SettingsPatch {
                    theme,
                    font_size,
                    animations_enabled: animations,
                    color: color.zip(value),
                };
                cmd_settings_set(org, patch)
            }
            SettingsCommands::ResetColors => cmd_settings_reset_colors(org),
        },
        Some(Commands::Reset { force }) => cmd_reset(org, force),
        Some(Commands::Ui) | None => run_tui(org),
        Some(Commands::Completions { .. }) | Some(Commands::Mood { .. }) => Ok(()),
    }
}

fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
