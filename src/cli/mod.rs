use clap::{Parser, Subcommand};

/// `focusboard` - terminal dashboard for a goal-planning backend.
#[derive(Parser, Debug)]
#[command(name = "focusboard")]
#[command(version)]
#[command(about = "Plan goals, track today's tasks and review your week.", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `dashboard`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Today's summary and productivity score
    Dashboard,

    /// Submit a new goal to be planned
    Goal {
        /// What you want to achieve
        #[arg(num_args = 0..)]
        goal: Vec<String>,

        /// Local deadline, e.g. "2025-02-28 17:00"
        #[arg(short, long)]
        deadline: Option<String>,

        /// Email for daily summaries
        #[arg(short, long)]
        email: Option<String>,

        /// Autonomy level (manual, assisted, autonomous); defaults to the saved setting
        #[arg(short, long)]
        autonomy: Option<String>,
    },

    /// Approve pending tasks of the current session
    Approve {
        /// Task ids to approve
        #[arg(num_args = 0..)]
        task_ids: Vec<String>,
    },

    /// Today's tasks and calendar
    Today {
        /// Also print the raw completion map kept by the backend
        #[arg(long)]
        raw_status: bool,
    },

    /// Mark a task as done
    Done { task_id: String },

    /// Mark a task as pending again
    Undo { task_id: String },

    /// Latest weekly review
    Review,

    /// Action log, newest first
    Log {
        /// Only this session's actions
        #[arg(long)]
        session: Option<String>,
    },

    /// List every session known to the backend
    Sessions,

    /// Backend health check
    Health,

    /// Show or change settings
    Settings {
        /// Backend base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Default autonomy level for new goals
        #[arg(long)]
        autonomy: Option<String>,

        /// Forget the current session id
        #[arg(long)]
        clear_session: bool,
    },

    /// Check backend connectivity
    Status,

    /// Print the backend sign-in URL
    Login,

    /// Interactive shell with a live connectivity indicator
    Shell {
        /// Seconds between connectivity checks
        #[arg(long, default_value = "30")]
        poll_secs: u64,
    },
}
