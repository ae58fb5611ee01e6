use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides TASKDESK_API_URL and the config file)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new task
    ///
    /// Example: taskdesk new --title "Renew passport" --due-day 29 --due-month 9 --due-year 2025 --due-hour 13 --due-minute 0
    New {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// One of: todo, in_progress, done
        #[arg(long, default_value = "todo")]
        status: String,
        #[arg(long = "due-day", value_name = "DAY", default_value = "")]
        due_day: String,
        #[arg(long = "due-month", value_name = "MONTH", default_value = "")]
        due_month: String,
        #[arg(long = "due-year", value_name = "YEAR", default_value = "")]
        due_year: String,
        #[arg(long = "due-hour", value_name = "HOUR", default_value = "")]
        due_hour: String,
        #[arg(long = "due-minute", value_name = "MINUTE", default_value = "")]
        due_minute: String,
    },
    /// List tasks, ten per page
    ///
    /// Example: taskdesk list --page 2
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show details of a task
    ///
    /// Example: taskdesk show 1
    Show {
        id: String,
    },
    /// Search for a task by ID
    ///
    /// Example: taskdesk search 1
    Search {
        id: String,
    },
    /// Edit a task's fields; omitted flags keep their current values
    ///
    /// Example: taskdesk edit 1 --title "Renew both passports"
    /// Example: taskdesk edit 1 --due-day 30 --due-hour 9 --due-minute 30
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// One of: todo, in_progress, done
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "due-day", value_name = "DAY")]
        due_day: Option<String>,
        #[arg(long = "due-month", value_name = "MONTH")]
        due_month: Option<String>,
        #[arg(long = "due-year", value_name = "YEAR")]
        due_year: Option<String>,
        #[arg(long = "due-hour", value_name = "HOUR")]
        due_hour: Option<String>,
        #[arg(long = "due-minute", value_name = "MINUTE")]
        due_minute: Option<String>,
    },
    /// Mark a task as done
    ///
    /// Example: taskdesk done 1
    Done {
        id: String,
    },
    /// Delete a task
    ///
    /// Example: taskdesk delete 1
    Delete {
        id: String,
    },
}
