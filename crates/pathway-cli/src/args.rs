use std::{path::PathBuf, time::Duration};

use clap::{Args as ClapArgs, Parser, Subcommand};
use pathway_core::{PlanId, TrackerConfig, DEFAULT_BASE_URL};

/// Command-line client for the Pathway career planner
///
/// Sign in, submit a career goal and follow the generated learning plan step
/// by step. Completed steps become skills on your profile.
#[derive(Parser)]
#[command(version, about, name = "pathway")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/pathway/pathway.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Address of the plan service
    #[arg(long, global = true, env = "PATHWAY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign up and sign out
    #[command(alias = "a")]
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Submit a new career goal and wait for its plan
    #[command(alias = "g")]
    Goal(GoalArgs),
    /// Browse your plans and track progress
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// View and edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login(LoginArgs),
    /// Create an account. Sign in afterwards with `auth login`
    Register(RegisterArgs),
    /// Sign out and forget the cached profile
    Logout,
    /// Show who is signed in
    Status,
}

#[derive(ClapArgs)]
pub struct LoginArgs {
    pub email: String,
    #[arg(long, env = "PATHWAY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(ClapArgs)]
pub struct RegisterArgs {
    /// Full name
    pub name: String,
    pub email: String,
    #[arg(long, env = "PATHWAY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(ClapArgs)]
pub struct GoalArgs {
    /// Role you want to reach, e.g. "Data Engineer"
    pub target_role: String,
    /// Seconds between status checks while the plan is generated
    #[arg(long, default_value_t = 3)]
    pub poll_interval: u64,
    /// Seconds to wait for the generated plan before showing a starter plan
    #[arg(long, default_value_t = 30)]
    pub poll_timeout: u64,
}

impl GoalArgs {
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::default()
            .with_poll_interval(Duration::from_secs(self.poll_interval.max(1)))
            .with_poll_timeout(Duration::from_secs(self.poll_timeout))
    }
}

#[derive(Clone, Copy, Subcommand)]
pub enum PlanCommands {
    /// List the plans you created
    #[command(alias = "ls")]
    List,
    /// Show a plan with its steps and your progress
    Show {
        id: PlanId,
    },
    /// Mark a step as done, or as not done if it already is
    Toggle {
        id: PlanId,
        /// Step number as shown by `plan show`
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        step: u32,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the cached profile
    Show,
    /// Update name or current job title. Pass an empty value to clear one
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
    },
    /// Add a skill
    AddSkill {
        skill: String,
    },
    /// Remove a skill
    RemoveSkill {
        skill: String,
    },
    /// Replace the cached profile with the one stored by the service
    Pull,
    /// Send the cached profile to the service
    Push,
}
