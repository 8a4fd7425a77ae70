//! Command handlers.
//!
//! Each handler calls one [`Pathway`] operation and renders its markdown
//! through the [`TerminalRenderer`].

use anyhow::{Context, Result};
use log::info;
use pathway_core::{
    display::{OperationStatus, PlanSummaries, ToggleResult},
    CancelToken, GenerationOutcome, Pathway,
};

use crate::{
    args::{AuthCommands, GoalArgs, LoginArgs, PlanCommands, ProfileCommands, RegisterArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    pathway: Pathway,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(pathway: Pathway, renderer: TerminalRenderer) -> Self {
        Self { pathway, renderer }
    }

    fn confirm(&self, message: impl Into<String>) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    pub async fn handle_auth_command(&self, command: AuthCommands) -> Result<()> {
        match command {
            AuthCommands::Login(LoginArgs { email, password }) => {
                let session = self.pathway.session().sign_in(&email, &password).await?;
                self.confirm(format!(
                    "Signed in as {} ({})",
                    session.user.display_name, session.user.email
                ))
            }
            AuthCommands::Register(RegisterArgs {
                name,
                email,
                password,
            }) => {
                self.pathway
                    .session()
                    .sign_up(&name, &email, &password)
                    .await?;
                self.confirm("Account created. Sign in with `pathway auth login`.")
            }
            AuthCommands::Logout => {
                self.pathway.session().sign_out().await?;
                self.confirm("Signed out")
            }
            AuthCommands::Status => self.status(),
        }
    }

    pub fn status(&self) -> Result<()> {
        self.renderer
            .render(&self.pathway.session().state().to_string())
    }

    /// Submits a goal and follows it until the plan is ready. Ctrl-C cancels
    /// the attempt, and so does leaving this handler early.
    pub async fn handle_goal(&self, GoalArgs { target_role, .. }: GoalArgs) -> Result<()> {
        let user = self.pathway.session().require_user()?;
        let tracker = self.pathway.tracker();
        let mut messages = tracker.status_messages();

        let cancel = CancelToken::new();
        let _teardown = cancel.drop_guard();
        let token = cancel.clone();
        let mut attempt =
            tokio::spawn(async move { tracker.generate(&user, &target_role, &token).await });
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let outcome = loop {
            tokio::select! {
                joined = &mut attempt => break joined.context("Generation task stopped unexpectedly")?,
                changed = messages.changed() => {
                    if changed.is_ok() {
                        let message = messages.borrow_and_update().clone();
                        if !message.is_empty() {
                            self.renderer.progress(&message);
                        }
                    }
                }
                _ = &mut ctrl_c, if !cancel.is_cancelled() => {
                    info!("Interrupted, cancelling generation");
                    cancel.cancel();
                }
            }
        };

        match outcome? {
            GenerationOutcome::Failed(e) => Err(e).context("Plan generation failed"),
            outcome => self.renderer.render(&outcome.to_string()),
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show { id } => {
                let progress = self.pathway.show_plan(id).await?;
                self.renderer.render(&progress.to_string())
            }
            PlanCommands::Toggle { id, step } => {
                let index = step as usize - 1;
                let (outcome, progress) = self.pathway.toggle_step(id, index).await?;
                self.renderer.render(
                    &ToggleResult {
                        outcome: &outcome,
                        progress: &progress,
                        index,
                    }
                    .to_string(),
                )
            }
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = PlanSummaries(self.pathway.my_plans().await?);
        self.renderer
            .render(&format!("# My Plans\n\n{plans}"))
    }

    pub async fn handle_profile_command(&self, command: ProfileCommands) -> Result<()> {
        let profiles = self.pathway.profiles();
        match command {
            ProfileCommands::Show => {
                let profile = profiles.load().await?;
                self.renderer.render(&profile.to_string())
            }
            ProfileCommands::Set { name, job_title } => {
                let profile = profiles
                    .update_details(name.as_deref(), job_title.as_deref())
                    .await?;
                self.renderer.render(&profile.to_string())
            }
            ProfileCommands::AddSkill { skill } => {
                if profiles.add_skill(&skill).await? {
                    self.confirm(format!("Added skill: {}", skill.trim()))
                } else {
                    self.confirm(format!("Skill already listed: {}", skill.trim()))
                }
            }
            ProfileCommands::RemoveSkill { skill } => {
                if profiles.remove_skill(&skill).await? {
                    self.confirm(format!("Removed skill: {}", skill.trim()))
                } else {
                    self.renderer.render(
                        &OperationStatus::failure(format!("No such skill: {}", skill.trim()))
                            .to_string(),
                    )
                }
            }
            ProfileCommands::Pull => {
                let profile = self.pathway.pull_profile().await?;
                self.renderer.render(&profile.to_string())
            }
            ProfileCommands::Push => {
                self.pathway.push_profile().await?;
                self.confirm("Profile saved to the service")
            }
        }
    }
}
