//! # Register Subcommand
//!
//! Interactive walk through the registration flow. Each screen is printed,
//! then every field it shows is prompted for in order; once the last one
//! is entered the screen is submitted. An empty line keeps a value entered
//! earlier.
//!
//! Lines starting with `:` are commands:
//!
//! | Command    | Action                                  |
//! |------------|-----------------------------------------|
//! | `:resend`  | send a new code once the countdown ends |
//! | `:back`    | return from the tax step                |
//! | `:dismiss` | hide the error banner                   |
//! | `:restart` | start over with an empty form           |
//! | `:view`    | print the current screen again          |
//! | `:quit`    | leave                                   |

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use udyam_client::{HttpVerificationProvider, VerificationApiConfig};
use udyam_core::draft::InputRejection;
use udyam_core::{DemoVerificationProvider, Field, InputOutcome, VerificationProvider};
use udyam_flow::{
    FlowController, FlowSettings, ScreenBody, ScreenView, Step, SubmitOutcome,
    RESEND_COUNTDOWN_SECS,
};

use crate::render::render;

/// Arguments for the register subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Verify against a running udyam-api instead of the built-in demo provider.
    #[arg(long, env = "UDYAM_API_URL")]
    pub api_url: Option<String>,

    /// Seconds before a code may be resent.
    #[arg(long, default_value_t = RESEND_COUNTDOWN_SECS)]
    pub countdown_secs: u32,

    /// Print each screen as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// A `:` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Resend,
    Back,
    Dismiss,
    Restart,
    View,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(':').to_ascii_lowercase().as_str() {
            "resend" => Ok(Self::Resend),
            "back" => Ok(Self::Back),
            "dismiss" => Ok(Self::Dismiss),
            "restart" => Ok(Self::Restart),
            "view" => Ok(Self::View),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!(
                "unknown command :{other} (try :resend, :back, :dismiss, :restart, :view, :quit)"
            )),
        }
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Command(Result<Command, String>),
    Value(String),
}

impl Line {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_end_matches(['\r', '\n']);
        if trimmed.trim_start().starts_with(':') {
            Line::Command(trimmed.parse())
        } else {
            Line::Value(trimmed.to_string())
        }
    }
}

/// What the screen loop does after a command.
enum Next {
    Redraw,
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Registrations that reached the success screen.
    pub completed: u32,
    /// Step shown when the session ended.
    pub final_step: Step,
}

/// Drives a [`FlowController`] from a line reader, writing screens to a writer.
pub struct Wizard<R, W> {
    controller: FlowController,
    reader: R,
    writer: W,
    json: bool,
    completed: u32,
}

impl<R, W> Wizard<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(controller: FlowController, reader: R, writer: W) -> Self {
        Self {
            controller,
            reader,
            writer,
            json: false,
            completed: 0,
        }
    }

    /// Print screens as JSON.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn controller(&self) -> &FlowController {
        &self.controller
    }

    /// Run until `:quit` or end of input.
    pub async fn run(mut self) -> anyhow::Result<SessionSummary> {
        'screen: loop {
            let view = self.controller.view();
            self.show(&view).await?;

            let fields = pending_fields(&view);
            if fields.is_empty() {
                self.say("Type :restart to start a new registration or :quit to leave.")
                    .await?;
                loop {
                    match self.next_line().await? {
                        None => break 'screen,
                        Some(Line::Command(cmd)) => match self.command(cmd).await? {
                            Next::Redraw => continue 'screen,
                            Next::Quit => break 'screen,
                        },
                        Some(Line::Value(_)) => {
                            self.say("Nothing to fill in here.").await?;
                        }
                    }
                }
            }

            for field in fields {
                loop {
                    self.prompt(field).await?;
                    match self.next_line().await? {
                        None => break 'screen,
                        Some(Line::Command(cmd)) => match self.command(cmd).await? {
                            Next::Redraw => continue 'screen,
                            Next::Quit => break 'screen,
                        },
                        Some(Line::Value(value))
                            if value.is_empty() && !self.controller.draft().get(field).is_empty() =>
                        {
                            break
                        }
                        Some(Line::Value(value)) => match self.controller.input(field, &value)? {
                            InputOutcome::Accepted => break,
                            InputOutcome::Rejected(rejection) => {
                                self.say(&rejection_message(field, rejection)).await?;
                            }
                        },
                    }
                }
            }

            let label = submit_label(&view);
            self.say(&format!("{label}...")).await?;
            let outcome = self.controller.submit().await?;
            self.report(outcome).await?;
        }

        self.writer.flush().await?;
        Ok(SessionSummary {
            completed: self.completed,
            final_step: self.controller.step(),
        })
    }

    async fn command(&mut self, cmd: Result<Command, String>) -> anyhow::Result<Next> {
        let cmd = match cmd {
            Ok(cmd) => cmd,
            Err(message) => {
                self.say(&message).await?;
                return Ok(Next::Redraw);
            }
        };
        tracing::debug!(?cmd, step = %self.controller.step(), "command");
        match cmd {
            Command::Quit => return Ok(Next::Quit),
            Command::View => {}
            Command::Dismiss => self.controller.dismiss_banner(),
            Command::Restart => self.controller.restart(),
            Command::Back => {
                if let Err(e) = self.controller.back() {
                    self.say(&e.to_string()).await?;
                }
            }
            Command::Resend => match self.controller.resend().await {
                Ok(outcome) => self.report(outcome).await?,
                Err(e) => self.say(&e.to_string()).await?,
            },
        }
        Ok(Next::Redraw)
    }

    async fn report(&mut self, outcome: SubmitOutcome) -> anyhow::Result<()> {
        let message = match outcome {
            SubmitOutcome::Invalid => "Please fix the highlighted fields.",
            SubmitOutcome::CodeSent => "OTP sent.",
            SubmitOutcome::CodeRejected => "The OTP was not accepted.",
            SubmitOutcome::Failed => "The request failed.",
            SubmitOutcome::Advanced(Step::Success) => {
                self.completed += 1;
                "Verification complete."
            }
            SubmitOutcome::Advanced(_) => "Verified.",
        };
        self.say(message).await
    }

    async fn show(&mut self, view: &ScreenView) -> anyhow::Result<()> {
        let text = if self.json {
            serde_json::to_string_pretty(view)? + "\n"
        } else {
            render(view)
        };
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn prompt(&mut self, field: Field) -> anyhow::Result<()> {
        let hint = if field == Field::DateOfBirth {
            " (YYYY-MM-DD)"
        } else {
            ""
        };
        self.writer
            .write_all(format!("{}{hint}> ", field.label()).as_bytes())
            .await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn say(&mut self, message: &str) -> anyhow::Result<()> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }

    async fn next_line(&mut self) -> anyhow::Result<Option<Line>> {
        let mut buf = String::new();
        let read = self
            .reader
            .read_line(&mut buf)
            .await
            .context("reading input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(Line::parse(&buf)))
    }
}

/// Fields the current screen still asks for, in display order.
fn pending_fields(view: &ScreenView) -> Vec<Field> {
    match &view.body {
        ScreenBody::Identity(identity) if identity.otp_panel.is_some() => vec![Field::Otp],
        ScreenBody::Identity(_) => vec![Field::IdentityNumber, Field::MobileNumber],
        ScreenBody::Tax(_) => vec![Field::TaxId, Field::FullName, Field::DateOfBirth],
        ScreenBody::Success(_) => Vec::new(),
    }
}

fn submit_label(view: &ScreenView) -> &'static str {
    match &view.body {
        ScreenBody::Identity(identity) => identity.submit_label,
        ScreenBody::Tax(tax) => tax.submit_label,
        ScreenBody::Success(summary) => summary.restart_label,
    }
}

fn rejection_message(field: Field, rejection: InputRejection) -> String {
    match rejection {
        InputRejection::NonDigit => format!("{} takes digits only.", field.label()),
        InputRejection::TooLong { max } => {
            format!("{} is at most {max} characters.", field.label())
        }
    }
}

/// Pick the provider: the HTTP client when a URL is given, the demo otherwise.
pub fn provider(api_url: Option<&str>) -> anyhow::Result<Arc<dyn VerificationProvider>> {
    match api_url {
        Some(url) => {
            let config = VerificationApiConfig::new(url)
                .with_context(|| format!("invalid --api-url {url}"))?;
            let client = HttpVerificationProvider::new(config)?;
            tracing::info!(%url, "using verification service");
            Ok(Arc::new(client))
        }
        None => Ok(Arc::new(DemoVerificationProvider::new())),
    }
}

/// Run the subcommand against stdin and stdout.
pub async fn run_register(args: &RegisterArgs) -> anyhow::Result<SessionSummary> {
    let provider = provider(args.api_url.as_deref())?;
    let settings = FlowSettings {
        countdown_secs: args.countdown_secs,
        tick: Duration::from_secs(1),
    };
    let controller = FlowController::with_settings(provider, settings);
    tracing::debug!(session = %controller.session_id(), "registration started");

    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    let summary = Wizard::new(controller, reader, tokio::io::stdout())
        .with_json(args.json)
        .run()
        .await?;
    Ok(summary)
}
