//! # Form Flow Controller
//!
//! Owns the active step, the shared [`FlowContext`] and the verification
//! provider. All navigation goes through [`FlowController::advance`],
//! [`FlowController::retreat`] and [`FlowController::restart`]; each one
//! clears the error set and appends a [`StepTransitionRecord`].
//!
//! Leaving the identity step drops its countdown, which aborts the ticking
//! task. Returning to it starts from `AwaitingOtpRequest` again.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use udyam_core::{
    Field, InputOutcome, RegistrationDraft, ValidationErrors, VerificationProvider,
};

use crate::context::FlowContext;
use crate::countdown::{RESEND_COUNTDOWN_SECS, TICK};
use crate::error::FlowError;
use crate::identity::{IdentityOutcome, IdentityStep};
use crate::step::Step;
use crate::tax::{TaxOutcome, TaxStep};
use crate::view::ScreenView;

// ── Settings ─────────────────────────────────────────────────────────

/// Tunables for a flow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    /// Seconds on the resend countdown.
    pub countdown_secs: u32,
    /// Interval between countdown decrements.
    pub tick: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            countdown_secs: RESEND_COUNTDOWN_SECS,
            tick: TICK,
        }
    }
}

// ── Transition Record ────────────────────────────────────────────────

/// What caused a step change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTrigger {
    Advance,
    Retreat,
    Restart,
}

/// A single step change, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTransitionRecord {
    /// Step before the change.
    pub from: Step,
    /// Step after the change.
    pub to: Step,
    /// The navigation call that made it.
    pub trigger: TransitionTrigger,
    /// When it happened.
    pub at: DateTime<Utc>,
}

// ── Active Step ──────────────────────────────────────────────────────

/// The current screen together with its step-local state.
#[derive(Debug)]
pub enum ActiveStep {
    Identity(IdentityStep),
    Tax(TaxStep),
    Success,
}

impl ActiveStep {
    fn enter(step: Step, settings: &FlowSettings) -> Self {
        match step {
            Step::IdentityVerification => Self::Identity(IdentityStep::with_countdown(
                settings.countdown_secs,
                settings.tick,
            )),
            Step::TaxVerification => Self::Tax(TaxStep::new()),
            Step::Success => Self::Success,
        }
    }

    /// The step this screen belongs to.
    pub fn step(&self) -> Step {
        match self {
            Self::Identity(_) => Step::IdentityVerification,
            Self::Tax(_) => Step::TaxVerification,
            Self::Success => Step::Success,
        }
    }
}

/// Result of [`FlowController::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Field rules failed.
    Invalid,
    /// A one-time password was sent.
    CodeSent,
    /// The one-time password did not match.
    CodeRejected,
    /// The provider failed; see the banner.
    Failed,
    /// The step was completed and the flow moved on.
    Advanced(Step),
}

// ── The Controller ───────────────────────────────────────────────────

/// Drives one run through the verification flow.
pub struct FlowController {
    session_id: Uuid,
    provider: Arc<dyn VerificationProvider>,
    settings: FlowSettings,
    active: ActiveStep,
    context: FlowContext,
    transitions: Vec<StepTransitionRecord>,
}

impl std::fmt::Debug for FlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowController")
            .field("session_id", &self.session_id)
            .field("provider", &self.provider.provider_name())
            .field("active", &self.active)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl FlowController {
    /// A flow on the identity step with default settings.
    pub fn new(provider: Arc<dyn VerificationProvider>) -> Self {
        Self::with_settings(provider, FlowSettings::default())
    }

    /// A flow on the identity step with custom settings.
    pub fn with_settings(provider: Arc<dyn VerificationProvider>, settings: FlowSettings) -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(session = %session_id, provider = provider.provider_name(), "flow started");
        Self {
            session_id,
            provider,
            active: ActiveStep::enter(Step::FIRST, &settings),
            settings,
            context: FlowContext::new(),
            transitions: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The current step.
    pub fn step(&self) -> Step {
        self.active.step()
    }

    pub fn active(&self) -> &ActiveStep {
        &self.active
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.context.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.context.errors
    }

    /// Every step change so far, oldest first.
    pub fn transitions(&self) -> &[StepTransitionRecord] {
        &self.transitions
    }

    /// Edit a field shown on the current step.
    pub fn input(&mut self, field: Field, raw: &str) -> Result<InputOutcome, FlowError> {
        let step = self.step();
        if !step.fields().contains(&field) {
            return Err(FlowError::FieldNotOnStep { field, step });
        }
        Ok(self.context.input(field, raw))
    }

    /// Submit the current step.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        let provider = self.provider.as_ref();
        // `None` means the step was completed.
        let outcome = match &mut self.active {
            ActiveStep::Identity(step) => {
                let outcome = step.submit(&mut self.context, provider).await;
                match outcome {
                    IdentityOutcome::Invalid => Some(SubmitOutcome::Invalid),
                    IdentityOutcome::CodeSent => Some(SubmitOutcome::CodeSent),
                    IdentityOutcome::CodeRejected => Some(SubmitOutcome::CodeRejected),
                    IdentityOutcome::Failed => Some(SubmitOutcome::Failed),
                    IdentityOutcome::Verified => None,
                }
            }
            ActiveStep::Tax(step) => {
                let outcome = step.submit(&mut self.context, provider).await;
                match outcome {
                    TaxOutcome::Invalid => Some(SubmitOutcome::Invalid),
                    TaxOutcome::Failed => Some(SubmitOutcome::Failed),
                    TaxOutcome::Verified(_) => None,
                }
            }
            ActiveStep::Success => {
                return Err(FlowError::ActionUnavailable {
                    action: "submit",
                    step: Step::Success,
                })
            }
        };
        match outcome {
            Some(outcome) => Ok(outcome),
            None => self.advance().map(SubmitOutcome::Advanced),
        }
    }

    /// Send a new one-time password once the countdown has run out.
    pub async fn resend(&mut self) -> Result<SubmitOutcome, FlowError> {
        let provider = self.provider.as_ref();
        match &mut self.active {
            ActiveStep::Identity(step) => {
                let outcome = step.resend(&mut self.context, provider).await?;
                Ok(match outcome {
                    IdentityOutcome::Failed => SubmitOutcome::Failed,
                    _ => SubmitOutcome::CodeSent,
                })
            }
            other => Err(FlowError::ActionUnavailable {
                action: "resend",
                step: other.step(),
            }),
        }
    }

    /// The tax step's back action. Draft values are kept.
    pub fn back(&mut self) -> Result<Step, FlowError> {
        if matches!(self.active, ActiveStep::Tax(_)) {
            return self.retreat();
        }
        Err(FlowError::ActionUnavailable {
            action: "back",
            step: self.step(),
        })
    }

    /// Move to the next step and clear the error set.
    pub fn advance(&mut self) -> Result<Step, FlowError> {
        let from = self.step();
        let to = from.next().ok_or(FlowError::NoNextStep { step: from })?;
        self.context.errors.clear();
        self.enter(to, TransitionTrigger::Advance);
        Ok(to)
    }

    /// Move to the previous step and clear the error set.
    pub fn retreat(&mut self) -> Result<Step, FlowError> {
        let from = self.step();
        let to = from.previous().ok_or(FlowError::NoPreviousStep { step: from })?;
        self.context.errors.clear();
        self.enter(to, TransitionTrigger::Retreat);
        Ok(to)
    }

    /// Return to the first step with an empty draft and no messages.
    pub fn restart(&mut self) {
        self.context.reset();
        self.enter(Step::FIRST, TransitionTrigger::Restart);
    }

    /// Hide the banner.
    pub fn dismiss_banner(&mut self) {
        self.context.errors.dismiss_general();
    }

    /// Seconds until resend is allowed, once a code was sent.
    pub fn countdown_remaining(&self) -> Option<u32> {
        match &self.active {
            ActiveStep::Identity(step) => step.countdown_remaining(),
            _ => None,
        }
    }

    /// Whether resend is currently enabled.
    pub fn can_resend(&self) -> bool {
        match &self.active {
            ActiveStep::Identity(step) => step.can_resend(),
            _ => false,
        }
    }

    /// Observe countdown decrements, once a code was sent.
    pub fn subscribe_countdown(&self) -> Option<watch::Receiver<u32>> {
        match &self.active {
            ActiveStep::Identity(step) => step.countdown().map(|c| c.subscribe()),
            _ => None,
        }
    }

    /// Everything the current screen shows.
    pub fn view(&self) -> ScreenView {
        ScreenView::build(&self.active, &self.context)
    }

    fn enter(&mut self, to: Step, trigger: TransitionTrigger) {
        let from = self.step();
        self.active = ActiveStep::enter(to, &self.settings);
        self.transitions.push(StepTransitionRecord {
            from,
            to,
            trigger,
            at: Utc::now(),
        });
        tracing::debug!(session = %self.session_id, %from, %to, ?trigger, "step transition");
    }
}
