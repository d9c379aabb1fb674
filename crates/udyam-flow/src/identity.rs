//! # Identity Verification Step
//!
//! ## States
//!
//! ```text
//! AwaitingOtpRequest ──submit (identity + mobile valid, code sent)──▶ OtpSent
//!                                                                      │
//!                        submit (otp valid, provider verifies) ◀───────┘
//!                                      │
//!                                      ▼
//!                            controller advances
//! ```
//!
//! Entering `OtpSent` starts the resend countdown. Resend is only accepted
//! once the countdown reaches zero; it dispatches a new code and restarts
//! the countdown without re-running field validation.

use std::time::Duration;

use udyam_core::validation;
use udyam_core::{
    CodeCheck, CodeDispatch, CodeRequest, CodeVerdict, Field, ValidationErrors,
    VerificationProvider,
};

use crate::context::FlowContext;
use crate::countdown::{Countdown, RESEND_COUNTDOWN_SECS, TICK};
use crate::error::FlowError;
use crate::step::Step;

/// Banner shown when the code could not be sent.
pub const SEND_FAILED: &str = "Failed to send OTP. Please try again.";

/// Banner shown when the code could not be checked.
pub const VERIFY_FAILED: &str = "OTP verification failed. Please try again.";

/// Sub-state of the identity step.
#[derive(Debug)]
pub enum IdentityPhase {
    /// Waiting for a valid identity and mobile number.
    AwaitingOtpRequest,
    /// A code was sent; waiting for the user to enter it.
    OtpSent {
        /// Where the code went.
        dispatch: CodeDispatch,
        /// Resend countdown.
        countdown: Countdown,
    },
}

/// Result of an action on the identity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityOutcome {
    /// Field rules failed; messages are in the error set.
    Invalid,
    /// A code was dispatched and the countdown (re)started.
    CodeSent,
    /// The provider did not accept the code; message on the otp field.
    CodeRejected,
    /// The provider failed; message in the banner.
    Failed,
    /// The code was accepted.
    Verified,
}

/// The identity step and its countdown.
#[derive(Debug)]
pub struct IdentityStep {
    phase: IdentityPhase,
    countdown_secs: u32,
    tick: Duration,
}

impl IdentityStep {
    /// A fresh step awaiting a code request, with a 30-second countdown.
    pub fn new() -> Self {
        Self::with_countdown(RESEND_COUNTDOWN_SECS, TICK)
    }

    /// A fresh step whose countdown starts at `secs` and decrements every `tick`.
    pub fn with_countdown(secs: u32, tick: Duration) -> Self {
        Self {
            phase: IdentityPhase::AwaitingOtpRequest,
            countdown_secs: secs,
            tick,
        }
    }

    /// Current sub-state.
    pub fn phase(&self) -> &IdentityPhase {
        &self.phase
    }

    /// Whether a code has been sent.
    pub fn otp_sent(&self) -> bool {
        matches!(self.phase, IdentityPhase::OtpSent { .. })
    }

    /// Seconds left before resend is allowed, once a code was sent.
    pub fn countdown_remaining(&self) -> Option<u32> {
        match &self.phase {
            IdentityPhase::OtpSent { countdown, .. } => Some(countdown.remaining()),
            IdentityPhase::AwaitingOtpRequest => None,
        }
    }

    /// The countdown, once a code was sent.
    pub fn countdown(&self) -> Option<&Countdown> {
        match &self.phase {
            IdentityPhase::OtpSent { countdown, .. } => Some(countdown),
            IdentityPhase::AwaitingOtpRequest => None,
        }
    }

    /// Where the last code went.
    pub fn dispatch(&self) -> Option<&CodeDispatch> {
        match &self.phase {
            IdentityPhase::OtpSent { dispatch, .. } => Some(dispatch),
            IdentityPhase::AwaitingOtpRequest => None,
        }
    }

    /// Whether the resend action is enabled.
    pub fn can_resend(&self) -> bool {
        self.countdown_remaining() == Some(0)
    }

    /// Submit the step: request a code, or check the entered one.
    pub async fn submit(
        &mut self,
        ctx: &mut FlowContext,
        provider: &dyn VerificationProvider,
    ) -> IdentityOutcome {
        if self.otp_sent() {
            self.verify_code(ctx, provider).await
        } else {
            self.request_code(ctx, provider).await
        }
    }

    async fn request_code(
        &mut self,
        ctx: &mut FlowContext,
        provider: &dyn VerificationProvider,
    ) -> IdentityOutcome {
        let violations = validation::check_all([
            (Field::IdentityNumber, ctx.draft.identity_number.as_str()),
            (Field::MobileNumber, ctx.draft.mobile_number.as_str()),
        ]);
        if !violations.is_empty() {
            ctx.errors = ValidationErrors::from_violations(violations);
            return IdentityOutcome::Invalid;
        }

        match provider.request_code(&code_request(ctx)).await {
            Ok(dispatch) => {
                tracing::info!(to = %dispatch.masked_mobile, "otp sent");
                ctx.errors.clear();
                self.phase = IdentityPhase::OtpSent {
                    dispatch,
                    countdown: Countdown::with_tick(self.countdown_secs, self.tick),
                };
                IdentityOutcome::CodeSent
            }
            Err(err) => {
                tracing::warn!(error = %err, provider = provider.provider_name(), "otp request failed");
                ctx.errors = ValidationErrors::banner(SEND_FAILED);
                IdentityOutcome::Failed
            }
        }
    }

    async fn verify_code(
        &mut self,
        ctx: &mut FlowContext,
        provider: &dyn VerificationProvider,
    ) -> IdentityOutcome {
        if let Err(violation) = validation::check(Field::Otp, &ctx.draft.otp) {
            ctx.errors = ValidationErrors::from_violations([violation]);
            return IdentityOutcome::Invalid;
        }

        let check = CodeCheck {
            identity_number: ctx.draft.identity_number.clone(),
            mobile_number: ctx.draft.mobile_number.clone(),
            otp: ctx.draft.otp.clone(),
        };
        match provider.verify_code(&check).await {
            Ok(CodeVerdict::Verified) => IdentityOutcome::Verified,
            Ok(CodeVerdict::Rejected { message }) => {
                let mut errors = ValidationErrors::new();
                errors.set(Field::Otp, message);
                ctx.errors = errors;
                IdentityOutcome::CodeRejected
            }
            Err(err) => {
                tracing::warn!(error = %err, provider = provider.provider_name(), "otp verification failed");
                ctx.errors = ValidationErrors::banner(VERIFY_FAILED);
                IdentityOutcome::Failed
            }
        }
    }

    /// Send a new code and restart the countdown. Field rules are not re-run.
    pub async fn resend(
        &mut self,
        ctx: &mut FlowContext,
        provider: &dyn VerificationProvider,
    ) -> Result<IdentityOutcome, FlowError> {
        let remaining = self.countdown_remaining().ok_or(FlowError::ActionUnavailable {
            action: "resend",
            step: Step::IdentityVerification,
        })?;
        if remaining > 0 {
            return Err(FlowError::ResendLocked { remaining });
        }

        match provider.request_code(&code_request(ctx)).await {
            Ok(fresh) => {
                if let IdentityPhase::OtpSent {
                    dispatch,
                    countdown,
                } = &mut self.phase
                {
                    *dispatch = fresh;
                    countdown.restart();
                }
                tracing::info!("otp resent");
                Ok(IdentityOutcome::CodeSent)
            }
            Err(err) => {
                tracing::warn!(error = %err, provider = provider.provider_name(), "otp resend failed");
                ctx.errors.set_general(SEND_FAILED);
                Ok(IdentityOutcome::Failed)
            }
        }
    }
}

impl Default for IdentityStep {
    fn default() -> Self {
        Self::new()
    }
}

fn code_request(ctx: &FlowContext) -> CodeRequest {
    CodeRequest {
        identity_number: ctx.draft.identity_number.clone(),
        mobile_number: ctx.draft.mobile_number.clone(),
    }
}
