//! # View Models
//!
//! Plain data describing what each screen shows. Renderers (the terminal
//! front-end, a web page) read these and never touch the controller's
//! internals. Building a view has no side effects.

use serde::Serialize;

use udyam_core::format::group_identity_number;
use udyam_core::{Field, ValidationErrors};

use crate::context::FlowContext;
use crate::controller::ActiveStep;
use crate::identity::IdentityStep;
use crate::step::Step;

/// Steps shown in the progress indicator. The success screen hides it.
const TRACKED_STEPS: [Step; 2] = [Step::IdentityVerification, Step::TaxVerification];

// ── Progress ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageStatus {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStage {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StageStatus,
}

/// The progress indicator above the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub stages: Vec<ProgressStage>,
}

impl ProgressView {
    /// The indicator for `current`, or `None` on the success screen.
    pub fn for_step(current: Step) -> Option<Self> {
        if current == Step::Success {
            return None;
        }
        let stages = TRACKED_STEPS
            .iter()
            .map(|step| ProgressStage {
                number: step.number(),
                title: step.title(),
                description: step.description(),
                status: match step.number().cmp(&current.number()) {
                    std::cmp::Ordering::Less => StageStatus::Completed,
                    std::cmp::Ordering::Equal => StageStatus::Current,
                    std::cmp::Ordering::Greater => StageStatus::Upcoming,
                },
            })
            .collect();
        Some(Self { stages })
    }
}

// ── Fields ───────────────────────────────────────────────────────────

/// One input with its current value and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub max_len: usize,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldView {
    fn new(field: Field, ctx: &FlowContext) -> Self {
        Self {
            field,
            label: field.label(),
            placeholder: field.placeholder(),
            max_len: field.max_len(),
            value: ctx.draft.get(field).to_string(),
            error: ctx.errors.get(field).map(str::to_string),
        }
    }
}

fn banner(errors: &ValidationErrors) -> Option<String> {
    errors.general().map(str::to_string)
}

// ── Identity ─────────────────────────────────────────────────────────

/// State of the resend control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum ResendState {
    Waiting { seconds: u32 },
    Available,
}

impl ResendState {
    fn from_remaining(remaining: u32) -> Self {
        if remaining == 0 {
            Self::Available
        } else {
            Self::Waiting { seconds: remaining }
        }
    }

    /// Text shown in place of the resend control.
    pub fn label(&self) -> String {
        match self {
            Self::Waiting { seconds } => format!("Resend OTP in {seconds} seconds"),
            Self::Available => "Resend OTP".to_string(),
        }
    }
}

/// The panel shown once a code was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpPanel {
    /// "OTP sent to 987654****".
    pub notice: String,
    pub otp: FieldView,
    pub resend: ResendState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityView {
    pub heading: &'static str,
    pub description: &'static str,
    pub identity_number: FieldView,
    pub mobile_number: FieldView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_panel: Option<OtpPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub submit_label: &'static str,
}

impl IdentityView {
    fn build(step: &IdentityStep, ctx: &FlowContext) -> Self {
        let otp_panel = step.dispatch().map(|dispatch| OtpPanel {
            notice: format!("OTP sent to {}", dispatch.masked_mobile),
            otp: FieldView::new(Field::Otp, ctx),
            resend: ResendState::from_remaining(step.countdown_remaining().unwrap_or(0)),
        });
        Self {
            heading: Step::IdentityVerification.title(),
            description: "Enter your identity number to verify your identity",
            identity_number: FieldView::new(Field::IdentityNumber, ctx),
            mobile_number: FieldView::new(Field::MobileNumber, ctx),
            submit_label: if otp_panel.is_some() {
                "Verify OTP"
            } else {
                "Generate OTP"
            },
            otp_panel,
            banner: banner(&ctx.errors),
        }
    }
}

// ── Tax ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxView {
    pub heading: &'static str,
    pub description: &'static str,
    pub tax_id: FieldView,
    pub full_name: FieldView,
    pub date_of_birth: FieldView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub submit_label: &'static str,
    pub back_label: &'static str,
}

impl TaxView {
    fn build(ctx: &FlowContext) -> Self {
        Self {
            heading: Step::TaxVerification.title(),
            description: "Enter your tax ID details for verification",
            tax_id: FieldView::new(Field::TaxId, ctx),
            full_name: FieldView::new(Field::FullName, ctx),
            date_of_birth: FieldView::new(Field::DateOfBirth, ctx),
            banner: banner(&ctx.errors),
            submit_label: "Verify Tax ID",
            back_label: "Back",
        }
    }
}

// ── Success ──────────────────────────────────────────────────────────

/// Checklist shown on the success screen.
pub const CHECKLIST: [&str; 3] = [
    "Identity verification completed",
    "Mobile number verified",
    "Tax ID details validated",
];

/// Read-only summary of the verified values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessSummary {
    pub heading: &'static str,
    pub message: &'static str,
    pub checklist: [&'static str; 3],
    /// Grouped 4-4-4.
    pub identity_number: String,
    pub mobile_number: String,
    pub tax_id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub restart_label: &'static str,
}

impl SuccessSummary {
    fn build(ctx: &FlowContext) -> Self {
        let draft = &ctx.draft;
        Self {
            heading: Step::Success.title(),
            message: "Your identity and tax ID verification has been completed successfully. \
                      You can now proceed with the registration process.",
            checklist: CHECKLIST,
            identity_number: group_identity_number(&draft.identity_number),
            mobile_number: draft.mobile_number.clone(),
            tax_id: draft.tax_id.clone(),
            full_name: draft.full_name.trim().to_string(),
            date_of_birth: draft.date_of_birth.clone(),
            restart_label: "Start New Registration",
        }
    }
}

// ── Screen ───────────────────────────────────────────────────────────

/// The body of the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "screen")]
pub enum ScreenBody {
    Identity(IdentityView),
    Tax(TaxView),
    Success(SuccessSummary),
}

/// Everything the current screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub step: Step,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressView>,
    pub body: ScreenBody,
}

impl ScreenView {
    pub(crate) fn build(active: &ActiveStep, ctx: &FlowContext) -> Self {
        let step = active.step();
        let body = match active {
            ActiveStep::Identity(identity) => ScreenBody::Identity(IdentityView::build(identity, ctx)),
            ActiveStep::Tax(_) => ScreenBody::Tax(TaxView::build(ctx)),
            ActiveStep::Success => ScreenBody::Success(SuccessSummary::build(ctx)),
        };
        Self {
            step,
            progress: ProgressView::for_step(step),
            body,
        }
    }
}
