//! # udyam-flow -- The Verification Form Flow
//!
//! Drives a user through identity verification (identity number, mobile
//! number, one-time password) and tax-identifier verification to a
//! completion summary.
//!
//! ## Structure
//!
//! - [`step`]: the three screens as a tagged variant.
//! - [`controller`]: [`FlowController`], which owns the active step, the
//!   shared [`FlowContext`] and the verification provider, and performs
//!   every navigation.
//! - [`identity`] and [`tax`]: per-step submit logic.
//! - [`countdown`]: the resend timer, a tokio task owned by the identity
//!   step.
//! - [`view`]: read-only view models for renderers.
//!
//! ## Concurrency
//!
//! Actions run one at a time through `&mut FlowController`. The countdown
//! is the only background task; it publishes on a `watch` channel and is
//! aborted when the identity step is left.

pub mod context;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod identity;
pub mod step;
pub mod tax;
pub mod view;

pub use context::FlowContext;
pub use controller::{
    ActiveStep, FlowController, FlowSettings, StepTransitionRecord, SubmitOutcome,
    TransitionTrigger,
};
pub use countdown::{Countdown, RESEND_COUNTDOWN_SECS};
pub use error::FlowError;
pub use identity::{IdentityOutcome, IdentityPhase, IdentityStep};
pub use step::Step;
pub use tax::{TaxOutcome, TaxStep};
pub use view::{ResendState, ScreenBody, ScreenView};
