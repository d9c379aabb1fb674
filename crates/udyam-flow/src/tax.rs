//! # Tax-Identifier Verification Step
//!
//! Validates the tax identifier, the name as printed on the tax card and
//! the date of birth, then asks the provider to match them. A verdict with
//! any attribute unmatched is treated the same as a provider failure.

use udyam_core::validation;
use udyam_core::{
    Field, ProviderError, SecondaryIdRequest, SecondaryIdVerdict, ValidationErrors,
    VerificationProvider,
};

use crate::context::FlowContext;

/// Banner shown when the tax identifier could not be verified.
pub const VERIFY_FAILED: &str = "Tax ID verification failed. Please try again.";

/// Result of submitting the tax step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxOutcome {
    /// Field rules failed; messages are in the error set.
    Invalid,
    /// Every attribute matched.
    Verified(SecondaryIdVerdict),
    /// Mismatch or provider failure; message in the banner.
    Failed,
}

/// The tax step. Holds no state of its own; all values live in the draft.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaxStep;

impl TaxStep {
    pub fn new() -> Self {
        Self
    }

    /// Validate the step's fields and verify them with the provider.
    pub async fn submit(
        &self,
        ctx: &mut FlowContext,
        provider: &dyn VerificationProvider,
    ) -> TaxOutcome {
        let draft = &ctx.draft;
        let violations = validation::check_all([
            (Field::TaxId, draft.tax_id.as_str()),
            (Field::FullName, draft.full_name.as_str()),
            (Field::DateOfBirth, draft.date_of_birth.as_str()),
        ]);
        if !violations.is_empty() {
            ctx.errors = ValidationErrors::from_violations(violations);
            return TaxOutcome::Invalid;
        }

        let request = SecondaryIdRequest {
            identity_number: draft.identity_number.clone(),
            tax_id: draft.tax_id.clone(),
            full_name: draft.full_name.trim().to_string(),
            date_of_birth: draft.date_of_birth.trim().to_string(),
        };

        match provider.verify_secondary_id(&request).await {
            Ok(verdict) if verdict.is_verified() => {
                ctx.errors.clear();
                TaxOutcome::Verified(verdict)
            }
            Ok(verdict) => {
                tracing::info!(?verdict, "tax id not matched");
                ctx.errors = ValidationErrors::banner(VERIFY_FAILED);
                TaxOutcome::Failed
            }
            Err(ProviderError::Rejected { message }) => {
                tracing::info!(%message, "tax id rejected");
                ctx.errors = ValidationErrors::banner(message);
                TaxOutcome::Failed
            }
            Err(err) => {
                tracing::warn!(error = %err, provider = provider.provider_name(), "tax id verification failed");
                ctx.errors = ValidationErrors::banner(VERIFY_FAILED);
                TaxOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use udyam_core::{
        CodeCheck, CodeDispatch, CodeRequest, CodeVerdict, DemoVerificationProvider,
    };

    /// Returns a fixed secondary-id result.
    struct Fixed(Result<SecondaryIdVerdict, ProviderError>);

    #[async_trait]
    impl VerificationProvider for Fixed {
        async fn request_code(&self, _: &CodeRequest) -> Result<CodeDispatch, ProviderError> {
            unreachable!()
        }

        async fn verify_code(&self, _: &CodeCheck) -> Result<CodeVerdict, ProviderError> {
            unreachable!()
        }

        async fn verify_secondary_id(
            &self,
            _: &SecondaryIdRequest,
        ) -> Result<SecondaryIdVerdict, ProviderError> {
            self.0.clone()
        }

        fn provider_name(&self) -> &str {
            "Fixed"
        }
    }

    fn filled_context() -> FlowContext {
        let mut ctx = FlowContext::new();
        ctx.input(Field::TaxId, "abcde1234f");
        ctx.input(Field::FullName, "Asha Verma");
        ctx.input(Field::DateOfBirth, "1990-04-12");
        ctx
    }

    fn demo() -> DemoVerificationProvider {
        DemoVerificationProvider::new().with_secondary_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn empty_fields_report_each_rule() {
        let mut ctx = FlowContext::new();
        ctx.input(Field::FullName, " a ");
        let outcome = TaxStep::new().submit(&mut ctx, &demo()).await;
        assert_eq!(outcome, TaxOutcome::Invalid);
        assert_eq!(ctx.errors.len(), 3);
        assert_eq!(
            ctx.errors.get(Field::FullName),
            Some("Name must be at least 2 characters long")
        );
        assert_eq!(ctx.errors.get(Field::DateOfBirth), Some("Date of birth is required"));
    }

    #[tokio::test]
    async fn impossible_date_is_rejected() {
        let mut ctx = filled_context();
        ctx.input(Field::DateOfBirth, "1990-02-30");
        let outcome = TaxStep::new().submit(&mut ctx, &demo()).await;
        assert_eq!(outcome, TaxOutcome::Invalid);
        assert_eq!(
            ctx.errors.get(Field::DateOfBirth),
            Some("Date of birth must be a valid date (YYYY-MM-DD)")
        );
    }

    #[tokio::test]
    async fn lowercase_tax_id_is_stored_uppercase_and_passes() {
        let mut ctx = filled_context();
        assert_eq!(ctx.draft.tax_id, "ABCDE1234F");
        let outcome = TaxStep::new().submit(&mut ctx, &demo()).await;
        assert_eq!(outcome, TaxOutcome::Verified(SecondaryIdVerdict::approved()));
        assert!(ctx.errors.is_empty());
    }

    #[tokio::test]
    async fn mismatch_shows_banner() {
        let mut ctx = filled_context();
        let verdict = SecondaryIdVerdict {
            name_match: false,
            ..SecondaryIdVerdict::approved()
        };
        let outcome = TaxStep::new().submit(&mut ctx, &Fixed(Ok(verdict))).await;
        assert_eq!(outcome, TaxOutcome::Failed);
        assert_eq!(ctx.errors.general(), Some(VERIFY_FAILED));
    }

    #[tokio::test]
    async fn provider_message_is_used_for_rejection() {
        let mut ctx = filled_context();
        let provider = Fixed(Err(ProviderError::Rejected {
            message: "Tax ID is not linked to this identity".into(),
        }));
        assert_eq!(TaxStep::new().submit(&mut ctx, &provider).await, TaxOutcome::Failed);
        assert_eq!(ctx.errors.general(), Some("Tax ID is not linked to this identity"));
    }

    #[tokio::test]
    async fn outage_uses_generic_banner() {
        let mut ctx = filled_context();
        let provider = Fixed(Err(ProviderError::Unavailable {
            reason: "timeout".into(),
        }));
        assert_eq!(TaxStep::new().submit(&mut ctx, &provider).await, TaxOutcome::Failed);
        assert_eq!(ctx.errors.general(), Some(VERIFY_FAILED));
    }
}
