//! # Screen Rendering
//!
//! Turns a [`ScreenView`] into plain text. Pure: the same view always
//! renders to the same string.

use std::fmt::Write;

use udyam_flow::view::{
    FieldView, IdentityView, ProgressView, StageStatus, SuccessSummary, TaxView,
};
use udyam_flow::{ScreenBody, ScreenView};

const RULE: &str = "────────────────────────────────────────────────────────";

/// Render the whole screen.
pub fn render(view: &ScreenView) -> String {
    let mut out = String::new();
    if let Some(progress) = &view.progress {
        progress_line(&mut out, progress);
    }
    match &view.body {
        ScreenBody::Identity(identity) => identity_screen(&mut out, identity),
        ScreenBody::Tax(tax) => tax_screen(&mut out, tax),
        ScreenBody::Success(summary) => success_screen(&mut out, summary),
    }
    out
}

fn progress_line(out: &mut String, progress: &ProgressView) {
    let stages: Vec<String> = progress
        .stages
        .iter()
        .map(|stage| {
            let marker = match stage.status {
                StageStatus::Completed => "✓",
                StageStatus::Current => "●",
                StageStatus::Upcoming => "○",
            };
            format!("{marker} {}. {}", stage.number, stage.title)
        })
        .collect();
    let _ = writeln!(out, "{}", stages.join("  ─  "));
}

fn heading(out: &mut String, title: &str, description: &str) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{description}");
    let _ = writeln!(out, "{RULE}");
}

fn banner(out: &mut String, banner: Option<&str>) {
    if let Some(message) = banner {
        let _ = writeln!(out, "! {message}  (:dismiss to hide)");
    }
}

fn field(out: &mut String, view: &FieldView) {
    let value = if view.value.is_empty() {
        format!("[{}]", view.placeholder)
    } else {
        view.value.clone()
    };
    let _ = writeln!(out, "  {:<24} {value}", format!("{}:", view.label));
    if let Some(error) = &view.error {
        let _ = writeln!(out, "  {:<24} ✗ {error}", "");
    }
}

fn identity_screen(out: &mut String, view: &IdentityView) {
    heading(out, view.heading, view.description);
    banner(out, view.banner.as_deref());
    field(out, &view.identity_number);
    field(out, &view.mobile_number);
    if let Some(panel) = &view.otp_panel {
        let _ = writeln!(out, "  {}", panel.notice);
        field(out, &panel.otp);
        let _ = writeln!(out, "  {}", panel.resend.label());
    }
    let _ = writeln!(out, "[{}]", view.submit_label);
}

fn tax_screen(out: &mut String, view: &TaxView) {
    heading(out, view.heading, view.description);
    banner(out, view.banner.as_deref());
    field(out, &view.tax_id);
    field(out, &view.full_name);
    field(out, &view.date_of_birth);
    let _ = writeln!(out, "[{}]  [{}: :back]", view.submit_label, view.back_label);
}

fn success_screen(out: &mut String, view: &SuccessSummary) {
    heading(out, view.heading, view.message);
    for item in view.checklist {
        let _ = writeln!(out, "  ✓ {item}");
    }
    let _ = writeln!(out);
    for (label, value) in [
        ("Identity Number", &view.identity_number),
        ("Mobile Number", &view.mobile_number),
        ("Tax ID", &view.tax_id),
        ("Full Name", &view.full_name),
        ("Date of Birth", &view.date_of_birth),
    ] {
        let _ = writeln!(out, "  {:<24} {value}", format!("{label}:"));
    }
    let _ = writeln!(out, "[{}: :restart]", view.restart_label);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use udyam_core::{DemoVerificationProvider, Field};
    use udyam_flow::FlowController;

    fn controller() -> FlowController {
        FlowController::new(Arc::new(DemoVerificationProvider::new()))
    }

    #[test]
    fn first_screen_shows_placeholders_and_progress() {
        let text = render(&controller().view());
        assert!(text.contains("● 1."));
        assert!(text.contains("○ 2."));
        assert!(text.contains("[Generate OTP]"));
        assert!(!text.contains("OTP sent to"));
    }

    #[tokio::test(start_paused = true)]
    async fn otp_panel_shows_notice_and_countdown() {
        let mut flow = controller();
        flow.input(Field::IdentityNumber, "123456789012").unwrap();
        flow.input(Field::MobileNumber, "9876543210").unwrap();
        flow.submit().await.unwrap();

        let text = render(&flow.view());
        assert!(text.contains("OTP sent to 987654****"));
        assert!(text.contains("Resend OTP in 30 seconds"));
        assert!(text.contains("[Verify OTP]"));
    }

    #[tokio::test]
    async fn field_errors_are_listed() {
        let mut flow = controller();
        flow.input(Field::IdentityNumber, "1234").unwrap();
        flow.submit().await.unwrap();
        let text = render(&flow.view());
        assert!(text.contains("✗ Identity number must be exactly 12 digits"));
    }
}
