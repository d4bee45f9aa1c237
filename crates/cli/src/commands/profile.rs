//! Profile, account mode and demo mode commands.

use vant_app::AppContext;
use vant_core::{AccountModeState, UserProfile};

use super::CommandError;

/// Print the profile, account mode and demo state.
pub async fn show(ctx: &AppContext) {
    let status = ctx.profile_view().load().await;

    println!("{}", describe_profile(&status.profile));
    println!("Mode: {}", describe_mode(&status.account));
    if status.demo {
        println!("Demo mode is on.");
    }
    if !status.has_backend {
        println!("No API server configured. Set VANT_API_BASE_URL to save changes.");
    }
}

/// Register a business and switch to it.
pub async fn add_business(ctx: &AppContext, name: &str) -> Result<(), CommandError> {
    let message = ctx.profile_view().add_business(name).await?;
    println!("{message}");
    Ok(())
}

pub fn show_mode(ctx: &AppContext) {
    println!("{}", describe_mode(&ctx.account.state()));
}

pub fn switch_to_user(ctx: &AppContext) {
    println!("{}", ctx.profile_view().switch_to_user());
}

/// Switch to merchant mode for a business listed in the profile.
pub async fn switch_to_merchant(ctx: &AppContext, business_name: &str) -> Result<(), CommandError> {
    let view = ctx.profile_view();
    let profile = view.load().await.profile;
    let business = profile
        .find_business(business_name)
        .cloned()
        .ok_or_else(|| CommandError::UnknownBusiness(business_name.to_string()))?;

    println!("{}", view.switch_to_merchant(business)?);
    Ok(())
}

pub fn enter_demo(ctx: &AppContext) {
    let path = ctx.profile_view().enter_demo();
    println!("Demo mode on. Open {path} to see the demo business.");
}

pub fn exit_demo(ctx: &AppContext) {
    ctx.profile_view().exit_demo();
    println!("Demo mode off.");
}

pub fn client_id(ctx: &AppContext) {
    println!("{}", ctx.client_id.get_or_create());
}

fn describe_profile(profile: &UserProfile) -> String {
    let mut lines = vec![format!(
        "{} ({})",
        profile.display_name.as_deref().unwrap_or("Anonymous"),
        profile.client_id
    )];
    if let Some(email) = &profile.email {
        lines.push(email.clone());
    }
    if profile.businesses.is_empty() {
        lines.push("No businesses yet.".to_string());
    } else {
        lines.push("Businesses:".to_string());
        lines.extend(
            profile
                .businesses
                .iter()
                .map(|b| format!("  {} [{}]", b.business_name, b.slug)),
        );
    }
    lines.join("\n")
}

fn describe_mode(state: &AccountModeState) -> String {
    match state.current_business() {
        Some(business) => format!("{} ({})", state.mode(), business.business_name),
        None => state.mode().to_string(),
    }
}
