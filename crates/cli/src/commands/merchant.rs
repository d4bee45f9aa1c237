//! Merchant dashboard commands: brand and listed items.

use vant_app::AppContext;
use vant_app::views::ItemForm;
use vant_core::{BrandInfo, ProfileItem};

use super::{CommandError, business_slug};

/// Print the brand of a business.
pub async fn show_brand(ctx: &AppContext, business: Option<&str>) -> Result<(), CommandError> {
    let dashboard = ctx.merchant_dashboard(&business_slug(ctx, business)?);
    let brand = dashboard.load_brand().await.unwrap_or_default();

    println!("{}", dashboard.business_name());
    println!("Share: {}", dashboard.mount_url());
    println!("{}", describe_brand(&brand));
    Ok(())
}

/// Replace the brand of a business. Blank fields are cleared.
pub async fn set_brand(
    ctx: &AppContext,
    business: Option<&str>,
    welcome: &str,
    ethos: &str,
    concierge: &str,
) -> Result<(), CommandError> {
    let dashboard = ctx.merchant_dashboard(&business_slug(ctx, business)?);
    let saved = dashboard
        .save_brand(BrandInfo::from_form(welcome, ethos, concierge))
        .await?;

    println!("Saved brand for {}.", dashboard.business_name());
    println!("{}", describe_brand(&saved));
    Ok(())
}

pub fn list_items(ctx: &AppContext, business: Option<&str>) -> Result<(), CommandError> {
    let dashboard = ctx.merchant_dashboard(&business_slug(ctx, business)?);
    let items = dashboard.items();
    if items.is_empty() {
        println!("No products or services yet.");
    }
    for item in &items {
        println!("{}", describe_item(item));
    }
    Ok(())
}

pub fn add_item(ctx: &AppContext, business: Option<&str>, form: ItemForm) -> Result<(), CommandError> {
    let dashboard = ctx.merchant_dashboard(&business_slug(ctx, business)?);
    let item = dashboard.add_item(form)?;
    println!("Added {} ({}).", item.name, item.id);
    Ok(())
}

pub fn remove_item(ctx: &AppContext, business: Option<&str>, id: &str) -> Result<(), CommandError> {
    let dashboard = ctx.merchant_dashboard(&business_slug(ctx, business)?);
    if dashboard.remove_item(id)? {
        println!("Removed.");
    } else {
        println!("No item with id {id}.");
    }
    Ok(())
}

fn describe_brand(brand: &BrandInfo) -> String {
    if brand.is_empty() {
        return "No brand set.".to_string();
    }

    let mut lines = Vec::new();
    if let Some(welcome) = &brand.welcome_message {
        lines.push(format!("Welcome: {welcome}"));
    }
    if let Some(ethos) = &brand.ethos {
        lines.push(format!("Ethos: {ethos}"));
    }
    if let Some(concierge) = &brand.initial_concierge_message {
        lines.push(format!("Concierge: {concierge}"));
    }
    for message in brand.brand_messages.iter().flatten() {
        lines.push(format!("  - {message}"));
    }
    lines.join("\n")
}

fn describe_item(item: &ProfileItem) -> String {
    let kind = match item.kind {
        vant_core::ProfileItemKind::Product => "product",
        vant_core::ProfileItemKind::Service => "service",
    };
    let price = item.price.as_deref().unwrap_or("-");
    format!("{}  {} [{kind}] {price}", item.id, item.name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vant_app::views::ItemError;
    use vant_core::ProfileItemKind;

    use super::*;
    use crate::commands::tests::offline_context;

    #[test]
    fn test_describe_brand() {
        assert_eq!(describe_brand(&BrandInfo::default()), "No brand set.");

        let brand = BrandInfo::from_form(" Hi ", "", "Ask me");
        assert_eq!(describe_brand(&brand), "Welcome: Hi\nConcierge: Ask me");
    }

    #[test]
    fn test_add_then_remove_item() {
        let ctx = offline_context();
        let form = ItemForm {
            name: "Mug".to_string(),
            description: "Stoneware".to_string(),
            kind: ProfileItemKind::Product,
            price: "18".to_string(),
            image_url: "https://img.test/mug.jpg".to_string(),
        };
        add_item(&ctx, Some("acme"), form).unwrap();

        let items = ctx.items.list("acme");
        assert_eq!(items.len(), 1);
        assert!(describe_item(&items[0]).ends_with("Mug [product] 18"));

        remove_item(&ctx, Some("acme"), &items[0].id).unwrap();
        assert!(ctx.items.list("acme").is_empty());
    }

    #[test]
    fn test_add_item_reports_validation() {
        let ctx = offline_context();
        let err = add_item(&ctx, Some("acme"), ItemForm::default()).unwrap_err();
        assert!(matches!(err, CommandError::Item(ItemError::Invalid("Please add a name."))));
    }

    #[tokio::test]
    async fn test_set_brand_needs_backend() {
        let ctx = offline_context();
        let err = set_brand(&ctx, Some("acme"), "Hi", "", "").await.unwrap_err();
        assert!(err.to_string().contains("VANT_API_BASE_URL"));
    }
}
