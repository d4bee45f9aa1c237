//! Vant CLI - drive the Vant client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the profile and the current account mode
//! vant profile show
//!
//! # Register a business and switch to it
//! vant profile add-business "Acme Goods"
//!
//! # Edit the brand of the current merchant business
//! vant brand set --welcome "Hi there" --ethos "Made slowly"
//!
//! # List a product for the vibe scroll
//! vant items add --name Mug --description "Stoneware" --price 18 --image https://img.test/mug.jpg
//!
//! # Resolve a link and print the business it belongs to
//! vant mount https://instagram.com/acme.goods
//!
//! # Interactive workspace
//! vant workspace /mount/Nike
//! ```
//!
//! # Environment Variables
//!
//! - `VANT_ORIGIN` - origin the app is served from
//! - `VANT_API_BASE_URL` - external API base; unset means no backend
//! - `VANT_STATE_DIR` - where client state is kept (default `.vant`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use vant_core::ProfileItemKind;

mod commands;

#[derive(Parser)]
#[command(name = "vant")]
#[command(author, version, about = "Vant client tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or extend the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show or switch the account mode
    Mode {
        #[command(subcommand)]
        action: ModeAction,
    },
    /// Enter or leave demo mode
    Demo {
        #[command(subcommand)]
        action: DemoAction,
    },
    /// Show or edit a merchant brand
    Brand {
        #[command(subcommand)]
        action: BrandAction,
    },
    /// Manage the products and services of a merchant business
    Items {
        #[command(subcommand)]
        action: ItemsAction,
    },
    /// Resolve a link to the business it belongs to
    Mount {
        /// Instagram, website or other product link
        link: String,
    },
    /// Print the vibe scroll for some businesses
    Feed {
        /// Businesses to mount (defaults to the samples)
        businesses: Vec<String>,
    },
    /// Print this client's identifier
    ClientId,
    /// Interactive workspace shell
    Workspace {
        /// Starting path, e.g. `/mount/Nike`
        #[arg(default_value = "/")]
        path: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile, account mode and demo state
    Show,
    /// Register a business you sell for
    AddBusiness {
        /// Business display name
        name: String,
    },
}

#[derive(Subcommand)]
enum ModeAction {
    /// Show the current mode
    Show,
    /// Act as a shopper
    User,
    /// Act as a merchant for one of your businesses
    Merchant {
        /// Business name as shown in the profile
        business: String,
    },
}

#[derive(Subcommand)]
enum DemoAction {
    /// Turn demo mode on and act as the demo business
    Enter,
    /// Turn demo mode off
    Exit,
}

#[derive(Subcommand)]
enum BrandAction {
    /// Show the brand
    Show {
        /// Business slug (defaults to the current merchant business)
        #[arg(short, long)]
        business: Option<String>,
    },
    /// Replace the brand
    Set {
        /// Business slug (defaults to the current merchant business)
        #[arg(short, long)]
        business: Option<String>,

        /// Welcome message
        #[arg(short, long, default_value = "")]
        welcome: String,

        /// Ethos
        #[arg(short, long, default_value = "")]
        ethos: String,

        /// First message from the concierge
        #[arg(short, long, default_value = "")]
        concierge: String,
    },
}

#[derive(Subcommand)]
enum ItemsAction {
    /// List items
    List {
        /// Business slug (defaults to the current merchant business)
        #[arg(short, long)]
        business: Option<String>,
    },
    /// Add an item
    Add {
        /// Business slug (defaults to the current merchant business)
        #[arg(short, long)]
        business: Option<String>,

        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// `product` or `service`
        #[arg(short = 't', long = "type", default_value = "product")]
        kind: ProfileItemKind,

        #[arg(short, long, default_value = "")]
        price: String,

        /// Photo URL for the vibe scroll card
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Remove an item
    Remove {
        /// Business slug (defaults to the current merchant business)
        #[arg(short, long)]
        business: Option<String>,

        /// Item id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays clean.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::context()?;

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&ctx).await,
            ProfileAction::AddBusiness { name } => commands::profile::add_business(&ctx, &name).await?,
        },
        Commands::Mode { action } => match action {
            ModeAction::Show => commands::profile::show_mode(&ctx),
            ModeAction::User => commands::profile::switch_to_user(&ctx),
            ModeAction::Merchant { business } => commands::profile::switch_to_merchant(&ctx, &business).await?,
        },
        Commands::Demo { action } => match action {
            DemoAction::Enter => commands::profile::enter_demo(&ctx),
            DemoAction::Exit => commands::profile::exit_demo(&ctx),
        },
        Commands::Brand { action } => match action {
            BrandAction::Show { business } => commands::merchant::show_brand(&ctx, business.as_deref()).await?,
            BrandAction::Set {
                business,
                welcome,
                ethos,
                concierge,
            } => {
                commands::merchant::set_brand(&ctx, business.as_deref(), &welcome, &ethos, &concierge).await?;
            }
        },
        Commands::Items { action } => match action {
            ItemsAction::List { business } => commands::merchant::list_items(&ctx, business.as_deref())?,
            ItemsAction::Add {
                business,
                name,
                description,
                kind,
                price,
                image,
            } => {
                let form = vant_app::views::ItemForm {
                    name,
                    description,
                    kind,
                    price,
                    image_url: image,
                };
                commands::merchant::add_item(&ctx, business.as_deref(), form)?;
            }
            ItemsAction::Remove { business, id } => {
                commands::merchant::remove_item(&ctx, business.as_deref(), &id)?;
            }
        },
        Commands::Mount { link } => commands::workspace::mount(&ctx, &link).await?,
        Commands::Feed { businesses } => commands::workspace::feed(&ctx, &businesses).await?,
        Commands::ClientId => commands::profile::client_id(&ctx),
        Commands::Workspace { path } => commands::workspace::shell(&ctx, &path).await?,
    }
    Ok(())
}
