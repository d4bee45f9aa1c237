//! Workspace commands: link mounting, the vibe scroll and the interactive shell.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use vant_app::AppContext;
use vant_app::views::{InputOutcome, Workspace};
use vant_core::workspace::SAMPLE_BUSINESSES;
use vant_core::{BusinessSlug, ProductHandle, mount_path};

use super::CommandError;

/// Resolve a link and print the business it belongs to.
pub async fn mount(ctx: &AppContext, link: &str) -> Result<(), CommandError> {
    let mut workspace = ctx.workspace("/");
    match workspace.submit_input(link).await? {
        InputOutcome::Mounted(name) => println!("{name}  {}", mount_path(&name)),
        InputOutcome::Ignored | InputOutcome::Message => println!("Not a link. Nothing mounted."),
    }
    Ok(())
}

/// Mount `businesses` (or the samples) and print their vibe scroll.
pub async fn feed(ctx: &AppContext, businesses: &[String]) -> Result<(), CommandError> {
    let mut workspace = ctx.workspace("/");
    if businesses.is_empty() {
        for name in SAMPLE_BUSINESSES {
            workspace.mount_sample(name)?;
        }
    } else {
        for name in businesses {
            workspace.mount_sample(name)?;
        }
    }

    print_feed(&workspace.refresh_feed().await);
    Ok(())
}

/// A line typed into the workspace shell.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Help,
    Quit,
    Status,
    Explore,
    Go(&'a str),
    Mount(&'a str),
    Toggle(&'a str),
    Feed,
    Open(&'a str),
    Like(&'a str),
    Vault,
    Chat(&'a str),
}

impl<'a> ShellCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Self::Chat(line);
        };
        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        let arg = arg.trim();
        match name {
            "quit" | "exit" => Self::Quit,
            "status" => Self::Status,
            "explore" => Self::Explore,
            "go" if !arg.is_empty() => Self::Go(arg),
            "mount" if !arg.is_empty() => Self::Mount(arg),
            "toggle" if !arg.is_empty() => Self::Toggle(arg),
            "feed" => Self::Feed,
            "open" if !arg.is_empty() => Self::Open(arg),
            "like" if !arg.is_empty() => Self::Like(arg),
            "vault" => Self::Vault,
            _ => Self::Help,
        }
    }
}

const HELP: &str = "\
Type a message to chat, or paste a link to mount its business.
  /status          mounted businesses and explore mode
  /explore         toggle explore mode
  /go <path>       navigate, e.g. /go /mount/Nike
  /mount <name>    mount a business
  /toggle <name>   show or hide a mounted business in the feed
  /feed            refresh the vibe scroll
  /open <id>       expand or collapse a product
  /like <id>       save a product to the vault
  /vault           list saved products
  /quit";

/// Interactive workspace starting at `path`.
pub async fn shell(ctx: &AppContext, path: &str) -> Result<(), CommandError> {
    let mut workspace = ctx.workspace(path);
    println!("{HELP}");
    print_status(&workspace);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !handle_line(&mut workspace, &line).await {
            break;
        }
    }
    Ok(())
}

/// Run one shell line. Returns `false` when the shell should exit.
async fn handle_line(workspace: &mut Workspace, line: &str) -> bool {
    match ShellCommand::parse(line) {
        ShellCommand::Quit => return false,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Status => print_status(workspace),
        ShellCommand::Explore => {
            workspace.toggle_explore();
            print_status(workspace);
        }
        ShellCommand::Go(path) => {
            workspace.navigate(path);
            print_status(workspace);
        }
        ShellCommand::Mount(name) => match workspace.mount_sample(name) {
            Ok(()) => print_status(workspace),
            Err(e) => println!("{e}"),
        },
        ShellCommand::Toggle(name) => {
            workspace.toggle_active(&BusinessSlug::normalize(name));
            print_status(workspace);
        }
        ShellCommand::Feed => print_feed(&workspace.refresh_feed().await),
        ShellCommand::Open(id) => {
            workspace.vibe_mut().toggle_expanded(id);
            match workspace.vibe().expanded() {
                Some(id) => println!("Expanded {id}"),
                None => println!("Collapsed"),
            }
        }
        ShellCommand::Like(id) => {
            workspace.vibe_mut().like(id);
            println!("Saved {id} to your vault");
        }
        ShellCommand::Vault => {
            for id in workspace.vibe().vault() {
                println!("  {id}");
            }
        }
        ShellCommand::Chat(text) => match workspace.submit_input(text).await {
            Ok(InputOutcome::Mounted(name)) => {
                println!("Mounted {name}");
                print_status(workspace);
            }
            Ok(InputOutcome::Message) => {
                if workspace.vibe().is_open() && workspace.messages().len() == 1 {
                    print_feed(&workspace.refresh_feed().await);
                }
            }
            Ok(InputOutcome::Ignored) => {}
            Err(e) => println!("{e}"),
        },
    }
    true
}

fn print_status(workspace: &Workspace) {
    let state = workspace.state();
    println!(
        "At {}  explore {}",
        state.path(),
        if state.explore_mode() { "on" } else { "off" }
    );
    for business in state.mounted() {
        let marker = if business.active { "*" } else { " " };
        println!(" {marker} {} [{}]", business.name, business.id);
    }
    let samples = state.unmounted_samples();
    if state.can_mount_other_businesses() && !samples.is_empty() {
        println!("   try: {}", samples.join(", "));
    }
}

fn print_feed(products: &[ProductHandle]) {
    if products.is_empty() {
        println!("Nothing to show. Mount a business first.");
    }
    for product in products {
        println!("{:>4}  {:<10} {}", product.id, product.business, product.handle);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::tests::offline_context;

    #[test]
    fn test_parse_shell_commands() {
        assert_eq!(ShellCommand::parse("/quit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse(" /go /mount/Nike "), ShellCommand::Go("/mount/Nike"));
        assert_eq!(ShellCommand::parse("/mount Blue Bottle"), ShellCommand::Mount("Blue Bottle"));
        assert_eq!(ShellCommand::parse("/mount"), ShellCommand::Help);
        assert_eq!(ShellCommand::parse("/wat"), ShellCommand::Help);
        assert_eq!(ShellCommand::parse("hello there"), ShellCommand::Chat("hello there"));
    }

    #[tokio::test]
    async fn test_shell_mount_respects_explore_gate() {
        let ctx = offline_context();
        let mut workspace = ctx.workspace("/mount/Nike");

        assert!(handle_line(&mut workspace, "/mount COS").await);
        assert_eq!(workspace.state().mounted().len(), 1);

        handle_line(&mut workspace, "/explore").await;
        handle_line(&mut workspace, "/mount COS").await;
        assert_eq!(workspace.state().mounted().len(), 2);

        assert!(!handle_line(&mut workspace, "/quit").await);
    }

    #[tokio::test]
    async fn test_shell_feed_and_vault() {
        let ctx = offline_context();
        let mut workspace = ctx.workspace("/mount/Aesop");

        handle_line(&mut workspace, "/feed").await;
        assert!(workspace.feed().iter().all(|p| p.business == "Aesop"));

        handle_line(&mut workspace, "/like 5").await;
        handle_line(&mut workspace, "/open 5").await;
        assert!(workspace.vibe().is_liked("5"));
        assert_eq!(workspace.vibe().expanded(), Some("5"));

        handle_line(&mut workspace, "/toggle aesop").await;
        handle_line(&mut workspace, "/feed").await;
        assert!(workspace.feed().is_empty());
    }

    #[tokio::test]
    async fn test_first_chat_message_opens_vibe() {
        let ctx = offline_context();
        let mut workspace = ctx.workspace("/");
        handle_line(&mut workspace, "show me blazers").await;
        assert!(workspace.vibe().is_open());
        assert_eq!(workspace.messages(), ["show me blazers"]);
    }
}
