//! Cordial CLI - Message actions from the terminal
//!
//! Fetches a message by channel and message ID and runs one action on it.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use cordial::{Client, CreateMessage, EditMessage, HttpMethod, Message, RestClient, User};
use cordial_rest::HttpRestClient;
use dialoguer::{Confirm, Password};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "cordial")]
#[command(about = "Cordial CLI - act on chat messages", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a bot token
    Login {
        /// Bot token (will prompt if not provided)
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Message operations
    Message {
        #[command(subcommand)]
        action: MessageAction,
    },

    /// Show current configuration
    Config,
}

/// Message addressed by channel and message ID
#[derive(Args)]
struct Target {
    /// Channel ID
    channel_id: String,
    /// Message ID
    message_id: String,
}

#[derive(Subcommand)]
enum MessageAction {
    /// Show a message
    Get {
        #[command(flatten)]
        target: Target,
        /// Print every parsed field
        #[arg(long)]
        raw: bool,
    },
    /// Add a reaction as the bot
    React {
        #[command(flatten)]
        target: Target,
        /// Unicode emoji or name:id
        emoji: String,
    },
    /// Remove a reaction (the bot's own unless --user is given)
    Unreact {
        #[command(flatten)]
        target: Target,
        emoji: String,
        /// Remove this user's reaction instead
        #[arg(long)]
        user: Option<String>,
    },
    /// List users who reacted with an emoji
    Reactions {
        #[command(flatten)]
        target: Target,
        emoji: String,
    },
    /// Pin the message
    Pin {
        #[command(flatten)]
        target: Target,
    },
    /// Unpin the message
    Unpin {
        #[command(flatten)]
        target: Target,
    },
    /// Crosspost an announcement message
    Crosspost {
        #[command(flatten)]
        target: Target,
    },
    /// Reply to the message
    Reply {
        #[command(flatten)]
        target: Target,
        content: String,
    },
    /// Replace the message content
    Edit {
        #[command(flatten)]
        target: Target,
        content: String,
    },
    /// Start a thread from the message
    Thread {
        #[command(flatten)]
        target: Target,
        name: String,
    },
    /// Delete the message
    Delete {
        #[command(flatten)]
        target: Target,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl MessageAction {
    fn target(&self) -> &Target {
        match self {
            MessageAction::Get { target, .. }
            | MessageAction::React { target, .. }
            | MessageAction::Unreact { target, .. }
            | MessageAction::Reactions { target, .. }
            | MessageAction::Pin { target }
            | MessageAction::Unpin { target }
            | MessageAction::Crosspost { target }
            | MessageAction::Reply { target, .. }
            | MessageAction::Edit { target, .. }
            | MessageAction::Thread { target, .. }
            | MessageAction::Delete { target, .. } => target,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Login { token } => cmd_login(token).await,
        Commands::Message { action } => cmd_message(action).await,
        Commands::Config => cmd_config(),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(config: &Config) -> Result<Client> {
    debug!(base_url = %config.base_url, "Building REST client");
    let rest = HttpRestClient::new(config.rest_config()?).context("Failed to build REST client")?;
    Ok(Client::new(rest))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(token: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let token = match token {
        Some(t) => t,
        None => Password::new()
            .with_prompt("Bot token")
            .interact()
            .context("Failed to read token")?,
    };

    // Test the token before storing it
    let mut probe = config.clone();
    probe.set_token(token.clone());
    let client = build_client(&probe)?;
    print!("Testing token... ");

    match client.rest().request(HttpMethod::Get, "/users/@me", None).await {
        Ok(me) => {
            let user: User = serde_json::from_value(me).context("Failed to parse current user")?;
            println!("{} ({})", "OK".green(), user.display_name().cyan());
        }
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("Could not authenticate: {}", e);
        }
    }

    config.set_token(token);
    config.save()?;

    println!("{} Token saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

async fn cmd_message(action: MessageAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    let target = action.target();
    let message = client
        .fetch_message(&target.channel_id, &target.message_id)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch message {} in channel {}",
                target.message_id, target.channel_id
            )
        })?;

    match action {
        MessageAction::Get { raw, .. } => {
            if raw {
                println!("{:#?}", message);
            } else {
                print_message(&message);
            }
        }
        MessageAction::React { emoji, .. } => {
            message.react(&emoji).await?;
            println!("{} Reacted with {}", "✓".green(), emoji);
        }
        MessageAction::Unreact { emoji, user, .. } => {
            message.remove_reaction(&emoji, user.as_deref()).await?;
            let whose = user.as_deref().unwrap_or("@me");
            println!("{} Removed {} reaction from {}", "✓".green(), emoji, whose);
        }
        MessageAction::Reactions { emoji, .. } => {
            let users = message.get_reactions(&emoji).await?;
            if users.is_empty() {
                println!("No {} reactions.", emoji);
                return Ok(());
            }

            println!("{} {}", emoji, format!("({})", users.len()).dimmed());
            for user in users {
                println!("  {} {}", user.id.dimmed(), user.display_name().cyan());
            }
        }
        MessageAction::Pin { .. } => {
            message.pin().await?;
            println!("{} Pinned {}", "✓".green(), message.id());
        }
        MessageAction::Unpin { .. } => {
            message.unpin().await?;
            println!("{} Unpinned {}", "✓".green(), message.id());
        }
        MessageAction::Crosspost { .. } => {
            message.crosspost().await?;
            println!("{} Crossposted {}", "✓".green(), message.id());
        }
        MessageAction::Reply { content, .. } => {
            let reply = message.reply(CreateMessage::new().content(content)).await?;
            println!("{} Replied with {}", "✓".green(), reply.id());
        }
        MessageAction::Edit { content, .. } => {
            let edited = message.edit(EditMessage::new().content(content)).await?;
            println!("{} Edited {}", "✓".green(), edited.id());
            print_message(&edited);
        }
        MessageAction::Thread { name, .. } => {
            let thread = message.start_thread(&name).await?;
            println!("{} Started thread {} ({})", "✓".green(), name.cyan(), thread.id);
        }
        MessageAction::Delete { yes, .. } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete message {}?", message.id()))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            message.delete().await?;
            println!("{} Deleted {}", "✓".green(), message.id());
        }
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path:     {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  Token:    {}",
        config
            .masked_token()
            .unwrap_or_else(|| "(not set)".dimmed().to_string())
    );
    if let Some(timeout) = config.timeout_secs {
        println!("  Timeout:  {}s", timeout);
    }

    Ok(())
}

fn print_message(message: &Message) {
    let sent = message
        .sent_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let edited = if message.edited_at.is_some() {
        " (edited)".dimmed().to_string()
    } else {
        String::new()
    };
    let pinned = if message.is_pinned {
        " 📌".to_string()
    } else {
        String::new()
    };

    println!(
        "{} {} {}{}{}",
        sent.dimmed(),
        message.author.display_name().cyan().bold(),
        message.id().dimmed(),
        edited,
        pinned
    );

    if message.content.is_empty() {
        println!("  {}", "(no text content)".dimmed());
    } else {
        for line in message.content.lines() {
            println!("  {}", line);
        }
    }

    for attachment in &message.attachments {
        println!("  📎 {} {}", attachment.filename, attachment.url.dimmed());
    }
    if !message.embeds.is_empty() {
        println!("  {}", format!("[{} embed(s)]", message.embeds.len()).dimmed());
    }
    if !message.reactions.is_empty() {
        let summary: Vec<String> = message
            .reactions
            .iter()
            .map(|r| format!("{} {}", r.emoji.reaction_key(), r.count))
            .collect();
        println!("  {}", summary.join("  "));
    }
}
