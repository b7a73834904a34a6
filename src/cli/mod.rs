//! CLI module for pokedex.
//!
//! Subcommands:
//! - `search`, `random`: Look up one Pokémon with its evolution chain
//! - `evolution`: Show only the evolution chain
//! - `compare`: Compare two Pokémon side by side
//! - `find`: List Pokémon by name fragment or type
//! - `suggest`: Autocomplete a partial name
//! - `favorites`, `history`: Manage local data

mod compare;
mod favorites;
mod history;
pub mod render;
mod search;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;

use crate::config::Config;
use crate::context::Context;
use crate::error::AppError;

pub use favorites::FavoritesCommand;
pub use history::HistoryCommand;
pub use search::FindCommand;

/// Pokédex - browse the Pokémon catalog from the terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Pokédex - browse Pokémon, evolution chains and favorites")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search a Pokémon by name or number
    Search {
        /// Name or catalog number
        query: String,
    },

    /// Search a random Pokémon
    Random,

    /// Show the evolution chain of a Pokémon
    Evolution {
        /// Name or catalog number
        query: String,
    },

    /// Compare two Pokémon
    Compare {
        /// First Pokémon (name or number)
        first: String,
        /// Second Pokémon (name or number)
        second: String,
    },

    /// List Pokémon by name fragment or type
    Find {
        #[command(subcommand)]
        command: FindCommand,
    },

    /// Suggest names matching a fragment
    Suggest {
        /// At least two characters of a name
        fragment: String,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },

    /// Manage search history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        tracing::debug!(
            base_url = %config.api.base_url,
            storage = %config.storage.dir.display(),
            "Configuration loaded"
        );
        let ctx = Context::new(config)?;

        let result = match &self.command {
            Command::Search { query } => self.run_search(&ctx, query).await,
            Command::Random => self.run_random(&ctx).await,
            Command::Evolution { query } => self.run_evolution(&ctx, query).await,
            Command::Compare { first, second } => self.run_compare(&ctx, first, second).await,
            Command::Find { command } => command.run(&ctx).await,
            Command::Suggest { fragment } => self.run_suggest(&ctx, fragment).await,
            Command::Favorites { command } => command.run(&ctx).await,
            Command::History { command } => command.run(&ctx),
        };

        result.map_err(|e| {
            tracing::debug!(error = ?e, "Command failed");
            eyre!("[{}] {}", e.code(), e.user_message())
        })
    }
}

/// Result type of command handlers.
type CommandResult = Result<(), AppError>;
