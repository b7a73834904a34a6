//! Favorites management commands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::context::Context;
use crate::di::FromRef;
use crate::models::{FavoriteSort, SortOrder};
use crate::repositories::FavoritesRepository;
use crate::services::SearchService;

use super::{render, CommandResult};

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorites
    List {
        /// Sort key: date, name or id
        #[arg(long, default_value = "date")]
        sort: FavoriteSort,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Only favorites of this type
        #[arg(long = "type")]
        type_name: Option<String>,
    },
    /// Add a Pokémon to favorites
    Add {
        /// Name or catalog number
        query: String,
    },
    /// Remove a favorite by catalog number
    Remove { id: u32 },
    /// Favorites whose name or number contains a fragment
    Search { query: String },
    /// Totals by type and recent additions
    Stats,
    /// Write favorites as JSON to stdout or a file
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge favorites from an exported JSON file
    Import { file: PathBuf },
    /// Show or change the favorites limit (1-100)
    Limit { max: Option<usize> },
    /// Remove all favorites
    Clear,
}

impl FavoritesCommand {
    pub async fn run(&self, ctx: &Context) -> CommandResult {
        let favorites = FavoritesRepository::from_ref(ctx);

        match self {
            FavoritesCommand::List {
                sort,
                desc,
                type_name,
            } => {
                let order = if *desc {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                };
                let mut records = favorites.sorted_by(*sort, order);
                if let Some(type_name) = type_name {
                    let type_name = type_name.to_lowercase();
                    records.retain(|f| f.types.contains(&type_name));
                }
                print!("{}", render::favorites(&records));
            }
            FavoritesCommand::Add { query } => {
                let query = SearchService::from_ref(ctx).validate_query(query)?;
                let entity = ctx.fetcher.fetch_entity(&query).await?;
                favorites.add(&entity)?;
                println!(
                    "{} added to favorites ({}/{})",
                    entity.display_name(),
                    favorites.count(),
                    favorites.max()
                );
            }
            FavoritesCommand::Remove { id } => {
                if favorites.remove(*id)? {
                    println!("Removed #{:03} from favorites", id);
                } else {
                    println!("#{:03} is not a favorite", id);
                }
            }
            FavoritesCommand::Search { query } => {
                print!("{}", render::favorites(&favorites.search(query)));
            }
            FavoritesCommand::Stats => {
                print!("{}", render::favorites_stats(&favorites.stats()));
            }
            FavoritesCommand::Export { output } => {
                let json = favorites.export()?;
                match output {
                    Some(path) => {
                        std::fs::write(path, json)?;
                        println!("Favorites exported to {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
            FavoritesCommand::Import { file } => {
                let json = std::fs::read_to_string(file)?;
                let imported = favorites.import(&json)?;
                println!("{} favorites imported", imported);
            }
            FavoritesCommand::Limit { max } => {
                if let Some(max) = max {
                    favorites.set_max(*max)?;
                }
                println!("Favorites limit: {}", favorites.max());
            }
            FavoritesCommand::Clear => {
                favorites.clear()?;
                println!("All favorites removed");
            }
        }
        Ok(())
    }
}
