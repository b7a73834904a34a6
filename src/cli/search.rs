//! Search, random, evolution, find and suggest command handlers.

use clap::Subcommand;

use crate::context::Context;
use crate::di::FromRef;
use crate::models::Entity;
use crate::services::{EvolutionService, SearchService};

use super::{render, App, CommandResult};

/// Listing-based lookups.
#[derive(Subcommand)]
pub enum FindCommand {
    /// Pokémon whose name contains a fragment (first 10)
    Name {
        /// Name fragment
        fragment: String,
    },
    /// Pokémon of a type within the catalog range (first 20)
    Type {
        /// Type name, e.g. "fire"
        type_name: String,
    },
}

impl FindCommand {
    pub async fn run(&self, ctx: &Context) -> CommandResult {
        let search = SearchService::from_ref(ctx);
        let entities = match self {
            FindCommand::Name { fragment } => search.search_by_name(fragment).await?,
            FindCommand::Type { type_name } => search.search_by_type(type_name).await?,
        };
        print_entities(&entities);
        Ok(())
    }
}

fn print_entities(entities: &[Entity]) {
    if entities.is_empty() {
        println!("No Pokémon found");
        return;
    }
    for entity in entities {
        println!("{}", render::entity_line(entity));
    }
}

impl App {
    pub(super) async fn run_search(&self, ctx: &Context, query: &str) -> CommandResult {
        let outcome = SearchService::from_ref(ctx).search(query).await?;
        print!("{}", render::search_outcome(&outcome));
        Ok(())
    }

    pub(super) async fn run_random(&self, ctx: &Context) -> CommandResult {
        let outcome = SearchService::from_ref(ctx).search_random().await?;
        print!("{}", render::search_outcome(&outcome));
        Ok(())
    }

    pub(super) async fn run_evolution(&self, ctx: &Context, query: &str) -> CommandResult {
        let search = SearchService::from_ref(ctx);
        let query = search.validate_query(query)?;
        let entity = ctx.fetcher.fetch_entity(&query).await?;

        match EvolutionService::from_ref(ctx)
            .get_evolution_chain(entity.species_ref())
            .await
        {
            Some(chain) => {
                print!("{}", render::evolution_tree(&chain));
                println!(
                    "\n{} stages, {} evolutions, depth {}",
                    chain.flatten().len(),
                    chain.total_descendant_count(),
                    chain.max_depth()
                );
                if let Some(parent) = chain.find_parent_of(entity.id) {
                    println!("{} evolves from {}", entity.display_name(), parent.display_name());
                }
            }
            None => println!("No evolution data available for {}", entity.display_name()),
        }
        Ok(())
    }

    pub(super) async fn run_suggest(&self, ctx: &Context, fragment: &str) -> CommandResult {
        let suggestions = SearchService::from_ref(ctx).suggestions(fragment).await;
        if suggestions.is_empty() {
            println!("No suggestions");
        }
        for s in suggestions {
            println!("#{:03} {}", s.id, s.display_name);
        }
        Ok(())
    }
}
