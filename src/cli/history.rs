//! Search history commands.

use clap::Subcommand;

use crate::context::Context;
use crate::di::FromRef;
use crate::repositories::HistoryRepository;

use super::CommandResult;

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Show recent searches, newest first
    List,
    /// Forget all recent searches
    Clear,
}

impl HistoryCommand {
    pub fn run(&self, ctx: &Context) -> CommandResult {
        let history = HistoryRepository::from_ref(ctx);
        match self {
            HistoryCommand::List => {
                let entries = history.list();
                if entries.is_empty() {
                    println!("No recent searches");
                }
                for (i, query) in entries.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, query);
                }
            }
            HistoryCommand::Clear => {
                history.clear()?;
                println!("Search history cleared");
            }
        }
        Ok(())
    }
}
