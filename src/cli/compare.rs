//! Compare command handler.

use crate::context::Context;
use crate::di::FromRef;
use crate::services::{ComparisonSlots, SearchService};

use super::{render, App, CommandResult};

impl App {
    pub(super) async fn run_compare(
        &self,
        ctx: &Context,
        first: &str,
        second: &str,
    ) -> CommandResult {
        let search = SearchService::from_ref(ctx);
        let first = search.validate_query(first)?;
        let second = search.validate_query(second)?;

        let (a, b) = tokio::join!(
            ctx.fetcher.fetch_entity(&first),
            ctx.fetcher.fetch_entity(&second)
        );

        let mut slots = ComparisonSlots::new();
        slots.add(a?)?;
        slots.add(b?)?;

        let summary = slots.summary()?;
        print!("{}", render::comparison(&summary));
        Ok(())
    }
}
