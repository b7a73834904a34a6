//! Evolution chain construction against an in-memory fetcher.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{context, entity, item, level, link, oddish_chain, oddish_entities, StubFetcher};
use pokedex::models::NATURAL_EVOLUTION;
use pokedex::services::EvolutionService;
use pokedex::FromRef;

fn eevee_chain() -> pokedex::models::RawChainLink {
    let branches = [
        (134, "vaporeon"),
        (135, "jolteon"),
        (136, "flareon"),
        (196, "espeon"),
        (197, "umbreon"),
        (470, "leafeon"),
        (471, "glaceon"),
        (700, "sylveon"),
    ];
    link(
        133,
        "eevee",
        vec![],
        branches
            .iter()
            .map(|(id, name)| link(*id, name, item("water-stone"), vec![]))
            .collect(),
    )
}

fn eevee_entities() -> Vec<pokedex::models::Entity> {
    [
        (133, "eevee"),
        (134, "vaporeon"),
        (135, "jolteon"),
        (136, "flareon"),
        (196, "espeon"),
        (197, "umbreon"),
        (470, "leafeon"),
        (471, "glaceon"),
        (700, "sylveon"),
    ]
    .iter()
    .map(|(id, name)| entity(*id, name, &["normal"]))
    .collect()
}

#[tokio::test]
async fn test_all_nodes_built_when_every_fetch_succeeds() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(eevee_entities()));
    let (ctx, _dir) = context(fetcher.clone(), |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let root = service.build_chain(&eevee_chain()).await.unwrap();

    assert_eq!(root.flatten().len(), 9);
    assert_eq!(root.total_descendant_count(), 8);
    assert_eq!(root.max_depth(), 1);
    assert_eq!(fetcher.entity_calls(), 9);

    let names: Vec<&str> = root.children.iter().map(|c| c.entity.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["vaporeon", "jolteon", "flareon", "espeon", "umbreon", "leafeon", "glaceon", "sylveon"]
    );
}

#[tokio::test]
async fn test_failing_sibling_is_omitted() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(eevee_entities())
            .failing("jolteon")
            .failing("umbreon"),
    );
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let root = service.build_chain(&eevee_chain()).await.unwrap();

    let names: Vec<&str> = root.children.iter().map(|c| c.entity.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["vaporeon", "flareon", "espeon", "leafeon", "glaceon", "sylveon"]
    );
    assert_eq!(root.total_descendant_count(), 6);
}

#[tokio::test]
async fn test_failing_middle_stage_prunes_its_subtree() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .failing("gloom"),
    );
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let root = service.build_chain(&oddish_chain()).await.unwrap();

    assert!(!root.can_evolve());
    assert_eq!(root.flatten().len(), 1);
    assert!(root.find_descendant_by_entity_id(45).is_none());
    assert!(root.find_descendant_by_entity_id(43).is_none());
}

#[tokio::test]
async fn test_failing_root_yields_none() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .failing("oddish"),
    );
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    assert!(service.build_chain(&oddish_chain()).await.is_none());
}

#[tokio::test]
async fn test_three_stage_branching_metrics() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(oddish_entities()));
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let root = service.build_chain(&oddish_chain()).await.unwrap();

    assert_eq!(root.max_depth(), 2);
    let ids: Vec<u32> = root.flatten().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![43, 44, 45, 182]);

    assert_eq!(root.depth, 0);
    assert!(root.requirement.is_none());
    assert_eq!(root.requirement_text(), NATURAL_EVOLUTION);

    let gloom = root.find_descendant_by_entity_id(44).unwrap();
    assert_eq!(gloom.depth, 1);
    assert_eq!(gloom.requirement_text(), "Level 21");
    assert_eq!(gloom.children[1].requirement_text(), "Use Sun stone");
    assert_eq!(gloom.children[1].depth, 2);

    assert_eq!(root.find_parent_of(182).unwrap().name, "gloom");
    assert!(root.find_parent_of(43).is_none());
    assert_eq!(root.next_evolutions(44).len(), 2);
}

#[tokio::test]
async fn test_root_requirement_ignored() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(oddish_entities()));
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let mut chain = oddish_chain();
    chain.evolution_details = level(5);

    let root = service.build_chain(&chain).await.unwrap();
    assert!(root.requirement.is_none());
}

#[tokio::test]
async fn test_build_twice_is_idempotent() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(oddish_entities()));
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let first = service.build_chain(&oddish_chain()).await;
    let second = service.build_chain(&oddish_chain()).await;
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_sequential_matches_concurrent() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(eevee_entities()));
    let (concurrent_ctx, _a) = context(fetcher.clone(), |_| {});
    let (sequential_ctx, _b) = context(fetcher, |c| c.evolution.concurrent = false);

    let concurrent = EvolutionService::from_ref(&concurrent_ctx)
        .build_chain(&eevee_chain())
        .await;
    let sequential = EvolutionService::from_ref(&sequential_ctx)
        .build_chain(&eevee_chain())
        .await;
    assert_eq!(concurrent, sequential);
}

#[tokio::test]
async fn test_sequential_failing_sibling_is_omitted() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(eevee_entities())
            .failing("jolteon")
            .failing("umbreon"),
    );
    let (concurrent_ctx, _a) = context(fetcher.clone(), |_| {});
    let (sequential_ctx, _b) = context(fetcher, |c| c.evolution.concurrent = false);

    let sequential = EvolutionService::from_ref(&sequential_ctx)
        .build_chain(&eevee_chain())
        .await
        .unwrap();
    let names: Vec<&str> = sequential
        .children
        .iter()
        .map(|c| c.entity.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["vaporeon", "flareon", "espeon", "leafeon", "glaceon", "sylveon"]
    );

    let concurrent = EvolutionService::from_ref(&concurrent_ctx)
        .build_chain(&eevee_chain())
        .await;
    assert_eq!(concurrent.as_ref(), Some(&sequential));
}

#[tokio::test]
async fn test_slow_sibling_keeps_its_position() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .delayed("vileplume", Duration::from_millis(50)),
    );
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    let root = service.build_chain(&oddish_chain()).await.unwrap();
    let ids: Vec<u32> = root.children[0].children.iter().map(|c| c.entity.id).collect();
    assert_eq!(ids, vec![45, 182]);
}

#[tokio::test]
async fn test_depth_cap_prunes_deep_links() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(oddish_entities()));
    let (ctx, _dir) = context(fetcher.clone(), |c| c.evolution.max_depth = 1);
    let service = EvolutionService::from_ref(&ctx);

    let root = service.build_chain(&oddish_chain()).await.unwrap();
    assert_eq!(root.max_depth(), 1);
    assert_eq!(root.flatten().len(), 2);
    assert_eq!(fetcher.entity_calls(), 2);
}

#[tokio::test]
async fn test_get_evolution_chain_uses_cache() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .with_graph(18, oddish_chain()),
    );
    let (ctx, _dir) = context(fetcher.clone(), |_| {});
    let service = EvolutionService::from_ref(&ctx);
    let url = common::species_url(44);

    let first = service.get_evolution_chain(&url).await.unwrap();
    let second = service.get_evolution_chain(&url).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.entity.name, "oddish");
    assert_eq!(fetcher.graph_calls(), 1);
    assert_eq!(ctx.chain_cache.len(), 1);

    service.clear_cache();
    service.get_evolution_chain(&url).await.unwrap();
    assert_eq!(fetcher.graph_calls(), 2);
}

#[tokio::test]
async fn test_get_evolution_chain_without_cache() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .with_graph(18, oddish_chain()),
    );
    let (ctx, _dir) = context(fetcher.clone(), |c| c.evolution.cache = false);
    let service = EvolutionService::from_ref(&ctx);
    let url = common::species_url(43);

    service.get_evolution_chain(&url).await.unwrap();
    service.get_evolution_chain(&url).await.unwrap();
    assert_eq!(fetcher.graph_calls(), 2);
    assert!(ctx.chain_cache.is_empty());
}

#[tokio::test]
async fn test_pruned_chain_is_not_cached() {
    let flaky = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .with_graph(18, oddish_chain())
            .failing("bellossom"),
    );
    let (flaky_ctx, _a) = context(flaky, |_| {});
    let url = common::species_url(43);

    let first = EvolutionService::from_ref(&flaky_ctx)
        .get_evolution_chain(&url)
        .await
        .unwrap();
    assert_eq!(first.flatten().len(), 3);
    assert!(flaky_ctx.chain_cache.is_empty());

    let healthy = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .with_graph(18, oddish_chain()),
    );
    let (mut healthy_ctx, _b) = context(healthy, |_| {});
    healthy_ctx.chain_cache = flaky_ctx.chain_cache.clone();

    let second = EvolutionService::from_ref(&healthy_ctx)
        .get_evolution_chain(&url)
        .await
        .unwrap();
    assert_eq!(second.flatten().len(), 4);
    assert_eq!(flaky_ctx.chain_cache.len(), 1);
}

#[tokio::test]
async fn test_depth_capped_chain_is_not_cached() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .with_graph(18, oddish_chain()),
    );
    let (ctx, _dir) = context(fetcher.clone(), |c| c.evolution.max_depth = 1);
    let service = EvolutionService::from_ref(&ctx);
    let url = common::species_url(43);

    assert_eq!(service.get_evolution_chain(&url).await.unwrap().flatten().len(), 2);
    assert!(ctx.chain_cache.is_empty());
    service.get_evolution_chain(&url).await.unwrap();
    assert_eq!(fetcher.graph_calls(), 2);
}

#[tokio::test]
async fn test_chain_at_url_shares_cache() {
    let fetcher = Arc::new(
        StubFetcher::new()
            .with_entities(oddish_entities())
            .with_graph(18, oddish_chain()),
    );
    let (ctx, _dir) = context(fetcher.clone(), |_| {});
    let service = EvolutionService::from_ref(&ctx);
    let url = common::species_url(45);

    let first = service
        .get_evolution_chain_at(&url, &common::chain_url(18))
        .await
        .unwrap();
    let second = service.get_evolution_chain(&url).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(fetcher.graph_calls(), 1);

    assert!(service
        .get_evolution_chain_at(&common::species_url(1), &common::chain_url(1))
        .await
        .is_none());
}

#[tokio::test]
async fn test_missing_graph_is_no_data() {
    let fetcher = Arc::new(StubFetcher::new().with_entities(oddish_entities()));
    let (ctx, _dir) = context(fetcher, |_| {});
    let service = EvolutionService::from_ref(&ctx);

    assert!(service
        .get_evolution_chain(&common::species_url(43))
        .await
        .is_none());
}
