use super::*;
use grocery_watcher::scheduler::SchedulerState;
use rust_decimal::Decimal;

#[tokio::test]
async fn test_full_pass_over_default_stores() -> anyhow::Result<()> {
    let (scheduler, catalog) = create_test_scheduler().await?;

    let report = scheduler.run_once().await;

    // 3 terms x 5 stores
    assert_eq!(report.units_attempted, 15);
    assert_eq!(report.units_failed, 0);
    assert!(!report.cancelled);
    assert_eq!(report.stores_refreshed.len(), 5);
    assert_eq!(report.created, report.listings_seen);

    // Tesco 6 + SuperValu 6 + Dunnes 6 + Lidl 6 + Aldi 6 milk listings
    let milk = catalog.products_for_term("milk").await?;
    assert_eq!(milk.len(), 30);
    assert_eq!(milk[0].name, "Aldi Whole Milk 500ml");
    assert_eq!(milk[0].price, Decimal::new(62, 2));

    for store in catalog.list_stores().await? {
        assert!(store.last_scraped.is_some(), "{} was not marked as scraped", store.name);
    }
    println!("✓ Full pass collected {} listings", report.listings_seen);

    Ok(())
}

#[tokio::test]
async fn test_repeated_passes_do_not_duplicate() -> anyhow::Result<()> {
    let (scheduler, catalog) = create_test_scheduler().await?;

    let first = scheduler.run_once().await;
    let count = catalog.count_products().await?;
    let second = scheduler.run_once().await;

    assert_eq!(second.created, 0);
    assert_eq!(second.changed, 0);
    assert_eq!(second.unchanged, first.listings_seen);
    assert_eq!(catalog.count_products().await?, count);

    let stats = scheduler.stats().await;
    assert_eq!(stats.passes_completed, 2);
    assert_eq!(stats.last_report, Some(second));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_start_runs_immediate_pass() -> anyhow::Result<()> {
    let config = get_test_config();
    let catalog = create_test_catalog().await?;
    let registry = create_test_registry(&config)?;
    let mut scheduler_config = config.scheduler.clone();
    scheduler_config.run_on_start = true;
    let repository: Arc<dyn CatalogRepository> = catalog.clone();
    let scheduler = CollectionScheduler::new(registry, repository, scheduler_config);

    scheduler.start().await?;

    let handle = &scheduler;
    let completed = wait_for_condition(
        || async move { handle.stats().await.passes_completed == 1 },
        10,
    )
    .await;
    assert!(completed, "startup pass did not complete");
    assert!(catalog.count_products().await? > 0);

    scheduler.stop().await?;
    assert_eq!(scheduler.state(), SchedulerState::Idle);
    println!("✓ Startup pass completed and scheduler stopped cleanly");

    Ok(())
}

#[tokio::test]
async fn test_disabled_retailer_is_not_collected() -> anyhow::Result<()> {
    let mut config = get_test_config();
    config.stores.lidl.enabled = false;
    let catalog = create_test_catalog().await?;
    let registry = create_test_registry(&config)?;
    let repository: Arc<dyn CatalogRepository> = catalog.clone();
    let scheduler = CollectionScheduler::new(registry, repository, config.scheduler.clone());

    let report = scheduler.run_once().await;

    assert_eq!(report.units_attempted, 12);
    assert!(catalog.find_store("Lidl").await?.is_none());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_pass_on_file_catalog_loses_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = get_test_config();
    config.database = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("catalog.db").display()),
        max_connections: 5,
        min_connections: 1,
        acquire_timeout: 10,
    };
    config.scheduler.parallel_stores = true;
    config.scheduler.terms = Some(
        ["milk", "bread", "eggs", "butter", "cheese"].iter().map(|t| t.to_string()).collect(),
    );

    let catalog = Arc::new(SqliteCatalog::connect(&config.database).await?);
    let registry = create_test_registry(&config)?;
    let repository: Arc<dyn CatalogRepository> = catalog.clone();
    let scheduler = CollectionScheduler::new(registry, repository, config.scheduler.clone());

    let first = scheduler.run_once().await;
    assert_eq!(first.units_attempted, 25);
    assert_eq!(first.upsert_failures, 0);
    assert_eq!(catalog.count_products().await?, first.created as i64);

    let second = scheduler.run_once().await;
    assert_eq!(second.upsert_failures, 0);
    assert_eq!(second.created, 0);
    assert_eq!(second.unchanged, second.listings_seen);
    assert_eq!(catalog.count_products().await?, first.created as i64);

    Ok(())
}
