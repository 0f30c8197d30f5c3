use super::*;
use grocery_watcher::config::FeedConfig;
use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn feed_only_scheduler(server: &MockServer) -> anyhow::Result<(CollectionScheduler, Arc<SqliteCatalog>)> {
    let mut config = get_test_config();
    config.stores.tesco.enabled = false;
    config.stores.supervalu.enabled = false;
    config.stores.dunnes.enabled = false;
    config.stores.lidl.enabled = false;
    config.stores.aldi.enabled = false;
    config.feeds.push(FeedConfig {
        name: "Corner Shop".to_string(),
        website: server.uri(),
        search_url: format!("{}/api/search?q={{term}}", server.uri()),
        delay_ms: Some(0),
    });
    config.validate()?;

    let catalog = create_test_catalog().await?;
    let registry = create_test_registry(&config)?;
    let repository: Arc<dyn CatalogRepository> = catalog.clone();
    Ok((CollectionScheduler::new(registry, repository, config.scheduler.clone()), catalog))
}

#[tokio::test]
async fn test_feed_failures_are_isolated_per_term() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"name": "Corner Milk 1L", "price": 1.19, "unit": "1L", "url": "https://corner.example/milk"}]"#,
        ))
        .mount(&server)
        .await;
    // Retried up to the attempt limit, then treated as no data
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "bread"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "eggs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let (scheduler, catalog) = feed_only_scheduler(&server).await?;
    let report = scheduler.run_once().await;

    assert_eq!(report.units_attempted, 3);
    assert_eq!(report.units_failed, 0);
    assert_eq!(report.listings_seen, 1);
    assert_eq!(report.stores_refreshed, vec!["Corner Shop"]);

    let milk = catalog.products_for_term("milk").await?;
    assert_eq!(milk.len(), 1);
    assert_eq!(milk[0].price, Decimal::new(119, 2));
    assert_eq!(milk[0].store_url, "https://corner.example/milk");
    println!("✓ Feed errors stayed inside their unit");

    Ok(())
}

#[tokio::test]
async fn test_feed_price_change_between_passes() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"name": "Corner Milk 1L", "price": "€1.25"}]"#))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"name": "Corner Milk 1L", "price": "€1.19"}]"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let (scheduler, catalog) = feed_only_scheduler(&server).await?;
    scheduler.run_once().await;
    let second = scheduler.run_once().await;

    assert_eq!(second.changed, 1);
    let store = catalog.find_store("Corner Shop").await?.unwrap();
    let product = catalog.find_product("Corner Milk 1L", &store.id).await?.unwrap();
    let prices: Vec<Decimal> = catalog
        .price_history(&product.id)
        .await?
        .into_iter()
        .map(|point| point.price)
        .collect();
    assert_eq!(prices, vec![Decimal::new(125, 2), Decimal::new(119, 2)]);

    Ok(())
}
