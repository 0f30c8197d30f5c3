use super::*;
use grocery_watcher::{
    normalizer::{ListingNormalizer, StandardListing},
    models::ChangeType,
    stores::{RawListing, RawPrice},
    UpsertOutcome,
};
use rust_decimal::Decimal;

/// File-backed catalog with a multi-connection pool
async fn file_catalog(dir: &tempfile::TempDir) -> anyhow::Result<SqliteCatalog> {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("catalog.db").display()),
        max_connections: 5,
        min_connections: 1,
        acquire_timeout: 10,
    };
    Ok(SqliteCatalog::connect(&config).await?)
}

fn standard(store: &str, name: &str, price: Decimal) -> StandardListing {
    StandardListing {
        store: store.to_string(),
        product_name: name.to_string(),
        price,
        unit: "1kg".to_string(),
        url: String::new(),
        image: String::new(),
    }
}

#[tokio::test]
async fn test_catalog_persists_to_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
        acquire_timeout: 5,
    };

    {
        let catalog = SqliteCatalog::connect(&config).await?;
        let store = catalog.ensure_store("Tesco", "https://www.tesco.ie").await?;
        catalog
            .upsert(&standard("Tesco", "Tesco Bananas 1kg", Decimal::new(149, 2)), &store.id, "bananas")
            .await?;
        catalog.pool().close().await;
    }

    let reopened = SqliteCatalog::connect(&config).await?;
    let store = reopened.find_store("Tesco").await?.expect("store survives reopen");
    let product = reopened
        .find_product("Tesco Bananas 1kg", &store.id)
        .await?
        .expect("product survives reopen");
    assert_eq!(product.price, Decimal::new(149, 2));
    assert_eq!(reopened.price_history(&product.id).await?.len(), 1);
    println!("✓ Catalog survived a reopen");

    Ok(())
}

#[tokio::test]
async fn test_price_drop_is_historized() -> anyhow::Result<()> {
    let catalog = create_test_catalog().await?;
    let store = catalog.ensure_store("Lidl", "https://www.lidl.ie").await?;

    catalog
        .upsert(&standard("Lidl", "Lidl Apples 1kg", Decimal::new(229, 2)), &store.id, "apples")
        .await?;
    let outcome = catalog
        .upsert(&standard("Lidl", "Lidl Apples 1kg", Decimal::new(199, 2)), &store.id, "apples")
        .await?;

    match outcome {
        UpsertOutcome::PriceChanged { old, new, change } => {
            assert_eq!(old, Decimal::new(229, 2));
            assert_eq!(new, Decimal::new(199, 2));
            assert_eq!(change, ChangeType::Decreased);
        }
        other => panic!("expected a price change, got {:?}", other),
    }

    let product = catalog.find_product("Lidl Apples 1kg", &store.id).await?.unwrap();
    let history = catalog.price_history(&product.id).await?;
    assert_eq!(history.len(), 2);
    assert!(history[0].recorded_at <= history[1].recorded_at);

    Ok(())
}

#[tokio::test]
async fn test_same_name_at_two_stores_is_two_products() -> anyhow::Result<()> {
    let catalog = create_test_catalog().await?;
    let tesco = catalog.ensure_store("Tesco", "https://www.tesco.ie").await?;
    let aldi = catalog.ensure_store("Aldi", "https://www.aldi.ie").await?;

    catalog.upsert(&standard("Tesco", "Bananas 1kg", Decimal::new(149, 2)), &tesco.id, "bananas").await?;
    catalog.upsert(&standard("Aldi", "Bananas 1kg", Decimal::new(119, 2)), &aldi.id, "bananas").await?;

    assert_eq!(catalog.count_products().await?, 2);
    let cheapest = catalog.products_for_term("bananas").await?;
    assert_eq!(cheapest[0].store_id, aldi.id);

    Ok(())
}

#[tokio::test]
async fn test_normalized_text_prices_round_trip() -> anyhow::Result<()> {
    let catalog = create_test_catalog().await?;
    let store = catalog.ensure_store("SuperValu", "https://shop.supervalu.ie").await?;
    let normalizer = ListingNormalizer::new();

    let raw = RawListing {
        name: "  SuperValu Wine Case  ".to_string(),
        price: RawPrice::Text("€1,049.99 per case".to_string()),
        unit: " 6 x 750ml ".to_string(),
        url: None,
        image: None,
    };
    let record = normalizer.standardize(&raw, "SuperValu");
    catalog.upsert(&record, &store.id, "Wine").await?;

    let product = catalog.find_product("SuperValu Wine Case", &store.id).await?.unwrap();
    assert_eq!(product.price, Decimal::new(104999, 2));
    assert_eq!(product.unit, "6 x 750ml");
    assert_eq!(product.search_term, "wine");
    assert_eq!(product.store_url, "");

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_upserts_on_file_catalog_all_persist() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog = file_catalog(&dir).await?;
    let tesco = catalog.ensure_store("Tesco", "https://www.tesco.ie").await?;
    let aldi = catalog.ensure_store("Aldi", "https://www.aldi.ie").await?;

    let records: Vec<(StandardListing, String)> = (0..50)
        .flat_map(|i| {
            [
                (standard("Tesco", &format!("Tesco Item {}", i), Decimal::new(100 + i, 2)), tesco.id.clone()),
                (standard("Aldi", &format!("Aldi Item {}", i), Decimal::new(90 + i, 2)), aldi.id.clone()),
            ]
        })
        .collect();

    let first = futures::future::join_all(records.iter().map(|(r, id)| catalog.upsert(r, id, "items"))).await;
    assert!(first.iter().all(|r| matches!(r, Ok(UpsertOutcome::Created))), "{:?}", first.iter().find(|r| r.is_err()));
    assert_eq!(catalog.count_products().await?, 100);

    // Re-observe every item concurrently, half of them at a new price
    let repriced: Vec<(StandardListing, String)> = records
        .iter()
        .enumerate()
        .map(|(i, (r, id))| {
            let mut r = r.clone();
            if i % 2 == 0 {
                r.price += Decimal::new(10, 2);
            }
            (r, id.clone())
        })
        .collect();
    let second = futures::future::join_all(repriced.iter().map(|(r, id)| catalog.upsert(r, id, "items"))).await;

    let changed = second.iter().filter(|r| matches!(r, Ok(UpsertOutcome::PriceChanged { .. }))).count();
    let unchanged = second.iter().filter(|r| matches!(r, Ok(UpsertOutcome::Unchanged))).count();
    assert_eq!((changed, unchanged), (50, 50));
    assert_eq!(catalog.count_products().await?, 100);

    let product = catalog.find_product("Tesco Item 0", &tesco.id).await?.unwrap();
    assert_eq!(product.price, Decimal::new(110, 2));
    assert_eq!(catalog.price_history(&product.id).await?.len(), 2);

    Ok(())
}
