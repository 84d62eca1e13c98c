//! Sales aggregation and menu catalog integration tests.

use comanda_server::db::DbService;
use comanda_server::db::repository::{MenuRepository, RepoError, SalesRepository};
use shared::models::order::OrderLineItem;
use shared::models::sales::build_report_view;

async fn test_db() -> (DbService, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path().join("test.db")).await.unwrap();
    (db, tmp)
}

fn line(name: &str, quantity: i64) -> OrderLineItem {
    OrderLineItem::new(name, quantity)
}

#[tokio::test]
async fn record_sale_increments_per_unit_and_doubles_on_repeat() {
    let (db, _tmp) = test_db().await;
    let sales = SalesRepository::new(db.db.clone());

    let batch = vec![line("A", 2), line("B", 1)];
    sales.record_sale(&batch).await.unwrap();

    let units = |counts: &[shared::models::sales::SalesCounter], name: &str| {
        counts
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.units_sold)
            .unwrap_or(0)
    };

    let counts = sales.per_item_counts().await.unwrap();
    assert_eq!(units(&counts, "A"), 2);
    assert_eq!(units(&counts, "B"), 1);

    sales.record_sale(&batch).await.unwrap();
    let counts = sales.per_item_counts().await.unwrap();
    assert_eq!(units(&counts, "A"), 4);
    assert_eq!(units(&counts, "B"), 2);
}

#[tokio::test]
async fn record_sale_with_no_items_is_a_noop() {
    let (db, _tmp) = test_db().await;
    let sales = SalesRepository::new(db.db.clone());

    sales.record_sale(&[]).await.unwrap();
    assert!(sales.per_item_counts().await.unwrap().is_empty());
}

#[tokio::test]
async fn orders_served_counter_floors_at_zero() {
    let (db, _tmp) = test_db().await;
    let sales = SalesRepository::new(db.db.clone());

    assert_eq!(sales.orders_served().await.unwrap(), 0);
    assert_eq!(sales.increment_orders_served().await.unwrap(), 1);
    assert_eq!(sales.increment_orders_served().await.unwrap(), 2);
    assert_eq!(sales.decrement_orders_served().await.unwrap(), 1);
    assert_eq!(sales.decrement_orders_served().await.unwrap(), 0);
    assert_eq!(sales.decrement_orders_served().await.unwrap(), 0);
}

#[tokio::test]
async fn clear_report_leaves_orders_served_untouched() {
    let (db, _tmp) = test_db().await;
    let sales = SalesRepository::new(db.db.clone());
    let menu = MenuRepository::new(db.db.clone());
    menu.upsert("FRANGO", 2).await.unwrap();

    sales.record_sale(&[line("FRANGO", 5)]).await.unwrap();
    sales.increment_orders_served().await.unwrap();

    sales.clear_report().await.unwrap();

    assert!(sales.per_item_counts().await.unwrap().is_empty());
    assert_eq!(sales.orders_served().await.unwrap(), 1);

    let catalog = menu.find_all().await.unwrap();
    let view = build_report_view(
        &sales.per_item_counts().await.unwrap(),
        &catalog,
        sales.orders_served().await.unwrap(),
    );
    assert!(view.rows.is_empty());
    assert_eq!(view.total_units, 0);
    assert_eq!(view.orders_served, 1);
}

#[tokio::test]
async fn report_view_over_real_counters() {
    let (db, _tmp) = test_db().await;
    let sales = SalesRepository::new(db.db.clone());
    let menu = MenuRepository::new(db.db.clone());
    menu.upsert("FRANGO", 2).await.unwrap();
    menu.upsert("CARNE", 3).await.unwrap();

    sales.record_sale(&[line("FRANGO", 1)]).await.unwrap();
    sales
        .record_sale(&[line("CARNE", 2), line("FRANGO", 1)])
        .await
        .unwrap();

    let view = build_report_view(
        &sales.per_item_counts().await.unwrap(),
        &menu.find_all().await.unwrap(),
        sales.orders_served().await.unwrap(),
    );

    // CARNE 2×3=6, FRANGO 2×2=4, sorted by quantity then name
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].name, "CARNE");
    assert_eq!(view.rows[0].line_total, 6);
    assert_eq!(view.rows[1].name, "FRANGO");
    assert_eq!(view.rows[1].line_total, 4);
    assert_eq!(view.total_units, 10);
}

#[tokio::test]
async fn menu_upsert_overwrites_by_normalized_name() {
    let (db, _tmp) = test_db().await;
    let menu = MenuRepository::new(db.db.clone());

    menu.upsert("frango", 2).await.unwrap();
    menu.upsert("  FRANGO ", 4).await.unwrap();

    let items = menu.find_all().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "FRANGO");
    assert_eq!(items[0].unit_value, 4);

    let found = menu.find_by_name("Frango").await.unwrap();
    assert_eq!(found.unwrap().unit_value, 4);
}

#[tokio::test]
async fn menu_rejects_blank_names_and_non_positive_values() {
    let (db, _tmp) = test_db().await;
    let menu = MenuRepository::new(db.db.clone());

    let err = menu.upsert("   ", 2).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = menu.upsert("FRANGO", 0).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(menu.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn menu_delete_reports_missing_items() {
    let (db, _tmp) = test_db().await;
    let menu = MenuRepository::new(db.db.clone());

    menu.upsert("CHOCOLATE", 2).await.unwrap();
    assert!(menu.delete("chocolate").await.unwrap());
    assert!(!menu.delete("chocolate").await.unwrap());
    assert!(menu.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn seed_defaults_only_fills_an_empty_catalog() {
    let (db, _tmp) = test_db().await;
    let menu = MenuRepository::new(db.db.clone());

    menu.seed_defaults().await.unwrap();
    let seeded = menu.find_all().await.unwrap();
    assert!(!seeded.is_empty());

    // calling again changes nothing
    menu.seed_defaults().await.unwrap();
    assert_eq!(menu.find_all().await.unwrap().len(), seeded.len());

    // a customized catalog is never re-seeded
    let (db2, _tmp2) = test_db().await;
    let menu2 = MenuRepository::new(db2.db.clone());
    menu2.upsert("PIZZA", 5).await.unwrap();
    menu2.seed_defaults().await.unwrap();
    assert_eq!(menu2.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn menu_listing_is_ordered_by_name() {
    let (db, _tmp) = test_db().await;
    let menu = MenuRepository::new(db.db.clone());

    menu.upsert("QUEIJO", 2).await.unwrap();
    menu.upsert("CARNE", 3).await.unwrap();
    menu.upsert("FRANGO", 2).await.unwrap();

    let names: Vec<String> = menu
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["CARNE", "FRANGO", "QUEIJO"]);
}
