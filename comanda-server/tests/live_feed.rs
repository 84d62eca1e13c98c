//! Live status feed integration tests.
//!
//! Feeds deliver the current full snapshot for one status on every order
//! change; these tests drive real mutations through the repository and
//! wait on the watch channel with a timeout.

use std::time::Duration;

use comanda_server::db::DbService;
use comanda_server::db::repository::OrderRepository;
use comanda_server::orders::FeedService;
use shared::models::order::{Order, OrderCreate, OrderLineItem, OrderStatus, StatusFlow};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

const WAIT: Duration = Duration::from_secs(5);

async fn test_db() -> (DbService, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path().join("test.db")).await.unwrap();
    (db, tmp)
}

fn order_create(name: &str) -> OrderCreate {
    OrderCreate {
        customer_name: Some(name.to_string()),
        line_items: vec![OrderLineItem::new("FRANGO", 1)],
    }
}

/// Wait until the feed value satisfies `pred`, or panic after `WAIT`.
async fn wait_for(
    rx: &mut watch::Receiver<Vec<Order>>,
    pred: impl Fn(&[Order]) -> bool,
) -> Vec<Order> {
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
        {
            let current = rx.borrow_and_update();
            if pred(current.as_slice()) {
                return current.clone();
            }
        }
        let remaining = deadline
            .checked_duration_since(tokio::time::Instant::now())
            .expect("Timed out waiting for feed update");
        tokio::time::timeout(remaining, rx.changed())
            .await
            .expect("Timed out waiting for feed update")
            .expect("Feed sender dropped");
    }
}

#[tokio::test]
async fn subscribing_yields_the_current_snapshot() {
    let (db, _tmp) = test_db().await;
    let repo = OrderRepository::new(db.db.clone(), StatusFlow::FOUR_STAGE);
    repo.create(order_create("Maria"), 2).await.unwrap();

    let shutdown = CancellationToken::new();
    let feeds = FeedService::new(db.db.clone(), StatusFlow::FOUR_STAGE);
    feeds.spawn(shutdown.clone());

    let rx = feeds.subscribe(OrderStatus::Open).await.unwrap();
    let snapshot = rx.borrow().clone();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].number, 1);

    shutdown.cancel();
}

#[tokio::test]
async fn feed_tracks_creation_and_status_changes() {
    let (db, _tmp) = test_db().await;
    let repo = OrderRepository::new(db.db.clone(), StatusFlow::FOUR_STAGE);

    let shutdown = CancellationToken::new();
    let feeds = FeedService::new(db.db.clone(), StatusFlow::FOUR_STAGE);
    feeds.spawn(shutdown.clone());

    let mut open_rx = feeds.subscribe(OrderStatus::Open).await.unwrap();
    let mut preparing_rx = feeds.subscribe(OrderStatus::Preparing).await.unwrap();
    assert!(open_rx.borrow().is_empty());

    // give the live query a moment to attach before mutating
    tokio::time::sleep(Duration::from_millis(200)).await;

    let order = repo.create(order_create("Maria"), 2).await.unwrap();
    let snapshot = wait_for(&mut open_rx, |orders| orders.len() == 1).await;
    assert_eq!(snapshot[0].number, order.number);

    repo.advance_status(order.id.as_ref().unwrap(), OrderStatus::Preparing)
        .await
        .unwrap();

    let open = wait_for(&mut open_rx, |orders| orders.is_empty()).await;
    assert!(open.is_empty());
    let preparing = wait_for(&mut preparing_rx, |orders| orders.len() == 1).await;
    assert_eq!(preparing[0].status, OrderStatus::Preparing);

    shutdown.cancel();
}

#[tokio::test]
async fn feed_snapshots_are_oldest_first() {
    let (db, _tmp) = test_db().await;
    let repo = OrderRepository::new(db.db.clone(), StatusFlow::FOUR_STAGE);

    let shutdown = CancellationToken::new();
    let feeds = FeedService::new(db.db.clone(), StatusFlow::FOUR_STAGE);
    feeds.spawn(shutdown.clone());

    let mut open_rx = feeds.subscribe(OrderStatus::Open).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    for name in ["Maria", "João", "Ana"] {
        repo.create(order_create(name), 2).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let snapshot = wait_for(&mut open_rx, |orders| orders.len() == 3).await;
    let numbers: Vec<i64> = snapshot.iter().map(|o| o.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    shutdown.cancel();
}
