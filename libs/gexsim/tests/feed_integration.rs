//! Integration test: market feed timer and subscriptions

mod common;

use std::sync::Arc;
use std::time::Duration;

use gexsim::{spawn_market_feed, MarketDataController, Timeframe};
use tokio::runtime::Handle;
use tokio::time::timeout;

#[tokio::test(start_paused = true)]
async fn test_feed_ticks_on_interval() {
    let controller = Arc::new(MarketDataController::new(common::fast_config(1, 500)));
    let mut updates = controller.subscribe();
    let _feed = spawn_market_feed(&Handle::current(), controller.clone(), Duration::from_millis(500));

    for expected in 1..=3u64 {
        updates.changed().await.unwrap();
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.sequence, expected);
        assert!(snapshot.flow_dominance <= 100);
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_period() {
    let controller = Arc::new(MarketDataController::new(common::fast_config(2, 500)));
    let mut updates = controller.subscribe();
    let _feed = spawn_market_feed(&Handle::current(), controller.clone(), Duration::from_millis(500));

    assert!(timeout(Duration::from_millis(400), updates.changed()).await.is_err());
    assert_eq!(controller.current().sequence, 0);

    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().sequence, 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_ticks() {
    let controller = Arc::new(MarketDataController::new(common::fast_config(3, 100)));
    let mut updates = controller.subscribe();
    let feed = spawn_market_feed(&Handle::current(), controller.clone(), Duration::from_millis(100));

    updates.changed().await.unwrap();
    assert!(feed.is_running());
    drop(feed);

    let sequence = controller.current().sequence;
    updates.borrow_and_update();
    assert!(timeout(Duration::from_secs(2), updates.changed()).await.is_err());
    assert_eq!(controller.current().sequence, sequence);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_task() {
    let controller = Arc::new(MarketDataController::new(common::fast_config(4, 100)));
    let feed = spawn_market_feed(&Handle::current(), controller.clone(), Duration::from_millis(100));

    tokio::time::sleep(Duration::from_millis(350)).await;
    feed.shutdown().await;

    let sequence = controller.current().sequence;
    assert!(sequence >= 3);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(controller.current().sequence, sequence);
}

#[tokio::test(start_paused = true)]
async fn test_timeframe_change_reaches_running_subscribers() {
    let controller = Arc::new(MarketDataController::new(common::fast_config(5, 500)));
    let mut updates = controller.subscribe();
    let _feed = spawn_market_feed(&Handle::current(), controller.clone(), Duration::from_millis(500));

    updates.changed().await.unwrap();
    let ticked = updates.borrow_and_update().clone();

    controller.request_timeframe_change(Timeframe::Days60);
    assert!(updates.has_changed().unwrap());
    let switched = updates.borrow_and_update().clone();
    assert_eq!(switched.gamma_levels.len(), 60);
    assert_eq!(switched.sequence, ticked.sequence);
    assert_eq!(switched.spot_price, ticked.spot_price);

    // Ticks continue from the new profile
    updates.changed().await.unwrap();
    let next = updates.borrow().clone();
    assert_eq!(next.timeframe, Timeframe::Days60);
    assert_eq!(next.gamma_levels.len(), 60);
    assert_eq!(next.sequence, ticked.sequence + 1);
}

#[tokio::test]
async fn test_many_subscribers_see_same_snapshot() {
    let controller = Arc::new(MarketDataController::new(common::seeded_config(6)));
    let a = controller.subscribe();
    let b = controller.subscribe();
    assert_eq!(controller.subscriber_count(), 2);

    let published = controller.tick();
    assert!(Arc::ptr_eq(&a.borrow(), &published));
    assert!(Arc::ptr_eq(&b.borrow(), &published));
}
