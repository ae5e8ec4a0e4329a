//! Event bus fan-out, detach, and shutdown.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use aclgate_core::protocol::StatInterval;
use aclgate_core::GateError;

use common::{call, start};

async fn ok_call(server: &aclgate_gateway::Server, consumer: &str, method: &str) {
    server
        .interceptor()
        .unary(call(consumer, method), (), |_, _| async { Ok(()) })
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn every_subscriber_sees_each_call_once() {
    let server = start("acl_scenario.json", 8);

    let mut rxs = Vec::new();
    for _ in 0..3 {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(server.admin().subscribe_logs().run(tx));
        rxs.push(rx);
    }

    ok_call(&server, "alice", "svc/Check").await;
    let _ = server
        .interceptor()
        .unary(call("bob", "svc/Add"), (), |_, _| async { Ok(()) })
        .await;
    ok_call(&server, "bob", "svc/Check").await;

    for rx in &mut rxs {
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!((first.consumer.as_str(), first.method.as_str()), ("alice", "svc/Check"));
        assert_eq!((second.consumer.as_str(), second.method.as_str()), ("bob", "svc/Check"));
        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
    }
}

#[tokio::test(start_paused = true)]
async fn dispatcher_keeps_consuming_without_subscribers() {
    let server = start("acl_scenario.json", 1);

    for _ in 0..1000 {
        ok_call(&server, "alice", "svc/Check").await;
    }
    // paused clock: the sleep only elapses once the bus has drained its intake
    tokio::time::sleep(Duration::from_millis(10)).await;

    let (tx, mut rx) = mpsc::channel(4);
    tokio::spawn(server.admin().subscribe_logs().run(tx));
    ok_call(&server, "bob", "svc/Check").await;

    let ev = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    assert_eq!(ev.consumer, "bob");
}

#[tokio::test(start_paused = true)]
async fn subscription_detaches_when_dropped() {
    let server = start("acl_scenario.json", 8);

    let logs = server.admin().subscribe_logs();
    let stats = server.admin().subscribe_stats(StatInterval::new(1)).unwrap();
    assert_eq!(server.registry().log_count(), 1);
    assert_eq!(server.registry().stat_count(), 1);

    drop(logs);
    drop(stats);
    assert_eq!(server.registry().log_count(), 0);
    assert_eq!(server.registry().stat_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_sink_ends_only_that_subscription() {
    let server = start("acl_scenario.json", 8);

    let (dead_tx, dead_rx) = mpsc::channel(1);
    drop(dead_rx);
    let dead = tokio::spawn(server.admin().subscribe_logs().run(dead_tx));

    let (tx, mut rx) = mpsc::channel(8);
    tokio::spawn(server.admin().subscribe_logs().run(tx));

    ok_call(&server, "alice", "svc/Check").await;

    let res = dead.await.unwrap();
    assert!(matches!(res, Err(GateError::Delivery(_))));
    assert_eq!(rx.recv().await.unwrap().consumer, "alice");
    assert_eq!(server.registry().log_count(), 1);

    ok_call(&server, "bob", "svc/Check").await;
    assert_eq!(rx.recv().await.unwrap().consumer, "bob");
}

#[tokio::test(start_paused = true)]
async fn stalled_subscriber_delays_later_ones_but_not_shutdown() {
    let server = start("acl_scenario.json", 1);

    // registered first and never read: its one-slot buffer fills on the first event
    let stalled = server.admin().subscribe_logs();

    let (tx, mut rx) = mpsc::channel(8);
    tokio::spawn(server.admin().subscribe_logs().run(tx));

    ok_call(&server, "alice", "svc/Check").await;
    ok_call(&server, "bob", "svc/Check").await;

    assert_eq!(rx.recv().await.unwrap().consumer, "alice");
    assert!(timeout(Duration::from_millis(500), rx.recv()).await.is_err());

    timeout(Duration::from_secs(1), server.shutdown()).await.unwrap().unwrap();
    drop(stalled);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_all_streams_cleanly() {
    let server = start("acl_gateway.json", 8);

    let (log_a_tx, mut log_a) = mpsc::channel(8);
    let (log_b_tx, mut log_b) = mpsc::channel(8);
    let (stat_tx, mut stat_rx) = mpsc::channel(8);

    let tasks = vec![
        tokio::spawn(server.admin().subscribe_logs().run(log_a_tx)),
        tokio::spawn(server.admin().subscribe_logs().run(log_b_tx)),
        tokio::spawn(
            server
                .admin()
                .subscribe_stats(StatInterval::new(5))
                .unwrap()
                .run(stat_tx),
        ),
    ];

    timeout(Duration::from_secs(1), server.shutdown()).await.unwrap().unwrap();

    for t in tasks {
        let res = timeout(Duration::from_secs(1), t).await.unwrap().unwrap();
        assert!(res.is_ok());
    }

    // calls after shutdown still complete but nothing is delivered
    ok_call(&server, "svc_user", "svc/Check").await;
    assert!(log_a.recv().await.is_none());
    assert!(log_b.recv().await.is_none());
    assert!(stat_rx.recv().await.is_none());
    assert_eq!(server.registry().log_count(), 0);
    assert_eq!(server.registry().stat_count(), 0);
    assert!(server.is_draining());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn log_tailer_keeps_receiving_while_bus_is_saturated() {
    let server = start("acl_scenario.json", 64);

    let (log_tx, mut log_rx) = mpsc::channel(1024);
    tokio::spawn(server.admin().subscribe_logs().run(log_tx));
    let (stat_tx, mut stat_rx) = mpsc::channel(8);
    let agg = server.admin().subscribe_stats(StatInterval::new(1)).unwrap();
    tokio::spawn(agg.run(stat_tx));

    let stop = Arc::new(AtomicBool::new(false));
    let mut producers = Vec::new();
    for _ in 0..2 {
        let interceptor = server.interceptor();
        let stop = Arc::clone(&stop);
        producers.push(tokio::spawn(async move {
            let info = call("alice", "svc/Check");
            let mut sent = 0u64;
            while !stop.load(Ordering::Relaxed) {
                interceptor.admit(&info).unwrap();
                sent += 1;
                if sent % 256 == 0 {
                    tokio::task::yield_now().await;
                }
            }
            sent
        }));
    }

    let mut delivered = 0usize;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    while delivered < 100 {
        match tokio::time::timeout_at(deadline, log_rx.recv()).await {
            Ok(Some(ev)) => {
                assert_eq!(ev.consumer, "alice");
                delivered += 1;
            }
            _ => break,
        }
    }
    let snap = timeout(Duration::from_secs(3), stat_rx.recv()).await.unwrap().unwrap();

    stop.store(true, Ordering::Relaxed);
    let mut published = 0u64;
    for p in producers {
        published += p.await.unwrap();
    }

    assert!(delivered >= 100, "only {delivered} of {published} events reached the tailer");
    assert!(snap.by_consumer["alice"] > 0);
    server.shutdown().await.unwrap();
}
