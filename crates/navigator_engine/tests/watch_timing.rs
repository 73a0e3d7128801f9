use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;

use navigator_engine::{
    wait_until, Debouncer, EngineEvent, EngineHandle, ProbeExhausted, ProbeSettings, SharedPage,
    SnapshotPage, WatchSettings,
};

#[tokio::test(start_paused = true)]
async fn probe_succeeds_once_the_container_appears() {
    let settings = ProbeSettings::default();
    let mut remaining_failures = 2;

    let result = wait_until(&settings, move || {
        if remaining_failures == 0 {
            true
        } else {
            remaining_failures -= 1;
            false
        }
    })
    .await;

    assert_eq!(result, Ok(3));
}

#[tokio::test(start_paused = true)]
async fn probe_gives_up_after_its_attempt_budget() {
    let settings = ProbeSettings {
        interval: Duration::from_millis(250),
        max_attempts: 40,
    };
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();

    let result = wait_until(&settings, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        false
    })
    .await;

    assert_eq!(result, Err(ProbeExhausted { attempts: 40 }));
    assert_eq!(attempts.load(Ordering::SeqCst), 40);
}

#[tokio::test(start_paused = true)]
async fn debounce_coalesces_bursts_into_one_run() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new();

    for _ in 0..3 {
        let runs = runs.clone();
        debouncer.schedule(Duration::from_millis(250), async move {
            runs.fetch_add(1, Ordering::SeqCst);
        });
    }

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_the_pending_run() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new();

    {
        let runs = runs.clone();
        debouncer.schedule(Duration::from_millis(250), async move {
            runs.fetch_add(1, Ordering::SeqCst);
        });
    }
    debouncer.cancel();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

fn fast_settings() -> WatchSettings {
    WatchSettings {
        probe: ProbeSettings {
            interval: Duration::from_millis(10),
            max_attempts: 100,
        },
        debounce: Duration::from_millis(20),
        mutation_poll: Duration::from_millis(5),
        address_poll: Duration::from_millis(25),
        highlight: Duration::from_millis(40),
    }
}

fn wait_for<F>(handle: &EngineHandle, mut accept: F) -> EngineEvent
where
    F: FnMut(&EngineEvent) -> bool,
{
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while std::time::Instant::now() < deadline {
        if let Some(event) = handle.try_recv() {
            if accept(&event) {
                return event;
            }
        } else {
            std::thread::sleep(Duration::from_millis(5));
        }
    }
    panic!("timed out waiting for engine event");
}

#[test]
fn engine_watches_readiness_mutations_and_navigation() {
    let page = Arc::new(Mutex::new(SnapshotPage::new(
        "https://chat.example.com/c/alpha",
        "<html><body><p>loading</p></body></html>",
    )));
    let shared: SharedPage = page.clone();
    let handle = EngineHandle::new(shared, fast_settings());

    // The container appears while the probe is polling.
    std::thread::sleep(Duration::from_millis(30));
    page.lock().unwrap().set_snapshot(
        r#"<html><body><main><div data-message-author-role="user">hello there</div></main></body></html>"#,
    );
    let ready = wait_for(&handle, |event| matches!(event, EngineEvent::PageReady { .. }));
    assert_eq!(
        ready,
        EngineEvent::PageReady {
            address: "https://chat.example.com/c/alpha".to_string()
        }
    );

    // Open-rebuild path: an immediate scan on request.
    handle.rescan();
    let batch = wait_for(&handle, |event| matches!(event, EngineEvent::ScanBatch { .. }));
    let EngineEvent::ScanBatch { items, .. } = batch else {
        unreachable!();
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].full_text, "hello there");

    // A mutation triggers a debounced scan on its own.
    page.lock().unwrap().set_snapshot(
        concat!(
            "<html><body><main>",
            r#"<div data-message-author-role="user">hello there</div>"#,
            r#"<div data-message-author-role="user">a second message</div>"#,
            "</main></body></html>",
        ),
    );
    let batch = wait_for(&handle, |event| {
        matches!(event, EngineEvent::ScanBatch { items, .. } if items.len() == 2)
    });
    let EngineEvent::ScanBatch { items, .. } = batch else {
        unreachable!();
    };
    assert_eq!(items[1].full_text, "a second message");

    // In-page navigation surfaces an address change.
    page.lock().unwrap().navigate(
        "https://chat.example.com/c/beta",
        "<html><body><main></main></body></html>",
    );
    let changed = wait_for(&handle, |event| {
        matches!(event, EngineEvent::AddressChanged { .. })
    });
    assert_eq!(
        changed,
        EngineEvent::AddressChanged {
            address: "https://chat.example.com/c/beta".to_string()
        }
    );
}

#[test]
fn focus_highlight_reverts_after_the_timeout() {
    let page = Arc::new(Mutex::new(SnapshotPage::new(
        "https://chat.example.com/c/alpha",
        r#"<html><body><main><div data-message-author-role="user">hello there</div></main></body></html>"#,
    )));
    let shared: SharedPage = page.clone();
    let handle = EngineHandle::new(shared, fast_settings());

    wait_for(&handle, |event| matches!(event, EngineEvent::PageReady { .. }));
    handle.rescan();
    let EngineEvent::ScanBatch { items, .. } =
        wait_for(&handle, |event| matches!(event, EngineEvent::ScanBatch { .. }))
    else {
        unreachable!();
    };

    handle.focus(items[0].anchor_id.clone(), items[0].dom_index);
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while page.lock().unwrap().highlighted().is_none() {
        assert!(std::time::Instant::now() < deadline, "highlight never applied");
        std::thread::sleep(Duration::from_millis(5));
    }

    // The outline reverts on its own.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while page.lock().unwrap().highlighted().is_some() {
        assert!(std::time::Instant::now() < deadline, "highlight never reverted");
        std::thread::sleep(Duration::from_millis(5));
    }
}
