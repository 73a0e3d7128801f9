use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use navigator_logging::{nav_debug, nav_info, nav_warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::debounce::Debouncer;
use crate::page::HostPage;
use crate::probe::{wait_until, ProbeSettings};
use crate::scan::MessageScanner;
use crate::types::EngineEvent;

pub type SharedPage = Arc<Mutex<dyn HostPage>>;

#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub probe: ProbeSettings,
    /// Quiet period between a mutation and the scan it triggers; a newer
    /// mutation replaces the pending scan.
    pub debounce: Duration,
    /// How often the page revision counter is sampled.
    pub mutation_poll: Duration,
    /// How often the address is compared against the last observed one.
    pub address_poll: Duration,
    /// How long a focus highlight stays before it reverts.
    pub highlight: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            probe: ProbeSettings::default(),
            debounce: Duration::from_millis(250),
            mutation_poll: Duration::from_millis(100),
            address_poll: Duration::from_millis(800),
            highlight: Duration::from_millis(900),
        }
    }
}

enum EngineCommand {
    Rescan,
    Focus { anchor_id: String, dom_index: usize },
}

pub struct EngineHandle {
    cmd_tx: UnboundedSender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    /// Spawns the watcher on its own thread. The loop ends when the
    /// handle is dropped.
    pub fn new(page: SharedPage, settings: WatchSettings) -> Self {
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            runtime.block_on(watch_loop(page, settings, cmd_rx, event_tx));
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    /// Immediate scan, bypassing the debounce (the open-rebuild path).
    pub fn rescan(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Rescan);
    }

    pub fn focus(&self, anchor_id: impl Into<String>, dom_index: usize) {
        let _ = self.cmd_tx.send(EngineCommand::Focus {
            anchor_id: anchor_id.into(),
            dom_index,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .expect("lock event receiver")
            .try_recv()
            .ok()
    }
}

async fn watch_loop(
    page: SharedPage,
    settings: WatchSettings,
    mut cmd_rx: UnboundedReceiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let ready = {
        let probe_page = page.clone();
        wait_until(&settings.probe, move || {
            probe_page.lock().expect("lock page").container_ready()
        })
        .await
    };

    match ready {
        Ok(attempt) => {
            let address = page.lock().expect("lock page").address();
            nav_info!("chat container ready after {} probe attempt(s)", attempt);
            let _ = event_tx.send(EngineEvent::PageReady { address });
        }
        Err(err) => {
            nav_warn!("{}; navigator stays inert", err);
            let _ = event_tx.send(EngineEvent::PageUnavailable);
            return;
        }
    }

    let mut debouncer = Debouncer::new();
    let mut last_revision = page.lock().expect("lock page").revision();
    let mut last_address = page.lock().expect("lock page").address();
    let mut mutation_tick = tokio::time::interval(settings.mutation_poll);
    let mut address_tick = tokio::time::interval(settings.address_poll);

    loop {
        tokio::select! {
            command = cmd_rx.recv() => {
                let Some(command) = command else {
                    // Handle dropped; stop watching.
                    break;
                };
                match command {
                    EngineCommand::Rescan => {
                        debouncer.cancel();
                        emit_scan(&page, &event_tx);
                    }
                    EngineCommand::Focus { anchor_id, dom_index } => {
                        focus_message(&page, &settings, &anchor_id, dom_index);
                    }
                }
            }
            _ = mutation_tick.tick() => {
                let revision = page.lock().expect("lock page").revision();
                if revision != last_revision {
                    last_revision = revision;
                    let page = page.clone();
                    let event_tx = event_tx.clone();
                    debouncer.schedule(settings.debounce, async move {
                        emit_scan(&page, &event_tx);
                    });
                }
            }
            _ = address_tick.tick() => {
                let address = page.lock().expect("lock page").address();
                if address != last_address {
                    nav_info!("page address changed to {}", address);
                    last_address = address.clone();
                    let _ = event_tx.send(EngineEvent::AddressChanged { address });
                }
            }
        }
    }
}

fn emit_scan(page: &SharedPage, event_tx: &mpsc::Sender<EngineEvent>) {
    let (address, items) = {
        let mut page = page.lock().expect("lock page");
        let address = page.address();
        let items = MessageScanner::new().scan(&mut *page);
        (address, items)
    };
    nav_debug!("scan surfaced {} unique message(s)", items.len());
    let _ = event_tx.send(EngineEvent::ScanBatch { address, items });
}

/// Executes a focus request; failures are logged, never propagated to
/// the host.
fn focus_message(page: &SharedPage, settings: &WatchSettings, anchor_id: &str, dom_index: usize) {
    let outcome = page
        .lock()
        .expect("lock page")
        .focus_message(anchor_id, dom_index);
    match outcome {
        Ok(()) => {
            let page = page.clone();
            let highlight = settings.highlight;
            tokio::spawn(async move {
                tokio::time::sleep(highlight).await;
                page.lock().expect("lock page").clear_highlight();
            });
        }
        Err(err) => {
            nav_warn!("focus failed for anchor {:?}: {}", anchor_id, err);
        }
    }
}
