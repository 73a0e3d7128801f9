use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use navigator_core::{Effect, Msg, ScannedMessage};
use navigator_engine::{EngineEvent, EngineHandle, MessageItem, SharedPage, WatchSettings};
use navigator_logging::nav_info;

/// Bridges the pure core and the engine: executes core effects against
/// the engine and pumps engine events back as core messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(page: SharedPage, settings: WatchSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = Arc::new(EngineHandle::new(page, settings));
        let runner = Self { engine };
        runner.spawn_event_pump(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestScan => {
                    nav_info!("RequestScan");
                    self.engine.rescan();
                }
                Effect::FocusMessage {
                    anchor_id,
                    dom_index,
                } => {
                    nav_info!("FocusMessage anchor={} fallback={}", anchor_id, dom_index);
                    self.engine.focus(anchor_id, dom_index);
                }
            }
        }
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageReady { address } => Msg::PageReady { address },
        EngineEvent::PageUnavailable => Msg::PageUnavailable,
        EngineEvent::AddressChanged { address } => Msg::AddressObserved { address },
        EngineEvent::ScanBatch { address, items } => Msg::ScanCompleted {
            address,
            items: items.into_iter().map(map_item).collect(),
        },
    }
}

fn map_item(item: MessageItem) -> ScannedMessage {
    ScannedMessage {
        signature: item.signature,
        display_text: item.display_text,
        full_text: item.full_text,
        anchor_id: item.anchor_id,
        dom_index: item.dom_index,
    }
}
