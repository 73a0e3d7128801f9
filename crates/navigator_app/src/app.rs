use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use navigator_core::{update, AppState, Msg};
use navigator_engine::{SharedPage, SnapshotPage, WatchSettings};
use navigator_logging::nav_info;

use crate::config::{SessionScript, Step};
use crate::effects::EffectRunner;
use crate::render;

/// Grace period for watcher messages to settle after each step.
const SETTLE: Duration = Duration::from_millis(400);

pub fn run(script: SessionScript) -> anyhow::Result<()> {
    let page = Arc::new(Mutex::new(SnapshotPage::new(&script.address, &script.html)));
    let shared: SharedPage = page.clone();
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(shared, WatchSettings::default(), msg_tx);

    let mut state = AppState::new();

    for (step_no, step) in script.steps.into_iter().enumerate() {
        nav_info!("step {}: {:?}", step_no + 1, step);
        match step {
            Step::Wait { millis } => std::thread::sleep(Duration::from_millis(millis)),
            Step::Mutate { html } => page.lock().expect("lock page").set_snapshot(html),
            Step::Navigate { address, html } => {
                page.lock().expect("lock page").navigate(address, html)
            }
            Step::Toggle => state = dispatch(state, Msg::ToggleActivated, &runner),
            Step::Escape => state = dispatch(state, Msg::EscapePressed, &runner),
            Step::ClickOutside => state = dispatch(state, Msg::OutsideClicked, &runner),
            Step::ActivateEntry { index } => {
                state = dispatch(state, Msg::EntryActivated { index }, &runner)
            }
        }
        state = drain(state, &msg_rx, &runner);
        render_if_dirty(&mut state, &page);
    }

    // Let in-flight watcher work settle before the session ends.
    state = drain(state, &msg_rx, &runner);
    render_if_dirty(&mut state, &page);
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

/// Applies queued watcher messages until the queue stays quiet for the
/// settle period.
fn drain(mut state: AppState, msg_rx: &mpsc::Receiver<Msg>, runner: &EffectRunner) -> AppState {
    while let Ok(msg) = msg_rx.recv_timeout(SETTLE) {
        state = dispatch(state, msg, runner);
    }
    state
}

fn render_if_dirty(state: &mut AppState, page: &Arc<Mutex<SnapshotPage>>) {
    if state.consume_dirty() {
        let highlighted = page.lock().expect("lock page").highlighted();
        println!("{}\n", render::render(&state.view(), highlighted));
    }
}
