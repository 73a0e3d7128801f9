use std::time::Duration;

use thiserror::Error;

/// Bounded-attempt readiness poll: the host page may still be loading
/// when the navigator starts.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(250),
            max_attempts: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("readiness probe exhausted after {attempts} attempts")]
pub struct ProbeExhausted {
    pub attempts: u32,
}

/// Polls `probe` on the settings interval until it returns true, giving
/// up once the attempt budget is spent. Returns the attempt count that
/// succeeded.
pub async fn wait_until<F>(settings: &ProbeSettings, mut probe: F) -> Result<u32, ProbeExhausted>
where
    F: FnMut() -> bool,
{
    for attempt in 1..=settings.max_attempts {
        if probe() {
            return Ok(attempt);
        }
        tokio::time::sleep(settings.interval).await;
    }
    Err(ProbeExhausted {
        attempts: settings.max_attempts,
    })
}
