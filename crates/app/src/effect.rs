//! Effect engine — the cancellable background color loop.
//!
//! At most one task runs per light. Starting while a task is active cancels
//! the previous task first; stopping waits until the task has finished so
//! no state write can happen after `stop` returns.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use cmdlight_domain::color::Rgb;
use cmdlight_domain::event::{Event, EventType};
use cmdlight_domain::id::LightId;
use cmdlight_domain::state::LightState;

use crate::ports::EventPublisher;

/// Default wait between color-loop steps.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Hue advance per step, so a full cycle takes 32 steps.
const HUE_STEP: u8 = 8;

/// Runs the repeating color-cycle task for one light.
pub struct EffectEngine {
    step_interval: Duration,
    running: Mutex<Option<RunningEffect>>,
}

struct RunningEffect {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Default for EffectEngine {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}

impl EffectEngine {
    /// Create an engine stepping at the given interval.
    #[must_use]
    pub fn new(step_interval: Duration) -> Self {
        Self {
            step_interval,
            running: Mutex::new(None),
        }
    }

    /// Start the color loop for `light`, cancelling any previous task first.
    ///
    /// Each step takes the shared state lock, advances the color along the
    /// hue wheel (white clamp applied), and publishes a state push.
    pub async fn start_color_loop<P>(
        &self,
        light: LightId,
        state: Arc<Mutex<LightState>>,
        events: P,
    ) where
        P: EventPublisher + 'static,
    {
        self.stop().await;

        let (cancel, mut cancelled) = watch::channel(false);
        let interval = self.step_interval;
        let handle = tokio::spawn(async move {
            let mut hue: u8 = 0;
            loop {
                {
                    let mut state = state.lock().await;
                    state.set_color(Rgb::from_hue(hue));
                    events.publish(Event::new(
                        light.clone(),
                        EventType::StateChanged,
                        state.clone(),
                    ));
                }
                hue = hue.wrapping_add(HUE_STEP);
                tokio::select! {
                    _ = cancelled.changed() => break,
                    () = tokio::time::sleep(interval) => {}
                }
            }
        });

        *self.running.lock().await = Some(RunningEffect { cancel, handle });
    }

    /// Cancel the running task, waiting until it has finished.
    ///
    /// Idempotent: does nothing when no task is running.
    pub async fn stop(&self) {
        let Some(running) = self.running.lock().await.take() else {
            return;
        };
        let _ = running.cancel.send(true);
        let _ = running.handle.await;
    }

    /// Whether a task is currently active.
    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessEventBus;
    use cmdlight_domain::color::WHITE;

    fn light() -> LightId {
        LightId::new("strip").unwrap()
    }

    fn shared_state() -> Arc<Mutex<LightState>> {
        Arc::new(Mutex::new(LightState::default()))
    }

    #[tokio::test]
    async fn should_advance_color_while_running() {
        let engine = EffectEngine::new(Duration::from_millis(10));
        let state = shared_state();
        let bus = InProcessEventBus::new(64);
        let mut rx = bus.subscribe();

        engine.start_color_loop(light(), Arc::clone(&state), bus).await;
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_ne!(state.lock().await.color, WHITE);
        assert_eq!(rx.recv().await.unwrap().kind, EventType::StateChanged);

        engine.stop().await;
    }

    #[tokio::test]
    async fn should_not_mutate_state_after_stop() {
        let engine = EffectEngine::new(Duration::from_millis(10));
        let state = shared_state();
        let bus = InProcessEventBus::new(64);

        engine.start_color_loop(light(), Arc::clone(&state), bus).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        engine.stop().await;

        let frozen = state.lock().await.color;
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(state.lock().await.color, frozen);
        assert!(!engine.is_running().await);
    }

    #[tokio::test]
    async fn should_be_idempotent_when_stopping_twice() {
        let engine = EffectEngine::new(Duration::from_millis(10));
        engine.stop().await;
        engine.stop().await;
        assert!(!engine.is_running().await);
    }

    #[tokio::test]
    async fn should_replace_running_task_on_restart() {
        let engine = EffectEngine::new(Duration::from_millis(10));
        let state = shared_state();
        let bus = InProcessEventBus::new(64);

        engine
            .start_color_loop(light(), Arc::clone(&state), bus.clone())
            .await;
        engine.start_color_loop(light(), Arc::clone(&state), bus).await;
        assert!(engine.is_running().await);

        engine.stop().await;
        assert!(!engine.is_running().await);
    }
}
