//! # cmdlightd — shell-command light daemon
//!
//! Composition root that wires the adapters to the reconciliation core and
//! runs the poll scheduler.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env overrides)
//! - Initialize tracing
//! - Build one reconciler per configured light (shell executor, JSON
//!   pointer templates, shared event bus)
//! - Poll lights that have a state command on the configured interval
//! - Log every state push
//! - Shut down on SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cmdlight_adapter_shell::ShellExecutor;
use cmdlight_adapter_template::JsonPointerTemplate;
use cmdlight_app::effect::EffectEngine;
use cmdlight_app::event_bus::InProcessEventBus;
use cmdlight_app::ports::EventPublisher;
use cmdlight_app::reconciler::Reconciler;
use cmdlight_domain::event::{Event, EventType};
use cmdlight_domain::id::LightId;

use config::Config;

type Light = Reconciler<ShellExecutor, JsonPointerTemplate, InProcessEventBus>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let bus = InProcessEventBus::new(256);
    spawn_event_logger(bus.subscribe());

    let step_interval = Duration::from_millis(config.effects.colorloop_step_ms);
    let poll_interval = Duration::from_secs(config.poll.interval_secs);

    let mut lights = Vec::new();
    let mut pollers = Vec::new();
    for (slug, light_config) in &config.lights {
        let id: LightId = slug.parse().context("invalid light id")?;
        let spec = light_config
            .command_spec()
            .with_context(|| format!("light {slug}"))?;
        let name = light_config.name.clone().unwrap_or_else(|| slug.clone());

        let light = Arc::new(Reconciler::new(
            id.clone(),
            spec,
            light_config.templates(),
            ShellExecutor::default(),
            EffectEngine::new(step_interval),
            bus.clone(),
        ));

        info!(
            light = %id,
            %name,
            assumed_state = light.assumed_state(),
            "registered light"
        );
        bus.publish(Event::new(id, EventType::Registered, light.snapshot().await));

        if light.should_poll() {
            pollers.push(tokio::spawn(poll_loop(Arc::clone(&light), poll_interval)));
        }
        lights.push(light);
    }

    info!(lights = lights.len(), "startup complete");

    tokio::signal::ctrl_c().await.context("waiting for SIGINT")?;
    info!("shutting down");
    for poller in pollers {
        poller.abort();
    }
    Ok(())
}

/// Poll one light forever; the first tick fires immediately so state is
/// fresh at startup.
async fn poll_loop(light: Arc<Light>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        light.poll().await;
    }
}

/// Log every state push going over the bus.
fn spawn_event_logger(mut events: broadcast::Receiver<Event>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(
                    light = %event.light,
                    on = event.state.on,
                    brightness = event.state.brightness,
                    color = %event.state.color,
                    effect = %event.state.effect,
                    "state push"
                ),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
