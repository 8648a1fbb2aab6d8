//! The reconciliation core — one state machine per light.
//!
//! Decides, per attribute, whether state is optimistic (assumed after a
//! successful command) or authoritative (parsed from a polled state
//! command), applies the white clamp after every color write, and owns the
//! light's effect lifecycle.
//!
//! All mutating operations on one light are serialized through an
//! operation-level lock; the state itself sits behind a shared lock so
//! effect steps and explicit writes never race. Different lights are fully
//! independent.

use std::sync::Arc;

use tokio::sync::Mutex;

use cmdlight_domain::color::{Rgb, WHITE};
use cmdlight_domain::command::CommandSpec;
use cmdlight_domain::event::{Event, EventType};
use cmdlight_domain::features::LightFeatures;
use cmdlight_domain::id::LightId;
use cmdlight_domain::state::{Effect, LightState};

use crate::effect::EffectEngine;
use crate::extract::ValueExtractor;
use crate::ports::command::CommandExecutor;
use crate::ports::event_bus::EventPublisher;
use crate::ports::template::ValueRenderer;

/// Attribute changes requested alongside a turn-on call.
#[derive(Debug, Clone, Default)]
pub struct TurnOnOptions {
    pub brightness: Option<u16>,
    pub color: Option<Rgb>,
    pub effect: Option<Effect>,
}

impl TurnOnOptions {
    #[must_use]
    pub fn with_brightness(mut self, value: u16) -> Self {
        self.brightness = Some(value);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Optional value templates for the three polled attributes.
#[derive(Debug)]
pub struct ValueTemplates<R> {
    pub state: Option<R>,
    pub brightness: Option<R>,
    pub rgb: Option<R>,
}

impl<R> ValueTemplates<R> {
    /// No templates configured: raw values are used as-is.
    #[must_use]
    pub fn none() -> Self {
        Self {
            state: None,
            brightness: None,
            rgb: None,
        }
    }
}

impl<R> Default for ValueTemplates<R> {
    fn default() -> Self {
        Self::none()
    }
}

/// Reconciles one light's attributes with its configured shell commands.
pub struct Reconciler<C, R, P> {
    id: LightId,
    spec: CommandSpec,
    features: LightFeatures,
    runner: C,
    state: Arc<Mutex<LightState>>,
    op_lock: Mutex<()>,
    state_value: ValueExtractor<R>,
    brightness_value: ValueExtractor<R>,
    rgb_value: ValueExtractor<R>,
    effects: EffectEngine,
    events: P,
}

impl<C, R, P> Reconciler<C, R, P>
where
    C: CommandExecutor,
    R: ValueRenderer,
    P: EventPublisher + Clone + 'static,
{
    /// Wire up a light from its command specification.
    pub fn new(
        id: LightId,
        spec: CommandSpec,
        templates: ValueTemplates<R>,
        runner: C,
        effects: EffectEngine,
        events: P,
    ) -> Self {
        let features = spec.features();
        Self {
            id,
            spec,
            features,
            runner,
            state: Arc::new(Mutex::new(LightState::default())),
            op_lock: Mutex::new(()),
            state_value: ValueExtractor::new(templates.state),
            brightness_value: ValueExtractor::new(templates.brightness),
            rgb_value: ValueExtractor::new(templates.rgb),
            effects,
            events,
        }
    }

    /// The light's identifier.
    #[must_use]
    pub fn id(&self) -> &LightId {
        &self.id
    }

    /// Capabilities implied by the configured commands.
    #[must_use]
    pub fn supported_features(&self) -> LightFeatures {
        self.features
    }

    /// Whether power state is assumed from command success rather than
    /// measured.
    #[must_use]
    pub fn assumed_state(&self) -> bool {
        self.spec.assumed_state()
    }

    /// Whether the host should poll this light.
    #[must_use]
    pub fn should_poll(&self) -> bool {
        self.spec.should_poll()
    }

    /// Current state snapshot.
    pub async fn snapshot(&self) -> LightState {
        self.state.lock().await.clone()
    }

    /// Whether the light is on.
    pub async fn is_on(&self) -> bool {
        self.state.lock().await.on
    }

    /// Current brightness.
    pub async fn brightness(&self) -> u16 {
        self.state.lock().await.brightness
    }

    /// Current color.
    pub async fn color(&self) -> Rgb {
        self.state.lock().await.color
    }

    /// Currently active effect.
    pub async fn effect(&self) -> Effect {
        self.state.lock().await.effect
    }

    /// Turn the light on, optionally adjusting brightness, color, and
    /// effect.
    ///
    /// The power transition is optimistic only when no state command is
    /// configured; brightness and color are applied client-side regardless
    /// of what the on command reported.
    pub async fn turn_on(&self, options: TurnOnOptions) {
        let _op = self.op_lock.lock().await;

        if self.runner.run(&self.spec.on_command).await && self.spec.assumed_state() {
            let mut state = self.state.lock().await;
            state.on = true;
            self.notify(&state);
        }

        if let Some(value) = options.brightness {
            if self.features.brightness {
                let mut state = self.state.lock().await;
                state.set_brightness(value, self.spec.brightness_scale);
                self.notify(&state);
            }
        }

        if let Some(color) = options.color {
            if self.features.rgb_color {
                let mut state = self.state.lock().await;
                state.set_color(color);
                self.notify(&state);
            }
        }

        match options.effect {
            Some(Effect::ColorLoop) => {
                {
                    let mut state = self.state.lock().await;
                    state.effect = Effect::ColorLoop;
                    self.notify(&state);
                }
                self.effects
                    .start_color_loop(
                        self.id.clone(),
                        Arc::clone(&self.state),
                        self.events.clone(),
                    )
                    .await;
            }
            Some(Effect::White) => {
                self.effects.stop().await;
                let mut state = self.state.lock().await;
                state.set_color(WHITE);
                state.effect = Effect::White;
                self.notify(&state);
            }
            Some(Effect::None) | None => {}
        }
    }

    /// Turn the light off.
    ///
    /// Any running effect is cancelled first — and the cancellation is
    /// awaited — so no color mutation can follow. The power transition is
    /// optimistic only when no state command is configured.
    pub async fn turn_off(&self) {
        let _op = self.op_lock.lock().await;

        let ok = self.runner.run(&self.spec.off_command).await;
        self.effects.stop().await;

        let mut state = self.state.lock().await;
        let mut changed = false;
        if state.effect != Effect::None {
            state.effect = Effect::None;
            changed = true;
        }
        if ok && self.spec.assumed_state() && state.on {
            state.on = false;
            changed = true;
        }
        if changed {
            self.notify(&state);
        }
    }

    /// Query the configured state commands and reconcile the snapshot.
    ///
    /// Each attribute is queried, extracted, and parsed independently; a
    /// failure on one path leaves that attribute at its previous value.
    /// Publishes a single state push iff anything changed.
    pub async fn poll(&self) {
        let _op = self.op_lock.lock().await;

        let Some(command) = self.spec.state_command.clone() else {
            tracing::error!(light = %self.id, "no state command configured");
            return;
        };

        let on = self.query_on(&command).await;
        let brightness = match &self.spec.brightness_state_command {
            Some(command) => self.query_brightness(command).await,
            None => None,
        };
        let rgb = match &self.spec.rgb_state_command {
            Some(command) => self.query_rgb(command).await,
            None => None,
        };

        let mut state = self.state.lock().await;
        let before = state.clone();
        if let Some(on) = on {
            state.on = on;
        }
        if let Some(value) = brightness {
            state.set_brightness(value, self.spec.brightness_scale);
        }
        if let Some(color) = rgb {
            state.set_color(color);
        }
        if *state != before {
            self.notify(&state);
        }
    }

    /// Query the power state: captured output when a template is
    /// configured, else the command's exit code coerced to a boolean
    /// string.
    async fn query_on(&self, command: &str) -> Option<bool> {
        let raw = if self.state_value.has_template() {
            match self.runner.capture(command).await {
                Ok(output) => output,
                Err(error) => {
                    tracing::error!(light = %self.id, %error, "state command failed");
                    return None;
                }
            }
        } else if self.runner.run(command).await {
            "True".to_string()
        } else {
            "False".to_string()
        };

        match self.state_value.extract_bool(&raw) {
            Ok(on) => Some(on),
            Err(error) => {
                tracing::warn!(light = %self.id, %error, %raw, "unparseable state output");
                None
            }
        }
    }

    async fn query_brightness(&self, command: &str) -> Option<u16> {
        let raw = match self.runner.capture(command).await {
            Ok(output) => output,
            Err(error) => {
                tracing::error!(light = %self.id, %error, "brightness command failed");
                return None;
            }
        };
        match self
            .brightness_value
            .extract_brightness(&raw, self.spec.brightness_scale)
        {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(light = %self.id, %error, %raw, "unparseable brightness output");
                None
            }
        }
    }

    async fn query_rgb(&self, command: &str) -> Option<Rgb> {
        let raw = match self.runner.capture(command).await {
            Ok(output) => output,
            Err(error) => {
                tracing::error!(light = %self.id, %error, "rgb command failed");
                return None;
            }
        };
        match self.rgb_value.extract_rgb(&raw) {
            Ok(color) => Some(color),
            Err(error) => {
                tracing::warn!(light = %self.id, %error, %raw, "unparseable rgb output");
                None
            }
        }
    }

    fn notify(&self, state: &LightState) {
        self.events.publish(Event::new(
            self.id.clone(),
            EventType::StateChanged,
            state.clone(),
        ));
    }
}
