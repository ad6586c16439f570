//! Holiday wish generation.
//!
//! A submission flips the tree to Formed when needed and asks the configured
//! [`WishGenerator`] for a greeting. The call runs on the async compute pool and the
//! result is picked up by [`poll_wish_tasks`] on a later frame, so rendering
//! never waits on the network.
//!
//! Overlapping submissions are not cancelled. Each one gets a generation
//! number and only the answer to the most recent submission is shown.

pub mod client;

pub use client::{
    compose_prompt, resolve_wish, GeminiClient, GenerationConfig, WishError, WishGenerator,
};

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};

use crate::blend::BlendDriver;
use crate::constants::wish_text;
use crate::settings::{ApiCredential, TreeSettings};

/// Where the panel currently is in its request lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WishStatus {
    #[default]
    Idle,
    Loading,
    Ready(String),
    /// The call failed; `text` holds the fallback greeting.
    Failed { text: String, error: String },
}

/// Transient wish panel state.
#[derive(Resource, Clone, Debug, Default)]
pub struct WishState {
    /// Contents of the text field.
    pub input: String,
    pub status: WishStatus,
    generation: u64,
}

impl WishState {
    /// Greeting to display, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.status {
            WishStatus::Ready(text) | WishStatus::Failed { text, .. } => Some(text.as_str()),
            WishStatus::Idle | WishStatus::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == WishStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            WishStatus::Failed { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }

    /// Number of the most recent submission that issued a request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply the result of request `generation`. Returns false and leaves the
    /// state untouched when a newer request has been issued since.
    pub fn complete(&mut self, generation: u64, result: Result<String, WishError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = match resolve_wish(result) {
            (text, None) => WishStatus::Ready(text),
            (text, Some(error)) => WishStatus::Failed { text, error },
        };
        true
    }
}

/// What a submission should do about the network.
pub enum WishOutcome {
    /// Answered locally, no request needed.
    Immediate(String),
    /// Send `prompt` to the generator.
    Pending { prompt: String },
}

/// The configured generator, or none when no credential is available.
#[derive(Resource, Clone)]
pub struct WishService {
    generator: Option<Arc<dyn WishGenerator>>,
}

impl WishService {
    pub fn new(generator: impl WishGenerator) -> Self {
        Self {
            generator: Some(Arc::new(generator)),
        }
    }

    /// A service without credentials; every request answers locally.
    pub fn offline() -> Self {
        Self { generator: None }
    }

    pub fn from_credential(credential: &ApiCredential, model: &str) -> Self {
        if credential.is_present() {
            Self::new(GeminiClient::new(credential.key(), model))
        } else {
            Self::offline()
        }
    }

    pub fn is_online(&self) -> bool {
        self.generator.is_some()
    }

    /// Decide how to answer `input`.
    pub fn request(&self, input: &str) -> WishOutcome {
        if self.generator.is_none() {
            return WishOutcome::Immediate(wish_text::MISSING_KEY.to_string());
        }
        WishOutcome::Pending {
            prompt: compose_prompt(input),
        }
    }

    /// Start generating on the [`AsyncComputeTaskPool`].
    ///
    /// The generator blocks its thread for the whole HTTP round trip. The
    /// compute pool is larger than the IO pool, so overlapping wishes run side
    /// by side and asset loading is never queued behind them.
    pub fn spawn(&self, prompt: String) -> Option<Task<Result<String, WishError>>> {
        let generator = self.generator.clone()?;
        Some(AsyncComputeTaskPool::get().spawn(async move { generator.generate(&prompt) }))
    }
}

impl FromWorld for WishService {
    fn from_world(world: &mut World) -> Self {
        let credential = world
            .get_resource::<ApiCredential>()
            .cloned()
            .unwrap_or_default();
        let model = world
            .get_resource::<TreeSettings>()
            .map(|settings| settings.model.clone())
            .unwrap_or_else(|| TreeSettings::default().model);
        Self::from_credential(&credential, &model)
    }
}

/// Result of a submission, mostly interesting to tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Only the Formed transition was triggered.
    FormedOnly,
    /// The greeting was set without a request.
    Answered,
    /// A request was issued.
    Requested { generation: u64, prompt: String },
}

/// Handle a submit from the panel.
///
/// While the tree is scattered a submit first assembles it; an empty submit
/// stops there. Everything else resets the panel and asks for a new wish.
pub fn submit(
    input: &str,
    blend: &mut BlendDriver,
    state: &mut WishState,
    service: &WishService,
) -> Submission {
    if !blend.is_formed() {
        blend.set_formed(true);
        if input.trim().is_empty() {
            return Submission::FormedOnly;
        }
    }

    state.generation += 1;
    match service.request(input) {
        WishOutcome::Immediate(text) => {
            state.status = WishStatus::Ready(text);
            Submission::Answered
        }
        WishOutcome::Pending { prompt } => {
            state.status = WishStatus::Loading;
            Submission::Requested {
                generation: state.generation,
                prompt,
            }
        }
    }
}

/// Request a wish for the given input.
#[derive(Message, Clone, Debug)]
pub struct SubmitWishEvent {
    pub input: String,
}

/// In-flight generation tasks.
#[derive(Resource, Default)]
pub struct PendingWishes(Vec<(u64, Task<Result<String, WishError>>)>);

impl PendingWishes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct WishPlugin;

impl Plugin for WishPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SubmitWishEvent>()
            .init_resource::<WishState>()
            .init_resource::<WishService>()
            .init_resource::<PendingWishes>()
            .add_systems(Update, (handle_wish_submissions, poll_wish_tasks).chain());
    }
}

fn handle_wish_submissions(
    mut events: MessageReader<SubmitWishEvent>,
    mut blend: ResMut<BlendDriver>,
    mut state: ResMut<WishState>,
    mut pending: ResMut<PendingWishes>,
    service: Res<WishService>,
) {
    for event in events.read() {
        match submit(&event.input, &mut blend, &mut state, &service) {
            Submission::FormedOnly => info!("Assembling tree"),
            Submission::Answered => info!("Wish answered offline"),
            Submission::Requested { generation, prompt } => {
                if let Some(task) = service.spawn(prompt) {
                    pending.0.push((generation, task));
                    info!("Requesting wish #{} ({} in flight)", generation, pending.len());
                }
            }
        }
    }
}

/// Apply finished generation tasks.
pub fn poll_wish_tasks(mut pending: ResMut<PendingWishes>, mut state: ResMut<WishState>) {
    pending.0.retain_mut(|(generation, task)| {
        let Some(result) = block_on(future::poll_once(task)) else {
            return true;
        };

        if let Err(e) = &result {
            warn!("Wish #{} failed: {}", generation, e);
        }
        if !state.complete(*generation, result) {
            info!("Dropping stale wish #{}", generation);
        }
        false
    });
}
