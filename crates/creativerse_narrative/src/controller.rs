//! The branching-story state machine.

use crate::{
    materialize, realize_characters, Banners, EditOutcome, NodeEditor, StoryPhase, StorySnapshot,
    StoryTimeline, TreeNode,
};
use creativerse_core::{
    ChapterOption, Character, NarrativeControls, RoundOptionSet, StoryConfig, StoryId, StoryPath,
    GalleryStory, Visibility,
};
use creativerse_error::{
    BuilderError, CreativerseResult, GenerationError, GenerationErrorKind, StaleResponseError,
    ValidationError, ValidationErrorKind,
};
use creativerse_interface::{
    GenerationGateway, IllustrationRequestBuilder, RoundRequestBuilder, StoryGallery,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Everything the controller owns, guarded by one lock.
#[derive(Debug, Default)]
struct ControllerState {
    phase: StoryPhase,
    timeline: StoryTimeline,
    roster: Vec<Character>,
    controls: Option<NarrativeControls>,
    banners: Banners,
    epoch: u64,
}

impl ControllerState {
    #[track_caller]
    fn require_phase(&self, operation: &str, allowed: &[StoryPhase]) -> Result<(), ValidationError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ValidationError::invalid_phase(operation, self.phase))
        }
    }

    #[track_caller]
    fn controls(&self, operation: &str) -> Result<NarrativeControls, ValidationError> {
        self.controls
            .clone()
            .ok_or_else(|| ValidationError::invalid_phase(operation, self.phase))
    }

    fn num_rounds(&self) -> usize {
        self.controls
            .as_ref()
            .map(|c| *c.num_rounds() as usize)
            .unwrap_or(0)
    }

    /// Drop the story and invalidate every request in flight.
    fn clear_story(&mut self) {
        self.timeline.clear();
        self.roster.clear();
        self.controls = None;
        self.phase = StoryPhase::Idle;
        self.epoch += 1;
    }

    fn is_current(&self, issued: u64) -> bool {
        match StaleResponseError::check(issued, self.epoch) {
            Ok(()) => true,
            Err(stale) => {
                debug!(%stale, "Discarding stale response");
                false
            }
        }
    }
}

/// What the controller needs to request the next round.
struct NextRound {
    epoch: u64,
    controls: NarrativeControls,
    round: u32,
    previous: Option<String>,
    characters: Vec<Character>,
}

fn saved_notice(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "Your story has been shared to the Creativerse!",
        Visibility::Private => "Your story has been saved privately!",
    }
}

/// Drives a branching story through its rounds.
///
/// Holds the timeline, the active cast and the user-facing banners. All
/// operations take `&self`; the internal lock is released while the gateway
/// works, so reads and `reset` stay responsive during generation. Responses
/// that arrive after a reset, branch switch or save are dropped.
///
/// # Examples
///
/// ```no_run
/// use creativerse_core::{NarrativeControls, StoryConfig};
/// use creativerse_interface::GenerationGateway;
/// use creativerse_narrative::BranchController;
///
/// # async fn play<G: GenerationGateway>(gateway: G) -> creativerse_error::CreativerseResult<()> {
/// let controller = BranchController::new(gateway, StoryConfig::default());
/// let controls = NarrativeControls::builder()
///     .prompt("A dragon who is afraid of the dark")
///     .num_rounds(2u32)
///     .build()
///     .unwrap();
///
/// controller.start(controls).await?;
/// controller.select_option(0).await?;
/// controller.select_option(1).await?;
/// assert_eq!(controller.story_so_far().await.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct BranchController<G> {
    gateway: G,
    config: StoryConfig,
    editor: NodeEditor,
    state: Mutex<ControllerState>,
}

impl<G: GenerationGateway> BranchController<G> {
    /// A controller in the idle phase.
    pub fn new(gateway: G, config: StoryConfig) -> Self {
        Self {
            gateway,
            config,
            editor: NodeEditor::new(),
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// The generation gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Story settings in effect.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Begin a new story.
    ///
    /// Realizes the cast, then generates round one. On failure the
    /// controller returns to idle with nothing kept and the error shown.
    #[instrument(
        skip(self, controls),
        fields(
            provider = self.gateway.provider_name(),
            rounds = *controls.num_rounds(),
            characters = controls.characters().len()
        )
    )]
    pub async fn start(&self, controls: NarrativeControls) -> CreativerseResult<()> {
        let epoch = {
            let mut state = self.state.lock().await;
            state.require_phase("start a story", &[StoryPhase::Idle])?;
            if *controls.num_rounds() == 0 {
                return Err(ValidationError::new(ValidationErrorKind::InvalidRoundCount(0)).into());
            }

            state.banners.clear();
            state.timeline.clear();
            state.roster.clear();
            state.controls = Some(controls.clone());
            state.phase = StoryPhase::Loading;
            state.epoch += 1;
            debug!(epoch = state.epoch, "Story loading");
            state.epoch
        };

        let opening = self.open_story(&controls).await;

        let mut state = self.state.lock().await;
        if !state.is_current(epoch) {
            return Ok(());
        }

        match opening {
            Ok((cast, round_one)) => {
                state.roster = cast.characters;
                for notice in cast.notifications {
                    state.banners.notify(notice);
                }
                state.timeline.push_option_set(round_one);
                state.phase = StoryPhase::OptionsReady;
                info!("Story started");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Story failed to start");
                state.timeline.clear();
                state.roster.clear();
                state.controls = None;
                state.phase = StoryPhase::Idle;
                state.banners.set_error(e.user_message());
                Err(e)
            }
        }
    }

    async fn open_story(
        &self,
        controls: &NarrativeControls,
    ) -> CreativerseResult<(crate::RealizedCast, RoundOptionSet)> {
        let cast = realize_characters(
            &self.gateway,
            controls.characters(),
            controls.style(),
            &self.config,
        )
        .await?;

        let round_one = self
            .generate_round(controls, 1, None, cast.characters.clone())
            .await?;
        Ok((cast, round_one))
    }

    /// Pick option `index` from the newest round.
    ///
    /// Completes the story after the last round; otherwise generates the
    /// next round from the chosen chapter. If that generation fails the pick
    /// is kept, the story is marked complete and the error is returned.
    #[instrument(skip(self), fields(provider = self.gateway.provider_name()))]
    pub async fn select_option(&self, index: usize) -> CreativerseResult<()> {
        let next = {
            let mut state = self.state.lock().await;
            state.require_phase("select an option", &[StoryPhase::OptionsReady])?;
            let controls = state.controls("select an option")?;
            let chosen = state.timeline.select(index)?.text();
            state.banners.clear();

            let depth = state.timeline.selection().depth();
            if depth >= state.num_rounds() {
                state.phase = StoryPhase::Complete;
                info!(rounds = depth, "Story complete");
                return Ok(());
            }

            state.phase = StoryPhase::Loading;
            NextRound {
                epoch: state.epoch,
                controls,
                round: depth as u32 + 1,
                previous: Some(chosen),
                characters: state.roster.clone(),
            }
        };

        self.continue_story(next, "Continuation failed").await
    }

    /// Rewind to `target` and regenerate from there.
    ///
    /// Rounds after `target` are discarded. An empty target regenerates
    /// round one. A target that already covers every round completes the
    /// story without generating.
    #[instrument(skip(self), fields(target = %target, provider = self.gateway.provider_name()))]
    pub async fn switch_branch(&self, target: StoryPath) -> CreativerseResult<()> {
        let next = {
            let mut state = self.state.lock().await;
            state.require_phase(
                "switch branches",
                &[StoryPhase::OptionsReady, StoryPhase::Complete],
            )?;
            let controls = state.controls("switch branches")?;
            state.timeline.truncate_to(&target)?;
            state.banners.clear();
            state.epoch += 1;

            let depth = target.depth();
            if depth >= state.num_rounds() {
                state.phase = StoryPhase::Complete;
                info!("Switched to a finished branch");
                return Ok(());
            }

            state.phase = StoryPhase::Loading;
            NextRound {
                epoch: state.epoch,
                controls,
                round: depth as u32 + 1,
                previous: state.timeline.last_chosen().map(ChapterOption::text),
                characters: state.roster.clone(),
            }
        };

        self.continue_story(next, "Branch regeneration failed").await
    }

    /// Generate a round after a pick or switch and apply it.
    async fn continue_story(&self, next: NextRound, failure: &str) -> CreativerseResult<()> {
        let result = self
            .generate_round(&next.controls, next.round, next.previous, next.characters)
            .await;

        let mut state = self.state.lock().await;
        if !state.is_current(next.epoch) {
            return Ok(());
        }

        match result {
            Ok(set) => {
                state.timeline.push_option_set(set);
                state.phase = StoryPhase::OptionsReady;
                info!(round = next.round, "Round ready");
                Ok(())
            }
            Err(e) => {
                warn!(round = next.round, error = %e, "{}", failure);
                state.phase = StoryPhase::Complete;
                state.banners.set_error(e.user_message());
                Err(e)
            }
        }
    }

    async fn generate_round(
        &self,
        controls: &NarrativeControls,
        round: u32,
        previous: Option<String>,
        characters: Vec<Character>,
    ) -> CreativerseResult<RoundOptionSet> {
        let mut builder = RoundRequestBuilder::default();
        builder
            .controls(controls.clone())
            .round(round)
            .characters(characters);
        if let Some(previous) = previous {
            builder.previous_chapter(previous);
        }
        let request = builder.build().map_err(BuilderError::from)?;

        debug!(round, "Requesting round");
        let set = self.gateway.generate_round(&request).await?;

        let expected = *self.config.options_per_round();
        if set.len() != expected {
            return Err(GenerationError::new(GenerationErrorKind::OptionCountMismatch {
                expected,
                actual: set.len(),
            })
            .into());
        }
        Ok(set)
    }

    /// Rewrite the chapter at `path` and redraw its art.
    ///
    /// The text is committed before the gateway is asked for a new
    /// illustration. If the refresh fails the old art stays, the error is
    /// shown, and the edit still stands.
    ///
    /// # Errors
    ///
    /// Only validation failures are returned: wrong phase, bad path, or a
    /// refresh already running for this node.
    #[instrument(skip(self, title, body), fields(path = %path, provider = self.gateway.provider_name()))]
    pub async fn edit_node(
        &self,
        path: StoryPath,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> CreativerseResult<EditOutcome> {
        let (epoch, request, _guard) = {
            let mut state = self.state.lock().await;
            state.require_phase(
                "edit a chapter",
                &[StoryPhase::OptionsReady, StoryPhase::Complete],
            )?;
            let controls = state.controls("edit a chapter")?;
            state.timeline.validate_node_path(&path)?;
            let guard = self.editor.begin(state.epoch, &path)?;

            let updated = NodeEditor::commit_text(&mut state.timeline, &path, title, body)?;
            state.banners.error = None;

            let request = IllustrationRequestBuilder::default()
                .title(updated.title)
                .body(updated.body)
                .characters(state.roster.clone())
                .style(controls.style().clone())
                .build()
                .map_err(BuilderError::from)?;
            (state.epoch, request, guard)
        };

        let result = NodeEditor::refresh_illustration(&self.gateway, &request).await;

        let mut state = self.state.lock().await;
        if !state.is_current(epoch) {
            return Ok(EditOutcome::Discarded);
        }

        match result {
            Ok(illustration) => match state.timeline.option_at_mut(&path) {
                Some(option) => {
                    option.illustration = illustration;
                    info!("Chapter edited");
                    Ok(EditOutcome::Refreshed)
                }
                None => Ok(EditOutcome::Discarded),
            },
            Err(e) => {
                warn!(error = %e, "Illustration refresh failed, keeping previous art");
                let reason = e.user_message();
                state.banners.set_error(reason.clone());
                Ok(EditOutcome::IllustrationKept { reason })
            }
        }
    }

    /// Ask the gateway to comment on a draft edit of the chapter at `path`.
    ///
    /// Nothing is changed.
    #[instrument(skip(self, draft_title, draft_body), fields(path = %path))]
    pub async fn request_feedback(
        &self,
        path: &StoryPath,
        draft_title: &str,
        draft_body: &str,
    ) -> CreativerseResult<String> {
        let original = {
            let state = self.state.lock().await;
            state.require_phase(
                "request feedback",
                &[
                    StoryPhase::Loading,
                    StoryPhase::OptionsReady,
                    StoryPhase::Complete,
                ],
            )?;
            state.timeline.validate_node_path(path)?;
            state
                .timeline
                .option_at(path)
                .map(ChapterOption::text)
                .ok_or_else(|| ValidationError::new(ValidationErrorKind::EmptyPath))?
        };

        let edited = format!("{} {}", draft_title, draft_body);
        self.gateway.critique(&original, &edited).await
    }

    /// Save the finished story to `gallery` and return to idle.
    ///
    /// On a save failure the story stays complete and the error is shown.
    #[instrument(skip(self, gallery, author), fields(visibility = %visibility))]
    pub async fn finish<S>(
        &self,
        gallery: &S,
        author: impl Into<String>,
        visibility: Visibility,
    ) -> CreativerseResult<StoryId>
    where
        S: StoryGallery + ?Sized,
    {
        let (epoch, story) = {
            let mut state = self.state.lock().await;
            state.require_phase("save the story", &[StoryPhase::Complete])?;
            let controls = state.controls("save the story")?;
            state.banners.clear();
            let story = GalleryStory::new(
                &controls,
                state.timeline.story_so_far(),
                state.roster.clone(),
                author,
                visibility,
            );
            (state.epoch, story)
        };

        let saved = gallery.save(&story).await;

        let mut state = self.state.lock().await;
        match saved {
            Ok(id) => {
                if state.is_current(epoch) {
                    state.clear_story();
                }
                state.banners.notify(saved_notice(visibility));
                info!(id = %id, "Story saved");
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Saving story failed");
                if state.is_current(epoch) {
                    state.banners.set_error(e.user_message());
                }
                Err(e)
            }
        }
    }

    /// Abandon the story and return to idle.
    ///
    /// Anything still in flight is ignored when it returns.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.banners.clear();
        state.clear_story();
        debug!(epoch = state.epoch, "Story reset");
    }

    /// Current phase.
    pub async fn phase(&self) -> StoryPhase {
        self.state.lock().await.phase
    }

    /// A consistent copy of the whole controller state.
    pub async fn snapshot(&self) -> StorySnapshot {
        let state = self.state.lock().await;
        StorySnapshot::new(
            state.phase,
            state.timeline.clone(),
            state.roster.clone(),
            state.controls.clone(),
            state.banners.clone(),
            state.epoch,
        )
    }

    /// The materialized story tree.
    pub async fn tree(&self) -> TreeNode {
        materialize(&self.state.lock().await.timeline)
    }

    /// The chosen chapters in reading order.
    pub async fn story_so_far(&self) -> Vec<ChapterOption> {
        self.state.lock().await.timeline.story_so_far()
    }

    /// The round waiting for a pick, if any.
    pub async fn current_options(&self) -> Option<RoundOptionSet> {
        self.state.lock().await.timeline.frontier().cloned()
    }

    /// The round being decided, starting at 1; 0 when idle.
    ///
    /// Once complete this is the final round.
    pub async fn current_round(&self) -> usize {
        let state = self.state.lock().await;
        match state.phase {
            StoryPhase::Idle => 0,
            _ => (state.timeline.selection().depth() + 1).min(state.num_rounds()),
        }
    }

    /// Pending error and notifications.
    pub async fn banners(&self) -> Banners {
        self.state.lock().await.banners.clone()
    }

    /// Clear the error banner.
    pub async fn dismiss_error(&self) {
        self.state.lock().await.banners.error = None;
    }

    /// Clear all notifications.
    pub async fn dismiss_notifications(&self) {
        self.state.lock().await.banners.notifications.clear();
    }

    /// The active cast.
    pub async fn roster(&self) -> Vec<Character> {
        self.state.lock().await.roster.clone()
    }

    /// Replace the active cast used for later rounds and edits.
    pub async fn set_roster(&self, roster: Vec<Character>) {
        self.state.lock().await.roster = roster;
    }
}
