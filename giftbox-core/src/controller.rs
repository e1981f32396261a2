use crate::effect::{BoxLayout, ConfettiConfig, ParticleEffect};
use crate::error::{GiftboxError, Result};
use crate::{LotteryConfig, Prize, PrizePool};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Presentation state of one gift box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxState {
    pub prize: Option<Prize>,
    pub opened: bool,
    pub disabled: bool,
    pub interactive: bool,
}

impl BoxState {
    fn ready() -> Self {
        Self {
            prize: None,
            opened: false,
            disabled: false,
            interactive: true,
        }
    }

    fn clear(&mut self) {
        self.opened = false;
        self.disabled = false;
        self.interactive = true;
    }
}

/// The reveal surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub prize_text: String,
    pub title: String,
    pub failure_style: bool,
    pub visible: bool,
}

/// What one successful activation did, plus the deferred step still owed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reveal {
    pub round: Uuid,
    pub box_index: usize,
    pub prize: Option<Prize>,
    pub failure: bool,
    pub confetti: Option<ConfettiConfig>,
    pub show_after: Duration,
}

/// Round record for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: Uuid,
    pub started_at: DateTime<Utc>,
    pub revealed_at: Option<DateTime<Utc>>,
    pub box_index: Option<usize>,
    pub prize: Option<Prize>,
}

impl RoundSummary {
    fn start() -> Self {
        Self {
            round: Uuid::new_v4(),
            started_at: Utc::now(),
            revealed_at: None,
            box_index: None,
            prize: None,
        }
    }
}

pub struct LotteryController<R> {
    config: LotteryConfig,
    pool: PrizePool,
    boxes: Vec<BoxState>,
    panel: PanelState,
    reset_visible: bool,
    revealed: bool,
    current: RoundSummary,
    history: Vec<RoundSummary>,
    rng: R,
}

impl<R: Rng> LotteryController<R> {
    /// Build a controller for `box_count` boxes and deal the first round.
    ///
    /// The box count must equal the prize pool size; anything else is a
    /// configuration mistake and is rejected here rather than leaving boxes
    /// without prizes.
    pub fn new(config: LotteryConfig, box_count: usize, rng: R) -> Result<Self> {
        config.validate()?;

        if box_count != config.prizes.len() {
            return Err(GiftboxError::CardinalityMismatch {
                boxes: box_count,
                prizes: config.prizes.len(),
            });
        }

        let panel = PanelState {
            prize_text: String::new(),
            title: config.celebration_title.clone(),
            failure_style: false,
            visible: false,
        };

        let mut controller = Self {
            pool: PrizePool::new(config.prizes.clone()),
            boxes: vec![BoxState::ready(); box_count],
            panel,
            reset_visible: false,
            revealed: false,
            current: RoundSummary::start(),
            history: Vec::new(),
            config,
            rng,
        };
        controller.initialize();

        Ok(controller)
    }

    /// One box per prize
    pub fn for_pool(config: LotteryConfig, rng: R) -> Result<Self> {
        let box_count = config.prizes.len();
        Self::new(config, box_count, rng)
    }

    /// Reshuffle the pool and deal entry `i` to box `i`
    pub fn initialize(&mut self) {
        self.pool.reshuffle(&mut self.rng);

        for (state, prize) in self.boxes.iter_mut().zip(self.pool.iter()) {
            state.prize = Some(prize.clone());
        }

        tracing::debug!(
            "Round {} dealt {} prizes to {} boxes",
            self.current.round,
            self.pool.len(),
            self.boxes.len()
        );
    }

    /// Open box `index`.
    ///
    /// Returns `Ok(None)` when this round already has a revealed box or the
    /// box itself is already open. The revealed flag is set before anything
    /// else, including the deferred panel step the caller schedules from the
    /// returned [`Reveal`].
    pub fn activate(
        &mut self,
        index: usize,
        layout: &dyn BoxLayout,
        effect: &dyn ParticleEffect,
    ) -> Result<Option<Reveal>> {
        if index >= self.boxes.len() {
            return Err(GiftboxError::BoxNotFound(index));
        }

        if self.revealed || self.boxes[index].opened {
            tracing::debug!("Ignoring activation of box {} in round {}", index, self.current.round);
            return Ok(None);
        }

        self.revealed = true;
        self.boxes[index].opened = true;

        let prize = self.boxes[index].prize.clone();
        self.panel.prize_text = prize.as_ref().map(|p| p.label.clone()).unwrap_or_default();

        let failure = prize.as_ref().map_or(false, Prize::is_failure);
        if failure {
            self.panel.failure_style = true;
            self.panel.title = self.config.failure_title.clone();
        } else {
            self.panel.failure_style = false;
            self.panel.title = self.config.celebration_title.clone();
        }

        let confetti = if failure {
            None
        } else {
            let config = self
                .config
                .confetti
                .burst_at(&layout.box_rect(index), &layout.viewport());
            effect.fire(&config);
            Some(config)
        };

        for (i, state) in self.boxes.iter_mut().enumerate() {
            if i != index {
                state.disabled = true;
                state.interactive = false;
            }
        }

        self.current.revealed_at = Some(Utc::now());
        self.current.box_index = Some(index);
        self.current.prize = prize.clone();

        tracing::info!(
            "Box {} opened in round {}: {}",
            index,
            self.current.round,
            self.panel.prize_text
        );

        Ok(Some(Reveal {
            round: self.current.round,
            box_index: index,
            prize,
            failure,
            confetti,
            show_after: self.config.reveal_delay(),
        }))
    }

    /// Deferred half of a reveal: show the panel and the reset control.
    /// Ignored unless `round` is the current, revealed round.
    pub fn show_panel(&mut self, round: Uuid) -> bool {
        if round != self.current.round || !self.revealed {
            tracing::warn!("Ignoring stale panel reveal for round {}", round);
            return false;
        }

        self.panel.visible = true;
        self.reset_visible = true;
        true
    }

    /// Restore every box and the panel, then deal a fresh round
    pub fn reset(&mut self) {
        if self.revealed {
            let finished = std::mem::replace(&mut self.current, RoundSummary::start());
            self.history.push(finished);
        } else {
            self.current = RoundSummary::start();
        }

        self.revealed = false;
        self.reset_visible = false;
        self.panel.visible = false;
        self.panel.title = self.config.celebration_title.clone();
        self.panel.failure_style = false;
        self.panel.prize_text.clear();

        for state in &mut self.boxes {
            state.clear();
        }

        self.initialize();

        tracing::info!("Lottery reset, prizes reshuffled (round {})", self.current.round);
    }

    pub fn boxes(&self) -> &[BoxState] {
        &self.boxes
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn reset_visible(&self) -> bool {
        self.reset_visible
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn round_id(&self) -> Uuid {
        self.current.round
    }

    pub fn round_info(&self) -> RoundSummary {
        self.current.clone()
    }

    /// Rounds that ended with a reveal, oldest first
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn can_activate(&self, index: usize) -> bool {
        !self.revealed
            && self
                .boxes
                .get(index)
                .map_or(false, |b| b.interactive && !b.opened)
    }
}

impl<R> std::fmt::Debug for LotteryController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LotteryController")
            .field("round", &self.current.round)
            .field("revealed", &self.revealed)
            .field("boxes", &self.boxes.len())
            .field("panel_visible", &self.panel.visible)
            .finish()
    }
}
