//! Draw orchestration.
//!
//! One [`Game`] owns the board and sequences a draw end to end: guard the
//! in-flight flag, ask the backend for the winning prize, replay the pointer
//! to its resting tile, spin to the target, settle, then present the result.
//! The sequencers are pure; this module is the only place timers run.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use tombola_types::{
    fit_to_ring, ConfigError, GameError, Prize, ReceiveKind, ReceiverPrefill, SpinConfig,
};

use crate::backend::DrawBackend;
use crate::frontend::{DialogOutcome, Frontend};
use crate::layout::RingLayout;
use crate::pace::StepPace;
use crate::replay::ReplaySequencer;
use crate::spin::SpinSequencer;

/// Where a draw currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DrawPhase {
    Idle = 0,
    /// Waiting on the backend to resolve the draw.
    Drawing = 1,
    /// Walking the pointer back to its resting tile.
    Replaying = 2,
    /// Walking the pointer to the target tile.
    Spinning = 3,
    /// Settling and presenting dialogs.
    Resolving = 4,
}

impl DrawPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawPhase::Idle => "idle",
            DrawPhase::Drawing => "drawing",
            DrawPhase::Replaying => "replaying",
            DrawPhase::Spinning => "spinning",
            DrawPhase::Resolving => "resolving",
        }
    }
}

impl TryFrom<u8> for DrawPhase {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DrawPhase::Idle),
            1 => Ok(DrawPhase::Drawing),
            2 => Ok(DrawPhase::Replaying),
            3 => Ok(DrawPhase::Spinning),
            4 => Ok(DrawPhase::Resolving),
            i => Err(i),
        }
    }
}

// The phase word packs the phase value with the admission ticket of the
// draw that wrote it, so a draw that finished presenting cannot roll the
// phase back over a later admission's.
const PHASE_BITS: u32 = 8;
const PHASE_MASK: u64 = (1 << PHASE_BITS) - 1;

/// The game: a fitted prize ring, its geometry, and one-draw-at-a-time
/// orchestration.
///
/// State that outlives a single `draw` call (in-flight flag, resting tile,
/// phase) is atomic so a shared game (`Arc<Game>`) can reject a second draw
/// while the first is still spinning. The in-flight flag is released when a
/// spin lands, before the dialogs: a draw admitted during that window owns
/// the flag and the phase, and the draw that is still presenting leaves
/// both alone.
pub struct Game<B: DrawBackend, F: Frontend> {
    prizes: Vec<Prize>,
    layout: RingLayout,
    config: SpinConfig,
    prefill: ReceiverPrefill,
    backend: B,
    frontend: F,
    history_index: AtomicUsize,
    drawing: AtomicBool,
    // Low byte: DrawPhase. High bits: admission ticket of the writer.
    phase: AtomicU64,
    admissions: AtomicU64,
}

impl<B: DrawBackend, F: Frontend> Game<B, F> {
    /// Build a game. The catalog is padded to fill its ring; the resting
    /// tile from a previous session comes in through
    /// [`SpinConfig::history_index`].
    pub fn new(
        prizes: Vec<Prize>,
        config: SpinConfig,
        prefill: ReceiverPrefill,
        backend: B,
        frontend: F,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if prizes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let prizes = fit_to_ring(prizes);
        let layout = RingLayout::generate(prizes.len());
        // A hand-edited resting index past the ring clamps to the last tile.
        let history_index = config.history_index.min(prizes.len() - 1);
        info!(
            tiles = prizes.len(),
            side = layout.side(),
            history_index,
            "game constructed"
        );
        Ok(Self {
            prizes,
            layout,
            config,
            prefill,
            backend,
            frontend,
            history_index: AtomicUsize::new(history_index),
            drawing: AtomicBool::new(false),
            phase: AtomicU64::new(DrawPhase::Idle as u64),
            admissions: AtomicU64::new(0),
        })
    }

    /// Prize tiles in ring order, after fitting.
    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Tile the pointer last landed on.
    pub fn history_index(&self) -> usize {
        self.history_index.load(Ordering::SeqCst)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> DrawPhase {
        let packed = self.phase.load(Ordering::SeqCst);
        DrawPhase::try_from((packed & PHASE_MASK) as u8).unwrap_or(DrawPhase::Idle)
    }

    /// Run one draw end to end and return the prize it resolved to.
    ///
    /// Rejects with [`GameError::ConcurrentDraw`] while another draw holds
    /// the in-flight flag. The flag clears when the spin lands (dialogs may
    /// still be up) and on pre-landing error paths, so a failed draw never
    /// wedges the game. Once released at landing, the flag may already
    /// belong to a draw admitted during the dialogs; this draw never
    /// touches it again.
    pub async fn draw(&self) -> Result<Prize, GameError> {
        if self
            .drawing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("draw rejected, one already in flight");
            return Err(GameError::ConcurrentDraw);
        }
        let ticket = self.admissions.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.run_draw(ticket).await;
        match &result {
            Ok(prize) => info!(
                prize_id = prize.prize_id,
                index = self.history_index(),
                "draw resolved"
            ),
            Err(err) => warn!(%err, "draw failed"),
        }
        result
    }

    /// Best-effort teardown of the front end. Errors are logged, never
    /// propagated; the resting tile survives for reconstruction.
    pub fn destroy(&self) {
        self.frontend.busy(false);
        self.frontend.highlight(None);
        if let Err(err) = self.frontend.teardown() {
            warn!(%err, "frontend teardown failed");
        }
        info!(history_index = self.history_index(), "game destroyed");
    }

    /// Record `phase` on behalf of the draw admitted as `ticket`. A draw
    /// never overwrites the phase of a later admission, and
    /// `phase_changed` fires only for writes that took effect.
    fn set_phase(&self, ticket: u64, phase: DrawPhase) {
        let packed = (ticket << PHASE_BITS) | phase as u64;
        let accepted = self
            .phase
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                ((current >> PHASE_BITS) <= ticket).then_some(packed)
            })
            .is_ok();
        if accepted {
            debug!(phase = phase.as_str(), "phase changed");
            self.frontend.phase_changed(phase);
        }
    }

    /// Release on an error before the spin lands. The flag is still held
    /// here, so no successor draw exists and the phase write cannot be
    /// contested.
    fn release_before_landing(&self, ticket: u64) {
        self.set_phase(ticket, DrawPhase::Idle);
        self.drawing.store(false, Ordering::SeqCst);
    }

    fn pace(&self) -> StepPace {
        StepPace::new(
            self.config.step_ms,
            self.config.buffer_unit_ms,
            self.config.buffer,
        )
    }

    async fn run_draw(&self, ticket: u64) -> Result<Prize, GameError> {
        self.set_phase(ticket, DrawPhase::Drawing);
        self.frontend.busy(true);
        let drawn = self.backend.start_draw().await;
        self.frontend.busy(false);
        let prize = match drawn {
            Ok(prize) => prize,
            Err(err) => {
                self.release_before_landing(ticket);
                return Err(GameError::backend(err));
            }
        };
        debug!(
            prize_id = prize.prize_id,
            kind = prize.prize_type.as_str(),
            "backend resolved draw"
        );

        self.set_phase(ticket, DrawPhase::Replaying);
        self.replay().await;

        self.set_phase(ticket, DrawPhase::Spinning);
        let target = match self.spin(&prize).await {
            Ok(target) => target,
            Err(err) => {
                self.release_before_landing(ticket);
                return Err(err);
            }
        };
        self.history_index.store(target, Ordering::SeqCst);
        // The board has settled; new draws are acceptable while the result
        // dialog is still up. From here on the flag (and, through the ticket
        // guard, the phase) may belong to a successor draw: nothing below
        // touches the flag.
        self.drawing.store(false, Ordering::SeqCst);

        self.set_phase(ticket, DrawPhase::Resolving);
        sleep(Duration::from_millis(self.config.settle_ms)).await;
        let presented = self.present(&prize).await;
        self.set_phase(ticket, DrawPhase::Idle);
        presented?;
        Ok(prize)
    }

    /// Walk the highlight from tile 0 to the resting tile. Never fails.
    async fn replay(&self) {
        let pace = self.pace();
        let last = self.history_index();
        let mut seq = ReplaySequencer::new(last, &pace);
        let mut frames = 0u64;
        while let Some(frame) = seq.next_frame() {
            self.frontend.highlight(Some(frame.index));
            sleep(Duration::from_millis(frame.hold_ms)).await;
            frames += 1;
        }
        debug!(frames, last, "replay complete");
    }

    /// Walk the highlight to the drawn prize and return its tile index.
    async fn spin(&self, prize: &Prize) -> Result<usize, GameError> {
        if !prize.has_id() {
            return Err(GameError::MissingPrizeId);
        }
        // First match wins; padded duplicates resolve to their original.
        let target = self
            .prizes
            .iter()
            .position(|p| p.prize_id == prize.prize_id)
            .ok_or(GameError::PrizeNotFound {
                prize_id: prize.prize_id,
            })?;

        let mut seq = SpinSequencer::new(self.prizes.len(), target, self.config.laps, self.pace());
        debug!(target, total_steps = seq.total_steps(), "spin started");
        while let Some(frame) = seq.next_frame() {
            self.frontend.highlight(Some(frame.index));
            sleep(Duration::from_millis(frame.hold_ms)).await;
        }
        Ok(target)
    }

    /// Present the outcome. Address-claimed prizes chain into the address
    /// form and re-show the result dialog after every successful save, until
    /// the player dismisses something.
    async fn present(&self, prize: &Prize) -> Result<(), GameError> {
        if prize.is_miss() {
            self.frontend
                .show_miss(prize)
                .await
                .map_err(GameError::frontend)?;
            return Ok(());
        }

        loop {
            let outcome = self
                .frontend
                .show_result(prize)
                .await
                .map_err(GameError::frontend)?;
            if outcome == DialogOutcome::Dismissed {
                return Ok(());
            }
            if prize.receive_type != ReceiveKind::Address {
                return Ok(());
            }
            match self
                .frontend
                .collect_address(&self.prefill)
                .await
                .map_err(GameError::frontend)?
            {
                Some(form) => {
                    self.backend
                        .save_address(form)
                        .await
                        .map_err(GameError::backend)?;
                    info!(prize_id = prize.prize_id, "address saved");
                }
                None => return Ok(()),
            }
        }
    }
}
