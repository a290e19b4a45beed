//! Scripted collaborators for tests and demos.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use tombola_types::{AddressForm, Prize, ReceiverPrefill};

use crate::backend::DrawBackend;
use crate::controller::DrawPhase;
use crate::frontend::{DialogOutcome, Frontend};

/// Error produced by the scripted backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockBackendError {
    /// The draw script ran out of prizes.
    Exhausted,
    /// The backend was configured to reject saves.
    SaveRejected,
}

impl fmt::Display for MockBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockBackendError::Exhausted => write!(f, "draw script exhausted"),
            MockBackendError::SaveRejected => write!(f, "address save rejected"),
        }
    }
}

impl std::error::Error for MockBackendError {}

struct BackendState {
    script: VecDeque<Prize>,
    cycle: bool,
    reject_saves: bool,
    saved: Vec<AddressForm>,
    draws: u64,
}

/// Backend that resolves draws from a fixed script.
#[derive(Clone)]
pub struct ScriptedBackend {
    inner: Arc<Mutex<BackendState>>,
}

impl ScriptedBackend {
    /// Every draw resolves to the same prize.
    pub fn returning(prize: Prize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BackendState {
                script: VecDeque::from([prize]),
                cycle: true,
                reject_saves: false,
                saved: Vec::new(),
                draws: 0,
            })),
        }
    }

    /// Each prize resolves one draw, in order; further draws fail with
    /// [`MockBackendError::Exhausted`].
    pub fn sequence(prizes: impl IntoIterator<Item = Prize>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BackendState {
                script: prizes.into_iter().collect(),
                cycle: false,
                reject_saves: false,
                saved: Vec::new(),
                draws: 0,
            })),
        }
    }

    /// Make every `save_address` call fail.
    pub fn rejecting_saves(self) -> Self {
        self.inner.lock().unwrap().reject_saves = true;
        self
    }

    /// Addresses accepted so far.
    pub fn saved_addresses(&self) -> Vec<AddressForm> {
        self.inner.lock().unwrap().saved.clone()
    }

    /// Draws attempted so far.
    pub fn draws(&self) -> u64 {
        self.inner.lock().unwrap().draws
    }
}

impl DrawBackend for ScriptedBackend {
    type Error = MockBackendError;

    async fn start_draw(&self) -> Result<Prize, Self::Error> {
        let mut state = self.inner.lock().unwrap();
        state.draws += 1;
        if state.cycle {
            state
                .script
                .front()
                .cloned()
                .ok_or(MockBackendError::Exhausted)
        } else {
            state.script.pop_front().ok_or(MockBackendError::Exhausted)
        }
    }

    async fn save_address(&self, form: AddressForm) -> Result<(), Self::Error> {
        let mut state = self.inner.lock().unwrap();
        if state.reject_saves {
            return Err(MockBackendError::SaveRejected);
        }
        state.saved.push(form);
        Ok(())
    }
}

/// A scripted answer for one result dialog.
enum ResultAnswer {
    /// Close immediately with this outcome.
    Ready(DialogOutcome),
    /// Stay open until the paired sender fires. A dropped sender dismisses.
    Deferred(oneshot::Receiver<DialogOutcome>),
}

#[derive(Default)]
struct FrontendState {
    highlights: Vec<Option<usize>>,
    busy: Vec<bool>,
    phases: Vec<DrawPhase>,
    results_shown: u64,
    misses_shown: u64,
    result_answers: VecDeque<ResultAnswer>,
    address_answers: VecDeque<Option<AddressForm>>,
    prefills_seen: Vec<ReceiverPrefill>,
    torn_down: bool,
}

/// Front end that records every call and answers dialogs from scripts.
///
/// Unscripted result dialogs answer `Dismissed`; unscripted address forms
/// answer `None` (cancelled). Clone the recorder before handing it to a game
/// to keep a reading handle.
#[derive(Clone, Default)]
pub struct RecordingFrontend {
    inner: Arc<Mutex<FrontendState>>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outcomes for upcoming result dialogs.
    pub fn answer_results(&self, outcomes: impl IntoIterator<Item = DialogOutcome>) {
        self.inner
            .lock()
            .unwrap()
            .result_answers
            .extend(outcomes.into_iter().map(ResultAnswer::Ready));
    }

    /// Queue a result dialog that stays open until the returned sender
    /// fires. Lets a test hold a draw in its presentation window.
    pub fn defer_result(&self) -> oneshot::Sender<DialogOutcome> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .lock()
            .unwrap()
            .result_answers
            .push_back(ResultAnswer::Deferred(rx));
        tx
    }

    /// Queue answers for upcoming address forms.
    pub fn answer_addresses(&self, answers: impl IntoIterator<Item = Option<AddressForm>>) {
        self.inner
            .lock()
            .unwrap()
            .address_answers
            .extend(answers);
    }

    /// Highlight calls that lit a tile, in order.
    pub fn lit_tiles(&self) -> Vec<usize> {
        self.inner
            .lock()
            .unwrap()
            .highlights
            .iter()
            .copied()
            .flatten()
            .collect()
    }

    /// Every highlight call, including clears.
    pub fn highlight_calls(&self) -> Vec<Option<usize>> {
        self.inner.lock().unwrap().highlights.clone()
    }

    pub fn busy_calls(&self) -> Vec<bool> {
        self.inner.lock().unwrap().busy.clone()
    }

    pub fn phases(&self) -> Vec<DrawPhase> {
        self.inner.lock().unwrap().phases.clone()
    }

    pub fn results_shown(&self) -> u64 {
        self.inner.lock().unwrap().results_shown
    }

    pub fn misses_shown(&self) -> u64 {
        self.inner.lock().unwrap().misses_shown
    }

    /// Prefills passed to the address form, in order.
    pub fn prefills_seen(&self) -> Vec<ReceiverPrefill> {
        self.inner.lock().unwrap().prefills_seen.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().unwrap().torn_down
    }
}

impl Frontend for RecordingFrontend {
    type Error = Infallible;

    fn highlight(&self, index: Option<usize>) {
        self.inner.lock().unwrap().highlights.push(index);
    }

    fn busy(&self, on: bool) {
        self.inner.lock().unwrap().busy.push(on);
    }

    fn phase_changed(&self, phase: DrawPhase) {
        self.inner.lock().unwrap().phases.push(phase);
    }

    async fn show_result(&self, _prize: &Prize) -> Result<DialogOutcome, Self::Error> {
        let answer = {
            let mut state = self.inner.lock().unwrap();
            state.results_shown += 1;
            state.result_answers.pop_front()
        };
        match answer {
            Some(ResultAnswer::Ready(outcome)) => Ok(outcome),
            Some(ResultAnswer::Deferred(rx)) => Ok(rx.await.unwrap_or(DialogOutcome::Dismissed)),
            None => Ok(DialogOutcome::Dismissed),
        }
    }

    async fn show_miss(&self, _prize: &Prize) -> Result<DialogOutcome, Self::Error> {
        let mut state = self.inner.lock().unwrap();
        state.misses_shown += 1;
        Ok(DialogOutcome::Dismissed)
    }

    async fn collect_address(
        &self,
        prefill: &ReceiverPrefill,
    ) -> Result<Option<AddressForm>, Self::Error> {
        let mut state = self.inner.lock().unwrap();
        state.prefills_seen.push(prefill.clone());
        Ok(state.address_answers.pop_front().flatten())
    }

    fn teardown(&self) -> Result<(), Self::Error> {
        self.inner.lock().unwrap().torn_down = true;
        Ok(())
    }
}
