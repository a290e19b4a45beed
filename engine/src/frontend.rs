//! Presentation seam.
//!
//! The controller never touches a screen; it drives an implementation of
//! [`Frontend`]. The engine guarantees at most one highlighted tile per
//! frame and never presents two dialogs at once, so implementations can stay
//! simple. Methods take `&self`: implementations that mutate internally
//! (recorders, channel bridges) manage their own interior state.

use std::future::Future;

use tombola_types::{AddressForm, Prize, ReceiverPrefill};

use crate::controller::DrawPhase;

/// How a dialog was closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The player acknowledged the dialog.
    Confirmed,
    /// The player dismissed it.
    Dismissed,
}

/// Trait for the UI the controller drives.
pub trait Frontend: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Un-highlight every tile, then highlight `index`. `None` clears all.
    fn highlight(&self, index: Option<usize>);

    /// Show or hide the busy indicator around backend calls.
    fn busy(&self, on: bool);

    /// Observe controller phase transitions, for status displays.
    fn phase_changed(&self, phase: DrawPhase) {
        let _ = phase;
    }

    /// Present the result dialog for a won prize.
    fn show_result(
        &self,
        prize: &Prize,
    ) -> impl Future<Output = Result<DialogOutcome, Self::Error>> + Send;

    /// Present the miss dialog for a losing draw.
    fn show_miss(
        &self,
        prize: &Prize,
    ) -> impl Future<Output = Result<DialogOutcome, Self::Error>> + Send;

    /// Collect a shipping address. `None` means the player cancelled the
    /// form.
    fn collect_address(
        &self,
        prefill: &ReceiverPrefill,
    ) -> impl Future<Output = Result<Option<AddressForm>, Self::Error>> + Send;

    /// Tear down everything mounted. Best-effort; the controller logs and
    /// swallows failures.
    fn teardown(&self) -> Result<(), Self::Error>;
}
