pub mod address;
pub use address::AddressForm;
pub mod config;
pub use config::{DialogText, ReceiverPrefill, SpinConfig};
pub mod error;
pub use error::{ConfigError, GameError};
pub mod prize;
pub use prize::{Prize, PrizeKind, ReceiveKind};
pub mod ring;
pub use ring::{fit_to_ring, ring_len, side_len, MIN_RING};
