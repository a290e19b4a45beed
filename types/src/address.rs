//! Shipping address payload collected for address-claimed prizes.

use serde::{Deserialize, Serialize};

use crate::config::ReceiverPrefill;

/// Payload submitted to the backend when a won prize needs shipping.
///
/// Field-level validation (phone format, region codes) belongs to the form
/// presenting it, not to this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressForm {
    pub receiver: String,
    pub phone: String,
    pub region: String,
    pub detail: String,
}

impl AddressForm {
    /// Start a form from stored receiver details.
    pub fn from_prefill(prefill: &ReceiverPrefill) -> Self {
        Self {
            receiver: prefill.receiver.clone(),
            phone: prefill.player_phone.clone(),
            region: prefill.region.clone(),
            detail: prefill.detail.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_seeds_the_form() {
        let prefill = ReceiverPrefill {
            player_phone: "13800000000".to_string(),
            receiver: "A. Winner".to_string(),
            region: "Shanghai".to_string(),
            detail: "1 Example Rd".to_string(),
        };
        let form = AddressForm::from_prefill(&prefill);
        assert_eq!(form.phone, "13800000000");
        assert_eq!(form.receiver, "A. Winner");

        let empty = AddressForm::from_prefill(&ReceiverPrefill::default());
        assert_eq!(empty, AddressForm::default());
    }
}
