//! Prize catalog types shared by the engine and front ends.

use serde::{Deserialize, Serialize};

/// Prize category of a board tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrizeKind {
    /// Consolation tile; landing on it counts as a miss.
    Miss = 0,
    /// Physical goods, shipped to a collected address.
    Physical = 1,
    /// Virtual goods, delivered in-app.
    Virtual = 2,
}

impl PrizeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrizeKind::Miss => "miss",
            PrizeKind::Physical => "physical",
            PrizeKind::Virtual => "virtual",
        }
    }
}

impl TryFrom<u8> for PrizeKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PrizeKind::Miss),
            1 => Ok(PrizeKind::Physical),
            2 => Ok(PrizeKind::Virtual),
            i => Err(i),
        }
    }
}

/// How a won prize is claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReceiveKind {
    /// Credited automatically, nothing to collect.
    Direct = 1,
    /// Requires a shipping address before it can be sent.
    Address = 2,
    /// Claimed through an external link.
    Link = 3,
    /// Redeemed as a virtual card code.
    VirtualCard = 4,
}

impl ReceiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiveKind::Direct => "direct",
            ReceiveKind::Address => "address",
            ReceiveKind::Link => "link",
            ReceiveKind::VirtualCard => "virtual-card",
        }
    }
}

impl TryFrom<u8> for ReceiveKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReceiveKind::Direct),
            2 => Ok(ReceiveKind::Address),
            3 => Ok(ReceiveKind::Link),
            4 => Ok(ReceiveKind::VirtualCard),
            i => Err(i),
        }
    }
}

mod serde_prize_kind {
    use super::PrizeKind;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(kind: &PrizeKind, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*kind as u8)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrizeKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        PrizeKind::try_from(value)
            .map_err(|i| serde::de::Error::custom(format!("invalid prize type {i}")))
    }
}

mod serde_receive_kind {
    use super::ReceiveKind;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(kind: &ReceiveKind, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*kind as u8)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ReceiveKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        ReceiveKind::try_from(value)
            .map_err(|i| serde::de::Error::custom(format!("invalid receive type {i}")))
    }
}

/// A single tile on the board.
///
/// Immutable once supplied. The JSON field names match the catalog format
/// served by draw backends (`prizeId`, `prizeType`, ...), with kinds encoded
/// as their numeric wire values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    /// Identifier the backend resolves draws against. Zero means the tile
    /// has no identity and can never be drawn.
    pub prize_id: u64,
    #[serde(with = "serde_prize_kind")]
    pub prize_type: PrizeKind,
    #[serde(with = "serde_receive_kind")]
    pub receive_type: ReceiveKind,
    /// Short label rendered on the tile itself.
    #[serde(default)]
    pub prize_alias: String,
    pub prize_name: String,
    /// Message shown in the result dialog when this prize is won.
    #[serde(default)]
    pub award_msg: String,
    #[serde(default)]
    pub game_img: String,
    #[serde(default)]
    pub prize_img: String,
    #[serde(default)]
    pub memo: String,
}

impl Prize {
    /// Winnable prize claimed with the default flow.
    pub fn award(prize_id: u64, name: &str) -> Self {
        Self {
            prize_id,
            prize_type: PrizeKind::Physical,
            receive_type: ReceiveKind::Direct,
            prize_alias: String::new(),
            prize_name: name.to_string(),
            award_msg: String::new(),
            game_img: String::new(),
            prize_img: String::new(),
            memo: String::new(),
        }
    }

    /// Consolation tile.
    pub fn miss(prize_id: u64, name: &str) -> Self {
        Self {
            prize_type: PrizeKind::Miss,
            ..Self::award(prize_id, name)
        }
    }

    /// Whether the backend can ever resolve a draw to this tile.
    pub fn has_id(&self) -> bool {
        self.prize_id != 0
    }

    pub fn is_miss(&self) -> bool {
        self.prize_type == PrizeKind::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_conversions_accept_wire_values() {
        assert_eq!(PrizeKind::try_from(0), Ok(PrizeKind::Miss));
        assert_eq!(PrizeKind::try_from(2), Ok(PrizeKind::Virtual));
        assert_eq!(PrizeKind::try_from(3), Err(3));

        assert_eq!(ReceiveKind::try_from(1), Ok(ReceiveKind::Direct));
        assert_eq!(ReceiveKind::try_from(4), Ok(ReceiveKind::VirtualCard));
        assert_eq!(ReceiveKind::try_from(0), Err(0));
        assert_eq!(ReceiveKind::try_from(5), Err(5));
    }

    #[test]
    fn prize_deserializes_catalog_field_names() {
        let raw = json!({
            "prizeId": 7,
            "prizeType": 1,
            "receiveType": 2,
            "prizeName": "Mug",
            "prizeAlias": "mug",
            "awardMsg": "A mug is on its way"
        });

        let prize: Prize = serde_json::from_value(raw).expect("deserialize Prize");
        assert_eq!(prize.prize_id, 7);
        assert_eq!(prize.prize_type, PrizeKind::Physical);
        assert_eq!(prize.receive_type, ReceiveKind::Address);
        assert_eq!(prize.prize_name, "Mug");
        // Unlisted string fields default to empty.
        assert_eq!(prize.memo, "");
        assert!(prize.has_id());
        assert!(!prize.is_miss());
    }

    #[test]
    fn prize_serializes_numeric_kinds() {
        let prize = Prize::miss(3, "Thanks for playing");
        let value = serde_json::to_value(&prize).expect("serialize Prize");
        assert_eq!(value["prizeId"], 3);
        assert_eq!(value["prizeType"], 0);
        assert_eq!(value["receiveType"], 1);
    }

    #[test]
    fn prize_rejects_unknown_kinds() {
        let raw = json!({
            "prizeId": 1,
            "prizeType": 9,
            "receiveType": 1,
            "prizeName": "broken"
        });
        assert!(serde_json::from_value::<Prize>(raw).is_err());
    }

    #[test]
    fn zero_id_is_undrawable() {
        let prize = Prize::miss(0, "filler");
        assert!(!prize.has_id());
    }
}
