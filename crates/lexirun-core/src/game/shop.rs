use serde::{Deserialize, Serialize};

use crate::api::game::ShopConfig;

/// Items for sale in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShopItem {
    DoubleJump,
    MaxLife,
    Heal,
    #[serde(alias = "IMMORTAL")]
    Immortality,
}

impl ShopItem {
    pub const ALL: [ShopItem; 4] = [
        ShopItem::DoubleJump,
        ShopItem::MaxLife,
        ShopItem::Heal,
        ShopItem::Immortality,
    ];

    pub fn price(self, config: &ShopConfig) -> u64 {
        match self {
            ShopItem::DoubleJump => config.double_jump,
            ShopItem::MaxLife => config.max_life,
            ShopItem::Heal => config.heal,
            ShopItem::Immortality => config.immortality,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DOUBLE_JUMP" => Some(ShopItem::DoubleJump),
            "MAX_LIFE" => Some(ShopItem::MaxLife),
            "HEAL" => Some(ShopItem::Heal),
            "IMMORTALITY" | "IMMORTAL" => Some(ShopItem::Immortality),
            _ => None,
        }
    }
}
