//! Built-in item catalog.

use game_core::{
    ArmorData, ConsumableData, ConsumableEffect, ItemDefinition, ItemHandle, ItemKind, ItemOracle,
    WeaponData,
};

/// Stable handles for the built-in items. Save files reference these, so
/// the numbers must never be reused for different items.
pub mod handles {
    use game_core::ItemHandle;

    pub const TRAVELERS_KNIFE: ItemHandle = ItemHandle(1);
    pub const LEATHER_VEST: ItemHandle = ItemHandle(2);
    pub const STALE_BREAD: ItemHandle = ItemHandle(3);
    pub const IRON_SWORD: ItemHandle = ItemHandle(4);
    pub const CHAIN_MAIL: ItemHandle = ItemHandle(5);
    pub const MINOR_POTION: ItemHandle = ItemHandle(6);
    pub const HEALING_HERB: ItemHandle = ItemHandle(7);
    pub const LUCKY_FISH: ItemHandle = ItemHandle(8);
    pub const ANCIENT_COIN: ItemHandle = ItemHandle(9);
    pub const STRANGE_GEM: ItemHandle = ItemHandle(10);
    pub const RUSTY_KEY: ItemHandle = ItemHandle(11);
}

/// Door id opened by the rusty key (the Mysterious Cave).
pub const CAVE_DOOR: u16 = 1;

const CONSUMABLE_STACK: u16 = 99;

/// In-memory catalog of item definitions implementing [`ItemOracle`].
#[derive(Debug)]
pub struct StaticCatalog {
    items: Vec<ItemDefinition>,
}

impl StaticCatalog {
    /// The full built-in item set.
    pub fn builtin() -> Self {
        let weapon = |power| ItemKind::Weapon(WeaponData { power });
        let armor = |power| ItemKind::Armor(ArmorData { power });
        let heal = |amount| {
            ItemKind::Consumable(ConsumableData {
                effect: ConsumableEffect::Heal(amount),
            })
        };

        Self {
            items: vec![
                ItemDefinition::new(
                    handles::TRAVELERS_KNIFE,
                    "Traveler's Knife",
                    "A simple steel knife. Better than nothing.",
                    weapon(2),
                    1,
                    4,
                ),
                ItemDefinition::new(
                    handles::LEATHER_VEST,
                    "Leather Vest",
                    "Light protection for the torso.",
                    armor(1),
                    1,
                    6,
                ),
                ItemDefinition::new(
                    handles::STALE_BREAD,
                    "Stale Bread",
                    "Restores a bit of HP.",
                    heal(8),
                    CONSUMABLE_STACK,
                    2,
                ),
                ItemDefinition::new(
                    handles::IRON_SWORD,
                    "Iron Sword",
                    "A solid blade.",
                    weapon(4),
                    1,
                    40,
                ),
                ItemDefinition::new(
                    handles::CHAIN_MAIL,
                    "Chain Mail",
                    "Better armor.",
                    armor(3),
                    1,
                    50,
                ),
                ItemDefinition::new(
                    handles::MINOR_POTION,
                    "Minor Potion",
                    "Restores 25 HP.",
                    heal(25),
                    CONSUMABLE_STACK,
                    20,
                ),
                ItemDefinition::new(
                    handles::HEALING_HERB,
                    "Healing Herb",
                    "A medicinal plant that can heal wounds.",
                    heal(15),
                    CONSUMABLE_STACK,
                    5,
                ),
                ItemDefinition::new(
                    handles::LUCKY_FISH,
                    "Lucky Fish",
                    "A plump fish. Might restore some energy.",
                    heal(8),
                    CONSUMABLE_STACK,
                    3,
                ),
                ItemDefinition::new(
                    handles::ANCIENT_COIN,
                    "Ancient Coin",
                    "A weathered coin from ages past.",
                    ItemKind::Quest { token: 1 },
                    1,
                    100,
                ),
                ItemDefinition::new(
                    handles::STRANGE_GEM,
                    "Strange Gem",
                    "A gem pulsing with inner light.",
                    ItemKind::Quest { token: 2 },
                    1,
                    200,
                ),
                ItemDefinition::new(
                    handles::RUSTY_KEY,
                    "Rusty Key",
                    "An old iron key. Might fit an ancient lock.",
                    ItemKind::Key { door_id: CAVE_DOOR },
                    1,
                    0,
                ),
            ],
        }
    }

    /// Build a catalog from externally loaded definitions.
    pub fn from_definitions(items: Vec<ItemDefinition>) -> Self {
        Self { items }
    }

    /// Find a definition whose name contains `fragment` (case-insensitive).
    /// The clients resolve player-typed names through this.
    pub fn find_by_name(&self, fragment: &str) -> Option<&ItemDefinition> {
        let fragment = fragment.to_lowercase();
        self.items
            .iter()
            .find(|def| def.name.to_lowercase().contains(&fragment))
    }

    /// What the traveling merchant has on offer.
    pub fn merchant_stock(&self) -> Vec<ItemHandle> {
        vec![handles::IRON_SWORD, handles::CHAIN_MAIL, handles::MINOR_POTION]
    }
}

impl ItemOracle for StaticCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.items.iter().find(|def| def.handle == handle)
    }

    fn all_definitions(&self) -> &[ItemDefinition] {
        &self.items
    }
}
