//! Plain-text rendering of game state and events.

use game_core::{
    CombatEvent, Combatant, EffectOutcome, ItemHandle, ItemOracle, buy_price, level_threshold,
    sell_price,
};
use game_content::StaticCatalog;
use runtime::{GameSession, SessionEvent};

/// Item name via the catalog, falling back to the raw handle for items the
/// catalog no longer knows.
fn item_name(catalog: &StaticCatalog, handle: ItemHandle) -> String {
    catalog
        .definition(handle)
        .map(|def| def.name.clone())
        .unwrap_or_else(|| format!("item #{}", handle.0))
}

pub fn room(session: &GameSession) -> String {
    let room = session.current_room();
    let mut out = format!("== {} ==\n{}", room.name, room.description);
    if let Some(enemy) = &room.enemy {
        if !enemy.entity.is_defeated() {
            out.push_str(&format!("\nA {} is here!", enemy.entity.name));
        }
    }
    for slot in &room.items {
        let name = item_name(session.catalog(), slot.handle);
        if slot.quantity > 1 {
            out.push_str(&format!("\nOn the ground: {} x{}", name, slot.quantity));
        } else {
            out.push_str(&format!("\nOn the ground: {name}"));
        }
    }
    let exits: Vec<String> = session.exits().iter().map(|d| d.to_string()).collect();
    out.push_str(&format!("\nExits: {}", exits.join(", ")));
    out
}

pub fn stats(session: &GameSession) -> String {
    let player = session.player();
    let stats = &player.entity.stats;
    let catalog = session.catalog();
    let next = level_threshold(stats.level, session.config());
    let mut out = format!(
        "{} - level {}\n\
         HP: {}/{}\n\
         Attack: {} (base {})\n\
         Defense: {} (base {})\n\
         XP: {}/{}\n\
         Gold: {}",
        player.entity.name,
        stats.level,
        stats.current_health,
        stats.max_health,
        player.entity.effective_attack(catalog),
        stats.attack_power,
        player.entity.effective_defense(catalog),
        stats.defense,
        stats.experience,
        next,
        player.gold,
    );
    if let Some(handle) = player.entity.equipment.weapon {
        out.push_str(&format!("\nWeapon: {}", item_name(catalog, handle)));
    }
    if let Some(handle) = player.entity.equipment.armor {
        out.push_str(&format!("\nArmor: {}", item_name(catalog, handle)));
    }
    out
}

pub fn inventory(session: &GameSession) -> String {
    let player = session.player();
    if player.entity.inventory.is_empty() {
        return "Your pack is empty.".into();
    }
    let mut lines = vec!["You are carrying:".to_string()];
    for slot in player.entity.inventory.iter() {
        let name = item_name(session.catalog(), slot.handle);
        if slot.quantity > 1 {
            lines.push(format!("  {} x{}", name, slot.quantity));
        } else {
            lines.push(format!("  {name}"));
        }
    }
    lines.join("\n")
}

pub fn shop_stock(session: &GameSession) -> String {
    let catalog = session.catalog();
    let mut lines = vec![format!(
        "Merchant: 'Welcome, traveler!' (your gold: {})",
        session.player().gold
    )];
    for handle in catalog.merchant_stock() {
        if let Some(def) = catalog.definition(handle) {
            lines.push(format!("  {} - {} gold", def.name, buy_price(def)));
        }
    }
    for (handle, price) in runtime::sellable_items(session) {
        lines.push(format!(
            "  (sell {} for {} gold)",
            item_name(catalog, handle),
            price
        ));
    }
    lines.join("\n")
}

pub fn inspect(session: &GameSession, fragment: &str) -> String {
    let catalog = session.catalog();
    match catalog.find_by_name(fragment) {
        Some(def) => format!(
            "{} ({})\n{}\nWorth about {} gold to a merchant.",
            def.name,
            def.kind.category(),
            def.description,
            sell_price(def),
        ),
        None => format!("You know of no '{fragment}'."),
    }
}

/// One line per combat event. The caller captures the enemy's name before
/// the round, since a finished encounter is gone by render time.
pub fn combat_events(session: &GameSession, enemy_name: &str, events: &[CombatEvent]) -> Vec<String> {
    let catalog = session.catalog();
    let player_name = session.player().entity.name.clone();
    events
        .iter()
        .map(|event| match event {
            CombatEvent::AttackLanded {
                attacker: Combatant::Player,
                damage,
                target_health,
            } => format!("{player_name} strikes for {damage} damage ({target_health} HP left)."),
            CombatEvent::AttackLanded {
                attacker: Combatant::Enemy,
                damage,
                target_health,
            } => {
                format!("{enemy_name} hits you for {damage} damage ({target_health} HP left).")
            }
            CombatEvent::ItemUsed { handle, outcome } => {
                let EffectOutcome::Healed { amount } = outcome;
                format!(
                    "You use the {} and recover {} HP.",
                    item_name(catalog, *handle),
                    amount
                )
            }
            CombatEvent::FleeAttempt { success: true } => "You slip away!".to_string(),
            CombatEvent::FleeAttempt { success: false } => "You fail to escape!".to_string(),
            CombatEvent::ExperienceGained { amount } => format!("You gain {amount} XP."),
            CombatEvent::LevelUp { level } => {
                format!("You reach level {level}! You feel fully restored.")
            }
            CombatEvent::GoldLooted { amount } => format!("You loot {amount} gold."),
            CombatEvent::ItemLooted { handle, quantity } => {
                format!(
                    "You loot {} x{}.",
                    item_name(catalog, *handle),
                    quantity
                )
            }
            CombatEvent::LootLost { handle, quantity } => {
                format!(
                    "{} x{} slips away, your pack is full.",
                    item_name(catalog, *handle),
                    quantity
                )
            }
        })
        .collect()
}

/// One line per session-level event.
pub fn session_events(session: &GameSession, events: &[SessionEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            SessionEvent::GameWon => {
                "The Obsidian Warden crumbles. Light returns to Asteria. You have won!".to_string()
            }
            SessionEvent::Respawned { gold_lost } => format!(
                "You have been defeated... You wake at the crossroads, {gold_lost} gold lighter."
            ),
            SessionEvent::ItemUsed { handle, outcome } => {
                let EffectOutcome::Healed { amount } = outcome;
                format!(
                    "You use the {} and recover {} HP.",
                    item_name(session.catalog(), *handle),
                    amount
                )
            }
            SessionEvent::DoorUnlocked { .. } => "The stone door rumbles open!".to_string(),
            SessionEvent::QuestAdvanced { .. } => "(Quest updated)".to_string(),
            SessionEvent::GoldReceived { amount } => format!("You receive {amount} gold."),
        })
        .collect()
}
