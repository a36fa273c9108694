//! The traveling merchant.
//!
//! Buying marks items up to 150% of base value, selling pays out 60%
//! (rounded down). Trades are atomic: gold and inventory change together
//! or not at all. Equipped gear must be unequipped before it can be sold.

use game_core::{ItemHandle, ItemOracle, buy_price, sell_price};
use thiserror::Error;
use tracing::info;

use crate::session::GameSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("there is no merchant here")]
    NoMerchantHere,

    #[error("the merchant does not sell that")]
    NotInStock,

    #[error("not enough gold")]
    NotEnoughGold,

    #[error("you do not own that item")]
    NotOwned,

    #[error("unequip it before selling")]
    Equipped,

    #[error("no room in the inventory")]
    InventoryFull,

    #[error("the merchant does not recognize that item")]
    UnknownItem,
}

/// Buy one unit from the merchant's stock. Returns the price paid.
pub fn buy_item(session: &mut GameSession, handle: ItemHandle) -> Result<u32, ShopError> {
    if !session.at_merchant() {
        return Err(ShopError::NoMerchantHere);
    }
    if !session.catalog().merchant_stock().contains(&handle) {
        return Err(ShopError::NotInStock);
    }
    let definition = session
        .catalog()
        .definition(handle)
        .ok_or(ShopError::UnknownItem)?;
    let price = buy_price(definition);
    if session.player().gold < price {
        return Err(ShopError::NotEnoughGold);
    }
    // Add first so a full inventory cancels the trade before gold moves.
    session
        .grant_item(handle, 1)
        .map_err(|_| ShopError::InventoryFull)?;
    session.player_mut().gold -= price;
    info!(?handle, price, "item bought");
    Ok(price)
}

/// Sell one unit back to the merchant. Returns the gold received.
pub fn sell_item(session: &mut GameSession, handle: ItemHandle) -> Result<u32, ShopError> {
    if !session.at_merchant() {
        return Err(ShopError::NoMerchantHere);
    }
    let player = session.player();
    if player.entity.equipment.is_equipped(handle) {
        return Err(ShopError::Equipped);
    }
    if !player.entity.inventory.contains(handle) {
        return Err(ShopError::NotOwned);
    }
    let definition = session
        .catalog()
        .definition(handle)
        .ok_or(ShopError::UnknownItem)?;
    let price = sell_price(definition);
    session
        .player_mut()
        .entity
        .inventory
        .remove(handle, 1)
        .map_err(|_| ShopError::NotOwned)?;
    let gold = session.player().gold.saturating_add(price);
    session.player_mut().gold = gold;
    info!(?handle, price, "item sold");
    Ok(price)
}

/// Items the player could sell right now, with their payout. Equipped
/// gear and items missing from the catalog are excluded.
pub fn sellable_items(session: &GameSession) -> Vec<(ItemHandle, u32)> {
    let player = session.player();
    player
        .entity
        .inventory
        .iter()
        .filter(|slot| !player.entity.equipment.is_equipped(slot.handle))
        .filter_map(|slot| {
            session
                .catalog()
                .definition(slot.handle)
                .map(|def| (slot.handle, sell_price(def)))
        })
        .collect()
}
