//! Session orchestration around the pure rules in `game-core`.
//!
//! The runtime owns everything the core treats as a collaborator: the world
//! grid and fog of war, the shop, quest flag handling, the save-file
//! repository, and the session context that threads player, world, RNG and
//! config through every operation (no ambient globals). Everything here is
//! synchronous; one player action runs to completion before control
//! returns.

pub mod error;
pub mod repository;
pub mod session;
pub mod shop;
pub mod world;

pub use error::RuntimeError;
pub use repository::SaveRepository;
pub use session::{GameSession, MoveError, SessionError, SessionEvent};
pub use shop::{ShopError, buy_item, sell_item, sellable_items};
pub use world::{Direction, Room, RoomFeature, World};
