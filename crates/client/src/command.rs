//! Player command parsing.

use game_core::EquipSlot;
use runtime::Direction;

/// One parsed line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Look,
    Map,
    Move(Direction),
    Stats,
    Inventory,
    Inspect(String),
    Equip(String),
    Unequip(EquipSlot),
    Use(String),
    Take(String),
    Drop(String),
    /// Starts combat, or attacks during it.
    Attack,
    Flee,
    Talk,
    Shop,
    Buy(String),
    Sell(String),
    Quests,
    Riddle(String),
    Save,
    Load,
    Quit,
}

impl Command {
    /// Parse a raw input line. Verbs accept their first letter as an
    /// abbreviation where that is unambiguous; bare direction words move.
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let verb = verb.to_lowercase();

        // Bare directions are movement.
        if rest.is_empty() {
            if let Ok(direction) = verb.parse::<Direction>() {
                return Ok(Command::Move(direction));
            }
        }

        let arg = || {
            if rest.is_empty() {
                Err(format!("'{verb}' needs something to act on"))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.as_str() {
            "help" | "h" | "?" => Ok(Command::Help),
            "look" | "l" => Ok(Command::Look),
            "map" | "m" => Ok(Command::Map),
            "go" | "move" => rest
                .parse::<Direction>()
                .map(Command::Move)
                .map_err(|_| format!("'{rest}' is not a direction")),
            "stats" | "status" => Ok(Command::Stats),
            "inventory" | "inv" | "i" => Ok(Command::Inventory),
            "inspect" | "examine" => Ok(Command::Inspect(arg()?)),
            "equip" => Ok(Command::Equip(arg()?)),
            "unequip" => rest
                .parse::<EquipSlot>()
                .map(Command::Unequip)
                .map_err(|_| "unequip 'weapon' or 'armor'".to_string()),
            "use" | "u" => Ok(Command::Use(arg()?)),
            "take" | "get" => Ok(Command::Take(arg()?)),
            "drop" => Ok(Command::Drop(arg()?)),
            "attack" | "a" | "fight" => Ok(Command::Attack),
            "flee" | "f" | "run" => Ok(Command::Flee),
            "talk" | "t" => Ok(Command::Talk),
            "shop" => Ok(Command::Shop),
            "buy" => Ok(Command::Buy(arg()?)),
            "sell" => Ok(Command::Sell(arg()?)),
            "quests" | "quest" | "q" => Ok(Command::Quests),
            "riddle" | "answer" => Ok(Command::Riddle(rest.to_string())),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("say something (try 'help')".to_string()),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  look (l)              describe the current room
  map (m)               show the discovered map
  north/south/east/west move (also n/s/e/w, or 'go <dir>')
  stats                 show your stats
  inventory (i)         list carried items
  inspect <item>        describe an item
  equip <item>          equip a weapon or armor
  unequip <slot>        unequip 'weapon' or 'armor'
  use <item> (u)        use a consumable or key
  take <item>           pick an item off the ground
  drop <item>           drop an item
  attack (a)            fight the enemy here
  flee (f)              try to escape combat
  talk (t)              talk to whoever is around
  shop / buy / sell     trade with a merchant
  quests (q)            quest progress
  riddle <answer>       answer a carved riddle
  save / load / quit";
