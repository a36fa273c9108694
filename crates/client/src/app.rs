//! The interactive REPL.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use game_core::{CombatAction, ItemHandle};
use runtime::{GameSession, SaveRepository, buy_item, sell_item};
use tracing::warn;

use crate::command::{Command, HELP_TEXT};
use crate::render;

/// What the loop should do after a command.
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: GameSession,
    repository: SaveRepository,
}

impl App {
    pub fn new(name: &str) -> Result<Self> {
        let repository = SaveRepository::default_path().context("locating the save directory")?;
        Ok(Self {
            session: GameSession::new_random(name),
            repository,
        })
    }

    pub fn run(mut self) -> Result<()> {
        println!("=== Echoes of Asteria ===");
        println!("Darkness gathers over the land. Only the Obsidian Keep holds the answer.");
        println!("(type 'help' for commands)\n");
        if matches!(self.repository.load(), Ok(Some(_))) {
            println!("A saved game exists. Type 'load' to resume it.\n");
        }
        println!("{}", render::room(&self.session));

        let stdin = io::stdin();
        loop {
            self.prompt()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            };
            match self.execute(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => return Err(err),
            }
        }
        println!("Farewell.");
        Ok(())
    }

    fn prompt(&self) -> Result<()> {
        if self.session.in_combat() {
            print!("[combat] > ");
        } else {
            print!("> ");
        }
        io::stdout().flush()?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Help => println!("{HELP_TEXT}"),
            Command::Look => println!("{}", render::room(&self.session)),
            Command::Map => println!("{}", self.session.minimap()),
            Command::Stats => println!("{}", render::stats(&self.session)),
            Command::Inventory => println!("{}", render::inventory(&self.session)),
            Command::Inspect(name) => println!("{}", render::inspect(&self.session, &name)),
            Command::Move(direction) => match self.session.move_player(direction) {
                Ok(_) => println!("{}", render::room(&self.session)),
                Err(err) => println!("{err}"),
            },
            Command::Equip(name) => match self.resolve_item(&name) {
                Some(handle) => match self.session.equip(handle) {
                    Ok(()) => println!("Equipped."),
                    Err(err) => println!("{err}"),
                },
                None => println!("You know of no '{name}'."),
            },
            Command::Unequip(slot) => match self.session.unequip(slot) {
                Ok(Some(_)) => println!("Unequipped."),
                Ok(None) => println!("That slot is already empty."),
                Err(err) => println!("{err}"),
            },
            Command::Use(name) => self.use_item(&name),
            Command::Take(name) => match self.resolve_item(&name) {
                Some(handle) => match self.session.take_item(handle) {
                    Ok(quantity) if quantity > 1 => println!("Taken (x{quantity})."),
                    Ok(_) => println!("Taken."),
                    Err(err) => println!("{err}"),
                },
                None => println!("You know of no '{name}'."),
            },
            Command::Drop(name) => match self.resolve_item(&name) {
                Some(handle) => match self.session.drop_item(handle) {
                    Ok(()) => println!("Dropped."),
                    Err(err) => println!("{err}"),
                },
                None => println!("You know of no '{name}'."),
            },
            Command::Attack => self.attack(),
            Command::Flee => self.combat_action(CombatAction::Flee),
            Command::Talk => self.talk(),
            Command::Shop => {
                if self.session.at_merchant() {
                    println!("{}", render::shop_stock(&self.session));
                } else {
                    println!("There is no shop here.");
                }
            }
            Command::Buy(name) => match self.resolve_item(&name) {
                Some(handle) => match buy_item(&mut self.session, handle) {
                    Ok(price) => println!("Bought for {price} gold."),
                    Err(err) => println!("{err}"),
                },
                None => println!("The merchant has no '{name}'."),
            },
            Command::Sell(name) => match self.resolve_item(&name) {
                Some(handle) => match sell_item(&mut self.session, handle) {
                    Ok(price) => println!("Sold for {price} gold."),
                    Err(err) => println!("{err}"),
                },
                None => println!("You know of no '{name}'."),
            },
            Command::Quests => self.quests(),
            Command::Riddle(answer) => match self.session.answer_riddle(&answer) {
                Ok(events) if events.is_empty() => println!("Nothing happens."),
                Ok(events) => {
                    for line in render::session_events(&self.session, &events) {
                        println!("{line}");
                    }
                }
                Err(err) => println!("{err}"),
            },
            Command::Save => match self.session.save(&self.repository) {
                Ok(()) => println!("Game saved."),
                Err(err) => println!("Could not save: {err}"),
            },
            Command::Load => self.load(),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn resolve_item(&self, fragment: &str) -> Option<ItemHandle> {
        self.session
            .catalog()
            .find_by_name(fragment)
            .map(|def| def.handle)
    }

    fn attack(&mut self) {
        if self.session.in_combat() {
            self.combat_action(CombatAction::Attack);
            return;
        }
        match self.session.start_combat() {
            Ok(encounter) => {
                println!("You engage the {}!", encounter.enemy().entity.name);
            }
            Err(err) => println!("{err}"),
        }
    }

    fn use_item(&mut self, name: &str) {
        let Some(handle) = self.resolve_item(name) else {
            println!("You know of no '{name}'.");
            return;
        };
        if self.session.in_combat() {
            self.combat_action(CombatAction::UseItem(handle));
            return;
        }
        match self.session.use_item(handle) {
            Ok(events) => {
                for line in render::session_events(&self.session, &events) {
                    println!("{line}");
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    fn combat_action(&mut self, action: CombatAction) {
        let enemy_name = match self.session.encounter() {
            Some(encounter) => encounter.enemy().entity.name.clone(),
            None => {
                println!("You are not fighting anything.");
                return;
            }
        };
        match self.session.combat_action(action) {
            Ok((outcome, events)) => {
                for line in render::combat_events(&self.session, &enemy_name, &outcome.events) {
                    println!("{line}");
                }
                for line in render::session_events(&self.session, &events) {
                    println!("{line}");
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    fn talk(&mut self) {
        if self.session.at_merchant() {
            println!("{}", render::shop_stock(&self.session));
            return;
        }
        if self.session.enemy_here() {
            println!("The {} snarls. Words will not help here.", self.enemy_name());
            return;
        }
        match self.session.talk() {
            Ok(events) if events.is_empty() => {
                println!("The wanderer waves at you.");
            }
            Ok(events) => {
                use game_core::QuestFlags;
                for event in &events {
                    match event {
                        runtime::SessionEvent::QuestAdvanced { flags }
                            if *flags == QuestFlags::HERB_QUEST_ACCEPTED =>
                        {
                            println!("A wanderer passes by.");
                            println!("'I lost my healing herb in the meadow... could you find it?'");
                        }
                        runtime::SessionEvent::QuestAdvanced { flags }
                            if *flags == QuestFlags::HERB_QUEST_DONE =>
                        {
                            println!("'You found it! Thank you!'");
                        }
                        other => {
                            for line in
                                render::session_events(&self.session, std::slice::from_ref(other))
                            {
                                println!("{line}");
                            }
                        }
                    }
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    fn quests(&self) {
        use game_core::QuestFlags;
        let flags = self.session.player().quest_flags;
        if flags.is_empty() {
            println!("No quests yet. Try talking to people.");
            return;
        }
        if flags.contains(QuestFlags::HERB_QUEST_DONE) {
            println!("[done] Find the wanderer's healing herb");
        } else if flags.contains(QuestFlags::HERB_QUEST_ACCEPTED) {
            println!("[open] Find the wanderer's healing herb in the meadow");
        }
        if flags.contains(QuestFlags::CAVE_UNSEALED) {
            println!("[done] Unseal the Mysterious Cave");
        }
        if flags.contains(QuestFlags::WARDEN_DEFEATED) {
            println!("[done] Defeat the Obsidian Warden");
        }
    }

    fn load(&mut self) {
        match GameSession::restore_random(&self.repository) {
            Ok(Some(session)) => {
                self.session = session;
                println!("Game loaded.");
                println!("{}", render::room(&self.session));
            }
            Ok(None) => println!("There is no saved game."),
            Err(err) if err.is_corrupt_save() => {
                warn!(%err, "ignoring corrupt save");
                println!("The saved game is corrupt and cannot be loaded.");
            }
            Err(err) => println!("Could not load: {err}"),
        }
    }

    fn enemy_name(&self) -> String {
        self.session
            .current_room()
            .enemy
            .as_ref()
            .map(|enemy| enemy.entity.name.clone())
            .unwrap_or_else(|| "creature".to_string())
    }
}
