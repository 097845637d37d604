mod character;
mod combat;
mod constants;
mod data;
mod error;
mod items;
mod quests;
mod session;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use character::manager::CharacterManager;
use character::record::Character;
use combat::engine::{Battle, BattleState, PlayerAction};
use error::GameError;
use items::inventory;
use items::types::{ItemCatalog, ItemKind};
use quests::ledger;
use quests::types::QuestCatalog;
use session::GameSession;
use ui::{
    BattleScreen, CharacterCreationScreen, CharacterSelectScreen, GameMenuScreen,
    InventoryScreen, MenuEntry, QuestScreen, QuestTab, ShopScreen,
};

enum Screen {
    CharacterSelect,
    CharacterCreation,
    GameMenu,
    Quests,
    Inventory,
    Shop,
    Battle,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("chronicles {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Chronicles - Terminal-Based RPG\n");
                println!("Usage: chronicles [command]\n");
                println!("Commands:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'chronicles --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();

    let manager = CharacterManager::new()?;

    // Catalogs are loaded once at startup; starter files are written on
    // first launch.
    let data_dir = data_directory()?;
    data::loader::create_default_data_files(&data_dir)?;
    let quest_catalog = data::loader::load_quests(&data_dir.join("quests.txt"))?;
    let item_catalog = data::loader::load_items(&data_dir.join("items.txt"))?;

    let characters = manager.list()?;
    let mut current_screen = if characters.is_empty() {
        Screen::CharacterCreation
    } else {
        Screen::CharacterSelect
    };

    let mut creation_screen = CharacterCreationScreen::new();
    let mut select_screen = CharacterSelectScreen::new();
    let mut menu_screen = GameMenuScreen::new();
    let mut quest_screen = QuestScreen::new();
    let mut inventory_screen = InventoryScreen::new();
    let mut shop_screen = ShopScreen::new();
    let mut battle_screen = BattleScreen::new();

    let mut game_session: Option<GameSession> = None;
    let mut battle: Option<Battle> = None;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(
        &mut terminal,
        &manager,
        &quest_catalog,
        &item_catalog,
        &mut current_screen,
        &mut creation_screen,
        &mut select_screen,
        &mut menu_screen,
        &mut quest_screen,
        &mut inventory_screen,
        &mut shop_screen,
        &mut battle_screen,
        &mut game_session,
        &mut battle,
    );

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

#[allow(clippy::too_many_arguments)]
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    manager: &CharacterManager,
    quest_catalog: &QuestCatalog,
    item_catalog: &ItemCatalog,
    current_screen: &mut Screen,
    creation_screen: &mut CharacterCreationScreen,
    select_screen: &mut CharacterSelectScreen,
    menu_screen: &mut GameMenuScreen,
    quest_screen: &mut QuestScreen,
    inventory_screen: &mut InventoryScreen,
    shop_screen: &mut ShopScreen,
    battle_screen: &mut BattleScreen,
    game_session: &mut Option<GameSession>,
    battle: &mut Option<Battle>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match current_screen {
            Screen::CharacterCreation => {
                terminal.draw(|f| {
                    let area = f.size();
                    creation_screen.draw(f, area);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char(c) => creation_screen.handle_char_input(c),
                            KeyCode::Backspace => creation_screen.handle_backspace(),
                            KeyCode::Left | KeyCode::Up => creation_screen.previous_class(),
                            KeyCode::Right | KeyCode::Down => creation_screen.next_class(),
                            KeyCode::Enter => {
                                let name = creation_screen.name_input.trim().to_string();
                                match character::manager::validate_name(&name) {
                                    Ok(()) => {
                                        let new_character = Character::new(
                                            name,
                                            creation_screen.selected_class(),
                                            Utc::now().timestamp(),
                                        );
                                        if let Err(e) = manager.save(&new_character) {
                                            creation_screen.validation_error =
                                                Some(format!("Save failed: {}", e));
                                        } else {
                                            *creation_screen = CharacterCreationScreen::new();
                                            *select_screen = CharacterSelectScreen::new();
                                            *current_screen = Screen::CharacterSelect;
                                        }
                                    }
                                    Err(e) => {
                                        creation_screen.validation_error = Some(e.to_string());
                                    }
                                }
                            }
                            KeyCode::Esc => {
                                let existing = manager.list()?;
                                if !existing.is_empty() {
                                    *creation_screen = CharacterCreationScreen::new();
                                    *current_screen = Screen::CharacterSelect;
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::CharacterSelect => {
                let characters = manager.list()?;
                if characters.is_empty() {
                    *current_screen = Screen::CharacterCreation;
                    continue;
                }
                if select_screen.selected_index >= characters.len() {
                    select_screen.selected_index = characters.len() - 1;
                }

                terminal.draw(|f| {
                    let area = f.size();
                    select_screen.draw(f, area, &characters);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => {
                                select_screen.selected_index =
                                    select_screen.selected_index.saturating_sub(1);
                            }
                            KeyCode::Down => {
                                if select_screen.selected_index + 1 < characters.len() {
                                    select_screen.selected_index += 1;
                                }
                            }
                            KeyCode::Enter => {
                                let selected = &characters[select_screen.selected_index];
                                if !selected.is_corrupted {
                                    match manager.load_file(&selected.filename) {
                                        Ok(loaded) => {
                                            *game_session = Some(GameSession::new(
                                                loaded,
                                                quest_catalog.clone(),
                                                item_catalog.clone(),
                                            ));
                                            *menu_screen = GameMenuScreen::new();
                                            *current_screen = Screen::GameMenu;
                                        }
                                        Err(e) => {
                                            warn!(error = %e, "failed to load character");
                                        }
                                    }
                                }
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') => {
                                *creation_screen = CharacterCreationScreen::new();
                                *current_screen = Screen::CharacterCreation;
                            }
                            KeyCode::Char('d') | KeyCode::Char('D') => {
                                let selected = &characters[select_screen.selected_index];
                                if let Err(e) = manager.delete(&selected.filename) {
                                    warn!(error = %e, "failed to delete character");
                                }
                                select_screen.selected_index = 0;
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') => {
                                return Ok(());
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::GameMenu => {
                let Some(session) = game_session.as_mut() else {
                    *current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    menu_screen.draw(f, area, session);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => menu_screen.move_up(),
                            KeyCode::Down => menu_screen.move_down(),
                            KeyCode::Enter => {
                                menu_screen.message = None;
                                match menu_screen.selected() {
                                    MenuEntry::Quests => {
                                        *quest_screen = QuestScreen::new();
                                        *current_screen = Screen::Quests;
                                    }
                                    MenuEntry::Inventory => {
                                        *inventory_screen = InventoryScreen::new();
                                        *current_screen = Screen::Inventory;
                                    }
                                    MenuEntry::Shop => {
                                        *shop_screen = ShopScreen::new();
                                        *current_screen = Screen::Shop;
                                    }
                                    MenuEntry::Explore => match session.start_encounter() {
                                        Ok(new_battle) => {
                                            *battle_screen = BattleScreen::new();
                                            battle_screen.push_message(format!(
                                                "A {} appears!",
                                                new_battle.enemy().name
                                            ));
                                            *battle = Some(new_battle);
                                            *current_screen = Screen::Battle;
                                        }
                                        Err(e) => {
                                            menu_screen.message = Some(e.to_string());
                                        }
                                    },
                                    MenuEntry::SaveAndQuit => {
                                        persist(manager, session);
                                        *game_session = None;
                                        *current_screen = Screen::CharacterSelect;
                                    }
                                }
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                if session.character.is_dead() {
                                    match session.revive_for_gold() {
                                        Ok(()) => {
                                            persist(manager, session);
                                            menu_screen.message =
                                                Some("You feel life return.".to_string());
                                        }
                                        Err(e) => menu_screen.message = Some(e.to_string()),
                                    }
                                }
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                persist(manager, session);
                                *game_session = None;
                                *current_screen = Screen::CharacterSelect;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Quests => {
                let Some(session) = game_session.as_mut() else {
                    *current_screen = Screen::CharacterSelect;
                    continue;
                };
                quest_screen.clamp_selection(session);

                terminal.draw(|f| {
                    let area = f.size();
                    quest_screen.draw(f, area, session);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => quest_screen.move_up(),
                            KeyCode::Down => {
                                let len = quest_screen.visible_quests(session).len();
                                quest_screen.move_down(len);
                            }
                            KeyCode::Tab => {
                                quest_screen.next_tab();
                                quest_screen.message = None;
                            }
                            KeyCode::Enter => {
                                if let Some(quest_id) = quest_screen.selected_quest_id(session) {
                                    handle_quest_action(quest_screen, session, manager, &quest_id);
                                }
                            }
                            KeyCode::Char('x') | KeyCode::Char('X') => {
                                if quest_screen.tab == QuestTab::Active {
                                    if let Some(quest_id) =
                                        quest_screen.selected_quest_id(session)
                                    {
                                        match ledger::abandon_quest(
                                            &mut session.character,
                                            &quest_id,
                                        ) {
                                            Ok(()) => {
                                                persist(manager, session);
                                                quest_screen.message =
                                                    Some("Quest abandoned.".to_string());
                                            }
                                            Err(e) => {
                                                quest_screen.message = Some(e.to_string());
                                            }
                                        }
                                    }
                                }
                            }
                            KeyCode::Esc => {
                                quest_screen.message = None;
                                *current_screen = Screen::GameMenu;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Inventory => {
                let Some(session) = game_session.as_mut() else {
                    *current_screen = Screen::CharacterSelect;
                    continue;
                };
                inventory_screen.clamp_selection(session);

                terminal.draw(|f| {
                    let area = f.size();
                    inventory_screen.draw(f, area, session);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => inventory_screen.move_up(),
                            KeyCode::Down => {
                                inventory_screen.move_down(session.character.inventory.len());
                            }
                            KeyCode::Enter => {
                                if let Some(item_id) = inventory_screen.selected_item_id(session)
                                {
                                    handle_item_action(inventory_screen, session, manager, &item_id);
                                }
                            }
                            KeyCode::Char('w') | KeyCode::Char('W') => {
                                match inventory::unequip_weapon(
                                    &mut session.character,
                                    &session.items,
                                ) {
                                    Ok(Some(_)) => {
                                        persist(manager, session);
                                        inventory_screen.message =
                                            Some("Weapon unequipped.".to_string());
                                    }
                                    Ok(None) => {}
                                    Err(e) => inventory_screen.message = Some(e.to_string()),
                                }
                            }
                            KeyCode::Char('a') | KeyCode::Char('A') => {
                                match inventory::unequip_armor(
                                    &mut session.character,
                                    &session.items,
                                ) {
                                    Ok(Some(_)) => {
                                        persist(manager, session);
                                        inventory_screen.message =
                                            Some("Armor unequipped.".to_string());
                                    }
                                    Ok(None) => {}
                                    Err(e) => inventory_screen.message = Some(e.to_string()),
                                }
                            }
                            KeyCode::Char('s') | KeyCode::Char('S') => {
                                if let Some(item_id) = inventory_screen.selected_item_id(session)
                                {
                                    match inventory::sell_item(
                                        &mut session.character,
                                        &item_id,
                                        &session.items,
                                    ) {
                                        Ok(price) => {
                                            persist(manager, session);
                                            inventory_screen.message =
                                                Some(format!("Sold for {} gold.", price));
                                        }
                                        Err(e) => inventory_screen.message = Some(e.to_string()),
                                    }
                                }
                            }
                            KeyCode::Esc => {
                                inventory_screen.message = None;
                                *current_screen = Screen::GameMenu;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Shop => {
                let Some(session) = game_session.as_mut() else {
                    *current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    shop_screen.draw(f, area, session);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => shop_screen.move_up(),
                            KeyCode::Down => {
                                shop_screen.move_down(session.items.len());
                            }
                            KeyCode::Enter => {
                                if let Some(item_id) = shop_screen.selected_item_id(session) {
                                    match inventory::purchase_item(
                                        &mut session.character,
                                        &item_id,
                                        &session.items,
                                    ) {
                                        Ok(()) => {
                                            persist(manager, session);
                                            shop_screen.message =
                                                Some("Purchase complete.".to_string());
                                        }
                                        Err(e) => shop_screen.message = Some(e.to_string()),
                                    }
                                }
                            }
                            KeyCode::Esc => {
                                shop_screen.message = None;
                                *current_screen = Screen::GameMenu;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Battle => {
                let Some(session) = game_session.as_mut() else {
                    *current_screen = Screen::CharacterSelect;
                    continue;
                };
                let Some(active_battle) = battle.as_mut() else {
                    *current_screen = Screen::GameMenu;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    battle_screen.draw(f, area, session, active_battle);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        if active_battle.is_over() {
                            match key_event.code {
                                KeyCode::Enter => {
                                    *battle = None;
                                    *current_screen = Screen::GameMenu;
                                }
                                KeyCode::Char('r') | KeyCode::Char('R')
                                    if active_battle.state() == BattleState::EnemyWon =>
                                {
                                    match session.revive_for_gold() {
                                        Ok(()) => {
                                            persist(manager, session);
                                            *battle = None;
                                            menu_screen.message =
                                                Some("You feel life return.".to_string());
                                            *current_screen = Screen::GameMenu;
                                        }
                                        Err(e) => {
                                            battle_screen.push_message(e.to_string());
                                        }
                                    }
                                }
                                _ => {}
                            }
                        } else {
                            let action = match key_event.code {
                                KeyCode::Char('a') | KeyCode::Char('A') => {
                                    Some(PlayerAction::Attack)
                                }
                                KeyCode::Char('s') | KeyCode::Char('S') => {
                                    Some(PlayerAction::SpecialAbility)
                                }
                                KeyCode::Char('f') | KeyCode::Char('F') => {
                                    Some(PlayerAction::Flee)
                                }
                                _ => None,
                            };

                            if let Some(action) = action {
                                let mut rng = rand::thread_rng();
                                let enemy_name = active_battle.enemy().name.clone();
                                match active_battle.take_turn(
                                    &mut session.character,
                                    action,
                                    &mut rng,
                                ) {
                                    Ok(events) => {
                                        battle_screen.push_events(&events, &enemy_name);
                                        if active_battle.is_over() {
                                            settle_battle(
                                                battle_screen,
                                                session,
                                                active_battle,
                                                manager,
                                            );
                                        }
                                    }
                                    Err(e) => battle_screen.push_message(e.to_string()),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Accept on the Available tab, complete on the Active tab.
fn handle_quest_action(
    quest_screen: &mut QuestScreen,
    session: &mut GameSession,
    manager: &CharacterManager,
    quest_id: &str,
) {
    match quest_screen.tab {
        QuestTab::Available => {
            match ledger::accept_quest(&mut session.character, quest_id, &session.quests) {
                Ok(()) => {
                    persist(manager, session);
                    quest_screen.message = Some("Quest accepted.".to_string());
                }
                Err(e) => quest_screen.message = Some(e.to_string()),
            }
        }
        QuestTab::Active => {
            match ledger::complete_quest(&mut session.character, quest_id, &session.quests) {
                Ok(rewards) => {
                    persist(manager, session);
                    let mut message = format!(
                        "Quest complete! +{} XP, +{} gold.",
                        rewards.earned_xp, rewards.earned_gold
                    );
                    if rewards.levels_gained > 0 {
                        message.push_str(&format!(" Level up x{}!", rewards.levels_gained));
                    }
                    quest_screen.message = Some(message);
                }
                Err(e) => quest_screen.message = Some(e.to_string()),
            }
        }
        QuestTab::Completed => {}
    }
}

/// Consumables are used, weapons and armor are equipped.
fn handle_item_action(
    inventory_screen: &mut InventoryScreen,
    session: &mut GameSession,
    manager: &CharacterManager,
    item_id: &str,
) {
    let Some(kind) = session.items.get(item_id).map(|item| item.kind) else {
        inventory_screen.message = Some(format!("Unknown item: {}", item_id));
        return;
    };

    let outcome = match kind {
        ItemKind::Consumable => {
            inventory::use_item(&mut session.character, item_id, &session.items).map(|effect| {
                format!("Used. {:+} {}.", effect.amount, effect.stat.name())
            })
        }
        ItemKind::Weapon => {
            inventory::equip_weapon(&mut session.character, item_id, &session.items)
                .map(|()| "Weapon equipped.".to_string())
        }
        ItemKind::Armor => inventory::equip_armor(&mut session.character, item_id, &session.items)
            .map(|()| "Armor equipped.".to_string()),
    };

    match outcome {
        Ok(message) => {
            persist(manager, session);
            inventory_screen.message = Some(message);
        }
        Err(e) => inventory_screen.message = Some(e.to_string()),
    }
}

/// Applies rewards for a finished battle and narrates the outcome.
fn settle_battle(
    battle_screen: &mut BattleScreen,
    session: &mut GameSession,
    battle: &Battle,
    manager: &CharacterManager,
) {
    match session.finish_battle(battle) {
        Ok(Some(summary)) => {
            battle_screen.push_message(format!(
                "Victory! +{} XP, +{} gold.",
                summary.xp, summary.gold
            ));
            if summary.levels_gained > 0 {
                battle_screen.push_message(format!(
                    "You reached level {}!",
                    session.character.level
                ));
            }
        }
        Ok(None) => {}
        Err(e) => battle_screen.push_message(e.to_string()),
    }
    persist(manager, session);
}

fn persist(manager: &CharacterManager, session: &mut GameSession) {
    session.character.last_saved = Utc::now().timestamp();
    if let Err(e) = manager.save(&session.character) {
        warn!(error = %e, "auto-save failed");
    }
}

fn data_directory() -> Result<PathBuf, GameError> {
    let project_dirs = ProjectDirs::from("", "", "chronicles")
        .ok_or_else(|| GameError::Io("could not determine platform data directory".to_string()))?;
    Ok(project_dirs.data_dir().join("data"))
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging() {
    let Some(project_dirs) = ProjectDirs::from("", "", "chronicles") else {
        return;
    };
    let log_dir = project_dirs.data_dir().to_path_buf();
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(log_file) = fs::File::create(log_dir.join("chronicles.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
}
