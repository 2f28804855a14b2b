use std::{collections::HashMap, fmt::Debug, path::PathBuf};

use color_eyre::eyre::Result;
use config::ConfigError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{de::Deserializer, Deserialize};

use crate::{
    action::{act, Action, Command, GameAction, HomeAction},
    constants::game,
    pages::PageId,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Simulation tunables. Defaults mirror the reference behavior; every value
/// can be overridden from the `game:` section of the user config file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    pub spawn_interval: u32,
    pub min_pipe_height: f32,
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub hitbox_inset_x: f32,
    pub hitbox_inset_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: game::SCREEN_WIDTH,
            screen_height: game::SCREEN_HEIGHT,
            gravity: game::GRAVITY,
            jump_impulse: game::JUMP_IMPULSE,
            pipe_width: game::PIPE_WIDTH,
            pipe_gap: game::PIPE_GAP,
            pipe_speed: game::PIPE_SPEED,
            spawn_interval: game::PIPE_SPAWN_INTERVAL,
            min_pipe_height: game::MIN_PIPE_HEIGHT,
            bird_x: game::BIRD_X,
            bird_width: game::BIRD_WIDTH,
            bird_height: game::BIRD_HEIGHT,
            hitbox_inset_x: game::HITBOX_INSET_X,
            hitbox_inset_y: game::HITBOX_INSET_Y,
        }
    }
}

impl GameConfig {
    /// Largest top-segment height a spawn may draw.
    pub fn max_pipe_height(&self) -> f32 {
        self.screen_height - self.pipe_gap - self.min_pipe_height
    }

    /// Rejects degenerate constants at startup; the simulation never has to
    /// re-check them per tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipe_gap + 2.0 * self.min_pipe_height >= self.screen_height {
            return Err(ConfigError::Message(format!(
                "pipe_gap ({}) + 2 * min_pipe_height ({}) must stay below screen_height ({})",
                self.pipe_gap, self.min_pipe_height, self.screen_height
            )));
        }
        if self.pipe_speed <= 0.0 {
            return Err(ConfigError::Message(format!("pipe_speed must be positive, got {}", self.pipe_speed)));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::Message("spawn_interval must be at least 1 tick".into()));
        }
        if self.hitbox_inset_x * 2.0 >= self.bird_width || self.hitbox_inset_y * 2.0 >= self.bird_height {
            return Err(ConfigError::Message(
                "hitbox insets must leave a non-empty collision rectangle".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        let default_config: Config = serde_yaml::from_str(CONFIG).unwrap();
        let data_dir = crate::utils::get_data_dir();
        let config_dir = crate::utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_str().unwrap())?
            .set_default("_config_dir", config_dir.to_str().unwrap())?;

        let config_files = [("config.yaml", config::FileFormat::Yaml)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No user configuration file found, falling back to defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        for (scope, default_bindings) in default_config.keybindings.pages.iter() {
            let user_bindings = cfg.keybindings.pages.entry(scope.clone()).or_default();
            for (key, cmd) in default_bindings.0.iter() {
                user_bindings.0.entry(key.clone()).or_insert_with(|| cmd.clone());
            }
        }
        let user_bindings = &mut cfg.keybindings.global;
        for (key, cmd) in default_config.keybindings.global.0.iter() {
            user_bindings.0.entry(key.clone()).or_insert_with(|| cmd.clone());
        }
        cfg.game.validate()?;

        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct _RawPageKeyBindings {
    pub click: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct _RawKeyBindings {
    pub global: _RawPageKeyBindings,
    pub pages: HashMap<String, _RawPageKeyBindings>,
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub pages: HashMap<PageId, PageKeyBindings>,
}

fn parse_page_keybindings<'de, T>(raw_page_keybindings: &'de _RawPageKeyBindings) -> HashMap<KeyEvent, T>
where
    T: Deserialize<'de> + Clone + Debug,
{
    if let Some(inner_map) = &raw_page_keybindings.click {
        inner_map
            .iter()
            .map(|(key_str, action_str)| {
                let action: T = serde_yaml::from_str(action_str).unwrap();
                (parse_key_event(key_str).unwrap(), action)
            })
            .collect()
    } else {
        HashMap::new()
    }
}

macro_rules! parse_and_map_actions {
    ( $( ( $page_id_variant:path, $action_type:ty, $action_variant:path ) ),* ) => {
        fn match_page_keybindings(page: &str, raw_page_keybindings: _RawPageKeyBindings) -> (PageId, PageKeyBindings) {
            let page_id: PageId = serde_yaml::from_str(page).unwrap();
            let map = match page_id {
                $(
                    $page_id_variant => {
                        parse_page_keybindings::<$action_type>(&raw_page_keybindings)
                            .into_iter()
                            .map(|(event, command)| (event, act!($action_variant(command))))
                            .collect()
                    },
                )*
            };

            (page_id, PageKeyBindings(map))
        }
    };
}

parse_and_map_actions![(PageId::Home, HomeAction, Command::Home), (PageId::Game, GameAction, Command::Game)];

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_keybindings: _RawKeyBindings = _RawKeyBindings::deserialize(deserializer)?;

        let global_keybindings = PageKeyBindings(
            parse_page_keybindings::<Command>(&raw_keybindings.global)
                .into_iter()
                .map(|(event, command)| (event, act!(command)))
                .collect(),
        );
        let page_keybindings = raw_keybindings
            .pages
            .into_iter()
            .map(|(page, keybindings)| match_page_keybindings(&page, keybindings))
            .collect();

        Ok(KeyBindings { global: global_keybindings, pages: page_keybindings })
    }
}

fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    let raw = raw.trim_start_matches('<').trim_end_matches('>');
    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
            _ => return Err(format!("Unable to parse {raw}")),
        },
        c if c.len() == 1 => {
            let mut c = c.chars().next().unwrap();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Esc => "Esc",
        KeyCode::F(n) => {
            char = format!("F({n})");
            &char
        },
        KeyCode::Char(' ') => "Space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        },
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);
    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("ctrl");
    }
    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("shift");
    }
    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("alt");
    }

    let mut key = modifiers.join("-");
    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: Config = serde_yaml::from_str(CONFIG).unwrap();

        let space = parse_key_event("<space>").unwrap();
        let game_bindings = config.keybindings.pages.get(&PageId::Game).unwrap();
        assert_eq!(game_bindings.get(&space), Some(&act!(Command::Game(GameAction::Activate))));

        let enter = parse_key_event("<enter>").unwrap();
        let home_bindings = config.keybindings.pages.get(&PageId::Home).unwrap();
        assert_eq!(home_bindings.get(&enter), Some(&act!(Command::Home(HomeAction::Select))));
    }

    #[test]
    fn test_game_config_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_pipe_height(), 340.0);
    }

    #[test]
    fn test_game_config_rejects_degenerate_gap() {
        // 250 + 2 * 195 == 640: the sampling range collapses.
        let config = GameConfig { min_pipe_height: 195.0, ..GameConfig::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { pipe_gap: 640.0, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_game_config_rejects_bad_motion_constants() {
        let config = GameConfig { pipe_speed: 0.0, ..GameConfig::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { spawn_interval: 0, ..GameConfig::default() };
        assert!(config.validate().is_err());

        let config = GameConfig { hitbox_inset_x: 65.0, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));

        assert_eq!(parse_key_event("enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));

        assert_eq!(parse_key_event("esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("ctrl-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("alt-enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));

        assert_eq!(parse_key_event("shift-esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );

        assert_eq!(
            parse_key_event("ctrl-shift-enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_reverse_multiple_modifiers() {
        assert_eq!(
            key_event_to_string(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)),
            "ctrl-alt-a".to_string()
        );
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }
}
