mod game;
mod home;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::game::GameAction;
pub use crate::action::home::HomeAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize, Default)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Command {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Refresh,
    Error(String),
    ToggleShowHelp,
    StartGame,
    ShowTitle,
    // Page commands
    Home(HomeAction),
    Game(GameAction),
}

impl Command {
    /// Name shown in the help overlay; nested page commands show the inner
    /// action.
    pub fn string(&self) -> String {
        match self {
            Command::Home(action) => action.to_string(),
            Command::Game(action) => action.to_string(),
            command => command.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub command: Command,
    pub state: ActionState,
}

macro_rules! act {
    ( $command:expr ) => {
        $crate::action::Action { command: $command, state: $crate::action::ActionState::default() }
    };
    ( $command:expr, $state:expr ) => {
        $crate::action::Action { command: $command, state: $state }
    };
}

pub(crate) use act;
