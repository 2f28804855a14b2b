use serde::{Deserialize, Serialize};
use strum::Display;

/// The game knows a single external input: the activate signal. Its effect
/// depends on the current phase (start, flap, or restart). `Back` leaves the
/// game for the title screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum GameAction {
    Activate,
    Back,
}
