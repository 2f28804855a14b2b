pub mod game;

/// Outer size of the bordered playfield, in terminal cells.
pub const WIDTH: u16 = 82;
pub const HEIGHT: u16 = 42;

pub const TITLE_TEXT: &str = r#"
 ______ _
|  ____| |
| |__  | | __ _ _ __  _ __  _   _
|  __| | |/ _` | '_ \| '_ \| | | |
| |    | | (_| | |_) | |_) | |_| |
|_|    |_|\__,_| .__/| .__/ \__, |
               | |   | |     __/ |
               |_|   |_|    |___/
"#;
