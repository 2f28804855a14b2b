use ratatui::style::Color;

// Simulation space. All motion constants are per tick at the nominal
// 60 ticks per second.
pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 640.0;

pub const GRAVITY: f32 = 0.2;
pub const JUMP_IMPULSE: f32 = -7.0;

pub const PIPE_WIDTH: f32 = 75.0;
pub const PIPE_GAP: f32 = 250.0;
pub const PIPE_SPEED: f32 = 2.0;
pub const PIPE_SPAWN_INTERVAL: u32 = 150;
pub const MIN_PIPE_HEIGHT: f32 = 50.0;

pub const BIRD_X: f32 = 50.0;
pub const BIRD_WIDTH: f32 = 130.0;
pub const BIRD_HEIGHT: f32 = 90.0;
pub const HITBOX_INSET_X: f32 = 15.0;
pub const HITBOX_INSET_Y: f32 = 15.0;

pub const PIPE_COLOR: Option<Color> = Some(Color::LightGreen);
pub const PIPE_BODY: char = '|';
pub const PIPE_EDGE: char = '█';

pub const BIRD_TEXTS: [&str; 2] = [
    r#"
      ______
     /      \_
    |         \__
    |    ________)
     \   \____/
      \____/
"#,
    r#"


        O
             ===


"#,
];
pub const BIRD_COLORS: [Option<Color>; 2] = [Some(Color::Yellow), Some(Color::White)];
