use crate::config::GameConfig;

use super::collision::Hitbox;

/// The player-controlled actor. Only y and velocity ever change; x is fixed
/// for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: f32,
    y: f32,
    velocity: f32,
    width: f32,
    height: f32,
    inset_x: f32,
    inset_y: f32,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Bird {
            x: config.bird_x,
            y: (config.screen_height - config.bird_height) / 2.0,
            velocity: 0.0,
            width: config.bird_width,
            height: config.bird_height,
            inset_x: config.hitbox_inset_x,
            inset_y: config.hitbox_inset_y,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// One tick of vertical integration. Leaving through the top is clamped,
    /// not fatal; only the floor and the pipes end a run.
    pub fn advance(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;

        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    /// Instantaneous velocity set, not additive: flapping mid-fall always
    /// gives the same upward kick.
    pub fn flap(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// The inset rectangle all collision and scoring math uses.
    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            left: self.x + self.inset_x,
            top: self.y + self.inset_y,
            right: self.x + self.width - self.inset_x,
            bottom: self.y + self.height - self.inset_y,
        }
    }
}
