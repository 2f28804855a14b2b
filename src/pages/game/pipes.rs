use rand::{rngs::StdRng, Rng};

use crate::config::GameConfig;

/// One pipe pair. `bottom_y - top_height` equals the configured gap at
/// creation and never changes afterwards; only x moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub top_height: f32,
    pub bottom_y: f32,
    pub scored: bool,
}

impl Pipe {
    pub fn right(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }
}

/// The obstacle field: spawn timer plus the pipe collection. Spawn order is
/// screen order left to right (constant spawn x, uniform speed), so the Vec
/// never needs re-sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipes {
    pipes: Vec<Pipe>,
    spawn_timer: u32,
    config: GameConfig,
}

impl Pipes {
    pub fn new(config: GameConfig) -> Self {
        // Timer starts full so the first Running tick spawns immediately.
        let spawn_timer = config.spawn_interval;
        Pipes { pipes: Vec::new(), spawn_timer, config }
    }

    pub fn as_slice(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn reset(&mut self) {
        self.pipes.clear();
        self.spawn_timer = self.config.spawn_interval;
    }

    /// One tick of the obstacle field: spawn when the timer fills, advance,
    /// score pipes whose right edge moved strictly past the hitbox's left
    /// edge, prune pipes fully off-screen. Returns the points earned.
    pub fn tick(&mut self, rng: &mut StdRng, hitbox_left: f32) -> u32 {
        self.spawn_timer += 1;
        if self.spawn_timer >= self.config.spawn_interval {
            self.spawn(rng);
            self.spawn_timer = 0;
        }

        let mut points = 0;
        for pipe in self.pipes.iter_mut() {
            pipe.x -= self.config.pipe_speed;
            if !pipe.scored && pipe.right(self.config.pipe_width) < hitbox_left {
                points += 1;
                pipe.scored = true;
            }
        }
        let pipe_width = self.config.pipe_width;
        self.pipes.retain(|pipe| pipe.right(pipe_width) >= 0.0);

        points
    }

    fn spawn(&mut self, rng: &mut StdRng) {
        let top_height = rng.gen_range(self.config.min_pipe_height..=self.config.max_pipe_height());
        self.pipes.push(Pipe {
            x: self.config.screen_width,
            top_height,
            bottom_y: top_height + self.config.pipe_gap,
            scored: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    use super::*;

    const HITBOX_LEFT: f32 = 65.0;

    fn pipes() -> (Pipes, StdRng) {
        (Pipes::new(GameConfig::default()), StdRng::seed_from_u64(42))
    }

    fn pipe_at(x: f32) -> Pipe {
        Pipe { x, top_height: 200.0, bottom_y: 450.0, scored: false }
    }

    #[test]
    fn test_first_tick_spawns_immediately() {
        let (mut pipes, mut rng) = pipes();
        assert!(pipes.is_empty());

        pipes.tick(&mut rng, HITBOX_LEFT);
        assert_eq!(pipes.len(), 1);
        // Spawned at the right screen edge, then advanced once.
        assert_eq!(pipes.as_slice()[0].x, 638.0);
    }

    #[test]
    fn test_spawn_geometry_invariants() {
        let config = GameConfig::default();
        let (mut pipes, mut rng) = pipes();

        // Enough ticks for several spawns, few enough that none get pruned.
        for _ in 0..(config.spawn_interval * 2 + 1) {
            pipes.tick(&mut rng, HITBOX_LEFT);
        }
        assert_eq!(pipes.len(), 3);

        for pipe in pipes.as_slice() {
            assert_eq!(pipe.bottom_y - pipe.top_height, config.pipe_gap);
            assert!(pipe.top_height >= config.min_pipe_height);
            assert!(pipe.top_height <= config.max_pipe_height());
        }
    }

    #[test]
    fn test_spawn_cadence() {
        let config = GameConfig::default();
        let (mut pipes, mut rng) = pipes();

        // Tick 1 spawns (preset timer); the next spawn lands exactly
        // spawn_interval ticks later.
        for _ in 0..config.spawn_interval {
            pipes.tick(&mut rng, HITBOX_LEFT);
        }
        assert_eq!(pipes.len(), 1);

        pipes.tick(&mut rng, HITBOX_LEFT);
        assert_eq!(pipes.len(), 2);
    }

    #[test]
    fn test_scores_once_when_strictly_past_hitbox() {
        let (mut pipes, mut rng) = pipes();
        pipes.spawn_timer = 0;
        // After one tick the right edge lands exactly on the hitbox's left
        // edge: no point yet (strict comparison).
        pipes.pipes.push(pipe_at(HITBOX_LEFT - 73.0));

        assert_eq!(pipes.tick(&mut rng, HITBOX_LEFT), 0);
        assert!(!pipes.as_slice()[0].scored);

        // One more tick moves it strictly past: exactly one point, once.
        assert_eq!(pipes.tick(&mut rng, HITBOX_LEFT), 1);
        assert!(pipes.as_slice()[0].scored);

        assert_eq!(pipes.tick(&mut rng, HITBOX_LEFT), 0);
    }

    #[test]
    fn test_prune_keeps_order_with_neighbors() {
        let (mut pipes, mut rng) = pipes();
        pipes.spawn_timer = 0;
        pipes.pipes.push(pipe_at(-80.0));
        pipes.pipes.push(pipe_at(-74.0));
        pipes.pipes.push(pipe_at(10.0));
        pipes.pipes.push(pipe_at(300.0));
        for pipe in pipes.pipes.iter_mut() {
            pipe.scored = true;
        }

        pipes.tick(&mut rng, HITBOX_LEFT);
        // -80 and -74 are fully off-screen after advancing; 10 and 300 stay,
        // in their original order.
        assert_eq!(pipes.len(), 2);
        assert_eq!(pipes.as_slice()[0].x, 8.0);
        assert_eq!(pipes.as_slice()[1].x, 298.0);
    }

    #[test]
    fn test_prune_boundary_is_exact() {
        let (mut pipes, mut rng) = pipes();
        pipes.spawn_timer = 0;
        // Advances to -75: right edge exactly at 0, still on screen.
        pipes.pipes.push(Pipe { scored: true, ..pipe_at(-73.0) });

        pipes.tick(&mut rng, HITBOX_LEFT);
        assert_eq!(pipes.len(), 1);

        // The next tick pushes the right edge below 0.
        pipes.tick(&mut rng, HITBOX_LEFT);
        assert!(pipes.is_empty());
    }

    #[test]
    fn test_seeded_streams_are_identical() {
        let (mut left, mut left_rng) = pipes();
        let (mut right, mut right_rng) = pipes();

        for _ in 0..500 {
            left.tick(&mut left_rng, HITBOX_LEFT);
            right.tick(&mut right_rng, HITBOX_LEFT);
        }
        assert_eq!(left, right);
    }

    #[test]
    fn test_reset_empties_and_rearms() {
        let config = GameConfig::default();
        let (mut pipes, mut rng) = pipes();
        for _ in 0..10 {
            pipes.tick(&mut rng, HITBOX_LEFT);
        }
        assert!(!pipes.is_empty());

        pipes.reset();
        assert!(pipes.is_empty());
        assert_eq!(pipes.spawn_timer, config.spawn_interval);

        // Re-armed: the next tick spawns again.
        pipes.tick(&mut rng, HITBOX_LEFT);
        assert_eq!(pipes.len(), 1);
    }
}
