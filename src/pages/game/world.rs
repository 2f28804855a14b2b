use rand::{rngs::StdRng, SeedableRng};

use crate::config::GameConfig;

use super::{
    bird::Bird,
    collision,
    pipes::{Pipe, Pipes},
};

/// Which per-tick behaviors execute. Exactly one of these is ever true,
/// unlike a pair of started/running flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Over,
}

/// The whole simulation. Every piece of mutable game state lives here and is
/// reachable only through `tick` and `activate`; the renderer reads through
/// `&self` accessors.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    bird: Bird,
    pipes: Pipes,
    score: u32,
    phase: Phase,
    rng: StdRng,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Fixed seed: identical pipe sequences for tests and replays.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let bird = Bird::new(&config);
        let pipes = Pipes::new(config.clone());
        World { config, bird, pipes, score: 0, phase: Phase::NotStarted, rng }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        self.pipes.as_slice()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The single external input, covering click, key press and touch alike.
    /// Never queued or debounced; what it does depends solely on the current
    /// phase.
    pub fn activate(&mut self) {
        self.phase = match self.phase {
            Phase::NotStarted => {
                log::debug!("Starting first run");
                self.bird.flap(self.config.jump_impulse);
                Phase::Running
            },
            Phase::Running => {
                self.bird.flap(self.config.jump_impulse);
                Phase::Running
            },
            Phase::Over => {
                log::debug!("Restarting after game over");
                self.reset();
                self.bird.flap(self.config.jump_impulse);
                Phase::Running
            },
        };
    }

    /// One simulation step: physics, obstacles, then collision, all within
    /// this call. Outside Running the world is frozen.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.bird.advance(self.config.gravity);
        self.score += self.pipes.tick(&mut self.rng, self.bird.hitbox().left);

        let hitbox = self.bird.hitbox();
        if collision::collides(&hitbox, self.pipes.as_slice(), self.config.pipe_width, self.config.screen_height) {
            log::info!("Game over with score {}", self.score);
            self.phase = Phase::Over;
        }
    }

    /// Back to a fresh NotStarted world; used when the title screen hands
    /// over a new game. The RNG stream is kept.
    pub fn restart(&mut self) {
        self.reset();
        self.phase = Phase::NotStarted;
    }

    fn reset(&mut self) {
        self.bird = Bird::new(&self.config);
        self.pipes.reset();
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn world() -> World {
        World::seeded(GameConfig::default(), 42)
    }

    /// Drives a fresh Running world into the floor; with no flaps the bird
    /// free-falls past every pipe gap check long before the first pipe
    /// reaches it.
    fn run_until_over(world: &mut World) {
        for _ in 0..400 {
            world.tick();
            if world.phase() == Phase::Over {
                return;
            }
        }
        panic!("world never reached Over");
    }

    #[test]
    fn test_activate_starts_running_with_impulse() {
        let mut world = world();
        assert_eq!(world.phase(), Phase::NotStarted);

        world.activate();
        assert_eq!(world.phase(), Phase::Running);
        assert_eq!(world.bird().velocity(), -7.0);
    }

    #[test]
    fn test_tick_is_noop_outside_running() {
        let mut world = world();
        let y = world.bird().y();

        world.tick();
        assert_eq!(world.bird().y(), y);
        assert!(world.pipes().is_empty());
        assert_eq!(world.score(), 0);
    }

    #[test]
    fn test_activate_while_running_only_flaps() {
        let mut world = world();
        world.activate();
        for _ in 0..10 {
            world.tick();
        }
        let pipes_before = world.pipes().to_vec();
        world.score = 3;

        world.activate();
        assert_eq!(world.phase(), Phase::Running);
        assert_eq!(world.bird().velocity(), -7.0);
        assert_eq!(world.score(), 3);
        assert_eq!(world.pipes(), pipes_before.as_slice());
    }

    #[test]
    fn test_collision_freezes_world() {
        let mut world = world();
        world.phase = Phase::Running;
        run_until_over(&mut world);

        let y = world.bird().y();
        let pipes = world.pipes().to_vec();
        for _ in 0..10 {
            world.tick();
        }
        assert_eq!(world.phase(), Phase::Over);
        assert_eq!(world.bird().y(), y);
        assert_eq!(world.pipes(), pipes.as_slice());
    }

    #[test]
    fn test_activate_after_over_fully_resets() {
        let mut world = world();
        world.phase = Phase::Running;
        run_until_over(&mut world);
        world.score = 9;

        world.activate();
        assert_eq!(world.phase(), Phase::Running);
        assert_eq!(world.score(), 0);
        assert!(world.pipes().is_empty());
        assert_eq!(world.bird().y(), 275.0);
        assert_eq!(world.bird().velocity(), -7.0);

        // The preset spawn timer makes the first tick spawn immediately.
        world.tick();
        assert_eq!(world.pipes().len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut world = world();
        world.phase = Phase::Running;
        run_until_over(&mut world);

        world.reset();
        let bird = world.bird().clone();
        let pipes = world.pipes.clone();
        let score = world.score();

        world.reset();
        assert_eq!(world.bird(), &bird);
        assert_eq!(world.pipes, pipes);
        assert_eq!(world.score(), score);
    }

    #[test]
    fn test_seeded_worlds_stay_identical() {
        let mut left = world();
        let mut right = world();
        left.activate();
        right.activate();

        for _ in 0..300 {
            left.tick();
            right.tick();
        }
        assert_eq!(left.phase(), right.phase());
        assert_eq!(left.score(), right.score());
        assert_eq!(left.bird(), right.bird());
        assert_eq!(left.pipes(), right.pipes());
    }

    #[test]
    fn test_restart_returns_to_not_started() {
        let mut world = world();
        world.activate();
        for _ in 0..10 {
            world.tick();
        }

        world.restart();
        assert_eq!(world.phase(), Phase::NotStarted);
        assert_eq!(world.score(), 0);
        assert!(world.pipes().is_empty());
        assert_eq!(world.bird().velocity(), 0.0);
    }
}
