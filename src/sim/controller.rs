//! Tank controllers
//!
//! Each tank is driven by a `Controller` that turns the tick's input (or its
//! own state) into an `Action`. The tank itself does not know which kind of
//! controller it has.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Direction;
use super::tick::TickInput;
use crate::config::GameConfig;

/// What a tank wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Action {
    /// At most one axis-aligned move per tick
    pub movement: Option<Direction>,
    pub fire: bool,
}

/// Wandering AI: random heading, random trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiState {
    pub direction: Direction,
    /// Ticks since the last re-roll
    pub timer: u32,
}

impl AiState {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            direction: random_direction(rng),
            timer: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controller {
    /// Reads the player's control snapshot
    Human,
    Ai(AiState),
}

impl Controller {
    pub fn ai(rng: &mut Pcg32) -> Self {
        Controller::Ai(AiState::new(rng))
    }

    /// Decide this tick's action
    pub fn decide(&mut self, input: &TickInput, rng: &mut Pcg32, config: &GameConfig) -> Action {
        match self {
            Controller::Human => Action {
                movement: input.direction(),
                fire: input.shoot,
            },
            Controller::Ai(ai) => {
                ai.timer += 1;
                if ai.timer >= config.ai_direction_interval {
                    ai.direction = random_direction(rng);
                    ai.timer = 0;
                    log::trace!("AI re-rolled heading to {:?}", ai.direction);
                }
                Action {
                    movement: Some(ai.direction),
                    fire: rng.random::<f64>() < config.ai_fire_chance,
                }
            }
        }
    }
}

fn random_direction(rng: &mut Pcg32) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_human_follows_input_priority() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = GameConfig::default();
        let mut human = Controller::Human;

        let input = TickInput {
            down: true,
            left: true,
            shoot: true,
            ..Default::default()
        };
        let action = human.decide(&input, &mut rng, &config);
        assert_eq!(action.movement, Some(Direction::Down));
        assert!(action.fire);

        let idle = human.decide(&TickInput::default(), &mut rng, &config);
        assert_eq!(idle, Action::default());
    }

    #[test]
    fn test_ai_keeps_heading_until_interval() {
        let mut rng = Pcg32::seed_from_u64(42);
        let config = GameConfig {
            ai_fire_chance: 0.0,
            ..Default::default()
        };
        let mut ai = Controller::ai(&mut rng);
        let Controller::Ai(AiState { direction, .. }) = ai.clone() else {
            unreachable!()
        };

        for _ in 0..119 {
            let action = ai.decide(&TickInput::default(), &mut rng, &config);
            assert_eq!(action.movement, Some(direction));
            assert!(!action.fire);
        }

        // The 120th tick re-rolls and resets the timer
        ai.decide(&TickInput::default(), &mut rng, &config);
        let Controller::Ai(state) = &ai else {
            unreachable!()
        };
        assert_eq!(state.timer, 0);
    }

    #[test]
    fn test_ai_ignores_player_input() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = GameConfig {
            ai_fire_chance: 0.0,
            ..Default::default()
        };
        let mut ai = Controller::ai(&mut rng);
        let input = TickInput {
            up: true,
            shoot: true,
            ..Default::default()
        };
        let action = ai.decide(&input, &mut rng, &config);
        assert!(!action.fire);
        assert!(action.movement.is_some());
    }

    #[test]
    fn test_ai_always_fires_at_full_chance() {
        let mut rng = Pcg32::seed_from_u64(9);
        let config = GameConfig {
            ai_fire_chance: 1.0,
            ..Default::default()
        };
        let mut ai = Controller::ai(&mut rng);
        for _ in 0..10 {
            assert!(ai.decide(&TickInput::default(), &mut rng, &config).fire);
        }
    }
}
