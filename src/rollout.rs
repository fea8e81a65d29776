//! Many independent episodes at once.
//!
//! Each episode gets its own `Game`, seeded `base_seed + index`, so results
//! do not depend on how rayon schedules the work.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::agent::Agent;
use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{EpisodeSummary, Game};

/// Runs `episodes` episodes in parallel; summaries come back in episode order.
///
/// `make_agent` receives the episode seed. A `None` base seed in the config
/// is treated as 0.
pub fn run_episodes<F, A>(config: &GameConfig, episodes: usize, make_agent: F) -> Result<Vec<EpisodeSummary>>
where
    F: Fn(u64) -> A + Sync,
    A: Agent,
{
    config.validate()?;
    let base_seed = config.seed.unwrap_or(0);

    let summaries = (0..episodes as u64)
        .into_par_iter()
        .map(|index| {
            let seed = base_seed.wrapping_add(index);
            let mut game = Game::with_seed(config.size, seed)?;
            let mut agent = make_agent(seed);
            let agent: &mut dyn Agent = &mut agent;
            Ok(game.play(Some(agent), config.max_steps))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(stats) = RolloutStats::from_summaries(&summaries) {
        info!(
            "rollout: {} episodes, mean score {:.2}, max {}",
            stats.episodes, stats.mean_score, stats.max_score
        );
    }
    Ok(summaries)
}

/// min / max / mean over a batch of episodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolloutStats {
    pub episodes: usize,
    pub min_score: u32,
    pub max_score: u32,
    pub mean_score: f32,
    pub mean_steps: f32,
    pub mean_reward: f32,
}

impl RolloutStats {
    /// `None` for an empty batch.
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Option<RolloutStats> {
        let first = summaries.first()?;
        let mut min_score = first.score;
        let mut max_score = first.score;
        let mut score_sum = 0u64;
        let mut steps_sum = 0usize;
        let mut reward_sum = 0.0f32;
        for s in summaries {
            min_score = min_score.min(s.score);
            max_score = max_score.max(s.score);
            score_sum += u64::from(s.score);
            steps_sum += s.steps;
            reward_sum += s.total_reward;
        }
        let n = summaries.len() as f32;
        Some(RolloutStats {
            episodes: summaries.len(),
            min_score,
            max_score,
            mean_score: score_sum as f32 / n,
            mean_steps: steps_sum as f32 / n,
            mean_reward: reward_sum / n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{GreedyAgent, RandomAgent, StraightAgent};
    use crate::game::Termination;

    fn config(seed: u64) -> GameConfig {
        GameConfig {
            size: 6,
            seed: Some(seed),
            max_steps: 200,
        }
    }

    #[test]
    fn episodes_come_back_in_order() {
        let summaries = run_episodes(&config(10), 8, |_| StraightAgent).unwrap();
        assert_eq!(summaries.len(), 8);
        for (i, s) in summaries.iter().enumerate() {
            assert_eq!(s.seed, Some(10 + i as u64));
            // going straight from (1,4) always ends in the right wall
            assert_eq!(s.termination, Some(Termination::Wall));
        }
    }

    #[test]
    fn rollouts_are_reproducible() {
        let a = run_episodes(&config(3), 6, RandomAgent::new).unwrap();
        let b = run_episodes(&config(3), 6, RandomAgent::new).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn greedy_rollout_respects_step_cap() {
        let summaries = run_episodes(&config(0), 4, |_| GreedyAgent).unwrap();
        for s in &summaries {
            assert!(s.steps <= 200);
            assert!(s.steps >= 1);
        }
    }

    #[test]
    fn invalid_config_fails() {
        let bad = GameConfig::new(2);
        assert!(run_episodes(&bad, 2, |_| StraightAgent).is_err());
    }

    #[test]
    fn stats_over_summaries() {
        let mk = |score, steps, total_reward| EpisodeSummary {
            seed: None,
            score,
            steps,
            total_reward,
            termination: None,
        };
        let stats = RolloutStats::from_summaries(&[mk(1, 10, 0.0), mk(3, 30, 20.0)]).unwrap();
        assert_eq!(stats.episodes, 2);
        assert_eq!(stats.min_score, 1);
        assert_eq!(stats.max_score, 3);
        assert_eq!(stats.mean_score, 2.0);
        assert_eq!(stats.mean_steps, 20.0);
        assert_eq!(stats.mean_reward, 10.0);
        assert!(RolloutStats::from_summaries(&[]).is_none());
    }
}
