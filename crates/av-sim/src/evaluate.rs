//! Greedy-policy evaluation over a batch of generated scenarios.

use av_behavior::Policy;
use av_core::{RewardConfig, SimConfig, SimRng};
use av_grid::{Pathfinder, Scenario};

use crate::{Episode, SimObserver, SimResult};

/// Result of one evaluation episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSummary {
    pub episode: u32,
    /// Seed the scenario was generated from.
    pub scenario_seed: u64,
    pub steps: u32,
    pub total_reward: f64,
    pub reached_target: bool,
    pub collision: bool,
    pub timed_out: bool,
}

/// Runs `episodes` independent episodes, each on its own generated scenario.
///
/// Episode `i` draws its scenario from `mix(config.seed, i)` and its
/// agent/substitution RNG from a second mix of that seed, so the batch is
/// reproducible and independent of execution order.  With the `parallel`
/// feature episodes run on Rayon's pool; the returned summaries are always
/// in episode order.
pub struct Evaluator<'a, P: Policy + ?Sized, F: Pathfinder + Clone> {
    pub config: SimConfig,
    pub rewards: RewardConfig,
    pub episodes: u32,
    policy: &'a P,
    pathfinder: F,
}

impl<'a, P: Policy + ?Sized, F: Pathfinder + Clone> Evaluator<'a, P, F> {
    pub fn new(config: SimConfig, rewards: RewardConfig, policy: &'a P, pathfinder: F) -> Self {
        Self { config, rewards, episodes: 10, policy, pathfinder }
    }

    pub fn episodes(mut self, n: u32) -> Self {
        self.episodes = n;
        self
    }

    /// Run the whole batch.
    pub fn run(&self) -> SimResult<Vec<EpisodeSummary>> {
        self.config.validate()?;

        #[cfg(not(feature = "parallel"))]
        let summaries = (0..self.episodes)
            .map(|i| self.run_one(i))
            .collect::<SimResult<Vec<_>>>()?;

        #[cfg(feature = "parallel")]
        let summaries = {
            use rayon::prelude::*;

            (0..self.episodes)
                .into_par_iter()
                .map(|i| self.run_one(i))
                .collect::<SimResult<Vec<_>>>()?
        };

        let reached = summaries.iter().filter(|s| s.reached_target).count();
        tracing::info!(episodes = summaries.len(), reached, "evaluation finished");
        Ok(summaries)
    }

    /// Run the batch, then report each summary to `observer` in episode order.
    pub fn run_observed<O: SimObserver>(&self, observer: &mut O) -> SimResult<Vec<EpisodeSummary>> {
        let summaries = self.run()?;
        for s in &summaries {
            observer.on_episode_end(s);
        }
        Ok(summaries)
    }

    fn run_one(&self, episode: u32) -> SimResult<EpisodeSummary> {
        let scenario_seed = SimRng::mixed_seed(self.config.seed, episode as u64);
        let scenario = Scenario::generate(&self.config, scenario_seed)?;
        let mut ep = Episode::new(
            scenario,
            self.config.clone(),
            self.rewards.clone(),
            self.pathfinder.clone(),
            SimRng::mixed_seed(scenario_seed, 1),
        )?;

        let mut last = None;
        while !ep.is_done() {
            last = Some(ep.step_with(self.policy)?.info);
        }
        let summary = EpisodeSummary {
            episode,
            scenario_seed,
            steps: ep.steps(),
            total_reward: ep.total_reward(),
            reached_target: last.is_some_and(|i| i.reached_target.is_some()),
            collision: last.is_some_and(|i| i.collision),
            timed_out: last.is_some_and(|i| i.timed_out),
        };
        tracing::debug!(
            episode,
            steps = summary.steps,
            total_reward = summary.total_reward,
            reached = summary.reached_target,
            "episode evaluated"
        );
        Ok(summary)
    }
}
