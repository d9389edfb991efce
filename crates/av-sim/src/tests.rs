//! Integration tests for av-sim.

use std::sync::Arc;

use av_behavior::{Action, ConstantPolicy, GridOracle, Observation, QTable};
use av_core::{Cell, RewardConfig, SimConfig, Tick};
use av_grid::{AStar, Occupant, Scenario, ScenarioBuilder};

use crate::{Episode, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_road() -> Scenario {
    ScenarioBuilder::new(10, 10)
        .start(Cell::new(0, 0))
        .target(Cell::new(0, 9))
        .build()
        .unwrap()
}

/// 1×3 strip: vehicle, pedestrian, goal.  The pedestrian has nowhere to go.
fn blocked_strip() -> Scenario {
    ScenarioBuilder::new(1, 3)
        .start(Cell::new(0, 0))
        .target(Cell::new(0, 2))
        .pedestrian(Cell::new(0, 1))
        .build()
        .unwrap()
}

fn episode(scenario: Scenario, config: SimConfig) -> Episode<AStar> {
    Episode::new(scenario, config, RewardConfig::default(), AStar, 1).unwrap()
}

// ── Episode ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod episode_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn forward_along_open_road_scores_fourteen_and_a_half() {
        let mut ep = episode(open_road(), SimConfig::default());
        let mut last = None;
        for _ in 0..9 {
            last = Some(ep.step(Action::Forward).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(ep.vehicle().pos(), Cell::new(0, 9));
        assert!(last.done);
        assert_eq!(last.info.reached_target, Some(Cell::new(0, 9)));
        assert!(!last.info.timed_out);
        assert!((ep.total_reward() - 14.5).abs() < 1e-9);
    }

    #[test]
    fn run_with_constant_forward_policy() {
        let mut ep = episode(open_road(), SimConfig::default());
        let total = ep.run_with(&ConstantPolicy(Action::Forward)).unwrap();
        assert!((total - 14.5).abs() < 1e-9);
        assert_eq!(ep.steps(), 9);
    }

    #[test]
    fn forward_into_hazard_stays_and_costs_one() {
        let mut ep = episode(blocked_strip(), SimConfig::default());
        assert_eq!(ep.observation(), Observation::new(false, true, false));

        let out = ep.step(Action::Forward).unwrap();
        assert_eq!(ep.vehicle().pos(), Cell::new(0, 0));
        assert_eq!(out.reward, -1.0);
        assert!(!out.done);
        assert_eq!(ep.pedestrians().positions, vec![Cell::new(0, 1)]);
    }

    #[test]
    fn greedy_policy_on_blocked_code_keeps_failing_forward() {
        let mut table = QTable::uniform(Action::Wait);
        table.prefer(Observation::new(false, true, false).code(), Action::Forward);

        let mut ep = episode(blocked_strip(), SimConfig::default());
        for _ in 0..3 {
            let out = ep.step_with(&table).unwrap();
            assert_eq!(out.info.action, Action::Forward);
            assert_eq!(out.reward, -1.0);
        }
        assert_eq!(ep.vehicle().pos(), Cell::new(0, 0));
        // Failed forwards do not reset or advance the wait counter.
        assert_eq!(ep.wait_counter(), 0);
    }

    #[test]
    fn waits_count_up_then_get_replaced() {
        let mut ep = episode(blocked_strip(), SimConfig::default());
        for n in 1..=3 {
            let out = ep.step(Action::Wait).unwrap();
            assert_eq!(out.reward, -0.1);
            assert!(!out.info.substituted());
            assert_eq!(ep.wait_counter(), n);
        }

        let out = ep.step(Action::Wait).unwrap();
        assert!(out.info.substituted());
        assert_ne!(out.info.action, Action::Wait);
        // Forward is blocked, both lane changes leave the strip.
        assert!(out.reward == -1.0 || out.reward == 0.0);
        assert_eq!(ep.vehicle().pos(), Cell::new(0, 0));
    }

    #[test]
    fn timeout_is_added_to_the_last_step() {
        let config = SimConfig { max_steps: 3, ..SimConfig::default() };
        let mut ep = episode(blocked_strip(), config);
        ep.step(Action::Wait).unwrap();
        ep.step(Action::Wait).unwrap();
        let out = ep.step(Action::Wait).unwrap();
        assert!(out.done);
        assert!(out.info.timed_out);
        assert!((out.reward - (-5.1)).abs() < 1e-9);

        assert!(matches!(ep.step(Action::Wait), Err(SimError::EpisodeFinished { steps: 3 })));
    }

    #[test]
    fn reset_restores_start_state() {
        let mut ep = episode(open_road(), SimConfig::default());
        for _ in 0..4 {
            ep.step(Action::Forward).unwrap();
        }
        assert_eq!(ep.vehicle().pos(), Cell::new(0, 4));

        ep.reset().unwrap();
        assert_eq!(ep.vehicle().pos(), Cell::new(0, 0));
        assert_eq!(ep.steps(), 0);
        assert_eq!(ep.total_reward(), 0.0);
        assert!(!ep.is_done());
        assert_eq!(ep.grid().occupant_at(Cell::new(0, 0)), Some(Occupant::Vehicle));
        assert_eq!(ep.grid().occupant_at(Cell::new(0, 4)), None);
        assert_eq!(ep.vehicle().next_step(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn scenario_without_target_rejected() {
        let mut scenario = open_road();
        scenario.targets.clear();
        let result = Episode::new(scenario, SimConfig::default(), RewardConfig::default(), AStar, 0);
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn same_seed_same_trajectory() {
        let config = SimConfig { seed: 7, ..SimConfig::default() };
        let scenario = Scenario::generate(&config, config.seed).unwrap();
        let policy = QTable::uniform(Action::TurnLeft);

        let mut a = episode(scenario.clone(), config.clone());
        let mut b = episode(scenario, config);
        while !a.is_done() {
            let oa = a.step_with(&policy).unwrap();
            let ob = b.step_with(&policy).unwrap();
            assert_eq!(oa, ob);
            assert_eq!(a.pedestrians().positions, b.pedestrians().positions);
            assert_eq!(a.debris().positions, b.debris().positions);
        }
        assert!(b.is_done());
    }

    #[test]
    fn agents_never_share_cells_or_touch_the_vehicle() {
        for seed in 0..10 {
            let config = SimConfig { seed, ..SimConfig::default() };
            let scenario = Scenario::generate(&config, seed).unwrap();
            let mut ep = episode(scenario, config);
            let policy = QTable::uniform(Action::Forward);
            while !ep.is_done() {
                ep.step_with(&policy).unwrap();
                let pos = ep.vehicle().pos();
                let grid = ep.grid();
                grid.check_occupancy(Occupant::Pedestrian, &ep.pedestrians().positions).unwrap();
                grid.check_occupancy(Occupant::Debris, &ep.debris().positions).unwrap();
                assert!(!ep.pedestrians().occupies(pos));
                assert!(!ep.debris().occupies(pos));
            }
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use super::*;
    use crate::{Arrival, NoopObserver, SimObserver};
    use av_vehicle::{Mode, Vehicle};

    fn forward_policy() -> Arc<QTable> {
        Arc::new(QTable::uniform(Action::Forward))
    }

    fn short_road(target: Cell) -> Scenario {
        ScenarioBuilder::new(5, 5).start(Cell::new(0, 0)).target(target).build().unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        ticks: usize,
        arrivals: Vec<Arrival>,
        ended: Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_end(&mut self, _tick: Tick, _vehicles: &[Vehicle]) {
            self.ticks += 1;
        }

        fn on_arrival(&mut self, arrival: &Arrival) {
            self.arrivals.push(*arrival);
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }

    #[test]
    fn builds_hybrid_and_companion() {
        let sim = SimBuilder::new(
            SimConfig::default(),
            short_road(Cell::new(0, 4)),
            forward_policy(),
            GridOracle,
            AStar,
        )
        .build()
        .unwrap();
        assert_eq!(sim.vehicles.len(), 2);
        assert_eq!(sim.vehicles[0].mode(), Mode::Hybrid);
        assert_eq!(sim.vehicles[1].mode(), Mode::PathOnly);
        assert_eq!(sim.vehicles[0].path(), sim.vehicles[1].path());
        assert_eq!(sim.grid.occupant_at(Cell::new(0, 0)), Some(Occupant::Vehicle));
    }

    #[test]
    fn companion_can_be_disabled() {
        let sim = SimBuilder::new(
            SimConfig::default(),
            short_road(Cell::new(0, 4)),
            forward_policy(),
            GridOracle,
            AStar,
        )
        .companion(false)
        .build()
        .unwrap();
        assert_eq!(sim.vehicles.len(), 1);
        assert_eq!(sim.arrivals.len(), 1);
    }

    #[test]
    fn both_vehicles_arrive_on_open_road() {
        let mut sim = SimBuilder::new(
            SimConfig::default(),
            short_road(Cell::new(0, 4)),
            forward_policy(),
            GridOracle,
            AStar,
        )
        .build()
        .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(sim.all_arrived());
        assert_eq!(sim.arrivals, vec![Some(Tick(4)), Some(Tick(4))]);
        assert_eq!(sim.arrival_secs(), vec![Some(2.0), Some(2.0)]);
        assert_eq!(rec.arrivals.len(), 2);
        assert_eq!(rec.arrivals[0].mode, Mode::Hybrid);
        assert!(rec.arrivals.iter().all(|a| a.run == 0 && a.seed == sim.config.seed));
        assert_eq!(rec.ticks, 5);
        assert_eq!(rec.ended, Some(Tick(5)));
    }

    #[test]
    fn unreachable_target_stops_at_max_ticks() {
        let scenario = ScenarioBuilder::new(3, 3)
            .start(Cell::new(0, 0))
            .target(Cell::new(2, 2))
            .buildings([Cell::new(1, 2), Cell::new(2, 1)])
            .build()
            .unwrap();
        let mut sim =
            SimBuilder::new(SimConfig::default(), scenario, forward_policy(), GridOracle, AStar)
                .max_ticks(10)
                .build()
                .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert!(sim.arrivals.iter().all(Option::is_none));
        assert!(sim.vehicles.iter().all(|v| v.pos() == Cell::new(0, 0)));
    }

    #[test]
    fn pushed_destination_becomes_final_target() {
        let mut sim = SimBuilder::new(
            SimConfig::default(),
            short_road(Cell::new(0, 2)),
            forward_policy(),
            GridOracle,
            AStar,
        )
        .build()
        .unwrap();
        sim.push_destination(Cell::new(2, 2));
        assert_eq!(sim.final_target(), Cell::new(2, 2));

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.arrivals, vec![Some(Tick(5)), Some(Tick(5))]);
        assert!(sim.vehicles.iter().all(|v| v.pos() == Cell::new(2, 2)));
    }

    #[test]
    fn agents_keep_clear_of_vehicles_every_tick() {
        let config = SimConfig { seed: 3, ..SimConfig::default() };
        let scenario = Scenario::generate(&config, config.seed).unwrap();
        let mut sim = SimBuilder::new(config, scenario, forward_policy(), GridOracle, AStar)
            .build()
            .unwrap();
        for _ in 0..60 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            for v in &sim.vehicles {
                assert!(!sim.pedestrians.occupies(v.pos()));
                assert!(!sim.debris.occupies(v.pos()));
            }
            sim.grid.check_occupancy(Occupant::Pedestrian, &sim.pedestrians.positions).unwrap();
            sim.grid.check_occupancy(Occupant::Debris, &sim.debris.positions).unwrap();
        }
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod evaluate_tests {
    use super::*;
    use crate::{EpisodeSummary, Evaluator, SimObserver};

    struct Collect(Vec<u32>);

    impl SimObserver for Collect {
        fn on_episode_end(&mut self, summary: &EpisodeSummary) {
            self.0.push(summary.episode);
        }
    }

    #[test]
    fn every_episode_terminates() {
        let config = SimConfig { seed: 11, ..SimConfig::default() };
        let policy = QTable::uniform(Action::Forward);
        let summaries = Evaluator::new(config.clone(), RewardConfig::default(), &policy, AStar)
            .episodes(6)
            .run()
            .unwrap();

        assert_eq!(summaries.len(), 6);
        for (i, s) in summaries.iter().enumerate() {
            assert_eq!(s.episode, i as u32);
            assert!(s.reached_target || s.collision || s.timed_out);
            assert!(s.steps >= 1 && s.steps <= config.max_steps);
        }
    }

    #[test]
    fn batch_is_reproducible() {
        let config = SimConfig { seed: 5, ..SimConfig::default() };
        let policy = QTable::uniform(Action::TurnRight);
        let eval = Evaluator::new(config, RewardConfig::default(), &policy, AStar).episodes(4);
        assert_eq!(eval.run().unwrap(), eval.run().unwrap());
    }

    #[test]
    fn observer_sees_episodes_in_order() {
        let policy = QTable::uniform(Action::Forward);
        let mut seen = Collect(Vec::new());
        Evaluator::new(SimConfig::default(), RewardConfig::default(), &policy, AStar)
            .episodes(3)
            .run_observed(&mut seen)
            .unwrap();
        assert_eq!(seen.0, vec![0, 1, 2]);
    }
}
