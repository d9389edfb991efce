//! Unit tests for av-mobility.

#[cfg(test)]
mod helpers {
    use av_agent::{AgentSet, AgentSetBuilder};
    use av_core::{Cell, Direction, ScriptedRng};
    use av_grid::Occupant;

    /// Agents at `cells`, all facing `heading`.
    pub fn facing(species: Occupant, cells: &[Cell], heading: Direction) -> AgentSet {
        let mut set = AgentSetBuilder::new(species)
            .spawns(cells.iter().copied())
            .build(&mut ScriptedRng::new())
            .unwrap();
        set.directions.fill(heading);
        set
    }
}

#[cfg(test)]
mod rule {
    use av_core::{Direction, ScriptedRng};
    use crate::WanderRule;

    #[test]
    fn keeps_heading_without_resample() {
        let mut rng = ScriptedRng::new().with_units([0.5]);
        let d = WanderRule::Pedestrian.next_heading(Direction::West, 0.2, &mut rng);
        assert_eq!(d, Direction::West);
    }

    #[test]
    fn pedestrian_may_reverse() {
        // Resample fires, index 1 is South.
        let mut rng = ScriptedRng::new().with_units([0.0]).with_indices([1]);
        let d = WanderRule::Pedestrian.next_heading(Direction::North, 0.2, &mut rng);
        assert_eq!(d, Direction::South);
    }

    #[test]
    fn debris_refuses_exact_reversal() {
        let mut rng = ScriptedRng::new().with_units([0.0]).with_indices([1]);
        let d = WanderRule::Debris.next_heading(Direction::North, 0.2, &mut rng);
        assert_eq!(d, Direction::North);
    }

    #[test]
    fn debris_accepts_perpendicular() {
        // Index 3 is East.
        let mut rng = ScriptedRng::new().with_units([0.0]).with_indices([3]);
        let d = WanderRule::Debris.next_heading(Direction::North, 0.2, &mut rng);
        assert_eq!(d, Direction::East);
    }
}

#[cfg(test)]
mod mover {
    use av_core::{Cell, Direction, RandomSource, ScriptedRng, SimConfig, SimRng};
    use av_agent::AgentSetBuilder;
    use av_grid::{CellKind, Grid, Occupant, Scenario};

    use super::helpers::facing;
    use crate::{MobilityError, MoveReport, Mover};

    fn still() -> Mover {
        Mover::new(0.0).unwrap()
    }

    #[test]
    fn rejects_bad_probability() {
        assert!(matches!(Mover::new(1.2), Err(MobilityError::BadProbability(_))));
    }

    #[test]
    fn earlier_agent_blocked_by_peer() {
        let mut grid = Grid::new(1, 3);
        let mut set = facing(Occupant::Pedestrian, &[Cell::new(0, 0), Cell::new(0, 1)], Direction::East);
        let report = still().step(&mut set, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        assert_eq!(set.positions, vec![Cell::new(0, 0), Cell::new(0, 2)]);
        assert_eq!(report, MoveReport { moved: 1, stayed: 1 });
        grid.check_occupancy(Occupant::Pedestrian, &set.positions).unwrap();
    }

    #[test]
    fn follower_waits_behind_leader_for_one_tick() {
        let mut grid = Grid::new(1, 3);
        let mut set = facing(Occupant::Pedestrian, &[Cell::new(0, 1), Cell::new(0, 0)], Direction::East);
        let report = still().step(&mut set, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        assert_eq!(set.positions, vec![Cell::new(0, 2), Cell::new(0, 0)]);
        assert_eq!(report, MoveReport { moved: 1, stayed: 1 });
        assert_eq!(grid.count(CellKind::Pedestrian), 2);
        assert_eq!(grid.cell_at(Cell::new(0, 1)), Some(CellKind::Empty));
    }

    #[test]
    fn never_steps_onto_vehicle() {
        let mut grid = Grid::new(1, 3);
        let car = Cell::new(0, 1);
        let mut set = facing(Occupant::Debris, &[Cell::new(0, 0)], Direction::East);
        still().step(&mut set, &mut grid, &[car], &mut ScriptedRng::new()).unwrap();
        assert_eq!(set.positions, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn stays_out_of_buildings_goals_and_edges() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell_type(Cell::new(0, 1), CellKind::Building).unwrap();
        grid.set_cell_type(Cell::new(1, 0), CellKind::Goal).unwrap();
        let mut set = facing(Occupant::Pedestrian, &[Cell::new(0, 0)], Direction::East);
        let m = still();
        m.step(&mut set, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        set.directions[0] = Direction::South;
        m.step(&mut set, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        set.directions[0] = Direction::North;
        m.step(&mut set, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        assert_eq!(set.positions, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn species_do_not_walk_into_each_other() {
        let mut grid = Grid::new(1, 2);
        let mut peds = facing(Occupant::Pedestrian, &[Cell::new(0, 0)], Direction::East);
        let mut debris = facing(Occupant::Debris, &[Cell::new(0, 1)], Direction::West);
        grid.resync(Occupant::Debris, &debris.positions).unwrap();
        let m = still();
        m.step(&mut peds, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        m.step(&mut debris, &mut grid, &[], &mut ScriptedRng::new()).unwrap();
        assert_eq!(peds.positions, vec![Cell::new(0, 0)]);
        assert_eq!(debris.positions, vec![Cell::new(0, 1)]);
    }

    #[test]
    fn random_walk_keeps_invariants() {
        let cfg = SimConfig::default();
        for seed in 0..20 {
            let scenario = Scenario::generate(&cfg, seed).unwrap();
            let mut grid = scenario.build_grid().unwrap();
            let mut rng = SimRng::new(seed);
            let mut peds = AgentSetBuilder::new(Occupant::Pedestrian)
                .spawns(scenario.pedestrians.iter().copied())
                .build(&mut rng)
                .unwrap();
            let mut debris = AgentSetBuilder::new(Occupant::Debris)
                .spawns(scenario.debris.iter().copied())
                .build(&mut rng)
                .unwrap();
            grid.resync(Occupant::Pedestrian, &peds.positions).unwrap();
            grid.resync(Occupant::Debris, &debris.positions).unwrap();

            let mover = Mover::new(cfg.resample_probability).unwrap();
            let car = [scenario.start];
            for _ in 0..100 {
                mover.step(&mut peds, &mut grid, &car, &mut rng).unwrap();
                mover.step(&mut debris, &mut grid, &car, &mut rng).unwrap();

                grid.check_occupancy(Occupant::Pedestrian, &peds.positions).unwrap();
                grid.check_occupancy(Occupant::Debris, &debris.positions).unwrap();
                assert!(!peds.occupies(scenario.start));
                assert!(!debris.occupies(scenario.start));
                assert!(peds.positions.iter().all(|p| !debris.occupies(*p)));
            }
        }
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let run = || {
            let mut grid = Grid::new(8, 8);
            let mut rng = SimRng::new(11);
            let mut set = AgentSetBuilder::new(Occupant::Pedestrian)
                .spawns([Cell::new(1, 1), Cell::new(4, 4), Cell::new(6, 2)])
                .build(&mut rng)
                .unwrap();
            let m = Mover::default();
            for _ in 0..30 {
                m.step(&mut set, &mut grid, &[], &mut rng).unwrap();
            }
            (set.positions, rng.below(1000))
        };
        assert_eq!(run(), run());
    }
}
