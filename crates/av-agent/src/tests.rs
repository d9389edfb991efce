//! Unit tests for av-agent.

#[cfg(test)]
mod store {
    use av_core::{AgentId, Cell, Direction, ScriptedRng, SimRng};
    use av_grid::Occupant;
    use crate::{AgentError, AgentSet, AgentSetBuilder};

    #[test]
    fn vehicles_do_not_wander() {
        assert!(matches!(
            AgentSet::new(Occupant::Vehicle),
            Err(AgentError::NotWandering(Occupant::Vehicle))
        ));
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut rng = SimRng::new(1);
        let mut set = AgentSet::new(Occupant::Debris).unwrap();
        assert_eq!(set.spawn(Cell::new(0, 0), &mut rng).unwrap(), AgentId(0));
        assert_eq!(set.spawn(Cell::new(0, 1), &mut rng).unwrap(), AgentId(1));
        assert_eq!(set.agent_ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1)]);
        assert_eq!(set.position(AgentId(1)), Some(Cell::new(0, 1)));
        assert_eq!(set.position(AgentId(2)), None);
    }

    #[test]
    fn duplicate_spawn_refused() {
        let mut rng = SimRng::new(1);
        let err = AgentSetBuilder::new(Occupant::Pedestrian)
            .spawn(Cell::new(3, 3))
            .spawn(Cell::new(3, 3))
            .build(&mut rng)
            .unwrap_err();
        assert!(matches!(err, AgentError::DuplicateSpawn { .. }));
    }

    #[test]
    fn headings_come_from_the_rng() {
        let mut rng = ScriptedRng::new().with_indices([3, 0, 2]);
        let set = AgentSetBuilder::new(Occupant::Pedestrian)
            .spawns([Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)])
            .build(&mut rng)
            .unwrap();
        assert_eq!(set.directions, vec![Direction::East, Direction::North, Direction::West]);
    }

    #[test]
    fn reset_restores_spawns() {
        let mut rng = SimRng::new(5);
        let mut set = AgentSetBuilder::new(Occupant::Debris)
            .spawns([Cell::new(1, 1), Cell::new(4, 4)])
            .build(&mut rng)
            .unwrap();
        set.positions[0] = Cell::new(2, 1);
        set.positions[1] = Cell::new(4, 5);
        set.reset(&mut rng);
        assert_eq!(set.positions, vec![Cell::new(1, 1), Cell::new(4, 4)]);
        assert_eq!(set.directions.len(), 2);
        assert!(set.occupies(Cell::new(4, 4)));
    }

    #[test]
    fn clear_drops_everything() {
        let mut rng = SimRng::new(5);
        let mut set = AgentSetBuilder::new(Occupant::Debris)
            .spawn(Cell::new(1, 1))
            .build(&mut rng)
            .unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(set.spawns().is_empty());
    }
}
