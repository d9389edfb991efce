//! Unit tests for av-behavior.

#[cfg(test)]
mod action {
    use crate::{Action, Observation, ObservationCode};

    #[test]
    fn code_weights() {
        assert_eq!(Observation::new(true, false, false).code().get(), 4);
        assert_eq!(Observation::new(false, true, false).code().get(), 2);
        assert_eq!(Observation::new(false, false, true).code().get(), 1);
        assert_eq!(Observation::new(true, true, true).code().get(), 7);
        assert_eq!(Observation::CLEAR.code().get(), 0);
    }

    #[test]
    fn code_roundtrips_through_observation() {
        for code in ObservationCode::all() {
            assert_eq!(code.observation().code(), code);
        }
        assert_eq!(ObservationCode::all().count(), 8);
    }

    #[test]
    fn out_of_range_code_unrepresentable() {
        assert!(ObservationCode::new(7).is_some());
        assert!(ObservationCode::new(8).is_none());
    }

    #[test]
    fn action_indices() {
        assert_eq!(Action::Wait.index(), 0);
        assert_eq!(Action::TurnLeft.index(), 3);
        assert_eq!(Action::from_index(2), Some(Action::TurnRight));
        assert_eq!(Action::from_index(4), None);
        assert!(!Action::MOVING.contains(&Action::Wait));
    }

    #[test]
    fn display() {
        assert_eq!(Observation::new(false, true, false).to_string(), "(0, 1, 0)");
        assert_eq!(Action::TurnRight.to_string(), "Right");
    }
}

#[cfg(test)]
mod policy {
    use crate::{Action, BehaviorError, ConstantPolicy, ObservationCode, Policy, QTable};

    fn code(n: u8) -> ObservationCode {
        ObservationCode::new(n).unwrap()
    }

    #[test]
    fn argmax_picks_best() {
        let mut t = QTable::zeros();
        t.set(code(2), Action::Forward, 3.0);
        t.set(code(2), Action::TurnLeft, 1.0);
        assert_eq!(t.lookup(code(2)), Action::Forward);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let mut t = QTable::zeros();
        t.set(code(5), Action::TurnRight, 2.0);
        t.set(code(5), Action::TurnLeft, 2.0);
        assert_eq!(t.lookup(code(5)), Action::TurnRight);
        assert_eq!(t.lookup(code(0)), Action::Wait);
    }

    #[test]
    fn prefer_makes_action_strictly_best() {
        let mut t = QTable::uniform(Action::Wait);
        t.prefer(code(2), Action::Forward);
        assert_eq!(t.lookup(code(2)), Action::Forward);
        assert_eq!(t.lookup(code(3)), Action::Wait);
    }

    #[test]
    fn nan_rejected() {
        let mut values = [[0.0f32; 4]; 8];
        values[3][1] = f32::NAN;
        assert!(matches!(QTable::new(values), Err(BehaviorError::Table(_))));
    }

    #[test]
    fn constant_policy() {
        let p = ConstantPolicy(Action::TurnLeft);
        assert!(ObservationCode::all().all(|c| p.lookup(c) == Action::TurnLeft));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_qtable_reader, Action, BehaviorError, ObservationCode, Policy};

    const HEADER: &str = "code,wait,forward,turn_right,turn_left\n";

    fn table(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    #[test]
    fn loads_full_table() {
        let csv = table(&[
            "7,0,0,0,1",
            "0,0,1,0,0",
            "1,0,1,0,0",
            "2,0,0,1,0",
            "3,0,0,0,1",
            "4,0,1,0,0",
            "5,1,0,0,0",
            "6,0,0,1,0",
        ]);
        let t = load_qtable_reader(Cursor::new(csv)).unwrap();
        let look = |n| t.lookup(ObservationCode::new(n).unwrap());
        assert_eq!(look(0), Action::Forward);
        assert_eq!(look(2), Action::TurnRight);
        assert_eq!(look(5), Action::Wait);
        assert_eq!(look(7), Action::TurnLeft);
    }

    #[test]
    fn missing_code_rejected() {
        let csv = table(&["0,0,1,0,0", "1,0,1,0,0"]);
        assert!(matches!(load_qtable_reader(Cursor::new(csv)), Err(BehaviorError::Table(_))));
    }

    #[test]
    fn duplicate_code_rejected() {
        let csv = table(&["0,0,1,0,0", "0,0,1,0,0"]);
        assert!(matches!(load_qtable_reader(Cursor::new(csv)), Err(BehaviorError::Table(_))));
    }

    #[test]
    fn out_of_range_code_rejected() {
        let csv = table(&["9,0,1,0,0"]);
        assert!(matches!(load_qtable_reader(Cursor::new(csv)), Err(BehaviorError::Table(_))));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = table(&["0,zero,1,0,0"]);
        assert!(matches!(load_qtable_reader(Cursor::new(csv)), Err(BehaviorError::Parse(_))));
    }
}

#[cfg(test)]
mod oracle {
    use av_core::Cell;
    use av_grid::{Grid, Occupant};
    use crate::{GridOracle, HazardOracle};

    #[test]
    fn grid_oracle_sees_pedestrians_and_debris_only() {
        let mut g = Grid::new(2, 2);
        g.place(Cell::new(0, 0), Occupant::Pedestrian).unwrap();
        g.place(Cell::new(0, 1), Occupant::Debris).unwrap();
        g.place(Cell::new(1, 0), Occupant::Vehicle).unwrap();
        assert_eq!(GridOracle.detect(Cell::new(0, 0), &g), Some(1.0));
        assert_eq!(GridOracle.detect(Cell::new(0, 1), &g), Some(1.0));
        assert_eq!(GridOracle.detect(Cell::new(1, 0), &g), None);
        assert_eq!(GridOracle.detect(Cell::new(1, 1), &g), None);
        assert_eq!(GridOracle.detect(Cell::new(5, 5), &g), None);
    }
}
