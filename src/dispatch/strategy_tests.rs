/*
 * Unit tests for the decision strategies
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 * Strategies only see snapshots, so no elevators are started here.
 *
 * Tests:
 * - test_baseline_building_example
 * - test_baseline_prefers_default_over_waiting
 * - test_baseline_falls_back_to_waiting
 * - test_improved_building_example
 * - test_improved_nearest_idle_tie_goes_to_lowest_id
 * - test_no_fit_returns_none
 * - test_moving_elevator_past_floor_is_not_chosen
 * - test_strategy_from_str
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod strategy_tests {
    use crate::dispatch::DecisionStrategy::{self, Baseline, Improved};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::ElevatorSnapshot;
    use crate::shared::ElevatorStatus::{self, DoorsOpened, MovingDown, MovingUp, Waiting, WaitingDefault};

    fn snapshot(id: usize, current_floor: u32, status: ElevatorStatus) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id,
            current_floor,
            status,
            remaining_destinations: Vec::new(),
        }
    }

    /// Elevators at floors [1 (WAITING_DEFAULT), 6 (MOVING_DOWN), 8 (MOVING_UP), 7 (WAITING)].
    fn building_example() -> Vec<ElevatorSnapshot> {
        vec![
            snapshot(1, 1, WaitingDefault),
            snapshot(2, 6, MovingDown),
            snapshot(3, 8, MovingUp),
            snapshot(4, 7, Waiting),
        ]
    }

    #[test]
    fn test_baseline_building_example() {
        // Arrange
        let snapshots = building_example();

        // Act & Assert
        assert_eq!(Baseline.choose_elevator(Up, 1, &snapshots), Some(1));
        assert_eq!(Baseline.choose_elevator(Down, 5, &snapshots), Some(2));
        assert_eq!(Baseline.choose_elevator(Up, 9, &snapshots), Some(3));
        assert_eq!(Baseline.choose_elevator(Down, 8, &snapshots), Some(1));
    }

    #[test]
    fn test_baseline_prefers_default_over_waiting() {
        // Arrange
        let snapshots = vec![snapshot(1, 4, Waiting), snapshot(2, 9, WaitingDefault)];

        // Act & Assert
        assert_eq!(Baseline.choose_elevator(Up, 3, &snapshots), Some(2));
    }

    #[test]
    fn test_baseline_falls_back_to_waiting() {
        // Arrange
        let snapshots = vec![snapshot(1, 4, MovingUp), snapshot(2, 9, Waiting)];

        // Act & Assert
        assert_eq!(Baseline.choose_elevator(Down, 3, &snapshots), Some(2));
    }

    #[test]
    fn test_improved_building_example() {
        // Arrange
        let snapshots = building_example();

        // Act & Assert
        assert_eq!(Improved.choose_elevator(Up, 1, &snapshots), Some(1));
        assert_eq!(Improved.choose_elevator(Down, 5, &snapshots), Some(2));
        assert_eq!(Improved.choose_elevator(Up, 9, &snapshots), Some(3));
        assert_eq!(Improved.choose_elevator(Down, 8, &snapshots), Some(4));
    }

    #[test]
    fn test_improved_nearest_idle_tie_goes_to_lowest_id() {
        // Arrange
        let snapshots = vec![
            snapshot(1, 9, MovingUp),
            snapshot(2, 3, Waiting),
            snapshot(3, 7, WaitingDefault),
            snapshot(4, 3, WaitingDefault),
        ];

        // Act
        let chosen = Improved.choose_elevator(Down, 5, &snapshots);

        // Assert
        assert_eq!(chosen, Some(2));
    }

    #[test]
    fn test_no_fit_returns_none() {
        // Arrange
        let snapshots = vec![
            snapshot(1, 3, MovingDown),
            snapshot(2, 8, MovingUp),
            snapshot(3, 5, DoorsOpened),
        ];

        // Act & Assert
        assert_eq!(Baseline.choose_elevator(Up, 5, &snapshots), None);
        assert_eq!(Improved.choose_elevator(Up, 5, &snapshots), None);
        assert_eq!(Improved.choose_elevator(Down, 5, &[]), None);
    }

    #[test]
    fn test_moving_elevator_past_floor_is_not_chosen() {
        // Arrange
        let snapshots = vec![snapshot(1, 6, MovingUp), snapshot(2, 2, MovingDown)];

        // Act & Assert
        assert_eq!(Improved.choose_elevator(Up, 6, &snapshots), None);
        assert_eq!(Improved.choose_elevator(Up, 7, &snapshots), Some(1));
        assert_eq!(Baseline.choose_elevator(Down, 1, &snapshots), Some(2));
        assert_eq!(Baseline.choose_elevator(Down, 3, &snapshots), None);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("baseline".parse::<DecisionStrategy>(), Ok(Baseline));
        assert_eq!("Improved".parse::<DecisionStrategy>(), Ok(Improved));
        assert!("fastest".parse::<DecisionStrategy>().is_err());
        assert_eq!(DecisionStrategy::default(), Improved);
    }
}
