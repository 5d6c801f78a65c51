/*
 * Unit tests for the elevator unit
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_elevator_initial_state
 * - test_elevator_rejects_default_floor_outside_building
 * - test_add_destination_out_of_range
 * - test_add_destination_sets_direction_when_idle
 * - test_destinations_sorted_ascending_while_moving_up
 * - test_destinations_sorted_descending_while_moving_down
 * - test_direction_lock_moving_up
 * - test_direction_lock_moving_down
 * - test_same_floor_while_idle_is_queued
 * - test_admit_respects_capacity
 * - test_admit_hands_back_rejected_passenger
 * - test_admit_queues_passenger_destination
 * - test_admit_refuses_passenger_locked_out_by_new_heading
 * - test_admit_refuses_passenger_whose_floor_cannot_be_queued
 * - test_snapshot_is_a_copy
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod elevator_tests {
    use crate::clock::SimClock;
    use crate::config::ElevatorConfig;
    use crate::elevator::Elevator;
    use crate::passenger::{Passenger, PassengerStatus};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::ElevatorStatus::{DoorsOpened, MovingDown, MovingUp, Waiting, WaitingDefault};
    use crate::shared::InvalidRequestError;

    fn setup_elevator(default_floor: u32, capacity: usize) -> Elevator {
        // Default configuration
        let config = ElevatorConfig {
            capacity,
            floor_time_ms: 1000,
            door_time_ms: 1000,
            idle_timeout_ms: 3000,
            default_floors: vec![default_floor],
        };
        Elevator::new(1, default_floor, 10, &config, SimClock::new(1)).unwrap()
    }

    #[test]
    fn test_elevator_initial_state() {
        // Arrange & Act
        let elevator = setup_elevator(3, 4);

        // Assert
        assert_eq!(elevator.id(), 1);
        assert_eq!(elevator.current_floor(), 3);
        assert_eq!(elevator.status(), WaitingDefault);
        assert!(elevator.remaining_destinations().is_empty());
        assert_eq!(elevator.passenger_count(), 0);
    }

    #[test]
    fn test_elevator_rejects_default_floor_outside_building() {
        // Arrange
        let config = ElevatorConfig {
            capacity: 4,
            floor_time_ms: 1000,
            door_time_ms: 1000,
            idle_timeout_ms: 3000,
            default_floors: vec![11],
        };

        // Act
        let too_high = Elevator::new(1, 11, 10, &config, SimClock::new(1));
        let zero = Elevator::new(1, 0, 10, &config, SimClock::new(1));

        // Assert
        assert!(too_high.is_err());
        assert!(zero.is_err());
    }

    #[test]
    fn test_add_destination_out_of_range() {
        // Arrange
        let elevator = setup_elevator(1, 4);

        // Act
        let below = elevator.add_destination(0);
        let above = elevator.add_destination(11);

        // Assert
        assert_eq!(
            below,
            Err(InvalidRequestError::FloorOutOfRange { floor: 0, n_floors: 10 })
        );
        assert!(above.is_err());
        assert!(elevator.remaining_destinations().is_empty());
        assert_eq!(elevator.status(), WaitingDefault);
    }

    #[test]
    fn test_add_destination_sets_direction_when_idle() {
        // Arrange
        let up = setup_elevator(3, 4);
        let down = setup_elevator(3, 4);

        // Act
        up.add_destination(7).unwrap();
        down.add_destination(2).unwrap();

        // Assert
        assert_eq!(up.status(), MovingUp);
        assert_eq!(down.status(), MovingDown);
    }

    #[test]
    fn test_destinations_sorted_ascending_while_moving_up() {
        // Arrange
        let elevator = setup_elevator(1, 4);

        // Act
        for floor in [8, 3, 5, 3, 10, 5] {
            assert!(elevator.add_destination(floor).unwrap());
        }

        // Assert
        assert_eq!(elevator.status(), MovingUp);
        assert_eq!(elevator.remaining_destinations(), vec![3, 5, 8, 10]);
    }

    #[test]
    fn test_destinations_sorted_descending_while_moving_down() {
        // Arrange
        let elevator = setup_elevator(10, 4);

        // Act
        for floor in [2, 7, 4, 9, 7] {
            elevator.add_destination(floor).unwrap();
        }

        // Assert
        assert_eq!(elevator.status(), MovingDown);
        assert_eq!(elevator.remaining_destinations(), vec![9, 7, 4, 2]);
    }

    #[test]
    fn test_direction_lock_moving_up() {
        // Arrange
        let elevator = setup_elevator(1, 4);
        elevator.add_destination(9).unwrap();
        elevator.test_set_state(5, MovingUp, Some(Up));

        // Act
        let below = elevator.add_destination(2).unwrap();
        let same = elevator.add_destination(5).unwrap();
        let above = elevator.add_destination(7).unwrap();

        // Assert
        assert!(!below);
        assert!(!same);
        assert!(above);
        assert_eq!(elevator.remaining_destinations(), vec![7, 9]);
    }

    #[test]
    fn test_direction_lock_moving_down() {
        // Arrange
        let elevator = setup_elevator(10, 4);
        elevator.add_destination(1).unwrap();
        elevator.test_set_state(6, MovingDown, Some(Down));

        // Act
        let above = elevator.add_destination(8).unwrap();
        let below = elevator.add_destination(3).unwrap();

        // Assert
        assert!(!above);
        assert!(below);
        assert_eq!(elevator.remaining_destinations(), vec![3, 1]);
    }

    #[test]
    fn test_same_floor_while_idle_is_queued() {
        // Arrange
        let elevator = setup_elevator(1, 4);
        elevator.test_set_state(4, Waiting, None);

        // Act
        let accepted = elevator.add_destination(4).unwrap();

        // Assert
        assert!(accepted);
        assert_eq!(elevator.status(), Waiting);
        assert_eq!(elevator.remaining_destinations(), vec![4]);
    }

    #[test]
    fn test_admit_respects_capacity() {
        // Arrange
        let elevator = setup_elevator(1, 2);
        let passengers: Vec<Passenger> = (1..=3)
            .map(|id| Passenger::new(id, 1, 5, 0).unwrap())
            .collect();

        // Act
        let results: Vec<bool> = passengers
            .into_iter()
            .map(|p| elevator.admit(p).is_ok())
            .collect();

        // Assert
        assert_eq!(results, vec![true, true, false]);
        assert_eq!(elevator.passenger_count(), 2);
    }

    #[test]
    fn test_admit_hands_back_rejected_passenger() {
        // Arrange
        let elevator = setup_elevator(1, 1);
        elevator.admit(Passenger::new(1, 1, 5, 0).unwrap()).unwrap();

        // Act
        let rejected = elevator.admit(Passenger::new(2, 1, 6, 0).unwrap());

        // Assert
        let passenger = rejected.unwrap_err();
        assert_eq!(passenger.id(), 2);
        assert_eq!(passenger.status(), PassengerStatus::WaitingForElevator);
        assert_eq!(passenger.boarded_at(), None);
    }

    #[test]
    fn test_admit_queues_passenger_destination() {
        // Arrange
        let elevator = setup_elevator(4, 4);

        // Act
        elevator.admit(Passenger::new(1, 4, 8, 0).unwrap()).unwrap();
        elevator.admit(Passenger::new(2, 4, 6, 0).unwrap()).unwrap();

        // Assert
        assert_eq!(elevator.status(), MovingUp);
        assert_eq!(elevator.remaining_destinations(), vec![6, 8]);
        assert!(elevator.accepts_direction(Up));
        assert!(!elevator.accepts_direction(Down));
    }

    #[test]
    fn test_admit_refuses_passenger_locked_out_by_new_heading() {
        // Arrange
        // Doors open after the last stop, then a dispatcher commit heads the car down
        let elevator = setup_elevator(1, 4);
        elevator.test_set_state(4, DoorsOpened, None);
        elevator.add_destination(2).unwrap();

        // Act
        let refused = elevator.admit(Passenger::new(1, 4, 8, 0).unwrap());

        // Assert
        let passenger = refused.unwrap_err();
        assert_eq!(passenger.id(), 1);
        assert_eq!(passenger.status(), PassengerStatus::WaitingForElevator);
        assert_eq!(elevator.passenger_count(), 0);
        assert_eq!(elevator.remaining_destinations(), vec![2]);
    }

    #[test]
    fn test_admit_refuses_passenger_whose_floor_cannot_be_queued() {
        // Arrange
        let elevator = setup_elevator(1, 4);
        elevator.test_set_state(7, DoorsOpened, Some(Up));

        // Act
        let refused = elevator.admit(Passenger::new(1, 4, 6, 0).unwrap());

        // Assert
        assert!(refused.is_err());
        assert_eq!(elevator.passenger_count(), 0);
        assert!(elevator.remaining_destinations().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        // Arrange
        let elevator = setup_elevator(2, 4);
        elevator.add_destination(6).unwrap();

        // Act
        let snapshot = elevator.snapshot();
        elevator.add_destination(9).unwrap();

        // Assert
        assert_eq!(snapshot.id, 1);
        assert_eq!(snapshot.current_floor, 2);
        assert_eq!(snapshot.status, MovingUp);
        assert_eq!(snapshot.remaining_destinations, vec![6]);
        assert_eq!(elevator.remaining_destinations(), vec![6, 9]);
    }
}
