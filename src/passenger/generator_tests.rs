/*
 * Unit tests for the passenger generator
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_pick_floor_uses_cumulative_shares
 * - test_spread_source_share
 * - test_generated_passengers_are_valid
 * - test_generator_is_deterministic_with_seed
 * - test_single_floor_building_generates_nothing
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod generator_tests {
    use crate::config::PassengerConfig;
    use crate::passenger::generator::{pick_floor, spread_source_share};
    use crate::passenger::{Passenger, PassengerGenerator};

    fn config(per_minute: u32, floor_percentages: Vec<u32>) -> PassengerConfig {
        PassengerConfig {
            per_minute,
            floor_percentages,
        }
    }

    #[test]
    fn test_pick_floor_uses_cumulative_shares() {
        // Arrange
        let percentages = [50, 0, 30, 20];

        // Act & Assert
        assert_eq!(pick_floor(&percentages, 1), 1);
        assert_eq!(pick_floor(&percentages, 50), 1);
        assert_eq!(pick_floor(&percentages, 51), 3);
        assert_eq!(pick_floor(&percentages, 80), 3);
        assert_eq!(pick_floor(&percentages, 81), 4);
        assert_eq!(pick_floor(&percentages, 100), 4);
    }

    #[test]
    fn test_spread_source_share() {
        // Arrange
        let percentages = [40, 20, 20, 20];

        // Act
        let adjusted = spread_source_share(&percentages, 1);

        // Assert
        assert_eq!(adjusted[0], 0);
        assert_eq!(adjusted.iter().sum::<u32>(), 100);
        assert_eq!(adjusted, vec![0, 34, 33, 33]);
    }

    #[test]
    fn test_generated_passengers_are_valid() {
        // Arrange
        let mut generator = PassengerGenerator::new(&config(60, vec![10, 20, 30, 40]), Some(7));

        // Act
        let passengers: Vec<Passenger> = (0..500).filter_map(|t| generator.generate(t)).collect();

        // Assert
        assert_eq!(passengers.len(), 500);
        for (i, p) in passengers.iter().enumerate() {
            assert_eq!(p.id(), i as u64 + 1);
            assert_ne!(p.source(), p.destination());
            assert!((1..=4).contains(&p.source()));
            assert!((1..=4).contains(&p.destination()));
        }
    }

    #[test]
    fn test_generator_is_deterministic_with_seed() {
        // Arrange
        let cfg = config(30, vec![25, 25, 25, 25]);
        let mut first = PassengerGenerator::new(&cfg, Some(42));
        let mut second = PassengerGenerator::new(&cfg, Some(42));

        // Act
        let a: Vec<Option<(u32, u32)>> = (0..200)
            .map(|t| first.generate(t).map(|p| (p.source(), p.destination())))
            .collect();
        let b: Vec<Option<(u32, u32)>> = (0..200)
            .map(|t| second.generate(t).map(|p| (p.source(), p.destination())))
            .collect();

        // Assert
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_floor_building_generates_nothing() {
        // Arrange
        let mut generator = PassengerGenerator::new(&config(60, vec![100]), Some(1));

        // Act & Assert
        assert!(generator.generate(0).is_none());
    }
}
