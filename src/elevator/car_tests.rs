/*
 * Unit tests for the car state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern. The `drive` helper
 * steps the car the same way the control loop does, minus the sleeping.
 *
 * Tests:
 * - test_new_rejects_zero_floors
 * - test_submit_validation
 * - test_idle_without_requests
 * - test_scan_visits_in_order
 * - test_reverses_when_nothing_ahead
 * - test_current_floor_is_reachable
 * - test_simultaneous_origin_and_destination
 * - test_rider_states_are_one_way
 * - test_mid_route_pickup
 * - test_source_scenario
 * - test_snapshot
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod car_tests {
    use crate::elevator::{CarState, ElevatorEvent, Step};
    use crate::error::ElevatorError;
    use crate::shared::Behaviour::{Idle, Moving, Servicing};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::Rider;

    fn drive(car: &mut CarState, max_steps: usize) -> Vec<ElevatorEvent> {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            match car.next_step() {
                Step::Idle => return events,
                Step::Arrived => events.extend(car.handle_floor()),
                Step::Move(direction) => {
                    let floor = car.advance(direction);
                    events.push(ElevatorEvent::Moved { floor, direction });
                    if car.is_stop() {
                        events.extend(car.handle_floor());
                    }
                }
            }
            assert!(car.registry().is_consistent(), "stop set out of sync");
        }
        panic!("car did not go idle within {} steps", max_steps);
    }

    fn stopped_floors(events: &[ElevatorEvent]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|event| match event {
                ElevatorEvent::Stopped { floor } => Some(*floor),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_zero_floors() {
        // Act
        let result = CarState::new(0);

        // Assert
        assert!(matches!(result, Err(ElevatorError::InvalidFloorCount)));
    }

    #[test]
    fn test_submit_validation() {
        // Purpose: Out-of-range floors and zero-length rides are rejected without touching state

        // Arrange
        let mut car = CarState::new(5).unwrap();

        // Act
        let too_high = car.submit(Rider::new("a", 1, 5));
        let same = car.submit(Rider::new("b", 2, 2));
        let ok = car.submit(Rider::new("c", 4, 0));

        // Assert
        assert!(matches!(
            too_high,
            Err(ElevatorError::FloorOutOfRange { floor: 5, n_floors: 5, .. })
        ));
        assert!(matches!(same, Err(ElevatorError::SameFloor { floor: 2, .. })));
        assert!(ok.is_ok());
        assert_eq!(car.registry().stops(), vec![4]);
        assert_eq!(car.registry().waiting_names(), vec!["c"]);
    }

    #[test]
    fn test_idle_without_requests() {
        // Arrange
        let mut car = CarState::new(4).unwrap();

        // Act
        let step = car.next_step();

        // Assert
        assert_eq!(step, Step::Idle);
        assert_eq!(car.behaviour(), Idle);
        assert_eq!(car.direction(), Up);
    }

    #[test]
    fn test_scan_visits_in_order() {
        // Purpose: With stops at 2 and 4 and the car going up from 0, it visits 2 then 4 without reversing

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.submit(Rider::new("a", 2, 9)).unwrap();
        car.submit(Rider::new("b", 4, 9)).unwrap();

        // Act
        assert_eq!(car.next_step(), Step::Move(Up));
        assert_eq!(car.behaviour(), Moving);
        let events = drive(&mut car, 100);

        // Assert
        assert_eq!(stopped_floors(&events), vec![2, 4, 9]);
        assert!(events
            .iter()
            .all(|event| !matches!(event, ElevatorEvent::Moved { direction: Down, .. })));
        assert_eq!(car.floor(), 9);
        assert!(car.registry().onboard().is_empty());
    }

    #[test]
    fn test_reverses_when_nothing_ahead() {
        // Purpose: Direction flips on the spot when only stops behind the car remain

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.place_at(5, Up);
        car.submit(Rider::new("a", 3, 1)).unwrap();
        car.submit(Rider::new("b", 1, 0)).unwrap();

        // Act
        let target = car.select_target();

        // Assert
        assert_eq!(target, Some(3));
        assert_eq!(car.direction(), Down);
        assert_eq!(car.floor(), 5);
    }

    #[test]
    fn test_current_floor_is_reachable() {
        // Purpose: A request on the car's own floor is serviced without moving

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.place_at(6, Down);
        car.submit(Rider::new("a", 6, 8)).unwrap();

        // Act
        let step = car.next_step();

        // Assert
        assert_eq!(step, Step::Arrived);
        assert_eq!(car.behaviour(), Servicing);
        assert_eq!(car.direction(), Down);
    }

    #[test]
    fn test_simultaneous_origin_and_destination() {
        // Purpose: One arrival both lets a rider out and takes another in, and only then clears the floor

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.submit(Rider::new("a", 0, 5)).unwrap();
        car.submit(Rider::new("b", 5, 8)).unwrap();
        car.handle_floor();
        car.place_at(5, Up);

        // Act
        let events = car.handle_floor();

        // Assert
        assert_eq!(
            events,
            vec![
                ElevatorEvent::Stopped { floor: 5 },
                ElevatorEvent::Boarded { rider: "b".into(), destination: 8 },
                ElevatorEvent::Alighted { rider: "a".into() },
            ]
        );
        assert_eq!(car.registry().stops(), vec![8]);
        assert_eq!(car.snapshot().onboard.len(), 1);
        assert!(car.registry().waiting().is_empty());
        assert!(car.registry().is_consistent());
    }

    #[test]
    fn test_rider_states_are_one_way() {
        // Purpose: A rider is waiting, then onboard, then gone, and never in two places

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.submit(Rider::new("a", 0, 3)).unwrap();

        // Act + Assert
        assert_eq!(car.registry().waiting_names(), vec!["a"]);
        car.handle_floor();
        assert!(car.registry().waiting().is_empty());
        assert!(car.registry().onboard()[0].boarded);
        drive(&mut car, 20);
        assert!(car.registry().waiting().is_empty());
        assert!(car.registry().onboard().is_empty());
    }

    #[test]
    fn test_mid_route_pickup() {
        // Purpose: A request added while travelling up is served on the way, not skipped

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.submit(Rider::new("a", 0, 7)).unwrap();
        let mut events = car.handle_floor();
        assert_eq!(car.next_step(), Step::Move(Up));
        car.advance(Up);

        // Act
        car.submit(Rider::new("b", 3, 4)).unwrap();
        events.extend(drive(&mut car, 100));

        // Assert
        assert_eq!(stopped_floors(&events), vec![0, 3, 4, 7]);
        assert!(car.registry().onboard().is_empty());
    }

    #[test]
    fn test_source_scenario() {
        // Purpose: The three-rider demo is served in one upward pass and one downward pass

        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.submit(Rider::new("user_1", 0, 7)).unwrap();
        car.submit(Rider::new("user2", 3, 9)).unwrap();
        car.submit(Rider::new("user_3", 2, 1)).unwrap();

        // Act
        let events = drive(&mut car, 100);

        // Assert
        assert_eq!(stopped_floors(&events), vec![0, 2, 3, 7, 9, 1]);
        assert!(car.snapshot().is_drained());
        assert_eq!(car.floor(), 1);
        assert_eq!(car.direction(), Down);
    }

    #[test]
    fn test_snapshot() {
        // Arrange
        let mut car = CarState::new(10).unwrap();
        car.submit(Rider::new("a", 0, 6)).unwrap();
        car.submit(Rider::new("b", 2, 1)).unwrap();
        car.handle_floor();

        // Act
        let snapshot = car.snapshot();

        // Assert
        assert_eq!(snapshot.floor, 0);
        assert_eq!(snapshot.direction, Up);
        assert_eq!(snapshot.behaviour, Servicing);
        assert_eq!(snapshot.onboard[0].name, "a");
        assert_eq!(snapshot.onboard[0].destination, 6);
        assert_eq!(snapshot.waiting, vec!["b"]);
        assert_eq!(snapshot.stops, vec![2, 6]);
    }
}
