use crate::elevator::events::ElevatorEvent;
use crate::elevator::registry::RequestRegistry;
use crate::error::{ElevatorError, ElevatorResult};
use crate::shared::{Behaviour, CarSnapshot, Direction, Rider};
use log::debug;

/**
 * What the control loop should do next.
 *
 * - `Idle`:      No stop pending in either direction.
 * - `Arrived`:   The car is at the nearest stop and must service it.
 * - `Move(d)`:   Travel one floor in direction `d`.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    Arrived,
    Move(Direction),
}

/**
 * The car and everything it has been asked to do.
 *
 * Lives behind the scheduler's single mutex; every method here runs with the
 * lock held and never sleeps.
 *
 * # Fields
 * - `registry`:    Stops and riders.
 * - `floor`:       Current floor, always in `0..n_floors`.
 * - `direction`:   Direction of the current scan pass.
 * - `behaviour`:   Last state the control loop put the car in.
 * - `n_floors`:    Number of floors served.
 */
#[derive(Debug, Clone)]
pub struct CarState {
    registry: RequestRegistry,
    floor: u8,
    direction: Direction,
    behaviour: Behaviour,
    n_floors: u8,
}

impl CarState {
    pub fn new(n_floors: u8) -> ElevatorResult<CarState> {
        if n_floors == 0 {
            return Err(ElevatorError::InvalidFloorCount);
        }

        Ok(CarState {
            registry: RequestRegistry::new(),
            floor: 0,
            direction: Direction::Up,
            behaviour: Behaviour::Idle,
            n_floors,
        })
    }

    pub fn submit(&mut self, rider: Rider) -> ElevatorResult<()> {
        validate_rider(&rider, self.n_floors)?;
        self.registry.submit(rider);
        Ok(())
    }

    /**
     * SCAN target selection.
     *
     * Picks the nearest stop at or beyond the current floor in the active
     * direction. When there is none the direction flips on the spot and the
     * opposite side is searched. Returns `None` only when no stop is pending.
     */
    pub fn select_target(&mut self) -> Option<u8> {
        if let Some(&target) = self
            .registry
            .stops_for_direction(self.floor, self.direction)
            .first()
        {
            return Some(target);
        }

        let reversed = self.direction.reversed();
        let target = *self
            .registry
            .stops_for_direction(self.floor, reversed)
            .first()?;

        debug!(
            "Reversing at floor {}: {} -> {}",
            self.floor, self.direction, reversed
        );
        self.direction = reversed;
        Some(target)
    }

    pub fn next_step(&mut self) -> Step {
        match self.select_target() {
            None => {
                self.behaviour = Behaviour::Idle;
                Step::Idle
            }
            Some(target) if target == self.floor => {
                self.behaviour = Behaviour::Servicing;
                Step::Arrived
            }
            Some(_) => {
                self.behaviour = Behaviour::Moving;
                Step::Move(self.direction)
            }
        }
    }

    /// Moves the car exactly one floor and returns the new floor.
    pub fn advance(&mut self, direction: Direction) -> u8 {
        match direction {
            Direction::Up if self.floor + 1 < self.n_floors => self.floor += 1,
            Direction::Down if self.floor > 0 => self.floor -= 1,
            _ => debug!("Ignoring move {} at floor {}", direction, self.floor),
        }
        self.direction = direction;
        self.floor
    }

    /**
     * Arrival handling at the current floor.
     *
     * Boards everyone waiting here (adding their destinations as stops), lets
     * out everyone whose destination is here, then clears the floor from the
     * stop set. The clear must come last: this floor may be one rider's origin
     * and another's destination.
     */
    pub fn handle_floor(&mut self) -> Vec<ElevatorEvent> {
        let floor = self.floor;
        self.behaviour = Behaviour::Servicing;
        let mut events = vec![ElevatorEvent::Stopped { floor }];

        for rider in self.registry.take_waiting_at(floor) {
            events.push(ElevatorEvent::Boarded {
                rider: rider.name.clone(),
                destination: rider.destination,
            });
            self.registry.add_stop(rider.destination);
            self.registry.board(rider);
        }

        for rider in self.registry.take_onboard_for(floor) {
            events.push(ElevatorEvent::Alighted { rider: rider.name });
        }

        self.registry.clear_stop(floor);
        events
    }

    pub fn is_stop(&self) -> bool {
        self.registry.is_stop(self.floor)
    }

    pub fn terminate(&mut self) {
        self.behaviour = Behaviour::Terminated;
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn registry(&self) -> &RequestRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            floor: self.floor,
            direction: self.direction,
            behaviour: self.behaviour,
            onboard: self.registry.onboard_summary(),
            waiting: self.registry.waiting_names(),
            stops: self.registry.stops(),
        }
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, floor: u8, direction: Direction) {
        self.floor = floor;
        self.direction = direction;
    }
}

fn validate_rider(rider: &Rider, n_floors: u8) -> ElevatorResult<()> {
    for floor in [rider.origin, rider.destination] {
        if floor >= n_floors {
            return Err(ElevatorError::FloorOutOfRange {
                rider: rider.name.clone(),
                floor,
                n_floors,
            });
        }
    }

    if rider.origin == rider.destination {
        return Err(ElevatorError::SameFloor {
            rider: rider.name.clone(),
            floor: rider.origin,
        });
    }

    Ok(())
}
