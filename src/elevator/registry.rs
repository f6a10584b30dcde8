use crate::shared::{Direction, OnboardRider, Rider};
use std::collections::BTreeSet;

/**
 * Pending work for the car.
 *
 * Tracks the floors the car still has to visit and the riders that are either
 * waiting for the car or travelling in it. A floor is in `stops` while some
 * tracked rider has an unreached origin or destination there.
 *
 * # Fields
 * - `stops`:   Floors requiring a visit, kept sorted.
 * - `waiting`: Riders not yet boarded, in submission order.
 * - `onboard`: Riders inside the car, in boarding order.
 */
#[derive(Debug, Default, Clone)]
pub struct RequestRegistry {
    stops: BTreeSet<u8>,
    waiting: Vec<Rider>,
    onboard: Vec<Rider>,
}

impl RequestRegistry {
    pub fn new() -> RequestRegistry {
        RequestRegistry::default()
    }

    pub fn submit(&mut self, rider: Rider) {
        self.stops.insert(rider.origin);
        self.waiting.push(rider);
    }

    /// Stops reachable from `floor` going `direction`, nearest first.
    /// The current floor counts as reachable in both directions.
    pub fn stops_for_direction(&self, floor: u8, direction: Direction) -> Vec<u8> {
        match direction {
            Direction::Up => self.stops.range(floor..).copied().collect(),
            Direction::Down => self.stops.range(..=floor).rev().copied().collect(),
        }
    }

    pub fn add_stop(&mut self, floor: u8) {
        self.stops.insert(floor);
    }

    pub fn clear_stop(&mut self, floor: u8) {
        self.stops.remove(&floor);
    }

    pub fn is_stop(&self, floor: u8) -> bool {
        self.stops.contains(&floor)
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }

    pub fn stops(&self) -> Vec<u8> {
        self.stops.iter().copied().collect()
    }

    /// Removes and returns every waiting rider whose origin is `floor`, marked as boarded.
    pub fn take_waiting_at(&mut self, floor: u8) -> Vec<Rider> {
        let (mut boarding, waiting): (Vec<Rider>, Vec<Rider>) = self
            .waiting
            .drain(..)
            .partition(|rider| rider.origin == floor);
        self.waiting = waiting;

        for rider in boarding.iter_mut() {
            rider.boarded = true;
        }
        boarding
    }

    /// Removes and returns every onboard rider whose destination is `floor`.
    pub fn take_onboard_for(&mut self, floor: u8) -> Vec<Rider> {
        let (alighting, onboard): (Vec<Rider>, Vec<Rider>) = self
            .onboard
            .drain(..)
            .partition(|rider| rider.destination == floor);
        self.onboard = onboard;
        alighting
    }

    pub fn board(&mut self, rider: Rider) {
        self.onboard.push(rider);
    }

    pub fn waiting(&self) -> &[Rider] {
        &self.waiting
    }

    pub fn onboard(&self) -> &[Rider] {
        &self.onboard
    }

    pub fn onboard_summary(&self) -> Vec<OnboardRider> {
        self.onboard
            .iter()
            .map(|rider| OnboardRider {
                name: rider.name.clone(),
                destination: rider.destination,
            })
            .collect()
    }

    pub fn waiting_names(&self) -> Vec<String> {
        self.waiting.iter().map(|rider| rider.name.clone()).collect()
    }

    /// True if the stop set matches exactly the unreached origins and destinations.
    pub fn is_consistent(&self) -> bool {
        let mut expected: BTreeSet<u8> = self.waiting.iter().map(|rider| rider.origin).collect();
        expected.extend(self.onboard.iter().map(|rider| rider.destination));
        expected == self.stops
    }
}
