//! City registry: alive/destroyed tracking, the per-wave loss cap, and
//! bonus-city materialization.

use silo_core::components::City;
use silo_core::constants::{CITY_ALTITUDE, CITY_HIT_RADIUS, CITY_X, MAX_CITY_LOSSES_PER_WAVE};
use silo_core::events::GameEvent;
use silo_core::types::Point;

use crate::systems::scoring::ScoreBoard;

/// The six city sites and their per-wave damage accounting.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    pub(crate) cities: Vec<City>,
    /// Cities destroyed this wave, capped at 3.
    pub lost_this_wave: u32,
}

impl CityRegistry {
    pub fn new() -> Self {
        let cities = CITY_X
            .iter()
            .map(|&x| City {
                x,
                altitude: CITY_ALTITUDE,
                alive: true,
            })
            .collect();
        Self {
            cities,
            lost_this_wave: 0,
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn alive_count(&self) -> u32 {
        self.cities.iter().filter(|c| c.alive).count() as u32
    }

    pub fn alive_positions(&self) -> Vec<Point> {
        self.cities
            .iter()
            .filter(|c| c.alive)
            .map(|c| Point::new(c.x, c.altitude))
            .collect()
    }

    /// Reset the loss counter and materialize banked bonus cities into
    /// craters, one unit of stock per rebuilt site.
    pub fn start_wave(&mut self, score: &mut ScoreBoard, events: &mut Vec<GameEvent>) {
        self.lost_this_wave = 0;
        for (index, city) in self.cities.iter_mut().enumerate() {
            if !city.alive && score.consume_bonus_city() {
                city.alive = true;
                events.push(GameEvent::CityRebuilt { index });
            }
        }
    }

    /// Destroy the first live city within the impact box around `pos`.
    ///
    /// Returns the destroyed city's index, or `None` when nothing was
    /// hit or the wave's 3-loss cap already absorbed the impact.
    pub fn destroy_near(&mut self, pos: Point) -> Option<usize> {
        if self.lost_this_wave >= MAX_CITY_LOSSES_PER_WAVE {
            return None;
        }
        for (index, city) in self.cities.iter_mut().enumerate() {
            if !city.alive {
                continue;
            }
            let dx = (city.x - pos.x).abs();
            let dy = (city.altitude - pos.y).abs();
            if dx <= CITY_HIT_RADIUS && dy <= CITY_HIT_RADIUS {
                city.alive = false;
                self.lost_this_wave += 1;
                return Some(index);
            }
        }
        None
    }

    /// True when the defense has nothing left: no live city and no
    /// banked stock to rebuild one.
    pub fn annihilated(&self, bonus_stock: u8) -> bool {
        self.alive_count() == 0 && bonus_stock == 0
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
