// Level map between missions, and the energy battery shown on every screen.

use crate::session::{ENERGY_MAX, GameSession, LevelIndex};

pub const STATIONS: usize = LevelIndex::ALL.len();

/// Marker positions on the map background, in percent (left, top).
pub const STATION_POSITIONS: [(u8, u8); STATIONS] = [(15, 75), (35, 55), (65, 45), (50, 25), (80, 15), (85, 10)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Station {
    Visited,
    Current,
    Upcoming,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelMap {
    /// Station the ship is flying to (1-based).
    pub highlighted: LevelIndex,
    pub stations: [Station; STATIONS],
    pub battery: Battery,
}

impl LevelMap {
    pub fn for_session(session: &GameSession) -> Self {
        let highlighted = session.current_level.next().unwrap_or(LevelIndex::LAST);
        let mut stations = [Station::Upcoming; STATIONS];
        for (station, idx) in stations.iter_mut().zip(LevelIndex::ALL) {
            *station = match idx.cmp(&highlighted) {
                std::cmp::Ordering::Less => Station::Visited,
                std::cmp::Ordering::Equal => Station::Current,
                std::cmp::Ordering::Greater => Station::Upcoming,
            };
        }
        Self { highlighted, stations, battery: Battery::new(session.energy) }
    }

    /// "Next mission": same as the session transition.
    pub fn advance(session: GameSession) -> GameSession {
        session.next_level_from_map()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Tier {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Battery {
    pub charge: u8,
}

impl Battery {
    pub fn new(charge: u8) -> Self {
        Self { charge }
    }

    pub fn percentage(self) -> f64 {
        (f64::from(self.charge) / f64::from(ENERGY_MAX) * 100.0).min(100.0)
    }

    pub fn tier(self) -> Tier {
        let pct = self.percentage();
        if pct <= 35.0 {
            Tier::Low
        } else if pct <= 70.0 {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_level(n: u8) -> GameSession {
        GameSession { current_level: LevelIndex::new(n).unwrap(), ..GameSession::default() }
    }

    #[test]
    fn highlights_the_next_station() {
        let map = LevelMap::for_session(&at_level(2));
        assert_eq!(map.highlighted.get(), 3);
        assert_eq!(map.stations[..2], [Station::Visited, Station::Visited]);
        assert_eq!(map.stations[2], Station::Current);
        assert!(map.stations[3..].iter().all(|s| *s == Station::Upcoming));
    }

    #[test]
    fn highlight_is_capped_at_last_station() {
        let map = LevelMap::for_session(&at_level(6));
        assert_eq!(map.highlighted, LevelIndex::LAST);
        assert_eq!(map.stations[5], Station::Current);
    }

    #[test]
    fn battery_tiers() {
        let tiers: Vec<Tier> = (0..=7).map(|c| Battery::new(c).tier()).collect();
        assert_eq!(
            tiers,
            [
                Tier::Low,
                Tier::Low,
                Tier::Low,
                Tier::Medium,
                Tier::Medium,
                Tier::High,
                Tier::High,
                Tier::High
            ]
        );
        assert_eq!(Battery::new(9).percentage(), 100.0);
    }
}
