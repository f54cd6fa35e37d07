use std::str::FromStr;

use thiserror::Error;

use crate::cell::CellState;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// A birth/survival rule set.
///
/// For both `births` and `survivals`, numbers are set on a bit basis: if
/// bit `i` is on, a neighbor count of `i` is in the set. Any bit past the
/// 8th is ignored.
///
/// # Examples
/// ```notrust
/// b3s23:   births = 0b0_0000_1000, survivals = 0b0_0000_1100
/// b36s23:  births = 0b0_0100_1000, survivals = 0b0_0000_1100
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    births: u16,
    survivals: u16,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    pub const fn new(births: u16, survivals: u16) -> Self {
        Self {
            births: births & 0x1FF,
            survivals: survivals & 0x1FF,
        }
    }

    pub const fn births(&self) -> u16 {
        self.births
    }

    pub const fn survivals(&self) -> u16 {
        self.survivals
    }

    /// The state of a cell in the next generation, given its current
    /// state and its number of alive neighbors.
    pub fn next_state(&self, state: CellState, neighbors: u8) -> CellState {
        let mask = 1u16 << neighbors.min(8);

        let alive = match state {
            CellState::Alive => self.survivals & mask != 0,
            CellState::Dead => self.births & mask != 0,
        };

        if alive { CellState::Alive } else { CellState::Dead }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("invalid rulestring character '{0}'")]
    InvalidChar(char),

    #[error("neighbor count {0} out of range")]
    InvalidCount(u32),
}

impl FromStr for RuleSet {
    type Err = RuleSetError;

    /// Parse a rulestring in `b[0-8]*s[0-8]*` form, e.g. `b3s23`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum Section {
            Births,
            Survivals,
        }

        let mut section = Section::Births;
        let mut births = 0;
        let mut survivals = 0;

        for c in s.chars() {
            match c {
                'b' | 'B' => section = Section::Births,
                's' | 'S' => section = Section::Survivals,
                n => {
                    let Some(n) = n.to_digit(10) else {
                        return Err(RuleSetError::InvalidChar(n));
                    };

                    if n > 8 {
                        return Err(RuleSetError::InvalidCount(n));
                    }

                    match section {
                        Section::Births => births |= 1 << n,
                        Section::Survivals => survivals |= 1 << n,
                    }
                }
            }
        }

        Ok(RuleSet::new(births, survivals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_rules_for_every_neighbor_count() {
        let rules = RuleSet::default();

        for n in 0..=8u8 {
            // Alive: survives on 2 or 3 neighbors, dies otherwise.
            let next = rules.next_state(CellState::Alive, n);
            let expected = if n == 2 || n == 3 {
                CellState::Alive
            } else {
                CellState::Dead
            };
            assert_eq!(next, expected, "alive cell with {n} neighbors");

            // Dead: born on exactly 3 neighbors.
            let next = rules.next_state(CellState::Dead, n);
            let expected = if n == 3 {
                CellState::Alive
            } else {
                CellState::Dead
            };
            assert_eq!(next, expected, "dead cell with {n} neighbors");
        }
    }

    #[test]
    fn parses_rulestrings() {
        assert_eq!("b3s23".parse::<RuleSet>().unwrap(), B3S23);
        assert_eq!("B3S23".parse::<RuleSet>().unwrap(), B3S23);

        let highlife: RuleSet = "b36s23".parse().unwrap();
        assert_eq!(highlife.births(), 0b0100_1000);
        assert_eq!(highlife.survivals(), 0b1100);
    }

    #[test]
    fn rejects_bad_rulestrings() {
        assert_eq!(
            "b3s2x".parse::<RuleSet>(),
            Err(RuleSetError::InvalidChar('x'))
        );
        assert_eq!(
            "b9s23".parse::<RuleSet>(),
            Err(RuleSetError::InvalidCount(9))
        );
    }
}
