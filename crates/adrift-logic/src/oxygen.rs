//! Per-room breathable air.
//!
//! Each room keeps its own reserve, measured in "rooms' worth" of air. The
//! reserve only ever takes the values 0, 0.5, 1.0 and 1.5: walking out of a
//! room costs half a unit, a full room refuses more air, and a clean oxygen
//! cylinder credits 1.5. A player standing in a room with no air must breathe
//! from a cylinder or suffocate.

/// Reserve at which a room counts as full and refuses more oxygen.
pub const FULL: f32 = 1.0;
/// Oxygen the departing room loses when the player walks out.
pub const MOVE_COST: f32 = 0.5;
/// Oxygen that follows the player into the next room from a surplus room.
pub const CARRYOVER: f32 = 0.5;
/// Departing reserve that counts as a surplus and triggers the carryover.
pub const SURPLUS: f32 = 1.5;
/// Oxygen a clean cylinder adds to a room.
pub const CYLINDER_YIELD: f32 = 1.5;
/// Reserves a room may start a scenario with.
pub const STARTING_LEVELS: [f32; 4] = [0.0, 0.5, FULL, SURPLUS];

/// How breathable the current room is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OxygenStatus {
    /// At least a full room of air.
    Safe,
    /// Air is running out; the next move empties it.
    Low,
    /// No air left. The player needs a cylinder right now.
    Exhausted,
}

/// Whether a scenario may start a room at this reserve.
pub fn is_starting_level(reserve: f32) -> bool {
    STARTING_LEVELS.contains(&reserve)
}

/// Assess a room reserve.
pub fn assess(reserve: f32) -> OxygenStatus {
    if reserve <= 0.0 {
        OxygenStatus::Exhausted
    } else if reserve < FULL {
        OxygenStatus::Low
    } else {
        OxygenStatus::Safe
    }
}

/// Split a departing reserve into what stays behind and what travels along.
///
/// Returns `(remaining, carried)`. The remaining reserve never goes negative.
/// Air only follows the player out of a room holding exactly the surplus;
/// a room topped up past it by a cylinder keeps its extra air to itself.
pub fn split_on_exit(reserve: f32) -> (f32, f32) {
    let carried = if reserve == SURPLUS { CARRYOVER } else { 0.0 };
    ((reserve - MOVE_COST).max(0.0), carried)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_levels() {
        assert_eq!(assess(0.0), OxygenStatus::Exhausted);
        assert_eq!(assess(0.5), OxygenStatus::Low);
        assert_eq!(assess(1.0), OxygenStatus::Safe);
        assert_eq!(assess(1.5), OxygenStatus::Safe);
    }

    #[test]
    fn test_surplus_room_carries_air() {
        assert_eq!(split_on_exit(1.5), (1.0, 0.5));
    }

    #[test]
    fn test_full_room_carries_nothing() {
        assert_eq!(split_on_exit(1.0), (0.5, 0.0));
        assert_eq!(split_on_exit(0.5), (0.0, 0.0));
    }

    #[test]
    fn test_overfilled_room_carries_nothing() {
        assert_eq!(split_on_exit(2.0), (1.5, 0.0));
        assert_eq!(split_on_exit(3.0), (2.5, 0.0));
    }

    #[test]
    fn test_starting_levels() {
        for level in [0.0, 0.5, 1.0, 1.5] {
            assert!(is_starting_level(level));
        }
        assert!(!is_starting_level(0.25));
        assert!(!is_starting_level(3.0));
        assert!(!is_starting_level(-0.5));
    }

    #[test]
    fn test_empty_room_stays_at_zero() {
        assert_eq!(split_on_exit(0.0), (0.0, 0.0));
    }
}
