//! Signal amplifier calibration: lock onto a target frequency.

use crate::verdict::Verdict;

/// Lowest accepted frequency in Hz.
pub const MIN_FREQUENCY: i64 = 1000;
/// Highest accepted frequency in Hz.
pub const MAX_FREQUENCY: i64 = 5000;
/// Default lock frequency.
pub const DEFAULT_TARGET: i64 = 3420;

/// Distance from the target that still counts as "very close".
const CLOSE_BAND: i64 = 50;

/// Judge a frequency guess against `target`.
pub fn check_frequency(input: &str, target: i64) -> Verdict {
    let Ok(freq) = input.trim().parse::<i64>() else {
        return Verdict::fail("Please enter integer frequency.");
    };

    if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&freq) {
        return Verdict::fail("Frequency out of range (1000-5000 Hz).");
    }

    let diff = freq - target;
    if diff == 0 {
        Verdict::pass("Perfect lock.")
    } else if diff.abs() <= CLOSE_BAND {
        Verdict::fail("Very close. Fine-tune.")
    } else if diff < 0 {
        Verdict::fail("Too low. Interference increasing.")
    } else {
        Verdict::fail("Too high. Interference increasing.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(input: &str) -> String {
        check_frequency(input, DEFAULT_TARGET).message
    }

    #[test]
    fn exact_lock() {
        let v = check_frequency("3420", DEFAULT_TARGET);
        assert!(v.solved);
        assert_eq!(v.message, "Perfect lock.");
        assert!(check_frequency(" 3420 ", DEFAULT_TARGET).solved);
    }

    #[test]
    fn close_band_both_sides() {
        assert_eq!(msg("3400"), "Very close. Fine-tune.");
        assert_eq!(msg("3470"), "Very close. Fine-tune.");
        assert_eq!(msg("3370"), "Very close. Fine-tune.");
    }

    #[test]
    fn far_guesses() {
        assert_eq!(msg("1000"), "Too low. Interference increasing.");
        assert_eq!(msg("3369"), "Too low. Interference increasing.");
        assert_eq!(msg("5000"), "Too high. Interference increasing.");
    }

    #[test]
    fn out_of_range() {
        assert_eq!(msg("6000"), "Frequency out of range (1000-5000 Hz).");
        assert_eq!(msg("999"), "Frequency out of range (1000-5000 Hz).");
        assert_eq!(msg("-3420"), "Frequency out of range (1000-5000 Hz).");
    }

    #[test]
    fn not_a_number() {
        assert_eq!(msg("loud"), "Please enter integer frequency.");
        assert_eq!(msg("3420.5"), "Please enter integer frequency.");
        assert_eq!(msg(""), "Please enter integer frequency.");
    }

    #[test]
    fn custom_target() {
        assert!(check_frequency("2000", 2000).solved);
        assert!(!check_frequency("3420", 2000).solved);
    }
}
