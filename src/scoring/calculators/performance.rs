use super::super::{calculator_priority, GameStats, ScoreCalculator};

/// Accuracy thresholds in percent, highest first; below all of them the
/// last factor applies.
const ACCURACY_TIERS: [(f64, f64); 4] = [(95.0, 1.5), (85.0, 1.25), (75.0, 1.1), (60.0, 1.0)];
const LOW_ACCURACY_FACTOR: f64 = 0.8;

/// WPM thresholds, highest first
const SPEED_TIERS: [(f64, f64); 4] = [(60.0, 1.4), (45.0, 1.25), (30.0, 1.1), (20.0, 1.0)];
const LOW_SPEED_FACTOR: f64 = 0.9;

fn tiered_factor(value: f64, tiers: &[(f64, f64)], fallback: f64) -> f64 {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, factor)| *factor)
        .unwrap_or(fallback)
}

pub struct AccuracyFactorCalculator;

impl Default for AccuracyFactorCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl AccuracyFactorCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn factor(accuracy_percent: f64) -> f64 {
        tiered_factor(accuracy_percent, &ACCURACY_TIERS, LOW_ACCURACY_FACTOR)
    }
}

impl ScoreCalculator for AccuracyFactorCalculator {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64 {
        current * Self::factor(stats.accuracy_percent())
    }

    fn priority(&self) -> u32 {
        calculator_priority::ACCURACY
    }

    fn name(&self) -> &'static str {
        "accuracy_factor"
    }
}

pub struct SpeedBonusCalculator;

impl Default for SpeedBonusCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedBonusCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn factor(wpm: f64) -> f64 {
        tiered_factor(wpm, &SPEED_TIERS, LOW_SPEED_FACTOR)
    }
}

impl ScoreCalculator for SpeedBonusCalculator {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64 {
        current * Self::factor(stats.words_per_minute())
    }

    fn priority(&self) -> u32 {
        calculator_priority::SPEED
    }

    fn name(&self) -> &'static str {
        "speed_bonus"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::models::test_support::perfect_easy_run;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 1.5)]
    #[case(95.0, 1.5)]
    #[case(94.99, 1.25)]
    #[case(85.0, 1.25)]
    #[case(75.0, 1.1)]
    #[case(60.0, 1.0)]
    #[case(59.9, 0.8)]
    #[case(0.0, 0.8)]
    fn accuracy_thresholds(#[case] accuracy: f64, #[case] expected: f64) {
        assert_eq!(AccuracyFactorCalculator::factor(accuracy), expected);
    }

    #[rstest]
    #[case(120.0, 1.4)]
    #[case(60.0, 1.4)]
    #[case(45.0, 1.25)]
    #[case(30.0, 1.1)]
    #[case(20.0, 1.0)]
    #[case(19.99, 0.9)]
    #[case(0.0, 0.9)]
    fn speed_thresholds(#[case] wpm: f64, #[case] expected: f64) {
        assert_eq!(SpeedBonusCalculator::factor(wpm), expected);
    }

    #[test]
    fn accuracy_factor_uses_keystroke_ratio() {
        let stats = GameStats {
            correct_keystrokes: 70,
            total_keystrokes: 100,
            ..perfect_easy_run()
        };
        // 70% lands in the 60..75 tier
        assert_eq!(AccuracyFactorCalculator::new().calculate(&stats, 10.0), 10.0);
    }

    #[test]
    fn speed_bonus_uses_words_per_minute() {
        let stats = GameStats {
            correct_keystrokes: 300,
            total_keystrokes: 300,
            time: 60.0,
            ..perfect_easy_run()
        };
        // 300 keystrokes in a minute is 60 wpm
        let scaled = SpeedBonusCalculator::new().calculate(&stats, 10.0);
        assert!((scaled - 14.0).abs() < 1e-9);
    }
}
