//! Weight progress calculation
//!
//! Pure functions; the celebration side effect lives in the profile
//! controller, which tracks the previous value to detect threshold
//! crossings.

/// Goal classification derived from a free-text goal label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    WeightLoss,
    MuscleGain,
    Other,
}

const LOSS_KEYWORDS: [&str; 3] = ["Weight Loss", "cut", "lose"];
const GAIN_KEYWORDS: [&str; 3] = ["Muscle Building", "bulk", "gain"];

/// Classify a goal label by the same keywords the product uses.
pub fn goal_kind(label: &str) -> GoalKind {
    if LOSS_KEYWORDS.iter().any(|kw| label.contains(kw)) {
        GoalKind::WeightLoss
    } else if GAIN_KEYWORDS.iter().any(|kw| label.contains(kw)) {
        GoalKind::MuscleGain
    } else {
        GoalKind::Other
    }
}

/// Extract the numeric magnitude of a free-text weight field.
///
/// Strips everything but digits and dots, so "150 kg" parses as 150.
pub fn parse_weight(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// 0-100 progress score for a current/target weight pair.
///
/// Base formula: `round((1 - |c-t|/max(c,t)) * 100)`, clamped to [0,100];
/// zero when either value fails to parse or both are zero. A weight-loss
/// goal forces 100 once `current <= target`; a muscle-gain goal once
/// `current >= target`.
pub fn calculate_progress(current: &str, target: &str, goal: Option<&str>) -> u8 {
    let (Some(current_num), Some(target_num)) = (parse_weight(current), parse_weight(target))
    else {
        return 0;
    };

    let max_weight = current_num.max(target_num);
    if max_weight == 0.0 {
        return 0;
    }

    match goal.map(goal_kind) {
        Some(GoalKind::WeightLoss) if current_num <= target_num => return 100,
        Some(GoalKind::MuscleGain) if current_num >= target_num => return 100,
        _ => {}
    }

    let diff = (current_num - target_num).abs();
    ((1.0 - diff / max_weight) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_always_in_range() {
        let samples = [
            "0", "0.5", "1", "55", "70.5", "90", "100", "150 kg", "200", "999",
        ];
        for current in samples {
            for target in samples {
                for goal in [None, Some("Weight Loss"), Some("Muscle Building"), Some("Fitness")] {
                    let progress = calculate_progress(current, target, goal);
                    assert!(progress <= 100, "{current}/{target}/{goal:?} -> {progress}");
                }
            }
        }
    }

    #[test]
    fn equal_weights_score_100_for_any_goal() {
        for goal in [None, Some("Weight Loss"), Some("Muscle Building"), Some("Fitness")] {
            assert_eq!(calculate_progress("82.5", "82.5", goal), 100);
        }
    }

    #[test]
    fn loss_goal_above_target_uses_base_formula() {
        // 150 vs 100: round((1 - 50/150) * 100) = 67, not forced to 100
        assert_eq!(calculate_progress("150 kg", "100", Some("Weight Loss")), 67);
    }

    #[test]
    fn loss_goal_at_or_below_target_is_complete() {
        assert_eq!(calculate_progress("90", "100", Some("Weight Loss")), 100);
        assert_eq!(calculate_progress("100", "100", Some("Weight Loss")), 100);
    }

    #[test]
    fn gain_goal_at_or_above_target_is_complete() {
        assert_eq!(calculate_progress("100", "90", Some("Muscle Building")), 100);
        // below target: round((1 - 10/100) * 100) = 90
        assert_eq!(calculate_progress("90", "100", Some("Muscle Building")), 90);
    }

    #[test]
    fn unparseable_weights_score_zero() {
        assert_eq!(calculate_progress("heavy", "100", Some("Weight Loss")), 0);
        assert_eq!(calculate_progress("90", "", None), 0);
    }

    #[test]
    fn zero_weights_avoid_division_by_zero() {
        assert_eq!(calculate_progress("0", "0", Some("Weight Loss")), 0);
    }

    #[test]
    fn units_are_stripped_before_parsing() {
        assert_eq!(parse_weight("150 kg"), Some(150.0));
        assert_eq!(parse_weight("70.5kg"), Some(70.5));
        assert_eq!(parse_weight("no digits"), None);
    }

    #[test]
    fn goal_labels_classify_by_keyword() {
        assert_eq!(goal_kind("Weight Loss"), GoalKind::WeightLoss);
        assert_eq!(goal_kind("cut for summer"), GoalKind::WeightLoss);
        assert_eq!(goal_kind("Muscle Building"), GoalKind::MuscleGain);
        assert_eq!(goal_kind("bulk season"), GoalKind::MuscleGain);
        assert_eq!(goal_kind("Fitness"), GoalKind::Other);
    }
}
