//! Scoring module - line clear points, drop bonuses, level and gravity
//!
//! All functions are pure so the rules can be checked without a session.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS,
};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for the cleared lines
    pub line_clear_score: u32,
    /// Cumulative lines after this clear
    pub lines: u32,
    /// Level after this clear
    pub level: u32,
    pub leveled_up: bool,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based, before the clear is counted)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
/// 1000ms at level 1, 100ms faster per level, floored at 100ms
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Score a lock that cleared `cleared` lines.
pub fn calculate_score(cleared: usize, lines_before: u32, level: u32) -> ScoreResult {
    let lines = lines_before.saturating_add(cleared as u32);
    let new_level = calculate_level(lines);
    ScoreResult {
        line_clear_score: calculate_line_score(cleared, level),
        lines,
        level: new_level,
        leveled_up: new_level > level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);

        assert_eq!(calculate_line_score(1, 3), 300);
        assert_eq!(calculate_line_score(4, 7), 800 * 7);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10); // Soft drop 10 cells
        assert_eq!(calculate_drop_score(10, true), 20); // Hard drop 10 cells
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(19), 2);
        assert_eq!(calculate_level(20), 3);
        assert_eq!(calculate_level(30), 4);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 1000);
        assert_eq!(get_drop_interval_ms(2), 900);
        assert_eq!(get_drop_interval_ms(9), 200);
        assert_eq!(get_drop_interval_ms(10), 100);
        assert_eq!(get_drop_interval_ms(11), 100);
        assert_eq!(get_drop_interval_ms(500), 100);
    }

    #[test]
    fn test_drop_interval_strictly_decreases_until_floor() {
        let mut prev = get_drop_interval_ms(1);
        for level in 2..=10 {
            let cur = get_drop_interval_ms(level);
            assert_eq!(prev - cur, 100);
            prev = cur;
        }
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let result = calculate_score(4, 8, 1);
        assert_eq!(result.line_clear_score, 800);
        assert_eq!(result.lines, 12);
        assert_eq!(result.level, 2);
        assert!(result.leveled_up);

        let result = calculate_score(1, 12, 2);
        assert_eq!(result.line_clear_score, 200);
        assert!(!result.leveled_up);
    }
}
