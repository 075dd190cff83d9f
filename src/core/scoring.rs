//! # Scoring
//!
//! Turns a finished quiz run into points. Pure arithmetic, no state.
//!
//! ```text
//! reward = score * 10 + (50 if score == total)
//! ```

/// Points for each correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;
/// Extra points for answering every question correctly.
pub const PERFECT_RUN_BONUS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub base: u32,
    pub bonus: u32,
    pub total: u32,
    /// Share of correct answers, rounded half-up. Display only.
    pub percentage: u32,
}

impl Reward {
    pub fn is_perfect(&self) -> bool {
        self.bonus > 0
    }
}

/// Compute the reward for `score` correct answers out of `total_questions`.
///
/// An empty run earns nothing; it never reaches the result screen anyway.
pub fn reward(score: u32, total_questions: u32) -> Reward {
    if total_questions == 0 {
        return Reward {
            base: 0,
            bonus: 0,
            total: 0,
            percentage: 0,
        };
    }

    let score = score.min(total_questions);
    let base = score * POINTS_PER_CORRECT;
    let bonus = if score == total_questions {
        PERFECT_RUN_BONUS
    } else {
        0
    };

    Reward {
        base,
        bonus,
        total: base + bonus,
        percentage: percentage(score, total_questions),
    }
}

/// `round(score / total * 100)` with halves rounded up, in integer math.
fn percentage(score: u32, total: u32) -> u32 {
    let (score, total) = (u64::from(score), u64::from(total));
    ((score * 200 + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_single_question() {
        let r = reward(1, 1);
        assert_eq!(r.base, 10);
        assert_eq!(r.bonus, 50);
        assert_eq!(r.total, 60);
        assert_eq!(r.percentage, 100);
        assert!(r.is_perfect());
    }

    #[test]
    fn test_perfect_run_formula() {
        for total in 1..=20 {
            assert_eq!(reward(total, total).total, total * 10 + 50);
        }
    }

    #[test]
    fn test_zero_score_earns_nothing() {
        for total in 1..=20 {
            let r = reward(0, total);
            assert_eq!(r.total, 0);
            assert_eq!(r.percentage, 0);
        }
    }

    #[test]
    fn test_partial_score_has_no_bonus() {
        let r = reward(3, 4);
        assert_eq!(r.total, 30);
        assert!(!r.is_perfect());
        assert_eq!(r.percentage, 75);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(reward(1, 3).percentage, 33);
        assert_eq!(reward(2, 3).percentage, 67);
        assert_eq!(reward(1, 8).percentage, 13);
        assert_eq!(reward(1, 200).percentage, 1);
    }

    #[test]
    fn test_reward_is_deterministic() {
        assert_eq!(reward(2, 5), reward(2, 5));
    }

    #[test]
    fn test_empty_run() {
        let r = reward(0, 0);
        assert_eq!(r.total, 0);
        assert!(!r.is_perfect());
    }
}
