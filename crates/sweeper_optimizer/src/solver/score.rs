use std::{
    cmp::Ordering,
    fmt, iter,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::score_level::ScoreLevel;

/// Hard, medium and soft score, compared lexicographically. Higher is
/// better: constraints penalize with negative values and reward with
/// positive ones. A schedule is feasible when the hard score is zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub hard_score: i64,
    pub medium_score: i64,
    pub soft_score: i64,
}

impl Score {
    pub const ZERO: Score = Score {
        hard_score: 0,
        medium_score: 0,
        soft_score: 0,
    };

    pub const MIN: Score = Score {
        hard_score: i64::MIN,
        medium_score: i64::MIN,
        soft_score: i64::MIN,
    };

    pub fn new(hard_score: i64, medium_score: i64, soft_score: i64) -> Self {
        Score {
            hard_score,
            medium_score,
            soft_score,
        }
    }

    pub fn of(level: ScoreLevel, score: i64) -> Self {
        match level {
            ScoreLevel::Hard => Score::hard(score),
            ScoreLevel::Medium => Score::medium(score),
            ScoreLevel::Soft => Score::soft(score),
        }
    }

    pub fn hard(hard_score: i64) -> Self {
        Score {
            hard_score,
            ..Score::ZERO
        }
    }

    pub fn medium(medium_score: i64) -> Self {
        Score {
            medium_score,
            ..Score::ZERO
        }
    }

    pub fn soft(soft_score: i64) -> Self {
        Score {
            soft_score,
            ..Score::ZERO
        }
    }

    pub fn zero() -> Self {
        Score::ZERO
    }

    pub fn level(&self, level: ScoreLevel) -> i64 {
        match level {
            ScoreLevel::Hard => self.hard_score,
            ScoreLevel::Medium => self.medium_score,
            ScoreLevel::Soft => self.soft_score,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.hard_score >= 0
    }

    pub fn is_infeasible(&self) -> bool {
        !self.is_feasible()
    }

    /// The most significant level on which `self` and `other` differ, with
    /// the difference `self - other` on that level.
    pub fn first_difference(&self, other: &Score) -> Option<(ScoreLevel, i64)> {
        [ScoreLevel::Hard, ScoreLevel::Medium, ScoreLevel::Soft]
            .into_iter()
            .map(|level| (level, self.level(level) - other.level(level)))
            .find(|&(_, delta)| delta != 0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}hard/{}medium/{}soft",
            self.hard_score, self.medium_score, self.soft_score
        )
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard_score
            .cmp(&other.hard_score)
            .then_with(|| self.medium_score.cmp(&other.medium_score))
            .then_with(|| self.soft_score.cmp(&other.soft_score))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, score| acc + score)
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score + other.hard_score,
            medium_score: self.medium_score + other.medium_score,
            soft_score: self.soft_score + other.soft_score,
        }
    }
}

impl AddAssign<Score> for Score {
    fn add_assign(&mut self, other: Score) {
        self.hard_score += other.hard_score;
        self.medium_score += other.medium_score;
        self.soft_score += other.soft_score;
    }
}

impl Sub<Score> for Score {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score - other.hard_score,
            medium_score: self.medium_score - other.medium_score,
            soft_score: self.soft_score - other.soft_score,
        }
    }
}

impl SubAssign<Score> for Score {
    fn sub_assign(&mut self, other: Score) {
        self.hard_score -= other.hard_score;
        self.medium_score -= other.medium_score;
        self.soft_score -= other.soft_score;
    }
}

impl Neg for Score {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Score {
            hard_score: -self.hard_score,
            medium_score: -self.medium_score,
            soft_score: -self.soft_score,
        }
    }
}

/// Contribution of each constraint, by name, to a total score.
#[derive(Default, Clone, Debug, PartialEq, Serialize)]
pub struct ScoreAnalysis {
    pub scores: FxHashMap<&'static str, Score>,
}

impl ScoreAnalysis {
    pub fn total_score(&self) -> Score {
        self.scores.values().copied().sum()
    }
}
