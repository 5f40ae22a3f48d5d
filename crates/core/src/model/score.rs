/// Passing threshold, inclusive.
pub const PASSING_PERCENTAGE: u32 = 80;

/// Final (or partial) result of a quiz run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    score: u32,
    total: u32,
}

impl ScoreReport {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        Self { score, total }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage of correct answers; 0 when there are no questions.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / f64::from(self.total)
    }

    /// Percentage with two decimals, e.g. `"80.00"`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage())
    }

    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.total > 0
            && u64::from(self.score) * 100 >= u64::from(self.total) * u64::from(PASSING_PERCENTAGE)
    }
}
