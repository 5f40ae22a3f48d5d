use quiz_core::model::ScoreReport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub percentage_label: String,
    pub passed: bool,
    pub verdict: &'static str,
}

#[must_use]
pub fn map_results(report: &ScoreReport) -> ResultsVm {
    let passed = report.is_passing();
    ResultsVm {
        score_label: format!("You scored {} out of {}", report.score(), report.total()),
        percentage_label: format!("Percentage: {}%", report.percentage_label()),
        passed,
        verdict: if passed {
            "Congratulations! You passed!"
        } else {
            "Keep practicing to improve your score."
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_report() {
        let vm = map_results(&ScoreReport::new(4, 5));
        assert_eq!(vm.score_label, "You scored 4 out of 5");
        assert_eq!(vm.percentage_label, "Percentage: 80.00%");
        assert!(vm.passed);
        assert_eq!(vm.verdict, "Congratulations! You passed!");
    }

    #[test]
    fn failing_report() {
        let vm = map_results(&ScoreReport::new(3, 5));
        assert_eq!(vm.percentage_label, "Percentage: 60.00%");
        assert!(!vm.passed);
        assert_eq!(vm.verdict, "Keep practicing to improve your score.");
    }

    #[test]
    fn empty_quiz_fails_at_zero() {
        let vm = map_results(&ScoreReport::new(0, 0));
        assert_eq!(vm.score_label, "You scored 0 out of 0");
        assert_eq!(vm.percentage_label, "Percentage: 0.00%");
        assert!(!vm.passed);
    }
}
