use quiz_core::model::OptionId;
use services::QuizSession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub option: OptionId,
    pub text: String,
    pub selected: bool,
    /// Highlighted as correct; only set while feedback is visible.
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub verdict: &'static str,
    pub correct_answers_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub text: String,
    pub skill: Option<String>,
    pub multiple: bool,
    pub options: Vec<AnswerOptionVm>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub feedback: Option<FeedbackVm>,
}

impl QuestionVm {
    #[must_use]
    pub fn input_type(&self) -> &'static str {
        if self.multiple { "checkbox" } else { "radio" }
    }
}

/// Map the current question for the presenter. `None` when there is nothing to show.
#[must_use]
pub fn map_current_question(session: &QuizSession, show_feedback: bool) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let selection = session.current_answer();

    let options = question
        .answers()
        .iter()
        .map(|answer| AnswerOptionVm {
            option: answer.option().clone(),
            text: answer.text().to_string(),
            selected: selection.is_some_and(|selection| selection.contains(answer.option())),
            highlighted: show_feedback && question.is_correct_option(answer.option()),
        })
        .collect();

    let feedback = show_feedback.then(|| {
        let correct = session.is_current_answer_correct();
        FeedbackVm {
            correct,
            verdict: if correct { "Correct!" } else { "Incorrect." },
            correct_answers_label: format!(
                "Correct answer(s): {}",
                question.correct_answer_text()
            ),
        }
    });

    let skill = Some(question.skill_tested().trim())
        .filter(|skill| !skill.is_empty())
        .map(str::to_string);

    Some(QuestionVm {
        index: session.current_index(),
        text: question.text().to_string(),
        skill,
        multiple: question.is_multiple_answers(),
        options,
        can_go_previous: !session.is_first(),
        can_go_next: !session.is_last(),
        feedback,
    })
}
