mod question_vm;
mod quiz_vm;
mod results_vm;

pub use question_vm::{AnswerOptionVm, FeedbackVm, QuestionVm, map_current_question};
pub use quiz_vm::{PendingWrite, QuizIntent, QuizVm, start_quiz};
pub use results_vm::{ResultsVm, map_results};
