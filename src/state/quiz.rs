// Quiz state - selected options and the last feedback per quiz
use crate::deck::Quiz;
use crate::error::QuizError;
use std::collections::HashMap;
use std::time::Instant;

pub const INCORRECT_MESSAGE: &str =
    "❌ Not quite right. Try again! The correct answer is highlighted above.";

#[derive(Clone, Debug, PartialEq)]
pub enum QuizFeedback {
    Correct(String),
    /// Carries the value of the option to highlight
    Incorrect { correct: String },
}

impl QuizFeedback {
    pub fn message(&self) -> &str {
        match self {
            QuizFeedback::Correct(message) => message,
            QuizFeedback::Incorrect { .. } => INCORRECT_MESSAGE,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, QuizFeedback::Correct(_))
    }
}

#[derive(Default)]
pub struct QuizState {
    selections: HashMap<String, String>,
    feedback: HashMap<String, (QuizFeedback, Instant)>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, quiz: &str, value: &str) {
        self.selections.insert(quiz.to_string(), value.to_string());
    }

    pub fn selected(&self, quiz: &str) -> Option<&str> {
        self.selections.get(quiz).map(String::as_str)
    }

    pub fn check(&mut self, quiz: &Quiz) -> Result<&QuizFeedback, QuizError> {
        let selected = self.selected(&quiz.name).ok_or(QuizError::NoSelection)?;
        let feedback = if selected == quiz.answer {
            QuizFeedback::Correct(quiz.feedback.clone())
        } else {
            QuizFeedback::Incorrect {
                correct: quiz.answer.clone(),
            }
        };

        self.feedback
            .insert(quiz.name.clone(), (feedback, Instant::now()));
        Ok(&self.feedback[&quiz.name].0)
    }

    /// Last feedback and when it was produced
    pub fn feedback(&self, quiz: &str) -> Option<(&QuizFeedback, Instant)> {
        self.feedback.get(quiz).map(|(feedback, at)| (feedback, *at))
    }

    pub fn latest_feedback(&self) -> Option<Instant> {
        self.feedback.values().map(|(_, at)| *at).max()
    }

    /// Option to mark as the right answer after a wrong guess
    pub fn highlighted_answer(&self, quiz: &str) -> Option<&str> {
        match self.feedback.get(quiz) {
            Some((QuizFeedback::Incorrect { correct }, _)) => Some(correct),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::QuizOption;

    fn quiz() -> Quiz {
        Quiz {
            name: "q1".into(),
            question: "Which keyword creates an object?".into(),
            options: vec![
                QuizOption {
                    value: "class".into(),
                    label: "class".into(),
                },
                QuizOption {
                    value: "new".into(),
                    label: "new".into(),
                },
            ],
            answer: "new".into(),
            feedback: "✅ Correct!".into(),
        }
    }

    #[test]
    fn test_check_without_selection() {
        let mut state = QuizState::new();
        assert_eq!(state.check(&quiz()).unwrap_err(), QuizError::NoSelection);
        assert!(state.feedback("q1").is_none());
    }

    #[test]
    fn test_correct_answer() {
        let mut state = QuizState::new();
        state.select("q1", "new");
        let feedback = state.check(&quiz()).expect("feedback").clone();
        assert_eq!(feedback, QuizFeedback::Correct("✅ Correct!".into()));
        assert!(feedback.is_correct());
        assert_eq!(state.highlighted_answer("q1"), None);
    }

    #[test]
    fn test_wrong_answer_highlights_correct_option() {
        let mut state = QuizState::new();
        state.select("q1", "class");
        let feedback = state.check(&quiz()).expect("feedback");
        assert_eq!(feedback.message(), INCORRECT_MESSAGE);
        assert_eq!(state.highlighted_answer("q1"), Some("new"));
    }

    #[test]
    fn test_retry_replaces_feedback() {
        let mut state = QuizState::new();
        state.select("q1", "class");
        state.check(&quiz()).expect("feedback");
        state.select("q1", "new");
        state.check(&quiz()).expect("feedback");
        let (feedback, _) = state.feedback("q1").expect("stored");
        assert!(feedback.is_correct());
        assert_eq!(state.selected("q1"), Some("new"));
    }

    #[test]
    fn test_no_selection_message() {
        assert_eq!(QuizError::NoSelection.to_string(), "Please select an answer first! 🤔");
    }
}
