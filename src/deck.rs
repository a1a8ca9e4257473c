use crate::error::{DeckError, SlidesError};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUNDLED_DECK: &str = include_str!("../assets/deck.toml");

/// An ordered set of slides
#[derive(Deserialize, Clone, Debug)]
pub struct Deck {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub sections: Vec<Section>,
}

/// One slide. `id` is stable and used for progress and visibility.
#[derive(Deserialize, Clone, Debug)]
pub struct Section {
    pub id: String,
    pub nav_label: String,
    pub title: String,
    /// Markdown
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub playground: Option<PlaygroundDef>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PlaygroundDef {
    pub code: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Quiz {
    /// Unique within the deck; keys selections and feedback
    pub name: String,
    pub question: String,
    pub options: Vec<QuizOption>,
    /// `value` of the correct option
    pub answer: String,
    /// Shown when answered correctly
    pub feedback: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct QuizOption {
    pub value: String,
    pub label: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Exercise {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl Deck {
    /// The deck compiled into the binary
    pub fn bundled() -> Result<Self, SlidesError> {
        Self::from_toml(BUNDLED_DECK)
    }

    pub fn load(path: &Path) -> Result<Self, SlidesError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, SlidesError> {
        let deck: Deck = toml::from_str(contents)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.sections.is_empty() {
            return Err(DeckError::NoSections);
        }

        let mut seen = HashSet::new();
        let mut quiz_names = HashSet::new();
        let mut exercise_ids = HashSet::new();
        for (position, section) in self.sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                return Err(DeckError::EmptySectionId(position + 1));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(DeckError::DuplicateSectionId(section.id.clone()));
            }

            for quiz in &section.quizzes {
                if !quiz_names.insert(quiz.name.as_str()) {
                    return Err(DeckError::DuplicateQuizName(quiz.name.clone()));
                }
                if quiz.options.len() < 2 {
                    return Err(DeckError::TooFewOptions {
                        section: section.id.clone(),
                        quiz: quiz.name.clone(),
                    });
                }
                if !quiz.options.iter().any(|o| o.value == quiz.answer) {
                    return Err(DeckError::UnknownAnswer {
                        section: section.id.clone(),
                        quiz: quiz.name.clone(),
                        answer: quiz.answer.clone(),
                    });
                }
            }

            for exercise in &section.exercises {
                if !exercise_ids.insert(exercise.id.as_str()) {
                    return Err(DeckError::DuplicateExerciseId(exercise.id.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn quiz(&self, name: &str) -> Option<&Quiz> {
        self.sections
            .iter()
            .flat_map(|s| s.quizzes.iter())
            .find(|q| q.name == name)
    }
}

impl Section {
    /// Boxes that animate in after the section itself
    pub fn item_count(&self) -> usize {
        usize::from(self.playground.is_some())
            + self.quizzes.len()
            + self.exercises.len()
            + usize::from(!self.resources.is_empty())
    }

    /// Plain text of the body's paragraphs, joined by spaces
    pub fn paragraph_text(&self) -> String {
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_paragraph = false;

        for event in Parser::new(&self.body) {
            match event {
                Event::Start(Tag::Paragraph) => {
                    in_paragraph = true;
                    current.clear();
                }
                Event::End(TagEnd::Paragraph) => {
                    in_paragraph = false;
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                }
                Event::Text(text) | Event::Code(text) if in_paragraph => current.push_str(&text),
                Event::SoftBreak | Event::HardBreak if in_paragraph => current.push(' '),
                _ => {}
            }
        }
        paragraphs.join(" ")
    }
}
