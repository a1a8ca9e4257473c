use thiserror::Error;

/// Errors raised by storage, config, deck loading and narration
#[derive(Debug, Error)]
pub enum SlidesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("could not determine {0} directory")]
    NoDirectory(&'static str),

    #[error("storage unavailable")]
    StorageUnavailable,

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("speech program `{program}` failed: {source}")]
    Speech {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems in a deck file
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has no sections")]
    NoSections,

    #[error("section #{0} has an empty id")]
    EmptySectionId(usize),

    #[error("duplicate section id `{0}`")]
    DuplicateSectionId(String),

    #[error("duplicate quiz name `{0}`")]
    DuplicateQuizName(String),

    #[error("duplicate exercise id `{0}`")]
    DuplicateExerciseId(String),

    #[error("quiz `{quiz}` in section `{section}` needs at least two options")]
    TooFewOptions { section: String, quiz: String },

    #[error("quiz `{quiz}` in section `{section}` names unknown answer `{answer}`")]
    UnknownAnswer {
        section: String,
        quiz: String,
        answer: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Please select an answer first! 🤔")]
    NoSelection,

    #[error("unknown quiz `{0}`")]
    UnknownQuiz(String),
}
