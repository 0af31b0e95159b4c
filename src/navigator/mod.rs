//! The navigation engine.
//!
//! A [Navigator] owns the only mutable state in the tutorial: a [Cursor]
//! into a shared, immutable [Curriculum]. The cursor walks the curriculum
//! linearly:
//!
//! ```text
//! Idle ──select_module──▶ InLesson(m, l) ──advance──▶ InLesson(m, l + 1)
//!                              │                      InLesson(m + 1, 0)
//!                              ╰───────advance──────▶ Complete ◀─╮
//!                                                        ╰──advance
//! ```
//!
//! Every operation either succeeds with its stated effect or fails leaving
//! the cursor untouched. Rendering is left to the caller, which only reacts
//! to the values returned here.

use std::sync::Arc;

use strum_macros::Display;
use thiserror::Error;

use crate::{
    curriculum::{Curriculum, CurriculumError},
    models::Lesson,
    validator::Verdict,
};

pub use self::shared::SharedNavigator;

mod shared;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("{0}")]
    OutOfRange(#[from] CurriculumError),
    #[error("no lesson is open, cursor is {0}")]
    InvalidState(Cursor),
    #[error("lesson '{0}' has nothing to submit")]
    NotApplicable(String),
    #[error("navigator lock was poisoned")]
    Poisoned,
}

/// Position of the [Navigator] in the curriculum.
///
/// `InLesson` always refers to an existing lesson.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum Cursor {
    /// No module selected yet.
    #[default]
    Idle,
    InLesson {
        index_module: usize,
        index_lesson: usize,
    },
    /// Every module has been walked through.
    Complete,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    curriculum: Arc<Curriculum>,
    cursor: Cursor,
}

impl Navigator {
    pub fn new(curriculum: Arc<Curriculum>) -> Self {
        Self { curriculum, cursor: Cursor::Idle }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Opens the first lesson of module `index_module`.
    ///
    /// Fails with [NavigatorError::OutOfRange] if the module does not exist
    /// or has no lessons.
    pub fn select_module(
        &mut self,
        index_module: usize,
    ) -> Result<&Lesson, NavigatorError> {
        if let Err(err) = self.curriculum.lesson(index_module, 0) {
            log::warn!("refusing to select module {index_module}: {err}");
            return Err(err.into());
        }

        self.cursor = Cursor::InLesson { index_module, index_lesson: 0 };
        log::debug!("selected module {index_module}, cursor is {:?}", self.cursor);

        self.current_lesson()
    }

    pub fn current_lesson(&self) -> Result<&Lesson, NavigatorError> {
        match self.cursor {
            Cursor::InLesson { index_module, index_lesson } => {
                Ok(self.curriculum.lesson(index_module, index_lesson)?)
            }
            cursor => Err(NavigatorError::InvalidState(cursor)),
        }
    }

    /// Moves to the next lesson, rolling over into the next non-empty module
    /// and finally into [Cursor::Complete].
    ///
    /// Advancing a complete cursor is a no-op. Advancing an idle cursor
    /// fails with [NavigatorError::InvalidState].
    pub fn advance(&mut self) -> Result<Cursor, NavigatorError> {
        let next = match self.cursor {
            Cursor::Idle => {
                log::warn!("cannot advance, no module selected");
                return Err(NavigatorError::InvalidState(Cursor::Idle));
            }
            Cursor::InLesson { index_module, index_lesson } => {
                let lesson_count = self.curriculum.lesson_count(index_module)?;

                if index_lesson + 1 < lesson_count {
                    Cursor::InLesson {
                        index_module,
                        index_lesson: index_lesson + 1,
                    }
                } else {
                    self.first_lesson_from(index_module + 1)
                }
            }
            Cursor::Complete => Cursor::Complete,
        };

        log::debug!("advancing from {:?} to {:?}", self.cursor, next);
        self.cursor = next;

        Ok(next)
    }

    /// Compares `submission` against the current lesson's validator.
    pub fn validate(&self, submission: &str) -> Result<bool, NavigatorError> {
        let lesson = self.current_lesson()?;

        match &lesson.validator {
            Some(validator) => {
                let passed = validator.check(submission);
                log::debug!(
                    "submission for '{}' {}",
                    lesson.title,
                    if passed { "passed" } else { "failed" }
                );

                Ok(passed)
            }
            None => {
                log::warn!("lesson '{}' has no validator", lesson.title);
                Err(NavigatorError::NotApplicable(lesson.title.clone()))
            }
        }
    }

    /// Same as [Navigator::validate], with remediation hints attached on
    /// failure.
    pub fn check(&self, submission: &str) -> Result<Verdict, NavigatorError> {
        let lesson = self.current_lesson()?;

        match &lesson.validator {
            Some(validator) => {
                let verdict = validator.verdict(submission);
                log::debug!("submission for '{}': {}", lesson.title, verdict);

                Ok(verdict)
            }
            None => {
                log::warn!("lesson '{}' has no validator", lesson.title);
                Err(NavigatorError::NotApplicable(lesson.title.clone()))
            }
        }
    }

    /// Remediation hints of the current lesson, to be displayed together.
    pub fn remediation(&self) -> Result<Vec<String>, NavigatorError> {
        let lesson = self.current_lesson()?;

        lesson
            .validator
            .as_ref()
            .map(|validator| {
                validator.hints().into_iter().map(String::from).collect()
            })
            .ok_or_else(|| NavigatorError::NotApplicable(lesson.title.clone()))
    }

    /// Returns to [Cursor::Idle].
    pub fn reset(&mut self) {
        log::debug!("resetting cursor from {:?}", self.cursor);
        self.cursor = Cursor::Idle;
    }

    /// Number of lessons strictly before the cursor, and the total number of
    /// lessons.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.curriculum.lesson_total();

        let done = match self.cursor {
            Cursor::Idle => 0,
            Cursor::InLesson { index_module, index_lesson } => {
                self.curriculum.modules()[..index_module]
                    .iter()
                    .map(|module| module.lessons.len())
                    .sum::<usize>()
                    + index_lesson
            }
            Cursor::Complete => total,
        };

        (done, total)
    }

    fn first_lesson_from(&self, index_module: usize) -> Cursor {
        self.curriculum
            .modules()
            .iter()
            .enumerate()
            .skip(index_module)
            .find(|(_, module)| !module.lessons.is_empty())
            .map(|(index_module, _)| Cursor::InLesson {
                index_module,
                index_lesson: 0,
            })
            .unwrap_or(Cursor::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Module,
        validator::{RuleSet, HINTS_DEFAULT},
    };

    /// Two modules: the first has an informational lesson followed by a
    /// `no_std` challenge, the second a single lesson.
    fn curriculum() -> Arc<Curriculum> {
        Arc::new(Curriculum::new(
            "Test",
            vec![
                Module::new(
                    "Introduction",
                    vec![
                        Lesson::new("What is Soroban?", "<p>Welcome</p>"),
                        Lesson::new("Hello", "<p>Write it</p>").with_validator(
                            RuleSet::contains_all(["no_std"])
                                .with_hints(["no_std attribute present"]),
                        ),
                    ],
                ),
                Module::new("Deploying", vec![Lesson::new("Testnet", "")]),
            ],
        ))
    }

    #[test]
    fn test_walkthrough() {
        let mut navigator = Navigator::new(curriculum());

        let lesson = navigator.select_module(0).unwrap();
        assert_eq!(lesson.title, "What is Soroban?");
        assert_eq!(navigator.current_lesson().unwrap().title, "What is Soroban?");

        assert_eq!(
            navigator.advance(),
            Ok(Cursor::InLesson { index_module: 0, index_lesson: 1 })
        );
        assert_eq!(navigator.validate("#![no_std] ..."), Ok(true));
        assert_eq!(navigator.validate("fn main(){}"), Ok(false));

        assert_eq!(
            navigator.advance(),
            Ok(Cursor::InLesson { index_module: 1, index_lesson: 0 })
        );
        assert_eq!(navigator.advance(), Ok(Cursor::Complete));
    }

    #[test]
    fn test_select_module_out_of_range() {
        let mut navigator = Navigator::new(curriculum());

        assert!(matches!(
            navigator.select_module(99),
            Err(NavigatorError::OutOfRange(
                CurriculumError::ModuleOutOfRange { index: 99, count: 2 }
            ))
        ));
        assert_eq!(navigator.cursor(), Cursor::Idle);
        assert!(matches!(
            navigator.current_lesson(),
            Err(NavigatorError::InvalidState(Cursor::Idle))
        ));
    }

    #[test]
    fn test_select_module_out_of_range_keeps_lesson() {
        let mut navigator = Navigator::new(curriculum());
        navigator.select_module(0).unwrap();
        navigator.advance().unwrap();

        let before = navigator.cursor();
        assert!(navigator.select_module(2).is_err());
        assert_eq!(navigator.cursor(), before);
    }

    #[test]
    fn test_select_every_module_opens_first_lesson() {
        let curriculum = curriculum();
        let mut navigator = Navigator::new(curriculum.clone());

        for index_module in 0..curriculum.module_count() {
            let expected = &curriculum.lesson(index_module, 0).unwrap().title;
            assert_eq!(&navigator.select_module(index_module).unwrap().title, expected);
        }
    }

    #[test]
    fn test_advance_lesson_count_times_rolls_over() {
        let curriculum = curriculum();
        let mut navigator = Navigator::new(curriculum.clone());
        navigator.select_module(0).unwrap();

        for _ in 0..curriculum.lesson_count(0).unwrap() {
            navigator.advance().unwrap();
        }
        assert_eq!(
            navigator.cursor(),
            Cursor::InLesson { index_module: 1, index_lesson: 0 }
        );

        for _ in 0..curriculum.lesson_count(1).unwrap() {
            navigator.advance().unwrap();
        }
        assert_eq!(navigator.cursor(), Cursor::Complete);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut navigator = Navigator::new(curriculum());
        navigator.select_module(1).unwrap();
        navigator.advance().unwrap();

        for _ in 0..10 {
            assert_eq!(navigator.advance(), Ok(Cursor::Complete));
        }
        assert!(matches!(
            navigator.current_lesson(),
            Err(NavigatorError::InvalidState(Cursor::Complete))
        ));
        assert!(matches!(
            navigator.validate("#![no_std]"),
            Err(NavigatorError::InvalidState(Cursor::Complete))
        ));
    }

    #[test]
    fn test_advance_idle_fails() {
        let mut navigator = Navigator::new(curriculum());

        assert_eq!(
            navigator.advance(),
            Err(NavigatorError::InvalidState(Cursor::Idle))
        );
        assert_eq!(navigator.cursor(), Cursor::Idle);
    }

    #[test]
    fn test_advance_skips_empty_modules() {
        let curriculum = Arc::new(Curriculum::new(
            "Gaps",
            vec![
                Module::new("A", vec![Lesson::new("a", "")]),
                Module::new("Empty", vec![]),
                Module::new("B", vec![Lesson::new("b", "")]),
                Module::new("Empty too", vec![]),
            ],
        ));
        let mut navigator = Navigator::new(curriculum);

        assert!(matches!(
            navigator.select_module(1),
            Err(NavigatorError::OutOfRange(
                CurriculumError::LessonOutOfRange { module: 1, .. }
            ))
        ));

        navigator.select_module(0).unwrap();
        assert_eq!(
            navigator.advance(),
            Ok(Cursor::InLesson { index_module: 2, index_lesson: 0 })
        );
        assert_eq!(navigator.advance(), Ok(Cursor::Complete));
    }

    #[test]
    fn test_validate_informational_lesson() {
        let mut navigator = Navigator::new(curriculum());
        navigator.select_module(0).unwrap();

        for submission in ["", "#![no_std]", "fn main() {}"] {
            assert_eq!(
                navigator.validate(submission),
                Err(NavigatorError::NotApplicable(
                    "What is Soroban?".to_string()
                ))
            );
        }
        assert!(navigator.remediation().is_err());
    }

    #[test]
    fn test_validate_is_deterministic() {
        let mut navigator = Navigator::new(curriculum());
        navigator.select_module(0).unwrap();
        navigator.advance().unwrap();

        for submission in ["#![no_std]", "use std::io;", ""] {
            assert_eq!(navigator.validate(submission), navigator.validate(submission));
        }
        assert_eq!(
            navigator.cursor(),
            Cursor::InLesson { index_module: 0, index_lesson: 1 }
        );
    }

    #[test]
    fn test_check_attaches_hints() {
        let mut navigator = Navigator::new(curriculum());
        navigator.select_module(0).unwrap();

        assert_eq!(
            navigator.check("#![no_std]"),
            Err(NavigatorError::NotApplicable("What is Soroban?".to_string()))
        );

        navigator.advance().unwrap();
        let validator = navigator.current_lesson().unwrap().validator.clone().unwrap();

        assert_eq!(navigator.check("#![no_std]"), Ok(Verdict::Pass));
        assert_eq!(navigator.check("fn main() {}"), Ok(validator.verdict("fn main() {}")));
        assert_eq!(
            navigator.check("fn main() {}"),
            Ok(Verdict::Fail { hints: vec!["no_std attribute present".to_string()] })
        );
    }

    #[test]
    fn test_remediation_defaults() {
        let curriculum = Arc::new(Curriculum::new(
            "Errors",
            vec![Module::new(
                "Errors",
                vec![Lesson::new("Custom errors", "")
                    .with_validator(RuleSet::contains_all(["#[contracterror]"]))],
            )],
        ));
        let mut navigator = Navigator::new(curriculum);
        navigator.select_module(0).unwrap();

        assert_eq!(
            navigator.remediation().unwrap(),
            HINTS_DEFAULT.iter().map(|hint| hint.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_progress_and_reset() {
        let mut navigator = Navigator::new(curriculum());
        assert_eq!(navigator.progress(), (0, 3));

        navigator.select_module(0).unwrap();
        navigator.advance().unwrap();
        assert_eq!(navigator.progress(), (1, 3));

        navigator.advance().unwrap();
        assert_eq!(navigator.progress(), (2, 3));

        navigator.advance().unwrap();
        assert_eq!(navigator.progress(), (3, 3));

        navigator.reset();
        assert_eq!(navigator.cursor(), Cursor::Idle);
        assert_eq!(navigator.progress(), (0, 3));
    }
}
