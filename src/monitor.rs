use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use colored::Colorize;
use indicatif::ProgressBar;
use thiserror::Error;

use crate::{
    checker::Checker,
    curriculum::Curriculum,
    lister::Lister,
    navigator::{Navigator, NavigatorError},
    parsing::{load_builtin, load_curriculum, ParsingError},
    str_res::TUTOR,
    tutor::{Tutor, TutorState},
};

pub trait StateMachine {
    fn run(self) -> Self;
    fn is_finished(&self) -> bool;
}

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("{0}")]
    ParsingError(#[from] ParsingError),
    #[error("{0}")]
    NavigatorError(#[from] NavigatorError),
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("curriculum check failed")]
    CheckFailed,
}

/// Loads a curriculum and hands it over to the tutor, lister or checker.
pub struct Monitor {
    curriculum: Arc<Curriculum>,
}

impl Monitor {
    /// Loads the curriculum at `path_curriculum`, or the built-in one.
    pub fn new(path_curriculum: Option<&str>) -> Result<Self, TutorError> {
        log::debug!("Creating new Monitor instance");

        let curriculum = match path_curriculum {
            Some(path) => load_curriculum(path)?,
            None => load_builtin()?,
        };

        log::debug!("Monitor instance created successfully");
        Ok(Self::from_curriculum(curriculum))
    }

    pub fn from_curriculum(curriculum: Curriculum) -> Self {
        Self { curriculum: Arc::new(curriculum) }
    }

    /// Creates a new [Tutor] session. When `index_module` is set, the session
    /// opens straight into that module's first lesson.
    pub fn into_tutor<R: BufRead, W: Write>(
        self,
        index_module: Option<usize>,
        input: R,
        mut output: W,
    ) -> Result<Tutor<R, W>, TutorError> {
        self.greet(&mut output)?;

        let Self { curriculum } = self;
        let mut navigator = Navigator::new(curriculum);

        let state = match index_module {
            Some(index_module) => {
                navigator.select_module(index_module)?;
                TutorState::Lesson
            }
            None => TutorState::Home,
        };

        Ok(Tutor::new(navigator, input, output, state))
    }

    pub fn into_lister<W: Write>(
        self,
        mut output: W,
    ) -> Result<Lister<W>, TutorError> {
        self.greet(&mut output)?;

        Ok(Lister::new(self.curriculum, output))
    }

    pub fn into_checker(self) -> Checker {
        let Self { curriculum } = self;

        let step_count =
            1 + curriculum.module_count() + curriculum.lesson_total();
        let progress = ProgressBar::new(step_count as u64);
        progress.println(TUTOR.clone());

        Checker::new(progress, curriculum)
    }

    fn greet<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        let Self { curriculum } = self;

        writeln!(output, "{}", *TUTOR)?;
        writeln!(
            output,
            "\n🎓 {} · {} modules, {} lessons",
            curriculum.title().to_uppercase().white().bold(),
            curriculum.module_count(),
            curriculum.lesson_total()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor as Input;

    use super::*;
    use crate::navigator::Cursor;

    #[test]
    fn test_into_tutor_at_module() {
        let monitor = Monitor::new(None).unwrap();
        let tutor = monitor
            .into_tutor(Some(5), Input::new(Vec::new()), Vec::new())
            .unwrap();

        assert_eq!(tutor.state(), &TutorState::Lesson);
        assert_eq!(
            tutor.navigator().cursor(),
            Cursor::InLesson { index_module: 5, index_lesson: 0 }
        );
        assert!(String::from_utf8_lossy(tutor.output())
            .contains("STELLAR SUPREME TUTORIAL"));
    }

    #[test]
    fn test_into_tutor_out_of_range() {
        let monitor = Monitor::new(None).unwrap();

        assert!(matches!(
            monitor.into_tutor(Some(42), Input::new(Vec::new()), Vec::new()),
            Err(TutorError::NavigatorError(NavigatorError::OutOfRange(_)))
        ));
    }

    #[test]
    fn test_missing_curriculum_file() {
        assert!(matches!(
            Monitor::new(Some("./missing.yml")),
            Err(TutorError::ParsingError(ParsingError::FileOpenError(_)))
        ));
    }
}
