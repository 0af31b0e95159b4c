//! The curriculum store: an immutable, ordered catalog of modules.
//!
//! A [Curriculum] is never mutated once built, so it is shared between
//! readers behind an `Arc` and looked up purely by position.

use thiserror::Error;

use crate::models::{Lesson, Module};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurriculumError {
    #[error("no module at index {index}, curriculum has {count} modules")]
    ModuleOutOfRange { index: usize, count: usize },
    #[error(
        "no lesson at index {index} in module {module}, module has {count} \
         lessons"
    )]
    LessonOutOfRange { module: usize, index: usize, count: usize },
}

#[derive(Clone, Debug, Default)]
pub struct Curriculum {
    title: String,
    modules: Vec<Module>,
}

impl Curriculum {
    pub fn new(title: impl Into<String>, modules: Vec<Module>) -> Self {
        Self { title: title.into(), modules }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn module(&self, index: usize) -> Result<&Module, CurriculumError> {
        self.modules.get(index).ok_or(CurriculumError::ModuleOutOfRange {
            index,
            count: self.modules.len(),
        })
    }

    pub fn module_title(&self, index: usize) -> Result<&str, CurriculumError> {
        Ok(&self.module(index)?.title)
    }

    pub fn lesson_count(&self, index: usize) -> Result<usize, CurriculumError> {
        Ok(self.module(index)?.lessons.len())
    }

    pub fn lesson(
        &self,
        index_module: usize,
        index_lesson: usize,
    ) -> Result<&Lesson, CurriculumError> {
        let module = self.module(index_module)?;

        module.lessons.get(index_lesson).ok_or(
            CurriculumError::LessonOutOfRange {
                module: index_module,
                index: index_lesson,
                count: module.lessons.len(),
            },
        )
    }

    /// Total number of lessons across all modules.
    pub fn lesson_total(&self) -> usize {
        self.modules.iter().map(|module| module.lessons.len()).sum()
    }
}
