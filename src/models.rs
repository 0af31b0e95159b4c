use crate::validator::Validator;

/// An ordered group of lessons sharing a topic. Module order defines the
/// order in which the curriculum is walked.
#[derive(Clone, Debug)]
pub struct Module {
    pub title: String,
    pub lessons: Vec<Lesson>,
}

impl Module {
    pub fn new(title: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self { title: title.into(), lessons }
    }
}

/// A single unit of content. `content` is an opaque markup payload which is
/// only ever interpreted by the presentation layer.
///
/// Lessons without a [Validator] are informational only: no submission
/// applies to them. `solution` is a reference answer used when checking a
/// curriculum's format.
#[derive(Clone, Debug)]
pub struct Lesson {
    pub title: String,
    pub content: String,
    pub validator: Option<Validator>,
    pub solution: Option<String>,
}

impl Lesson {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            validator: None,
            solution: None,
        }
    }

    pub fn with_validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    pub fn is_informational(&self) -> bool {
        self.validator.is_none()
    }
}
