//! Curriculum format checks.
//!
//! Walks every module and lesson of a curriculum, making sure titles are set,
//! modules are not empty and that reference solutions pass their own
//! lesson's validator.

use std::sync::Arc;

use colored::Colorize;
use indicatif::ProgressBar;

use crate::{
    curriculum::Curriculum, models::Lesson, monitor::StateMachine,
    validator::Validator,
};

#[derive(PartialEq, Eq, Debug)]
pub enum CheckerState {
    Loaded,
    Curriculum,
    Module {
        index_module: usize,
    },
    Lesson {
        index_module: usize,
        index_lesson: usize,
    },
    Fail {
        reason: String,
    },
    Pass,
    Finish,
}

#[derive(Debug)]
pub struct Checker {
    progress: ProgressBar,
    state: CheckerState,
    curriculum: Arc<Curriculum>,
    valid: bool,
}

impl Checker {
    pub fn new(progress: ProgressBar, curriculum: Arc<Curriculum>) -> Self {
        Self { progress, state: CheckerState::Loaded, curriculum, valid: false }
    }

    /// Whether the check ran to completion without finding any issue.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn state(&self) -> &CheckerState {
        &self.state
    }
}

fn check_lesson(lesson: &Lesson) -> Result<(), String> {
    if lesson.title.trim().is_empty() {
        return Err("lesson has an empty title".to_string());
    }

    match (&lesson.validator, &lesson.solution) {
        (Some(Validator::Rules(rules)), _) if rules.is_empty() => {
            Err(format!("'{}' has a validator without rules", lesson.title))
        }
        (Some(validator), Some(solution)) if !validator.check(solution) => {
            Err(format!(
                "the solution to '{}' does not pass its validator: {}",
                lesson.title, validator
            ))
        }
        (None, Some(_)) => Err(format!(
            "'{}' has a solution but nothing to submit",
            lesson.title
        )),
        _ => Ok(()),
    }
}

impl StateMachine for Checker {
    fn run(self) -> Self {
        let Self { progress, state, curriculum, valid } = self;

        let state = match state {
            CheckerState::Loaded => {
                progress.println("\n🔍 Checking curriculum format");

                CheckerState::Curriculum
            }
            CheckerState::Curriculum => {
                if curriculum.module_count() == 0 {
                    progress.println(format!(
                        "\n{} ❌",
                        curriculum.title().red().bold()
                    ));

                    CheckerState::Fail {
                        reason: "curriculum has no modules".to_string(),
                    }
                } else {
                    progress.println(format!(
                        "\n{} ✅",
                        curriculum.title().green().bold()
                    ));

                    progress.inc(1);

                    CheckerState::Module { index_module: 0 }
                }
            }
            CheckerState::Module { index_module } => {
                let module = &curriculum.modules()[index_module];

                if module.title.trim().is_empty() || module.lessons.is_empty() {
                    progress.println(format!(
                        "╰─{} ❌",
                        module.title.red().bold()
                    ));

                    CheckerState::Fail {
                        reason: format!(
                            "module {} needs a title and at least one lesson",
                            index_module + 1
                        ),
                    }
                } else {
                    progress.println(format!(
                        "╰─{} ✅",
                        module.title.green().bold()
                    ));

                    progress.inc(1);

                    CheckerState::Lesson { index_module, index_lesson: 0 }
                }
            }
            CheckerState::Lesson { index_module, index_lesson } => {
                let module = &curriculum.modules()[index_module];
                let lesson = &module.lessons[index_lesson];

                match check_lesson(lesson) {
                    Err(reason) => {
                        progress.println(format!(
                            "  ╰─{} ❌",
                            lesson.title.red().bold()
                        ));

                        CheckerState::Fail { reason }
                    }
                    Ok(()) => {
                        progress.println(format!(
                            "  ╰─{} ✅",
                            lesson.title.green().bold()
                        ));

                        progress.inc(1);

                        match (
                            index_module + 1 < curriculum.module_count(),
                            index_lesson + 1 < module.lessons.len(),
                        ) {
                            (_, true) => CheckerState::Lesson {
                                index_module,
                                index_lesson: index_lesson + 1,
                            },
                            (true, false) => CheckerState::Module {
                                index_module: index_module + 1,
                            },
                            (false, false) => CheckerState::Pass,
                        }
                    }
                }
            }
            CheckerState::Fail { reason } => {
                log::error!("curriculum check failed: {reason}");

                progress.finish_and_clear();
                progress.println(format!("\n⚠ Error: {}", reason.red().bold()));

                CheckerState::Finish
            }
            CheckerState::Pass => {
                progress.finish_and_clear();
                progress.println(
                    "\n🏁 Curriculum format is valid".green().bold().to_string(),
                );

                return Self {
                    progress,
                    state: CheckerState::Finish,
                    curriculum,
                    valid: true,
                };
            }
            CheckerState::Finish => CheckerState::Finish,
        };

        Self { progress, state, curriculum, valid }
    }

    fn is_finished(&self) -> bool {
        self.state == CheckerState::Finish
    }
}
