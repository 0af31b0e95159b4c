use std::{io::Write, sync::Arc};

use colored::Colorize;

use crate::{curriculum::Curriculum, monitor::StateMachine};

#[derive(PartialEq, Eq, Debug)]
pub enum ListerState {
    Loaded,
    List { index_module: usize },
    Error { reason: String },
    Finished,
}

/// Lists every module of a curriculum with its number of lessons and
/// challenges.
pub struct Lister<W> {
    pub curriculum: Arc<Curriculum>,
    pub output: W,
    pub state: ListerState,
}

impl<W: Write> Lister<W> {
    pub fn new(curriculum: Arc<Curriculum>, output: W) -> Self {
        Self { curriculum, output, state: ListerState::Loaded }
    }
}

impl<W: Write> StateMachine for Lister<W> {
    fn run(self) -> Self {
        let Self { curriculum, mut output, state } = self;

        let state = match state {
            ListerState::Loaded => {
                let module_count = curriculum.module_count();
                let written = writeln!(
                    output,
                    "{} modules available\n ",
                    module_count.to_string().bold()
                );

                match (written, module_count) {
                    (Err(err), _) => ListerState::Error { reason: err.to_string() },
                    (Ok(_), 0) => ListerState::Error {
                        reason: "🚫 no modules found".to_string(),
                    },
                    (Ok(_), _) => ListerState::List { index_module: 0 },
                }
            }
            ListerState::List { index_module } => {
                let module = &curriculum.modules()[index_module];
                let challenge_count = module
                    .lessons
                    .iter()
                    .filter(|lesson| !lesson.is_informational())
                    .count();

                let written = writeln!(
                    output,
                    "{}. {} {}",
                    index_module + 1,
                    module.title.white().bold(),
                    format!(
                        "({} lessons, {} challenges)",
                        module.lessons.len(),
                        challenge_count
                    )
                    .white()
                    .dimmed()
                );

                match written {
                    Err(err) => ListerState::Error { reason: err.to_string() },
                    Ok(_) if index_module + 1 < curriculum.module_count() => {
                        ListerState::List { index_module: index_module + 1 }
                    }
                    Ok(_) => ListerState::Finished,
                }
            }
            ListerState::Error { reason } => {
                log::error!("listing modules failed: {reason}");
                let _ = writeln!(output, "\n⚠ Error: {}", reason.red().bold());

                ListerState::Finished
            }
            ListerState::Finished => ListerState::Finished,
        };

        Self { curriculum, output, state }
    }

    fn is_finished(&self) -> bool {
        self.state == ListerState::Finished
    }
}
