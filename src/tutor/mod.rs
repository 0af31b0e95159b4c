//! The interactive tutorial session.
//!
//! [Tutor] is the presentation layer sitting on top of the
//! [Navigator](crate::navigator::Navigator): it renders whatever the
//! navigator returns and turns user commands into navigator calls. It never
//! touches the cursor itself.
//!
//! Commands are read one line at a time:
//!
//! - `1`, `2`, ...: open a module, numbered as in the module list.
//! - `n` / `next`: move on to the next lesson.
//! - `s` / `submit`: submit code for the current challenge. The submission
//!   ends with a line containing only `.`.
//! - `m` / `modules`, `h` / `home`, `a` / `about`: switch views.
//! - `q` / `quit`: leave the tutorial.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use strum_macros::Display;

use crate::{
    constants::SUBMISSION_END,
    monitor::StateMachine,
    navigator::{Cursor, Navigator, NavigatorError},
    str_res::{ABOUT, CHALLENGE, HELP, INFORMATIONAL, WELCOME},
    validator::{Verdict, MSG_FAIL, MSG_PASS},
};

use self::render::{format_hints, plain_text};

pub mod render;

#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum TutorState {
    Home,
    About,
    Modules,
    Lesson,
    Submission,
    /// The last lesson was left behind, the presentation falls back to the
    /// module list afterwards.
    Complete,
    Await,
    Error {
        reason: String,
    },
    Finish,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Next,
    Submit,
    Modules,
    Home,
    About,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    /// Module numbers start at 1, as displayed in the module list.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if let Ok(number) = line.parse::<usize>() {
            return match number.checked_sub(1) {
                Some(index_module) => Self::Select(index_module),
                None => Self::Unknown(line.to_string()),
            };
        }

        match line.to_lowercase().as_str() {
            "" => Self::Empty,
            "n" | "next" => Self::Next,
            "s" | "submit" => Self::Submit,
            "m" | "modules" => Self::Modules,
            "h" | "home" => Self::Home,
            "a" | "about" => Self::About,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub struct Tutor<R, W> {
    navigator: Navigator,
    input: R,
    output: W,
    state: TutorState,
}

impl<R: BufRead, W: Write> Tutor<R, W> {
    pub fn new(
        navigator: Navigator,
        input: R,
        output: W,
        state: TutorState,
    ) -> Self {
        Self { navigator, input, output, state }
    }

    pub fn state(&self) -> &TutorState {
        &self.state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn step(&mut self, state: TutorState) -> io::Result<TutorState> {
        let Self { navigator, input, output, .. } = self;

        match state {
            TutorState::Home => {
                navigator.reset();

                writeln!(
                    output,
                    "\n🏠 {}\n{WELCOME}\n\n{}",
                    navigator.curriculum().title().bold(),
                    HELP.dimmed()
                )?;

                Ok(TutorState::Await)
            }
            TutorState::About => {
                writeln!(output, "\n📖 {}\n{ABOUT}", "About".bold())?;

                Ok(TutorState::Await)
            }
            TutorState::Modules => {
                let curriculum = navigator.curriculum();
                writeln!(output, "\n📚 {}", "Available modules".bold())?;

                for (index_module, module) in
                    curriculum.modules().iter().enumerate()
                {
                    writeln!(
                        output,
                        "  {}. {}",
                        index_module + 1,
                        module.title.white().bold()
                    )?;
                }

                Ok(TutorState::Await)
            }
            TutorState::Lesson => {
                let Cursor::InLesson { index_module, .. } = navigator.cursor()
                else {
                    return Ok(TutorState::Error {
                        reason: NavigatorError::InvalidState(navigator.cursor())
                            .to_string(),
                    });
                };

                let module_title = navigator.curriculum().module_title(index_module);
                let (done, total) = navigator.progress();

                match (module_title, navigator.current_lesson()) {
                    (Ok(module_title), Ok(lesson)) => {
                        let tag = match lesson.is_informational() {
                            true => INFORMATIONAL.clone(),
                            false => CHALLENGE.clone(),
                        };

                        writeln!(
                            output,
                            "\n{} - {} {tag} [{}/{total}]\n\n{}\n",
                            module_title.green().bold(),
                            lesson.title.green(),
                            done + 1,
                            plain_text(&lesson.content)
                        )?;
                        writeln!(output, "{}", HELP.dimmed())?;

                        Ok(TutorState::Await)
                    }
                    (Err(err), _) => {
                        Ok(TutorState::Error { reason: err.to_string() })
                    }
                    (_, Err(err)) => {
                        Ok(TutorState::Error { reason: err.to_string() })
                    }
                }
            }
            TutorState::Submission => {
                writeln!(
                    output,
                    "\n✍️  Enter your code, finish with a line containing only \
                     '{SUBMISSION_END}'"
                )?;
                output.flush()?;

                let mut submission = String::new();
                let mut line = String::new();
                loop {
                    line.clear();
                    if input.read_line(&mut line)? == 0
                        || line.trim_end() == SUBMISSION_END
                    {
                        break;
                    }
                    submission.push_str(&line);
                }

                match navigator.check(&submission) {
                    Ok(Verdict::Pass) => {
                        writeln!(output, "\n✅ {}", MSG_PASS.green().bold())?;
                        Ok(TutorState::Await)
                    }
                    Ok(Verdict::Fail { hints }) => {
                        writeln!(
                            output,
                            "\n{}\n{}",
                            MSG_FAIL.red(),
                            format_hints(&hints, "❌ try again")
                        )?;
                        Ok(TutorState::Await)
                    }
                    Err(err) => Ok(TutorState::Error { reason: err.to_string() }),
                }
            }
            TutorState::Complete => {
                let (_, total) = navigator.progress();
                writeln!(
                    output,
                    "\n🏁 {} All {total} lessons done.",
                    "Curriculum complete!".green().bold()
                )?;

                navigator.reset();

                Ok(TutorState::Modules)
            }
            TutorState::Await => {
                write!(output, "\n> ")?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Ok(TutorState::Finish);
                }

                Ok(Self::dispatch(navigator, Command::parse(&line)))
            }
            TutorState::Error { reason } => {
                writeln!(output, "\n⚠ Error: {}", reason.red().bold())?;

                Ok(TutorState::Await)
            }
            TutorState::Finish => Ok(TutorState::Finish),
        }
    }

    fn dispatch(navigator: &mut Navigator, command: Command) -> TutorState {
        log::debug!("handling command {command:?}");

        match command {
            Command::Select(index_module) => {
                match navigator.select_module(index_module) {
                    Ok(_) => TutorState::Lesson,
                    Err(NavigatorError::OutOfRange(_)) => TutorState::Error {
                        reason: format!(
                            "there is no module {} with lessons to open",
                            index_module + 1
                        ),
                    },
                    Err(err) => TutorState::Error { reason: err.to_string() },
                }
            }
            Command::Next => match navigator.advance() {
                Ok(Cursor::Complete) => TutorState::Complete,
                Ok(_) => TutorState::Lesson,
                Err(err) => TutorState::Error { reason: err.to_string() },
            },
            Command::Submit => match navigator.current_lesson() {
                Ok(lesson) if lesson.is_informational() => TutorState::Error {
                    reason: format!("'{}' has no challenge", lesson.title),
                },
                Ok(_) => TutorState::Submission,
                Err(err) => TutorState::Error { reason: err.to_string() },
            },
            Command::Modules => TutorState::Modules,
            Command::Home => TutorState::Home,
            Command::About => TutorState::About,
            Command::Quit => TutorState::Finish,
            Command::Empty => TutorState::Await,
            Command::Unknown(command) => TutorState::Error {
                reason: format!("unknown command '{command}'\n{HELP}"),
            },
        }
    }
}

impl<R: BufRead, W: Write> StateMachine for Tutor<R, W> {
    fn run(mut self) -> Self {
        let state = std::mem::replace(&mut self.state, TutorState::Finish);
        log::debug!("tutor state: {state}");

        self.state = match self.step(state) {
            Ok(state) => state,
            Err(err) => {
                log::error!("terminal I/O failed: {err}");
                TutorState::Finish
            }
        };

        self
    }

    fn is_finished(&self) -> bool {
        self.state == TutorState::Finish
    }
}
