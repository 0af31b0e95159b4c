//! An interactive Soroban smart-contract tutorial.
//!
//! The tutorial is split between an immutable [Curriculum] of modules and
//! lessons, a [Navigator] walking it with a cursor, and presentation layers
//! (the [tutor], [lister] and [checker]) which only react to what the
//! navigator returns.

pub mod checker;
pub mod constants;
pub mod curriculum;
pub mod lister;
pub mod models;
pub mod monitor;
pub mod navigator;
pub mod parsing;
pub mod str_res;
pub mod tutor;
pub mod validator;

pub use curriculum::{Curriculum, CurriculumError};
pub use models::{Lesson, Module};
pub use navigator::{Cursor, Navigator, NavigatorError, SharedNavigator};
pub use validator::{Predicate, Rule, RuleSet, Validator, Verdict};
