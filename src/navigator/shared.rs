use std::sync::{Arc, Mutex, MutexGuard};

use crate::{models::Lesson, validator::Verdict};

use super::{Cursor, Navigator, NavigatorError};

/// A [Navigator] which can be driven from several threads.
///
/// Every operation runs under a single lock, so no two cursor updates ever
/// interleave and readers never observe a half-applied move. Lessons are
/// handed out as clones since they cannot outlive the lock guard.
#[derive(Clone, Debug)]
pub struct SharedNavigator {
    inner: Arc<Mutex<Navigator>>,
}

impl SharedNavigator {
    pub fn new(navigator: Navigator) -> Self {
        Self { inner: Arc::new(Mutex::new(navigator)) }
    }

    pub fn select_module(
        &self,
        index_module: usize,
    ) -> Result<Lesson, NavigatorError> {
        self.lock()?.select_module(index_module).cloned()
    }

    pub fn current_lesson(&self) -> Result<Lesson, NavigatorError> {
        self.lock()?.current_lesson().cloned()
    }

    pub fn advance(&self) -> Result<Cursor, NavigatorError> {
        self.lock()?.advance()
    }

    pub fn validate(&self, submission: &str) -> Result<bool, NavigatorError> {
        self.lock()?.validate(submission)
    }

    pub fn check(&self, submission: &str) -> Result<Verdict, NavigatorError> {
        self.lock()?.check(submission)
    }

    pub fn cursor(&self) -> Result<Cursor, NavigatorError> {
        Ok(self.lock()?.cursor())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Navigator>, NavigatorError> {
        self.inner.lock().map_err(|_| NavigatorError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{
        curriculum::Curriculum,
        models::Module,
        validator::{Predicate, RuleSet},
    };

    fn navigator() -> Navigator {
        let lessons = (0..10)
            .map(|i| {
                Lesson::new(format!("Lesson {i}"), "")
                    .with_validator(RuleSet::contains_all(["Env"]))
            })
            .collect();

        Navigator::new(Arc::new(Curriculum::new(
            "Shared",
            vec![
                Module::new("First", lessons),
                Module::new("Second", vec![Lesson::new("Last", "")]),
            ],
        )))
    }

    #[test]
    fn test_concurrent_advances_are_serialized() {
        let shared = SharedNavigator::new(navigator());
        shared.select_module(0).unwrap();

        let handles = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..2 {
                        shared.advance().unwrap();
                        let _ = shared.validate("Env::default()");
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            shared.cursor(),
            Ok(Cursor::InLesson { index_module: 0, index_lesson: 8 })
        );
        assert_eq!(shared.current_lesson().unwrap().title, "Lesson 8");
    }

    #[test]
    fn test_shared_operations() {
        let shared = SharedNavigator::new(navigator());

        assert!(matches!(
            shared.current_lesson(),
            Err(NavigatorError::InvalidState(Cursor::Idle))
        ));
        assert!(shared.select_module(5).is_err());

        assert_eq!(shared.select_module(1).unwrap().title, "Last");
        assert!(matches!(
            shared.check("anything"),
            Err(NavigatorError::NotApplicable(_))
        ));
        assert_eq!(shared.advance(), Ok(Cursor::Complete));
        assert_eq!(shared.advance(), Ok(Cursor::Complete));
    }

    #[test]
    fn test_panicking_validator_poisons_lock() {
        let curriculum = Arc::new(Curriculum::new(
            "Panics",
            vec![Module::new(
                "Broken",
                vec![Lesson::new("Explodes", "").with_validator(Predicate::new(
                    "panics",
                    |_| panic!("validator blew up"),
                ))],
            )],
        ));
        let shared = SharedNavigator::new(Navigator::new(curriculum));
        shared.select_module(0).unwrap();

        let worker = shared.clone();
        assert!(thread::spawn(move || worker.validate("anything"))
            .join()
            .is_err());

        assert_eq!(shared.validate("anything"), Err(NavigatorError::Poisoned));
        assert_eq!(shared.advance(), Err(NavigatorError::Poisoned));
        assert_eq!(shared.cursor(), Err(NavigatorError::Poisoned));
    }
}
