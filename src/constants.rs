pub const LOG: &str = "./soroban-tutor.log";

/// Terminates a multi-line code submission.
pub const SUBMISSION_END: &str = ".";
