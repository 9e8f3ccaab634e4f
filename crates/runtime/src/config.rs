pub const PROGRAM_NAME: &str = "triage";
pub const PROGRAM_LOG_LEVEL: &str = "TRIAGE_LOG_LEVEL";
