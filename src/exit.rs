use std::process::ExitCode;

/// Process exit statuses surfaced by the `piecewise` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Zero or more pieces written
    Success,
    /// The size specification (or the command line) failed validation
    CommandLineError,
    /// Failure outside the splitter's own classification
    UnhandledException,
    /// Source missing or unreadable, or I/O failure while splitting/joining
    ApplicationError,
}

impl ExitStatus {
    /// Numeric process exit code
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::CommandLineError => 2,
            ExitStatus::UnhandledException => 10,
            ExitStatus::ApplicationError => 11,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::CommandLineError.code(), 2);
        assert_eq!(ExitStatus::UnhandledException.code(), 10);
        assert_eq!(ExitStatus::ApplicationError.code(), 11);
    }
}
