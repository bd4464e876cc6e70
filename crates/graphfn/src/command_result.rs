use std::process::ExitCode;

#[derive(Debug)]
pub(crate) struct CommandResult {
    pub exit_code: ExitCode,
    pub stderr: Option<String>,
    pub stdout: Option<String>,
}

impl CommandResult {
    pub fn stderr(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::FAILURE,
            stderr: Some(format!("{fmt_args}")),
            stdout: None,
        }
    }

    pub fn stdout(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::SUCCESS,
            stderr: None,
            stdout: Some(format!("{fmt_args}")),
        }
    }

    /// Keep any stdout, but fail the run with `fmt_args` appended to stderr.
    pub fn with_failure(self, fmt_args: std::fmt::Arguments<'_>) -> Self {
        let stderr = match self.stderr {
            Some(stderr) => format!("{stderr}\n{fmt_args}"),
            None => format!("{fmt_args}"),
        };
        Self {
            exit_code: ExitCode::FAILURE,
            stderr: Some(stderr),
            stdout: self.stdout,
        }
    }
}
