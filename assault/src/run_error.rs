use crate::exit_codes::ExitCode;

#[derive(Debug)]
pub enum RunError {
    InvalidInput(anyhow::Error),
    RuntimeError(anyhow::Error),
}

impl RunError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::RuntimeError(_) => ExitCode::RuntimeError,
        }
    }

    #[must_use]
    pub fn anyhow(&self) -> &anyhow::Error {
        match self {
            Self::InvalidInput(e) | Self::RuntimeError(e) => e,
        }
    }
}

impl From<assault_core::Error> for RunError {
    fn from(err: assault_core::Error) -> Self {
        if err.is_configuration() {
            Self::InvalidInput(anyhow::Error::new(err).context("invalid run configuration"))
        } else {
            Self::RuntimeError(anyhow::Error::new(err))
        }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(e) | Self::RuntimeError(e) => {
                write!(f, "{e:#}")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.anyhow().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_map_to_invalid_input() {
        let err = RunError::from(assault_core::Error::InvalidTotal(0));
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
        assert!(err.to_string().contains("`requests` must be a positive integer"));
    }

    #[test]
    fn reporting_errors_map_to_runtime_error() {
        let err = RunError::from(assault_core::Error::ZeroElapsed(0.0));
        assert_eq!(err.exit_code(), ExitCode::RuntimeError);
    }
}
