use std::fmt;

/// A terminal error as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    /// Full error chain, only kept for developers.
    pub stack: Option<String>,
}

impl ErrorReport {
    pub fn new(error: &anyhow::Error, verbose: bool) -> Self {
        Self {
            message: error.to_string(),
            stack: verbose.then(|| format!("{error:?}")),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stack {
            Some(stack) => write!(f, "ERROR! {}\n\n{stack}", self.message),
            None => write!(
                f,
                "ERROR! {}\nWe couldn't fetch the data, please try again \
                 (if the error persists try later, you were likely rate limited).",
                self.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn error() -> anyhow::Error {
        Err::<(), _>(anyhow::anyhow!("HTTP 403"))
            .context("Could not load a new round")
            .unwrap_err()
    }

    #[test]
    fn test_user_facing_report_hides_chain() {
        let report = ErrorReport::new(&error(), false);
        assert_eq!(report.message, "Could not load a new round");
        assert_eq!(report.stack, None);

        let shown = report.to_string();
        assert!(shown.contains("rate limited"));
        assert!(!shown.contains("HTTP 403"));
    }

    #[test]
    fn test_verbose_report_includes_causes() {
        let report = ErrorReport::new(&error(), true);
        let shown = report.to_string();
        assert!(shown.starts_with("ERROR! Could not load a new round"));
        assert!(shown.contains("HTTP 403"));
    }
}
