use std::path::PathBuf;
use thiserror::Error;
use trapz_events::IntegralJob;

/// Where the root rank gets its job record from.
///
/// Injected into the worker so the coordination core never opens files or
/// other resources itself. Only the root's worker ever calls `load`.
pub trait JobSource {
    fn load(&self) -> Result<IntegralJob, JobSourceError>;
}

#[derive(Debug, Error)]
pub enum JobSourceError {
    #[error("failed to read job record '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed job record '{path}': {detail}")]
    Malformed { path: String, detail: String },
}

/// Job source backed by a whitespace-separated `a b n` text record,
/// the input format of the reference runs:
///
/// ```text
/// 0.0 1.0
/// 1024
/// ```
///
/// Line structure does not matter, only token order: two decimal floats
/// and one decimal integer.
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl JobSource for FileJobSource {
    fn load(&self) -> Result<IntegralJob, JobSourceError> {
        let path = self.path.display().to_string();
        let text = std::fs::read_to_string(&self.path).map_err(|source| JobSourceError::Read {
            path: path.clone(),
            source,
        })?;
        parse_record(&text, &path)
    }
}

/// Jobs already in memory are their own source. Used by tests and by
/// callers that assemble the record programmatically.
impl JobSource for IntegralJob {
    fn load(&self) -> Result<IntegralJob, JobSourceError> {
        Ok(*self)
    }
}

fn parse_record(text: &str, path: &str) -> Result<IntegralJob, JobSourceError> {
    let malformed = |detail: &str| JobSourceError::Malformed {
        path: path.to_string(),
        detail: detail.to_string(),
    };

    let mut tokens = text.split_whitespace();
    let a: f64 = tokens
        .next()
        .ok_or_else(|| malformed("missing left endpoint"))?
        .parse()
        .map_err(|_| malformed("left endpoint is not a number"))?;
    let b: f64 = tokens
        .next()
        .ok_or_else(|| malformed("missing right endpoint"))?
        .parse()
        .map_err(|_| malformed("right endpoint is not a number"))?;
    let n: i32 = tokens
        .next()
        .ok_or_else(|| malformed("missing trapezoid count"))?
        .parse()
        .map_err(|_| malformed("trapezoid count is not an integer"))?;

    if tokens.next().is_some() {
        return Err(malformed("trailing tokens after the record"));
    }

    Ok(IntegralJob::new(a, b, n))
}
