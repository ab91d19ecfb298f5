/// A generic boxed error type.
pub type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// A convenient Result alias returning `AnyError`.
pub type AnyResult<T> = std::result::Result<T, AnyError>;

/// Outcome of a best-effort call to an upstream collaborator.
///
/// Callers decide how to degrade; nothing here is ever turned into an HTTP
/// error on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
  Ok(T),
  /// The collaborator has no credentials configured, so it was never called.
  NotConfigured,
  /// The call was attempted and failed (transport error, timeout, bad body).
  Failed(String),
}

impl<T> Lookup<T> {
  pub fn failed(reason: impl Into<String>) -> Self {
    Self::Failed(reason.into())
  }
}

impl<T> From<reqwest::Error> for Lookup<T> {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      Self::Failed("request timed out".to_string())
    } else {
      Self::Failed(err.to_string())
    }
  }
}
