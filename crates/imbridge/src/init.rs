//! Process-level setup.

/// Installs `env_logger` as the log backend.
///
/// The level comes from `RUST_LOG`. Calling this more than once, or after
/// another logger was installed, does nothing.
///
/// # Example
///
/// ```no_run
/// imbridge::init_logging();
/// log::info!("logging ready");
/// ```
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("imbridge logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
