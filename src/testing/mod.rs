#![cfg(test)]
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

#[fixture]
pub(crate) fn builder() -> crate::CodeBuilder {
    common_init();
    crate::CodeBuilder::new()
}

mod logging {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        common_init();
        common_init();
        tracing::debug!("logging initialized");
    }
}
