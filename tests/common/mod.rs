use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs a test logger once per test binary. `RUST_LOG` overrides the
/// default level.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Info)
            .filter_module("chain_hashmap", LevelFilter::Debug)
            .is_test(true)
            .parse_default_env();
        // Another harness may already own the global logger.
        let _ = builder.try_init();
    });
}
