use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

const TABLE_TARGET: &str = "chained_hash_table";

static INIT: Once = Once::new();

// The tester reports at Info, the table at whatever the subcommand needs,
// and third party crates only warn.
fn filters(table_level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Info)
        .filter_module(TABLE_TARGET, table_level);
    builder
}

/// Installs the process logger on first call. `RUST_LOG` is applied on top
/// of the table filter.
pub fn initialize_logger(table_level: LevelFilter) {
    INIT.call_once(|| {
        let mut builder = filters(table_level);
        builder.format_timestamp_millis().parse_default_env();
        if builder.try_init().is_err() {
            log::debug!("logger already installed");
        }
    });
}
