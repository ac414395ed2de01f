use std::io::Write;

use anyhow::Result;
use chained_hash_table::{config::DEMO_CAPACITY, ChainedHashTable};
use log::LevelFilter;

const LINES: [(&str, &str); 3] = [
    ("line_1", "Tiny hash table"),
    ("line_2", "Filled beyond capacity"),
    ("line_3", "Linked list saves the day!"),
];

/// The demo prints the resize itself, so the table's own info record is
/// filtered out.
pub const TABLE_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Fills a two bucket table past capacity, prints it back, then doubles it.
pub fn run(out: &mut impl Write) -> Result<()> {
    let mut table = ChainedHashTable::with_capacity(DEMO_CAPACITY)?;

    for (key, value) in LINES {
        table.insert(key, value);
    }
    for (key, _) in LINES {
        writeln!(out, "{}", table.try_retrieve(key)?)?;
    }

    let old_capacity = table.capacity();
    let table = table.resize()?;
    writeln!(
        out,
        "\nResizing hash table from {} to {}.",
        old_capacity,
        table.capacity()
    )?;

    table.destroy();
    Ok(())
}
