use std::io;

use anyhow::{bail, Result};
use chained_hash_table::ChainedHashTable;
use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use rand::Rng;

mod demo;
mod logger;
mod tester;

use logger::initialize_logger;
use tester::{playback, test_hashtable, FuzzSettings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill a two bucket table, print it back and resize it
    Demo,
    /// Compare the table against a reference map on random operations
    Fuzz {
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short, long, default_value_t = 10_000)]
        ops: usize,

        #[arg(short, long, default_value_t = 2)]
        capacity: usize,

        #[arg(short, long, default_value_t = 64)]
        key_space: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            initialize_logger(demo::TABLE_LOG_LEVEL);
            demo::run(&mut io::stdout().lock())
        }
        Command::Fuzz {
            seed,
            ops,
            capacity,
            key_space,
        } => {
            // lookups of missing keys warn on every miss
            initialize_logger(LevelFilter::Error);
            let settings = FuzzSettings {
                seed: seed.unwrap_or_else(|| rand::thread_rng().gen()),
                ops,
                starting_capacity: capacity,
                key_space,
            };
            fuzz(&settings)
        }
    }
}

fn fuzz(settings: &FuzzSettings) -> Result<()> {
    match test_hashtable::<ChainedHashTable>(settings) {
        Ok(report) => {
            info!(
                "seed {} passed {} operations, {} entries in {} buckets",
                report.seed, report.operations, report.len, report.capacity
            );
            Ok(())
        }
        Err(failure) => {
            error!("{}", failure);
            if let Some(op_num) = failure.op_num() {
                playback::<ChainedHashTable>(settings, op_num)?;
            }
            bail!("fuzzing failed, rerun with --seed {}", settings.seed)
        }
    }
}
