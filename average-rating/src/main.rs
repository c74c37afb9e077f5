extern crate clap;
extern crate csv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate payload;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
extern crate serde_json;
#[cfg(test)]
extern crate tempfile;

mod combiner;
mod config;
mod lookup;
mod mapper;
mod rating;
mod reducer;

use payload::*;

use combiner::RatingCombiner;
use config::JobConfig;
use mapper::RatingMapper;
use reducer::AverageRatingReducer;

const MAP_OUTPUT_PARTITIONS: u64 = 15;

fn run() -> Result<()> {
    payload::logging::init_logger().chain_err(|| "Failed to initialise logging.")?;

    let matches = payload::payload_app()
        .about("Average rating per movie, optionally joined with movie titles")
        .arg(config::movies_arg())
        .get_matches();
    let config = JobConfig::from_matches(&matches).chain_err(|| "Error reading configuration.")?;
    debug!("Running with {:?}", config);

    let ar_mapper = RatingMapper;
    let ar_reducer = AverageRatingReducer::new(&config);
    let ar_partitioner = HashPartitioner::new(MAP_OUTPUT_PARTITIONS);
    let ar_combiner = RatingCombiner;

    let registry = UserImplRegistryBuilder::new()
        .mapper(&ar_mapper)
        .reducer(&ar_reducer)
        .partitioner(&ar_partitioner)
        .combiner(&ar_combiner)
        .build()
        .chain_err(|| "Error building UserImplRegistry.")?;

    payload::run(&matches, &registry)
}

// Macro to generate a quick error_chain main function.
// https://github.com/rust-lang-nursery/error-chain/blob/master/examples/quickstart.rs
quick_main!(run);
