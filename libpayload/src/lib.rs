#![recursion_limit = "1024"]

extern crate bson;
extern crate chrono;
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[cfg(test)]
extern crate tempfile;
extern crate uuid;

pub mod errors {
    error_chain!{}
}

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub mod combiner;
pub mod emitter;
pub mod inline;
pub mod intermediate;
pub mod io;
pub mod logging;
pub mod mapper;
pub mod partition;
pub mod reducer;
pub mod registry;
pub mod runner;
pub mod serialise;

pub use combiner::Combine;
pub use emitter::{EmitFinal, EmitIntermediate, FinalVecEmitter, IntermediateVecEmitter};
pub use errors::*;
pub use intermediate::IntermediateInputKV;
pub use mapper::{Map, MapInputKV};
pub use partition::{HashPartitioner, Partition, PartitionInputKV};
pub use reducer::Reduce;
pub use registry::{NullCombiner, UserImplRegistry, UserImplRegistryBuilder};
pub use runner::{payload_app, run};
