use std::io::{stdin, stdout, Read, Write};
use std::path::PathBuf;

use chrono::prelude::*;
use clap::{App, Arg, ArgMatches, SubCommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use combiner::Combine;
use emitter::{FinalVecEmitter, IntermediateVecEmitter};
use errors::*;
use inline::run_inline;
use intermediate::IntermediateInputKV;
use io::*;
use mapper::Map;
use partition::{Partition, PartitionInputKV};
use reducer::Reduce;
use registry::UserImplRegistry;
use serialise::{FinalOutputObject, IntermediateOutputObject, IntermediateOutputPair,
                PartitionedOutputObject};
use super::VERSION;

/// `payload_app` builds the `clap::App` understood by every payload binary.
///
/// Jobs that need their own arguments add them to the returned `App` before calling
/// `get_matches`; arguments marked `global(true)` are accepted before or after the subcommand.
pub fn payload_app<'a, 'b>() -> App<'a, 'b> {
    let current_time = Utc::now();
    let id = Uuid::new_v4();
    let payload_name = format!("{}_{}", current_time.format("%+"), id);
    App::new(payload_name)
        .version(VERSION.unwrap_or("unknown"))
        .subcommand(SubCommand::with_name("map"))
        .subcommand(SubCommand::with_name("combine"))
        .subcommand(SubCommand::with_name("has-combine"))
        .subcommand(SubCommand::with_name("reduce"))
        .subcommand(SubCommand::with_name("sanity-check"))
        .subcommand(
            SubCommand::with_name("inline")
                .about("Runs map, combine and reduce over local files in this process")
                .arg(
                    Arg::with_name("input")
                        .help("Input files to map")
                        .multiple(true)
                        .required(true),
                ),
        )
}

/// `run` begins the primary operations of the payload, and delegates to sub-functions.
///
/// # Arguments
///
/// `matches` - The matches of the `App` returned by `payload_app`.
/// `registry` - The output of the `UserImplRegistryBuilder::build` function.
pub fn run<M, R, P, C>(matches: &ArgMatches, registry: &UserImplRegistry<M, R, P, C>) -> Result<()>
where
    M: Map,
    M::Key: Ord + Clone,
    R: Reduce<M::Key, M::Value>,
    P: Partition<M::Key, M::Value>,
    C: Combine<M::Key, M::Value>,
{
    let stdout = stdout();
    let mut sink = stdout.lock();
    match matches.subcommand() {
        ("map", _) => run_map(registry.mapper, registry.partitioner, &mut stdin(), &mut sink),
        ("combine", _) => {
            let combiner = registry.combiner.chain_err(
                || "Error running combine: No Combiner registered",
            )?;
            run_combine::<M::Key, M::Value, _, _, _>(combiner, &mut stdin(), &mut sink)
        }
        ("has-combine", _) => run_has_combine(registry.combiner.is_some(), &mut sink),
        ("reduce", _) => {
            run_reduce::<M::Key, M::Value, _, _, _>(registry.reducer, &mut stdin(), &mut sink)
        }
        ("inline", Some(sub_matches)) => {
            let input_paths: Vec<PathBuf> = match sub_matches.values_of("input") {
                Some(values) => values.map(PathBuf::from).collect(),
                None => Vec::new(),
            };
            run_inline(registry, &input_paths, &mut sink)
        }
        ("sanity-check", _) => run_sanity_check(&mut sink),
        ("", None) => {
            eprintln!("{}", matches.usage());
            Ok(())
        }
        // This won't ever be reached, due to clap checking invalid commands before this.
        _ => Ok(()),
    }
}

fn run_map<M, P, In, Out>(mapper: &M, partitioner: &P, source: &mut In, sink: &mut Out) -> Result<()>
where
    M: Map,
    P: Partition<M::Key, M::Value>,
    In: Read,
    Out: Write,
{
    let input_kv = read_map_input(source).chain_err(
        || "Error getting input to map.",
    )?;
    debug!("Mapping input {}", input_kv.key);

    let mut pairs_vec: Vec<(M::Key, M::Value)> = Vec::new();

    mapper
        .map(input_kv, IntermediateVecEmitter::new(&mut pairs_vec))
        .chain_err(|| "Error running map operation.")?;

    debug!("Map operation emitted {} pairs", pairs_vec.len());

    let mut output_object = PartitionedOutputObject::<M::Key, M::Value>::default();
    for (key, value) in pairs_vec {
        let partition = partitioner
            .partition(PartitionInputKV::new(&key, &value))
            .chain_err(|| "Error partitioning map output")?;
        output_object.insert(partition, key, value);
    }

    write_output(sink, &output_object).chain_err(
        || "Error writing map output to stdout.",
    )?;
    Ok(())
}

fn run_combine<K, V, C, In, Out>(combiner: &C, source: &mut In, sink: &mut Out) -> Result<()>
where
    K: Default + Serialize + DeserializeOwned + Clone,
    V: Default + Serialize + DeserializeOwned,
    C: Combine<K, V>,
    In: Read,
    Out: Write,
{
    let input_kv: IntermediateInputKV<K, V> = read_intermediate_input(source)
        .chain_err(|| "Error getting input to combine.")?;
    let key = input_kv.key.clone();
    let mut values: Vec<V> = Vec::new();

    combiner
        .combine(input_kv, FinalVecEmitter::new(&mut values))
        .chain_err(|| "Error running combine operation.")?;

    let output_object = IntermediateOutputObject {
        pairs: values
            .into_iter()
            .map(|value| IntermediateOutputPair {
                key: key.clone(),
                value,
            })
            .collect(),
    };

    write_output(sink, &output_object).chain_err(
        || "Error writing combine output to stdout.",
    )?;
    Ok(())
}

fn run_reduce<K, V, R, In, Out>(reducer: &R, source: &mut In, sink: &mut Out) -> Result<()>
where
    K: Default + Serialize + DeserializeOwned,
    V: Default + Serialize + DeserializeOwned,
    R: Reduce<K, V>,
    In: Read,
    Out: Write,
{
    let inputs = read_reduce_input::<_, K, V>(source).chain_err(
        || "Error getting input to reduce.",
    )?;
    debug!("Reducing {} keys", inputs.len());

    let mut output_objects: Vec<FinalOutputObject<R::Output>> = Vec::with_capacity(inputs.len());
    for input_kv in inputs {
        let mut output_object = FinalOutputObject::<R::Output>::default();
        reducer
            .reduce(input_kv, FinalVecEmitter::new(&mut output_object.values))
            .chain_err(|| "Error running reduce operation.")?;
        output_objects.push(output_object);
    }

    write_output(sink, &output_objects).chain_err(
        || "Error writing reduce output to stdout.",
    )?;
    Ok(())
}

fn run_has_combine<Out: Write>(has_combine: bool, sink: &mut Out) -> Result<()> {
    let answer = if has_combine { "yes" } else { "no" };
    writeln!(sink, "{}", answer).chain_err(|| "Error writing has-combine answer.")?;
    Ok(())
}

fn run_sanity_check<Out: Write>(sink: &mut Out) -> Result<()> {
    writeln!(sink, "sanity located").chain_err(|| "Error writing sanity check.")?;
    Ok(())
}
