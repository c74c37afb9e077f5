//! Runs a whole job inside the payload process, without a master or workers.
//!
//! Each input file becomes one map task. The combiner, when registered, runs over the output of
//! each map task on its own, the same way a worker applies it before handing data on. All keys
//! are then shuffled together and reduced in ascending key order.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json;

use combiner::Combine;
use emitter::{FinalVecEmitter, IntermediateVecEmitter};
use errors::*;
use intermediate::IntermediateInputKV;
use mapper::{Map, MapInputKV};
use partition::Partition;
use reducer::Reduce;
use registry::UserImplRegistry;

pub fn run_inline<M, R, P, C, W>(
    registry: &UserImplRegistry<M, R, P, C>,
    input_paths: &[PathBuf],
    sink: &mut W,
) -> Result<()>
where
    M: Map,
    M::Key: Ord + Clone,
    R: Reduce<M::Key, M::Value>,
    P: Partition<M::Key, M::Value>,
    C: Combine<M::Key, M::Value>,
    W: Write,
{
    let mut shuffled: BTreeMap<M::Key, Vec<M::Value>> = BTreeMap::new();

    for path in input_paths {
        let mut pairs = run_map_task(registry.mapper, path)?;
        if let Some(combiner) = registry.combiner {
            pairs = combine_map_output(combiner, pairs).chain_err(|| {
                format!("Error combining map output of {}", path.display())
            })?;
        }
        for (key, value) in pairs {
            shuffled.entry(key).or_insert_with(Vec::new).push(value);
        }
    }

    info!("Reducing {} keys from {} inputs", shuffled.len(), input_paths.len());

    let mut records = 0;
    for (key, values) in shuffled {
        let mut outputs: Vec<R::Output> = Vec::new();
        registry
            .reducer
            .reduce(
                IntermediateInputKV::new(key, values),
                FinalVecEmitter::new(&mut outputs),
            )
            .chain_err(|| "Error running reduce operation.")?;

        for output in outputs {
            serde_json::to_writer(&mut *sink, &output).chain_err(
                || "Error serialising reduce output.",
            )?;
            writeln!(sink).chain_err(|| "Error writing reduce output.")?;
            records += 1;
        }
    }
    sink.flush().chain_err(|| "Error flushing reduce output.")?;

    info!("Wrote {} records", records);
    Ok(())
}

fn run_map_task<M: Map>(mapper: &M, path: &Path) -> Result<Vec<(M::Key, M::Value)>> {
    let contents = fs::read_to_string(path).chain_err(|| {
        format!("Error reading input file {}", path.display())
    })?;

    let mut pairs: Vec<(M::Key, M::Value)> = Vec::new();
    mapper
        .map(
            MapInputKV::new(path.to_string_lossy(), contents),
            IntermediateVecEmitter::new(&mut pairs),
        )
        .chain_err(|| format!("Error mapping input file {}", path.display()))?;

    debug!("{} emitted {} pairs", path.display(), pairs.len());
    Ok(pairs)
}

/// Applies the combiner to every key of a single map task's output.
///
/// Keys with a single value are passed through untouched.
pub fn combine_map_output<K, V, C>(combiner: &C, pairs: Vec<(K, V)>) -> Result<Vec<(K, V)>>
where
    K: Default + Serialize + DeserializeOwned + Ord + Clone,
    V: Default + Serialize + DeserializeOwned,
    C: Combine<K, V>,
{
    let mut combined: Vec<(K, V)> = Vec::new();

    for (key, values) in group_by_key(pairs) {
        if values.len() < 2 {
            combined.extend(values.into_iter().map(|value| (key.clone(), value)));
            continue;
        }

        let mut outputs: Vec<V> = Vec::new();
        combiner.combine(
            IntermediateInputKV::new(key.clone(), values),
            FinalVecEmitter::new(&mut outputs),
        )?;
        combined.extend(outputs.into_iter().map(|value| (key.clone(), value)));
    }

    Ok(combined)
}

pub fn group_by_key<K: Ord, V>(pairs: Vec<(K, V)>) -> BTreeMap<K, Vec<V>> {
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_insert_with(Vec::new).push(value);
    }
    groups
}
