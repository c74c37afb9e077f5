use std::io::{Read, Write};

use bson;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json;

use errors::*;
use intermediate::IntermediateInputKV;
use mapper::MapInputKV;

/// `read_map_input` reads a BSON document from a source and returns a `MapInputKV`.
///
/// Map input is BSON rather than JSON since it carries whole input files.
pub fn read_map_input<R: Read>(source: &mut R) -> Result<MapInputKV> {
    let document = bson::Document::from_reader(source).chain_err(
        || "Error reading BSON document from source.",
    )?;
    let result = bson::from_document(document).chain_err(
        || "Error parsing input BSON to MapInputKV.",
    )?;
    Ok(result)
}

/// `read_intermediate_input` reads a single JSON `{"key":..,"values":[..]}` object.
pub fn read_intermediate_input<R, K, V>(source: &mut R) -> Result<IntermediateInputKV<K, V>>
where
    R: Read,
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    let input_string = read_source(source)?;
    let result = serde_json::from_str(input_string.as_str()).chain_err(
        || "Error parsing input JSON to IntermediateInputKV.",
    )?;
    Ok(result)
}

/// `read_reduce_input` reads a JSON array of `IntermediateInputKV`s, one per key handed to this
/// reduce invocation.
pub fn read_reduce_input<R, K, V>(source: &mut R) -> Result<Vec<IntermediateInputKV<K, V>>>
where
    R: Read,
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    let input_string = read_source(source)?;
    let result = serde_json::from_str(input_string.as_str()).chain_err(
        || "Error parsing input JSON to a list of IntermediateInputKV.",
    )?;
    Ok(result)
}

/// `write_output` serialises any payload output object as JSON to a sink.
pub fn write_output<W, T>(sink: &mut W, output: &T) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer(&mut *sink, output).chain_err(
        || "Error serialising output to JSON.",
    )?;
    sink.flush().chain_err(|| "Error flushing output.")?;
    Ok(())
}

fn read_source<R: Read>(source: &mut R) -> Result<String> {
    let mut input_string = String::new();
    let bytes_read = source.read_to_string(&mut input_string).chain_err(
        || "Error reading from source.",
    )?;
    if bytes_read == 0 {
        warn!("bytes_read is 0");
    }
    Ok(input_string)
}
