use serde::Serialize;
use serde::de::DeserializeOwned;

use emitter::EmitFinal;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Combine` trait defines a function for performing a combine operation.
///
/// A combine runs on the output of a single map task before it leaves the worker. It receives
/// every value emitted for one key and emits values of the same type, so its output can be fed to
/// the `Reduce` unchanged. Running it zero, one or many times must not change the final result.
///
/// # Arguments
///
/// * `input`   - A `IntermediateInputKV` containing the input data for the combine operation.
/// * `emitter` - A struct implementing the `EmitFinal` trait, provided by the combine runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the combine operation are sent out
/// through the `emitter`.
pub trait Combine<K, V>
where
    K: Default + Serialize + DeserializeOwned,
    V: Default + Serialize + DeserializeOwned,
{
    fn combine<E>(&self, input: IntermediateInputKV<K, V>, emitter: E) -> Result<()>
    where
        E: EmitFinal<V>;
}
