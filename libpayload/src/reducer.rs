use serde::Serialize;
use serde::de::DeserializeOwned;

use emitter::EmitFinal;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Reduce` trait defines a function for performing a reduce operation.
///
/// The output types are decided by the implementation of this trait.
///
/// # Arguments
///
/// * `input` - A `IntermediateInputKV` containing the input data for the reduce operation.
/// * `emitter` - A struct implementing the `EmitFinal` trait, provided by the reduce runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the reduce operation are sent out
/// through the `emitter`.
pub trait Reduce<K, V>
where
    K: Default + Serialize + DeserializeOwned,
    V: Default + Serialize + DeserializeOwned,
{
    type Output: Serialize;
    fn reduce<E>(&self, input: IntermediateInputKV<K, V>, emitter: E) -> Result<()>
    where
        E: EmitFinal<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::FinalVecEmitter;

    /// Emits the key once for every value it was given.
    struct RepeatKeyReducer;
    impl Reduce<String, u8> for RepeatKeyReducer {
        type Output = String;
        fn reduce<E>(&self, input: IntermediateInputKV<String, u8>, mut emitter: E) -> Result<()>
        where
            E: EmitFinal<Self::Output>,
        {
            for _ in input.values {
                emitter.emit(input.key.clone())?;
            }
            Ok(())
        }
    }

    #[test]
    fn reduce_may_emit_many_values() {
        let test_kv = IntermediateInputKV::new("movie".to_owned(), vec![1, 2, 3]);
        let mut sink: Vec<String> = Vec::new();

        RepeatKeyReducer
            .reduce(test_kv, FinalVecEmitter::new(&mut sink))
            .unwrap();

        assert_eq!(vec!["movie", "movie", "movie"], sink);
    }

    #[test]
    fn reduce_of_no_values_emits_nothing() {
        let test_kv = IntermediateInputKV::new("movie".to_owned(), Vec::new());
        let mut sink: Vec<String> = Vec::new();

        RepeatKeyReducer
            .reduce(test_kv, FinalVecEmitter::new(&mut sink))
            .unwrap();

        assert!(sink.is_empty());
    }
}
