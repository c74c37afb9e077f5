use std::collections::BTreeMap;

use serde::Serialize;

/// `IntermediateOutputPair` is a struct representing an intermediate key-value pair as outputted
/// from a map or combine operation.
#[derive(Debug, PartialEq, Serialize)]
pub struct IntermediateOutputPair<K: Serialize, V: Serialize> {
    pub key: K,
    pub value: V,
}

/// `IntermediateOutputObject` is a struct comprising a collection of `IntermediateOutputPair`s,
/// representing the entire output of a combine operation, ready to be serialised to JSON.
#[derive(Debug, Serialize)]
pub struct IntermediateOutputObject<K: Serialize, V: Serialize> {
    pub pairs: Vec<IntermediateOutputPair<K, V>>,
}

impl<K: Serialize, V: Serialize> Default for IntermediateOutputObject<K, V> {
    fn default() -> Self {
        IntermediateOutputObject { pairs: Vec::new() }
    }
}

/// `PartitionedOutputObject` holds the entire output of a map operation, grouped by the partition
/// each pair was assigned to.
#[derive(Debug, Serialize)]
pub struct PartitionedOutputObject<K: Serialize, V: Serialize> {
    pub partitions: BTreeMap<u64, Vec<IntermediateOutputPair<K, V>>>,
}

impl<K: Serialize, V: Serialize> Default for PartitionedOutputObject<K, V> {
    fn default() -> Self {
        PartitionedOutputObject { partitions: BTreeMap::new() }
    }
}

impl<K: Serialize, V: Serialize> PartitionedOutputObject<K, V> {
    pub fn insert(&mut self, partition: u64, key: K, value: V) {
        self.partitions
            .entry(partition)
            .or_insert_with(Vec::new)
            .push(IntermediateOutputPair { key, value });
    }
}

/// `FinalOutputObject` is the output of reducing a single key.
#[derive(Debug, Serialize)]
pub struct FinalOutputObject<V: Serialize> {
    pub values: Vec<V>,
}

impl<V: Serialize> Default for FinalOutputObject<V> {
    fn default() -> Self {
        FinalOutputObject { values: Vec::new() }
    }
}
