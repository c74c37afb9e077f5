use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde::de::DeserializeOwned;

use errors::*;

/// The `PartitionInputKV` is a struct for passing input data to a `Partition`.
///
/// `PartitionInputKV` is a thin wrapper around a borrowed `(Key, Value)`.
#[derive(Debug, PartialEq)]
pub struct PartitionInputKV<'a, K: 'a, V: 'a> {
    pub key: &'a K,
    pub value: &'a V,
}

impl<'a, K, V> PartitionInputKV<'a, K, V> {
    pub fn new(key: &'a K, value: &'a V) -> Self {
        PartitionInputKV { key, value }
    }
}

/// The `Partition` trait defines a function for partitioning the results of a `Map` operation.
///
/// Every pair with the same key must land in the same partition, since a partition is the unit
/// handed to a single reduce task.
///
/// # Arguments
///
/// * `input` - A `PartitionInputKV` containing an output pair of a map operation.
///
/// # Outputs
///
/// A `Result<u64>`, representing the output partition for the given key and value.
pub trait Partition<K, V>
where
    K: Default + Serialize + DeserializeOwned,
    V: Default + Serialize + DeserializeOwned,
{
    fn partition(&self, input: PartitionInputKV<K, V>) -> Result<u64>;
}

/// `HashPartitioner` implements `Partition` for any key that can be hashed.
pub struct HashPartitioner {
    partition_count: u64,
}

impl HashPartitioner {
    pub fn new(partition_count: u64) -> Self {
        HashPartitioner { partition_count }
    }

    fn calculate_hash<T: Hash>(&self, t: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        t.hash(&mut hasher);
        hasher.finish()
    }
}

impl<K, V> Partition<K, V> for HashPartitioner
where
    K: Default + Serialize + DeserializeOwned + Hash,
    V: Default + Serialize + DeserializeOwned,
{
    fn partition(&self, input: PartitionInputKV<K, V>) -> Result<u64> {
        if self.partition_count == 0 {
            return Err("HashPartitioner needs at least one partition".into());
        }
        Ok(self.calculate_hash(input.key) % self.partition_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_partitioner_is_stable_per_key() {
        let partitioner = HashPartitioner::new(15);
        let key = "318".to_owned();

        let first = partitioner
            .partition(PartitionInputKV::new(&key, &1u64))
            .unwrap();
        let second = partitioner
            .partition(PartitionInputKV::new(&key, &2u64))
            .unwrap();

        assert_eq!(first, second);
        assert!(first < 15);
    }

    #[test]
    fn hash_partitioner_single_partition() {
        let partitioner = HashPartitioner::new(1);
        let key = "anything".to_owned();

        let partition = partitioner
            .partition(PartitionInputKV::new(&key, &0u64))
            .unwrap();

        assert_eq!(0, partition);
    }

    #[test]
    fn hash_partitioner_rejects_zero_partitions() {
        let partitioner = HashPartitioner::new(0);
        let key = "anything".to_owned();

        let result = partitioner.partition(PartitionInputKV::new(&key, &0u64));

        assert!(result.is_err());
    }
}
