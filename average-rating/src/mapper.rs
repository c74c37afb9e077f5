use payload::*;

use rating::{PartialAggregate, RatingRecord};

/// Emits `(movie_id, PartialAggregate)` for every valid row of a ratings file.
pub struct RatingMapper;

impl Map for RatingMapper {
    type Key = String;
    type Value = PartialAggregate;
    fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        let mut skipped = 0;
        for line in input.value.lines() {
            let parsed = RatingRecord::parse(line)
                .chain_err(|| format!("Error parsing a line of {}", input.key))?;
            let record = match parsed {
                Some(record) => record,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            emitter
                .emit(record.movie_id, PartialAggregate::from_rating(record.rating))
                .chain_err(|| "Error emitting map key-value pair.")?;
        }

        debug!("Skipped {} header or malformed lines in {}", skipped, input.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_lines(lines: &str) -> Vec<(String, PartialAggregate)> {
        let mut pairs = Vec::new();
        RatingMapper
            .map(
                MapInputKV::new("ratings.csv", lines),
                IntermediateVecEmitter::new(&mut pairs),
            )
            .unwrap();
        pairs
    }

    #[test]
    fn map_emits_one_partial_per_rating() {
        let pairs = map_lines("userId,movieId,rating,timestamp\n1,10,4.0,000\n2,10,5.0,000\n");

        assert_eq!(
            vec![
                ("10".to_owned(), PartialAggregate::from_rating(4.0)),
                ("10".to_owned(), PartialAggregate::from_rating(5.0)),
            ],
            pairs
        );
    }

    #[test]
    fn map_skips_header_and_short_lines() {
        let pairs = map_lines("userId,movieId,rating,timestamp\n1,2,3\n");

        assert!(pairs.is_empty());
    }

    #[test]
    fn map_counts_match_valid_rows_per_key() {
        let pairs = map_lines("1,10,4.0,000\n2,20,1.0,000\nbad row\n3,10,2.0,000\r\n4,10,3.0,000\n");

        let count_for_10: u64 = pairs
            .iter()
            .filter(|pair| pair.0 == "10")
            .map(|pair| pair.1.count)
            .sum();

        assert_eq!(3, count_for_10);
        assert_eq!(4, pairs.len());
    }

    #[test]
    fn map_fails_on_non_numeric_rating() {
        let mut pairs = Vec::new();

        let result = RatingMapper.map(
            MapInputKV::new("ratings.csv", "1,10,4.0,000\n2,10,abc,000\n"),
            IntermediateVecEmitter::new(&mut pairs),
        );

        assert!(result.is_err());
    }
}
