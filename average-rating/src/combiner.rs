use payload::*;

use rating::PartialAggregate;

/// Merges the partials a single map task produced for one movie.
pub struct RatingCombiner;

impl Combine<String, PartialAggregate> for RatingCombiner {
    fn combine<E>(
        &self,
        input: IntermediateInputKV<String, PartialAggregate>,
        mut emitter: E,
    ) -> Result<()>
    where
        E: EmitFinal<PartialAggregate>,
    {
        let IntermediateInputKV { key, values } = input;
        let merged = PartialAggregate::merge_all(values);
        emitter.emit(merged).chain_err(|| {
            format!("Error emitting combined value for movie {}", key)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::JobConfig;
    use reducer::AverageRatingReducer;

    fn partials(ratings: &[f64]) -> Vec<PartialAggregate> {
        ratings.iter().cloned().map(PartialAggregate::from_rating).collect()
    }

    fn combine(values: Vec<PartialAggregate>) -> Vec<PartialAggregate> {
        let mut sink = Vec::new();
        RatingCombiner
            .combine(
                IntermediateInputKV::new("10".to_owned(), values),
                FinalVecEmitter::new(&mut sink),
            )
            .unwrap();
        sink
    }

    #[test]
    fn combine_emits_a_single_merged_partial() {
        let combined = combine(partials(&[3.0, 4.0]));

        assert_eq!(vec![PartialAggregate { sum: 7.0, count: 2 }], combined);
    }

    #[test]
    fn combine_then_merge_matches_direct_merge() {
        let mut combined = combine(partials(&[3.0, 4.0]));
        combined.extend(partials(&[5.0]));

        let via_combiner = PartialAggregate::merge_all(combined);
        let direct = PartialAggregate::merge_all(partials(&[3.0, 4.0, 5.0]));

        assert_eq!(PartialAggregate { sum: 12.0, count: 3 }, direct);
        assert_eq!(direct, via_combiner);
    }

    #[test]
    fn combining_twice_does_not_change_the_average() {
        let once = combine(partials(&[2.0, 4.0, 5.0]));
        let twice = combine(once.clone());

        let reducer = AverageRatingReducer::new(&JobConfig::default());
        let mut outputs = Vec::new();
        reducer
            .reduce(
                IntermediateInputKV::new("10".to_owned(), twice),
                FinalVecEmitter::new(&mut outputs),
            )
            .unwrap();

        assert_eq!(once, combine(once.clone()));
        assert!((outputs[0].average_rating - 11.0 / 3.0).abs() < 1e-9);
    }
}
