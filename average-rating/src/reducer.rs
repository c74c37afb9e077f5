use payload::*;

use config::JobConfig;
use lookup::MovieTitles;
use rating::{AverageRating, PartialAggregate};

/// Merges every partial for a movie, takes the average and attaches the movie's title when a
/// movies file was configured.
pub struct AverageRatingReducer {
    titles: Option<MovieTitles>,
}

impl AverageRatingReducer {
    pub fn new(config: &JobConfig) -> Self {
        AverageRatingReducer {
            titles: config.movies.as_ref().map(MovieTitles::new),
        }
    }
}

impl Reduce<String, PartialAggregate> for AverageRatingReducer {
    type Output = AverageRating;
    fn reduce<E>(
        &self,
        input: IntermediateInputKV<String, PartialAggregate>,
        mut emitter: E,
    ) -> Result<()>
    where
        E: EmitFinal<Self::Output>,
    {
        let IntermediateInputKV { key, values } = input;
        let total = PartialAggregate::merge_all(values);
        if total.count == 0 {
            info!("Movie {} reached the reducer without any ratings", key);
        }

        let title = match self.titles {
            Some(ref titles) => titles
                .title_for(&key)
                .chain_err(|| format!("Error looking up title for movie {}", key))?,
            None => None,
        };

        emitter
            .emit(AverageRating {
                title,
                average_rating: total.average(),
            })
            .chain_err(|| format!("Error emitting average rating for movie {}", key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;
    use lookup::tests::write_movies;

    fn reduce(
        reducer: &AverageRatingReducer,
        key: &str,
        values: Vec<PartialAggregate>,
    ) -> Result<Vec<AverageRating>> {
        let mut outputs = Vec::new();
        reducer.reduce(
            IntermediateInputKV::new(key.to_owned(), values),
            FinalVecEmitter::new(&mut outputs),
        )?;
        Ok(outputs)
    }

    // The file is removed when the returned handle is dropped.
    fn reducer_with_movies() -> (NamedTempFile, AverageRatingReducer) {
        let movies = write_movies("10,Toy Story,Animation\n");
        let config = JobConfig {
            movies: Some(movies.path().to_path_buf()),
        };
        (movies, AverageRatingReducer::new(&config))
    }

    #[test]
    fn reduce_takes_average_of_merged_partials() {
        let outputs = reduce(
            &AverageRatingReducer::new(&JobConfig::default()),
            "10",
            vec![
                PartialAggregate { sum: 4.0, count: 1 },
                PartialAggregate { sum: 5.0, count: 2 },
            ],
        ).unwrap();

        assert_eq!(
            vec![AverageRating { title: None, average_rating: 3.0 }],
            outputs
        );
    }

    #[test]
    fn reduce_without_ratings_is_zero() {
        let outputs = reduce(&AverageRatingReducer::new(&JobConfig::default()), "10", Vec::new()).unwrap();

        assert_eq!(
            vec![AverageRating { title: None, average_rating: 0.0 }],
            outputs
        );
    }

    #[test]
    fn reduce_attaches_title() {
        let (_movies, reducer) = reducer_with_movies();

        let outputs = reduce(&reducer, "10", vec![PartialAggregate::from_rating(4.5)]).unwrap();

        assert_eq!(
            vec![AverageRating {
                title: Some("Toy Story".to_owned()),
                average_rating: 4.5,
            }],
            outputs
        );
    }

    #[test]
    fn reduce_keeps_records_without_title() {
        let (_movies, reducer) = reducer_with_movies();

        let outputs = reduce(&reducer, "99", vec![PartialAggregate::from_rating(2.0)]).unwrap();

        assert_eq!(
            vec![AverageRating { title: None, average_rating: 2.0 }],
            outputs
        );
    }

    #[test]
    fn reduce_fails_when_movies_file_is_missing() {
        let config = JobConfig {
            movies: Some(PathBuf::from("/nonexistent/average-rating-movies.csv")),
        };
        let reducer = AverageRatingReducer::new(&config);

        let result = reduce(&reducer, "10", vec![PartialAggregate::from_rating(2.0)]);

        assert!(result.is_err());
    }
}
