use std::ops::Add;

use serde::{Serialize, Serializer};

use payload::*;

const HEADER_TOKEN: &str = "userId";
const RATING_FIELD_COUNT: usize = 4;

/// A single row of the ratings file: `userId,movieId,rating,timestamp`.
#[derive(Debug, PartialEq)]
pub struct RatingRecord {
    pub user_id: String,
    pub movie_id: String,
    pub rating: f64,
    pub timestamp: String,
}

impl RatingRecord {
    /// Parses one line of the ratings file.
    ///
    /// The header row and rows without exactly four fields yield `Ok(None)`. A rating that is not
    /// a number is an error, since it means the input itself is corrupt.
    pub fn parse(line: &str) -> Result<Option<RatingRecord>> {
        if line.starts_with(HEADER_TOKEN) {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != RATING_FIELD_COUNT {
            return Ok(None);
        }

        let rating: f64 = fields[2]
            .trim()
            .parse()
            .chain_err(|| format!("Error parsing rating {:?} for movie {}", fields[2], fields[1]))?;

        Ok(Some(RatingRecord {
            user_id: fields[0].to_owned(),
            movie_id: fields[1].to_owned(),
            rating,
            timestamp: fields[3].to_owned(),
        }))
    }
}

/// A running `(sum, count)` of ratings for one movie.
///
/// Partials merge by adding both fields, so they can be combined in any order and any number of
/// times before the final average is taken.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PartialAggregate {
    pub sum: f64,
    pub count: u64,
}

impl PartialAggregate {
    pub fn from_rating(rating: f64) -> Self {
        PartialAggregate {
            sum: rating,
            count: 1,
        }
    }

    /// Merges every partial in `partials`, consuming the sequence once.
    pub fn merge_all<I>(partials: I) -> Self
    where
        I: IntoIterator<Item = PartialAggregate>,
    {
        partials
            .into_iter()
            .fold(PartialAggregate::default(), |acc, partial| acc + partial)
    }

    pub fn average(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }
}

impl Add for PartialAggregate {
    type Output = PartialAggregate;

    fn add(self, other: PartialAggregate) -> PartialAggregate {
        PartialAggregate {
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }
}

/// Final output record for one movie. Serialised as `[title, average_rating]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AverageRating {
    pub title: Option<String>,
    pub average_rating: f64,
}

impl Serialize for AverageRating {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.title, self.average_rating).serialize(serializer)
    }
}
