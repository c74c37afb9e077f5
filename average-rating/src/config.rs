use std::path::PathBuf;

use clap::{Arg, ArgMatches};

use payload::*;

const MOVIES_ARG: &str = "movies";

/// Settings resolved once when the payload starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobConfig {
    /// Local copy of the `movieId,title,...` file used to name each movie.
    pub movies: Option<PathBuf>,
}

impl JobConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let movies = match find_value(matches, MOVIES_ARG) {
            Some(path) if path.is_empty() => {
                return Err("--movies was given an empty path".into());
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        Ok(JobConfig { movies })
    }
}

pub fn movies_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(MOVIES_ARG)
        .long(MOVIES_ARG)
        .help("Path to the movies.csv file used to look up titles")
        .takes_value(true)
        .global(true)
        .required(false)
}

// Global arguments given after the subcommand are only recorded on the subcommand's matches.
fn find_value<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.value_of(name).or_else(|| {
        matches
            .subcommand()
            .1
            .and_then(|sub_matches| sub_matches.value_of(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> JobConfig {
        let matches = payload_app()
            .arg(movies_arg())
            .get_matches_from_safe(args)
            .unwrap();
        JobConfig::from_matches(&matches).unwrap()
    }

    #[test]
    fn movies_before_subcommand() {
        let config = parse(&["average-rating", "--movies", "movies.csv", "reduce"]);

        assert_eq!(Some(PathBuf::from("movies.csv")), config.movies);
    }

    #[test]
    fn movies_after_subcommand() {
        let config = parse(&["average-rating", "reduce", "--movies", "movies.csv"]);

        assert_eq!(Some(PathBuf::from("movies.csv")), config.movies);
    }

    #[test]
    fn movies_not_given() {
        let config = parse(&["average-rating", "map"]);

        assert_eq!(JobConfig::default(), config);
    }
}
