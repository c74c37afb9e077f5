use std::path::PathBuf;

use csv::ReaderBuilder;
use payload::*;

/// Resolves movie titles from a `movieId,title,...` side file.
///
/// The file is opened and scanned on every lookup; nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct MovieTitles {
    path: PathBuf,
}

impl MovieTitles {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        MovieTitles { path: path.into() }
    }

    /// Returns the title of the first row whose id field equals `movie_id`.
    ///
    /// Rows are read as CSV, so quoted titles keep their commas and doubled quotes. A missing or
    /// unreadable file is an error. Running out of rows is not: the movie simply has no title.
    pub fn title_for(&self, movie_id: &str) -> Result<Option<String>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .chain_err(|| format!("Error opening movies file {}", self.path.display()))?;

        for record in reader.records() {
            let record = record.chain_err(|| {
                format!("Error reading movies file {}", self.path.display())
            })?;

            if record.get(0) != Some(movie_id) {
                continue;
            }
            if let Some(title) = record.get(1) {
                return Ok(Some(title.trim().to_owned()));
            }
        }

        debug!("No title for movie {} in {}", movie_id, self.path.display());
        Ok(None)
    }
}
