use crate::model::movie::Movie;

#[derive(Debug, PartialEq)]
pub struct Stats<'a> {
    pub average: f64,
    pub median: f64,
    pub best: &'a Movie,
    pub worst: &'a Movie,
}

/// Rating statistics for a collection, `None` when it is empty.
/// Ties for best and worst go to the movie listed first.
pub fn stats(movies: &[Movie]) -> Option<Stats<'_>> {
    let first = movies.first()?;

    let total: f64 = movies.iter().map(|m| m.rating).sum();
    let average = total / movies.len() as f64;

    let mut ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
    ratings.sort_by(f64::total_cmp);
    let mid = ratings.len() / 2;
    let median = if ratings.len() % 2 == 0 {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
        ratings[mid]
    };

    let mut best = first;
    let mut worst = first;
    for movie in movies.iter().skip(1) {
        if movie.rating > best.rating {
            best = movie;
        }
        if movie.rating < worst.rating {
            worst = movie;
        }
    }

    Some(Stats {
        average,
        median,
        best,
        worst,
    })
}
