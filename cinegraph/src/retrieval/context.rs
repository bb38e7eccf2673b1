//! Rendering of enriched movies into the context text handed to the language model.

use crate::store::EnrichedMovie;

/// Line separating movie blocks.
pub const BLOCK_SEPARATOR: &str = "\n---\n";

fn format_block(movie: &EnrichedMovie) -> String {
    format!(
        "Movie: {}\nOverview: {}\nRating: {:?}\nGenres: {}\nDirector: {}\nActors: {}\nSimilar: {}",
        movie.title,
        movie.overview,
        movie.rating,
        movie.genres.join(", "),
        movie.directors.join(", "),
        movie.actors.join(", "),
        movie.similar_movies.join(", "),
    )
}

/// One block per movie, joined by [`BLOCK_SEPARATOR`]. Empty input gives an empty string.
pub fn format_context(movies: &[EnrichedMovie]) -> String {
    movies
        .iter()
        .map(format_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> EnrichedMovie {
        EnrichedMovie {
            title: "The Matrix".into(),
            overview: "A hacker learns the truth.".into(),
            rating: 8.7,
            genres: vec!["Action".into(), "Science Fiction".into()],
            directors: vec!["Lana Wachowski".into(), "Lilly Wachowski".into()],
            actors: vec!["Keanu Reeves".into(), "Carrie-Anne Moss".into()],
            similar_movies: vec!["Dark City".into()],
        }
    }

    #[test]
    fn block_layout() {
        assert_eq!(
            format_context(&[matrix()]),
            "Movie: The Matrix\n\
             Overview: A hacker learns the truth.\n\
             Rating: 8.7\n\
             Genres: Action, Science Fiction\n\
             Director: Lana Wachowski, Lilly Wachowski\n\
             Actors: Keanu Reeves, Carrie-Anne Moss\n\
             Similar: Dark City"
        );
    }

    /// **Scenario**: blocks are joined by the separator line; empty lists render as empty fields.
    #[test]
    fn blocks_are_separated() {
        let sparse = EnrichedMovie {
            title: "Heat".into(),
            ..Default::default()
        };
        let out = format_context(&[matrix(), sparse]);
        let blocks: Vec<&str> = out.split(BLOCK_SEPARATOR).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[1].starts_with("Movie: Heat\n"));
        assert!(blocks[1].ends_with("Similar: "));
    }

    /// **Scenario**: whole-number ratings keep their decimal point.
    #[test]
    fn whole_rating_keeps_decimal() {
        let movie = EnrichedMovie {
            title: "Heat".into(),
            rating: 8.0,
            ..Default::default()
        };
        assert!(format_context(&[movie.clone()]).contains("\nRating: 8.0\n"));
        let unrated = EnrichedMovie {
            rating: 0.0,
            ..movie
        };
        assert!(format_context(&[unrated]).contains("\nRating: 0.0\n"));
    }

    #[test]
    fn empty_input_is_empty_string() {
        assert_eq!(format_context(&[]), "");
    }
}
