//! Cypher statements used by the typed [`GraphStore`](super::GraphStore) methods.

/// Vector index over `Movie.embedding` (384 dimensions, cosine).
pub const VECTOR_INDEX: &str = "movie_embeddings";

/// Full-text index over `Movie.title` and `Movie.overview`.
pub const FULLTEXT_INDEX: &str = "movie_text";

pub const VECTOR_SEARCH: &str = "\
CALL db.index.vector.queryNodes($index, $top_k, $embedding)
YIELD node, score
RETURN node.title AS title, node.overview AS overview,
       node.rating AS rating, score
ORDER BY score DESC";

pub const FULLTEXT_SEARCH: &str = "\
CALL db.index.fulltext.queryNodes($index, $text)
YIELD node, score
RETURN node.title AS title, node.overview AS overview,
       node.rating AS rating, score
ORDER BY score DESC
LIMIT $top_k";

/// Case-insensitive substring title match; an exact match wins, then the shortest title.
pub const MOVIE_CONTEXT: &str = "\
MATCH (m:Movie)
WHERE toLower(m.title) CONTAINS toLower($title)
WITH m
ORDER BY CASE WHEN toLower(m.title) = toLower($title) THEN 0 ELSE 1 END, size(m.title)
LIMIT 1
OPTIONAL MATCH (m)-[:HAS_GENRE]->(g:Genre)
OPTIONAL MATCH (p:Person)-[:DIRECTED]->(m)
OPTIONAL MATCH (a:Person)-[:ACTED_IN]->(m)
OPTIONAL MATCH (m)-[:SIMILAR_TO]->(similar:Movie)
RETURN m.title AS title, m.overview AS overview, m.rating AS rating,
       collect(DISTINCT g.name) AS genres,
       collect(DISTINCT p.name) AS directors,
       collect(DISTINCT a.name)[0..5] AS actors,
       collect(DISTINCT similar.title)[0..3] AS similar_movies";

pub const MOVIE_DETAILS: &str = "\
MATCH (m:Movie)
WHERE toLower(m.title) CONTAINS toLower($title)
WITH m
ORDER BY CASE WHEN toLower(m.title) = toLower($title) THEN 0 ELSE 1 END, size(m.title)
LIMIT 1
OPTIONAL MATCH (p:Person)-[r:ACTED_IN]->(m)
WITH m, collect({name: p.name, role: r.role}) AS actors
OPTIONAL MATCH (d:Person)-[:DIRECTED]->(m)
WITH m, actors, collect(d.name) AS directors
OPTIONAL MATCH (m)-[:HAS_GENRE]->(g:Genre)
WITH m, actors, directors, collect(g.name) AS genres
OPTIONAL MATCH (m)-[:PRODUCED_BY]->(s:Studio)
WITH m, actors, directors, genres, collect(s.name) AS studios
OPTIONAL MATCH (m)-[:HAS_KEYWORD]->(k:Keyword)
RETURN m {.*,
    embedding: null,
    actors: actors,
    directors: directors,
    genres: genres,
    studios: studios,
    keywords: collect(k.term)
} AS details";

pub const GRAPH_STATS: &str = "\
MATCH (m:Movie) WITH count(m) AS movies
MATCH (p:Person) WITH movies, count(p) AS people
MATCH (g:Genre) WITH movies, people, count(g) AS genres
MATCH ()-[r]->() WITH movies, people, genres, count(r) AS relationships
RETURN movies, people, genres, relationships";

/// Characters with meaning in Lucene query syntax.
const LUCENE_SPECIAL: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    '/',
];

/// Escapes Lucene syntax so free-form user text is searched as plain terms.
pub fn escape_lucene(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if LUCENE_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
