//! Ranking of same-named candidates against a requested path

/// Score awarded when the candidate ends with the whole requested path
pub const SUFFIX_MATCH_SCORE: i64 = 1000;

/// Score awarded per trailing segment shared by both paths
pub const SEGMENT_MATCH_SCORE: i64 = 100;

fn comparable(path: &str) -> String {
    path.replace('\\', "/").trim_end_matches('/').to_lowercase()
}

/// Score how well `candidate_path` matches `search_path`; higher is better.
///
/// Comparison ignores case and treats `\` as `/`.
pub fn score(search_path: &str, candidate_path: &str) -> i64 {
    let search = comparable(search_path);
    let candidate = comparable(candidate_path);

    let mut total = 0;
    if !search.is_empty() && candidate.ends_with(&search) {
        total += SUFFIX_MATCH_SCORE;
    }

    let shared = search
        .split('/')
        .rev()
        .filter(|s| !s.is_empty())
        .zip(candidate.split('/').rev().filter(|s| !s.is_empty()))
        .take_while(|(a, b)| a == b)
        .count() as i64;

    total + shared * SEGMENT_MATCH_SCORE
}
