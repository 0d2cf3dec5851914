use strsim::levenshtein;

/// Find the most similar post id from a list of candidates, comparing
/// their decimal forms.
pub fn find_similar_id(target: i64, candidates: &[i64]) -> Option<i64> {
    let target = target.to_string();
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(&target, &candidate.to_string())))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(id, _)| id)
}
