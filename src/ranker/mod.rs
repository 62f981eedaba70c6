pub mod stats;

use std::fmt::{self, Debug, Display};

use num::Num;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    vectorizer::vector::DocumentVector,
};

/// One ranked entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitEntry<K> {
    pub key: K,
    /// similarity in [0, 1]
    pub score: f64,
    /// 1-based position after the stable descending sort
    pub rank: usize,
    /// position in the scored input
    pub input_index: usize,
}

/// Ranked results
#[derive(Clone, PartialEq, Serialize)]
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry<K>> {
        self.list.iter()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.list.iter().map(|e| e.score).collect()
    }

    pub fn best(&self) -> Option<&HitEntry<K>> {
        self.list.first()
    }
}

impl<K> IntoIterator for Hits<K> {
    type Item = HitEntry<K>;
    type IntoIter = std::vec::IntoIter<HitEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for e in &self.list {
                writeln!(f, "    #{} {:?}: {:.6}", e.rank, e.key, e.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl<K> Display for Hits<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.list {
            writeln!(f, "{}\t{:.4}\t{}", e.rank, e.score, e.key)?;
        }
        Ok(())
    }
}

/// Clamp into [0, 1]; NaN becomes 0
#[inline]
pub fn clip_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Cosine similarity of `query` against each candidate, clipped to [0, 1],
/// in input order.
///
/// Every candidate must share the query's length and fit generation.
pub fn score<N>(query: &DocumentVector<N>, candidates: &[DocumentVector<N>]) -> Result<Vec<f64>>
where
    N: Num + Copy + Into<f64>,
{
    if candidates.is_empty() {
        return Err(Error::empty("no candidate vectors to score"));
    }
    // 先に全件チェックして途中まで計算しない
    for c in candidates {
        query.check_comparable(c)?;
    }
    let query_norm = query.norm();
    let scores = candidates
        .iter()
        .map(|c| {
            let cand_norm = c.norm();
            if query_norm == 0.0 || cand_norm == 0.0 {
                return 0.0;
            }
            clip_unit(query.as_sparse().dot(c.as_sparse()) / (query_norm * cand_norm))
        })
        .collect();
    Ok(scores)
}

/// Stable descending sort by score, truncated to `top_k`.
/// Equal scores keep their input order.
pub fn rank<K, I>(scored: I, top_k: usize) -> Hits<K>
where
    I: IntoIterator<Item = (K, f64)>,
{
    let mut list: Vec<(usize, K, f64)> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (k, s))| (i, k, s))
        .collect();
    // sort_by は安定ソート
    list.sort_by(|a, b| b.2.total_cmp(&a.2));
    list.truncate(top_k);
    Hits {
        list: list
            .into_iter()
            .enumerate()
            .map(|(pos, (input_index, key, score))| HitEntry { key, score, rank: pos + 1, input_index })
            .collect(),
    }
}

/// Symmetric cosine similarity matrix over one list of vectors.
/// Diagonal is 1.0 for non-zero vectors and 0.0 for zero vectors.
pub fn pairwise_similarity<N>(vectors: &[DocumentVector<N>]) -> Result<Vec<Vec<f64>>>
where
    N: Num + Copy + Into<f64>,
{
    if vectors.len() < 2 {
        return Err(Error::empty("pairwise similarity needs at least 2 vectors"));
    }
    let first = &vectors[0];
    for v in &vectors[1..] {
        first.check_comparable(v)?;
    }
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = if vectors[i].is_zero() { 0.0 } else { 1.0 };
        for j in (i + 1)..n {
            let s = clip_unit(vectors[i].as_sparse().cosine_similarity(vectors[j].as_sparse()));
            matrix[i][j] = s;
            matrix[j][i] = s;
        }
    }
    Ok(matrix)
}
