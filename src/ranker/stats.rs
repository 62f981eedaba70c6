use std::fmt;

use serde::{Deserialize, Serialize};

/// Summary statistics of a score list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityStatistics {
    pub mean: f64,
    /// population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub count: usize,
    pub above_70_percent: usize,
    pub above_50_percent: usize,
    pub above_30_percent: usize,
}

/// `None` for an empty list. Threshold counts use strict `>`.
pub fn similarity_statistics(scores: &[f64]) -> Option<SimilarityStatistics> {
    if scores.is_empty() {
        return None;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    let above = |t: f64| scores.iter().filter(|&&s| s > t).count();

    Some(SimilarityStatistics {
        mean,
        std: var.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        median,
        count: scores.len(),
        above_70_percent: above(0.7),
        above_50_percent: above(0.5),
        above_30_percent: above(0.3),
    })
}

/// min-max 正規化
/// 全要素同値なら 0.5 固定
pub fn normalize_similarities(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let min_v = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max_v = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max_v - min_v;
    if range == 0.0 || !range.is_finite() {
        return vec![0.5; scores.len()];
    }
    scores.iter().map(|s| (s - min_v) / range).collect()
}

/// Human readable band of a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchCategory {
    Poor,
    Weak,
    Moderate,
    Good,
    VeryGood,
    Excellent,
}

impl MatchCategory {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => MatchCategory::Excellent,
            s if s >= 0.7 => MatchCategory::VeryGood,
            s if s >= 0.6 => MatchCategory::Good,
            s if s >= 0.5 => MatchCategory::Moderate,
            s if s >= 0.3 => MatchCategory::Weak,
            _ => MatchCategory::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchCategory::Excellent => "Excellent Match",
            MatchCategory::VeryGood => "Very Good Match",
            MatchCategory::Good => "Good Match",
            MatchCategory::Moderate => "Moderate Match",
            MatchCategory::Weak => "Weak Match",
            MatchCategory::Poor => "Poor Match",
        }
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn statistics_of_known_list() {
        let stats = similarity_statistics(&[0.2, 0.4, 0.6, 0.8]).unwrap();
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!((stats.median - 0.5).abs() < 1e-12);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.8);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.above_70_percent, 1);
        assert_eq!(stats.above_50_percent, 2);
        assert_eq!(stats.above_30_percent, 3);
        assert!((stats.std - 0.05f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn statistics_of_empty_list_is_none() {
        assert_eq!(similarity_statistics(&[]), None);
    }

    #[test]
    fn thresholds_are_strict() {
        let stats = similarity_statistics(&[0.3, 0.5, 0.7]).unwrap();
        assert_eq!(stats.above_70_percent, 0);
        assert_eq!(stats.above_50_percent, 1);
        assert_eq!(stats.above_30_percent, 2);
        assert_eq!(stats.median, 0.5);
    }

    #[test]
    fn equal_scores_normalize_to_half() {
        assert_eq!(normalize_similarities(&[0.4, 0.4, 0.4]), vec![0.5, 0.5, 0.5]);
        assert!(normalize_similarities(&[]).is_empty());
    }

    #[test]
    fn min_max_normalization() {
        assert_eq!(normalize_similarities(&[0.25, 0.75, 0.5]), vec![0.0, 1.0, 0.5]);

        let got = normalize_similarities(&[0.2, 0.6, 0.4]);
        let want = [0.0, 1.0, 0.5];
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-12, "{got:?}");
        }
    }

    #[test]
    fn category_bands() {
        assert_eq!(MatchCategory::from_score(0.8), MatchCategory::Excellent);
        assert_eq!(MatchCategory::from_score(0.75), MatchCategory::VeryGood);
        assert_eq!(MatchCategory::from_score(0.6), MatchCategory::Good);
        assert_eq!(MatchCategory::from_score(0.5), MatchCategory::Moderate);
        assert_eq!(MatchCategory::from_score(0.3), MatchCategory::Weak);
        assert_eq!(MatchCategory::from_score(0.29), MatchCategory::Poor);
        assert_eq!(MatchCategory::Good.to_string(), "Good Match");
    }
}
