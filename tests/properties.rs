use proptest::prelude::*;
use tfidf_matcher::{pairwise_similarity, rank, score, TFIDFVectorizer, VectorizerConfig};

const WORDS: &[&str] = &[
    "python", "rust", "aws", "kubernetes", "docker", "engineer", "senior", "data", "pipeline", "sql", "react",
    "the", "and", "with",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..20).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn encoding_is_deterministic(docs in prop::collection::vec(document(), 1..6)) {
        let mut a: TFIDFVectorizer<f64> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
        let mut b: TFIDFVectorizer<f64> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
        let va = a.encode_batch(&docs).unwrap();
        let vb = b.encode_batch(&docs).unwrap();
        prop_assert_eq!(a.vocabulary().unwrap().terms().collect::<Vec<_>>(), b.vocabulary().unwrap().terms().collect::<Vec<_>>());
        for (x, y) in va.iter().zip(&vb) {
            prop_assert_eq!(x.to_dense(), y.to_dense());
        }
    }

    #[test]
    fn transform_is_bit_identical_within_one_fit(docs in prop::collection::vec(document(), 1..6)) {
        let mut v: TFIDFVectorizer<f64> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
        v.fit(&docs).unwrap();
        for doc in &docs {
            let first = v.transform(doc).unwrap();
            let second = v.transform(doc).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn scores_are_bounded_and_symmetric(docs in prop::collection::vec(document(), 2..6)) {
        let mut v: TFIDFVectorizer<f64> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
        let vecs = v.encode_batch(&docs).unwrap();
        let m = pairwise_similarity(&vecs).unwrap();
        for i in 0..vecs.len() {
            for j in 0..vecs.len() {
                prop_assert!((0.0..=1.0).contains(&m[i][j]));
                prop_assert!((m[i][j] - m[j][i]).abs() < 1e-12);
            }
            let s = score(&vecs[i], &vecs[..]).unwrap();
            prop_assert!((s[i] - m[i][i]).abs() < 1e-9);
        }
    }

    #[test]
    fn self_similarity_is_one_for_non_zero_vectors(doc in document()) {
        let mut v: TFIDFVectorizer<f64> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
        let vec = v.encode(&doc).unwrap();
        let s = score(&vec, std::slice::from_ref(&vec)).unwrap()[0];
        if vec.is_zero() {
            prop_assert_eq!(s, 0.0);
        } else {
            prop_assert!((s - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rank_is_sorted_and_bounded(scores in prop::collection::vec(0.0f64..=1.0, 0..30), k in 0usize..40) {
        let hits = rank(scores.iter().copied().enumerate(), k);
        prop_assert_eq!(hits.len(), k.min(scores.len()));
        let got = hits.scores();
        prop_assert!(got.windows(2).all(|w| w[0] >= w[1]));
        for (pos, h) in hits.iter().enumerate() {
            prop_assert_eq!(h.rank, pos + 1);
            prop_assert_eq!(scores[h.key], h.score);
        }
    }
}
