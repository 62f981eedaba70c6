use std::collections::HashMap;

use num::Num;

use crate::{
    config::Norm,
    utils::{math::vector::ZeroSpVec, sort::radix_sort_u32_soa},
    vectorizer::{corpus::Corpus, term::TermFrequency, vocabulary::Vocabulary},
};

pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `terms` - 語彙 (インデックス順)
    fn idf_vec(corpus: &Corpus, terms: &[&str]) -> Vec<f64>;

    /// TF-IDF ベクトルを生成するメソッド
    /// 語彙にない term は捨てる
    fn tf_idf_vec(freq: &TermFrequency, vocab: &Vocabulary, norm: Norm) -> ZeroSpVec<N>;
}

/// デフォルトのTF-IDFエンジン
///
/// - idf(t) = ln((1 + n) / (1 + df(t))) + 1
/// - tf(t, d) = raw count
///
/// `f32`、`f64` に対応
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    fn idf_vec_f64(corpus: &Corpus, terms: &[&str]) -> Vec<f64> {
        let doc_num = corpus.doc_num();
        terms
            .iter()
            .map(|term| Self::idf(doc_num, corpus.doc_freq(term)))
            .collect()
    }

    /// (sorted indices, weights) in f64
    fn weights_f64(freq: &TermFrequency, vocab: &Vocabulary, norm: Norm) -> (Vec<u32>, Vec<f64>) {
        // 文書内の出現回数を語彙インデックスに寄せる
        let mut by_index: HashMap<u32, f64> = HashMap::with_capacity(freq.distinct_len());
        for (term, count) in freq.iter() {
            if let Some(idx) = vocab.index_of(term) {
                let idf = vocab.idf(idx).unwrap_or(0.0);
                *by_index.entry(idx as u32).or_insert(0.0) += count as f64 * idf;
            }
        }
        let (mut inds, mut vals): (Vec<u32>, Vec<f64>) = by_index.into_iter().unzip();
        radix_sort_u32_soa(&mut inds, &mut vals);

        if norm == Norm::L2 {
            let l2 = vals.iter().map(|v| v * v).sum::<f64>().sqrt();
            if l2 > 0.0 {
                vals.iter_mut().for_each(|v| *v /= l2);
            }
        }
        (inds, vals)
    }
}

macro_rules! impl_float_engine {
    ($($t:ty),*) => {$(
        impl TFIDFEngine<$t> for DefaultTFIDFEngine {
            fn idf_vec(corpus: &Corpus, terms: &[&str]) -> Vec<f64> {
                Self::idf_vec_f64(corpus, terms)
            }

            fn tf_idf_vec(freq: &TermFrequency, vocab: &Vocabulary, norm: Norm) -> ZeroSpVec<$t> {
                let (inds, vals) = Self::weights_f64(freq, vocab, norm);
                let vals: Vec<$t> = vals.into_iter().map(|v| v as $t).collect();
                ZeroSpVec::from_sorted_parts(vocab.len(), inds, vals)
            }
        }
    )*};
}

impl_float_engine!(f32, f64);
