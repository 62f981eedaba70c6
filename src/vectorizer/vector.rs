use num::Num;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::math::vector::ZeroSpVec;

/// TF-IDF vector of one document
///
/// Length is the vocabulary size `V`. Vectors produced by a vectorizer carry
/// the fit generation of their vocabulary and are only comparable with
/// vectors of the same generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVector<N = f32>
where
    N: Num + Copy,
{
    vec: ZeroSpVec<N>,
    generation: Option<u64>,
}

impl<N> DocumentVector<N>
where
    N: Num + Copy + Into<f64>,
{
    pub(crate) fn new(vec: ZeroSpVec<N>, generation: u64) -> Self {
        Self { vec, generation: Some(generation) }
    }

    /// Vector not tied to any fit; only its length is checked on comparison.
    pub fn from_dense(values: Vec<N>) -> Self {
        Self { vec: ZeroSpVec::from(values), generation: None }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        self.vec.get(index)
    }

    #[inline]
    pub fn as_sparse(&self) -> &ZeroSpVec<N> {
        &self.vec
    }

    pub fn to_dense(&self) -> Vec<N> {
        self.vec.to_dense()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.vec.norm()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.vec.nnz() == 0
    }

    /// Same length and, when both are stamped, same fit generation
    pub fn check_comparable(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch { expected: self.len(), found: other.len() });
        }
        if let (Some(a), Some(b)) = (self.generation, other.generation) {
            if a != b {
                return Err(Error::GenerationMismatch { expected: a, found: b });
            }
        }
        Ok(())
    }

    /// Raw cosine similarity, 0.0 when either norm is zero
    pub fn cosine(&self, other: &Self) -> Result<f64> {
        self.check_comparable(other)?;
        Ok(self.vec.cosine_similarity(&other.vec))
    }
}
