use std::cmp::Ordering;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// ドット積を計算するメソッド
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// 長さが異なる場合の扱いは呼び出し側で確認すること
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut result = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += (*va).into() * (*vb).into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    /// ||a||^2
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.raw_iter()
            .map(|(_, v)| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum()
    }

    /// ||a||
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// どちらかのノルムが 0 なら 0.0
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_only_touches_shared_indices() {
        let a: ZeroSpVec<f64> = ZeroSpVec::from(vec![1.0, 0.0, 2.0, 0.0]);
        let b: ZeroSpVec<f64> = ZeroSpVec::from(vec![3.0, 5.0, 0.0, 7.0]);
        assert_eq!(a.dot(&b), 3.0);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let a: ZeroSpVec<f32> = ZeroSpVec::from(vec![0.0, 0.0]);
        let b: ZeroSpVec<f32> = ZeroSpVec::from(vec![1.0, 1.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
        assert_eq!(b.cosine_similarity(&a), 0.0);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let a: ZeroSpVec<f64> = ZeroSpVec::from(vec![1.0, 2.0, 0.0]);
        let b: ZeroSpVec<f64> = ZeroSpVec::from(vec![2.0, 4.0, 0.0]);
        assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-12);
    }
}
