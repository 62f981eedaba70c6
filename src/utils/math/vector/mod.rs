pub mod math;

use std::fmt::{self, Debug};

use num::Num;
use serde::{Deserialize, Serialize};

/// ZeroSpVec は 0 要素を疎とした疎ベクトルです
/// indices と values を持ち
/// indices は非ゼロ要素の論理インデックスを保持し、
/// values はその値を保持します
///
/// 要素は indices の昇順でソートされていることを保証します
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroSpVec<N>
where
    N: Num,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
        }
    }

    /// `cap` は非ゼロ要素数の見込み
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    /// ソート済みの (index, value) 列から構築します
    /// ゼロ値は落とします
    ///
    /// # Arguments
    /// * `len` - 論理的な長さ
    /// * `inds` - 昇順のインデックス
    /// * `vals` - `inds` に対応する値
    pub fn from_sorted_parts(len: usize, inds: Vec<u32>, vals: Vec<N>) -> Self {
        debug_assert_eq!(inds.len(), vals.len());
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]), "indices must be strictly ascending");
        debug_assert!(inds.last().map_or(true, |&i| (i as usize) < len), "index out of bounds");
        let mut vec = ZeroSpVec::with_capacity(inds.len());
        for (ind, val) in inds.into_iter().zip(vals) {
            if val != N::zero() {
                vec.inds.push(ind);
                vec.vals.push(val);
            }
        }
        vec.len = len;
        vec
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 論理的な長さ (次元数)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 非ゼロ要素数
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// 末尾に要素を追加します
    /// ゼロは長さだけ伸ばします
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len as u32);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    /// 範囲外は None
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(i) => Some(self.vals[i]),
            Err(_) => Some(N::zero()),
        }
    }

    /// 非ゼロ要素のみを (index, &value) で走査します
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter())
    }

    /// 全要素を走査します
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        let mut raw = self.raw_iter().peekable();
        (0..self.len).map(move |i| match raw.peek() {
            Some(&(ri, &v)) if ri == i => {
                raw.next();
                v
            }
            _ => N::zero(),
        })
    }

    pub fn to_dense(&self) -> Vec<N> {
        self.iter().collect()
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    fn from(vec: Vec<N>) -> Self {
        let mut zero_sp_vec = ZeroSpVec::with_capacity(vec.len());
        for entry in vec {
            zero_sp_vec.push(entry);
        }
        zero_sp_vec
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("nnz", &self.nnz())
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        } else {
            f.debug_list().entries(self.raw_iter()).finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_only_non_zero() {
        let vec: ZeroSpVec<f32> = ZeroSpVec::from(vec![0.0, 1.5, 0.0, 2.0]);
        assert_eq!(vec.len(), 4);
        assert_eq!(vec.nnz(), 2);
        assert_eq!(vec.get(1), Some(1.5));
        assert_eq!(vec.get(2), Some(0.0));
        assert_eq!(vec.get(4), None);
        assert_eq!(vec.to_dense(), vec![0.0, 1.5, 0.0, 2.0]);
    }

    #[test]
    fn from_sorted_parts_drops_zero_values() {
        let vec = ZeroSpVec::from_sorted_parts(10, vec![1, 4, 9], vec![3.0f64, 0.0, 1.0]);
        assert_eq!(vec.len(), 10);
        assert_eq!(vec.raw_iter().map(|(i, v)| (i, *v)).collect::<Vec<_>>(), vec![(1, 3.0), (9, 1.0)]);
    }
}
