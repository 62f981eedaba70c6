/// u32 キーの LSD radix sort (SoA: inds/vals)
/// - Sorts by inds ascending
/// - Reorders vals accordingly
/// - Stable: equal keys keep their input order
///
/// Complexity: 4 passes, each O(n + 256)
#[inline]
pub fn radix_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort is faster than allocating scratch.
    if n <= 32 {
        insertion_sort_u32_soa(inds, vals);
        return;
    }

    // Scratch buffers (allocate once per call)
    let mut inds_tmp = vec![0u32; n];
    let mut vals_tmp: Vec<N> = vals.to_vec();

    for shift in [0u32, 8, 16, 24] {
        // 偶数パスは inds -> tmp, 奇数パスは tmp -> inds
        let forward = (shift / 8) % 2 == 0;
        let (src_i, src_v, dst_i, dst_v): (&[u32], &[N], &mut [u32], &mut [N]) = if forward {
            (&*inds, &*vals, &mut inds_tmp[..], &mut vals_tmp[..])
        } else {
            (&inds_tmp[..], &vals_tmp[..], &mut *inds, &mut *vals)
        };

        let mut count = [0usize; 256];
        for &k in src_i {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }

        // Prefix sum -> starting positions
        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for (&k, &v) in src_i.iter().zip(src_v) {
            let b = ((k >> shift) & 0xFF) as usize;
            let pos = count[b];
            count[b] = pos + 1;
            dst_i[pos] = k;
            dst_v[pos] = v;
        }
    }
    // 4 passes (even) なので結果は inds/vals に戻っている
}

/// Tiny insertion sort for small n (SoA).
#[inline]
fn insertion_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    let n = inds.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// sort by key, and if key is equal, preserve original order (stable).
    fn baseline_stable_sort<N: Copy>(inds: &[u32], vals: &[N]) -> (Vec<u32>, Vec<N>) {
        let mut pairs: Vec<(u32, usize, N)> = inds
            .iter()
            .copied()
            .enumerate()
            .map(|(i, k)| (k, i, vals[i]))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        pairs.into_iter().map(|(k, _, v)| (k, v)).unzip()
    }

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn radix_sort_handles_empty_and_single() {
        let mut inds: Vec<u32> = vec![];
        let mut vals: Vec<u16> = vec![];
        radix_sort_u32_soa(&mut inds, &mut vals);
        assert!(inds.is_empty());

        let mut inds = vec![42u32];
        let mut vals = vec![7u16];
        radix_sort_u32_soa(&mut inds, &mut vals);
        assert_eq!(inds, vec![42u32]);
        assert_eq!(vals, vec![7u16]);
    }

    #[test]
    fn radix_sort_matches_baseline_many_sizes() {
        let mut rng = Rng(0x1234_5678);
        for &n in &[2usize, 7, 31, 32, 33, 64, 129, 1024] {
            let mut inds = Vec::with_capacity(n);
            let mut vals = Vec::with_capacity(n);
            for i in 0..n {
                // duplicates are likely with the mask
                inds.push(rng.next_u32() & 0x00FF_FFFF);
                vals.push((i as u32) ^ 0xA5A5_5A5A);
            }
            let (base_k, base_v) = baseline_stable_sort(&inds, &vals);
            radix_sort_u32_soa(&mut inds, &mut vals);
            assert_eq!(inds, base_k, "keys mismatch at n={n}");
            assert_eq!(vals, base_v, "vals mismatch at n={n}");
        }
    }

    #[test]
    fn radix_sort_extremes() {
        let mut inds = vec![0u32, u32::MAX, 1, u32::MAX - 1, 0, 2, u32::MAX];
        let mut vals: Vec<u32> = (0..inds.len() as u32).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);
        radix_sort_u32_soa(&mut inds, &mut vals);
        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }
}
