//! Quicksort that keeps a companion array in lock-step with the sorted one.
//!
//! Every swap applied to `keys` is applied to `values` at the same positions,
//! so sorting points together with an identity permutation records, at each
//! new position `k`, the original index of the point now stored there.
//! Sorting that permutation back into ascending order while carrying a
//! second array along restores the second array to original order.
//!
//! The sort is **not stable**: elements that compare equal end up in whatever
//! order the partitioning leaves them.  Callers that need a deterministic
//! tie-break must impose it afterwards.

use std::mem;

/// Below this length a partition is finished with insertion sort.
const INSERTION_THRESHOLD: usize = 12;

/// An identity permutation `[0, 1, .., n-1]`.
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Sort `keys` by `is_less`, mirroring every swap onto `values`.
///
/// # Panics
/// If `keys` and `values` differ in length.
pub fn quicksort_with<K, V, F>(keys: &mut [K], values: &mut [V], mut is_less: F)
where
    F: FnMut(&K, &K) -> bool,
{
    assert_eq!(keys.len(), values.len(), "quicksort_with: companion array length mismatch");
    quicksort_rec(keys, values, &mut is_less);
}

/// Sort `data` in place and keep `perm` synchronised: afterwards `perm[k]` is
/// whatever `perm` held at the original position of the element now at `k`.
/// Starting from [`identity`], that is the element's original index.
pub fn sort_with_permutation<T, F>(data: &mut [T], perm: &mut [usize], is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    quicksort_with(data, perm, is_less);
}

/// Undo a permutation recorded by [`sort_with_permutation`]: sorts `perm`
/// ascending and carries `data` along, so `data` ends up in original-index
/// order and `perm` becomes the identity again.
pub fn restore_original_order<T>(perm: &mut [usize], data: &mut [T]) {
    quicksort_with(perm, data, |a, b| a < b);
}

fn quicksort_rec<K, V, F>(mut keys: &mut [K], mut values: &mut [V], is_less: &mut F)
where
    F: FnMut(&K, &K) -> bool,
{
    loop {
        let len = keys.len();
        if len <= 1 { return; }
        if len <= INSERTION_THRESHOLD {
            insertion_sort(keys, values, is_less);
            return;
        }

        let (lt, gt) = partition3(keys, values, is_less);

        let (left_k, rest_k) = mem::take(&mut keys).split_at_mut(lt);
        let right_k = &mut rest_k[gt - lt..];
        let (left_v, rest_v) = mem::take(&mut values).split_at_mut(lt);
        let right_v = &mut rest_v[gt - lt..];

        // Recurse into the smaller side, iterate on the larger one.
        if left_k.len() < right_k.len() {
            quicksort_rec(left_k, left_v, is_less);
            keys = right_k;
            values = right_v;
        } else {
            quicksort_rec(right_k, right_v, is_less);
            keys = left_k;
            values = left_v;
        }
    }
}

#[inline]
fn swap_both<K, V>(keys: &mut [K], values: &mut [V], i: usize, j: usize) {
    keys.swap(i, j);
    values.swap(i, j);
}

/// Median of `keys[0]`, `keys[len/2]`, `keys[len-1]`.
fn median_of_three<K, F>(keys: &[K], is_less: &mut F) -> usize
where
    F: FnMut(&K, &K) -> bool,
{
    let (a, b, c) = (0, keys.len() / 2, keys.len() - 1);
    let ab = is_less(&keys[a], &keys[b]);
    let bc = is_less(&keys[b], &keys[c]);
    let ac = is_less(&keys[a], &keys[c]);
    if ab == bc { b } else if ab == ac { c } else { a }
}

/// Three-way partition around a median-of-three pivot.
///
/// Returns `(lt, gt)` with `keys[..lt] < pivot`, `keys[lt..gt] == pivot`,
/// `keys[gt..] > pivot`.  Runs of equal keys are settled in one pass, which
/// keeps heavily duplicated input from degrading to quadratic time.
fn partition3<K, V, F>(keys: &mut [K], values: &mut [V], is_less: &mut F) -> (usize, usize)
where
    F: FnMut(&K, &K) -> bool,
{
    let pivot = median_of_three(keys, is_less);
    swap_both(keys, values, 0, pivot);

    // keys[lt] always holds an element equal to the pivot.
    let mut lt = 0;
    let mut i = 1;
    let mut gt = keys.len();
    while i < gt {
        if is_less(&keys[i], &keys[lt]) {
            swap_both(keys, values, lt, i);
            lt += 1;
            i += 1;
        } else if is_less(&keys[lt], &keys[i]) {
            gt -= 1;
            swap_both(keys, values, i, gt);
        } else {
            i += 1;
        }
    }
    (lt, gt)
}

fn insertion_sort<K, V, F>(keys: &mut [K], values: &mut [V], is_less: &mut F)
where
    F: FnMut(&K, &K) -> bool,
{
    for i in 1..keys.len() {
        let mut j = i;
        while j > 0 && is_less(&keys[j], &keys[j - 1]) {
            swap_both(keys, values, j, j - 1);
            j -= 1;
        }
    }
}
