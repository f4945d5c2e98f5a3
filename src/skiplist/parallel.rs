//! Fork/join primitives that `rayon` doesn't ship natively: a parallel
//! merge-by-key and a stable parallel filter, both built on `rayon::join`
//! and `rayon`'s parallel iterators respectively.

use rayon::prelude::*;
use std::marker::PhantomData;
use std::mem::MaybeUninit;

/// Elements below this length are merged sequentially; below this size the
/// recursion overhead outweighs the parallelism.
const SEQUENTIAL_THRESHOLD: usize = 1024;

/// A slice that hands out disjoint-by-construction write access to its
/// elements without requiring `&mut` for each write.
///
/// Soundness rests entirely on callers never writing the same index twice
/// or from two threads at once, exactly the guarantee the merge-rank and
/// layer-materialization recursions below are structured to provide.
struct UnsafeSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<'a, T: Send> Send for UnsafeSlice<'a, T> {}
unsafe impl<'a, T: Send> Sync for UnsafeSlice<'a, T> {}

impl<'a, T> UnsafeSlice<'a, T> {
    fn new(slice: &'a mut [MaybeUninit<T>]) -> Self {
        UnsafeSlice {
            ptr: slice.as_mut_ptr().cast::<T>(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// `index` must be in bounds and must not be written by any other
    /// concurrent call for the lifetime of this `UnsafeSlice`.
    unsafe fn write(&self, index: usize, value: T) {
        debug_assert!(index < self.len);
        unsafe { self.ptr.add(index).write(value) };
    }
}

/// Merge two slices already sorted by `key`, in parallel.
///
/// Mirrors the classic parallel-merge recursion: split the larger half at
/// its midpoint, binary-search the matching split point in the smaller
/// half, then recurse on both halves concurrently. Depth is
/// `O(log(len_left + len_right))`; assumes the two key sets are disjoint
/// (true for every caller in this crate), so relative order of equal keys
/// never arises.
pub(crate) fn merge_by_key<T, K>(left: &[T], right: &[T], key: K) -> Vec<T>
where
    T: Copy + Send + Sync,
    K: Fn(T) -> u32 + Copy + Sync,
{
    let total = left.len() + right.len();
    let mut out: Vec<MaybeUninit<T>> = Vec::with_capacity(total);
    out.resize_with(total, MaybeUninit::uninit);
    {
        let slice = UnsafeSlice::new(&mut out);
        merge_into(left, right, key, 0, &slice);
    }
    // SAFETY: merge_into wrote every index in 0..total exactly once.
    unsafe {
        let mut out = std::mem::ManuallyDrop::new(out);
        Vec::from_raw_parts(out.as_mut_ptr().cast::<T>(), total, out.capacity())
    }
}

fn merge_into<T, K>(left: &[T], right: &[T], key: K, offset: usize, out: &UnsafeSlice<'_, T>)
where
    T: Copy + Send + Sync,
    K: Fn(T) -> u32 + Copy + Sync,
{
    if left.len() + right.len() <= SEQUENTIAL_THRESHOLD {
        let mut i = 0;
        let mut j = 0;
        let mut pos = offset;
        while i < left.len() && j < right.len() {
            if key(left[i]) < key(right[j]) {
                unsafe { out.write(pos, left[i]) };
                i += 1;
            } else {
                unsafe { out.write(pos, right[j]) };
                j += 1;
            }
            pos += 1;
        }
        for &v in &left[i..] {
            unsafe { out.write(pos, v) };
            pos += 1;
        }
        for &v in &right[j..] {
            unsafe { out.write(pos, v) };
            pos += 1;
        }
        return;
    }

    if left.len() < right.len() {
        return merge_into(right, left, key, offset, out);
    }

    let mid = left.len() / 2;
    let pivot = key(left[mid]);
    let split = right.partition_point(|&v| key(v) < pivot);
    rayon::join(
        || merge_into(&left[..mid], &right[..split], key, offset, out),
        || merge_into(&left[mid..], &right[split..], key, offset + mid + split, out),
    );
}

/// Stable parallel filter that preserves relative order of survivors.
pub(crate) fn filter<T, F>(items: &[T], pred: F) -> Vec<T>
where
    T: Copy + Send + Sync,
    F: Fn(T) -> bool + Sync,
{
    items.par_iter().copied().filter(|&v| pred(v)).collect()
}
