/// Lomuto-partition quick sort on the key returned by `key`.
///
/// After each partition the run of keys equal to the pivot's is gathered
/// next to the pivot and left out of further work, so slices made mostly of
/// one tier finish in a couple of passes. Only the shorter side is sorted
/// by a nested call; the longer side is handled by the loop, which keeps
/// the call depth logarithmic.
pub(crate) fn quick_sort_by_key<T, K, F>(mut items: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    while items.len() > 1 {
        let pivot = partition(items, key);
        let (low, high) = std::mem::take(&mut items).split_at_mut(pivot);
        let pivot_key = key(&high[0]);
        let less = gather_less(low, &pivot_key, key);
        let low = &mut low[..less];
        // skip the pivot, it is already in its final slot
        let high = &mut high[1..];
        if low.len() < high.len() {
            quick_sort_by_key(low, key);
            items = high;
        } else {
            quick_sort_by_key(high, key);
            items = low;
        }
    }
}

/// Moves every element whose key is `<=` the last element's key to the
/// front, then drops the pivot right after them. Returns the pivot index.
fn partition<T, K, F>(items: &mut [T], key: F) -> usize
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let last = items.len() - 1;
    let pivot = key(&items[last]);
    let mut store = 0;
    for j in 0..last {
        if key(&items[j]) <= pivot {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}

/// `items` holds keys `<= pivot` only. Moves those strictly below `pivot`
/// to the front and returns how many there are; the rest equal `pivot`.
fn gather_less<T, K, F>(items: &mut [T], pivot: &K, key: F) -> usize
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut store = 0;
    for j in 0..items.len() {
        if key(&items[j]) < *pivot {
            items.swap(store, j);
            store += 1;
        }
    }
    store
}
