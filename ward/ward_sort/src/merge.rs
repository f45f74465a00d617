/// Top-down merge sort. `le(a, b)` is "a may precede b"; on ties the
/// element from the left half is taken first, which keeps the sort stable.
pub(crate) fn merge_sort_by<T, F>(items: &mut [T], le: F)
where
    T: Clone,
    F: Fn(&T, &T) -> bool + Copy,
{
    if items.len() < 2 {
        return;
    }
    // left half gets the extra element on odd lengths
    let mid = (items.len() + 1) / 2;
    {
        let (left, right) = items.split_at_mut(mid);
        merge_sort_by(left, le);
        merge_sort_by(right, le);
    }
    merge(items, mid, le);
}

fn merge<T, F>(items: &mut [T], mid: usize, le: F)
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let left = items[..mid].to_vec();
    let right = items[mid..].to_vec();
    let (mut i, mut j) = (0, 0);

    for slot in items.iter_mut() {
        let take_left = match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) => le(l, r),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}
