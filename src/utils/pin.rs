use core::pin::Pin;

/// Returns a pinned mutable reference to the element at `index`, or `None`
/// if the index is out of bounds.
#[inline]
pub(crate) fn get_pin_mut_from_vec<T>(vec: Pin<&mut Vec<T>>, index: usize) -> Option<Pin<&mut T>> {
    // SAFETY: the vec is never resized while pinned, and the element is only
    // handed out as pinned, so it is never moved. This has the same safety as a
    // normal field pin projection.
    unsafe {
        vec.get_unchecked_mut()
            .get_mut(index)
            .map(|x| Pin::new_unchecked(x))
    }
}
