pub const QUESTIONS_PER_PAGE: usize = 10;

/// Window `[(page - 1) * size, (page - 1) * size + size)` of `items`.
///
/// Pages are 1-based. Pages below 1 or past the end give an empty slice; callers
/// decide what an empty page means for them.
pub fn paginate<T>(items: &[T], page: i64, size: usize) -> &[T] {
    let Some(index) = page.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
        return &[];
    };
    let start = index.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}
