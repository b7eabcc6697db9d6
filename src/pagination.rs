//! Fixed-size pages over already materialized result lists.

pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the items of the 1-based `page`. Pages before the first or past
/// the end are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    let Some(index) = page.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
        return Vec::new();
    };
    let start = index.saturating_mul(QUESTIONS_PER_PAGE);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
