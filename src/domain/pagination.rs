//! Fixed-size pagination over an ordered result set.

/// Number of questions served per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Slice one 1-based page out of the full ordered result set.
///
/// Returns an empty slice when the page is past the end of the data.
/// Page 0 is out of range by definition (pages are 1-based).
pub fn paginate<T>(items: &[T], page: u32) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page as usize - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
