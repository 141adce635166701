//! Document title for paged listings

/// Insert the page number after the first title separator.
///
/// `("Rust - Blog", " - ", "Page", 3)` becomes `"Rust - Page 3 - Blog"`.
/// Titles without the separator are returned unchanged.
pub fn paged_title(title: &str, separator: &str, page_word: &str, page: u32) -> String {
    if separator.is_empty() {
        return title.to_string();
    }
    title.replacen(separator, &format!("{separator}{page_word} {page}{separator}"), 1)
}
