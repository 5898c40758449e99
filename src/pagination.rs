//! Fixed-size, 1-indexed pages over ordered result sets.

use serde::{Deserialize, Deserializer};

pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-indexed page number taken from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub i64);

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

impl Page {
    /// Parses a raw query value, falling back to the first page when it is
    /// not a number.
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse::<i64>().map(Page).unwrap_or_default()
    }

    /// Index of the first item on this page, `None` for pages below 1.
    fn start(self) -> Option<usize> {
        let index = usize::try_from(self.0.checked_sub(1)?).ok()?;
        index.checked_mul(QUESTIONS_PER_PAGE)
    }
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Page::parse).unwrap_or_default())
    }
}

/// Returns the items in `[(page - 1) * 10, page * 10)`. Pages past the end,
/// or below 1, are empty.
pub fn paginate<T>(items: Vec<T>, page: Page) -> Vec<T> {
    let Some(start) = page.start() else {
        return Vec::new();
    };
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_len(n: usize, page: i64) -> usize {
        let before = (page as usize - 1) * QUESTIONS_PER_PAGE;
        n.saturating_sub(before).min(QUESTIONS_PER_PAGE)
    }

    #[test]
    fn page_lengths_follow_the_window() {
        for n in [0, 1, 9, 10, 11, 19, 20, 35] {
            for page in 1..=5 {
                let items: Vec<usize> = (0..n).collect();
                let slice = paginate(items, Page(page));
                assert_eq!(slice.len(), expected_len(n, page), "n={n} page={page}");
            }
        }
    }

    #[test]
    fn second_page_starts_at_tenth_item() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(items, Page(2)), (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn empty_sequence_gives_empty_first_page() {
        assert!(paginate(Vec::<u8>::new(), Page::default()).is_empty());
    }

    #[test]
    fn pages_below_one_are_empty() {
        let items: Vec<usize> = (0..25).collect();
        assert!(paginate(items.clone(), Page(0)).is_empty());
        assert!(paginate(items.clone(), Page(-3)).is_empty());
        assert!(paginate(items, Page(i64::MIN)).is_empty());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        assert!(paginate(vec![1, 2, 3], Page(i64::MAX)).is_empty());
    }

    #[test]
    fn non_numeric_page_falls_back_to_first() {
        assert_eq!(Page::parse("abc"), Page(1));
        assert_eq!(Page::parse(""), Page(1));
        assert_eq!(Page::parse(" 3 "), Page(3));
        assert_eq!(Page::parse("-2"), Page(-2));
    }
}
