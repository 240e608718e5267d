use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;

pub const QUESTIONS_PER_PAGE: usize = 10;

// query params arrive as strings, serde-aux turns "2" into a number
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Fixed 10-item window over an ordered selection. Pages are 1-based;
/// an out-of-range page yields an empty slice rather than an error.
pub fn paginate<T>(items: &[T], page: u32) -> &[T] {
    let start = (page.saturating_sub(1) as usize).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_is_the_default_window() {
        let items: Vec<i32> = (0..25).collect();
        assert_eq!(paginate(&items, 1), &items[0..10]);
    }

    #[test]
    fn later_pages_advance_by_ten() {
        let items: Vec<i32> = (0..25).collect();
        assert_eq!(paginate(&items, 2), &items[10..20]);
        assert_eq!(paginate(&items, 3), &items[20..25]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<i32> = (0..25).collect();
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 100).is_empty());
        assert!(paginate::<i32>(&[], 1).is_empty());
    }

    #[test]
    fn page_zero_is_clamped_to_the_first_page() {
        let items: Vec<i32> = (0..5).collect();
        assert_eq!(paginate(&items, 0), &items[..]);
    }
}
