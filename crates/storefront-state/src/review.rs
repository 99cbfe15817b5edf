//! Review Form
//!
//! Draft of a product review with a bounded list of photo URL inputs.
//! Validation runs before any request is built.

use serde::Serialize;

use crate::error::ValidationError;

pub const MAX_PHOTOS: usize = 5;

/// Reviews shown before the "show all" toggle
pub const VISIBLE_REVIEWS: usize = 3;

/// Body of `POST /reviews/create_by/{product_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewPayload {
    pub comment: String,
    pub grade: u8,
    pub photo_urls: Vec<String>,
}

/// One URL input; `id` is stable across add/remove for keyed rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSlot {
    pub id: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub comment: String,
    pub grade: Option<u8>,
    slots: Vec<PhotoSlot>,
    next_id: u32,
    max_photos: usize,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self::new(MAX_PHOTOS)
    }
}

impl ReviewDraft {
    pub fn new(max_photos: usize) -> Self {
        Self {
            comment: String::new(),
            grade: None,
            slots: vec![PhotoSlot { id: 0, url: String::new() }],
            next_id: 1,
            max_photos: max_photos.max(1),
        }
    }

    pub fn slots(&self) -> &[PhotoSlot] {
        &self.slots
    }

    pub fn can_add_slot(&self) -> bool {
        self.slots.len() < self.max_photos
    }

    pub fn add_slot(&mut self) -> Result<u32, ValidationError> {
        if !self.can_add_slot() {
            return Err(ValidationError::TooManyPhotos { max: self.max_photos });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.slots.push(PhotoSlot { id, url: String::new() });
        Ok(id)
    }

    /// Remove a slot; the last remaining one is cleared instead.
    pub fn remove_slot(&mut self, id: u32) {
        if self.slots.len() > 1 {
            self.slots.retain(|s| s.id != id);
        } else if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.url.clear();
        }
    }

    pub fn set_url(&mut self, id: u32, url: &str) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.url = url.to_string();
        }
    }

    pub fn validate(&self) -> Result<ReviewPayload, ValidationError> {
        let urls: Vec<String> = self.slots.iter().map(|s| s.url.clone()).collect();
        build_payload(&self.comment, self.grade, &urls, self.max_photos)
    }
}

/// Check a raw submission and build the request body.
///
/// Blank URLs are dropped before counting.
pub fn build_payload(
    comment: &str,
    grade: Option<u8>,
    urls: &[String],
    max_photos: usize,
) -> Result<ReviewPayload, ValidationError> {
    let photo_urls: Vec<String> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();
    if photo_urls.len() > max_photos {
        return Err(ValidationError::TooManyPhotos { max: max_photos });
    }
    if photo_urls.is_empty() {
        return Err(ValidationError::NoPhotos);
    }
    let grade = match grade {
        Some(g @ 1..=5) => g,
        _ => return Err(ValidationError::GradeOutOfRange),
    };
    Ok(ReviewPayload {
        comment: comment.trim().to_string(),
        grade,
        photo_urls,
    })
}

/// Number of reviews rendered given the "show all" toggle.
pub fn visible_count(total: usize, expanded: bool) -> usize {
    if expanded {
        total
    } else {
        total.min(VISIBLE_REVIEWS)
    }
}

/// The toggle only appears when something is hidden behind it.
pub fn needs_toggle(total: usize) -> bool {
    total > VISIBLE_REVIEWS
}

/// Grade from a radio/select value
pub fn parse_grade(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|g| (1..=5).contains(g))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://img.example/{}.png", i)).collect()
    }

    #[test]
    fn test_six_urls_rejected() {
        assert_eq!(
            build_payload("ok", Some(5), &urls(6), MAX_PHOTOS),
            Err(ValidationError::TooManyPhotos { max: 5 })
        );
    }

    #[test]
    fn test_blank_urls_dropped() {
        let mut raw = urls(2);
        raw.push("   ".into());
        let payload = build_payload(" nice ", Some(4), &raw, MAX_PHOTOS).unwrap();
        assert_eq!(payload.photo_urls.len(), 2);
        assert_eq!(payload.comment, "nice");
    }

    #[test]
    fn test_photo_and_grade_required() {
        assert_eq!(build_payload("", Some(3), &[], MAX_PHOTOS), Err(ValidationError::NoPhotos));
        assert_eq!(
            build_payload("", None, &urls(1), MAX_PHOTOS),
            Err(ValidationError::GradeOutOfRange)
        );
        assert_eq!(
            build_payload("", Some(6), &urls(1), MAX_PHOTOS),
            Err(ValidationError::GradeOutOfRange)
        );
    }

    #[test]
    fn test_slot_limit() {
        let mut draft = ReviewDraft::default();
        for _ in 1..MAX_PHOTOS {
            draft.add_slot().unwrap();
        }
        assert!(!draft.can_add_slot());
        assert_eq!(draft.add_slot(), Err(ValidationError::TooManyPhotos { max: 5 }));
    }

    #[test]
    fn test_last_slot_is_cleared_not_removed() {
        let mut draft = ReviewDraft::default();
        let first = draft.slots()[0].id;
        draft.set_url(first, "https://x/1.png");
        draft.remove_slot(first);
        assert_eq!(draft.slots().len(), 1);
        assert!(draft.slots()[0].url.is_empty());

        let second = draft.add_slot().unwrap();
        draft.remove_slot(first);
        assert_eq!(draft.slots().len(), 1);
        assert_eq!(draft.slots()[0].id, second);
    }

    #[test]
    fn test_review_list_collapse() {
        assert!(!needs_toggle(3));
        assert!(needs_toggle(4));
        assert_eq!(visible_count(7, false), 3);
        assert_eq!(visible_count(7, true), 7);
        assert_eq!(visible_count(2, false), 2);
    }

    #[test]
    fn test_draft_validates() {
        let mut draft = ReviewDraft::default();
        let id = draft.slots()[0].id;
        draft.set_url(id, "https://x/1.png");
        draft.grade = parse_grade("5");
        let payload = draft.validate().unwrap();
        assert_eq!(payload.grade, 5);
        assert_eq!(parse_grade("0"), None);
        assert_eq!(parse_grade("x"), None);
    }
}
