//! Pre-save validation pipeline.
//!
//! An ordered list of pure validator functions runs before every save. All
//! failures are collected into a single `Vec<FieldError>` so callers see the
//! full picture in one round trip; any failure aborts persistence.

use crate::domain::Post;
use crate::error::FieldError;

pub const BLANK_MESSAGE: &str = "can't be blank";
pub const IMAGE_REQUIRED_MESSAGE: &str = "is required";
pub const IMAGE_TYPE_MESSAGE: &str = "must be an image";

type Validator = fn(&Post) -> Option<FieldError>;

/// Validators in the order they run. Order matters only for the error list
/// a caller sees; every validator runs regardless of earlier failures.
const VALIDATORS: &[Validator] = &[
    |p| presence("topic", &p.topic),
    |p| presence("title", &p.title),
    |p| presence("author_email", &p.author_email),
    |p| presence("author_name", &p.author_name),
    |p| presence("summary", &p.summary),
    |p| presence("content", &p.content),
    cover_image_attached,
    cover_image_content_type,
];

/// Run the full pipeline, collecting every failure.
pub fn validate(post: &Post) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = VALIDATORS.iter().filter_map(|v| v(post)).collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn presence(field: &'static str, value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, BLANK_MESSAGE))
    } else {
        None
    }
}

fn cover_image_attached(post: &Post) -> Option<FieldError> {
    if post.has_cover_image() {
        None
    } else {
        Some(FieldError::new("cover_image", IMAGE_REQUIRED_MESSAGE))
    }
}

/// Skipped entirely when nothing is attached so a missing image never
/// produces two errors.
fn cover_image_content_type(post: &Post) -> Option<FieldError> {
    match &post.cover_image {
        Some(image) if !image.is_allowed_type() => {
            Some(FieldError::new("cover_image", IMAGE_TYPE_MESSAGE))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CoverImage;

    fn valid_post() -> Post {
        let mut post = Post::new(
            "A Post",
            "Summary",
            "Some content here.",
            "rust",
            "Ada Lovelace",
            "ada@example.com",
        );
        post.attach_cover_image(CoverImage::new("key", "cover.jpg", "image/jpeg", 1024));
        post
    }

    #[test]
    fn test_valid_post_passes() {
        assert!(validate(&valid_post()).is_ok());
    }

    #[test]
    fn test_each_required_field() {
        for field in [
            "topic",
            "title",
            "author_email",
            "author_name",
            "summary",
            "content",
        ] {
            let mut post = valid_post();
            match field {
                "topic" => post.topic.clear(),
                "title" => post.title.clear(),
                "author_email" => post.author_email.clear(),
                "author_name" => post.author_name.clear(),
                "summary" => post.summary.clear(),
                "content" => post.content.clear(),
                _ => unreachable!(),
            }
            let errors = validate(&post).unwrap_err();
            assert_eq!(errors, vec![FieldError::new(field, BLANK_MESSAGE)]);
        }
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let mut post = valid_post();
        post.summary = "   \n\t".to_string();
        let errors = validate(&post).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("summary", BLANK_MESSAGE)]);
    }

    #[test]
    fn test_missing_cover_image_single_error() {
        let mut post = valid_post();
        post.detach_cover_image();
        let errors = validate(&post).unwrap_err();
        // Absence must not also trigger the content-type check.
        assert_eq!(
            errors,
            vec![FieldError::new("cover_image", IMAGE_REQUIRED_MESSAGE)]
        );
    }

    #[test]
    fn test_gif_cover_image_rejected() {
        let mut post = valid_post();
        post.attach_cover_image(CoverImage::new("key", "cover.gif", "image/gif", 1024));
        let errors = validate(&post).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("cover_image", IMAGE_TYPE_MESSAGE)]
        );
    }

    #[test]
    fn test_png_cover_image_accepted() {
        let mut post = valid_post();
        post.attach_cover_image(CoverImage::new("key", "cover.png", "image/png", 1024));
        assert!(validate(&post).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut post = valid_post();
        post.title.clear();
        post.detach_cover_image();
        let errors = validate(&post).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("title", BLANK_MESSAGE),
                FieldError::new("cover_image", IMAGE_REQUIRED_MESSAGE),
            ]
        );
    }
}
