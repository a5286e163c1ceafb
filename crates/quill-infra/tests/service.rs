//! End-to-end tests of the post save pipeline over the in-memory adapters.

use std::collections::HashMap;
use std::sync::Arc;

use quill_core::domain::{Post, PostFilter, Variant, VariantSpec};
use quill_core::error::DomainError;
use quill_core::ports::BlobStorage;
use quill_core::service::MISSING_IMAGE_URL;
use quill_core::text_stats::{self, DEFAULT_READING_SPEED};
use quill_core::{PostService, validation};

use quill_infra::{
    CmarkRenderer, InMemoryBlobStorage, InMemoryPostRepository, InMemorySearchIndex,
    RepositorySlugService,
};

const BASE_URL: &str = "http://localhost:8080";

struct Harness {
    service: PostService,
    storage: Arc<InMemoryBlobStorage>,
}

fn harness() -> Harness {
    let repo = Arc::new(InMemoryPostRepository::new());
    let storage = Arc::new(InMemoryBlobStorage::new(BASE_URL));
    let service = PostService::new(
        repo.clone(),
        Arc::new(InMemorySearchIndex::new()),
        Arc::new(RepositorySlugService::new(repo)),
        storage.clone(),
        Arc::new(CmarkRenderer::new()),
        DEFAULT_READING_SPEED,
    );
    Harness { service, storage }
}

fn draft(title: &str) -> Post {
    Post::new(
        title,
        "A summary",
        "Some words to read in this post.",
        "rust",
        "Ada Lovelace",
        "ada@example.com",
    )
}

async fn draft_with_image(h: &Harness, title: &str) -> Post {
    let mut post = draft(title);
    let image = h
        .storage
        .store(vec![0xFF, 0xD8], "cover.jpg", "image/jpeg")
        .await
        .unwrap();
    post.attach_cover_image(image);
    post
}

#[tokio::test]
async fn test_save_assigns_slug_and_reading_time() {
    let h = harness();
    let mut post = draft_with_image(&h, "Hello World").await;
    post.reading_time = 999.0; // caller-supplied values are never authoritative

    let saved = h.service.save(post).await.unwrap();

    assert_eq!(saved.slug, "hello-world");
    let expected = text_stats::reading_time(&saved.content, DEFAULT_READING_SPEED);
    assert_eq!(saved.reading_time, expected);

    let found = h.service.find("hello-world").await.unwrap();
    assert_eq!(found.id, saved.id);
    let by_id = h.service.find(&saved.id.to_string()).await.unwrap();
    assert_eq!(by_id.id, saved.id);
}

#[tokio::test]
async fn test_validation_failure_persists_nothing() {
    let h = harness();
    let mut post = draft_with_image(&h, "Hello World").await;
    post.summary.clear();
    let id = post.id;

    let err = h.service.save(post).await.unwrap_err();
    match err {
        DomainError::Validation(errors) => {
            assert_eq!(errors[0].field, "summary");
            assert_eq!(errors[0].message, validation::BLANK_MESSAGE);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(h.service.find(&id.to_string()).await.is_err());
}

#[tokio::test]
async fn test_missing_cover_image_blocks_save() {
    let h = harness();
    let err = h.service.save(draft("No Image")).await.unwrap_err();
    match err {
        DomainError::Validation(errors) => {
            assert_eq!(errors[0].field, "cover_image");
            assert_eq!(errors[0].message, validation::IMAGE_REQUIRED_MESSAGE);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reading_time_recomputed_on_every_save() {
    let h = harness();
    let post = draft_with_image(&h, "Reading").await;
    let mut saved = h.service.save(post).await.unwrap();

    // Re-save with unchanged content but a tampered value.
    saved.reading_time = 42.0;
    let resaved = h.service.save(saved).await.unwrap();
    let expected = text_stats::reading_time(&resaved.content, DEFAULT_READING_SPEED);
    assert_eq!(resaved.reading_time, expected);

    // Longer content yields a longer estimate.
    let mut longer = resaved.clone();
    longer.content = "word ".repeat(2000);
    let longer = h.service.save(longer).await.unwrap();
    assert!(longer.reading_time > resaved.reading_time);
}

#[tokio::test]
async fn test_title_change_rotates_slug() {
    let h = harness();
    let post = draft_with_image(&h, "First Title").await;
    let saved = h.service.save(post).await.unwrap();
    assert_eq!(saved.slug, "first-title");

    // Re-save without a title change: slug is stable.
    let resaved = h.service.save(saved).await.unwrap();
    assert_eq!(resaved.slug, "first-title");

    let mut renamed = resaved;
    renamed.title = "Second Title".to_string();
    let renamed = h.service.save(renamed).await.unwrap();
    assert_eq!(renamed.slug, "second-title");

    // No slug history: the previous slug stops resolving.
    let err = h.service.find("first-title").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(h.service.find("second-title").await.is_ok());
}

#[tokio::test]
async fn test_equal_titles_get_suffixed_slugs() {
    let h = harness();
    let first = h
        .service
        .save(draft_with_image(&h, "Same Title").await)
        .await
        .unwrap();
    let second = h
        .service
        .save(draft_with_image(&h, "Same Title").await)
        .await
        .unwrap();

    assert_eq!(first.slug, "same-title");
    assert_eq!(second.slug, "same-title-2");
}

#[tokio::test]
async fn test_search_covers_title_and_content() {
    let h = harness();

    let mut by_title = draft_with_image(&h, "Tokio Internals").await;
    by_title.content = "All about the runtime.".to_string();
    let by_title = h.service.save(by_title).await.unwrap();

    let mut by_content = draft_with_image(&h, "Another Post").await;
    by_content.content = "This one mentions tokio in passing.".to_string();
    let by_content = h.service.save(by_content).await.unwrap();

    h.service
        .save(draft_with_image(&h, "Unrelated").await)
        .await
        .unwrap();

    let hits = h.service.search("tokio").await.unwrap();
    let ids: Vec<_> = hits.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&by_title.id));
    assert!(ids.contains(&by_content.id));
    // Title match outranks content match.
    assert_eq!(ids[0], by_title.id);

    h.service.delete(by_title.id).await.unwrap();
    let hits = h.service.search("tokio").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, by_content.id);
}

#[tokio::test]
async fn test_list_scopes() {
    let h = harness();

    let mut ruby = draft_with_image(&h, "Ruby Post").await;
    ruby.topic = "ruby".to_string();
    ruby.featured = true;
    h.service.save(ruby).await.unwrap();

    let mut rust = draft_with_image(&h, "Rust Post").await;
    rust.topic = "rust".to_string();
    rust.published = true;
    h.service.save(rust).await.unwrap();

    let tagged = h
        .service
        .list(&PostFilter::new().tagged_with("ruby"))
        .await
        .unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].topic, "ruby");

    let featured_published = h
        .service
        .list(&PostFilter::new().featured().published())
        .await
        .unwrap();
    assert!(featured_published.is_empty());

    let unpublished = h.service.list(&PostFilter::new().unpublished()).await.unwrap();
    assert_eq!(unpublished.len(), 1);
    assert_eq!(unpublished[0].topic, "ruby");
}

#[tokio::test]
async fn test_cover_image_urls() {
    let h = harness();
    let saved = h
        .service
        .save(draft_with_image(&h, "With Image").await)
        .await
        .unwrap();

    let path = h.service.cover_image_path(&saved);
    assert!(path.starts_with("/storage/"));
    assert!(path.ends_with("disposition=attachment"));

    let url = h.service.cover_image_url(&saved);
    assert!(url.starts_with(BASE_URL));

    let thumb = h.service.cover_image_variant_path(&saved, Variant::Thumbnail);
    assert!(thumb.contains("/variants/400x200-fill"));

    let custom = h
        .service
        .cover_image_variant_url(&saved, &VariantSpec::fit(120, 80));
    assert!(custom.contains("/variants/120x80-fit"));
}

#[tokio::test]
async fn test_image_helpers_fail_soft() {
    let h = harness();

    // No attachment at all.
    let bare = draft("Bare");
    assert_eq!(h.service.cover_image_path(&bare), MISSING_IMAGE_URL);
    assert_eq!(h.service.cover_image_url(&bare), MISSING_IMAGE_URL);
    assert_eq!(
        h.service.cover_image_variant_path(&bare, Variant::Featured),
        MISSING_IMAGE_URL
    );

    // Attachment whose source cannot be rendered into variants.
    let mut unrenderable = draft("Unrenderable");
    let blob = h
        .storage
        .store(vec![1, 2, 3], "doc.pdf", "application/pdf")
        .await
        .unwrap();
    unrenderable.attach_cover_image(blob);

    assert_eq!(
        h.service
            .cover_image_variant_url(&unrenderable, &Variant::Thumbnail.spec()),
        MISSING_IMAGE_URL
    );
    // The original blob URL still resolves; only renditions fail soft.
    assert_ne!(h.service.cover_image_path(&unrenderable), MISSING_IMAGE_URL);
}

#[tokio::test]
async fn test_render_helpers() {
    let h = harness();
    let mut post = draft("Rendered");
    post.content = "# Heading\n\nHello {{name}}.\n\n## Section\n".to_string();

    let mut ctx = HashMap::new();
    ctx.insert("name".to_string(), "world".to_string());

    let html = h.service.render(&post, &ctx);
    assert!(html.contains("<h1>Heading</h1>"));
    assert!(html.contains("Hello world."));

    let toc = h.service.render_toc(&post, 2);
    assert_eq!(toc.len(), 1);
    assert_eq!(toc[0].title, "Heading");
    assert_eq!(toc[0].children[0].title, "Section");

    let shallow = h.service.render_toc(&post, 1);
    assert_eq!(shallow.len(), 1);
    assert!(shallow[0].children.is_empty());
}
