//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{CoverImage, Post};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub topic: String,
    pub author_name: String,
    pub author_email: String,
    pub featured: bool,
    pub published: bool,
    pub reading_time: f64,
    pub cover_image_key: Option<String>,
    pub cover_image_filename: Option<String>,
    pub cover_image_content_type: Option<String>,
    pub cover_image_byte_size: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        let cover_image = match (model.cover_image_key, model.cover_image_content_type) {
            (Some(key), Some(content_type)) => Some(CoverImage::new(
                key,
                model.cover_image_filename.unwrap_or_default(),
                content_type,
                model.cover_image_byte_size.unwrap_or(0) as u64,
            )),
            _ => None,
        };

        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            summary: model.summary,
            content: model.content,
            topic: model.topic,
            author_name: model.author_name,
            author_email: model.author_email,
            featured: model.featured,
            published: model.published,
            reading_time: model.reading_time,
            cover_image,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from the domain Post to a SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        let (key, filename, content_type, byte_size) = match post.cover_image {
            Some(img) => (
                Some(img.key),
                Some(img.filename),
                Some(img.content_type),
                Some(img.byte_size as i64),
            ),
            None => (None, None, None, None),
        };

        Self {
            id: Set(post.id),
            slug: Set(post.slug),
            title: Set(post.title),
            summary: Set(post.summary),
            content: Set(post.content),
            topic: Set(post.topic),
            author_name: Set(post.author_name),
            author_email: Set(post.author_email),
            featured: Set(post.featured),
            published: Set(post.published),
            reading_time: Set(post.reading_time),
            cover_image_key: Set(key),
            cover_image_filename: Set(filename),
            cover_image_content_type: Set(content_type),
            cover_image_byte_size: Set(byte_size),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
