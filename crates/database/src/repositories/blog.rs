use crate::error::{DatabaseError, Result};
use sqlx::PgPool;
use vitrine_models::{BlogPost, ImageUpdate, NewBlogPost};

#[derive(Clone)]
pub struct BlogPostRepository {
    pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct BlogPostChanges {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub published: bool,
}

impl BlogPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_post: &NewBlogPost) -> Result<BlogPost> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (title, slug, excerpt, content, image, image_mime, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.slug)
        .bind(&new_post.excerpt)
        .bind(&new_post.content)
        .bind(&new_post.image)
        .bind(&new_post.image_mime)
        .bind(new_post.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: &BlogPostChanges,
        image: ImageUpdate,
    ) -> Result<()> {
        let result = match image {
            ImageUpdate::Replace { bytes, mime } => {
                sqlx::query(
                    r#"
                    UPDATE blog_posts
                    SET title = $1, slug = $2, excerpt = $3, content = $4, published = $5,
                        image = $6, image_mime = $7, updated_at = NOW()
                    WHERE id = $8
                    "#,
                )
                .bind(&changes.title)
                .bind(&changes.slug)
                .bind(&changes.excerpt)
                .bind(&changes.content)
                .bind(changes.published)
                .bind(bytes)
                .bind(mime)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            ImageUpdate::Keep => {
                sqlx::query(
                    r#"
                    UPDATE blog_posts
                    SET title = $1, slug = $2, excerpt = $3, content = $4, published = $5,
                        updated_at = NOW()
                    WHERE id = $6
                    "#,
                )
                .bind(&changes.title)
                .bind(&changes.slug)
                .bind(&changes.excerpt)
                .bind(&changes.content)
                .bind(changes.published)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            ImageUpdate::Remove => {
                sqlx::query(
                    r#"
                    UPDATE blog_posts
                    SET title = $1, slug = $2, excerpt = $3, content = $4, published = $5,
                        image = NULL, image_mime = NULL, updated_at = NOW()
                    WHERE id = $6
                    "#,
                )
                .bind(&changes.title)
                .bind(&changes.slug)
                .bind(&changes.excerpt)
                .bind(&changes.content)
                .bind(changes.published)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("blog post {}", id)));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Published posts only, for the public listing
    pub async fn list_published(&self) -> Result<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE published = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// All posts, drafts included, for the admin listing
    pub async fn list_all(&self) -> Result<Vec<BlogPost>> {
        let posts =
            sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(posts)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE slug = $1 AND published = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn image(&self, id: i64) -> Result<Option<(Vec<u8>, String)>> {
        let row: Option<(Option<Vec<u8>>, Option<String>)> =
            sqlx::query_as("SELECT image, image_mime FROM blog_posts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(bytes, mime)| Some((bytes?, mime?))))
    }
}
