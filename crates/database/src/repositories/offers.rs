use crate::error::{DatabaseError, Result};
use sqlx::PgPool;
use vitrine_models::{ImageUpdate, NewOffer, Offer};

#[derive(Clone)]
pub struct OfferRepository {
    pool: PgPool,
}

/// Text fields of an offer update; the image is handled separately
/// through [`ImageUpdate`].
#[derive(Debug, Clone)]
pub struct OfferChanges {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl OfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_offer: &NewOffer) -> Result<Offer> {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (title, slug, description, link, image, image_mime)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new_offer.title)
        .bind(&new_offer.slug)
        .bind(&new_offer.description)
        .bind(&new_offer.link)
        .bind(&new_offer.image)
        .bind(&new_offer.image_mime)
        .fetch_one(&self.pool)
        .await?;

        Ok(offer)
    }

    /// Update text fields and apply the requested image transition.
    /// `Keep` deliberately leaves the image columns out of the UPDATE
    /// so stored bytes are never rewritten.
    pub async fn update(
        &self,
        id: i64,
        changes: &OfferChanges,
        image: ImageUpdate,
    ) -> Result<()> {
        let result = match image {
            ImageUpdate::Replace { bytes, mime } => {
                sqlx::query(
                    r#"
                    UPDATE offers
                    SET title = $1, slug = $2, description = $3, link = $4,
                        image = $5, image_mime = $6
                    WHERE id = $7
                    "#,
                )
                .bind(&changes.title)
                .bind(&changes.slug)
                .bind(&changes.description)
                .bind(&changes.link)
                .bind(bytes)
                .bind(mime)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            ImageUpdate::Keep => {
                sqlx::query(
                    r#"
                    UPDATE offers
                    SET title = $1, slug = $2, description = $3, link = $4
                    WHERE id = $5
                    "#,
                )
                .bind(&changes.title)
                .bind(&changes.slug)
                .bind(&changes.description)
                .bind(&changes.link)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            ImageUpdate::Remove => {
                sqlx::query(
                    r#"
                    UPDATE offers
                    SET title = $1, slug = $2, description = $3, link = $4,
                        image = NULL, image_mime = NULL
                    WHERE id = $5
                    "#,
                )
                .bind(&changes.title)
                .bind(&changes.slug)
                .bind(&changes.description)
                .bind(&changes.link)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("offer {}", id)));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Offer>> {
        let offers = sqlx::query_as::<_, Offer>("SELECT * FROM offers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(offers)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Offer>> {
        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(offer)
    }

    /// Stored image for an offer, when it has one
    pub async fn image(&self, id: i64) -> Result<Option<(Vec<u8>, String)>> {
        let row: Option<(Option<Vec<u8>>, Option<String>)> =
            sqlx::query_as("SELECT image, image_mime FROM offers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        // image and image_mime are set and cleared together
        Ok(row.and_then(|(bytes, mime)| Some((bytes?, mime?))))
    }
}
