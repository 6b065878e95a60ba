use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image: Option<Vec<u8>>,
    pub image_mime: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOffer {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image: Option<Vec<u8>>,
    pub image_mime: Option<String>,
}

/// Offer as returned by the API. Image bytes are served from a
/// dedicated endpoint; only the MIME type is inlined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_mime: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Offer> for OfferDto {
    fn from(o: Offer) -> Self {
        Self {
            id: o.id,
            title: o.title,
            slug: o.slug,
            description: o.description,
            link: o.link,
            image_mime: o.image_mime,
            created_at: o.created_at,
        }
    }
}

/// What an update does to a record's stored image. `Keep` skips the
/// ingestion pipeline entirely and leaves the stored bytes untouched;
/// `Remove` nulls both the bytes and the MIME column together.
#[derive(Debug, Clone)]
pub enum ImageUpdate {
    Replace { bytes: Vec<u8>, mime: String },
    Keep,
    Remove,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_drops_image_bytes() {
        let offer = Offer {
            id: 7,
            title: "Spring sale".to_string(),
            slug: "spring-sale".to_string(),
            description: None,
            link: Some("https://example.com".to_string()),
            image: Some(vec![0xff, 0xd8]),
            image_mime: Some("image/jpeg".to_string()),
            created_at: Utc::now(),
        };

        let dto = OfferDto::from(offer);
        assert_eq!(dto.id, 7);
        assert_eq!(dto.image_mime.as_deref(), Some("image/jpeg"));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("image").is_none());
    }
}
