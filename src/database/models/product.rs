use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;

/// Product row. `image_filename` names a file in the upload directory.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub image_filename: Option<String>,
    pub category: String,
    pub date_added: DateTime<Utc>,
}

/// Product as returned to clients, with the image rewritten to a fetchable URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub image_url: Option<String>,
    pub date_added: DateTime<Utc>,
    pub category: String,
}

impl Product {
    pub fn to_view(&self, base_url: &Url) -> ProductView {
        ProductView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            image_url: self
                .image_filename
                .as_deref()
                .and_then(|filename| upload_url(base_url, filename)),
            date_added: self.date_added,
            category: self.category.clone(),
        }
    }
}

/// `<base>/uploads/<filename>`, keeping any path prefix carried by `base_url`.
pub fn upload_url(base_url: &Url, filename: &str) -> Option<String> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push("uploads")
        .push(filename);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(image: Option<&str>) -> Product {
        Product {
            id: 1,
            name: "Mug".to_string(),
            description: Some("Stoneware".to_string()),
            price: 9.99,
            stock: 5,
            image_filename: image.map(str::to_string),
            category: "Home".to_string(),
            date_added: Utc::now(),
        }
    }

    #[test]
    fn rewrites_image_to_upload_url() {
        let base = Url::parse("http://localhost:5000").unwrap();
        let view = product(Some("mug.png")).to_view(&base);
        assert_eq!(view.image_url.as_deref(), Some("http://localhost:5000/uploads/mug.png"));
    }

    #[test]
    fn keeps_base_path_prefix() {
        let base = Url::parse("https://shop.example.com/backend/").unwrap();
        assert_eq!(
            upload_url(&base, "mug.png").as_deref(),
            Some("https://shop.example.com/backend/uploads/mug.png")
        );
    }

    #[test]
    fn missing_image_stays_null() {
        let base = Url::parse("http://localhost:5000").unwrap();
        let view = product(None).to_view(&base);
        assert_eq!(view.image_url, None);
        assert_eq!(serde_json::to_value(&view).unwrap()["image_url"], serde_json::Value::Null);
    }
}
