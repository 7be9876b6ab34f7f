use serde::{Deserialize, Serialize};

use crate::domain::types::{Category, PackageId};

/// A sellable travel itinerary in the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    pub title: String,
    pub description: String,
    pub destination: String,
    /// Price in minor currency units.
    pub price: u32,
    /// Duration in days.
    pub duration: u32,
    pub category: Category,
    pub sub_category: String,
    pub image_url: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Package data accepted before an identifier has been assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPackage {
    pub title: String,
    pub description: String,
    pub destination: String,
    pub price: u32,
    pub duration: u32,
    pub category: Category,
    pub sub_category: String,
    pub image_url: String,
    pub highlights: Vec<String>,
    pub itinerary: Vec<String>,
    pub rating: Option<f32>,
    pub reviews: Option<u32>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl NewPackage {
    /// Attaches the assigned id, defaulting rating and review count to zero.
    #[must_use]
    pub fn into_package(self, id: PackageId) -> Package {
        Package {
            id,
            title: self.title,
            description: self.description,
            destination: self.destination,
            price: self.price,
            duration: self.duration,
            category: self.category,
            sub_category: self.sub_category,
            image_url: self.image_url,
            highlights: self.highlights,
            itinerary: self.itinerary,
            rating: Some(self.rating.unwrap_or(0.0)),
            reviews: Some(self.reviews.unwrap_or(0)),
            location: self.location,
            image: self.image,
        }
    }
}

impl Package {
    /// Whether any searchable text field contains `needle`, which must already be lower-cased.
    pub fn mentions(&self, needle: &str) -> bool {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.destination.as_str(),
            self.category.as_str(),
            self.sub_category.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}
