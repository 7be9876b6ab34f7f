//! Query-string and JSON forms for the package catalog.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::package::NewPackage;
use crate::domain::types::{Category, SortBy};
use crate::forms::{FieldError, FormError, not_blank};
use crate::repository::PackageListQuery;

/// Raw search parameters as received in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSearchForm {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub destination: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_duration: Option<String>,
    pub max_duration: Option<String>,
    pub sort_by: Option<String>,
    pub search: Option<String>,
}

/// Empty strings count as "not provided".
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bound(field: &str, value: Option<String>, errors: &mut Vec<FieldError>) -> Option<i64> {
    let value = present(value)?;
    match value.parse::<i64>() {
        Ok(number) => Some(number),
        Err(_) => {
            errors.push(FieldError::new(field, format!("'{value}' is not an integer")));
            None
        }
    }
}

impl TryFrom<PackageSearchForm> for PackageListQuery {
    type Error = FormError;

    fn try_from(form: PackageSearchForm) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let min_price = parse_bound("minPrice", form.min_price, &mut errors);
        let max_price = parse_bound("maxPrice", form.max_price, &mut errors);
        let min_duration = parse_bound("minDuration", form.min_duration, &mut errors);
        let max_duration = parse_bound("maxDuration", form.max_duration, &mut errors);

        let sort_by = match present(form.sort_by) {
            Some(value) => match value.parse::<SortBy>() {
                Ok(sort_by) => Some(sort_by),
                Err(err) => {
                    errors.push(FieldError::new("sortBy", err.to_string()));
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(FormError::InvalidFields(errors));
        }

        Ok(PackageListQuery {
            category: present(form.category),
            sub_category: present(form.sub_category),
            destination: present(form.destination),
            search: present(form.search),
            min_price,
            max_price,
            min_duration,
            max_duration,
            sort_by,
        })
    }
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Category>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("category"))
}

/// JSON body used to add a package to the catalog.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Destination is required"))]
    pub destination: String,
    #[validate(
        required(message = "Price is required"),
        range(min = 0, max = 4_294_967_295_i64, message = "Price must not be negative")
    )]
    pub price: Option<i64>,
    #[validate(
        required(message = "Duration is required"),
        range(min = 1, max = 365, message = "Duration must be between 1 and 365 days")
    )]
    pub duration: Option<i64>,
    #[validate(custom(
        function = "known_category",
        message = "Category must be domestic, international or group"
    ))]
    pub category: String,
    #[validate(custom(function = "not_blank", message = "Sub-category is required"))]
    pub sub_category: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,
    pub highlights: Vec<String>,
    pub itinerary: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f32>,
    pub reviews: Option<u32>,
    pub location: Option<String>,
    pub image: Option<String>,
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn to_u32(field: &str, value: Option<i64>) -> Result<u32, FormError> {
    value
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| FormError::InvalidFields(vec![FieldError::new(field, "out of range")]))
}

impl TryFrom<PackageForm> for NewPackage {
    type Error = FormError;

    fn try_from(form: PackageForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewPackage {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            destination: form.destination.trim().to_string(),
            price: to_u32("price", form.price)?,
            duration: to_u32("duration", form.duration)?,
            category: form.category.parse()?,
            sub_category: form.sub_category.trim().to_string(),
            image_url: form.image_url.trim().to_string(),
            highlights: clean_lines(form.highlights),
            itinerary: clean_lines(form.itinerary),
            rating: form.rating,
            reviews: form.reviews,
            location: present(form.location),
            image: present(form.image),
        })
    }
}
