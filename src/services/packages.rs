//! Services backing the package catalog endpoints.

use crate::domain::package::{NewPackage, Package};
use crate::domain::types::PackageId;
use crate::forms::packages::{PackageForm, PackageSearchForm};
use crate::forms::{FieldError, FormError};
use crate::repository::{PackageListQuery, PackageReader, PackageWriter};
use crate::services::{ServiceError, ServiceResult};

const PACKAGE_NOT_FOUND: &str = "Package not found";

/// Lists catalog packages matching the search form.
pub fn list_packages<R>(repo: &R, form: PackageSearchForm) -> ServiceResult<Vec<Package>>
where
    R: PackageReader + ?Sized,
{
    let query = PackageListQuery::try_from(form)?;

    repo.list_packages(&query).map_err(|err| {
        log::error!("Failed to list packages: {err}");
        ServiceError::from(err)
    })
}

/// Loads a package by the raw id taken from the request path.
///
/// An id that is not an integer is a client error. Integers that can never
/// have been issued are simply not found.
pub fn get_package<R>(repo: &R, raw_id: &str) -> ServiceResult<Package>
where
    R: PackageReader + ?Sized,
{
    let id: i32 = raw_id.trim().parse().map_err(|_| {
        FormError::InvalidFields(vec![FieldError::new(
            "id",
            format!("'{raw_id}' is not a valid package id"),
        )])
    })?;

    let Ok(id) = PackageId::new(id) else {
        return Err(ServiceError::NotFound(PACKAGE_NOT_FOUND));
    };

    repo.get_package_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load package {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound(PACKAGE_NOT_FOUND))
}

/// Finds the lowest-id package whose destination or title matches `name`.
pub fn get_package_by_destination<R>(repo: &R, name: &str) -> ServiceResult<Package>
where
    R: PackageReader + ?Sized,
{
    repo.get_package_by_destination(name)
        .map_err(|err| {
            log::error!("Failed to look up destination '{name}': {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound(PACKAGE_NOT_FOUND))
}

/// Validates and stores a new catalog package.
pub fn create_package<R>(repo: &R, form: PackageForm) -> ServiceResult<Package>
where
    R: PackageWriter + ?Sized,
{
    let new_package = NewPackage::try_from(form)?;

    let package = repo.create_package(new_package).map_err(|err| {
        log::error!("Failed to create package: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Created package #{} ({})", package.id, package.title);

    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Category;
    use crate::repository::MemoryRepository;

    fn package_form() -> PackageForm {
        PackageForm {
            title: "X".to_string(),
            description: "Weekend in the hills".to_string(),
            destination: "Coorg".to_string(),
            price: Some(100),
            duration: Some(3),
            category: "domestic".to_string(),
            sub_category: "nature".to_string(),
            image_url: "https://img.example.com/coorg.jpg".to_string(),
            highlights: vec!["Coffee estates".to_string()],
            itinerary: vec!["Day 1: Arrival".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn category_filter_includes_and_excludes() {
        let repo = MemoryRepository::seeded().unwrap();
        let form = PackageSearchForm {
            category: Some("international".to_string()),
            ..Default::default()
        };

        let packages = list_packages(&repo, form).unwrap();
        assert!(!packages.is_empty());
        assert!(
            packages
                .iter()
                .all(|p| p.category == Category::International)
        );
    }

    #[test]
    fn inverted_price_bounds_return_empty() {
        let repo = MemoryRepository::seeded().unwrap();
        let form = PackageSearchForm {
            min_price: Some("50000".to_string()),
            max_price: Some("10000".to_string()),
            ..Default::default()
        };

        assert!(list_packages(&repo, form).unwrap().is_empty());
    }

    #[test]
    fn price_sort_orders_and_keeps_ties_stable() {
        let repo = MemoryRepository::seeded().unwrap();
        let form = PackageSearchForm {
            sort_by: Some("price_asc".to_string()),
            ..Default::default()
        };

        let packages = list_packages(&repo, form).unwrap();
        assert!(packages.windows(2).all(|w| w[0].price <= w[1].price));

        let tied: Vec<i32> = packages
            .iter()
            .filter(|p| p.price == 32000)
            .map(|p| p.id.get())
            .collect();
        assert_eq!(tied, vec![6, 10]);
    }

    #[test]
    fn every_listed_package_is_retrievable_by_id() {
        let repo = MemoryRepository::seeded().unwrap();

        for package in list_packages(&repo, PackageSearchForm::default()).unwrap() {
            let found = get_package(&repo, &package.id.to_string()).unwrap();
            assert_eq!(found.id, package.id);
        }
    }

    #[test]
    fn unknown_and_malformed_ids_are_distinguished() {
        let repo = MemoryRepository::seeded().unwrap();

        assert!(matches!(get_package(&repo, "999"), Err(ServiceError::NotFound(_))));
        assert!(matches!(get_package(&repo, "0"), Err(ServiceError::NotFound(_))));

        let err = get_package(&repo, "abc").unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
        assert_eq!(err.field_errors()[0].field, "id");
    }

    #[test]
    fn destination_lookup_matches_destination_or_title() {
        let repo = MemoryRepository::seeded().unwrap();

        let goa = get_package_by_destination(&repo, "goa").unwrap();
        assert!(goa.destination.to_lowercase().contains("goa") || goa.title.contains("Goa"));

        assert!(matches!(
            get_package_by_destination(&repo, "Atlantis"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn created_package_round_trips() {
        let repo = MemoryRepository::seeded().unwrap();

        let created = create_package(&repo, package_form()).unwrap();
        assert_eq!(created.id.get(), 23);
        assert_eq!(created.rating, Some(0.0));
        assert_eq!(created.reviews, Some(0));

        let fetched = get_package(&repo, "23").unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "X");
        assert_eq!(fetched.price, 100);
        assert_eq!(fetched.duration, 3);
        assert_eq!(fetched.category, Category::Domestic);
    }

    #[test]
    fn invalid_package_is_not_stored() {
        let repo = MemoryRepository::default();
        let form = PackageForm {
            title: " ".to_string(),
            ..package_form()
        };

        let err = create_package(&repo, form).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "title");
        assert!(list_packages(&repo, PackageSearchForm::default()).unwrap().is_empty());
    }
}
