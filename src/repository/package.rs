//! Catalog queries over the in-memory package collection.

use crate::domain::package::{NewPackage, Package};
use crate::domain::types::{PackageId, SortBy};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{MemoryRepository, PackageListQuery, PackageReader, PackageWriter};

/// Case-insensitive equality on already trimmed input.
fn eq_ignore_case(value: &str, expected: &str) -> bool {
    value.to_lowercase() == expected.to_lowercase()
}

fn within(value: u32, min: Option<i64>, max: Option<i64>) -> bool {
    let value = i64::from(value);
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

/// Applies every filter in `query` conjunctively and then the optional sort.
///
/// Input order is preserved when no sort key is given, and equal keys keep
/// their relative order when one is.
pub fn filter_packages<'a, I>(packages: I, query: &PackageListQuery) -> Vec<Package>
where
    I: IntoIterator<Item = &'a Package>,
{
    let destination = query.destination.as_deref().map(str::to_lowercase);
    let search = query.search.as_deref().map(str::to_lowercase);

    let mut result: Vec<Package> = packages
        .into_iter()
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|category| eq_ignore_case(p.category.as_str(), category))
        })
        .filter(|p| {
            query
                .sub_category
                .as_deref()
                .is_none_or(|sub_category| eq_ignore_case(&p.sub_category, sub_category))
        })
        .filter(|p| {
            destination
                .as_deref()
                .is_none_or(|needle| p.destination.to_lowercase().contains(needle))
        })
        .filter(|p| search.as_deref().is_none_or(|needle| p.mentions(needle)))
        .filter(|p| within(p.price, query.min_price, query.max_price))
        .filter(|p| within(p.duration, query.min_duration, query.max_duration))
        .cloned()
        .collect();

    // `sort_by` is stable, which the tie-break rule relies on.
    match query.sort_by {
        Some(SortBy::PriceAsc) => result.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(SortBy::PriceDesc) => result.sort_by(|a, b| b.price.cmp(&a.price)),
        Some(SortBy::DurationAsc) => result.sort_by(|a, b| a.duration.cmp(&b.duration)),
        Some(SortBy::DurationDesc) => result.sort_by(|a, b| b.duration.cmp(&a.duration)),
        None => {}
    }

    result
}

impl PackageReader for MemoryRepository {
    fn list_packages(&self, query: &PackageListQuery) -> RepositoryResult<Vec<Package>> {
        let catalog = self.catalog.read();
        Ok(filter_packages(&catalog.packages, query))
    }

    fn get_package_by_id(&self, id: PackageId) -> RepositoryResult<Option<Package>> {
        let catalog = self.catalog.read();
        Ok(catalog.packages.iter().find(|p| p.id == id).cloned())
    }

    fn get_package_by_destination(&self, name: &str) -> RepositoryResult<Option<Package>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let catalog = self.catalog.read();
        let package = catalog
            .packages
            .iter()
            .filter(|p| {
                p.destination.to_lowercase() == needle || p.title.to_lowercase().contains(&needle)
            })
            .min_by_key(|p| p.id)
            .cloned();

        Ok(package)
    }
}

impl PackageWriter for MemoryRepository {
    fn create_package(&self, new_package: NewPackage) -> RepositoryResult<Package> {
        let mut catalog = self.catalog.write();

        let id = PackageId::new(catalog.next_package_id)?;
        catalog.next_package_id = catalog
            .next_package_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Unexpected("package id space exhausted".into()))?;

        let package = new_package.into_package(id);
        catalog.packages.push(package.clone());

        Ok(package)
    }
}
