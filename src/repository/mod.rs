use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::domain::package::{NewPackage, Package};
use crate::domain::types::{PackageId, SortBy};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;
pub mod inquiry;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod package;

/// Catalog shipped with the binary and loaded when the store is constructed.
const SEED_PACKAGES: &str = include_str!("../../data/packages.json");

/// Typed package filter. String criteria are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageListQuery {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub destination: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_duration: Option<i64>,
    pub max_duration: Option<i64>,
    pub sort_by: Option<SortBy>,
}

impl PackageListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn duration_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

pub trait PackageReader {
    fn list_packages(&self, query: &PackageListQuery) -> RepositoryResult<Vec<Package>>;
    fn get_package_by_id(&self, id: PackageId) -> RepositoryResult<Option<Package>>;
    fn get_package_by_destination(&self, name: &str) -> RepositoryResult<Option<Package>>;
}

pub trait PackageWriter {
    fn create_package(&self, new_package: NewPackage) -> RepositoryResult<Package>;
}

pub trait InquiryReader {
    fn list_inquiries(&self) -> RepositoryResult<Vec<Inquiry>>;
}

pub trait InquiryWriter {
    fn create_inquiry(&self, new_inquiry: NewInquiry) -> RepositoryResult<Inquiry>;
}

/// Append-only collections guarded together so id assignment and insertion are atomic.
#[derive(Debug)]
struct Catalog {
    packages: Vec<Package>,
    inquiries: Vec<Inquiry>,
    next_package_id: i32,
    next_inquiry_id: i32,
}

/// In-memory implementation of every repository trait.
///
/// Cloning yields another handle to the same collections, so one instance is
/// built at startup and shared with all request handlers.
#[derive(Clone, Debug)]
pub struct MemoryRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl MemoryRepository {
    /// Creates a store holding `packages`. Package ids must be unique.
    pub fn new(packages: Vec<Package>) -> RepositoryResult<Self> {
        let mut seen = HashSet::new();
        for package in &packages {
            if !seen.insert(package.id) {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "duplicate package id {}",
                    package.id
                )));
            }
        }

        let next_package_id = packages
            .iter()
            .map(|package| package.id.get())
            .max()
            .unwrap_or(0)
            + 1;

        Ok(Self {
            catalog: Arc::new(RwLock::new(Catalog {
                packages,
                inquiries: Vec::new(),
                next_package_id,
                next_inquiry_id: 1,
            })),
        })
    }

    /// Creates a store preloaded with the bundled package catalog.
    pub fn seeded() -> RepositoryResult<Self> {
        let packages: Vec<Package> = serde_json::from_str(SEED_PACKAGES)?;
        log::info!("Loaded {} seed packages", packages.len());
        Self::new(packages)
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog {
                packages: Vec::new(),
                inquiries: Vec::new(),
                next_package_id: 1,
                next_inquiry_id: 1,
            })),
        }
    }
}
