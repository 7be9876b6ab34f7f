//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::domain::package::{NewPackage, Package};
use crate::domain::types::PackageId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    InquiryReader, InquiryWriter, PackageListQuery, PackageReader, PackageWriter,
};

mock! {
    pub Repository {}

    impl PackageReader for Repository {
        fn list_packages(&self, query: &PackageListQuery) -> RepositoryResult<Vec<Package>>;
        fn get_package_by_id(&self, id: PackageId) -> RepositoryResult<Option<Package>>;
        fn get_package_by_destination(&self, name: &str) -> RepositoryResult<Option<Package>>;
    }

    impl PackageWriter for Repository {
        fn create_package(&self, new_package: NewPackage) -> RepositoryResult<Package>;
    }

    impl InquiryReader for Repository {
        fn list_inquiries(&self) -> RepositoryResult<Vec<Inquiry>>;
    }

    impl InquiryWriter for Repository {
        fn create_inquiry(&self, new_inquiry: NewInquiry) -> RepositoryResult<Inquiry>;
    }
}
