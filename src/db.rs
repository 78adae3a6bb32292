pub mod registry_repo;
pub use registry_repo::RegistryRepository;
