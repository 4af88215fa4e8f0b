//! File-backed persistence adapters.

mod variable_repository;

pub use variable_repository::FileVariableRepository;
