pub mod companies;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod repository;
pub mod service;
