// dishdash/storefront/src/services/mod.rs

pub mod backend_gateway;
pub mod cart_registry;
pub mod cart_storage;
pub mod session_service;

#[cfg(test)]
pub mod backend_mock;
