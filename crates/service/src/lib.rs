//! Business services for the shop: auth, catalog, engagement and orders.
//! Every function takes the pooled connection explicitly.

pub mod auth;
pub mod catalog_service;
pub mod engagement_service;
pub mod errors;
pub mod order_service;

mod test_support;
