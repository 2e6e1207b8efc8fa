//! sea-orm entities for the shop schema plus small create/validate helpers.
//! Schema itself lives in the `migration` crate.

pub mod errors;
pub mod db;
pub mod role;
pub mod user;
pub mod item;
pub mod item_rating;
pub mod item_comment;
pub mod order;

#[cfg(test)]
mod tests;
