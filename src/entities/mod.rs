//! Entity module - Contains all SeaORM entity definitions for the grocery dataset.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Products reference aisles and departments by natural key (`aisle_id`,
//! `department_id`), not by the storage `id`, so no foreign keys are declared.
//! Joins across collections happen in memory in [`crate::core::report`].

pub mod aisle;
pub mod department;
pub mod order;
pub mod order_product;
pub mod product;

pub use aisle::Entity as Aisle;
pub use department::Entity as Department;
pub use order::Entity as Order;
pub use order_product::Entity as OrderProduct;
pub use product::Entity as Product;
