//! Dentia Database Layer
//!
//! This crate provides the sqlx/Postgres repositories, one per aggregate.

pub mod db;

pub use db::appointment::AppointmentRepository;
pub use db::doctor::DoctorRepository;
pub use db::order::{NewOrderItem, OrderRepository};
pub use db::product::ProductRepository;
pub use db::user::UserRepository;
