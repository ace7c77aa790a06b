pub mod appointment;
pub mod doctor;
pub mod order;
pub mod product;
pub mod user;
