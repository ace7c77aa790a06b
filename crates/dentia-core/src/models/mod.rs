pub mod appointment;
pub mod doctor;
pub mod order;
pub mod product;
pub mod user;

pub use appointment::{Appointment, AppointmentWithDoctor};
pub use doctor::{Doctor, DoctorInput};
pub use order::{Order, OrderItemDetail};
pub use product::{Product, ProductInput};
pub use user::{PatientProfile, UpdateUserProfile, User, UserAdminResponse, UserPatientResponse};
