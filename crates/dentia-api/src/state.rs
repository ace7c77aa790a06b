//! Application state shared across handlers.

use std::sync::Arc;

use dentia_core::Config;
use dentia_db::{
    AppointmentRepository, DoctorRepository, OrderRepository, ProductRepository, UserRepository,
};
use dentia_report::ScanReportPipeline;
use sqlx::PgPool;

pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub users: UserRepository,
    pub doctors: DoctorRepository,
    pub products: ProductRepository,
    pub orders: OrderRepository,
    pub appointments: AppointmentRepository,
    pub pipeline: Arc<ScanReportPipeline>,
}
