//! Service and repository wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use dentia_core::Config;
use dentia_db::{
    AppointmentRepository, DoctorRepository, OrderRepository, ProductRepository, UserRepository,
};
use dentia_report::{ScanReportPipeline, SofficeConverter};
use dentia_services::GeminiService;
use sqlx::PgPool;

use crate::state::AppState;

pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    // Staging images, intermediate documents, and final PDFs all live here.
    std::fs::create_dir_all(&config.reports_dir)
        .with_context(|| format!("Failed to create reports directory {}", config.reports_dir))?;

    let oracle = Arc::new(
        GeminiService::new(config.gemini_api_key.clone(), config.gemini_model.clone())
            .context("Failed to build Gemini client")?,
    );
    let converter = Arc::new(SofficeConverter::new(config.soffice_path.clone()));

    let pipeline = Arc::new(ScanReportPipeline::new(
        oracle,
        converter,
        config.reports_dir.clone(),
        config.public_base_url(),
    ));

    tracing::info!(
        reports_dir = %config.reports_dir,
        model = %config.gemini_model,
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        users: UserRepository::new(pool.clone()),
        doctors: DoctorRepository::new(pool.clone()),
        products: ProductRepository::new(pool.clone()),
        orders: OrderRepository::new(pool.clone()),
        appointments: AppointmentRepository::new(pool.clone()),
        pipeline,
        pool,
    }))
}
