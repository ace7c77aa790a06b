//! OpenAPI document served at `/api/openapi.json` and rendered by RapiDoc
//! under `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dentia API",
        description = "Dental-care backend: scan-to-report pipeline, patient profiles, doctors, shop orders, and appointments.",
        version = "1.0.0"
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::update,
        handlers::profile::get_profile,
        handlers::profile::update_profile,
        handlers::profile::upload_avatar,
        handlers::doctors::list_doctors,
        handlers::doctors::get_doctor,
        handlers::doctors::add_doctor,
        handlers::doctors::update_doctor,
        handlers::doctors::delete_doctor,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::add_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order_detail,
        handlers::orders::update_order_status,
        handlers::appointments::book_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::update_appointment_status,
        handlers::scans::analyze_scan,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        handlers::MessageResponse,
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::TokenResponse,
        handlers::auth::UserResponse,
        handlers::profile::AvatarUpload,
        handlers::products::ProductsResponse,
        handlers::orders::OrderItemRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderPlacedResponse,
        handlers::orders::OrdersResponse,
        handlers::orders::OrderDetailResponse,
        handlers::orders::StatusUpdate,
        handlers::appointments::AppointmentRequest,
        handlers::appointments::AppointmentsResponse,
        dentia_core::models::UserAdminResponse,
        dentia_core::models::UserPatientResponse,
        dentia_core::models::UpdateUserProfile,
        dentia_core::models::Doctor,
        dentia_core::models::DoctorInput,
        dentia_core::models::Product,
        dentia_core::models::ProductInput,
        dentia_core::models::Order,
        dentia_core::models::OrderItemDetail,
        dentia_core::models::AppointmentWithDoctor,
        dentia_report::ScanReportSummary,
        dentia_report::ScanAnalysis,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and authentication"),
        (name = "profile", description = "Patient profile"),
        (name = "doctors", description = "Doctor directory"),
        (name = "products", description = "Product catalogue"),
        (name = "orders", description = "Shop orders"),
        (name = "appointments", description = "Appointment booking"),
        (name = "scans", description = "Scan analysis and report generation"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
