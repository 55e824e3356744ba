// src/routes.rs

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo: API, documentação, health, CORS e tracing.
pub fn build_router(app_state: AppState, cors_origins: &[String]) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route("/search", get(handlers::suppliers::search_suppliers))
        .route("/status/{status}", get(handlers::suppliers::list_suppliers_by_status))
        .route("/categoria/{categoria}", get(handlers::suppliers::list_suppliers_by_category))
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        );

    let requisition_routes = Router::new()
        .route(
            "/",
            get(handlers::requisitions::list_requisitions)
                .post(handlers::requisitions::create_requisition),
        )
        .route("/codigo/{codigo}", get(handlers::requisitions::get_requisition_by_code))
        .route("/status/{status}", get(handlers::requisitions::list_requisitions_by_status))
        .route(
            "/{id}",
            get(handlers::requisitions::get_requisition)
                .put(handlers::requisitions::update_requisition)
                .delete(handlers::requisitions::delete_requisition),
        )
        .route("/{id}/aprovar", put(handlers::requisitions::approve_requisition))
        .route("/{id}/rejeitar", put(handlers::requisitions::reject_requisition));

    let negotiation_routes = Router::new()
        .route(
            "/",
            get(handlers::negotiations::list_negotiations)
                .post(handlers::negotiations::create_negotiation),
        )
        .route("/codigo/{codigo}", get(handlers::negotiations::get_negotiation_by_code))
        .route("/status/{status}", get(handlers::negotiations::list_negotiations_by_status))
        .route(
            "/{id}",
            get(handlers::negotiations::get_negotiation)
                .put(handlers::negotiations::update_negotiation)
                .delete(handlers::negotiations::delete_negotiation),
        )
        .route("/{id}/historico", post(handlers::negotiations::add_negotiation_history));

    let budget_routes = Router::new()
        .route("/", get(handlers::budgets::list_budgets).post(handlers::budgets::create_budget))
        .route("/codigo/{codigo}", get(handlers::budgets::get_budget_by_code))
        .route("/status/{status}", get(handlers::budgets::list_budgets_by_status))
        .route(
            "/{id}",
            get(handlers::budgets::get_budget)
                .put(handlers::budgets::update_budget)
                .delete(handlers::budgets::delete_budget),
        )
        .route("/{id}/cotacoes", post(handlers::budgets::add_quote));

    let order_routes = Router::new()
        .route("/", get(handlers::orders::list_orders).post(handlers::orders::create_order))
        .route("/codigo/{codigo}", get(handlers::orders::get_order_by_code))
        .route("/status/{status}", get(handlers::orders::list_orders_by_status))
        .route(
            "/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route("/{id}/historico", post(handlers::orders::add_order_history));

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::get_stats))
        .route("/monthly-expenses", get(handlers::dashboard::get_monthly_expenses))
        .route("/category-expenses", get(handlers::dashboard::get_category_expenses))
        .route("/requisition-status", get(handlers::dashboard::get_requisition_status))
        .route("/recent-activities", get(handlers::dashboard::get_recent_activities))
        .route("/all", get(handlers::dashboard::get_all));

    let report_routes = Router::new()
        .route("/all", get(handlers::reports::get_all))
        .route("/gastos-mensais", get(handlers::reports::get_monthly_expenses))
        .route("/gastos-categoria", get(handlers::reports::get_category_expenses))
        .route("/indicadores", get(handlers::reports::get_indicators))
        .route("/top-fornecedores", get(handlers::reports::get_top_suppliers));

    // Combina tudo no router principal
    Router::new()
        .route("/", get(handlers::health::banner))
        .route("/health", get(handlers::health::health))
        .nest("/api/auth", auth_routes)
        .nest("/api/fornecedores", supplier_routes)
        .nest("/api/requisicoes", requisition_routes)
        .nest("/api/negociacoes", negotiation_routes)
        .nest("/api/orcamentos", budget_routes)
        .nest("/api/pedidos", order_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/relatorios", report_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Origem CORS ignorada (inválida): {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
