// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "SupplyFlow API", description = "Backend de gestão de compras"),
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Fornecedores ---
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::list_suppliers_by_status,
        handlers::suppliers::list_suppliers_by_category,
        handlers::suppliers::search_suppliers,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Requisições ---
        handlers::requisitions::list_requisitions,
        handlers::requisitions::get_requisition,
        handlers::requisitions::get_requisition_by_code,
        handlers::requisitions::list_requisitions_by_status,
        handlers::requisitions::create_requisition,
        handlers::requisitions::update_requisition,
        handlers::requisitions::approve_requisition,
        handlers::requisitions::reject_requisition,
        handlers::requisitions::delete_requisition,

        // --- Negociações ---
        handlers::negotiations::list_negotiations,
        handlers::negotiations::get_negotiation,
        handlers::negotiations::get_negotiation_by_code,
        handlers::negotiations::list_negotiations_by_status,
        handlers::negotiations::create_negotiation,
        handlers::negotiations::update_negotiation,
        handlers::negotiations::delete_negotiation,
        handlers::negotiations::add_negotiation_history,

        // --- Orçamentos ---
        handlers::budgets::list_budgets,
        handlers::budgets::get_budget,
        handlers::budgets::get_budget_by_code,
        handlers::budgets::list_budgets_by_status,
        handlers::budgets::create_budget,
        handlers::budgets::update_budget,
        handlers::budgets::delete_budget,
        handlers::budgets::add_quote,

        // --- Pedidos ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::get_order_by_code,
        handlers::orders::list_orders_by_status,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
        handlers::orders::add_order_history,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_monthly_expenses,
        handlers::dashboard::get_category_expenses,
        handlers::dashboard::get_requisition_status,
        handlers::dashboard::get_recent_activities,
        handlers::dashboard::get_all,

        // --- Relatórios ---
        handlers::reports::get_all,
        handlers::reports::get_monthly_expenses,
        handlers::reports::get_category_expenses,
        handlers::reports::get_indicators,
        handlers::reports::get_top_suppliers,
    ),
    components(
        schemas(
            handlers::MessageResponse,
            handlers::health::HealthResponse,

            // --- Auth ---
            models::auth::UserRole,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Fornecedores ---
            models::supplier::SupplierStatus,
            models::supplier::Supplier,
            models::supplier::CreateSupplierPayload,
            models::supplier::UpdateSupplierPayload,

            // --- Requisições ---
            models::requisition::RequisitionStatus,
            models::requisition::Priority,
            models::requisition::Requisition,
            models::requisition::CreateRequisitionPayload,
            models::requisition::UpdateRequisitionPayload,

            // --- Negociações ---
            models::negotiation::NegotiationStatus,
            models::negotiation::NegotiationHistory,
            models::negotiation::Negotiation,
            models::negotiation::CreateNegotiationPayload,
            models::negotiation::UpdateNegotiationPayload,
            models::negotiation::AddNegotiationHistoryPayload,

            // --- Orçamentos ---
            models::budget::Quote,
            models::budget::Budget,
            models::budget::CreateBudgetPayload,
            models::budget::UpdateBudgetPayload,
            models::budget::AddQuotePayload,

            // --- Pedidos ---
            models::order::OrderStatus,
            models::order::OrderHistory,
            models::order::Order,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderPayload,
            models::order::AddOrderHistoryPayload,

            // --- Dashboard ---
            models::dashboard::DashboardStat,
            models::dashboard::MonthlyExpense,
            models::dashboard::CategoryExpense,
            models::dashboard::RequisitionStatusCount,
            models::dashboard::RecentActivity,
            models::dashboard::DashboardOverview,

            // --- Relatórios ---
            models::report::MonthlyPoint,
            models::report::MonthlySeries,
            models::report::Indicators,
            models::report::TopSupplier,
            models::report::DistributionBucket,
            models::report::ReportOverview,
        )
    ),
    tags(
        (name = "Health", description = "Estado do serviço"),
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Fornecedores", description = "Cadastro de fornecedores"),
        (name = "Requisições", description = "Pedidos internos de compra e aprovação"),
        (name = "Negociações", description = "Negociações de preço com histórico"),
        (name = "Orçamentos", description = "Orçamentos e cotações"),
        (name = "Pedidos", description = "Pedidos de compra e rastreio"),
        (name = "Dashboard", description = "Painel inicial"),
        (name = "Relatórios", description = "Indicadores e gráficos gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
