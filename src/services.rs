pub mod auth;
pub mod budget_service;
pub mod dashboard_service;
pub mod negotiation_service;
pub mod order_service;
pub mod report_service;
pub mod requisition_service;
pub mod supplier_service;
