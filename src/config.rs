// src/config.rs

use std::{env, fmt::Display, str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::SqlitePool;

use crate::{
    db::{
        BudgetRepository, DashboardRepository, NegotiationRepository, OrderRepository,
        ReportRepository, RequisitionRepository, SupplierRepository, UserRepository,
    },
    services::{
        auth::AuthService, budget_service::BudgetService, dashboard_service::DashboardService,
        negotiation_service::NegotiationService, order_service::OrderService,
        report_service::ReportService, requisition_service::RequisitionService,
        supplier_service::SupplierService,
    },
};

const DEV_JWT_SECRET: &str = "supplyflow-dev-secret-troque-em-producao";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Configuração lida do ambiente (e do `.env`, quando existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub jwt_secret: String,
    // Milissegundos
    pub jwt_expiration_ms: i64,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub seed_data: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let value_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("⚠️ JWT_SECRET não definido, usando o segredo de desenvolvimento");
                DEV_JWT_SECRET.to_string()
            }
        };

        let cors_origins = value_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            db_path: value_or("DB_PATH", "./supplyflow.db"),
            jwt_secret,
            jwt_expiration_ms: parsed("JWT_EXPIRATION", &value_or("JWT_EXPIRATION", "86400000"))?,
            port: parsed("PORT", &value_or("PORT", "8080"))?,
            cors_origins,
            seed_data: parsed("SEED_DATA", &value_or("SEED_DATA", "true"))?,
        })
    }
}

fn parsed<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Valor inválido para {key}: '{raw}'"))
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub supplier_service: SupplierService,
    pub requisition_service: RequisitionService,
    pub negotiation_service: NegotiationService,
    pub budget_service: BudgetService,
    pub order_service: OrderService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
}

impl AppState {
    /// Monta o gráfico de dependências sobre um pool já migrado.
    pub fn from_pool(db_pool: SqlitePool, config: &AppConfig) -> Self {
        let auth_service = AuthService::new(
            UserRepository::new(db_pool.clone()),
            config.jwt_secret.clone(),
            config.jwt_expiration_ms,
        );

        Self {
            auth_service,
            supplier_service: SupplierService::new(SupplierRepository::new(db_pool.clone())),
            requisition_service: RequisitionService::new(RequisitionRepository::new(db_pool.clone())),
            negotiation_service: NegotiationService::new(NegotiationRepository::new(), db_pool.clone()),
            budget_service: BudgetService::new(BudgetRepository::new(), db_pool.clone()),
            order_service: OrderService::new(OrderRepository::new(), db_pool.clone()),
            dashboard_service: DashboardService::new(DashboardRepository::new(db_pool.clone())),
            report_service: ReportService::new(Arc::new(ReportRepository::new(db_pool.clone()))),
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.db_path, "./supplyflow.db");
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.jwt_expiration_ms, 86_400_000);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.seed_data);
    }

    #[test]
    fn values_come_from_the_environment() {
        let config = config_from(&[
            ("DB_PATH", ":memory:"),
            ("JWT_SECRET", "s3cr3t"),
            ("JWT_EXPIRATION", "60000"),
            ("PORT", "9090"),
            ("CORS_ORIGINS", "https://app.supplyflow.com, https://admin.supplyflow.com,"),
            ("SEED_DATA", "false"),
        ])
        .unwrap();

        assert_eq!(config.db_path, ":memory:");
        assert_eq!(config.jwt_secret, "s3cr3t");
        assert_eq!(config.jwt_expiration_ms, 60_000);
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.cors_origins,
            vec!["https://app.supplyflow.com", "https://admin.supplyflow.com"]
        );
        assert!(!config.seed_data);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config_from(&[("PORT", "oitenta")]).unwrap_err();

        assert!(err.to_string().contains("PORT"));
    }
}
