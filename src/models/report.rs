// src/models/report.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{
    dashboard::{CategoryExpense, MonthlyExpense},
    negotiation::Negotiation,
    order::Order,
    requisition::Requisition,
    supplier::Supplier,
};

// Ponto da série mensal calculada a partir dos pedidos (sem meta)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyPoint {
    #[schema(example = "Jan")]
    pub name: String,
    pub valor: f64,
}

/// Série mensal: as linhas gravadas (ano da carga) ou a soma dos pedidos.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum MonthlySeries {
    Stored(Vec<MonthlyExpense>),
    Derived(Vec<MonthlyPoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub total_fornecedores: i64,
    pub fornecedores_ativos: i64,
    #[schema(example = "12.5%")]
    pub fornecedores_ativos_variacao: String,
    pub media_avaliacao: f64,
    #[schema(example = "R$ 5.000,00")]
    pub economia_total_valor: String,
    #[schema(example = "10.0%")]
    pub economia_total_percentual: String,
    pub gastos_do_mes_valor: String,
    pub gastos_do_mes_variacao: String,
    pub total_pedidos: i64,
    pub pedidos_variacao: String,
    #[schema(example = "2.5 dias")]
    pub tempo_medio_aprovacao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopSupplier {
    pub nome: String,
    pub avaliacao: f64,
    pub pedidos: i64,
    #[schema(example = "R$ 45.000,00")]
    pub total: String,
    pub economia: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DistributionBucket {
    #[schema(example = "Top 5 Fornecedores")]
    pub name: String,
    // Percentual inteiro do total de pedidos
    pub value: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportOverview {
    pub gastos_mensais: MonthlySeries,
    pub gastos_por_categoria: Vec<CategoryExpense>,
    pub indicadores: Indicators,
    pub top_fornecedores: Vec<TopSupplier>,
    pub distribuicao_fornecedores: Vec<DistributionBucket>,
}

/// As seis coleções lidas (em paralelo) para montar os relatórios.
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    pub monthly_expenses: Vec<MonthlyExpense>,
    pub category_expenses: Vec<CategoryExpense>,
    pub suppliers: Vec<Supplier>,
    pub orders: Vec<Order>,
    pub negotiations: Vec<Negotiation>,
    pub requisitions: Vec<Requisition>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Ano da série mensal. Ausente = ano corrente.
    pub year: Option<i32>,
}
