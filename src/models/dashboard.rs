// src/models/dashboard.rs
//
// Linhas pré-calculadas do dashboard. São carregadas uma única vez pela
// carga inicial e servidas como estão (o `id` é opcional na entrada).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Cards do topo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DashboardStat {
    #[serde(default)]
    pub id: i64,
    #[schema(example = "Requisições Pendentes")]
    pub title: String,
    #[schema(example = "24")]
    pub value: String,
    #[schema(example = "+12%")]
    pub change: String,
    #[schema(example = "up")]
    pub trend: String,
    pub icon: String,
    pub color: String,
}

// 2. Gastos mensais (com meta opcional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MonthlyExpense {
    #[serde(default)]
    pub id: i64,
    #[schema(example = "Jan")]
    pub name: String,
    pub valor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<f64>,
}

// 3. Gastos por categoria
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryExpense {
    #[serde(default)]
    pub id: i64,
    #[schema(example = "Tecnologia")]
    pub name: String,
    pub valor: f64,
}

// 4. Requisições por status
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RequisitionStatusCount {
    #[serde(default)]
    pub id: i64,
    #[schema(example = "Aprovadas")]
    pub name: String,
    pub value: i64,
}

// 5. Atividades recentes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecentActivity {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "approval")]
    pub kind: String,
    #[schema(example = "Há 2 horas")]
    pub time: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: Vec<DashboardStat>,
    pub monthly_expenses: Vec<MonthlyExpense>,
    pub category_expenses: Vec<CategoryExpense>,
    pub requisition_status: Vec<RequisitionStatusCount>,
    pub recent_activities: Vec<RecentActivity>,
}
