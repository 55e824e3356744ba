// src/db/seed.rs
//
// Carga inicial: só roda com a tabela de usuários vazia, e tudo numa
// transação só (ou entra tudo, ou nada).

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{
        BudgetRepository, DashboardRepository, NegotiationRepository, OrderRepository,
        RequisitionRepository, SupplierRepository, UserRepository,
    },
    models::{
        auth::UserRole,
        budget::{AddQuotePayload, CreateBudgetPayload},
        dashboard::{
            CategoryExpense, DashboardStat, MonthlyExpense, RecentActivity, RequisitionStatusCount,
        },
        negotiation::{AddNegotiationHistoryPayload, CreateNegotiationPayload, NegotiationHistory},
        order::{AddOrderHistoryPayload, CreateOrderPayload, OrderHistory},
        requisition::CreateRequisitionPayload,
        supplier::CreateSupplierPayload,
    },
    services::auth::hash_password,
};

const INITIAL_DATA: &str = include_str!("../../seed/initial_data.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitialData {
    usuarios: Vec<SeedUser>,
    fornecedores: Vec<CreateSupplierPayload>,
    requisicoes: Vec<CreateRequisitionPayload>,
    negociacoes: Vec<SeedNegotiation>,
    orcamentos: Vec<SeedBudget>,
    pedidos: Vec<SeedOrder>,
    dashboard: SeedDashboard,
}

#[derive(Deserialize)]
struct SeedUser {
    username: String,
    password: String,
    email: String,
    role: UserRole,
}

#[derive(Deserialize)]
struct SeedNegotiation {
    #[serde(flatten)]
    negociacao: CreateNegotiationPayload,
    #[serde(default)]
    historico: Vec<AddNegotiationHistoryPayload>,
}

#[derive(Deserialize)]
struct SeedBudget {
    #[serde(flatten)]
    orcamento: CreateBudgetPayload,
    #[serde(default)]
    cotacoes: Vec<AddQuotePayload>,
}

#[derive(Deserialize)]
struct SeedOrder {
    #[serde(flatten)]
    pedido: CreateOrderPayload,
    #[serde(default)]
    historico: Vec<AddOrderHistoryPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedDashboard {
    stats: Vec<DashboardStat>,
    monthly_expenses: Vec<MonthlyExpense>,
    category_expenses: Vec<CategoryExpense>,
    requisition_status: Vec<RequisitionStatusCount>,
    recent_activities: Vec<RecentActivity>,
}

/// Popula o banco se ainda não houver usuários. Retorna `true` se carregou.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<bool, AppError> {
    let users = UserRepository::new(pool.clone());
    if users.count().await? > 0 {
        tracing::info!("Banco já populado, carga inicial ignorada.");
        return Ok(false);
    }

    let data: InitialData = serde_json::from_str(INITIAL_DATA)
        .map_err(|e| anyhow::anyhow!("Dados iniciais inválidos: {}", e))?;
    let today = Local::now().date_naive();

    // Hash antes de abrir a transação
    let mut hashed_users = Vec::with_capacity(data.usuarios.len());
    for user in &data.usuarios {
        hashed_users.push(hash_password(&user.password).await?);
    }

    let mut tx = pool.begin().await?;

    for (user, password_hash) in data.usuarios.iter().zip(&hashed_users) {
        users
            .create_user(&mut *tx, &user.username, password_hash, &user.email, user.role)
            .await?;
    }

    let suppliers = SupplierRepository::new(pool.clone());
    for payload in data.fornecedores {
        suppliers.create(&mut *tx, &payload.into_supplier()).await?;
    }

    let requisitions = RequisitionRepository::new(pool.clone());
    for payload in data.requisicoes {
        requisitions.create(&mut *tx, &payload.into_requisition(today)).await?;
    }

    let negotiations = NegotiationRepository::new();
    for seed in data.negociacoes {
        let parent = negotiations.create(&mut tx, &seed.negociacao.into_negotiation(today)).await?;
        for entry in seed.historico {
            let row = history_entry(parent.id, entry, today);
            negotiations.add_history(&mut tx, &row).await?;
        }
    }

    let budgets = BudgetRepository::new();
    for seed in data.orcamentos {
        let parent = budgets.create(&mut tx, &seed.orcamento.into_budget(today)).await?;
        for quote in seed.cotacoes {
            budgets.add_quote(&mut tx, &quote.into_quote(&parent)).await?;
        }
    }

    let orders = OrderRepository::new();
    for seed in data.pedidos {
        let parent = orders.create(&mut tx, &seed.pedido.into_order(today)).await?;
        for entry in seed.historico {
            let row = OrderHistory {
                id: 0,
                pedido_id: parent.id,
                data: entry.data.unwrap_or(today),
                status: entry.status.unwrap_or_default(),
                descricao: entry.descricao.unwrap_or_default(),
            };
            orders.add_history(&mut tx, &row).await?;
        }
    }

    let dashboard = DashboardRepository::new(pool.clone());
    for stat in &data.dashboard.stats {
        dashboard.insert_stat(&mut tx, stat).await?;
    }
    for row in &data.dashboard.monthly_expenses {
        dashboard.insert_monthly_expense(&mut tx, &row.name, row.valor, row.meta).await?;
    }
    for row in &data.dashboard.category_expenses {
        dashboard.insert_category_expense(&mut tx, &row.name, row.valor).await?;
    }
    for row in &data.dashboard.requisition_status {
        dashboard.insert_requisition_status(&mut tx, &row.name, row.value).await?;
    }
    for activity in &data.dashboard.recent_activities {
        dashboard.insert_activity(&mut tx, activity).await?;
    }

    tx.commit().await?;

    tracing::info!("✅ Carga inicial concluída!");
    Ok(true)
}

fn history_entry(
    negociacao_id: i64,
    entry: AddNegotiationHistoryPayload,
    today: NaiveDate,
) -> NegotiationHistory {
    NegotiationHistory {
        id: 0,
        negociacao_id,
        data: entry.data.unwrap_or(today),
        autor: entry.autor.unwrap_or_default(),
        mensagem: entry.mensagem.unwrap_or_default(),
        valor: entry.valor.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn seeds_once_and_only_once() {
        let pool = test_pool().await;

        assert!(seed_if_empty(&pool).await.unwrap());
        assert!(!seed_if_empty(&pool).await.unwrap());

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 2);
    }

    #[tokio::test]
    async fn aggregates_are_seeded_with_children() {
        let pool = test_pool().await;
        seed_if_empty(&pool).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let neg = NegotiationRepository::new()
            .find_by_code(&mut conn, "NEG-1001")
            .await
            .unwrap()
            .unwrap();
        let orc = BudgetRepository::new()
            .find_by_code(&mut conn, "ORC-2001")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(neg.historico.len(), 4);
        assert_eq!(neg.valor_inicial - neg.valor_negociado, 5000.0);
        assert_eq!(orc.cotacoes.len(), 3);
    }
}
