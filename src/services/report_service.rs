// src/services/report_service.rs
//
// Relatórios calculados em memória sobre um retrato das seis coleções.

use std::{collections::HashSet, sync::Arc};

use chrono::{Datelike, NaiveDate};

use crate::{
    common::{
        error::AppError,
        format::{format_brl, format_days, format_percent, percent_change, round1},
    },
    db::ReportSource,
    models::{
        dashboard::{CategoryExpense, MonthlyExpense},
        negotiation::Negotiation,
        order::Order,
        report::{
            DistributionBucket, Indicators, MonthlyPoint, MonthlySeries, ReportOverview,
            ReportSnapshot, TopSupplier,
        },
        requisition::RequisitionStatus,
        supplier::{Supplier, SupplierStatus},
    },
};

pub const MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const TOP_LIMIT: usize = 5;
const MAX_APPROVAL_DAYS: f64 = 5.0;

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn in_month(date: NaiveDate, (year, month): (i32, u32)) -> bool {
    date.year() == year && date.month() == month
}

fn savings_of<'a>(negotiations: impl IntoIterator<Item = &'a Negotiation>) -> f64 {
    negotiations.into_iter().map(Negotiation::savings).sum()
}

/// Linhas gravadas para o ano da carga; nos demais anos, a soma dos pedidos mês a mês.
pub fn monthly_series(
    year: i32,
    seed_year: i32,
    stored: &[MonthlyExpense],
    orders: &[Order],
) -> MonthlySeries {
    if year == seed_year {
        return MonthlySeries::Stored(stored.to_vec());
    }

    let points = MONTHS
        .iter()
        .zip(1u32..)
        .map(|(name, month)| MonthlyPoint {
            name: (*name).to_string(),
            valor: orders
                .iter()
                .filter(|o| in_month(o.data_pedido, (year, month)))
                .map(|o| o.valor)
                .sum(),
        })
        .collect();

    MonthlySeries::Derived(points)
}

pub fn compute_indicators(snapshot: &ReportSnapshot, today: NaiveDate) -> Indicators {
    let ReportSnapshot { suppliers, orders, negotiations, requisitions, .. } = snapshot;

    // Fornecedores
    let fornecedores_ativos =
        suppliers.iter().filter(|s| s.status == SupplierStatus::Ativo).count() as i64;

    let distinct_in = |period: (i32, u32)| {
        orders
            .iter()
            .filter(|o| in_month(o.data_pedido, period))
            .map(|o| o.fornecedor.as_str())
            .collect::<HashSet<_>>()
            .len() as f64
    };
    let this_month = (today.year(), today.month());
    let fornecedores_ativos_variacao =
        percent_change(distinct_in(this_month), distinct_in(previous_month(this_month.0, this_month.1)));

    let media_avaliacao = if suppliers.is_empty() {
        0.0
    } else {
        let avg = suppliers.iter().map(|s| s.avaliacao).sum::<f64>() / suppliers.len() as f64;
        (avg * 100.0).round() / 100.0
    };

    // Economia
    let economia = savings_of(negotiations);
    let total_inicial: f64 = negotiations.iter().map(|n| n.valor_inicial).sum();
    let economia_percentual =
        if total_inicial == 0.0 { 0.0 } else { round1(economia / total_inicial * 100.0) };

    // Gastos e pedidos, ancorados no pedido mais recente
    let latest = orders.iter().map(|o| o.data_pedido).max();
    let (gastos_atual, gastos_anterior, pedidos_mes_anterior) = match latest {
        Some(date) => {
            let current = (date.year(), date.month());
            let previous = previous_month(current.0, current.1);
            let sum_in = |period| {
                orders.iter().filter(|o| in_month(o.data_pedido, period)).map(|o| o.valor).sum::<f64>()
            };
            let count_prev = orders.iter().filter(|o| in_month(o.data_pedido, previous)).count();
            (sum_in(current), sum_in(previous), count_prev as f64)
        }
        None => (0.0, 0.0, 0.0),
    };
    let total_pedidos = orders.len() as i64;

    // Heurística: 0,1 dia por dia corrido desde a requisição, no máximo 5
    let approval_days: Vec<f64> = requisitions
        .iter()
        .filter(|r| r.status == RequisitionStatus::Aprovada)
        .map(|r| {
            let days = (today - r.data).num_days().max(0) as f64;
            (days * 0.1).min(MAX_APPROVAL_DAYS)
        })
        .collect();
    let tempo_medio_aprovacao = if approval_days.is_empty() {
        "0 dias".to_string()
    } else {
        format_days(approval_days.iter().sum::<f64>() / approval_days.len() as f64)
    };

    Indicators {
        total_fornecedores: suppliers.len() as i64,
        fornecedores_ativos,
        fornecedores_ativos_variacao: format_percent(fornecedores_ativos_variacao),
        media_avaliacao,
        economia_total_valor: format_brl(economia),
        economia_total_percentual: format_percent(economia_percentual),
        gastos_do_mes_valor: format_brl(gastos_atual),
        gastos_do_mes_variacao: format_percent(percent_change(gastos_atual, gastos_anterior)),
        total_pedidos,
        pedidos_variacao: format_percent(percent_change(total_pedidos as f64, pedidos_mes_anterior)),
        tempo_medio_aprovacao,
    }
}

/// Os cinco melhor avaliados. Empates mantêm a ordem de cadastro.
pub fn top_suppliers(snapshot: &ReportSnapshot) -> Vec<TopSupplier> {
    let mut ranked: Vec<_> = snapshot.suppliers.iter().collect();
    ranked.sort_by(|a, b| b.avaliacao.total_cmp(&a.avaliacao));

    ranked
        .into_iter()
        .take(TOP_LIMIT)
        .map(|supplier| {
            let orders: Vec<&Order> =
                snapshot.orders.iter().filter(|o| o.fornecedor == supplier.nome).collect();
            let economia = savings_of(
                snapshot.negotiations.iter().filter(|n| n.fornecedor == supplier.nome),
            );

            TopSupplier {
                nome: supplier.nome.clone(),
                avaliacao: supplier.avaliacao,
                pedidos: orders.len() as i64,
                total: format_brl(orders.iter().map(|o| o.valor).sum()),
                economia: format_brl(economia),
            }
        })
        .collect()
}

/// Participação dos cinco fornecedores com mais pedidos contra o restante.
/// Pedidos que citam um nome sem cadastro ficam de fora.
pub fn supplier_distribution(suppliers: &[Supplier], orders: &[Order]) -> Vec<DistributionBucket> {
    let mut counts: Vec<i64> = suppliers
        .iter()
        .map(|supplier| orders.iter().filter(|o| o.fornecedor == supplier.nome).count() as i64)
        .collect();
    counts.sort_by(|a, b| b.cmp(a));

    let total: i64 = counts.iter().sum();
    let top: i64 = counts.iter().take(TOP_LIMIT).sum();

    let share = |part: i64| {
        if total == 0 { 0 } else { (part as f64 * 100.0 / total as f64).round() as i64 }
    };

    vec![
        DistributionBucket { name: "Top 5 Fornecedores".to_string(), value: share(top) },
        DistributionBucket { name: "Outros".to_string(), value: share(total - top) },
    ]
}

pub fn build_overview(snapshot: &ReportSnapshot, year: i32, today: NaiveDate) -> ReportOverview {
    ReportOverview {
        gastos_mensais: monthly_series(year, today.year(), &snapshot.monthly_expenses, &snapshot.orders),
        gastos_por_categoria: snapshot.category_expenses.clone(),
        indicadores: compute_indicators(snapshot, today),
        top_fornecedores: top_suppliers(snapshot),
        distribuicao_fornecedores: supplier_distribution(&snapshot.suppliers, &snapshot.orders),
    }
}

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn ReportSource>,
}

impl ReportService {
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self { source }
    }

    /// Relatório completo. Sem `year`, usa o ano corrente.
    pub async fn all(&self, year: Option<i32>, today: NaiveDate) -> Result<ReportOverview, AppError> {
        let snapshot = self.source.snapshot().await?;
        Ok(build_overview(&snapshot, year.unwrap_or(today.year()), today))
    }

    pub async fn gastos_mensais(
        &self,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Result<MonthlySeries, AppError> {
        let snapshot = self.source.snapshot().await?;
        Ok(monthly_series(
            year.unwrap_or(today.year()),
            today.year(),
            &snapshot.monthly_expenses,
            &snapshot.orders,
        ))
    }

    pub async fn gastos_categoria(&self) -> Result<Vec<CategoryExpense>, AppError> {
        Ok(self.source.snapshot().await?.category_expenses)
    }

    pub async fn indicadores(&self, today: NaiveDate) -> Result<Indicators, AppError> {
        let snapshot = self.source.snapshot().await?;
        Ok(compute_indicators(&snapshot, today))
    }

    pub async fn top_fornecedores(&self) -> Result<Vec<TopSupplier>, AppError> {
        let snapshot = self.source.snapshot().await?;
        Ok(top_suppliers(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::report_repo::FixtureReportSource,
        models::{
            negotiation::CreateNegotiationPayload, order::CreateOrderPayload,
            requisition::CreateRequisitionPayload, supplier::CreateSupplierPayload,
        },
    };
    use rstest::rstest;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 10, 28)
    }

    fn supplier(id: i64, nome: &str, avaliacao: f64) -> Supplier {
        let payload: CreateSupplierPayload = serde_json::from_value(json!({
            "nome": nome,
            "cnpj": format!("00.000.000/0001-{id:02}"),
            "avaliacao": avaliacao
        }))
        .unwrap();
        Supplier { id, ..payload.into_supplier() }
    }

    fn order(fornecedor: &str, valor: f64, data_pedido: NaiveDate) -> Order {
        let payload: CreateOrderPayload = serde_json::from_value(json!({
            "codigo": format!("PED-{fornecedor}-{data_pedido}"),
            "item": "Item",
            "fornecedor": fornecedor,
            "valor": valor,
            "dataPedido": data_pedido
        }))
        .unwrap();
        payload.into_order(today())
    }

    fn negotiation(fornecedor: &str, inicial: f64, negociado: f64) -> Negotiation {
        let payload: CreateNegotiationPayload = serde_json::from_value(json!({
            "codigo": "NEG-1001",
            "item": "Servidores",
            "fornecedor": fornecedor,
            "valorInicial": inicial,
            "valorNegociado": negociado
        }))
        .unwrap();
        payload.into_negotiation(today())
    }

    fn approved_on(data: NaiveDate) -> crate::models::requisition::Requisition {
        let payload: CreateRequisitionPayload = serde_json::from_value(json!({
            "codigo": format!("REQ-{data}"),
            "titulo": "Notebooks",
            "solicitante": "Ana",
            "departamento": "TI",
            "valor": 100.0,
            "data": data,
            "status": "aprovada"
        }))
        .unwrap();
        payload.into_requisition(today())
    }

    fn stored_rows() -> Vec<MonthlyExpense> {
        vec![
            MonthlyExpense { id: 1, name: "Jan".into(), valor: 100.0, meta: Some(120.0) },
            MonthlyExpense { id: 2, name: "Fev".into(), valor: 80.0, meta: Some(120.0) },
        ]
    }

    #[test]
    fn seed_year_returns_the_stored_rows() {
        let series = monthly_series(2025, 2025, &stored_rows(), &[]);

        assert_eq!(series, MonthlySeries::Stored(stored_rows()));
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json[0]["meta"], json!(120.0));
    }

    #[test]
    fn other_years_sum_orders_per_month() {
        let orders = vec![
            order("A", 100.0, date(2024, 3, 1)),
            order("B", 50.0, date(2024, 3, 31)),
            order("A", 70.0, date(2024, 12, 5)),
            order("A", 999.0, date(2025, 3, 1)),
        ];

        let MonthlySeries::Derived(points) = monthly_series(2024, 2025, &stored_rows(), &orders)
        else {
            panic!("expected derived series");
        };

        assert_eq!(points.len(), 12);
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, MONTHS.to_vec());
        assert_eq!(points[2].valor, 150.0);
        assert_eq!(points[11].valor, 70.0);
        assert_eq!(points[0].valor, 0.0);

        let json = serde_json::to_value(&points[0]).unwrap();
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn savings_percent_is_zero_without_negotiations() {
        let indicators = compute_indicators(&ReportSnapshot::default(), today());

        assert_eq!(indicators.economia_total_percentual, "0.0%");
        assert_eq!(indicators.economia_total_valor, "R$ 0,00");
        assert_eq!(indicators.tempo_medio_aprovacao, "0 dias");
        assert_eq!(indicators.gastos_do_mes_valor, "R$ 0,00");
    }

    #[test]
    fn savings_are_aggregated_over_every_negotiation() {
        let snapshot = ReportSnapshot {
            negotiations: vec![negotiation("A", 50000.0, 45000.0), negotiation("B", 10000.0, 10000.0)],
            ..Default::default()
        };

        let indicators = compute_indicators(&snapshot, today());

        assert_eq!(indicators.economia_total_valor, "R$ 5.000,00");
        assert_eq!(indicators.economia_total_percentual, "8.3%");
    }

    #[test]
    fn monthly_spend_is_anchored_on_the_latest_order() {
        let snapshot = ReportSnapshot {
            orders: vec![
                order("A", 1000.0, date(2025, 9, 10)),
                order("A", 1000.0, date(2025, 10, 5)),
                order("B", 500.0, date(2025, 10, 20)),
            ],
            ..Default::default()
        };

        let indicators = compute_indicators(&snapshot, date(2026, 2, 1));

        assert_eq!(indicators.gastos_do_mes_valor, "R$ 1.500,00");
        assert_eq!(indicators.gastos_do_mes_variacao, "50.0%");
        assert_eq!(indicators.total_pedidos, 3);
        assert_eq!(indicators.pedidos_variacao, "200.0%");
    }

    #[test]
    fn active_supplier_variation_uses_the_wall_clock_month() {
        let snapshot = ReportSnapshot {
            suppliers: vec![supplier(1, "A", 4.5), supplier(2, "B", 4.0)],
            orders: vec![
                order("A", 10.0, date(2025, 9, 2)),
                order("A", 10.0, date(2025, 10, 2)),
                order("B", 10.0, date(2025, 10, 3)),
                order("B", 10.0, date(2025, 10, 4)),
            ],
            ..Default::default()
        };

        let indicators = compute_indicators(&snapshot, today());

        assert_eq!(indicators.fornecedores_ativos, 2);
        assert_eq!(indicators.total_fornecedores, 2);
        assert_eq!(indicators.fornecedores_ativos_variacao, "100.0%");
        assert_eq!(indicators.media_avaliacao, 4.25);
    }

    #[test]
    fn january_compares_against_december() {
        let snapshot = ReportSnapshot {
            orders: vec![order("A", 200.0, date(2024, 12, 15)), order("A", 100.0, date(2025, 1, 3))],
            ..Default::default()
        };

        let indicators = compute_indicators(&snapshot, date(2025, 1, 10));

        assert_eq!(indicators.gastos_do_mes_variacao, "-50.0%");
        assert_eq!(indicators.fornecedores_ativos_variacao, "0.0%");
    }

    #[test]
    fn approval_time_is_capped_per_requisition() {
        let snapshot = ReportSnapshot {
            requisitions: vec![approved_on(date(2025, 10, 8)), approved_on(date(2025, 1, 1))],
            ..Default::default()
        };

        let indicators = compute_indicators(&snapshot, today());

        assert_eq!(indicators.tempo_medio_aprovacao, "3.5 dias");
    }

    #[test]
    fn future_dated_approvals_count_as_zero_days() {
        let snapshot = ReportSnapshot {
            requisitions: vec![approved_on(date(2025, 12, 1))],
            ..Default::default()
        };

        assert_eq!(compute_indicators(&snapshot, today()).tempo_medio_aprovacao, "0.0 dias");
    }

    #[test]
    fn top_suppliers_are_ranked_by_rating_with_stable_ties() {
        let snapshot = ReportSnapshot {
            suppliers: vec![
                supplier(1, "A", 4.0),
                supplier(2, "B", 4.8),
                supplier(3, "C", 4.0),
                supplier(4, "D", 3.0),
                supplier(5, "E", 4.9),
                supplier(6, "F", 2.0),
            ],
            orders: vec![order("B", 1000.0, date(2025, 10, 1)), order("B", 234.5, date(2025, 10, 2))],
            negotiations: vec![negotiation("B", 50000.0, 45000.0)],
            ..Default::default()
        };

        let top = top_suppliers(&snapshot);

        let names: Vec<&str> = top.iter().map(|s| s.nome.as_str()).collect();
        assert_eq!(names, vec!["E", "B", "A", "C", "D"]);
        assert_eq!(top[1].pedidos, 2);
        assert_eq!(top[1].total, "R$ 1.234,50");
        assert_eq!(top[1].economia, "R$ 5.000,00");
        assert_eq!(top[0].pedidos, 0);
    }

    fn suppliers_with_orders(per_supplier: &[usize]) -> (Vec<Supplier>, Vec<Order>) {
        let suppliers: Vec<Supplier> = (0..per_supplier.len())
            .map(|i| supplier(i as i64 + 1, &format!("F{i}"), 4.0))
            .collect();
        let orders = per_supplier
            .iter()
            .enumerate()
            .flat_map(|(i, n)| (0..*n).map(move |_| order(&format!("F{i}"), 1.0, date(2025, 10, 1))))
            .collect();
        (suppliers, orders)
    }

    #[rstest]
    #[case(vec![1; 10], 50, 50)]
    #[case(vec![3, 1], 100, 0)]
    #[case(vec![5, 1, 1, 1, 1, 1, 1, 1], 75, 25)]
    #[case(vec![0, 0, 0], 0, 0)]
    #[case(vec![], 0, 0)]
    fn distribution_splits_top_five_from_the_rest(
        #[case] per_supplier: Vec<usize>,
        #[case] top: i64,
        #[case] rest: i64,
    ) {
        let (suppliers, orders) = suppliers_with_orders(&per_supplier);

        let buckets = supplier_distribution(&suppliers, &orders);

        assert_eq!(buckets[0].name, "Top 5 Fornecedores");
        assert_eq!(buckets[0].value, top);
        assert_eq!(buckets[1].name, "Outros");
        assert_eq!(buckets[1].value, rest);
    }

    #[test]
    fn distribution_ignores_orders_citing_unregistered_suppliers() {
        let (suppliers, mut orders) = suppliers_with_orders(&[1; 5]);
        orders.extend((0..5).map(|i| order(&format!("G{i}"), 1.0, date(2025, 10, 1))));

        let buckets = supplier_distribution(&suppliers, &orders);

        assert_eq!(buckets[0].value, 100);
        assert_eq!(buckets[1].value, 0);
    }

    #[test]
    fn distribution_without_suppliers_is_empty_even_with_orders() {
        let orders = vec![order("Removido", 10.0, date(2025, 10, 1))];

        let buckets = supplier_distribution(&[], &orders);

        assert_eq!(buckets[0].value, 0);
        assert_eq!(buckets[1].value, 0);
    }

    #[tokio::test]
    async fn service_assembles_the_full_report_from_its_source() {
        let snapshot = ReportSnapshot {
            monthly_expenses: stored_rows(),
            category_expenses: vec![CategoryExpense { id: 1, name: "TI".into(), valor: 10.0 }],
            negotiations: vec![negotiation("A", 50000.0, 45000.0)],
            ..Default::default()
        };
        let service = ReportService::new(Arc::new(FixtureReportSource(snapshot)));

        let overview = service.all(None, today()).await.unwrap();
        let json = serde_json::to_value(&overview).unwrap();

        assert_eq!(json["gastosMensais"].as_array().unwrap().len(), 2);
        assert_eq!(json["gastosPorCategoria"][0]["name"], "TI");
        assert_eq!(json["indicadores"]["economiaTotalPercentual"], "10.0%");
        assert_eq!(json["distribuicaoFornecedores"][0]["value"], 0);

        let other_year = service.gastos_mensais(Some(2019), today()).await.unwrap();
        assert!(matches!(other_year, MonthlySeries::Derived(points) if points.len() == 12));
    }
}
