// tests/api.rs
//
// Testes ponta a ponta: o router completo sobre um SQLite em memória.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use supplyflow::{
    config::{AppConfig, AppState},
    db, routes,
};

async fn app_with(seed: bool) -> Router {
    let pool = db::connect(db::IN_MEMORY).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    if seed {
        db::seed::seed_if_empty(&pool).await.unwrap();
    }

    let config = AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("segredo-de-teste".to_string()),
        "DB_PATH" => Some(db::IN_MEMORY.to_string()),
        _ => None,
    })
    .unwrap();

    routes::build_router(AppState::from_pool(pool, &config), &config.cors_origins)
}

async fn app() -> Router {
    app_with(false).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

async fn register(app: &Router, username: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "password": "segredo123",
            "email": format!("{username}@supplyflow.com"),
            "role": role
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_string()
}

fn requisition(codigo: &str) -> Value {
    json!({
        "codigo": codigo,
        "titulo": "Notebooks Dell i7",
        "solicitante": "Ana Souza",
        "departamento": "TI",
        "valor": 45000.0
    })
}

#[tokio::test]
async fn health_and_banner_are_public() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK", "message": "SupplyFlow Backend is running" }));

    let (status, body) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("SupplyFlow"));
}

#[tokio::test]
async fn writes_without_a_token_are_unauthorized() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/fornecedores",
        None,
        Some(json!({ "nome": "TechSupply", "cnpj": "12.345.678/0001-90" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, Method::POST, "/api/pedidos", Some("nao-e-um-jwt"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Leitura continua pública
    let (status, body) = send(&app, Method::GET, "/api/fornecedores", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn regular_users_cannot_run_admin_operations() {
    let app = app().await;
    let admin = register(&app, "chefe", "ADMIN").await;
    let user = register(&app, "comprador", "USER").await;

    let (status, _) =
        send(&app, Method::POST, "/api/requisicoes", Some(&user), Some(requisition("REQ-1"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, created) =
        send(&app, Method::POST, "/api/requisicoes", Some(&admin), Some(requisition("REQ-1"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/requisicoes/{}/aprovar", created["id"]);
    let (status, _) = send(&app, Method::PUT, &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn requisition_without_valor_lists_the_missing_field() {
    let app = app().await;
    let admin = register(&app, "chefe", "ADMIN").await;

    let mut payload = requisition("REQ-1");
    payload.as_object_mut().unwrap().remove("valor");

    let (status, body) = send(&app, Method::POST, "/api/requisicoes", Some(&admin), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("valor"), "{message}");

    let (_, list) = send(&app, Method::GET, "/api/requisicoes", None, None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn approving_twice_keeps_the_requisition_approved() {
    let app = app().await;
    let admin = register(&app, "chefe", "ADMIN").await;

    let (_, created) =
        send(&app, Method::POST, "/api/requisicoes", Some(&admin), Some(requisition("REQ-1"))).await;
    assert_eq!(created["status"], "pendente");
    let uri = format!("/api/requisicoes/{}/aprovar", created["id"]);

    for _ in 0..2 {
        let (status, body) = send(&app, Method::PUT, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "aprovada");
    }
}

#[tokio::test]
async fn duplicate_codes_are_rejected_for_every_coded_entity() {
    let app = app().await;
    let admin = register(&app, "chefe", "ADMIN").await;

    let cases = [
        ("/api/requisicoes", requisition("REQ-1")),
        (
            "/api/negociacoes",
            json!({
                "codigo": "NEG-1",
                "item": "Servidores",
                "fornecedor": "TechSupply",
                "valorInicial": 100.0,
                "valorNegociado": 90.0
            }),
        ),
        ("/api/orcamentos", json!({ "codigo": "ORC-1", "item": "Cadeiras" })),
        (
            "/api/pedidos",
            json!({ "codigo": "PED-1", "item": "Cadeiras", "fornecedor": "Móveis SA", "valor": 10.0 }),
        ),
    ];

    for (uri, payload) in cases {
        let (status, _) = send(&app, Method::POST, uri, Some(&admin), Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED, "{uri}");

        let (status, body) = send(&app, Method::POST, uri, Some(&admin), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["message"].is_string());

        let (_, list) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(list.as_array().unwrap().len(), 1, "{uri}");
    }
}

#[tokio::test]
async fn savings_report_reflects_a_single_negotiation() {
    let app = app().await;
    let user = register(&app, "comprador", "USER").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/negociacoes",
        Some(&user),
        Some(json!({
            "codigo": "NEG-1001",
            "item": "Servidores Dell",
            "fornecedor": "TechSupply Ltda",
            "valorInicial": 50000.00,
            "valorNegociado": 45000.00
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/api/relatorios/all", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let indicators = &body["indicadores"];
    assert!(indicators["economiaTotalValor"].as_str().unwrap().contains("5.000,00"));
    assert_eq!(indicators["economiaTotalPercentual"], "10.0%");
    assert_eq!(body["distribuicaoFornecedores"][0]["name"], "Top 5 Fornecedores");
}

#[tokio::test]
async fn report_year_must_be_numeric() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/relatorios/all?year=abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) =
        send(&app, Method::GET, "/api/relatorios/gastos-mensais?year=1999", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn history_is_appended_and_returned_with_the_order() {
    let app = app().await;
    let user = register(&app, "comprador", "USER").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/pedidos",
        Some(&user),
        Some(json!({ "codigo": "PED-1", "item": "Cadeiras", "fornecedor": "Móveis SA", "valor": 10.0 })),
    )
    .await;
    let uri = format!("/api/pedidos/{}/historico", created["id"]);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&user),
        Some(json!({ "status": "Enviado", "descricao": "Saiu do centro de distribuição" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["historico"].as_array().unwrap().len(), 1);
    assert_eq!(body["historico"][0]["status"], "Enviado");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/pedidos/999/historico",
        Some(&user),
        Some(json!({ "status": "Enviado", "descricao": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_lookup_is_not_found() {
    let app = app().await;
    let user = register(&app, "comprador", "USER").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/orcamentos",
        Some(&user),
        Some(json!({ "codigo": "ORC-1", "item": "Cadeiras" })),
    )
    .await;
    let uri = format!("/api/orcamentos/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Orçamento excluído com sucesso");

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_and_unknown_status_are_handled() {
    let app = app().await;
    let user = register(&app, "comprador", "USER").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/fornecedores")
        .header(header::AUTHORIZATION, format!("Bearer {user}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nome: "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/pedidos/status/voando", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn seeded_admin_can_log_in_and_read_aggregates() {
    let app = app_with(true).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "ADMIN");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "errada" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, negotiation) = send(&app, Method::GET, "/api/negociacoes/codigo/NEG-1001", None, None).await;
    assert!(!negotiation["historico"].as_array().unwrap().is_empty());

    let (status, dashboard) = send(&app, Method::GET, "/api/dashboard/all", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(dashboard["recentActivities"].as_array().unwrap().len() <= 10);
}
