//! End-to-end tests of the HTTP API over fixture data.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use painel_data::DataSnapshot;
use painel_test_utils::{Fixture, INDEX_HTML, STYLE_CSS};
use painel_web::{router::build_router, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

const PAGES: [&str; 5] = [
    "/api/v1/page1_vendas",
    "/api/v1/page2_logistica",
    "/api/v1/page3_satisfacao",
    "/api/v1/page4_financeiro",
    "/api/v1/page5_marketing",
];

fn app(fx: &Fixture) -> Router {
    let snapshot = DataSnapshot::load(&fx.data_dir(), &fx.map_dir());
    build_router(AppState::new(snapshot, fx.frontend_dir()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, body)
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, content_type, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{}", uri);
    assert_eq!(content_type.as_deref(), Some("application/json"), "{}", uri);
    serde_json::from_slice(&body).unwrap()
}

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().unwrap().keys().map(String::as_str).collect()
}

#[tokio::test]
async fn test_page_documents_have_declared_keys_in_order() {
    let fx = Fixture::complete();
    let app = app(&fx);

    let expected: [&[&str]; 5] = [
        &["kpis", "ranking_geral_categorias", "pareto_analise_vendas", "sazonalidade_mensal_principais", "sazonalidade_trimestral_principais"],
        &["kpis", "proporcao_atrasos", "atraso_por_estado", "satisfacao_vs_atraso", "atraso_por_tipo_entrega", "pareto_atrasos_por_categoria", "sazonalidade_atrasos", "impacto_metodo_pagamento"],
        &["kpis", "distribuicao_avaliacoes", "ranking_completo_categorias", "ranking_10_melhores_categorias", "ranking_10_piores_categorias"],
        &["kpis", "pareto_receita_pos_frete", "receita_bruta_para_histograma", "receita_bruta_quartis_limiar", "composicao_receita_maior_impacto", "maiores_margens_categorias"],
        &["kpis", "data_estados_maior_volume", "conversion_by_payment_type_final"],
    ];
    for (uri, expected) in PAGES.iter().zip(expected) {
        let doc = get_json(&app, uri).await;
        assert_eq!(keys(&doc), expected.to_vec(), "{}", uri);
    }
}

#[tokio::test]
async fn test_sales_page_content() {
    let fx = Fixture::complete();
    let doc = get_json(&app(&fx), "/api/v1/page1_vendas").await;

    assert_eq!(
        doc["kpis"],
        json!({
            "total_geral_vendas": "13,500 Pedidos",
            "categoria_maior_volume": "cama_mesa_banho",
            "percentual_8_categorias_principais": "62.50%",
        })
    );
    assert_eq!(keys(&doc["kpis"]), vec!["total_geral_vendas", "categoria_maior_volume", "percentual_8_categorias_principais"]);

    let ranking = doc["ranking_geral_categorias"].as_array().unwrap();
    assert_eq!(ranking.len(), 10);
    assert_eq!(ranking[0], json!({"product_category_name": "cama_mesa_banho", "total_vendas": 3000}));
}

#[tokio::test]
async fn test_marketing_page_keeps_source_row_order() {
    let fx = Fixture::complete();
    let doc = get_json(&app(&fx), "/api/v1/page5_marketing").await;

    assert_eq!(doc["kpis"]["tipo_pagamento_maior_conversao"], "boleto (97.50%)");
    assert_eq!(doc["kpis"]["estado_maior_conversao"], "RR (100.00%)");
    let tipos: Vec<&str> = doc["conversion_by_payment_type_final"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["payment_type"].as_str().unwrap())
        .collect();
    assert_eq!(tipos, vec!["credit_card", "boleto", "voucher", "debit_card"]);
}

#[tokio::test]
async fn test_logistics_missing_cells_are_null() {
    let fx = Fixture::complete();
    fx.write(
        "a2/logistica_atraso_por_estado.csv",
        "customer_state,atraso_medio_dias,total_pedidos_atrasados\nAL,8.5,95\nMA,,110\n",
    );
    let doc = get_json(&app(&fx), "/api/v1/page2_logistica").await;

    assert_eq!(doc["kpis"]["estado_maior_atraso"], "AL (8.5 dias)");
    assert_eq!(doc["atraso_por_estado"][1]["atraso_medio_dias"], Value::Null);
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let fx = Fixture::complete();
    let app = app(&fx);

    for uri in PAGES.iter().chain(["/api/v1/mapa_brasil"].iter()) {
        let (_, _, first) = get(&app, uri).await;
        let (_, _, second) = get(&app, uri).await;
        assert_eq!(first, second, "{}", uri);
    }
}

#[tokio::test]
async fn test_empty_data_keeps_contract() {
    let fx = Fixture::empty();
    let app = app(&fx);

    let vendas = get_json(&app, "/api/v1/page1_vendas").await;
    assert_eq!(
        vendas,
        json!({
            "kpis": {},
            "ranking_geral_categorias": [],
            "pareto_analise_vendas": [],
            "sazonalidade_mensal_principais": [],
            "sazonalidade_trimestral_principais": [],
        })
    );
    for uri in PAGES {
        let doc = get_json(&app, uri).await;
        assert_eq!(doc["kpis"], json!({}), "{}", uri);
        for (key, value) in doc.as_object().unwrap().iter().skip(1) {
            assert_eq!(value, &json!([]), "{} {}", uri, key);
        }
    }

    assert_eq!(get_json(&app, "/api/v1/mapa_brasil").await, json!({}));
}

#[tokio::test]
async fn test_one_failed_domain_leaves_others_intact() {
    let fx = Fixture::complete();
    fx.remove("a4/financeiro_pareto_receita_pos_frete.csv");
    let app = app(&fx);

    let financeiro = get_json(&app, "/api/v1/page4_financeiro").await;
    assert_eq!(financeiro["kpis"], json!({}));
    assert_eq!(financeiro["maiores_margens_categorias"], json!([]));

    let satisfacao = get_json(&app, "/api/v1/page3_satisfacao").await;
    assert_eq!(satisfacao["kpis"]["nota_media_geral"], "4.00");

    let health = get_json(&app, "/health").await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["degraded"], json!(["financeiro"]));
}

#[tokio::test]
async fn test_map_endpoint() {
    let fx = Fixture::complete();
    let map = get_json(&app(&fx), "/api/v1/mapa_brasil").await;

    assert_eq!(map["type"], "FeatureCollection");
    let features = map["features"].as_array().unwrap();
    assert_eq!(features.len(), 27);

    let siglas: Vec<&str> = features
        .iter()
        .map(|f| f["properties"]["sigla_uf"].as_str().unwrap())
        .collect();
    let mut sorted = siglas.clone();
    sorted.sort_unstable();
    assert_eq!(siglas, sorted);

    let sp = features.iter().find(|f| f["properties"]["sigla_uf"] == "SP").unwrap();
    assert_eq!(sp["properties"]["nome_estado"], "São Paulo");
    assert_eq!(sp["geometry"]["type"], "MultiPolygon");
    assert_eq!(features[0]["id"], "0");

    for feature in features {
        for polygon in feature["geometry"]["coordinates"].as_array().unwrap() {
            for ring in polygon.as_array().unwrap() {
                for point in ring.as_array().unwrap() {
                    let (lon, lat) = (point[0].as_f64().unwrap(), point[1].as_f64().unwrap());
                    assert!((-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat));
                }
            }
        }
    }
}

#[tokio::test]
async fn test_invalid_geometry_serves_placeholder() {
    let fx = Fixture::complete();
    fx.write_map("sigla_uf,geometria\nSP,\"POLYGON ((broken\"\n");
    let app = app(&fx);

    let (status, content_type, body) = get(&app, "/api/v1/mapa_brasil").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, b"{}");
    // Tabular pages are unaffected
    let vendas = get_json(&app, "/api/v1/page1_vendas").await;
    assert_eq!(vendas["kpis"]["categoria_maior_volume"], "cama_mesa_banho");
}

#[tokio::test]
async fn test_landing_page_and_static_assets() {
    let fx = Fixture::complete();
    let app = app(&fx);

    let (status, _, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), INDEX_HTML);

    let (status, content_type, body) = get(&app, "/static/css/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/css"));
    assert_eq!(String::from_utf8(body).unwrap(), STYLE_CSS);

    let (status, _, _) = get(&app, "/static/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let fx = Fixture::complete();
    let health = get_json(&app(&fx), "/health").await;
    assert_eq!(
        health,
        json!({"status": "ok", "version": env!("CARGO_PKG_VERSION"), "degraded": []})
    );
}
