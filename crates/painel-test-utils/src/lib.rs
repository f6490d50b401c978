//! Shared test fixtures for the Painel workspace.
//!
//! [`Fixture::complete`] writes a small but coherent copy of every CSV the
//! dashboard reads, plus a 27-state map and a landing page, into a temporary
//! directory:
//!
//! ```text
//! <root>/data/a1..a5/*.csv
//! <root>/data_uf/br_geobr_mapas_uf.csv
//! <root>/frontend/index.html
//! <root>/frontend/css/style.css
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use painel_common::estados::ESTADOS;
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!DOCTYPE html>\n<html><head><title>Painel</title></head><body>painel</body></html>\n";
pub const STYLE_CSS: &str = "body { margin: 0; }\n";

/// Files of every analysis, relative to the data directory.
pub const DATA_FILES: &[(&str, &str)] = &[
    // a1: vendas
    ("a1/ranking_geral_categorias.csv", "\
product_category_name,total_vendas
cama_mesa_banho,3000
beleza_saude,2500
esporte_lazer,2000
moveis_decoracao,1500
informatica_acessorios,1200
utilidades_domesticas,1000
relogios_presentes,900
telefonia,700
ferramentas_jardim,400
automotivo,300
"),
    ("a1/analise_pareto_vendas.csv", "\
product_category_name,total_vendas,percentual,percentual_acumulado
cama_mesa_banho,3000,15.0,15.0
beleza_saude,2500,10.0,25.0
esporte_lazer,2000,9.0,34.0
moveis_decoracao,1500,8.0,42.0
informatica_acessorios,1200,7.0,49.0
utilidades_domesticas,1000,5.5,54.5
relogios_presentes,900,4.5,59.0
telefonia,700,3.5,62.5
ferramentas_jardim,400,3.0,65.5
automotivo,300,2.5,68.0
"),
    ("a1/sazonalidade_mensal_principais_categorias.csv", "\
ano_mes,product_category_name,total_vendas
2017-11,cama_mesa_banho,420
2017-11,beleza_saude,380
2017-12,cama_mesa_banho,310
2017-12,beleza_saude,290
"),
    ("a1/sazonalidade_trimestral_principais_categorias.csv", "\
trimestre,product_category_name,total_vendas
2017Q4,cama_mesa_banho,1030
2017Q4,beleza_saude,960
"),
    // a2: logistica
    ("a2/logistica_proporcao_atrasos.csv", "\
status,total_pedidos,percentual
No Prazo,88644,91.89
Com Atraso,7826,8.11
"),
    ("a2/logistica_atraso_por_estado.csv", "\
customer_state,atraso_medio_dias,total_pedidos_atrasados
AL,8.5,95
MA,7.25,110
SP,3.0,2400
"),
    ("a2/logistica_satisfacao_vs_atraso.csv", "\
status_entrega,nota_media_avaliacao
No Prazo,4.25
Com Atraso,2.50
"),
    ("a2/logistica_final_analysis_df.csv", "\
order_id,order_purchase_timestamp,order_delivered_customer_date
o1,2017-10-02 10:56:33,2017-10-12 11:00:00
o2,2018-07-24 20:41:37,2018-07-28 22:00:00
o3,2018-08-08 08:38:49,
o4,invalid,2018-08-17 18:06:29
"),
    ("a2/logistica_atraso_por_tipo_entrega.csv", "\
tipo_entrega,percentual_atraso
Mesmo Estado,5.2
Outro Estado,9.8
"),
    ("a2/logistica_pareto_atrasos_por_categoria.csv", "\
product_category_name,total_atrasos,percentual_acumulado
cama_mesa_banho,800,20.0
beleza_saude,600,35.0
"),
    ("a2/logistica_sazonalidade_atrasos.csv", "\
ano_mes,percentual_atraso
2018-02,15.9
2018-03,21.4
"),
    ("a2/logistica_impacto_metodo_pagamento.csv", "\
payment_type,percentual_atraso
boleto,7.9
credit_card,8.2
"),
    // a3: satisfacao
    ("a3/satisfacao_distribuicao_avaliacoes.csv", "\
review_score,total_avaliacoes,percentual
5,52,57.78
4,10,11.11
3,12,13.33
2,8,8.89
1,8,8.89
"),
    ("a3/satisfacao_ranking_completo_categorias.csv", "\
categoria_produto,nota_media,total_avaliacoes
livros_interesse_geral,4.45,549
construcao_ferramentas,4.44,96
cama_mesa_banho,3.90,11137
seguros_e_servicos,2.50,2
"),
    ("a3/satisfacao_ranking_10_melhores_categorias.csv", "\
categoria_produto,nota_media
livros_interesse_geral,4.45
construcao_ferramentas,4.44
"),
    ("a3/satisfacao_ranking_10_piores_categorias.csv", "\
categoria_produto,nota_media
cama_mesa_banho,3.90
seguros_e_servicos,2.50
"),
    // a4: financeiro
    ("a4/financeiro_lucratividade_por_categoria.csv", "\
categoria,receita_bruta,custo_frete,receita_liquida_pos_frete
beleza_saude,1000000.25,200000.05,800000.20
relogios_presentes,250000.25,50000.05,200000.20
"),
    ("a4/financeiro_pareto_receita_pos_frete.csv", "\
categoria,receita_liquida_pos_frete,percentual_acumulado
beleza_saude,800000.20,40.0
relogios_presentes,200000.20,65.0
cama_mesa_banho,150000.00,79.5
"),
    ("a4/financeiro_receita_bruta_para_histograma.csv", "\
receita_bruta
49.9
129.9
89.0
"),
    ("a4/financeiro_receita_bruta_quartis_limiar.csv", "\
quartil,limiar
Q1,39.9
Q2,74.9
Q3,134.9
"),
    ("a4/financeiro_composicao_receita_maior_impacto.csv", "\
categoria,receita_liquida_pos_frete,custo_frete
beleza_saude,800000.20,200000.05
"),
    ("a4/financeiro_maiores_margens_categorias.csv", "\
categoria,margem_percentual
relogios_presentes,80.0
beleza_saude,80.0
"),
    // a5: marketing
    ("a5/marketing_conversion_by_state.csv", "\
customer_state,total_orders,delivered_orders,conversion_rate
SP,600,570,95.0
RJ,300,280,93.33
RR,100,100,100.0
"),
    ("a5/marketing_conversion_by_payment_type_final.csv", "\
payment_type,total_orders,delivered_orders,conversion_rate
credit_card,760,739,97.2
boleto,200,195,97.5
voucher,25,24,96.8
debit_card,15,14,97.1
"),
    ("a5/marketing_data_estados_maior_volume.csv", "\
customer_state,total_orders,conversion_rate
SP,600,95.0
RJ,300,93.33
"),
];

/// A temporary dashboard data tree, removed on drop.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Empty tree: the directories exist but hold no files.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let fixture = Self { dir };
        for sub in ["a1", "a2", "a3", "a4", "a5"] {
            fs::create_dir_all(fixture.data_dir().join(sub)).expect("create data subdir");
        }
        fs::create_dir_all(fixture.map_dir()).expect("create map dir");
        fs::create_dir_all(fixture.frontend_dir().join("css")).expect("create frontend dir");
        fixture
    }

    /// Every analysis file, the 27-state map and the frontend.
    pub fn complete() -> Self {
        let fixture = Self::empty();
        for (path, contents) in DATA_FILES {
            fixture.write(path, contents);
        }
        fixture.write_map(&state_map_csv());
        fs::write(fixture.frontend_dir().join("index.html"), INDEX_HTML).expect("write index.html");
        fs::write(fixture.frontend_dir().join("css/style.css"), STYLE_CSS).expect("write style.css");
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn map_dir(&self) -> PathBuf {
        self.root().join("data_uf")
    }

    pub fn frontend_dir(&self) -> PathBuf {
        self.root().join("frontend")
    }

    /// Overwrite a file relative to the data directory, e.g. `a1/x.csv`.
    pub fn write(&self, rel: &str, contents: &str) {
        fs::write(self.data_dir().join(rel), contents).expect("write fixture file");
    }

    /// Delete a file relative to the data directory.
    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.data_dir().join(rel)).expect("remove fixture file");
    }

    pub fn write_map(&self, contents: &str) {
        fs::write(self.map_dir().join("br_geobr_mapas_uf.csv"), contents).expect("write map file");
    }
}

/// WKT for an axis-aligned square in degrees.
pub fn square_wkt(lon: f64, lat: f64, size: f64) -> String {
    format!(
        "POLYGON (({x} {y}, {x2} {y}, {x2} {y2}, {x} {y2}, {x} {y}))",
        x = lon,
        y = lat,
        x2 = lon + size,
        y2 = lat + size
    )
}

/// Map CSV with one square per state laid out on a grid over Brazil. Every
/// third state is split into two adjacent halves on separate rows.
pub fn state_map_csv() -> String {
    let mut csv = String::from("ano,sigla_uf,geometria\n");
    for (i, (sigla, _)) in ESTADOS.iter().enumerate() {
        let lon = -73.0 + (i % 9) as f64 * 4.0;
        let lat = -32.0 + (i / 9) as f64 * 12.0;
        if i % 3 == 0 {
            csv.push_str(&format!("2020,{},\"{}\"\n", sigla, square_wkt(lon, lat, 1.0)));
            csv.push_str(&format!("2020,{},\"{}\"\n", sigla, square_wkt(lon + 1.0, lat, 1.0)));
        } else {
            csv.push_str(&format!("2020,{},\"{}\"\n", sigla, square_wkt(lon, lat, 2.0)));
        }
    }
    csv
}
