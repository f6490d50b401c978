//! Analysis 1: sales performance by product category.

use std::path::Path;

use painel_common::{format, Result, NA};

use crate::domain::{Analysis, Domain, DomainBuilder, DomainData};
use crate::table::Table;

pub const RANKING_FILE: &str = "ranking_geral_categorias.csv";
pub const PARETO_FILE: &str = "analise_pareto_vendas.csv";
pub const SAZONALIDADE_MENSAL_FILE: &str = "sazonalidade_mensal_principais_categorias.csv";
pub const SAZONALIDADE_TRIMESTRAL_FILE: &str = "sazonalidade_trimestral_principais_categorias.csv";

/// Row of the pareto table whose cumulative share is reported.
pub const PARETO_TOP_N: usize = 8;

pub struct Vendas;

impl Analysis for Vendas {
    const DOMAIN: Domain = Domain::Vendas;
    const SUBDIR: &'static str = "a1";
    const TABLE_KEYS: &'static [&'static str] = &[
        "ranking_geral_categorias",
        "pareto_analise_vendas",
        "sazonalidade_mensal_principais",
        "sazonalidade_trimestral_principais",
    ];

    fn load(dir: &Path) -> Result<DomainData> {
        let ranking = Table::from_path(&dir.join(RANKING_FILE))?;
        let pareto = Table::from_path(&dir.join(PARETO_FILE))?;
        let mensal = Table::from_path(&dir.join(SAZONALIDADE_MENSAL_FILE))?;
        let trimestral = Table::from_path(&dir.join(SAZONALIDADE_TRIMESTRAL_FILE))?;

        let total_vendas = ranking.sum("total_vendas")?;
        // Ranking arrives sorted by volume
        let categoria_maior_volume = match ranking.row(0) {
            Some(row) => row.text("product_category_name")?,
            None => NA.to_string(),
        };
        let percentual_top = cumulative_share_at(&pareto, PARETO_TOP_N)?;

        Ok(DomainBuilder::new()
            .kpi("total_geral_vendas", format!("{} Pedidos", format::thousands(total_vendas, 0)))
            .kpi("categoria_maior_volume", categoria_maior_volume)
            .kpi("percentual_8_categorias_principais", percentual_top)
            .table(Self::TABLE_KEYS[0], ranking)
            .table(Self::TABLE_KEYS[1], pareto)
            .table(Self::TABLE_KEYS[2], mensal)
            .table(Self::TABLE_KEYS[3], trimestral)
            .build())
    }
}

/// `percentual_acumulado` of the `n`-th row (1-based) of a pre-sorted pareto
/// table, as `"{:.2}%"`. `N/A` when the table is shorter than `n` or the
/// cell is not a number.
pub fn cumulative_share_at(pareto: &Table, n: usize) -> Result<String> {
    pareto.require_columns(&["percentual_acumulado"])?;
    let Some(row) = n.checked_sub(1).and_then(|idx| pareto.row(idx)) else {
        return Ok(NA.to_string());
    };
    Ok(match row.get("percentual_acumulado")?.as_f64() {
        Some(value) => format::percent(Some(value)),
        None => NA.to_string(),
    })
}
