//! Analysis 4: revenue, freight impact and margins per category.

use std::path::Path;

use painel_common::{format, Result};

use crate::domain::{Analysis, Domain, DomainBuilder, DomainData};
use crate::table::Table;

pub const LUCRATIVIDADE_FILE: &str = "financeiro_lucratividade_por_categoria.csv";
pub const PARETO_RECEITA_FILE: &str = "financeiro_pareto_receita_pos_frete.csv";
pub const HISTOGRAMA_FILE: &str = "financeiro_receita_bruta_para_histograma.csv";
pub const QUARTIS_FILE: &str = "financeiro_receita_bruta_quartis_limiar.csv";
pub const COMPOSICAO_FILE: &str = "financeiro_composicao_receita_maior_impacto.csv";
pub const MAIORES_MARGENS_FILE: &str = "financeiro_maiores_margens_categorias.csv";

pub struct Financeiro;

impl Analysis for Financeiro {
    const DOMAIN: Domain = Domain::Financeiro;
    const SUBDIR: &'static str = "a4";
    const TABLE_KEYS: &'static [&'static str] = &[
        "pareto_receita_pos_frete",
        "receita_bruta_para_histograma",
        "receita_bruta_quartis_limiar",
        "composicao_receita_maior_impacto",
        "maiores_margens_categorias",
    ];

    fn load(dir: &Path) -> Result<DomainData> {
        let lucratividade = Table::from_path(&dir.join(LUCRATIVIDADE_FILE))?;
        let pareto = Table::from_path(&dir.join(PARETO_RECEITA_FILE))?;

        let receita_bruta = lucratividade.sum("receita_bruta")?;
        let receita_liquida = lucratividade.sum("receita_liquida_pos_frete")?;
        let margem = margin_percent(receita_liquida, receita_bruta);
        // The pareto file holds only the categories covering 80% of revenue
        let num_categorias = pareto.len();

        let histograma = Table::from_path(&dir.join(HISTOGRAMA_FILE))?;
        let quartis = Table::from_path(&dir.join(QUARTIS_FILE))?;
        let composicao = Table::from_path(&dir.join(COMPOSICAO_FILE))?;
        let maiores_margens = Table::from_path(&dir.join(MAIORES_MARGENS_FILE))?;

        Ok(DomainBuilder::new()
            .kpi("receita_bruta_total", format::currency(receita_bruta))
            .kpi("receita_liquida_total_pos_frete", format::currency(receita_liquida))
            .kpi("margem_media_pos_frete", format::percent(Some(margem)))
            .kpi("num_categorias_80_receita", format!("{} Categorias", num_categorias))
            .table(Self::TABLE_KEYS[0], pareto)
            .table(Self::TABLE_KEYS[1], histograma)
            .table(Self::TABLE_KEYS[2], quartis)
            .table(Self::TABLE_KEYS[3], composicao)
            .table(Self::TABLE_KEYS[4], maiores_margens)
            .build())
    }
}

/// Net over gross revenue as a percentage; 0 when gross revenue is not
/// positive.
pub fn margin_percent(net: f64, gross: f64) -> f64 {
    if gross > 0.0 {
        net / gross * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin() {
        assert_eq!(format::percent(Some(margin_percent(75.0, 100.0))), "75.00%");
        assert_eq!(format::percent(Some(margin_percent(1.0, 3.0))), "33.33%");
    }

    #[test]
    fn test_margin_with_zero_gross_is_zero() {
        assert_eq!(margin_percent(10.0, 0.0), 0.0);
        assert_eq!(format::percent(Some(margin_percent(0.0, 0.0))), "0.00%");
    }

    #[test]
    fn test_margin_from_summed_columns() {
        let csv = "categoria,receita_bruta,receita_liquida_pos_frete\na,0,0\nb,0,0\n";
        let t = Table::from_reader("lucro", csv.as_bytes()).unwrap();
        let margem = margin_percent(
            t.sum("receita_liquida_pos_frete").unwrap(),
            t.sum("receita_bruta").unwrap(),
        );
        assert_eq!(format::percent(Some(margem)), "0.00%");
    }
}
