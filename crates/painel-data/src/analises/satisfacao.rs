//! Analysis 3: customer satisfaction from review scores.

use std::path::Path;

use painel_common::{format, Result};

use crate::domain::{Analysis, Domain, DomainBuilder, DomainData};
use crate::table::Table;

pub const DISTRIBUICAO_FILE: &str = "satisfacao_distribuicao_avaliacoes.csv";
pub const RANKING_COMPLETO_FILE: &str = "satisfacao_ranking_completo_categorias.csv";
pub const RANKING_MELHORES_FILE: &str = "satisfacao_ranking_10_melhores_categorias.csv";
pub const RANKING_PIORES_FILE: &str = "satisfacao_ranking_10_piores_categorias.csv";

pub struct Satisfacao;

impl Analysis for Satisfacao {
    const DOMAIN: Domain = Domain::Satisfacao;
    const SUBDIR: &'static str = "a3";
    const TABLE_KEYS: &'static [&'static str] = &[
        "distribuicao_avaliacoes",
        "ranking_completo_categorias",
        "ranking_10_melhores_categorias",
        "ranking_10_piores_categorias",
    ];

    fn load(dir: &Path) -> Result<DomainData> {
        let distribuicao = Table::from_path(&dir.join(DISTRIBUICAO_FILE))?;
        let ranking = Table::from_path(&dir.join(RANKING_COMPLETO_FILE))?;

        let percentual_5 = distribuicao.find_row("review_score", 5)?.f64("percentual")?;
        let nota_media = weighted_mean(&distribuicao, "review_score", "total_avaliacoes")?;
        // Ranking arrives best-rated first
        let melhor = ranking.first_row()?.text("categoria_produto")?;
        let pior = ranking.last_row()?.text("categoria_produto")?;

        let melhores = Table::from_path(&dir.join(RANKING_MELHORES_FILE))?;
        let piores = Table::from_path(&dir.join(RANKING_PIORES_FILE))?;

        Ok(DomainBuilder::new()
            .kpi("percentual_5_estrelas", format::percent(percentual_5))
            .kpi("nota_media_geral", format::fixed(nota_media, 2))
            .kpi("categoria_melhor_avaliacao", melhor)
            .kpi("categoria_pior_avaliacao", pior)
            .table(Self::TABLE_KEYS[0], distribuicao)
            .table(Self::TABLE_KEYS[1], ranking)
            .table(Self::TABLE_KEYS[2], melhores)
            .table(Self::TABLE_KEYS[3], piores)
            .build())
    }
}

/// `sum(value × weight) / sum(weight)`, skipping rows with a missing cell.
/// `None` when the weights sum to zero.
pub fn weighted_mean(table: &Table, value_col: &str, weight_col: &str) -> Result<Option<f64>> {
    let values = table.column_f64(value_col)?;
    let weights = table.column_f64(weight_col)?;

    let (weighted, total) = values
        .into_iter()
        .zip(weights)
        .filter_map(|(v, w)| v.zip(w))
        .fold((0.0, 0.0), |(acc, tot), (v, w)| (acc + v * w, tot + w));

    Ok((total != 0.0).then(|| weighted / total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean_of_two_extremes() {
        let csv = "review_score,total_avaliacoes,percentual\n5,10,50.0\n1,10,50.0\n";
        let t = Table::from_reader("dist", csv.as_bytes()).unwrap();
        let mean = weighted_mean(&t, "review_score", "total_avaliacoes").unwrap();
        assert_eq!(format::fixed(mean, 2), "3.00");
    }

    #[test]
    fn test_weighted_mean_uses_weights() {
        let csv = "review_score,total_avaliacoes\n5,3\n1,1\n";
        let t = Table::from_reader("dist", csv.as_bytes()).unwrap();
        assert_eq!(weighted_mean(&t, "review_score", "total_avaliacoes").unwrap(), Some(4.0));
    }

    #[test]
    fn test_weighted_mean_zero_weight_is_none() {
        let csv = "review_score,total_avaliacoes\n5,0\n";
        let t = Table::from_reader("dist", csv.as_bytes()).unwrap();
        let mean = weighted_mean(&t, "review_score", "total_avaliacoes").unwrap();
        assert_eq!(mean, None);
        assert_eq!(format::fixed(mean, 2), "N/A");
    }

    #[test]
    fn test_weighted_mean_missing_column() {
        let t = Table::from_reader("dist", "review_score\n5\n".as_bytes()).unwrap();
        assert!(weighted_mean(&t, "review_score", "total_avaliacoes").is_err());
    }
}
