//! Analysis 2: logistics: delays, delivery times and their effect on
//! customer satisfaction.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use painel_common::{format, Result};

use crate::domain::{Analysis, Domain, DomainBuilder, DomainData};
use crate::table::Table;

pub const PROPORCAO_ATRASOS_FILE: &str = "logistica_proporcao_atrasos.csv";
pub const ATRASO_POR_ESTADO_FILE: &str = "logistica_atraso_por_estado.csv";
pub const SATISFACAO_VS_ATRASO_FILE: &str = "logistica_satisfacao_vs_atraso.csv";
pub const FINAL_ANALYSIS_FILE: &str = "logistica_final_analysis_df.csv";
pub const ATRASO_POR_TIPO_ENTREGA_FILE: &str = "logistica_atraso_por_tipo_entrega.csv";
pub const PARETO_ATRASOS_FILE: &str = "logistica_pareto_atrasos_por_categoria.csv";
pub const SAZONALIDADE_ATRASOS_FILE: &str = "logistica_sazonalidade_atrasos.csv";
pub const IMPACTO_PAGAMENTO_FILE: &str = "logistica_impacto_metodo_pagamento.csv";

pub const STATUS_ATRASADO: &str = "Com Atraso";
pub const STATUS_NO_PRAZO: &str = "No Prazo";

const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

pub struct Logistica;

impl Analysis for Logistica {
    const DOMAIN: Domain = Domain::Logistica;
    const SUBDIR: &'static str = "a2";
    const TABLE_KEYS: &'static [&'static str] = &[
        "proporcao_atrasos",
        "atraso_por_estado",
        "satisfacao_vs_atraso",
        "atraso_por_tipo_entrega",
        "pareto_atrasos_por_categoria",
        "sazonalidade_atrasos",
        "impacto_metodo_pagamento",
    ];

    fn load(dir: &Path) -> Result<DomainData> {
        let proporcao = Table::from_path(&dir.join(PROPORCAO_ATRASOS_FILE))?;
        let por_estado = Table::from_path(&dir.join(ATRASO_POR_ESTADO_FILE))?;
        let satisfacao = Table::from_path(&dir.join(SATISFACAO_VS_ATRASO_FILE))?;
        let pedidos = Table::from_path(&dir.join(FINAL_ANALYSIS_FILE))?;

        let taxa_atraso = if proporcao.is_empty() {
            Some(0.0)
        } else {
            proporcao.find_row("status", STATUS_ATRASADO)?.f64("percentual")?
        };

        // Sorted by average delay, worst state first
        let pior_estado = por_estado.first_row()?;
        let estado_maior_atraso = format!(
            "{} ({})",
            pior_estado.text("customer_state")?,
            format::with_unit(pior_estado.f64("atraso_medio_dias")?, 1, "dias")
        );

        let nota_atraso = satisfacao
            .find_row("status_entrega", STATUS_ATRASADO)?
            .f64("nota_media_avaliacao")?;
        let nota_no_prazo = satisfacao
            .find_row("status_entrega", STATUS_NO_PRAZO)?
            .f64("nota_media_avaliacao")?;
        let queda = nota_no_prazo.zip(nota_atraso).map(|(prazo, atraso)| prazo - atraso);

        let tempo_medio = mean_delivery_days(&pedidos)?;

        let atraso_por_tipo = Table::from_path(&dir.join(ATRASO_POR_TIPO_ENTREGA_FILE))?;
        let pareto = Table::from_path(&dir.join(PARETO_ATRASOS_FILE))?;
        let sazonalidade = Table::from_path(&dir.join(SAZONALIDADE_ATRASOS_FILE))?;
        let impacto_pagamento = Table::from_path(&dir.join(IMPACTO_PAGAMENTO_FILE))?;

        Ok(DomainBuilder::new()
            .kpi("taxa_atraso_nacional", format::percent(taxa_atraso))
            .kpi("estado_maior_atraso", estado_maior_atraso)
            .kpi("queda_satisfacao_atraso", format::with_unit(queda, 2, "pontos"))
            .kpi("tempo_medio_entrega_nacional", format::with_unit(tempo_medio, 1, "dias"))
            .table(Self::TABLE_KEYS[0], proporcao)
            .table(Self::TABLE_KEYS[1], por_estado)
            .table(Self::TABLE_KEYS[2], satisfacao)
            .table(Self::TABLE_KEYS[3], atraso_por_tipo)
            .table(Self::TABLE_KEYS[4], pareto)
            .table(Self::TABLE_KEYS[5], sazonalidade)
            .table(Self::TABLE_KEYS[6], impacto_pagamento)
            .build())
    }
}

/// Parse an order timestamp. Unparseable or missing values yield `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Whole days between purchase and delivery, floored like a day count of a
/// time delta (a delivery 1.5 days after purchase counts as 1).
pub fn delivery_days(purchase: NaiveDateTime, delivered: NaiveDateTime) -> Option<i64> {
    (delivered - purchase)
        .num_nanoseconds()
        .map(|ns| ns.div_euclid(NANOS_PER_DAY))
}

/// Mean delivery time in days over the orders whose two timestamps parse.
/// `None` when no order qualifies.
pub fn mean_delivery_days(pedidos: &Table) -> Result<Option<f64>> {
    pedidos.require_columns(&["order_purchase_timestamp", "order_delivered_customer_date"])?;

    let mut total = 0.0;
    let mut count = 0usize;
    for idx in 0..pedidos.len() {
        let Some(row) = pedidos.row(idx) else { break };
        let purchase = row.str("order_purchase_timestamp")?.and_then(parse_timestamp);
        let delivered = row.str("order_delivered_customer_date")?.and_then(parse_timestamp);
        if let Some(days) = purchase.zip(delivered).and_then(|(p, d)| delivery_days(p, d)) {
            total += days as f64;
            count += 1;
        }
    }

    Ok((count > 0).then(|| total / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-10-02 10:56:33").is_some());
        assert!(parse_timestamp("2017-10-02T10:56:33.120").is_some());
        assert_eq!(ts("2017-10-02"), ts("2017-10-02 00:00:00"));
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2017-13-45 00:00:00").is_none());
    }

    #[test]
    fn test_delivery_days_floors() {
        let p = ts("2018-01-01 12:00:00");
        assert_eq!(delivery_days(p, ts("2018-01-02 23:59:59")), Some(1));
        assert_eq!(delivery_days(p, ts("2018-01-11 12:00:00")), Some(10));
        assert_eq!(delivery_days(p, ts("2018-01-01 00:00:00")), Some(-1));
    }

    #[test]
    fn test_mean_excludes_unparseable_rows() {
        let csv = "order_id,order_purchase_timestamp,order_delivered_customer_date\n\
                   a,2018-01-01 00:00:00,2018-01-11 00:00:00\n\
                   b,2018-01-01 00:00:00,\n\
                   c,garbage,2018-01-05 00:00:00\n\
                   d,2018-02-01 08:00:00,2018-02-05 20:00:00\n";
        let t = Table::from_reader("final", csv.as_bytes()).unwrap();
        // (10 + 4) / 2
        assert_eq!(mean_delivery_days(&t).unwrap(), Some(7.0));
    }

    #[test]
    fn test_mean_without_valid_rows_is_none() {
        let csv = "order_purchase_timestamp,order_delivered_customer_date\n,\n";
        let t = Table::from_reader("final", csv.as_bytes()).unwrap();
        assert_eq!(mean_delivery_days(&t).unwrap(), None);
        assert_eq!(format::with_unit(None, 1, "dias"), "N/A");
    }

    #[test]
    fn test_mean_requires_columns() {
        let t = Table::from_reader("final", "order_purchase_timestamp\n2018-01-01\n".as_bytes()).unwrap();
        assert!(mean_delivery_days(&t).is_err());
    }
}
