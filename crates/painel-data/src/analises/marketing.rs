//! Analysis 5: order conversion by state and by payment type.

use std::path::Path;

use painel_common::{format, Result};

use crate::domain::{Analysis, Domain, DomainBuilder, DomainData};
use crate::table::Table;

pub const CONVERSAO_ESTADO_FILE: &str = "marketing_conversion_by_state.csv";
pub const CONVERSAO_PAGAMENTO_FILE: &str = "marketing_conversion_by_payment_type_final.csv";
pub const ESTADOS_MAIOR_VOLUME_FILE: &str = "marketing_data_estados_maior_volume.csv";

pub struct Marketing;

impl Analysis for Marketing {
    const DOMAIN: Domain = Domain::Marketing;
    const SUBDIR: &'static str = "a5";
    const TABLE_KEYS: &'static [&'static str] = &[
        "data_estados_maior_volume",
        "conversion_by_payment_type_final",
    ];

    fn load(dir: &Path) -> Result<DomainData> {
        let por_estado = Table::from_path(&dir.join(CONVERSAO_ESTADO_FILE))?;
        let por_pagamento = Table::from_path(&dir.join(CONVERSAO_PAGAMENTO_FILE))?;

        let entregues = por_estado.sum("delivered_orders")?;
        let total = por_estado.sum("total_orders")?;
        let taxa_nacional = if total > 0.0 { entregues / total * 100.0 } else { 0.0 };

        let estado_lider = top_conversion(&por_estado, "customer_state")?;
        let pagamento_lider = top_conversion(&por_pagamento, "payment_type")?;

        let maior_volume = Table::from_path(&dir.join(ESTADOS_MAIOR_VOLUME_FILE))?;

        Ok(DomainBuilder::new()
            .kpi("taxa_conversao_media_nacional", format::percent(Some(taxa_nacional)))
            .kpi("estado_maior_conversao", estado_lider)
            .kpi("tipo_pagamento_maior_conversao", pagamento_lider)
            .table(Self::TABLE_KEYS[0], maior_volume)
            .table(Self::TABLE_KEYS[1], por_pagamento)
            .build())
    }
}

/// `"{label} ({conversion_rate:.2}%)"` for the row with the highest
/// `conversion_rate`, whatever order the table arrives in. Ties keep the
/// earliest row.
pub fn top_conversion(table: &Table, label_col: &str) -> Result<String> {
    let sorted = table.sorted_desc_by("conversion_rate")?;
    let leader = sorted.first_row()?;
    Ok(format!(
        "{} ({})",
        leader.text(label_col)?,
        format::percent(leader.f64("conversion_rate")?)
    ))
}
