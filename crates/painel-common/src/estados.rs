//! Brazilian federative units: code → display name.

/// The 27 state codes with their display names, sorted by code.
pub const ESTADOS: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AM", "Amazonas"),
    ("AP", "Amapá"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MG", "Minas Gerais"),
    ("MS", "Mato Grosso do Sul"),
    ("MT", "Mato Grosso"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("PR", "Paraná"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("RS", "Rio Grande do Sul"),
    ("SC", "Santa Catarina"),
    ("SE", "Sergipe"),
    ("SP", "São Paulo"),
    ("TO", "Tocantins"),
];

/// Look up the display name for a state code. Codes are matched exactly.
pub fn nome_estado(sigla: &str) -> Option<&'static str> {
    ESTADOS
        .binary_search_by(|(code, _)| (*code).cmp(sigla))
        .ok()
        .map(|idx| ESTADOS[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in ESTADOS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} must sort before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(nome_estado("SP"), Some("São Paulo"));
        assert_eq!(nome_estado("DF"), Some("Distrito Federal"));
        assert_eq!(nome_estado("TO"), Some("Tocantins"));
        assert_eq!(nome_estado("sp"), None);
        assert_eq!(nome_estado("XX"), None);
    }
}
