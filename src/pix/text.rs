//! Reduces free text (merchant name, city) to the `[A-Z0-9 ]` alphabet payloads allow.

pub const MERCHANT_NAME_MAX: usize = 25;
pub const MERCHANT_CITY_MAX: usize = 15;

/// Base letter for the accented characters Portuguese uses.
fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' | 'Ç' => 'C',
        'ñ' | 'Ñ' => 'N',
        other => other.to_ascii_uppercase(),
    }
}

/// Transliterates, upper-cases, drops everything outside `[A-Z0-9 ]`, trims, and keeps
/// at most `max_len` characters with no space left at the end.
pub fn sanitize(input: &str, max_len: usize) -> String {
    let cleaned: String = input
        .chars()
        .map(fold)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    let truncated: String = cleaned.trim().chars().take(max_len).collect();
    truncated.trim_end().to_string()
}

pub fn merchant_name(input: &str) -> String {
    sanitize(input, MERCHANT_NAME_MAX)
}

pub fn merchant_city(input: &str) -> String {
    sanitize(input, MERCHANT_CITY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_diacritics_and_cedilla() {
        assert_eq!(merchant_name("Açaí da Conceição"), "ACAI DA CONCEICAO");
        assert_eq!(merchant_city("São Paulo"), "SAO PAULO");
    }

    #[test]
    fn test_drops_symbols_and_trims() {
        assert_eq!(merchant_name("  Loja & Cia. Ltda!  "), "LOJA  CIA LTDA");
    }

    #[test]
    fn test_truncates() {
        assert_eq!(merchant_city("Ribeirão Preto do Norte"), "RIBEIRAO PRETO");
        assert_eq!(merchant_name(&"x".repeat(40)).len(), MERCHANT_NAME_MAX);
    }
}
