//! Utils - Formattazione di durate, importi e foto

use base64::{Engine as _, engine::general_purpose::STANDARD};

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

fn unit(value: u32, singular: &str, plural: &str) -> Option<String> {
    match value {
        0 => None,
        1 => Some(format!("1 {}", singular)),
        n => Some(format!("{} {}", n, plural)),
    }
}

/// Durata in giorni, ore e minuti, in portoghese.
///
/// Le unità a zero vengono omesse: `90` diventa "1 hora, 30 minutos", `0` la stringa vuota.
pub fn convert_minutes(minutes: u32) -> String {
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let rest = minutes % MINUTES_PER_HOUR;

    [
        unit(days, "dia", "dias"),
        unit(hours, "hora", "horas"),
        unit(rest, "minuto", "minutos"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}

/// Importo in Kwanza senza decimali, migliaia separate da "." e simbolo in coda
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} Kz", sign, grouped)
}

/// Codifica una foto come data URL da inviare nel campo `photo`
pub fn encode_photo(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_minutes() {
        assert_eq!(convert_minutes(0), "");
        assert_eq!(convert_minutes(1), "1 minuto");
        assert_eq!(convert_minutes(45), "45 minutos");
        assert_eq!(convert_minutes(60), "1 hora");
        assert_eq!(convert_minutes(90), "1 hora, 30 minutos");
        assert_eq!(convert_minutes(150), "2 horas, 30 minutos");
        assert_eq!(convert_minutes(2 * 1440 + 1), "2 dias, 1 minuto");
        assert_eq!(convert_minutes(1440 + 60), "1 dia, 1 hora");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0 Kz");
        assert_eq!(format_currency(200), "200 Kz");
        assert_eq!(format_currency(1500), "1.500 Kz");
        assert_eq!(format_currency(1234567), "1.234.567 Kz");
        assert_eq!(format_currency(-2500), "-2.500 Kz");
    }

    #[test]
    fn test_encode_photo() {
        assert_eq!(encode_photo(b"abc", "image/png"), "data:image/png;base64,YWJj");
    }
}
