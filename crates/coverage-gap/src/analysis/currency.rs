//! Dollar formatting shared by rule reasons, recommendation text, and summaries.

/// Round to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `$1,250,000` style rendering for whole-dollar amounts.
pub fn whole_dollars(amount: u64) -> String {
    format!("${}", group_thousands(&amount.to_string()))
}

/// `$3,300.00` style rendering with two decimal places.
pub fn dollars(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(&(cents / 100).to_string()),
        cents % 100
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_whole_dollars() {
        assert_eq!(whole_dollars(0), "$0");
        assert_eq!(whole_dollars(950), "$950");
        assert_eq!(whole_dollars(250_000), "$250,000");
        assert_eq!(whole_dollars(3_000_000), "$3,000,000");
    }

    #[test]
    fn renders_cents() {
        assert_eq!(dollars(3300.0), "$3,300.00");
        assert_eq!(dollars(600.004), "$600.00");
        assert_eq!(dollars(1234567.891), "$1,234,567.89");
        assert_eq!(dollars(0.0), "$0.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(400.00000000000006), 400.0);
        assert_eq!(round_cents(123.456), 123.46);
    }
}
