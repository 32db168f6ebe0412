/// Format an amount with thousands separators: 1,234,567 or -1,234.50.
/// Whole amounts print without decimals.
pub fn amount(val: f64) -> String {
    let fixed = format!("{:.2}", val.abs());
    let negative = val < 0.0 && fixed != "0.00";
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();
    let sign = if negative { "-" } else { "" };

    if dec_part == "00" {
        format!("{sign}{with_commas}")
    } else {
        format!("{sign}{with_commas}.{dec_part}")
    }
}
