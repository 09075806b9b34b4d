//! 各圖表標籤共用的數值格式化

pub const CURRENCY_MARKER: &str = "SR";

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;

/// 以十億 (B) 或百萬 (M) 表示，保留兩位小數
///
/// 小於一百萬的值仍以百萬表示（`SR 0.25M`）。
pub fn format_value(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if value >= BILLION {
        format!("{} {:.2}B", CURRENCY_MARKER, value / BILLION)
    } else {
        format!("{} {:.2}M", CURRENCY_MARKER, value / MILLION)
    }
}

pub fn format_percentage(pct: f64) -> String {
    let pct = if pct.is_finite() { pct } else { 0.0 };
    format!("{:.1}%", pct)
}

/// 長條圖數值：一百萬以上用 B/M，以下以千分位顯示整數
pub fn format_compact(value: f64) -> String {
    if value >= BILLION {
        format!("{:.2}B", value / BILLION)
    } else if value >= MILLION {
        format!("{:.2}M", value / MILLION)
    } else {
        group_thousands(value)
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// 截斷至 `max_chars` 個字元，截斷時以 "..." 結尾
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_tiers() {
        assert_eq!(format_value(2_500_000_000.0), "SR 2.50B");
        assert_eq!(format_value(1_000_000_000.0), "SR 1.00B");
        assert_eq!(format_value(12_340_000.0), "SR 12.34M");
        assert_eq!(format_value(250_000.0), "SR 0.25M");
        assert_eq!(format_value(0.0), "SR 0.00M");
    }

    #[test]
    fn test_format_value_non_finite() {
        assert_eq!(format_value(f64::NAN), "SR 0.00M");
        assert_eq!(format_value(f64::INFINITY), "SR 0.00M");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(3_200_000_000.0), "3.20B");
        assert_eq!(format_compact(4_560_000.0), "4.56M");
        assert_eq!(format_compact(999_999.4), "999,999");
        assert_eq!(format_compact(1_234.0), "1,234");
        assert_eq!(format_compact(12.0), "12");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Crude oil", 40), "Crude oil");
        let long = "Parts and accessories of motor vehicles for transport";
        let cut = truncate_label(long, 40);
        assert_eq!(cut.chars().count(), 40);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..37], &long[..37]);
    }

    #[test]
    fn test_truncate_label_multibyte() {
        let name = "é".repeat(35);
        let cut = truncate_label(&name, 30);
        assert_eq!(cut.chars().count(), 30);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.345), "12.3%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
    }
}
