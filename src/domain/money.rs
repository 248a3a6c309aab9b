/// Amounts are integers in the smallest currency unit (e.g. cents).
/// Zero and negative values are valid ledger entries.
pub type Cents = i64;

/// Format an amount of cents for display.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    // unsigned_abs keeps i64::MIN representable
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
