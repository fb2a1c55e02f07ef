//! Exchange-qualified ticker symbols.

/// Qualify a ticker for quote lookups
///
/// `NSE` appends `.NS`, `BSE` appends `.BO` (exchange matched
/// case-insensitively); any other exchange leaves the symbol unchanged.
pub fn exchange_symbol(symbol: &str, exchange: &str) -> String {
    if exchange.eq_ignore_ascii_case("NSE") {
        format!("{}.NS", symbol)
    } else if exchange.eq_ignore_ascii_case("BSE") {
        format!("{}.BO", symbol)
    } else {
        symbol.to_string()
    }
}
