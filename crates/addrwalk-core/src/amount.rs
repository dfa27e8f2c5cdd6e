//! Coin-denominated formatting of base-unit amounts.

use bitcoin::{Amount, Denomination};

/// Render a satoshi amount as a coin-denominated decimal string.
///
/// Trailing fractional zeros are trimmed and a whole value has no decimal
/// point, so 150 000 000 sat renders as `"1.5"`.
pub fn format_coins(amount: Amount) -> String {
    amount.to_string_in(Denomination::Bitcoin)
}
