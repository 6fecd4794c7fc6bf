/// # Token Amounts
///
/// Amounts handed to the wallet layer are `U256` base units, the smallest
/// indivisible unit of a token (wei for 18-decimal tokens). A base-unit amount
/// only has meaning together with the `decimals` of the token it was derived
/// from; never reuse one across tokens without converting again.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TokenSpec {
    pub symbol: String,
    pub name: String,
    pub address: String, // e.g. 0x8a21CF9Ba08Ae709D64Cb25AfAA951183EC9FF6D
    pub decimals: u8,    // e.g. 18
}

impl TokenSpec {
    pub fn new(symbol: &str, name: &str, address: &str, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            decimals,
        }
    }
}

impl std::fmt::Display for TokenSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TokenSpec {{ symbol: {}, name: {}, address: {}, decimals: {} }}",
            self.symbol, self.name, self.address, self.decimals
        )
    }
}
