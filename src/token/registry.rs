use std::sync::OnceLock;

use crate::constant::*;

use super::structs::TokenSpec;

/// Tokens the vault accepts. Fixed at start-up; there is no token discovery.
pub struct TokenRegistry {
    tokens: Vec<TokenSpec>,
}

impl TokenRegistry {
    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<TokenRegistry> = OnceLock::new();
        INSTANCE.get_or_init(Self::new)
    }

    fn new() -> Self {
        Self {
            tokens: vec![
                TokenSpec::new("USDT", "USD Token", USDT_ADDRESS, 6),
                TokenSpec::new("LSK", "Lisk", LSK_ADDRESS, 18),
            ],
        }
    }

    pub fn tokens(&self) -> &[TokenSpec] {
        &self.tokens
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&TokenSpec> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol.trim()))
    }
}
