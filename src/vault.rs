//! The vault contract and ERC-20 calls a connected wallet makes, and the
//! user-level flows built on them.
//!
//! Contract calls are issued strictly one after another; a flow never sends
//! its next call before the previous one has been confirmed.

use alloy_primitives::U256;
use async_trait::async_trait;
use tracing::instrument;

use crate::error::RouterError;
use crate::routing::Recommendation;
use crate::token::amount::{is_approved, to_base_units, to_display};
use crate::token::TokenSpec;

/// A connected wallet talking to the yield-router vault contract.
///
/// Each call resolves once the transaction is confirmed. A rejected or
/// reverted call is reported as [`RouterError::ContractCall`].
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// Address of the connected account, `None` when no wallet is connected.
    fn account(&self) -> Option<String>;

    /// Address of the vault contract, the spender of every approval.
    fn vault_address(&self) -> String;

    async fn balance_of(&self, token: &TokenSpec, owner: &str) -> Result<U256, RouterError>;

    async fn allowance(
        &self,
        token: &TokenSpec,
        owner: &str,
        spender: &str,
    ) -> Result<U256, RouterError>;

    async fn approve(&self, token: &TokenSpec, spender: &str, amount: U256)
        -> Result<(), RouterError>;

    async fn deposit(&self, amount: U256) -> Result<(), RouterError>;

    async fn withdraw_available_balance(&self, amount: U256) -> Result<(), RouterError>;

    async fn withdraw_from_protocol(&self, protocol: &str, amount: U256)
        -> Result<(), RouterError>;

    async fn invest_in_protocol(
        &self,
        protocol: &str,
        amount: U256,
        user: &str,
        contract_address: &str,
    ) -> Result<(), RouterError>;

    async fn claim_yields(&self, protocol: &str) -> Result<(), RouterError>;
}

fn connected(client: &dyn VaultClient) -> Result<String, RouterError> {
    client.account().ok_or(RouterError::WalletNotConnected)
}

fn positive_amount(token: &TokenSpec, typed: &str) -> Result<U256, RouterError> {
    let amount = to_base_units(typed, token.decimals)?;
    if amount.is_zero() {
        return Err(RouterError::invalid_amount(format!(
            "{} {} is below the smallest unit",
            typed.trim(),
            token.symbol
        )));
    }
    Ok(amount)
}

/// Whole-token balance of the connected account.
pub async fn token_balance(client: &dyn VaultClient, token: &TokenSpec) -> Result<String, RouterError> {
    let account = connected(client)?;
    let balance = client.balance_of(token, &account).await?;
    to_display(balance, token.decimals)
}

/// Deposit `typed` tokens into the vault, approving the vault first when
/// the current allowance does not cover the amount.
#[instrument(skip(client, token), fields(token = %token.symbol))]
pub async fn deposit_tokens(
    client: &dyn VaultClient,
    token: &TokenSpec,
    typed: &str,
) -> Result<U256, RouterError> {
    let account = connected(client)?;
    let amount = positive_amount(token, typed)?;
    let vault = client.vault_address();

    let allowance = client.allowance(token, &account, &vault).await?;
    if !is_approved(amount, allowance) {
        tracing::info!("Approving {} {} for the vault", typed.trim(), token.symbol);
        client.approve(token, &vault, amount).await?;
    }

    client.deposit(amount).await?;
    tracing::info!("Deposited {} {}", typed.trim(), token.symbol);
    Ok(amount)
}

/// Invest `typed` tokens in the protocol picked by the recommendation.
#[instrument(skip(client, token, recommendation), fields(protocol = %recommendation.protocol_name))]
pub async fn invest_recommended(
    client: &dyn VaultClient,
    token: &TokenSpec,
    typed: &str,
    recommendation: &Recommendation,
) -> Result<U256, RouterError> {
    let account = connected(client)?;
    let amount = positive_amount(token, typed)?;

    tracing::info!(
        "AI recommends investing in {} with expected yield of {}%",
        recommendation.protocol_name,
        recommendation.expected_yield
    );
    client
        .invest_in_protocol(
            &recommendation.protocol_name,
            amount,
            &account,
            &recommendation.contract_address,
        )
        .await?;
    Ok(amount)
}

/// Withdraw `typed` tokens from the uninvested vault balance.
pub async fn withdraw_tokens(
    client: &dyn VaultClient,
    token: &TokenSpec,
    typed: &str,
) -> Result<U256, RouterError> {
    connected(client)?;
    let amount = positive_amount(token, typed)?;
    client.withdraw_available_balance(amount).await?;
    Ok(amount)
}

pub async fn withdraw_from_protocol(
    client: &dyn VaultClient,
    token: &TokenSpec,
    protocol: &str,
    typed: &str,
) -> Result<U256, RouterError> {
    connected(client)?;
    let amount = positive_amount(token, typed)?;
    client.withdraw_from_protocol(protocol, amount).await?;
    Ok(amount)
}

pub async fn claim_yields(client: &dyn VaultClient, protocol: &str) -> Result<(), RouterError> {
    connected(client)?;
    client.claim_yields(protocol).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::candidates::RiskLevel;
    use crate::token::amount::MAX_APPROVAL;
    use crate::token::TokenRegistry;

    use std::sync::Mutex;

    const USER: &str = "0x00000000000000000000000000000000000000aa";
    const VAULT: &str = "0x00000000000000000000000000000000000000bb";

    /// Records every call in order.
    struct RecordingVault {
        account: Option<String>,
        allowance: U256,
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingVault {
        fn connected(allowance: U256) -> Self {
            Self {
                account: Some(USER.to_string()),
                allowance,
                fail_on: None,
                calls: Mutex::new(vec![]),
            }
        }

        fn disconnected() -> Self {
            Self {
                account: None,
                ..Self::connected(U256::ZERO)
            }
        }

        fn record(&self, call: &'static str, detail: String) -> Result<(), RouterError> {
            self.calls.lock().unwrap().push(format!("{call}:{detail}"));
            if self.fail_on == Some(call) {
                return Err(RouterError::ContractCall {
                    call,
                    reason: "execution reverted".into(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VaultClient for RecordingVault {
        fn account(&self) -> Option<String> {
            self.account.clone()
        }

        fn vault_address(&self) -> String {
            VAULT.to_string()
        }

        async fn balance_of(&self, token: &TokenSpec, owner: &str) -> Result<U256, RouterError> {
            self.record("balanceOf", format!("{}:{}", token.symbol, owner))?;
            Ok(U256::from(2_750_000u64))
        }

        async fn allowance(
            &self,
            token: &TokenSpec,
            owner: &str,
            spender: &str,
        ) -> Result<U256, RouterError> {
            self.record("allowance", format!("{}:{}:{}", token.symbol, owner, spender))?;
            Ok(self.allowance)
        }

        async fn approve(
            &self,
            token: &TokenSpec,
            spender: &str,
            amount: U256,
        ) -> Result<(), RouterError> {
            self.record("approve", format!("{}:{}:{}", token.symbol, spender, amount))
        }

        async fn deposit(&self, amount: U256) -> Result<(), RouterError> {
            self.record("deposit", amount.to_string())
        }

        async fn withdraw_available_balance(&self, amount: U256) -> Result<(), RouterError> {
            self.record("withdrawAvailableBalance", amount.to_string())
        }

        async fn withdraw_from_protocol(
            &self,
            protocol: &str,
            amount: U256,
        ) -> Result<(), RouterError> {
            self.record("withdrawFromProtocol", format!("{protocol}:{amount}"))
        }

        async fn invest_in_protocol(
            &self,
            protocol: &str,
            amount: U256,
            user: &str,
            contract_address: &str,
        ) -> Result<(), RouterError> {
            self.record(
                "investInProtocol",
                format!("{protocol}:{amount}:{user}:{contract_address}"),
            )
        }

        async fn claim_yields(&self, protocol: &str) -> Result<(), RouterError> {
            self.record("claimYields", protocol.to_string())
        }
    }

    fn usdt() -> &'static TokenSpec {
        TokenRegistry::get().by_symbol("usdt").unwrap()
    }

    fn recommendation() -> Recommendation {
        Recommendation {
            protocol_name: "Curve Finance".into(),
            contract_address: "0xD533a949740bb3306d119CC777fa900bA034cd52".into(),
            expected_yield: 6.5,
            risk_level: RiskLevel::Low,
            reasoning: "Deep liquidity".into(),
            confidence: 80,
            degraded: false,
        }
    }

    #[tokio::test]
    async fn test_deposit_approves_then_deposits() {
        crate::setup_env_and_tracing();

        let vault = RecordingVault::connected(U256::from(100u64));
        let amount = deposit_tokens(&vault, usdt(), "1.5").await.unwrap();

        assert_eq!(amount, U256::from(1_500_000u64));
        assert_eq!(
            vault.calls(),
            vec![
                format!("allowance:USDT:{USER}:{VAULT}"),
                format!("approve:USDT:{VAULT}:1500000"),
                "deposit:1500000".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_deposit_eighteen_decimal_token() {
        crate::setup_env_and_tracing();

        let lsk = TokenRegistry::get().by_symbol("LSK").unwrap();
        let vault = RecordingVault::connected(U256::from(1_000_000_000_000_000_000u64));
        let amount = deposit_tokens(&vault, lsk, " 2.5 ").await.unwrap();

        assert_eq!(amount, U256::from(2_500_000_000_000_000_000u64));
        assert_eq!(
            vault.calls(),
            vec![
                format!("allowance:LSK:{USER}:{VAULT}"),
                format!("approve:LSK:{VAULT}:2500000000000000000"),
                "deposit:2500000000000000000".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_deposit_skips_approval_when_allowance_covers_amount() {
        let vault = RecordingVault::connected(MAX_APPROVAL);
        deposit_tokens(&vault, usdt(), "1.5").await.unwrap();

        assert_eq!(
            vault.calls(),
            vec![
                format!("allowance:USDT:{USER}:{VAULT}"),
                "deposit:1500000".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_deposit_stops_when_approval_fails() {
        let vault = RecordingVault {
            fail_on: Some("approve"),
            ..RecordingVault::connected(U256::ZERO)
        };
        let err = deposit_tokens(&vault, usdt(), "2").await.unwrap_err();

        assert!(matches!(err, RouterError::ContractCall { call: "approve", .. }));
        assert!(!vault.calls().iter().any(|c| c.starts_with("deposit")));
    }

    #[tokio::test]
    async fn test_flows_require_connected_wallet() {
        let vault = RecordingVault::disconnected();

        assert_eq!(
            deposit_tokens(&vault, usdt(), "1").await,
            Err(RouterError::WalletNotConnected)
        );
        assert_eq!(
            withdraw_tokens(&vault, usdt(), "1").await,
            Err(RouterError::WalletNotConnected)
        );
        assert_eq!(
            invest_recommended(&vault, usdt(), "1", &recommendation()).await,
            Err(RouterError::WalletNotConnected)
        );
        assert_eq!(
            claim_yields(&vault, "Aave").await,
            Err(RouterError::WalletNotConnected)
        );
        assert!(vault.calls().is_empty());
    }

    #[tokio::test]
    async fn test_flows_reject_zero_and_malformed_amounts() {
        let vault = RecordingVault::connected(MAX_APPROVAL);

        for typed in ["0", "0.0000001", "abc", ""] {
            assert!(
                matches!(
                    deposit_tokens(&vault, usdt(), typed).await,
                    Err(RouterError::InvalidAmount(_))
                ),
                "{typed:?}"
            );
        }
        assert!(matches!(
            withdraw_from_protocol(&vault, usdt(), "Aave", "0").await,
            Err(RouterError::InvalidAmount(_))
        ));
        assert!(vault.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invest_recommended() {
        let vault = RecordingVault::connected(U256::ZERO);
        let amount = invest_recommended(&vault, usdt(), "10", &recommendation())
            .await
            .unwrap();

        assert_eq!(amount, U256::from(10_000_000u64));
        assert_eq!(
            vault.calls(),
            vec![format!(
                "investInProtocol:Curve Finance:10000000:{USER}:0xD533a949740bb3306d119CC777fa900bA034cd52"
            )]
        );
    }

    #[tokio::test]
    async fn test_withdraw_and_claim() {
        let vault = RecordingVault::connected(U256::ZERO);
        withdraw_tokens(&vault, usdt(), "0.25").await.unwrap();
        withdraw_from_protocol(&vault, usdt(), "Aave", "3").await.unwrap();
        claim_yields(&vault, "Aave").await.unwrap();

        assert_eq!(
            vault.calls(),
            vec![
                "withdrawAvailableBalance:250000".to_string(),
                "withdrawFromProtocol:Aave:3000000".to_string(),
                "claimYields:Aave".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_token_balance_truncates_to_whole_tokens() {
        let vault = RecordingVault::connected(U256::ZERO);
        assert_eq!(token_balance(&vault, usdt()).await.unwrap(), "2");
    }
}
