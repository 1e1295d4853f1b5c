//! HTTP client for the snapshot service API

use crate::error::{Result, SnapshotError};
use crate::types::*;
use agora_contract::{Address, TokenId};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// HTTP client for the historical-balance snapshot service
pub struct SnapshotClient {
    config: SnapshotConfig,
    client: Client,
}

impl SnapshotClient {
    /// Create a new snapshot client
    pub fn new(config: SnapshotConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    /// Base-unit balance of `address` in `token` as of chain height
    /// `height`. An address the service has never seen holds zero.
    pub async fn balance_at(
        &self,
        height: u64,
        token: &TokenId,
        address: &Address,
    ) -> Result<u128> {
        let url = self.balance_url(height, token, address);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SnapshotError::NotFound(format!(
                "{}/{}@{}",
                token, address, height
            )));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SnapshotError::Server {
                status,
                message: body,
            });
        }

        let body: BalanceResponse = response.json().await?;
        parse_balance(&body)
    }

    fn balance_url(&self, height: u64, token: &TokenId, address: &Address) -> String {
        format!(
            "{}/balance/{}/{}/{}",
            self.config.base_url,
            height,
            urlencoding::encode(token.as_str()),
            urlencoding::encode(address.as_str())
        )
    }
}

fn parse_balance(body: &BalanceResponse) -> Result<u128> {
    let raw = body.balance.as_deref().unwrap_or("0");
    raw.parse::<u128>()
        .map_err(|_| SnapshotError::InvalidBalance(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_url_encodes_path_segments() {
        let client = SnapshotClient::new(SnapshotConfig {
            base_url: "http://snapshot.example".into(),
            ..Default::default()
        });
        let url = client.balance_url(
            4321,
            &TokenId::new("tti_01"),
            &Address::new("agora_voter/odd"),
        );
        assert_eq!(
            url,
            "http://snapshot.example/balance/4321/tti_01/agora_voter%2Fodd"
        );
    }

    #[test]
    fn test_missing_balance_parses_as_zero() {
        assert_eq!(parse_balance(&BalanceResponse { balance: None }).unwrap(), 0);
    }

    #[test]
    fn test_large_balance_parses_exactly() {
        let body = BalanceResponse {
            balance: Some("9999999999999999999".into()),
        };
        assert_eq!(parse_balance(&body).unwrap(), 9_999_999_999_999_999_999);
    }

    #[test]
    fn test_non_numeric_balance_rejected() {
        let body = BalanceResponse {
            balance: Some("12.5".into()),
        };
        assert!(matches!(
            parse_balance(&body),
            Err(SnapshotError::InvalidBalance(_))
        ));
    }
}
