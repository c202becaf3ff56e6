//! REST/GraphQL clients for the market data sources

use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::messages::{FarmsData, GraphQlRequest, GraphQlResponse, SimplePriceResponse, FARMS_QUERY};
use crate::common::errors::{ClientError, Result};
use crate::common::traits::{EgldPriceFetcher, MexEconomicsFetcher, StakingProvidersFetcher};
use crate::common::types::{backfill_identities, MexEconomics, StakingProvider};
use crate::config::types::FetcherConfig;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Internal(e.to_string()))
}

/// Turn a non-2xx response into an error naming the endpoint
fn ensure_success(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        error!("{} returned status {}", endpoint, status);
        Err(ClientError::InvalidResponse(format!(
            "{} returned status: {}",
            endpoint, status
        )))
    }
}

/// EGLD price from the CoinGecko simple price API
#[derive(Debug, Clone)]
pub struct CoingeckoPriceFetcher {
    client: Client,
    endpoint: String,
    coin_id: String,
    currency: String,
}

impl CoingeckoPriceFetcher {
    /// Create a fetcher for EGLD priced in USD
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_options(endpoint, "elrond-erd-2", "usd", DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom coin id, quote currency and timeout
    pub fn with_options(endpoint: &str, coin_id: &str, currency: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.to_string(),
            coin_id: coin_id.to_string(),
            currency: currency.to_lowercase(),
        })
    }
}

#[async_trait]
impl EgldPriceFetcher for CoingeckoPriceFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_egld_price(&self) -> Result<Decimal> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("ids", self.coin_id.as_str()), ("vs_currencies", self.currency.as_str())])
            .send()
            .await?;
        let response = ensure_success(response, &self.endpoint)?;

        let prices: SimplePriceResponse = response.json().await?;
        let price = prices
            .get(&self.coin_id)
            .and_then(|quotes| quotes.get(&self.currency))
            .copied()
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!(
                    "no {} price for {} in response",
                    self.currency, self.coin_id
                ))
            })?;

        debug!(%price, "Fetched EGLD price");
        Ok(price)
    }
}

/// MEX price and farm APRs from the Maiar exchange GraphQL API
#[derive(Debug, Clone)]
pub struct MaiarEconomicsFetcher {
    client: Client,
    endpoint: String,
    farm_token: String,
}

impl MaiarEconomicsFetcher {
    /// Create a fetcher reading the `MEXStaked` farm
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_options(endpoint, "MEXStaked", DEFAULT_TIMEOUT)
    }

    /// Create a fetcher reading the farm whose token is named `farm_token`
    pub fn with_options(endpoint: &str, farm_token: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.to_string(),
            farm_token: farm_token.to_string(),
        })
    }
}

#[async_trait]
impl MexEconomicsFetcher for MaiarEconomicsFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_mex_economics(&self) -> Result<MexEconomics> {
        let body = GraphQlRequest {
            query: FARMS_QUERY.to_string(),
            variables: serde_json::json!({}),
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let response = ensure_success(response, &self.endpoint)?;

        let response: GraphQlResponse<FarmsData> = response.json().await?;
        if response.data.farms.is_empty() {
            return Err(ClientError::InvalidResponse(
                "no MEX farms available".to_string(),
            ));
        }

        let farm = response
            .data
            .farms
            .iter()
            .find(|farm| farm.farm_token.name == self.farm_token)
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!("no farm with token {}", self.farm_token))
            })?;

        let economics = MexEconomics {
            price: Decimal::from_str(farm.farmed_token_price_usd.trim())?,
            locked_rewards_apr: Decimal::from_str(farm.locked_rewards_apr.trim())?,
            unlocked_rewards_apr: Decimal::from_str(farm.unlocked_rewards_apr.trim())?,
        };

        debug!(
            price = %economics.price,
            locked_apr = %economics.locked_rewards_apr,
            unlocked_apr = %economics.unlocked_rewards_apr,
            "Fetched MEX economics"
        );
        Ok(economics)
    }
}

/// EGLD staking providers from the network API
#[derive(Debug, Clone)]
pub struct ElrondProvidersFetcher {
    client: Client,
    endpoint: String,
}

impl ElrondProvidersFetcher {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl StakingProvidersFetcher for ElrondProvidersFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_staking_providers(&self) -> Result<Vec<StakingProvider>> {
        let response = self.client.get(&self.endpoint).send().await?;
        let response = ensure_success(response, &self.endpoint)?;

        let mut providers: Vec<StakingProvider> = response.json().await?;
        backfill_identities(&mut providers);

        debug!(count = providers.len(), "Fetched staking providers");
        Ok(providers)
    }
}

/// The three production data sources built from configuration
pub struct Fetchers {
    pub egld_price: CoingeckoPriceFetcher,
    pub mex_economics: MaiarEconomicsFetcher,
    pub staking_providers: ElrondProvidersFetcher,
}

impl Fetchers {
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);
        Ok(Self {
            egld_price: CoingeckoPriceFetcher::with_options(
                &config.egld_price_url,
                &config.egld_coin_id,
                &config.currency,
                timeout,
            )?,
            mex_economics: MaiarEconomicsFetcher::with_options(
                &config.mex_economics_url,
                &config.mex_farm_token,
                timeout,
            )?,
            staking_providers: ElrondProvidersFetcher::with_timeout(
                &config.staking_providers_url,
                timeout,
            )?,
        })
    }
}
