//! Wire types of the market data APIs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// CoinGecko simple price response: `{coin_id: {currency: price}}`
pub type SimplePriceResponse = HashMap<String, HashMap<String, Decimal>>;

/// GraphQL request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: serde_json::Value,
}

/// Farms query sent to the Maiar exchange
pub const FARMS_QUERY: &str = "query {farms {lockedRewardsAPR unlockedRewardsAPR farmingToken{identifier name} farmToken{name} farmedTokenPriceUSD farmedToken {identifier name}}}";

/// GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: T,
}

/// `data` of the farms query
#[derive(Debug, Clone, Deserialize)]
pub struct FarmsData {
    #[serde(default)]
    pub farms: Vec<Farm>,
}

/// A liquidity/staking farm
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    #[serde(rename = "lockedRewardsAPR")]
    pub locked_rewards_apr: String,
    #[serde(rename = "unlockedRewardsAPR")]
    pub unlocked_rewards_apr: String,
    #[serde(default)]
    pub farming_token: Option<TokenRef>,
    pub farm_token: FarmTokenRef,
    #[serde(rename = "farmedTokenPriceUSD")]
    pub farmed_token_price_usd: String,
    #[serde(default)]
    pub farmed_token: Option<TokenRef>,
}

/// Token identifier and display name
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRef {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
}

/// Farm token name
#[derive(Debug, Clone, Deserialize)]
pub struct FarmTokenRef {
    pub name: String,
}
