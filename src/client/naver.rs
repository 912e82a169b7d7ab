// file: src/client/naver.rs
// description: Naver open API client for shopping insight, blog and shop search
// reference: https://developers.naver.com/docs/common/openapiguide/

use crate::config::ApiConfig;
use crate::error::{InsightError, Result};
use crate::models::{BlogPost, ShopItem, TrendPoint};
use chrono::{Days, Local, NaiveDate};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const SHOPPING_INSIGHT_PATH: &str = "/v1/datalab/shopping/categories";
const BLOG_SEARCH_PATH: &str = "/v1/search/blog.json";
const SHOP_SEARCH_PATH: &str = "/v1/search/shop.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShoppingInsightRequest<'a> {
    start_date: String,
    end_date: String,
    time_unit: &'a str,
    category: Vec<CategoryParam<'a>>,
    device: &'a str,
    ages: Vec<String>,
    gender: &'a str,
}

#[derive(Debug, Serialize)]
struct CategoryParam<'a> {
    name: &'a str,
    param: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ShoppingInsightResponse {
    #[serde(default)]
    results: Vec<ShoppingInsightResult>,
}

#[derive(Debug, Deserialize)]
struct ShoppingInsightResult {
    #[serde(default)]
    data: Vec<TrendPoint>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Client for the three Naver endpoints the insight report draws on.
///
/// Credentials come from the `ApiConfig` handed to [`NaverClient::new`];
/// nothing is read from the environment here.
#[derive(Debug, Clone)]
pub struct NaverClient {
    client: Client,
    config: ApiConfig,
}

impl NaverClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Daily relative search volume for a category over the configured
    /// trend window ending today.
    pub async fn shopping_insight(
        &self,
        category_name: &str,
        category_id: &str,
    ) -> Result<Vec<TrendPoint>> {
        let end = Local::now().date_naive();
        let start = end
            .checked_sub_days(Days::new(u64::from(self.config.trend_days)))
            .unwrap_or(end);

        self.shopping_insight_between(category_name, category_id, start, end)
            .await
    }

    pub async fn shopping_insight_between(
        &self,
        category_name: &str,
        category_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        let request = ShoppingInsightRequest {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            time_unit: "date",
            category: vec![CategoryParam {
                name: category_name,
                param: vec![category_id],
            }],
            device: "",
            ages: Vec::new(),
            gender: "",
        };

        debug!(
            "Requesting shopping insight for {} ({}) from {} to {}",
            category_name, category_id, request.start_date, request.end_date
        );

        let response = self
            .authorized(self.client.post(self.url(SHOPPING_INSIGHT_PATH)))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(SHOPPING_INSIGHT_PATH, response).await?;
        let insight: ShoppingInsightResponse = response.json().await?;

        match insight.results.into_iter().next() {
            Some(result) => {
                debug!("Received {} trend points", result.data.len());
                Ok(result.data)
            }
            None => {
                warn!("Shopping insight returned no results for {}", category_name);
                Ok(Vec::new())
            }
        }
    }

    pub async fn blog_search(&self, keyword: &str) -> Result<Vec<BlogPost>> {
        self.search(BLOG_SEARCH_PATH, keyword).await
    }

    pub async fn shopping_search(&self, keyword: &str) -> Result<Vec<ShopItem>> {
        self.search(SHOP_SEARCH_PATH, keyword).await
    }

    async fn search<T: DeserializeOwned>(&self, path: &str, keyword: &str) -> Result<Vec<T>> {
        debug!("Searching {} for '{}'", path, keyword);

        let display = self.config.display.to_string();
        let response = self
            .authorized(self.client.get(self.url(path)))
            .query(&[("query", keyword), ("display", display.as_str())])
            .send()
            .await?;

        let response = Self::check_status(path, response).await?;
        let body: SearchResponse<T> = response.json().await?;

        debug!("Received {} items from {}", body.items.len(), path);
        Ok(body.items)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Naver-Client-Id", &self.config.client_id)
            .header("X-Naver-Client-Secret", &self.config.client_secret)
    }

    async fn check_status(endpoint: &str, response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        warn!("Request to {} failed with status {}", endpoint, status);

        Err(InsightError::Api {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
