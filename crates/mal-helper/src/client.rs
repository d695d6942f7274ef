//! Catalog client: request building, unwrapping and normalization for one
//! media kind.

use crate::api::{ApiError, ApiRequest, HttpTransport, Transport};
use crate::catalog::{resolve_season, CatalogSpec, SEASONAL_SORTS, SEASONS};
use crate::envelope::{unwrap, Unwrapped};
use crate::normalize::{normalize_many, normalize_one};
use crate::render::RecordPrinter;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use shared::config::DEFAULT_LIMIT;
use std::io::Write;
use tracing::{debug, info, warn};

/// Header carrying the application's client id
pub const CLIENT_ID_HEADER: &str = "X-MAL-Client-ID";

/// Parameters of a seasonal listing; unset year and season mean "now"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonalQuery {
    pub year: Option<i32>,
    pub season: Option<String>,
    pub sort: String,
    pub limit: u32,
}

impl Default for SeasonalQuery {
    fn default() -> Self {
        Self {
            year: None,
            season: None,
            sort: "anime_score".to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Client for one catalog kind
pub struct CatalogClient<T = HttpTransport> {
    spec: CatalogSpec,
    client_id: String,
    transport: T,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(spec: CatalogSpec, client_id: impl Into<String>, transport: T) -> Self {
        Self {
            spec,
            client_id: client_id.into(),
            transport,
        }
    }

    pub fn spec(&self) -> &CatalogSpec {
        &self.spec
    }

    /// Fetch the full record for `id`, with a `url` to its web page attached.
    pub async fn lookup_by_id(&self, id: u64) -> Result<Value, ApiError> {
        let path = format!("/{}", id);
        let request = self
            .request(&path)
            .param("fields", self.spec.info_fields.join(","));

        info!(kind = %self.spec.kind, id, "Looking up record");

        let unwrapped = self.fetch(&request).await?;
        match unwrapped {
            Unwrapped::Single(mut record) => {
                if let Value::Object(fields) = &mut record {
                    fields.insert(
                        "url".to_string(),
                        Value::String(format!("{}{}", self.spec.web_base, path)),
                    );
                }
                Ok(normalize_one(record, self.spec.extra_rule))
            }
            Unwrapped::Many(_) => Err(ApiError::UnexpectedShape { url: request.url }),
        }
    }

    /// Search by keyword and print each match.
    pub async fn find_by_keyword<W: Write>(
        &self,
        keyword: &str,
        limit: u32,
        printer: &mut RecordPrinter<W>,
    ) -> Result<usize, ApiError> {
        let request = self
            .request("")
            .param("q", keyword)
            .param("fields", self.spec.search_fields.join(","))
            .param("limit", limit);

        info!(kind = %self.spec.kind, keyword, limit, "Searching by keyword");
        self.print_listing(&request, printer).await
    }

    /// Print a ranking list.
    ///
    /// An unknown `ranking_type` prints the accepted values and returns
    /// `Ok(None)` without sending a request.
    pub async fn get_by_ranking<W: Write>(
        &self,
        ranking_type: &str,
        limit: u32,
        printer: &mut RecordPrinter<W>,
    ) -> Result<Option<usize>, ApiError> {
        if !self.check_choice("ranking type", ranking_type, self.spec.ranking_types, printer)? {
            return Ok(None);
        }

        let request = self
            .request("/ranking")
            .param("ranking_type", ranking_type)
            .param("fields", self.spec.search_fields.join(","))
            .param("limit", limit);

        info!(kind = %self.spec.kind, ranking_type, limit, "Fetching ranking");
        self.print_listing(&request, printer).await.map(Some)
    }

    /// Print a seasonal listing, filling a missing year/season from today's date.
    pub async fn get_seasonal<W: Write>(
        &self,
        query: SeasonalQuery,
        printer: &mut RecordPrinter<W>,
    ) -> Result<Option<usize>, ApiError> {
        self.get_seasonal_on(query, Local::now().date_naive(), printer)
            .await
    }

    /// Like [`get_seasonal`](Self::get_seasonal), resolving defaults against `today`.
    pub async fn get_seasonal_on<W: Write>(
        &self,
        query: SeasonalQuery,
        today: NaiveDate,
        printer: &mut RecordPrinter<W>,
    ) -> Result<Option<usize>, ApiError> {
        if !self.spec.has_seasons {
            return Err(ApiError::Unsupported {
                kind: self.spec.kind.as_str(),
                operation: "seasonal listings",
            });
        }

        let (year, season) = resolve_season(query.year, query.season.as_deref(), today);

        if !self.check_choice("season", &season, SEASONS, printer)? {
            return Ok(None);
        }
        if !self.check_choice("sort option", &query.sort, SEASONAL_SORTS, printer)? {
            return Ok(None);
        }

        let request = self
            .request(&format!("/season/{}/{}", year, season))
            .param("sort", &query.sort)
            .param("limit", query.limit)
            .param("fields", self.spec.search_fields.join(","));

        info!(
            kind = %self.spec.kind,
            year,
            season = %season,
            sort = %query.sort,
            "Fetching seasonal listing"
        );
        self.print_listing(&request, printer).await.map(Some)
    }

    fn request(&self, path: &str) -> ApiRequest {
        ApiRequest::new(format!("{}{}", self.spec.api_base, path))
            .header(CLIENT_ID_HEADER, self.client_id.as_str())
    }

    async fn fetch(&self, request: &ApiRequest) -> Result<Unwrapped, ApiError> {
        let body = self.transport.get(request).await?;
        Ok(unwrap(body))
    }

    async fn print_listing<W: Write>(
        &self,
        request: &ApiRequest,
        printer: &mut RecordPrinter<W>,
    ) -> Result<usize, ApiError> {
        let records = self.fetch(request).await?.into_records();
        debug!(url = %request.url, records = records.len(), "Received listing");

        Ok(normalize_many(records, self.spec.extra_rule, printer)?)
    }

    /// Returns false (after printing guidance) when `value` is not in `allowed`.
    fn check_choice<W: Write>(
        &self,
        category: &str,
        value: &str,
        allowed: &[&str],
        printer: &mut RecordPrinter<W>,
    ) -> Result<bool, ApiError> {
        if allowed.contains(&value) {
            return Ok(true);
        }

        warn!(kind = %self.spec.kind, category, value, "Rejected option");
        printer.print_guidance(category, allowed)?;
        Ok(false)
    }
}
