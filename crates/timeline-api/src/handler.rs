//! Module: handler
//! Responsibility: the 11 route handlers (spec §6) — parse `duration`/
//! `limit`, canonicalize `limit` with a redirect when it falls outside
//! `countRange`, dispatch to the matching family query builder, and map the
//! outcome to a response.
//! Does not own: row→Dto conversion (see [`crate::response`]) or the
//! error→status mapping (see [`crate::error`]).
//! Boundary: axum extractors in, an axum [`Response`] out.

use crate::{
    error::{ApiError, Redirect},
    response::{AccountDto, BlockDto, Envelope, MosaicDto, NamespaceDto, TransactionDto},
    AppState,
};
use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use timeline_core::{
    error::TimelineError,
    family::{self, accounts::AccountRanking, transactions::TransactionsFamily},
    model::MosaicAlias,
    parser::{
        keyword::{Duration, SentinelAxis, TransactionType, TransferFilter, parse_sentinel},
        parse_non_negative_integer,
    },
    store::{Store, TransactionCollection},
    timeline::TimelineOutcome,
};

/// Coarse anchor classification for the request-scoped tracing span (spec
/// expansion §2 item 8): whether `anchor` is a sentinel keyword recognized
/// under either axis, or an identifier shape the family will try to parse.
/// The family query builders do the real, shape-specific classification;
/// this only needs to be precise enough to correlate a log line with one
/// request, not to duplicate that dispatch.
fn anchor_class(anchor: &str) -> &'static str {
    if parse_sentinel(anchor, SentinelAxis::Time).is_some() || parse_sentinel(anchor, SentinelAxis::Quantity).is_some() {
        "sentinel"
    } else {
        "identifier"
    }
}

#[derive(Deserialize)]
pub struct PlainParams {
    pub duration: String,
    pub anchor: String,
    pub limit: String,
}

#[derive(Deserialize)]
pub struct TypeParams {
    pub duration: String,
    pub anchor: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub limit: String,
}

#[derive(Deserialize)]
pub struct TypeFilterParams {
    pub duration: String,
    pub anchor: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub filter: String,
    pub limit: String,
}

#[derive(Deserialize)]
pub struct HarvestedParams {
    pub which: String,
    pub duration: String,
    pub anchor: String,
    pub limit: String,
}

#[derive(Deserialize)]
pub struct BalanceParams {
    pub which: String,
    pub duration: String,
    pub anchor: String,
    pub limit: String,
}

enum Limit {
    Value(usize),
    Redirect(Redirect),
}

/// Parse and range-check `limit` (spec §4.4 step 2). Out-of-range limits
/// redirect to the same path with `limit` replaced by `countRange.preset`,
/// built generically from the request's own URI so every route shares this
/// one implementation rather than one per route.
fn resolve_limit(config: &crate::config::Config, uri: &OriginalUri, raw: &str) -> Result<Limit, TimelineError> {
    let parsed =
        parse_non_negative_integer(raw).map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
    let parsed = usize::try_from(parsed).map_err(|_| TimelineError::invalid_argument("limit is too large"))?;

    if config.count_range.contains(parsed) {
        return Ok(Limit::Value(parsed));
    }

    let path = uri.0.path();
    let Some((prefix, _)) = path.rsplit_once("/limit/") else {
        return Err(TimelineError::internal("route path has no /limit/ segment"));
    };
    Ok(Limit::Redirect(Redirect {
        location: format!("{prefix}/limit/{}", config.count_range.preset),
    }))
}

fn parse_duration(raw: &str) -> Result<Duration, TimelineError> {
    Duration::parse(raw).map_err(|err| TimelineError::invalid_argument(err.to_string()))
}

macro_rules! require {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => return ApiError::from(err).into_response(),
        }
    };
}

macro_rules! resolve_limit_or_respond {
    ($config:expr, $uri:expr, $raw:expr) => {
        match resolve_limit($config, $uri, $raw) {
            Ok(Limit::Value(n)) => n,
            Ok(Limit::Redirect(redirect)) => return redirect.into_response(),
            Err(err) => return ApiError::from(err).into_response(),
        }
    };
}

fn page_response<R, D>(outcome: Result<TimelineOutcome<R>, TimelineError>, tag: &'static str) -> Response
where
    D: for<'a> From<&'a R> + serde::Serialize,
{
    match outcome {
        Ok(TimelineOutcome::Page(rows)) => {
            let payload = rows.iter().map(D::from).collect();
            Json(Envelope::new(tag, payload)).into_response()
        }
        Ok(TimelineOutcome::NotFound) => ApiError::from(TimelineError::NotFound).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[tracing::instrument(
    skip_all,
    fields(family = "block", duration = %params.duration, anchor_class = anchor_class(&params.anchor), limit = tracing::field::Empty)
)]
pub async fn blocks<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    let duration = require!(parse_duration(&params.duration));
    let limit = resolve_limit_or_respond!(&state.config, &uri, &params.limit);
    tracing::Span::current().record("limit", &limit);
    let outcome = family::blocks::call(&state.store, duration, &params.anchor, limit).await;
    page_response::<_, BlockDto>(outcome, "block")
}

#[tracing::instrument(
    skip_all,
    fields(family = tag, duration = %duration_raw, anchor_class = anchor_class(anchor), limit = tracing::field::Empty)
)]
async fn transactions_route<S: Store + Clone + Send + Sync + 'static>(
    state: AppState<S>,
    uri: OriginalUri,
    collection: TransactionCollection,
    tag: &'static str,
    duration_raw: &str,
    anchor: &str,
    transaction_type: Option<&str>,
    filter: Option<&str>,
    limit_raw: &str,
) -> Response {
    let duration = require!(parse_duration(duration_raw));
    let limit = resolve_limit_or_respond!(&state.config, &uri, limit_raw);
    tracing::Span::current().record("limit", &limit);

    let family = match (transaction_type, filter) {
        (None, _) => TransactionsFamily::plain(collection),
        (Some(raw_type), None) => {
            let transaction_type = require!(
                TransactionType::parse(raw_type).map_err(|err| TimelineError::invalid_argument(err.to_string()))
            );
            TransactionsFamily::by_type(collection, transaction_type)
        }
        (Some(raw_type), Some(raw_filter)) => {
            let transaction_type = require!(
                TransactionType::parse(raw_type).map_err(|err| TimelineError::invalid_argument(err.to_string()))
            );
            let filter = require!(
                TransferFilter::parse(raw_filter).map_err(|err| TimelineError::invalid_argument(err.to_string()))
            );
            require!(TransactionsFamily::by_type_with_filter(collection, transaction_type, filter))
        }
    };

    let outcome = family::transactions::call(&family, &state.store, duration, anchor, limit).await;
    match outcome {
        Ok(TimelineOutcome::Page(pages)) => {
            let payload = pages.iter().map(TransactionDto::from).collect();
            Json(Envelope::new(tag, payload)).into_response()
        }
        Ok(TimelineOutcome::NotFound) => ApiError::from(TimelineError::NotFound).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn transactions<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    transactions_route(
        state,
        uri,
        TransactionCollection::Confirmed,
        "transaction",
        &params.duration,
        &params.anchor,
        None,
        None,
        &params.limit,
    )
    .await
}

pub async fn transactions_by_type<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<TypeParams>,
    uri: OriginalUri,
) -> Response {
    transactions_route(
        state,
        uri,
        TransactionCollection::Confirmed,
        "transaction",
        &params.duration,
        &params.anchor,
        Some(&params.transaction_type),
        None,
        &params.limit,
    )
    .await
}

pub async fn transactions_by_type_with_filter<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<TypeFilterParams>,
    uri: OriginalUri,
) -> Response {
    transactions_route(
        state,
        uri,
        TransactionCollection::Confirmed,
        "transaction",
        &params.duration,
        &params.anchor,
        Some(&params.transaction_type),
        Some(&params.filter),
        &params.limit,
    )
    .await
}

pub async fn unconfirmed_transactions<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    transactions_route(
        state,
        uri,
        TransactionCollection::Unconfirmed,
        "unconfirmedTransaction",
        &params.duration,
        &params.anchor,
        None,
        None,
        &params.limit,
    )
    .await
}

pub async fn partial_transactions<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    transactions_route(
        state,
        uri,
        TransactionCollection::Partial,
        "partialTransaction",
        &params.duration,
        &params.anchor,
        None,
        None,
        &params.limit,
    )
    .await
}

#[tracing::instrument(
    skip_all,
    fields(family = "mosaic", duration = %params.duration, anchor_class = anchor_class(&params.anchor), limit = tracing::field::Empty)
)]
pub async fn mosaics<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    let duration = require!(parse_duration(&params.duration));
    let limit = resolve_limit_or_respond!(&state.config, &uri, &params.limit);
    tracing::Span::current().record("limit", &limit);
    let outcome = family::mosaics::call(&state.store, duration, &params.anchor, limit).await;
    page_response::<_, MosaicDto>(outcome, "mosaic")
}

#[tracing::instrument(
    skip_all,
    fields(family = "namespace", duration = %params.duration, anchor_class = anchor_class(&params.anchor), limit = tracing::field::Empty)
)]
pub async fn namespaces<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    let duration = require!(parse_duration(&params.duration));
    let limit = resolve_limit_or_respond!(&state.config, &uri, &params.limit);
    tracing::Span::current().record("limit", &limit);
    let outcome = family::namespaces::call(&state.store, duration, &params.anchor, limit).await;
    page_response::<_, NamespaceDto>(outcome, "namespace")
}

#[tracing::instrument(
    skip_all,
    fields(family = "account", duration = %params.duration, anchor_class = anchor_class(&params.anchor), limit = tracing::field::Empty)
)]
pub async fn accounts_importance<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<PlainParams>,
    uri: OriginalUri,
) -> Response {
    let duration = require!(parse_duration(&params.duration));
    let limit = resolve_limit_or_respond!(&state.config, &uri, &params.limit);
    tracing::Span::current().record("limit", &limit);
    let outcome =
        family::accounts::call(AccountRanking::Importance, &state.store, duration, &params.anchor, limit).await;
    page_response::<_, AccountDto>(outcome, "account")
}

#[tracing::instrument(
    skip_all,
    fields(family = "account", duration = %params.duration, anchor_class = anchor_class(&params.anchor), limit = tracing::field::Empty)
)]
pub async fn accounts_harvested<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<HarvestedParams>,
    uri: OriginalUri,
) -> Response {
    let ranking = match params.which.as_str() {
        "blocks" => AccountRanking::HarvestedBlocks,
        "fees" => AccountRanking::HarvestedFees,
        other => {
            return ApiError::from(TimelineError::invalid_argument(format!(
                "'{other}' is not a recognized harvested ranking (blocks/fees)"
            )))
            .into_response();
        }
    };
    let duration = require!(parse_duration(&params.duration));
    let limit = resolve_limit_or_respond!(&state.config, &uri, &params.limit);
    tracing::Span::current().record("limit", &limit);
    let outcome = family::accounts::call(ranking, &state.store, duration, &params.anchor, limit).await;
    page_response::<_, AccountDto>(outcome, "account")
}

#[tracing::instrument(
    skip_all,
    fields(family = "account", duration = %params.duration, anchor_class = anchor_class(&params.anchor), limit = tracing::field::Empty)
)]
pub async fn accounts_balance<S: Store + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<BalanceParams>,
    uri: OriginalUri,
) -> Response {
    let alias = match params.which.as_str() {
        "currency" => MosaicAlias::Currency,
        "harvest" => MosaicAlias::Harvest,
        "xem" => MosaicAlias::Xem,
        other => {
            return ApiError::from(TimelineError::invalid_argument(format!(
                "'{other}' is not a recognized balance mosaic (currency/harvest/xem)"
            )))
            .into_response();
        }
    };
    let duration = require!(parse_duration(&params.duration));
    let limit = resolve_limit_or_respond!(&state.config, &uri, &params.limit);
    tracing::Span::current().record("limit", &limit);
    let outcome =
        family::accounts::call(AccountRanking::Balance(alias), &state.store, duration, &params.anchor, limit).await;
    page_response::<_, AccountDto>(outcome, "account")
}
