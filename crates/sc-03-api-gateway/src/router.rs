use crate::domain::error::{ApiError, ApiResult};
use crate::domain::methods::{get_method_info, MethodCategory, MethodInfo};
use crate::middleware::{GatewayMetrics, CALLER_HEADER};
use crate::ports::RegistryBackend;
use sc_01_project_registry::domain::NewProject;
use sc_02_project_catalog::domain::forms::{form_fields, validate_form};
use sc_02_project_catalog::domain::query::ProjectQuery;
use sc_02_project_catalog::service::ProjectCatalog;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::{Address, Domain, Hash, TokenId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn RegistryBackend>,
    pub catalog: ProjectCatalog<dyn RegistryBackend>,
    pub metrics: Arc<GatewayMetrics>,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(registry: Arc<dyn RegistryBackend>, max_batch_size: usize) -> Self {
        Self {
            catalog: ProjectCatalog::new(Arc::clone(&registry)),
            registry,
            metrics: Arc::new(GatewayMetrics::new()),
            max_batch_size,
        }
    }
}

/// Route a JSON-RPC method to its handler.
///
/// Mutations run as `caller`; they fail with `UNAUTHORIZED` when the caller
/// header was absent.
pub async fn route_method(
    state: &AppState,
    caller: Option<Address>,
    method: &str,
    params: Option<&Value>,
) -> ApiResult<Value> {
    let info = get_method_info(method).ok_or_else(|| ApiError::method_not_found(method))?;

    let caller = match (info.requires_caller(), caller) {
        (true, None) => {
            return Err(ApiError::unauthorized(format!(
                "{method} requires the {CALLER_HEADER} header"
            )))
        }
        (_, caller) => caller,
    };

    match info.category {
        MethodCategory::Registry => route_registry(state, info, caller, params).await,
        MethodCategory::Certifier => route_certifier(state, info, caller, params).await,
        MethodCategory::Catalog => route_catalog(state, info, params).await,
    }
}

async fn route_registry(
    state: &AppState,
    info: &MethodInfo,
    caller: Option<Address>,
    params: Option<&Value>,
) -> ApiResult<Value> {
    let registry = &state.registry;

    match info.name {
        "submitProject" => {
            let name: String = parse_param(info, params, 0)?;
            let github_link: String = parse_param_optional(info, params, 1)?.unwrap_or_default();
            let tags: Vec<String> = parse_param_optional(info, params, 2)?.unwrap_or_default();
            let project = NewProject::new(name, github_link, tags);
            to_json(registry.submit_project(mutator(caller)?, project).await?)
        }
        "getTotalProjects" => to_json(registry.get_total_projects().await),
        "getProject" => {
            let token_id: TokenId = parse_param(info, params, 0)?;
            to_json(registry.get_project(token_id).await?)
        }
        "getProjectsOf" => {
            let owner: Address = parse_param(info, params, 0)?;
            to_json(registry.get_projects_of(owner).await)
        }
        "upvoteProject" => {
            let token_id: TokenId = parse_param(info, params, 0)?;
            registry.upvote_project(mutator(caller)?, token_id).await?;
            Ok(Value::Null)
        }
        "getVoteCount" => {
            let token_id: TokenId = parse_param(info, params, 0)?;
            to_json(registry.get_vote_count(token_id).await?)
        }
        "storeFileHash" => {
            let token_id: TokenId = parse_param(info, params, 0)?;
            let file_hash: Hash = parse_param(info, params, 1)?;
            registry
                .store_file_hash(mutator(caller)?, token_id, file_hash)
                .await?;
            Ok(Value::Null)
        }
        "getFileHash" => {
            let token_id: TokenId = parse_param(info, params, 0)?;
            to_json(registry.get_file_hash(token_id).await?)
        }
        "setVerifiedIssuer" => {
            let issuer: Address = parse_param(info, params, 0)?;
            let verified: bool = parse_param(info, params, 1)?;
            registry
                .set_verified_issuer(mutator(caller)?, issuer, verified)
                .await?;
            Ok(Value::Null)
        }
        "isVerifiedIssuer" => {
            let issuer: Address = parse_param(info, params, 0)?;
            to_json(registry.is_verified_issuer(issuer).await)
        }
        _ => Err(ApiError::method_not_found(info.name)),
    }
}

async fn route_certifier(
    state: &AppState,
    info: &MethodInfo,
    caller: Option<Address>,
    params: Option<&Value>,
) -> ApiResult<Value> {
    match info.name {
        "addProject" => {
            let title: String = parse_param(info, params, 0)?;
            let description: String = parse_param_optional(info, params, 1)?.unwrap_or_default();
            let skills: Vec<String> = parse_param_optional(info, params, 2)?.unwrap_or_default();
            to_json(
                state
                    .registry
                    .add_project(mutator(caller)?, title, description, skills)
                    .await?,
            )
        }
        "getProjects" => {
            let owner: Address = parse_param(info, params, 0)?;
            to_json(state.registry.get_projects(owner).await)
        }
        _ => Err(ApiError::method_not_found(info.name)),
    }
}

async fn route_catalog(
    state: &AppState,
    info: &MethodInfo,
    params: Option<&Value>,
) -> ApiResult<Value> {
    let catalog = &state.catalog;

    match info.name {
        "catalog_explore" => match parse_param_optional::<ProjectQuery>(info, params, 0)? {
            Some(query) => to_json(catalog.search(&query).await),
            None => to_json(catalog.explore().await),
        },
        "catalog_project" => {
            let token_id: TokenId = parse_param(info, params, 0)?;
            to_json(catalog.listing(token_id).await?)
        }
        "catalog_myProjects" => {
            let owner: Address = parse_param(info, params, 0)?;
            to_json(catalog.my_projects(owner).await)
        }
        "catalog_dashboard" => {
            let wallet: Option<Address> = parse_param_optional(info, params, 0)?;
            to_json(catalog.dashboard(wallet).await)
        }
        "catalog_portfolio" => {
            let owner: Address = parse_param(info, params, 0)?;
            to_json(catalog.portfolio(owner).await)
        }
        "catalog_formFields" => {
            let domain: Domain = parse_param(info, params, 0)?;
            to_json(form_fields(domain))
        }
        "catalog_validateForm" => {
            let domain: Domain = parse_param(info, params, 0)?;
            let fields: BTreeMap<String, String> =
                parse_param_optional(info, params, 1)?.unwrap_or_default();
            let has_document: bool = parse_param_optional(info, params, 2)?.unwrap_or(false);
            validate_form(domain, &fields, has_document)?;
            Ok(Value::Bool(true))
        }
        _ => Err(ApiError::method_not_found(info.name)),
    }
}

/// The caller of a mutation; checked by `route_method` before dispatch.
fn mutator(caller: Option<Address>) -> ApiResult<Address> {
    caller.ok_or_else(|| ApiError::unauthorized(format!("missing {CALLER_HEADER} header")))
}

fn to_json<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

fn param_name(info: &MethodInfo, index: usize) -> String {
    info.params
        .get(index)
        .map_or_else(|| format!("#{index}"), |name| (*name).to_string())
}

fn param_at(params: Option<&Value>, index: usize) -> Option<&Value> {
    params
        .and_then(|p| {
            if p.is_array() {
                p.get(index)
            } else if index == 0 {
                Some(p)
            } else {
                None
            }
        })
        .filter(|v| !v.is_null())
}

/// Parse a required parameter from the params array.
fn parse_param<T: DeserializeOwned>(
    info: &MethodInfo,
    params: Option<&Value>,
    index: usize,
) -> ApiResult<T> {
    parse_param_optional(info, params, index)?.ok_or_else(|| {
        ApiError::invalid_params(format!("missing parameter {}", param_name(info, index)))
    })
}

/// Parse an optional parameter; absent and `null` both read as `None`, a
/// present value of the wrong shape is an error.
fn parse_param_optional<T: DeserializeOwned>(
    info: &MethodInfo,
    params: Option<&Value>,
    index: usize,
) -> ApiResult<Option<T>> {
    param_at(params, index)
        .map(|v| {
            serde_json::from_value(v.clone()).map_err(|e| {
                ApiError::invalid_params(format!("parameter {}: {e}", param_name(info, index)))
            })
        })
        .transpose()
}
