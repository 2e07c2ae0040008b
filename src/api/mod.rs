use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    InputField, MAX_WEEKLY_AMOUNT, MIN_WEEKLY_AMOUNT, Projection, RejectReason, Rejection,
    Scenario, Session, TargetAges, Timeframe, clamp_age, derive_target_ages, format_currency,
    projection_for_timeframe,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliScenario {
    Low,
    Normal,
    High,
}

impl From<CliScenario> for Scenario {
    fn from(value: CliScenario) -> Self {
        match value {
            CliScenario::Low => Scenario::Low,
            CliScenario::Normal => Scenario::Normal,
            CliScenario::High => Scenario::High,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTimeframe {
    Short,
    Medium,
    Long,
}

impl From<CliTimeframe> for Timeframe {
    fn from(value: CliTimeframe) -> Self {
        match value {
            CliTimeframe::Short => Timeframe::Short,
            CliTimeframe::Medium => Timeframe::Medium,
            CliTimeframe::Long => Timeframe::Long,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiScenario {
    Low,
    Normal,
    High,
}

impl From<ApiScenario> for CliScenario {
    fn from(value: ApiScenario) -> Self {
        match value {
            ApiScenario::Low => CliScenario::Low,
            ApiScenario::Normal => CliScenario::Normal,
            ApiScenario::High => CliScenario::High,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiTimeframe {
    Short,
    Medium,
    Long,
}

impl From<ApiTimeframe> for CliTimeframe {
    fn from(value: ApiTimeframe) -> Self {
        match value {
            ApiTimeframe::Short => CliTimeframe::Short,
            ApiTimeframe::Medium => CliTimeframe::Medium,
            ApiTimeframe::Long => CliTimeframe::Long,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    age: Option<u32>,
    weekly_amount: Option<u32>,
    scenario: Option<ApiScenario>,
    timeframe: Option<ApiTimeframe>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparisonPayload {
    age: Option<u32>,
    weekly_amount: Option<u32>,
    scenario: Option<ApiScenario>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "compound",
    about = "Weekly-compounding savings projection calculator with a lead-capture funnel"
)]
struct Cli {
    #[arg(long, default_value_t = 25, help = "Current age; clamped to 16..=64")]
    age: u32,
    #[arg(
        long,
        default_value_t = 25,
        help = "Weekly contribution in dollars; clamped to 10..=2000"
    )]
    weekly_amount: u32,
    #[arg(
        long,
        value_enum,
        default_value_t = CliScenario::Normal,
        help = "Annual return scenario: low (10%), normal (12%), high (14%)"
    )]
    scenario: CliScenario,
    #[arg(
        long,
        value_enum,
        default_value_t = CliTimeframe::Long,
        help = "Projection horizon; long is always age 65"
    )]
    timeframe: CliTimeframe,
}

#[derive(Debug)]
struct ProjectionRequest {
    age: u32,
    weekly_amount: u32,
    scenario: Scenario,
    timeframe: Timeframe,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    age: u32,
    weekly_amount: u32,
    scenario: Scenario,
    return_rate_pct: u32,
    timeframe: Timeframe,
    target_ages: TargetAges,
    projection: Projection,
    final_value_display: String,
    total_contributed_display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonResponse {
    first_name: String,
    phone: String,
    goal_value: i64,
    goal_amount_display: String,
    return_rate_pct: u32,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_request(cli: Cli) -> Result<ProjectionRequest, String> {
    // Well-formed but out-of-range values clamp; only a contribution below
    // the product minimum is rejected outright.
    if cli.weekly_amount < MIN_WEEKLY_AMOUNT {
        return Err(format!("--weekly-amount must be >= {MIN_WEEKLY_AMOUNT}"));
    }

    Ok(ProjectionRequest {
        age: clamp_age(cli.age),
        weekly_amount: cli.weekly_amount.min(MAX_WEEKLY_AMOUNT),
        scenario: cli.scenario.into(),
        timeframe: cli.timeframe.into(),
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route("/api/comparison", post(comparison_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("compound HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler(Query(payload): Query<ProjectionPayload>) -> Response {
    projection_handler_impl(payload)
}

async fn projection_post_handler(Json(payload): Json<ProjectionPayload>) -> Response {
    projection_handler_impl(payload)
}

fn projection_handler_impl(payload: ProjectionPayload) -> Response {
    let request = match request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    json_response(StatusCode::OK, build_projection_response(&request))
}

async fn comparison_handler(Json(payload): Json<ComparisonPayload>) -> Response {
    match comparison_from_payload(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn request_from_payload(payload: ProjectionPayload) -> Result<ProjectionRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.age {
        cli.age = v;
    }
    if let Some(v) = payload.weekly_amount {
        cli.weekly_amount = v;
    }
    if let Some(v) = payload.scenario {
        cli.scenario = v.into();
    }
    if let Some(v) = payload.timeframe {
        cli.timeframe = v.into();
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        age: 25,
        weekly_amount: 25,
        scenario: CliScenario::Normal,
        timeframe: CliTimeframe::Long,
    }
}

fn build_projection_response(request: &ProjectionRequest) -> ProjectionResponse {
    let target_ages = derive_target_ages(request.age);
    let projection = projection_for_timeframe(
        request.age,
        &target_ages,
        request.timeframe,
        request.weekly_amount,
        request.scenario,
    );

    ProjectionResponse {
        age: request.age,
        weekly_amount: request.weekly_amount,
        scenario: request.scenario,
        return_rate_pct: request.scenario.annual_rate_pct(),
        timeframe: request.timeframe,
        target_ages,
        final_value_display: format_currency(projection.final_value),
        total_contributed_display: format_currency(projection.total_contributed),
        projection,
    }
}

/// Drive a fresh session through the whole funnel so the comparison endpoint
/// exercises exactly the transitions the page does.
fn comparison_from_payload(payload: ComparisonPayload) -> Result<ComparisonResponse, String> {
    let cli = {
        let mut cli = default_cli_for_api();
        if let Some(v) = payload.age {
            cli.age = v;
        }
        if let Some(v) = payload.weekly_amount {
            cli.weekly_amount = v;
        }
        if let Some(v) = payload.scenario {
            cli.scenario = v.into();
        }
        cli
    };
    let request = build_request(cli)?;

    let mut session = Session::new();
    session
        .submit_setup(&request.age.to_string(), &request.weekly_amount.to_string())
        .map_err(rejection_message)?;
    session.set_scenario(request.scenario);
    session.open_lead_form();

    for value in [
        payload.first_name.as_deref().unwrap_or(""),
        payload.last_name.as_deref().unwrap_or(""),
        payload.phone.as_deref().unwrap_or(""),
    ] {
        session.submit_lead_field(value).map_err(rejection_message)?;
    }

    let comparison = session
        .comparison()
        .ok_or_else(|| "lead capture did not complete".to_string())?;
    let phone = session
        .captured
        .map(|lead| lead.phone)
        .unwrap_or_default();

    Ok(ComparisonResponse {
        first_name: comparison.first_name,
        phone,
        goal_value: comparison.goal_value,
        goal_amount_display: format_currency(comparison.goal_value),
        return_rate_pct: comparison.return_rate_pct,
    })
}

fn rejection_message(rejection: Rejection) -> String {
    let field = match rejection.field {
        InputField::Age => "age",
        InputField::Amount => "weeklyAmount",
        InputField::FirstName => "firstName",
        InputField::LastName => "lastName",
        InputField::Phone => "phone",
    };
    match rejection.reason {
        RejectReason::Empty => format!("{field} must not be empty"),
        RejectReason::NotANumber => format!("{field} must be a number"),
        RejectReason::BelowMinimum => format!("{field} must be >= {MIN_WEEKLY_AMOUNT}"),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn projection_request_from_json(json: &str) -> Result<ProjectionRequest, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    request_from_payload(payload)
}
