use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::report::{profile_report, MatchRecord, ProfileReport};
use crate::matching::scorer::MatchResult;
use crate::matching::{JobPosting, RankedMatch};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
}

#[derive(Deserialize)]
pub struct RequirementsRequest {
    pub job_text: String,
}

#[derive(Serialize)]
pub struct RequirementsResponse {
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
}

#[derive(Deserialize)]
pub struct MatchRequest {
    pub cv_text: String,
    pub job_text: String,
}

#[derive(Deserialize)]
pub struct BatchMatchRequest {
    pub cv_text: String,
    pub jobs: Vec<JobPosting>,
}

#[derive(Serialize)]
pub struct BatchMatchResponse {
    pub results: Vec<RankedMatch>,
}

#[derive(Deserialize)]
pub struct ProfileReportRequest {
    #[serde(default)]
    pub history: Vec<MatchRecord>,
}

/// Rejects texts over the configured byte limit. Empty text is accepted.
fn check_text(state: &AppState, field: &str, text: &str) -> Result<(), AppError> {
    let limit = state.config.max_text_bytes;
    if text.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "{field} is {} bytes; the limit is {limit}",
            text.len()
        )));
    }
    Ok(())
}

/// POST /api/v1/skills/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    check_text(&state, "text", &req.text)?;
    let skills = state.engine.extract(&req.text);
    Ok(Json(ExtractResponse {
        skills: state.engine.ordered(&skills),
    }))
}

/// POST /api/v1/jobs/requirements
pub async fn handle_requirements(
    State(state): State<AppState>,
    Json(req): Json<RequirementsRequest>,
) -> Result<Json<RequirementsResponse>, AppError> {
    check_text(&state, "job_text", &req.job_text)?;
    let requirement = state.engine.requirements(&req.job_text);
    Ok(Json(RequirementsResponse {
        must_have: state.engine.ordered(requirement.must_have()),
        nice_to_have: state.engine.ordered(requirement.nice_to_have()),
    }))
}

/// POST /api/v1/matches
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    check_text(&state, "cv_text", &req.cv_text)?;
    check_text(&state, "job_text", &req.job_text)?;
    let result = state.engine.evaluate(&req.cv_text, &req.job_text);
    info!(
        "Match scored {:.2} with {} reasons",
        result.match_score(),
        result.reasons().len()
    );
    Ok(Json(result))
}

/// POST /api/v1/matches/batch
pub async fn handle_batch_match(
    State(state): State<AppState>,
    Json(req): Json<BatchMatchRequest>,
) -> Result<Json<BatchMatchResponse>, AppError> {
    if req.jobs.is_empty() {
        return Err(AppError::Validation("jobs must not be empty".to_string()));
    }
    let max_jobs = state.config.max_batch_jobs;
    if req.jobs.len() > max_jobs {
        return Err(AppError::Validation(format!(
            "at most {max_jobs} jobs per batch, got {}",
            req.jobs.len()
        )));
    }
    check_text(&state, "cv_text", &req.cv_text)?;
    for job in &req.jobs {
        check_text(&state, &format!("jobs[{}].description", job.id), &job.description)?;
    }

    let results = state.engine.evaluate_batch(&req.cv_text, &req.jobs);
    info!("Batch ranked {} jobs", results.len());
    Ok(Json(BatchMatchResponse { results }))
}

/// POST /api/v1/reports/profile
pub async fn handle_profile_report(
    Json(req): Json<ProfileReportRequest>,
) -> Result<Json<ProfileReport>, AppError> {
    Ok(Json(profile_report(&req.history)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::matching::{MatchEngine, Vocabulary};
    use crate::routes::build_router;
    use crate::state::AppState;

    fn app_with(config: Config) -> Router {
        let engine = MatchEngine::new(Vocabulary::builtin().unwrap()).unwrap();
        build_router(AppState {
            config,
            engine: Arc::new(engine),
        })
    }

    fn app() -> Router {
        app_with(Config::default())
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_extract_returns_vocabulary_order() {
        let (status, json) = post(
            app(),
            "/api/v1/skills/extract",
            json!({ "text": "K8s, Golang and JS" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["skills"], json!(["javascript", "go", "kubernetes"]));
    }

    #[tokio::test]
    async fn test_requirements_split() {
        let (status, json) = post(
            app(),
            "/api/v1/jobs/requirements",
            json!({ "job_text": "Required: Python, Django.\nNice to have: Redis." }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["must_have"], json!(["python", "django"]));
        assert_eq!(json["nice_to_have"], json!(["redis"]));
    }

    #[tokio::test]
    async fn test_match_result_shape() {
        let (status, json) = post(
            app(),
            "/api/v1/matches",
            json!({
                "cv_text": "Python developer with Django",
                "job_text": "Required: Python, Django, AWS.\nPreferred: Docker."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let score = json["match_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(json["reasons"].as_array().unwrap().len(), 4);
        assert!(!json["suggestions"].as_array().unwrap().is_empty());
        assert!(json["breakdown"]["tfidf_bonus"].is_number());
    }

    #[tokio::test]
    async fn test_empty_texts_are_accepted() {
        let (status, json) = post(
            app(),
            "/api/v1/matches",
            json!({ "cv_text": "", "job_text": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["match_score"], 100.0);
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() {
        let config = Config {
            max_text_bytes: 16,
            ..Config::default()
        };
        let (status, json) = post(
            app_with(config),
            "/api/v1/matches",
            json!({ "cv_text": "Python", "job_text": "Python and Django and PostgreSQL" }),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_batch_ranks_jobs() {
        let (status, json) = post(
            app(),
            "/api/v1/matches/batch",
            json!({
                "cv_text": "Python Django PostgreSQL",
                "jobs": [
                    { "id": "a", "title": "Frontend", "description": "React and Angular required" },
                    { "id": "b", "title": "Backend", "company": "TechCorp", "description": "Python and Django required" }
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["job_id"], "b");
        assert_eq!(results[0]["rank"], 1);
        assert_eq!(results[0]["company"], "TechCorp");
        assert!(results[0]["match_score"].as_f64().unwrap() > results[1]["match_score"].as_f64().unwrap());
    }

    #[tokio::test]
    async fn test_batch_limits() {
        let (status, json) = post(
            app(),
            "/api/v1/matches/batch",
            json!({ "cv_text": "Python", "jobs": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

        let config = Config {
            max_batch_jobs: 1,
            ..Config::default()
        };
        let job = json!({ "id": "x", "description": "Rust" });
        let (status, _) = post(
            app_with(config),
            "/api/v1/matches/batch",
            json!({ "cv_text": "Rust", "jobs": [job.clone(), job] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_report_from_history() {
        let (_, matched) = post(
            app(),
            "/api/v1/matches",
            json!({ "cv_text": "Python", "job_text": "Required: Python, Kubernetes." }),
        )
        .await;
        let history: Vec<Value> = (1..=3)
            .map(|day| json!({ "created_at": format!("2024-05-0{day}T09:00:00Z"), "result": matched.clone() }))
            .collect();

        let (status, json) = post(
            app(),
            "/api/v1/reports/profile",
            json!({ "history": history }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_matches_analyzed"], 3);
        assert_eq!(json["skill_gaps"][0]["skill"], "kubernetes");
        assert_eq!(json["skill_gaps"][0]["impact"], "critical");
        assert_eq!(json["trend"]["direction"], "stable");
    }

    #[tokio::test]
    async fn test_empty_profile_report() {
        let (status, json) = post(app(), "/api/v1/reports/profile", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_matches_analyzed"], 0);
        assert_eq!(json["trend"]["direction"], "insufficient_data");
    }
}
