use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{MatchError, Matcher};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, MatchResponse};
use crate::services::{SupabaseClient, SupabaseError, TextEncoder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SupabaseClient>,
    pub encoder: Arc<dyn TextEncoder>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find scholarship matches endpoint
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "applicant_id": "string"
/// }
/// ```
///
/// Responds with `{success, matches, message?}`. An empty eligible set is a
/// successful response with an explanatory message, not an error.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let applicant_id = &req.applicant_id;
    tracing::info!("Finding scholarship matches for applicant: {}", applicant_id);

    // Fetch the applicant profile
    let applicant = match state.store.get_applicant(applicant_id).await {
        Ok(applicant) => applicant,
        Err(SupabaseError::NotFound(_)) => {
            tracing::info!("Applicant not found: {}", applicant_id);
            return HttpResponse::NotFound().json(MatchResponse {
                success: false,
                matches: vec![],
                message: Some("Applicant not found".to_string()),
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch applicant {}: {}", applicant_id, e);
            return HttpResponse::InternalServerError().json(MatchResponse {
                success: false,
                matches: vec![],
                message: Some("Failed to fetch applicant profile".to_string()),
            });
        }
    };

    // Fetch the full scholarship catalog
    let scholarships = match state.store.list_scholarships().await {
        Ok(scholarships) => scholarships,
        Err(e) => {
            tracing::error!("Failed to fetch scholarship catalog: {}", e);
            return HttpResponse::InternalServerError().json(MatchResponse {
                success: false,
                matches: vec![],
                message: Some("Failed to fetch scholarship records".to_string()),
            });
        }
    };

    tracing::debug!(
        "Ranking {} scholarships for applicant {}",
        scholarships.len(),
        applicant_id
    );

    // Run the matching pipeline
    match state
        .matcher
        .rank(&applicant, scholarships, state.encoder.as_ref())
        .await
    {
        Ok(outcome) if outcome.eligible_candidates == 0 => {
            tracing::info!(
                "No eligible scholarships for applicant {} ({} candidates)",
                applicant_id,
                outcome.total_candidates
            );
            HttpResponse::Ok().json(MatchResponse {
                success: true,
                matches: vec![],
                message: Some("No eligible scholarships found".to_string()),
            })
        }
        Ok(outcome) => {
            tracing::info!(
                "Returning {} matches for applicant {} ({} eligible of {} candidates)",
                outcome.matches.len(),
                applicant_id,
                outcome.eligible_candidates,
                outcome.total_candidates
            );
            HttpResponse::Ok().json(MatchResponse {
                success: true,
                matches: outcome.matches,
                message: None,
            })
        }
        Err(e) => {
            tracing::error!("Matching failed for applicant {}: {}", applicant_id, e);
            HttpResponse::InternalServerError().json(MatchResponse {
                success: false,
                matches: vec![],
                message: Some(failure_message(&e).to_string()),
            })
        }
    }
}

/// Failure-kind description for the response body. The full error goes to the
/// logs only.
fn failure_message(error: &MatchError) -> &'static str {
    match error {
        MatchError::Encoding(_) => "Embedding generation failed",
        MatchError::MalformedEmbedding { .. } | MatchError::BatchSizeMismatch { .. } => {
            "Encoder returned a malformed embedding"
        }
        MatchError::Scoring(_) => "Similarity scoring failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{EmbeddingError, SupabaseTables};
    use actix_web::test::{call_and_read_body_json, call_service, init_service, TestRequest};
    use actix_web::App;
    use async_trait::async_trait;

    /// Encoder that must not be reached; the empty-eligible path short-circuits
    /// before any encoding happens.
    struct UnreachableEncoder;

    #[async_trait]
    impl TextEncoder for UnreachableEncoder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::Inference("encoder should not be called".to_string()))
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::Inference("encoder should not be called".to_string()))
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "unreachable-stub"
        }
    }

    fn state_for(server_url: String) -> AppState {
        let store = SupabaseClient::new(
            server_url,
            "test_key".to_string(),
            SupabaseTables {
                applicants: "users".to_string(),
                scholarships: "scholarships".to_string(),
            },
        );
        AppState {
            store: Arc::new(store),
            encoder: Arc::new(UnreachableEncoder),
            matcher: Matcher::with_default_top_k(),
        }
    }

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[actix_web::test]
    async fn test_empty_eligible_set_is_successful() {
        let mut server = mockito::Server::new_async().await;
        let _applicant = server
            .mock("GET", "/rest/v1/users")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "id": "app_1",
                    "age": 22,
                    "country": "Kenya",
                    "education_level": "Undergraduate",
                    "gpa": 3.2,
                    "field_of_study": "Computer Science",
                    "financial_need": true
                }]"#,
            )
            .create_async()
            .await;
        let _scholarships = server
            .mock("GET", "/rest/v1/scholarships")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "id": "sch_1",
                    "name": "Elite Grant",
                    "description": "High achievers only",
                    "requirements": "Transcript",
                    "min_gpa": 3.9,
                    "amount": 10000.0,
                    "deadline": "2026-12-31",
                    "application_url": "https://example.org/apply"
                }]"#,
            )
            .create_async()
            .await;

        let app = init_service(
            App::new()
                .app_data(web::Data::new(state_for(server.url())))
                .configure(configure),
        )
        .await;

        let req = TestRequest::post()
            .uri("/match")
            .set_json(serde_json::json!({"applicant_id": "app_1"}))
            .to_request();
        let response: MatchResponse = call_and_read_body_json(&app, req).await;

        assert!(response.success);
        assert!(response.matches.is_empty());
        assert_eq!(
            response.message.as_deref(),
            Some("No eligible scholarships found")
        );
    }

    #[actix_web::test]
    async fn test_unknown_applicant_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _applicant = server
            .mock("GET", "/rest/v1/users")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let app = init_service(
            App::new()
                .app_data(web::Data::new(state_for(server.url())))
                .configure(configure),
        )
        .await;

        let req = TestRequest::post()
            .uri("/match")
            .set_json(serde_json::json!({"applicant_id": "ghost"}))
            .to_request();
        let response = call_service(&app, req).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
