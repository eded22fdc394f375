use super::prepare;
use crate::config::ServerConfig;
use crate::renderers::html::MEDIA_TYPE;
use actix_web::{web, HttpResponse};
use common::requests::SurveySubmission;

pub(crate) async fn process(
    config: web::Data<ServerConfig>,
    payload: web::Json<SurveySubmission>,
) -> HttpResponse {
    match prepare(payload.into_inner(), &config) {
        Ok(prepared) => HttpResponse::Ok()
            .content_type(MEDIA_TYPE)
            .body(prepared.body.into_string()),
        Err(rejection) => rejection.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ServerConfig;
    use crate::job_controller::state::JobsState;
    use crate::services::surveys::configure_routes;
    use crate::test_support::submission_json;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::options::RenderOptions;
    use serde_json::{json, Value};

    macro_rules! app {
        ($config:expr) => {{
            let (state, _rx) = JobsState::new(1);
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .app_data(web::Data::new($config))
                    .service(configure_routes()),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn preview_returns_composed_html() {
        let config = ServerConfig {
            render_options: RenderOptions::new("ULP Cikarang Kota"),
            ..ServerConfig::default()
        };
        let app = app!(config);
        let req = test::TestRequest::post()
            .uri("/api/surveys/preview")
            .set_json(submission_json("PT. Mekarjaya Propertindo"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<td class=\"value\">PT. Mekarjaya Propertindo</td>"));
        assert!(html.contains("<td class=\"value\">Senin, 15 Januari 2024</td>"));
        assert!(html.contains("<p class=\"heading\">ULP Cikarang Kota</p>"));
    }

    #[actix_web::test]
    async fn request_unit_name_wins_over_configuration() {
        let app = app!(ServerConfig::default());
        let mut submission = submission_json("Budi");
        submission["unitName"] = json!("ULP Lemahabang");
        let req = test::TestRequest::post()
            .uri("/api/surveys/preview")
            .set_json(submission)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(html.contains("<p class=\"heading\">ULP Lemahabang</p>"));
    }

    #[actix_web::test]
    async fn whitespace_name_is_rejected() {
        let app = app!(ServerConfig::default());
        let req = test::TestRequest::post()
            .uri("/api/surveys/preview")
            .set_json(submission_json("   "))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["field"], "customerName");
        assert_eq!(body["error"], "customer name is required");
    }

    #[actix_web::test]
    async fn blank_tariff_override_is_rejected() {
        let app = app!(ServerConfig::default());
        let mut submission = submission_json("Budi");
        submission["tariff"] = json!({ "source": "other", "value": "" });
        let req = test::TestRequest::post()
            .uri("/api/surveys/preview")
            .set_json(submission)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["field"], "tariff");
    }

    #[actix_web::test]
    async fn override_tariff_is_printed_verbatim() {
        let app = app!(ServerConfig::default());
        let mut submission = submission_json("Budi");
        submission["tariff"] = json!({ "source": "other", "value": "K / 16500VA" });
        let req = test::TestRequest::post()
            .uri("/api/surveys/preview")
            .set_json(submission)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(html.contains("<td class=\"value\">Pasang Baru / K / 16500VA</td>"));
    }
}
