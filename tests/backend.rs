use std::collections::HashMap;
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::NaiveDate;
use serde_json::{json, Value};

use voxdash::agent::page::AgentsPage;
use voxdash::campaign::page::SettingsPage;
use voxdash::campaign::CampaignStatus;
use voxdash::clients::page::ClientsPage;
use voxdash::dashboard::page::DashboardPage;
use voxdash::settings::extend_campaign;
use voxdash::{DashboardConfig, Error, RestBackend};

fn config_body() -> Value {
    json!({
        "config": {
            "campaign_id": "spring-2024",
            "status": "paused",
            "campaign_name": "Spring outreach",
            "campaign_type": "mixed",
            "medicare_settings": {
                "enabled": true,
                "max_email_attempts": 6,
                "email_cadence_days": [0, 3, 7, 14],
                "email_templates": ["intro", "follow_up"]
            },
            "non_medicare_call_settings": {
                "enabled": true,
                "max_call_attempts": 3,
                "call_cadence_days": [0, 2, 5],
                "stop_conditions": ["interested", "dnc_requested"]
            },
            "non_medicare_email_settings": {
                "enabled": false,
                "max_email_attempts": 4,
                "email_cadence_days": [1, 8]
            },
            "max_daily_emails_per_client": 1,
            "max_daily_calls_per_client": 2,
            "min_hours_between_contacts": 24,
            "business_hours": { "start_hour": 9, "end_hour": 17, "timezone": "America/Chicago" },
            "campaign_end_date": "2024-03-31",
            "auto_extend_days": 30
        }
    })
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dashboard")
            .route(
                "/campaign/config",
                web::get().to(|| async { HttpResponse::Ok().json(config_body()) }),
            )
            .route(
                "/campaign/config/anti-spam",
                web::patch().to(|body: web::Json<Value>| async move {
                    if body.get("max_daily_calls_per_client") == Some(&json!(9)) {
                        HttpResponse::UnprocessableEntity()
                            .json(json!({ "detail": "max_daily_calls_per_client must be at most 5" }))
                    } else {
                        HttpResponse::Ok().json(json!({ "success": true }))
                    }
                }),
            )
            .route(
                "/campaign/start",
                web::post().to(|| async {
                    HttpResponse::ServiceUnavailable().body(vec![b'x'; 9 * 1024 * 1024])
                }),
            )
            .route(
                "/campaign/stop",
                web::post().to(|| async {
                    HttpResponse::Conflict().json(json!({ "detail": "Campaign is not running" }))
                }),
            )
            .route(
                "/agents",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "agents": [{
                            "id": "a1",
                            "agent_id": "agent_a1",
                            "name": "Dana Reyes",
                            "email": "dana@example.com",
                            "google_calendar_id": "dana@example.com",
                            "timezone": "America/Denver",
                            "working_hours": "8AM-4PM",
                            "client_count": 3,
                            "is_active": true
                        }]
                    }))
                }),
            )
            .route(
                "/agents/{id}",
                web::delete().to(|| async {
                    HttpResponse::NotFound().json(json!({ "detail": "Agent not found" }))
                }),
            )
            .route(
                "/clients",
                web::get().to(|query: web::Query<HashMap<String, String>>| async move {
                    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
                    if query.get("tag").map(String::as_str) == Some("null-contact") {
                        return HttpResponse::Ok().json(json!({
                            "clients": [{ "id": "c9", "name": "Ana Cruz", "email": null, "phone": null }],
                            "total": 1,
                            "page": page
                        }));
                    }
                    HttpResponse::Ok().json(json!({
                        "clients": [{
                            "id": "c1",
                            "name": query.get("search").cloned().unwrap_or_default(),
                            "client_type": query.get("client_type").cloned().unwrap_or_default(),
                            "tags": query.keys().cloned().collect::<Vec<_>>()
                        }],
                        "total": 75,
                        "page": page
                    }))
                }),
            )
            .route(
                "/stats",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({ "total_clients": 40, "completion_rate": 12.5 }))
                }),
            )
            .route(
                "/call-logs",
                web::get().to(|query: web::Query<HashMap<String, String>>| async move {
                    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
                    let logs: Vec<Value> = (0..limit)
                        .map(|i| json!({ "call_id": format!("call-{}", i), "outcome": "no_answer" }))
                        .collect();
                    HttpResponse::Ok().json(json!({ "logs": logs }))
                }),
            )
            .route(
                "/api/settings",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "max_call_attempts": 5,
                        "campaign_end_date": "2024-01-20",
                        "auto_extend_days": 30,
                        "calling_window": { "start": 9, "end": 18 }
                    }))
                }),
            )
            .route(
                "/api/settings",
                web::put().to(|body: web::Json<Value>| async move { HttpResponse::Ok().json(body.into_inner()) }),
            ),
    );
}

async fn start_backend() -> RestBackend {
    let server = HttpServer::new(|| App::new().configure(routes))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    let config = DashboardConfig::new(format!("http://{}", addr), Duration::from_secs(5));
    RestBackend::from_config(&config)
}

#[actix_rt::test]
async fn loads_the_nested_config() {
    let backend = start_backend().await;
    let mut page = SettingsPage::new();

    page.load(&backend).await.unwrap();

    let config = page.config().unwrap();
    assert_eq!(config.status, CampaignStatus::Paused);
    assert_eq!(config.non_medicare_call_settings.call_cadence_days, vec![0, 2, 5]);
    assert_eq!(config.anti_spam.max_daily_calls_per_client, 2);
    assert_eq!(config.campaign_end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    assert_eq!(config.business_hours.as_ref().unwrap().timezone, "America/Chicago");
}

#[actix_rt::test]
async fn rejected_anti_spam_save_surfaces_detail() {
    let backend = start_backend().await;
    let mut page = SettingsPage::new();
    page.load(&backend).await.unwrap();

    page.config_mut().unwrap().anti_spam.apply_max_daily_calls("9");
    let edited = page.config().cloned();
    let result = page.save_anti_spam(&backend).await;

    match result {
        Err(Error::UnexpectedStatus { status, .. }) => assert_eq!(status, 422),
        other => panic!("expected a rejection, got {:?}", other),
    }
    assert_eq!(page.config().cloned(), edited);
    assert_eq!(
        page.notifications().latest().unwrap().message,
        "max_daily_calls_per_client must be at most 5"
    );

    page.config_mut().unwrap().anti_spam.apply_max_daily_calls("2");
    page.save_anti_spam(&backend).await.unwrap();
    assert_eq!(
        page.notifications().latest().unwrap().message,
        "Anti-spam settings saved!"
    );
}

#[actix_rt::test]
async fn stop_conflict_keeps_status() {
    let backend = start_backend().await;
    let mut page = SettingsPage::new();
    page.load(&backend).await.unwrap();

    assert!(page.stop_campaign(&backend, true).await.is_err());

    assert_eq!(page.config().unwrap().status, CampaignStatus::Paused);
    assert_eq!(
        page.notifications().latest().unwrap().message,
        "Campaign is not running"
    );
}

#[actix_rt::test]
async fn oversized_error_body_is_still_a_rejection() {
    let backend = start_backend().await;
    let mut page = SettingsPage::new();
    page.load(&backend).await.unwrap();

    let error = page.start_campaign(&backend).await.unwrap_err();

    assert_eq!(error, Error::UnexpectedStatus { status: 503, detail: None });
    assert_eq!(page.config().unwrap().status, CampaignStatus::Paused);
    assert_eq!(
        page.notifications().latest().unwrap().message,
        "Failed to start campaign"
    );
}

#[actix_rt::test]
async fn clients_with_null_fields_still_list() {
    let backend = start_backend().await;
    let mut page = ClientsPage::new();
    page.set_tag(Some("null-contact".into()));

    page.load(&backend, 1).await.unwrap();

    assert_eq!(page.clients().len(), 1);
    assert_eq!(page.clients()[0].email, "");
    assert_eq!(page.clients()[0].phone, "");
}

#[actix_rt::test]
async fn agents_decode_and_missing_agent_is_reported() {
    let backend = start_backend().await;
    let mut page = AgentsPage::new();
    page.load(&backend).await.unwrap();

    let agent = &page.agents()[0];
    assert_eq!(agent.working_hours().slots(), vec![8, 9, 10, 11, 12, 13, 14, 15]);

    let agent_id = agent.id.clone();
    assert!(page.deactivate(&backend, &agent_id, true).await.is_err());
    assert_eq!(page.notifications().latest().unwrap().message, "Agent not found");
}

#[actix_rt::test]
async fn client_filters_reach_the_query_string() {
    let backend = start_backend().await;
    let mut page = ClientsPage::new();
    page.set_search(Some("Ana Cruz".into()));
    page.set_client_type(Some("medicare".into()));

    page.load(&backend, 2).await.unwrap();

    let client = &page.clients()[0];
    assert_eq!(client.name, "Ana Cruz");
    assert_eq!(client.client_type.as_str(), "medicare");
    let mut keys = client.tags.clone();
    keys.sort();
    assert_eq!(keys, vec!["client_type", "page", "page_size", "search"]);
    assert_eq!(page.page(), 2);
    assert_eq!(page.page_count(), 2);
}

#[actix_rt::test]
async fn dashboard_refresh_joins_stats_and_logs() {
    let backend = start_backend().await;
    let mut page = DashboardPage::new();

    page.refresh(&backend, 3).await.unwrap();

    assert_eq!(page.stats().unwrap().total_clients, 40);
    assert_eq!(page.call_logs().len(), 3);
}

#[actix_rt::test]
async fn extend_round_trips_unknown_settings() {
    let backend = start_backend().await;
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

    let stored = extend_campaign(&backend, None, today).await.unwrap();

    assert_eq!(stored.campaign_end_date, NaiveDate::from_ymd_opt(2024, 2, 19));
    assert_eq!(stored.max_call_attempts, 5);
    assert_eq!(stored.extra.get("calling_window"), Some(&json!({ "start": 9, "end": 18 })));
}

#[actix_rt::test]
async fn unreachable_backend_is_an_error_not_a_rejection() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = DashboardConfig::new(format!("http://{}", addr), Duration::from_secs(2));
    let backend = RestBackend::from_config(&config);
    let mut page = SettingsPage::new();

    let error = page.load(&backend).await.unwrap_err();

    assert!(error.is_network_or_server());
    assert_eq!(error.detail(), None);
    assert_eq!(
        page.notifications().latest().unwrap().message,
        "Error loading configuration"
    );
}
