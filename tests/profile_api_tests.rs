
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn create_profile_returns_201_with_id() {
    let app = TestApp::spawn().await;

    let response = app
        .create_profile(&sample_profile("Ada", "ada@example.com", "Kampala", &["Rust"]))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Profile created successfully");
    assert!(body["id"].as_i64().unwrap() >= 1);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn invalid_payload_returns_400_and_writes_nothing() {
    let app = TestApp::spawn().await;

    let response = app
        .create_profile(&json!({
            "email": "not-an-email",
            "skills": "Rust"
        }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(
        errors,
        &vec![
            json!("Name is required"),
            json!("Valid email is required"),
            json!("Skills must be an array"),
        ]
    );

    // nothing reached the store
    let listing: Value = app.list(1, 6).await.json().await.unwrap();
    assert_eq!(listing["pagination"]["totalProfiles"], 0);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn duplicate_email_returns_400_and_keeps_one_row() {
    let app = TestApp::spawn().await;
    let profile = sample_profile("Ada", "ada@example.com", "Kampala", &["Rust"]);

    let first = app.create_profile(&profile).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.create_profile(&profile).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "Email already exists");

    let listing: Value = app.list(1, 6).await.json().await.unwrap();
    assert_eq!(listing["pagination"]["totalProfiles"], 1);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn skills_round_trip_in_order() {
    let app = TestApp::spawn().await;

    let created: Value = app
        .create_profile(&sample_profile("Ada", "ada@example.com", "Kampala", &["Go", "Rust"]))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let profile: Value = app.get_by_id(id).await.json().await.unwrap();
    assert_eq!(profile["skills"], json!(["Go", "Rust"]));
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn seven_profiles_paginate_into_two_pages() {
    let app = TestApp::spawn().await;
    for i in 0..7 {
        let response = app
            .create_profile(&sample_profile(
                &format!("Dev {i}"),
                &format!("dev{i}@example.com"),
                "Kampala",
                &["Rust"],
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body: Value = app.list(2, 6).await.json().await.unwrap();

    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["totalProfiles"], 7);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], true);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn page_past_the_end_is_empty_but_metadata_is_intact() {
    let app = TestApp::spawn().await;
    for i in 0..7 {
        app.create_profile(&sample_profile(
            &format!("Dev {i}"),
            &format!("dev{i}@example.com"),
            "Kampala",
            &["Rust"],
        ))
        .await;
    }

    let body: Value = app.list(5, 6).await.json().await.unwrap();

    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["totalProfiles"], 7);
    assert_eq!(body["pagination"]["totalPages"], 2);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn listing_is_stable_between_identical_requests() {
    let app = TestApp::spawn().await;
    for i in 0..3 {
        app.create_profile(&sample_profile(
            &format!("Dev {i}"),
            &format!("dev{i}@example.com"),
            "Kampala",
            &["Rust"],
        ))
        .await;
    }

    let first: Value = app.list(1, 6).await.json().await.unwrap();
    let second: Value = app.list(1, 6).await.json().await.unwrap();
    assert_eq!(first, second);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn search_matches_location_substring_or_exact_skill() {
    let app = TestApp::spawn().await;
    app.create_profile(&sample_profile("Ada", "ada@example.com", "Remote", &["Rust"]))
        .await;
    app.create_profile(&sample_profile("Grace", "grace@example.com", "Kampala", &["Go"]))
        .await;
    app.create_profile(&sample_profile("Linus", "linus@example.com", "Nairobi", &["C"]))
        .await;

    // exactly one profile has location "Remote" and none has that skill
    let matches: Vec<Value> = app.search("Remote").await.json().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Ada");

    // skill containment is exact, not substring
    let matches: Vec<Value> = app.search("Go").await.json().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Grace");

    let matches: Vec<Value> = app.search("G").await.json().await.unwrap();
    assert!(matches.is_empty());
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn unknown_id_returns_404() {
    let app = TestApp::spawn().await;

    let response = app.get_by_id(9999).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn update_overwrites_the_full_record() {
    let app = TestApp::spawn().await;
    let created: Value = app
        .create_profile(&sample_profile("Ada", "ada@example.com", "Kampala", &["Rust"]))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let response = app
        .update(id, &sample_profile("Ada L.", "ada@example.com", "Remote", &["Rust", "Go"]))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Profile updated successfully");

    let profile: Value = app.get_by_id(id).await.json().await.unwrap();
    assert_eq!(profile["name"], "Ada L.");
    assert_eq!(profile["location"], "Remote");
    assert_eq!(profile["skills"], json!(["Rust", "Go"]));
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn update_of_unknown_id_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .update(424242, &sample_profile("Ada", "ada@example.com", "Kampala", &["Rust"]))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[ignore = "requires a running Postgres (set APP_DATABASE_URL)"]
async fn client_view_state_round_trips_against_the_live_server() {
    use devdir_backend::client::{api::ProfileApi, view_state::ViewState};

    let app = TestApp::spawn().await;
    for i in 0..7 {
        app.create_profile(&sample_profile(
            &format!("Dev {i}"),
            &format!("dev{i}@example.com"),
            if i == 0 { "Remote" } else { "Kampala" },
            &["Rust"],
        ))
        .await;
    }

    let api = ProfileApi::new(app.address.clone());
    let mut state = ViewState::new();

    state.load_page(&api, 1).await.unwrap();
    assert_eq!(state.items.len(), 6);
    assert_eq!(state.total_profiles, 7);
    assert_eq!(state.total_pages, 2);

    state.run_search(&api, "Remote").await.unwrap();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.total_pages, 1);

    // blank term clears the search and reloads page one
    state.run_search(&api, "   ").await.unwrap();
    assert_eq!(state.items.len(), 6);
    assert_eq!(state.current_page, 1);
}
