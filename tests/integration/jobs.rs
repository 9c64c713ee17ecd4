use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn company_can_create_a_job() {
        let app = TestApp::spawn().await;
        let token = app.create_company("acme_hr", "Acme").await;

        let res = app
            .post_with_token(
                routes::JOBS_CREATE,
                &json!({
                    "title": "Backend Engineer",
                    "description": "Build and run the backend.",
                    "location": "Remote",
                    "skills_required": "Go,SQL",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["title"], "Backend Engineer");
        assert_eq!(res.body["company_name"], "Acme");
        assert!(res.body["posted_at"].is_string());
    }

    #[tokio::test]
    async fn client_supplied_company_name_is_ignored() {
        let app = TestApp::spawn().await;
        let token = app.create_company("acme_hr", "Acme").await;

        let res = app
            .post_with_token(
                routes::JOBS_CREATE,
                &json!({
                    "title": "Backend Engineer",
                    "description": "Build and run the backend.",
                    "location": "Remote",
                    "skills_required": "Go,SQL",
                    "company_name": "Somebody Else",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["company_name"], "Acme");
    }

    #[tokio::test]
    async fn freelancer_cannot_create_a_job() {
        let app = TestApp::spawn().await;
        let token = app.create_freelancer("alice").await;

        let res = app
            .post_with_token(
                routes::JOBS_CREATE,
                &json!({
                    "title": "Backend Engineer",
                    "description": "Build and run the backend.",
                    "location": "Remote",
                    "skills_required": "Go,SQL",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        // No record was created.
        let jobs = app.get_without_token(routes::JOBS).await;
        assert_eq!(jobs.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn anonymous_caller_cannot_create_a_job() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::JOBS_CREATE,
                &json!({
                    "title": "Backend Engineer",
                    "description": "Build and run the backend.",
                    "location": "Remote",
                    "skills_required": "Go,SQL",
                }),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn blank_title_fails_with_400() {
        let app = TestApp::spawn().await;
        let token = app.create_company("acme_hr", "Acme").await;

        let res = app
            .post_with_token(
                routes::JOBS_CREATE,
                &json!({
                    "title": "   ",
                    "description": "Build and run the backend.",
                    "location": "Remote",
                    "skills_required": "Go,SQL",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod listing {
    use super::*;

    async fn seed_jobs(app: &TestApp) -> String {
        let token = app.create_company("acme_hr", "Acme").await;
        app.create_job(&token, "Backend Engineer", "Berlin", "Go,SQL").await;
        app.create_job(&token, "Frontend Engineer", "Hamburg", "TypeScript").await;
        app.create_job(&token, "Data Engineer", "berlin kreuzberg", "Python,SQL").await;
        token
    }

    #[tokio::test]
    async fn anonymous_caller_can_list_jobs() {
        let app = TestApp::spawn().await;
        seed_jobs(&app).await;

        let res = app.get_without_token(routes::JOBS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 3);
        assert_eq!(res.body[0]["company_name"], "Acme");
    }

    #[tokio::test]
    async fn location_filter_is_case_insensitive_substring() {
        let app = TestApp::spawn().await;
        seed_jobs(&app).await;

        let res = app
            .get_without_token(&format!("{}?location=Berlin", routes::JOBS))
            .await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"Backend Engineer"));
        assert!(titles.contains(&"Data Engineer"));
    }

    #[tokio::test]
    async fn skills_filter_matches_substring() {
        let app = TestApp::spawn().await;
        seed_jobs(&app).await;

        let res = app
            .get_without_token(&format!("{}?skills=go", routes::JOBS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 1);
        assert_eq!(res.body[0]["title"], "Backend Engineer");
    }

    #[tokio::test]
    async fn filters_combine() {
        let app = TestApp::spawn().await;
        seed_jobs(&app).await;

        let res = app
            .get_without_token(&format!("{}?location=berlin&skills=SQL", routes::JOBS))
            .await;

        assert_eq!(res.status, 200);
        let arr = res.body.as_array().unwrap();
        assert_eq!(arr.len(), 2);
    }

    #[tokio::test]
    async fn non_matching_filter_returns_empty_list() {
        let app = TestApp::spawn().await;
        seed_jobs(&app).await;

        let res = app
            .get_without_token(&format!("{}?location=Paris", routes::JOBS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }
}

mod own_jobs {
    use super::*;

    #[tokio::test]
    async fn my_jobs_lists_only_own_postings() {
        let app = TestApp::spawn().await;
        let acme = app.create_company("acme_hr", "Acme").await;
        let other = app.create_company("other_hr", "Other").await;
        app.create_job(&acme, "Backend Engineer", "Berlin", "Go").await;
        app.create_job(&other, "Accountant", "Munich", "Excel").await;

        let res = app.get_with_token(routes::MY_JOBS, &acme).await;

        assert_eq!(res.status, 200);
        let arr = res.body.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["title"], "Backend Engineer");
    }

    #[tokio::test]
    async fn freelancer_cannot_list_my_jobs() {
        let app = TestApp::spawn().await;
        let token = app.create_freelancer("alice").await;

        let res = app.get_with_token(routes::MY_JOBS, &token).await;

        assert_eq!(res.status, 403);
    }
}

mod mutation {
    use super::*;

    #[tokio::test]
    async fn owner_can_partially_update_a_job() {
        let app = TestApp::spawn().await;
        let token = app.create_company("acme_hr", "Acme").await;
        let job_id = app.create_job(&token, "Backend Engineer", "Berlin", "Go").await;

        let res = app
            .put_with_token(&routes::my_job(job_id), &json!({"location": "Remote"}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["location"], "Remote");
        assert_eq!(res.body["title"], "Backend Engineer");
    }

    #[tokio::test]
    async fn unknown_job_id_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.create_company("acme_hr", "Acme").await;

        let res = app
            .put_with_token(&routes::my_job(999), &json!({"location": "Remote"}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn another_company_cannot_update_the_job() {
        let app = TestApp::spawn().await;
        let acme = app.create_company("acme_hr", "Acme").await;
        let other = app.create_company("other_hr", "Other").await;
        let job_id = app.create_job(&acme, "Backend Engineer", "Berlin", "Go").await;

        let res = app
            .put_with_token(&routes::my_job(job_id), &json!({"title": "Hijacked"}), &other)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        // The job is unchanged.
        let mine = app.get_with_token(routes::MY_JOBS, &acme).await;
        assert_eq!(mine.body[0]["title"], "Backend Engineer");
    }

    #[tokio::test]
    async fn owner_can_delete_a_job() {
        let app = TestApp::spawn().await;
        let token = app.create_company("acme_hr", "Acme").await;
        let job_id = app.create_job(&token, "Backend Engineer", "Berlin", "Go").await;

        let res = app.delete_with_token(&routes::my_job(job_id), &token).await;
        assert_eq!(res.status, 204);

        let jobs = app.get_without_token(routes::JOBS).await;
        assert_eq!(jobs.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn another_company_cannot_delete_the_job() {
        let app = TestApp::spawn().await;
        let acme = app.create_company("acme_hr", "Acme").await;
        let other = app.create_company("other_hr", "Other").await;
        let job_id = app.create_job(&acme, "Backend Engineer", "Berlin", "Go").await;

        let res = app.delete_with_token(&routes::my_job(job_id), &other).await;

        assert_eq!(res.status, 403);

        let jobs = app.get_without_token(routes::JOBS).await;
        assert_eq!(jobs.body.as_array().unwrap().len(), 1);
    }
}
