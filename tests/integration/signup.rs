use serde_json::json;

use crate::common::{TestApp, routes};

fn freelancer_body(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "securepass",
        "skills": "Go, SQL",
    })
}

fn company_body(username: &str, company_name: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "securepass",
        "company_name": company_name,
    })
}

mod freelancer_signup {
    use super::*;

    #[tokio::test]
    async fn creates_account_with_freelancer_role() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP_FREELANCER, &freelancer_body("alice"))
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["username"], "alice");
        assert_eq!(res.body["role"], "freelancer");
    }

    #[tokio::test]
    async fn duplicate_username_fails_with_400() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(routes::SIGNUP_FREELANCER, &freelancer_body("alice"))
            .await;
        assert_eq!(first.status, 201, "First signup failed: {}", first.text);

        let res = app
            .post_without_token(routes::SIGNUP_FREELANCER, &freelancer_body("alice"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn username_is_unique_across_roles() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(routes::SIGNUP_FREELANCER, &freelancer_body("alice"))
            .await;
        assert_eq!(first.status, 201, "First signup failed: {}", first.text);

        let res = app
            .post_without_token(routes::SIGNUP_COMPANY, &company_body("alice", "Acme"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn missing_required_fields_fails_with_400() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::SIGNUP_FREELANCER,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn invalid_email_fails_with_400() {
        let app = TestApp::spawn().await;
        let mut body = freelancer_body("alice");
        body["email"] = json!("not-an-email");

        let res = app.post_without_token(routes::SIGNUP_FREELANCER, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn short_password_fails_with_400() {
        let app = TestApp::spawn().await;
        let mut body = freelancer_body("alice");
        body["password"] = json!("short");

        let res = app.post_without_token(routes::SIGNUP_FREELANCER, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn no_token_is_issued_by_signup() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP_FREELANCER, &freelancer_body("alice"))
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["token"].is_null());
    }
}

mod company_signup {
    use super::*;

    #[tokio::test]
    async fn creates_account_with_company_role() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP_COMPANY, &company_body("acme_hr", "Acme"))
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["username"], "acme_hr");
        assert_eq!(res.body["role"], "company");
    }

    #[tokio::test]
    async fn empty_company_name_fails_with_400() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP_COMPANY, &company_body("acme_hr", "   "))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn failed_signup_creates_no_account() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP_COMPANY, &company_body("acme_hr", "   "))
            .await;
        assert_eq!(res.status, 400);

        let login = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "acme_hr", "password": "securepass"}),
            )
            .await;
        assert_eq!(login.status, 401);
    }
}
