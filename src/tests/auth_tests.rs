    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::repository::{CollectionConfig, Repository};
    use crate::store::JsonStore;
    use crate::users::USERS_COLLECTION;

    const SECRET: &str = "test-secret";

    fn authenticator() -> Authenticator {
        let repo = Repository::new(
            Arc::new(JsonStore::in_memory()),
            CollectionConfig::new(USERS_COLLECTION),
        );
        Authenticator::new(
            &AuthConfig {
                jwt_secret: SECRET.to_string(),
                token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            },
            UsersService::new(repo),
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "password1".to_string(),
            password_confirm: "password1".to_string(),
            civility: Some(0),
            firstname: "John".to_string(),
            lastname: "Smith".to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn stored_refresh(auth: &Authenticator, email: &str) -> Option<String> {
        auth.users()
            .find_by_username(email)
            .await
            .expect("find")
            .and_then(|u| u.refresh)
    }

    #[tokio::test]
    async fn login_issues_token_carrying_principal_id() {
        let auth = authenticator();
        let user = auth
            .users()
            .create_user(&register_request("john@example.com"))
            .await
            .expect("create");
        let id = user.id.clone().expect("id");

        let resp = auth
            .login(&credentials("john@example.com", "password1"))
            .await
            .expect("login");
        assert_eq!(resp.username, "john@example.com");
        assert!(resp.rights.is_empty());

        let claims = TokenSigner::new(SECRET, DEFAULT_TOKEN_TTL_SECS)
            .verify(&resp.token)
            .expect("verify");
        assert_eq!(claims.id, id);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS as i64);

        let refresh = resp.refresh.expect("refresh issued");
        assert!(refresh.starts_with(&format!("{}.", id)));
        assert_eq!(
            stored_refresh(&auth, "john@example.com").await,
            Some(refresh)
        );
    }

    #[tokio::test]
    async fn bad_credentials_do_not_write_refresh() {
        let auth = authenticator();
        auth.users()
            .create_user(&register_request("john@example.com"))
            .await
            .expect("create");

        let err = auth
            .login(&credentials("john@example.com", "wrong-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(ref m) if m == ERR_USER_CREDENTIALS));
        assert_eq!(stored_refresh(&auth, "john@example.com").await, None);

        let err = auth
            .login(&credentials("nobody@example.com", "password1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn register_validates_then_signs_in() {
        let auth = authenticator();
        let resp = auth
            .register(&register_request("new@example.com"))
            .await
            .expect("register");
        assert!(resp.refresh.is_some());
        assert_eq!(resp.username, "new@example.com");

        let err = auth
            .register(&register_request("new@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), crate::error::ERR_USER_EXISTS);

        let mut bad = register_request("other@example.com");
        bad.password_confirm = "mismatch1".to_string();
        assert!(matches!(
            auth.register(&bad).await,
            Err(ApiError::UnprocessableEntity { .. })
        ));
    }

    #[tokio::test]
    async fn verify_rereads_rights_from_storage() {
        let auth = authenticator();
        let user = auth
            .users()
            .create_user(&register_request("john@example.com"))
            .await
            .expect("create");
        let id = user.id.clone().expect("id");
        let token = auth.issue_access_token(&id).expect("token");

        let before = auth.verify_access_token(&token).await.expect("verify");
        assert!(before.rights.is_empty());

        auth.users()
            .save_user_rights(&id, vec![rights::R_API_LANGUAGE_R.to_string()])
            .await
            .expect("rights");
        let after = auth.verify_access_token(&token).await.expect("verify");
        assert_eq!(after.rights, vec![rights::R_API_LANGUAGE_R.to_string()]);

        auth.users().remove(&id).await.expect("remove");
        assert!(matches!(
            auth.verify_access_token(&token).await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn expired_or_foreign_tokens_are_rejected() {
        let auth = authenticator();
        let id = crate::model::ObjectId::generate().expect("id");

        let signer = TokenSigner::new(SECRET, 120);
        let expired = signer
            .sign_at(id.as_str(), time::OffsetDateTime::now_utc().unix_timestamp() - 600)
            .expect("sign");
        assert!(matches!(
            auth.verify_access_token(&expired).await,
            Err(ApiError::Unauthorized(_))
        ));

        let foreign = TokenSigner::new("other-secret", 120)
            .sign(id.as_str())
            .expect("sign");
        assert!(matches!(
            auth.verify_access_token(&foreign).await,
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            auth.verify_access_token("garbage").await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn refresh_exchange_and_reject() {
        let auth = authenticator();
        let resp = auth
            .register(&register_request("john@example.com"))
            .await
            .expect("register");
        let refresh = resp.refresh.clone().expect("refresh");

        let exchanged = auth
            .exchange_refresh_token(Some(&refresh))
            .await
            .expect("exchange");
        assert!(exchanged.refresh.is_none());
        assert_eq!(exchanged.username, "john@example.com");

        assert!(matches!(
            auth.exchange_refresh_token(Some("unknown.value")).await,
            Err(ApiError::InvalidRefresh)
        ));
        assert!(matches!(
            auth.exchange_refresh_token(None).await,
            Err(ApiError::TokenRequired)
        ));

        let principal = auth
            .verify_access_token(&exchanged.token)
            .await
            .expect("verify");
        assert!(matches!(
            auth.reject_refresh_token(&principal, Some("wrong")).await,
            Err(ApiError::InvalidRefresh)
        ));
        auth.reject_refresh_token(&principal, Some(&refresh))
            .await
            .expect("reject");
        assert_eq!(stored_refresh(&auth, "john@example.com").await, None);
        assert!(matches!(
            auth.exchange_refresh_token(Some(&refresh)).await,
            Err(ApiError::InvalidRefresh)
        ));
    }

    #[tokio::test]
    async fn reissued_refresh_replaces_previous_value() {
        let auth = authenticator();
        let first = auth
            .register(&register_request("john@example.com"))
            .await
            .expect("register")
            .refresh
            .expect("refresh");
        let second = auth
            .login(&credentials("john@example.com", "password1"))
            .await
            .expect("login")
            .refresh
            .expect("refresh");
        assert_ne!(first, second);
        assert!(matches!(
            auth.exchange_refresh_token(Some(&first)).await,
            Err(ApiError::InvalidRefresh)
        ));
        auth.exchange_refresh_token(Some(&second))
            .await
            .expect("current value works");
    }

    #[tokio::test]
    async fn system_principal_holds_every_right() {
        let auth = authenticator();
        let admin = auth
            .users()
            .ensure_system_user("admin@example.com", "adminpass")
            .await
            .expect("seed")
            .expect("created");
        let token = auth
            .issue_access_token(admin.id.as_deref().expect("id"))
            .expect("token");
        let principal = auth.verify_access_token(&token).await.expect("verify");
        assert!(principal.system);
        assert_eq!(principal.rights, rights::all());
        authorize(&principal, &["R_SOMETHING_NEW"]).expect("system passes anything");
    }

    #[test]
    fn authorize_requires_a_shared_code() {
        let plain = Principal {
            id: "u".to_string(),
            username: "u@example.com".to_string(),
            rights: Vec::new(),
            system: false,
        };
        assert!(matches!(
            authorize(&plain, &[rights::R_API_USER_R]),
            Err(ApiError::Forbidden(_))
        ));
        assert!(authorize(&plain, &[]).is_err());

        let reader = Principal {
            rights: vec![rights::R_API_USER_R.to_string()],
            ..plain
        };
        authorize(&reader, rights::USER_RIGHTS).expect("any user right");
        assert!(authorize(&reader, &[rights::R_API_USER_D]).is_err());
    }

    #[tokio::test]
    async fn password_hashing_yields_to_other_tasks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        tokio::spawn(async move {
            loop {
                counter.fetch_add(1, Ordering::Relaxed);
                tokio::task::yield_now().await;
            }
        });

        let hashed = hash_password_blocking("password1").await.expect("hash");
        assert!(ticks.load(Ordering::Relaxed) > 0);
        assert!(verify_password_blocking("password1", &hashed.hash)
            .await
            .expect("verify"));
    }
