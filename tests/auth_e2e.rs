//! End-to-end tests for the mock authentication flow.

use mockdrive::config::SimulationConfig;
use mockdrive::{Config, MockDriveError, Simulator, DEMO_EMAIL, DEMO_PASSWORD};

fn setup() -> Simulator {
    let mut config = Config::default();
    config.simulation = SimulationConfig::instant();
    Simulator::with_demo_data(config).unwrap()
}

#[tokio::test]
async fn test_login_current_user_round_trip() {
    let sim = setup();

    let pair = sim.auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
    assert_ne!(pair.access, pair.refresh);

    let user = sim.auth.current_user(&pair.access).await.unwrap();
    assert_eq!(user.email, DEMO_EMAIL);

    // The token identity matches the owner of the seeded nodes.
    let username = sim.auth.username_for(&pair.access).await.unwrap();
    let root = sim.files.list_files("/").await.unwrap();
    assert!(root
        .iter()
        .all(|n| n.owner_username.as_deref() == Some(username.as_str())));
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let sim = setup();

    let err = sim.auth.login(DEMO_EMAIL, "letmein").await.unwrap_err();
    assert!(matches!(err, MockDriveError::Auth(_)));
    assert_eq!(err.to_api().status_code, 401);

    let err = sim.auth.login("", "").await.unwrap_err();
    assert_eq!(err.to_api().status_code, 400);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let sim = setup();
    let err = sim.auth.current_user("garbage.token.here").await.unwrap_err();
    assert!(matches!(err, MockDriveError::Auth(_)));
}

#[tokio::test]
async fn test_refresh_and_logout_cycle() {
    let sim = setup();
    let pair = sim.auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

    // Refresh works while the token is live.
    let fresh = sim.auth.refresh(&pair.refresh).await.unwrap();
    assert!(sim.auth.current_user(&fresh.access).await.is_ok());

    // After logout the original refresh token is dead.
    sim.auth.logout(&pair.refresh).await.unwrap();
    let err = sim.auth.refresh(&pair.refresh).await.unwrap_err();
    assert!(matches!(err, MockDriveError::Auth(_)));

    // The pair obtained before logout still refreshes independently.
    assert!(sim.auth.refresh(&fresh.refresh).await.is_ok());
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let sim = setup();
    let pair = sim.auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

    let err = sim.auth.refresh(&pair.access).await.unwrap_err();
    assert!(matches!(err, MockDriveError::Auth(_)));
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let sim = setup();
    let secret = sim.config().auth.jwt_secret.clone();

    // Craft an access token that expired an hour ago, signed with the
    // simulator's own secret.
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = mockdrive::Claims {
        sub: uuid::Uuid::new_v4().to_string(),
        email: DEMO_EMAIL.to_string(),
        token_type: "access".to_string(),
        jti: uuid::Uuid::new_v4().to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let stale = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let err = sim.auth.current_user(&stale).await.unwrap_err();
    assert!(matches!(err, MockDriveError::Auth(_)));
}
