mod common;

use common::{MockService, drain_events, make_store, respond_fail, respond_transport_error, settle};
use ration_api::wire::LoginResult;
use ration_bridge::user::{Gender, Goal, RegistrationForm};
use ration_bridge::{ActionOutcome, StoreEvent};
use ration_store::persist::{LocalStore, TOKEN_KEY};
use ration_store::services::auth_service;

fn registration_form() -> RegistrationForm {
    RegistrationForm {
        email: "o@example.com".to_string(),
        password: "secret".to_string(),
        name: "Oleg".to_string(),
        gender: Some(Gender::Man),
        goal: Some(Goal::Training),
        profession: None,
        weight: "80".to_string(),
        height: "182".to_string(),
        age: "31".to_string(),
    }
}

#[tokio::test]
async fn failed_login_sets_validation_and_mutates_nothing() {
    let mut mock = MockService::default();
    mock.login = respond_fail("bad credentials");
    let (context, _mock, local, _rx) = make_store(mock);

    let outcome =
        auth_service::handle_login(context.clone(), "u".to_string(), "p".to_string()).await;

    assert_eq!(outcome, ActionOutcome::Failure("bad credentials".to_string()));

    let state = context.state.read().await;
    assert_eq!(state.validation.auth, "bad credentials");
    assert!(!state.is_auth);
    assert_eq!(state.token, None);
    assert!(!state.pending.auth);
    assert_eq!(local.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn successful_login_persists_the_token_and_loads_the_profile() {
    let mut mock = MockService::default();
    mock.login = common::respond_ok(|| LoginResult {
        token: Some("tok-42".to_string()),
    });
    let (context, mock, local, _rx) = make_store(mock);

    let outcome =
        auth_service::handle_login(context.clone(), "u".to_string(), "p".to_string()).await;
    settle().await;

    assert_eq!(outcome, ActionOutcome::Success);

    let state = context.state.read().await;
    assert!(state.is_auth);
    assert_eq!(state.token.as_deref(), Some("tok-42"));
    assert!(!state.pending.auth);
    assert_eq!(local.get(TOKEN_KEY).as_deref(), Some("tok-42"));

    // the follow-up profile load ran in the background
    assert_eq!(
        mock.profile_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn login_transport_error_still_settles_the_busy_flag() {
    let mut mock = MockService::default();
    mock.login = respond_transport_error();
    let (context, _mock, _local, _rx) = make_store(mock);

    let outcome =
        auth_service::handle_login(context.clone(), "u".to_string(), "p".to_string()).await;

    assert!(matches!(outcome, ActionOutcome::Error(_)));

    let state = context.state.read().await;
    assert!(!state.pending.auth);
    assert!(!state.is_auth);
    assert_eq!(state.validation.auth, "");
}

#[tokio::test]
async fn rejected_registration_surfaces_a_transient_error() {
    let mut mock = MockService::default();
    mock.register = respond_fail("email already taken");
    let (context, mock, _local, _rx) = make_store(mock);

    let outcome = auth_service::handle_register(context.clone(), registration_form()).await;

    assert_eq!(
        outcome,
        ActionOutcome::Failure("email already taken".to_string())
    );

    let state = context.state.read().await;
    assert_eq!(state.error, "email already taken");
    assert!(!state.pending.auth);
    assert!(!state.is_auth);
    assert_eq!(
        mock.login_calls.load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn registration_seeds_the_profile_and_logs_in() {
    let (context, mock, local, _rx) = make_store(MockService::default());

    let outcome = auth_service::handle_register(context.clone(), registration_form()).await;
    settle().await;

    assert_eq!(outcome, ActionOutcome::Success);

    let state = context.state.read().await;
    assert!(state.is_auth);
    assert_eq!(state.user_model.email, "o@example.com");
    assert_eq!(state.user_model.name, "Oleg");
    assert_eq!(state.user_model.gender, Some(Gender::Man));
    assert_eq!(state.user_model.weight, "80");
    assert!(!state.pending.auth);

    assert_eq!(
        mock.login_calls.load(std::sync::atomic::Ordering::SeqCst),
        1
    );
    assert_eq!(local.get(TOKEN_KEY).as_deref(), Some("token-1"));
}

#[tokio::test]
async fn refused_token_drops_the_session_and_notifies() {
    let mut mock = MockService::default();
    mock.profile = common::respond_unauthorized();
    let (context, _mock, local, mut rx) = make_store(mock);

    local.set(TOKEN_KEY, "stale");
    {
        let mut state = context.state.write().await;
        state.is_auth = true;
        state.token = Some("stale".to_string());
    }

    let outcome =
        ration_store::services::profile_service::handle_load(context.clone()).await;

    assert!(matches!(outcome, ActionOutcome::Error(_)));

    let state = context.state.read().await;
    assert!(!state.is_auth);
    assert_eq!(state.token, None);
    assert!(!state.pending.user_info);
    assert_eq!(local.get(TOKEN_KEY), None);

    let events = drain_events(&mut rx);
    assert!(
        events
            .iter()
            .any(|event| matches!(event, StoreEvent::SessionExpired))
    );
}
