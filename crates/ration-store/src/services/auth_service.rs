use ration_api::wire::{LoginRequest, RegisterRequest};
use ration_bridge::{ActionOutcome, StoreEvent};
use ration_bridge::user::RegistrationForm;

use super::StoreHandle;
use crate::services::profile_service;

/// Handles a login attempt (see [`ration_bridge::StoreCommand::LogIn`]).
///
/// A rejected attempt lands in the `auth` validation field; a successful
/// one persists the returned token and marks the session authenticated.
/// Whatever happens, the busy flag is dropped and a profile load is
/// kicked off in the background afterwards.
pub async fn handle_login(context: StoreHandle, login: String, password: String) -> ActionOutcome {
    context.set_loading("auth", true).await;

    let outcome = match context.service.login(LoginRequest { login, password }).await {
        Ok(response) if !response.ok => {
            let description = response.description.unwrap_or_default();
            context.set_validation_error("auth", &description).await;
            ActionOutcome::Failure(description)
        }
        Ok(response) => {
            if let Some(token) = response.result.and_then(|result| result.token) {
                context.set_token(Some(token)).await;
                context.set_auth(true).await;
            }
            ActionOutcome::Success
        }
        Err(error) => context.fail_action("login", error).await,
    };

    context.set_loading("auth", false).await;

    let context = context.clone();
    tokio::spawn(async move {
        profile_service::handle_load(context).await;
    });

    outcome
}

/// Handles a registration request (see
/// [`ration_bridge::StoreCommand::Register`]).
///
/// On success the in-memory profile is seeded from the submitted form and
/// a login with the form's credentials follows immediately; the returned
/// outcome is that login's.
pub async fn handle_register(context: StoreHandle, form: RegistrationForm) -> ActionOutcome {
    context.set_loading("auth", true).await;

    let payload = RegisterRequest::from_form(&form);
    let outcome = match context.service.register(payload).await {
        Ok(response) if !response.ok => {
            let description = response.description.unwrap_or_default();
            context.show_error(description.clone()).await;
            ActionOutcome::Failure(description)
        }
        Ok(_) => {
            {
                let mut state = context.state.write().await;
                state.set_user_model(&form.as_profile_update());
            }
            context.send(StoreEvent::ProfileChanged).await;

            handle_login(context.clone(), form.email, form.password).await
        }
        Err(error) => context.fail_action("registration", error).await,
    };

    context.set_loading("auth", false).await;
    outcome
}
