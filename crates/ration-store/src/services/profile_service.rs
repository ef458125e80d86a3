use ration_api::wire::{self, EditProfileRequest};
use ration_bridge::user::ProfileUpdate;
use ration_bridge::{ActionOutcome, StoreEvent};

use super::StoreHandle;

/// Handles a profile load (see
/// [`ration_bridge::StoreCommand::LoadProfile`]).
///
/// Mapped fields are merged into the existing profile; a refusal leaves
/// it untouched and raises a transient error.
pub async fn handle_load(context: StoreHandle) -> ActionOutcome {
    if !context.state.read().await.is_auth {
        return ActionOutcome::Failure("not authenticated".to_string());
    }

    context.set_loading("user_info", true).await;

    let outcome = match context.service.get_profile().await {
        Ok(response) if !response.ok => {
            context
                .show_error("Ошибка загрузки данных пользователя")
                .await;
            ActionOutcome::Failure(response.description.unwrap_or_default())
        }
        Ok(response) => {
            let update = wire::map_profile(&response.result.unwrap_or_default());
            {
                let mut state = context.state.write().await;
                state.patch_user_model(&update);
            }
            context.send(StoreEvent::ProfileChanged).await;
            ActionOutcome::Success
        }
        Err(error) => context.fail_action("profile load", error).await,
    };

    context.set_loading("user_info", false).await;
    outcome
}

/// Handles a profile edit (see
/// [`ration_bridge::StoreCommand::EditProfile`]).
///
/// On success the profile is replaced from the *submitted* update, not
/// from a re-fetch; the backend's view catches up on the next load.
pub async fn handle_edit(context: StoreHandle, update: ProfileUpdate) -> ActionOutcome {
    context.set_loading("edit_user_info", true).await;

    let payload = EditProfileRequest::from_update(&update);
    let outcome = match context.service.edit_profile(payload).await {
        Ok(response) if !response.ok => {
            let description = response.description.unwrap_or_default();
            context.show_error(description.clone()).await;
            ActionOutcome::Failure(description)
        }
        Ok(_) => {
            {
                let mut state = context.state.write().await;
                state.set_user_model(&update);
            }
            context.send(StoreEvent::ProfileChanged).await;
            ActionOutcome::Success
        }
        Err(error) => context.fail_action("profile edit", error).await,
    };

    context.set_loading("edit_user_info", false).await;
    outcome
}
