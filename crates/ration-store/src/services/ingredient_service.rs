use ration_api::wire;
use ration_bridge::{ActionOutcome, StoreEvent};

use super::StoreHandle;

/// Handles an ingredient catalog load (see
/// [`ration_bridge::StoreCommand::LoadIngredients`]).
///
/// A failed load is silent: the catalog keeps its previous contents and
/// no transient error is raised. The UI renders whatever reference data
/// it has.
pub async fn handle_load(context: StoreHandle) -> ActionOutcome {
    context.set_loading("ingredients", true).await;

    let outcome = match context.service.get_ingredients().await {
        Ok(response) if !response.ok => {
            ActionOutcome::Failure(response.description.unwrap_or_default())
        }
        Ok(response) => {
            let ingredients = wire::map_ingredients(&response.result.unwrap_or_default());
            {
                let mut state = context.state.write().await;
                state.ingredients = ingredients;
            }
            context.send(StoreEvent::IngredientsChanged).await;
            ActionOutcome::Success
        }
        Err(error) => context.fail_action("ingredient load", error).await,
    };

    context.set_loading("ingredients", false).await;
    outcome
}
