//! Favorite controller

use std::time::Duration;

use hlx_codec::favorite;
use hlx_model::Identifier;

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "favorites";

pub struct FavoritesController {
    context: ControllerContext,
}

impl FavoritesController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        let ids = self.context.model.lock().favorite_ids();
        for favorite in ids {
            self.context
                .commands
                .invoke(
                    favorite::QueryFavorite { favorite }.encode_request(),
                    favorite::QueryFavorite::response_pattern(),
                    timeout,
                )
                .await?;
        }
        Ok(())
    }

    pub fn name(&self, favorite: Identifier) -> Result<String> {
        Ok(self.context.model.lock().favorite(favorite)?.name().to_string())
    }

    pub fn favorite_ids(&self) -> Vec<Identifier> {
        self.context.model.lock().favorite_ids()
    }

    pub async fn set_name(
        &self,
        favorite: Identifier,
        name: &str,
        timeout: Duration,
    ) -> Result<String> {
        let request = favorite::Name { favorite, name: name.to_string() };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), favorite::Name::response_pattern(), timeout)
            .await?;
        Ok(favorite::Name::from_captures(&captures)?.name)
    }

    fn register_routes(&self) {
        self.context.route(
            NAME,
            favorite::Name::response_pattern(),
            favorite::Name::from_captures,
            |ctx, cmd| {
                match ctx
                    .model
                    .lock()
                    .favorite_mut(cmd.favorite)
                    .and_then(|f| f.set_name(&cmd.name))
                {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::FavoriteName {
                            favorite: cmd.favorite,
                            name: cmd.name,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );
    }
}
