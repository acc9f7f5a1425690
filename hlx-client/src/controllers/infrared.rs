//! Infrared controller

use std::time::Duration;

use hlx_codec::infrared;

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "infrared";

pub struct InfraredController {
    context: ControllerContext,
}

impl InfraredController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                infrared::QueryDisabled {}.encode_request(),
                infrared::Disabled::response_pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    pub fn disabled(&self) -> bool {
        self.context.model.lock().infrared().disabled()
    }

    pub async fn set_disabled(&self, disabled: bool, timeout: Duration) -> Result<bool> {
        let request = infrared::Disabled { disabled };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), infrared::Disabled::response_pattern(), timeout)
            .await?;
        Ok(infrared::Disabled::from_captures(&captures)?.disabled)
    }

    fn register_routes(&self) {
        self.context.route(
            NAME,
            infrared::Disabled::response_pattern(),
            infrared::Disabled::from_captures,
            |ctx, cmd| {
                let outcome = ctx.model.lock().infrared_mut().set_disabled(cmd.disabled);
                if outcome.changed() {
                    ctx.emit(StateChange::InfraredDisabled { disabled: cmd.disabled });
                }
            },
        );
    }
}
