//! Front panel controller

use std::time::Duration;

use hlx_codec::front_panel;

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "front-panel";

pub struct FrontPanelController {
    context: ControllerContext,
}

impl FrontPanelController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    /// Property queries complete on the property frame itself
    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                front_panel::QueryBrightness {}.encode_request(),
                front_panel::Brightness::response_pattern(),
                timeout,
            )
            .await?;
        self.context
            .commands
            .invoke(
                front_panel::QueryLocked {}.encode_request(),
                front_panel::Locked::response_pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    pub fn brightness(&self) -> u8 {
        self.context.model.lock().front_panel().brightness()
    }

    pub fn locked(&self) -> bool {
        self.context.model.lock().front_panel().locked()
    }

    pub async fn set_brightness(&self, brightness: u8, timeout: Duration) -> Result<u8> {
        let request = front_panel::Brightness { brightness };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), front_panel::Brightness::response_pattern(), timeout)
            .await?;
        Ok(front_panel::Brightness::from_captures(&captures)?.brightness)
    }

    pub async fn set_locked(&self, locked: bool, timeout: Duration) -> Result<bool> {
        let request = front_panel::Locked { locked };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), front_panel::Locked::response_pattern(), timeout)
            .await?;
        Ok(front_panel::Locked::from_captures(&captures)?.locked)
    }

    fn register_routes(&self) {
        let ctx = &self.context;

        ctx.route(
            NAME,
            front_panel::Brightness::response_pattern(),
            front_panel::Brightness::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().front_panel_mut().set_brightness(cmd.brightness) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::FrontPanelBrightness { brightness: cmd.brightness });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            front_panel::Locked::response_pattern(),
            front_panel::Locked::from_captures,
            |ctx, cmd| {
                let outcome = ctx.model.lock().front_panel_mut().set_locked(cmd.locked);
                if outcome.changed() {
                    ctx.emit(StateChange::FrontPanelLocked { locked: cmd.locked });
                }
            },
        );
    }
}
