//! Configuration controller
//!
//! Load, save, and reset address the whole model; their status frames are
//! transmitted bare rather than in the parenthesized response form. A save
//! announces `SAVING...` first and `SAVE` when the blob is on disk.

use std::time::Duration;

use hlx_codec::configuration;

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

pub struct ConfigurationController {
    context: ControllerContext,
}

impl ConfigurationController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    /// Query the full state dump; completes on the terminating echo
    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                configuration::QueryConfiguration {}.encode_request(),
                configuration::QueryConfiguration::response_pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    pub async fn load_from_backup(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                configuration::LoadFromBackup.encode(),
                configuration::LoadFromBackup::pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    pub async fn save_to_backup(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                configuration::SaveToBackup.encode(),
                configuration::SaveToBackup::pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    pub async fn reset_to_defaults(&self, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                configuration::ResetToDefaults.encode(),
                configuration::ResetToDefaults::pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    fn register_routes(&self) {
        let ctx = &self.context;

        // Status frames carry no captures; the routes only surface events.
        ctx.commands.add_route(
            configuration::Saving::pattern(),
            route_emit(ctx, StateChange::ConfigurationSaving),
        );
        ctx.commands.add_route(
            configuration::SaveToBackup::pattern(),
            route_emit(ctx, StateChange::ConfigurationSaved),
        );
        ctx.commands.add_route(
            configuration::LoadFromBackup::pattern(),
            route_emit(ctx, StateChange::ConfigurationLoaded),
        );
        ctx.commands.add_route(
            configuration::ResetToDefaults::pattern(),
            route_emit(ctx, StateChange::ConfigurationReset),
        );
    }
}

fn route_emit(
    ctx: &ControllerContext,
    change: StateChange,
) -> crate::command_manager::NotificationHandler {
    let ctx = ctx.clone();
    Box::new(move |_captures| ctx.emit(change.clone()))
}
