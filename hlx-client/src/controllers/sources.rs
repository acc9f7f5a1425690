//! Source controller

use std::time::Duration;

use hlx_codec::source;
use hlx_model::Identifier;

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "sources";

pub struct SourcesController {
    context: ControllerContext,
}

impl SourcesController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        let ids = self.context.model.lock().source_ids();
        for source in ids {
            self.context
                .commands
                .invoke(
                    source::QuerySource { source }.encode_request(),
                    source::QuerySource::response_pattern(),
                    timeout,
                )
                .await?;
        }
        Ok(())
    }

    pub fn name(&self, source: Identifier) -> Result<String> {
        Ok(self.context.model.lock().source(source)?.name().to_string())
    }

    pub fn source_ids(&self) -> Vec<Identifier> {
        self.context.model.lock().source_ids()
    }

    pub async fn set_name(
        &self,
        source: Identifier,
        name: &str,
        timeout: Duration,
    ) -> Result<String> {
        let request = source::Name { source, name: name.to_string() };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), source::Name::response_pattern(), timeout)
            .await?;
        Ok(source::Name::from_captures(&captures)?.name)
    }

    fn register_routes(&self) {
        self.context.route(
            NAME,
            source::Name::response_pattern(),
            source::Name::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().source_mut(cmd.source).and_then(|s| s.set_name(&cmd.name)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::SourceName { source: cmd.source, name: cmd.name });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );
    }
}
