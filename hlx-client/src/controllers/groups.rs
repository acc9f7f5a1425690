//! Group controller
//!
//! Group-scoped zone verbs fan out on the controller; the originating
//! client only sees the group echo. The routes below replay that fan-out
//! against the mirror, member by member in identifier order, so the origin
//! converges on the same per-zone state the other peers were told about.

use std::time::Duration;

use hlx_codec::group;
use hlx_model::{Group, Identifier};

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "groups";

pub struct GroupsController {
    context: ControllerContext,
}

impl GroupsController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        let ids = self.context.model.lock().group_ids();
        for group in ids {
            self.context
                .commands
                .invoke(
                    group::QueryGroup { group }.encode_request(),
                    group::QueryGroup::response_pattern(),
                    timeout,
                )
                .await?;
        }
        Ok(())
    }

    /// Snapshot of one mirrored group
    pub fn group(&self, group: Identifier) -> Result<Group> {
        Ok(self.context.model.lock().group(group)?.clone())
    }

    pub fn group_ids(&self) -> Vec<Identifier> {
        self.context.model.lock().group_ids()
    }

    pub async fn set_name(
        &self,
        group: Identifier,
        name: &str,
        timeout: Duration,
    ) -> Result<String> {
        let request = group::Name { group, name: name.to_string() };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), group::Name::response_pattern(), timeout)
            .await?;
        Ok(group::Name::from_captures(&captures)?.name)
    }

    pub async fn add_zone(
        &self,
        group: Identifier,
        zone: Identifier,
        timeout: Duration,
    ) -> Result<()> {
        let request = group::AddZone { group, zone };
        self.context
            .commands
            .invoke(request.encode_request(), group::AddZone::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    pub async fn remove_zone(
        &self,
        group: Identifier,
        zone: Identifier,
        timeout: Duration,
    ) -> Result<()> {
        let request = group::RemoveZone { group, zone };
        self.context
            .commands
            .invoke(request.encode_request(), group::RemoveZone::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    /// Set every member zone's volume
    pub async fn set_volume(
        &self,
        group: Identifier,
        level: i8,
        timeout: Duration,
    ) -> Result<()> {
        let request = group::Volume { group, level };
        self.context
            .commands
            .invoke(request.encode_request(), group::Volume::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    pub async fn increase_volume(&self, group: Identifier, timeout: Duration) -> Result<()> {
        let request = group::IncreaseVolume { group };
        self.context
            .commands
            .invoke(request.encode_request(), group::IncreaseVolume::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    pub async fn decrease_volume(&self, group: Identifier, timeout: Duration) -> Result<()> {
        let request = group::DecreaseVolume { group };
        self.context
            .commands
            .invoke(request.encode_request(), group::DecreaseVolume::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    pub async fn set_muted(
        &self,
        group: Identifier,
        muted: bool,
        timeout: Duration,
    ) -> Result<()> {
        let request = group::Mute { group, muted };
        self.context
            .commands
            .invoke(request.encode_request(), group::Mute::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    pub async fn toggle_muted(&self, group: Identifier, timeout: Duration) -> Result<()> {
        let request = group::ToggleMute { group };
        self.context
            .commands
            .invoke(request.encode_request(), group::ToggleMute::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    /// Retarget every member zone's source
    pub async fn set_source(
        &self,
        group: Identifier,
        source: Identifier,
        timeout: Duration,
    ) -> Result<()> {
        let request = group::Source { group, source };
        self.context
            .commands
            .invoke(request.encode_request(), group::Source::response_pattern(), timeout)
            .await?;
        Ok(())
    }

    fn register_routes(&self) {
        let ctx = &self.context;

        ctx.route(NAME, group::Name::response_pattern(), group::Name::from_captures, |ctx, cmd| {
            match ctx.model.lock().group_mut(cmd.group).and_then(|g| g.set_name(&cmd.name)) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::GroupName { group: cmd.group, name: cmd.name });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(
            NAME,
            group::AddZone::response_pattern(),
            group::AddZone::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().add_zone_to_group(cmd.group, cmd.zone) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::GroupZoneAdded { group: cmd.group, zone: cmd.zone });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            group::RemoveZone::response_pattern(),
            group::RemoveZone::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().remove_zone_from_group(cmd.group, cmd.zone) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::GroupZoneRemoved {
                            group: cmd.group,
                            zone: cmd.zone,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            group::Volume::response_pattern(),
            group::Volume::from_captures,
            |ctx, cmd| {
                for_members(ctx, cmd.group, |ctx, model, zone| {
                    match model.zone_mut(zone).and_then(|z| z.set_volume(cmd.level)) {
                        Ok(outcome) if outcome.changed() => {
                            ctx.emit(StateChange::ZoneVolume { zone, volume: cmd.level });
                        }
                        Ok(_) => {}
                        Err(e) => ctx.fault(NAME, e),
                    }
                });
            },
        );

        ctx.route(
            NAME,
            group::IncreaseVolume::response_pattern(),
            group::IncreaseVolume::from_captures,
            |ctx, cmd| {
                for_members(ctx, cmd.group, |ctx, model, zone| {
                    step_member_volume(ctx, model, zone, 1);
                });
            },
        );

        ctx.route(
            NAME,
            group::DecreaseVolume::response_pattern(),
            group::DecreaseVolume::from_captures,
            |ctx, cmd| {
                for_members(ctx, cmd.group, |ctx, model, zone| {
                    step_member_volume(ctx, model, zone, -1);
                });
            },
        );

        ctx.route(NAME, group::Mute::response_pattern(), group::Mute::from_captures, |ctx, cmd| {
            for_members(ctx, cmd.group, |ctx, model, zone| {
                match model.zone_mut(zone).map(|z| z.set_muted(cmd.muted)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneMuted { zone, muted: cmd.muted });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            });
        });

        ctx.route(
            NAME,
            group::ToggleMute::response_pattern(),
            group::ToggleMute::from_captures,
            |ctx, cmd| {
                for_members(ctx, cmd.group, |ctx, model, zone| {
                    match model.zone_mut(zone).map(|z| z.toggle_muted()) {
                        Ok(muted) => ctx.emit(StateChange::ZoneMuted { zone, muted }),
                        Err(e) => ctx.fault(NAME, e),
                    }
                });
            },
        );

        ctx.route(
            NAME,
            group::Source::response_pattern(),
            group::Source::from_captures,
            |ctx, cmd| {
                for_members(ctx, cmd.group, |ctx, model, zone| {
                    match model.set_zone_source(zone, cmd.source) {
                        Ok(outcome) if outcome.changed() => {
                            ctx.emit(StateChange::ZoneSource { zone, source: cmd.source });
                        }
                        Ok(_) => {}
                        Err(e) => ctx.fault(NAME, e),
                    }
                });
            },
        );
    }
}

/// Apply `apply` to every member of the group, in identifier order
fn for_members(
    ctx: &ControllerContext,
    group: Identifier,
    apply: impl Fn(&ControllerContext, &mut hlx_model::HlxModel, Identifier),
) {
    let mut model = ctx.model.lock();
    let members = match model.group_members(group) {
        Ok(members) => members,
        Err(e) => return ctx.fault(NAME, e),
    };
    for zone in members {
        apply(ctx, &mut model, zone);
    }
}

fn step_member_volume(
    ctx: &ControllerContext,
    model: &mut hlx_model::HlxModel,
    zone: Identifier,
    delta: i8,
) {
    match model.zone_mut(zone).map(|z| z.step_volume(delta)) {
        Ok(outcome) if outcome.changed() => {
            let volume = model.zone(zone).map(|z| z.volume()).unwrap_or_default();
            ctx.emit(StateChange::ZoneVolume { zone, volume });
        }
        Ok(_) => {}
        Err(e) => ctx.fault(NAME, e),
    }
}
