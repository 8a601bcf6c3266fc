//! Optional reboot once the run is complete.
use super::Context;
use crate::prompt::Prompt;

/// What happened after a reboot was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootDecision {
    /// The reboot command was issued.
    Rebooting,
    /// The operator must reboot by hand.
    Deferred,
}

/// Ask whether to reboot now and issue the reboot on a yes.
///
/// Any other answer, or a failing reboot command, leaves a reminder.
#[must_use]
pub fn offer_reboot(ctx: &Context, prompt: &dyn Prompt) -> RebootDecision {
    if !prompt.confirm("Some applications require a reboot. Reboot now?") {
        remind(ctx);
        return RebootDecision::Deferred;
    }
    let (program, args) = ctx.privilege.reboot_command(&ctx.platform);
    match ctx.run(program, &args) {
        Ok(_) => RebootDecision::Rebooting,
        Err(e) => {
            ctx.log.error(&format!("reboot failed: {e}"));
            remind(ctx);
            RebootDecision::Deferred
        }
    }
}

/// Log the manual reboot reminder.
pub fn remind(ctx: &Context) {
    ctx.log
        .warn("a reboot is required to finish installation; please restart manually");
}
