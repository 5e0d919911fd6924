use serenity::all::{Context, Interaction};

use crate::server::{bot::command, state::AppState};

/// Routes slash command interactions; other interaction kinds are ignored.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(cmd) = interaction else {
        return;
    };

    tracing::debug!(
        "Command /{} invoked by {} ({})",
        cmd.data.name,
        cmd.user.name,
        cmd.user.id
    );

    command::handle_command(&ctx, &cmd, state).await;
}
