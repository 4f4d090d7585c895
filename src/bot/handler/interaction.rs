//! Interaction routing and the error boundary for every command.

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Interaction,
    ModalInteraction,
};

use crate::{
    bot::command::{colour, economy, game, moderation, setup, shop, social},
    error::AppError,
    service::game::session::parse_custom_id,
    state::AppState,
};

/// Handles an incoming interaction
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            let result = run_command(&ctx, state, &command).await;
            if let Err(e) = result {
                report_command_error(&ctx, &command, &e).await;
            }
        }
        Interaction::Autocomplete(command) => {
            if let Err(e) = colour::autocomplete(&ctx, state, &command).await {
                tracing::warn!("Autocomplete failed for /{}: {}", command.data.name, e);
            }
        }
        Interaction::Component(component) => {
            if let Err(e) = run_component(&ctx, state, &component).await {
                log_error(
                    &e,
                    &component.data.custom_id,
                    component.guild_id.map(|g| g.get()),
                    component.user.id.get(),
                );
                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(e.user_message())
                        .ephemeral(true),
                );
                if component.create_response(&ctx.http, response).await.is_err() {
                    let followup = component.create_followup(&ctx.http, error_followup(&e));
                    if let Err(e) = followup.await {
                        tracing::warn!("Failed to deliver error notice: {}", e);
                    }
                }
            }
        }
        Interaction::Modal(modal) => {
            if let Err(e) = run_modal(&ctx, state, &modal).await {
                log_error(
                    &e,
                    &modal.data.custom_id,
                    modal.guild_id.map(|g| g.get()),
                    modal.user.id.get(),
                );
                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(e.user_message())
                        .ephemeral(true),
                );
                if modal.create_response(&ctx.http, response).await.is_err() {
                    if let Err(e) = modal.create_followup(&ctx.http, error_followup(&e)).await {
                        tracing::warn!("Failed to deliver error notice: {}", e);
                    }
                }
            }
        }
        _ => {}
    }
}

async fn run_command(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    tracing::debug!(
        "/{} invoked by user {} in guild {:?}",
        command.data.name,
        command.user.id,
        command.guild_id
    );

    match command.data.name.as_str() {
        "balance" => economy::balance(ctx, state, command).await,
        "daily" => economy::daily(ctx, state, command).await,
        "leaderboard" => economy::leaderboard(ctx, state, command).await,
        "blackjack" => game::blackjack(ctx, state, command).await,
        "roulette" => game::roulette(ctx, state, command).await,
        "slots" => game::slots(ctx, state, command).await,
        "games" => game::games(ctx, command).await,
        "shop" => shop::shop(ctx, command).await,
        "buy" => shop::buy(ctx, state, command).await,
        "colorrole" => colour::colour_role(ctx, state, command).await,
        "color" => colour::colour(ctx, state, command).await,
        "warn" => moderation::warn(ctx, state, command).await,
        "warnings" => moderation::warnings(ctx, state, command).await,
        "get_user_data" => moderation::get_user_data(ctx, state, command).await,
        "set_user_data" => moderation::set_user_data(ctx, state, command).await,
        "setup" => setup::setup(ctx, state, command).await,
        "help" => social::help(ctx, state, command).await,
        "whisper" => social::whisper(ctx, state, command).await,
        other => Err(AppError::NotFound(format!("Unknown command `{}`.", other))),
    }
}

async fn run_component(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let (game_name, action, session) = parse_custom_id(&component.data.custom_id)
        .ok_or_else(|| AppError::NotFound("This button is no longer active.".to_string()))?;

    match game_name {
        "blackjack" => game::blackjack_action(ctx, state, component, action, session).await,
        "slots" => game::slots_spin(ctx, state, component, session).await,
        _ => Err(AppError::NotFound("This button is no longer active.".to_string())),
    }
}

async fn run_modal(
    ctx: &Context,
    state: &AppState,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    match parse_custom_id(&modal.data.custom_id) {
        Some(("mimic", _, _)) => shop::mimic_submit(ctx, state, modal).await,
        _ => Err(AppError::NotFound("This form has expired.".to_string())),
    }
}

fn log_error(error: &AppError, what: &str, guild_id: Option<u64>, user_id: u64) {
    if error.is_rejection() {
        tracing::debug!(
            "{} rejected for user {} in guild {:?}: {}",
            what,
            user_id,
            guild_id,
            error
        );
    } else {
        tracing::error!(
            "{} failed for user {} in guild {:?}: {:?}",
            what,
            user_id,
            guild_id,
            error
        );
    }
}

/// Logs a failed command and tells the user.
///
/// If the command already responded before failing, the notice is sent as a follow-up.
async fn report_command_error(ctx: &Context, command: &CommandInteraction, error: &AppError) {
    log_error(
        error,
        &format!("/{}", command.data.name),
        command.guild_id.map(|g| g.get()),
        command.user.id.get(),
    );

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(error.user_message())
            .ephemeral(true),
    );
    if command.create_response(&ctx.http, response).await.is_err() {
        if let Err(e) = command.create_followup(&ctx.http, error_followup(error)).await {
            tracing::warn!("Failed to deliver error notice: {}", e);
        }
    }
}

fn error_followup(error: &AppError) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(error.user_message())
        .ephemeral(true)
}
