//! Game commands and their button handlers.

use std::time::Duration;

use serenity::all::{
    ButtonStyle, Colour, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateActionRow, CreateButton, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};

use super::{embed_message, guild_id, reply, Options};
use crate::{
    error::AppError,
    model::{game::GameKind, user::UserRecord},
    service::game::{
        blackjack::{format_hand, BlackjackHand, Outcome},
        roulette::{RouletteColour, RouletteSpin},
        session::{custom_id, SessionRejection},
        slots::{evaluate, format_reels, SlotMachine, REELS},
        validate_bet, validate_table_bet, GameService, MAX_TABLE_BET,
    },
    state::AppState,
};

/// Pause between slot reel reveals.
const REEL_DELAY: Duration = Duration::from_secs(1);

pub fn register() -> Vec<CreateCommand> {
    let table_bet = || {
        CreateCommandOption::new(
            CommandOptionType::Integer,
            "bet",
            format!("The amount of gold you want to bet (Max: {})", MAX_TABLE_BET),
        )
        .required(true)
        .min_int_value(1)
        .max_int_value(MAX_TABLE_BET as u64)
    };

    vec![
        CreateCommand::new("blackjack")
            .description("Play a game of blackjack!")
            .add_option(table_bet()),
        CreateCommand::new("roulette")
            .description("Spin the roulette wheel!")
            .add_option(table_bet())
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "colour",
                    "The colour you want to bet on",
                )
                .required(true)
                .add_string_choice("Red", "red")
                .add_string_choice("Black", "black")
                .add_string_choice("Green", "green"),
            ),
        CreateCommand::new("slots")
            .description("Try your luck on the slot machine!")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "bet",
                    "The amount of gold you want to bet",
                )
                .required(true)
                .min_int_value(1),
            ),
        CreateCommand::new("games").description("See the games you can play"),
    ]
}

fn win_loss_footer(record: &UserRecord, game: GameKind) -> CreateEmbedFooter {
    let (wins, losses) = record.record(game);
    CreateEmbedFooter::new(format!(
        "W/L: {}/{}   Winrate: {}%",
        wins,
        losses,
        record.win_rate(game)
    ))
}

/// Replaces the game's buttons with disabled copies.
fn frozen(buttons: Vec<CreateButton>) -> CreateInteractionResponse {
    let buttons = buttons.into_iter().map(|button| button.disabled(true)).collect();
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new().components(vec![CreateActionRow::Buttons(buttons)]),
    )
}

/// Answers a press that did not reach its session.
async fn reject_press(
    ctx: &Context,
    component: &ComponentInteraction,
    rejection: SessionRejection,
    buttons: Vec<CreateButton>,
) -> Result<(), AppError> {
    let response = match rejection {
        SessionRejection::Gone => frozen(buttons),
        SessionRejection::NotOwner => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(AppError::from(rejection).user_message())
                .ephemeral(true),
        ),
    };
    component.create_response(&ctx.http, response).await?;
    Ok(())
}

fn blackjack_buttons(session: u64) -> Vec<CreateButton> {
    vec![
        CreateButton::new(custom_id("blackjack", "hit", session))
            .label("Hit")
            .style(ButtonStyle::Success),
        CreateButton::new(custom_id("blackjack", "stand", session))
            .label("Stand")
            .style(ButtonStyle::Primary),
    ]
}

fn blackjack_table(hand: &BlackjackHand) -> CreateEmbed {
    let dealer_shows = hand
        .dealer_shows()
        .map(|card| format!("`{}`", card))
        .unwrap_or_default();

    CreateEmbed::new()
        .title("🃏 Blackjack")
        .colour(Colour::ORANGE)
        .field(
            "Your Hand",
            format!("{} ({})", format_hand(&hand.player), hand.player_value()),
            false,
        )
        .field("Dealer Shows", dealer_shows, false)
        .field("Bet", format!("**{}** gold", hand.bet), true)
}

fn blackjack_result(hand: &BlackjackHand, outcome: Outcome, record: &UserRecord) -> CreateEmbed {
    let settlement = outcome.settlement(hand.bet);
    let (payout, colour) = if settlement.won {
        (format!("You won **{}** gold!", settlement.gold_delta), Colour::DARK_GREEN)
    } else if settlement.gold_delta == 0 {
        ("You gain nothing".to_string(), Colour::ORANGE)
    } else {
        (format!("You lost **{}** gold", hand.bet), Colour::RED)
    };

    CreateEmbed::new()
        .title(format!("🃏 Blackjack - {}", outcome.title()))
        .colour(colour)
        .field(
            "Your Hand",
            format!("{} ({})", format_hand(&hand.player), hand.player_value()),
            false,
        )
        .field(
            "Dealer Hand",
            format!("{} ({})", format_hand(&hand.dealer), hand.dealer_value()),
            false,
        )
        .field("Payout", payout, false)
        .footer(win_loss_footer(record, GameKind::Blackjack))
}

pub async fn blackjack(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let user_id = command.user.id.get();
    let bet = Options::new(command.data.options()).integer("bet")?;

    validate_table_bet(bet)?;
    let games = GameService::new(&state.db);
    games.ensure_funds(guild_id, user_id, bet).await?;
    state.cooldown.check(guild_id, user_id, GameKind::Blackjack)?;

    let hand = {
        let mut rng = rand::rng();
        BlackjackHand::deal(bet, &mut rng)
    };

    if let Some(outcome) = hand.outcome() {
        let record = games
            .settle(guild_id, user_id, GameKind::Blackjack, outcome.settlement(bet))
            .await?;
        return reply(ctx, command, embed_message(blackjack_result(&hand, outcome, &record))).await;
    }

    let table = blackjack_table(&hand);
    let session = state.blackjack.insert(guild_id, user_id, hand).await;
    tracing::debug!("Started blackjack session {} for user {}", session, user_id);

    reply(
        ctx,
        command,
        embed_message(table).components(vec![CreateActionRow::Buttons(blackjack_buttons(session))]),
    )
    .await
}

/// Handles the Hit and Stand buttons.
pub async fn blackjack_action(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
    action: &str,
    session: u64,
) -> Result<(), AppError> {
    let user_id = component.user.id.get();
    let stand = match action {
        "hit" => false,
        "stand" => true,
        _ => return Err(AppError::BadRequest("Unknown blackjack action.".to_string())),
    };

    let played = state
        .blackjack
        .with_session(session, user_id, |hand| {
            let outcome = if stand { hand.stand() } else { hand.hit() };
            ((hand.clone(), outcome), outcome.is_some())
        })
        .await;
    let (guild_id, (hand, outcome)) = match played {
        Ok(played) => played,
        Err(rejection) => {
            return reject_press(ctx, component, rejection, blackjack_buttons(session)).await
        }
    };

    let message = match outcome {
        Some(outcome) => {
            let record = GameService::new(&state.db)
                .settle(guild_id, user_id, GameKind::Blackjack, outcome.settlement(hand.bet))
                .await?;
            CreateInteractionResponseMessage::new()
                .embed(blackjack_result(&hand, outcome, &record))
                .components(vec![])
        }
        None => CreateInteractionResponseMessage::new().embed(blackjack_table(&hand)),
    };

    component
        .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(message))
        .await?;
    Ok(())
}

pub async fn roulette(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let user_id = command.user.id.get();
    let options = Options::new(command.data.options());
    let bet = options.integer("bet")?;
    let choice = options.string("colour")?;

    validate_table_bet(bet)?;
    let guess = RouletteColour::from_choice(choice).ok_or_else(|| {
        AppError::BadRequest("Invalid colour! The colour must be red, black, or green.".to_string())
    })?;
    let games = GameService::new(&state.db);
    games.ensure_funds(guild_id, user_id, bet).await?;
    state.cooldown.check(guild_id, user_id, GameKind::Roulette)?;

    let spin = {
        let mut rng = rand::rng();
        RouletteSpin::spin(guess, &mut rng)
    };
    let settlement = spin.settlement(bet);
    let record = games
        .settle(guild_id, user_id, GameKind::Roulette, settlement)
        .await?;

    let landed = format!("The ball landed on {} **{}**", spin.colour.emoji(), spin.pocket);
    let embed = if settlement.won {
        CreateEmbed::new()
            .title("🎡 Roulette - Winner!")
            .colour(Colour::DARK_GREEN)
            .description(landed)
            .field(
                "Winner!",
                format!("You have won **{}** gold!", settlement.gold_delta),
                false,
            )
    } else {
        CreateEmbed::new()
            .title("🎡 Roulette")
            .colour(Colour::RED)
            .description(landed)
            .field("Loser!", format!("You have lost **{}** gold!", bet), false)
    };
    let embed = embed.footer(win_loss_footer(&record, GameKind::Roulette));

    reply(ctx, command, embed_message(embed)).await
}

fn slots_embed(heading: &str, reels: &[&str]) -> CreateEmbed {
    CreateEmbed::new()
        .title("🎰 Slot Machine")
        .colour(Colour::GOLD)
        .field(heading, format_reels(reels), false)
}

fn slots_button(session: u64) -> Vec<CreateButton> {
    vec![CreateButton::new(custom_id("slots", "spin", session))
        .label("Spin")
        .style(ButtonStyle::Primary)]
}

pub async fn slots(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let user_id = command.user.id.get();
    let bet = Options::new(command.data.options()).integer("bet")?;

    validate_bet(bet)?;
    GameService::new(&state.db)
        .ensure_funds(guild_id, user_id, bet)
        .await?;
    state.cooldown.check(guild_id, user_id, GameKind::Slots)?;

    let session = state.slots.insert(guild_id, user_id, bet).await;
    let embed = CreateEmbed::new()
        .title("🎰 Slot Machine")
        .colour(Colour::GOLD)
        .field("Spin to win!", "Hit the button below to spin the machine!", false)
        .field("Bet", format!("**{}** gold", bet), true);

    reply(
        ctx,
        command,
        embed_message(embed).components(vec![CreateActionRow::Buttons(slots_button(session))]),
    )
    .await
}

/// Handles the Spin button.
///
/// The outcome is drawn and settled up front; the reel reveal afterwards only edits the
/// message, so a failed edit cannot leave the bet unsettled.
pub async fn slots_spin(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
    session: u64,
) -> Result<(), AppError> {
    let user_id = component.user.id.get();
    let (guild_id, bet) = match state.slots.take(session, user_id).await {
        Ok(taken) => taken,
        Err(rejection) => {
            return reject_press(ctx, component, rejection, slots_button(session)).await
        }
    };

    let machine = SlotMachine::new()?;
    let reels = {
        let mut rng = rand::rng();
        machine.spin(&mut rng)
    };
    let outcome = evaluate(&reels);
    let settlement = outcome.settlement(bet);
    GameService::new(&state.db)
        .settle(guild_id, user_id, GameKind::Slots, settlement)
        .await?;

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .embed(slots_embed("Spinning the machine...", &[]))
                    .components(vec![]),
            ),
        )
        .await?;

    for revealed in 1..=REELS {
        tokio::time::sleep(REEL_DELAY).await;
        component
            .edit_response(
                &ctx.http,
                EditInteractionResponse::new()
                    .embed(slots_embed("Spinning the machine...", &reels[..revealed])),
            )
            .await?;
    }

    let payout = if settlement.won {
        format!("You won **{}** gold!", settlement.gold_delta)
    } else {
        format!("You lost **{}** gold!", bet)
    };
    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(
                slots_embed(outcome.title(), &reels).field("Payout", payout, false),
            ),
        )
        .await?;

    Ok(())
}

pub async fn games(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let embed = CreateEmbed::new()
        .title("🎲 The Cavern Games")
        .description("Bet your gold at the tables. Each member can start each game 3 times every 3 minutes.")
        .colour(Colour::PURPLE)
        .field(
            "🃏 Blackjack",
            format!(
                "`/blackjack bet` - Beat the dealer without going over 21. Wins pay 1.5x. Bets 1-{}.",
                MAX_TABLE_BET
            ),
            false,
        )
        .field(
            "🎡 Roulette",
            format!(
                "`/roulette bet colour` - Red or black pays 1x, green pays 15x. Bets 1-{}.",
                MAX_TABLE_BET
            ),
            false,
        )
        .field(
            "🎰 Slots",
            "`/slots bet` - Two of a kind pays 2x, three of a kind 7x, melons 9x and 7️⃣7️⃣7️⃣ 49x.",
            false,
        );

    reply(ctx, command, embed_message(embed)).await
}
