use crate::render::{self, GridLayout, JsonConfetti, TerminalConfetti};
use clap::ValueEnum;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use giftbox_core::{shared, LotteryConfig, LotteryController, ParticleEffect, RevealTimer};
use rand::Rng;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EffectKind {
    /// Colored glyph burst in the terminal
    Terminal,
    /// Print each burst's arguments as JSON
    Json,
}

impl EffectKind {
    fn build(self, layout: &GridLayout) -> Box<dyn ParticleEffect> {
        match self {
            EffectKind::Terminal => Box::new(TerminalConfetti::new(layout.width())),
            EffectKind::Json => Box::new(JsonConfetti),
        }
    }
}

pub async fn play<R>(
    config: LotteryConfig,
    boxes: Option<usize>,
    effect: EffectKind,
    rng: R,
) -> anyhow::Result<()>
where
    R: Rng + Send + 'static,
{
    let box_count = boxes.unwrap_or(config.prizes.len());
    let layout = GridLayout::new(box_count);
    let effect = effect.build(&layout);

    let lottery = shared(LotteryController::new(config, box_count, rng)?);
    let theme = ColorfulTheme::default();

    // the menu is built once; rounds only change what each entry holds
    let items: Vec<String> = (1..=box_count).map(|i| format!("Gift box #{}", i)).collect();

    println!("Pick one of {} gift boxes. Only one opens per round.", box_count);

    loop {
        println!("{}", render::board_table(lottery.lock().boxes(), layout.columns()));

        let choice = Select::with_theme(&theme)
            .with_prompt("Which box do you open?")
            .items(&items)
            .default(0)
            .interact()?;

        let reveal = lottery.lock().activate(choice, &layout, effect.as_ref())?;
        let Some(reveal) = reveal else {
            println!("Box #{} cannot be opened this round.", choice + 1);
            continue;
        };

        let timer = RevealTimer::schedule(lottery.clone(), &reveal);
        println!("{}", render::board_table(lottery.lock().boxes(), layout.columns()));

        if !timer.wait().await {
            tracing::warn!("Panel for round {} was not shown", reveal.round);
        }

        {
            let guard = lottery.lock();
            println!("{}", render::panel_table(guard.panel()));
            if !guard.reset_visible() {
                break;
            }
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Reset and play again?")
            .default(true)
            .interact()?;

        if !again {
            break;
        }

        lottery.lock().reset();
    }

    let guard = lottery.lock();
    let mut rounds = guard.history().to_vec();
    if guard.is_revealed() {
        rounds.push(guard.round_info());
    }

    println!();
    println!("Session Summary:");
    println!("{}", render::history_table(&rounds));

    Ok(())
}
