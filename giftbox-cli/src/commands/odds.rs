use comfy_table::{presets::UTF8_FULL, Table};
use giftbox_core::{DistributionReport, LotteryConfig, PrizePool};
use rand::Rng;

pub fn show_odds<R: Rng>(config: &LotteryConfig, trials: u64, rng: &mut R) -> anyhow::Result<()> {
    if trials == 0 {
        anyhow::bail!("Trial count must be greater than 0");
    }

    let pool = PrizePool::new(config.prizes.clone());
    let report = DistributionReport::run(&pool, trials, rng);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["Prize".to_string()];
    header.extend((1..=pool.len()).map(|position| format!("Box #{}", position)));
    table.set_header(header);

    for (i, prize) in report.prizes.iter().enumerate() {
        let mut row = vec![prize.label.clone()];
        row.extend((0..pool.len()).map(|position| {
            format!("{:.2}%", report.frequency(i, position) * 100.0)
        }));
        table.add_row(row);
    }

    println!("Shuffle distribution over {} trials:", trials);
    println!("{}", table);
    println!("Expected per cell: {:.2}%", report.expected() * 100.0);
    println!("Max deviation: {:.3}%", report.max_deviation() * 100.0);

    Ok(())
}
