use comfy_table::{presets::UTF8_FULL, Table};
use giftbox_core::{LotteryConfig, PrizeCategory};

pub fn list_prizes(config: &LotteryConfig) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Prize", "Category"]);

    for (i, prize) in config.prizes.iter().enumerate() {
        let category = match prize.category {
            PrizeCategory::Success => "success",
            PrizeCategory::Failure => "consolation",
        };
        table.add_row(vec![(i + 1).to_string(), prize.label.clone(), category.to_string()]);
    }

    println!("Prize Pool ({} entries):", config.prizes.len());
    println!("{}", table);

    Ok(())
}
