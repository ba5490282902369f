use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use noma_stream_core::scheduler::{arrange, arrange_with_rng};
use noma_stream_core::AppConfig;

use crate::fixtures;

/// Arrange the bundled pool the way the stream would and print it.
pub fn run(config: &AppConfig, seed: Option<u64>) -> Result<()> {
    let template = config.stream.template()?;
    let pool = fixtures::pool();
    let total = pool.len();

    let arranged = match seed {
        Some(seed) => arrange_with_rng(pool, &template, &mut StdRng::seed_from_u64(seed)),
        None => arrange(pool, &template),
    };

    println!(
        "{:<4} {:<12} {:<6} {:<16} BODY",
        "#", "CATEGORY", "HEAVY", "ALIAS"
    );
    for (index, moment) in arranged.iter().enumerate() {
        println!(
            "{:<4} {:<12} {:<6} {:<16} {}",
            index,
            moment.category.as_str(),
            if moment.category.is_heavy() { "*" } else { "" },
            moment.alias,
            moment.body_preview(48),
        );
    }

    println!();
    println!("{} of {} moments arranged", arranged.len(), total);

    Ok(())
}
