//! `verdia tip` — the daily care tip.

use crate::cli::output::{self, Styled};
use crate::tips;
use anyhow::Result;

pub async fn run() -> Result<()> {
    let tip = tips::daily_tip();

    if output::is_json() {
        output::print_json(&serde_json::json!({ "tip": tip }));
        return Ok(());
    }

    let s = Styled::new();
    println!();
    println!("  {}", s.bold("Consejo del día"));
    println!("  {tip}");
    println!();
    Ok(())
}
