use clap::Subcommand;
use rust_decimal::Decimal;
use streakbook_core::{BudgetStatus, Config};

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the monthly limit (zero or negative clears it)
    Set {
        #[arg(allow_hyphen_values = true)]
        limit: Decimal,
    },
    /// Remove the monthly limit
    Clear,
    /// Compare this month's expenses with the limit
    Status {
        /// Print a single human-readable line instead of JSON
        #[arg(long)]
        plain: bool,
    },
}

fn status_line(status: BudgetStatus, config: &Config) -> String {
    let symbol = &config.display.currency_symbol;
    match status {
        BudgetStatus::Unset => "No budget set".to_string(),
        BudgetStatus::WithinBudget { remaining } => {
            format!("Within budget: {symbol}{} left", remaining.round_dp(2))
        }
        BudgetStatus::Exceeded { over_by } => {
            format!("Budget exceeded by {symbol}{}", over_by.round_dp(2))
        }
    }
}

pub fn run(action: BudgetAction) -> CmdResult {
    let (mut tracker, config) = open_tracker()?;

    match action {
        BudgetAction::Set { limit } => {
            tracker.set_budget(limit)?;
            print_json(&tracker.budget_status())?;
        }
        BudgetAction::Clear => {
            tracker.clear_budget();
            print_json(&tracker.budget_status())?;
        }
        BudgetAction::Status { plain: true } => {
            println!("{}", status_line(tracker.budget_status(), &config));
        }
        BudgetAction::Status { plain: false } => {
            print_json(&tracker.budget_status())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_uses_currency_symbol() {
        let mut config = Config::default();
        config.display.currency_symbol = "$".into();
        assert_eq!(
            status_line(BudgetStatus::Exceeded { over_by: Decimal::from(100) }, &config),
            "Budget exceeded by $100"
        );
        assert_eq!(
            status_line(
                BudgetStatus::WithinBudget { remaining: Decimal::new(1250, 1) },
                &config
            ),
            "Within budget: $125.0 left"
        );
        assert_eq!(status_line(BudgetStatus::Unset, &config), "No budget set");
    }
}
