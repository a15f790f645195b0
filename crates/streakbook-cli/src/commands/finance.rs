use clap::Subcommand;
use rust_decimal::Decimal;
use streakbook_core::finance::parse_amount;
use streakbook_core::EntryKind;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum FinanceAction {
    /// Record an entry dated today
    Add {
        /// Entry kind: expense or income
        kind: EntryKind,
        /// Short description
        description: String,
        /// Positive amount
        #[arg(value_parser = parse_amount)]
        amount: Decimal,
    },
    /// List entries, newest day first
    List {
        /// Only show entries of this kind
        #[arg(long)]
        kind: Option<EntryKind>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
    /// Today's spend and this month's totals
    Summary,
}

pub fn run(action: FinanceAction) -> CmdResult {
    let (mut tracker, _config) = open_tracker()?;

    match action {
        FinanceAction::Add {
            kind,
            description,
            amount,
        } => {
            let entry = tracker.add_entry(kind, &description, amount)?;
            print_json(&entry)?;
        }
        FinanceAction::List { kind } => {
            let entries: Vec<_> = tracker
                .finance()
                .entries_newest_first()
                .into_iter()
                .filter(|e| kind.map_or(true, |k| e.kind == k))
                .collect();
            print_json(&entries)?;
        }
        FinanceAction::Delete { id } => match tracker.delete_entry(&id) {
            Some(entry) => print_json(&entry)?,
            None => return Err(format!("entry not found: {id}").into()),
        },
        FinanceAction::Summary => {
            print_json(&tracker.finance_summary())?;
        }
    }
    Ok(())
}
