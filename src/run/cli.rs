use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::Category;
use crate::store::Ledger;
use crate::summary;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(ledger),
        "list" | "ls" => cli_list(ledger),
        "add" => cli_add(&args[2..], ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "budget" => cli_budget(&args[2..], ledger),
        "categories" => cli_categories(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI — local-only personal expense tracker");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <amount> <category>       Log an expense");
    println!("    --date <YYYY-MM-DD>         Expense date (default: today)");
    println!("    --note <text>               Free-text note");
    println!("  delete <id>                   Delete an expense by id");
    println!("  list                          List all expenses, newest first");
    println!("  summary                       Print spend, budget and category breakdown");
    println!("  budget [value]                Show or set the monthly budget");
    println!("  categories                    List the spending categories");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(ledger: &Ledger) -> Result<()> {
    let total = summary::total_spend(ledger.records());
    let remaining = summary::remaining_budget(ledger.budget(), total);
    let breakdown = summary::category_breakdown(ledger.records(), Category::all());

    println!(
        "ExpenseTUI — {} expense{}",
        ledger.records().len(),
        if ledger.records().len() == 1 { "" } else { "s" }
    );
    println!("{}", "─".repeat(40));
    println!("  Total spent: ${:.2}", total);
    println!("  Budget:      ${:.2}", ledger.budget());
    if remaining < Decimal::ZERO {
        println!("  Remaining:   -${:.2} (over budget)", remaining.abs());
    } else {
        println!("  Remaining:   ${:.2}", remaining);
    }

    if !breakdown.is_empty() {
        println!();
        println!("Spending by category:");
        for slice in &breakdown {
            println!("  {:<16} ${:.2}", slice.category.name, slice.total);
        }
    }

    Ok(())
}

fn cli_list(ledger: &Ledger) -> Result<()> {
    if ledger.records().is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<15} {:<12} {:<15} {:>10}  Note",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(64));
    for record in ledger.records() {
        println!(
            "{:<15} {:<12} {:<15} {:>10}  {}",
            record.id,
            record.date,
            record.resolved_category().name,
            format!("${:.2}", record.amount),
            record.note,
        );
    }
    Ok(())
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() < 2 || args[0].starts_with('-') {
        anyhow::bail!(
            "Usage: expensetui add <amount> <category> [--date YYYY-MM-DD] [--note <text>]"
        );
    }

    let amount = args[0].as_str();
    let category = args[1].as_str();

    // Parse --date / --note flags
    let date = args
        .windows(2)
        .find(|w| w[0] == "--date")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    let note = args
        .windows(2)
        .find(|w| w[0] == "--note")
        .map(|w| w[1].clone())
        .unwrap_or_default();

    // Unregistered ids are accepted but display under the catch-all,
    // so say so up front
    if Category::resolve(category).id != category {
        let ids: Vec<&str> = Category::all().iter().map(|c| c.id).collect();
        println!(
            "Note: '{category}' is not a registered category; it will show under {}.",
            Category::fallback().name
        );
        println!("Known ids: {}", ids.join(", "));
    }

    let id = ledger.add_expense(amount, category, &date, &note)?;
    if let Some(record) = ledger.records().iter().find(|r| r.id == id) {
        println!(
            "Added expense {id}: ${:.2} {} on {}",
            record.amount,
            record.resolved_category().name,
            record.date
        );
    }
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let id: i64 = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: expensetui delete <id>"))?
        .parse()
        .map_err(|_| anyhow::anyhow!("Expense id must be a number"))?;

    if ledger.delete_expense(id)? {
        println!("Deleted expense {id}");
    } else {
        println!("No expense with id {id}");
    }
    Ok(())
}

fn cli_budget(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args.first() {
        Some(value) => {
            ledger.set_budget(value)?;
            println!("Budget set to ${:.2}", ledger.budget());
        }
        None => {
            let total = summary::total_spend(ledger.records());
            let remaining = summary::remaining_budget(ledger.budget(), total);
            println!("Budget:    ${:.2}", ledger.budget());
            if remaining < Decimal::ZERO {
                println!("Remaining: -${:.2} (over budget)", remaining.abs());
            } else {
                println!("Remaining: ${:.2}", remaining);
            }
        }
    }
    Ok(())
}

fn cli_categories() -> Result<()> {
    println!("{:<15} {:<15} Color", "ID", "Name");
    println!("{}", "─".repeat(40));
    for cat in Category::all() {
        println!("{:<15} {:<15} {}", cat.id, cat.name, cat.color);
    }
    Ok(())
}
