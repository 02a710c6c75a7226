use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::store::{Ledger, LedgerError};
use crate::ui::app::{App, FormField, InputMode, PendingAction};
use crate::ui::util::format_amount;

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh(ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Rows inside the expense table: everything except the
            // header, cards, form, table chrome and the two bottom bars
            let table_rows = f.area().height.saturating_sub(17) as usize;
            app.visible_rows = table_rows.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger),
                InputMode::Form => handle_form_input(key, app, ledger)?,
                InputMode::Budget => handle_budget_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') => app.cursor_top(),
        KeyCode::Char('G') => app.cursor_bottom(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.cursor_down();
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.cursor_up();
            }
        }
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.input_mode = InputMode::Form;
            app.status_message.clear();
        }
        KeyCode::Char('b') => {
            app.input_mode = InputMode::Budget;
            // Pre-filled so Enter with no edits keeps the current value
            app.budget_input = ledger.budget().to_string();
            app.status_message.clear();
        }
        KeyCode::Char('D') => {
            if let Some(record) = app.selected_record() {
                let id = record.id;
                let label = format!(
                    "{} {} {}",
                    record.date,
                    record.resolved_category().name,
                    format_amount(record.amount)
                );
                app.confirm_message = format!("Delete {label}?");
                app.pending_action = Some(PendingAction::DeleteExpense { id, label });
                app.input_mode = InputMode::Confirm;
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form.focus = app.form.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus = app.form.focus.prev();
        }
        KeyCode::Enter => submit_form(app, ledger)?,
        KeyCode::Left if app.form.focus == FormField::Category => {
            app.form.cycle_category(-1);
        }
        KeyCode::Right if app.form.focus == FormField::Category => {
            app.form.cycle_category(1);
        }
        KeyCode::Char('+') | KeyCode::Char('=') if app.form.focus == FormField::Category => {
            app.form.cycle_category(1);
        }
        KeyCode::Char('-') if app.form.focus == FormField::Category => {
            app.form.cycle_category(-1);
        }
        KeyCode::Backspace => {
            if let Some(text) = app.form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = app.form.focused_text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

/// A typed rejection keeps the draft and lands in the status line;
/// anything else (storage failure) tears the TUI down.
fn submit_form(app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let category = app.form.selected_category().id;
    match ledger.add_expense(&app.form.amount, category, &app.form.date, &app.form.note) {
        Ok(id) => {
            app.refresh(ledger);
            app.form.reset();
            if let Some(record) = app.records.iter().find(|r| r.id == id) {
                let added = format!(
                    "Added {} {} on {}",
                    format_amount(record.amount),
                    record.resolved_category().name,
                    record.date
                );
                app.set_status(added);
            }
        }
        Err(e) => match e.downcast_ref::<LedgerError>() {
            Some(reason) => app.set_status(reason.to_string()),
            None => return Err(e),
        },
    }
    Ok(())
}

fn handle_budget_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => match ledger.set_budget(&app.budget_input) {
            Ok(()) => {
                app.refresh(ledger);
                app.input_mode = InputMode::Normal;
                app.budget_input.clear();
                app.set_status(format!("Budget set to {}", format_amount(ledger.budget())));
            }
            // Rejection keeps the editor open so the input can be fixed
            Err(e) => match e.downcast_ref::<LedgerError>() {
                Some(reason) => app.set_status(reason.to_string()),
                None => return Err(e),
            },
        },
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.budget_input.clear();
            app.status_message.clear();
        }
        KeyCode::Backspace => {
            app.budget_input.pop();
            app.status_message.clear();
        }
        KeyCode::Char(c) => {
            app.budget_input.push(c);
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id, label } => {
                        let removed = ledger.delete_expense(id)?;
                        app.refresh(ledger);
                        if removed {
                            app.set_status(format!("Deleted: {label}"));
                        } else {
                            app.set_status("Already gone");
                        }
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        // Anything but an explicit yes cancels
        _ => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}
