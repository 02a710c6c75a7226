use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::app::{App, FormField, InputMode};
use super::theme;
use super::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Form + table | chart + legend
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Message / input bar
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_summary_cards(f, chunks[1], app);
    render_body(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
    render_message_bar(f, chunks[4], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = " ExpenseTUI ";
    let right = format!(
        " {} expense{} ",
        app.records.len(),
        if app.records.len() == 1 { "" } else { "s" }
    );

    let pad = (area.width as usize).saturating_sub(title.len() + right.len());
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(theme::ACCENT)
                .bg(theme::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(pad), Style::default().bg(theme::HEADER_BG)),
        Span::styled(
            right,
            Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG),
        ),
    ]));
    f.render_widget(bar, area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_card(f, cards[0], "Total Spent", app.total_spend, theme::RED, None);
    render_card(
        f,
        cards[1],
        "Budget",
        app.budget,
        theme::ACCENT,
        Some("b to edit".into()),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        app.remaining,
        if app.remaining >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        if app.remaining < Decimal::ZERO {
            Some("over budget".into())
        } else {
            None
        },
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_body(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(columns[0]);

    render_form(f, left[0], app);
    render_expense_table(f, left[1], app);

    let legend_height = if app.breakdown.is_empty() {
        0
    } else {
        (app.breakdown.len() as u16 + 2).min(8)
    };
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(legend_height)])
        .split(columns[1]);

    render_breakdown_chart(f, right[0], app);
    if legend_height > 0 {
        render_legend(f, right[1], app);
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Form;
    let border = if editing { theme::ACCENT } else { theme::OVERLAY };

    let lines: Vec<Line> = FormField::all()
        .iter()
        .map(|field| {
            let focused = editing && app.form.focus == *field;
            let label_style = if focused {
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };

            let value = match field {
                FormField::Date => app.form.date.clone(),
                FormField::Amount => app.form.amount.clone(),
                FormField::Note => app.form.note.clone(),
                FormField::Category => {
                    let cat = app.form.selected_category();
                    if focused {
                        format!("◂ {} {} ▸", cat.icon, cat.name)
                    } else {
                        format!("{} {}", cat.icon, cat.name)
                    }
                }
            };

            Line::from(vec![
                Span::styled(format!(" {field:<9}"), label_style),
                Span::styled(value, theme::normal_style()),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " New Expense ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(form, area);

    // Terminal caret on the focused text field
    if editing && app.form.focus != FormField::Category {
        let value_len = match app.form.focus {
            FormField::Date => app.form.date.chars().count(),
            FormField::Amount => app.form.amount.chars().count(),
            FormField::Note => app.form.note.chars().count(),
            FormField::Category => 0,
        };
        let row = FormField::all()
            .iter()
            .position(|fld| *fld == app.form.focus)
            .unwrap_or(0);
        let x = area.x + 11 + value_len as u16;
        let y = area.y + 1 + row as u16;
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_expense_table(f: &mut Frame, area: Rect, app: &App) {
    if app.records.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled("Press a to add one", theme::dim_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Expenses (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Category", "Note", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let is_cursor = i == app.expense_index;
            let cat = record.resolved_category();

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let note = if record.note.is_empty() {
                "-".to_string()
            } else {
                truncate(&record.note, 24)
            };

            Row::new(vec![
                Cell::from(format!(" {}", record.date)),
                Cell::from(format!("{} {}", cat.icon, cat.name)),
                Cell::from(Span::styled(note, theme::dim_style())),
                Cell::from(Span::styled(
                    format_amount(record.amount),
                    theme::spent_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(17),
        Constraint::Min(8),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Expenses ({}) ", app.records.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_breakdown_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Spending by Category ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.breakdown.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing to chart yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .breakdown
        .iter()
        .map(|slice| {
            let val = slice.total.to_u64().unwrap_or(0);
            let label = truncate(slice.category.name, 9);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(theme::category_color(slice.category)))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_legend(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .breakdown
        .iter()
        .map(|slice| {
            Line::from(vec![
                Span::styled(
                    " ● ",
                    Style::default().fg(theme::category_color(slice.category)),
                ),
                Span::styled(
                    format!("{:<14}", truncate(slice.category.name, 13)),
                    theme::normal_style(),
                ),
                Span::styled(format_amount(slice.total), theme::dim_style()),
            ])
        })
        .collect();

    let legend = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Breakdown ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(legend, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Form => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Budget => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(" {} spent", format_amount(app.total_spend));

    let right = match app.input_mode {
        InputMode::Normal => " a add | D delete | b budget | ? help ",
        InputMode::Form => " Tab field | ←/→ category | Enter save | Esc cancel ",
        InputMode::Budget => " Enter apply | Esc cancel ",
        InputMode::Confirm => " y confirm | n cancel ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_message_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Budget => {
            let mut spans = vec![
                Span::styled("budget> ", Style::default().fg(theme::YELLOW)),
                Span::styled(&app.budget_input, theme::input_bar_style()),
            ];
            // A rejected value keeps the editor open; show the reason
            // next to the input
            if !app.status_message.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", app.status_message),
                    Style::default().fg(theme::RED).bg(theme::INPUT_BG),
                ));
            }
            (
                Line::from(spans),
                Some(8 + app.budget_input.chars().count() as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press a to add an expense, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, theme::input_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::INPUT_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            " ExpenseTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Navigation",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor          g/G      Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-d/u         Half page down/up    q        Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Actions",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  a                Add expense          b        Set budget",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  D                Delete selected      Enter    Save / confirm",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Entry form",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Next/Prev field      ←/→      Cycle category",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Esc              Cancel and close",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Press any key to close ",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    // Center the popup, clamped to terminal size
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 64.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
