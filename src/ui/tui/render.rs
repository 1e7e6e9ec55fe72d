//! Drawing for the catalog screen and its modals

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::App;
use crate::{
    client::CatalogApi,
    ui::{current_year, FormField, FormMode, Modal, NoticeLevel},
};

pub fn render<C: CatalogApi>(frame: &mut Frame, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Book table
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    render_search_bar(frame, chunks[0], app);
    render_table(frame, chunks[1], app);
    render_notice(frame, chunks[2], app);
    render_help(frame, chunks[3], app);

    match app.controller.state().modal() {
        Modal::Browsing => {}
        Modal::FormOpen(mode) => render_form_modal(frame, mode, app),
        Modal::DeleteConfirm(_) => render_confirm_modal(frame),
    }
}

fn render_search_bar<C: CatalogApi>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let border = if app.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::raw("Search: "), Span::raw(app.search_input.value())];
    if app.searching {
        spans.push(Span::styled("█", Style::default().fg(Color::White)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Book Management System ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(input, area);
}

fn render_table<C: CatalogApi>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let year = current_year();
    let state = app.controller.state();
    let books = state.filtered_books();

    let header = Row::new(
        ["Title", "Author", "Genre", "Publication Year", "Age", "Price"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
    );

    let rows = books.iter().map(|book| {
        Row::new(vec![
            Cell::from(book.title.clone()),
            Cell::from(book.author.clone()),
            Cell::from(book.genre.clone()),
            Cell::from(book.published_year.to_string()),
            Cell::from(format!("{} years", book.age(year))),
            Cell::from(format!("₹{:.2}", book.price)),
        ])
    });

    let widths = [
        Constraint::Percentage(28),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        Constraint::Percentage(14),
        Constraint::Percentage(10),
        Constraint::Percentage(14),
    ];

    let title = if state.is_stale() {
        format!(" {} of {} books (stale) ", books.len(), state.books().len())
    } else {
        format!(" {} of {} books ", books.len(), state.books().len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .bg(Color::Rgb(50, 50, 80))
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default();
    if !books.is_empty() {
        table_state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_notice<C: CatalogApi>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let Some(notice) = app.controller.state().notice() else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    let line = Paragraph::new(Span::styled(
        format!(" {}", notice.message),
        Style::default().fg(color),
    ));
    frame.render_widget(line, area);
}

fn render_help<C: CatalogApi>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let text = match app.controller.state().modal() {
        Modal::Browsing if app.searching => " Type to filter • Enter/Esc done",
        Modal::Browsing => " a add • e edit • d delete • / search • r reload • ↑↓ move • q quit",
        Modal::FormOpen(_) => " Tab/↑↓ switch field • Enter save • Esc cancel",
        Modal::DeleteConfirm(_) => " y/Enter confirm • n/Esc cancel",
    };
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

fn render_form_modal<C: CatalogApi>(frame: &mut Frame, mode: FormMode, app: &App<C>) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let title = match mode {
        FormMode::Create => " Add Book ",
        FormMode::Edit(_) => " Edit Book ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(FormField::ALL.map(|_| Constraint::Length(3)))
        .split(inner);

    let form = app.controller.state().form();
    for (field, chunk) in FormField::ALL.into_iter().zip(chunks.iter()) {
        let focused = field == app.focused;
        let value = if focused {
            app.field_input.value()
        } else {
            form.get(field)
        };
        let mut spans = vec![Span::raw(value.to_string())];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::White)));
        }
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(format!(" {} ", field))
                .borders(Borders::ALL)
                .border_style(style),
        );
        frame.render_widget(input, *chunk);
    }
}

fn render_confirm_modal(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            "Confirm Delete?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Are you sure you want to delete this book?"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(body, area);
}

/// Calculate centered modal area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
