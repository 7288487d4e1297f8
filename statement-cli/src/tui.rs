use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use statement_client::{ApiRef, WorkEvent, WorkRequest, run_worker};
use statement_core::{Column, StatementView, SubmitError};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Typing the path of the statement to open
    EnterPath(String),
}

pub struct App {
    pub view: StatementView,
    /// Highlighted row on the current page
    pub cursor: usize,
    pub mode: Mode,
    pub notice: Option<String>,
    pub quit: bool,
}

impl App {
    pub fn new(bank: &str) -> Self {
        Self {
            view: StatementView::new(bank),
            cursor: 0,
            mode: Mode::Browse,
            notice: None,
            quit: false,
        }
    }

    pub fn select(&mut self, path: &str) {
        match self.view.select_file(path) {
            Ok(()) => self.notice = None,
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    /// Handle one key press; returns the request to hand to the worker, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WorkRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return None;
        }

        if self.view.modal().is_open() {
            return self.modal_key(key.code);
        }
        if let Mode::EnterPath(input) = &mut self.mode {
            match key.code {
                KeyCode::Char(c) => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => {
                    let path = input.trim().to_string();
                    self.mode = Mode::Browse;
                    self.select(&path);
                }
                KeyCode::Esc => self.mode = Mode::Browse,
                _ => {}
            }
            return None;
        }
        self.browse_key(key.code)
    }

    fn browse_key(&mut self, code: KeyCode) -> Option<WorkRequest> {
        match code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('o') => {
                let current = self
                    .view
                    .file()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.mode = Mode::EnterPath(current);
            }
            KeyCode::Char('u') => match self.view.begin_submit() {
                Ok(pending) => {
                    info!(request_id = pending.request_id, path = %pending.path.display(), "submit");
                    return Some(WorkRequest::Upload(pending));
                }
                Err(SubmitError::InFlight) => {
                    self.notice = Some("Upload in progress (Esc to cancel)".to_string());
                }
                Err(SubmitError::NoFile) => {}
            },
            KeyCode::Esc if self.view.is_loading() => return Some(WorkRequest::CancelUpload),
            KeyCode::Left | KeyCode::Char('h') => {
                if self.view.previous_page() {
                    self.cursor = 0;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.view.next_page() {
                    self.cursor = 0;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.view.page_rows().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Enter => {
                self.view.open_row(self.cursor);
            }
            _ => {}
        }
        None
    }

    fn modal_key(&mut self, code: KeyCode) -> Option<WorkRequest> {
        match code {
            KeyCode::Char(c) => self.view.modal_mut().push_char(c),
            KeyCode::Backspace => self.view.modal_mut().backspace(),
            KeyCode::Esc => self.view.cancel_modal(),
            KeyCode::Enter => return self.view.begin_save().map(WorkRequest::SaveLabel),
            _ => {}
        }
        None
    }

    pub fn apply_event(&mut self, ev: WorkEvent) {
        match ev {
            WorkEvent::UploadFinished { request_id, result } => {
                let replaced = result.is_ok();
                if self.view.finish_upload(request_id, result) && replaced {
                    self.cursor = 0;
                }
            }
            WorkEvent::UploadAborted { request_id } => {
                self.view.cancel_upload(request_id);
                self.notice = Some("Upload cancelled".to_string());
            }
            WorkEvent::LabelSaved { update, result } => {
                self.view.finish_save(&update, result);
            }
        }
    }
}

pub fn run_tui(api: ApiRef, bank: &str, file: Option<PathBuf>) -> Result<()> {
    let (req_tx, req_rx) = tokio::sync::mpsc::unbounded_channel();
    let (ev_tx, ev_rx) = std::sync::mpsc::channel();
    let worker = tokio::spawn(run_worker(req_rx, ev_tx, api));

    let mut app = App::new(bank);
    if let Some(f) = file {
        app.select(&f.display().to_string());
    }

    enable_raw_mode().context("enable raw mode")?;
    let res = with_restore(
        || {
            execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            tokio::task::block_in_place(|| event_loop(&mut terminal, &mut app, &req_tx, &ev_rx))
        },
        restore_terminal,
    );

    worker.abort();
    res
}

/// Run `body`, then `restore` however `body` ended. The body's error wins.
fn with_restore<T>(body: impl FnOnce() -> Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    let res = body();
    let restored = restore();
    let value = res?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show)?;
    raw.context("disable raw mode")
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    req_tx: &UnboundedSender<WorkRequest>,
    ev_rx: &Receiver<WorkEvent>,
) -> Result<()> {
    while !app.quit {
        while let Ok(ev) = ev_rx.try_recv() {
            debug!(?ev, "worker event");
            app.apply_event(ev);
        }

        terminal.draw(|f| draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(req) = app.handle_key(key) {
                    req_tx.send(req).context("request worker stopped")?;
                }
            }
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, app: &App) {
    let view = &app.view;
    let error_height = if view.error().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    // file intake
    let intake = match &app.mode {
        Mode::EnterPath(input) => Line::from(vec![
            Span::styled("Open: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{input}_")),
        ]),
        Mode::Browse => {
            let file = view
                .file()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no file selected)".to_string());
            let button = if view.can_submit() {
                Style::default().fg(Color::Black).bg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray).bg(Color::Blue)
            };
            Line::from(vec![
                Span::raw(file),
                Span::raw("  "),
                Span::styled(format!(" {} ", view.submit_label()), button),
            ])
        }
    };
    let header = Paragraph::new(intake).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "Bank Statement Processor",
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(header, chunks[0]);

    if let Some(err) = view.error() {
        let banner = Paragraph::new(err)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(banner, chunks[1]);
    }

    if view.shows_table() {
        draw_table(f, app, chunks[2]);

        let enabled = Style::default();
        let disabled = Style::default().fg(Color::DarkGray);
        let pager = Paragraph::new(Line::from(vec![
            Span::styled("< Previous", if view.is_first_page() { disabled } else { enabled }),
            Span::raw(format!("   Page {} of {}   ", view.page(), view.total_pages())),
            Span::styled("Next >", if view.is_last_page() { disabled } else { enabled }),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(pager, chunks[3]);
    } else {
        let empty = Paragraph::new("No transactions loaded. Press o to choose a PDF, then u to upload.")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[2]);
    }

    let help = match (&app.notice, view.modal().is_open(), &app.mode) {
        (_, true, _) => "Enter=save  Esc=cancel".to_string(),
        (_, false, Mode::EnterPath(_)) => "Enter=select  Esc=back".to_string(),
        (Some(n), _, _) => n.clone(),
        (None, _, _) => "o=open  u=upload  arrows=move/page  Enter=label  q=quit".to_string(),
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::Gray)),
        chunks[4],
    );

    if view.modal().is_open() {
        draw_modal(f, view);
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let header = Row::new(Column::ALL.iter().map(|c| Cell::from(c.header())))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = view.page_rows().iter().map(|t| {
        Row::new(Column::ALL.iter().map(|c| {
            let line = Line::from(t.display(*c));
            let line = match c {
                c if c.is_amount() => line.alignment(Alignment::Right),
                Column::Label => line.alignment(Alignment::Center),
                _ => line,
            };
            Cell::from(line)
        }))
    });

    let widths = [
        Constraint::Length(11),
        Constraint::Min(24),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Transactions ({})", view.transactions().len())),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_modal(f: &mut Frame, view: &StatementView) {
    let area = centered(60, 12, f.area());
    let detail = |c: Column| {
        view.selected()
            .map(|t| t.display(c))
            .unwrap_or_else(|| "-".to_string())
    };

    let body = Text::from(vec![
        Line::from(Span::styled(
            "Transaction Details:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(format!("Date: {}", detail(Column::Date))),
        Line::raw(format!("Particulars: {}", detail(Column::Particulars))),
        Line::raw(format!("Dr Amount: {}", detail(Column::DrAmount))),
        Line::raw(format!("Cr Amount: {}", detail(Column::CrAmount))),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Label: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}_", view.modal().draft())),
        ]),
    ]);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Add Label")),
        area,
    );
}

fn centered(width: u16, height: u16, outer: Rect) -> Rect {
    let w = width.min(outer.width);
    let h = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - w) / 2,
        y: outer.y + (outer.height - h) / 2,
        width: w,
        height: h,
    }
}
