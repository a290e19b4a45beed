use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::event::{Event as CEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use serde::{Deserialize, Serialize};
use tokio::select;
use tokio::sync::{mpsc, oneshot};

use tombola_engine::{DialogOutcome, DrawBackend, DrawPhase, Frontend, Game};
use tombola_types::{
    AddressForm, DialogText, GameError, Prize, ReceiveKind, ReceiverPrefill, SpinConfig,
};

/// CLI flags (user-provided override the prize file)
#[derive(Parser, Debug)]
#[command(name = "tombola-tui", about = "Tombola prize board (ratatui front end)")]
struct Args {
    /// Prize board JSON file (defaults to a built-in demo ring)
    #[arg(long)]
    prizes: Option<PathBuf>,

    /// Override the number of full laps before the pointer may land
    #[arg(long)]
    laps: Option<u32>,

    /// Override the base hold per tile, in milliseconds
    #[arg(long)]
    step_ms: Option<u64>,

    /// Seed the local draw for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Resting tile replayed at the start of the first draw
    #[arg(long)]
    history: Option<usize>,
}

/// Prize board file. Missing sections fall back to the built-in demo ring.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BoardFile {
    prizes: Vec<Prize>,
    /// Draw weights, aligned with `prizes`. Ignored when the lengths differ.
    weights: Vec<u32>,
    config: SpinConfig,
    text: DialogText,
    prefill: ReceiverPrefill,
}

impl Default for BoardFile {
    fn default() -> Self {
        default_board()
    }
}

fn default_board() -> BoardFile {
    let mut prizes = vec![
        Prize::award(1, "Coffee mug"),
        Prize::award(2, "Sticker pack"),
        Prize::award(3, "T-shirt"),
        Prize::miss(4, "Thanks for playing"),
        Prize::award(5, "Desk mat"),
        Prize::award(6, "Mechanical keyboard"),
        Prize::award(7, "Gift card"),
        Prize::award(8, "Water bottle"),
    ];
    // The keyboard ships, so it wants a delivery address.
    prizes[5].receive_type = ReceiveKind::Address;
    BoardFile {
        prizes,
        weights: vec![4, 6, 3, 10, 4, 1, 2, 4],
        config: SpinConfig::default(),
        text: DialogText::default(),
        prefill: ReceiverPrefill::default(),
    }
}

fn load_board(args: &Args) -> Result<BoardFile> {
    let Some(path) = &args.prizes else {
        return Ok(default_board());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read prize file {}", path.display()))?;
    let board: BoardFile = serde_json::from_str(&raw)
        .with_context(|| format!("parse prize file {}", path.display()))?;
    Ok(board)
}

/// Delay before the local draw resolves, so the busy spinner is visible.
const LOCAL_DRAW_LATENCY: Duration = Duration::from_millis(350);

/// In-process draw service: a weighted random pick over the catalog.
#[derive(Clone)]
struct LocalDraw {
    prizes: Arc<Vec<Prize>>,
    weighted: Option<WeightedIndex<u32>>,
    rng: Arc<Mutex<StdRng>>,
}

impl LocalDraw {
    fn new(prizes: Vec<Prize>, weights: &[u32], rng: StdRng) -> Self {
        let weighted = (weights.len() == prizes.len())
            .then(|| WeightedIndex::new(weights.iter().copied()).ok())
            .flatten();
        Self {
            prizes: Arc::new(prizes),
            weighted,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

impl DrawBackend for LocalDraw {
    type Error = std::convert::Infallible;

    async fn start_draw(&self) -> Result<Prize, Self::Error> {
        tokio::time::sleep(LOCAL_DRAW_LATENCY).await;
        let index = {
            let mut rng = self.rng.lock().unwrap();
            match &self.weighted {
                Some(dist) => dist.sample(&mut *rng),
                None => rng.gen_range(0..self.prizes.len()),
            }
        };
        let prize = self.prizes[index].clone();
        tracing::debug!(prize_id = prize.prize_id, index, "local draw resolved");
        Ok(prize)
    }

    async fn save_address(&self, form: AddressForm) -> Result<(), Self::Error> {
        tokio::time::sleep(LOCAL_DRAW_LATENCY).await;
        tracing::debug!(receiver = %form.receiver, "address accepted");
        Ok(())
    }
}

/// The UI event loop went away while the engine was mid-draw.
#[derive(Debug)]
struct UiClosed;

impl std::fmt::Display for UiClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ui event channel closed")
    }
}

impl std::error::Error for UiClosed {}

/// Bridge from the engine to the terminal loop. Dialog calls park on a
/// oneshot until the user answers.
#[derive(Clone)]
struct TuiFrontend {
    ui_tx: mpsc::UnboundedSender<UiEvent>,
}

impl Frontend for TuiFrontend {
    type Error = UiClosed;

    fn highlight(&self, index: Option<usize>) {
        let _ = self.ui_tx.send(UiEvent::Highlight(index));
    }

    fn busy(&self, on: bool) {
        let _ = self.ui_tx.send(UiEvent::Busy(on));
    }

    fn phase_changed(&self, phase: DrawPhase) {
        let _ = self.ui_tx.send(UiEvent::Phase(phase));
    }

    async fn show_result(&self, prize: &Prize) -> Result<DialogOutcome, UiClosed> {
        let (reply, rx) = oneshot::channel();
        self.ui_tx
            .send(UiEvent::ShowResult {
                prize: prize.clone(),
                reply,
            })
            .map_err(|_| UiClosed)?;
        rx.await.map_err(|_| UiClosed)
    }

    async fn show_miss(&self, prize: &Prize) -> Result<DialogOutcome, UiClosed> {
        let (reply, rx) = oneshot::channel();
        self.ui_tx
            .send(UiEvent::ShowMiss {
                prize: prize.clone(),
                reply,
            })
            .map_err(|_| UiClosed)?;
        rx.await.map_err(|_| UiClosed)
    }

    async fn collect_address(
        &self,
        prefill: &ReceiverPrefill,
    ) -> Result<Option<AddressForm>, UiClosed> {
        let (reply, rx) = oneshot::channel();
        self.ui_tx
            .send(UiEvent::CollectAddress {
                prefill: prefill.clone(),
                reply,
            })
            .map_err(|_| UiClosed)?;
        rx.await.map_err(|_| UiClosed)
    }

    fn teardown(&self) -> Result<(), UiClosed> {
        Ok(())
    }
}

enum UiEvent {
    Highlight(Option<usize>),
    Busy(bool),
    Phase(DrawPhase),
    ShowResult {
        prize: Prize,
        reply: oneshot::Sender<DialogOutcome>,
    },
    ShowMiss {
        prize: Prize,
        reply: oneshot::Sender<DialogOutcome>,
    },
    CollectAddress {
        prefill: ReceiverPrefill,
        reply: oneshot::Sender<Option<AddressForm>>,
    },
    DrawFinished(Result<Prize, GameError>),
}

enum Dialog {
    Result {
        prize: Prize,
        reply: Option<oneshot::Sender<DialogOutcome>>,
    },
    Miss {
        prize: Prize,
        reply: Option<oneshot::Sender<DialogOutcome>>,
    },
    Address {
        form: AddressForm,
        field: usize,
        reply: Option<oneshot::Sender<Option<AddressForm>>>,
    },
}

struct AppState {
    lit: Option<usize>,
    busy: bool,
    phase: DrawPhase,
    draws: u64,
    last: Option<Prize>,
    logs: Vec<String>,
    hint: String,
    dialog: Option<Dialog>,
    text: DialogText,
}

type TuiGame = Game<LocalDraw, TuiFrontend>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let board = load_board(&args)?;

    let mut config = board.config;
    if let Some(laps) = args.laps {
        config.laps = laps;
    }
    if let Some(step_ms) = args.step_ms {
        config.step_ms = step_ms;
    }
    if let Some(history) = args.history {
        config.history_index = history;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let draw_backend = LocalDraw::new(board.prizes.clone(), &board.weights, rng);

    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let frontend = TuiFrontend {
        ui_tx: ui_tx.clone(),
    };
    let game = Arc::new(
        Game::new(board.prizes, config, board.prefill, draw_backend, frontend)
            .context("build game")?,
    );

    // TUI setup
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    terminal.clear()?;

    let mut app = AppState {
        lit: None,
        busy: false,
        phase: DrawPhase::Idle,
        draws: 0,
        last: None,
        logs: vec![format!(
            "Board ready: {} prizes on a {}x{} ring",
            game.prizes().len(),
            game.layout().side(),
            game.layout().side()
        )],
        hint: String::from("Enter draws, q quits"),
        dialog: None,
        text: board.text,
    };

    let mut events = EventStream::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(200);

    loop {
        terminal.draw(|f| draw_ui(f, &app, &game))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        select! {
            maybe_ev = events.next() => {
                if let Some(Ok(ev)) = maybe_ev {
                    if handle_key_event(ev, &mut app, &game, &ui_tx) {
                        break;
                    }
                }
            }
            Some(ui_msg) = ui_rx.recv() => {
                handle_ui_event(ui_msg, &mut app);
            }
            _ = tokio::time::sleep(timeout) => {
                last_tick = Instant::now();
            }
        }
    }

    game.destroy();
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn handle_ui_event(ev: UiEvent, app: &mut AppState) {
    match ev {
        UiEvent::Highlight(index) => app.lit = index,
        UiEvent::Busy(on) => app.busy = on,
        UiEvent::Phase(phase) => app.phase = phase,
        UiEvent::ShowResult { prize, reply } => {
            push_log(app, format!("Won: {} (id {})", prize.prize_name, prize.prize_id));
            app.dialog = Some(Dialog::Result {
                prize,
                reply: Some(reply),
            });
        }
        UiEvent::ShowMiss { prize, reply } => {
            push_log(app, format!("No win: {}", prize.prize_name));
            app.dialog = Some(Dialog::Miss {
                prize,
                reply: Some(reply),
            });
        }
        UiEvent::CollectAddress { prefill, reply } => {
            app.dialog = Some(Dialog::Address {
                form: AddressForm::from_prefill(&prefill),
                field: 0,
                reply: Some(reply),
            });
        }
        UiEvent::DrawFinished(result) => match result {
            Ok(prize) => {
                app.draws += 1;
                push_log(
                    app,
                    format!("Draw #{} settled on {}", app.draws, prize.prize_name),
                );
                app.last = Some(prize);
            }
            Err(GameError::ConcurrentDraw) => {
                push_log(app, "A draw is already running".to_string());
            }
            Err(e) => push_log(app, format!("Draw failed: {e}")),
        },
    }
}

fn start_draw(game: &Arc<TuiGame>, ui_tx: &mpsc::UnboundedSender<UiEvent>) {
    let game = Arc::clone(game);
    let tx = ui_tx.clone();
    tokio::spawn(async move {
        let result = game.draw().await;
        let _ = tx.send(UiEvent::DrawFinished(result));
    });
}

fn handle_key_event(
    ev: CEvent,
    app: &mut AppState,
    game: &Arc<TuiGame>,
    ui_tx: &mpsc::UnboundedSender<UiEvent>,
) -> bool {
    if let CEvent::Key(KeyEvent {
        code, modifiers, ..
    }) = ev
    {
        // Ctrl-C quits even while a dialog is up.
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if let Some(mut dialog) = app.dialog.take() {
            if !handle_dialog_key(code, &mut dialog) {
                app.dialog = Some(dialog);
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if game.is_drawing() {
                    push_log(app, "A draw is already running".to_string());
                } else {
                    start_draw(game, ui_tx);
                }
            }
            _ => {}
        }
    }
    false
}

/// Returns true when the dialog is finished and should close.
fn handle_dialog_key(code: KeyCode, dialog: &mut Dialog) -> bool {
    match dialog {
        Dialog::Result { reply, .. } | Dialog::Miss { reply, .. } => match code {
            KeyCode::Enter => {
                if let Some(tx) = reply.take() {
                    let _ = tx.send(DialogOutcome::Confirmed);
                }
                true
            }
            KeyCode::Esc => {
                if let Some(tx) = reply.take() {
                    let _ = tx.send(DialogOutcome::Dismissed);
                }
                true
            }
            _ => false,
        },
        Dialog::Address { form, field, reply } => match code {
            KeyCode::Enter => {
                let done = form.clone();
                if let Some(tx) = reply.take() {
                    let _ = tx.send(Some(done));
                }
                true
            }
            KeyCode::Esc => {
                if let Some(tx) = reply.take() {
                    let _ = tx.send(None);
                }
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                *field = (*field + 1) % 4;
                false
            }
            KeyCode::BackTab | KeyCode::Up => {
                *field = (*field + 3) % 4;
                false
            }
            KeyCode::Backspace => {
                field_mut(form, *field).pop();
                false
            }
            KeyCode::Char(c) => {
                field_mut(form, *field).push(c);
                false
            }
            _ => false,
        },
    }
}

fn field_mut(form: &mut AddressForm, field: usize) -> &mut String {
    match field {
        0 => &mut form.receiver,
        1 => &mut form.phone,
        2 => &mut form.region,
        _ => &mut form.detail,
    }
}

fn draw_ui(f: &mut ratatui::Frame, app: &AppState, game: &TuiGame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(f.area());

    // Status lines
    let status = Paragraph::new(format!(
        "Tombola | Phase {} | Draws {}{}",
        app.phase.as_str(),
        app.draws,
        if app.busy { " | BUSY" } else { "" },
    ))
    .style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[0]);
    let config_line = Paragraph::new(format!(
        "Ring {} tiles, {} laps, {}ms step | Last prize: {}",
        game.layout().len(),
        game.config().laps,
        game.config().step_ms,
        app.last
            .as_ref()
            .map(|p| p.prize_name.as_str())
            .unwrap_or("none"),
    ))
    .style(Style::default().fg(Color::Gray));
    f.render_widget(
        config_line,
        Rect {
            x: chunks[0].x,
            y: chunks[0].y.saturating_add(1),
            width: chunks[0].width,
            height: 1,
        },
    );

    // Main area split into board + log
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(chunks[1]);

    draw_board(f, main_chunks[0], app, game);

    // Log pane
    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take((main_chunks[1].height.saturating_sub(2)) as usize)
        .rev()
        .map(|l| Line::raw(l.clone()))
        .collect();
    let log = Paragraph::new(log_lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });
    f.render_widget(log, main_chunks[1]);

    // Hint line
    let hint = Paragraph::new(app.hint.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(hint, chunks[2]);

    match &app.dialog {
        Some(Dialog::Result { prize, .. }) => {
            draw_prize_popup(f, &app.text.success_title, prize, &app.text)
        }
        Some(Dialog::Miss { prize, .. }) => {
            draw_prize_popup(f, &app.text.failed_title, prize, &app.text)
        }
        Some(Dialog::Address { form, field, .. }) => draw_address_popup(f, app, form, *field),
        None => {}
    }
}

fn draw_board(f: &mut ratatui::Frame, area: Rect, app: &AppState, game: &TuiGame) {
    let block = Block::default().borders(Borders::ALL).title("Board");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = game.layout();
    let side = layout.side();
    if side == 0 || inner.height == 0 {
        return;
    }

    // Ring index for each grid cell; interior cells stay empty.
    let mut grid = vec![vec![None; side]; side];
    for index in 0..layout.len() {
        if let Some((row, col)) = layout.cell_of(index) {
            grid[row][col] = Some(index);
        }
    }

    let row_constraints = vec![Constraint::Ratio(1, side as u32); side];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);
    for (r, row_area) in rows.iter().enumerate() {
        let col_constraints = vec![Constraint::Ratio(1, side as u32); side];
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);
        for (c, cell) in cols.iter().enumerate() {
            match grid[r][c] {
                Some(index) => draw_tile(f, *cell, app, game, index),
                None if r == side / 2 && c == side / 2 => {
                    let label = Paragraph::new(vec![
                        Line::styled("TOMBOLA", Style::default().fg(Color::Yellow)),
                        Line::raw("Enter to draw"),
                    ])
                    .alignment(Alignment::Center);
                    f.render_widget(label, *cell);
                }
                None => {}
            }
        }
    }
}

fn draw_tile(f: &mut ratatui::Frame, cell: Rect, app: &AppState, game: &TuiGame, index: usize) {
    let prize = &game.prizes()[index];
    let lit = app.lit == Some(index);
    let style = if lit {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else if prize.is_miss() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let name = if prize.prize_alias.is_empty() {
        prize.prize_name.as_str()
    } else {
        prize.prize_alias.as_str()
    };
    let width = cell.width.saturating_sub(2) as usize;
    let label: String = name.chars().take(width.max(1)).collect();

    let tile = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{index}")),
        );
    f.render_widget(tile, cell);
}

fn draw_prize_popup(f: &mut ratatui::Frame, title: &str, prize: &Prize, text: &DialogText) {
    let area = centered_rect(44, 7, f.area());
    f.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let message = if prize.award_msg.is_empty() {
        prize.prize_name.clone()
    } else {
        prize.award_msg.clone()
    };
    let body = vec![
        Line::styled(
            prize.prize_name.clone(),
            Style::default().fg(Color::Yellow),
        ),
        Line::raw(message),
        Line::raw(""),
        Line::raw(format!(
            "Enter {} / Esc {}",
            text.confirm_text, text.cancel_text
        )),
    ];
    let para = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}

fn draw_address_popup(f: &mut ratatui::Frame, app: &AppState, form: &AddressForm, field: usize) {
    let area = centered_rect(50, 9, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.text.address_title.clone());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let labels = ["Receiver", "Phone", "Region", "Detail"];
    let values = [&form.receiver, &form.phone, &form.region, &form.detail];
    let mut lines = Vec::new();
    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        let style = if i == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:>8}: "), style),
            Span::raw(value.to_string()),
            Span::raw(if i == field { "_" } else { "" }),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!(
        "Tab fields / Enter {} / Esc {}",
        app.text.confirm_text, app.text.cancel_text
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn push_log(app: &mut AppState, line: String) {
    let ts = Local::now().format("%H:%M:%S");
    app.logs.push(format!("{ts} {line}"));
    if app.logs.len() > 300 {
        let excess = app.logs.len() - 300;
        app.logs.drain(0..excess);
    }
}
