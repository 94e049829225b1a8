use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing::info;

use pitchside::app::{App, AppScreen};
use pitchside::config::Config;
use pitchside::event::{AppEvent, EventHandler};
use pitchside::logging;
use pitchside::session::plan::TodayPlan;
use pitchside::store::json_store::{JsonStore, default_data_dir};
use pitchside::store::kv::KeyValueStore;
use pitchside::ui::components::activity_heatmap::ActivityHeatmap;
use pitchside::ui::components::drill_list::DrillList;
use pitchside::ui::components::focus_tabs::FocusTabs;
use pitchside::ui::components::profile_form::ProfileForm;
use pitchside::ui::components::progress_panel::ProgressPanel;
use pitchside::ui::components::weekly_plan::WeeklyPlanView;
use pitchside::ui::layout::{PlanLayout, centered_rect, pack_hint_lines};
use pitchside::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "pitchside", version, about = "Terminal football training planner")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Starting focus (control, fitness, shooting, weekly)")]
    goal: Option<String>,

    #[arg(long, help = "Directory for profile, history and log files")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Print today's plan and progress, then exit")]
    summary: bool,

    #[arg(long, value_name = "PATH", help = "Write profile and history to a JSON file")]
    export: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Replace profile and history from an export file")]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    let focus = config.startup_focus(cli.goal.as_deref())?;

    let data_dir = cli
        .data_dir
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(default_data_dir);
    let mut store = JsonStore::with_base_dir(data_dir)?;
    logging::init(store.base_dir(), &config.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "pitchside starting");

    if let Some(path) = cli.import {
        let data = store.read_import(&path)?;
        println!(
            "Imported profile ({}) and {} history days from {}",
            data.profile.summary(),
            data.history.len(),
            path.display()
        );
        return Ok(());
    }
    if let Some(path) = cli.export {
        store.write_export(&config, &path)?;
        println!("Exported to {}", path.display());
        return Ok(());
    }

    let theme = Theme::load(&config.theme).unwrap_or_default();
    let mut app = App::new(store, config, theme, focus);

    if cli.summary {
        print_summary(&app);
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn print_summary<S: KeyValueStore>(app: &App<S>) {
    let planner = &app.planner;
    let today = app.today();
    println!("Profile: {}", planner.profile().summary());
    println!("Focus:   {}", planner.focus().label());
    match planner.today_plan() {
        TodayPlan::Drills(drills) => {
            for planned in drills {
                println!(
                    "  [{}] {:<28} {:>3} min  {}",
                    if planner.is_complete(planned.id()) { "x" } else { " " },
                    planned.drill.name,
                    planned.duration_min,
                    planned.description
                );
            }
        }
        TodayPlan::Weekly(week) => {
            for entry in week.iter() {
                println!(
                    "  {:<4} {:<26} {:>3} min  {}",
                    entry.weekday.to_string(),
                    entry.activity.label(),
                    entry.minutes,
                    entry.note
                );
            }
        }
    }
    println!(
        "Streak: {} days (best {})  This week: {}/7",
        planner.streak(today),
        planner.best_streak(),
        planner.weekly_count(today)
    );
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Plan => handle_plan_key(app, key),
        AppScreen::Profile => handle_profile_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
    }
}

fn handle_plan_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(c @ '1'..='4') => app.set_focus_index(c as usize - '1' as usize),
        KeyCode::Tab => app.cycle_focus(true),
        KeyCode::BackTab => app.cycle_focus(false),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('p') => app.go_to_profile(),
        KeyCode::Char('s') => app.go_to_stats(),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

fn handle_profile_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_plan(),
        KeyCode::Up | KeyCode::Char('k') => app.profile_select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.profile_select_next(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.profile_cycle(true),
        KeyCode::Left | KeyCode::Char('h') => app.profile_cycle(false),
        _ => {}
    }
}

fn handle_stats_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => app.go_to_plan(),
        _ => {}
    }
}

fn render<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<S>) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Plan => render_plan(frame, app),
        AppScreen::Profile => render_profile(frame, app),
        AppScreen::Stats => render_stats(frame, app),
    }
}

fn render_header<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let colors = &app.theme.colors;
    let header_info = format!(
        " {} | {}",
        app.planner.profile().summary(),
        app.today().format("%a %d %b %Y")
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " pitchside ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer<S: KeyValueStore>(
    frame: &mut ratatui::Frame,
    app: &App<S>,
    hints: &[&str],
    area: Rect,
) {
    let colors = &app.theme.colors;
    let line = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        line,
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, area);
}

fn render_plan<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<S>) {
    let layout = PlanLayout::new(frame.area());
    let planner = &app.planner;

    render_header(frame, app, layout.header);
    frame.render_widget(FocusTabs::new(planner.focus(), &app.theme), layout.tabs);

    match planner.today_plan() {
        TodayPlan::Drills(drills) => {
            let list = DrillList::new(drills, planner.completed(), app.drill_selected, &app.theme);
            frame.render_widget(list, layout.main);
        }
        TodayPlan::Weekly(week) => {
            let view = WeeklyPlanView::new(
                week,
                chrono::Datelike::weekday(&app.today()),
                planner.profile().level.label(),
                &app.theme,
            );
            frame.render_widget(view, layout.main);
        }
    }

    frame.render_widget(ProgressPanel::new(app.progress_stats(), &app.theme), layout.progress);

    render_footer(
        frame,
        app,
        &[
            "[1-4/Tab] Focus",
            "[↑↓] Select",
            "[Space] Done",
            "[p] Profile",
            "[s] Stats",
            "[t] Theme",
            "[q] Quit",
        ],
        layout.footer,
    );
}

fn render_profile<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<S>) {
    let area = frame.area();
    let centered = centered_rect(50, 60, area);
    let form = ProfileForm::new(app.planner.profile(), app.profile_selected, &app.theme);
    frame.render_widget(form, centered);
}

fn render_stats<S: KeyValueStore>(frame: &mut ratatui::Frame, app: &App<S>) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let stats = app.progress_stats();
    let history = app.planner.history();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(11),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, layout[0]);

    let block = Block::bordered()
        .title(" Statistics ")
        .border_style(Style::default().fg(colors.accent()));
    let inner = block.inner(layout[1]);
    block.render(layout[1], frame.buffer_mut());

    let label = Style::default().fg(colors.fg());
    let value = Style::default()
        .fg(colors.accent())
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled("  Current streak: ", label),
            Span::styled(format!("{} days", stats.streak), value),
            Span::styled("    Best streak: ", label),
            Span::styled(format!("{} days", stats.best_streak), value),
        ]),
        Line::from(vec![
            Span::styled("  Last 7 days:    ", label),
            Span::styled(format!("{}/7", stats.weekly_count), value),
            Span::styled("    Days trained: ", label),
            Span::styled(format!("{}", history.trained_days().count()), value),
        ]),
        Line::from(vec![
            Span::styled("  Days logged:    ", label),
            Span::styled(format!("{}", history.len()), value),
        ]),
    ];
    Paragraph::new(lines).render(inner, frame.buffer_mut());

    frame.render_widget(
        ActivityHeatmap::new(history, app.today(), &app.theme),
        layout[2],
    );

    render_footer(frame, app, &["[Esc/s] Back"], layout[3]);
}
