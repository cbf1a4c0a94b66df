//! TUI application: terminal setup, event loop and layout.

use crate::screens;
use crate::state::{DashboardState, Screen};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lln_core::presenter::SeriesKind;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};
use std::io::{self, Stdout};
use std::time::Duration;

/// Width of the parameter panel
const PARAMETER_PANEL_WIDTH: u16 = 34;

/// TUI Application
pub struct TuiApp {
    state: DashboardState,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiApp {
    /// Take over the terminal
    pub fn new(state: DashboardState) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { state, terminal })
    }

    /// Run the event loop until the user quits
    pub fn run(&mut self) -> Result<()> {
        loop {
            let state = &self.state;
            self.terminal.draw(|frame| draw(frame, state))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.state.handle_key(key);
                    }
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Draw the whole dashboard
pub fn draw(frame: &mut Frame, state: &DashboardState) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(frame, rows[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PARAMETER_PANEL_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    screens::draw_parameters(frame, columns[0], state);

    let output = state.output.as_ref();
    match state.screen {
        Screen::Table => screens::draw_results(frame, columns[1], output),
        Screen::Frequency => screens::draw_chart(frame, columns[1], output, SeriesKind::Frequency),
        Screen::Deviation => screens::draw_chart(frame, columns[1], output, SeriesKind::Deviation),
    }

    draw_footer(frame, rows[2]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<String> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| format!("[{}]{}", i + 1, screen.title()))
        .collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == state.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(format!(" {} ", state.preset.title()))
                .borders(Borders::ALL),
        );
    frame.render_widget(tabs, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer_text = " [←/→]p [Shift]±0.10 [l]Large n [s]Seed mode [+/-]Seed [x]Log [g]y=p \
                       [p]Preset [Enter]Run [Tab]Screen [q]Quit ";
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn render(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_layout_shows_title_tabs_and_footer() {
        let text = render(&DashboardState::default());

        assert!(text.contains("Bernoulli Simulation"));
        assert!(text.contains("[1]Results"));
        assert!(text.contains("[3]Deviation"));
        assert!(text.contains("[q]Quit"));
        assert!(text.contains("Parameters"));
    }

    #[test]
    fn test_layout_follows_screen_selection() {
        let mut state = DashboardState::default();
        state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        state.handle_key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE));

        let text = render(&state);
        assert!(text.contains("Empirical frequency vs. sample size"));
    }

    #[test]
    fn test_log_scale_title() {
        let text = render(&DashboardState::new(lln_core::Preset::LogScale));
        assert!(text.contains("(log-scale)"));
    }
}
