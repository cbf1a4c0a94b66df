//! Screen rendering

use lln_core::presenter::{ChartSpec, SeriesKind, TABLE_COLUMNS};
use lln_core::AxisScale;
use ratatui::{
    prelude::*,
    symbols,
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap},
};

use crate::state::{DashboardState, RunOutput};

/// Draw the parameter panel
pub fn draw_parameters(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    let seed = if state.seed_fixed {
        state.seed.to_string()
    } else {
        "entropy".to_string()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Preset       ", label),
            Span::styled(state.preset.as_str(), value),
        ]),
        Line::from(vec![
            Span::styled("p            ", label),
            Span::styled(state.probability.to_string(), value),
        ]),
        Line::from(slider(state.probability.value(), 20)),
        Line::from(vec![
            Span::styled("Seed         ", label),
            Span::styled(seed, value),
        ]),
        Line::from(vec![
            Span::styled("n = 10^7     ", label),
            Span::styled(on_off(state.include_large_n), value),
        ]),
        Line::from(vec![
            Span::styled("Log x-axis   ", label),
            Span::styled(on_off(state.chart_options.x_scale == AxisScale::Log10), value),
        ]),
        Line::from(vec![
            Span::styled("y = p line   ", label),
            Span::styled(on_off(state.chart_options.reference_line), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            state.status.clone(),
            Style::default().fg(Color::Yellow),
        )),
    ];

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Parameters ").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

/// Text slider with a marker at `p`
fn slider(p: f64, width: usize) -> String {
    let pos = (p * width as f64).round() as usize;
    let mut bar: String = (0..=width).map(|i| if i == pos { '|' } else { '-' }).collect();
    bar.insert(0, '[');
    bar.push(']');
    bar
}

/// Draw the results table with the preset caption underneath
pub fn draw_results(frame: &mut Frame, area: Rect, output: Option<&RunOutput>) {
    let Some(output) = output else {
        draw_placeholder(frame, area, " Results ");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let header_cells = TABLE_COLUMNS
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = output.table.rows.iter().map(|row| {
        Row::new(
            row.cells()
                .into_iter()
                .map(|cell| Cell::from(Line::from(cell.to_string()).alignment(Alignment::Right)))
                .collect::<Vec<_>>(),
        )
    });

    let widths = [
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(" Results ").borders(Borders::ALL));
    frame.render_widget(table, chunks[0]);

    let caption = Paragraph::new(output.preset.caption())
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(caption, chunks[1]);
}

/// Draw one line chart of the given kind
pub fn draw_chart(frame: &mut Frame, area: Rect, output: Option<&RunOutput>, kind: SeriesKind) {
    let title = match kind {
        SeriesKind::Deviation => " Deviation ",
        _ => " Frequency ",
    };
    let Some(output) = output else {
        draw_placeholder(frame, area, title);
        return;
    };
    let Some(spec) = output.chart(kind) else {
        let hint = Paragraph::new(" Chart disabled for this run ")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    };

    frame.render_widget(line_chart(spec), area);
}

fn line_chart(spec: &ChartSpec) -> Chart<'_> {
    let datasets = spec
        .series
        .iter()
        .map(|series| {
            let color = match series.kind {
                SeriesKind::Frequency => Color::Cyan,
                SeriesKind::Deviation => Color::Yellow,
                SeriesKind::Reference => Color::Red,
            };
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&series.points)
        })
        .collect();

    let x_labels: Vec<Span> = spec.x_labels().into_iter().map(Span::raw).collect();
    let y_labels: Vec<Span> = spec.y_labels().into_iter().map(Span::raw).collect();

    Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", spec.title))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title(spec.x_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(spec.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(spec.y_bounds)
                .labels(y_labels),
        )
}

fn draw_placeholder(frame: &mut Frame, area: Rect, title: &str) {
    let text = Paragraph::new(" No results yet. Press Enter to run. ")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(text, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(width: u16, height: u16, draw: impl FnOnce(&mut Frame, Rect)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                draw(frame, area);
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn ran_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        state
    }

    #[test]
    fn test_slider_marker_position() {
        assert_eq!(slider(0.0, 4), "[|----]");
        assert_eq!(slider(0.5, 4), "[--|--]");
        assert_eq!(slider(1.0, 4), "[----|]");
    }

    #[test]
    fn test_results_placeholder_before_first_run() {
        let text = render(60, 10, |frame, area| draw_results(frame, area, None));
        assert!(text.contains("No results yet"));
    }

    #[test]
    fn test_results_table_renders_rows() {
        let state = ran_state();
        let text = render(60, 14, |frame, area| {
            draw_results(frame, area, state.output.as_ref())
        });

        assert!(text.contains("|result - p|"));
        assert!(text.contains("1,000"));
    }

    #[test]
    fn test_charts_render() {
        let state = ran_state();

        for kind in [SeriesKind::Frequency, SeriesKind::Deviation] {
            let text = render(80, 20, |frame, area| {
                draw_chart(frame, area, state.output.as_ref(), kind)
            });
            assert!(text.contains("vs. sample size"));
        }
    }

    #[test]
    fn test_parameters_panel_shows_controls() {
        let state = DashboardState::default();
        let text = render(40, 12, |frame, area| draw_parameters(frame, area, &state));

        assert!(text.contains("classic"));
        assert!(text.contains("0.50"));
        assert!(text.contains("42"));
    }
}
