use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Navbar, TitleBar};
use crate::tui::palette::Palette;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

const HELP_TEXT: &str = "←/→ focus · Enter open · 1-3 jump · t theme · b back · q quit";

/// Key help, prefixed with the focused item's description when it has one.
fn help_line(navbar: &Navbar) -> String {
    match navbar
        .focused_item()
        .and_then(|item| item.description.as_deref())
    {
        Some(description) => format!("{} │ {}", description, HELP_TEXT),
        None => HELP_TEXT.to_string(),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let palette = Palette::for_theme(app.document.theme());
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, nav_area, main_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        tui.title(),
        app.theme.current_theme(),
        tui.status_message(),
    );
    title_bar.render(frame, title_area);

    tui.navbar.render(frame, nav_area);

    match tui.page.as_mut() {
        Some(page) => page.render(frame, main_area),
        None => draw_placeholder(frame, main_area, &palette),
    }

    frame.render_widget(
        Span::styled(help_line(&tui.navbar), Style::default().fg(palette.muted)),
        help_area,
    );
}

/// Shown before the first navigation lands.
fn draw_placeholder(frame: &mut Frame, area: Rect, palette: &Palette) {
    let paragraph = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        )
        .block(Block::bordered());
    frame.render_widget(paragraph, area);
}
