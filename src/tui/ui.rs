use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::widgets::Paragraph;

use crate::core::state::Session;
use crate::tui::component::Component;
use crate::tui::components::{Header, HelpBar};
use crate::tui::views::Views;

/// Columns kept free left and right of the grid.
const SIDE_MARGIN: u16 = 2;

pub struct FrameAreas {
    pub header: Rect,
    pub content: Rect,
    pub help: Rect,
}

/// Split the terminal into header, grid area and help bar.
///
/// ```text
/// ┌ header ───────────────────┐
/// │ (blank)                   │
/// │   content (grid)          │
/// │ help                      │
/// └───────────────────────────┘
/// ```
pub fn frame_areas(area: Rect, help_height: u16) -> FrameAreas {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(help_height)]);
    let [header, _gap, content, help] = layout.areas(area);

    FrameAreas {
        header,
        content: content.inner(Margin {
            horizontal: SIDE_MARGIN,
            vertical: 0,
        }),
        help: help.inner(Margin {
            horizontal: SIDE_MARGIN,
            vertical: 0,
        }),
    }
}

pub fn draw_ui(frame: &mut Frame, session: &Session, views: &Views) {
    let mut help = HelpBar::from_session(session);
    let areas = frame_areas(frame.area(), help.height());

    Header::from_session(session).render(frame, areas.header);

    if let Some(grid) = views.get(session.view) {
        frame.render_widget(Paragraph::new(grid.render(session)), areas.content);
    }

    help.render(frame, areas.help);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ViewId;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(session: &Session, views: &Views) -> Vec<String> {
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, session, views);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_frame_areas() {
        let areas = frame_areas(Rect::new(0, 0, 60, 16), 1);
        assert_eq!(areas.header, Rect::new(0, 0, 60, 1));
        assert_eq!(areas.content, Rect::new(2, 2, 56, 13));
        assert_eq!(areas.help, Rect::new(2, 15, 56, 1));
    }

    #[test]
    fn test_draw_main_view() {
        let mut session = crate::test_support::test_session();
        let mut views = Views::new().unwrap();
        let areas = frame_areas(Rect::new(0, 0, 60, 16), 1);
        session.content_height = areas.content.height;
        views.resize(areas.content.width, areas.content.height);
        if let Some(grid) = views.get_mut(ViewId::Main) {
            grid.init(&session);
        }

        let rows = draw(&session, &views);
        assert!(rows[0].starts_with(" tolk "));
        assert!(rows[2].contains("Source: >auto<"));
        assert!(rows[4].contains("Type to translate."));
        assert!(rows[15].contains("enter select"));
    }

    #[test]
    fn test_draw_error_view() {
        let mut session = crate::test_support::test_session();
        session.view = ViewId::Error;
        session.error = Some("no API key set".to_string());
        let mut views = Views::new().unwrap();
        views.resize(56, 13);

        let rows = draw(&session, &views);
        assert!(rows.iter().any(|row| row.contains("no API key set")));
        assert!(rows[15].contains("any key continue"));
    }
}
