#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};
    use tempfile::tempdir;

    use crate::app::App;
    use crate::memory_card::MemoryGame;
    use crate::tests::test_utils::{create_test_app, paired_faces};
    use crate::ui::{self, centered_rect, minimum_size};
    use crate::ui_memory_card;

    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).expect("Failed to create test terminal")
    }

    fn render_to_text(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = create_test_terminal(width, height);
        terminal
            .draw(|f| ui::render(f, app))
            .expect("Failed to draw");
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 30);
    }

    #[test]
    fn test_menu_screen() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());

        let text = render_to_text(&mut app, 60, 30);
        assert!(text.contains("New Game"));
        assert!(text.contains("Options"));
        assert!(text.contains("High score: 0"));
        assert!(text.contains("Memory Cards"));
        assert!(text.contains("Memory best: 0"));
    }

    #[test]
    fn test_game_screen() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());
        app.start_game();

        let (width, height) = minimum_size();
        let text = render_to_text(&mut app, width + 10, height + 2);
        assert!(text.contains("Next"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Level: 1"));
        assert!(text.contains('█'));
    }

    #[test]
    fn test_game_over_overlay() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());
        app.start_game();
        // Stack pieces until the spawn is blocked
        for _ in 0..200 {
            if app.playfield().is_game_over() {
                break;
            }
            app.world
                .resource_mut::<crate::components::Input>()
                .push(crate::playfield::Command::HardDrop);
            app.run_frame(std::time::Duration::ZERO);
        }
        assert!(app.playfield().is_game_over());

        let (width, height) = minimum_size();
        let text = render_to_text(&mut app, width + 10, height + 2);
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn test_small_terminal_warning() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());
        app.start_game();

        let text = render_to_text(&mut app, 40, 20);
        assert!(text.contains("too small"));
    }

    #[test]
    fn test_memory_screen() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());
        app.start_memory_game();

        let (width, height) = ui_memory_card::minimum_size();
        let text = render_to_text(&mut app, width + 10, height + 4);
        assert!(text.contains("FIND THE PAIRS"));
        assert!(text.contains("Moves: 0"));
        assert!(text.contains("Pairs: 0/8"));
        assert!(text.contains("Time:  00:00"));
        assert_eq!(text.matches('?').count(), 16);
    }

    #[test]
    fn test_memory_win_dialog() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());
        app.start_memory_game();
        {
            let mut game = app.world.resource_mut::<MemoryGame>();
            game.set_faces(&paired_faces());
            for index in 0..16 {
                game.flip(index);
            }
        }
        app.run_frame(Duration::ZERO);

        let (width, height) = ui_memory_card::minimum_size();
        let text = render_to_text(&mut app, width + 10, height + 4);
        assert!(text.contains("Congratulations!"));
        assert!(text.contains("High score: 800"));
        assert!(text.contains("Moves: 8"));
    }

    #[test]
    fn test_memory_small_terminal_warning() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut app = create_test_app(dir.path());
        app.start_memory_game();

        let text = render_to_text(&mut app, 40, 16);
        assert!(text.contains("too small"));
    }
}
