//! Text renderer and line-based input for the terminal player.

use inkbound_narrative::application::query_handlers::ScreenView;
use inkbound_narrative::domain::book::ElementKind;
use inkbound_narrative::domain::commands::SessionInput;
use inkbound_narrative::domain::mode::Mode;

/// Rows scrolled by `up` / `down`.
pub const SCROLL_STEP: f64 = 40.0;

/// Shown when a line is not understood.
pub const HELP: &str = "\
commands:
  <enter>       advance
  <n>           pick option n (or press button n)
  go <screen>   jump to a screen
  load <book>   load another book
  up | down     scroll
  q             quit";

/// What a typed line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the session.
    Input(SessionInput),
    /// Leave the player.
    Quit,
    /// Not understood.
    Unknown,
}

/// Interprets one typed line against the view currently on screen.
#[must_use]
pub fn parse_command(line: &str, view: Option<&ScreenView>) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Input(SessionInput::Advance);
    }
    match line {
        "q" | "quit" => return Command::Quit,
        "up" => return Command::Input(SessionInput::Scroll(-SCROLL_STEP)),
        "down" => return Command::Input(SessionInput::Scroll(SCROLL_STEP)),
        _ => {}
    }
    if let Some(screen) = line.strip_prefix("go ") {
        return Command::Input(SessionInput::Navigate(screen.trim().to_owned()));
    }
    if let Some(locator) = line.strip_prefix("load ") {
        return Command::Input(SessionInput::LoadBook(locator.trim().to_owned()));
    }
    match line.parse::<usize>() {
        Ok(n) if n >= 1 => {
            let menu_open = view.is_some_and(|view| !view.choices.is_empty());
            if menu_open {
                Command::Input(SessionInput::Select(n - 1))
            } else {
                Command::Input(SessionInput::PressButton(n - 1))
            }
        }
        _ => Command::Unknown,
    }
}

/// Draws a view as text.
#[must_use]
pub fn render(view: &ScreenView) -> String {
    let Some(screen_id) = &view.screen_id else {
        return "(nothing to show)\n".to_owned();
    };

    let mut rows = vec![format!("== {screen_id} [{}] ==", mode_label(view.mode))];
    if let Some(backdrop) = view.cover.as_ref().or(view.background.as_ref()) {
        rows.push(format!("   ({backdrop})"));
    }

    let mut button_number = 0;
    for element in &view.elements {
        match element.kind {
            ElementKind::Label => rows.push(format!("   {}", element.text)),
            ElementKind::Button if view.choices.is_empty() => {
                button_number += 1;
                rows.push(format!("   [{button_number}] {}", element.text));
            }
            _ => {}
        }
    }

    if let Some(line) = &view.line {
        rows.push(format!(
            "{}: {}  ({}/{})",
            line.speaker,
            line.text,
            view.dialogue_index + 1,
            view.dialogue_len
        ));
    }

    for (i, choice) in view.choices.iter().enumerate() {
        rows.push(format!("  {}. {choice}", i + 1));
    }

    if let Some(remaining) = view.time_remaining {
        rows.push(format!("Time: {remaining}"));
    }

    let mut out = rows.join("\n");
    out.push('\n');
    out
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Splash => "splash",
        Mode::Ui => "ui",
        Mode::Dialogue => "dialogue",
        Mode::Choice => "choices",
        Mode::Timed => "timed",
        Mode::None => "none",
    }
}

#[cfg(test)]
mod tests {
    use inkbound_narrative::domain::book::{DialogueLine, Element};

    use super::*;

    fn view(mode: Mode) -> ScreenView {
        ScreenView {
            screen_id: Some("s".into()),
            mode,
            background: None,
            cover: None,
            line: None,
            dialogue_index: 0,
            dialogue_len: 0,
            choices: Vec::new(),
            time_remaining: None,
            scroll_offset: 0.0,
            elements: Vec::new(),
        }
    }

    #[test]
    fn test_blank_line_advances() {
        assert_eq!(
            parse_command("   ", None),
            Command::Input(SessionInput::Advance)
        );
    }

    #[test]
    fn test_number_selects_when_menu_open() {
        let menu = ScreenView {
            choices: vec!["Run".into(), "Hide".into()],
            ..view(Mode::Timed)
        };

        assert_eq!(
            parse_command("2", Some(&menu)),
            Command::Input(SessionInput::Select(1))
        );
    }

    #[test]
    fn test_number_presses_button_without_menu() {
        assert_eq!(
            parse_command("1", Some(&view(Mode::Ui))),
            Command::Input(SessionInput::PressButton(0))
        );
        assert_eq!(parse_command("0", Some(&view(Mode::Ui))), Command::Unknown);
    }

    #[test]
    fn test_words_map_to_inputs() {
        assert_eq!(
            parse_command("go credits", None),
            Command::Input(SessionInput::Navigate("credits".into()))
        );
        assert_eq!(
            parse_command("load books/chase.json", None),
            Command::Input(SessionInput::LoadBook("books/chase.json".into()))
        );
        assert_eq!(
            parse_command("down", None),
            Command::Input(SessionInput::Scroll(SCROLL_STEP))
        );
        assert_eq!(parse_command("q", None), Command::Quit);
        assert_eq!(parse_command("dance", None), Command::Unknown);
    }

    #[test]
    fn test_render_dialogue_line_with_progress() {
        let dialogue = ScreenView {
            background: Some("img/alley.png".into()),
            line: Some(DialogueLine {
                speaker: "Mara".into(),
                text: "Footsteps.".into(),
            }),
            dialogue_len: 3,
            ..view(Mode::Dialogue)
        };

        assert_eq!(
            render(&dialogue),
            "== s [dialogue] ==\n   (img/alley.png)\nMara: Footsteps.  (1/3)\n"
        );
    }

    #[test]
    fn test_render_timed_menu_shows_options_and_time() {
        let timed = ScreenView {
            choices: vec!["Run".into(), "Hide".into()],
            time_remaining: Some(4),
            ..view(Mode::Timed)
        };

        assert_eq!(
            render(&timed),
            "== s [timed] ==\n  1. Run\n  2. Hide\nTime: 4\n"
        );
    }

    #[test]
    fn test_render_ui_numbers_buttons() {
        let label: Element =
            serde_json::from_value(serde_json::json!({ "type": "label", "text": "Inkbound" }))
                .unwrap();
        let button: Element =
            serde_json::from_value(serde_json::json!({ "type": "button", "text": "Start" }))
                .unwrap();
        let ui = ScreenView {
            elements: vec![label, button],
            ..view(Mode::Ui)
        };

        assert_eq!(render(&ui), "== s [ui] ==\n   Inkbound\n   [1] Start\n");
    }

    #[test]
    fn test_render_without_screen() {
        let empty = ScreenView {
            screen_id: None,
            ..view(Mode::None)
        };

        assert_eq!(render(&empty), "(nothing to show)\n");
    }
}
