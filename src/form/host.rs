//! Host seam: where events come from and where frames go
//!
//! The window never talks to a terminal directly. A [`Host`] supplies the
//! viewport size and a stream of [`WindowEvent`]s, presents rendered
//! frames, and is told when the window's controls are being destroyed.

use super::result::FormResult;
use super::window::{FormWindow, WindowEvent};
use crate::error::FormError;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Terminal;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, trace};

pub trait Host {
    /// Current size of the area the window may occupy
    fn viewport(&mut self) -> Result<(u16, u16), FormError>;

    /// Next notification; `None` when the host has no more to give
    fn next_event(&mut self) -> Result<Option<WindowEvent>, FormError>;

    /// Render the window's current state
    fn present(&mut self, window: &FormWindow) -> Result<(), FormError>;

    /// Called when the window starts destroying its controls
    fn on_destroy(&mut self) {}
}

/// Show `window` and pump events until it reaches its terminal state
///
/// A host that runs out of events closes the window as the window
/// manager would.
pub fn run_event_loop(window: &mut FormWindow, host: &mut dyn Host) -> Result<FormResult, FormError> {
    let (width, height) = host.viewport()?;
    window.show(width, height);
    host.present(window)?;

    while !window.is_terminal() {
        let event = host.next_event()?.unwrap_or(WindowEvent::CloseRequested);
        trace!(?event, "dispatch");
        window.dispatch(event, host);
        if !window.is_terminal() {
            host.present(window)?;
        }
    }

    Ok(window.take_result().unwrap_or_default())
}

/// Host backed by the controlling terminal
pub struct TerminalHost {
    terminal: Terminal,
    screen: Screen,
    size: (u16, u16),
}

impl TerminalHost {
    /// Take over the terminal; it is restored when the host is dropped
    pub fn new() -> Result<Self, FormError> {
        let terminal = Terminal::new()?;
        let (width, height) = terminal.size();
        Ok(Self {
            terminal,
            screen: Screen::new(width, height),
            size: (width, height),
        })
    }
}

impl Host for TerminalHost {
    fn viewport(&mut self) -> Result<(u16, u16), FormError> {
        self.terminal.update_size();
        self.size = self.terminal.size();
        Ok(self.size)
    }

    fn next_event(&mut self) -> Result<Option<WindowEvent>, FormError> {
        loop {
            self.terminal.update_size();
            let size = self.terminal.size();
            if size != self.size {
                self.size = size;
                return Ok(Some(WindowEvent::Resize {
                    width: size.0,
                    height: size.1,
                }));
            }

            // read_key times out so resizes are noticed while idle
            let Some(key) = self.terminal.read_key()? else {
                continue;
            };
            let input = InputEvent::from(key);
            if input.is_close_request() {
                return Ok(Some(WindowEvent::CloseRequested));
            }
            if input != InputEvent::Unknown {
                return Ok(Some(WindowEvent::Input(input)));
            }
        }
    }

    fn present(&mut self, window: &FormWindow) -> Result<(), FormError> {
        if self.screen.size() != self.size {
            self.screen.resize(self.size.0, self.size.1);
            self.screen.invalidate();
        }
        window.draw(&mut self.screen);
        self.screen.flush(&mut self.terminal)?;
        Ok(())
    }

    fn on_destroy(&mut self) {
        debug!("terminal host: window destroyed");
    }
}

/// Headless host replaying a fixed script of events
///
/// Frames are rendered into an off-screen [`Screen`] that can be inspected
/// after (or during) a session.
pub struct ScriptedHost {
    size: (u16, u16),
    events: VecDeque<WindowEvent>,
    screen: Screen,
    presented: usize,
    destroyed: bool,
    destroy_hook: Option<Box<dyn FnMut()>>,
}

impl ScriptedHost {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: (width, height),
            events: VecDeque::new(),
            screen: Screen::new(width, height),
            presented: 0,
            destroyed: false,
            destroy_hook: None,
        }
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = WindowEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Queue key presses or mouse input
    pub fn with_input(self, input: impl IntoIterator<Item = InputEvent>) -> Self {
        self.with_events(input.into_iter().map(WindowEvent::Input))
    }

    /// Run `hook` when the window starts destroying its controls
    pub fn with_destroy_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.destroy_hook = Some(Box::new(hook));
        self
    }

    pub fn push(&mut self, event: WindowEvent) {
        self.events.push_back(event);
    }

    /// Last presented frame
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Host for ScriptedHost {
    fn viewport(&mut self) -> Result<(u16, u16), FormError> {
        Ok(self.size)
    }

    fn next_event(&mut self) -> Result<Option<WindowEvent>, FormError> {
        let event = self.events.pop_front();
        if let Some(WindowEvent::Resize { width, height }) = event {
            self.size = (width, height);
            self.screen.resize(width, height);
        }
        Ok(event)
    }

    fn present(&mut self, window: &FormWindow) -> Result<(), FormError> {
        window.draw(&mut self.screen);
        self.presented += 1;
        Ok(())
    }

    fn on_destroy(&mut self) {
        self.destroyed = true;
        if let Some(hook) = self.destroy_hook.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for ScriptedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedHost")
            .field("size", &self.size)
            .field("pending", &self.events.len())
            .field("presented", &self.presented)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::form::assembler::FormAssembler;
    use crate::form::element::{ElementKind, ElementSpec, Payload};
    use crate::form::result::{ExtractedValue, FormStatus};

    fn window() -> FormWindow {
        let elements = vec![
            ElementSpec::new(ElementKind::Title, None, Payload::Text("Sizes".into())),
            ElementSpec::new(ElementKind::Choice, Some("size".into()), Payload::options(["S", "M", "L"])),
            ElementSpec::new(ElementKind::Buttons, None, Payload::options(["Accept", "Cancel"])),
        ];
        FormAssembler::standard(FormConfig::default())
            .assemble("Sizes", &elements)
            .expect("assemble")
    }

    #[test]
    fn test_keyboard_session_accepts() {
        let mut window = window();
        let mut host = ScriptedHost::new(60, 20).with_input([
            InputEvent::CursorDown,
            InputEvent::Tab,
            InputEvent::Enter,
        ]);
        let result = run_event_loop(&mut window, &mut host).expect("run");
        assert_eq!(result.status(), FormStatus::Ok);
        assert_eq!(result.get("size"), Some(&ExtractedValue::from("M")));
        assert!(host.destroyed());
    }

    #[test]
    fn test_exhausted_script_closes() {
        let mut window = window();
        let mut host = ScriptedHost::new(60, 20).with_input([InputEvent::CursorDown]);
        let result = run_event_loop(&mut window, &mut host).expect("run");
        assert_eq!(result.status(), FormStatus::Close);
        assert!(result.values().is_empty());
    }

    #[test]
    fn test_escape_closes_unless_dropdown_is_open() {
        let mut window = window();
        let mut host = ScriptedHost::new(60, 20).with_input([
            InputEvent::Enter,
            InputEvent::Escape,
            InputEvent::Tab,
            InputEvent::Tab,
            InputEvent::Enter,
        ]);
        // Enter opens the dropdown and Escape only closes it; Tab twice
        // reaches Cancel
        let result = run_event_loop(&mut window, &mut host).expect("run");
        assert_eq!(result.status(), FormStatus::Cancel);

        let mut window = self::window();
        let mut host = ScriptedHost::new(60, 20).with_input([InputEvent::Escape, InputEvent::Enter]);
        let result = run_event_loop(&mut window, &mut host).expect("run");
        assert_eq!(result.status(), FormStatus::Close);
    }

    #[test]
    fn test_close_box_click() {
        let mut window = window();
        let mut host = ScriptedHost::new(60, 20).with_input([InputEvent::MouseClick { row: 1, col: 57 }]);
        let result = run_event_loop(&mut window, &mut host).expect("run");
        assert_eq!(result.status(), FormStatus::Close);
    }

    #[test]
    fn test_resize_is_presented() {
        let mut window = window();
        let mut host = ScriptedHost::new(60, 20).with_events([
            WindowEvent::Resize { width: 40, height: 12 },
            WindowEvent::CloseRequested,
        ]);
        run_event_loop(&mut window, &mut host).expect("run");
        assert_eq!(host.presented(), 2);
        assert_eq!(host.screen().size(), (40, 12));
        assert!(host.screen().row_text(1).contains(" Sizes "));
    }
}
