//! Terminal initialization and the blocking picker loop

use std::io::{self, Stderr};
use std::panic;
use std::sync::Once;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use pidscout_core::Candidate;
use pidscout_utils::{debug, info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::picker::{PickerAction, PickerState};

static PANIC_HOOK: Once = Once::new();

/// Terminal owned by the picker
///
/// Draws on stderr so that stdout stays free for the resolved PID. Raw
/// mode and the alternate screen are undone on drop and on panic.
pub struct PickerTerminal
{
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl PickerTerminal
{
    /// Enter raw mode and the alternate screen
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails (raw mode, alternate screen, etc.)
    pub fn new() -> io::Result<Self>
    {
        PANIC_HOOK.call_once(|| {
            let original_hook = panic::take_hook();
            panic::set_hook(Box::new(move |panic_info| {
                let _ = Self::restore();
                original_hook(panic_info);
            }));
        });

        enable_raw_mode()?;
        let mut stderr = io::stderr();
        if let Err(e) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let terminal = Terminal::new(CrosstermBackend::new(stderr))?;
        Ok(Self { terminal })
    }

    /// Show the picker until the user picks or dismisses
    ///
    /// Returns the index of the picked candidate, or `None` on dismissal.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or reading terminal events fails.
    pub fn run(&mut self, candidates: &[Candidate]) -> io::Result<Option<usize>>
    {
        info!("Showing process picker with {} candidates", candidates.len());
        let mut state = PickerState::new(candidates);

        loop {
            self.terminal.draw(|frame| crate::ui::draw(frame, &mut state, candidates))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match state.handle_key(key, candidates) {
                PickerAction::Continue => {}
                PickerAction::Pick(index) => {
                    debug!("Picked candidate {index}");
                    return Ok(Some(index));
                }
                PickerAction::Dismiss => {
                    debug!("Picker dismissed");
                    return Ok(None);
                }
            }
        }
    }

    /// Restore the terminal to its original state
    ///
    /// # Errors
    ///
    /// Returns an error if disabling raw mode or leaving the alternate screen fails
    pub fn restore() -> io::Result<()>
    {
        disable_raw_mode()?;
        let mut stderr = io::stderr();
        execute!(stderr, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for PickerTerminal
{
    fn drop(&mut self)
    {
        let _ = Self::restore();
        let _ = self.terminal.show_cursor();
    }
}

/// Run the picker on the current thread
///
/// Blocks until the user answers; call it from `spawn_blocking` in async
/// code.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or driven.
pub fn pick_blocking(candidates: &[Candidate]) -> io::Result<Option<usize>>
{
    let mut terminal = PickerTerminal::new()?;
    terminal.run(candidates)
}
