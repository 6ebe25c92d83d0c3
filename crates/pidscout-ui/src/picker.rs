//! Picker state and key handling
//!
//! Kept free of terminal I/O so it can be driven directly in tests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pidscout_core::Candidate;
use ratatui::widgets::TableState;

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: isize = 10;

/// What the picker loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction
{
    /// Keep showing the picker
    Continue,
    /// The user picked the candidate at this index (into the full list)
    Pick(usize),
    /// The user dismissed the picker
    Dismiss,
}

/// Picker state
pub struct PickerState
{
    /// Text typed by the user to narrow the list
    pub query: String,
    /// Indices of candidates matching `query`, in listing order
    pub visible: Vec<usize>,
    /// State for the candidates table (selection is an index into `visible`)
    pub table_state: TableState,
}

impl PickerState
{
    /// Create a picker showing every candidate with the first one selected
    #[must_use]
    pub fn new(candidates: &[Candidate]) -> Self
    {
        let mut state = Self {
            query: String::new(),
            visible: Vec::new(),
            table_state: TableState::default(),
        };
        state.refilter(candidates);
        state
    }

    /// Index (into the full candidate list) of the highlighted row
    #[must_use]
    pub fn selected(&self) -> Option<usize>
    {
        self.table_state.selected().and_then(|row| self.visible.get(row).copied())
    }

    /// Recompute visible rows after the query changed
    ///
    /// Every whitespace-separated term of the query must occur, ignoring
    /// case, in the label, the title, or the path of a candidate.
    pub fn refilter(&mut self, candidates: &[Candidate])
    {
        let terms: Vec<String> = self.query.split_whitespace().map(str::to_lowercase).collect();

        self.visible = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| terms.iter().all(|term| candidate_matches(candidate, term)))
            .map(|(index, _)| index)
            .collect();

        self.table_state.select(if self.visible.is_empty() { None } else { Some(0) });
    }

    /// Apply a key press
    pub fn handle_key(&mut self, key: KeyEvent, candidates: &[Candidate]) -> PickerAction
    {
        match key.code {
            KeyCode::Esc => PickerAction::Dismiss,
            KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => PickerAction::Dismiss,
            KeyCode::Enter => self.selected().map_or(PickerAction::Continue, PickerAction::Pick),
            KeyCode::Up => {
                self.move_selection(-1);
                PickerAction::Continue
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_selection(1);
                PickerAction::Continue
            }
            KeyCode::PageUp => {
                self.move_selection(-PAGE_SIZE);
                PickerAction::Continue
            }
            KeyCode::PageDown => {
                self.move_selection(PAGE_SIZE);
                PickerAction::Continue
            }
            KeyCode::Home => {
                self.move_selection(isize::MIN);
                PickerAction::Continue
            }
            KeyCode::End => {
                self.move_selection(isize::MAX);
                PickerAction::Continue
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter(candidates);
                }
                PickerAction::Continue
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.refilter(candidates);
                PickerAction::Continue
            }
            _ => PickerAction::Continue,
        }
    }

    /// Move the highlighted row by `delta`, clamping to the visible rows
    fn move_selection(&mut self, delta: isize)
    {
        let Some(last) = self.visible.len().checked_sub(1) else {
            return;
        };
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.table_state.select(Some(next));
    }
}

fn candidate_matches(candidate: &Candidate, term: &str) -> bool
{
    [candidate.label.as_str(), candidate.description(), candidate.detail()]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}
