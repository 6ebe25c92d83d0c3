//! # pidscout-ui
//!
//! Terminal process picker for pidscout.
//!
//! Built on `ratatui`, the picker shows the candidates that survived
//! filtering and lets the user narrow them by typing, then pick one with
//! Enter or dismiss the prompt with Esc.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pidscout_core::prelude::*;
//! use pidscout_ui::TerminalHost;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let lister = HelperProcessLister::from_config(&HelperConfig::new("emmy_tool.exe"))?;
//! let pid = select_process(&lister, &TerminalHost, "", &FilterConfig::default()).await?;
//! println!("{pid}");
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod picker;
pub mod terminal;
pub mod ui;

pub use host::TerminalHost;
pub use picker::{PickerAction, PickerState};
pub use terminal::{pick_blocking, PickerTerminal};
