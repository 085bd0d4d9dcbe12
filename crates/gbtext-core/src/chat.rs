//! Two stacked chat panes: assistant replies above, user input below.

use fb565::{Geometry, Rgb565, Surface};
use log::info;

use crate::{
    display::Display,
    encoding::NATIVE_ENCODING,
    error::RenderError,
    glyph::CELL_HEIGHT,
    text::RunStats,
    view::{Rect, View},
};

pub const ASSISTANT_PREFIX: &str = "AI: ";
pub const USER_PREFIX: &str = "USER: ";

/// How the screen is shared between the panes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChatLayout {
    /// Share of text rows given to the assistant pane, as `num / den`.
    pub assistant_rows_num: usize,
    pub assistant_rows_den: usize,
    pub assistant_color: Rgb565,
    pub user_color: Rgb565,
}

impl Default for ChatLayout {
    fn default() -> Self {
        Self {
            assistant_rows_num: 11,
            assistant_rows_den: 15,
            assistant_color: Rgb565::WHITE,
            user_color: Rgb565::WHITE,
        }
    }
}

impl ChatLayout {
    /// Carves the full-width panes out of `geometry` on text row boundaries.
    pub fn split(&self, geometry: Geometry) -> ChatScreen {
        let rows = geometry.height / CELL_HEIGHT;
        let assistant_rows = rows * self.assistant_rows_num / self.assistant_rows_den.max(1);
        let split_y = assistant_rows * CELL_HEIGHT;

        ChatScreen {
            assistant: View::new(
                Rect::new(0, 0, geometry.width, split_y),
                self.assistant_color,
            ),
            user: View::new(
                Rect::new(0, split_y, geometry.width, geometry.height - split_y),
                self.user_color,
            ),
        }
    }
}

/// The two panes of a chat screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChatScreen {
    pub assistant: View,
    pub user: View,
}

impl ChatScreen {
    pub fn new<S: Surface>(display: &Display<S>, layout: &ChatLayout) -> Self {
        layout.split(display.geometry())
    }

    /// Replaces the assistant pane with `text` and flushes.
    pub fn show_assistant<S: Surface>(
        &mut self,
        display: &mut Display<S>,
        from_code: &str,
        text: &[u8],
    ) -> Result<RunStats, RenderError> {
        show(display, &mut self.assistant, ASSISTANT_PREFIX, from_code, text)
    }

    /// Replaces the user pane with `text` and flushes.
    pub fn show_user<S: Surface>(
        &mut self,
        display: &mut Display<S>,
        from_code: &str,
        text: &[u8],
    ) -> Result<RunStats, RenderError> {
        show(display, &mut self.user, USER_PREFIX, from_code, text)
    }
}

fn show<S: Surface>(
    display: &mut Display<S>,
    pane: &mut View,
    prefix: &str,
    from_code: &str,
    text: &[u8],
) -> Result<RunStats, RenderError> {
    if text.is_empty() {
        return Ok(RunStats::default());
    }

    display.clear_view(pane);
    let mut stats = display.print(pane, NATIVE_ENCODING, prefix.as_bytes())?;
    stats.merge(display.print(pane, from_code, text)?);
    display.flush()?;

    info!("{}{} bytes shown", prefix, text.len());
    Ok(stats)
}
