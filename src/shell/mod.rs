// ── Window shell ──────────────────────────────────────────────────────────────
//
// Platform-neutral core of the program: the message model, the window class
// descriptor, and the `Host` trait that every windowing backend implements.
// The shell owns the message loop and calls the handler explicitly; a backend
// only has to route the messages it delivers back into that handler.
//
// No `unsafe` lives here.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub(crate) mod handler;
pub(crate) mod paint;
pub(crate) mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub(crate) use handler::MessageHandler;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A position in client-area pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

// ── Handles ───────────────────────────────────────────────────────────────────

/// Opaque reference to a window owned by the host.
///
/// The shell only ever passes it back to the host; it never outlives the
/// window in any meaningful way because the loop ends when the window does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct WindowId(pub(crate) isize);

// ── Messages ──────────────────────────────────────────────────────────────────

/// The message kinds the handler distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKind {
    /// Part of the client area needs repainting.
    Paint,
    /// The window is being destroyed.
    Destroy,
    /// Anything else; carries the raw message id.
    Other(u32),
}

/// One message as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Message {
    pub(crate) window: WindowId,
    /// Raw host message id, needed for default processing.
    pub(crate) id: u32,
    pub(crate) kind: MessageKind,
    pub(crate) wparam: usize,
    pub(crate) lparam: isize,
}

/// Outcome of one blocking retrieval from the message queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fetched {
    /// A message to translate and dispatch.
    Message(Message),
    /// The quit sentinel with its payload.
    Quit(i32),
}

// ── Show state ────────────────────────────────────────────────────────────────

/// How the window is first made visible, as handed to the process at launch.
///
/// Variants mirror the host's `SW_*` codes; unknown codes pass through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShowCommand {
    Hide,
    Normal,
    ShowMinimized,
    ShowMaximized,
    NoActivate,
    Show,
    Minimize,
    MinNoActive,
    ShowNa,
    Restore,
    Default,
    ForceMinimize,
    Other(i32),
}

impl ShowCommand {
    pub(crate) fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Hide,
            1 => Self::Normal,
            2 => Self::ShowMinimized,
            3 => Self::ShowMaximized,
            4 => Self::NoActivate,
            5 => Self::Show,
            6 => Self::Minimize,
            7 => Self::MinNoActive,
            8 => Self::ShowNa,
            9 => Self::Restore,
            10 => Self::Default,
            11 => Self::ForceMinimize,
            other => Self::Other(other),
        }
    }

    /// The show state a process was launched with: the startup record's
    /// value when its "use show window" flag is set, otherwise `Default`.
    pub(crate) fn from_startup(use_show_window: bool, raw: u16) -> Self {
        if use_show_window {
            Self::from_raw(i32::from(raw))
        } else {
            Self::Default
        }
    }

    pub(crate) fn as_raw(self) -> i32 {
        match self {
            Self::Hide => 0,
            Self::Normal => 1,
            Self::ShowMinimized => 2,
            Self::ShowMaximized => 3,
            Self::NoActivate => 4,
            Self::Show => 5,
            Self::Minimize => 6,
            Self::MinNoActive => 7,
            Self::ShowNa => 8,
            Self::Restore => 9,
            Self::Default => 10,
            Self::ForceMinimize => 11,
            Self::Other(raw) => raw,
        }
    }
}

// ── Window class descriptor ───────────────────────────────────────────────────

/// Built-in icon resources a class can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StockIcon {
    Application,
}

/// Built-in cursor resources a class can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StockCursor {
    Arrow,
}

/// Class background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Background {
    /// The system "window" colour.
    WindowColor,
}

/// Class style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ClassStyle {
    /// Repaint the whole client area when the width changes.
    pub(crate) redraw_on_horizontal_resize: bool,
    /// Repaint the whole client area when the height changes.
    pub(crate) redraw_on_vertical_resize: bool,
}

/// Registration-time template for the main window.
///
/// Handed to `Host::register_class` once; the host keeps what it needs and
/// the application never touches it again.
pub(crate) struct WindowClass<H: Host> {
    pub(crate) name: String,
    pub(crate) style: ClassStyle,
    pub(crate) handler: Rc<dyn MessageHandler<H>>,
    /// Extra bytes allocated after the class and after each window.
    pub(crate) extra_bytes: i32,
    pub(crate) icon: StockIcon,
    pub(crate) small_icon: StockIcon,
    pub(crate) cursor: StockCursor,
    pub(crate) background: Background,
    /// Menu resource name; the shell never uses one.
    pub(crate) menu: Option<String>,
}

/// Parameters for creating the single top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSpec {
    pub(crate) class_name: String,
    pub(crate) title: String,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// The windowing system the shell runs on.
///
/// Only the calls the shell and its handler consume.  Everything is called on
/// the one UI thread, so implementations may use interior mutability freely.
pub(crate) trait Host: Sized + 'static {
    /// Drawing state for one open paint session.
    type PaintContext;

    /// Register `class`; its handler must receive every message the host
    /// delivers to windows of that class from now on.
    fn register_class(&self, class: &WindowClass<Self>) -> Result<()>;

    /// Create the top-level window: overlapped style, host-chosen position,
    /// no parent, no menu.
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowId>;

    fn show_window(&self, window: WindowId, show: ShowCommand);

    /// Force an immediate repaint of any invalid region.
    fn update_window(&self, window: WindowId);

    /// Block until the next message or the quit sentinel is available.
    fn next_message(&self) -> Result<Fetched>;

    /// Turn key presses into character messages where applicable.
    fn translate_message(&self, message: &Message);

    /// Hand `message` to the handler registered for its window's class.
    fn dispatch_message(&self, message: &Message) -> isize;

    /// The host's default behaviour for `message`.
    fn default_processing(&self, message: &Message) -> isize;

    fn begin_paint(&self, window: WindowId) -> Self::PaintContext;

    fn draw_text(&self, ctx: &Self::PaintContext, origin: Point, text: &str) -> Result<()>;

    fn end_paint(&self, window: WindowId, ctx: Self::PaintContext);

    /// Post the quit sentinel with `code` to this thread's queue.
    fn post_quit(&self, code: i32);

    /// Tell the user about a fatal error and wait for acknowledgement.
    fn report_error(&self, message: &str);
}
