// ── Message handler ───────────────────────────────────────────────────────────
//
// The single callback the shell dispatches to.  Handlers take `&self` because
// the host may re-enter them (default processing of one message can send
// another synchronously); mutable state therefore lives in `Cell`s only.

use std::cell::Cell;

use super::{paint::PaintSession, Host, Message, MessageKind, Point};

/// One entry point, invoked once per dispatched message.
pub(crate) trait MessageHandler<H: Host> {
    fn handle(&self, host: &H, message: &Message) -> isize;
}

// ── Loop state ────────────────────────────────────────────────────────────────

/// Lifecycle of the message loop as seen by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopState {
    /// Accepting and dispatching messages.
    Running,
    /// Quit has been posted; the loop exits once it is retrieved.
    Terminating,
}

// ── GreetingHandler ───────────────────────────────────────────────────────────

/// Paints a fixed greeting and ends the loop when its window is destroyed.
pub(crate) struct GreetingHandler {
    greeting: String,
    origin: Point,
    state: Cell<LoopState>,
}

impl GreetingHandler {
    pub(crate) fn new(greeting: impl Into<String>, origin: Point) -> Self {
        Self {
            greeting: greeting.into(),
            origin,
            state: Cell::new(LoopState::Running),
        }
    }

    pub(crate) fn state(&self) -> LoopState {
        self.state.get()
    }

    fn paint<H: Host>(&self, host: &H, message: &Message) {
        let session = PaintSession::begin(host, message.window);
        if let Err(e) = session.draw_text(self.origin, &self.greeting) {
            // Nothing useful to retry; the next invalidation repaints anyway.
            log::warn!("drawing greeting failed: {e}");
        }
    }

    fn destroy<H: Host>(&self, host: &H) {
        host.post_quit(0);
        if self.state.replace(LoopState::Terminating) == LoopState::Running {
            log::debug!("main window destroyed; quit posted");
        }
    }
}

impl<H: Host> MessageHandler<H> for GreetingHandler {
    fn handle(&self, host: &H, message: &Message) -> isize {
        log::trace!("dispatch {:?} (id {:#06x})", message.kind, message.id);

        match message.kind {
            MessageKind::Paint => {
                self.paint(host, message);
                0
            }

            MessageKind::Destroy => {
                self.destroy(host);
                0
            }

            MessageKind::Other(_) => host.default_processing(message),
        }
    }
}
