// ── Paint session ─────────────────────────────────────────────────────────────
//
// One `PaintSession` per paint dispatch.  `Drop` ends the session, so a draw
// call that fails (or panics) can never leave the host's paint state open.

use crate::error::Result;

use super::{Host, Point, WindowId};

/// A scoped, exclusive paint session on one window.
pub(crate) struct PaintSession<'h, H: Host> {
    host: &'h H,
    window: WindowId,
    // Always `Some` until `drop` takes it.
    ctx: Option<H::PaintContext>,
}

impl<'h, H: Host> PaintSession<'h, H> {
    /// Open a session covering the window's invalidated region.
    pub(crate) fn begin(host: &'h H, window: WindowId) -> Self {
        let ctx = host.begin_paint(window);
        Self {
            host,
            window,
            ctx: Some(ctx),
        }
    }

    pub(crate) fn draw_text(&self, origin: Point, text: &str) -> Result<()> {
        match &self.ctx {
            Some(ctx) => self.host.draw_text(ctx, origin, text),
            None => Ok(()),
        }
    }
}

impl<H: Host> Drop for PaintSession<'_, H> {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            self.host.end_paint(self.window, ctx);
        }
    }
}
