// ── Scripted host for tests ───────────────────────────────────────────────────
//
// An in-memory `Host` that records every call, keeps its own message queue,
// and can be told to fail at registration, creation, retrieval, or drawing.
// Like the real host it queues an initial paint for every window it creates.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use crate::error::{Result, ShellError};

use super::{
    Fetched, Host, Message, MessageHandler, MessageKind, Point, ShowCommand, WindowClass,
    WindowId, WindowSpec,
};

const PAINT_ID: u32 = 0x000F;
const DESTROY_ID: u32 = 0x0002;

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Register(String),
    CreateWindow(WindowSpec),
    Show(ShowCommand),
    Update(WindowId),
    NextMessage,
    Translate(MessageKind),
    Dispatch(MessageKind),
    DefaultProcessing(u32),
    BeginPaint(WindowId),
    DrawText { origin: Point, text: String },
    EndPaint(WindowId),
    PostQuit(i32),
    ReportError(String),
}

#[derive(Default)]
pub(crate) struct ScriptedHost {
    calls: RefCell<Vec<Call>>,
    queue: RefCell<VecDeque<Fetched>>,
    handler: RefCell<Option<Rc<dyn MessageHandler<ScriptedHost>>>>,
    default_result: Cell<isize>,
    fail_registration: bool,
    fail_creation: bool,
    fail_retrieval: bool,
    fail_draw: bool,
    close_after_first_paint: bool,
}

impl ScriptedHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_registration(mut self) -> Self {
        self.fail_registration = true;
        self
    }

    pub(crate) fn failing_creation(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    pub(crate) fn failing_retrieval(mut self) -> Self {
        self.fail_retrieval = true;
        self
    }

    pub(crate) fn failing_draw(mut self) -> Self {
        self.fail_draw = true;
        self
    }

    /// Simulate the user closing the window right after its first paint.
    pub(crate) fn close_after_first_paint(mut self) -> Self {
        self.close_after_first_paint = true;
        self
    }

    pub(crate) fn default_result(self, result: isize) -> Self {
        self.default_result.set(result);
        self
    }

    /// Build a message the way the host would deliver it.
    pub(crate) fn message(window: WindowId, kind: MessageKind) -> Message {
        let id = match kind {
            MessageKind::Paint => PAINT_ID,
            MessageKind::Destroy => DESTROY_ID,
            MessageKind::Other(id) => id,
        };
        Message {
            window,
            id,
            kind,
            wparam: 0,
            lparam: 0,
        }
    }

    pub(crate) fn push_message(&self, window: WindowId, kind: MessageKind) {
        self.queue
            .borrow_mut()
            .push_back(Fetched::Message(Self::message(window, kind)));
    }

    pub(crate) fn push_quit(&self, code: i32) {
        self.queue.borrow_mut().push_back(Fetched::Quit(code));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Host for ScriptedHost {
    type PaintContext = WindowId;

    fn register_class(&self, class: &WindowClass<Self>) -> Result<()> {
        self.record(Call::Register(class.name.clone()));
        if self.fail_registration {
            // ERROR_CLASS_ALREADY_EXISTS
            return Err(ShellError::Registration {
                class: class.name.clone(),
                code: 1410,
            });
        }
        *self.handler.borrow_mut() = Some(class.handler.clone());
        Ok(())
    }

    fn create_window(&self, spec: &WindowSpec) -> Result<WindowId> {
        self.record(Call::CreateWindow(spec.clone()));
        if self.fail_creation {
            // ERROR_NOT_ENOUGH_MEMORY
            return Err(ShellError::WindowCreation {
                class: spec.class_name.clone(),
                code: 8,
            });
        }
        let window = WindowId(1);
        self.push_message(window, MessageKind::Paint);
        if self.close_after_first_paint {
            self.push_message(window, MessageKind::Destroy);
        }
        Ok(window)
    }

    fn show_window(&self, _window: WindowId, show: ShowCommand) {
        self.record(Call::Show(show));
    }

    fn update_window(&self, window: WindowId) {
        self.record(Call::Update(window));
    }

    fn next_message(&self) -> Result<Fetched> {
        self.record(Call::NextMessage);
        if self.fail_retrieval {
            // ERROR_INVALID_PARAMETER
            return Err(ShellError::Win32 {
                function: "GetMessageW",
                code: 0x57,
            });
        }
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(fetched) => Ok(fetched),
            None => panic!("message queue drained without a quit message"),
        }
    }

    fn translate_message(&self, message: &Message) {
        self.record(Call::Translate(message.kind));
    }

    fn dispatch_message(&self, message: &Message) -> isize {
        self.record(Call::Dispatch(message.kind));
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => handler.handle(self, message),
            None => self.default_processing(message),
        }
    }

    fn default_processing(&self, message: &Message) -> isize {
        self.record(Call::DefaultProcessing(message.id));
        self.default_result.get()
    }

    fn begin_paint(&self, window: WindowId) -> WindowId {
        self.record(Call::BeginPaint(window));
        window
    }

    fn draw_text(&self, _ctx: &WindowId, origin: Point, text: &str) -> Result<()> {
        self.record(Call::DrawText {
            origin,
            text: text.to_owned(),
        });
        if self.fail_draw {
            return Err(ShellError::Win32 {
                function: "TextOutW",
                code: 0,
            });
        }
        Ok(())
    }

    fn end_paint(&self, window: WindowId, _ctx: WindowId) {
        self.record(Call::EndPaint(window));
    }

    fn post_quit(&self, code: i32) {
        self.record(Call::PostQuit(code));
        self.push_quit(code);
    }

    fn report_error(&self, message: &str) {
        self.record(Call::ReportError(message.to_owned()));
    }
}
