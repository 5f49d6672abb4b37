// ── Win32 host ────────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the window class and route its WndProc into the shell's handler.
//   • Create, show, and update the top-level window.
//   • Retrieve, translate, and dispatch messages for the shell's loop.
//   • Paint sessions and text output for the handler.
//   • Expose a safe error-dialog helper for use by main().

#![allow(unsafe_code)]

use std::{cell::RefCell, ffi::c_void, rc::Rc};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        Graphics::Gdi::{
            BeginPaint, EndPaint, TextOutW, UpdateWindow, COLOR_WINDOW, HBRUSH, PAINTSTRUCT,
        },
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, LoadCursorW,
            LoadIconW, MessageBoxW, PostQuitMessage, RegisterClassExW, ShowWindow,
            TranslateMessage, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, HCURSOR, HICON, HMENU,
            IDC_ARROW, IDI_APPLICATION, MB_ICONERROR, MB_OK, MSG, SHOW_WINDOW_CMD,
            WM_DESTROY, WM_PAINT, WNDCLASSEXW, WNDCLASS_STYLES,
            WS_EX_OVERLAPPEDWINDOW, WS_OVERLAPPEDWINDOW,
        },
    },
};

use crate::{
    error::{Result, ShellError},
    shell::{
        Background, Fetched, Host, Message, MessageHandler, MessageKind, Point, ShowCommand,
        StockCursor, StockIcon, WindowClass, WindowId, WindowSpec,
    },
};

/// Caption of the fatal-error dialog.
const ERROR_TITLE: PCWSTR = w!("Tutorial");

// ── Handler routing ───────────────────────────────────────────────────────────

type Route = (Win32Host, Rc<dyn MessageHandler<Win32Host>>);

thread_local! {
    // Set once by `register_class`; read by `wnd_proc` on the same (UI) thread.
    static ROUTE: RefCell<Option<Route>> = const { RefCell::new(None) };
}

// ── Win32Host ─────────────────────────────────────────────────────────────────

/// `Host` backed by the Win32 windowing API of the current process.
#[derive(Clone, Copy)]
pub(crate) struct Win32Host {
    instance: HINSTANCE,
}

/// Drawing state between `BeginPaint` and `EndPaint`.
pub(crate) struct Win32Paint {
    ps: PAINTSTRUCT,
}

impl Win32Host {
    /// `instance` is the module that owns the window class.
    pub(crate) fn new(instance: HINSTANCE) -> Self {
        Self { instance }
    }
}

impl Host for Win32Host {
    type PaintContext = Win32Paint;

    fn register_class(&self, class: &WindowClass<Self>) -> Result<()> {
        let class_name = wide(&class.name);
        let menu_name = class.menu.as_deref().map(wide);

        let mut style = WNDCLASS_STYLES(0);
        if class.style.redraw_on_horizontal_resize {
            style |= CS_HREDRAW;
        }
        if class.style.redraw_on_vertical_resize {
            style |= CS_VREDRAW;
        }

        let wndclass = WNDCLASSEXW {
            // WNDCLASSEXW is ~80 bytes; the cast to u32 is always lossless.
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: class.extra_bytes,
            cbWndExtra: class.extra_bytes,
            hInstance: self.instance,
            hIcon: stock_icon(class.icon)?,
            hCursor: stock_cursor(class.cursor)?,
            hbrBackground: background_brush(class.background),
            lpszMenuName: menu_name
                .as_ref()
                .map_or(PCWSTR::null(), |m| PCWSTR(m.as_ptr())),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hIconSm: stock_icon(class.small_icon)?,
        };

        // The route must be in place before the first message can arrive,
        // which is as soon as a window of this class is created.
        ROUTE.with(|route| *route.borrow_mut() = Some((*self, class.handler.clone())));

        // SAFETY: wndclass is fully initialised with valid handles; the name
        // buffers outlive the call and the system copies them.
        let atom = unsafe { RegisterClassExW(&wndclass) };
        if atom == 0 {
            let code = last_error_code();
            ROUTE.with(|route| *route.borrow_mut() = None);
            return Err(ShellError::Registration {
                class: class.name.clone(),
                code,
            });
        }

        Ok(())
    }

    fn create_window(&self, spec: &WindowSpec) -> Result<WindowId> {
        let class_name = wide(&spec.class_name);
        let title = wide(&spec.title);

        // SAFETY: class_name was registered by `register_class` with this
        // instance; both buffers are null-terminated and outlive the call.
        // Null parent and menu: a plain top-level window.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_OVERLAPPEDWINDOW,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                spec.width,
                spec.height,
                HWND::default(),
                HMENU::default(),
                self.instance,
                None,
            )
        }
        .map_err(|e| ShellError::WindowCreation {
            class: spec.class_name.clone(),
            code: e.code().0 as u32,
        })?;

        Ok(window_id(hwnd))
    }

    fn show_window(&self, window: WindowId, show: ShowCommand) {
        // SAFETY: window came from `create_window`. The return value is the
        // previous visibility state, not an error.
        unsafe {
            let _ = ShowWindow(hwnd(window), SHOW_WINDOW_CMD(show.as_raw()));
        }
    }

    fn update_window(&self, window: WindowId) {
        // SAFETY: window came from `create_window`; failure is not actionable.
        unsafe {
            let _ = UpdateWindow(hwnd(window));
        }
    }

    fn next_message(&self) -> Result<Fetched> {
        let mut msg = MSG::default();

        // SAFETY: &mut msg is a valid MSG pointer; a null HWND retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            -1 => Err(ShellError::Win32 {
                function: "GetMessageW",
                code: last_error_code(),
            }),
            // WM_QUIT: its WPARAM is the PostQuitMessage exit code.
            0 => Ok(Fetched::Quit(msg.wParam.0 as i32)),
            _ => Ok(Fetched::Message(message_from(
                msg.hwnd,
                msg.message,
                msg.wParam,
                msg.lParam,
            ))),
        }
    }

    fn translate_message(&self, message: &Message) {
        // SAFETY: the MSG is rebuilt from a message GetMessageW returned.
        // Whether a character message was generated is not needed.
        unsafe {
            let _ = TranslateMessage(&raw_msg(message));
        }
    }

    fn dispatch_message(&self, message: &Message) -> isize {
        // SAFETY: as above; DispatchMessageW calls `wnd_proc` synchronously.
        unsafe { DispatchMessageW(&raw_msg(message)) }.0
    }

    fn default_processing(&self, message: &Message) -> isize {
        // SAFETY: all parameters originate from Windows for this window.
        unsafe {
            DefWindowProcW(
                hwnd(message.window),
                message.id,
                WPARAM(message.wparam),
                LPARAM(message.lparam),
            )
        }
        .0
    }

    fn begin_paint(&self, window: WindowId) -> Win32Paint {
        let mut ps = PAINTSTRUCT::default();
        // SAFETY: called only while handling WM_PAINT for `window`; the
        // matching EndPaint is issued by `end_paint` via PaintSession's Drop.
        unsafe {
            let _ = BeginPaint(hwnd(window), &mut ps);
        }
        Win32Paint { ps }
    }

    fn draw_text(&self, ctx: &Win32Paint, origin: Point, text: &str) -> Result<()> {
        // TextOutW takes an explicit length, so no terminator.
        let text_wide: Vec<u16> = text.encode_utf16().collect();

        // SAFETY: ctx.ps.hdc is the device context returned by BeginPaint and
        // stays valid until EndPaint.
        let ok = unsafe { TextOutW(ctx.ps.hdc, origin.x, origin.y, &text_wide) };
        if ok.as_bool() {
            Ok(())
        } else {
            Err(ShellError::Win32 {
                function: "TextOutW",
                code: last_error_code(),
            })
        }
    }

    fn end_paint(&self, window: WindowId, ctx: Win32Paint) {
        // SAFETY: ctx.ps was filled by BeginPaint on this window.
        unsafe {
            let _ = EndPaint(hwnd(window), &ctx.ps);
        }
    }

    fn post_quit(&self, code: i32) {
        // SAFETY: posts WM_QUIT to this thread's queue; no preconditions.
        unsafe { PostQuitMessage(code) };
    }

    fn report_error(&self, message: &str) {
        show_error_dialog(message);
    }
}

// ── Public helpers ────────────────────────────────────────────────────────────

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide = wide(message);

    // SAFETY: msg_wide is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            ERROR_TITLE,
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    // Clone the route out so no borrow is held while the handler runs; the
    // handler may re-enter this procedure through default processing.
    let route = ROUTE.with(|route| route.borrow().clone());

    match route {
        Some((host, handler)) => {
            LRESULT(handler.handle(&host, &message_from(hwnd, msg, wparam, lparam)))
        }
        None => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

fn classify(id: u32) -> MessageKind {
    match id {
        WM_PAINT => MessageKind::Paint,
        WM_DESTROY => MessageKind::Destroy,
        other => MessageKind::Other(other),
    }
}

fn message_from(hwnd: HWND, id: u32, wparam: WPARAM, lparam: LPARAM) -> Message {
    Message {
        window: window_id(hwnd),
        id,
        kind: classify(id),
        wparam: wparam.0,
        lparam: lparam.0,
    }
}

fn raw_msg(message: &Message) -> MSG {
    MSG {
        hwnd: hwnd(message.window),
        message: message.id,
        wParam: WPARAM(message.wparam),
        lParam: LPARAM(message.lparam),
        ..Default::default()
    }
}

fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0 as isize)
}

fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut c_void)
}

fn stock_icon(icon: StockIcon) -> Result<HICON> {
    let id = match icon {
        StockIcon::Application => IDI_APPLICATION,
    };
    // SAFETY: loading a predefined system icon (null instance) always
    // succeeds on supported Windows versions.
    Ok(unsafe { LoadIconW(None, id) }?)
}

fn stock_cursor(cursor: StockCursor) -> Result<HCURSOR> {
    let id = match cursor {
        StockCursor::Arrow => IDC_ARROW,
    };
    // SAFETY: the arrow cursor is a built-in resource guaranteed to exist.
    Ok(unsafe { LoadCursorW(None, id) }?)
}

fn background_brush(background: Background) -> HBRUSH {
    match background {
        // System colour brushes are the colour index plus one.
        Background::WindowColor => HBRUSH((COLOR_WINDOW.0 + 1) as isize as *mut c_void),
    }
}

/// Encode `s` as a null-terminated UTF-16 buffer.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Read the thread's last-error code.
///
/// Call immediately after the failing Win32 function; any later API call may
/// overwrite it.
fn last_error_code() -> u32 {
    // SAFETY: GetLastError reads thread-local state and never fails.
    unsafe { GetLastError() }.0
}
