// ── Shell lifecycle ───────────────────────────────────────────────────────────
//
// Register class → create window → show/update → pump messages.  Startup is
// all-or-nothing: any failure is reported to the user and becomes exit code 1
// before the loop is ever entered.

use std::rc::Rc;

use crate::{config::ShellConfig, error::Result};

use super::{
    handler::GreetingHandler, Background, ClassStyle, Fetched, Host, ShowCommand, StockCursor,
    StockIcon, WindowClass, WindowId, WindowSpec,
};

/// Exit code for any startup or loop failure.
pub(crate) const FAILURE_EXIT_CODE: i32 = 1;

/// Establishes and runs exactly one native window on `H`.
pub(crate) struct Shell<H: Host> {
    host: H,
    config: ShellConfig,
    handler: Rc<GreetingHandler>,
}

impl<H: Host> Shell<H> {
    pub(crate) fn new(host: H, config: ShellConfig) -> Self {
        let handler = Rc::new(GreetingHandler::new(
            config.greeting.clone(),
            config.text_origin,
        ));
        Self {
            host,
            config,
            handler,
        }
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub(crate) fn handler(&self) -> &GreetingHandler {
        &self.handler
    }

    /// Build the class descriptor around the greeting handler.
    pub(crate) fn window_class(&self) -> WindowClass<H> {
        WindowClass {
            name: self.config.class_name.clone(),
            style: ClassStyle {
                redraw_on_horizontal_resize: true,
                redraw_on_vertical_resize: true,
            },
            handler: self.handler.clone(),
            extra_bytes: 0,
            icon: StockIcon::Application,
            small_icon: StockIcon::Application,
            cursor: StockCursor::Arrow,
            background: Background::WindowColor,
            menu: None,
        }
    }

    /// Register the main window class with the host.
    pub(crate) fn initialize(&self) -> Result<()> {
        self.host.register_class(&self.window_class())?;
        log::debug!("window class {:?} registered", self.config.class_name);
        Ok(())
    }

    /// Create the single top-level window.
    pub(crate) fn create_main_window(&self) -> Result<WindowId> {
        let spec = WindowSpec {
            class_name: self.config.class_name.clone(),
            title: self.config.title.clone(),
            width: self.config.width,
            height: self.config.height,
        };
        let window = self.host.create_window(&spec)?;
        log::debug!(
            "main window {window:?} created ({}x{})",
            spec.width,
            spec.height
        );
        Ok(window)
    }

    /// Make `window` visible per `show` and paint it immediately.
    pub(crate) fn show(&self, window: WindowId, show: ShowCommand) {
        self.host.show_window(window, show);
        self.host.update_window(window);
    }

    /// Pump messages until the quit sentinel arrives; returns its payload.
    pub(crate) fn run_message_loop(&self) -> Result<i32> {
        loop {
            match self.host.next_message()? {
                Fetched::Quit(code) => {
                    log::info!(
                        "message loop finished with exit code {code} ({:?})",
                        self.handler.state()
                    );
                    return Ok(code);
                }
                Fetched::Message(message) => {
                    self.host.translate_message(&message);
                    self.host.dispatch_message(&message);
                }
            }
        }
    }

    /// Initialize, create, show, and run.
    pub(crate) fn run(&self, show: ShowCommand) -> Result<i32> {
        self.initialize()?;
        let window = self.create_main_window()?;
        self.show(window, show);
        self.run_message_loop()
    }

    /// Run to completion and produce the process exit code.
    ///
    /// Failures are logged, shown to the user through the host's modal
    /// notification, and mapped to `FAILURE_EXIT_CODE`.
    pub(crate) fn launch(&self, show: ShowCommand) -> i32 {
        match self.run(show) {
            Ok(code) => code,
            Err(e) => {
                log::error!("{e}");
                self.host.report_error(&e.to_string());
                FAILURE_EXIT_CODE
            }
        }
    }
}
