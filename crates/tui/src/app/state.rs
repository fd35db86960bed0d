use super::*;

/// The routed view currently on screen. Unmounting cancels `cancel`, which
/// stops every task the view started.
pub struct Mount {
    pub id: MountId,
    pub cancel: CancellationToken,
}

impl Mount {
    pub(super) fn new(id: MountId) -> Self {
        Self {
            id,
            cancel: CancellationToken::new(),
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub backend: Arc<dyn Backend>,
    pub route: Route,
    pub mount: Mount,
    pub auth: AuthState,
    pub resolver: SessionResolver,
    pub login: LoginForm,
    pub setup: Option<SetupView>,
    pub keybinds: Keybinds,
    pub show_help: bool,
    pub last_error: Option<String>,
    pub show_error_details: bool,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
}

impl App {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            config,
            backend,
            route: Route::Root,
            mount: Mount::new(0),
            auth: AuthState::new(),
            resolver: SessionResolver::new(),
            login: LoginForm::new(),
            setup: None,
            keybinds: Keybinds,
            show_help: false,
            last_error: None,
            show_error_details: false,
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
        }
    }
}
