use super::*;

impl App {
    /// Starts the process-wide auth check and mounts the landing route.
    pub fn start(&mut self) {
        self.check_auth();
        self.navigate(Route::Root);
    }

    fn check_auth(&mut self) {
        self.auth.begin_check();
        let backend = Arc::clone(&self.backend);
        self.spawn_app_task(async move {
            AppAsyncEvent::AuthChecked {
                result: backend.check().await,
            }
        });
    }

    /// Unmounts the current view and mounts `route` in its place.
    pub fn navigate(&mut self, route: Route) {
        self.mount.cancel.cancel();
        self.mount = Mount::new(self.mount.id + 1);
        self.setup = None;
        info!(from = self.route.path(), to = route.path(), "Navigating");
        self.route = route;
        self.on_mount();
    }

    fn on_mount(&mut self) {
        let backend = Arc::clone(&self.backend);
        let mount = self.mount.id;

        match self.route {
            Route::Root => {
                self.resolver = SessionResolver::new();
                self.resolver.record_auth(&self.auth);
                self.spawn_mounted_task(async move {
                    AppAsyncEvent::ModeChecked {
                        mount,
                        result: backend.check().await,
                    }
                });
            }
            Route::Login => {
                self.login = LoginForm::new();
            }
            Route::Setup => {
                self.setup = Some(SetupView::new());
                self.spawn_mounted_task(async move {
                    AppAsyncEvent::SetupGateChecked {
                        mount,
                        result: backend.check().await,
                    }
                });
            }
            Route::Dashboard => self.enforce_guard(),
        }
    }

    fn enforce_guard(&mut self) {
        if let GuardOutcome::Redirect(route) = RouteGuard::evaluate_route(self.route, &self.auth) {
            self.navigate(route);
        }
    }

    fn try_resolve_root(&mut self) {
        if self.route != Route::Root {
            return;
        }
        if let Some(destination) = self.resolver.decision() {
            info!(?destination, "Session resolved");
            self.navigate(destination.route());
        }
    }

    pub fn process_async_events(&mut self) {
        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }

        for event in async_events {
            // Logout has to clear the auth flag even if the dashboard is gone.
            let always_applies = matches!(event, AppAsyncEvent::LogoutFinished { .. });
            if let Some(mount) = event.mount() {
                if mount != self.mount.id && !always_applies {
                    debug!(mount, current = self.mount.id, "Dropping event from unmounted view");
                    continue;
                }
            }
            self.apply_async_event(event);
        }
    }

    fn apply_async_event(&mut self, event: AppAsyncEvent) {
        match event {
            AppAsyncEvent::AuthChecked { result } => {
                self.auth.resolve(&result);
                if self.route == Route::Root {
                    self.resolver.record_auth(&self.auth);
                    self.try_resolve_root();
                } else {
                    self.enforce_guard();
                }
            }
            AppAsyncEvent::ModeChecked { result, .. } => {
                self.resolver.record_mode(&result);
                self.try_resolve_root();
            }
            AppAsyncEvent::SetupGateChecked { result, .. } => match setup_gate(&result) {
                GuardOutcome::Redirect(route) => self.navigate(route),
                GuardOutcome::Render => {
                    if let Some(view) = self.setup.as_mut() {
                        view.gate = SetupGate::Open;
                    }
                }
                GuardOutcome::Hold => {}
            },
            AppAsyncEvent::SetupSubmitted { result, .. } => {
                match &result {
                    Ok(()) => self.clear_error(),
                    Err(e) => self.report_error("Setup failed", e),
                }
                if let Some(view) = self.setup.as_mut() {
                    view.wizard.finish_submission(&result);
                }
            }
            AppAsyncEvent::LoginFinished { result, .. } => match result {
                Ok(()) => {
                    info!("Signed in");
                    self.clear_error();
                    self.auth.logged_in();
                    self.navigate(Route::Dashboard);
                }
                Err(e) => {
                    self.report_error("Login failed", &e);
                    self.login.fail(e.user_message());
                }
            },
            AppAsyncEvent::LogoutFinished { mount, result } => {
                if let Err(e) = result {
                    warn!("Logout request failed, signing out locally: {}", e);
                }
                info!("Signed out");
                self.auth.logged_out();
                if mount == self.mount.id {
                    self.navigate(Route::Login);
                }
            }
        }
    }
}
