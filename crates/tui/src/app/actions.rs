use super::*;

impl App {
    pub(super) fn submit_login(&mut self) {
        let Some(request) = self.login.begin_submit() else {
            return;
        };
        let backend = Arc::clone(&self.backend);
        let mount = self.mount.id;
        self.spawn_mounted_task(async move {
            AppAsyncEvent::LoginFinished {
                mount,
                result: backend.login(&request).await,
            }
        });
    }

    pub(super) fn logout(&mut self) {
        let backend = Arc::clone(&self.backend);
        let mount = self.mount.id;
        self.spawn_app_task(async move {
            AppAsyncEvent::LogoutFinished {
                mount,
                result: backend.logout().await,
            }
        });
    }

    pub(super) fn advance_wizard(&mut self) {
        let Some(view) = self.setup.as_mut() else {
            return;
        };

        let payload = match view.wizard.next() {
            Advance::Invalid(errors) => {
                debug!(errors = errors.len(), "Step did not validate");
                None
            }
            Advance::Moved(step) => {
                debug!(step = step.title(), "Moved to next step");
                view.reset_focus();
                None
            }
            Advance::Submit(payload) => {
                view.reset_focus();
                Some(payload)
            }
            Advance::Ignored => None,
        };

        if let Some(payload) = payload {
            info!(apps = payload.apps.len(), "Submitting setup");
            let backend = Arc::clone(&self.backend);
            let mount = self.mount.id;
            let timeout = self.config.setup.submit_timeout();
            self.spawn_mounted_task(async move {
                AppAsyncEvent::SetupSubmitted {
                    mount,
                    result: zen_setup::submit_setup(backend.as_ref(), &payload, timeout).await,
                }
            });
        }
    }

    pub(super) fn wizard_back(&mut self) {
        if let Some(view) = self.setup.as_mut() {
            if view.wizard.prev() {
                view.reset_focus();
            }
        }
    }

    pub(super) fn jump_to_step(&mut self, index: usize) {
        let Some(step) = WizardStep::from_index(index) else {
            return;
        };
        if let Some(view) = self.setup.as_mut() {
            if view.wizard.jump_to(step) {
                view.reset_focus();
            }
        }
    }

    /// Throws away the failed wizard and mounts a fresh one.
    pub(super) fn restart_setup(&mut self) {
        let can_restart = self
            .setup
            .as_ref()
            .is_some_and(|view| view.wizard.can_restart());
        if can_restart {
            info!("Restarting setup");
            self.clear_error();
            self.navigate(Route::Setup);
        }
    }
}
