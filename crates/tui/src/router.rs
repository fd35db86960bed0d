/// Client-side destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Setup,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Setup => "/setup",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}
