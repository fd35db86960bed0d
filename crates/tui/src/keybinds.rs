use crate::router::Route;

#[derive(Debug, Default)]
pub struct Keybinds;

impl Keybinds {
    pub fn help_text(&self, route: Route) -> String {
        let screen = match route {
            Route::Root => "",
            Route::Login => {
                r#"Sign in:
  Tab / ↓       Next field
  Shift+Tab / ↑ Previous field
  Enter         Sign in
"#
            }
            Route::Setup => {
                r#"Setup wizard:
  Tab / ↓       Next field
  Shift+Tab / ↑ Previous field
  Enter         Continue to the next step
  Esc           Back to the previous step
  Alt + 1..3    Jump to an already visited step
  Ctrl + N      Add an app (Apps step)
  Ctrl + D      Remove the focused app
  r             Restart after a failed setup
"#
            }
            Route::Dashboard => {
                r#"Dashboard:
  l             Log out
"#
            }
        };

        format!(
            r#"Keyboard Shortcuts:

{screen}
General:
  F1            Toggle this help
  F2            Show latest error details
  Ctrl + Q      Quit
"#
        )
    }
}
