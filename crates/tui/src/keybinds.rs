pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Setup steps:
  ← / →         Previous/next step (always available)
  Esc           Back one step (quit from the first step)

Forms:
  Tab / ↑ / ↓   Switch field, or move the device cursor
  Enter         Run the step action (connect / select / start)
  Backspace     Delete the last character

Device step:
  r             Refresh the device list (reconnect)
  d             Disconnect from the device server

General:
  ?             Toggle this help
  Ctrl + Q      Quit
"#
        .to_string()
    }
}
