use super::*;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if key.code == KeyCode::Char('?')
            || key.code == KeyCode::Char('h') && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Ok(false);
        }

        if self.is_loading {
            return Ok(false);
        }

        if self.in_wizard {
            return self.handle_wizard_key(key);
        }

        self.handle_main_key(key)
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Left => self.go_to_step(self.wizard.step.previous()),
            KeyCode::Right => self.go_to_step(self.wizard.step.next()),
            KeyCode::Esc => {
                if self.wizard.step == WizardStep::ServerSetup {
                    self.should_quit = true;
                    return Ok(true);
                }
                self.go_to_step(self.wizard.step.previous());
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Enter => self.run_step_action(),
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_wizard_char(c)
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_wizard_char(&mut self, c: char) {
        match self.wizard.step {
            WizardStep::DeviceSelection => match c {
                'r' => self.connect_device_server(),
                'd' => self.disconnect_device_server(),
                _ => {}
            },
            WizardStep::Ready => {}
            _ => {
                if let Some(field) = self.focused_field_mut() {
                    field.push(c);
                }
            }
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Ok(true),
            _ => Ok(false),
        }
    }

    fn field_count(&self) -> usize {
        match self.wizard.step {
            WizardStep::ServerSetup => 2,
            WizardStep::ModelSetup => 3,
            _ => 0,
        }
    }

    pub(super) fn focused_field_mut(&mut self) -> Option<&mut String> {
        let settings = &mut self.wizard.settings;
        match (self.wizard.step, self.field_focus) {
            (WizardStep::ServerSetup, 0) => Some(&mut settings.device.host),
            (WizardStep::ServerSetup, 1) => Some(&mut settings.device.port),
            (WizardStep::ModelSetup, 0) => Some(&mut settings.model.host),
            (WizardStep::ModelSetup, 1) => Some(&mut settings.model.port),
            (WizardStep::ModelSetup, 2) => Some(&mut settings.model.api_key),
            _ => None,
        }
    }

    fn focus_next(&mut self) {
        if self.wizard.step == WizardStep::DeviceSelection {
            let len = self.wizard.settings.device.devices.len();
            if len > 0 {
                self.device_cursor = (self.device_cursor + 1) % len;
            }
            return;
        }
        let count = self.field_count();
        if count > 0 {
            self.field_focus = (self.field_focus + 1) % count;
        }
    }

    fn focus_previous(&mut self) {
        if self.wizard.step == WizardStep::DeviceSelection {
            let len = self.wizard.settings.device.devices.len();
            if len > 0 {
                self.device_cursor = (self.device_cursor + len - 1) % len;
            }
            return;
        }
        let count = self.field_count();
        if count > 0 {
            self.field_focus = (self.field_focus + count - 1) % count;
        }
    }
}
