use super::*;
use crate::wizard::{StatusLine, StatusTone, WizardViewModel};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default().fg(Color::Cyan),
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Error => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    }
}

fn tone_style(tone: StatusTone) -> Style {
    match tone {
        StatusTone::Muted => Style::default().fg(Color::DarkGray),
        StatusTone::Pending => Style::default().fg(Color::Cyan),
        StatusTone::Success => Style::default().fg(Color::Green),
    }
}

fn field_row(label: &str, value: &str, focused: bool, mask: bool) -> Line<'static> {
    let shown = if value.is_empty() {
        "[not set]".to_string()
    } else if mask {
        "********".to_string()
    } else {
        value.to_string()
    };

    let mut spans = vec![
        Span::raw(format!("  {label:<10} ")),
        Span::styled(
            shown,
            if focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ),
    ];
    if focused {
        spans.push(Span::styled(
            " [editing]",
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

fn status_row(label: &str, status: &StatusLine) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {label:<10} ")),
        Span::styled(status.text.clone(), tone_style(status.tone)),
    ])
}

fn action_row(label: &str, enabled: bool, disabled_hint: &str) -> Line<'static> {
    if enabled {
        Line::from(Span::styled(
            format!("  [ {label} ]  (press Enter)"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("  [ {label} ]  {disabled_hint}"),
            Style::default().fg(Color::DarkGray),
        ))
    }
}

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.is_loading {
            self.render_loading(frame, area);
            return;
        }

        if self.show_help {
            self.render_help(frame, area);
            return;
        }

        if self.in_wizard {
            self.render_wizard(frame, area);
        } else {
            self.render_main(frame, area);
        }

        self.render_notifications(frame, area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let text = format!("\n\n  {}  \n\n", self.loading_message);
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" haptic-chat "))
            .centered();
        frame.render_widget(paragraph, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.keybinds.help_text())
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_wizard(&self, frame: &mut Frame, area: Rect) {
        let vm = wizard::view_model(
            &self.wizard,
            self.device_connecting,
            self.model_connecting,
            self.device_cursor,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" haptic-chat setup ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_step_indicators(frame, chunks[0], &vm);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .percent(vm.progress_percent)
            .label("");
        frame.render_widget(gauge, chunks[1]);

        match vm.step {
            WizardStep::ServerSetup => self.render_server_setup(frame, chunks[2], &vm),
            WizardStep::DeviceSelection => self.render_device_selection(frame, chunks[2], &vm),
            WizardStep::ModelSetup => self.render_model_setup(frame, chunks[2], &vm),
            WizardStep::Ready => self.render_ready(frame, chunks[2], &vm),
        }

        let hints = Paragraph::new(" ←/→ step | Tab field | Enter action | ? help | Ctrl+Q quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, chunks[3]);
    }

    fn render_step_indicators(&self, frame: &mut Frame, area: Rect, vm: &WizardViewModel) {
        let mut spans = vec![Span::raw(" ")];
        for (i, indicator) in vm.indicators.iter().enumerate() {
            let marker = if indicator.completed { "✔" } else { "•" };
            let text = format!("[{}] {} {}", i + 1, indicator.title, marker);
            let style = if indicator.active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if indicator.completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(text, style));
            if i + 1 < vm.indicators.len() {
                spans.push(Span::raw("  →  "));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_server_setup(&self, frame: &mut Frame, area: Rect, vm: &WizardViewModel) {
        let device = &self.wizard.settings.device;
        let lines = vec![
            Line::raw(""),
            Line::raw("  Connect to the device server (Intiface Central)."),
            Line::raw(""),
            field_row("Host:", &device.host, self.field_focus == 0, false),
            field_row("Port:", &device.port, self.field_focus == 1, false),
            Line::raw(""),
            status_row("Status:", &vm.device_status),
            Line::raw(""),
            action_row(vm.connect_device_label, vm.connect_device_enabled, ""),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_device_selection(&self, frame: &mut Frame, area: Rect, vm: &WizardViewModel) {
        if vm.device_rows.is_empty() {
            let lines = vec![
                Line::raw(""),
                Line::raw("  No devices enumerated yet."),
                Line::raw(""),
                status_row("Server:", &vm.device_status),
                Line::raw(""),
                action_row("Scan for devices", vm.connect_device_enabled, ""),
            ];
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(2)])
            .split(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::raw(""),
                Line::raw("  Pick the device to drive:"),
            ]),
            chunks[0],
        );

        let items: Vec<ListItem> = vm
            .device_rows
            .iter()
            .map(|row| ListItem::new(format!("  {row}")))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("→");
        let mut list_state = ListState::default();
        list_state.select(Some(vm.device_cursor));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let mut footer = vec![Span::raw("  Enter select | r rescan")];
        if vm.disconnect_visible {
            footer.push(Span::raw(" | d disconnect"));
        }
        frame.render_widget(
            Paragraph::new(Line::from(footer)).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }

    fn render_model_setup(&self, frame: &mut Frame, area: Rect, vm: &WizardViewModel) {
        let model = &self.wizard.settings.model;
        let lines = vec![
            Line::raw(""),
            Line::raw("  Connect to the local model server (Ollama)."),
            Line::raw(""),
            field_row("Host:", &model.host, self.field_focus == 0, false),
            field_row("Port:", &model.port, self.field_focus == 1, false),
            field_row("API key:", &model.api_key, self.field_focus == 2, true),
            Line::raw(""),
            status_row("Status:", &vm.model_status),
            Line::raw(""),
            action_row(
                vm.connect_model_label,
                vm.connect_model_enabled,
                "(connect a device first)",
            ),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_ready(&self, frame: &mut Frame, area: Rect, vm: &WizardViewModel) {
        let device_name = self
            .wizard
            .settings
            .device
            .selected_device
            .as_ref()
            .map(|d| d.summary())
            .unwrap_or_else(|| "none".to_string());
        let model = &self.wizard.settings.model;

        let lines = vec![
            Line::raw(""),
            Line::raw("  Everything is wired up:"),
            Line::raw(""),
            Line::raw(format!("  Device:       {device_name}")),
            Line::raw(format!("  Model server: {}:{}", model.host, model.port)),
            Line::raw(""),
            action_row(
                "Start",
                vm.start_enabled,
                "(both connections are required)",
            ),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let device_name = self
            .wizard
            .settings
            .device
            .selected_device
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "no device".to_string());
        let model = &self.wizard.settings.model;

        let text = format!(
            "\n\n  Setup is complete.\n\n  Driving {device_name} with the model at {}:{}.\n\n  Press q to quit.\n",
            model.host, model.port
        );
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" haptic-chat "));
        frame.render_widget(paragraph, area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let shown = self.notifications.iter().rev().take(3).rev();
        let lines: Vec<Line> = shown
            .map(|n| {
                Line::from(Span::styled(
                    format!("{} ", n.text),
                    severity_style(n.severity),
                ))
            })
            .collect();
        let count = lines.len() as u16;
        let rect = Rect {
            x: area.x + 1,
            y: area.bottom().saturating_sub(count + 1),
            width: area.width.saturating_sub(2),
            height: count,
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Right), rect);
    }
}
