mod clock;
mod logging;

use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphclock_config::Config;
use glyphclock_core::{ColorTheme, EffectKind, TimeFormat};
use glyphclock_effects::EffectStage;
use glyphclock_fonts::{FONT_HEIGHT, build_time_art};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};

use crate::clock::ClockReading;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    match logging::init(&config.log) {
        Ok(path) => info!(
            version = env!("CARGO_PKG_VERSION"),
            log = ?path,
            "glyphclock starting"
        ),
        Err(err) => eprintln!("glyphclock: logging disabled: {err:#}"),
    }
    if let Some(err) = config_error {
        warn!(%err, "falling back to the default configuration");
    }

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    info!(ok = result.is_ok(), "glyphclock stopped");
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current time format (12h or 24h).
    time_format: TimeFormat,
    /// Current color theme.
    color_theme: ColorTheme,
    /// Whether milliseconds are shown.
    show_millis: bool,
    /// Background effect behind the clock.
    stage: EffectStage,
    /// Settings written back by the save key.
    config: Config,
    /// Delay between redraws.
    frame_interval: Duration,
    /// App start, the zero point of effect time.
    started: Instant,
    /// One-line message shown in place of the key help.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded settings.
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            time_format: config.time_format,
            color_theme: config.color_theme,
            show_millis: config.show_millis,
            stage: EffectStage::new(config.effect, config.tuning.clone()),
            frame_interval: config.frame_interval(),
            config,
            started: Instant::now(),
            status: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.stage.stop();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let now = Local::now();
        let reading = ClockReading::new(&now, self.time_format, self.show_millis);
        let elapsed_ms = self.started.elapsed().as_millis() as u64;

        // Effect first, everything else draws over it
        self.stage
            .render(frame, elapsed_ms, reading.second, &reading.text);

        let date_str = now.format("%A, %B %d, %Y").to_string();
        let color = self.color_theme.color();
        let area = frame.area();

        let time_lines = build_time_art(self.time_format, reading.digits);

        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(FONT_HEIGHT as u16),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

        let time_text: Vec<Line> = time_lines
            .into_iter()
            .map(|s| Line::from(s).style(Style::new().fg(color)))
            .collect();
        frame.render_widget(
            Paragraph::new(time_text).alignment(Alignment::Center),
            chunks[1],
        );

        let date = Paragraph::new(date_str)
            .style(Style::new().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(date, chunks[3]);

        let footer = match &self.status {
            Some(message) => Line::from(message.clone().dark_gray()).centered(),
            None => self.help_line(),
        };
        frame.render_widget(footer, chunks[5]);
    }

    fn help_line(&self) -> Line<'static> {
        let color = self.color_theme.color();
        Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "t".bold().fg(color),
            " 12/24h  ".dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "e/E".bold().fg(color),
            format!(" effect ({})  ", self.stage.kind().name()).dark_gray(),
            "m".bold().fg(color),
            " millis  ".dark_gray(),
            "s".bold().fg(color),
            " save".dark_gray(),
        ])
        .centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the effect keeps animating.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        self.status = None;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.time_format = self.time_format.toggle(),
            (_, KeyCode::Char('c')) => self.color_theme = self.color_theme.next(),
            (_, KeyCode::Char('e')) => self.switch_effect(self.stage.kind().next()),
            (_, KeyCode::Char('E')) => self.switch_effect(self.stage.kind().prev()),
            (_, KeyCode::Char('m')) => self.show_millis = !self.show_millis,
            (_, KeyCode::Char('s')) => self.save_config(),
            _ => {}
        }
    }

    fn switch_effect(&mut self, kind: EffectKind) {
        self.stage.switch(kind);
    }

    /// Write the current display settings to the config file.
    fn save_config(&mut self) {
        self.config.effect = self.stage.kind();
        self.config.time_format = self.time_format;
        self.config.color_theme = self.color_theme;
        self.config.show_millis = self.show_millis;
        self.status = Some(match self.config.save() {
            Ok(path) => {
                info!(path = %path.display(), "configuration saved");
                format!("saved {}", path.display())
            }
            Err(err) => {
                warn!(%err, "failed to save configuration");
                format!("save failed: {err}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
