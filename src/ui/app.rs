use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local, Timelike};
use eframe::egui::{self, Align, Color32, Layout, RichText, TextEdit, TopBottomPanel, Ui};

use crate::alarm::AlarmEngine;
use crate::audio::Chime;
use crate::clock::ClockSource;
use crate::countdown::{CountdownEngine, CountdownStatus, MAX_HOURS, MAX_MINUTES, MAX_SECONDS};
use crate::i18n::{Language, translate};

const ALARM_POLL_INTERVAL: Duration = Duration::from_secs(1);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_gui(
    source: Box<dyn ClockSource>,
    language: Language,
    tick_ms: u64,
    mute: bool,
) -> Result<()> {
    let native_options = eframe::NativeOptions {
        vsync: false,
        viewport: egui::ViewportBuilder::default()
            .with_title("DualChrono")
            .with_inner_size([960.0, 620.0])
            .with_min_inner_size([760.0, 520.0]),
        ..Default::default()
    };

    let app = DualChronoApp::new(source, language, tick_ms, mute)?;

    eframe::run_native(
        "DualChrono",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch DualChrono GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(230, 233, 242));
    visuals.panel_fill = Color32::from_rgb(10, 12, 20);
    visuals.window_fill = Color32::from_rgb(14, 17, 27);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(13, 16, 26);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(22, 26, 40);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(36, 42, 64);
    visuals.widgets.active.bg_fill = Color32::from_rgb(52, 60, 94);
    visuals.selection.bg_fill = Color32::from_rgb(99, 102, 241);
    ctx.set_visuals(visuals);
}

struct DualChronoApp {
    source: Box<dyn ClockSource>,
    language: Language,
    countdown: CountdownEngine,
    alarm: AlarmEngine,
    chime: Chime,
    mute: bool,
    audio_notice_shown: bool,
    tick_step: Duration,
    latest_now: DateTime<Local>,
    next_alarm_poll: Instant,
    status_message: Option<(String, Instant)>,
    hours_input: String,
    minutes_input: String,
    seconds_input: String,
    alarm_time_input: String,
}

impl DualChronoApp {
    fn new(
        source: Box<dyn ClockSource>,
        language: Language,
        tick_ms: u64,
        mute: bool,
    ) -> Result<Self> {
        let latest_now = source.now()?;
        Ok(Self {
            source,
            language,
            countdown: CountdownEngine::new(),
            alarm: AlarmEngine::new(),
            chime: Chime::new(),
            mute,
            audio_notice_shown: false,
            tick_step: Duration::from_millis(tick_ms.clamp(1, 1000)),
            latest_now,
            next_alarm_poll: Instant::now(),
            status_message: None,
            hours_input: "0".to_string(),
            minutes_input: "0".to_string(),
            seconds_input: "0".to_string(),
            alarm_time_input: String::new(),
        })
    }

    fn tr(&self, key: &'static str) -> &'static str {
        translate(self.language, key)
    }

    fn set_status(&mut self, text: impl Into<String>, ttl: Duration) {
        self.status_message = Some((text.into(), Instant::now() + ttl));
    }

    fn advance_engines(&mut self) {
        self.latest_now = match self.source.now() {
            Ok(now) => now,
            Err(err) => {
                self.set_status(format!("Clock error: {err}"), Duration::from_secs(4));
                return;
            }
        };

        if self.countdown.tick(self.latest_now) {
            let text = self.tr("timeUp").to_string();
            self.set_status(text, Duration::from_secs(5));
        }

        if Instant::now() >= self.next_alarm_poll {
            if self.alarm.poll(self.latest_now) {
                let text = self.tr("alarmRinging").to_string();
                self.set_status(text, Duration::from_secs(5));
            }
            self.next_alarm_poll = Instant::now() + ALARM_POLL_INTERVAL;
        }

        self.refresh_chime();
    }

    /// The cue rings while either panel demands it and is released the moment
    /// neither does. A failed device open degrades to the visual indicator.
    fn refresh_chime(&mut self) {
        let should_ring = !self.mute
            && (self.countdown.status() == CountdownStatus::Completed || self.alarm.ringing());
        if should_ring {
            if !self.chime.is_playing()
                && let Err(err) = self.chime.play()
                && !self.audio_notice_shown
            {
                self.audio_notice_shown = true;
                let notice = format!("{}: {err}", self.tr("soundUnavailable"));
                self.set_status(notice, Duration::from_secs(5));
            }
        } else if self.chime.is_playing() {
            self.chime.stop();
        }
    }

    fn apply_countdown_inputs(&mut self) {
        let hours = parse_clamped(&self.hours_input, MAX_HOURS);
        let minutes = parse_clamped(&self.minutes_input, MAX_MINUTES);
        let seconds = parse_clamped(&self.seconds_input, MAX_SECONDS);
        self.countdown.configure(hours, minutes, seconds);
    }

    fn show_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("DualChrono")
                    .size(24.0)
                    .color(Color32::from_rgb(129, 140, 248))
                    .strong(),
            );
            ui.separator();
            ui.label(
                RichText::new(self.latest_now.format("%Y-%m-%d").to_string())
                    .color(Color32::from_rgb(156, 163, 175)),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button(self.tr("switchLanguage")).clicked() {
                    self.language = self.language.toggle();
                }
            });
        });
        if let Some((msg, _)) = &self.status_message {
            ui.label(
                RichText::new(msg)
                    .color(Color32::from_rgb(251, 191, 36))
                    .strong(),
            );
        }
    }

    fn show_countdown_panel(&mut self, ui: &mut Ui) {
        ui.heading(
            RichText::new(self.tr("countdown"))
                .color(Color32::from_rgb(129, 140, 248))
                .strong(),
        );
        ui.add_space(8.0);

        let status = self.countdown.status();
        let (hours, minutes, seconds) = self.countdown.display_parts();

        if status == CountdownStatus::Completed {
            ui.label(
                RichText::new(self.tr("timeUp"))
                    .size(34.0)
                    .color(Color32::from_rgb(248, 113, 113))
                    .strong(),
            );
        } else {
            let digit_color = match status {
                CountdownStatus::Running => Color32::from_rgb(129, 140, 248),
                CountdownStatus::Paused => Color32::from_rgb(251, 191, 36),
                _ => Color32::from_rgb(230, 233, 242),
            };
            ui.label(
                RichText::new(format_clock_digits(hours, minutes, seconds))
                    .size(46.0)
                    .color(digit_color)
                    .monospace()
                    .strong(),
            );
        }

        let badge = match status {
            CountdownStatus::Idle => self.tr("setDuration"),
            CountdownStatus::Running => self.tr("running"),
            CountdownStatus::Paused => self.tr("paused"),
            CountdownStatus::Completed => self.tr("timeUp"),
        };
        ui.label(RichText::new(badge).color(Color32::from_rgb(156, 163, 175)));
        ui.add_space(10.0);

        if status == CountdownStatus::Idle {
            let mut inputs_changed = false;
            ui.horizontal(|ui| {
                ui.label(self.tr("hours"));
                inputs_changed |= ui
                    .add(TextEdit::singleline(&mut self.hours_input).desired_width(48.0))
                    .changed();
                ui.label(self.tr("minutes"));
                inputs_changed |= ui
                    .add(TextEdit::singleline(&mut self.minutes_input).desired_width(48.0))
                    .changed();
                ui.label(self.tr("seconds"));
                inputs_changed |= ui
                    .add(TextEdit::singleline(&mut self.seconds_input).desired_width(48.0))
                    .changed();
            });
            if inputs_changed {
                self.apply_countdown_inputs();
            }
            ui.add_space(10.0);
        }

        ui.horizontal(|ui| match status {
            CountdownStatus::Completed => {
                if ui
                    .button(RichText::new(self.tr("dismiss")).strong())
                    .clicked()
                {
                    self.countdown.dismiss();
                    self.refresh_chime();
                }
            }
            CountdownStatus::Running => {
                if ui.button(self.tr("pause")).clicked() {
                    self.countdown.pause();
                }
                if ui.button(self.tr("reset")).clicked() {
                    self.countdown.reset();
                }
            }
            CountdownStatus::Paused => {
                if ui
                    .button(RichText::new(self.tr("resume")).strong())
                    .clicked()
                {
                    self.countdown.start(self.latest_now);
                }
                if ui.button(self.tr("reset")).clicked() {
                    self.countdown.reset();
                }
            }
            CountdownStatus::Idle => {
                if ui
                    .button(RichText::new(self.tr("start")).strong())
                    .clicked()
                {
                    self.apply_countdown_inputs();
                    self.countdown.start(self.latest_now);
                }
            }
        });
    }

    fn show_alarm_panel(&mut self, ui: &mut Ui) {
        ui.heading(
            RichText::new(self.tr("alarm"))
                .color(Color32::from_rgb(251, 191, 36))
                .strong(),
        );
        ui.add_space(8.0);

        ui.label(RichText::new(self.tr("currentTime")).color(Color32::from_rgb(156, 163, 175)));
        ui.label(
            RichText::new(format_clock_digits(
                self.latest_now.hour(),
                self.latest_now.minute(),
                self.latest_now.second(),
            ))
            .size(46.0)
            .monospace()
            .strong(),
        );
        ui.add_space(6.0);

        let badge = if let (true, Some(target)) = (self.alarm.armed(), self.alarm.target()) {
            format!("{} {}", self.tr("alarmSetFor"), target.format("%H:%M"))
        } else {
            self.tr("alarmOff").to_string()
        };
        let badge_color = if self.alarm.armed() {
            Color32::from_rgb(251, 191, 36)
        } else {
            Color32::from_rgb(107, 114, 128)
        };
        ui.label(RichText::new(badge).color(badge_color));
        ui.add_space(10.0);

        if self.alarm.ringing() {
            ui.label(
                RichText::new(self.tr("wakeUp"))
                    .size(30.0)
                    .color(Color32::from_rgb(251, 191, 36))
                    .strong(),
            );
            ui.add_space(6.0);
            if ui
                .button(RichText::new(self.tr("stopAlarm")).strong())
                .clicked()
            {
                self.alarm.dismiss();
                self.refresh_chime();
            }
            return;
        }

        ui.label(self.tr("setAlarmTime"));
        let time_placeholder = self.tr("timePlaceholder");
        let response = ui.add(
            TextEdit::singleline(&mut self.alarm_time_input)
                .hint_text(time_placeholder)
                .desired_width(90.0),
        );
        if response.changed() {
            match parse_alarm_time(&self.alarm_time_input) {
                Some((hour, minute)) => self.alarm.set_target(hour, minute),
                None => self.alarm.clear_target(),
            }
        }
        ui.add_space(6.0);

        if self.alarm.armed() {
            if ui
                .button(RichText::new(self.tr("alarmActive")).strong())
                .clicked()
            {
                self.alarm.disarm();
            }
        } else {
            let can_arm = self.alarm.target().is_some();
            let arm_button = egui::Button::new(RichText::new(self.tr("setAlarm")).strong());
            if ui.add_enabled(can_arm, arm_button).clicked() {
                self.alarm.arm(self.latest_now);
            }
        }
    }
}

impl eframe::App for DualChronoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }

        self.advance_engines();

        TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.show_header(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.show_countdown_panel(&mut columns[0]);
                self.show_alarm_panel(&mut columns[1]);
            });
        });

        // Sub-second cadence only while a run is live; the alarm poll and the
        // clock readout are happy with a coarser repaint.
        let wait = if self.countdown.status() == CountdownStatus::Running {
            self.tick_step
        } else {
            IDLE_REPAINT_INTERVAL
        };
        ctx.request_repaint_after(wait);
    }
}

fn format_clock_digits(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Numeric field parsing at the input boundary: non-numeric collapses to 0,
/// values clamp to the field's domain.
fn parse_clamped(input: &str, max: u32) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0).min(max)
}

fn parse_alarm_time(input: &str) -> Option<(u32, u32)> {
    let (hour_text, minute_text) = input.trim().split_once(':')?;
    let hour = hour_text.parse::<u32>().ok()?;
    let minute = minute_text.parse::<u32>().ok()?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}
