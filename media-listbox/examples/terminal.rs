//! Interactive listbox in the terminal.
//!
//! Arrows/Home/End move, Enter/Space select, letters search, `m` toggles
//! multiselect, Ctrl+C quits. Logs go to `listbox.log`.

use std::fs::File;
use std::io::{stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};
use media_listbox::{
    KeyInput, Lifecycle, Listbox, ListboxConfig, ListboxEvent, OptionItem, TokioDecayTimer,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

const RATES: [(&str, &str); 6] = [
    ("0.25", "Quarter speed"),
    ("0.5", "Half speed"),
    ("1", "Normal"),
    ("1.25", "A bit faster"),
    ("1.5", "One and a half"),
    ("2", "Double speed"),
];

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let log_file = File::create("listbox.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let (timer, mut fired) = TokioDecayTimer::channel();
    let mut listbox = Listbox::new(ListboxConfig::new(), timer);
    for (i, (value, text)) in RATES.iter().enumerate() {
        // "One and a half" is disabled to show skipping
        listbox.push_option(OptionItem::new(*value, *text).disabled(i == 4), *value == "1");
    }
    listbox.on_attach(&mut ());

    terminal::enable_raw_mode()?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    // crossterm reads block, so they run on their own thread and poll the
    // stop flag between reads
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let stop = Arc::clone(&stop);
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            while !stop.load(Ordering::Relaxed) {
                if event::poll(POLL_INTERVAL)? && input_tx.send(event::read()?).is_err() {
                    break;
                }
            }
            Ok(())
        })
    };

    let mut status = String::from("ready");
    draw(&listbox, &status)?;

    loop {
        tokio::select! {
            Some(raw) = input_rx.recv() => {
                let CrosstermEvent::Key(key) = raw else { continue };
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Char('c') && ctrl {
                    break;
                }
                if key.code == KeyCode::Char('m') && key.kind == event::KeyEventKind::Press {
                    let (old, new) = if listbox.is_multiselect() {
                        ("true", "false")
                    } else {
                        ("false", "true")
                    };
                    listbox.on_config_change("aria-multiselectable", Some(old), Some(new), &mut ());
                    continue;
                }

                let input = KeyInput::from(key);
                listbox.handle_key_input(&input);
                if let (false, KeyInput::Down(down)) = (enhanced, &input) {
                    // Without release reporting, treat every press as a full keystroke
                    listbox.handle_key_input(&KeyInput::Up(down.clone()));
                }
            }
            Ok(handle) = fired.recv() => {
                listbox.on_typeahead_timeout(handle);
            }
            else => break,
        }

        for event in listbox.take_events() {
            if event == ListboxEvent::Change {
                status = format!("change: value={:?}", listbox.value());
            }
        }
        draw(&listbox, &status)?;
    }

    stop.store(true, Ordering::Relaxed);
    if let Ok(Err(err)) = reader.await {
        log::warn!("[terminal] input reader failed: {}", err);
    }

    listbox.on_detach(&mut ());
    if enhanced {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    terminal::disable_raw_mode()?;
    Ok(())
}

fn draw(listbox: &Listbox<TokioDecayTimer>, status: &str) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

    let mode = if listbox.is_multiselect() { "multi" } else { "single" };
    write!(out, "Playback rate ({mode}, typed: {:?})\r\n\r\n", listbox.typeahead())?;
    for option in listbox.options() {
        let stop = if listbox.is_tab_stop(&option.id) { '>' } else { ' ' };
        let check = if listbox.is_selected(&option.id) { "[x]" } else { "[ ]" };
        let disabled = if option.disabled { " (disabled)" } else { "" };
        write!(out, "{stop} {check} {}{disabled}\r\n", option.text)?;
    }
    write!(out, "\r\n{status}\r\n")?;
    out.flush()
}
